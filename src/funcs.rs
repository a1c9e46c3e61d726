//! Function tracker: ordered registry of function records, with
//! renderers for call sites and signature heads.

use crate::mutability::Mutability;
use crate::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub enum Visibility {
    External,
    Internal,
}

impl Visibility {
    pub fn annotation(self) -> &'static str {
        match self {
            Visibility::External => "@external",
            Visibility::Internal => "@internal",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FunctionRecord {
    pub name: String,
    pub mutability: Mutability,
    pub visibility: Visibility,
    pub inputs: Vec<Type>,
    pub outputs: Vec<Type>,
}

#[derive(Debug, Default)]
pub struct FunctionTracker {
    records: Vec<FunctionRecord>,
}

impl FunctionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh, monotonic function name `func_<index>`.
    pub fn next_name(&self) -> String {
        format!("func_{}", self.records.len())
    }

    pub fn register(&mut self, record: FunctionRecord) {
        self.records.push(record);
    }

    /// Index of the most recently registered function.
    pub fn current_id(&self) -> Option<usize> {
        self.records.len().checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FunctionRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// `self.<name>(<args>)`
    pub fn render_call(&self, name: &str, args: &[String]) -> String {
        format!("self.{name}({})", args.join(", "))
    }

    /// `def <name>(<args>)` head — caller appends the output clause and
    /// trailing colon.
    pub fn render_signature(&self, name: &str, args: &[String]) -> String {
        format!("def {name}({})", args.join(", "))
    }
}
