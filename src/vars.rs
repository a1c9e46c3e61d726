//! Variable tracker: scoped name allocator and lookup over
//! `(type -> live variables)`.
//!
//! Identifiers are `x_<TAG>_<index>` for ordinary variables, with `index`
//! monotonic per tag and never reused even after the binding's scope
//! drops. Loop induction variables use a separate `i_<index>` counter
//! allocated the same way. Visibility is a strict lexical stack: exiting
//! a block drops every binding registered at a strictly greater level.

use crate::types::Type;
use rand::Rng;
use std::collections::HashMap;

/// Where a binding lives: global (storage) scope, or a function-local
/// scope at a given block depth (`1` = function body, `>=2` nested).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingLevel {
    Global,
    Local(usize),
}

#[derive(Debug, Clone)]
struct Binding {
    name: String,
    ty: Type,
    level: BindingLevel,
}

#[derive(Debug, Default)]
pub struct VariableTracker {
    counters: HashMap<&'static str, u32>,
    induction_counter: u32,
    bindings: Vec<Binding>,
}

impl VariableTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh, never-reused identifier index for a type tag.
    pub fn next_id(&mut self, ty: &Type) -> u32 {
        let counter = self.counters.entry(ty.tag()).or_insert(0);
        let id = *counter;
        *counter += 1;
        id
    }

    /// Fresh loop-induction-variable index, `i_<index>`.
    pub fn next_induction_id(&mut self) -> u32 {
        let id = self.induction_counter;
        self.induction_counter += 1;
        id
    }

    pub fn register_global(&mut self, name: String, ty: Type) {
        self.bindings.push(Binding { name, ty, level: BindingLevel::Global });
    }

    pub fn register_function(&mut self, name: String, level: usize, ty: Type) {
        self.bindings.push(Binding { name, ty, level: BindingLevel::Local(level) });
    }

    pub fn get_global_vars(&self, ty: &Type) -> Vec<&str> {
        self.bindings
            .iter()
            .filter(|b| b.level == BindingLevel::Global && &b.ty == ty)
            .map(|b| b.name.as_str())
            .collect()
    }

    /// Every variable of `ty` visible at `level`: globals, plus locals
    /// registered at depth `<= level`. `level = None` restricts to
    /// globals only.
    pub fn get_all_allowed_vars(&self, level: Option<usize>, ty: &Type) -> Vec<&str> {
        self.bindings
            .iter()
            .filter(|b| &b.ty == ty)
            .filter(|b| match (b.level, level) {
                (BindingLevel::Global, _) => true,
                (BindingLevel::Local(_), None) => false,
                (BindingLevel::Local(l), Some(max)) => l <= max,
            })
            .map(|b| b.name.as_str())
            .collect()
    }

    /// Drop every binding registered at a strictly greater level than
    /// `level` — called when a block at `level + 1` (or deeper) exits.
    pub fn exit_to(&mut self, level: usize) {
        self.bindings.retain(|b| match b.level {
            BindingLevel::Global => true,
            BindingLevel::Local(l) => l <= level,
        });
    }

    /// Uniformly pick one in-scope variable of `ty`, or `None` if there
    /// are no candidates. The caller supplies the PRNG so a whole
    /// conversion run is reproducible from `(input, seed)`. Returns
    /// whether the picked binding is global, since global references are
    /// rendered `self.<name>` and locals are rendered bare.
    pub fn pick(&self, level: Option<usize>, ty: &Type, rng: &mut impl Rng) -> Option<(String, bool)> {
        let candidates: Vec<&Binding> = self
            .bindings
            .iter()
            .filter(|b| &b.ty == ty)
            .filter(|b| match (b.level, level) {
                (BindingLevel::Global, _) => true,
                (BindingLevel::Local(_), None) => false,
                (BindingLevel::Local(l), Some(max)) => l <= max,
            })
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..candidates.len());
        let picked = candidates[idx];
        Some((picked.name.clone(), picked.level == BindingLevel::Global))
    }

    pub fn is_global(&self, name: &str) -> bool {
        self.bindings
            .iter()
            .any(|b| b.name == name && b.level == BindingLevel::Global)
    }
}
