//! Converter state: the single mutable object every visitor shares.
//!
//! Bundles the type stack, op stack, block-depth counter, monotonic
//! mutability level, variable/function trackers, and the seeded PRNG
//! into one struct passed by mutable reference, rather than leaning on
//! ambient/global mutable state.

use crate::error::ConvertError;
use crate::funcs::FunctionTracker;
use crate::mutability::Mutability;
use crate::types::Type;
use crate::vars::VariableTracker;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub struct Converter {
    pub vars: VariableTracker,
    pub funcs: FunctionTracker,
    pub type_stack: Vec<Type>,
    pub op_stack: Vec<String>,
    pub block_level: usize,
    pub mutability: Mutability,
    /// Depth of for-loop nesting; `continue`/`break` are only valid when
    /// this is `> 0`.
    pub for_depth: usize,
    rng: ChaCha8Rng,
}

impl Converter {
    pub fn new(seed: u64) -> Self {
        Converter {
            vars: VariableTracker::new(),
            funcs: FunctionTracker::new(),
            type_stack: Vec::new(),
            op_stack: Vec::new(),
            block_level: 0,
            mutability: Mutability::Pure,
            for_depth: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Scope level to pass to the variable tracker: `None` at storage
    /// scope, `Some(block_level)` inside a function.
    pub fn var_level(&self) -> Option<usize> {
        if self.block_level == 0 { None } else { Some(self.block_level) }
    }

    /// Top of the type stack: the expected type for the expression
    /// currently being lowered.
    pub fn expected_type(&self) -> Result<Type, ConvertError> {
        self.type_stack
            .last()
            .cloned()
            .ok_or_else(|| ConvertError::InternalInvariant("type stack underflow".to_string()))
    }

    /// Monotonic upward move on the mutability lattice.
    pub fn escalate(&mut self, level: Mutability) {
        if level > self.mutability {
            self.mutability = level;
        }
    }
}
