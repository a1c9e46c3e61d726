//! `vyper-gen`: a structured program generator.
//!
//! Converts a typed, tree-shaped contract description into syntactically
//! valid, type-correct target-language (Vyper-like) source text, for use
//! as fuzzer-generated input to differential compiler testing. A single
//! recursive visitor walks the input tree once, threading a type stack,
//! an operator stack, a scoped variable tracker, and a monotonically
//! escalating mutability level through an explicit [`Converter`] rather
//! than ambient mutable state.
//!
//! See [`convert`] for the entry point.

pub mod config;
pub mod context;
pub mod contract;
pub mod error;
pub mod expr;
pub mod funcs;
pub mod helpers;
pub mod input;
pub mod mutability;
pub mod stmt;
pub mod types;
pub mod vars;

pub use config::ConverterConfig;
pub use context::Converter;
pub use error::ConvertError;
pub use input::ContractInput;

/// Convert a contract tree into target-language source text. Pure in
/// `(input, seed, config)`: running it twice with the same arguments
/// produces byte-identical output, since the only source of
/// nondeterminism — the variable tracker's random selection — is driven
/// by a PRNG seeded here and never touched again once lowering starts.
pub fn convert(input: &ContractInput, seed: u64, config: &ConverterConfig) -> Result<String, ConvertError> {
    let mut cx = Converter::new(seed);
    contract::lower_contract(&mut cx, input, config)
}
