//! Converter error types.
//!
//! Mirrors the two error kinds called out by the conversion contract: bad
//! input versus a bug in the converter itself. Neither kind is ever raised
//! for in-schema input — see the per-module fallback paths in `stmt.rs` and
//! `expr/mod.rs`.

/// Error type for conversion operations.
#[derive(Debug)]
pub enum ConvertError {
    /// The input tree violates the schema (out-of-schema wire data).
    MalformedInput(String),
    /// A stack underflow, unknown type tag, or missing dispatch key.
    /// Indicates a bug in the converter, not bad input.
    InternalInvariant(String),
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::MalformedInput(s) => write!(f, "malformed input: {s}"),
            ConvertError::InternalInvariant(s) => write!(f, "internal invariant violated: {s}"),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<std::fmt::Error> for ConvertError {
    fn from(e: std::fmt::Error) -> Self {
        ConvertError::InternalInvariant(format!("formatting error: {e}"))
    }
}
