//! Small shared utilities: indentation and operator tables.

/// Four spaces per level of lexical nesting.
pub const TAB: &str = "    ";

/// `TAB` repeated `level` times, prefixed to every emitted line.
pub fn indent(level: usize) -> String {
    TAB.repeat(level)
}

/// Arithmetic/bitwise operators valid for `Int`/`Decimal` `binOp`.
pub const INT_BIN_OPS: &[&str] = &["+", "-", "*", "/", "%", "**", "&", "|", "^", "<<", ">>"];

/// Sentinel operator token pushed for a unary minus.
pub const UN_MINUS: &str = "unMinus";

/// `Bool`/`Bool` logical and equality operators (`boolBinOp`).
pub const BOOL_BIN_OPS: &[&str] = &["and", "or", "==", "!="];

/// Comparison operators shared by `intBoolBinOp` and `decBoolBinOp`
/// (`decBoolBinOp` is treated unambiguously as using this table — see
/// the Open Question decision in SPEC_FULL.md).
pub const COMPARISON_BIN_OPS: &[&str] = &["==", "!=", "<", "<=", ">", ">="];
