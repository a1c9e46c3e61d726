//! Expression visitor: per-type recursive descent over expression
//! variants, emitting infix/prefix/call syntax with precedence.
//!
//! Dispatch happens on the expected type (top of the type stack); each
//! submodule owns one type's variants. The tail every typed visitor
//! shares — resolve a `varRef` or fall back to a literal — lives here in
//! [`resolve_var_or_literal`], along with the binary/unary operator
//! helper that both `int` and `decimal` (and the boolean comparison
//! forms) use for parenthesization.

mod address;
mod bool_;
mod bytes_string;
mod bytesm;
mod decimal;
mod int;

pub use address::lower_address_expr;
pub use bool_::lower_bool_expr;
pub use bytes_string::{lower_bytes_expr, lower_string_expr};
pub use bytesm::lower_bytesm_expr;
pub use decimal::lower_decimal_expr;
pub use int::lower_int_expr;

use crate::context::Converter;
use crate::error::ConvertError;
use crate::input::Expr;
use crate::types::{RawScalar, Type};

/// Dispatch on the `Expr` sum, used wherever the category isn't already
/// implied by the caller's context (declarations, assignments, return
/// slots).
pub fn lower_expr(cx: &mut Converter, expr: &Expr) -> Result<String, ConvertError> {
    match expr {
        Expr::Bool(e) => lower_bool_expr(cx, e),
        Expr::Decimal(e) => lower_decimal_expr(cx, e),
        Expr::Address(e) => lower_address_expr(cx, e),
        Expr::Int(e) => lower_int_expr(cx, e),
        Expr::BytesM(e) => lower_bytesm_expr(cx, e),
        Expr::Bytes(e) => lower_bytes_expr(cx, e),
        Expr::String(e) => lower_string_expr(cx, e),
    }
}

/// Shared tail for every typed expression (§4.4): try a variable
/// reference first; if none is in scope, render a literal. Referencing a
/// global escalates mutability to at least `View`; writing to one (the
/// caller passes `is_write = true` from the assignment path) escalates
/// to at least `NonPayable`. Global references render `self.<name>`;
/// locals render bare.
pub fn resolve_var_or_literal(
    cx: &mut Converter,
    ty: &Type,
    raw: Option<RawScalar>,
    is_write: bool,
) -> Result<String, ConvertError> {
    let level = cx.var_level();
    if let Some((name, is_global)) = cx.vars.pick(level, ty, cx.rng_mut()) {
        if is_global {
            cx.escalate(if is_write { crate::mutability::Mutability::NonPayable } else { crate::mutability::Mutability::View });
            return Ok(format!("self.{name}"));
        }
        return Ok(name);
    }
    match raw {
        Some(r) => Ok(ty.generate_literal(&r)),
        None => Err(ConvertError::InternalInvariant(
            "no variable in scope and no literal fallback scalar".to_string(),
        )),
    }
}

/// Lower a binary operator node: push `op` onto the op stack, lower both
/// operands, pop, and wrap in parentheses iff the op stack is still
/// non-empty afterward (i.e. this expression is nested under an outer
/// operator).
pub fn lower_binop(
    cx: &mut Converter,
    op: &str,
    table: &[&str],
    left: impl FnOnce(&mut Converter) -> Result<String, ConvertError>,
    right: impl FnOnce(&mut Converter) -> Result<String, ConvertError>,
) -> Result<String, ConvertError> {
    if !table.contains(&op) {
        return Err(ConvertError::InternalInvariant(format!("operator `{op}` not in table")));
    }
    cx.op_stack.push(op.to_string());
    let l = left(cx)?;
    let r = right(cx)?;
    cx.op_stack.pop();
    let inner = format!("{l} {op} {r}");
    Ok(if cx.op_stack.is_empty() { inner } else { format!("({inner})") })
}

/// Lower a unary-minus node with the sentinel operator token.
pub fn lower_unop(
    cx: &mut Converter,
    sentinel: &str,
    prefix: &str,
    operand: impl FnOnce(&mut Converter) -> Result<String, ConvertError>,
) -> Result<String, ConvertError> {
    cx.op_stack.push(sentinel.to_string());
    let inner_val = operand(cx)?;
    cx.op_stack.pop();
    let inner = format!("{prefix}{inner_val}");
    Ok(if cx.op_stack.is_empty() { inner } else { format!("({inner})") })
}
