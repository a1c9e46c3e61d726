//! `BytesM` expression lowering: `sha{...} -> sha256(...)` plus the
//! shared varRef-or-literal tail.

use super::{lower_bytes_expr, lower_string_expr, resolve_var_or_literal};
use crate::context::Converter;
use crate::error::ConvertError;
use crate::input::{BytesMExpr, ShaOperand};
use crate::types::{RawScalar, Type};

pub fn lower_bytesm_expr(cx: &mut Converter, expr: &BytesMExpr) -> Result<String, ConvertError> {
    match expr {
        BytesMExpr::VarRef => {
            let ty = cx.expected_type()?;
            resolve_var_or_literal(cx, &ty, None, false)
        }
        BytesMExpr::Literal { value } => {
            let ty = cx.expected_type()?;
            resolve_var_or_literal(cx, &ty, Some(RawScalar::Bytes(value.clone())), false)
        }
        BytesMExpr::Sha { operand } => lower_sha(cx, operand),
    }
}

/// §4.4: the operand variant picks its own sub-type (`strVal` ->
/// `String{100}`, `bVal` -> `Bytes{100}`, `bmVal` -> `BytesM{32}`). The
/// result is always a 32-byte hash; per the Open Question decision in
/// SPEC_FULL.md we always coerce by slicing when the outer expected
/// width is narrower than 32, rather than emitting a mistyped value.
fn lower_sha(cx: &mut Converter, operand: &ShaOperand) -> Result<String, ConvertError> {
    let rendered = match operand {
        ShaOperand::StrVal(s) => {
            cx.type_stack.push(Type::String { max_len: 100 });
            let r = lower_string_expr(cx, s);
            cx.type_stack.pop();
            r?
        }
        ShaOperand::BVal(b) => {
            cx.type_stack.push(Type::Bytes { max_len: 100 });
            let r = lower_bytes_expr(cx, b);
            cx.type_stack.pop();
            r?
        }
        ShaOperand::BmVal(bm) => {
            cx.type_stack.push(Type::BytesM { m: 32 });
            let r = lower_bytesm_expr(cx, bm);
            cx.type_stack.pop();
            r?
        }
    };
    let sha_expr = format!("sha256({rendered})");
    let outer = cx.expected_type()?;
    if let Type::BytesM { m } = outer {
        if m < 32 {
            return Ok(format!("slice({sha_expr}, 0, {m})"));
        }
    }
    Ok(sha_expr)
}
