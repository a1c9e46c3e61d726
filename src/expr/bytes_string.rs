//! `Bytes` and `String` expression lowering: varRef-or-literal only, no
//! operators.

use super::resolve_var_or_literal;
use crate::context::Converter;
use crate::error::ConvertError;
use crate::input::{BytesExpr, StringExpr};
use crate::types::RawScalar;

pub fn lower_bytes_expr(cx: &mut Converter, expr: &BytesExpr) -> Result<String, ConvertError> {
    match expr {
        BytesExpr::VarRef => {
            let ty = cx.expected_type()?;
            resolve_var_or_literal(cx, &ty, None, false)
        }
        BytesExpr::Literal { value } => {
            let ty = cx.expected_type()?;
            resolve_var_or_literal(cx, &ty, Some(RawScalar::Bytes(value.clone())), false)
        }
    }
}

pub fn lower_string_expr(cx: &mut Converter, expr: &StringExpr) -> Result<String, ConvertError> {
    match expr {
        StringExpr::VarRef => {
            let ty = cx.expected_type()?;
            resolve_var_or_literal(cx, &ty, None, false)
        }
        StringExpr::Literal { value } => {
            let ty = cx.expected_type()?;
            resolve_var_or_literal(cx, &ty, Some(RawScalar::Str(value.clone())), false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;

    #[test]
    fn string_literal_is_quoted() {
        let mut cx = Converter::new(1);
        cx.type_stack.push(Type::String { max_len: 20 });
        let expr = StringExpr::Literal { value: "hi".to_string() };
        assert_eq!(lower_string_expr(&mut cx, &expr).unwrap(), "\"hi\"");
    }

    #[test]
    fn bytes_varref_falls_back_to_literal_when_no_candidates() {
        let mut cx = Converter::new(1);
        cx.type_stack.push(Type::Bytes { max_len: 20 });
        // No registered Bytes var, but VarRef with no literal fallback
        // is an internal-invariant bug in the caller, not malformed input.
        let expr = BytesExpr::VarRef;
        assert!(lower_bytes_expr(&mut cx, &expr).is_err());
    }
}
