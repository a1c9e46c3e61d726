//! `Int` expression lowering: binary/unary operators plus the shared
//! varRef-or-literal tail.

use super::{lower_binop, lower_unop, resolve_var_or_literal};
use crate::context::Converter;
use crate::error::ConvertError;
use crate::helpers::{INT_BIN_OPS, UN_MINUS};
use crate::input::IntExpr;
use crate::types::RawScalar;

pub fn lower_int_expr(cx: &mut Converter, expr: &IntExpr) -> Result<String, ConvertError> {
    match expr {
        IntExpr::VarRef => {
            let ty = cx.expected_type()?;
            resolve_var_or_literal(cx, &ty, None, false)
        }
        IntExpr::Literal { value } => {
            let ty = cx.expected_type()?;
            resolve_var_or_literal(cx, &ty, Some(RawScalar::Int(*value)), false)
        }
        IntExpr::BinOp { op, left, right } => {
            lower_binop(cx, op, INT_BIN_OPS, |cx| lower_int_expr(cx, left), |cx| lower_int_expr(cx, right))
        }
        IntExpr::UnOp { expr: inner } => lower_unop(cx, UN_MINUS, "-", |cx| lower_int_expr(cx, inner)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;

    fn cx() -> Converter {
        let mut cx = Converter::new(1);
        cx.type_stack.push(Type::Int { width: 256, signed: false });
        cx
    }

    #[test]
    fn literal_renders_plain() {
        let mut cx = cx();
        let expr = IntExpr::Literal { value: 7 };
        assert_eq!(lower_int_expr(&mut cx, &expr).unwrap(), "7");
    }

    #[test]
    fn binop_at_top_level_is_unparenthesized() {
        let mut cx = cx();
        let expr = IntExpr::BinOp {
            op: "+".to_string(),
            left: Box::new(IntExpr::Literal { value: 1 }),
            right: Box::new(IntExpr::Literal { value: 2 }),
        };
        assert_eq!(lower_int_expr(&mut cx, &expr).unwrap(), "1 + 2");
    }

    #[test]
    fn nested_binop_is_parenthesized() {
        let mut cx = cx();
        let inner = IntExpr::BinOp {
            op: "+".to_string(),
            left: Box::new(IntExpr::Literal { value: 1 }),
            right: Box::new(IntExpr::Literal { value: 2 }),
        };
        let outer = IntExpr::BinOp {
            op: "*".to_string(),
            left: Box::new(inner),
            right: Box::new(IntExpr::Literal { value: 3 }),
        };
        assert_eq!(lower_int_expr(&mut cx, &outer).unwrap(), "(1 + 2) * 3");
    }

    #[test]
    fn unary_minus_emits_prefix() {
        let mut cx = cx();
        let expr = IntExpr::UnOp { expr: Box::new(IntExpr::Literal { value: 5 }) };
        assert_eq!(lower_int_expr(&mut cx, &expr).unwrap(), "-5");
    }

    #[test]
    fn unknown_operator_is_internal_invariant() {
        let mut cx = cx();
        let expr = IntExpr::BinOp {
            op: "@@".to_string(),
            left: Box::new(IntExpr::Literal { value: 1 }),
            right: Box::new(IntExpr::Literal { value: 2 }),
        };
        assert!(matches!(lower_int_expr(&mut cx, &expr), Err(ConvertError::InternalInvariant(_))));
    }
}
