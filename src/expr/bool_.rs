//! `Bool` expression lowering: logical/equality operators, the boolean
//! `not`, and the two comparison forms that borrow `Int`/`Decimal` as
//! their operands' expected sub-type.

use super::{lower_binop, lower_decimal_expr, lower_int_expr, lower_unop, resolve_var_or_literal};
use crate::context::Converter;
use crate::error::ConvertError;
use crate::helpers::{BOOL_BIN_OPS, COMPARISON_BIN_OPS};
use crate::input::BoolExpr;
use crate::types::{RawScalar, Type};

const BOOL_NOT: &str = "boolNot";

pub fn lower_bool_expr(cx: &mut Converter, expr: &BoolExpr) -> Result<String, ConvertError> {
    match expr {
        BoolExpr::VarRef => {
            let ty = cx.expected_type()?;
            resolve_var_or_literal(cx, &ty, None, false)
        }
        BoolExpr::Literal { value } => {
            let ty = cx.expected_type()?;
            resolve_var_or_literal(cx, &ty, Some(RawScalar::Bool(*value)), false)
        }
        BoolExpr::BoolBinOp { op, left, right } => {
            lower_binop(cx, op, BOOL_BIN_OPS, |cx| lower_bool_expr(cx, left), |cx| lower_bool_expr(cx, right))
        }
        BoolExpr::BoolUnOp { expr: inner } => {
            lower_unop(cx, BOOL_NOT, "not ", |cx| lower_bool_expr(cx, inner))
        }
        BoolExpr::IntBoolBinOp { op, left, right } => {
            cx.type_stack.push(Type::Int { width: 256, signed: false });
            let result = lower_binop(cx, op, COMPARISON_BIN_OPS, |cx| lower_int_expr(cx, left), |cx| lower_int_expr(cx, right));
            cx.type_stack.pop();
            result
        }
        // Treated unambiguously as using the comparison table, per the
        // Open Question decision recorded in SPEC_FULL.md.
        BoolExpr::DecBoolBinOp { op, left, right } => {
            cx.type_stack.push(Type::Decimal);
            let result = lower_binop(cx, op, COMPARISON_BIN_OPS, |cx| lower_decimal_expr(cx, left), |cx| lower_decimal_expr(cx, right));
            cx.type_stack.pop();
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::IntExpr;

    fn cx() -> Converter {
        let mut cx = Converter::new(1);
        cx.type_stack.push(Type::Bool);
        cx
    }

    #[test]
    fn bool_literal_renders_python_style() {
        let mut cx = cx();
        assert_eq!(lower_bool_expr(&mut cx, &BoolExpr::Literal { value: true }).unwrap(), "True");
        assert_eq!(lower_bool_expr(&mut cx, &BoolExpr::Literal { value: false }).unwrap(), "False");
    }

    #[test]
    fn bool_not_renders_prefix() {
        let mut cx = cx();
        let expr = BoolExpr::BoolUnOp { expr: Box::new(BoolExpr::Literal { value: true }) };
        assert_eq!(lower_bool_expr(&mut cx, &expr).unwrap(), "not True");
    }

    #[test]
    fn int_comparison_pushes_int_subtype_and_restores() {
        let mut cx = cx();
        let expr = BoolExpr::IntBoolBinOp {
            op: "<".to_string(),
            left: Box::new(IntExpr::Literal { value: 1 }),
            right: Box::new(IntExpr::Literal { value: 2 }),
        };
        assert_eq!(lower_bool_expr(&mut cx, &expr).unwrap(), "1 < 2");
        assert_eq!(cx.type_stack, vec![Type::Bool]);
    }
}
