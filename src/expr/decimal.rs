//! `Decimal` expression lowering — mirrors `int.rs`: same binary/unary
//! operator tables, same parenthesization discipline.

use super::{lower_binop, lower_unop, resolve_var_or_literal};
use crate::context::Converter;
use crate::error::ConvertError;
use crate::helpers::{INT_BIN_OPS, UN_MINUS};
use crate::input::DecimalExpr;
use crate::types::RawScalar;

pub fn lower_decimal_expr(cx: &mut Converter, expr: &DecimalExpr) -> Result<String, ConvertError> {
    match expr {
        DecimalExpr::VarRef => {
            let ty = cx.expected_type()?;
            resolve_var_or_literal(cx, &ty, None, false)
        }
        DecimalExpr::Literal { value } => {
            let ty = cx.expected_type()?;
            resolve_var_or_literal(cx, &ty, Some(RawScalar::Decimal(*value)), false)
        }
        DecimalExpr::BinOp { op, left, right } => lower_binop(
            cx,
            op,
            INT_BIN_OPS,
            |cx| lower_decimal_expr(cx, left),
            |cx| lower_decimal_expr(cx, right),
        ),
        DecimalExpr::UnOp { expr: inner } => lower_unop(cx, UN_MINUS, "-", |cx| lower_decimal_expr(cx, inner)),
    }
}
