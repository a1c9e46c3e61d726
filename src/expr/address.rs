//! `Address` expression lowering: `cmp{...}` (`create_minimal_proxy_to`)
//! and `cfb{...}` (`create_from_blueprint`), both of which escalate
//! mutability to at least `NonPayable`.

use super::{lower_bytesm_expr, lower_int_expr, resolve_var_or_literal};
use crate::context::Converter;
use crate::error::ConvertError;
use crate::input::{AddressExpr, CreateFromBlueprint, CreateMinimalProxyTo};
use crate::mutability::Mutability;
use crate::types::{RawScalar, Type};

pub fn lower_address_expr(cx: &mut Converter, expr: &AddressExpr) -> Result<String, ConvertError> {
    match expr {
        AddressExpr::VarRef => {
            let ty = cx.expected_type()?;
            resolve_var_or_literal(cx, &ty, None, false)
        }
        AddressExpr::Literal { value } => {
            let ty = cx.expected_type()?;
            resolve_var_or_literal(cx, &ty, Some(RawScalar::Bytes(value.clone())), false)
        }
        AddressExpr::Cmp(node) => lower_cmp(cx, node),
        AddressExpr::Cfb(node) => lower_cfb(cx, node),
    }
}

fn with_type<T>(
    cx: &mut Converter,
    ty: Type,
    f: impl FnOnce(&mut Converter) -> Result<T, ConvertError>,
) -> Result<T, ConvertError> {
    cx.type_stack.push(ty);
    let result = f(cx);
    cx.type_stack.pop();
    result
}

fn lower_cmp(cx: &mut Converter, node: &CreateMinimalProxyTo) -> Result<String, ConvertError> {
    let target = with_type(cx, Type::Address, |cx| lower_address_expr(cx, &node.target_addr))?;
    let mut args = vec![target];
    if let Some(value) = &node.value {
        let v = with_type(cx, Type::Int { width: 256, signed: false }, |cx| lower_int_expr(cx, value))?;
        args.push(format!("value={v}"));
    }
    if let Some(salt) = &node.salt {
        let s = with_type(cx, Type::BytesM { m: 32 }, |cx| lower_bytesm_expr(cx, salt))?;
        args.push(format!("salt={s}"));
    }
    cx.escalate(Mutability::NonPayable);
    Ok(format!("create_minimal_proxy_to({})", args.join(", ")))
}

fn lower_cfb(cx: &mut Converter, node: &CreateFromBlueprint) -> Result<String, ConvertError> {
    let target = with_type(cx, Type::Address, |cx| lower_address_expr(cx, &node.target_addr))?;
    let mut args = vec![target];
    if let Some(raw_args) = &node.raw_args {
        let v = with_type(cx, Type::Bool, |cx| super::lower_bool_expr(cx, raw_args))?;
        args.push(format!("raw_args={v}"));
    }
    if let Some(value) = &node.value {
        let v = with_type(cx, Type::Int { width: 256, signed: false }, |cx| lower_int_expr(cx, value))?;
        args.push(format!("value={v}"));
    }
    if let Some(code_offset) = &node.code_offset {
        let v = with_type(cx, Type::Int { width: 256, signed: false }, |cx| lower_int_expr(cx, code_offset))?;
        args.push(format!("code_offset={v}"));
    }
    if let Some(salt) = &node.salt {
        let s = with_type(cx, Type::BytesM { m: 32 }, |cx| lower_bytesm_expr(cx, salt))?;
        args.push(format!("salt={s}"));
    }
    cx.escalate(Mutability::NonPayable);
    Ok(format!("create_from_blueprint({})", args.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::AddressExpr;

    #[test]
    fn cmp_with_varref_target_renders_and_escalates() {
        let mut cx = Converter::new(1);
        cx.vars.register_global("var0".to_string(), Type::Address);
        let expr = AddressExpr::Cmp(CreateMinimalProxyTo {
            target_addr: Box::new(AddressExpr::VarRef),
            value: None,
            salt: None,
        });
        cx.type_stack.push(Type::Address);
        assert_eq!(lower_address_expr(&mut cx, &expr).unwrap(), "create_minimal_proxy_to(self.var0)");
        assert!(cx.mutability >= Mutability::NonPayable);
    }

    #[test]
    fn cmp_renders_kwargs_only_when_present() {
        let mut cx = Converter::new(1);
        cx.vars.register_global("var0".to_string(), Type::Address);
        let expr = AddressExpr::Cmp(CreateMinimalProxyTo {
            target_addr: Box::new(AddressExpr::VarRef),
            value: Some(Box::new(crate::input::IntExpr::Literal { value: 5 })),
            salt: None,
        });
        cx.type_stack.push(Type::Address);
        assert_eq!(
            lower_address_expr(&mut cx, &expr).unwrap(),
            "create_minimal_proxy_to(self.var0, value=5)"
        );
    }
}
