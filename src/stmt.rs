//! Statement visitor (§4.5): declaration, assignment-with-decl-fallback,
//! the two `for` forms, `if`/`elif`/`else`, `assert`, and the
//! loop-gated `continue`/`break`, plus block/terminator composition.
//!
//! Every renderer returns text already indented for its own call depth —
//! a multi-line result (an `if`, a `for`) carries its nested lines'
//! indentation baked in, so callers simply join, never re-indent.

use crate::context::Converter;
use crate::error::ConvertError;
use crate::expr::{lower_address_expr, lower_bool_expr, lower_expr, lower_string_expr};
use crate::helpers::indent;
use crate::input::{resolve_type, Block, IfCase, StringExpr, Stmt, Terminator, TypeNode};
use crate::mutability::Mutability;
use crate::types::Type;

pub fn lower_stmt(
    cx: &mut Converter,
    stmt: &Stmt,
    level: usize,
    outputs: &[Type],
) -> Result<String, ConvertError> {
    match stmt {
        Stmt::Decl { ty, expr } => lower_decl(cx, ty, expr, level),
        Stmt::Assign { ty, expr } => lower_assign(cx, ty, expr, level),
        Stmt::ForRange { start, stop, body } => lower_for_range(cx, *start, *stop, body, level, outputs),
        Stmt::ForLength { length, anchor_requested, body } => {
            lower_for_length(cx, *length, *anchor_requested, body, level, outputs)
        }
        Stmt::If { cases, else_body } => lower_if(cx, cases, else_body.as_deref(), level, outputs),
        Stmt::Assert { cond, msg } => lower_assert(cx, cond, msg.as_deref(), level),
        Stmt::Continue { fallback } => {
            if cx.for_depth > 0 {
                Ok(format!("{}continue", indent(level)))
            } else {
                lower_stmt(cx, fallback, level, outputs)
            }
        }
        Stmt::Break { fallback } => {
            if cx.for_depth > 0 {
                Ok(format!("{}break", indent(level)))
            } else {
                lower_stmt(cx, fallback, level, outputs)
            }
        }
    }
}

fn fresh_binding(cx: &mut Converter, ty: &Type, level: usize) -> String {
    let id = cx.vars.next_id(ty);
    let name = format!("x_{}_{id}", ty.tag());
    cx.vars.register_function(name.clone(), level, ty.clone());
    name
}

fn lower_decl(cx: &mut Converter, ty_node: &TypeNode, expr: &crate::input::Expr, level: usize) -> Result<String, ConvertError> {
    let ty = resolve_type(ty_node);
    cx.type_stack.push(ty.clone());
    let rhs = lower_expr(cx, expr);
    cx.type_stack.pop();
    let rhs = rhs?;
    let name = fresh_binding(cx, &ty, level);
    Ok(format!("{}{name}: {} = {rhs}", indent(level), ty.render()))
}

/// Try to find an existing in-scope variable of the declared type; if
/// found, assign into it (escalating mutability for a global target). If
/// not found, there is nothing to assign into, so fall back to a fresh
/// local declaration instead.
fn lower_assign(cx: &mut Converter, ty_node: &TypeNode, expr: &crate::input::Expr, level: usize) -> Result<String, ConvertError> {
    let ty = resolve_type(ty_node);
    cx.type_stack.push(ty.clone());
    let rhs = lower_expr(cx, expr);
    cx.type_stack.pop();
    let rhs = rhs?;
    let scope_level = if level == 0 { None } else { Some(level) };
    match cx.vars.pick(scope_level, &ty, cx.rng_mut()) {
        Some((name, true)) => {
            cx.escalate(Mutability::NonPayable);
            Ok(format!("{}self.{name} = {rhs}", indent(level)))
        }
        Some((name, false)) => Ok(format!("{}{name} = {rhs}", indent(level))),
        None => {
            let name = fresh_binding(cx, &ty, level);
            Ok(format!("{}{name}: {} = {rhs}", indent(level), ty.render()))
        }
    }
}

fn enter_block(cx: &mut Converter, level: usize) -> usize {
    let outer = cx.block_level;
    cx.block_level = level;
    outer
}

fn exit_block(cx: &mut Converter, outer_level: usize) {
    cx.vars.exit_to(outer_level);
    cx.block_level = outer_level;
}

fn lower_for_range(
    cx: &mut Converter,
    start: i64,
    stop: i64,
    body: &Block,
    level: usize,
    outputs: &[Type],
) -> Result<String, ConvertError> {
    let (lo, hi) = if start <= stop { (start, stop) } else { (stop, start) };
    let id = cx.vars.next_induction_id();
    let var_name = format!("i_{id}");
    let inner_level = level + 1;
    let outer = enter_block(cx, inner_level);
    cx.vars.register_function(var_name.clone(), inner_level, Type::Int { width: 256, signed: false });
    cx.for_depth += 1;
    let rendered = lower_block(cx, body, inner_level, outputs);
    cx.for_depth -= 1;
    exit_block(cx, outer);
    let body_text = rendered?;
    Ok(format!("{}for {var_name} in range({lo}, {hi}):\n{body_text}", indent(level)))
}

fn lower_for_length(
    cx: &mut Converter,
    length: i64,
    anchor_requested: bool,
    body: &Block,
    level: usize,
    outputs: &[Type],
) -> Result<String, ConvertError> {
    let uint256 = Type::Int { width: 256, signed: false };
    let range_expr = if anchor_requested {
        let scope_level = if level == 0 { None } else { Some(level) };
        let anchor = match cx.vars.pick(scope_level, &uint256, cx.rng_mut()) {
            Some((name, true)) => {
                cx.escalate(Mutability::View);
                format!("self.{name}")
            }
            Some((name, false)) => name,
            None => "0".to_string(),
        };
        format!("range({anchor}, {anchor} + {length})")
    } else {
        format!("range({length})")
    };
    let id = cx.vars.next_induction_id();
    let var_name = format!("i_{id}");
    let inner_level = level + 1;
    let outer = enter_block(cx, inner_level);
    cx.vars.register_function(var_name.clone(), inner_level, uint256);
    cx.for_depth += 1;
    let rendered = lower_block(cx, body, inner_level, outputs);
    cx.for_depth -= 1;
    exit_block(cx, outer);
    let body_text = rendered?;
    Ok(format!("{}for {var_name} in {range_expr}:\n{body_text}", indent(level)))
}

/// §4.5's zero-cases special case renders a single always-false branch so
/// the block is never empty; otherwise the first case is `if`, every
/// subsequent case is `elif`, and a present `else_body` is appended last.
fn lower_if(
    cx: &mut Converter,
    cases: &[IfCase],
    else_body: Option<&Block>,
    level: usize,
    outputs: &[Type],
) -> Result<String, ConvertError> {
    if cases.is_empty() {
        return Ok(format!("{}if False:\n{}pass", indent(level), indent(level + 1)));
    }
    let mut parts = Vec::with_capacity(cases.len() + 1);
    for (i, case) in cases.iter().enumerate() {
        cx.type_stack.push(Type::Bool);
        let cond = lower_bool_expr(cx, &case.cond);
        cx.type_stack.pop();
        let cond = cond?;
        let keyword = if i == 0 { "if" } else { "elif" };
        let inner_level = level + 1;
        let outer = enter_block(cx, inner_level);
        let rendered = lower_block(cx, &case.body, inner_level, outputs);
        exit_block(cx, outer);
        let body_text = rendered?;
        parts.push(format!("{}{keyword} {cond}:\n{body_text}", indent(level)));
    }
    if let Some(eb) = else_body {
        let inner_level = level + 1;
        let outer = enter_block(cx, inner_level);
        let rendered = lower_block(cx, eb, inner_level, outputs);
        exit_block(cx, outer);
        let body_text = rendered?;
        parts.push(format!("{}else:\n{body_text}", indent(level)));
    }
    Ok(parts.join("\n"))
}

fn lower_assert(cx: &mut Converter, cond: &crate::input::BoolExpr, msg: Option<&StringExpr>, level: usize) -> Result<String, ConvertError> {
    cx.type_stack.push(Type::Bool);
    let cond_rendered = lower_bool_expr(cx, cond);
    cx.type_stack.pop();
    let cond_rendered = cond_rendered?;
    let line = match msg {
        Some(m) => {
            cx.type_stack.push(Type::String { max_len: 100 });
            let rendered = lower_string_expr(cx, m);
            cx.type_stack.pop();
            format!("assert {cond_rendered}, {}", rendered?)
        }
        None => format!("assert {cond_rendered}"),
    };
    Ok(format!("{}{line}", indent(level)))
}

pub fn lower_terminator(cx: &mut Converter, term: &Terminator, outputs: &[Type]) -> Result<String, ConvertError> {
    match term {
        Terminator::Selfdestruct { addr } => {
            cx.type_stack.push(Type::Address);
            let rendered = lower_address_expr(cx, addr);
            cx.type_stack.pop();
            cx.escalate(Mutability::NonPayable);
            Ok(format!("selfdestruct({})", rendered?))
        }
        Terminator::Raise { msg } => match msg {
            Some(m) => {
                cx.type_stack.push(Type::String { max_len: 100 });
                let rendered = lower_string_expr(cx, m);
                cx.type_stack.pop();
                Ok(format!("raise {}", rendered?))
            }
            None => Ok("raise".to_string()),
        },
        // Only the first `|outputs|` slots are taken; extras are padding
        // carried by the wire format's fixed-size slot array (§4.5).
        Terminator::Return { slots } => {
            if outputs.is_empty() {
                return Ok("return".to_string());
            }
            let mut rendered = Vec::with_capacity(outputs.len());
            for (slot, ty) in slots.iter().zip(outputs.iter()) {
                cx.type_stack.push(ty.clone());
                let r = lower_expr(cx, slot);
                cx.type_stack.pop();
                rendered.push(r?);
            }
            if rendered.len() == 1 {
                Ok(format!("return {}", rendered[0]))
            } else {
                Ok(format!("return ({})", rendered.join(", ")))
            }
        }
    }
}

/// Render a block's statements in order, then its terminator if present,
/// padding with a single `pass` when the block would otherwise be empty
/// (a bare terminator is not empty).
pub fn lower_block(cx: &mut Converter, block: &Block, level: usize, outputs: &[Type]) -> Result<String, ConvertError> {
    let mut lines = Vec::with_capacity(block.stmts.len() + 1);
    for stmt in &block.stmts {
        lines.push(lower_stmt(cx, stmt, level, outputs)?);
    }
    if let Some(term) = &block.terminator {
        lines.push(format!("{}{}", indent(level), lower_terminator(cx, term, outputs)?));
    }
    if lines.is_empty() {
        lines.push(format!("{}pass", indent(level)));
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{BoolExpr, Expr, IntExpr, TypeNode};

    fn int_node() -> TypeNode {
        TypeNode { i: Some(crate::input::IntNode { n: 255, sign: false }), ..Default::default() }
    }

    #[test]
    fn decl_allocates_fresh_binding_and_renders_initializer() {
        let mut cx = Converter::new(1);
        let stmt = Stmt::Decl { ty: int_node(), expr: Expr::Int(IntExpr::Literal { value: 7 }) };
        let rendered = lower_stmt(&mut cx, &stmt, 1, &[]).unwrap();
        assert_eq!(rendered, "    x_INT_0: uint256 = 7");
    }

    #[test]
    fn assign_falls_back_to_decl_when_no_candidate_in_scope() {
        let mut cx = Converter::new(1);
        let stmt = Stmt::Assign { ty: int_node(), expr: Expr::Int(IntExpr::Literal { value: 3 }) };
        let rendered = lower_stmt(&mut cx, &stmt, 1, &[]).unwrap();
        assert_eq!(rendered, "    x_INT_0: uint256 = 3");
    }

    #[test]
    fn assign_targets_existing_global_with_self_prefix() {
        let mut cx = Converter::new(1);
        cx.vars.register_global("var0".to_string(), Type::Int { width: 256, signed: false });
        let stmt = Stmt::Assign { ty: int_node(), expr: Expr::Int(IntExpr::Literal { value: 3 }) };
        let rendered = lower_stmt(&mut cx, &stmt, 1, &[]).unwrap();
        assert_eq!(rendered, "    self.var0 = 3");
        assert!(cx.mutability >= Mutability::NonPayable);
    }

    #[test]
    fn for_range_sorts_descending_bounds() {
        let mut cx = Converter::new(1);
        let body = Block::default();
        let stmt = Stmt::ForRange { start: 5, stop: 1, body };
        let rendered = lower_stmt(&mut cx, &stmt, 0, &[]).unwrap();
        assert_eq!(rendered, "for i_0 in range(1, 5):\n    pass");
    }

    #[test]
    fn for_length_without_anchor_renders_single_arg_range() {
        let mut cx = Converter::new(1);
        let stmt = Stmt::ForLength { length: 10, anchor_requested: false, body: Block::default() };
        let rendered = lower_stmt(&mut cx, &stmt, 0, &[]).unwrap();
        assert_eq!(rendered, "for i_0 in range(10):\n    pass");
    }

    #[test]
    fn empty_if_cases_render_false_guard() {
        let mut cx = Converter::new(1);
        let stmt = Stmt::If { cases: vec![], else_body: None };
        let rendered = lower_stmt(&mut cx, &stmt, 0, &[]).unwrap();
        assert_eq!(rendered, "if False:\n    pass");
    }

    #[test]
    fn if_elif_else_render_in_order() {
        let mut cx = Converter::new(1);
        let stmt = Stmt::If {
            cases: vec![
                IfCase { cond: Box::new(BoolExpr::Literal { value: true }), body: Block::default() },
                IfCase { cond: Box::new(BoolExpr::Literal { value: false }), body: Block::default() },
            ],
            else_body: Some(Box::new(Block::default())),
        };
        let rendered = lower_stmt(&mut cx, &stmt, 0, &[]).unwrap();
        assert_eq!(rendered, "if True:\n    pass\nelif False:\n    pass\nelse:\n    pass");
    }

    #[test]
    fn assert_without_message() {
        let mut cx = Converter::new(1);
        let stmt = Stmt::Assert { cond: Box::new(BoolExpr::Literal { value: true }), msg: None };
        assert_eq!(lower_stmt(&mut cx, &stmt, 1, &[]).unwrap(), "    assert True");
    }

    #[test]
    fn continue_outside_loop_falls_back() {
        let mut cx = Converter::new(1);
        let fallback = Box::new(Stmt::Assert { cond: Box::new(BoolExpr::Literal { value: true }), msg: None });
        let stmt = Stmt::Continue { fallback };
        assert_eq!(lower_stmt(&mut cx, &stmt, 1, &[]).unwrap(), "    assert True");
    }

    #[test]
    fn continue_inside_loop_renders_keyword() {
        let mut cx = Converter::new(1);
        cx.for_depth = 1;
        let fallback = Box::new(Stmt::Assert { cond: Box::new(BoolExpr::Literal { value: true }), msg: None });
        let stmt = Stmt::Continue { fallback };
        assert_eq!(lower_stmt(&mut cx, &stmt, 1, &[]).unwrap(), "    continue");
    }

    #[test]
    fn return_with_single_slot_has_no_parens() {
        let mut cx = Converter::new(1);
        let term = Terminator::Return { slots: vec![Expr::Int(IntExpr::Literal { value: 1 })] };
        let outputs = [Type::Int { width: 256, signed: false }];
        assert_eq!(lower_terminator(&mut cx, &term, &outputs).unwrap(), "return 1");
    }

    #[test]
    fn return_with_multiple_slots_is_tupled() {
        let mut cx = Converter::new(1);
        let term = Terminator::Return {
            slots: vec![Expr::Int(IntExpr::Literal { value: 1 }), Expr::Bool(BoolExpr::Literal { value: true })],
        };
        let outputs = [Type::Int { width: 256, signed: false }, Type::Bool];
        assert_eq!(lower_terminator(&mut cx, &term, &outputs).unwrap(), "return (1, True)");
    }
}
