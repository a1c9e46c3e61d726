//! Input schema: a structured, tree-shaped contract description.
//!
//! The original wire format is a schema-driven binary record where every
//! variant discriminator is a "which optional field is present" check
//! (absence chooses a default branch). Two different places in this
//! schema call for two different Rust shapes:
//!
//! - `TypeNode` keeps the presence-struct shape (`Option<T>` fields) to
//!   stay literally compatible with the type-declaration wire examples
//!   (`{bM:{m:63}}`, `{i:{n:511,sign:false}}`, ...); `resolve_type`
//!   normalizes it into the closed-sum `Type` the rest of the converter
//!   works with.
//! - Everywhere else (expressions, statements, terminators) there is no
//!   external wire example to match, so the schema is expressed directly
//!   as a closed sum (an internally-tagged enum) rather than as another
//!   presence struct with a priority-ordered fallback.

use crate::funcs::Visibility;
use crate::mutability::Mutability;
use crate::types::{RawScalar, Type, coerce_bytesm_width, coerce_int_width, coerce_max_len};
use serde::Deserialize;

/// A type declared in the input tree, before §4.2's coercions are applied.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TypeNode {
    pub b: Option<UnitNode>,
    pub d: Option<UnitNode>,
    #[serde(rename = "bM")]
    pub bm: Option<BytesMNode>,
    pub s: Option<LenNode>,
    pub adr: Option<UnitNode>,
    pub barr: Option<LenNode>,
    pub i: Option<IntNode>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UnitNode {}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct BytesMNode {
    #[serde(default)]
    pub m: u32,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LenNode {
    #[serde(default)]
    pub max_len: u32,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct IntNode {
    #[serde(default)]
    pub n: u32,
    #[serde(default)]
    pub sign: bool,
}

/// §4.2: pick exactly one present field, priority `b, d, bM, s, adr,
/// barr`, else `Int`, and apply the numeric coercions that guarantee the
/// synthesized type is always valid.
pub fn resolve_type(node: &TypeNode) -> Type {
    if node.b.is_some() {
        Type::Bool
    } else if node.d.is_some() {
        Type::Decimal
    } else if let Some(bm) = &node.bm {
        Type::BytesM { m: coerce_bytesm_width(bm.m) }
    } else if let Some(s) = &node.s {
        Type::String { max_len: coerce_max_len(s.max_len) }
    } else if node.adr.is_some() {
        Type::Address
    } else if let Some(barr) = &node.barr {
        Type::Bytes { max_len: coerce_max_len(barr.max_len) }
    } else {
        let i = node.i.clone().unwrap_or_default();
        Type::Int { width: coerce_int_width(i.n), signed: i.sign }
    }
}

/// Comparison/logical/arithmetic operator token, carried through as-is
/// from the input (validated against the relevant operator table at
/// lowering time).
pub type Op = String;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum IntExpr {
    VarRef,
    BinOp { op: Op, left: Box<IntExpr>, right: Box<IntExpr> },
    UnOp { expr: Box<IntExpr> },
    Literal { value: i128 },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum DecimalExpr {
    VarRef,
    BinOp { op: Op, left: Box<DecimalExpr>, right: Box<DecimalExpr> },
    UnOp { expr: Box<DecimalExpr> },
    Literal { value: f64 },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum BoolExpr {
    VarRef,
    BoolBinOp { op: Op, left: Box<BoolExpr>, right: Box<BoolExpr> },
    BoolUnOp { expr: Box<BoolExpr> },
    IntBoolBinOp { op: Op, left: Box<IntExpr>, right: Box<IntExpr> },
    DecBoolBinOp { op: Op, left: Box<DecimalExpr>, right: Box<DecimalExpr> },
    Literal { value: bool },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum ShaOperand {
    StrVal(Box<StringExpr>),
    BVal(Box<BytesExpr>),
    BmVal(Box<BytesMExpr>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum BytesMExpr {
    VarRef,
    Sha { operand: Box<ShaOperand> },
    Literal { value: Vec<u8> },
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMinimalProxyTo {
    pub target_addr: Box<AddressExpr>,
    pub value: Option<Box<IntExpr>>,
    pub salt: Option<Box<BytesMExpr>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFromBlueprint {
    pub target_addr: Box<AddressExpr>,
    pub raw_args: Option<Box<BoolExpr>>,
    pub value: Option<Box<IntExpr>>,
    pub code_offset: Option<Box<IntExpr>>,
    pub salt: Option<Box<BytesMExpr>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum AddressExpr {
    VarRef,
    Cmp(CreateMinimalProxyTo),
    Cfb(CreateFromBlueprint),
    Literal { value: Vec<u8> },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum BytesExpr {
    VarRef,
    Literal { value: Vec<u8> },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum StringExpr {
    VarRef,
    Literal { value: String },
}

/// Any typed expression, used where the declared/expected type is
/// carried alongside the node rather than implied by dispatch context
/// (declarations, assignments, return slots).
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    Bool(BoolExpr),
    Decimal(DecimalExpr),
    Address(AddressExpr),
    Int(IntExpr),
    BytesM(BytesMExpr),
    Bytes(BytesExpr),
    String(StringExpr),
}

impl Expr {
    pub fn raw_scalar(&self) -> Option<RawScalar> {
        match self {
            Expr::Bool(BoolExpr::Literal { value }) => Some(RawScalar::Bool(*value)),
            Expr::Decimal(DecimalExpr::Literal { value }) => Some(RawScalar::Decimal(*value)),
            Expr::Address(AddressExpr::Literal { value }) => Some(RawScalar::Bytes(value.clone())),
            Expr::Int(IntExpr::Literal { value }) => Some(RawScalar::Int(*value)),
            Expr::BytesM(BytesMExpr::Literal { value }) => Some(RawScalar::Bytes(value.clone())),
            Expr::Bytes(BytesExpr::Literal { value }) => Some(RawScalar::Bytes(value.clone())),
            Expr::String(StringExpr::Literal { value }) => Some(RawScalar::Str(value.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IfCase {
    pub cond: Box<BoolExpr>,
    pub body: Block,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum Stmt {
    Decl { ty: TypeNode, expr: Expr },
    Assign { ty: TypeNode, expr: Expr },
    /// §4.5: bounds are literal `i64`s, not sub-trees — the range itself
    /// isn't a computed expression in the wire schema, only its two
    /// endpoints. `sort(start, stop)` is applied at lowering time so
    /// `start > stop` never produces an invalid `range(...)` call.
    ForRange { start: i64, stop: i64, body: Block },
    /// `anchor_requested` selects between the two §4.5 forms:
    /// `range(<length>)` when absent, `range(<id>, <id> + <length>)` when
    /// present (a fresh induction-style bound is synthesized, the anchor
    /// value itself isn't carried in the wire schema).
    ForLength { length: i64, anchor_requested: bool, body: Block },
    If { cases: Vec<IfCase>, else_body: Option<Box<Block>> },
    Assert { cond: Box<BoolExpr>, msg: Option<Box<StringExpr>> },
    /// Only legal when `for_depth > 0`; outside a loop it falls through to
    /// `fallback`, the declaration-or-assignment the generator substitutes
    /// instead (§4.5's "continue/break fall back to decl/assign when not
    /// nested in a loop").
    Continue { fallback: Box<Stmt> },
    Break { fallback: Box<Stmt> },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum Terminator {
    Selfdestruct { addr: Box<AddressExpr> },
    Raise { msg: Option<Box<StringExpr>> },
    /// Fixed-field carrier for up to five output slots; only the first
    /// `|outputs|` are taken at lowering time.
    Return { slots: Vec<Expr> },
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Block {
    #[serde(default)]
    pub stmts: Vec<Stmt>,
    pub terminator: Option<Terminator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FunctionInput {
    pub visibility: Visibility,
    pub declared_mutability: Mutability,
    pub reentrancy_key: Option<String>,
    #[serde(default)]
    pub inputs: Vec<TypeNode>,
    #[serde(default)]
    pub outputs: Vec<TypeNode>,
    pub body: Block,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ContractInput {
    #[serde(default)]
    pub decls: Vec<TypeNode>,
    #[serde(default)]
    pub functions: Vec<FunctionInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_type_node_resolves_to_unsigned_int8() {
        let node = TypeNode::default();
        assert_eq!(resolve_type(&node), Type::Int { width: 8, signed: false });
    }

    #[test]
    fn priority_picks_bool_over_int() {
        let node = TypeNode { b: Some(UnitNode {}), i: Some(IntNode { n: 10, sign: true }), ..Default::default() };
        assert_eq!(resolve_type(&node), Type::Bool);
    }

    #[test]
    fn int_field_is_deserialized_from_short_key() {
        let node: TypeNode = serde_json::from_str(r#"{"i":{"n":511,"sign":false}}"#).unwrap();
        assert_eq!(resolve_type(&node), Type::Int { width: 256, signed: false });
    }

    #[test]
    fn bytesm_field_deserializes_from_capital_m_key() {
        let node: TypeNode = serde_json::from_str(r#"{"bM":{"m":63}}"#).unwrap();
        assert_eq!(resolve_type(&node), Type::BytesM { m: 32 });
    }
}
