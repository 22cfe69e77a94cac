//! Expression node payloads.
//!
//! Every field that recurses into another expression or statement holds a
//! [`NodeId`](super::arena::NodeId) rather than an owned `Box`; the actual
//! node lives in the enclosing [`Ast`](super::arena::Ast) arena.

use serde::{Deserialize, Serialize};

use super::arena::NodeId;

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(String),
    Blob(Vec<u8>),
    Boolean(bool),
    Null,
}

/// Binary operators, spanning arithmetic, comparison, logical, bitwise and
/// string concatenation families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Is,
    IsNot,

    And,
    Or,

    Concat,

    BitAnd,
    BitOr,
    LeftShift,
    RightShift,
}

/// Unary and postfix-unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `+x`
    Plus,
    /// `NOT x`
    Not,
    /// `~x`
    BitNot,
    /// `x IS NULL`
    IsNull,
    /// `x IS NOT NULL`
    IsNotNull,
}

/// A column reference, optionally qualified by a table or source alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceExpr {
    pub table_alias: Option<String>,
    pub column: String,
}

/// A bind-variable placeholder. `index` is the resolved, stable, 1-based
/// index assigned by the parser per the numbering rule in the component
/// design for bind variables: explicit index wins, otherwise one plus the
/// highest index seen so far among unnumbered/named variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableExpr {
    pub explicit_index: Option<u32>,
    pub name: Option<String>,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryOpExpr {
    pub op: BinaryOp,
    pub left: NodeId,
    pub right: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryOpExpr {
    pub op: UnaryOp,
    pub operand: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetweenExpr {
    pub negated: bool,
    pub expr: NodeId,
    pub low: NodeId,
    pub high: NodeId,
}

/// The right-hand side of an `IN` predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InSource {
    /// `IN (a, b, c)`
    List(Vec<NodeId>),
    /// `IN (SELECT ...)`
    Subquery(NodeId),
    /// A bind variable standing in for the whole right-hand side: `IN ?`
    /// (`parenthesized = false`, an array-typed variable expanding to a list
    /// at bind time) or `IN (?)` (`parenthesized = true`, a single scalar).
    Variable { var: NodeId, parenthesized: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InExpr {
    pub negated: bool,
    pub expr: NodeId,
    pub source: InSource,
}

/// `LIKE`/`GLOB`/`MATCH`/`REGEXP`, unified since they share a grammar shape
/// (pattern-match predicate with an optional `ESCAPE` clause for `LIKE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LikeKind {
    Like,
    Glob,
    Match,
    Regexp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeExpr {
    pub negated: bool,
    pub kind: LikeKind,
    pub expr: NodeId,
    pub pattern: NodeId,
    pub escape: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseExpr {
    /// `CASE operand WHEN ...`; `None` for the searched form `CASE WHEN ...`.
    pub operand: Option<NodeId>,
    pub whens: Vec<(NodeId, NodeId)>,
    pub else_branch: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallExpr {
    pub name: String,
    pub distinct: bool,
    /// `true` for the no-parenthesized-args `COUNT(*)` spelling.
    pub star_arg: bool,
    pub args: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameUnit {
    Rows,
    Range,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FrameBound {
    UnboundedPreceding,
    UnboundedFollowing,
    CurrentRow,
    Preceding(NodeId),
    Following(NodeId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    pub unit: FrameUnit,
    pub start: FrameBound,
    pub end: Option<FrameBound>,
}

/// An `ORDER BY` entry, shared between `SELECT ... ORDER BY` and window specs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByItem {
    pub expr: NodeId,
    pub direction: OrderDirection,
    pub nulls: Option<NullOrdering>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NullOrdering {
    First,
    Last,
}

/// `OVER (...)` clause attached to a [`WindowFunctionExpr`], or named via a
/// statement-level `WINDOW win AS (...)` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// `OVER win` referencing a `WINDOW win AS (...)` definition.
    pub base_window: Option<String>,
    pub partition_by: Vec<NodeId>,
    pub order_by: Vec<OrderByItem>,
    pub frame: Option<FrameSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowFunctionExpr {
    /// The aggregate/ranking function being windowed, e.g. `row_number()`.
    pub function: NodeId,
    pub window: WindowSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastExpr {
    pub expr: NodeId,
    pub target: super::types::DataType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollateExpr {
    pub expr: NodeId,
    pub collation: String,
}

/// `EXISTS (SELECT ...)`. `NOT EXISTS` is represented as
/// `UnaryOp::Not` wrapping this node, like any other negated predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistsExpr {
    pub query: NodeId,
}
