//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! The tree is arena-backed (see [`arena`]): every node lives in a flat
//! [`Ast`] keyed by a stable [`NodeId`], and any field that would otherwise
//! recurse into another node (a sub-expression, a subquery) holds that id
//! instead of an owning `Box`. This sidesteps owning cycles for the
//! parent back-reference the analyzer needs (§4.3/§9 design note) and gives
//! [`crate::analyzer::AnalysisContext`] a stable key to hang resolved types
//! and symbol bindings off of.

pub mod arena;
pub mod expression;
pub mod node;
pub mod statement;
pub mod types;

pub use arena::{Ast, AstNode, NodeId};
pub use expression::{
    BetweenExpr, BinaryOp, BinaryOpExpr, CaseExpr, CastExpr, CollateExpr, ExistsExpr, FrameBound,
    FrameSpec, FrameUnit, FunctionCallExpr, InExpr, InSource, LikeExpr, LikeKind, Literal,
    NullOrdering, OrderByItem, OrderDirection, ReferenceExpr, UnaryOp, UnaryOpExpr, VariableExpr,
    WindowFunctionExpr, WindowSpec,
};
pub use node::{AstNodeKind, StatementRef};
pub use statement::{
    ConflictAction, CreateIndexStatement, CreateTableStatement, CreateTriggerStatement, CteDef,
    DeleteStatement, ExpressionResultColumnNode, InsertSource, InsertStatement, JoinNode,
    JoinType, NamedWindow, OnConflict, SelectStatement, SelectStatementAsSourceNode,
    StarResultColumnNode, Statement, TableReferenceNode, TriggerEvent, TriggerTiming,
    UpdateAssignment, UpdateStatement, WithClause,
};
pub use types::{ColumnConstraint, ColumnDef, DataType, TableConstraint};
