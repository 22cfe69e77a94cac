//! Statement, clause and table-reference node payloads.

use serde::{Deserialize, Serialize};

use super::arena::NodeId;
use super::expression::{OrderByItem, WindowSpec};
use super::types::{ColumnDef, TableConstraint};

/// A reference to a real table, e.g. `schema.name AS alias`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableReferenceNode {
    pub schema: Option<String>,
    pub name: String,
    pub alias: Option<String>,
}

/// A sub-`SELECT` used as a `FROM` source, required to carry an alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStatementAsSourceNode {
    pub query: NodeId,
    pub alias: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

/// A join combining a left source (another table-reference-family node) with
/// a right table. Chained joins nest left-associatively: `a JOIN b JOIN c` is
/// `Join{left: Join{left: a, right: b}, right: c}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinNode {
    pub join_type: JoinType,
    pub left: NodeId,
    pub right: NodeId,
    pub on: Option<NodeId>,
    pub using: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarResultColumnNode {
    /// `table.*` vs bare `*`.
    pub table_alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionResultColumnNode {
    pub expr: NodeId,
    pub alias: Option<String>,
}

/// A single `name AS (select)` entry in a `WITH` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CteDef {
    pub name: String,
    pub columns: Vec<String>,
    pub body: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithClause {
    pub recursive: bool,
    pub ctes: Vec<CteDef>,
}

/// A named window defined by a statement-level `WINDOW name AS (...)` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedWindow {
    pub name: String,
    pub spec: WindowSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStatement {
    pub with: Option<WithClause>,
    pub distinct: bool,
    pub columns: Vec<NodeId>,
    /// The `FROM` source chain: a `TableReference`, `SelectStatementAsSource`
    /// or `Join` node, or `None` for `SELECT <expr>` with no `FROM`.
    pub from: Option<NodeId>,
    pub where_clause: Option<NodeId>,
    pub group_by: Vec<NodeId>,
    pub having: Option<NodeId>,
    pub windows: Vec<NamedWindow>,
    pub order_by: Vec<OrderByItem>,
    pub limit: Option<NodeId>,
    pub offset: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InsertSource {
    Values(Vec<Vec<NodeId>>),
    Query(NodeId),
    DefaultValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAssignment {
    pub column: String,
    pub value: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConflictAction {
    DoNothing,
    DoUpdate(Vec<UpdateAssignment>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnConflict {
    pub columns: Vec<String>,
    pub action: ConflictAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStatement {
    pub schema: Option<String>,
    pub table: String,
    pub columns: Vec<String>,
    pub source: InsertSource,
    pub on_conflict: Option<OnConflict>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatement {
    pub schema: Option<String>,
    pub table: String,
    pub alias: Option<String>,
    pub assignments: Vec<UpdateAssignment>,
    pub from: Option<NodeId>,
    pub where_clause: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStatement {
    pub schema: Option<String>,
    pub table: String,
    pub alias: Option<String>,
    pub where_clause: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableStatement {
    pub if_not_exists: bool,
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub table_constraints: Vec<TableConstraint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIndexStatement {
    pub unique: bool,
    pub if_not_exists: bool,
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
    pub where_clause: Option<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerTiming {
    Before,
    After,
    InsteadOf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TriggerEvent {
    Insert,
    Update { of: Vec<String> },
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTriggerStatement {
    pub if_not_exists: bool,
    pub name: String,
    pub timing: TriggerTiming,
    pub event: TriggerEvent,
    pub table: String,
    pub for_each_row: bool,
    pub when_clause: Option<NodeId>,
    pub body: Vec<NodeId>,
}

/// A SQL statement, the root of one parsed unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    CreateTable(CreateTableStatement),
    CreateIndex(CreateIndexStatement),
    CreateTrigger(CreateTriggerStatement),
}

impl Statement {
    /// `SELECT`/`INSERT`/`UPDATE`/`DELETE` — the subset requiring
    /// column/reference/type resolution (§4.8, §4.9).
    #[must_use]
    pub const fn is_crud(&self) -> bool {
        matches!(
            self,
            Self::Select(_) | Self::Insert(_) | Self::Update(_) | Self::Delete(_)
        )
    }
}
