//! The unified tagged-variant node payload stored in every [`Ast`](super::arena::Ast) slot.
//!
//! A single enum (rather than a family of node traits behind dynamic
//! dispatch) keeps dispatch in the analyzer a plain `match` on `kind()`,
//! per the "tagged-variant dispatch, not deep inheritance" design note.

use serde::{Deserialize, Serialize};

use super::arena::NodeId;
use super::expression::{
    BetweenExpr, BinaryOpExpr, CaseExpr, CastExpr, CollateExpr, ExistsExpr, FunctionCallExpr,
    InExpr, Literal, ReferenceExpr, UnaryOpExpr, VariableExpr, WindowFunctionExpr,
};
use super::statement::{
    CreateIndexStatement, CreateTableStatement, CreateTriggerStatement, DeleteStatement,
    ExpressionResultColumnNode, InsertStatement, JoinNode, SelectStatement,
    SelectStatementAsSourceNode, StarResultColumnNode, Statement, TableReferenceNode,
    UpdateStatement,
};

/// One node's payload. Variants mirror the node families named in the data
/// model: statements, table references, result columns, and expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AstNodeKind {
    // Statements
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    CreateTable(CreateTableStatement),
    CreateIndex(CreateIndexStatement),
    CreateTrigger(CreateTriggerStatement),

    // Table references
    TableReference(TableReferenceNode),
    SelectStatementAsSource(SelectStatementAsSourceNode),
    Join(JoinNode),

    // Result columns
    StarResultColumn(StarResultColumnNode),
    ExpressionResultColumn(ExpressionResultColumnNode),

    // Expressions
    Literal(Literal),
    Reference(ReferenceExpr),
    Variable(VariableExpr),
    BinaryOp(BinaryOpExpr),
    UnaryOp(UnaryOpExpr),
    Between(BetweenExpr),
    In(InExpr),
    Like(super::expression::LikeExpr),
    Case(CaseExpr),
    FunctionCall(FunctionCallExpr),
    WindowFunction(WindowFunctionExpr),
    Cast(CastExpr),
    Collate(CollateExpr),
    Exists(ExistsExpr),
    /// `(SELECT ...)` used directly as a scalar expression.
    ScalarSubquery(NodeId),

    /// A panic-mode recovery placeholder: the parser could not make sense
    /// of the tokens at this position and skipped to a synchronization
    /// point. Carries the diagnostic message for convenience; the same
    /// text is also recorded in the parser's error list.
    Error(String),
}

impl AstNodeKind {
    /// Whether this node is a [`Statement`] (`is_crud()` narrows further to
    /// the column/reference/type-resolved subset).
    #[must_use]
    pub const fn as_statement(&self) -> Option<StatementRef<'_>> {
        match self {
            Self::Select(s) => Some(StatementRef::Select(s)),
            Self::Insert(s) => Some(StatementRef::Insert(s)),
            Self::Update(s) => Some(StatementRef::Update(s)),
            Self::Delete(s) => Some(StatementRef::Delete(s)),
            Self::CreateTable(s) => Some(StatementRef::CreateTable(s)),
            Self::CreateIndex(s) => Some(StatementRef::CreateIndex(s)),
            Self::CreateTrigger(s) => Some(StatementRef::CreateTrigger(s)),
            _ => None,
        }
    }

    /// `SELECT`/`INSERT`/`UPDATE`/`DELETE`: the node families that require
    /// column/reference/type resolution.
    #[must_use]
    pub const fn is_crud_statement(&self) -> bool {
        matches!(
            self,
            Self::Select(_) | Self::Insert(_) | Self::Update(_) | Self::Delete(_)
        )
    }

    /// Any node family that can carry a resolved type: expressions, bind
    /// variables, and expression result columns. Statements, clauses and
    /// table references are never `Typeable`.
    #[must_use]
    pub const fn is_typeable(&self) -> bool {
        matches!(
            self,
            Self::Literal(_)
                | Self::Reference(_)
                | Self::Variable(_)
                | Self::BinaryOp(_)
                | Self::UnaryOp(_)
                | Self::Between(_)
                | Self::In(_)
                | Self::Like(_)
                | Self::Case(_)
                | Self::FunctionCall(_)
                | Self::WindowFunction(_)
                | Self::Cast(_)
                | Self::Collate(_)
                | Self::Exists(_)
                | Self::ScalarSubquery(_)
                | Self::ExpressionResultColumn(_)
        )
    }

    #[must_use]
    pub const fn as_variable(&self) -> Option<&VariableExpr> {
        match self {
            Self::Variable(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_reference(&self) -> Option<&ReferenceExpr> {
        match self {
            Self::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// Every direct child [`NodeId`] this node holds, in no particular
    /// order. Used by the set-parent pass (§4.3) to assign `parent` over
    /// the whole tree in one traversal, and by nested-statement discovery
    /// to find `FROM`-subqueries, scalar subqueries and CTE bodies without
    /// hand-rolling a walk per node family. This descends *through*
    /// statement boundaries (a `ScalarSubquery`'s root is a child here just
    /// like any other node) — callers that need to stop at a statement
    /// boundary do that themselves by checking `as_statement()`.
    #[must_use]
    pub fn child_ids(&self) -> Vec<NodeId> {
        match self {
            Self::Select(s) => {
                let mut ids: Vec<NodeId> = Vec::new();
                if let Some(with) = &s.with {
                    ids.extend(with.ctes.iter().map(|cte| cte.body));
                }
                ids.extend(s.columns.iter().copied());
                ids.extend(s.from);
                ids.extend(s.where_clause);
                ids.extend(s.group_by.iter().copied());
                ids.extend(s.having);
                ids.extend(s.windows.iter().flat_map(|w| window_spec_children(&w.spec)));
                ids.extend(s.order_by.iter().map(|o| o.expr));
                ids.extend(s.limit);
                ids.extend(s.offset);
                ids
            }
            Self::Insert(s) => match &s.source {
                super::statement::InsertSource::Values(rows) => {
                    rows.iter().flatten().copied().collect()
                }
                super::statement::InsertSource::Query(q) => vec![*q],
                super::statement::InsertSource::DefaultValues => Vec::new(),
            },
            Self::Update(s) => {
                let mut ids: Vec<NodeId> = s.assignments.iter().map(|a| a.value).collect();
                ids.extend(s.from);
                ids.extend(s.where_clause);
                ids
            }
            Self::Delete(s) => s.where_clause.into_iter().collect(),
            Self::CreateTable(_) => Vec::new(),
            Self::CreateIndex(s) => s.where_clause.into_iter().collect(),
            Self::CreateTrigger(s) => {
                let mut ids = s.when_clause.into_iter().collect::<Vec<_>>();
                ids.extend(s.body.iter().copied());
                ids
            }
            Self::TableReference(_) => Vec::new(),
            Self::SelectStatementAsSource(s) => vec![s.query],
            Self::Join(j) => {
                let mut ids = vec![j.left, j.right];
                ids.extend(j.on);
                ids
            }
            Self::StarResultColumn(_) => Vec::new(),
            Self::ExpressionResultColumn(c) => vec![c.expr],
            Self::Literal(_) => Vec::new(),
            Self::Reference(_) => Vec::new(),
            Self::Variable(_) => Vec::new(),
            Self::BinaryOp(b) => vec![b.left, b.right],
            Self::UnaryOp(u) => vec![u.operand],
            Self::Between(b) => vec![b.expr, b.low, b.high],
            Self::In(i) => {
                let mut ids = vec![i.expr];
                match &i.source {
                    super::expression::InSource::List(items) => ids.extend(items.iter().copied()),
                    super::expression::InSource::Subquery(q) => ids.push(*q),
                    super::expression::InSource::Variable { var, .. } => ids.push(*var),
                }
                ids
            }
            Self::Like(l) => {
                let mut ids = vec![l.expr, l.pattern];
                ids.extend(l.escape);
                ids
            }
            Self::Case(c) => {
                let mut ids: Vec<NodeId> = c.operand.into_iter().collect();
                for (when, then) in &c.whens {
                    ids.push(*when);
                    ids.push(*then);
                }
                ids.extend(c.else_branch);
                ids
            }
            Self::FunctionCall(f) => f.args.clone(),
            Self::WindowFunction(w) => {
                let mut ids = vec![w.function];
                ids.extend(window_spec_children(&w.window));
                ids
            }
            Self::Cast(c) => vec![c.expr],
            Self::Collate(c) => vec![c.expr],
            Self::Exists(e) => vec![e.query],
            Self::ScalarSubquery(q) => vec![*q],
            Self::Error(_) => Vec::new(),
        }
    }
}

fn window_spec_children(spec: &super::expression::WindowSpec) -> Vec<NodeId> {
    let mut ids = spec.partition_by.clone();
    ids.extend(spec.order_by.iter().map(|o| o.expr));
    if let Some(frame) = &spec.frame {
        ids.extend(frame_bound_child(&frame.start));
        if let Some(end) = &frame.end {
            ids.extend(frame_bound_child(end));
        }
    }
    ids
}

fn frame_bound_child(bound: &super::expression::FrameBound) -> Option<NodeId> {
    match bound {
        super::expression::FrameBound::Preceding(id) | super::expression::FrameBound::Following(id) => Some(*id),
        super::expression::FrameBound::UnboundedPreceding
        | super::expression::FrameBound::UnboundedFollowing
        | super::expression::FrameBound::CurrentRow => None,
    }
}

/// Borrowed view over the statement variants, used where callers want to
/// match on "is this a statement" without re-deriving it from `AstNodeKind`.
#[derive(Debug, Clone, Copy)]
pub enum StatementRef<'a> {
    Select(&'a SelectStatement),
    Insert(&'a InsertStatement),
    Update(&'a UpdateStatement),
    Delete(&'a DeleteStatement),
    CreateTable(&'a CreateTableStatement),
    CreateIndex(&'a CreateIndexStatement),
    CreateTrigger(&'a CreateTriggerStatement),
}

/// Converts an owned, non-arena [`Statement`] into the arena-tagged variant
/// used by a freshly pushed root node. The parser builds up `Statement`
/// values bottom-up via helper constructors and pushes them as the final
/// step of each `parse_*_statement` method.
impl From<Statement> for AstNodeKind {
    fn from(stmt: Statement) -> Self {
        match stmt {
            Statement::Select(s) => Self::Select(s),
            Statement::Insert(s) => Self::Insert(s),
            Statement::Update(s) => Self::Update(s),
            Statement::Delete(s) => Self::Delete(s),
            Statement::CreateTable(s) => Self::CreateTable(s),
            Statement::CreateIndex(s) => Self::CreateIndex(s),
            Statement::CreateTrigger(s) => Self::CreateTrigger(s),
        }
    }
}
