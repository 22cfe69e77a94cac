//! Small traversal helpers shared by the analyzer visitors.
//!
//! Each visitor needs one of two restricted walks: "every `CrudStatement`
//! reachable from the root, however deeply nested in subqueries" and
//! "every node belonging to one statement's own expressions, without
//! wandering into a nested statement that will be visited on its own."
//! Both are expressed here once in terms of [`crate::ast::AstNodeKind::child_ids`]
//! rather than re-derived per visitor.

use crate::ast::NodeId;

use super::context::AnalysisContext;

/// Every `CrudStatement` node reachable from `ctx.root`, root included,
/// in no particular order: the top-level statement if it qualifies, plus
/// every `SELECT`/`INSERT`/`UPDATE`/`DELETE` nested inside it (subquery
/// sources, scalar subqueries, CTE bodies, trigger bodies).
#[must_use]
pub fn crud_statements(ctx: &AnalysisContext) -> Vec<NodeId> {
    ctx.ast
        .reachable(ctx.root)
        .into_iter()
        .filter(|id| ctx.ast.kind(*id).is_crud_statement())
        .collect()
}

/// Every descendant of `stmt` that belongs to its own expressions —
/// stops descending as soon as it reaches a nested statement root (that
/// statement's own subtree is walked when *it* is visited). `stmt`
/// itself is not included.
#[must_use]
pub fn own_subtree(ctx: &AnalysisContext, stmt: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = ctx.ast.kind(stmt).child_ids();
    while let Some(id) = stack.pop() {
        if ctx.ast.kind(id).as_statement().is_some() {
            continue;
        }
        out.push(id);
        stack.extend(ctx.ast.kind(id).child_ids());
    }
    out
}

/// Statement nodes reachable from `start` without crossing through another
/// statement first: `start`'s own nested `FROM`-subqueries, CTE bodies,
/// scalar subqueries and `EXISTS`/`IN (SELECT ...)` subqueries, but not
/// *their* nested statements in turn (those surface when each found
/// statement is itself visited).
#[must_use]
pub fn nested_statement_roots(ctx: &AnalysisContext, start: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = ctx.ast.kind(start).child_ids();
    while let Some(id) = stack.pop() {
        if ctx.ast.kind(id).as_statement().is_some() {
            out.push(id);
            continue;
        }
        stack.extend(ctx.ast.kind(id).child_ids());
    }
    out
}
