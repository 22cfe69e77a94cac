//! Parent-assignment pass (§4.3): a single traversal after parsing that
//! fills every reachable node's `parent` slot, so later visitors can
//! ascend from a bind variable to the expression (or clause) that imposes
//! an expected type on it (§4.7).

use super::context::AnalysisContext;

/// Assigns `parent` over every node reachable from `ctx.root`. Safe to
/// call more than once: it only ever overwrites a child's parent with the
/// node that currently claims it as a child.
pub fn run(ctx: &mut AnalysisContext) {
    for id in ctx.ast.reachable(ctx.root) {
        for child in ctx.ast.kind(id).child_ids() {
            ctx.ast.set_parent(child, id);
        }
    }
}
