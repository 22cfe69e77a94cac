//! Scope construction (§4.4): walks the statement tree once, handing each
//! `SELECT`/CRUD statement (including ones nested in subqueries, CTE
//! bodies and trigger bodies) a local [`Scope`](super::scope::Scope)
//! populated from its `FROM` clause (or target table, for `UPDATE`/
//! `DELETE`/`INSERT`/`CREATE TRIGGER`).
//!
//! Each nested statement's scope chains to its *lexically enclosing*
//! statement's scope rather than flatly to the root scope — a
//! generalization of §4.4's single-level description needed once CTEs and
//! correlated subqueries are in scope (pun intended): a CTE must see
//! itself to recurse, and a correlated subquery must see its outer
//! query's `FROM` sources. The root scope (holding every registered
//! table, bound by the engine facade before analysis starts) is always
//! the outermost link in that chain.

use std::collections::HashSet;

use crate::ast::{AstNodeKind, CteDef, NodeId};
use crate::lexer::Span;
use crate::table::Table;

use super::context::{AnalysisContext, AnalysisError, Severity};
use super::scope::{ScopeId, Symbol};
use super::walk;

pub fn run(ctx: &mut AnalysisContext) {
    let root = ctx.root;
    let root_scope = ctx.root_scope();
    let mut visited = HashSet::new();
    visit_statement(ctx, root, root_scope, &mut visited);
}

fn visit_statement(ctx: &mut AnalysisContext, stmt: NodeId, parent_scope: ScopeId, visited: &mut HashSet<NodeId>) {
    if !visited.insert(stmt) {
        return;
    }
    let scope = ctx.new_scope(parent_scope);
    ctx.bind_statement_scope(stmt, scope);

    match ctx.ast.kind(stmt).clone() {
        AstNodeKind::Select(s) => {
            if let Some(with) = &s.with {
                register_ctes(ctx, &with.ctes, scope);
            }
            if let Some(from) = s.from {
                bind_table_expr(ctx, from, scope, visited);
            }
        }
        AstNodeKind::Insert(s) => {
            bind_target_table(ctx, &s.table, None, scope, stmt);
        }
        AstNodeKind::Update(s) => {
            bind_target_table(ctx, &s.table, s.alias.clone(), scope, stmt);
            if let Some(from) = s.from {
                bind_table_expr(ctx, from, scope, visited);
            }
        }
        AstNodeKind::Delete(s) => {
            bind_target_table(ctx, &s.table, s.alias.clone(), scope, stmt);
        }
        AstNodeKind::CreateIndex(s) => {
            bind_target_table(ctx, &s.table, None, scope, stmt);
        }
        AstNodeKind::CreateTrigger(s) => {
            bind_target_table(ctx, &s.table, None, scope, stmt);
            // SQLite exposes the affected row's before/after image as
            // `OLD`/`NEW` pseudo-tables inside a trigger body.
            if let Some(Symbol::Table(table)) = ctx.scopes().get(scope).get_local(&s.table).cloned() {
                ctx.scopes_mut().get_mut(scope).bind("old", Symbol::Table(table.clone()));
                ctx.scopes_mut().get_mut(scope).bind("new", Symbol::Table(table));
            }
            for body_stmt in &s.body {
                visit_statement(ctx, *body_stmt, scope, visited);
            }
        }
        AstNodeKind::CreateTable(_) => {}
        _ => {}
    }

    for nested in walk::nested_statement_roots(ctx, stmt) {
        visit_statement(ctx, nested, scope, visited);
    }
}

fn bind_target_table(ctx: &mut AnalysisContext, name: &str, alias: Option<String>, scope: ScopeId, owner: NodeId) {
    let Some(table) = lookup_registered_table(ctx, name) else {
        ctx.push_error(AnalysisError::new(
            format!("unknown table '{name}'"),
            Severity::Critical,
            ctx.ast.span(owner),
            Some(owner),
        ));
        return;
    };
    let key = alias.unwrap_or_else(|| name.to_string());
    bind_from_source(ctx, scope, &key, Symbol::Table(table), ctx.ast.span(owner));
}

fn lookup_registered_table(ctx: &AnalysisContext, name: &str) -> Option<Table> {
    match ctx.scopes().lookup(ctx.root_scope(), name) {
        Some(Symbol::Table(table)) => Some(table.clone()),
        _ => None,
    }
}

fn register_ctes(ctx: &mut AnalysisContext, ctes: &[CteDef], scope: ScopeId) {
    for cte in ctes {
        let columns = if cte.columns.is_empty() {
            derive_result_columns(ctx, cte.body)
        } else {
            cte.columns.clone()
        };
        let symbol = Symbol::Cte { body: cte.body, columns };
        if ctx.scopes_mut().get_mut(scope).bind(&cte.name, symbol).is_some() {
            ctx.push_error(AnalysisError::new(
                format!("conflicting name '{}' in WITH clause", cte.name),
                Severity::Warning,
                ctx.ast.span(cte.body),
                Some(cte.body),
            ));
        }
    }
}

/// Walks a `FROM`-clause subtree (`TableReference`/`Join`/
/// `SelectStatementAsSource`), binding a symbol per source into `scope`
/// and eagerly visiting any embedded sub-`SELECT` so it gets its own
/// child scope before the generic nested-statement sweep gets to it.
fn bind_table_expr(ctx: &mut AnalysisContext, id: NodeId, scope: ScopeId, visited: &mut HashSet<NodeId>) {
    match ctx.ast.kind(id).clone() {
        AstNodeKind::TableReference(t) => {
            let span = ctx.ast.span(id);
            let Some(table) = lookup_registered_table(ctx, &t.name) else {
                ctx.push_error(AnalysisError::new(
                    format!("unknown table '{}'", t.name),
                    Severity::Critical,
                    span,
                    Some(id),
                ));
                return;
            };
            let key = t.alias.unwrap_or(t.name);
            bind_from_source(ctx, scope, &key, Symbol::Table(table), span);
        }
        AstNodeKind::SelectStatementAsSource(s) => {
            visit_statement(ctx, s.query, scope, visited);
            let columns = derive_result_columns(ctx, s.query);
            let span = ctx.ast.span(id);
            bind_from_source(ctx, scope, &s.alias, Symbol::Subquery { query: s.query, columns }, span);
        }
        AstNodeKind::Join(j) => {
            bind_table_expr(ctx, j.left, scope, visited);
            bind_table_expr(ctx, j.right, scope, visited);
        }
        _ => {}
    }
}

fn bind_from_source(ctx: &mut AnalysisContext, scope: ScopeId, key: &str, symbol: Symbol, span: Span) {
    if ctx.scopes_mut().get_mut(scope).bind(key, symbol.clone()).is_some() {
        ctx.push_error(AnalysisError::new(
            format!("conflicting table alias '{key}'"),
            Severity::Warning,
            span,
            None,
        ));
    }
    ctx.scopes_mut().get_mut(scope).push_from_source(key.to_string(), symbol);
}

/// Best-effort projection of a sub-`SELECT`'s exposed column names, used
/// to populate a `Subquery`/`Cte` symbol's `column_names()` without
/// waiting for the inner statement's own `ColumnResolver` pass (reference
/// finding runs before column resolution, per the component order in
/// §4.8). `table.*`/bare `*` only expand here when the inner `FROM` is a
/// single plain table reference to an already-registered table; anything
/// more elaborate (joins, `*` over a further sub-select) is left
/// unexpanded, so a column reached only that way resolves through the
/// qualified `subquery.*` spelling instead of by name.
fn derive_result_columns(ctx: &AnalysisContext, query: NodeId) -> Vec<String> {
    let AstNodeKind::Select(sel) = ctx.ast.kind(query).clone() else {
        return Vec::new();
    };
    let mut names = Vec::new();
    for col_id in &sel.columns {
        match ctx.ast.kind(*col_id).clone() {
            AstNodeKind::ExpressionResultColumn(c) => {
                if let Some(alias) = c.alias {
                    names.push(alias);
                } else if let AstNodeKind::Reference(r) = ctx.ast.kind(c.expr).clone() {
                    names.push(r.column);
                } else {
                    names.push(format!("column{}", names.len() + 1));
                }
            }
            AstNodeKind::StarResultColumn(star) if star.table_alias.is_none() => {
                if let Some(AstNodeKind::TableReference(t)) = sel.from.map(|f| ctx.ast.kind(f).clone()) {
                    if let Some(table) = lookup_registered_table(ctx, &t.name) {
                        names.extend(table.columns.iter().map(|c| c.name.clone()));
                    }
                }
            }
            _ => {}
        }
    }
    names
}
