//! Reference resolution (§4.6): binds every `Reference` node in a CRUD
//! statement's own subtree to the symbol it names, recording the result in
//! [`AnalysisContext::set_resolved_reference`]. Runs after
//! [`super::column_resolver`] has turned every `*`/`table.*` into explicit
//! references, so this is the only pass that ever needs to resolve one.
//!
//! - Qualified (`t.col`): look up `t` through the statement's scope chain
//!   (table name, alias, CTE name, subquery alias — whichever binds first,
//!   walking outward for a correlated reference), then find `col` on it.
//! - Unqualified (`col`): search only this statement's own `from_sources`,
//!   left to right. Exactly one hit resolves it; zero is
//!   `UnresolvedReference`, more than one is `AmbiguousReference` — neither
//!   walks to an enclosing statement, since SQL name resolution for a bare
//!   column name never reaches past the immediately enclosing `FROM`.

use crate::ast::{AstNodeKind, NodeId};

use super::context::{AnalysisContext, AnalysisError, Severity};
use super::walk;

pub fn run(ctx: &mut AnalysisContext) {
    for stmt in walk::crud_statements(ctx) {
        resolve_statement(ctx, stmt);
    }
}

fn resolve_statement(ctx: &mut AnalysisContext, stmt: NodeId) {
    let Some(scope) = ctx.statement_scope(stmt) else { return };
    for id in walk::own_subtree(ctx, stmt) {
        let AstNodeKind::Reference(reference) = ctx.ast.kind(id).clone() else { continue };
        let span = ctx.ast.span(id);
        resolve_reference(ctx, id, &reference, scope, span);
    }
}

fn resolve_reference(
    ctx: &mut AnalysisContext,
    node: NodeId,
    reference: &crate::ast::ReferenceExpr,
    scope: super::scope::ScopeId,
    span: crate::lexer::Span,
) {
    if let Some(alias) = &reference.table_alias {
        let Some(source) = ctx.scopes().lookup(scope, alias).cloned() else {
            ctx.push_error(AnalysisError::new(
                format!("unresolved table or alias '{alias}'"),
                Severity::Critical,
                span,
                Some(node),
            ));
            return;
        };
        match source.find_column(&reference.column, Some(alias.clone())) {
            Some(symbol) => ctx.set_resolved_reference(node, symbol),
            None => ctx.push_error(AnalysisError::new(
                format!("'{alias}' has no column '{}'", reference.column),
                Severity::Critical,
                span,
                Some(node),
            )),
        }
        return;
    }

    let from_sources = ctx.scopes().get(scope).from_sources().to_vec();
    let mut hits = Vec::new();
    for (alias, source) in &from_sources {
        if let Some(symbol) = source.find_column(&reference.column, Some(alias.clone())) {
            hits.push(symbol);
        }
    }

    match hits.len() {
        0 => ctx.push_error(AnalysisError::new(
            format!("unresolved column '{}'", reference.column),
            Severity::Critical,
            span,
            Some(node),
        )),
        1 => ctx.set_resolved_reference(node, hits.into_iter().next().expect("checked len == 1")),
        _ => ctx.push_error(AnalysisError::new(
            format!("ambiguous column '{}'", reference.column),
            Severity::Critical,
            span,
            Some(node),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{column_resolver, reference_finder, set_parent};
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use crate::table::{Column, ColumnType, Table};

    fn analyze(sql: &str, tables: Vec<Table>) -> AnalysisContext {
        let lexer = Lexer::new(sql);
        let tokens = lexer.tokenize().expect("lex");
        let mut parser = Parser::new(sql, tokens);
        let root = parser.statement();
        let (ast, _errors) = parser.into_parts();
        let mut ctx = AnalysisContext::new(ast, sql.to_string(), root);
        let root_scope = ctx.root_scope();
        for table in tables {
            ctx.scopes_mut().get_mut(root_scope).bind(&table.name.clone(), super::super::scope::Symbol::Table(table));
        }
        set_parent::run(&mut ctx);
        reference_finder::run(&mut ctx);
        column_resolver::run(&mut ctx);
        run(&mut ctx);
        ctx
    }

    fn demo_tables() -> Vec<Table> {
        vec![Table::new(
            "demo",
            vec![
                Column::new("id", ColumnType::Integer, false),
                Column::new("content", ColumnType::Text, true),
            ],
        )]
    }

    #[test]
    fn unqualified_column_resolves_through_single_from_source() {
        let ctx = analyze("SELECT id FROM demo", demo_tables());
        assert!(!ctx.has_critical_errors());
    }

    #[test]
    fn unresolved_column_is_critical_error() {
        let ctx = analyze("SELECT missing_col FROM demo", demo_tables());
        assert!(ctx.has_critical_errors());
    }

    #[test]
    fn ambiguous_column_across_two_sources_is_critical_error() {
        let ctx = analyze(
            "SELECT id FROM demo AS a JOIN demo AS b ON a.id = b.id",
            demo_tables(),
        );
        assert!(ctx.has_critical_errors());
    }

    #[test]
    fn qualified_reference_disambiguates() {
        let ctx = analyze(
            "SELECT a.id FROM demo AS a JOIN demo AS b ON a.id = b.id",
            demo_tables(),
        );
        assert!(!ctx.has_critical_errors());
    }
}
