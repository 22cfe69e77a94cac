//! Star expansion (§4.5): rewrites every `StarResultColumn` in a `SELECT`'s
//! projection list into explicit `ExpressionResultColumn(Reference)` nodes,
//! so the rest of the pipeline (reference resolution, type resolution)
//! never special-cases `*` again. Runs after [`super::reference_finder`]
//! (it needs the statement's bound scope) and before
//! [`super::reference_resolver`] (the references it creates still need
//! resolving like any other).
//!
//! Expansion order is left-to-right `FROM`-source order, then each
//! source's own column order — the same order SQLite itself reports for
//! `SELECT *`.

use crate::ast::{AstNodeKind, ExpressionResultColumnNode, NodeId, ReferenceExpr};

use super::context::AnalysisContext;
use super::scope::Symbol;
use super::walk;

pub fn run(ctx: &mut AnalysisContext) {
    for stmt in walk::crud_statements(ctx) {
        if let AstNodeKind::Select(_) = ctx.ast.kind(stmt) {
            expand_select(ctx, stmt);
        }
    }
}

fn expand_select(ctx: &mut AnalysisContext, stmt: NodeId) {
    let Some(scope) = ctx.statement_scope(stmt) else { return };
    let AstNodeKind::Select(mut sel) = ctx.ast.kind(stmt).clone() else { return };

    let from_sources: Vec<(String, Symbol)> = ctx.scopes().get(scope).from_sources().to_vec();
    let original_columns = sel.columns.clone();
    let mut expanded = Vec::with_capacity(original_columns.len());

    for col_id in original_columns {
        match ctx.ast.kind(col_id).clone() {
            AstNodeKind::StarResultColumn(star) => {
                let span = ctx.ast.span(col_id);
                if let Some(alias) = &star.table_alias {
                    if let Some((_, symbol)) = from_sources.iter().find(|(name, _)| name.eq_ignore_ascii_case(alias)) {
                        for name in symbol.column_names() {
                            expanded.push(push_reference(ctx, Some(alias.clone()), name, span));
                        }
                    } else {
                        expanded.push(col_id);
                    }
                } else {
                    for (alias, symbol) in &from_sources {
                        for name in symbol.column_names() {
                            expanded.push(push_reference(ctx, Some(alias.clone()), name, span));
                        }
                    }
                    if from_sources.is_empty() {
                        expanded.push(col_id);
                    }
                }
            }
            _ => expanded.push(col_id),
        }
    }

    sel.columns = expanded;
    ctx.ast.get_mut(stmt).kind = AstNodeKind::Select(sel);
}

fn push_reference(ctx: &mut AnalysisContext, table_alias: Option<String>, column: String, span: crate::lexer::Span) -> NodeId {
    let reference = ctx.ast.push(AstNodeKind::Reference(ReferenceExpr { table_alias, column }), span);
    ctx.ast.push(
        AstNodeKind::ExpressionResultColumn(ExpressionResultColumnNode { expr: reference, alias: None }),
        span,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{reference_finder, set_parent};
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
            ctx.scopes_mut().get_mut(root_scope).bind(&table.name.clone(), Symbol::Table(table));
        }
        set_parent::run(&mut ctx);
        reference_finder::run(&mut ctx);
        run(&mut ctx);
        ctx
    }

    fn demo_table() -> Table {
        Table::new(
            "demo",
            vec![
                Column::new("id", ColumnType::Integer, false),
                Column::new("content", ColumnType::Text, true),
            ],
        )
    }

    #[test]
    fn bare_star_expands_in_table_declaration_order() {
        let ctx = analyze("SELECT * FROM demo", vec![demo_table()]);
        let AstNodeKind::Select(sel) = ctx.ast.kind(ctx.root) else { panic!("not a select") };
        assert_eq!(sel.columns.len(), 2);
        for col_id in &sel.columns {
            assert!(matches!(ctx.ast.kind(*col_id), AstNodeKind::ExpressionResultColumn(_)));
        }
    }

    #[test]
    fn qualified_star_expands_only_named_source() {
        let ctx = analyze("SELECT d.* FROM demo AS d", vec![demo_table()]);
        let AstNodeKind::Select(sel) = ctx.ast.kind(ctx.root) else { panic!("not a select") };
        assert_eq!(sel.columns.len(), 2);
    }
}
