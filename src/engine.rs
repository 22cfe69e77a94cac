//! Engine facade (§4.8): the crate's single public entry point, orchestrating
//! the three stages in order (tokenize → parse → analyze) and owning the
//! registry of known tables the analyzer's root scope is built from.
//!
//! Mirrors the teacher's convention of passing configuration as an explicit
//! value rather than hidden global state (`EngineOptions`, reserved for
//! future dialect knobs) and instrumenting stage boundaries with `tracing`
//! rather than ad hoc `eprintln!`.

use crate::analyzer::{self, AnalysisContext};
use crate::ast::{Ast, NodeId};
use crate::lexer::{CumulatedTokenizerException, Lexer, Span, Token};
use crate::parser::{ParseError, Parser};
use crate::table::Table;

/// Reserved for future dialect knobs (§4.8 design note); currently carries
/// nothing beyond what [`Engine::register_table`] already configures.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {}

/// The parsed form of one SQL statement: its own AST arena, the root node
/// of that statement, every parser diagnostic produced while parsing it,
/// and the exact source substring it was carved from.
///
/// [`Engine::parse_multiple`] shares one arena and one error list across
/// every statement in a `;`-separated batch (§4.8); `ast`/`errors` are
/// therefore cheap clones of that shared state rather than independently
/// constructed per statement.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub ast: Ast,
    pub root: NodeId,
    pub errors: Vec<ParseError>,
    pub sql: String,
}

/// Orchestrates the tokenizer, parser, and analyzer stages (§4.8). Owns the
/// known-table registry the analyzer's root scope is seeded from.
///
/// A pure function from source string plus the registered-table snapshot
/// to an [`AnalysisContext`] (§5): no operation suspends on I/O, and there
/// are no timeouts or cancellation, since every stage is CPU-bounded and
/// runs to completion. `register_table` mutates shared state and is not
/// safe to call while another call is in flight; concurrent callers must
/// use independent `Engine`s or synchronize externally.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    tables: Vec<Table>,
    #[allow(dead_code)]
    options: EngineOptions,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            tables: Vec::new(),
            options,
        }
    }

    /// Appends `table` to the known-table list. No validation: a table
    /// registered twice under the same name simply shadows the earlier one
    /// once bound into the root scope, since scope binding is last-write-wins
    /// by name (§4.8).
    pub fn register_table(&mut self, table: Table) {
        tracing::debug!(table = %table.name, "registered table");
        self.tables.push(table);
    }

    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Scans `source` into a token stream (§4.1). Never aborts mid-scan;
    /// fails only once the full error list is known, as
    /// `CumulatedTokenizerException`.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, CumulatedTokenizerException> {
        Lexer::new(source).tokenize()
    }

    /// Parses a single statement out of `sql` (§4.8). Tokenizer errors are
    /// fatal to the parse; parser errors are collected in-band on the
    /// returned [`ParseResult`].
    pub fn parse(sql: &str) -> Result<ParseResult, CumulatedTokenizerException> {
        let tokens = Self::tokenize(sql)?;
        let mut parser = Parser::new(sql, tokens);
        let root = parser.statement();
        let (ast, errors) = parser.into_parts();
        Ok(ParseResult {
            ast,
            root,
            errors,
            sql: sql.to_string(),
        })
    }

    /// Parses a `;`-separated sequence of statements (§4.8). Each returned
    /// result's `sql` is the exact substring `[first_position, last_position)`
    /// covering just that statement; `errors` is the full parser error list,
    /// shared across every result, since panic-mode recovery can attribute a
    /// diagnostic to the statement boundary rather than cleanly to one side
    /// of it.
    pub fn parse_multiple(sql: &str) -> Result<Vec<ParseResult>, CumulatedTokenizerException> {
        let tokens = Self::tokenize(sql)?;
        let mut parser = Parser::new(sql, tokens);
        let statements = parser.statements();
        let (ast, errors) = parser.into_parts();
        Ok(statements
            .into_iter()
            .map(|(root, span)| ParseResult {
                ast: ast.clone(),
                root,
                errors: errors.clone(),
                sql: substring(sql, span),
            })
            .collect())
    }

    /// Convenience: `parse` then `analyze_parsed` (§4.8).
    pub fn analyze(&self, sql: &str) -> Result<AnalysisContext, CumulatedTokenizerException> {
        Self::parse(sql).map(|result| self.analyze_parsed(result))
    }

    /// Runs the full analysis pipeline (§4.8, §9): parent assignment and
    /// scope/reference-finding always run; ColumnResolver, ReferenceResolver,
    /// and TypeResolver run only over `CrudStatement`s, in that order
    /// (`analyzer::analyze` already restricts those three stages
    /// internally). Every visitor is total — analyzer-internal failures are
    /// captured as `AnalysisError` entries in the returned context rather
    /// than propagated as a `Result`, so this function cannot fail.
    #[tracing::instrument(skip(self, parse_result), fields(sql = %parse_result.sql))]
    pub fn analyze_parsed(&self, parse_result: ParseResult) -> AnalysisContext {
        let ParseResult { ast, root, sql, .. } = parse_result;
        let mut ctx = AnalysisContext::new(ast, sql, root);
        let root_scope = ctx.root_scope();
        for table in &self.tables {
            let scope = ctx.scopes_mut().get_mut(root_scope);
            scope.bind(&table.name, analyzer::Symbol::Table(table.clone()));
        }
        analyzer::analyze(&mut ctx);
        ctx
    }
}

fn substring(source: &str, span: Span) -> String {
    source
        .get(span.start..span.end)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{BaseType, Severity};
    use crate::table::{Column, ColumnType};

    fn demo_engine() -> Engine {
        let mut engine = Engine::new();
        engine.register_table(Table::new(
            "demo",
            vec![
                Column::new("id", ColumnType::Integer, false),
                Column::new("content", ColumnType::Text, true),
            ],
        ));
        engine
    }

    #[test]
    fn tokenize_fails_on_unterminated_string() {
        let err = Engine::tokenize("SELECT 'oops").unwrap_err();
        assert_eq!(err.errors.len(), 1);
    }

    #[test]
    fn parse_returns_partial_ast_and_errors_on_malformed_statement() {
        let result = Engine::parse("SELECT FROM FROM;").expect("tokenizes");
        assert!(!result.errors.is_empty());
    }

    #[test]
    fn parse_multiple_carves_each_statement_substring() {
        let results = Engine::parse_multiple("SELECT 1; SELECT 2").expect("tokenizes");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].sql.trim(), "SELECT 1");
        assert_eq!(results[1].sql.trim(), "SELECT 2");
        assert!(std::ptr::eq(results[0].errors.as_ptr(), results[1].errors.as_ptr()) || results[0].errors == results[1].errors);
    }

    #[test]
    fn analyze_resolves_equality_bind_variable_to_column_type() {
        let engine = demo_engine();
        let ctx = engine.analyze("SELECT * FROM demo WHERE id = ?").expect("tokenizes");
        assert!(!ctx.has_critical_errors());
        let var = ctx
            .ast
            .ids()
            .find(|id| ctx.ast.kind(*id).as_variable().is_some())
            .expect("a bind variable was parsed");
        assert_eq!(ctx.type_of(var).as_resolved().map(|t| t.base), Some(BaseType::Int));
    }

    #[test]
    fn analyze_parsed_reports_unresolved_reference_as_critical() {
        let engine = demo_engine();
        let ctx = engine.analyze("SELECT missing_col FROM demo").expect("tokenizes");
        assert!(ctx.errors.iter().any(|e| e.severity == Severity::Critical));
    }

    #[test]
    fn register_table_is_visible_to_later_analyze_calls() {
        let mut engine = Engine::new();
        let before = engine.analyze("SELECT * FROM demo").expect("tokenizes");
        assert!(before.has_critical_errors());

        engine.register_table(Table::new("demo", vec![Column::new("id", ColumnType::Integer, false)]));
        let after = engine.analyze("SELECT * FROM demo").expect("tokenizes");
        assert!(!after.has_critical_errors());
    }
}
