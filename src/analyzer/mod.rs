//! Semantic analysis (§3, §4): scope construction, star expansion,
//! reference resolution, and bidirectional type inference over a parsed
//! [`crate::ast::Ast`].
//!
//! Submodules run in a fixed pipeline driven by [`crate::engine::Engine`]:
//! [`set_parent`] → [`reference_finder`] → [`column_resolver`] →
//! [`reference_resolver`] → [`type_resolver`]. Each is a plain function
//! over `&mut AnalysisContext` rather than a visitor-class hierarchy (§9),
//! dispatching on [`crate::ast::AstNodeKind`] with a `match`.

pub mod column_resolver;
pub mod context;
pub mod reference_finder;
pub mod reference_resolver;
pub mod scope;
pub mod set_parent;
pub mod type_resolver;
mod walk;

pub use context::{AnalysisContext, AnalysisError, BaseType, ResolveResult, ResolvedType, Severity, TypeHint};
pub use scope::{Scope, ScopeArena, ScopeId, Symbol};

/// Runs the full analysis pipeline over `ctx` in the fixed order the
/// component design requires (§4.8): parent assignment first (type
/// resolution needs it), then scope construction, then — only for the
/// `CrudStatement` family — star expansion, reference resolution and type
/// inference.
pub fn analyze(ctx: &mut AnalysisContext) {
    set_parent::run(ctx);
    reference_finder::run(ctx);
    column_resolver::run(ctx);
    reference_resolver::run(ctx);
    type_resolver::run(ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use crate::table::{Column, ColumnType, Table};

    #[test]
    fn full_pipeline_resolves_simple_select() {
        let sql = "SELECT id FROM demo WHERE id = ?1";
        let lexer = Lexer::new(sql);
        let tokens = lexer.tokenize().expect("lex");
        let mut parser = Parser::new(sql, tokens);
        let root = parser.statement();
        let (ast, parse_errors) = parser.into_parts();
        assert!(parse_errors.is_empty());

        let mut ctx = AnalysisContext::new(ast, sql.to_string(), root);
        let root_scope = ctx.root_scope();
        let table = Table::new("demo", vec![Column::new("id", ColumnType::Integer, false)]);
        ctx.scopes_mut().get_mut(root_scope).bind("demo", Symbol::Table(table));

        analyze(&mut ctx);

        assert!(!ctx.has_critical_errors());
        let var = ctx
            .ast
            .ids()
            .find(|id| ctx.ast.kind(*id).as_variable().is_some())
            .expect("a bind variable was parsed");
        assert_eq!(
            ctx.type_of(var).as_resolved().map(|t| t.base),
            Some(BaseType::Int)
        );
    }
}
