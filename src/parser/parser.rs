//! Recursive-descent parser with Pratt-style expression parsing.
//!
//! The parser consumes a token stream produced by [`crate::lexer::Lexer`] and
//! builds statements directly into an arena-backed [`Ast`]. It never panics
//! or aborts on malformed input: every `parse_*` method that can fail returns
//! `Result<_, ()>`, where `Err(())` means a [`ParseError`] has already been
//! pushed onto `self.errors`; the caller either propagates the error with
//! `?` or, at a statement boundary, enters panic-mode recovery (§4.2).

use std::collections::HashMap;

use super::error::ParseError;
use super::pratt::{infix_binding_power, prefix_binding_power, token_to_binary_op, token_to_unary_op};
use crate::ast::{
    Ast, AstNodeKind, BetweenExpr, BinaryOpExpr, CaseExpr, CastExpr, ColumnConstraint, ColumnDef,
    CollateExpr, ConflictAction, CreateIndexStatement, CreateTableStatement,
    CreateTriggerStatement, CteDef, DataType, DeleteStatement, ExistsExpr,
    ExpressionResultColumnNode, FrameBound, FrameSpec, FrameUnit, FunctionCallExpr, InExpr,
    InSource, InsertSource, InsertStatement, JoinNode, JoinType, LikeExpr, LikeKind, Literal,
    NamedWindow, NodeId, NullOrdering, OnConflict, OrderByItem, OrderDirection, ReferenceExpr,
    SelectStatement, SelectStatementAsSourceNode, StarResultColumnNode, Statement,
    TableConstraint, TableReferenceNode, TriggerEvent, TriggerTiming, UnaryOpExpr,
    UpdateAssignment, UpdateStatement, VariableExpr, WindowFunctionExpr, WindowSpec,
};
use crate::lexer::{Keyword, Span, Token, TokenKind, VariableToken};

/// Tracks the stable numbering assigned to bind variables (§3, §4.2):
/// explicit index wins; otherwise left-to-right order among unnumbered
/// variables, continuing the highest index seen so far. Named variables
/// share an index across every occurrence of the same name.
#[derive(Debug, Default)]
struct VariableAllocator {
    highest: u32,
    named: HashMap<String, u32>,
}

impl VariableAllocator {
    fn anonymous(&mut self) -> u32 {
        self.highest += 1;
        self.highest
    }

    fn explicit(&mut self, index: u32) -> u32 {
        if index > self.highest {
            self.highest = index;
        }
        index
    }

    fn named(&mut self, name: &str) -> u32 {
        if let Some(&index) = self.named.get(name) {
            return index;
        }
        self.highest += 1;
        self.named.insert(name.to_string(), self.highest);
        self.highest
    }
}

/// Hand-written recursive-descent SQL parser (§4.2).
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    ast: Ast,
    errors: Vec<ParseError>,
    vars: VariableAllocator,
}

impl<'a> Parser<'a> {
    /// Builds a parser over an already-tokenized input. Tokenization is a
    /// separate, fatal-on-error stage (§7); by the time a `Parser` exists the
    /// caller has a clean token stream with no `TokenKind::Error` entries.
    #[must_use]
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        let tokens = if tokens.last().is_some_and(Token::is_eof) {
            tokens
        } else {
            let mut tokens = tokens;
            let eof_span = tokens.last().map_or(Span::new(0, 0), |t| t.span);
            tokens.push(Token::new(TokenKind::Eof, eof_span));
            tokens
        };
        Self {
            source,
            tokens,
            pos: 0,
            ast: Ast::new(),
            errors: Vec::new(),
            vars: VariableAllocator::default(),
        }
    }

    /// Parses a single statement. Always returns a node id: on failure the
    /// node is an `AstNodeKind::Error` placeholder and the diagnostic is
    /// recorded in `errors()`; nodes parsed before the failure remain in the
    /// arena even though the `Error` node does not reference them.
    pub fn statement(&mut self) -> NodeId {
        let start = self.current_span();
        match self.parse_statement_inner() {
            Ok(id) => id,
            Err(()) => {
                let failed_at = self.current_span();
                self.synchronize();
                self.ast.push(
                    AstNodeKind::Error("failed to parse statement".to_string()),
                    start.merge(failed_at),
                )
            }
        }
    }

    /// Parses a `;`-separated sequence of statements, tolerating a missing
    /// trailing semicolon. Returns each root id paired with the source span
    /// covering just that statement (used by `Engine::parse_multiple` to
    /// carve out each result's `sql` substring).
    pub fn statements(&mut self) -> Vec<(NodeId, Span)> {
        let mut out = Vec::new();
        while !self.is_eof() {
            while self.check(&TokenKind::Semicolon) {
                self.advance();
            }
            if self.is_eof() {
                break;
            }
            let start = self.current_span();
            let id = self.statement();
            let mut end = self.ast.span(id);
            if self.check(&TokenKind::Semicolon) {
                end = self.current_span();
                self.advance();
            }
            out.push((id, Span::new(start.start, end.end)));
        }
        out
    }

    /// Consumes the parser, returning the built arena and accumulated
    /// diagnostics.
    #[must_use]
    pub fn into_parts(self) -> (Ast, Vec<ParseError>) {
        (self.ast, self.errors)
    }

    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    // --- statement dispatch -------------------------------------------------

    fn parse_statement_inner(&mut self) -> Result<NodeId, ()> {
        match self.current_kind() {
            TokenKind::Keyword(Keyword::With | Keyword::Select) => self.parse_select_statement(),
            TokenKind::Keyword(Keyword::Insert) => self.parse_insert_statement(),
            TokenKind::Keyword(Keyword::Update) => self.parse_update_statement(),
            TokenKind::Keyword(Keyword::Delete) => self.parse_delete_statement(),
            TokenKind::Keyword(Keyword::Create) => self.parse_create_statement(),
            other => {
                let span = self.current_span();
                self.fail(format!("expected a statement, found {other:?}"), span)
            }
        }
    }

    /// Skips tokens until a synchronization point: `;`, a statement-start
    /// keyword, or end-of-file (§4.2). Never consumes the `;` itself so the
    /// `statements()` loop decides what to do with it.
    fn synchronize(&mut self) {
        while !self.is_eof() {
            if self.check(&TokenKind::Semicolon) {
                return;
            }
            if matches!(
                self.current_kind(),
                TokenKind::Keyword(
                    Keyword::Select
                        | Keyword::Insert
                        | Keyword::Update
                        | Keyword::Delete
                        | Keyword::Create
                        | Keyword::With
                )
            ) {
                return;
            }
            self.advance();
        }
    }

    // --- SELECT ---------------------------------------------------------

    fn parse_select_statement(&mut self) -> Result<NodeId, ()> {
        let start = self.current_span();
        let with = if self.check_keyword(Keyword::With) {
            Some(self.parse_with_clause()?)
        } else {
            None
        };

        self.expect_keyword(Keyword::Select)?;

        let distinct = if self.check_keyword(Keyword::Distinct) {
            self.advance();
            true
        } else {
            if self.check_keyword(Keyword::All) {
                self.advance();
            }
            false
        };

        let columns = self.parse_result_columns()?;

        let from = if self.check_keyword(Keyword::From) {
            self.advance();
            Some(self.parse_table_expr()?)
        } else {
            None
        };

        let where_clause = if self.check_keyword(Keyword::Where) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        let group_by = if self.check_keyword(Keyword::Group) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?
        } else {
            Vec::new()
        };

        let having = if self.check_keyword(Keyword::Having) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        let windows = if self.check_keyword(Keyword::Window) {
            self.advance();
            self.parse_named_windows()?
        } else {
            Vec::new()
        };

        let order_by = if self.check_keyword(Keyword::Order) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            self.parse_order_by_list()?
        } else {
            Vec::new()
        };

        let limit = if self.check_keyword(Keyword::Limit) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        let offset = if self.check_keyword(Keyword::Offset) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        let span = start.merge(self.previous_span());
        let stmt = SelectStatement {
            with,
            distinct,
            columns,
            from,
            where_clause,
            group_by,
            having,
            windows,
            order_by,
            limit,
            offset,
        };
        Ok(self.ast.push(AstNodeKind::from(Statement::Select(stmt)), span))
    }

    fn parse_with_clause(&mut self) -> Result<crate::ast::WithClause, ()> {
        self.expect_keyword(Keyword::With)?;
        let recursive = if self.check_keyword(Keyword::Recursive) {
            self.advance();
            true
        } else {
            false
        };
        let mut ctes = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            let columns = if self.check(&TokenKind::LeftParen) {
                self.advance();
                let cols = self.parse_identifier_list()?;
                self.expect(&TokenKind::RightParen)?;
                cols
            } else {
                Vec::new()
            };
            self.expect_keyword(Keyword::As)?;
            self.expect(&TokenKind::LeftParen)?;
            let body = self.parse_select_statement()?;
            self.expect(&TokenKind::RightParen)?;
            ctes.push(CteDef { name, columns, body });
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(crate::ast::WithClause { recursive, ctes })
    }

    fn parse_named_windows(&mut self) -> Result<Vec<NamedWindow>, ()> {
        let mut windows = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            self.expect_keyword(Keyword::As)?;
            self.expect(&TokenKind::LeftParen)?;
            let spec = self.parse_window_spec_body()?;
            self.expect(&TokenKind::RightParen)?;
            windows.push(NamedWindow { name, spec });
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(windows)
    }

    fn parse_result_columns(&mut self) -> Result<Vec<NodeId>, ()> {
        let mut columns = Vec::new();
        loop {
            let start = self.current_span();
            if self.check(&TokenKind::Star) {
                self.advance();
                columns.push(
                    self.ast
                        .push(AstNodeKind::StarResultColumn(StarResultColumnNode { table_alias: None }), start),
                );
            } else if matches!(self.current_kind(), TokenKind::Identifier(_))
                && matches!(self.peek_kind(1), TokenKind::Dot)
                && matches!(self.peek_kind(2), TokenKind::Star)
            {
                let table_alias = self.expect_identifier()?;
                self.advance(); // dot
                self.advance(); // star
                let span = start.merge(self.previous_span());
                columns.push(self.ast.push(
                    AstNodeKind::StarResultColumn(StarResultColumnNode {
                        table_alias: Some(table_alias),
                    }),
                    span,
                ));
            } else {
                let expr = self.parse_expression(0)?;
                let alias = self.parse_optional_column_alias()?;
                let span = start.merge(self.previous_span());
                columns.push(
                    self.ast
                        .push(AstNodeKind::ExpressionResultColumn(ExpressionResultColumnNode { expr, alias }), span),
                );
            }
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(columns)
    }

    fn parse_optional_column_alias(&mut self) -> Result<Option<String>, ()> {
        if self.check_keyword(Keyword::As) {
            self.advance();
            Ok(Some(self.expect_identifier()?))
        } else if matches!(self.current_kind(), TokenKind::Identifier(_)) {
            Ok(Some(self.expect_identifier()?))
        } else {
            Ok(None)
        }
    }

    // --- FROM / JOIN ------------------------------------------------------

    fn parse_table_expr(&mut self) -> Result<NodeId, ()> {
        let start = self.current_span();
        let mut left = self.parse_table_primary()?;
        while self.is_join_keyword() {
            let join_type = self.parse_join_type()?;
            let right = self.parse_table_primary()?;
            let (on, using) = if join_type == JoinType::Cross {
                (None, Vec::new())
            } else if self.check_keyword(Keyword::On) {
                self.advance();
                (Some(self.parse_expression(0)?), Vec::new())
            } else if self.check_keyword(Keyword::Using) {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let cols = self.parse_identifier_list()?;
                self.expect(&TokenKind::RightParen)?;
                (None, cols)
            } else {
                let span = self.current_span();
                self.fail("expected ON or USING after JOIN", span)?
            };
            let span = start.merge(self.previous_span());
            left = self.ast.push(
                AstNodeKind::Join(JoinNode { join_type, left, right, on, using }),
                span,
            );
        }
        Ok(left)
    }

    fn parse_table_primary(&mut self) -> Result<NodeId, ()> {
        let start = self.current_span();
        if self.check(&TokenKind::LeftParen) {
            self.advance();
            if self.check_keyword(Keyword::Select) || self.check_keyword(Keyword::With) {
                let query = self.parse_select_statement()?;
                self.expect(&TokenKind::RightParen)?;
                let alias = self.parse_optional_alias()?.unwrap_or_else(|| {
                    let span = self.previous_span();
                    self.errors.push(ParseError::new("sub-select used as a FROM source requires an alias", span));
                    String::new()
                });
                let span = start.merge(self.previous_span());
                return Ok(self
                    .ast
                    .push(AstNodeKind::SelectStatementAsSource(SelectStatementAsSourceNode { query, alias }), span));
            }
            let inner = self.parse_table_expr()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(inner);
        }

        let first = self.expect_identifier()?;
        let (schema, name) = if self.check(&TokenKind::Dot) {
            self.advance();
            (Some(first), self.expect_identifier()?)
        } else {
            (None, first)
        };
        let alias = self.parse_optional_alias()?;
        let span = start.merge(self.previous_span());
        Ok(self.ast.push(AstNodeKind::TableReference(TableReferenceNode { schema, name, alias }), span))
    }

    fn is_join_keyword(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Keyword(Keyword::Join | Keyword::Inner | Keyword::Left | Keyword::Right | Keyword::Full | Keyword::Cross)
        )
    }

    fn parse_join_type(&mut self) -> Result<JoinType, ()> {
        let kind = match self.current_kind() {
            TokenKind::Keyword(Keyword::Join) => {
                self.advance();
                JoinType::Inner
            }
            TokenKind::Keyword(Keyword::Inner) => {
                self.advance();
                self.expect_keyword(Keyword::Join)?;
                JoinType::Inner
            }
            TokenKind::Keyword(Keyword::Left) => {
                self.advance();
                if self.check_keyword(Keyword::Outer) {
                    self.advance();
                }
                self.expect_keyword(Keyword::Join)?;
                JoinType::Left
            }
            TokenKind::Keyword(Keyword::Right) => {
                self.advance();
                if self.check_keyword(Keyword::Outer) {
                    self.advance();
                }
                self.expect_keyword(Keyword::Join)?;
                JoinType::Right
            }
            TokenKind::Keyword(Keyword::Full) => {
                self.advance();
                if self.check_keyword(Keyword::Outer) {
                    self.advance();
                }
                self.expect_keyword(Keyword::Join)?;
                JoinType::Full
            }
            TokenKind::Keyword(Keyword::Cross) => {
                self.advance();
                self.expect_keyword(Keyword::Join)?;
                JoinType::Cross
            }
            other => {
                let span = self.current_span();
                return self.fail(format!("expected a JOIN keyword, found {other:?}"), span);
            }
        };
        Ok(kind)
    }

    fn parse_optional_alias(&mut self) -> Result<Option<String>, ()> {
        if self.check_keyword(Keyword::As) {
            self.advance();
            Ok(Some(self.expect_identifier()?))
        } else if matches!(self.current_kind(), TokenKind::Identifier(_)) && !self.is_clause_keyword() {
            Ok(Some(self.expect_identifier()?))
        } else {
            Ok(None)
        }
    }

    fn is_clause_keyword(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Keyword(
                Keyword::Where
                    | Keyword::Order
                    | Keyword::Group
                    | Keyword::Having
                    | Keyword::Limit
                    | Keyword::Offset
                    | Keyword::Join
                    | Keyword::Inner
                    | Keyword::Left
                    | Keyword::Right
                    | Keyword::Full
                    | Keyword::Cross
                    | Keyword::On
                    | Keyword::Using
                    | Keyword::Window
                    | Keyword::Set
            )
        )
    }

    fn parse_order_by_list(&mut self) -> Result<Vec<OrderByItem>, ()> {
        let mut items = Vec::new();
        loop {
            let expr = self.parse_expression(0)?;
            let direction = if self.check_keyword(Keyword::Desc) {
                self.advance();
                OrderDirection::Desc
            } else {
                if self.check_keyword(Keyword::Asc) {
                    self.advance();
                }
                OrderDirection::Asc
            };
            let nulls = if self.check_keyword(Keyword::Nulls) {
                self.advance();
                if self.check_keyword(Keyword::First) {
                    self.advance();
                    Some(NullOrdering::First)
                } else {
                    self.expect_keyword(Keyword::Last)?;
                    Some(NullOrdering::Last)
                }
            } else {
                None
            };
            items.push(OrderByItem { expr, direction, nulls });
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(items)
    }

    // --- INSERT / UPDATE / DELETE ------------------------------------------

    fn parse_insert_statement(&mut self) -> Result<NodeId, ()> {
        let start = self.current_span();
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;

        let first = self.expect_identifier()?;
        let (schema, table) = if self.check(&TokenKind::Dot) {
            self.advance();
            (Some(first), self.expect_identifier()?)
        } else {
            (None, first)
        };

        let columns = if self.check(&TokenKind::LeftParen) {
            self.advance();
            let cols = self.parse_identifier_list()?;
            self.expect(&TokenKind::RightParen)?;
            cols
        } else {
            Vec::new()
        };

        let source = if self.check_keyword(Keyword::Values) {
            self.advance();
            let mut rows = Vec::new();
            loop {
                self.expect(&TokenKind::LeftParen)?;
                let row = self.parse_expression_list()?;
                self.expect(&TokenKind::RightParen)?;
                rows.push(row);
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
            InsertSource::Values(rows)
        } else if self.check_keyword(Keyword::Select) || self.check_keyword(Keyword::With) {
            InsertSource::Query(self.parse_select_statement()?)
        } else if self.check_keyword(Keyword::Default) {
            self.advance();
            self.expect_keyword(Keyword::Values)?;
            InsertSource::DefaultValues
        } else {
            let span = self.current_span();
            return self.fail("expected VALUES, SELECT, or DEFAULT VALUES", span);
        };

        let on_conflict = if self.check_keyword(Keyword::On) {
            self.advance();
            self.expect_keyword(Keyword::Conflict)?;
            let columns = if self.check(&TokenKind::LeftParen) {
                self.advance();
                let cols = self.parse_identifier_list()?;
                self.expect(&TokenKind::RightParen)?;
                cols
            } else {
                Vec::new()
            };
            self.expect_keyword(Keyword::Do)?;
            let action = if self.check_keyword(Keyword::Nothing) {
                self.advance();
                ConflictAction::DoNothing
            } else {
                self.expect_keyword(Keyword::Update)?;
                self.expect_keyword(Keyword::Set)?;
                ConflictAction::DoUpdate(self.parse_assignment_list()?)
            };
            Some(OnConflict { columns, action })
        } else {
            None
        };

        let span = start.merge(self.previous_span());
        let stmt = InsertStatement { schema, table, columns, source, on_conflict };
        Ok(self.ast.push(AstNodeKind::from(Statement::Insert(stmt)), span))
    }

    fn parse_assignment_list(&mut self) -> Result<Vec<UpdateAssignment>, ()> {
        let mut assignments = Vec::new();
        loop {
            let column = self.expect_identifier()?;
            self.expect(&TokenKind::Eq)?;
            let value = self.parse_expression(0)?;
            assignments.push(UpdateAssignment { column, value });
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(assignments)
    }

    fn parse_update_statement(&mut self) -> Result<NodeId, ()> {
        let start = self.current_span();
        self.expect_keyword(Keyword::Update)?;

        let first = self.expect_identifier()?;
        let (schema, table) = if self.check(&TokenKind::Dot) {
            self.advance();
            (Some(first), self.expect_identifier()?)
        } else {
            (None, first)
        };
        let alias = self.parse_optional_alias()?;

        self.expect_keyword(Keyword::Set)?;
        let assignments = self.parse_assignment_list()?;

        let from = if self.check_keyword(Keyword::From) {
            self.advance();
            Some(self.parse_table_expr()?)
        } else {
            None
        };

        let where_clause = if self.check_keyword(Keyword::Where) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        let span = start.merge(self.previous_span());
        let stmt = UpdateStatement { schema, table, alias, assignments, from, where_clause };
        Ok(self.ast.push(AstNodeKind::from(Statement::Update(stmt)), span))
    }

    fn parse_delete_statement(&mut self) -> Result<NodeId, ()> {
        let start = self.current_span();
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;

        let first = self.expect_identifier()?;
        let (schema, table) = if self.check(&TokenKind::Dot) {
            self.advance();
            (Some(first), self.expect_identifier()?)
        } else {
            (None, first)
        };
        let alias = self.parse_optional_alias()?;

        let where_clause = if self.check_keyword(Keyword::Where) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        let span = start.merge(self.previous_span());
        let stmt = DeleteStatement { schema, table, alias, where_clause };
        Ok(self.ast.push(AstNodeKind::from(Statement::Delete(stmt)), span))
    }

    // --- DDL ----------------------------------------------------------------

    fn parse_create_statement(&mut self) -> Result<NodeId, ()> {
        self.expect_keyword(Keyword::Create)?;
        let unique = if self.check_keyword(Keyword::Unique) {
            self.advance();
            true
        } else {
            false
        };
        match self.current_kind() {
            TokenKind::Keyword(Keyword::Table) => self.parse_create_table(),
            TokenKind::Keyword(Keyword::Index) => self.parse_create_index(unique),
            TokenKind::Keyword(Keyword::Trigger) => self.parse_create_trigger(),
            other => {
                let span = self.current_span();
                self.fail(format!("expected TABLE, INDEX, or TRIGGER after CREATE, found {other:?}"), span)
            }
        }
    }

    fn parse_if_not_exists(&mut self) -> Result<bool, ()> {
        if self.check_keyword(Keyword::If) {
            self.advance();
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_create_table(&mut self) -> Result<NodeId, ()> {
        let start = self.previous_span();
        self.expect_keyword(Keyword::Table)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::LeftParen)?;

        let mut columns = Vec::new();
        let mut table_constraints = Vec::new();
        loop {
            if self.starts_table_constraint() {
                table_constraints.push(self.parse_table_constraint()?);
            } else {
                columns.push(self.parse_column_def()?);
            }
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(&TokenKind::RightParen)?;

        let span = start.merge(self.previous_span());
        let stmt = CreateTableStatement { if_not_exists, name, columns, table_constraints };
        Ok(self.ast.push(AstNodeKind::CreateTable(stmt), span))
    }

    fn starts_table_constraint(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Keyword(Keyword::Primary | Keyword::Unique | Keyword::Foreign | Keyword::Constraint)
        )
    }

    fn parse_table_constraint(&mut self) -> Result<TableConstraint, ()> {
        if self.check_keyword(Keyword::Constraint) {
            self.advance();
            self.expect_identifier()?;
        }
        match self.current_kind() {
            TokenKind::Keyword(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                self.expect(&TokenKind::LeftParen)?;
                let cols = self.parse_identifier_list()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(TableConstraint::PrimaryKey(cols))
            }
            TokenKind::Keyword(Keyword::Unique) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let cols = self.parse_identifier_list()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(TableConstraint::Unique(cols))
            }
            TokenKind::Keyword(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                self.expect(&TokenKind::LeftParen)?;
                let columns = self.parse_identifier_list()?;
                self.expect(&TokenKind::RightParen)?;
                self.expect_keyword(Keyword::References)?;
                let references_table = self.expect_identifier()?;
                self.expect(&TokenKind::LeftParen)?;
                let references_columns = self.parse_identifier_list()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(TableConstraint::ForeignKey { columns, references_table, references_columns })
            }
            other => {
                let span = self.current_span();
                self.fail(format!("expected a table constraint, found {other:?}"), span)
            }
        }
    }

    fn parse_column_def(&mut self) -> Result<ColumnDef, ()> {
        let name = self.expect_identifier()?;
        let data_type = if self.starts_data_type() { Some(self.parse_data_type()?) } else { None };
        let mut constraints = Vec::new();
        loop {
            if self.check_keyword(Keyword::Constraint) {
                self.advance();
                self.expect_identifier()?;
            }
            match self.current_kind() {
                TokenKind::Keyword(Keyword::Primary) => {
                    self.advance();
                    self.expect_keyword(Keyword::Key)?;
                    let autoincrement = if self.check_keyword(Keyword::Autoincrement) {
                        self.advance();
                        true
                    } else {
                        false
                    };
                    constraints.push(ColumnConstraint::PrimaryKey { autoincrement });
                }
                TokenKind::Keyword(Keyword::Not) => {
                    self.advance();
                    self.expect_keyword(Keyword::Null)?;
                    constraints.push(ColumnConstraint::NotNull);
                }
                TokenKind::Keyword(Keyword::Unique) => {
                    self.advance();
                    constraints.push(ColumnConstraint::Unique);
                }
                TokenKind::Keyword(Keyword::Default) => {
                    self.advance();
                    let value = if self.check(&TokenKind::LeftParen) {
                        self.advance();
                        let e = self.parse_expression(0)?;
                        self.expect(&TokenKind::RightParen)?;
                        e
                    } else {
                        self.parse_prefix()?
                    };
                    constraints.push(ColumnConstraint::Default(value));
                }
                TokenKind::Keyword(Keyword::Check) => {
                    self.advance();
                    self.expect(&TokenKind::LeftParen)?;
                    let e = self.parse_expression(0)?;
                    self.expect(&TokenKind::RightParen)?;
                    constraints.push(ColumnConstraint::Check(e));
                }
                _ => break,
            }
        }
        Ok(ColumnDef { name, data_type, constraints })
    }

    fn starts_data_type(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Keyword(
                Keyword::Int
                    | Keyword::Integer
                    | Keyword::Smallint
                    | Keyword::Bigint
                    | Keyword::Real
                    | Keyword::Double
                    | Keyword::Float
                    | Keyword::Decimal
                    | Keyword::Numeric
                    | Keyword::Char
                    | Keyword::Varchar
                    | Keyword::Text
                    | Keyword::Blob
                    | Keyword::Boolean
                    | Keyword::Date
                    | Keyword::Time
                    | Keyword::Timestamp
                    | Keyword::Datetime
            ) | TokenKind::Identifier(_)
        )
    }

    fn parse_create_index(&mut self, unique: bool) -> Result<NodeId, ()> {
        let start = self.previous_span();
        self.expect_keyword(Keyword::Index)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.expect_identifier()?;
        self.expect_keyword(Keyword::On)?;
        let table = self.expect_identifier()?;
        self.expect(&TokenKind::LeftParen)?;
        let columns = self.parse_identifier_list()?;
        self.expect(&TokenKind::RightParen)?;
        let where_clause = if self.check_keyword(Keyword::Where) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };
        let span = start.merge(self.previous_span());
        let stmt = CreateIndexStatement { unique, if_not_exists, name, table, columns, where_clause };
        Ok(self.ast.push(AstNodeKind::CreateIndex(stmt), span))
    }

    fn parse_create_trigger(&mut self) -> Result<NodeId, ()> {
        let start = self.previous_span();
        self.expect_keyword(Keyword::Trigger)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.expect_identifier()?;

        let timing = match self.current_kind() {
            TokenKind::Keyword(Keyword::Before) => {
                self.advance();
                TriggerTiming::Before
            }
            TokenKind::Keyword(Keyword::After) => {
                self.advance();
                TriggerTiming::After
            }
            TokenKind::Keyword(Keyword::Instead) => {
                self.advance();
                self.expect_keyword(Keyword::Of)?;
                TriggerTiming::InsteadOf
            }
            other => {
                let span = self.current_span();
                return self.fail(format!("expected BEFORE, AFTER, or INSTEAD OF, found {other:?}"), span);
            }
        };

        let event = match self.current_kind() {
            TokenKind::Keyword(Keyword::Insert) => {
                self.advance();
                TriggerEvent::Insert
            }
            TokenKind::Keyword(Keyword::Delete) => {
                self.advance();
                TriggerEvent::Delete
            }
            TokenKind::Keyword(Keyword::Update) => {
                self.advance();
                let of = if self.check_keyword(Keyword::Of) {
                    self.advance();
                    self.parse_identifier_list()?
                } else {
                    Vec::new()
                };
                TriggerEvent::Update { of }
            }
            other => {
                let span = self.current_span();
                return self.fail(format!("expected INSERT, UPDATE, or DELETE, found {other:?}"), span);
            }
        };

        self.expect_keyword(Keyword::On)?;
        let table = self.expect_identifier()?;

        let for_each_row = if self.check_keyword(Keyword::For) {
            self.advance();
            self.expect_keyword(Keyword::Each)?;
            self.expect_keyword(Keyword::Row)?;
            true
        } else {
            false
        };

        let when_clause = if self.check_keyword(Keyword::When) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        self.expect_keyword(Keyword::Begin)?;
        let mut body = Vec::new();
        while !self.check_keyword(Keyword::End) && !self.is_eof() {
            body.push(self.statement());
            while self.check(&TokenKind::Semicolon) {
                self.advance();
            }
        }
        self.expect_keyword(Keyword::End)?;

        let span = start.merge(self.previous_span());
        let stmt = CreateTriggerStatement {
            if_not_exists,
            name,
            timing,
            event,
            table,
            for_each_row,
            when_clause,
            body,
        };
        Ok(self.ast.push(AstNodeKind::CreateTrigger(stmt), span))
    }

    // --- expressions --------------------------------------------------------

    fn parse_expression(&mut self, min_bp: u8) -> Result<NodeId, ()> {
        let mut lhs = self.parse_prefix()?;
        loop {
            if let Some(bp) = postfix_binding_power(self.current_kind()) {
                if bp < min_bp {
                    break;
                }
                self.advance();
                let collation = self.expect_identifier()?;
                let span = self.ast.span(lhs).merge(self.previous_span());
                lhs = self.ast.push(AstNodeKind::Collate(CollateExpr { expr: lhs, collation }), span);
                continue;
            }

            if let Some((negated, skip)) = self.peek_negated_predicate() {
                let bp = 7;
                if bp < min_bp {
                    break;
                }
                for _ in 0..skip {
                    self.advance();
                }
                lhs = self.parse_predicate_tail(lhs, negated)?;
                continue;
            }

            if matches!(
                self.current_kind(),
                TokenKind::Keyword(Keyword::In | Keyword::Like | Keyword::Glob | Keyword::Match | Keyword::Regexp | Keyword::Between | Keyword::Is)
            ) {
                let bp = 7;
                if bp < min_bp {
                    break;
                }
                lhs = self.parse_predicate_tail(lhs, false)?;
                continue;
            }

            let Some((l_bp, r_bp)) = infix_binding_power(self.current_kind()) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            let op = token_to_binary_op(self.current_kind());
            let Some(op) = op else { break };
            self.advance();
            let rhs = self.parse_expression(r_bp)?;
            let span = self.ast.span(lhs).merge(self.ast.span(rhs));
            lhs = self.ast.push(AstNodeKind::BinaryOp(BinaryOpExpr { op, left: lhs, right: rhs }), span);
        }
        Ok(lhs)
    }

    /// Detects `NOT {IN|LIKE|GLOB|MATCH|REGEXP|BETWEEN}`, returning the
    /// negation flag and how many tokens (1 or 2) to skip before dispatching
    /// to [`Self::parse_predicate_tail`].
    fn peek_negated_predicate(&self) -> Option<(bool, usize)> {
        if !matches!(self.current_kind(), TokenKind::Keyword(Keyword::Not)) {
            return None;
        }
        if matches!(
            self.peek_kind(1),
            TokenKind::Keyword(Keyword::In | Keyword::Like | Keyword::Glob | Keyword::Match | Keyword::Regexp | Keyword::Between)
        ) {
            Some((true, 1))
        } else {
            None
        }
    }

    fn parse_predicate_tail(&mut self, lhs: NodeId, negated: bool) -> Result<NodeId, ()> {
        let start = self.ast.span(lhs);
        match self.current_kind() {
            TokenKind::Keyword(Keyword::Is) => {
                self.advance();
                let negated = if self.check_keyword(Keyword::Not) {
                    self.advance();
                    true
                } else {
                    false
                };
                if self.check_keyword(Keyword::Null) {
                    self.advance();
                    let op = if negated { crate::ast::UnaryOp::IsNotNull } else { crate::ast::UnaryOp::IsNull };
                    let span = start.merge(self.previous_span());
                    Ok(self.ast.push(AstNodeKind::UnaryOp(UnaryOpExpr { op, operand: lhs }), span))
                } else {
                    let rhs = self.parse_expression(9)?;
                    let op = if negated { crate::ast::BinaryOp::IsNot } else { crate::ast::BinaryOp::Is };
                    let span = start.merge(self.ast.span(rhs));
                    Ok(self.ast.push(AstNodeKind::BinaryOp(BinaryOpExpr { op, left: lhs, right: rhs }), span))
                }
            }
            TokenKind::Keyword(Keyword::In) => {
                self.advance();
                let source = self.parse_in_source()?;
                let span = start.merge(self.previous_span());
                Ok(self.ast.push(AstNodeKind::In(InExpr { negated, expr: lhs, source }), span))
            }
            TokenKind::Keyword(kw @ (Keyword::Like | Keyword::Glob | Keyword::Match | Keyword::Regexp)) => {
                let kind = match kw {
                    Keyword::Like => LikeKind::Like,
                    Keyword::Glob => LikeKind::Glob,
                    Keyword::Match => LikeKind::Match,
                    Keyword::Regexp => LikeKind::Regexp,
                    _ => unreachable!(),
                };
                self.advance();
                let pattern = self.parse_expression(8)?;
                let escape = if self.check_keyword(Keyword::Escape) {
                    self.advance();
                    Some(self.parse_expression(8)?)
                } else {
                    None
                };
                let span = start.merge(self.previous_span());
                Ok(self.ast.push(AstNodeKind::Like(LikeExpr { negated, kind, expr: lhs, pattern, escape }), span))
            }
            TokenKind::Keyword(Keyword::Between) => {
                self.advance();
                let low = self.parse_expression(8)?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_expression(8)?;
                let span = start.merge(self.ast.span(high));
                Ok(self.ast.push(AstNodeKind::Between(BetweenExpr { negated, expr: lhs, low, high }), span))
            }
            other => {
                let span = self.current_span();
                self.fail(format!("expected a predicate operator, found {other:?}"), span)
            }
        }
    }

    fn parse_in_source(&mut self) -> Result<InSource, ()> {
        if matches!(self.current_kind(), TokenKind::Variable(_)) {
            let var = self.parse_variable_expr()?;
            return Ok(InSource::Variable { var, parenthesized: false });
        }
        self.expect(&TokenKind::LeftParen)?;
        if self.check_keyword(Keyword::Select) || self.check_keyword(Keyword::With) {
            let query = self.parse_select_statement()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(InSource::Subquery(query));
        }
        if matches!(self.current_kind(), TokenKind::Variable(_)) && matches!(self.peek_kind(1), TokenKind::RightParen) {
            let var = self.parse_variable_expr()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(InSource::Variable { var, parenthesized: true });
        }
        if self.check(&TokenKind::RightParen) {
            self.advance();
            return Ok(InSource::List(Vec::new()));
        }
        let list = self.parse_expression_list()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(InSource::List(list))
    }

    fn parse_prefix(&mut self) -> Result<NodeId, ()> {
        let start = self.current_span();
        if let Some(op) = token_to_unary_op(self.current_kind()) {
            let bp = prefix_binding_power(self.current_kind()).unwrap_or(15);
            self.advance();
            let operand = self.parse_expression(bp)?;
            let span = start.merge(self.ast.span(operand));
            return Ok(self.ast.push(AstNodeKind::UnaryOp(UnaryOpExpr { op, operand }), span));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<NodeId, ()> {
        let start = self.current_span();
        match self.current_kind().clone() {
            TokenKind::Integer(n) => {
                self.advance();
                Ok(self.ast.push(AstNodeKind::Literal(Literal::Integer(n)), start))
            }
            TokenKind::Float(f) => {
                self.advance();
                Ok(self.ast.push(AstNodeKind::Literal(Literal::Float(f)), start))
            }
            TokenKind::String(s) => {
                self.advance();
                Ok(self.ast.push(AstNodeKind::Literal(Literal::String(s)), start))
            }
            TokenKind::Blob(b) => {
                self.advance();
                Ok(self.ast.push(AstNodeKind::Literal(Literal::Blob(b)), start))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(self.ast.push(AstNodeKind::Literal(Literal::Boolean(true)), start))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(self.ast.push(AstNodeKind::Literal(Literal::Boolean(false)), start))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(self.ast.push(AstNodeKind::Literal(Literal::Null), start))
            }
            TokenKind::Variable(_) => self.parse_variable_expr(),
            TokenKind::LeftParen => {
                self.advance();
                if self.check_keyword(Keyword::Select) || self.check_keyword(Keyword::With) {
                    let query = self.parse_select_statement()?;
                    self.expect(&TokenKind::RightParen)?;
                    let span = start.merge(self.previous_span());
                    Ok(self.ast.push(AstNodeKind::ScalarSubquery(query), span))
                } else {
                    let expr = self.parse_expression(0)?;
                    self.expect(&TokenKind::RightParen)?;
                    Ok(expr)
                }
            }
            TokenKind::Keyword(Keyword::Case) => self.parse_case_expr(),
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast_expr(),
            TokenKind::Keyword(Keyword::Exists) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let query = self.parse_select_statement()?;
                self.expect(&TokenKind::RightParen)?;
                let span = start.merge(self.previous_span());
                Ok(self.ast.push(AstNodeKind::Exists(ExistsExpr { query }), span))
            }
            TokenKind::Keyword(kw @ (Keyword::Count | Keyword::Sum | Keyword::Avg | Keyword::Min | Keyword::Max | Keyword::Coalesce | Keyword::Nullif)) => {
                self.advance();
                self.parse_function_call_tail(kw.as_str().to_ascii_lowercase(), start)
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if self.check(&TokenKind::LeftParen) {
                    return self.parse_function_call_tail(name, start);
                }
                if self.check(&TokenKind::Dot) {
                    self.advance();
                    let column = self.expect_identifier()?;
                    let span = start.merge(self.previous_span());
                    return Ok(self
                        .ast
                        .push(AstNodeKind::Reference(ReferenceExpr { table_alias: Some(name), column }), span));
                }
                Ok(self
                    .ast
                    .push(AstNodeKind::Reference(ReferenceExpr { table_alias: None, column: name }), start))
            }
            other => {
                let span = self.current_span();
                self.fail(format!("expected an expression, found {other:?}"), span)
            }
        }
    }

    fn parse_variable_expr(&mut self) -> Result<NodeId, ()> {
        let start = self.current_span();
        let TokenKind::Variable(VariableToken { explicit_index, name }) = self.current_kind().clone() else {
            let span = self.current_span();
            return self.fail("expected a bind variable", span);
        };
        self.advance();
        let index = if let Some(n) = explicit_index {
            self.vars.explicit(n)
        } else if let Some(name) = &name {
            self.vars.named(name)
        } else {
            self.vars.anonymous()
        };
        Ok(self
            .ast
            .push(AstNodeKind::Variable(VariableExpr { explicit_index, name, index }), start))
    }

    fn parse_function_call_tail(&mut self, name: String, start: Span) -> Result<NodeId, ()> {
        self.expect(&TokenKind::LeftParen)?;
        let distinct = if self.check_keyword(Keyword::Distinct) {
            self.advance();
            true
        } else {
            false
        };
        let (star_arg, args) = if self.check(&TokenKind::RightParen) {
            (false, Vec::new())
        } else if self.check(&TokenKind::Star) {
            self.advance();
            (true, Vec::new())
        } else {
            (false, self.parse_expression_list()?)
        };
        self.expect(&TokenKind::RightParen)?;
        let span = start.merge(self.previous_span());
        let call = self
            .ast
            .push(AstNodeKind::FunctionCall(FunctionCallExpr { name, distinct, star_arg, args }), span);

        if self.check_keyword(Keyword::Over) {
            self.advance();
            let window = if self.check(&TokenKind::LeftParen) {
                self.advance();
                let spec = self.parse_window_spec_body()?;
                self.expect(&TokenKind::RightParen)?;
                spec
            } else {
                let base = self.expect_identifier()?;
                WindowSpec { base_window: Some(base), partition_by: Vec::new(), order_by: Vec::new(), frame: None }
            };
            let span = start.merge(self.previous_span());
            return Ok(self.ast.push(AstNodeKind::WindowFunction(WindowFunctionExpr { function: call, window }), span));
        }
        Ok(call)
    }

    fn parse_window_spec_body(&mut self) -> Result<WindowSpec, ()> {
        let base_window = if matches!(self.current_kind(), TokenKind::Identifier(_))
            && !self.check_keyword(Keyword::Partition)
            && !self.check_keyword(Keyword::Order)
            && !self.check_keyword(Keyword::Rows)
            && !self.check_keyword(Keyword::Range)
        {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let partition_by = if self.check_keyword(Keyword::Partition) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?
        } else {
            Vec::new()
        };

        let order_by = if self.check_keyword(Keyword::Order) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            self.parse_order_by_list()?
        } else {
            Vec::new()
        };

        let frame = if self.check_keyword(Keyword::Rows) || self.check_keyword(Keyword::Range) {
            Some(self.parse_frame_spec()?)
        } else {
            None
        };

        Ok(WindowSpec { base_window, partition_by, order_by, frame })
    }

    fn parse_frame_spec(&mut self) -> Result<FrameSpec, ()> {
        let unit = if self.check_keyword(Keyword::Rows) {
            self.advance();
            FrameUnit::Rows
        } else {
            self.expect_keyword(Keyword::Range)?;
            FrameUnit::Range
        };
        if self.check_keyword(Keyword::Between) {
            self.advance();
            let start = self.parse_frame_bound()?;
            self.expect_keyword(Keyword::And)?;
            let end = self.parse_frame_bound()?;
            Ok(FrameSpec { unit, start, end: Some(end) })
        } else {
            let start = self.parse_frame_bound()?;
            Ok(FrameSpec { unit, start, end: None })
        }
    }

    fn parse_frame_bound(&mut self) -> Result<FrameBound, ()> {
        if self.check_keyword(Keyword::Unbounded) {
            self.advance();
            if self.check_keyword(Keyword::Preceding) {
                self.advance();
                return Ok(FrameBound::UnboundedPreceding);
            }
            self.expect_keyword(Keyword::Following)?;
            return Ok(FrameBound::UnboundedFollowing);
        }
        if self.check_keyword(Keyword::Current) {
            self.advance();
            self.expect_keyword(Keyword::Row)?;
            return Ok(FrameBound::CurrentRow);
        }
        let expr = self.parse_expression(0)?;
        if self.check_keyword(Keyword::Preceding) {
            self.advance();
            Ok(FrameBound::Preceding(expr))
        } else {
            self.expect_keyword(Keyword::Following)?;
            Ok(FrameBound::Following(expr))
        }
    }

    fn parse_case_expr(&mut self) -> Result<NodeId, ()> {
        let start = self.current_span();
        self.expect_keyword(Keyword::Case)?;
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(self.parse_expression(0)?)
        };
        let mut whens = Vec::new();
        while self.check_keyword(Keyword::When) {
            self.advance();
            let when_expr = self.parse_expression(0)?;
            self.expect_keyword(Keyword::Then)?;
            let then_expr = self.parse_expression(0)?;
            whens.push((when_expr, then_expr));
        }
        if whens.is_empty() {
            let span = self.current_span();
            return self.fail("CASE requires at least one WHEN clause", span);
        }
        let else_branch = if self.check_keyword(Keyword::Else) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;
        let span = start.merge(self.previous_span());
        Ok(self.ast.push(AstNodeKind::Case(CaseExpr { operand, whens, else_branch }), span))
    }

    fn parse_cast_expr(&mut self) -> Result<NodeId, ()> {
        let start = self.current_span();
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expression(0)?;
        self.expect_keyword(Keyword::As)?;
        let target = self.parse_data_type()?;
        self.expect(&TokenKind::RightParen)?;
        let span = start.merge(self.previous_span());
        Ok(self.ast.push(AstNodeKind::Cast(CastExpr { expr, target }), span))
    }

    fn parse_data_type(&mut self) -> Result<DataType, ()> {
        let data_type = match self.current_kind().clone() {
            TokenKind::Keyword(Keyword::Int | Keyword::Integer) => {
                self.advance();
                DataType::Integer
            }
            TokenKind::Keyword(Keyword::Smallint) => {
                self.advance();
                DataType::Smallint
            }
            TokenKind::Keyword(Keyword::Bigint) => {
                self.advance();
                DataType::Bigint
            }
            TokenKind::Keyword(Keyword::Real) => {
                self.advance();
                DataType::Real
            }
            TokenKind::Keyword(Keyword::Double) => {
                self.advance();
                DataType::Double
            }
            TokenKind::Keyword(Keyword::Float) => {
                self.advance();
                DataType::Double
            }
            TokenKind::Keyword(Keyword::Decimal) => {
                self.advance();
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Decimal { precision, scale }
            }
            TokenKind::Keyword(Keyword::Numeric) => {
                self.advance();
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Numeric { precision, scale }
            }
            TokenKind::Keyword(Keyword::Char) => {
                self.advance();
                DataType::Char(self.parse_optional_length()?)
            }
            TokenKind::Keyword(Keyword::Varchar) => {
                self.advance();
                DataType::Varchar(self.parse_optional_length()?)
            }
            TokenKind::Keyword(Keyword::Text) => {
                self.advance();
                DataType::Text
            }
            TokenKind::Keyword(Keyword::Blob) => {
                self.advance();
                DataType::Blob
            }
            TokenKind::Keyword(Keyword::Boolean) => {
                self.advance();
                DataType::Boolean
            }
            TokenKind::Keyword(Keyword::Date) => {
                self.advance();
                DataType::Date
            }
            TokenKind::Keyword(Keyword::Time) => {
                self.advance();
                DataType::Time
            }
            TokenKind::Keyword(Keyword::Timestamp) => {
                self.advance();
                DataType::Timestamp
            }
            TokenKind::Keyword(Keyword::Datetime) => {
                self.advance();
                DataType::Datetime
            }
            TokenKind::Identifier(name) => {
                self.advance();
                DataType::Custom(name)
            }
            other => {
                let span = self.current_span();
                return self.fail(format!("expected a data type, found {other:?}"), span);
            }
        };
        Ok(data_type)
    }

    fn parse_optional_precision_scale(&mut self) -> Result<(Option<u16>, Option<u16>), ()> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok((None, None));
        }
        self.advance();
        let precision = self.expect_u16()?;
        let scale = if self.check(&TokenKind::Comma) {
            self.advance();
            Some(self.expect_u16()?)
        } else {
            None
        };
        self.expect(&TokenKind::RightParen)?;
        Ok((Some(precision), scale))
    }

    fn parse_optional_length(&mut self) -> Result<Option<u32>, ()> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok(None);
        }
        self.advance();
        let len = match self.current_kind().clone() {
            TokenKind::Integer(n) => {
                self.advance();
                u32::try_from(n).map_err(|_| self.record_error("length out of range", self.previous_span()))?
            }
            other => {
                let span = self.current_span();
                return self.fail(format!("expected an integer length, found {other:?}"), span);
            }
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(Some(len))
    }

    fn expect_u16(&mut self) -> Result<u16, ()> {
        match self.current_kind().clone() {
            TokenKind::Integer(n) => {
                self.advance();
                u16::try_from(n).map_err(|_| self.record_error("value out of range", self.previous_span()))
            }
            other => {
                let span = self.current_span();
                self.fail(format!("expected an integer, found {other:?}"), span)
            }
        }
    }

    fn parse_expression_list(&mut self) -> Result<Vec<NodeId>, ()> {
        let mut exprs = Vec::new();
        loop {
            exprs.push(self.parse_expression(0)?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(exprs)
    }

    fn parse_identifier_list(&mut self) -> Result<Vec<String>, ()> {
        let mut idents = Vec::new();
        loop {
            idents.push(self.expect_identifier()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(idents)
    }

    // --- token-stream helpers -----------------------------------------------

    fn current_kind(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn peek_kind(&self, offset: usize) -> &TokenKind {
        self.tokens.get(self.pos + offset).map_or(&TokenKind::Eof, |t| &t.kind)
    }

    fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn previous_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1).min(self.tokens.len() - 1)].span
    }

    fn is_eof(&self) -> bool {
        self.tokens[self.pos].is_eof()
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(self.current_kind()) == core::mem::discriminant(kind)
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.current_kind(), TokenKind::Keyword(kw) if *kw == keyword)
    }

    fn record_error(&mut self, message: impl Into<String>, span: Span) {
        self.errors.push(ParseError::new(message, span));
    }

    fn fail<T>(&mut self, message: impl Into<String>, span: Span) -> Result<T, ()> {
        self.record_error(message, span);
        Err(())
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Span, ()> {
        if self.check(kind) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            let found = self.current_kind().clone();
            let span = self.current_span();
            self.fail(format!("expected {kind:?}, found {found:?}"), span)
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<Span, ()> {
        if self.check_keyword(keyword) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            let found = self.current_kind().clone();
            let span = self.current_span();
            self.fail(format!("expected {}, found {found:?}", keyword.as_str()), span)
        }
    }

    fn expect_identifier(&mut self) -> Result<String, ()> {
        match self.current_kind().clone() {
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(name)
            }
            TokenKind::Keyword(kw) if !self.is_reserved_everywhere(kw) => {
                self.advance();
                Ok(kw.as_str().to_string())
            }
            other => {
                let span = self.current_span();
                self.fail(format!("expected an identifier, found {other:?}"), span)
            }
        }
    }

    /// A handful of keywords that may also appear as bare identifiers in the
    /// SQLite dialect (unquoted type names used as column names etc.) are
    /// accepted by `expect_identifier`; everything with real grammar meaning
    /// stays reserved.
    fn is_reserved_everywhere(&self, kw: Keyword) -> bool {
        !matches!(kw, Keyword::Text | Keyword::Date | Keyword::Time | Keyword::Key | Keyword::Row)
    }
}

/// Postfix binding power lookup, re-exported here since it is only consulted
/// from the main expression loop above.
fn postfix_binding_power(kind: &TokenKind) -> Option<u8> {
    super::pratt::postfix_binding_power(kind)
}
