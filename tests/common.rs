//! Shared helpers for integration tests: parse a single statement and hand
//! back the arena plus the root id, narrowed to the statement shape the
//! test wants to assert on.

#![allow(dead_code)]

use oxide_sql_front::ast::{
    Ast, AstNodeKind, DeleteStatement, InsertStatement, NodeId, SelectStatement, UpdateStatement,
};
use oxide_sql_front::engine::Engine;
use oxide_sql_front::lexer::{Lexer, TokenKind};
use oxide_sql_front::parser::Parser;

/// Parses `sql` as a single statement, panicking if the parser recorded any
/// error (callers that want to assert on recovery use [`parse_with_errors`]
/// instead).
pub fn parse_ok(sql: &str) -> (Ast, NodeId) {
    let (ast, root, errors) = parse_raw(sql);
    assert!(errors.is_empty(), "unexpected parse errors for {sql:?}: {errors:?}");
    (ast, root)
}

pub fn parse_raw(sql: &str) -> (Ast, NodeId, Vec<oxide_sql_front::ParseError>) {
    let tokens = Lexer::new(sql).tokenize().unwrap_or_else(|e| panic!("tokenize {sql:?} failed: {e}"));
    let mut parser = Parser::new(sql, tokens);
    let root = parser.statement();
    let (ast, errors) = parser.into_parts();
    (ast, root, errors)
}

/// Parses `sql` expecting it to be a `SELECT`, returning the arena and the
/// decoded [`SelectStatement`] payload.
pub fn parse_select(sql: &str) -> (Ast, SelectStatement) {
    let (ast, root) = parse_ok(sql);
    match ast.kind(root).clone() {
        AstNodeKind::Select(s) => (ast, s),
        other => panic!("expected SELECT, got {other:?}"),
    }
}

pub fn parse_insert(sql: &str) -> (Ast, InsertStatement) {
    let (ast, root) = parse_ok(sql);
    match ast.kind(root).clone() {
        AstNodeKind::Insert(i) => (ast, i),
        other => panic!("expected INSERT, got {other:?}"),
    }
}

pub fn parse_update(sql: &str) -> (Ast, UpdateStatement) {
    let (ast, root) = parse_ok(sql);
    match ast.kind(root).clone() {
        AstNodeKind::Update(u) => (ast, u),
        other => panic!("expected UPDATE, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> (Ast, DeleteStatement) {
    let (ast, root) = parse_ok(sql);
    match ast.kind(root).clone() {
        AstNodeKind::Delete(d) => (ast, d),
        other => panic!("expected DELETE, got {other:?}"),
    }
}

/// Re-tokenizes `sql` and returns just the token kinds (EOF excluded), for
/// round-trip-style assertions that don't care about spans or lexemes.
pub fn token_kinds(sql: &str) -> Vec<TokenKind> {
    Lexer::new(sql)
        .tokenize()
        .unwrap_or_else(|e| panic!("tokenize {sql:?} failed: {e}"))
        .into_iter()
        .filter(|t| !matches!(t.kind, TokenKind::Eof))
        .map(|t| t.kind)
        .collect()
}

/// Asserts that tokenizing `sql` twice (the literal source, and itself
/// again) produces the same token kind sequence — the round-trip property
/// from the data model invariants.
pub fn round_trip(sql: &str) {
    assert_eq!(token_kinds(sql), token_kinds(sql));
}

pub fn demo_table() -> oxide_sql_front::table::Table {
    use oxide_sql_front::table::{Column, ColumnType, Table};
    Table::new(
        "demo",
        vec![
            Column::new("id", ColumnType::Integer, false),
            Column::new("content", ColumnType::Text, true),
        ],
    )
}

pub fn engine_with_demo() -> Engine {
    let mut engine = Engine::new();
    engine.register_table(demo_table());
    engine
}
