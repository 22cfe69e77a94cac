//! Tests for SELECT FROM clause: table references, aliases,
//! schema-qualified tables, subqueries, and all JOIN types.

mod common;
use common::*;

use oxide_sql_front::ast::{Ast, AstNodeKind, JoinType, NodeId};

fn from_node(sql: &str) -> (Ast, NodeId) {
    let (ast, sel) = parse_select(sql);
    (ast.clone(), sel.from.expect("expected FROM clause"))
}

#[test]
fn from_simple_table() {
    let (ast, from) = from_node("SELECT * FROM users");
    let AstNodeKind::TableReference(t) = ast.kind(from) else { panic!("expected table reference") };
    assert_eq!(t.name, "users");
    assert!(t.schema.is_none());
    assert!(t.alias.is_none());
    round_trip("SELECT * FROM users");
}

#[test]
fn from_table_with_as_alias() {
    let (ast, from) = from_node("SELECT * FROM users AS u");
    let AstNodeKind::TableReference(t) = ast.kind(from) else { panic!("expected table reference") };
    assert_eq!(t.name, "users");
    assert_eq!(t.alias.as_deref(), Some("u"));
    round_trip("SELECT * FROM users AS u");
}

#[test]
fn from_table_with_bare_alias() {
    let (ast, from) = from_node("SELECT * FROM users u");
    let AstNodeKind::TableReference(t) = ast.kind(from) else { panic!("expected table reference") };
    assert_eq!(t.name, "users");
    assert_eq!(t.alias.as_deref(), Some("u"));
    round_trip("SELECT * FROM users AS u");
}

#[test]
fn from_schema_qualified_table() {
    let (ast, from) = from_node("SELECT * FROM public.users");
    let AstNodeKind::TableReference(t) = ast.kind(from) else { panic!("expected table reference") };
    assert_eq!(t.schema.as_deref(), Some("public"));
    assert_eq!(t.name, "users");
    round_trip("SELECT * FROM public.users");
}

#[test]
fn from_subquery_with_alias() {
    let (ast, from) = from_node("SELECT t.id FROM (SELECT id FROM users) AS t");
    let AstNodeKind::SelectStatementAsSource(s) = ast.kind(from) else { panic!("expected subquery source") };
    assert_eq!(s.alias, "t");
    round_trip("SELECT t.id FROM (SELECT id FROM users) AS t");
}

#[test]
fn from_subquery_with_where() {
    let (ast, from) = from_node("SELECT t.id FROM (SELECT id FROM users WHERE active = 1) AS t");
    let AstNodeKind::SelectStatementAsSource(s) = ast.kind(from) else { panic!("expected subquery source") };
    assert_eq!(s.alias, "t");
    let AstNodeKind::Select(inner) = ast.kind(s.query) else { panic!("expected inner SELECT") };
    assert!(inner.where_clause.is_some());
    round_trip("SELECT t.id FROM (SELECT id FROM users WHERE active = 1) AS t");
}

#[test]
fn join_inner() {
    let (ast, from) = from_node("SELECT * FROM a INNER JOIN b ON a.id = b.a_id");
    let AstNodeKind::Join(j) = ast.kind(from) else { panic!("expected JOIN") };
    assert_eq!(j.join_type, JoinType::Inner);
    assert!(j.on.is_some());
    round_trip("SELECT * FROM a INNER JOIN b ON a.id = b.a_id");
}

#[test]
fn join_left() {
    let (ast, from) = from_node("SELECT * FROM a LEFT JOIN b ON a.id = b.a_id");
    let AstNodeKind::Join(j) = ast.kind(from) else { panic!("expected JOIN") };
    assert_eq!(j.join_type, JoinType::Left);
    round_trip("SELECT * FROM a LEFT JOIN b ON a.id = b.a_id");
}

#[test]
fn join_right() {
    let (ast, from) = from_node("SELECT * FROM a RIGHT JOIN b ON a.id = b.a_id");
    let AstNodeKind::Join(j) = ast.kind(from) else { panic!("expected JOIN") };
    assert_eq!(j.join_type, JoinType::Right);
    round_trip("SELECT * FROM a RIGHT JOIN b ON a.id = b.a_id");
}

#[test]
fn join_full() {
    let (ast, from) = from_node("SELECT * FROM a FULL JOIN b ON a.id = b.a_id");
    let AstNodeKind::Join(j) = ast.kind(from) else { panic!("expected JOIN") };
    assert_eq!(j.join_type, JoinType::Full);
    round_trip("SELECT * FROM a FULL JOIN b ON a.id = b.a_id");
}

#[test]
fn join_cross() {
    let (ast, from) = from_node("SELECT * FROM a CROSS JOIN b");
    let AstNodeKind::Join(j) = ast.kind(from) else { panic!("expected CROSS JOIN") };
    assert_eq!(j.join_type, JoinType::Cross);
    assert!(j.on.is_none());
    assert!(j.using.is_empty());
    round_trip("SELECT * FROM a CROSS JOIN b");
}

#[test]
fn join_left_outer() {
    let (ast, from) = from_node("SELECT * FROM a LEFT OUTER JOIN b ON a.id = b.a_id");
    let AstNodeKind::Join(j) = ast.kind(from) else { panic!("expected LEFT OUTER JOIN") };
    assert_eq!(j.join_type, JoinType::Left);
    round_trip("SELECT * FROM a LEFT JOIN b ON a.id = b.a_id");
}

#[test]
fn join_right_outer() {
    let (ast, from) = from_node("SELECT * FROM a RIGHT OUTER JOIN b ON a.id = b.a_id");
    let AstNodeKind::Join(j) = ast.kind(from) else { panic!("expected RIGHT OUTER JOIN") };
    assert_eq!(j.join_type, JoinType::Right);
    round_trip("SELECT * FROM a RIGHT JOIN b ON a.id = b.a_id");
}

#[test]
fn join_full_outer() {
    let (ast, from) = from_node("SELECT * FROM a FULL OUTER JOIN b ON a.id = b.a_id");
    let AstNodeKind::Join(j) = ast.kind(from) else { panic!("expected FULL OUTER JOIN") };
    assert_eq!(j.join_type, JoinType::Full);
    round_trip("SELECT * FROM a FULL JOIN b ON a.id = b.a_id");
}

#[test]
fn join_bare_defaults_to_inner() {
    let (ast, from) = from_node("SELECT * FROM a JOIN b ON a.id = b.a_id");
    let AstNodeKind::Join(j) = ast.kind(from) else { panic!("expected bare JOIN") };
    assert_eq!(j.join_type, JoinType::Inner);
    round_trip("SELECT * FROM a INNER JOIN b ON a.id = b.a_id");
}

#[test]
fn join_using_single_column() {
    let (ast, from) = from_node("SELECT * FROM a JOIN b USING (id)");
    let AstNodeKind::Join(j) = ast.kind(from) else { panic!("expected JOIN USING") };
    assert!(j.on.is_none());
    assert_eq!(j.using, vec!["id"]);
    round_trip("SELECT * FROM a INNER JOIN b USING (id)");
}

#[test]
fn join_using_multiple_columns() {
    let (ast, from) = from_node("SELECT * FROM a JOIN b USING (id, name)");
    let AstNodeKind::Join(j) = ast.kind(from) else { panic!("expected JOIN USING") };
    assert_eq!(j.using, vec!["id", "name"]);
    round_trip("SELECT * FROM a INNER JOIN b USING (id, name)");
}

#[test]
fn join_chained_three_tables() {
    let (ast, from) = from_node(
        "SELECT * FROM a \
         JOIN b ON a.id = b.a_id \
         JOIN c ON b.id = c.b_id",
    );
    let AstNodeKind::Join(outer) = ast.kind(from) else { panic!("expected chained JOIN") };
    assert_eq!(outer.join_type, JoinType::Inner);
    let AstNodeKind::TableReference(right) = ast.kind(outer.right) else { panic!("expected table") };
    assert_eq!(right.name, "c");
    assert!(matches!(ast.kind(outer.left), AstNodeKind::Join(_)));
    round_trip("SELECT * FROM a INNER JOIN b ON a.id = b.a_id INNER JOIN c ON b.id = c.b_id");
}
