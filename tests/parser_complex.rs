//! Tests for complex realistic queries combining multiple features.

mod common;
use common::*;

use oxide_sql_front::ast::{AstNodeKind, BinaryOp, InsertSource, JoinType, OrderDirection};

#[test]
fn complex_report_query() {
    let (_, s) = parse_select(
        "SELECT c.name, COUNT(o.id) AS order_count, SUM(o.total) AS revenue \
         FROM customers AS c \
         LEFT JOIN orders AS o ON c.id = o.customer_id \
         WHERE c.active = 1 \
         GROUP BY c.name \
         HAVING COUNT(o.id) > 0 \
         ORDER BY revenue DESC \
         LIMIT 100",
    );
    assert_eq!(s.columns.len(), 3);
    assert!(s.where_clause.is_some());
    assert_eq!(s.group_by.len(), 1);
    assert!(s.having.is_some());
    assert_eq!(s.order_by.len(), 1);
    assert_eq!(s.order_by[0].direction, OrderDirection::Desc);
    assert!(s.limit.is_some());
    round_trip("SELECT c.name, COUNT(o.id) AS order_count, SUM(o.total) AS revenue FROM customers AS c LEFT JOIN orders AS o ON c.id = o.customer_id WHERE c.active = 1 GROUP BY c.name HAVING COUNT(o.id) > 0 ORDER BY revenue DESC LIMIT 100");
}

#[test]
fn complex_self_join() {
    let (ast, s) = parse_select(
        "SELECT e.name, m.name AS manager_name \
         FROM employees AS e \
         LEFT JOIN employees AS m ON e.manager_id = m.id",
    );
    let AstNodeKind::Join(j) = ast.kind(s.from.unwrap()) else { panic!("expected self-join") };
    assert_eq!(j.join_type, JoinType::Left);
    let AstNodeKind::TableReference(left) = ast.kind(j.left) else { panic!("expected table") };
    assert_eq!(left.name, "employees");
    assert_eq!(left.alias.as_deref(), Some("e"));
    let AstNodeKind::TableReference(right) = ast.kind(j.right) else { panic!("expected table") };
    assert_eq!(right.name, "employees");
    assert_eq!(right.alias.as_deref(), Some("m"));
    round_trip("SELECT e.name, m.name AS manager_name FROM employees AS e LEFT JOIN employees AS m ON e.manager_id = m.id");
}

#[test]
fn complex_three_table_join() {
    let (ast, s) = parse_select(
        "SELECT u.name, o.id, p.title \
         FROM users AS u \
         JOIN orders AS o ON u.id = o.user_id \
         JOIN products AS p ON o.product_id = p.id",
    );
    let AstNodeKind::Join(outer) = ast.kind(s.from.unwrap()) else { panic!("expected 3-table join") };
    let AstNodeKind::TableReference(right) = ast.kind(outer.right) else { panic!("expected table") };
    assert_eq!(right.name, "products");
    assert!(matches!(ast.kind(outer.left), AstNodeKind::Join(_)));
    round_trip("SELECT u.name, o.id, p.title FROM users AS u INNER JOIN orders AS o ON u.id = o.user_id INNER JOIN products AS p ON o.product_id = p.id");
}

#[test]
fn complex_insert_from_select_with_join() {
    let (ast, i) = parse_insert(
        "INSERT INTO order_summary (user_name, total) \
         SELECT u.name, SUM(o.amount) \
         FROM users AS u \
         JOIN orders AS o ON u.id = o.user_id \
         GROUP BY u.name",
    );
    assert_eq!(i.columns, vec!["user_name", "total"]);
    let InsertSource::Query(q) = &i.source else { panic!("expected INSERT ... SELECT") };
    let AstNodeKind::Select(sel) = ast.kind(*q) else { panic!("expected SELECT") };
    assert!(sel.from.is_some());
    assert_eq!(sel.group_by.len(), 1);
    round_trip("INSERT INTO order_summary (user_name, total) SELECT u.name, SUM(o.amount) FROM users AS u INNER JOIN orders AS o ON u.id = o.user_id GROUP BY u.name");
}

#[test]
fn complex_deeply_nested_arithmetic() {
    let (ast, s) = parse_select("SELECT ((1 + 2) * (3 - 4)) / 5");
    let AstNodeKind::ExpressionResultColumn(c0) = ast.kind(s.columns[0]).clone() else {
        panic!("expected expression column");
    };
    let AstNodeKind::BinaryOp(b) = ast.kind(c0.expr) else { panic!("expected division") };
    assert_eq!(b.op, BinaryOp::Div);
    round_trip("SELECT ((1 + 2) * (3 - 4)) / 5");
}

#[test]
fn complex_case_with_alias_and_order_by() {
    let (ast, s) = parse_select(
        "SELECT id, \
            CASE \
                WHEN score >= 90 THEN 'A' \
                WHEN score >= 80 THEN 'B' \
                ELSE 'C' \
            END AS grade \
         FROM students \
         ORDER BY grade ASC",
    );
    assert_eq!(s.columns.len(), 2);
    let AstNodeKind::ExpressionResultColumn(c1) = ast.kind(s.columns[1]).clone() else {
        panic!("expected expression column");
    };
    assert_eq!(c1.alias.as_deref(), Some("grade"));
    assert!(matches!(ast.kind(c1.expr), AstNodeKind::Case(_)));
    assert_eq!(s.order_by.len(), 1);
    round_trip("SELECT id, CASE WHEN score >= 90 THEN 'A' WHEN score >= 80 THEN 'B' ELSE 'C' END AS grade FROM students ORDER BY grade ASC");
}

#[test]
fn complex_where_mixing_operators() {
    let (ast, s) = parse_select(
        "SELECT * FROM products \
         WHERE (price > 10 AND price < 100) \
            OR (name LIKE '%sale%' AND active = 1)",
    );
    let AstNodeKind::BinaryOp(b) = ast.kind(s.where_clause.unwrap()) else { panic!("expected binary") };
    assert_eq!(b.op, BinaryOp::Or);
    round_trip(
        "SELECT * FROM products WHERE (price > 10 AND price < 100) OR (name LIKE '%sale%' AND active = 1)",
    );
}

#[test]
fn complex_update_with_subquery_in_set() {
    let (ast, u) = parse_update(
        "UPDATE users SET rank = (SELECT COUNT(*) FROM scores WHERE scores.user_id = users.id) \
         WHERE active = 1",
    );
    assert_eq!(u.assignments.len(), 1);
    assert!(matches!(ast.kind(u.assignments[0].value), AstNodeKind::ScalarSubquery(_)));
    assert!(u.where_clause.is_some());
    round_trip(
        "UPDATE users SET rank = (SELECT COUNT(*) FROM scores WHERE scores.user_id = users.id) WHERE active = 1",
    );
}
