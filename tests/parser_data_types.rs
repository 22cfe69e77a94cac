//! Tests for data type parsing via CAST expressions.

mod common;
use common::*;

use oxide_sql_front::ast::{AstNodeKind, DataType};

fn cast_type(sql: &str) -> DataType {
    let (ast, sel) = parse_select(sql);
    let AstNodeKind::ExpressionResultColumn(col) = ast.kind(sel.columns[0]).clone() else {
        panic!("expected expression result column");
    };
    let AstNodeKind::Cast(c) = ast.kind(col.expr) else { panic!("expected CAST") };
    c.target.clone()
}

#[test]
fn datatype_int() {
    assert_eq!(cast_type("SELECT CAST(x AS INT) FROM t"), DataType::Integer);
    round_trip("SELECT CAST(x AS INTEGER) FROM t");
}

#[test]
fn datatype_smallint() {
    assert_eq!(cast_type("SELECT CAST(x AS SMALLINT) FROM t"), DataType::Smallint);
    round_trip("SELECT CAST(x AS SMALLINT) FROM t");
}

#[test]
fn datatype_bigint() {
    assert_eq!(cast_type("SELECT CAST(x AS BIGINT) FROM t"), DataType::Bigint);
    round_trip("SELECT CAST(x AS BIGINT) FROM t");
}

#[test]
fn datatype_real() {
    assert_eq!(cast_type("SELECT CAST(x AS REAL) FROM t"), DataType::Real);
    round_trip("SELECT CAST(x AS REAL) FROM t");
}

#[test]
fn datatype_double() {
    assert_eq!(cast_type("SELECT CAST(x AS DOUBLE) FROM t"), DataType::Double);
    round_trip("SELECT CAST(x AS DOUBLE) FROM t");
}

#[test]
fn datatype_float_maps_to_double() {
    assert_eq!(cast_type("SELECT CAST(x AS FLOAT) FROM t"), DataType::Double);
    round_trip("SELECT CAST(x AS DOUBLE) FROM t");
}

#[test]
fn datatype_decimal_precision_scale() {
    assert_eq!(
        cast_type("SELECT CAST(x AS DECIMAL(10, 2)) FROM t"),
        DataType::Decimal { precision: Some(10), scale: Some(2) }
    );
    round_trip("SELECT CAST(x AS DECIMAL(10, 2)) FROM t");
}

#[test]
fn datatype_numeric() {
    assert_eq!(
        cast_type("SELECT CAST(x AS NUMERIC(8, 3)) FROM t"),
        DataType::Numeric { precision: Some(8), scale: Some(3) }
    );
    round_trip("SELECT CAST(x AS NUMERIC(8, 3)) FROM t");
}

#[test]
fn datatype_char() {
    assert_eq!(cast_type("SELECT CAST(x AS CHAR(10)) FROM t"), DataType::Char(Some(10)));
    round_trip("SELECT CAST(x AS CHAR(10)) FROM t");
}

#[test]
fn datatype_varchar_no_length() {
    assert_eq!(cast_type("SELECT CAST(x AS VARCHAR) FROM t"), DataType::Varchar(None));
    round_trip("SELECT CAST(x AS VARCHAR) FROM t");
}

#[test]
fn datatype_boolean() {
    assert_eq!(cast_type("SELECT CAST(x AS BOOLEAN) FROM t"), DataType::Boolean);
    round_trip("SELECT CAST(x AS BOOLEAN) FROM t");
}

#[test]
fn datatype_timestamp() {
    assert_eq!(cast_type("SELECT CAST(x AS TIMESTAMP) FROM t"), DataType::Timestamp);
    round_trip("SELECT CAST(x AS TIMESTAMP) FROM t");
}

#[test]
fn datatype_datetime() {
    assert_eq!(cast_type("SELECT CAST(x AS DATETIME) FROM t"), DataType::Datetime);
    round_trip("SELECT CAST(x AS DATETIME) FROM t");
}

#[test]
fn datatype_blob() {
    assert_eq!(cast_type("SELECT CAST(x AS BLOB) FROM t"), DataType::Blob);
    round_trip("SELECT CAST(x AS BLOB) FROM t");
}

#[test]
fn datatype_custom() {
    assert_eq!(
        cast_type("SELECT CAST(x AS MY_CUSTOM_TYPE) FROM t"),
        DataType::Custom("MY_CUSTOM_TYPE".to_string())
    );
}
