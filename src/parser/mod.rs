//! SQL Parser
//!
//! A hand-written recursive-descent parser with Pratt-style expression
//! parsing for the SQLite statement subset named in the data model:
//! `SELECT`, `INSERT`, `UPDATE`, `DELETE`, `CREATE TABLE`,
//! `CREATE INDEX`, and `CREATE TRIGGER`. Parsing never aborts: malformed
//! input is recorded as a [`ParseError`] and the parser recovers in
//! panic mode, producing an `AstNodeKind::Error` placeholder for the
//! unparsable statement and continuing with the next one.
//!
//! # Parsing approach
//!
//! Statements are parsed by dedicated recursive-descent methods directly
//! into an arena-backed [`crate::ast::Ast`]; nodes are referenced by
//! [`crate::ast::NodeId`] rather than owned `Box`. Expressions use a Pratt
//! (top-down operator precedence) parser whose binding-power table lives
//! in [`pratt`], kept as a data table rather than encoded into the shape
//! of the recursive functions.
//!
//! # Supported statements
//!
//! | Statement | Notes |
//! |-----------|-------|
//! | `SELECT`  | `WITH` (incl. `RECURSIVE`), `DISTINCT`/`ALL`, joins, `WHERE`, `GROUP BY`, `HAVING`, `WINDOW`, `ORDER BY`, `LIMIT`/`OFFSET` |
//! | `INSERT`  | `VALUES`, `DEFAULT VALUES`, sub-`SELECT`, `ON CONFLICT` |
//! | `UPDATE`  | `SET`, optional `FROM`, optional alias |
//! | `DELETE`  | Optional alias, `WHERE` |
//! | `CREATE TABLE` | Column and table-level constraints |
//! | `CREATE INDEX` | `UNIQUE`, partial-index `WHERE` |
//! | `CREATE TRIGGER` | `BEFORE`/`AFTER`/`INSTEAD OF`, `FOR EACH ROW`, `WHEN` |
//!
//! # JOINs
//!
//! `INNER`, `LEFT [OUTER]`, `RIGHT [OUTER]`, `FULL [OUTER]`, `CROSS`,
//! with `ON` or `USING` conditions. Chained (multi-table) joins are
//! left-associative.
//!
//! # Expressions
//!
//! - **Literals**: integers, floats, strings, blobs (`X'…'`), booleans
//!   (`TRUE`/`FALSE`), `NULL`
//! - **Column references**: unqualified (`col`), qualified (`t.col`),
//!   wildcards (`*`, `t.*`)
//! - **Operators**: the full arithmetic/comparison/logical/bitwise/concat
//!   set, plus `IS [NOT]`, `[NOT] BETWEEN … AND …`, `[NOT] IN (…)`,
//!   `[NOT] LIKE`/`GLOB`/`MATCH`/`REGEXP` with `ESCAPE`, `COLLATE`
//! - **`CASE`/`WHEN`/`THEN`/`ELSE`/`END`**, `CAST(… AS <type>)`,
//!   `EXISTS(…)`
//! - **Function calls**: named functions with optional `DISTINCT` or
//!   `*` argument (`COUNT(*)`), windowed via `OVER (...)` or `OVER name`
//! - **Subqueries**: scalar `(SELECT …)` in expressions
//! - **Bind variables**: `?`, `?N`, `:name`, `@name`, `$name`
//!
//! # Not supported
//!
//! Set operations (`UNION`/`INTERSECT`/`EXCEPT`), transactions
//! (`BEGIN`/`COMMIT`/`ROLLBACK`), `ALTER`/`DROP`, `NATURAL JOIN`.

mod error;
mod parser;
mod pratt;

pub use error::ParseError;
pub use parser::Parser;
