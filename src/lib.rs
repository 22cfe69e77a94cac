//! # oxide-sql-front
//!
//! A hand-written SQL front end for the SQLite dialect: lexical
//! tokenization, recursive-descent parsing, and semantic analysis (scope
//! construction, column/reference resolution, bidirectional type inference
//! for result columns and bind variables).
//!
//! The crate does not execute, plan, or optimize SQL, migrate schemas, or
//! provide a CLI — it turns a SQL source string into a typed, scope-resolved
//! AST for a downstream code generator to consume. The engine never learns
//! about tables from SQL text itself: callers register `Table` values ahead
//! of time (from whatever host-language schema DSL they use) via
//! [`Engine::register_table`].
//!
//! ## Example
//!
//! ```rust
//! use oxide_sql_front::engine::Engine;
//! use oxide_sql_front::table::{Column, ColumnType, Table};
//!
//! let mut engine = Engine::new();
//! engine.register_table(Table::new(
//!     "demo",
//!     vec![Column::new("id", ColumnType::Integer, false)],
//! ));
//!
//! let ctx = engine.analyze("SELECT * FROM demo WHERE id = ?").expect("tokenizes");
//! assert!(!ctx.has_critical_errors());
//! ```

pub mod analyzer;
pub mod ast;
pub mod engine;
pub mod lexer;
pub mod parser;
pub mod table;

pub use analyzer::{AnalysisContext, AnalysisError};
pub use ast::{Ast, AstNodeKind, NodeId, Statement};
pub use engine::{Engine, EngineOptions, ParseResult};
pub use lexer::{CumulatedTokenizerException, Lexer, Token, TokenKind};
pub use parser::{ParseError, Parser};
pub use table::{Column, Feature, Table};
