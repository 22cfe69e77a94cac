//! Parser error taxonomy.
//!
//! Unlike the lexer, the parser never stops at the first mistake: it
//! records a [`ParseError`] and recovers in panic mode (§4.2), so a single
//! `Parser` accumulates a `Vec<ParseError>` across an entire `statements()`
//! call rather than returning on the first one.

use thiserror::Error;

use crate::lexer::{Span, TokenKind};

/// A single parse diagnostic, tied to the span where recovery began.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at {span:?}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    #[must_use]
    pub fn unexpected(expected: &str, found: &TokenKind, span: Span) -> Self {
        Self::new(format!("expected {expected}, found {found:?}"), span)
    }

    #[must_use]
    pub fn unexpected_eof(expected: &str, span: Span) -> Self {
        Self::new(format!("unexpected end of input, expected {expected}"), span)
    }
}
