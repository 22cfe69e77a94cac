//! Lexer error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Span;

/// The specific lexical problem encountered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LexErrorKind {
    /// A `'...'` string literal was never closed.
    UnterminatedString,
    /// A `/* ... */` comment was never closed.
    UnterminatedBlockComment,
    /// A `"..."`/`` `...` ``/`[...]` quoted identifier was never closed.
    UnterminatedQuotedIdentifier,
    /// An `X'...'` blob literal was never closed.
    UnterminatedBlobLiteral,
    /// A blob literal contained a non-hex character or an odd digit count.
    InvalidBlobLiteral,
    /// A numeric literal could not be parsed once scanned.
    InvalidNumericLiteral,
    /// A byte did not start any recognized token.
    UnexpectedCharacter(char),
}

/// A single lexical error, tied to the span where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{kind:?} at {span:?}")]
pub struct LexErrorEntry {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexErrorEntry {
    #[must_use]
    pub const fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Raised by [`crate::lexer::Lexer::tokenize`] when scanning produced one or more
/// [`LexErrorEntry`] values. Scanning itself never aborts early; this is only
/// raised once the caller asks for the final token stream.
#[derive(Debug, Clone, Error)]
#[error("tokenization failed with {} error(s)", .errors.len())]
pub struct CumulatedTokenizerException {
    pub errors: Vec<LexErrorEntry>,
}

impl CumulatedTokenizerException {
    #[must_use]
    pub const fn new(errors: Vec<LexErrorEntry>) -> Self {
        Self { errors }
    }
}
