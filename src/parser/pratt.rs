//! Operator precedence, externalized as a data table rather than encoded
//! into the shape of the recursive-descent functions, so the grammar stays
//! auditable (§9 design note).
//!
//! Binding powers, lowest to highest: `OR` < `AND` < unary `NOT` <
//! equality-family (`=`, `!=`/`<>`, `IS`/`IS NOT`, `IN`, `LIKE`/`GLOB`/
//! `MATCH`/`REGEXP`, `BETWEEN`) < comparison < bitwise < additive <
//! multiplicative < `||` concat < unary (`-`, `+`, `~`) < `COLLATE`.

use crate::ast::BinaryOp;
use crate::lexer::{Keyword, TokenKind};

/// Prefix (unary) binding power for a token that can start an expression as
/// a unary operator. `None` means the token is not a unary-prefix operator
/// (it may still start a primary expression; see `parser.rs::parse_primary`).
#[must_use]
pub const fn prefix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Minus | TokenKind::Plus | TokenKind::BitNot => Some(17),
        TokenKind::Keyword(Keyword::Not) => Some(5),
        _ => None,
    }
}

/// Infix binding power `(left, right)` for a token that continues an
/// expression. Left-associative operators have `left < right`.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),
        TokenKind::Keyword(Keyword::And) => Some((3, 4)),

        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Keyword(
            Keyword::Is | Keyword::In | Keyword::Like | Keyword::Glob | Keyword::Match
                | Keyword::Regexp | Keyword::Between,
        ) => Some((7, 8)),

        TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq => Some((9, 10)),

        TokenKind::LeftShift | TokenKind::RightShift | TokenKind::BitAnd | TokenKind::BitOr => {
            Some((11, 12))
        }

        TokenKind::Plus | TokenKind::Minus => Some((13, 14)),

        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((15, 16)),

        TokenKind::Concat => Some((17, 18)),

        _ => None,
    }
}

/// Postfix binding power, currently only `COLLATE name`.
#[must_use]
pub const fn postfix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Keyword(Keyword::Collate) => Some(21),
        _ => None,
    }
}

/// Maps a plain infix token to its [`BinaryOp`]. Tokens handled by bespoke
/// grammar (`IS`, `IN`, `LIKE`-family, `BETWEEN`) are parsed directly by
/// the recursive-descent methods rather than through this table, since they
/// need more than a single child on each side.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        TokenKind::Keyword(Keyword::And) => Some(BinaryOp::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOp::Or),
        TokenKind::Concat => Some(BinaryOp::Concat),
        TokenKind::BitAnd => Some(BinaryOp::BitAnd),
        TokenKind::BitOr => Some(BinaryOp::BitOr),
        TokenKind::LeftShift => Some(BinaryOp::LeftShift),
        TokenKind::RightShift => Some(BinaryOp::RightShift),
        _ => None,
    }
}

/// Maps a unary-prefix token to its [`crate::ast::UnaryOp`].
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<crate::ast::UnaryOp> {
    use crate::ast::UnaryOp;
    match kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::Keyword(Keyword::Not) => Some(UnaryOp::Not),
        TokenKind::BitNot => Some(UnaryOp::BitNot),
        _ => None,
    }
}
