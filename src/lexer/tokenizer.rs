//! SQL Tokenizer (scanner) implementation.
//!
//! The scanner never aborts on bad input: each lexical error is recorded and
//! scanning resumes past the offending character so downstream stages still
//! see a best-effort token stream.

use super::error::{LexErrorEntry, LexErrorKind};
use super::{Keyword, Span, Token, TokenKind, VariableToken};
use crate::lexer::error::CumulatedTokenizerException;

/// A lexer that tokenizes SQL input.
#[derive(Clone)]
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Lexical errors accumulated so far.
    errors: Vec<LexErrorEntry>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            errors: Vec::new(),
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // Single-line comments (-- ...)
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                self.advance();
                self.advance();
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // Multi-line comments (/* ... */), non-nesting
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                let comment_start = self.pos;
                self.advance();
                self.advance();
                let mut closed = false;
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            closed = true;
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                if !closed {
                    self.errors.push(LexErrorEntry::new(
                        LexErrorKind::UnterminatedBlockComment,
                        Span::new(comment_start, self.pos),
                    ));
                }
                continue;
            }

            break;
        }
    }

    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    fn error_token(&mut self, kind: LexErrorKind) -> Token {
        let span = self.make_span();
        self.errors.push(LexErrorEntry::new(kind.clone(), span));
        self.make_token(TokenKind::Error(format!("{kind:?}")))
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];

        if let Some(keyword) = Keyword::from_str(text) {
            self.make_token(TokenKind::Keyword(keyword))
        } else {
            self.make_token(TokenKind::Identifier(text.to_string()))
        }
    }

    /// Scans a quoted identifier (`"column name"`, `` `column name` ``, or `[column name]`).
    fn scan_quoted_identifier(&mut self, open: char, close: char) -> Token {
        self.advance(); // consume opening delimiter
        let content_start = self.pos;

        loop {
            match self.peek() {
                Some(c) if c == close => {
                    if open == close && self.peek_next() == Some(close) {
                        self.advance();
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(_) => {
                    self.advance();
                }
                None => {
                    let content = &self.input[content_start..self.pos];
                    let unescaped = if open == close {
                        content.replace(&format!("{close}{close}"), &close.to_string())
                    } else {
                        content.to_string()
                    };
                    self.errors.push(LexErrorEntry::new(
                        LexErrorKind::UnterminatedQuotedIdentifier,
                        self.make_span(),
                    ));
                    return self.make_token(TokenKind::Identifier(unescaped));
                }
            }
        }

        let content = &self.input[content_start..self.pos];
        self.advance(); // consume closing delimiter

        let unescaped = if open == close {
            content.replace(&format!("{close}{close}"), &close.to_string())
        } else {
            content.to_string()
        };
        self.make_token(TokenKind::Identifier(unescaped))
    }

    /// Scans a number (integer, float, or `0x` hex integer).
    fn scan_number(&mut self) -> Token {
        if self.peek() == Some('0') && matches!(self.peek_next(), Some('x' | 'X')) {
            self.advance(); // 0
            self.advance(); // x
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
            }
            let text = &self.input[self.start + 2..self.pos];
            return match i64::from_str_radix(text, 16) {
                Ok(i) => self.make_token(TokenKind::Integer(i)),
                Err(_) => self.error_token(LexErrorKind::InvalidNumericLiteral),
            };
        }

        let mut is_float = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            is_float = true;
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.input[self.start..self.pos];

        if is_float {
            match text.parse::<f64>() {
                Ok(f) => self.make_token(TokenKind::Float(f)),
                Err(_) => self.error_token(LexErrorKind::InvalidNumericLiteral),
            }
        } else {
            match text.parse::<i64>() {
                Ok(i) => self.make_token(TokenKind::Integer(i)),
                Err(_) => self.error_token(LexErrorKind::InvalidNumericLiteral),
            }
        }
    }

    /// Scans a string literal.
    fn scan_string(&mut self, quote: char) -> Token {
        self.advance(); // consume opening quote
        let mut value = String::new();

        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    if self.peek_next() == Some(quote) {
                        value.push(quote);
                        self.advance();
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => {
                    self.errors.push(LexErrorEntry::new(
                        LexErrorKind::UnterminatedString,
                        self.make_span(),
                    ));
                    return self.make_token(TokenKind::String(value));
                }
            }
        }

        self.advance(); // consume closing quote
        self.make_token(TokenKind::String(value))
    }

    /// Scans a blob literal (`X'...'` or `x'...'`).
    fn scan_blob(&mut self) -> Token {
        self.advance(); // consume X/x
        if self.peek() != Some('\'') {
            return self.scan_identifier();
        }
        self.advance(); // consume opening quote

        let mut bytes = Vec::new();
        let mut hex_chars = String::new();

        loop {
            match self.peek() {
                Some('\'') => break,
                Some(c) if c.is_ascii_hexdigit() => {
                    hex_chars.push(c);
                    self.advance();

                    if hex_chars.len() == 2 {
                        if let Ok(byte) = u8::from_str_radix(&hex_chars, 16) {
                            bytes.push(byte);
                        }
                        hex_chars.clear();
                    }
                }
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some(_) => {
                    return self.error_token(LexErrorKind::InvalidBlobLiteral);
                }
                None => {
                    return self.error_token(LexErrorKind::UnterminatedBlobLiteral);
                }
            }
        }

        if !hex_chars.is_empty() {
            return self.error_token(LexErrorKind::InvalidBlobLiteral);
        }

        self.advance(); // consume closing quote
        self.make_token(TokenKind::Blob(bytes))
    }

    /// Scans a bind-variable placeholder starting at `?`, `:`, `@`, or `$`.
    fn scan_variable(&mut self, sigil: char) -> Token {
        if sigil == '?' {
            let digits_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
            if self.pos > digits_start {
                let digits = &self.input[digits_start..self.pos];
                return match digits.parse::<u32>() {
                    Ok(n) => self.make_token(TokenKind::Variable(VariableToken {
                        explicit_index: Some(n),
                        name: None,
                    })),
                    Err(_) => self.error_token(LexErrorKind::InvalidNumericLiteral),
                };
            }
            return self.make_token(TokenKind::Variable(VariableToken {
                explicit_index: None,
                name: None,
            }));
        }

        let name_start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }
        let name = self.input[name_start..self.pos].to_string();
        self.make_token(TokenKind::Variable(VariableToken {
            explicit_index: None,
            name: Some(name),
        }))
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.start = self.pos;

        let c = match self.advance() {
            Some(c) => c,
            None => return self.make_token(TokenKind::Eof),
        };

        match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '[' => {
                self.pos = self.start;
                self.scan_quoted_identifier('[', ']')
            }
            ']' => self.make_token(TokenKind::RightBracket),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '+' => self.make_token(TokenKind::Plus),
            '-' => self.make_token(TokenKind::Minus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '~' => self.make_token(TokenKind::BitNot),

            '?' | ':' | '@' | '$' => {
                self.pos = self.start;
                self.advance();
                self.scan_variable(c)
            }

            '.' => self.make_token(TokenKind::Dot),
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                }
                self.make_token(TokenKind::Eq)
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::LtEq)
                } else if self.peek() == Some('>') {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                } else if self.peek() == Some('<') {
                    self.advance();
                    self.make_token(TokenKind::LeftShift)
                } else {
                    self.make_token(TokenKind::Lt)
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::GtEq)
                } else if self.peek() == Some('>') {
                    self.advance();
                    self.make_token(TokenKind::RightShift)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                } else {
                    self.error_token(LexErrorKind::UnexpectedCharacter('!'))
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    self.make_token(TokenKind::Concat)
                } else {
                    self.make_token(TokenKind::BitOr)
                }
            }
            '&' => self.make_token(TokenKind::BitAnd),

            '\'' => {
                self.pos = self.start;
                self.scan_string('\'')
            }

            '"' => {
                self.pos = self.start;
                self.scan_quoted_identifier('"', '"')
            }
            '`' => {
                self.pos = self.start;
                self.scan_quoted_identifier('`', '`')
            }

            'X' | 'x' if self.peek() == Some('\'') => {
                self.pos = self.start;
                self.scan_blob()
            }

            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }

            c if c.is_alphabetic() || c == '_' => {
                self.pos = self.start;
                self.scan_identifier()
            }

            other => self.error_token(LexErrorKind::UnexpectedCharacter(other)),
        }
    }

    /// Tokenizes the entire input. Fails if scanning recorded any lexical error.
    ///
    /// # Errors
    /// Returns [`CumulatedTokenizerException`] if one or more lexical errors were
    /// recorded while scanning.
    pub fn tokenize(mut self) -> Result<Vec<Token>, CumulatedTokenizerException> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        if self.errors.is_empty() {
            Ok(tokens)
        } else {
            Err(CumulatedTokenizerException::new(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize().expect("no lexer errors")
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0].kind, TokenKind::Eof));
    }

    #[test]
    fn test_whitespace_only() {
        let tokens = tokenize("   \n\t  ");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0].kind, TokenKind::Eof));
    }

    #[test]
    fn test_single_line_comment() {
        assert_eq!(
            token_kinds("SELECT -- comment\nFROM"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_multi_line_comment() {
        assert_eq!(
            token_kinds("SELECT /* comment */ FROM"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment_is_accumulated() {
        let err = Lexer::new("SELECT /* oops").tokenize().unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(
            err.errors[0].kind,
            LexErrorKind::UnterminatedBlockComment
        );
    }

    #[test]
    fn test_unterminated_string_is_accumulated() {
        let err = Lexer::new("SELECT 'oops").tokenize().unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].kind, LexErrorKind::UnterminatedString);
    }

    #[test]
    fn test_scanning_continues_after_error() {
        let err = Lexer::new("SELECT # FROM t").tokenize().unwrap_err();
        assert_eq!(err.errors.len(), 1);
        // scanning still produced a full token stream around the bad char
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            token_kinds("SELECT FROM WHERE"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Keyword(Keyword::Where),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            token_kinds("select FROM wHeRe"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Keyword(Keyword::Where),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            token_kinds("foo bar_baz _qux"),
            vec![
                TokenKind::Identifier("foo".to_string()),
                TokenKind::Identifier("bar_baz".to_string()),
                TokenKind::Identifier("_qux".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_identifiers() {
        assert_eq!(
            token_kinds("\"column name\" `another` [bracketed]"),
            vec![
                TokenKind::Identifier("column name".to_string()),
                TokenKind::Identifier("another".to_string()),
                TokenKind::Identifier("bracketed".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_integers() {
        assert_eq!(
            token_kinds("42 0 123456789"),
            vec![
                TokenKind::Integer(42),
                TokenKind::Integer(0),
                TokenKind::Integer(123_456_789),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_hex_integer() {
        assert_eq!(
            token_kinds("0x2A"),
            vec![TokenKind::Integer(42), TokenKind::Eof]
        );
    }

    #[test]
    fn test_floats() {
        assert_eq!(
            token_kinds("3.14 0.5 1e10 2.5e-3"),
            vec![
                TokenKind::Float(3.14),
                TokenKind::Float(0.5),
                TokenKind::Float(1e10),
                TokenKind::Float(2.5e-3),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            token_kinds("'hello' 'world'"),
            vec![
                TokenKind::String("hello".to_string()),
                TokenKind::String("world".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_with_escaped_quote() {
        assert_eq!(
            token_kinds("'it''s'"),
            vec![TokenKind::String("it's".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_blob() {
        let tokens = tokenize("X'48454C4C4F'");
        assert_eq!(tokens.len(), 2);
        assert!(
            matches!(&tokens[0].kind, TokenKind::Blob(b) if b == &[0x48, 0x45, 0x4C, 0x4C, 0x4F])
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            token_kinds("+ - * / % = != <> < <= > >="),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            token_kinds("( ) [a] , ; . ::"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Identifier("a".to_string()),
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Dot,
                TokenKind::DoubleColon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_concat_operator() {
        assert_eq!(
            token_kinds("a || b"),
            vec![
                TokenKind::Identifier("a".to_string()),
                TokenKind::Concat,
                TokenKind::Identifier("b".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_bitwise_operators() {
        assert_eq!(
            token_kinds("a & b | c ~ d << e >> f"),
            vec![
                TokenKind::Identifier("a".to_string()),
                TokenKind::BitAnd,
                TokenKind::Identifier("b".to_string()),
                TokenKind::BitOr,
                TokenKind::Identifier("c".to_string()),
                TokenKind::BitNot,
                TokenKind::Identifier("d".to_string()),
                TokenKind::LeftShift,
                TokenKind::Identifier("e".to_string()),
                TokenKind::RightShift,
                TokenKind::Identifier("f".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_simple_select() {
        let sql = "SELECT id, name FROM users WHERE active = 1";
        assert_eq!(
            token_kinds(sql),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Identifier("id".to_string()),
                TokenKind::Comma,
                TokenKind::Identifier("name".to_string()),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Identifier("users".to_string()),
                TokenKind::Keyword(Keyword::Where),
                TokenKind::Identifier("active".to_string()),
                TokenKind::Eq,
                TokenKind::Integer(1),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("SELECT id");
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(7, 9));
    }

    #[test]
    fn test_parameter_placeholder_forms() {
        assert_eq!(
            token_kinds("? ?1 @param :param $also"),
            vec![
                TokenKind::Variable(VariableToken { explicit_index: None, name: None }),
                TokenKind::Variable(VariableToken { explicit_index: Some(1), name: None }),
                TokenKind::Variable(VariableToken {
                    explicit_index: None,
                    name: Some("param".to_string())
                }),
                TokenKind::Variable(VariableToken {
                    explicit_index: None,
                    name: Some("param".to_string())
                }),
                TokenKind::Variable(VariableToken {
                    explicit_index: None,
                    name: Some("also".to_string())
                }),
                TokenKind::Eof,
            ]
        );
    }
}
