//! Parser for schema source text.
//!
//! This module is organized into submodules by parsing category:
//! - `definition`: Type system definitions (type, interface, input, enum, scalar, directive)
//! - `value`: Type references, directive usages, and constant values

mod definition;
mod value;

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, Token, TokenKind};

// ==================== PARSER STATE ====================

/// Parser state.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a new parser from source text.
    pub fn new(input: &str) -> ParseResult<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self { tokens, pos: 0 })
    }
}

// ==================== TOKEN HELPERS ====================

impl Parser {
    pub(crate) fn peek(&self) -> &Token {
        // The token stream always ends with Eof and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    /// Check for a name token with exactly this text (keywords are case-sensitive).
    pub(crate) fn check_name(&self, name: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Name(s) if s == name)
    }

    /// Consume `kind` if it is next.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let token = self.peek();
            Err(ParseError::unexpected_token(
                token.span,
                kind.name(),
                token.kind.name(),
            ))
        }
    }

    pub(crate) fn expect_name(&mut self) -> ParseResult<String> {
        match self.peek().kind.clone() {
            TokenKind::Name(name) => {
                self.advance();
                Ok(name)
            }
            _ => {
                let token = self.peek();
                Err(ParseError::unexpected_token(
                    token.span,
                    "name",
                    token.kind.name(),
                ))
            }
        }
    }

    pub(crate) fn expect_keyword(&mut self, keyword: &str) -> ParseResult<Token> {
        if self.check_name(keyword) {
            Ok(self.advance())
        } else {
            let token = self.peek();
            Err(ParseError::unexpected_token(
                token.span,
                keyword,
                token.kind.name(),
            ))
        }
    }

    /// Skip an optional description string in front of a definition.
    pub(crate) fn skip_description(&mut self) {
        if matches!(self.peek().kind, TokenKind::String(_)) {
            self.advance();
        }
    }

    pub(crate) fn span_from(&self, start: Span) -> Span {
        let end_token = if self.pos > 0 {
            &self.tokens[self.pos - 1]
        } else {
            self.peek()
        };
        Span::new(start.start, end_token.span.end, start.line, start.column)
    }
}

// ==================== PUBLIC API ====================

/// Parse a schema document from source text.
pub fn parse_document(input: &str) -> ParseResult<Document> {
    Parser::new(input)?.parse_document()
}

/// Parse a standalone type reference such as `[String!]!`.
pub fn parse_type_ref(input: &str) -> ParseResult<TypeRef> {
    let mut parser = Parser::new(input)?;
    let ty = parser.parse_type()?;
    parser.expect(&TokenKind::Eof)?;
    Ok(ty)
}

// ==================== TESTS ====================
