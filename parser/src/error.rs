//! Parser error types.

use crate::Span;
use thiserror::Error;

/// A parse error with location information.
#[derive(Debug, Clone, Error)]
#[error("Parse error at line {}, column {}: {}", .span.line, .span.column, .message)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    pub expected: Option<String>,
    pub found: Option<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    pub fn unexpected_token(span: Span, expected: &str, found: &str) -> Self {
        Self {
            message: format!("expected {}, found {}", expected, found),
            span,
            expected: Some(expected.to_string()),
            found: Some(found.to_string()),
        }
    }

    pub fn unexpected_char(span: Span, c: char) -> Self {
        Self::new(format!("unexpected character '{}'", c), span)
    }

    pub fn unterminated_string(span: Span) -> Self {
        Self::new("unterminated string", span)
    }

    pub fn invalid_number(span: Span, text: &str) -> Self {
        Self::new(format!("invalid number '{}'", text), span)
    }

    pub fn line(&self) -> usize {
        self.span.line
    }

    pub fn column(&self) -> usize {
        self.span.column
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
