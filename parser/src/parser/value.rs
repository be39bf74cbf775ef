//! Type reference, directive, and value parsing.

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::TokenKind;

impl Parser {
    /// Parse a type reference: `Name`, `[Type]`, either optionally followed by `!`.
    pub fn parse_type(&mut self) -> ParseResult<TypeRef> {
        let inner = if self.eat(&TokenKind::LBracket) {
            let item = self.parse_type()?;
            self.expect(&TokenKind::RBracket)?;
            TypeRef::list(item)
        } else if matches!(self.peek().kind, TokenKind::Name(_)) {
            TypeRef::Named(self.expect_name()?)
        } else {
            let token = self.peek();
            return Err(ParseError::unexpected_token(
                token.span,
                "type",
                token.kind.name(),
            ));
        };

        if self.eat(&TokenKind::Bang) {
            Ok(TypeRef::non_null(inner))
        } else {
            Ok(inner)
        }
    }

    /// Parse zero or more directive usages.
    pub(crate) fn parse_directives(&mut self) -> ParseResult<Vec<Directive>> {
        let mut directives = Vec::new();
        while self.check(&TokenKind::At) {
            directives.push(self.parse_directive()?);
        }
        Ok(directives)
    }

    /// Parse a directive usage.
    /// Syntax: @name[(arg: value, ...)]
    fn parse_directive(&mut self) -> ParseResult<Directive> {
        let start = self.expect(&TokenKind::At)?.span;
        let name = self.expect_name()?;

        let mut arguments = Vec::new();
        if self.eat(&TokenKind::LParen) {
            while !self.check(&TokenKind::RParen) && !self.check(&TokenKind::Eof) {
                let arg_start = self.peek().span;
                let arg_name = self.expect_name()?;
                self.expect(&TokenKind::Colon)?;
                let value = self.parse_value()?;
                arguments.push(Argument {
                    name: arg_name,
                    value,
                    span: self.span_from(arg_start),
                });
            }
            self.expect(&TokenKind::RParen)?;
        }

        let span = self.span_from(start);
        Ok(Directive {
            name,
            arguments,
            span,
        })
    }

    /// Parse a constant value.
    pub(crate) fn parse_value(&mut self) -> ParseResult<Value> {
        let token = self.advance();
        match token.kind {
            TokenKind::Int(n) => Ok(Value::Int(n)),
            TokenKind::Float(f) => Ok(Value::Float(f)),
            TokenKind::String(s) => Ok(Value::String(s)),
            TokenKind::Name(name) => Ok(match name.as_str() {
                "true" => Value::Boolean(true),
                "false" => Value::Boolean(false),
                "null" => Value::Null,
                _ => Value::Enum(name),
            }),
            TokenKind::LBracket => {
                let mut items = Vec::new();
                while !self.check(&TokenKind::RBracket) && !self.check(&TokenKind::Eof) {
                    items.push(self.parse_value()?);
                }
                self.expect(&TokenKind::RBracket)?;
                Ok(Value::List(items))
            }
            TokenKind::LBrace => {
                let mut fields = Vec::new();
                while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
                    let key = self.expect_name()?;
                    self.expect(&TokenKind::Colon)?;
                    fields.push((key, self.parse_value()?));
                }
                self.expect(&TokenKind::RBrace)?;
                Ok(Value::Object(fields))
            }
            TokenKind::Dollar => Err(ParseError::new(
                "variables are not allowed in schema definitions",
                token.span,
            )),
            other => Err(ParseError::unexpected_token(
                token.span,
                "value",
                other.name(),
            )),
        }
    }
}
