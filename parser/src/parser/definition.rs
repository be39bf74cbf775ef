//! Type system definition parsing.
//!
//! Handles parsing of SDL definitions:
//! - Object and interface types
//! - Input objects
//! - Enums and scalars
//! - Directive definitions

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::TokenKind;

impl Parser {
    /// Parse a whole document.
    pub fn parse_document(&mut self) -> ParseResult<Document> {
        let mut definitions = Vec::new();

        while !self.check(&TokenKind::Eof) {
            definitions.push(self.parse_definition()?);
        }

        Ok(Document { definitions })
    }

    /// Parse a single definition, with an optional leading description.
    fn parse_definition(&mut self) -> ParseResult<Definition> {
        self.skip_description();

        let token = self.peek().clone();
        match &token.kind {
            TokenKind::Name(kw) if kw == "type" => self
                .parse_type_def(TypeKind::Object)
                .map(Definition::Type),
            TokenKind::Name(kw) if kw == "interface" => self
                .parse_type_def(TypeKind::Interface)
                .map(Definition::Type),
            TokenKind::Name(kw) if kw == "input" => self.parse_input_def().map(Definition::Input),
            TokenKind::Name(kw) if kw == "enum" => self.parse_enum_def().map(Definition::Enum),
            TokenKind::Name(kw) if kw == "scalar" => {
                self.parse_scalar_def().map(Definition::Scalar)
            }
            TokenKind::Name(kw) if kw == "directive" => {
                self.parse_directive_def().map(Definition::Directive)
            }
            _ => Err(ParseError::unexpected_token(
                token.span,
                "definition (type, interface, input, enum, scalar, or directive)",
                token.kind.name(),
            )),
        }
    }

    // ==================== OBJECT / INTERFACE ====================

    /// Parse an object or interface definition.
    /// Syntax: type Name [implements A & B] [@dir...] [{ field... }]
    fn parse_type_def(&mut self, kind: TypeKind) -> ParseResult<TypeDefinition> {
        let start = self.expect_keyword(kind.keyword())?.span;
        let name = self.expect_name()?;

        let interfaces = if self.check_name("implements") {
            self.advance();
            self.parse_implements()?
        } else {
            Vec::new()
        };

        let directives = self.parse_directives()?;

        let fields = if self.check(&TokenKind::LBrace) {
            self.parse_field_defs()?
        } else {
            Vec::new()
        };

        let span = self.span_from(start);
        Ok(TypeDefinition {
            kind,
            name,
            interfaces,
            directives,
            fields,
            span,
        })
    }

    /// Parse `A & B & C`; a leading `&` is allowed.
    fn parse_implements(&mut self) -> ParseResult<Vec<String>> {
        self.eat(&TokenKind::Amp);
        let mut interfaces = vec![self.expect_name()?];
        while self.eat(&TokenKind::Amp) {
            interfaces.push(self.expect_name()?);
        }
        Ok(interfaces)
    }

    fn parse_field_defs(&mut self) -> ParseResult<Vec<FieldDefinition>> {
        self.expect(&TokenKind::LBrace)?;

        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
            fields.push(self.parse_field_def()?);
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(fields)
    }

    /// Parse a field definition.
    /// Syntax: name[(args)]: Type [@dir...]
    fn parse_field_def(&mut self) -> ParseResult<FieldDefinition> {
        self.skip_description();
        let start = self.peek().span;
        let name = self.expect_name()?;

        let arguments = if self.check(&TokenKind::LParen) {
            self.parse_argument_defs()?
        } else {
            Vec::new()
        };

        self.expect(&TokenKind::Colon)?;
        let ty = self.parse_type()?;
        let directives = self.parse_directives()?;

        let span = self.span_from(start);
        Ok(FieldDefinition {
            name,
            arguments,
            ty,
            directives,
            span,
        })
    }

    fn parse_argument_defs(&mut self) -> ParseResult<Vec<InputValueDefinition>> {
        self.expect(&TokenKind::LParen)?;

        let mut args = Vec::new();
        while !self.check(&TokenKind::RParen) && !self.check(&TokenKind::Eof) {
            args.push(self.parse_input_value_def()?);
        }

        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    /// Parse an input value definition.
    /// Syntax: name: Type [= default] [@dir...]
    fn parse_input_value_def(&mut self) -> ParseResult<InputValueDefinition> {
        self.skip_description();
        let start = self.peek().span;
        let name = self.expect_name()?;
        self.expect(&TokenKind::Colon)?;
        let ty = self.parse_type()?;

        let default_value = if self.eat(&TokenKind::Eq) {
            Some(self.parse_value()?)
        } else {
            None
        };

        let directives = self.parse_directives()?;

        let span = self.span_from(start);
        Ok(InputValueDefinition {
            name,
            ty,
            default_value,
            directives,
            span,
        })
    }

    // ==================== INPUT ====================

    fn parse_input_def(&mut self) -> ParseResult<InputDefinition> {
        let start = self.expect_keyword("input")?.span;
        let name = self.expect_name()?;
        let directives = self.parse_directives()?;

        let mut fields = Vec::new();
        if self.eat(&TokenKind::LBrace) {
            while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
                fields.push(self.parse_input_value_def()?);
            }
            self.expect(&TokenKind::RBrace)?;
        }

        let span = self.span_from(start);
        Ok(InputDefinition {
            name,
            directives,
            fields,
            span,
        })
    }

    // ==================== ENUM / SCALAR ====================

    fn parse_enum_def(&mut self) -> ParseResult<EnumDefinition> {
        let start = self.expect_keyword("enum")?.span;
        let name = self.expect_name()?;
        let directives = self.parse_directives()?;

        let mut values = Vec::new();
        if self.eat(&TokenKind::LBrace) {
            while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
                self.skip_description();
                values.push(self.expect_name()?);
                // Directives on enum values are accepted and dropped.
                self.parse_directives()?;
            }
            self.expect(&TokenKind::RBrace)?;
        }

        let span = self.span_from(start);
        Ok(EnumDefinition {
            name,
            directives,
            values,
            span,
        })
    }

    fn parse_scalar_def(&mut self) -> ParseResult<ScalarDefinition> {
        let start = self.expect_keyword("scalar")?.span;
        let name = self.expect_name()?;
        let directives = self.parse_directives()?;

        let span = self.span_from(start);
        Ok(ScalarDefinition {
            name,
            directives,
            span,
        })
    }

    // ==================== DIRECTIVE DEFINITION ====================

    /// Parse a directive definition.
    /// Syntax: directive @name[(args)] [repeatable] on LOC [| LOC...]
    fn parse_directive_def(&mut self) -> ParseResult<DirectiveDefinition> {
        let start = self.expect_keyword("directive")?.span;
        self.expect(&TokenKind::At)?;
        let name = self.expect_name()?;

        let arguments = if self.check(&TokenKind::LParen) {
            self.parse_argument_defs()?
        } else {
            Vec::new()
        };

        let repeatable = if self.check_name("repeatable") {
            self.advance();
            true
        } else {
            false
        };

        self.expect_keyword("on")?;
        self.eat(&TokenKind::Pipe);
        let mut locations = vec![self.expect_name()?];
        while self.eat(&TokenKind::Pipe) {
            locations.push(self.expect_name()?);
        }

        let span = self.span_from(start);
        Ok(DirectiveDefinition {
            name,
            arguments,
            repeatable,
            locations,
            span,
        })
    }
}
