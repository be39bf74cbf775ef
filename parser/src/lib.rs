//! fieldform Parser
//!
//! This crate parses the schema definition language subset used by the
//! compiler:
//! - Object and interface type definitions (with `implements`)
//! - Enum, scalar, input and directive definitions
//! - Type references (`Name`, `[T]`, `T!`)
//! - Directives and their argument values
//! - Error handling with location information

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::*;
pub use error::*;
pub use parser::{parse_document, parse_type_ref, Parser};
