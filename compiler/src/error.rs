//! Compiler error types.

use fieldform_parser::{TypeRef, Value};
use thiserror::Error;

/// Errors that can occur while compiling `@transform` directives.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The directive is used somewhere it cannot apply. The message names
    /// the offending type and field and is meant to be shown verbatim.
    #[error("{message}")]
    InvalidDirective { message: String },

    /// Parse error from the schema parser.
    #[error("Parse error: {0}")]
    Parse(#[from] fieldform_parser::ParseError),

    /// Configuration could not be read.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl TransformError {
    pub fn invalid_directive(message: impl Into<String>) -> Self {
        Self::InvalidDirective {
            message: message.into(),
        }
    }

    pub fn interface_field(directive: &str, type_name: &str, field_name: &str) -> Self {
        Self::invalid_directive(format!(
            "The @{} directive cannot be placed on an interface's field. See {}.{}",
            directive, type_name, field_name
        ))
    }

    pub fn missing_model(directive: &str, model: &str, type_name: &str) -> Self {
        Self::invalid_directive(format!(
            "@{} directive can only be used on types with @{} directive. See {}",
            directive, model, type_name
        ))
    }

    pub fn foreach_requires_list(
        directive: &str,
        type_name: &str,
        field_name: &str,
        ty: &TypeRef,
    ) -> Self {
        Self::invalid_directive(format!(
            "@{} directive with foreach=true option can only be used on list type fields. \
             See {}.{} of type {}",
            directive, type_name, field_name, ty
        ))
    }

    pub fn missing_argument(directive: &str, argument: &str, type_name: &str, field_name: &str) -> Self {
        Self::invalid_directive(format!(
            "@{} directive requires the '{}' argument. See {}.{}",
            directive, argument, type_name, field_name
        ))
    }

    pub fn argument_type(
        directive: &str,
        argument: &str,
        expected: &str,
        found: &Value,
        type_name: &str,
        field_name: &str,
    ) -> Self {
        Self::invalid_directive(format!(
            "@{} argument '{}' must be a {}, found {}. See {}.{}",
            directive,
            argument,
            expected,
            found.kind_name(),
            type_name,
            field_name
        ))
    }

    pub fn unknown_argument(directive: &str, argument: &str, type_name: &str, field_name: &str) -> Self {
        Self::invalid_directive(format!(
            "@{} directive has no argument named '{}'. See {}.{}",
            directive, argument, type_name, field_name
        ))
    }

    pub fn duplicate_directive(directive: &str, type_name: &str, field_name: &str) -> Self {
        Self::invalid_directive(format!(
            "The @{} directive can only be used once per field. See {}.{}",
            directive, type_name, field_name
        ))
    }

    pub fn is_invalid_directive(&self) -> bool {
        matches!(self, Self::InvalidDirective { .. })
    }
}

/// Result type for compiler operations.
pub type TransformResult<T> = Result<T, TransformError>;
