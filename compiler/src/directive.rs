//! `@transform` directive arguments.

use crate::{TransformError, TransformResult};
use fieldform_parser::{Directive, Value};

/// Definition of the directive, for hosts that register directive SDL.
pub const TRANSFORM_DIRECTIVE_SDL: &str = "directive @transform(expression: String!, \
     foreach: Boolean = false, always: Boolean = false) on FIELD_DEFINITION";

const EXPRESSION: &str = "expression";
const FOREACH: &str = "foreach";
const ALWAYS: &str = "always";

/// Arguments of one `@transform` usage.
///
/// `foreach` and `always` were added to the directive over time; both
/// default to `false`, so a usage that only sets `expression` keeps its
/// original meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformArgs {
    pub expression: String,
    pub foreach: bool,
    pub always: bool,
}

impl TransformArgs {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            foreach: false,
            always: false,
        }
    }

    pub fn foreach(mut self, foreach: bool) -> Self {
        self.foreach = foreach;
        self
    }

    pub fn always(mut self, always: bool) -> Self {
        self.always = always;
        self
    }

    /// Read the arguments of a directive usage on `type_name.field_name`.
    pub fn from_directive(
        directive: &Directive,
        type_name: &str,
        field_name: &str,
    ) -> TransformResult<Self> {
        let name = directive.name.as_str();

        for arg in &directive.arguments {
            if ![EXPRESSION, FOREACH, ALWAYS].contains(&arg.name.as_str()) {
                return Err(TransformError::unknown_argument(
                    name, &arg.name, type_name, field_name,
                ));
            }
        }

        let expression = match directive.argument(EXPRESSION) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(TransformError::argument_type(
                    name, EXPRESSION, "String", other, type_name, field_name,
                ));
            }
            None => {
                return Err(TransformError::missing_argument(
                    name, EXPRESSION, type_name, field_name,
                ));
            }
        };

        let flag = |arg: &str| -> TransformResult<bool> {
            match directive.argument(arg) {
                None | Some(Value::Null) => Ok(false),
                Some(value) => value.as_bool().ok_or_else(|| {
                    TransformError::argument_type(name, arg, "Boolean", value, type_name, field_name)
                }),
            }
        };

        Ok(Self {
            expression,
            foreach: flag(FOREACH)?,
            always: flag(ALWAYS)?,
        })
    }

    /// Diagnostic header placed around the generated block.
    ///
    /// The header ends up in a line comment, so line breaks in the
    /// expression are written as `\n` / `\r` escapes.
    pub fn header(&self, field_name: &str) -> String {
        format!(
            "Transformation for \"{}\" ({}, foreach={}, always={})",
            field_name,
            single_line(&self.expression),
            self.foreach,
            self.always
        )
    }
}

fn single_line(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}
