//! Compiler configuration.

use crate::TransformResult;
use serde::Deserialize;

/// Names and template paths used when compiling `@transform`.
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Name of the field directive to compile.
    pub directive_name: String,
    /// Marker directive a type needs for its create/update resolvers to exist.
    pub model_directive: String,
    /// Template reference to the mutation input object.
    pub input_root: String,
    /// Name of the per-entry variable bound in `foreach` mode.
    pub entry_var: String,
    /// Spaces per nesting level in rendered templates.
    pub indent: usize,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            directive_name: "transform".to_string(),
            model_directive: "model".to_string(),
            input_root: "$ctx.args.input".to_string(),
            entry_var: "entry".to_string(),
            indent: 2,
        }
    }
}

impl TransformConfig {
    /// Read a config from TOML text, defaulting missing keys.
    pub fn from_toml_str(source: &str) -> TransformResult<Self> {
        Ok(toml::from_str(source)?)
    }
}
