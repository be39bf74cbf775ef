//! The generated resolver artifact.

use serde::{Deserialize, Serialize};

/// Resource type tag carried by every generated resolver.
pub const RESOLVER_RESOURCE_TYPE: &str = "AWS::AppSync::Resolver";

/// A generated resolver resource.
///
/// Only `request_mapping_template` is rewritten by the compiler; the other
/// properties belong to whoever generated the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resolver {
    #[serde(rename = "Type")]
    pub resource_type: String,
    pub properties: ResolverProperties,
}

/// Properties of a resolver resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResolverProperties {
    pub type_name: String,
    pub field_name: String,
    /// Request-side code executed before the data source is called.
    pub request_mapping_template: String,
    #[serde(default)]
    pub response_mapping_template: String,
}

impl Resolver {
    /// Create a resolver attached to `type_name.field_name`.
    pub fn new(
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        request_mapping_template: impl Into<String>,
    ) -> Self {
        Self {
            resource_type: RESOLVER_RESOURCE_TYPE.to_string(),
            properties: ResolverProperties {
                type_name: type_name.into(),
                field_name: field_name.into(),
                request_mapping_template: request_mapping_template.into(),
                response_mapping_template: String::new(),
            },
        }
    }

    pub fn with_response_template(mut self, template: impl Into<String>) -> Self {
        self.properties.response_mapping_template = template.into();
        self
    }

    /// Get the request template.
    pub fn request_template(&self) -> &str {
        &self.properties.request_mapping_template
    }

    /// Prepend a code block to the request template, separated by a blank line.
    pub fn prepend_request(&mut self, block: &str) {
        let existing = std::mem::take(&mut self.properties.request_mapping_template);
        self.properties.request_mapping_template = [block, existing.as_str()].join("\n\n");
    }
}
