//! Deterministic resource identifiers for generated resolvers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The generated mutations whose request templates can be augmented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperationKind {
    Create,
    Update,
}

impl OperationKind {
    /// Every operation kind, in the order artifacts are visited.
    pub const ALL: [OperationKind; 2] = [OperationKind::Create, OperationKind::Update];

    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::Create => "Create",
            OperationKind::Update => "Update",
        }
    }

    /// Mutation field name as generated for an entity (`createPost`).
    pub fn mutation_field(&self, type_name: &str) -> String {
        format!("{}{}", self.name().to_lowercase(), type_name)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key of a generated resolver artifact: `(entity name, operation kind)`.
///
/// The rendered identifier is stable across recompilations of the same
/// schema, so re-running the compiler always targets the same artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceKey {
    pub type_name: String,
    pub kind: OperationKind,
}

impl ResourceKey {
    pub fn new(type_name: impl Into<String>, kind: OperationKind) -> Self {
        Self {
            type_name: type_name.into(),
            kind,
        }
    }

    pub fn create(type_name: impl Into<String>) -> Self {
        Self::new(type_name, OperationKind::Create)
    }

    pub fn update(type_name: impl Into<String>) -> Self {
        Self::new(type_name, OperationKind::Update)
    }

    /// Resource identifier, e.g. `CreatePostResolver`.
    pub fn resource_id(&self) -> String {
        format!("{}{}Resolver", self.kind.name(), self.type_name)
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_id())
    }
}
