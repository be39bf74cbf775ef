//! fieldform Core Types
//!
//! This crate provides the types shared by the schema compiler and its hosts:
//! - Resource keys (OperationKind, ResourceKey) derived from entity names
//! - The generated resolver artifact (Resolver)
//! - The artifact store contract (ArtifactStore) and an in-memory store (ResourceMap)

mod resolver;
mod resource;
mod store;

pub use resolver::*;
pub use resource::*;
pub use store::*;
