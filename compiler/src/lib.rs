//! fieldform Compiler
//!
//! Compile `@transform` field directives into resolver request templates.
//!
//! Responsibilities:
//! - Read and default the directive arguments
//! - Validate where the directive is placed (concrete `@model` types, list fields for `foreach`)
//! - Rewrite the user expression against the field value and build a guarded template tree
//! - Render the tree and prepend it to the entity's create and update resolvers
//!
//! # Module Structure
//!
//! - `config` - Compiler configuration (directive names, template paths)
//! - `directive` - `@transform` argument reading and defaults
//! - `rewrite` - Receiver substitution scanner and template tree construction
//! - `processor` - Per-field validation and artifact splicing
//! - `transformer` - Whole-schema driver and model resolver seeding
//! - `error` - Error types for invalid directives

mod config;
mod directive;
mod error;
mod processor;
mod rewrite;
mod transformer;

pub use config::TransformConfig;
pub use directive::{TransformArgs, TRANSFORM_DIRECTIVE_SDL};
pub use error::{TransformError, TransformResult};
pub use processor::{Splice, TransformProcessor};
pub use rewrite::{substitute_receiver, Balance, FieldRef, Rewrite, Rewriter, Substitution};
pub use transformer::{seed_model_resolvers, TransformReport, Transformer};
