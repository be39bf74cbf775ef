//! fieldform Integration Test Framework
//!
//! Provides a fluent API for writing end-to-end tests of the compiler.
//!
//! # Structure
//!
//! - **fixtures/*.graphql** - Schemas, one per step, separated by `--# step_name` markers
//! - **tests/*.rs** - Scenarios: schemas file + optional config and preset resolvers + assertions
//!
//! # Example
//!
//! ```ignore
//! use fieldform_tests::prelude::*;
//!
//! pub fn scenario() -> Scenario {
//!     Scenario::new("blog")
//!         .schemas("blog.graphql")
//!         .step("trim_title", |a| a.seeded(2).transforms(1))
//! }
//!
//! #[test]
//! fn test() {
//!     scenario().run().unwrap();
//! }
//! ```

mod assertion;
mod loader;

pub use assertion::{block_fields, Assertion, AssertionBuilder, Outcome, RequestCheck};
pub use error::{ScenarioError, ScenarioResult};
pub use loader::Schemas;
pub use runner::init_tracing;
pub use scenario::{Scenario, Step};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assertion::{block_fields, AssertionBuilder, Outcome};
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::scenario::Scenario;
    pub use fieldform_core::{ResourceKey, Resolver};
}
