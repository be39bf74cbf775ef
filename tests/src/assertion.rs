//! Assertion types and builders for verifying step results.

use fieldform_compiler::TransformReport;
use fieldform_core::{ResourceKey, ResourceMap};

use crate::error::{ScenarioError, ScenarioResult};

/// Matches the opening marker of every rendered transform block.
const BLOCK_START: &str = r#"## \[Start\] Transformation for "([^"]+)""#;

/// What a successful step leaves behind.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub report: TransformReport,
    pub store: ResourceMap,
}

/// A check on one resolver's request template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestCheck {
    Equals(String),
    StartsWith(String),
    Contains(String),
    Matches(String),
    /// Field names of the transform blocks, in template order.
    BlockOrder(Vec<String>),
    Absent,
}

/// A complete assertion for a step result.
#[derive(Default)]
pub struct Assertion {
    // Report assertions
    pub seeded: Option<usize>,
    pub transforms: Option<usize>,
    pub resources: Option<usize>,

    // Resolver assertions
    pub requests: Vec<(ResourceKey, RequestCheck)>,

    // Error assertions
    pub error: Option<String>,
    pub error_pattern: Option<String>,

    // Custom assertion function
    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&Outcome) -> bool + Send + Sync>>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("seeded", &self.seeded)
            .field("transforms", &self.transforms)
            .field("resources", &self.resources)
            .field("requests", &self.requests)
            .field("error", &self.error)
            .field("error_pattern", &self.error_pattern)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Assertion {
    /// Create a new empty assertion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the assertion against a result.
    pub fn verify(&self, step: &str, result: &Result<Outcome, String>) -> ScenarioResult<()> {
        if let Some(ref expected_error) = self.error {
            return match result {
                Err(msg) if msg.contains(expected_error) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', got: {}", expected_error, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "expected error containing '{}', but step succeeded",
                        expected_error
                    ),
                )),
            };
        }

        if let Some(ref pattern) = self.error_pattern {
            let re = compile(step, pattern)?;
            return match result {
                Err(msg) if re.is_match(msg) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', got: {}", pattern, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', but step succeeded", pattern),
                )),
            };
        }

        let outcome = result
            .as_ref()
            .map_err(|msg| ScenarioError::assertion_failed(step, format!("step failed: {}", msg)))?;

        if let Some(ref custom) = self.custom {
            if !custom(outcome) {
                return Err(ScenarioError::assertion_failed(step, "custom assertion failed"));
            }
        }

        self.verify_report(step, outcome)?;

        for (key, check) in &self.requests {
            verify_request(step, &outcome.store, key, check)?;
        }

        Ok(())
    }

    fn verify_report(&self, step: &str, outcome: &Outcome) -> ScenarioResult<()> {
        let counts = [
            ("seeded", self.seeded, outcome.report.seeded.len()),
            ("transforms", self.transforms, outcome.report.splices.len()),
            ("resources", self.resources, outcome.store.len()),
        ];

        for (what, expected, actual) in counts {
            if let Some(expected) = expected {
                if expected != actual {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected {} {}, got {}", expected, what, actual),
                    ));
                }
            }
        }

        Ok(())
    }
}

fn verify_request(
    step: &str,
    store: &ResourceMap,
    key: &ResourceKey,
    check: &RequestCheck,
) -> ScenarioResult<()> {
    let resolver = store.resolver(key);

    if let RequestCheck::Absent = check {
        return match resolver {
            None => Ok(()),
            Some(_) => Err(ScenarioError::assertion_failed(
                step,
                format!("expected no resolver {}, but it exists", key),
            )),
        };
    }

    let request = resolver
        .map(|r| r.request_template())
        .ok_or_else(|| ScenarioError::assertion_failed(step, format!("resolver {} not found", key)))?;

    let ok = match check {
        RequestCheck::Equals(text) => request == text,
        RequestCheck::StartsWith(text) => request.starts_with(text.as_str()),
        RequestCheck::Contains(text) => request.contains(text.as_str()),
        RequestCheck::Matches(pattern) => compile(step, pattern)?.is_match(request),
        RequestCheck::BlockOrder(fields) => block_fields(request) == *fields,
        RequestCheck::Absent => true,
    };

    if ok {
        Ok(())
    } else {
        Err(ScenarioError::assertion_failed(
            step,
            format!(
                "request template of {} failed {:?}\n--- actual ---\n{}",
                key, check, request
            ),
        ))
    }
}

/// Field names of the transform blocks in `request`, in order.
pub fn block_fields(request: &str) -> Vec<String> {
    // BLOCK_START is a fixed, valid pattern.
    let Ok(re) = regex_lite::Regex::new(BLOCK_START) else {
        return Vec::new();
    };
    re.captures_iter(request)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn compile(step: &str, pattern: &str) -> ScenarioResult<regex_lite::Regex> {
    regex_lite::Regex::new(pattern).map_err(|e| {
        ScenarioError::assertion_failed(step, format!("invalid regex pattern: {}", e))
    })
}

/// Builder for constructing assertions fluently.
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    pub fn new() -> Self {
        Self {
            assertion: Assertion::new(),
        }
    }

    /// Build the final assertion.
    pub fn build(self) -> Assertion {
        self.assertion
    }

    // ========== Report assertions ==========

    /// Assert that model seeding created N resolvers.
    pub fn seeded(mut self, n: usize) -> Self {
        self.assertion.seeded = Some(n);
        self
    }

    /// Assert that N `@transform` usages were processed.
    pub fn transforms(mut self, n: usize) -> Self {
        self.assertion.transforms = Some(n);
        self
    }

    /// Assert that the store holds N resolvers afterwards.
    pub fn resources(mut self, n: usize) -> Self {
        self.assertion.resources = Some(n);
        self
    }

    // ========== Resolver assertions ==========

    /// Assert the full request template of a resolver.
    pub fn request_equals(mut self, key: ResourceKey, text: impl Into<String>) -> Self {
        self.assertion
            .requests
            .push((key, RequestCheck::Equals(text.into())));
        self
    }

    pub fn request_starts_with(mut self, key: ResourceKey, text: impl Into<String>) -> Self {
        self.assertion
            .requests
            .push((key, RequestCheck::StartsWith(text.into())));
        self
    }

    pub fn request_contains(mut self, key: ResourceKey, text: impl Into<String>) -> Self {
        self.assertion
            .requests
            .push((key, RequestCheck::Contains(text.into())));
        self
    }

    /// Assert that a request template matches the given regex.
    pub fn request_matches(mut self, key: ResourceKey, pattern: impl Into<String>) -> Self {
        self.assertion
            .requests
            .push((key, RequestCheck::Matches(pattern.into())));
        self
    }

    /// Assert which fields have blocks in a request template, top to bottom.
    pub fn block_order(mut self, key: ResourceKey, fields: &[&str]) -> Self {
        let fields = fields.iter().map(|f| f.to_string()).collect();
        self.assertion
            .requests
            .push((key, RequestCheck::BlockOrder(fields)));
        self
    }

    /// Assert that a resolver does not exist.
    pub fn absent(mut self, key: ResourceKey) -> Self {
        self.assertion.requests.push((key, RequestCheck::Absent));
        self
    }

    // ========== Error assertions ==========

    /// Assert that the step fails with an error containing the given string.
    pub fn error(mut self, contains: impl Into<String>) -> Self {
        self.assertion.error = Some(contains.into());
        self
    }

    /// Assert that the step fails with an error matching the given regex.
    pub fn error_matches(mut self, pattern: impl Into<String>) -> Self {
        self.assertion.error_pattern = Some(pattern.into());
        self
    }

    // ========== Advanced ==========

    /// Custom assertion function.
    pub fn assert_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Outcome) -> bool + Send + Sync + 'static,
    {
        self.assertion.custom = Some(Box::new(f));
        self
    }
}

impl Default for AssertionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldform_core::{ArtifactStore, Resolver};

    fn outcome(request: &str) -> Result<Outcome, String> {
        let mut store = ResourceMap::new();
        store.set(
            &ResourceKey::create("Post"),
            Resolver::new("Mutation", "createPost", request),
        );
        Ok(Outcome {
            report: TransformReport::default(),
            store,
        })
    }

    #[test]
    fn test_block_fields_in_order() {
        let request = "## [Start] Transformation for \"b\" (x). **\n## [End] ...\n\n\
                       ## [Start] Transformation for \"a\" (y). **";
        assert_eq!(block_fields(request), vec!["b", "a"]);
    }

    #[test]
    fn test_request_contains_failure_names_resolver() {
        let assertion = AssertionBuilder::new()
            .request_contains(ResourceKey::create("Post"), "missing")
            .build();

        let err = assertion.verify("s", &outcome("base")).unwrap_err();

        assert!(err.to_string().contains("CreatePostResolver"));
    }

    #[test]
    fn test_expected_error_on_success_fails() {
        let assertion = AssertionBuilder::new().error("boom").build();
        assert!(assertion.verify("s", &outcome("base")).is_err());
    }

    #[test]
    fn test_absent_resolver() {
        let assertion = AssertionBuilder::new()
            .absent(ResourceKey::update("Post"))
            .resources(1)
            .build();
        assert!(assertion.verify("s", &outcome("base")).is_ok());
    }
}
