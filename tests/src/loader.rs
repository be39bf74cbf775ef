//! Loader for schemas files.
//!
//! Parses `.graphql` files with step markers (`--# step_name`). Each step
//! holds a complete schema that is transformed on its own.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{ScenarioError, ScenarioResult};

/// A parsed schemas file.
#[derive(Debug, Clone)]
pub struct Schemas {
    /// Map of step name to schema source.
    pub steps: HashMap<String, String>,
    /// Steps in order of appearance.
    pub step_order: Vec<String>,
}

impl Schemas {
    /// Parse a schemas file from a string.
    pub fn parse(source: &str) -> ScenarioResult<Self> {
        let mut steps = HashMap::new();
        let mut step_order = Vec::new();
        let mut current_step: Option<String> = None;
        let mut current_content = String::new();

        for line in source.lines() {
            let trimmed = line.trim();

            if let Some(suffix) = trimmed.strip_prefix("--#") {
                if let Some(step_name) = current_step.take() {
                    insert_step(&mut steps, step_name, &current_content);
                }

                let step_name = suffix.trim().to_string();
                if step_name.is_empty() {
                    return Err(ScenarioError::schemas_parse(
                        "<inline>",
                        "empty step name after --#",
                    ));
                }
                if step_order.contains(&step_name) {
                    return Err(ScenarioError::schemas_parse(
                        "<inline>",
                        format!("duplicate step name '{}'", step_name),
                    ));
                }
                step_order.push(step_name.clone());
                current_step = Some(step_name);
                current_content.clear();
            } else if current_step.is_some() && !trimmed.starts_with("-- @") {
                current_content.push_str(line);
                current_content.push('\n');
            }
            // Lines before the first step marker are file-level comments
        }

        if let Some(step_name) = current_step {
            insert_step(&mut steps, step_name, &current_content);
        }

        Ok(Self { steps, step_order })
    }

    /// Load and parse a schemas file from disk.
    pub fn load(path: &Path) -> ScenarioResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| ScenarioError::file_read(path, e))?;
        Self::parse(&source).map_err(|e| ScenarioError::schemas_parse(path, e.to_string()))
    }

    /// Get the schema for a step.
    pub fn get_step(&self, name: &str) -> Option<&str> {
        self.steps.get(name).map(|s| s.as_str())
    }
}

fn insert_step(steps: &mut HashMap<String, String>, name: String, content: &str) {
    let content = content.trim();
    if !content.is_empty() {
        steps.insert(name, content.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_schemas() {
        let source = r#"
-- Blog schemas

--# trim_title
type Post @model {
  title: String @transform(expression: ".trim()")
}

--# plain
type Post @model { id: ID! }
"#;

        let schemas = Schemas::parse(source).unwrap();

        assert_eq!(schemas.step_order, vec!["trim_title", "plain"]);
        assert!(schemas.get_step("trim_title").unwrap().contains("@transform"));
        assert_eq!(schemas.get_step("plain").unwrap(), "type Post @model { id: ID! }");
    }

    #[test]
    fn test_metadata_lines_are_stripped() {
        let source = "--# step1\n-- @expect: two resolvers\ntype Post @model { id: ID! }\n";

        let schemas = Schemas::parse(source).unwrap();

        assert!(!schemas.get_step("step1").unwrap().contains("@expect"));
    }

    #[test]
    fn test_empty_step_name_is_rejected() {
        assert!(Schemas::parse("--#\ntype A { id: ID }").is_err());
    }

    #[test]
    fn test_duplicate_step_name_is_rejected() {
        let err = Schemas::parse("--# a\ntype A { id: ID }\n--# a\ntype B { id: ID }").unwrap_err();
        assert!(err.to_string().contains("duplicate step name 'a'"));
    }
}
