//! Schemas that place or configure the directive incorrectly.

use fieldform_tests::prelude::*;

mod placement {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("placement")
            .schemas("validation.graphql")
            .step("interface_field", |a| {
                a.error(
                    "The @transform directive cannot be placed on an interface's field. See Node.title",
                )
            })
            .step("missing_model", |a| {
                a.error("@transform directive can only be used on types with @model directive. See Post")
            })
            .step("foreach_on_scalar", |a| {
                a.error_matches(r"foreach=true option can only be used on list type fields\. See Post\.title of type String!$")
            })
            .step("duplicate_directive", |a| a.error("can only be used once per field. See Post.title"))
            // A later invalid type fails the whole schema
            .step("late_failure", |a| a.error("See Note"))
    }

    #[test]
    fn test_misplaced_directives_are_rejected() {
        scenario().run().unwrap();
    }
}

mod arguments {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("arguments")
            .schemas("validation.graphql")
            .step("missing_expression", |a| a.error("requires the 'expression' argument"))
            .step("unknown_argument", |a| a.error("no argument named 'each'"))
            .step("flag_not_boolean", |a| {
                a.error("argument 'foreach' must be a Boolean, found String")
            })
            .step("syntax_error", |a| a.error_matches(r"^Parse error: .*line \d+, column \d+"))
    }

    #[test]
    fn test_bad_arguments_are_rejected() {
        scenario().run().unwrap();
    }
}
