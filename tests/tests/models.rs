//! Model mutation settings and resolvers that exist before the transform.

use fieldform_tests::prelude::*;

mod mutations {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("mutations")
            .schemas("models.graphql")
            .step("create_only", |a| {
                a.seeded(1)
                    .resources(1)
                    .absent(ResourceKey::update("Log"))
                    .block_order(ResourceKey::create("Log"), &["message"])
                    .assert_fn(|outcome| {
                        let splice = &outcome.report.splices[0];
                        splice.updated == vec![ResourceKey::create("Log")]
                            && splice.skipped == vec![ResourceKey::update("Log")]
                    })
            })
            // No resolvers to extend is not an error
            .step("no_mutations", |a| a.seeded(0).transforms(1).resources(0))
            .step("renamed_update", |a| {
                a.assert_fn(|outcome| {
                    outcome
                        .store
                        .resolver(&ResourceKey::update("Post"))
                        .is_some_and(|r| r.properties.field_name == "editPost")
                })
                .block_order(ResourceKey::update("Post"), &["title"])
            })
    }

    #[test]
    fn test_model_mutation_settings() {
        scenario().run().unwrap();
    }
}

mod preset {
    use super::*;

    const CUSTOM: &str = "## custom create request";

    pub fn scenario() -> Scenario {
        Scenario::new("preset")
            .schemas("models.graphql")
            .resolver(
                ResourceKey::create("Post"),
                Resolver::new("Mutation", "createPost", CUSTOM),
            )
            .step("preset_post", |a| {
                a.seeded(1)
                    .request_matches(
                        ResourceKey::create("Post"),
                        r"(?s)^## \[Start\].*## \[End\][^\n]*\n\n## custom create request$",
                    )
                    .request_contains(ResourceKey::update("Post"), "UpdateItem")
            })
    }

    #[test]
    fn test_existing_resolver_is_extended_not_replaced() {
        scenario().run().unwrap();
    }
}
