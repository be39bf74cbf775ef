//! Whole-schema driver.
//!
//! Plays the part of the host pipeline: parses the schema, seeds the
//! create/update resolvers of `@model` types, and dispatches every
//! `@transform` usage to the processor. All usages are validated before
//! the first block is written, so a bad schema leaves the store untouched.

use crate::processor::splice;
use crate::{Splice, TransformArgs, TransformConfig, TransformError, TransformProcessor, TransformResult};
use fieldform_core::{ArtifactStore, OperationKind, ResourceKey, Resolver};
use fieldform_parser::{parse_document, Document, FieldDefinition, TypeDefinition, Value};
use fieldform_template::{Render, VtlPrinter};
use tracing::{debug, info};

const MUTATION_TYPE: &str = "Mutation";

const CREATE_REQUEST_TEMPLATE: &str = r##"{
  "version": "2018-05-29",
  "operation": "PutItem",
  "key": {
    "id": $util.dynamodb.toDynamoDBJson($util.defaultIfNullOrBlank($ctx.args.input.id, $util.autoId()))
  },
  "attributeValues": $util.dynamodb.toMapValuesJson($ctx.args.input),
  "condition": {
    "expression": "attribute_not_exists(#id)",
    "expressionNames": {
      "#id": "id"
    }
  }
}"##;

const UPDATE_REQUEST_TEMPLATE: &str = r##"{
  "version": "2018-05-29",
  "operation": "UpdateItem",
  "key": {
    "id": $util.dynamodb.toDynamoDBJson($ctx.args.input.id)
  },
  "update": $util.toJson($util.dynamodb.toUpdateExpression($ctx.args.input)),
  "condition": {
    "expression": "attribute_exists(#id)",
    "expressionNames": {
      "#id": "id"
    }
  }
}"##;

const RESPONSE_TEMPLATE: &str = "$util.toJson($ctx.result)";

/// Summary of a schema transform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Resolvers created by model seeding.
    pub seeded: Vec<ResourceKey>,
    /// One entry per `@transform` usage, in processing order.
    pub splices: Vec<Splice>,
}

/// Runs the processor over every `@transform` usage of a schema.
#[derive(Debug, Clone)]
pub struct Transformer<R = VtlPrinter> {
    processor: TransformProcessor<R>,
}

impl Transformer {
    pub fn new() -> Self {
        Self::with_config(TransformConfig::default())
    }

    pub fn with_config(config: TransformConfig) -> Self {
        Self {
            processor: TransformProcessor::with_config(config),
        }
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Render> Transformer<R> {
    pub fn with_processor(processor: TransformProcessor<R>) -> Self {
        Self { processor }
    }

    /// Parse `source` and transform it into `store`.
    pub fn transform(&self, source: &str, store: &mut dyn ArtifactStore) -> TransformResult<TransformReport> {
        let document = parse_document(source)?;
        self.transform_document(&document, store)
    }

    /// Transform a parsed document into `store`.
    ///
    /// Types are visited in document order and fields in declaration order.
    pub fn transform_document(
        &self,
        document: &Document,
        store: &mut dyn ArtifactStore,
    ) -> TransformResult<TransformReport> {
        let usages = self.collect_usages(document)?;

        let seeded = seed_model_resolvers(document, self.processor.config(), store);

        let mut splices = Vec::with_capacity(usages.len());
        for usage in &usages {
            let block = self
                .processor
                .render(&usage.parent.name, &usage.field.name, &usage.args);
            splices.push(splice(&usage.parent.name, block, store));
        }

        info!(
            seeded = seeded.len(),
            transforms = splices.len(),
            "schema transform complete"
        );
        Ok(TransformReport { seeded, splices })
    }

    /// Find and validate every usage before anything is written.
    fn collect_usages<'d>(&self, document: &'d Document) -> TransformResult<Vec<Usage<'d>>> {
        let name = self.processor.config().directive_name.as_str();
        let mut usages = Vec::new();

        for parent in document.type_definitions() {
            for field in &parent.fields {
                let mut directives = field.directives_named(name);
                let Some(directive) = directives.next() else {
                    continue;
                };
                if directives.next().is_some() {
                    return Err(TransformError::duplicate_directive(name, &parent.name, &field.name));
                }

                let args = self.processor.validate(parent, field, directive)?;
                debug!(type_name = %parent.name, field = %field.name, "found transform usage");
                usages.push(Usage {
                    parent,
                    field,
                    args,
                });
            }
        }

        Ok(usages)
    }
}

struct Usage<'d> {
    parent: &'d TypeDefinition,
    field: &'d FieldDefinition,
    args: TransformArgs,
}

/// Create the create/update resolvers of every `@model` type.
///
/// Existing artifacts are kept as they are. `@model(mutations: null)`
/// generates no resolvers, and `mutations: { create: null }` or
/// `{ update: null }` drops that one; a string value renames the
/// mutation field.
pub fn seed_model_resolvers(
    document: &Document,
    config: &TransformConfig,
    store: &mut dyn ArtifactStore,
) -> Vec<ResourceKey> {
    let mut seeded = Vec::new();

    for parent in document.type_definitions() {
        if parent.is_interface() {
            continue;
        }
        let Some(model) = parent.directive(&config.model_directive) else {
            continue;
        };

        for kind in OperationKind::ALL {
            let key = ResourceKey::new(&parent.name, kind);
            let Some(field_name) = mutation_field(model.argument("mutations"), &parent.name, kind)
            else {
                debug!(resource = %key, "mutation disabled by model arguments");
                continue;
            };
            if store.contains(&key) {
                continue;
            }

            let request = match kind {
                OperationKind::Create => CREATE_REQUEST_TEMPLATE,
                OperationKind::Update => UPDATE_REQUEST_TEMPLATE,
            };
            store.set(
                &key,
                Resolver::new(MUTATION_TYPE, field_name, request).with_response_template(RESPONSE_TEMPLATE),
            );
            seeded.push(key);
        }
    }

    seeded
}

/// Mutation field name for `kind`, or `None` when the model disables it.
fn mutation_field(mutations: Option<&Value>, type_name: &str, kind: OperationKind) -> Option<String> {
    let key = match kind {
        OperationKind::Create => "create",
        OperationKind::Update => "update",
    };

    match mutations {
        None => Some(kind.mutation_field(type_name)),
        Some(Value::Null) => None,
        Some(obj @ Value::Object(_)) => match obj.field(key) {
            None => Some(kind.mutation_field(type_name)),
            Some(value) => value.as_str().map(str::to_string),
        },
        Some(_) => Some(kind.mutation_field(type_name)),
    }
}
