//! Per-field `@transform` processing.
//!
//! Validates one directive usage, rewrites its expression, renders the
//! result, and prepends it to the create and update resolvers of the
//! entity. Each call prepends to the current template, so when several
//! fields of one entity carry the directive the resolver ends up with
//! their blocks in reverse processing order: the field processed last
//! runs first.

use crate::rewrite::{Balance, FieldRef, Rewriter};
use crate::{TransformArgs, TransformConfig, TransformError, TransformResult};
use fieldform_core::{ArtifactStore, OperationKind, ResourceKey};
use fieldform_parser::{Directive, FieldDefinition, TypeDefinition};
use fieldform_template::{Render, VtlPrinter};
use tracing::{debug, instrument, trace, warn};

/// What one `process` call did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    /// Rendered block that was prepended.
    pub block: String,
    /// Artifacts that received the block, in visiting order.
    pub updated: Vec<ResourceKey>,
    /// Artifacts that were absent and left alone.
    pub skipped: Vec<ResourceKey>,
}

/// Compiles `@transform` usages into resolver request templates.
#[derive(Debug, Clone)]
pub struct TransformProcessor<R = VtlPrinter> {
    config: TransformConfig,
    renderer: R,
}

impl TransformProcessor {
    /// Create a processor with the default config and the VTL printer.
    pub fn new() -> Self {
        Self::with_config(TransformConfig::default())
    }

    /// Create a processor whose VTL printer follows `config.indent`.
    pub fn with_config(config: TransformConfig) -> Self {
        let renderer = VtlPrinter::with_indent(config.indent);
        Self { config, renderer }
    }
}

impl Default for TransformProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Render> TransformProcessor<R> {
    /// Create a processor with a custom renderer.
    pub fn with_renderer(config: TransformConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Check that `directive` may be applied to `parent.field` and read its arguments.
    pub fn validate(
        &self,
        parent: &TypeDefinition,
        field: &FieldDefinition,
        directive: &Directive,
    ) -> TransformResult<TransformArgs> {
        let name = self.config.directive_name.as_str();

        if parent.is_interface() {
            return Err(TransformError::interface_field(name, &parent.name, &field.name));
        }

        if !parent.has_directive(&self.config.model_directive) {
            return Err(TransformError::missing_model(
                name,
                &self.config.model_directive,
                &parent.name,
            ));
        }

        let args = TransformArgs::from_directive(directive, &parent.name, &field.name)?;

        if args.foreach && !field.ty.is_list() {
            return Err(TransformError::foreach_requires_list(
                name,
                &parent.name,
                &field.name,
                &field.ty,
            ));
        }

        Ok(args)
    }

    /// Render the block for already validated arguments.
    pub fn render(&self, type_name: &str, field_name: &str, args: &TransformArgs) -> String {
        let field = FieldRef::new(type_name, field_name, &self.config);
        let rewrite = Rewriter::new(&self.config).rewrite(&field, args);

        if let Balance::Unbalanced { offset } = rewrite.balance {
            warn!(
                type_name,
                field_name,
                expression = %args.expression,
                offset,
                "unbalanced brackets in transform expression; emitting it unchanged"
            );
        }

        self.renderer
            .render_block(&args.header(field_name), &rewrite.expr)
    }

    /// Process one `@transform` usage on `parent.field`.
    ///
    /// Validation errors are returned before the store is touched.
    #[instrument(skip_all, fields(type_name = %parent.name, field = %field.name))]
    pub fn process(
        &self,
        parent: &TypeDefinition,
        field: &FieldDefinition,
        directive: &Directive,
        store: &mut dyn ArtifactStore,
    ) -> TransformResult<Splice> {
        let args = self.validate(parent, field, directive)?;
        let block = self.render(&parent.name, &field.name, &args);
        Ok(splice(&parent.name, block, store))
    }
}

/// Prepend `block` to the create and update resolvers of `type_name`.
pub(crate) fn splice(type_name: &str, block: String, store: &mut dyn ArtifactStore) -> Splice {
    let mut updated = Vec::new();
    let mut skipped = Vec::new();

    for kind in OperationKind::ALL {
        let key = ResourceKey::new(type_name, kind);
        match store.get(&key) {
            Some(mut resolver) => {
                resolver.prepend_request(&block);
                store.set(&key, resolver);
                debug!(resource = %key, "prepended transform block");
                updated.push(key);
            }
            None => {
                trace!(resource = %key, "resolver not generated; skipping");
                skipped.push(key);
            }
        }
    }

    Splice {
        block,
        updated,
        skipped,
    }
}
