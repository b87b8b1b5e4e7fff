//! Converts OpenAPI schemas into the Terraform schema model
//!
//! Property conversion fails on the first violated rule; schema conversion
//! aborts on the first failing property but reports every structural
//! violation it finds afterwards; scope conversion aborts on the first
//! failing schema. No partial schema or scope is ever returned.

use crate::document::SchemaDocument;
use crate::openapi::Schema as OpenApiSchema;
use crate::type_mapper::TypeMapper;
use crate::validation_builder::build_validation_rule;
use std::borrow::Cow;
use tf_schema_gen_common::{
    to_snake_case, GeneratorError, Identity, Property, Result, Schema, SchemaScope,
};

/// Longest `$ref` chain followed before giving up
const MAX_REF_DEPTH: usize = 32;

/// Convert every schema of a document into a [`SchemaScope`]
pub fn convert_scope(doc: &dyn SchemaDocument) -> Result<SchemaScope> {
    let mut scope = SchemaScope::new(&doc.title());

    for name in doc.schema_names() {
        let source = doc.schema(&name);
        let schema = convert_schema(&name, scope.identity(), source.as_ref(), doc)?;
        scope.add_schema(schema);
    }

    tracing::info!(
        scope = scope.name(),
        schemas = scope.schemas().len(),
        "converted OpenAPI document"
    );

    Ok(scope)
}

/// Convert one named OpenAPI schema into a Terraform [`Schema`]
///
/// Property keys are the snake_case form of the source property names.
pub fn convert_schema(
    name: &str,
    scope: &Identity,
    source: Option<&OpenApiSchema>,
    doc: &dyn SchemaDocument,
) -> Result<Schema> {
    let source = source.ok_or_else(|| GeneratorError::NilInput(format!("schema '{}'", name)))?;

    let mut schema = Schema::new(name, scope);

    for (prop_name, prop_node) in &source.properties {
        let property = resolve_node(prop_node, doc)
            .and_then(|node| convert_property(prop_name, Some(&*node), &source.required))
            .map_err(|e| e.in_property(prop_name).in_schema(name))?;

        tracing::debug!(
            schema = name,
            property = prop_name.as_str(),
            tf_type = ?property.tf_type(),
            "converted property"
        );

        schema.add_property(to_snake_case(prop_name), property);
    }

    let violations = schema.validate();
    if !violations.is_empty() {
        return Err(GeneratorError::InvalidSchema {
            name: name.to_string(),
            violations,
        });
    }

    Ok(schema)
}

/// Convert one OpenAPI property node into a Terraform [`Property`]
///
/// `required` is the parent's list of required property names, matched
/// exactly against the source `name`.
pub fn convert_property(
    name: &str,
    source: Option<&OpenApiSchema>,
    required: &[String],
) -> Result<Property> {
    let source =
        source.ok_or_else(|| GeneratorError::NilInput(format!("property '{}'", name)))?;

    let mut property = Property::new();
    property.set_type(TypeMapper::map_schema(Some(source))?);

    if let Some(rule) = build_validation_rule(Some(source)) {
        property.set_validation(rule);
    }

    if let Some(description) = source.description.as_deref() {
        property.set_description(description);
    }

    if source.is_nullable() || source.allow_empty_value {
        property.set_optional(true);
    }

    if source.read_only {
        property.set_computed(true);
    }

    if required.iter().any(|r| r == name) {
        property.set_required(true);
    }

    if !property.is_required() && !property.is_optional() && !property.is_computed() {
        property.set_optional(true);
    }

    let violations = property.validate();
    if !violations.is_empty() {
        return Err(GeneratorError::InvalidProperty(violations));
    }

    Ok(property)
}

/// Follow `$ref`s until reaching a concrete schema node
fn resolve_node<'a>(
    node: &'a OpenApiSchema,
    doc: &dyn SchemaDocument,
) -> Result<Cow<'a, OpenApiSchema>> {
    let Some(mut reference) = node.ref_path.clone() else {
        return Ok(Cow::Borrowed(node));
    };

    for _ in 0..MAX_REF_DEPTH {
        let target = doc
            .resolve(&reference)
            .ok_or_else(|| GeneratorError::UnresolvedReference(reference.clone()))?;

        match target.ref_path.clone() {
            Some(next) => reference = next,
            None => return Ok(Cow::Owned(target)),
        }
    }

    Err(GeneratorError::UnresolvedReference(reference))
}
