//! OpenAPI schema conversion for tf-schema-gen
//!
//! This crate loads OpenAPI 3 documents and converts their component
//! schemas into the Terraform schema model (`SchemaScope`).
//!
//! ## Conversion
//!
//! - [`TypeMapper`] maps an OpenAPI type/format pair to a Terraform type
//! - [`build_validation_rule`] derives bound and format checks
//! - [`convert_property`] assembles one property and its access mode
//!   (Required, Optional or Computed)
//! - [`convert_schema`] assembles a schema and validates its structure
//! - [`convert_scope`] converts every schema of a document

mod converter;
mod document;
pub mod openapi;
mod type_mapper;
mod validation_builder;

pub use converter::{convert_property, convert_schema, convert_scope};
pub use document::SchemaDocument;
pub use openapi::{DocumentFormat, OpenApiParser};
pub use type_mapper::TypeMapper;
pub use validation_builder::{build_validation_rule, format_check};

use std::path::Path;
use tf_schema_gen_common::{Result, SchemaScope};

/// Load an OpenAPI document and convert it into a [`SchemaScope`]
///
/// # Arguments
/// * `path` - Path to a JSON or YAML OpenAPI 3 document
pub fn parse_openapi_file<P: AsRef<Path>>(path: P) -> Result<SchemaScope> {
    OpenApiParser::from_file(path)?.parse()
}
