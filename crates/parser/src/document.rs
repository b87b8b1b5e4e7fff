//! Access to the schemas of a loaded API document

use crate::openapi::Schema;

/// A loaded document exposing named schemas
///
/// The assemblers only read through this trait, so any loader producing
/// [`Schema`] nodes can feed the conversion.
#[cfg_attr(test, mockall::automock)]
pub trait SchemaDocument {
    /// Document title, used as the scope name
    fn title(&self) -> String;

    /// Schema names in conversion order
    fn schema_names(&self) -> Vec<String>;

    /// Schema node registered under `name`
    fn schema(&self, name: &str) -> Option<Schema>;

    /// Schema node a `$ref` points at
    fn resolve(&self, reference: &str) -> Option<Schema>;
}
