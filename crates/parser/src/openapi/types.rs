//! OpenAPI 3 type definitions
//!
//! Simplified representation focusing on component schemas

use crate::document::SchemaDocument;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// OpenAPI primitive type names
pub const TYPE_STRING: &str = "string";
pub const TYPE_BOOLEAN: &str = "boolean";
pub const TYPE_INTEGER: &str = "integer";
pub const TYPE_NUMBER: &str = "number";
pub const TYPE_ARRAY: &str = "array";
pub const TYPE_OBJECT: &str = "object";

/// Type name OpenAPI 3.1 uses inside a type list to mark nullability
pub const TYPE_NULL: &str = "null";

/// Known formats
pub const FORMAT_INT64: &str = "int64";
pub const FORMAT_DATE: &str = "date";
pub const FORMAT_DATE_TIME: &str = "date-time";

const COMPONENT_SCHEMA_PREFIX: &str = "#/components/schemas/";

/// OpenAPI document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// OpenAPI version (e.g., "3.0.3")
    pub openapi: String,

    /// API metadata
    pub info: Info,

    /// Reusable components
    #[serde(default)]
    pub components: Option<Components>,
}

/// API information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,

    /// API version
    pub version: String,

    /// API description
    #[serde(default)]
    pub description: Option<String>,
}

/// Reusable components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    /// Schemas, ordered by name
    #[serde(default)]
    pub schemas: BTreeMap<String, Schema>,
}

/// `type` is a single name in 3.0 and may be a list in 3.1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

/// `exclusiveMinimum`/`exclusiveMaximum`: a flag in 3.0, the bound itself in 3.1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExclusiveBound {
    Flag(bool),
    Value(f64),
}

/// A numeric bound resolved from the 3.0 or 3.1 encoding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub value: f64,
    pub exclusive: bool,
}

/// Schema definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Type: string, number, integer, boolean, array, object
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Format (e.g., int32, int64, date-time)
    pub format: Option<String>,

    pub description: Option<String>,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub allow_empty_value: bool,

    #[serde(default)]
    pub read_only: bool,

    pub minimum: Option<f64>,

    pub maximum: Option<f64>,

    pub exclusive_minimum: Option<ExclusiveBound>,

    pub exclusive_maximum: Option<ExclusiveBound>,

    /// Properties (for object type)
    #[serde(default)]
    pub properties: BTreeMap<String, Schema>,

    /// Required property names
    #[serde(default)]
    pub required: Vec<String>,

    /// Reference
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
}

impl Schema {
    /// Create a schema with only a type and optional format set
    pub fn of_type(schema_type: &str, format: Option<&str>) -> Self {
        Self {
            schema_type: Some(SchemaType::Single(schema_type.to_string())),
            format: format.map(str::to_string),
            ..Self::default()
        }
    }

    /// Declared type name, ignoring a 3.1 `"null"` entry
    pub fn type_name(&self) -> Option<&str> {
        match self.schema_type.as_ref()? {
            SchemaType::Single(t) => Some(t.as_str()),
            SchemaType::Multiple(types) => types
                .iter()
                .map(String::as_str)
                .find(|t| *t != TYPE_NULL),
        }
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref().filter(|f| !f.is_empty())
    }

    /// `nullable: true`, or `"null"` listed among the 3.1 types
    pub fn is_nullable(&self) -> bool {
        self.nullable
            || matches!(
                &self.schema_type,
                Some(SchemaType::Multiple(types)) if types.iter().any(|t| t == TYPE_NULL)
            )
    }

    /// Lower bound; of `minimum` and a 3.1 `exclusiveMinimum` the stricter wins
    pub fn min_bound(&self) -> Option<Bound> {
        resolve_bound(self.minimum, self.exclusive_minimum, |exclusive, inclusive| {
            exclusive >= inclusive
        })
    }

    /// Upper bound; of `maximum` and a 3.1 `exclusiveMaximum` the stricter wins
    pub fn max_bound(&self) -> Option<Bound> {
        resolve_bound(self.maximum, self.exclusive_maximum, |exclusive, inclusive| {
            exclusive <= inclusive
        })
    }
}

/// `exclusive_wins(exclusive, inclusive)` tells whether the exclusive value
/// is at least as strict as the inclusive one
fn resolve_bound(
    inclusive: Option<f64>,
    exclusive: Option<ExclusiveBound>,
    exclusive_wins: fn(f64, f64) -> bool,
) -> Option<Bound> {
    match (inclusive, exclusive) {
        (Some(value), Some(ExclusiveBound::Value(bound))) if !exclusive_wins(bound, value) => {
            Some(Bound {
                value,
                exclusive: false,
            })
        }
        (_, Some(ExclusiveBound::Value(value))) => Some(Bound {
            value,
            exclusive: true,
        }),
        (Some(value), Some(ExclusiveBound::Flag(exclusive))) => Some(Bound { value, exclusive }),
        (Some(value), None) => Some(Bound {
            value,
            exclusive: false,
        }),
        (None, _) => None,
    }
}

impl OpenApiSpec {
    /// Get a schema by reference path
    /// e.g., "#/components/schemas/Pet" -> returns Pet schema
    pub fn resolve_schema_ref(&self, ref_path: &str) -> Option<&Schema> {
        let schema_name = ref_path.strip_prefix(COMPONENT_SCHEMA_PREFIX)?;
        self.components
            .as_ref()
            .and_then(|c| c.schemas.get(schema_name))
    }
}

impl SchemaDocument for OpenApiSpec {
    fn title(&self) -> String {
        self.info.title.clone()
    }

    fn schema_names(&self) -> Vec<String> {
        self.components
            .as_ref()
            .map(|c| c.schemas.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn schema(&self, name: &str) -> Option<Schema> {
        self.components
            .as_ref()
            .and_then(|c| c.schemas.get(name))
            .cloned()
    }

    fn resolve(&self, reference: &str) -> Option<Schema> {
        self.resolve_schema_ref(reference).cloned()
    }
}
