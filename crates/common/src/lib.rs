//! Common types and utilities for tf-schema-gen
//!
//! This crate contains the Terraform schema model produced by the parser,
//! the validation-rule descriptors attached to properties, the shared error
//! type, and the case conversion helpers used for derived names.

mod case;
mod model;
mod validation;

pub use case::{to_camel_case, to_snake_case};
pub use model::{Flag, Identity, Property, Schema, SchemaScope, TfType};
pub use validation::{ValidationCheck, ValidationRule};

use thiserror::Error;

/// Errors that can occur during schema conversion and generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("{0} is nil")]
    NilInput(String),

    #[error("unsupported type '{0}'")]
    UnsupportedType(String),

    #[error("invalid property: {}", .0.join("; "))]
    InvalidProperty(Vec<String>),

    #[error("invalid schema '{name}': {}", .violations.join("; "))]
    InvalidSchema {
        name: String,
        violations: Vec<String>,
    },

    #[error("unresolved reference '{0}'")]
    UnresolvedReference(String),

    #[error("property '{name}': {source}")]
    Property {
        name: String,
        #[source]
        source: Box<GeneratorError>,
    },

    #[error("failed to convert schema '{name}': {source}")]
    Schema {
        name: String,
        #[source]
        source: Box<GeneratorError>,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeneratorError {
    /// Wrap an error with the name of the property being converted
    pub fn in_property(self, name: &str) -> Self {
        GeneratorError::Property {
            name: name.to_string(),
            source: Box::new(self),
        }
    }

    /// Wrap an error with the name of the schema being converted
    pub fn in_schema(self, name: &str) -> Self {
        GeneratorError::Schema {
            name: name.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with property and schema context removed
    pub fn root_cause(&self) -> &GeneratorError {
        match self {
            GeneratorError::Property { source, .. } | GeneratorError::Schema { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_unwraps_context() {
        let err = GeneratorError::UnsupportedType("uuid".to_string())
            .in_property("id")
            .in_schema("Pet");

        assert!(matches!(
            err.root_cause(),
            GeneratorError::UnsupportedType(t) if t == "uuid"
        ));
        assert_eq!(
            err.to_string(),
            "failed to convert schema 'Pet': property 'id': unsupported type 'uuid'"
        );
    }

    #[test]
    fn test_invalid_schema_message_lists_violations() {
        let err = GeneratorError::InvalidSchema {
            name: "".to_string(),
            violations: vec![
                "name is required".to_string(),
                "at least one property is required".to_string(),
            ],
        };

        assert_eq!(
            err.to_string(),
            "invalid schema '': name is required; at least one property is required"
        );
    }
}
