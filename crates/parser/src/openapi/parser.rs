//! OpenAPI document file parser

use super::types::OpenApiSpec;
use crate::converter::convert_scope;
use std::fs;
use std::path::Path;
use tf_schema_gen_common::{GeneratorError, Result, SchemaScope};

/// Serialization of an OpenAPI document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Guess the format from a file extension, defaulting to JSON
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }
}

/// OpenAPI 3 document parser
pub struct OpenApiParser {
    spec: OpenApiSpec,
}

impl OpenApiParser {
    /// Load an OpenAPI document, detecting the format from the extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let format = DocumentFormat::detect(path.as_ref());
        Self::from_file_with_format(path, format)
    }

    /// Load an OpenAPI document in an explicit format
    pub fn from_file_with_format<P: AsRef<Path>>(path: P, format: DocumentFormat) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to read OpenAPI file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        tracing::debug!(path = %path.as_ref().display(), ?format, "loading OpenAPI document");

        match format {
            DocumentFormat::Json => Self::from_json(&content),
            DocumentFormat::Yaml => Self::from_yaml(&content),
        }
    }

    /// Parse an OpenAPI document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: OpenApiSpec = serde_json::from_str(json)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse OpenAPI JSON: {}", e)))?;
        Self::from_spec(spec)
    }

    /// Parse an OpenAPI document from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let spec: OpenApiSpec = serde_yaml::from_str(yaml)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse OpenAPI YAML: {}", e)))?;
        Self::from_spec(spec)
    }

    /// Wrap an already deserialized document
    pub fn from_spec(spec: OpenApiSpec) -> Result<Self> {
        if !spec.openapi.starts_with("3.") {
            return Err(GeneratorError::Parse(format!(
                "Unsupported OpenAPI version '{}', expected 3.x",
                spec.openapi
            )));
        }

        Ok(Self { spec })
    }

    /// Convert the document's component schemas into a [`SchemaScope`]
    pub fn parse(&self) -> Result<SchemaScope> {
        convert_scope(&self.spec)
    }

    /// Get reference to the underlying OpenAPI document
    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_openapi() {
        let openapi_json = r#"{
            "openapi": "3.0.0",
            "info": {
                "title": "Test API",
                "version": "1.0.0"
            }
        }"#;

        let parser = OpenApiParser::from_json(openapi_json).unwrap();
        assert_eq!(parser.spec().openapi, "3.0.0");
        assert_eq!(parser.spec().info.title, "Test API");

        let scope = parser.parse().unwrap();
        assert_eq!(scope.name(), "Test API");
        assert!(scope.schemas().is_empty());
    }

    #[test]
    fn test_rejects_swagger_2() {
        let swagger = r#"{"openapi": "2.0", "info": {"title": "Old", "version": "1"}}"#;
        let result = OpenApiParser::from_json(swagger);
        assert!(matches!(result, Err(GeneratorError::Parse(_))));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            DocumentFormat::detect(Path::new("api.yaml")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::detect(Path::new("api.YML")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::detect(Path::new("api.json")),
            DocumentFormat::Json
        );
        assert_eq!(DocumentFormat::detect(Path::new("api")), DocumentFormat::Json);
    }
}
