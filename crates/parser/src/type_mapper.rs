//! Type mapping from OpenAPI types to Terraform schema types

use crate::openapi::{
    Schema, FORMAT_INT64, TYPE_ARRAY, TYPE_BOOLEAN, TYPE_INTEGER, TYPE_NUMBER, TYPE_OBJECT,
    TYPE_STRING,
};
use tf_schema_gen_common::{GeneratorError, Result, TfType};

/// Maps OpenAPI type/format pairs to [`TfType`]
pub struct TypeMapper;

impl TypeMapper {
    /// Map an OpenAPI type name and format to a Terraform type
    ///
    /// Terraform has no 64-bit integer type, so `integer`/`int64` maps to
    /// `TypeFloat` (a float64). Values beyond 2^53 lose precision.
    ///
    /// # Examples
    /// ```
    /// use tf_schema_gen_parser::TypeMapper;
    /// use tf_schema_gen_common::TfType;
    ///
    /// assert_eq!(TypeMapper::map_type("string", None).unwrap(), TfType::String);
    /// assert_eq!(TypeMapper::map_type("integer", Some("int32")).unwrap(), TfType::Int);
    /// assert_eq!(TypeMapper::map_type("integer", Some("int64")).unwrap(), TfType::Float);
    /// assert!(TypeMapper::map_type("uuid", None).is_err());
    /// ```
    pub fn map_type(schema_type: &str, format: Option<&str>) -> Result<TfType> {
        match schema_type {
            TYPE_STRING => Ok(TfType::String),
            TYPE_BOOLEAN => Ok(TfType::Bool),
            TYPE_INTEGER if Self::is_wide_integer(format) => Ok(TfType::Float),
            TYPE_INTEGER => Ok(TfType::Int),
            TYPE_NUMBER => Ok(TfType::Float),
            TYPE_ARRAY => Ok(TfType::List),
            TYPE_OBJECT => Ok(TfType::Map),
            other => Err(GeneratorError::UnsupportedType(other.to_string())),
        }
    }

    /// Map a schema node, failing on a missing node or missing type
    pub fn map_schema(schema: Option<&Schema>) -> Result<TfType> {
        let schema = schema.ok_or_else(|| GeneratorError::NilInput("schema".to_string()))?;
        Self::map_type(schema.type_name().unwrap_or_default(), schema.format())
    }

    /// Whether an integer with this format is carried as a float downstream
    pub fn is_wide_integer(format: Option<&str>) -> bool {
        format == Some(FORMAT_INT64)
    }
}
