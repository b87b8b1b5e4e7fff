//! Template loading and management

use std::collections::HashMap;
use tera::{Tera, Value};
use tf_schema_gen_common::{GeneratorError, Result};

/// Name under which the schema template is registered
pub const SCHEMA_TEMPLATE: &str = "schema.go";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("go_string", go_string_filter);
    tera.register_filter("align", align_filter);

    tera.add_raw_template(SCHEMA_TEMPLATE, include_str!("../templates/schema.go.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load schema.go template: {}", e))
        })?;

    Ok(tera)
}

/// Filter to quote a value as a Go interpreted string literal
fn go_string_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("go_string filter expects a string"))?;

    // JSON string escapes are a subset of Go's
    let quoted = serde_json::to_string(s)
        .map_err(|e| tera::Error::msg(format!("go_string filter failed: {}", e)))?;

    Ok(Value::String(quoted))
}

/// Filter to left-align a struct field label in a column of `width`
fn align_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("align filter expects a string"))?;
    let width = args
        .get("width")
        .and_then(Value::as_u64)
        .ok_or_else(|| tera::Error::msg("align filter requires a numeric `width`"))?;

    Ok(Value::String(format!("{:<width$}", s, width = width as usize)))
}
