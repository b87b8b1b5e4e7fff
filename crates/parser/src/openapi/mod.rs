//! OpenAPI 3 document loading
//!
//! Reads OpenAPI 3.0 and 3.1 documents (JSON or YAML) and exposes their
//! component schemas for conversion.
//!
//! ## Usage
//! ```rust,ignore
//! use tf_schema_gen_parser::openapi::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("petstore.yaml")?;
//! let scope = parser.parse()?;
//! ```

mod parser;
mod types;

pub use parser::{DocumentFormat, OpenApiParser};
pub use types::*;
