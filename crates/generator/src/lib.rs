//! Source generation for Terraform resource schemas
//!
//! This crate renders a converted [`SchemaScope`] into Go source files for
//! the Terraform plugin SDK v2, one file per schema. Each file declares a
//! function returning the schema's `map[string]*schema.Schema`.

mod format;
mod templates;

pub use format::{format_go_source, GOFMT};

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;
use tf_schema_gen_common::{GeneratorError, Property, Result, Schema, SchemaScope};

/// Package clause used when none is configured
pub const DEFAULT_PACKAGE: &str = "provider";

/// Tab stops of the fields inside a property's `&schema.Schema{}` literal
const FIELD_INDENT: usize = 3;

/// Suffix of every generated file; keeps Go from treating a name such as
/// `pet_test` or `server_linux` as a test or build-constrained file
const FILE_SUFFIX: &str = "schema.go";

/// Go keywords, which cannot name a package
const GO_KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Rendering options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Go package the generated files belong to
    pub package_name: String,

    /// Run generated files through `gofmt` before writing them
    pub format_sources: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE.to_string(),
            format_sources: true,
        }
    }
}

/// One property as the template lays it out
#[derive(Debug, Serialize)]
struct PropertyEntry<'a> {
    key: &'a str,
    property: &'a Property,
    /// Column the field values are aligned to
    width: usize,
    validation: Option<String>,
    validation_multiline: bool,
}

impl<'a> PropertyEntry<'a> {
    fn new(key: &'a str, property: &'a Property) -> Self {
        let validation = property.validation();
        let validation_multiline = validation.is_some_and(|rule| rule.is_multiline());

        // gofmt aligns consecutive single-line fields only
        let labels = [
            Some("Type:"),
            property.is_required().then_some("Required:"),
            property.is_optional().then_some("Optional:"),
            property.is_computed().then_some("Computed:"),
            property.description().map(|_| "Description:"),
            validation
                .filter(|_| !validation_multiline)
                .map(|_| "ValidateDiagFunc:"),
        ];
        let width = labels.iter().flatten().map(|l| l.len()).max().unwrap_or(0);

        Self {
            key,
            property,
            width,
            validation: validation.map(|rule| rule.to_go_source(FIELD_INDENT)),
            validation_multiline,
        }
    }
}

/// Schema source generator
pub struct SchemaGenerator {
    scope: SchemaScope,
    config: GeneratorConfig,
    tera: Tera,
}

impl SchemaGenerator {
    /// Create a new generator for a converted scope
    pub fn new(scope: SchemaScope, config: GeneratorConfig) -> Result<Self> {
        if !is_go_package_name(&config.package_name) {
            return Err(GeneratorError::Generation(format!(
                "Invalid Go package name '{}'",
                config.package_name
            )));
        }

        let tera = templates::load_templates()?;
        Ok(Self {
            scope,
            config,
            tera,
        })
    }

    pub fn scope(&self) -> &SchemaScope {
        &self.scope
    }

    /// Generate one Go file per schema into `output_dir`
    ///
    /// Returns the paths written, in schema order.
    pub fn generate_to_directory(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(output_dir)?;

        let mut written = Vec::with_capacity(self.scope.schemas().len());

        for schema in self.scope.schemas() {
            let rendered = self.render_schema(schema)?;
            let source = if self.config.format_sources {
                format_go_source(GOFMT, &rendered)?
            } else {
                rendered
            };

            let output_path = output_dir.join(Self::file_name(schema));
            fs::write(&output_path, source)?;

            tracing::info!(
                schema = schema.name(),
                path = %output_path.display(),
                "generated schema"
            );
            written.push(output_path);
        }

        Ok(written)
    }

    /// Render the Go source for a single schema
    pub fn render_schema(&self, schema: &Schema) -> Result<String> {
        let properties: Vec<PropertyEntry> = schema
            .properties()
            .iter()
            .map(|(key, property)| PropertyEntry::new(key, property))
            .collect();

        let mut context = tera::Context::new();
        context.insert("package_name", &self.config.package_name);
        context.insert("schema", schema);
        context.insert("properties", &properties);
        context.insert("function_name", &Self::function_name(schema));
        context.insert("uses_errors_package", &schema.uses_errors_package());

        let mut rendered = self
            .tera
            .render(templates::SCHEMA_TEMPLATE, &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {:?}", e)))?;

        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        Ok(rendered)
    }

    /// File a schema is written to, e.g. `swagger_petstore_pet_schema.go`
    ///
    /// Empty name parts are skipped so the file never starts with `_`.
    pub fn file_name(schema: &Schema) -> String {
        let parts = [
            schema.scope().name_snake_case.trim_matches('_'),
            schema.identity().name_snake_case.trim_matches('_'),
        ];

        let mut name: Vec<&str> = parts.into_iter().filter(|p| !p.is_empty()).collect();
        name.push(FILE_SUFFIX);
        name.join("_")
    }

    /// Go function returning the schema map, e.g. `SwaggerPetstorePetSchema`
    pub fn function_name(schema: &Schema) -> String {
        format!(
            "{}{}Schema",
            schema.scope().name_camel_case,
            schema.identity().name_camel_case
        )
    }
}

fn is_go_package_name(name: &str) -> bool {
    let mut chars = name.chars();
    let identifier = match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    };
    identifier && !GO_KEYWORDS.contains(&name)
}

/// Generate schema sources (convenience function)
pub fn generate_schemas(scope: SchemaScope, output_path: &str) -> Result<Vec<PathBuf>> {
    let generator = SchemaGenerator::new(scope, GeneratorConfig::default())?;
    generator.generate_to_directory(Path::new(output_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_schema_gen_common::{Identity, TfType, ValidationCheck, ValidationRule};

    fn string_property() -> Property {
        let mut name = Property::new();
        name.set_type(TfType::String);
        name.set_required(true);
        name
    }

    fn scope_with_pet() -> SchemaScope {
        let mut scope = SchemaScope::new("Swagger Petstore");
        let mut pet = Schema::new("Pet", scope.identity());
        pet.add_property("name".to_string(), string_property());
        scope.add_schema(pet);
        scope
    }

    fn unformatted() -> GeneratorConfig {
        GeneratorConfig {
            format_sources: false,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_names() {
        let scope = scope_with_pet();
        let pet = &scope.schemas()[0];

        assert_eq!(SchemaGenerator::file_name(pet), "swagger_petstore_pet_schema.go");
        assert_eq!(SchemaGenerator::function_name(pet), "SwaggerPetstorePetSchema");
    }

    #[test]
    fn test_file_names_are_build_neutral() {
        let untitled = Identity::new("");
        let cases = [
            (&untitled, "PetTest", "pet_test_schema.go"),
            (&untitled, "ServerLinux", "server_linux_schema.go"),
            (&untitled, "HostAmd64", "host_amd64_schema.go"),
            (&Identity::new("!!!"), "Pet", "pet_schema.go"),
            (&Identity::new("Cloud"), "PetTest", "cloud_pet_test_schema.go"),
        ];

        for (scope, name, want) in cases {
            let schema = Schema::new(name, scope);
            let file = SchemaGenerator::file_name(&schema);
            assert_eq!(file, want, "schema {}", name);
            assert!(!file.starts_with('_'));
            assert!(!file.ends_with("_test.go"));
        }
    }

    #[test]
    fn test_rejects_invalid_package_name() {
        for package in ["my-provider", "9lives", "", "type", "func", "package"] {
            let config = GeneratorConfig {
                package_name: package.to_string(),
                ..GeneratorConfig::default()
            };
            assert!(
                matches!(
                    SchemaGenerator::new(scope_with_pet(), config),
                    Err(GeneratorError::Generation(_))
                ),
                "package {:?} accepted",
                package
            );
        }

        let config = GeneratorConfig {
            package_name: "types".to_string(),
            ..GeneratorConfig::default()
        };
        assert!(SchemaGenerator::new(scope_with_pet(), config).is_ok());
    }

    #[test]
    fn test_render_without_validation_imports() {
        let scope = SchemaScope::new("Api");
        let mut schema = Schema::new("Tag", &Identity::new("Api"));
        let mut label = Property::new();
        label.set_type(TfType::String);
        label.set_computed(true);
        schema.add_property("label".to_string(), label);

        let generator = SchemaGenerator::new(scope, unformatted()).unwrap();
        let rendered = generator.render_schema(&schema).unwrap();

        assert!(rendered.contains("package provider"));
        assert!(rendered.contains("func ApiTagSchema() map[string]*schema.Schema {"));
        assert!(rendered.contains("\t\t\"label\": {"));
        assert!(rendered.contains("\t\t\tType:     schema.TypeString,\n"));
        assert!(rendered.contains("\t\t\tComputed: true,\n"));
        assert!(!rendered.contains("Optional:"));
        assert!(!rendered.contains("helper/validation"));
        assert!(!rendered.contains("\"errors\""));
        assert!(rendered.ends_with("}\n"));
    }

    #[test]
    fn test_render_aligns_fields_like_gofmt() {
        let scope = SchemaScope::new("Api");
        let mut schema = Schema::new("Order", &Identity::new("Api"));

        let mut quantity = Property::new();
        quantity.set_type(TfType::Int);
        quantity.set_required(true);
        quantity.set_description("How many");
        quantity.set_validation(
            ValidationRule::compose(vec![
                ValidationCheck::IntAtLeast(1),
                ValidationCheck::IntAtMost(99),
            ])
            .unwrap(),
        );
        schema.add_property("quantity".to_string(), quantity);

        let mut price = Property::new();
        price.set_type(TfType::Float);
        price.set_optional(true);
        price.set_validation(
            ValidationRule::compose(vec![ValidationCheck::FloatGreaterThan(0.0)]).unwrap(),
        );
        schema.add_property("price".to_string(), price);

        let generator = SchemaGenerator::new(scope, unformatted()).unwrap();
        let rendered = generator.render_schema(&schema).unwrap();

        let quantity_block = [
            "\t\t\"quantity\": {",
            "\t\t\tType:             schema.TypeInt,",
            "\t\t\tRequired:         true,",
            "\t\t\tDescription:      \"How many\",",
            "\t\t\tValidateDiagFunc: validation.ToDiagFunc(validation.All(validation.IntAtLeast(1), validation.IntAtMost(99))),",
            "\t\t},",
        ]
        .join("\n");
        assert!(rendered.contains(&quantity_block), "{}", rendered);

        // a multi-line value ends the aligned run
        assert!(rendered.contains("\t\t\tType:     schema.TypeFloat,\n\t\t\tOptional: true,\n"));
        assert!(rendered.contains(
            "\t\t\tValidateDiagFunc: validation.ToDiagFunc(func(i interface{}, p string) (s []string, es []error) {\n\t\t\t\tv, ok := i.(float64)\n"
        ));
        assert!(rendered.contains("\t\t\t\t\treturn\n\t\t\t\t}\n\n\t\t\t\treturn\n\t\t\t}),\n\t\t},"));
        assert!(rendered.contains("import (\n\t\"errors\"\n\n\t\"github.com/hashicorp/terraform-plugin-sdk/v2/helper/schema\"\n"));

        // gofmt leaves the rendered text as is; without gofmt on PATH this
        // compares the text with itself
        assert_eq!(format_go_source(GOFMT, &rendered).unwrap(), rendered);
    }
}
