//! tf-schema-gen CLI
//!
//! Command-line interface for generating Terraform resource schemas from
//! OpenAPI 3 documents.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::{Path, PathBuf};
use tf_schema_gen_common::{Property, SchemaScope};
use tf_schema_gen_generator::{GeneratorConfig, SchemaGenerator, DEFAULT_PACKAGE};
use tf_schema_gen_parser::{DocumentFormat, OpenApiParser};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tf-schema-gen")]
#[command(version, about = "Generate Terraform resource schemas from OpenAPI 3 documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an OpenAPI document and display the resulting schemas
    #[command(after_help = "EXAMPLES:\n  \
        # Show schemas converted from a YAML document\n  \
        tf-schema-gen parse --spec petstore.yaml\n\n  \
        # Include every property and its validation rule\n  \
        tf-schema-gen parse --spec petstore.json --verbose")]
    Parse {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        spec: PathBuf,

        /// Document format (detected from the extension if not specified)
        #[arg(short, long)]
        format: Option<SpecFormat>,
    },

    /// Generate Terraform schema sources from an OpenAPI document
    #[command(after_help = "EXAMPLES:\n  \
        # Generate into ./internal/provider with package name \"provider\"\n  \
        tf-schema-gen generate \\\n    \
        --spec petstore.yaml \\\n    \
        --output ./internal/provider\n\n  \
        # Use a custom Go package name\n  \
        tf-schema-gen generate \\\n    \
        --spec petstore.yaml \\\n    \
        --output ./petstore \\\n    \
        --package petstore")]
    Generate {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        spec: PathBuf,

        /// Document format (detected from the extension if not specified)
        #[arg(short, long)]
        format: Option<SpecFormat>,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Go package name for generated files
        #[arg(short, long, default_value = DEFAULT_PACKAGE)]
        package: String,

        /// Write sources as rendered, without running gofmt
        #[arg(long)]
        no_format: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SpecFormat {
    /// OpenAPI document in JSON
    Json,
    /// OpenAPI document in YAML
    Yaml,
}

impl From<SpecFormat> for DocumentFormat {
    fn from(format: SpecFormat) -> Self {
        match format {
            SpecFormat::Json => DocumentFormat::Json,
            SpecFormat::Yaml => DocumentFormat::Yaml,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match cli.command {
        Commands::Parse { spec, format } => {
            parse_command(spec.as_path(), format, cli.verbose)?;
        }
        Commands::Generate {
            spec,
            format,
            output,
            package,
            no_format,
        } => {
            let config = GeneratorConfig {
                package_name: package,
                format_sources: !no_format,
            };
            generate_command(spec.as_path(), format, output.as_path(), config, cli.verbose)?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the level chosen by `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_scope(spec_path: &Path, format: Option<SpecFormat>) -> Result<SchemaScope> {
    let format = format
        .map(DocumentFormat::from)
        .unwrap_or_else(|| DocumentFormat::detect(spec_path));
    tracing::debug!(path = %spec_path.display(), ?format, "loading document");

    let parser = OpenApiParser::from_file_with_format(spec_path, format)
        .context("Failed to load OpenAPI document")?;
    parser
        .parse()
        .context("Failed to convert OpenAPI schemas")
}

fn parse_command(spec_path: &Path, format: Option<SpecFormat>, verbose: bool) -> Result<()> {
    println!("{} Parsing OpenAPI document: {}", "→".cyan(), spec_path.display());

    let scope = load_scope(spec_path, format)?;

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "Schema Scope:".bold());
    println!("  Name: {}", scope.name().yellow());
    println!("  Schemas: {}", scope.schemas().len());

    println!("\n{}", "Schemas:".bold());
    for schema in scope.schemas() {
        println!(
            "  • {} ({} properties{})",
            schema.name().cyan(),
            schema.properties().len(),
            if schema.has_validation_rules() {
                ", validated"
            } else {
                ""
            }
        );

        if verbose {
            for (key, property) in schema.properties() {
                println!(
                    "    {} {} [{}]",
                    key,
                    property
                        .tf_type()
                        .map(|t| t.sdk_name())
                        .unwrap_or("?")
                        .yellow(),
                    access_mode(property)
                );
                if let Some(rule) = property.validation() {
                    let expression = rule.expression();
                    let first_line = expression.lines().next().unwrap_or_default();
                    println!("      validate: {}", first_line.dimmed());
                }
            }
        }
    }

    Ok(())
}

fn generate_command(
    spec_path: &Path,
    format: Option<SpecFormat>,
    output: &Path,
    config: GeneratorConfig,
    verbose: bool,
) -> Result<()> {
    println!(
        "{} Generating schemas from: {}",
        "→".cyan(),
        spec_path.display()
    );

    if verbose {
        println!("  Output: {}", output.display());
        println!("  Package: {}", config.package_name);
        println!("  gofmt: {}", if config.format_sources { "on" } else { "off" });
    }

    println!("{} Converting schemas...", "→".cyan());
    let scope = load_scope(spec_path, format)?;
    println!(
        "{} Converted {} schemas",
        "✓".green(),
        scope.schemas().len()
    );

    println!("{} Rendering Go sources...", "→".cyan());
    let generator = SchemaGenerator::new(scope, config).context("Failed to create generator")?;
    let written = generator
        .generate_to_directory(output)
        .context("Failed to generate schema sources")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("\n{}", "Generated files:".bold());
    for path in &written {
        println!("  📄 {}", path.display());
    }
    println!("\n{}", "Next steps:".bold());
    println!("  1. Review generated files in {}", output.display());
    println!("  2. Reference the schema functions from your resource definitions");

    Ok(())
}

fn access_mode(property: &Property) -> &'static str {
    if property.is_required() {
        "required"
    } else if property.is_computed() {
        "computed"
    } else {
        "optional"
    }
}
