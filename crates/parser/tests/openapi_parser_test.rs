//! Integration test for OpenAPI document conversion

use std::io::Write;
use tf_schema_gen_common::{GeneratorError, TfType};
use tf_schema_gen_parser::{parse_openapi_file, OpenApiParser};

const PETSTORE_YAML: &str = r##"
openapi: 3.0.3
info:
  title: Swagger Petstore
  version: 1.0.0
paths: {}
components:
  schemas:
    Pet:
      type: object
      required:
        - name
        - petId
      properties:
        petId:
          type: integer
          format: int64
          minimum: 0
          exclusiveMinimum: true
        name:
          type: string
          description: Name of the pet
        birthDate:
          type: string
          format: date
        weight:
          type: number
          format: double
          minimum: 0
          exclusiveMinimum: true
          maximum: 500
        age:
          type: integer
          minimum: 1
          exclusiveMinimum: true
          maximum: 5
          exclusiveMaximum: true
        etag:
          type: string
          readOnly: true
        nickname:
          type: string
          nullable: true
        tags:
          type: array
          items:
            type: string
        owner:
          $ref: '#/components/schemas/Owner'
    Owner:
      type: object
      properties:
        email:
          type: string
          format: email
"##;

#[test]
fn test_parse_petstore_yaml() {
    let parser = OpenApiParser::from_yaml(PETSTORE_YAML).unwrap();
    let scope = parser.parse().unwrap();

    assert_eq!(scope.name(), "Swagger Petstore");
    assert_eq!(scope.identity().name_snake_case, "swagger_petstore");

    // Ordered by schema name
    let names: Vec<&str> = scope.schemas().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Owner", "Pet"]);

    let owner = scope.schema("Owner").unwrap();
    assert!(!owner.has_validation_rules());
    assert_eq!(owner.property("email").unwrap().tf_type(), Some(TfType::String));

    let pet = scope.schema("Pet").unwrap();
    assert!(pet.has_validation_rules());
    assert_eq!(pet.properties().len(), 9);

    let pet_id = pet.property("pet_id").unwrap();
    assert_eq!(pet_id.tf_type(), Some(TfType::Float));
    assert!(pet_id.is_required());
    assert_eq!(
        pet_id.validation().unwrap().expression(),
        "validation.FloatAtLeast(1.000000)"
    );

    let name = pet.property("name").unwrap();
    assert!(name.is_required());
    assert_eq!(name.description(), Some("Name of the pet"));
    assert!(name.validation().is_none());

    assert_eq!(
        pet.property("birth_date").unwrap().validation().unwrap().expression(),
        "validation.IsRFC3339Time"
    );

    let weight = pet.property("weight").unwrap().validation().unwrap();
    assert_eq!(weight.checks().len(), 2);
    assert!(weight.expression().starts_with("validation.All(func("));
    assert!(weight
        .expression()
        .ends_with(",validation.FloatAtMost(500.000000))"));

    assert_eq!(
        pet.property("age").unwrap().validation().unwrap().expression(),
        "validation.All(validation.IntAtLeast(2),validation.IntAtMost(4))"
    );

    assert!(pet.property("etag").unwrap().is_computed());
    assert!(pet.property("nickname").unwrap().is_optional());
    assert_eq!(pet.property("tags").unwrap().tf_type(), Some(TfType::List));
    assert_eq!(pet.property("owner").unwrap().tf_type(), Some(TfType::Map));
}

#[test]
fn test_parse_openapi_31_json() {
    let openapi_json = r#"{
        "openapi": "3.1.0",
        "info": {"title": "Inventory", "version": "2.0.0"},
        "components": {
            "schemas": {
                "Item": {
                    "type": "object",
                    "properties": {
                        "quantity": {"type": "integer", "exclusiveMinimum": 0},
                        "label": {"type": ["string", "null"]}
                    }
                }
            }
        }
    }"#;

    let scope = OpenApiParser::from_json(openapi_json).unwrap().parse().unwrap();
    let item = scope.schema("Item").unwrap();

    assert_eq!(
        item.property("quantity").unwrap().validation().unwrap().expression(),
        "validation.IntAtLeast(1)"
    );
    let label = item.property("label").unwrap();
    assert_eq!(label.tf_type(), Some(TfType::String));
    assert!(label.is_optional());
}

#[test]
fn test_schema_failure_aborts_scope() {
    let openapi_json = r#"{
        "openapi": "3.0.0",
        "info": {"title": "Broken", "version": "1.0.0"},
        "components": {
            "schemas": {
                "Widget": {
                    "type": "object",
                    "properties": {
                        "id": {"type": "uuid"}
                    }
                }
            }
        }
    }"#;

    let err = OpenApiParser::from_json(openapi_json)
        .unwrap()
        .parse()
        .unwrap_err();

    assert!(matches!(
        err.root_cause(),
        GeneratorError::UnsupportedType(t) if t == "uuid"
    ));
    assert!(err.to_string().contains("'Widget'"));
    assert!(err.to_string().contains("'id'"));
}

#[test]
fn test_parse_openapi_file_detects_yaml() {
    let mut file = tempfile_with_suffix(".yaml");
    file.write_all(PETSTORE_YAML.as_bytes()).unwrap();

    let scope = parse_openapi_file(file.path()).unwrap();
    assert_eq!(scope.schemas().len(), 2);
}

#[test]
fn test_parse_openapi_file_missing() {
    let err = parse_openapi_file("does-not-exist.json").unwrap_err();
    assert!(matches!(err, GeneratorError::Parse(_)));
}

fn tempfile_with_suffix(suffix: &str) -> tempfile::NamedTempFile {
    tempfile::Builder::new().suffix(suffix).tempfile().unwrap()
}
