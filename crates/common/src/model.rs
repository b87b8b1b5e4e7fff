//! Terraform schema model
//!
//! A [`SchemaScope`] owns the [`Schema`]s converted from one OpenAPI
//! document; each schema owns its [`Property`]s keyed by snake_case name.

use crate::case::{to_camel_case, to_snake_case};
use crate::validation::ValidationRule;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Primitive Terraform schema types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TfType {
    #[serde(rename = "TypeString")]
    String,
    #[serde(rename = "TypeBool")]
    Bool,
    #[serde(rename = "TypeInt")]
    Int,
    #[serde(rename = "TypeFloat")]
    Float,
    #[serde(rename = "TypeList")]
    List,
    #[serde(rename = "TypeMap")]
    Map,
}

impl TfType {
    /// Name of the `schema.ValueType` constant in the plugin SDK
    pub fn sdk_name(&self) -> &'static str {
        match self {
            TfType::String => "TypeString",
            TfType::Bool => "TypeBool",
            TfType::Int => "TypeInt",
            TfType::Float => "TypeFloat",
            TfType::List => "TypeList",
            TfType::Map => "TypeMap",
        }
    }
}

impl fmt::Display for TfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sdk_name())
    }
}

/// Tri-state access flag, distinguishing "never set" from "set to false"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flag {
    #[default]
    Unset,
    False,
    True,
}

impl Flag {
    pub fn is_true(self) -> bool {
        self == Flag::True
    }

    pub fn is_set(self) -> bool {
        self != Flag::Unset
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value {
            Flag::True
        } else {
            Flag::False
        }
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Flag::Unset => serializer.serialize_none(),
            Flag::False => serializer.serialize_bool(false),
            Flag::True => serializer.serialize_bool(true),
        }
    }
}

/// A name together with its derived case forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub name: String,
    pub name_camel_case: String,
    pub name_snake_case: String,
}

impl Identity {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            name_camel_case: to_camel_case(name),
            name_snake_case: to_snake_case(name),
        }
    }
}

/// A single attribute of a Terraform schema
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Property {
    #[serde(rename = "type")]
    tf_type: Option<TfType>,
    description: Option<String>,
    required: Flag,
    optional: Flag,
    computed: Flag,
    validation: Option<ValidationRule>,
}

impl Property {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_type(&mut self, tf_type: TfType) {
        self.tf_type = Some(tf_type);
    }

    /// Empty descriptions are treated as unspecified
    pub fn set_description(&mut self, description: &str) {
        if !description.is_empty() {
            self.description = Some(description.to_string());
        }
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required.into();
    }

    pub fn set_optional(&mut self, optional: bool) {
        self.optional = optional.into();
    }

    pub fn set_computed(&mut self, computed: bool) {
        self.computed = computed.into();
    }

    pub fn set_validation(&mut self, rule: ValidationRule) {
        self.validation = Some(rule);
    }

    pub fn tf_type(&self) -> Option<TfType> {
        self.tf_type
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn validation(&self) -> Option<&ValidationRule> {
        self.validation.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.required.is_true()
    }

    pub fn is_optional(&self) -> bool {
        self.optional.is_true()
    }

    pub fn is_computed(&self) -> bool {
        self.computed.is_true()
    }

    /// Check the type-presence and access-mode invariants.
    ///
    /// Returns every violated rule; an empty list means the property is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errs = Vec::new();

        if self.tf_type.is_none() {
            errs.push("Type is required".to_string());
        }

        let modes = [self.is_required(), self.is_optional(), self.is_computed()];
        match modes.iter().filter(|&&set| set).count() {
            0 => errs.push(
                "At least one of Required, Optional, or Computed must be true".to_string(),
            ),
            1 => {}
            _ => errs.push("Required, Optional, and Computed are mutually exclusive".to_string()),
        }

        errs
    }
}

/// A Terraform resource schema converted from one OpenAPI schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    scope: Identity,
    #[serde(flatten)]
    identity: Identity,
    properties: BTreeMap<String, Property>,
    has_validation_rules: bool,
}

impl Schema {
    pub fn new(name: &str, scope: &Identity) -> Self {
        Self {
            scope: scope.clone(),
            identity: Identity::new(name),
            properties: BTreeMap::new(),
            has_validation_rules: false,
        }
    }

    /// Insert a property under its target (snake_case) key.
    ///
    /// A later property with the same key replaces the earlier one.
    pub fn add_property(&mut self, key: String, property: Property) {
        self.properties.insert(key, property);
        self.has_validation_rules = self
            .properties
            .values()
            .any(|p| p.validation().is_some());
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Identity of the owning scope
    pub fn scope(&self) -> &Identity {
        &self.scope
    }

    pub fn properties(&self) -> &BTreeMap<String, Property> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&Property> {
        self.properties.get(key)
    }

    pub fn has_validation_rules(&self) -> bool {
        self.has_validation_rules
    }

    /// Whether any validation rule renders code using the Go `errors` package
    pub fn uses_errors_package(&self) -> bool {
        self.properties
            .values()
            .filter_map(Property::validation)
            .any(ValidationRule::uses_errors_package)
    }

    /// Check structural invariants, collecting every violation
    pub fn validate(&self) -> Vec<String> {
        let mut errs = Vec::new();

        if self.identity.name.is_empty() {
            errs.push("name is required".to_string());
        }

        if self.properties.is_empty() {
            errs.push("at least one property is required".to_string());
        }

        for (key, property) in &self.properties {
            errs.extend(
                property
                    .validate()
                    .into_iter()
                    .map(|violation| format!("property '{}': {}", key, violation)),
            );
        }

        errs
    }
}

/// All schemas converted from a single OpenAPI document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaScope {
    #[serde(flatten)]
    identity: Identity,
    schemas: Vec<Schema>,
}

impl SchemaScope {
    pub fn new(name: &str) -> Self {
        Self {
            identity: Identity::new(name),
            schemas: Vec::new(),
        }
    }

    pub fn add_schema(&mut self, schema: Schema) {
        self.schemas.push(schema);
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.name() == name)
    }
}
