//! Validation rules attached to Terraform properties
//!
//! A [`ValidationRule`] is an ordered, non-empty list of atomic
//! [`ValidationCheck`]s. Each check renders as a Terraform plugin SDKv2
//! `validation` helper (or an inline function for strict float bounds), and
//! the rule composes them with `validation.All` when more than one applies.
//!
//! Float bounds always render with six decimal places; the generated code
//! depends on this exact form.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// A single bound or format check
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationCheck {
    /// Value must be an RFC3339 timestamp
    Rfc3339Time,

    /// Integer value must be >= bound
    IntAtLeast(i64),

    /// Integer value must be <= bound
    IntAtMost(i64),

    /// Float value must be >= bound
    FloatAtLeast(f64),

    /// Float value must be <= bound
    FloatAtMost(f64),

    /// Float value must be > bound (evaluated at runtime)
    FloatGreaterThan(f64),

    /// Float value must be < bound (evaluated at runtime)
    FloatLessThan(f64),
}

impl ValidationCheck {
    /// Whether the rendered check uses the Go `errors` package
    pub fn uses_errors_package(&self) -> bool {
        matches!(
            self,
            ValidationCheck::FloatGreaterThan(_) | ValidationCheck::FloatLessThan(_)
        )
    }
}

impl fmt::Display for ValidationCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationCheck::Rfc3339Time => write!(f, "validation.IsRFC3339Time"),
            ValidationCheck::IntAtLeast(n) => write!(f, "validation.IntAtLeast({})", n),
            ValidationCheck::IntAtMost(n) => write!(f, "validation.IntAtMost({})", n),
            ValidationCheck::FloatAtLeast(n) => write!(f, "validation.FloatAtLeast({:.6})", n),
            ValidationCheck::FloatAtMost(n) => write!(f, "validation.FloatAtMost({:.6})", n),
            ValidationCheck::FloatGreaterThan(n) => {
                f.write_str(&exclusive_float_func(*n, "<=", "more than"))
            }
            ValidationCheck::FloatLessThan(n) => {
                f.write_str(&exclusive_float_func(*n, ">=", "less than"))
            }
        }
    }
}

/// Inline SchemaValidateFunc rejecting values on the wrong side of `bound`
fn exclusive_float_func(bound: f64, reject_op: &str, expectation: &str) -> String {
    format!(
        r#"func(i interface{{}}, p string) (s []string, es []error) {{
	v, ok := i.(float64)
	if !ok {{
		es = append(es, errors.New("expected type of float"))
		return
	}}

	if v {op} {bound:.6} {{
		es = append(es, errors.New("expected {expectation} ({bound:.6})"))
		return
	}}

	return
}}"#,
        op = reject_op,
        bound = bound,
        expectation = expectation,
    )
}

/// Composed validation rule; never empty
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRule {
    checks: Vec<ValidationCheck>,
}

impl ValidationRule {
    /// Compose checks in the order given. Returns `None` for an empty list.
    pub fn compose(checks: Vec<ValidationCheck>) -> Option<Self> {
        if checks.is_empty() {
            None
        } else {
            Some(Self { checks })
        }
    }

    /// The atomic checks, in evaluation order
    pub fn checks(&self) -> &[ValidationCheck] {
        &self.checks
    }

    /// The check itself, or `validation.All(...)` over every check
    pub fn expression(&self) -> String {
        match self.checks.as_slice() {
            [single] => single.to_string(),
            checks => {
                let parts: Vec<String> = checks.iter().map(ToString::to_string).collect();
                format!("validation.All({})", parts.join(","))
            }
        }
    }

    /// Expression adapted for the `ValidateDiagFunc` schema field
    pub fn to_diag_func(&self) -> String {
        format!("validation.ToDiagFunc({})", self.expression())
    }

    pub fn uses_errors_package(&self) -> bool {
        self.checks.iter().any(ValidationCheck::uses_errors_package)
    }

    /// Whether the Go text spans several lines (inline function checks)
    pub fn is_multiline(&self) -> bool {
        self.uses_errors_package()
    }

    /// `ValidateDiagFunc` value laid out the way gofmt prints it when the
    /// field sits `indent` tab stops deep
    pub fn to_go_source(&self, indent: usize) -> String {
        let parts: Vec<String> = self
            .checks
            .iter()
            .map(|check| indent_continuation(&check.to_string(), indent))
            .collect();

        let inner = match parts.as_slice() {
            [single] => single.clone(),
            parts => format!("validation.All({})", parts.join(", ")),
        };
        format!("validation.ToDiagFunc({})", inner)
    }
}

/// Indent every line after the first; blank lines stay empty
fn indent_continuation(text: &str, indent: usize) -> String {
    let prefix = "\t".repeat(indent);
    let mut lines = text.lines();
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(&prefix);
            out.push_str(line);
        }
    }
    out
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}

impl Serialize for ValidationRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationRule", 3)?;
        state.serialize_field("expression", &self.expression())?;
        state.serialize_field("diag_func", &self.to_diag_func())?;
        state.serialize_field("uses_errors_package", &self.uses_errors_package())?;
        state.end()
    }
}
