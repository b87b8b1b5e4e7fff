//! Validation rule synthesis from OpenAPI bounds and formats
//!
//! Checks are produced in a fixed order: format, minimum, maximum.
//!
//! Integer bounds are made inclusive by shifting an exclusive bound one unit
//! inward; bounds rendered for TypeInt then truncate toward zero. Float bounds
//! cannot be shifted, so an exclusive float bound becomes a strict comparison
//! evaluated at runtime.

use crate::openapi::{Bound, Schema, FORMAT_DATE, FORMAT_DATE_TIME, TYPE_INTEGER, TYPE_NUMBER};
use crate::type_mapper::TypeMapper;
use tf_schema_gen_common::{ValidationCheck, ValidationRule};

/// How a numeric schema is represented downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericKind {
    /// `integer` carried as TypeInt
    Int,
    /// `integer`/`int64` carried as TypeFloat
    WideInt,
    /// `number`
    Float,
}

impl NumericKind {
    fn of(schema: &Schema) -> Option<Self> {
        match schema.type_name()? {
            TYPE_INTEGER if TypeMapper::is_wide_integer(schema.format()) => {
                Some(NumericKind::WideInt)
            }
            TYPE_INTEGER => Some(NumericKind::Int),
            TYPE_NUMBER => Some(NumericKind::Float),
            _ => None,
        }
    }
}

/// Build the validation rule for a schema node
///
/// Returns `None` for a missing node or when no check applies.
pub fn build_validation_rule(schema: Option<&Schema>) -> Option<ValidationRule> {
    let schema = schema?;
    let mut checks = Vec::new();

    if let Some(format) = schema.format() {
        match format_check(format) {
            Some(check) => checks.push(check),
            None => tracing::trace!(format, "no validation for format"),
        }
    }

    if let Some(kind) = NumericKind::of(schema) {
        if let Some(bound) = schema.min_bound() {
            checks.push(lower_bound_check(kind, bound));
        }

        if let Some(bound) = schema.max_bound() {
            checks.push(upper_bound_check(kind, bound));
        }
    }

    ValidationRule::compose(checks)
}

/// Check implied by a string format; unrecognized formats yield nothing
pub fn format_check(format: &str) -> Option<ValidationCheck> {
    match format {
        FORMAT_DATE | FORMAT_DATE_TIME => Some(ValidationCheck::Rfc3339Time),
        _ => None,
    }
}

fn lower_bound_check(kind: NumericKind, bound: Bound) -> ValidationCheck {
    let shifted = if bound.exclusive {
        bound.value + 1.0
    } else {
        bound.value
    };

    match kind {
        NumericKind::Int => ValidationCheck::IntAtLeast(shifted as i64),
        NumericKind::WideInt => ValidationCheck::FloatAtLeast(shifted),
        NumericKind::Float if bound.exclusive => ValidationCheck::FloatGreaterThan(bound.value),
        NumericKind::Float => ValidationCheck::FloatAtLeast(bound.value),
    }
}

fn upper_bound_check(kind: NumericKind, bound: Bound) -> ValidationCheck {
    let shifted = if bound.exclusive {
        bound.value - 1.0
    } else {
        bound.value
    };

    match kind {
        NumericKind::Int => ValidationCheck::IntAtMost(shifted as i64),
        NumericKind::WideInt => ValidationCheck::FloatAtMost(shifted),
        NumericKind::Float if bound.exclusive => ValidationCheck::FloatLessThan(bound.value),
        NumericKind::Float => ValidationCheck::FloatAtMost(bound.value),
    }
}
