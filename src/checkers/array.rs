//! Checker for `array` rules

use serde_json::Value;

use super::{CheckError, ConstraintChecker, Interval};
use crate::rules::{Constraints, RuleType};

/// Validates that a value is a sequence, optionally bounding its item
/// count with `length`. Item rules are applied by the evaluator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArrayChecker;

impl ConstraintChecker for ArrayChecker {
    fn rule_type(&self) -> RuleType {
        RuleType::Array
    }

    fn check(&self, constraints: &Constraints, value: &Value, name: &str) -> Result<(), CheckError> {
        let length = Interval::from_constraint(constraints, "length")?;

        let Some(items) = value.as_array() else {
            return Err(CheckError::Violation(format!("{} must be a list", name)));
        };

        if let Some(length) = length {
            if !length.contains(items.len() as f64) {
                return Err(CheckError::Violation(format!(
                    "{} must contain {} items",
                    name,
                    length.describe()
                )));
            }
        }

        Ok(())
    }
}
