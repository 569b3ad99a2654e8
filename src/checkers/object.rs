//! Checker for `object` rules

use serde_json::Value;

use super::{CheckError, ConstraintChecker};
use crate::rules::{Constraints, RuleType};

/// Validates that a value is a keyed record. Property rules are applied
/// by the evaluator, not here.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectChecker;

impl ConstraintChecker for ObjectChecker {
    fn rule_type(&self) -> RuleType {
        RuleType::Object
    }

    fn check(&self, _constraints: &Constraints, value: &Value, name: &str) -> Result<(), CheckError> {
        if value.is_object() {
            Ok(())
        } else {
            Err(CheckError::Violation(format!("{} must be an object", name)))
        }
    }
}
