//! Checker for `boolean` rules

use serde_json::Value;

use super::{CheckError, ConstraintChecker};
use crate::rules::{Constraints, RuleType};

/// Validates that a value is `true` or `false`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanChecker;

impl ConstraintChecker for BooleanChecker {
    fn rule_type(&self) -> RuleType {
        RuleType::Boolean
    }

    fn check(&self, _constraints: &Constraints, value: &Value, name: &str) -> Result<(), CheckError> {
        if value.is_boolean() {
            Ok(())
        } else {
            Err(CheckError::Violation(format!("{} must be a boolean", name)))
        }
    }
}
