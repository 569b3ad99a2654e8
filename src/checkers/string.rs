//! Checker for `string` rules

use regex::Regex;
use serde_json::Value;

use super::{CheckError, ConstraintChecker, Interval};
use crate::rules::{Constraints, RuleType};

/// Validates text values.
///
/// `length` counts characters, not bytes. `pattern` is compiled on every
/// check; rule trees are not cached.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringChecker;

impl ConstraintChecker for StringChecker {
    fn rule_type(&self) -> RuleType {
        RuleType::String
    }

    fn check(&self, constraints: &Constraints, value: &Value, name: &str) -> Result<(), CheckError> {
        let length = Interval::from_constraint(constraints, "length")?;
        let pattern = match constraints.get("pattern") {
            Some(config) => {
                let source = config
                    .as_str()
                    .ok_or_else(|| CheckError::misconfigured("pattern", "expected a string"))?;
                let regex = Regex::new(source)
                    .map_err(|e| CheckError::misconfigured("pattern", e.to_string()))?;
                Some((source, regex))
            }
            None => None,
        };

        let Some(text) = value.as_str() else {
            return Err(CheckError::Violation(format!("{} must be a string", name)));
        };

        if let Some(length) = length {
            if !length.contains(text.chars().count() as f64) {
                return Err(CheckError::Violation(format!(
                    "{} must be {} characters long",
                    name,
                    length.describe()
                )));
            }
        }

        if let Some((source, regex)) = pattern {
            if !regex.is_match(text) {
                return Err(CheckError::Violation(format!(
                    "{} must match the pattern {}",
                    name, source
                )));
            }
        }

        Ok(())
    }
}
