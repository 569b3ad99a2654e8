//! Checker for `number` rules

use serde_json::{Number, Value};

use super::{CheckError, ConstraintChecker, Interval};
use crate::rules::{Constraints, RuleType};

/// Validates numeric values.
///
/// A number counts as an integer when its value is exact: `3` and `3.0`
/// both satisfy `integer: true`, `3.5` satisfies `integer: false`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberChecker;

impl ConstraintChecker for NumberChecker {
    fn rule_type(&self) -> RuleType {
        RuleType::Number
    }

    fn check(&self, constraints: &Constraints, value: &Value, name: &str) -> Result<(), CheckError> {
        let integer = match constraints.get("integer") {
            Some(config) => Some(
                config
                    .as_bool()
                    .ok_or_else(|| CheckError::misconfigured("integer", "expected true or false"))?,
            ),
            None => None,
        };
        let range = Interval::from_constraint(constraints, "range")?;

        let Value::Number(number) = value else {
            return Err(CheckError::Violation(format!("{} must be a number", name)));
        };

        match (integer, is_integer(number)) {
            (Some(true), false) => {
                return Err(CheckError::Violation(format!("{} must be an integer", name)))
            }
            (Some(false), true) => {
                return Err(CheckError::Violation(format!(
                    "{} must be a decimal number",
                    name
                )))
            }
            _ => {}
        }

        if let Some(range) = range {
            let x = number.as_f64().unwrap_or(f64::NAN);
            if !range.contains(x) {
                return Err(CheckError::Violation(format!(
                    "{} must be {}",
                    name,
                    range.describe()
                )));
            }
        }

        Ok(())
    }
}

fn is_integer(number: &Number) -> bool {
    if number.is_i64() || number.is_u64() {
        return true;
    }
    number
        .as_f64()
        .map_or(false, |f| f.is_finite() && f.fract() == 0.0)
}
