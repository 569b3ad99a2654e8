//! Per-type constraint checkers
//!
//! Each checker is a stateless unit that validates one value against the
//! constraints declared on its rule. Every checker parses the constraint
//! configuration first, so a malformed config is reported for any value,
//! then verifies the runtime kind of the value, then the constraints in
//! its vocabulary, and stops at the first violation. Constraint names a checker does not know
//! are ignored.
//!
//! | type    | constraints                          |
//! |---------|--------------------------------------|
//! | string  | `length: [min, max]`, `pattern`      |
//! | number  | `integer: bool`, `range: [min, max]` |
//! | boolean | none                                 |
//! | object  | none                                 |
//! | array   | `length: [min, max]` on item count   |
//!
//! A `null` interval bound leaves that side open.

mod array;
mod boolean;
mod number;
mod object;
mod string;

pub use array::ArrayChecker;
pub use boolean::BooleanChecker;
pub use number::NumberChecker;
pub use object::ObjectChecker;
pub use string::StringChecker;

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::rules::{Constraints, RuleType};

/// A stateless validator for one rule type.
pub trait ConstraintChecker: Send + Sync + fmt::Debug {
    /// The rule type this checker validates
    fn rule_type(&self) -> RuleType;

    /// Validates `value` against `constraints`.
    ///
    /// `name` is the display name of the rule and must appear in every
    /// violation message.
    fn check(&self, constraints: &Constraints, value: &Value, name: &str) -> Result<(), CheckError>;
}

/// Failure reported by a checker
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// The value breaks a constraint
    #[error("{0}")]
    Violation(String),

    /// The constraint configuration itself is unusable
    #[error("constraint '{constraint}' is misconfigured: {reason}")]
    Misconfigured {
        /// Constraint name
        constraint: String,
        /// What is wrong with its configuration
        reason: String,
    },
}

impl CheckError {
    pub(crate) fn misconfigured(constraint: &str, reason: impl Into<String>) -> Self {
        CheckError::Misconfigured {
            constraint: constraint.to_string(),
            reason: reason.into(),
        }
    }
}

/// Closed interval `[min, max]` where a missing bound is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Interval {
    min: Option<f64>,
    max: Option<f64>,
}

impl Interval {
    /// Reads the interval stored under `key`, if any.
    ///
    /// The configuration must be a two-element array of numbers or nulls.
    pub(crate) fn from_constraint(
        constraints: &Constraints,
        key: &str,
    ) -> Result<Option<Self>, CheckError> {
        let Some(config) = constraints.get(key) else {
            return Ok(None);
        };

        let bounds = match config.as_array() {
            Some(bounds) if bounds.len() == 2 => bounds,
            _ => {
                return Err(CheckError::misconfigured(
                    key,
                    "expected a [min, max] pair",
                ))
            }
        };

        let min = bound(key, &bounds[0])?;
        let max = bound(key, &bounds[1])?;
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(CheckError::misconfigured(key, "min is greater than max"));
            }
        }
        Ok(Some(Self { min, max }))
    }

    pub(crate) fn contains(&self, x: f64) -> bool {
        self.min.map_or(true, |lo| x >= lo) && self.max.map_or(true, |hi| x <= hi)
    }

    /// Human-readable form: "between 3 and 12", "at least 1", "at most 5".
    pub(crate) fn describe(&self) -> String {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) => format!("between {} and {}", fmt_bound(lo), fmt_bound(hi)),
            (Some(lo), None) => format!("at least {}", fmt_bound(lo)),
            (None, Some(hi)) => format!("at most {}", fmt_bound(hi)),
            (None, None) => "anything".to_string(),
        }
    }
}

fn bound(key: &str, value: &Value) -> Result<Option<f64>, CheckError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| CheckError::misconfigured(key, "bound is not representable")),
        _ => Err(CheckError::misconfigured(key, "bounds must be numbers or null")),
    }
}

fn fmt_bound(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{}", x)
    }
}
