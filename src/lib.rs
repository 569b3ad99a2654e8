//! ruletree - declarative rule-tree validation for JSON-shaped data
//!
//! A rule tree mirrors the structure of the data it describes. The
//! validator walks both trees in lockstep and collects every failure
//! keyed by its dot-joined data path instead of stopping at the first.
//!
//! # Design Principles
//!
//! - Malformed rule trees abort the call; data problems are collected
//! - The whole tree is always walked
//! - Rule trees are never modified during evaluation
//! - Deterministic error ordering
//!
//! # Example
//!
//! ```
//! use ruletree::{RuleSet, Validator};
//! use serde_json::json;
//!
//! let rules = RuleSet::from_value(json!({
//!     "name": { "type": "string", "required": true, "name": "Name" },
//!     "address": {
//!         "type": "object",
//!         "required": false,
//!         "properties": {
//!             "postCode": {
//!                 "type": "string",
//!                 "required": true,
//!                 "name": "Post code",
//!                 "constraints": { "length": [3, 12] }
//!             }
//!         }
//!     }
//! }))?;
//!
//! let mut validator = Validator::new();
//! let valid = validator.is_valid(&rules, &json!({ "address": { "postCode": "AB" } }))?;
//!
//! assert!(!valid);
//! assert_eq!(validator.errors().get("name").unwrap(), ["Name is required"]);
//! assert_eq!(
//!     validator.errors().get("address.postCode").unwrap(),
//!     ["Post code must be between 3 and 12 characters long"]
//! );
//! # Ok::<(), ruletree::ValidatorError>(())
//! ```

pub mod checkers;
pub mod data;
pub mod errors;
pub mod observability;
pub mod registry;
pub mod rules;
pub mod validator;

pub use checkers::{CheckError, ConstraintChecker};
pub use data::StructuredValue;
pub use errors::{Severity, ValidatorError, ValidatorResult};
pub use registry::CheckerRegistry;
pub use rules::{Constraints, Inheritance, RuleNode, RuleSet, RuleType, WILDCARD};
pub use validator::{ValidationErrors, Validator, ValidatorConfig, WildcardPolicy};
