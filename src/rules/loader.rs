//! Rule set ingestion from JSON text, JSON values and files
//!
//! Loading only converts the authoring format into a [`RuleSet`]. A rule
//! missing its `type` or `required` key still loads; the evaluator
//! rejects it when it reaches it.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::types::RuleSet;
use crate::errors::{ValidatorError, ValidatorResult};

impl RuleSet {
    /// Parses a rule set from JSON text.
    pub fn from_json_str(json: &str) -> ValidatorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Converts an already parsed JSON value into a rule set.
    pub fn from_value(value: Value) -> ValidatorResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Reads and parses a rule set from a JSON file.
    pub fn from_file(path: &Path) -> ValidatorResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ValidatorError::io(path.display().to_string(), e))?;

        let rules = Self::from_json_str(&content)?;
        debug!(path = %path.display(), rules = rules.len(), "rule set loaded");
        Ok(rules)
    }
}
