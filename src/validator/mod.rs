//! Validator - evaluates rule trees against data and collects errors
//!
//! A [`Validator`] owns a [`CheckerRegistry`] and a
//! [`ValidationErrors`] accumulator. It is meant for one caller at a
//! time; for concurrent validation create one validator per call and
//! share checkers through [`CheckerRegistry::register`].

mod accumulator;
mod config;
mod evaluator;

pub use accumulator::ValidationErrors;
pub use config::{ValidatorConfig, WildcardPolicy};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::data::ingest;
use crate::errors::ValidatorResult;
use crate::observability::Event;
use crate::registry::CheckerRegistry;
use crate::rules::RuleSet;
use evaluator::Walk;

/// Evaluates rule sets against data nodes.
///
/// Every top-level call resets the accumulated errors, walks the whole
/// tree, and returns whether no error was recorded. Malformed rule trees
/// abort the call with an error and leave the accumulator empty.
#[derive(Debug, Default)]
pub struct Validator {
    config: ValidatorConfig,
    registry: CheckerRegistry,
    errors: ValidationErrors,
}

impl Validator {
    /// Creates a validator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with the given configuration.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replaces the checker registry.
    pub fn with_registry(mut self, registry: CheckerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &CheckerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CheckerRegistry {
        &mut self.registry
    }

    /// Errors recorded by the last call.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Discards recorded errors.
    pub fn reset(&mut self) {
        self.errors.clear();
    }

    /// Validates `data` against `rules`.
    ///
    /// # Errors
    ///
    /// Returns `RULE_INVALID` or `RULE_UNKNOWN_TYPE` if the rule tree is
    /// malformed. Data problems never surface here; they are recorded in
    /// [`Validator::errors`] and reflected in the returned boolean.
    pub fn is_valid(&mut self, rules: &RuleSet, data: &Value) -> ValidatorResult<bool> {
        self.is_valid_at(rules, data, "")
    }

    /// Validates `data` against `rules`, prefixing every error path with
    /// `path_prefix`.
    pub fn is_valid_at(
        &mut self,
        rules: &RuleSet,
        data: &Value,
        path_prefix: &str,
    ) -> ValidatorResult<bool> {
        self.errors.clear();
        debug!(
            event = %Event::ValidationBegin,
            rules = rules.len(),
            prefix = path_prefix,
            "validation started"
        );

        let mut walk = Walk {
            config: &self.config,
            registry: &mut self.registry,
            errors: &mut self.errors,
        };
        if let Err(err) = walk.rule_set(rules, data, path_prefix) {
            warn!(event = %Event::RuleRejected, code = err.code(), error = %err, "rule tree rejected");
            self.errors.clear();
            return Err(err);
        }

        let valid = !self.errors.has_errors();
        debug!(
            event = %Event::ValidationComplete,
            valid,
            errors = self.errors.len(),
            "validation finished"
        );
        Ok(valid)
    }

    /// Validates any serializable value, converting it to a data node first.
    pub fn is_valid_serialize<T: Serialize + ?Sized>(
        &mut self,
        rules: &RuleSet,
        data: &T,
    ) -> ValidatorResult<bool> {
        self.errors.clear();
        let value = ingest(data)?;
        self.is_valid(rules, &value)
    }

    /// Validates `data` and returns a snapshot of the recorded errors,
    /// empty when the data is valid.
    pub fn validate(&mut self, rules: &RuleSet, data: &Value) -> ValidatorResult<ValidationErrors> {
        self.is_valid(rules, data)?;
        Ok(self.errors.clone())
    }
}
