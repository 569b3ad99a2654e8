//! Checker registry - resolves type names to constraint checkers

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::checkers::{
    ArrayChecker, BooleanChecker, ConstraintChecker, NumberChecker, ObjectChecker, StringChecker,
};
use crate::errors::ValidatorResult;
use crate::observability::Event;
use crate::rules::RuleType;

/// Resolves rule type names to checkers.
///
/// Checkers are created on first lookup and cached for the lifetime of
/// the registry. The cache is unsynchronized; a registry belongs to one
/// validator. Checkers themselves are `Send + Sync` and can be shared
/// between registries through [`CheckerRegistry::register`].
#[derive(Default)]
pub struct CheckerRegistry {
    checkers: HashMap<RuleType, Arc<dyn ConstraintChecker>>,
}

impl CheckerRegistry {
    /// Create a registry with no checker instantiated yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the checker for a type name
    ///
    /// # Errors
    ///
    /// Returns `RULE_UNKNOWN_TYPE` if `type_name` is not a supported type.
    pub fn get(&mut self, type_name: &str) -> ValidatorResult<Arc<dyn ConstraintChecker>> {
        let rule_type: RuleType = type_name.parse()?;
        Ok(self.get_type(rule_type))
    }

    /// Get the checker for a rule type
    pub fn get_type(&mut self, rule_type: RuleType) -> Arc<dyn ConstraintChecker> {
        let checker = self.checkers.entry(rule_type).or_insert_with(|| {
            trace!(event = %Event::CheckerInstantiated, rule_type = %rule_type, "checker created");
            instantiate(rule_type)
        });
        Arc::clone(checker)
    }

    /// Register a checker, replacing the one for its rule type
    pub fn register(&mut self, checker: Arc<dyn ConstraintChecker>) {
        self.checkers.insert(checker.rule_type(), checker);
    }

    /// Returns whether a checker for `rule_type` is cached
    pub fn is_instantiated(&self, rule_type: RuleType) -> bool {
        self.checkers.contains_key(&rule_type)
    }

    /// Number of cached checkers
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}

fn instantiate(rule_type: RuleType) -> Arc<dyn ConstraintChecker> {
    match rule_type {
        RuleType::String => Arc::new(StringChecker),
        RuleType::Number => Arc::new(NumberChecker),
        RuleType::Boolean => Arc::new(BooleanChecker),
        RuleType::Object => Arc::new(ObjectChecker),
        RuleType::Array => Arc::new(ArrayChecker),
    }
}

impl fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cached: Vec<&RuleType> = self.checkers.keys().collect();
        cached.sort();
        f.debug_struct("CheckerRegistry")
            .field("checkers", &cached)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::CheckError;
    use crate::rules::Constraints;
    use serde_json::{json, Value};

    #[test]
    fn test_lazy_instantiation() {
        let mut registry = CheckerRegistry::new();
        assert!(registry.is_empty());

        let checker = registry.get("string").unwrap();
        assert_eq!(checker.rule_type(), RuleType::String);
        assert!(registry.is_instantiated(RuleType::String));
        assert!(!registry.is_instantiated(RuleType::Number));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_cached_instance_reused() {
        let mut registry = CheckerRegistry::new();
        let first = registry.get("number").unwrap();
        let second = registry.get("number").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_every_type_resolves() {
        let mut registry = CheckerRegistry::new();
        for t in RuleType::ALL {
            assert_eq!(registry.get(t.type_name()).unwrap().rule_type(), t);
        }
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let mut registry = CheckerRegistry::new();
        let err = registry.get("date").unwrap_err();
        assert_eq!(err.code(), "RULE_UNKNOWN_TYPE");
        assert!(registry.is_empty());
    }

    #[derive(Debug)]
    struct UppercaseOnly;

    impl ConstraintChecker for UppercaseOnly {
        fn rule_type(&self) -> RuleType {
            RuleType::String
        }

        fn check(&self, _: &Constraints, value: &Value, name: &str) -> Result<(), CheckError> {
            match value.as_str() {
                Some(s) if s.chars().all(|c| !c.is_lowercase()) => Ok(()),
                _ => Err(CheckError::Violation(format!("{} must be upper case", name))),
            }
        }
    }

    #[test]
    fn test_register_replaces_checker() {
        let mut registry = CheckerRegistry::new();
        registry.register(Arc::new(UppercaseOnly));

        let checker = registry.get("string").unwrap();
        let err = checker
            .check(&Constraints::new(), &json!("abc"), "Code")
            .unwrap_err();
        assert_eq!(err.to_string(), "Code must be upper case");
    }
}
