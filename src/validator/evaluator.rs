//! Recursive evaluation of a rule tree against a data tree
//!
//! Evaluation semantics:
//! - Every rule set is checked for well-formedness before any of its
//!   data is inspected; malformed rules abort the whole walk
//! - Missing required keys and checker violations are recorded and the
//!   walk continues with the next key or element
//! - Optional missing keys and nullable nulls are skipped entirely
//! - Wildcard elements share the path of their list
//! - Discriminator variants are merged into a per-value view of the
//!   object's properties; the rule tree is never modified

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde_json::Value;
use tracing::trace;

use super::accumulator::ValidationErrors;
use super::config::{ValidatorConfig, WildcardPolicy};
use crate::checkers::CheckError;
use crate::data::StructuredValue;
use crate::errors::{ValidatorError, ValidatorResult};
use crate::observability::Event;
use crate::registry::CheckerRegistry;
use crate::rules::{RuleNode, RuleSet, RuleType, WILDCARD};

type Entries<'r> = Vec<(&'r str, &'r RuleNode)>;

/// One rule as applied to one concrete value, with its resolved label.
///
/// Wildcard elements get a numbered label without touching the shared rule.
struct ItemRule<'a> {
    rule: &'a RuleNode,
    name: Cow<'a, str>,
}

/// State borrowed from a [`Validator`](crate::Validator) for one walk.
pub(super) struct Walk<'v> {
    pub(super) config: &'v ValidatorConfig,
    pub(super) registry: &'v mut CheckerRegistry,
    pub(super) errors: &'v mut ValidationErrors,
}

impl<'v> Walk<'v> {
    /// Evaluates `rules` against the children of `data`.
    pub(super) fn rule_set(
        &mut self,
        rules: &RuleSet,
        data: &Value,
        prefix: &str,
    ) -> ValidatorResult<()> {
        let entries: Entries<'_> = rules.iter().collect();
        self.entries(&entries, data, prefix)
    }

    fn entries(
        &mut self,
        entries: &[(&str, &RuleNode)],
        data: &Value,
        prefix: &str,
    ) -> ValidatorResult<()> {
        for &(key, rule) in entries {
            check_well_formed(key, rule, entries.len(), prefix)?;
        }

        for &(key, rule) in entries {
            if key == WILDCARD {
                self.wildcard(rule, data, prefix)?;
            } else {
                self.named(key, rule, data, &make_path(prefix, key))?;
            }
        }

        Ok(())
    }

    /// Applies `rule` to every element of `data`.
    fn wildcard(&mut self, rule: &RuleNode, data: &Value, path: &str) -> ValidatorResult<()> {
        let config = self.config;
        let base = rule.display_name(&config.default_name);

        let Some(elements) = data.as_array() else {
            if config.wildcard_on_non_list == WildcardPolicy::Reject {
                self.errors.add(path, format!("{} must be a list", base));
            }
            return Ok(());
        };

        for (index, element) in elements.iter().enumerate() {
            if rule.nullable && element.is_null() {
                continue;
            }
            let item = ItemRule {
                rule,
                name: Cow::Owned(format!("{} number {}", base, index + 1)),
            };
            self.item(item, element, path)?;
        }

        Ok(())
    }

    /// Applies `rule` to the property `key` of `data`.
    fn named(&mut self, key: &str, rule: &RuleNode, data: &Value, path: &str) -> ValidatorResult<()> {
        let config = self.config;
        let name = rule.display_name(&config.default_name);

        match data.field(key) {
            None => {
                if rule.required == Some(true) {
                    self.errors.add(path, format!("{} is required", name));
                }
                Ok(())
            }
            Some(value) if value.is_null() && rule.nullable => Ok(()),
            Some(value) => {
                let item = ItemRule {
                    rule,
                    name: Cow::Borrowed(name),
                };
                self.item(item, value, path)
            }
        }
    }

    /// Checks one value against its rule, then descends into nested rules.
    fn item(&mut self, item: ItemRule<'_>, value: &Value, path: &str) -> ValidatorResult<()> {
        let rule = item.rule;
        let checker = self
            .registry
            .get(rule.rule_type.as_deref().unwrap_or_default())?;

        match checker.check(&rule.constraints, value, &item.name) {
            Ok(()) => {}
            Err(CheckError::Violation(message)) => self.errors.add(path, message),
            Err(err @ CheckError::Misconfigured { .. }) => {
                return Err(ValidatorError::invalid_rule(path, err.to_string()));
            }
        }

        match checker.rule_type() {
            RuleType::Object => {
                let extras = resolve_discriminator(rule, value, path)?;
                if let (Some(properties), true) = (&rule.properties, value.is_object()) {
                    let effective = merge(properties, extras);
                    self.entries(&effective, value, path)?;
                }
            }
            RuleType::Array => {
                if let Some(items) = &rule.items {
                    if !items.is_wildcard() {
                        return Err(ValidatorError::invalid_rule(
                            path,
                            "array items must be a single wildcard rule",
                        ));
                    }
                    if value.is_array() {
                        self.rule_set(items, value, path)?;
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }
}

fn check_well_formed(key: &str, rule: &RuleNode, set_len: usize, prefix: &str) -> ValidatorResult<()> {
    let path = if key == WILDCARD {
        prefix.to_string()
    } else {
        make_path(prefix, key)
    };

    if rule.rule_type.as_deref().map_or(true, str::is_empty) {
        return Err(ValidatorError::invalid_rule(
            &path,
            format!("rule '{}' is missing a type", key),
        ));
    }

    if key == WILDCARD {
        if set_len != 1 {
            return Err(ValidatorError::invalid_rule(
                prefix,
                "wildcard rule sets may not contain other rules",
            ));
        }
    } else if rule.required.is_none() {
        return Err(ValidatorError::invalid_rule(
            &path,
            format!("rule '{}' must declare whether it is required", key),
        ));
    }

    Ok(())
}

/// Returns the extra property rules selected by the discriminator value.
///
/// The discriminator must be a declared, required base property. A
/// missing value or an unknown variant selects nothing.
fn resolve_discriminator<'r>(
    rule: &'r RuleNode,
    value: &Value,
    path: &str,
) -> ValidatorResult<Option<&'r RuleSet>> {
    let Some(inheritance) = &rule.inheritance else {
        return Ok(None);
    };
    let field = inheritance.discriminator.as_str();

    match rule.properties.as_ref().and_then(|p| p.get(field)) {
        Some(declared) if declared.required == Some(true) => {}
        Some(_) => {
            return Err(ValidatorError::invalid_rule(
                path,
                format!("discriminator '{}' must be declared as required", field),
            ))
        }
        None => {
            return Err(ValidatorError::invalid_rule(
                path,
                format!("discriminator '{}' is not a declared property", field),
            ))
        }
    }

    let Some(key) = value.field(field).and_then(discriminator_key) else {
        return Ok(None);
    };

    let extras = inheritance.variant_for(&key);
    trace!(
        event = %Event::DiscriminatorResolved,
        path,
        discriminator = field,
        value = %key,
        matched = extras.is_some(),
        "discriminator resolved"
    );
    Ok(extras)
}

fn discriminator_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.to_lowercase()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Base properties overlaid with the discriminator's extras.
fn merge<'r>(base: &'r RuleSet, extras: Option<&'r RuleSet>) -> Entries<'r> {
    let mut merged: BTreeMap<&'r str, &'r RuleNode> = base.iter().collect();
    if let Some(extras) = extras {
        merged.extend(extras.iter());
    }
    merged.into_iter().collect()
}

/// Creates a data path from prefix and key.
pub(super) fn make_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
