//! Rule tree type definitions
//!
//! Supported types:
//! - string: UTF-8 text
//! - number: integer or floating point number
//! - boolean: true / false
//! - object: keyed record with its own property rules
//! - array: homogeneous sequence with a single wildcard item rule

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidatorError;

/// Key of the single entry in a wildcard rule set
pub const WILDCARD: &str = "*";

/// Closed set of rule types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleType {
    /// UTF-8 text
    String,
    /// Integer or floating point number
    Number,
    /// Boolean
    Boolean,
    /// Keyed record
    Object,
    /// Homogeneous sequence
    Array,
}

impl RuleType {
    /// Every supported rule type
    pub const ALL: [RuleType; 5] = [
        RuleType::String,
        RuleType::Number,
        RuleType::Boolean,
        RuleType::Object,
        RuleType::Array,
    ];

    /// Returns the type name as written in rule trees
    pub fn type_name(&self) -> &'static str {
        match self {
            RuleType::String => "string",
            RuleType::Number => "number",
            RuleType::Boolean => "boolean",
            RuleType::Object => "object",
            RuleType::Array => "array",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for RuleType {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleType::ALL
            .into_iter()
            .find(|t| t.type_name() == s)
            .ok_or_else(|| ValidatorError::UnknownType(s.to_string()))
    }
}

/// Constraint name to constraint-specific configuration
pub type Constraints = BTreeMap<String, Value>;

/// Describes the expected shape of one data value.
///
/// `rule_type` and `required` stay optional in the model so that a rule
/// tree missing them still deserializes; the evaluator rejects such rules
/// when it reaches them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleNode {
    /// Type name, one of the [`RuleType`] names
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,
    /// Whether the key must be present (named rules only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Whether a null value is accepted without further checks
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,
    /// Label used in error messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Constraints handed to the type's checker
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub constraints: Constraints,
    /// Child rules of an object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<RuleSet>,
    /// Wildcard item rule of an array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<RuleSet>,
    /// Discriminator-selected extra properties of an object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inheritance: Option<Inheritance>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl RuleNode {
    /// Create a rule of the given type with nothing else declared
    pub fn new(rule_type: RuleType) -> Self {
        Self {
            rule_type: Some(rule_type.type_name().to_string()),
            ..Self::default()
        }
    }

    /// Mark the rule as required
    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    /// Mark the rule as optional
    pub fn optional(mut self) -> Self {
        self.required = Some(false);
        self
    }

    /// Accept null values
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Set the label used in error messages
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a constraint
    pub fn constraint(mut self, name: impl Into<String>, config: impl Into<Value>) -> Self {
        self.constraints.insert(name.into(), config.into());
        self
    }

    /// Add a child property rule
    pub fn property(mut self, key: impl Into<String>, rule: RuleNode) -> Self {
        self.properties
            .get_or_insert_with(RuleSet::new)
            .insert(key, rule);
        self
    }

    /// Set the rule applied to every element
    pub fn items(mut self, rule: RuleNode) -> Self {
        self.items = Some(RuleSet::wildcard(rule));
        self
    }

    /// Set the discriminator configuration
    pub fn inheritance(mut self, inheritance: Inheritance) -> Self {
        self.inheritance = Some(inheritance);
        self
    }

    /// Returns the label for error messages, falling back to `default`
    pub fn display_name<'a>(&'a self, default: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(default)
    }
}

/// Conditional extra properties keyed by a discriminator value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inheritance {
    /// Property whose value selects the extra rules
    pub discriminator: String,
    /// Lowercased discriminator value to extra property rules
    #[serde(default, deserialize_with = "lowercase_variants")]
    pub properties: BTreeMap<String, RuleSet>,
}

/// Lowercases variant keys on load so they match the lowercased
/// discriminator value. Keys differing only in case are rejected.
fn lowercase_variants<'de, D>(deserializer: D) -> Result<BTreeMap<String, RuleSet>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, RuleSet>::deserialize(deserializer)?;
    let mut variants = BTreeMap::new();
    for (key, rules) in raw {
        let lowered = key.to_lowercase();
        if variants.insert(lowered.clone(), rules).is_some() {
            return Err(de::Error::custom(format!(
                "duplicate inheritance variant '{}'",
                lowered
            )));
        }
    }
    Ok(variants)
}

impl Inheritance {
    /// Create a discriminator configuration with no variants
    pub fn new(discriminator: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Add the extra rules selected by `value`
    pub fn variant(mut self, value: impl Into<String>, rules: RuleSet) -> Self {
        self.properties.insert(value.into().to_lowercase(), rules);
        self
    }

    /// Returns the extra rules for a lowercased discriminator value
    pub fn variant_for(&self, value: &str) -> Option<&RuleSet> {
        self.properties.get(value)
    }
}

/// Mapping of item key to rule, evaluated against one data node's children.
///
/// A set is either purely named or holds exactly one [`WILDCARD`] entry.
/// Keys iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: BTreeMap<String, RuleNode>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a wildcard rule set applying `rule` to every element
    pub fn wildcard(rule: RuleNode) -> Self {
        let mut set = Self::new();
        set.insert(WILDCARD, rule);
        set
    }

    /// Insert a rule, returning the one it replaced
    pub fn insert(&mut self, key: impl Into<String>, rule: RuleNode) -> Option<RuleNode> {
        self.rules.insert(key.into(), rule)
    }

    /// Builder form of [`RuleSet::insert`]
    pub fn with(mut self, key: impl Into<String>, rule: RuleNode) -> Self {
        self.insert(key, rule);
        self
    }

    pub fn get(&self, key: &str) -> Option<&RuleNode> {
        self.rules.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.rules.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns whether the set holds a wildcard entry
    pub fn is_wildcard(&self) -> bool {
        self.rules.contains_key(WILDCARD)
    }

    /// Iterate over `(key, rule)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleNode)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, RuleNode)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (String, RuleNode)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
