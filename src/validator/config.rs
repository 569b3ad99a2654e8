//! Validator configuration

use serde::Deserialize;

/// What to do when a wildcard rule meets data that is not a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WildcardPolicy {
    /// Record "<name> must be a list" at the shared path
    #[default]
    Reject,
    /// Skip the wildcard rule silently
    Ignore,
}

/// Configuration for a [`Validator`](crate::Validator).
///
/// Deserializable so applications can embed it in their own config files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Label used in messages for rules without a `name`
    pub default_name: String,
    /// Handling of wildcard rules applied to non-list data
    pub wildcard_on_non_list: WildcardPolicy,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            default_name: "Value".to_string(),
            wildcard_on_non_list: WildcardPolicy::Reject,
        }
    }
}

impl ValidatorConfig {
    /// Create config that silently skips wildcard rules on non-list data.
    pub fn lenient() -> Self {
        Self {
            wildcard_on_non_list: WildcardPolicy::Ignore,
            ..Self::default()
        }
    }
}
