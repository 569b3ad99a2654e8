//! Rule tree model
//!
//! A rule tree mirrors the shape of the data it validates: every
//! [`RuleNode`] describes one value, and a [`RuleSet`] maps the keys of
//! one data node to the rules for its children.

mod loader;
mod types;

pub use types::{Constraints, Inheritance, RuleNode, RuleSet, RuleType, WILDCARD};
