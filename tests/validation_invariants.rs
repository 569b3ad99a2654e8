//! Validation Invariant Tests
//!
//! Tests for rule-tree evaluation invariants:
//! - Required / optional / nullable resolution
//! - Wildcard exclusivity and sequence fan-out
//! - Full-walk coverage (no short-circuit on first error)
//! - Discriminator-driven property merge
//! - Dot-joined error paths

use ruletree::{
    Inheritance, RuleNode, RuleSet, RuleType, Validator, ValidatorConfig, ValidatorError,
};
use serde::Serialize;
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn person_rules() -> RuleSet {
    RuleSet::from_value(json!({
        "name": {
            "type": "string",
            "required": true,
            "name": "Name",
            "constraints": { "length": [1, 64] }
        },
        "age": {
            "type": "number",
            "required": true,
            "name": "Age",
            "constraints": { "integer": true, "range": [0, 150] }
        },
        "address": {
            "type": "object",
            "required": false,
            "nullable": true,
            "name": "Address",
            "properties": {
                "street": { "type": "string", "required": true, "name": "Street" },
                "postCode": {
                    "type": "string",
                    "required": true,
                    "name": "Post code",
                    "constraints": { "length": [3, 12] }
                }
            }
        },
        "nickNames": {
            "type": "array",
            "required": false,
            "name": "Nick names",
            "items": {
                "*": {
                    "type": "string",
                    "name": "Nick name",
                    "constraints": { "length": [1, null] }
                }
            }
        }
    }))
    .unwrap()
}

fn pet_rules() -> RuleSet {
    RuleSet::new().with(
        "pet",
        RuleNode::new(RuleType::Object)
            .required()
            .named("Pet")
            .property("kind", RuleNode::new(RuleType::String).required().named("kind"))
            .inheritance(
                Inheritance::new("kind").variant(
                    "dog",
                    RuleSet::new().with("bark", RuleNode::new(RuleType::Boolean).required().named("bark")),
                ),
            ),
    )
}

// =============================================================================
// Round Trip
// =============================================================================

/// The documented example validates with no errors.
#[test]
fn test_valid_person_passes() {
    let mut validator = Validator::new();
    let data = json!({
        "name": "Ada Lovelace",
        "age": 36,
        "address": { "street": "St James's Square", "postCode": "SW1Y 4JH" },
        "nickNames": ["Ada", "The Enchantress of Numbers"]
    });

    assert!(validator.is_valid(&person_rules(), &data).unwrap());
    assert!(validator.errors().all().is_empty());
}

/// Same document validates the same way every time.
#[test]
fn test_validation_is_deterministic() {
    let mut validator = Validator::new();
    let data = json!({ "age": 12.5, "nickNames": ["", "x", ""] });

    let first = validator.validate(&person_rules(), &data).unwrap();
    for _ in 0..50 {
        assert_eq!(validator.validate(&person_rules(), &data).unwrap(), first);
    }
}

// =============================================================================
// Required / Optional / Nullable
// =============================================================================

/// Missing required field records exactly one "is required" message.
#[test]
fn test_required_absent() {
    let mut validator = Validator::new();
    let valid = validator
        .is_valid(&person_rules(), &json!({ "age": 30 }))
        .unwrap();

    assert!(!valid);
    assert_eq!(validator.errors().get("name").unwrap(), ["Name is required"]);
    assert_eq!(validator.errors().len(), 1);
}

/// Optional absent fields are skipped without recursion.
#[test]
fn test_optional_absent_is_silent() {
    let mut validator = Validator::new();
    let valid = validator
        .is_valid(&person_rules(), &json!({ "name": "Ada", "age": 36 }))
        .unwrap();

    assert!(valid);
    assert!(validator.errors().get("address.street").is_none());
}

/// A nullable null value is accepted regardless of type and constraints.
#[test]
fn test_nullable_short_circuit() {
    let rules = RuleSet::new().with(
        "code",
        RuleNode::new(RuleType::String)
            .required()
            .nullable()
            .constraint("length", json!([5, 5])),
    );
    let mut validator = Validator::new();
    assert!(validator.is_valid(&rules, &json!({ "code": null })).unwrap());
}

/// A null value without `nullable` is checked like any other value.
#[test]
fn test_null_without_nullable_fails_type_check() {
    let rules = RuleSet::new().with(
        "code",
        RuleNode::new(RuleType::String).required().named("Code"),
    );
    let mut validator = Validator::new();
    assert!(!validator.is_valid(&rules, &json!({ "code": null })).unwrap());
    assert_eq!(validator.errors().get("code").unwrap(), ["Code must be a string"]);
}

// =============================================================================
// Rule Tree Structure
// =============================================================================

/// A wildcard mixed with named rules is rejected before data is inspected.
#[test]
fn test_wildcard_exclusivity() {
    let rules = RuleSet::new()
        .with("*", RuleNode::new(RuleType::String))
        .with("name", RuleNode::new(RuleType::String).required());
    let mut validator = Validator::new();

    let err = validator.is_valid(&rules, &json!({ "name": 42 })).unwrap_err();
    assert!(matches!(err, ValidatorError::InvalidRule { .. }));
    assert!(err.to_string().contains("wildcard rule sets may not contain other rules"));
    assert!(validator.errors().is_empty());
}

/// A rule without a type aborts the call.
#[test]
fn test_missing_type_aborts() {
    let rules = RuleSet::from_value(json!({ "name": { "required": true } })).unwrap();
    let mut validator = Validator::new();
    let err = validator.is_valid(&rules, &json!({ "name": "Ada" })).unwrap_err();
    assert_eq!(err.code(), "RULE_INVALID");
}

/// A named rule without `required` aborts the call.
#[test]
fn test_missing_required_flag_aborts() {
    let rules = RuleSet::from_value(json!({ "name": { "type": "string" } })).unwrap();
    let mut validator = Validator::new();
    let err = validator.is_valid(&rules, &json!({})).unwrap_err();
    assert!(err.to_string().contains("must declare whether it is required"));
}

/// An unsupported type name aborts the call once a value reaches it.
#[test]
fn test_unknown_type_aborts() {
    let rules = RuleSet::from_value(json!({
        "born": { "type": "date", "required": true }
    }))
    .unwrap();
    let mut validator = Validator::new();
    let err = validator
        .is_valid(&rules, &json!({ "born": "1815-12-10" }))
        .unwrap_err();
    assert!(matches!(err, ValidatorError::UnknownType(ref t) if t == "date"));
}

/// A malformed constraint aborts the call even when the value has the wrong kind.
#[test]
fn test_malformed_constraint_aborts_on_wrong_kind() {
    let rules = RuleSet::from_value(json!({
        "name": { "type": "string", "required": true, "constraints": { "length": "short" } }
    }))
    .unwrap();
    let mut validator = Validator::new();
    let err = validator.is_valid(&rules, &json!({ "name": 5 })).unwrap_err();
    assert_eq!(err.code(), "RULE_INVALID");
    assert!(validator.errors().is_empty());
}

// =============================================================================
// Full Walk Coverage
// =============================================================================

/// Failures in sibling fields are all reported.
#[test]
fn test_full_walk_coverage() {
    let rules = RuleSet::new().with(
        "address",
        RuleNode::new(RuleType::Object)
            .required()
            .property("street", RuleNode::new(RuleType::String).required().named("Street"))
            .property("city", RuleNode::new(RuleType::String).required().named("City"))
            .property(
                "postCode",
                RuleNode::new(RuleType::String)
                    .required()
                    .named("Post code")
                    .constraint("length", json!([3, 12])),
            ),
    );
    let mut validator = Validator::new();
    let valid = validator
        .is_valid(
            &rules,
            &json!({ "address": { "street": 12, "city": "Oslo", "postCode": "0" } }),
        )
        .unwrap();

    assert!(!valid);
    let paths: Vec<&str> = validator.errors().paths().collect();
    assert_eq!(paths, ["address.postCode", "address.street"]);
}

/// Nested failures are keyed by the full dot-joined path.
#[test]
fn test_nested_path_accumulation() {
    let rules = RuleSet::from_value(json!({
        "address": {
            "type": "object",
            "required": true,
            "properties": {
                "postCode": {
                    "type": "string",
                    "required": true,
                    "constraints": { "length": [3, 12] }
                }
            }
        }
    }))
    .unwrap();
    let mut validator = Validator::new();
    validator
        .is_valid(&rules, &json!({ "address": { "postCode": "AB" } }))
        .unwrap();

    let all = validator.errors().all();
    assert_eq!(all.len(), 1);
    assert!(all.contains_key("address.postCode"));
}

// =============================================================================
// Sequences
// =============================================================================

/// Each element is checked; failures share the list's path.
#[test]
fn test_sequence_fan_out() {
    let rules = RuleSet::new().with(
        "tags",
        RuleNode::new(RuleType::Array)
            .required()
            .items(RuleNode::new(RuleType::String).constraint("length", json!([1, null]))),
    );
    let mut validator = Validator::new();
    let valid = validator.is_valid(&rules, &json!({ "tags": ["", "ok"] })).unwrap();

    assert!(!valid);
    assert_eq!(validator.errors().len(), 1);
    let messages = validator.errors().get("tags").unwrap();
    assert!(messages[0].contains("Value number 1"));
}

/// Custom item names are numbered and every failing element is reported.
#[test]
fn test_sequence_custom_name_no_short_circuit() {
    let mut validator = Validator::new();
    let valid = validator
        .is_valid(
            &person_rules(),
            &json!({ "name": "Ada", "age": 36, "nickNames": ["", "ok", ""] }),
        )
        .unwrap();

    assert!(!valid);
    assert_eq!(
        validator.errors().get("nickNames").unwrap(),
        [
            "Nick name number 1 must be at least 1 characters long",
            "Nick name number 3 must be at least 1 characters long"
        ]
    );
}

/// Sequences of objects descend into every element.
#[test]
fn test_sequence_of_objects() {
    let rules = RuleSet::new().with(
        "children",
        RuleNode::new(RuleType::Array).required().items(
            RuleNode::new(RuleType::Object)
                .named("Child")
                .property("name", RuleNode::new(RuleType::String).required().named("Name")),
        ),
    );
    let mut validator = Validator::new();
    validator
        .is_valid(&rules, &json!({ "children": [{ "name": "Byron" }, {}] }))
        .unwrap();

    assert_eq!(validator.errors().get("children.name").unwrap(), ["Name is required"]);
}

/// A wildcard rule set applied directly to a scalar records a data error.
#[test]
fn test_wildcard_on_scalar_rejected() {
    let rules = RuleSet::wildcard(RuleNode::new(RuleType::Number));
    let mut validator = Validator::new();
    assert!(!validator.is_valid(&rules, &json!("not a list")).unwrap());
    assert_eq!(validator.errors().get("").unwrap(), ["Value must be a list"]);
}

/// The lenient configuration skips wildcard rules on non-lists.
#[test]
fn test_wildcard_on_scalar_lenient() {
    let rules = RuleSet::wildcard(RuleNode::new(RuleType::Number));
    let mut validator = Validator::with_config(ValidatorConfig::lenient());
    assert!(validator.is_valid(&rules, &json!("not a list")).unwrap());
}

/// Nullable item rules accept null elements.
#[test]
fn test_nullable_items() {
    let rules = RuleSet::wildcard(RuleNode::new(RuleType::Number).nullable());
    let mut validator = Validator::new();
    assert!(validator.is_valid(&rules, &json!([1, null, 3])).unwrap());
}

// =============================================================================
// Discriminator
// =============================================================================

/// Variant properties are merged when the discriminator matches.
#[test]
fn test_discriminator_merge_passes() {
    let mut validator = Validator::new();
    assert!(validator
        .is_valid(&pet_rules(), &json!({ "pet": { "kind": "Dog", "bark": true } }))
        .unwrap());
}

/// Variant properties are enforced, matched case-insensitively.
#[test]
fn test_discriminator_merge_enforces_variant() {
    let mut validator = Validator::new();
    let valid = validator
        .is_valid(&pet_rules(), &json!({ "pet": { "kind": "Dog" } }))
        .unwrap();

    assert!(!valid);
    assert_eq!(validator.errors().get("pet.bark").unwrap(), ["bark is required"]);
}

/// Variant keys written in mixed case in a rule file still match.
#[test]
fn test_discriminator_mixed_case_variant_key_from_json() {
    let rules = RuleSet::from_value(json!({
        "pet": {
            "type": "object",
            "required": true,
            "properties": { "kind": { "type": "string", "required": true, "name": "kind" } },
            "inheritance": {
                "discriminator": "kind",
                "properties": {
                    "Dog": { "bark": { "type": "boolean", "required": true, "name": "bark" } }
                }
            }
        }
    }))
    .unwrap();
    let mut validator = Validator::new();
    let valid = validator
        .is_valid(&rules, &json!({ "pet": { "kind": "Dog" } }))
        .unwrap();

    assert!(!valid);
    assert_eq!(validator.errors().get("pet.bark").unwrap(), ["bark is required"]);
}

/// Unknown variants add no properties.
#[test]
fn test_discriminator_unknown_variant() {
    let mut validator = Validator::new();
    assert!(validator
        .is_valid(&pet_rules(), &json!({ "pet": { "kind": "cat" } }))
        .unwrap());
}

/// A missing discriminator is reported by the base rule only.
#[test]
fn test_discriminator_missing_value() {
    let mut validator = Validator::new();
    validator.is_valid(&pet_rules(), &json!({ "pet": {} })).unwrap();
    assert_eq!(validator.errors().len(), 1);
    assert_eq!(validator.errors().get("pet.kind").unwrap(), ["kind is required"]);
}

/// The rule tree is unchanged after a merge.
#[test]
fn test_discriminator_does_not_mutate_rules() {
    let rules = pet_rules();
    let before = rules.clone();
    let mut validator = Validator::new();
    validator
        .is_valid(&rules, &json!({ "pet": { "kind": "dog", "bark": false } }))
        .unwrap();

    assert_eq!(rules, before);
    assert!(!rules.get("pet").unwrap().properties.as_ref().unwrap().contains_key("bark"));
}

// =============================================================================
// Attribute-Style Data
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Person {
    name: String,
    age: u32,
    nick_names: Vec<String>,
}

/// Serializable structs validate like the equivalent JSON record.
#[test]
fn test_struct_data() {
    let mut validator = Validator::new();
    let person = Person {
        name: "Ada".into(),
        age: 36,
        nick_names: vec!["".into()],
    };

    assert!(!validator.is_valid_serialize(&person_rules(), &person).unwrap());
    assert_eq!(validator.errors().paths().collect::<Vec<_>>(), ["nickNames"]);
}
