//! Edge Case Integration Tests
//!
//! Misuse scenarios: unknown names at every depth, eager type checks,
//! whole-scope replacement, clearing, and writes after finalization.

mod common;

use common::{service_schema, service_scope};
use veld_config::{Config, Error, Schema, Scope, Setting, Value, ValueKind};

// =============================================================================
// Unknown Names
// =============================================================================

#[test]
fn test_unknown_top_level_setting() {
    let config = Config::new();

    let err = config.get("verbosity").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err, Error::SettingNotFound("verbosity".into()));
}

#[test]
fn test_unknown_nested_setting() {
    let config = Config::new();

    let err = config.get("messages.verbosity").unwrap_err();
    assert!(err.is_not_found());

    let err = config.get("missing.backend").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_unknown_setting_on_write() {
    let mut config = Config::new();
    let err = config.set("verbosity", Value::Int(3)).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_path_through_flat_setting() {
    let config = Config::new();

    let err = config.get("validate_keys.inner").unwrap_err();
    assert_eq!(err, Error::NotAScope("validate_keys".into()));
}

// =============================================================================
// Eager Type Checks
// =============================================================================

#[test]
fn test_type_mismatch_is_raised_at_write_time() {
    let mut config = Config::new();

    let err = config.set("validate_keys", Value::str("yes")).unwrap_err();
    assert_eq!(
        err,
        Error::TypeMismatch {
            key: "validate_keys".into(),
            expected: "bool".into(),
            actual: "string".into(),
        }
    );

    // The failed write left the old value in place
    assert!(!config.validate_keys());
}

#[test]
fn test_nested_type_mismatch() {
    let mut config = Config::new();

    let err = config.set("messages.namespace", Value::Int(1)).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
    assert_eq!(config.get("messages.namespace").unwrap(), &Value::Unset);
}

#[test]
fn test_unset_clears_a_setting() {
    let mut config = Config::new();

    config.set("messages.namespace", Value::str("user")).unwrap();
    config.set("messages.namespace", Value::Unset).unwrap();
    assert_eq!(config.get("messages.namespace").unwrap(), &Value::Unset);
}

// =============================================================================
// Whole-Scope Replacement
// =============================================================================

#[test]
fn test_conforming_scope_replacement() {
    let mut target = Config::new();

    let mut donor = Config::new();
    donor.set("messages.backend", Value::tag("json")).unwrap();
    let replacement = donor.messages().unwrap().clone();

    target.set("messages", Value::Scope(replacement)).unwrap();
    assert_eq!(target.get("messages.backend").unwrap(), &Value::tag("json"));
}

#[test]
fn test_mismatched_scope_replacement_is_rejected() {
    let mut config = Config::new();

    let wrong_shape = Scope::new(
        Schema::builder()
            .setting(Setting::with_default("backend", Value::tag("yaml")))
            .build()
            .unwrap(),
    );

    let err = config.set("messages", Value::Scope(wrong_shape)).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));

    // Declared sub-scope is untouched
    assert_eq!(
        config.messages().unwrap().store().len(),
        5,
    );
}

#[test]
fn test_flat_value_cannot_replace_a_scope() {
    let mut config = Config::new();
    let err = config.set("messages", Value::Bool(true)).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

// =============================================================================
// Constructors
// =============================================================================

#[test]
fn test_constructor_transform_is_observable() {
    let mut scope = service_scope();

    scope.set("token", Value::str("  abc123  ")).unwrap();
    assert_eq!(scope.get("token").unwrap(), &Value::str("abc123"));
}

#[test]
fn test_constructor_output_still_kind_checked() {
    let mut scope = service_scope();

    // The trim constructor passes non-strings through, so the declared kind
    // still rejects them.
    let err = scope.set("token", Value::Int(42)).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

// =============================================================================
// Finalization
// =============================================================================

#[test]
fn test_finalized_scope_rejects_all_mutation_paths() {
    let mut scope = service_scope();
    scope.finalize();

    assert_eq!(
        scope.set("name", Value::str("other")).unwrap_err(),
        Error::Finalized
    );
    assert_eq!(scope.get_mut("search_paths").unwrap_err(), Error::Finalized);
    assert_eq!(scope.reset("name").unwrap_err(), Error::Finalized);
    assert_eq!(scope.reset_all().unwrap_err(), Error::Finalized);
}

#[test]
fn test_finalization_reaches_nested_scopes() {
    let mut scope = service_scope();
    scope.finalize();

    assert_eq!(
        scope.set("limits.strict", Value::Bool(true)).unwrap_err(),
        Error::Finalized
    );
    assert!(scope.scope("limits").unwrap().is_finalized());
}

#[test]
fn test_finalize_is_idempotent() {
    let mut scope = service_scope();
    scope.finalize();
    scope.finalize();
    assert!(scope.is_finalized());
}

// =============================================================================
// Schema Sharing
// =============================================================================

#[test]
fn test_scopes_from_equal_schemas_compare_equal() {
    assert_eq!(Scope::new(service_schema()), Scope::new(service_schema()));
}

#[test]
fn test_duplicate_declaration_is_rejected() {
    let result = Schema::builder()
        .setting(Setting::new("name"))
        .setting(Setting::with_default("name", Value::Bool(true)))
        .build();

    assert_eq!(result.unwrap_err(), Error::DuplicateSetting("name".into()));
}

#[test]
fn test_declared_kind_applies_to_unset_defaults() {
    let schema = Schema::builder()
        .setting(Setting::new("locale").kind(ValueKind::Str))
        .build()
        .unwrap();
    let mut scope = Scope::new(schema);

    assert_eq!(scope.get("locale").unwrap(), &Value::Unset);
    scope.set("locale", Value::str("en")).unwrap();
    let err = scope.set("locale", Value::Bool(true)).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}
