//! Common test utilities for veld-config integration tests

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::path::PathBuf;

use veld_config::{Schema, Scope, Setting, Value, ValueKind};

/// Initialize test logging; safe to call from every test
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Schema mirroring a small service configuration, exercising literal,
/// factory, unset, constructor, and nested-scope declarations.
pub fn service_schema() -> Schema {
    let limits = Schema::builder()
        .setting(Setting::with_default("max_depth", Value::Int(32)))
        .setting(Setting::with_default("strict", Value::Bool(false)))
        .build()
        .unwrap();

    Schema::builder()
        .setting(Setting::with_default("name", Value::str("service")))
        .setting(Setting::new("locale").kind(ValueKind::Str))
        .setting(
            Setting::with_factory("search_paths", || {
                Value::Paths(BTreeSet::from([PathBuf::from("config/defaults.yml")]))
            })
            .kind(ValueKind::Paths),
        )
        .setting(
            Setting::new("token")
                .kind(ValueKind::Str)
                .constructor(|value| match value {
                    Value::Str(s) => Value::Str(s.trim().to_string()),
                    other => other,
                }),
        )
        .scope("limits", limits)
        .build()
        .unwrap()
}

/// A fresh scope realized from [`service_schema`]
pub fn service_scope() -> Scope {
    Scope::new(service_schema())
}

/// Collect the paths stored in a `Paths` value as displayable strings
pub fn path_strings(value: &Value) -> Vec<String> {
    value
        .as_paths()
        .map(|paths| paths.iter().map(|p| p.display().to_string()).collect())
        .unwrap_or_default()
}
