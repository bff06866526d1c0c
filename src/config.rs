//! Top-level configuration for schema definition
//!
//! [`Config`] carries the tunable settings consulted while schemas are
//! defined and validated: the active predicate registry, the type system
//! used for coercions, the message-catalog settings, and the key-validation
//! switch. It is a thin, typed front over a [`Scope`] realized from one
//! statically declared schema; any operation the config does not define
//! itself is delegated to that scope (and from there to the underlying
//! settings store).

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use serde::ser::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::predicates::PredicateRegistry;
use crate::schema::{Schema, Setting};
use crate::scope::Scope;
use crate::type_system::TypeSystem;
use crate::value::{Value, ValueKind};

/// Default message-catalog file consulted when no load path is configured.
pub const DEFAULT_MESSAGES_PATH: &str = "config/errors.yml";

/// Root namespace under which message catalogs are keyed.
pub const DEFAULT_MESSAGES_ROOT: &str = "veld";

/// Schema-definition configuration
///
/// # Example
///
/// ```rust
/// use veld_config::{Config, Value};
///
/// let mut config = Config::new();
/// assert!(!config.validate_keys());
/// assert_eq!(config.get("messages.backend")?, &Value::tag("yaml"));
///
/// config.set_validate_keys(true)?;
/// config.set("messages.namespace", Value::str("user"))?;
/// # Ok::<(), veld_config::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    settings: Scope,
}

impl Config {
    /// Create a configuration seeded with the declared defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: Scope::new(declared_schema()),
        }
    }

    /// The underlying settings scope
    #[must_use]
    pub fn settings(&self) -> &Scope {
        &self.settings
    }

    /// Mutable access to the underlying settings scope
    pub fn settings_mut(&mut self) -> &mut Scope {
        &mut self.settings
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    /// The configured predicate registry
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the setting was cleared or holds a
    /// non-registry value.
    pub fn predicates(&self) -> Result<&PredicateRegistry> {
        match self.settings.get("predicates")? {
            Value::Registry(registry) => Ok(registry),
            other => Err(type_mismatch("predicates", "registry", other)),
        }
    }

    /// Mutable access to the configured predicate registry
    pub fn predicates_mut(&mut self) -> Result<&mut PredicateRegistry> {
        match self.settings.get_mut("predicates")? {
            Value::Registry(registry) => Ok(registry),
            other => Err(type_mismatch("predicates", "registry", other)),
        }
    }

    /// The configured type-system handle
    pub fn types(&self) -> Result<&TypeSystem> {
        match self.settings.get("types")? {
            Value::Types(types) => Ok(types),
            other => Err(type_mismatch("types", "types", other)),
        }
    }

    /// The message-backend sub-scope
    pub fn messages(&self) -> Result<&Scope> {
        self.settings.scope("messages")
    }

    /// Mutable access to the message-backend sub-scope
    pub fn messages_mut(&mut self) -> Result<&mut Scope> {
        self.settings.scope_mut("messages")
    }

    /// Whether key-presence validation is enabled
    #[must_use]
    pub fn validate_keys(&self) -> bool {
        matches!(self.settings.get("validate_keys"), Ok(Value::Bool(true)))
    }

    /// Switch key-presence validation on or off
    pub fn set_validate_keys(&mut self, enabled: bool) -> Result<()> {
        self.settings.set("validate_keys", Value::Bool(enabled))
    }

    // =========================================================================
    // Delegation to the settings scope
    // =========================================================================

    /// Read a setting by name or dotted path
    pub fn get(&self, path: &str) -> Result<&Value> {
        self.settings.get(path)
    }

    /// Mutably access a setting by name or dotted path
    pub fn get_mut(&mut self, path: &str) -> Result<&mut Value> {
        self.settings.get_mut(path)
    }

    /// Assign a setting by name or dotted path
    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        self.settings.set(path, value)
    }

    /// Re-realize a setting's declared default and return it
    pub fn reset(&mut self, path: &str) -> Result<Value> {
        self.settings.reset(path)
    }

    /// Mark the configuration read-only
    pub fn finalize(&mut self) {
        self.settings.finalize();
    }

    /// Whether [`Config::finalize`] has been called
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.settings.is_finalized()
    }

    /// Check whether an operation can be resolved dynamically
    pub fn responds_to(&self, op: &str) -> bool {
        self.settings.responds_to(op)
    }

    /// Invoke an operation by name, delegating unrecognized operations to
    /// the settings scope and from there to the underlying store
    pub fn invoke(&mut self, op: &str, args: &[Value]) -> Result<Value> {
        self.settings.invoke(op, args)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        self.settings == other.settings
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Config")?;
        self.settings.fmt_entries(f)
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.settings.serialize(serializer)
    }
}

fn type_mismatch(key: &str, expected: &str, actual: &Value) -> Error {
    Error::TypeMismatch {
        key: key.to_string(),
        expected: expected.to_string(),
        actual: actual.kind_name().to_string(),
    }
}

/// The declared settings schema, built once and shared by every instance
fn declared_schema() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    Arc::clone(SCHEMA.get_or_init(|| Arc::new(build_schema())))
}

fn build_schema() -> Schema {
    let messages = Schema::builder()
        .setting(Setting::with_default("backend", Value::tag("yaml")))
        .setting(Setting::new("namespace").kind(ValueKind::Str))
        .setting(
            Setting::with_factory("load_paths", || {
                Value::Paths(BTreeSet::from([PathBuf::from(DEFAULT_MESSAGES_PATH)]))
            })
            .kind(ValueKind::Paths)
            .constructor(normalize_load_paths),
        )
        .setting(Setting::with_default(
            "top_namespace",
            Value::str(DEFAULT_MESSAGES_ROOT),
        ))
        .setting(Setting::new("default_locale").kind(ValueKind::Str))
        .build()
        .expect("message settings are uniquely named");

    Schema::builder()
        .setting(
            Setting::with_factory("predicates", || Value::Registry(PredicateRegistry::new()))
                .kind(ValueKind::Registry),
        )
        .setting(Setting::with_default(
            "types",
            Value::Types(TypeSystem::shared()),
        ))
        .scope("messages", messages)
        .setting(Setting::with_default("validate_keys", Value::Bool(false)))
        .build()
        .expect("top-level settings are uniquely named")
}

/// Accept a plain string list where a path set is expected, copying it into
/// a fresh set so callers never share a collection with the configuration.
fn normalize_load_paths(value: Value) -> Value {
    match value {
        Value::List(items) if items.iter().all(|item| matches!(item, Value::Str(_))) => {
            Value::Paths(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Str(path) => Some(PathBuf::from(path)),
                        _ => None,
                    })
                    .collect(),
            )
        }
        other => other,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_declared_defaults() {
        let config = Config::new();

        assert!(!config.validate_keys());
        assert_eq!(config.types().unwrap(), &TypeSystem::shared());
        assert_eq!(config.predicates().unwrap(), &PredicateRegistry::new());
        assert_eq!(config.get("messages.backend").unwrap(), &Value::tag("yaml"));
        assert_eq!(config.get("messages.namespace").unwrap(), &Value::Unset);
        assert_eq!(
            config.get("messages.top_namespace").unwrap(),
            &Value::str(DEFAULT_MESSAGES_ROOT)
        );
        assert_eq!(config.get("messages.default_locale").unwrap(), &Value::Unset);

        let paths = config.get("messages.load_paths").unwrap().as_paths().unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths.contains(Path::new(DEFAULT_MESSAGES_PATH)));
    }

    #[test]
    fn test_typed_setters() {
        let mut config = Config::new();

        config.set_validate_keys(true).unwrap();
        assert!(config.validate_keys());

        config.predicates_mut().unwrap().register("credit_card");
        assert!(config.predicates().unwrap().contains("credit_card"));
    }

    #[test]
    fn test_messages_scope_access() {
        let mut config = Config::new();

        config
            .messages_mut()
            .unwrap()
            .set("backend", Value::tag("json"))
            .unwrap();
        assert_eq!(
            config.messages().unwrap().get("backend").unwrap(),
            &Value::tag("json")
        );
    }

    #[test]
    fn test_load_paths_constructor_accepts_string_lists() {
        let mut config = Config::new();

        config
            .set(
                "messages.load_paths",
                Value::List(vec![Value::str("a.yml"), Value::str("b.yml")]),
            )
            .unwrap();

        let paths = config.get("messages.load_paths").unwrap().as_paths().unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.contains(Path::new("a.yml")));
    }

    #[test]
    fn test_display_is_deterministic() {
        let config = Config::new();
        let printed = config.to_string();
        assert!(printed.starts_with("Config(predicates=predicates["));
        assert!(printed.contains("types=standard"));
        assert!(printed.contains("backend=yaml"));
        assert!(printed.ends_with("validate_keys=false)"));
        assert_eq!(printed, Config::new().to_string());
    }

    #[test]
    fn test_serialize_snapshot() {
        let config = Config::new();
        let snapshot = serde_json::to_value(&config).unwrap();

        assert_eq!(snapshot["validate_keys"], serde_json::json!(false));
        assert_eq!(snapshot["types"], serde_json::json!("standard"));
        assert_eq!(snapshot["messages"]["backend"], serde_json::json!("yaml"));
        assert_eq!(
            snapshot["messages"]["load_paths"],
            serde_json::json!([DEFAULT_MESSAGES_PATH])
        );
    }
}
