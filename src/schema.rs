//! Settings schema: ordered setting descriptors declared once per container type
//!
//! A [`Schema`] is the explicit declaration of which settings a scope carries:
//! an ordered list of [`Setting`] descriptors, where a descriptor may itself
//! reference a nested schema for a sub-scope. Schemas are built once per
//! container type and shared across instances; every instance realizes its
//! own storage from the shared declaration.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::scope::Scope;
use crate::value::{Value, ValueKind};

/// Transform applied to any assigned value before storage
pub type Constructor = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Declared default of a setting
#[derive(Clone)]
pub enum DefaultValue {
    /// No default; the setting reads as [`Value::Unset`] until assigned
    Unset,
    /// Literal default, cloned once per instance
    Literal(Value),
    /// Factory invoked once per instance, so mutable defaults are never
    /// shared between instances
    Factory(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Unset => f.write_str("Unset"),
            DefaultValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            DefaultValue::Factory(_) => f.write_str("Factory(Fn)"),
        }
    }
}

/// A single declared setting
#[derive(Clone)]
pub struct Setting {
    /// Setting name, unique within its scope
    pub name: String,

    /// Declared default, realized once per container instance
    pub default: DefaultValue,

    /// Transform applied to assigned values before storage
    pub constructor: Option<Constructor>,

    /// Expected value kind, enforced when a value is assigned
    pub kind: Option<ValueKind>,

    /// Schema of the sub-scope when this setting is a nested scope
    pub nested: Option<Arc<Schema>>,
}

impl fmt::Debug for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("name", &self.name)
            .field("default", &self.default)
            .field("constructor", &self.constructor.as_ref().map(|_| "Some(Fn)"))
            .field("kind", &self.kind)
            .field("nested", &self.nested)
            .finish()
    }
}

impl Setting {
    /// Declare a setting with no default
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: DefaultValue::Unset,
            constructor: None,
            kind: None,
            nested: None,
        }
    }

    /// Declare a setting with a literal default
    ///
    /// The expected kind is inferred from the default value.
    pub fn with_default(name: impl Into<String>, default: Value) -> Self {
        Self {
            kind: default.kind(),
            default: DefaultValue::Literal(default),
            ..Self::new(name)
        }
    }

    /// Declare a setting whose default is produced by a factory
    ///
    /// The factory runs once per container instance. Pair with
    /// [`Setting::kind`] when assignments should be kind-checked.
    pub fn with_factory<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self {
            default: DefaultValue::Factory(Arc::new(factory)),
            ..Self::new(name)
        }
    }

    /// Declare a nested sub-scope setting
    pub fn nested(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            kind: Some(ValueKind::Scope),
            nested: Some(Arc::new(schema)),
            ..Self::new(name)
        }
    }

    /// Set the expected value kind, enforced on assignment
    #[must_use]
    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the constructor transform applied to assigned values
    #[must_use]
    pub fn constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(constructor));
        self
    }

    /// Realize this setting's default value for a fresh container instance
    pub(crate) fn realize_default(&self) -> Value {
        if let Some(nested) = &self.nested {
            return Value::Scope(Scope::new(Arc::clone(nested)));
        }
        match &self.default {
            DefaultValue::Unset => Value::Unset,
            DefaultValue::Literal(value) => value.clone(),
            DefaultValue::Factory(factory) => factory(),
        }
    }
}

/// Ordered settings declaration for one container type
#[derive(Debug, Clone, Default)]
pub struct Schema {
    settings: Vec<Setting>,
}

impl Schema {
    /// Create a new builder for a schema
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Declared settings in declaration order
    #[must_use]
    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    /// Position of a setting by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.settings.iter().position(|s| s.name == name)
    }

    /// Look up a setting descriptor by name
    pub fn get(&self, name: &str) -> Option<&Setting> {
        self.settings.iter().find(|s| s.name == name)
    }

    /// Number of declared settings
    #[must_use]
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    /// Check whether no settings are declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Declared setting names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.settings.iter().map(|s| s.name.as_str())
    }

    /// Check whether another schema declares the same shape: same names in
    /// the same order with the same kinds, nested schemas matching
    /// recursively. Used to validate whole-scope replacement writes.
    #[must_use]
    pub fn same_shape(&self, other: &Schema) -> bool {
        self.settings.len() == other.settings.len()
            && self
                .settings
                .iter()
                .zip(&other.settings)
                .all(|(a, b)| {
                    a.name == b.name
                        && a.kind == b.kind
                        && match (&a.nested, &b.nested) {
                            (None, None) => true,
                            (Some(x), Some(y)) => x.same_shape(y),
                            _ => false,
                        }
                })
    }
}

/// Builder for declaring a [`Schema`] with a fluent API
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    settings: Vec<Setting>,
}

impl SchemaBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: Vec::new(),
        }
    }

    /// Declare a setting
    #[must_use]
    pub fn setting(mut self, setting: Setting) -> Self {
        self.settings.push(setting);
        self
    }

    /// Declare a nested sub-scope
    #[must_use]
    pub fn scope(self, name: impl Into<String>, schema: Schema) -> Self {
        self.setting(Setting::nested(name, schema))
    }

    /// Build the schema
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateSetting`] if two settings share a name.
    pub fn build(self) -> Result<Schema> {
        for (i, setting) in self.settings.iter().enumerate() {
            if self.settings[..i].iter().any(|s| s.name == setting.name) {
                return Err(Error::DuplicateSetting(setting.name.clone()));
            }
        }
        Ok(Schema {
            settings: self.settings,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
