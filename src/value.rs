//! Dynamic value representation for configuration settings
//!
//! Settings hold values of different shapes: switches, symbolic strategy
//! tags, path sets, collaborator handles, and whole nested scopes. `Value`
//! is the common currency flowing through declaration, storage, and the
//! dynamic dispatch surface.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::ser::{Serialize, Serializer};

use crate::predicates::PredicateRegistry;
use crate::scope::Scope;
use crate::type_system::TypeSystem;

/// A single configuration value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value assigned and no default declared
    Unset,
    /// Boolean switch
    Bool(bool),
    /// Integer count or size
    Int(i64),
    /// Plain string
    Str(String),
    /// Symbolic tag selecting a strategy (e.g. the message backend)
    Tag(String),
    /// Ordered set of filesystem paths
    Paths(BTreeSet<PathBuf>),
    /// Ordered list of values
    List(Vec<Value>),
    /// Predicate-registry handle
    Registry(PredicateRegistry),
    /// Type-system handle
    Types(TypeSystem),
    /// Nested configuration scope
    Scope(Scope),
}

/// Shape of a [`Value`], used for declared-kind checks on assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Str,
    Tag,
    Paths,
    List,
    Registry,
    Types,
    Scope,
}

impl ValueKind {
    /// Human-readable kind name used in error messages
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Str => "string",
            ValueKind::Tag => "tag",
            ValueKind::Paths => "paths",
            ValueKind::List => "list",
            ValueKind::Registry => "registry",
            ValueKind::Types => "types",
            ValueKind::Scope => "scope",
        }
    }
}

impl Value {
    /// Shorthand for a string value
    pub fn str(value: impl Into<String>) -> Self {
        Value::Str(value.into())
    }

    /// Shorthand for a symbolic tag
    pub fn tag(value: impl Into<String>) -> Self {
        Value::Tag(value.into())
    }

    /// The kind of this value; `None` for [`Value::Unset`]
    #[must_use]
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::Unset => None,
            Value::Bool(_) => Some(ValueKind::Bool),
            Value::Int(_) => Some(ValueKind::Int),
            Value::Str(_) => Some(ValueKind::Str),
            Value::Tag(_) => Some(ValueKind::Tag),
            Value::Paths(_) => Some(ValueKind::Paths),
            Value::List(_) => Some(ValueKind::List),
            Value::Registry(_) => Some(ValueKind::Registry),
            Value::Types(_) => Some(ValueKind::Types),
            Value::Scope(_) => Some(ValueKind::Scope),
        }
    }

    /// Kind name for error messages ("unset" when no value is assigned)
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        self.kind().map_or("unset", ValueKind::name)
    }

    /// Check whether this value is unset
    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Value::Unset)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<&str> {
        match self {
            Value::Tag(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_paths(&self) -> Option<&BTreeSet<PathBuf>> {
        match self {
            Value::Paths(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_paths_mut(&mut self) -> Option<&mut BTreeSet<PathBuf>> {
        match self {
            Value::Paths(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_registry(&self) -> Option<&PredicateRegistry> {
        match self {
            Value::Registry(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_types(&self) -> Option<&TypeSystem> {
        match self {
            Value::Types(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_scope(&self) -> Option<&Scope> {
        match self {
            Value::Scope(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_scope_mut(&mut self) -> Option<&mut Scope> {
        match self {
            Value::Scope(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unset => f.write_str("unset"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Tag(t) => f.write_str(t),
            Value::Paths(paths) => {
                f.write_str("{")?;
                for (i, path) in paths.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{path:?}")?;
                }
                f.write_str("}")
            }
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Registry(registry) => write!(f, "{registry}"),
            Value::Types(types) => write!(f, "{types}"),
            Value::Scope(scope) => write!(f, "{scope}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Unset => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Str(s) | Value::Tag(s) => serializer.serialize_str(s),
            Value::Paths(paths) => serializer.collect_seq(paths.iter()),
            Value::List(items) => serializer.collect_seq(items.iter()),
            Value::Registry(registry) => registry.serialize(serializer),
            Value::Types(types) => types.serialize(serializer),
            Value::Scope(scope) => scope.serialize(serializer),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Value::Unset.kind(), None);
        assert_eq!(Value::Bool(true).kind(), Some(ValueKind::Bool));
        assert_eq!(Value::tag("yaml").kind(), Some(ValueKind::Tag));
        assert_eq!(Value::str("yaml").kind(), Some(ValueKind::Str));
        assert_eq!(Value::Unset.kind_name(), "unset");
        assert_eq!(Value::Int(1).kind_name(), "int");
    }

    #[test]
    fn test_tag_and_str_are_distinct() {
        assert_ne!(Value::tag("yaml"), Value::str("yaml"));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert_eq!(Value::str("x").as_str(), Some("x"));
        assert_eq!(Value::str("x").as_tag(), None);
        assert_eq!(Value::tag("yaml").as_tag(), Some("yaml"));
        assert!(Value::Unset.is_unset());

        let registry = Value::Registry(crate::predicates::PredicateRegistry::new());
        assert!(registry.as_registry().is_some_and(|r| r.contains("filled")));

        let types = Value::Types(crate::type_system::TypeSystem::shared());
        assert_eq!(types.as_types().map(|t| t.name()), Some("standard"));

        let mut paths = Value::Paths(BTreeSet::new());
        paths.as_paths_mut().unwrap().insert(PathBuf::from("/a"));
        assert_eq!(paths.as_paths().unwrap().len(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Unset.to_string(), "unset");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::tag("yaml").to_string(), "yaml");
        assert_eq!(Value::str("api").to_string(), "\"api\"");

        let list = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(list.to_string(), "[1, 2]");
    }

    #[test]
    fn test_serialize() {
        let paths = Value::Paths(BTreeSet::from([PathBuf::from("b"), PathBuf::from("a")]));
        assert_eq!(serde_json::to_value(&paths).unwrap(), json!(["a", "b"]));
        assert_eq!(serde_json::to_value(Value::Unset).unwrap(), json!(null));
        assert_eq!(serde_json::to_value(Value::tag("yaml")).unwrap(), json!("yaml"));
    }
}
