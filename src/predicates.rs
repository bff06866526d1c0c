//! Predicate registry handle
//!
//! Configuration references the active predicate set as an opaque handle; the
//! predicates themselves are evaluated elsewhere in the toolkit. The handle
//! compares structurally so that two independently constructed registries with
//! the same predicate set are equal.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// Predicate names registered out of the box.
const STANDARD_PREDICATES: &[&str] = &[
    "array",
    "bool",
    "date",
    "date_time",
    "decimal",
    "empty",
    "eql",
    "excludes",
    "filled",
    "float",
    "format",
    "gt",
    "gteq",
    "included_in",
    "includes",
    "int",
    "key",
    "lt",
    "lteq",
    "map",
    "max_size",
    "min_size",
    "nil",
    "size",
    "str",
    "time",
    "uuid",
];

/// Handle to the predicate set used during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PredicateRegistry {
    names: BTreeSet<String>,
}

impl PredicateRegistry {
    /// Create a registry carrying the standard predicate set
    #[must_use]
    pub fn new() -> Self {
        Self {
            names: STANDARD_PREDICATES.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Create a registry with no predicates registered
    #[must_use]
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Register an additional predicate name
    ///
    /// Returns `false` if the name was already registered.
    pub fn register(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Check whether a predicate name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Iterate over registered predicate names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of registered predicates
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check whether no predicates are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for PredicateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PredicateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "predicates[{}]", self.names.len())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_registries_are_equal() {
        assert_eq!(PredicateRegistry::new(), PredicateRegistry::new());
    }

    #[test]
    fn test_register_diverges() {
        let mut a = PredicateRegistry::new();
        let b = PredicateRegistry::new();

        assert!(a.register("credit_card"));
        assert!(a.contains("credit_card"));
        assert!(!b.contains("credit_card"));
        assert_ne!(a, b);

        // Registering the same name twice is a no-op
        assert!(!a.register("credit_card"));
    }

    #[test]
    fn test_standard_set_is_present() {
        let registry = PredicateRegistry::new();
        assert!(registry.contains("filled"));
        assert!(registry.contains("key"));
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_serializes_as_sorted_list() {
        let mut registry = PredicateRegistry::empty();
        registry.register("str");
        registry.register("int");

        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json, serde_json::json!(["int", "str"]));
    }
}
