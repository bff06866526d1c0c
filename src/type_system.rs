//! Type-system handle
//!
//! Coercions run against a type system owned by the wider toolkit; the
//! configuration only carries a handle naming which one to use.

use std::fmt;

use serde::Serialize;

/// Name of the toolkit-wide default type system.
const SHARED_TYPE_SYSTEM: &str = "standard";

/// Handle to the type system used for coercions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeSystem {
    name: String,
}

impl TypeSystem {
    /// The toolkit-wide shared type system
    #[must_use]
    pub fn shared() -> Self {
        Self {
            name: SHARED_TYPE_SYSTEM.into(),
        }
    }

    /// Handle to a specific named type system
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name of the referenced type system
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for TypeSystem {
    fn default() -> Self {
        Self::shared()
    }
}

impl fmt::Display for TypeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
