//! # veld-config
//!
//! Hierarchical configuration container for the Veld schema-validation
//! toolkit: declared settings with typed defaults, nested sub-scopes,
//! structural equality, and transparent delegation to the underlying
//! settings store.
//!
//! ## Features
//!
//! - **Declared Settings**: An explicit, ordered schema of settings with
//!   literal or factory defaults and optional value constructors
//! - **Nested Scopes**: Settings that are themselves full configuration
//!   scopes, addressable with dotted paths (`"messages.backend"`)
//! - **Instance Isolation**: Factory defaults are realized per instance, so
//!   mutable defaults are never shared between configurations
//! - **Structural Equality**: Configurations compare by their realized
//!   settings tree, never by identity
//! - **Delegation**: Operations the container does not define are forwarded
//!   to the underlying store; capability checks cover both tiers
//! - **Finalization**: A configuration can be frozen once definition ends
//!
//! ## Quick Start
//!
//! ```rust
//! use veld_config::{Config, Value};
//!
//! let mut config = Config::new();
//!
//! // Declared defaults are readable immediately
//! assert!(!config.validate_keys());
//! assert_eq!(config.get("messages.backend")?, &Value::tag("yaml"));
//!
//! // Settings are written by name, at any nesting depth
//! config.set_validate_keys(true)?;
//! config.set("messages.namespace", Value::str("user"))?;
//!
//! // Freeze once schema definition is over
//! config.finalize();
//! assert!(config.set("validate_keys", Value::Bool(false)).is_err());
//! # Ok::<(), veld_config::Error>(())
//! ```
//!
//! ## Declaring Custom Scopes
//!
//! The same machinery is available for arbitrary settings trees:
//!
//! ```rust
//! use veld_config::{Schema, Scope, Setting, Value, ValueKind};
//!
//! let schema = Schema::builder()
//!     .setting(Setting::with_default("retries", Value::Int(3)))
//!     .setting(Setting::new("token").kind(ValueKind::Str))
//!     .build()?;
//!
//! let mut scope = Scope::new(schema);
//! scope.set("retries", Value::Int(5))?;
//! assert_eq!(scope.get("retries")?, &Value::Int(5));
//! # Ok::<(), veld_config::Error>(())
//! ```
//!
//! ## Dynamic Dispatch
//!
//! Operations can be invoked by name; unrecognized ones are forwarded to
//! the settings store when it supports them:
//!
//! ```rust
//! use veld_config::{Config, Value};
//!
//! let mut config = Config::new();
//! assert!(config.responds_to("keys"));
//!
//! let keys = config.invoke("keys", &[])?;
//! assert_eq!(keys.as_list().map(|names| names.len()), Some(4));
//! # Ok::<(), veld_config::Error>(())
//! ```

// Core modules
mod config;
mod error;
mod predicates;
mod schema;
mod scope;
mod store;
mod type_system;
mod value;

// Re-exports from core
pub use config::{Config, DEFAULT_MESSAGES_PATH, DEFAULT_MESSAGES_ROOT};
pub use error::{Error, Result};
pub use predicates::PredicateRegistry;
pub use schema::{Constructor, DefaultValue, Schema, SchemaBuilder, Setting};
pub use scope::Scope;
pub use store::Store;
pub use type_system::TypeSystem;
pub use value::{Value, ValueKind};
