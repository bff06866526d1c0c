//! Generic settings container with nested scopes and delegation
//!
//! A [`Scope`] realizes one storage slot per setting declared in its schema
//! and answers reads and writes by name, including dotted paths into nested
//! sub-scopes (`"messages.backend"`). Operations the scope does not define
//! itself are forwarded to the underlying [`Store`], so the scope behaves as
//! a superset of the store's contract.
//!
//! Equality compares the fully realized settings tree, never identity:
//! two scopes are equal when every slot (nested scopes included) holds an
//! equal value, regardless of how those values were populated.

use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::ser::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::schema::Schema;
use crate::store::{expect_arity, str_arg, Store};
use crate::value::{Value, ValueKind};

/// Operations the scope resolves natively in [`Scope::invoke`]. Anything
/// else is forwarded to the store when the store supports it.
const SCOPE_OPS: &[&str] = &[
    "get",
    "set",
    "scope",
    "reset",
    "reset_all",
    "finalize",
    "inspect",
];

/// A configuration scope: named settings realized from a shared schema
#[derive(Debug, Clone)]
pub struct Scope {
    schema: Arc<Schema>,
    store: Store,
    finalized: bool,
}

impl Scope {
    /// Realize a fresh scope from a schema
    ///
    /// Literal defaults are cloned, factory defaults invoked, and nested
    /// schemas realized as fresh sub-scopes, so no two instances share
    /// mutable state.
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        let schema = schema.into();
        let store = Store::realize(&schema);
        Self {
            schema,
            store,
            finalized: false,
        }
    }

    /// The schema this scope was realized from
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The underlying settings store
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Whether [`Scope::finalize`] has been called
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Stored (name, value) pairs in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.store.entries()
    }

    /// Read a setting by name or dotted path
    ///
    /// # Errors
    ///
    /// Returns [`Error::SettingNotFound`] when any path segment is
    /// undeclared, and [`Error::NotAScope`] when the path descends through a
    /// flat setting.
    pub fn get(&self, path: &str) -> Result<&Value> {
        let (scope, name) = self.resolve(path)?;
        let index = scope
            .schema
            .index_of(name)
            .ok_or_else(|| Error::SettingNotFound(path.to_string()))?;
        Ok(scope.store.value(index))
    }

    /// Mutably access a setting by name or dotted path
    ///
    /// In-place mutation does not run the setting's constructor; that only
    /// applies to assignments via [`Scope::set`].
    ///
    /// # Errors
    ///
    /// As [`Scope::get`], plus [`Error::Finalized`] once the owning scope is
    /// finalized.
    pub fn get_mut(&mut self, path: &str) -> Result<&mut Value> {
        let full = path.to_string();
        let (scope, name) = self.resolve_mut(path)?;
        if scope.finalized {
            return Err(Error::Finalized);
        }
        let index = scope
            .schema
            .index_of(name)
            .ok_or(Error::SettingNotFound(full))?;
        Ok(scope.store.value_mut(index))
    }

    /// Assign a setting by name or dotted path
    ///
    /// The declared constructor (if any) transforms the value first; the
    /// result is then checked eagerly against the declared kind.
    /// [`Value::Unset`] is always accepted and clears the setting. Assigning
    /// a whole replacement scope requires the replacement's schema to have
    /// the same shape as the declared sub-scope.
    ///
    /// # Errors
    ///
    /// [`Error::SettingNotFound`], [`Error::NotAScope`],
    /// [`Error::TypeMismatch`], or [`Error::Finalized`].
    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        let full = path.to_string();
        let (scope, name) = self.resolve_mut(path)?;
        scope.assign(name, value, &full)
    }

    /// Access a nested sub-scope by name
    ///
    /// # Errors
    ///
    /// [`Error::SettingNotFound`] for an undeclared name, [`Error::NotAScope`]
    /// for a flat setting.
    pub fn scope(&self, name: &str) -> Result<&Scope> {
        match self.get(name)? {
            Value::Scope(inner) => Ok(inner),
            _ => Err(Error::NotAScope(name.to_string())),
        }
    }

    /// Mutably access a nested sub-scope by name
    pub fn scope_mut(&mut self, name: &str) -> Result<&mut Scope> {
        match self.get_mut(name)? {
            Value::Scope(inner) => Ok(inner),
            _ => Err(Error::NotAScope(name.to_string())),
        }
    }

    /// Re-realize a setting's declared default and return it
    ///
    /// # Errors
    ///
    /// As [`Scope::get`], plus [`Error::Finalized`].
    pub fn reset(&mut self, path: &str) -> Result<Value> {
        let full = path.to_string();
        let (scope, name) = self.resolve_mut(path)?;
        if scope.finalized {
            return Err(Error::Finalized);
        }
        let index = scope
            .schema
            .index_of(name)
            .ok_or(Error::SettingNotFound(full))?;
        let fresh = scope.schema.settings()[index].realize_default();
        debug!("reset setting '{path}' to its declared default");
        *scope.store.value_mut(index) = fresh.clone();
        Ok(fresh)
    }

    /// Re-realize every setting's declared default, nested scopes included
    ///
    /// # Errors
    ///
    /// [`Error::Finalized`] once the scope is finalized.
    pub fn reset_all(&mut self) -> Result<()> {
        if self.finalized {
            return Err(Error::Finalized);
        }
        let schema = Arc::clone(&self.schema);
        for (index, setting) in schema.settings().iter().enumerate() {
            *self.store.value_mut(index) = setting.realize_default();
        }
        debug!("reset all settings to declared defaults");
        Ok(())
    }

    /// Assign several settings at once
    ///
    /// Stops at the first failing assignment.
    pub fn update<'a, I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        for (path, value) in pairs {
            self.set(path, value)?;
        }
        Ok(())
    }

    /// Mark this scope and every nested scope read-only
    ///
    /// Subsequent writes fail with [`Error::Finalized`]. Idempotent.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        self.finalized = true;
        for value in self.store.values_mut() {
            if let Value::Scope(inner) = value {
                inner.finalize();
            }
        }
        debug!("scope finalized");
    }

    /// Check whether an operation can be resolved dynamically
    ///
    /// Reports `true` both for the scope's own operations and for operations
    /// the underlying store supports, so capability checks agree with
    /// [`Scope::invoke`].
    pub fn responds_to(&self, op: &str) -> bool {
        SCOPE_OPS.contains(&op) || self.store.supports(op)
    }

    /// Invoke an operation by name
    ///
    /// Resolution is two-tier: operations the scope defines are handled
    /// directly; anything else is forwarded to the underlying store when the
    /// store supports it.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedOperation`] when neither tier resolves the
    /// operation; otherwise whatever the resolved operation returns.
    pub fn invoke(&mut self, op: &str, args: &[Value]) -> Result<Value> {
        match op {
            "get" => {
                expect_arity(op, 1, args)?;
                let path = str_arg(op, &args[0])?;
                self.get(path).cloned()
            }
            "set" => {
                expect_arity(op, 2, args)?;
                let path = str_arg(op, &args[0])?.to_string();
                self.set(&path, args[1].clone())?;
                Ok(Value::Unset)
            }
            "scope" => {
                expect_arity(op, 1, args)?;
                let name = str_arg(op, &args[0])?;
                self.scope(name).map(|scope| Value::Scope(scope.clone()))
            }
            "reset" => {
                expect_arity(op, 1, args)?;
                let path = str_arg(op, &args[0])?.to_string();
                self.reset(&path)
            }
            "reset_all" => {
                expect_arity(op, 0, args)?;
                self.reset_all()?;
                Ok(Value::Unset)
            }
            "finalize" => {
                expect_arity(op, 0, args)?;
                self.finalize();
                Ok(Value::Unset)
            }
            "inspect" => {
                expect_arity(op, 0, args)?;
                Ok(Value::Str(self.to_string()))
            }
            _ if self.store.supports(op) => {
                debug!("forwarding operation '{op}' to the settings store");
                self.store.invoke(op, args)
            }
            _ => Err(Error::UnsupportedOperation(op.to_string())),
        }
    }

    /// Walk dotted-path segments down to the owning scope of the final name
    fn resolve<'s, 'p>(&'s self, path: &'p str) -> Result<(&'s Scope, &'p str)> {
        match path.split_once('.') {
            None => Ok((self, path)),
            Some((head, tail)) => {
                let index = self
                    .schema
                    .index_of(head)
                    .ok_or_else(|| Error::SettingNotFound(head.to_string()))?;
                match self.store.value(index) {
                    Value::Scope(inner) => inner.resolve(tail),
                    _ => Err(Error::NotAScope(head.to_string())),
                }
            }
        }
    }

    fn resolve_mut<'s, 'p>(&'s mut self, path: &'p str) -> Result<(&'s mut Scope, &'p str)> {
        match path.split_once('.') {
            None => Ok((self, path)),
            Some((head, tail)) => {
                let index = self
                    .schema
                    .index_of(head)
                    .ok_or_else(|| Error::SettingNotFound(head.to_string()))?;
                match self.store.value_mut(index) {
                    Value::Scope(inner) => inner.resolve_mut(tail),
                    _ => Err(Error::NotAScope(head.to_string())),
                }
            }
        }
    }

    /// Store a value into a directly owned slot, applying the declared
    /// constructor and eager kind check.
    fn assign(&mut self, name: &str, value: Value, full_path: &str) -> Result<()> {
        if self.finalized {
            return Err(Error::Finalized);
        }
        let index = self
            .schema
            .index_of(name)
            .ok_or_else(|| Error::SettingNotFound(full_path.to_string()))?;
        let setting = &self.schema.settings()[index];

        let value = match setting.constructor.as_ref() {
            Some(constructor) => constructor(value),
            None => value,
        };

        // Unset always clears; anything else must match the declared kind.
        if !value.is_unset() {
            if let Some(expected) = setting.kind {
                if value.kind() != Some(expected) {
                    return Err(Error::TypeMismatch {
                        key: full_path.to_string(),
                        expected: expected.name().into(),
                        actual: value.kind_name().into(),
                    });
                }
                if expected == ValueKind::Scope {
                    if let (Some(declared), Value::Scope(replacement)) = (&setting.nested, &value) {
                        if !declared.same_shape(replacement.schema()) {
                            return Err(Error::TypeMismatch {
                                key: full_path.to_string(),
                                expected: "scope with matching shape".into(),
                                actual: "scope".into(),
                            });
                        }
                    }
                }
            }
        }

        debug!("set '{full_path}'");
        *self.store.value_mut(index) = value;
        Ok(())
    }

    pub(crate) fn fmt_entries(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, (name, value)) in self.entries().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}

impl PartialEq for Scope {
    /// Structural equality over the realized settings tree. The finalized
    /// flag is lifecycle state and does not participate.
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scope")?;
        self.fmt_entries(f)
    }
}

impl Serialize for Scope {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries())
    }
}

// =============================================================================
// Tests
// =============================================================================
