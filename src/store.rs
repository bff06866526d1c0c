//! Realized settings storage and its dynamic operation surface
//!
//! A [`Store`] holds one slot per declared setting, in declaration order,
//! seeded from the schema's defaults. Beyond plain slot access it exposes a
//! small set of named introspection operations; a scope forwards any
//! operation it does not recognize itself to this surface.

use crate::error::{Error, Result};
use crate::schema::Schema;
use crate::value::Value;

/// Operations the store answers to via [`Store::invoke`].
const STORE_OPS: &[&str] = &["keys", "values", "count", "is_empty", "contains"];

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Slot {
    pub(crate) name: String,
    pub(crate) value: Value,
}

/// Per-instance value storage backing a scope
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Store {
    slots: Vec<Slot>,
}

impl Store {
    /// Realize storage from a schema, producing fresh defaults per slot
    pub(crate) fn realize(schema: &Schema) -> Self {
        let slots = schema
            .settings()
            .iter()
            .map(|setting| Slot {
                name: setting.name.clone(),
                value: setting.realize_default(),
            })
            .collect();
        Self { slots }
    }

    pub(crate) fn value(&self, index: usize) -> &Value {
        &self.slots[index].value
    }

    pub(crate) fn value_mut(&mut self, index: usize) -> &mut Value {
        &mut self.slots[index].value
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.slots.iter_mut().map(|slot| &mut slot.value)
    }

    /// Stored (name, value) pairs in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.slots.iter().map(|slot| (slot.name.as_str(), &slot.value))
    }

    /// Stored setting names in declaration order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.slots.iter().map(|slot| slot.name.clone()).collect()
    }

    /// Check whether a setting name is stored
    pub fn contains(&self, name: &str) -> bool {
        self.slots.iter().any(|slot| slot.name == name)
    }

    /// Number of stored settings
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check whether the store holds no settings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check whether the store answers to a named operation
    pub fn supports(&self, op: &str) -> bool {
        STORE_OPS.contains(&op)
    }

    /// Invoke a named operation against the store
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperation`] for an unknown operation,
    /// [`Error::InvalidArity`] for a wrong argument count, and
    /// [`Error::TypeMismatch`] for a wrong argument type.
    pub fn invoke(&self, op: &str, args: &[Value]) -> Result<Value> {
        match op {
            "keys" => {
                expect_arity(op, 0, args)?;
                Ok(Value::List(self.keys().into_iter().map(Value::Str).collect()))
            }
            "values" => {
                expect_arity(op, 0, args)?;
                Ok(Value::List(
                    self.slots.iter().map(|slot| slot.value.clone()).collect(),
                ))
            }
            "count" => {
                expect_arity(op, 0, args)?;
                Ok(Value::Int(self.slots.len() as i64))
            }
            "is_empty" => {
                expect_arity(op, 0, args)?;
                Ok(Value::Bool(self.slots.is_empty()))
            }
            "contains" => {
                expect_arity(op, 1, args)?;
                let name = str_arg(op, &args[0])?;
                Ok(Value::Bool(self.contains(name)))
            }
            _ => Err(Error::UnsupportedOperation(op.to_string())),
        }
    }
}

/// Check the argument count of a dynamic operation
pub(crate) fn expect_arity(op: &str, expected: usize, args: &[Value]) -> Result<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(Error::InvalidArity {
            op: op.to_string(),
            expected,
            actual: args.len(),
        })
    }
}

/// Extract a string-shaped argument of a dynamic operation
pub(crate) fn str_arg<'a>(op: &str, arg: &'a Value) -> Result<&'a str> {
    match arg {
        Value::Str(s) | Value::Tag(s) => Ok(s),
        other => Err(Error::TypeMismatch {
            key: op.to_string(),
            expected: "string".into(),
            actual: other.kind_name().into(),
        }),
    }
}

// =============================================================================
// Tests
// =============================================================================
