//! Compile-time key typing
//!
//! A schema here is not a runtime object: it is a set of `TypedKey`
//! constants that pin a logical value type to each key name, so call sites
//! get checked conversions while the persisted layer stays stringly typed.
//!
//! ```
//! use lodestore_core::schema::TypedKey;
//!
//! const RETRIES: TypedKey<i64> = TypedKey::new("retries");
//! const MOTD: TypedKey<String> = TypedKey::new("motd");
//! ```

use num_bigint::BigInt;
use std::collections::HashMap;
use std::marker::PhantomData;

use crate::value::Value;

/// A key name carrying its logical value type as a phantom parameter
///
/// Constructible in `const` position so a schema can be a block of
/// associated constants. Two keys with the same name but different type
/// parameters address the same persisted entry; the type only constrains
/// the call site.
pub struct TypedKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedKey<T> {
    /// Create a typed key for `name`
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// The key name used against the persisted store
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

// Manual impls: derive would wrongly bound T
impl<T> Clone for TypedKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedKey<T> {}

impl<T> std::fmt::Debug for TypedKey<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TypedKey").field(&self.name).finish()
    }
}

/// Conversion from a decoded [`Value`] into a concrete Rust type
///
/// Returns `None` when the persisted value decoded to a different shape
/// than the schema expects; the typed getters surface that as absence
/// rather than an error, since inference is best-effort by design.
pub trait FromValue: Sized {
    /// Convert, returning `None` on a shape mismatch
    fn from_value(value: Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Option<Self> {
        value.as_int()
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Option<Self> {
        // Inference turns "42" into Int even when the writer meant a float
        match value {
            Value::Float(f) => Some(f),
            Value::Int(i) => Some(i as f64),
            _ => None,
        }
    }
}

impl FromValue for BigInt {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::BigInt(b) => Some(b),
            Value::Int(i) => Some(BigInt::from(i)),
            _ => None,
        }
    }
}

impl FromValue for Vec<Value> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl FromValue for HashMap<String, Value> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}
