use std::fmt;
use std::slice;

use tracing::warn;

use crate::error::LookupError;

/// Number of entries a store holds unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 100;

/// A primitive metadata value, as held by a [`Store`].
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Value {
    /// Value is a string.
    String(String),

    /// Value is a 32-bit integer.
    Int32(i32),

    /// Value is an unsigned 64-bit integer.
    UInt64(u64),

    /// Value is a 64-bit float.
    Float64(f64),
}

/// The kind of a value, without its payload.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Kind {
    /// Value is a UTF-8 string.
    String,
    /// Value is a 32-bit integer.
    Int32,
    /// Value is an unsigned 64-bit integer.
    UInt64,
    /// Value is a 64-bit float.
    Float64,
    /// An array of other values. Arrays are flattened before they reach a store, so no entry
    /// ever has this kind.
    Array,
}

impl Kind {
    /// Returns `true` if values of this kind can be retrieved with [`Store::get`] and are
    /// rendered by [`Store::dump`].
    pub fn is_retrievable(self) -> bool {
        matches!(self, Kind::String | Kind::Int32 | Kind::UInt64)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Kind::String => "String",
            Kind::Int32 => "Int32",
            Kind::UInt64 => "UInt64",
            Kind::Float64 => "Float64",
            Kind::Array => "Array",
        })
    }
}

impl Value {
    /// Returns the kind of value that this value holds.
    pub fn kind(&self) -> Kind {
        match *self {
            Value::String(_) => Kind::String,
            Value::Int32(_) => Kind::Int32,
            Value::UInt64(_) => Kind::UInt64,
            Value::Float64(_) => Kind::Float64,
        }
    }

    /// Returns the value as a `Some(&str)` if it is a `Value::String`, or `None` otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Value::String(ref val) => Some(val),
            _ => None,
        }
    }

    /// Returns the value as a `Some(i32)` if it is a `Value::Int32`, or `None` otherwise.
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Value::Int32(val) => Some(val),
            _ => None,
        }
    }

    /// Returns the value as a `Some(u64)` if it is a `Value::UInt64`, or `None` otherwise.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::UInt64(val) => Some(val),
            _ => None,
        }
    }

    /// Returns the value as a `Some(f64)` if it is a `Value::Float64`, or `None` otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float64(val) => Some(val),
            _ => None,
        }
    }
}

impl<'a> From<&'a str> for Value {
    fn from(string: &'a str) -> Value {
        Value::String(String::from(string))
    }
}

impl From<String> for Value {
    fn from(string: String) -> Value {
        Value::String(string)
    }
}

impl From<i32> for Value {
    fn from(val: i32) -> Value {
        Value::Int32(val)
    }
}

impl From<u64> for Value {
    fn from(val: u64) -> Value {
        Value::UInt64(val)
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Value {
        Value::Float64(val)
    }
}

/// A single `(key, value)` pair in a [`Store`].
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Entry {
    key: String,
    value: Value,
}

impl Entry {
    /// The metadata key, like `xesam:title`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The decoded value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The kind of the decoded value.
    pub fn kind(&self) -> Kind {
        self.value.kind()
    }
}

/// Renders the entry as a single dump line: key, kind and value separated by a tab.
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}: ", self.key, self.kind())?;
        match self.value {
            Value::String(ref val) => f.write_str(val),
            Value::Int32(val) => write!(f, "{}", val),
            Value::UInt64(val) => write!(f, "{}", val),
            Value::Float64(_) => f.write_str("unsupported"),
        }
    }
}

/// An insertion-ordered, bounded collection of typed metadata entries.
///
/// Keys are not unique. An array-valued property contributes one entry per element, all sharing
/// the property's key, and lookups always resolve to the first entry inserted under a key.
///
/// Once the store is full, further inserts are dropped with a warning.
///
/// ```rust
/// use mpris_metadata::{Kind, Store, Value};
///
/// let mut store = Store::new();
/// store.insert("xesam:artist", Value::from("Radiohead"));
/// store.insert("xesam:artist", Value::from("Thom Yorke"));
///
/// assert_eq!(store.get("xesam:artist", Kind::String), Ok(Value::from("Radiohead")));
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    entries: Vec<Entry>,
    capacity: usize,
}

impl Store {
    /// Creates an empty store that holds up to [`DEFAULT_CAPACITY`] entries.
    pub fn new() -> Self {
        Store::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty store that holds up to `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Store {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Appends an entry to the store.
    ///
    /// If the store is already full the entry is dropped and a warning is logged; this never
    /// fails.
    pub fn insert<K>(&mut self, key: K, value: Value)
    where
        K: Into<String>,
    {
        let key = key.into();
        if self.entries.len() >= self.capacity {
            warn!(
                key = %key,
                capacity = self.capacity,
                "metadata store is full; dropping entry"
            );
            return;
        }

        self.entries.push(Entry { key, value });
    }

    /// Looks up the first entry stored under `key`, expecting a value of kind `expected`.
    ///
    /// Only `String`, `Int32` and `UInt64` values can be retrieved; asking for any other kind
    /// results in [`LookupError::NotFound`]. If the first entry under `key` has another kind
    /// the result is [`LookupError::WrongType`], even if a later entry would have matched.
    pub fn get(&self, key: &str, expected: Kind) -> Result<Value, LookupError> {
        if !expected.is_retrievable() {
            return Err(LookupError::not_found(key));
        }

        match self.entries.iter().find(|entry| entry.key == key) {
            Some(entry) if entry.kind() == expected => Ok(entry.value.clone()),
            Some(entry) => Err(LookupError::wrong_type(key, expected, entry.kind())),
            None => Err(LookupError::not_found(key)),
        }
    }

    /// Looks up a string value. See [`Store::get`].
    pub fn get_str(&self, key: &str) -> Result<String, LookupError> {
        match self.get(key, Kind::String)? {
            Value::String(val) => Ok(val),
            other => Err(LookupError::wrong_type(key, Kind::String, other.kind())),
        }
    }

    /// Looks up a 32-bit integer value. See [`Store::get`].
    pub fn get_i32(&self, key: &str) -> Result<i32, LookupError> {
        let value = self.get(key, Kind::Int32)?;
        value
            .as_i32()
            .ok_or_else(|| LookupError::wrong_type(key, Kind::Int32, value.kind()))
    }

    /// Looks up an unsigned 64-bit integer value. See [`Store::get`].
    pub fn get_u64(&self, key: &str) -> Result<u64, LookupError> {
        let value = self.get(key, Kind::UInt64)?;
        value
            .as_u64()
            .ok_or_else(|| LookupError::wrong_type(key, Kind::UInt64, value.kind()))
    }

    /// Returns the rendered lines of every entry, in insertion order.
    ///
    /// Values that cannot be retrieved by kind are rendered as `unsupported`.
    pub fn dump(&self) -> Dump<'_> {
        Dump {
            entries: self.entries.iter(),
        }
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The maximum number of entries this store holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = &'a Entry;
    type IntoIter = slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the rendered lines of a [`Store`]. Created by [`Store::dump`].
#[derive(Debug, Clone)]
pub struct Dump<'a> {
    entries: slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Dump<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.entries.next().map(Entry::to_string)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<'a> ExactSizeIterator for Dump<'a> {}
