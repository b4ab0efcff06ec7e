//! # Attribute Sets and Shallow Merging
//!
//! This module defines the typed attribute model used by every declaration
//! the engine produces, replacing the loosely-typed hash-of-hashes override
//! pattern of the source configuration format.
//!
//! ## Key Components
//!
//! - **`Value`**: a scalar attribute value (string, integer, or boolean).
//!   Anything else in an attribute position is a hard type error.
//!
//! - **`AttributeSet`**: a unique-keyed collection of `Value`s. Insertion
//!   order is preserved so that rendered output is deterministic, but it
//!   carries no semantic meaning.
//!
//! - **`OverrideMap`**: an ordered mapping from entry name to `AttributeSet`,
//!   used for the per-repository and per-key override hashes. Entry order is
//!   the order declarations are emitted in.
//!
//! ## Merging
//!
//! All merging is shallow: [`AttributeSet::merged_with`] replaces colliding
//! keys in place, keeps keys only present in the base, and appends keys only
//! present in the overrides. There is no deep merging because values are
//! scalars.

use crate::error::{Error, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// A scalar attribute value.
///
/// The configuration surface only deals in scalars; structured values where
/// a scalar is expected abort the resolution pass with
/// [`Error::AttributeType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A string value (the overwhelmingly common case).
    Str(String),
    /// An integer value, e.g. retry counts.
    Int(i64),
    /// A boolean value.
    Bool(bool),
}

impl Value {
    /// Convert a raw YAML value into a scalar `Value`.
    ///
    /// `entry` names the enclosing attribute position and is only used for
    /// error reporting.
    pub fn from_yaml(value: &serde_yaml::Value, entry: &str) -> Result<Self> {
        match value {
            serde_yaml::Value::String(s) => Ok(Value::Str(s.clone())),
            serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_yaml::Value::Number(n) => {
                n.as_i64().map(Value::Int).ok_or_else(|| Error::AttributeType {
                    entry: entry.to_string(),
                    message: format!("attribute values must be integral, got {}", n),
                })
            }
            other => Err(Error::AttributeType {
                entry: entry.to_string(),
                message: format!(
                    "attribute values must be scalar strings, integers, or booleans, got {}",
                    yaml_type_name(other)
                ),
            }),
        }
    }

    /// Borrow the value as a string slice if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::Str(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Value::Str(s) if s == other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Int(i) if i == other)
    }
}

/// Human-readable name of a YAML value's type, for error messages.
fn yaml_type_name(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}

/// A named, unique-keyed collection of scalar configuration values.
///
/// Keys are unique; setting an existing key replaces its value in place.
/// Iteration yields entries in insertion order, which makes rendered output
/// deterministic for identical inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: Vec<(String, Value)>,
}

impl AttributeSet {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an attribute set from `(key, value)` pairs.
    ///
    /// Later pairs replace earlier pairs with the same key.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut set = Self::new();
        for (key, value) in pairs {
            set.set(key.into(), value.into());
        }
        set
    }

    /// Convert a raw YAML value into an attribute set.
    ///
    /// `Null` (an absent key) converts to the empty set; a mapping converts
    /// entry by entry; anything else is a type error. `entry` names the
    /// enclosing parameter for error reporting.
    pub fn from_yaml(value: &serde_yaml::Value, entry: &str) -> Result<Self> {
        match value {
            serde_yaml::Value::Null => Ok(Self::new()),
            serde_yaml::Value::Mapping(mapping) => {
                let mut set = Self::new();
                for (key, val) in mapping {
                    let key = key.as_str().ok_or_else(|| Error::AttributeType {
                        entry: entry.to_string(),
                        message: format!("attribute keys must be strings, got {}", yaml_type_name(key)),
                    })?;
                    let context = format!("{}.{}", entry, key);
                    set.set(key.to_string(), Value::from_yaml(val, &context)?);
                }
                Ok(set)
            }
            other => Err(Error::AttributeType {
                entry: entry.to_string(),
                message: format!(
                    "expected a mapping of attribute keys to scalar values, got {}",
                    yaml_type_name(other)
                ),
            }),
        }
    }

    /// Number of attributes in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an attribute by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether the set contains `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set an attribute, replacing an existing value in place or appending a
    /// new entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Shallow-merge `overrides` on top of this set, returning the result.
    ///
    /// Every key in `overrides` replaces the same key here; keys present only
    /// here are retained; keys present only in `overrides` are appended. The
    /// receiver is not modified.
    pub fn merged_with(&self, overrides: &AttributeSet) -> AttributeSet {
        let mut merged = self.clone();
        for (key, value) in &overrides.entries {
            merged.set(key.clone(), value.clone());
        }
        merged
    }

    /// Iterate over `(key, value)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over attribute keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Keys of this set that are not in the `recognized` whitelist.
    pub fn unrecognized_keys(&self, recognized: &[&str]) -> Vec<String> {
        self.keys()
            .filter(|key| !recognized.contains(key))
            .map(|key| key.to_string())
            .collect()
    }
}

impl Serialize for AttributeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// An ordered mapping from entry name to [`AttributeSet`].
///
/// This is the typed form of the `source_hash` / `repo_hash` / `gpgkey_hash`
/// parameters. Entry order is preserved: user entries are emitted in the
/// order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideMap {
    entries: Vec<(String, AttributeSet)>,
}

impl OverrideMap {
    /// Create an empty override map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an override map from `(name, attributes)` pairs.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, AttributeSet)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Convert a raw YAML value into an override map.
    ///
    /// `Null` converts to the empty map. Every entry value must itself be a
    /// mapping of scalars; anything else aborts with a type error naming the
    /// offending entry.
    pub fn from_yaml(value: &serde_yaml::Value, parameter: &str) -> Result<Self> {
        match value {
            serde_yaml::Value::Null => Ok(Self::new()),
            serde_yaml::Value::Mapping(mapping) => {
                let mut entries = Vec::with_capacity(mapping.len());
                for (key, val) in mapping {
                    let name = key.as_str().ok_or_else(|| Error::AttributeType {
                        entry: parameter.to_string(),
                        message: format!("entry names must be strings, got {}", yaml_type_name(key)),
                    })?;
                    let context = format!("{}['{}']", parameter, name);
                    if !matches!(val, serde_yaml::Value::Mapping(_)) {
                        return Err(Error::AttributeType {
                            entry: context,
                            message: format!(
                                "expected a mapping of attribute keys to scalar values, got {}",
                                yaml_type_name(val)
                            ),
                        });
                    }
                    entries.push((name.to_string(), AttributeSet::from_yaml(val, &context)?));
                }
                Ok(Self { entries })
            }
            other => Err(Error::AttributeType {
                entry: parameter.to_string(),
                message: format!(
                    "expected a mapping of entry names to attribute mappings, got {}",
                    yaml_type_name(other)
                ),
            }),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry's attributes by name.
    pub fn get(&self, name: &str) -> Option<&AttributeSet> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    /// Whether the map contains an entry named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over `(name, attributes)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeSet)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }
}
