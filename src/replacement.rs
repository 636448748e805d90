//! Replacement values keyed by placeholder name

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::error::{Error, ValueKind};

type Producer = Box<dyn Fn() -> Value + Send + Sync>;

/// The value substituted for a placeholder
pub enum Replacement {
    /// A fixed value
    Value(Value),
    /// A producer invoked each time a placeholder bound to it is resolved
    Lazy(Producer),
}

impl Replacement {
    /// Create a lazily produced replacement
    pub fn lazy<F>(producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Lazy(Box::new(producer))
    }

    /// Produce the value, invoking the producer for lazy replacements
    pub fn evaluate(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Lazy(producer) => producer(),
        }
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Lazy(_) => f.write_str("Lazy(<fn>)"),
        }
    }
}

macro_rules! replacement_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Replacement {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

replacement_from!(
    Value,
    String,
    &str,
    bool,
    i32,
    i64,
    u32,
    u64,
    f64,
    Vec<Value>,
    Map<String, Value>,
);

/// Mapping from placeholder name to replacement
#[derive(Debug, Default)]
pub struct Replacements {
    entries: HashMap<String, Replacement>,
}

impl Replacements {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from a JSON object, rejecting any other kind of value
    pub fn from_json(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            other => Err(Error::InvalidReplacements {
                kind: ValueKind::of(&other),
            }),
        }
    }

    /// Add or overwrite a replacement
    pub fn insert(&mut self, name: impl Into<String>, replacement: impl Into<Replacement>) {
        self.entries.insert(name.into(), replacement.into());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, replacement: impl Into<Replacement>) -> Self {
        self.insert(name, replacement);
        self
    }

    /// Builder-style insert of a lazily produced value
    pub fn with_lazy<F>(self, name: impl Into<String>, producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.with(name, Replacement::lazy(producer))
    }

    /// Merge another mapping into this one; entries in `other` win
    pub fn extend(&mut self, other: Replacements) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, name: &str) -> Option<&Replacement> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Map<String, Value>> for Replacements {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(name, value)| (name, Replacement::Value(value)))
                .collect(),
        }
    }
}

impl<K, R> FromIterator<(K, R)> for Replacements
where
    K: Into<String>,
    R: Into<Replacement>,
{
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, replacement)| (name.into(), replacement.into()))
                .collect(),
        }
    }
}
