//! Error types for pattern construction and substitution

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// The JSON kind of a value, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Whether a value of this kind may be used as an object key
    pub fn is_key_compatible(self) -> bool {
        matches!(self, ValueKind::Bool | ValueKind::Number | ValueKind::String)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while building an engine or substituting a template
#[derive(Debug, Error)]
pub enum Error {
    /// The template is an empty object or an empty array
    #[error("a template has not been loaded")]
    EmptyTemplate,

    /// The template root is a scalar
    #[error("template must be an object or an array, found {kind}")]
    InvalidTemplate { kind: ValueKind },

    /// A placeholder has no entry in the replacement mapping
    #[error("unable to find a replacement for \"{name}\"")]
    MissingReplacement { name: String },

    /// A key placeholder resolved to something that cannot be a key
    #[error("key replacement must be string, number or boolean ({name} is {kind})")]
    InvalidKeyType { name: String, kind: ValueKind },

    /// The variable pattern could not be compiled
    #[error("invalid variable pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A replacements document that is not a JSON object
    #[error("replacements must be an object, found {kind}")]
    InvalidReplacements { kind: ValueKind },
}

impl Error {
    /// Create a missing replacement error
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingReplacement { name: name.into() }
    }

    /// Create an invalid key type error for the value a key placeholder resolved to
    pub fn invalid_key(name: impl Into<String>, value: &Value) -> Self {
        Self::InvalidKeyType {
            name: name.into(),
            kind: ValueKind::of(value),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }

    /// The placeholder identifier this error refers to, if any
    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Self::MissingReplacement { name } => Some(name),
            Self::InvalidKeyType { name, .. } => Some(name),
            _ => None,
        }
    }
}
