//! Substitution engine
//!
//! The [`Engine`] owns a compiled placeholder pattern and turns a template
//! tree into a new tree with every placeholder resolved:
//!
//! - a string that is exactly one placeholder becomes the replacement value,
//!   whatever its type;
//! - placeholders embedded in a larger string are spliced in as text;
//! - keys are rewritten after all values of their object, and may only
//!   resolve to strings, numbers or booleans.
//!
//! # Example
//!
//! ```rust
//! use jsoninja::{Engine, ReplaceOptions, Replacements};
//! use serde_json::json;
//!
//! let engine = Engine::new();
//! let replacements = Replacements::new().with("name", "John").with("age", 25);
//!
//! let out = engine
//!     .replace(
//!         &json!({"greeting": "Hi {{name}}", "age": "{{ age }}"}),
//!         &replacements,
//!         &ReplaceOptions::default(),
//!     )
//!     .unwrap();
//!
//! assert_eq!(out, json!({"greeting": "Hi John", "age": 25}));
//! ```

mod resolver;
mod walker;

use serde_json::Value;

use crate::error::{Error, ValueKind};
use crate::options::ReplaceOptions;
use crate::pattern::{Matcher, VariablePattern};
use crate::replacement::Replacements;

use resolver::LeafResolver;
use walker::{collect_placeholders, Walker};

/// Template substitution engine
///
/// Holds no state besides the compiled pattern, so one engine can serve any
/// number of calls, from any thread.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    matcher: Matcher,
}

impl Engine {
    /// Create an engine using the default `{{name}}` pattern
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom pattern
    ///
    /// Invalid patterns are rejected here rather than on first use.
    pub fn with_pattern(pattern: &VariablePattern) -> Result<Self, Error> {
        Ok(Self {
            matcher: Matcher::new(pattern)?,
        })
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Substitute every placeholder in `template`
    ///
    /// The template is never modified; the result is a fresh tree.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyTemplate`] for `{}` or `[]`
    /// - [`Error::InvalidTemplate`] when the root is not an object or array
    /// - [`Error::MissingReplacement`] for an unknown placeholder, unless
    ///   `options` skips missing ones
    /// - [`Error::InvalidKeyType`] when a key placeholder resolves to an
    ///   object, array or null
    pub fn replace(
        &self,
        template: &Value,
        replacements: &Replacements,
        options: &ReplaceOptions,
    ) -> Result<Value, Error> {
        check_template(template)?;

        let mut output = template.clone();
        let resolver = LeafResolver::new(&self.matcher, replacements, options.on_missing);
        Walker::new(resolver).walk(&mut output)?;

        Ok(output)
    }

    /// Distinct placeholder names referenced by `template`
    ///
    /// Names are listed in the order the substitution walk would meet them:
    /// depth-first, and values before keys within an object.
    pub fn placeholders(&self, template: &Value) -> Vec<String> {
        let mut names = Vec::new();
        collect_placeholders(&self.matcher, template, &mut names);
        names
    }
}

fn check_template(template: &Value) -> Result<(), Error> {
    match template {
        Value::Object(map) if map.is_empty() => Err(Error::EmptyTemplate),
        Value::Array(items) if items.is_empty() => Err(Error::EmptyTemplate),
        Value::Object(_) | Value::Array(_) => Ok(()),
        other => Err(Error::InvalidTemplate {
            kind: ValueKind::of(other),
        }),
    }
}
