//! Leaf resolution - substitutes the placeholders found in a single string

use std::borrow::Cow;

use serde_json::Value;

use crate::error::{Error, ValueKind};
use crate::options::OnMissing;
use crate::pattern::Matcher;
use crate::replacement::Replacements;

/// Outcome of resolving one string
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Resolved {
    /// Nothing was substituted
    Unchanged,
    /// The new value; a string unless a single token covered the whole input
    Replaced(Value),
}

/// Resolves placeholders in string leaves and object keys
pub(crate) struct LeafResolver<'a> {
    matcher: &'a Matcher,
    replacements: &'a Replacements,
    on_missing: OnMissing,
}

impl<'a> LeafResolver<'a> {
    pub fn new(
        matcher: &'a Matcher,
        replacements: &'a Replacements,
        on_missing: OnMissing,
    ) -> Self {
        Self {
            matcher,
            replacements,
            on_missing,
        }
    }

    /// Resolve a string leaf
    pub fn resolve(&self, text: &str) -> Result<Resolved, Error> {
        self.resolve_checked(text, |_, _| Ok(()))
    }

    /// Resolve an object key, returning the new key if it changed
    ///
    /// Every substituted value must be a string, number or boolean.
    pub fn resolve_key(&self, key: &str) -> Result<Option<String>, Error> {
        let resolved = self.resolve_checked(key, |name, value| {
            if ValueKind::of(value).is_key_compatible() {
                Ok(())
            } else {
                Err(Error::invalid_key(name, value))
            }
        })?;

        Ok(match resolved {
            Resolved::Unchanged => None,
            Resolved::Replaced(Value::String(s)) => Some(s),
            Resolved::Replaced(other) => Some(other.to_string()),
        })
    }

    fn resolve_checked<F>(&self, text: &str, check: F) -> Result<Resolved, Error>
    where
        F: Fn(&str, &Value) -> Result<(), Error>,
    {
        let placeholders = self.matcher.find_all(text);
        if placeholders.is_empty() {
            return Ok(Resolved::Unchanged);
        }

        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;
        let mut changed = false;

        for placeholder in &placeholders {
            let Some(replacement) = self.replacements.get(placeholder.name) else {
                match self.on_missing {
                    OnMissing::Fail => return Err(Error::missing(placeholder.name)),
                    // Skipped tokens are copied with the next literal segment
                    OnMissing::Skip => continue,
                }
            };

            let value = replacement.evaluate();
            check(placeholder.name, &value)?;

            if placeholder.is_whole(text) {
                return Ok(Resolved::Replaced(value));
            }

            output.push_str(&text[cursor..placeholder.span.start]);
            output.push_str(&stringify(&value));
            cursor = placeholder.span.end;
            changed = true;
        }

        if !changed {
            return Ok(Resolved::Unchanged);
        }

        output.push_str(&text[cursor..]);
        Ok(Resolved::Replaced(Value::String(output)))
    }
}

/// String form of a value spliced into a larger string
pub(crate) fn stringify(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}
