//! Tree walk - resolves values depth-first, then rewrites each object's keys

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::Error;
use crate::pattern::Matcher;

use super::resolver::{LeafResolver, Resolved};

/// Walks an owned working tree and substitutes placeholders in place
pub(crate) struct Walker<'a> {
    resolver: LeafResolver<'a>,
}

impl<'a> Walker<'a> {
    pub fn new(resolver: LeafResolver<'a>) -> Self {
        Self { resolver }
    }

    pub fn walk(&self, node: &mut Value) -> Result<(), Error> {
        match node {
            Value::Array(items) => {
                for item in items.iter_mut() {
                    self.walk(item)?;
                }
            }
            Value::Object(map) => {
                // All values of an object are resolved before any of its keys
                for value in map.values_mut() {
                    self.walk(value)?;
                }
                self.rewrite_keys(map)?;
            }
            Value::String(text) => {
                if let Resolved::Replaced(value) = self.resolver.resolve(text)? {
                    *node = value;
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
        Ok(())
    }

    /// Rename keys containing placeholders, keeping each entry in place
    ///
    /// A renamed key overwrites an untouched key with the same name; between
    /// two renamed keys the later value wins.
    fn rewrite_keys(&self, map: &mut Map<String, Value>) -> Result<(), Error> {
        let renames = map
            .keys()
            .map(|key| self.resolver.resolve_key(key))
            .collect::<Result<Vec<_>, _>>()?;

        if renames.iter().all(Option::is_none) {
            return Ok(());
        }

        let renamed: HashSet<String> = renames.iter().flatten().cloned().collect();
        let entries = std::mem::take(map);

        for ((key, value), rename) in entries.into_iter().zip(renames) {
            match rename {
                Some(new_key) => {
                    map.insert(new_key, value);
                }
                None if renamed.contains(&key) => {}
                None => {
                    map.insert(key, value);
                }
            }
        }

        Ok(())
    }
}

/// Collect distinct placeholder names in walk order
pub(crate) fn collect_placeholders(matcher: &Matcher, node: &Value, names: &mut Vec<String>) {
    let mut seen: HashSet<String> = names.iter().cloned().collect();
    collect_into(matcher, node, names, &mut seen);
}

fn collect_into(
    matcher: &Matcher,
    node: &Value,
    names: &mut Vec<String>,
    seen: &mut HashSet<String>,
) {
    match node {
        Value::Array(items) => {
            for item in items {
                collect_into(matcher, item, names, seen);
            }
        }
        Value::Object(map) => {
            for value in map.values() {
                collect_into(matcher, value, names, seen);
            }
            for key in map.keys() {
                record(matcher, key, names, seen);
            }
        }
        Value::String(text) => record(matcher, text, names, seen),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

fn record(matcher: &Matcher, text: &str, names: &mut Vec<String>, seen: &mut HashSet<String>) {
    for placeholder in matcher.find_all(text) {
        if seen.insert(placeholder.name.to_string()) {
            names.push(placeholder.name.to_string());
        }
    }
}
