//! jsoninja - fill placeholders in JSON-shaped templates
//!
//! A template is any object or array tree. Placeholders such as `{{name}}`
//! may appear in string values and in object keys; they are replaced with
//! values from a [`Replacements`] mapping to produce a new tree.
//!
//! # Example
//!
//! ```rust
//! use jsoninja::{replace, Replacements};
//! use serde_json::json;
//!
//! let template = json!({
//!     "firstname": "{{name}}",
//!     "age": "{{age}}",
//!     "{{pet}}_name": "Firulais"
//! });
//! let replacements = Replacements::new()
//!     .with("name", "John")
//!     .with("age", 25)
//!     .with("pet", "dog");
//!
//! let out = replace(&template, &replacements).unwrap();
//! assert_eq!(out, json!({"firstname": "John", "age": 25, "dog_name": "Firulais"}));
//! ```

pub mod config;
pub mod error;
pub mod options;
pub mod pattern;
pub mod replacement;
pub mod template;

pub use config::{Config, ConfigError};
pub use error::{Error, ValueKind};
pub use options::{OnMissing, ReplaceOptions};
pub use pattern::{Matcher, Placeholder, VariablePattern, DEFAULT_PATTERN};
pub use replacement::{Replacement, Replacements};
pub use template::Engine;

use std::sync::OnceLock;

use serde_json::Value;

fn default_engine() -> &'static Engine {
    static ENGINE: OnceLock<Engine> = OnceLock::new();
    ENGINE.get_or_init(Engine::new)
}

/// Replace placeholders using the default pattern
///
/// Fails on the first placeholder without a replacement.
pub fn replace(template: &Value, replacements: &Replacements) -> Result<Value, Error> {
    replace_with_options(template, replacements, &ReplaceOptions::default())
}

/// Replace placeholders using the default pattern and custom options
///
/// # Example
///
/// ```rust
/// use jsoninja::{replace_with_options, ReplaceOptions, Replacements};
/// use serde_json::json;
///
/// let out = replace_with_options(
///     &json!({"firstname": "{{firstname}}", "lastname": "{{lastname}}"}),
///     &Replacements::new().with("firstname", "John"),
///     &ReplaceOptions::skip_missing(),
/// )
/// .unwrap();
///
/// assert_eq!(out, json!({"firstname": "John", "lastname": "{{lastname}}"}));
/// ```
pub fn replace_with_options(
    template: &Value,
    replacements: &Replacements,
    options: &ReplaceOptions,
) -> Result<Value, Error> {
    default_engine().replace(template, replacements, options)
}
