//! Placeholder matching
//!
//! A [`Matcher`] wraps a compiled regular expression with exactly one capture
//! group. The capture is the variable name; the whole match is the token that
//! gets replaced.

use std::ops::Range;

use regex::Regex;

use crate::error::Error;

/// The default variable pattern: `{{name}}` or `{{ name }}`
pub const DEFAULT_PATTERN: &str = r"\{\{ ?([A-Za-z0-9_]+) ?\}\}";

/// Identifier rule used when the pattern is given as a delimiter pair
const IDENTIFIER: &str = "[A-Za-z0-9_]+";

/// How placeholders are recognised in strings and keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VariablePattern {
    /// `{{name}}` with an optional single space inside the braces
    #[default]
    Default,
    /// Literal open/close markers around an identifier
    Delimiters { open: String, close: String },
    /// A custom regular expression with exactly one capture group
    Regex { regex: String },
}

impl VariablePattern {
    pub fn delimiters(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self::Delimiters {
            open: open.into(),
            close: close.into(),
        }
    }

    pub fn regex(regex: impl Into<String>) -> Self {
        Self::Regex {
            regex: regex.into(),
        }
    }

    /// The regular expression source for this pattern
    fn source(&self) -> Result<String, Error> {
        match self {
            Self::Default => Ok(DEFAULT_PATTERN.to_string()),
            Self::Delimiters { open, close } => {
                if open.is_empty() || close.is_empty() {
                    return Err(Error::invalid_pattern(
                        format!("{}name{}", open, close),
                        "delimiters must not be empty",
                    ));
                }
                Ok(format!(
                    "{} ?({}) ?{}",
                    regex::escape(open),
                    IDENTIFIER,
                    regex::escape(close)
                ))
            }
            Self::Regex { regex } => Ok(regex.clone()),
        }
    }
}

/// A placeholder occurrence found in a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'t> {
    /// Byte range of the whole token, delimiters included
    pub span: Range<usize>,
    /// The matched token text
    pub token: &'t str,
    /// The captured variable name, surrounding whitespace trimmed
    pub name: &'t str,
}

impl Placeholder<'_> {
    /// Whether this token covers all of `text`
    pub fn is_whole(&self, text: &str) -> bool {
        self.span.start == 0 && self.span.end == text.len()
    }
}

/// Compiled placeholder pattern
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            regex: Regex::new(DEFAULT_PATTERN).expect("default pattern is a valid regex"),
        }
    }
}

impl Matcher {
    /// Compile a pattern, rejecting invalid regexes and wrong capture counts
    pub fn new(pattern: &VariablePattern) -> Result<Self, Error> {
        let source = pattern.source()?;
        let regex = Regex::new(&source).map_err(|e| Error::invalid_pattern(&source, e))?;

        // captures_len counts the implicit whole-match group
        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(Error::invalid_pattern(
                &source,
                format!("expected exactly one capture group, found {}", groups),
            ));
        }

        Ok(Self { regex })
    }

    /// All non-overlapping placeholders in `text`, leftmost first
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<Placeholder<'t>> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                if whole.as_str().is_empty() {
                    return None;
                }
                let name = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
                Some(Placeholder {
                    span: whole.range(),
                    token: whole.as_str(),
                    name,
                })
            })
            .collect()
    }

    /// Whether `text` contains at least one placeholder
    pub fn is_match(&self, text: &str) -> bool {
        !self.find_all(text).is_empty()
    }

    /// The compiled regular expression
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
