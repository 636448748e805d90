//! Options for a single substitution call

use serde::Deserialize;

/// What to do with a placeholder that has no replacement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnMissing {
    /// Abort with [`Error::MissingReplacement`](crate::Error::MissingReplacement)
    #[default]
    Fail,
    /// Leave the placeholder text as it is
    Skip,
}

/// Options for [`Engine::replace`](crate::Engine::replace)
#[derive(Debug, Clone, Default)]
pub struct ReplaceOptions {
    /// Policy for placeholders without a replacement
    pub on_missing: OnMissing,
}

impl ReplaceOptions {
    /// Create options with default values (missing placeholders fail)
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that leave unresolved placeholders in place
    pub fn skip_missing() -> Self {
        Self::new().with_on_missing(OnMissing::Skip)
    }

    /// Set the missing placeholder policy
    pub fn with_on_missing(mut self, on_missing: OnMissing) -> Self {
        self.on_missing = on_missing;
        self
    }

    /// Set the policy from a `raise_on_missing` flag
    pub fn with_raise_on_missing(self, raise: bool) -> Self {
        self.with_on_missing(if raise {
            OnMissing::Fail
        } else {
            OnMissing::Skip
        })
    }
}
