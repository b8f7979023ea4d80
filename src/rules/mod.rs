//! Rule model and rule-file loading.
//!
//! Rules are authored as JSON files, each holding a list of rule records
//! under a top-level `"rules"` key:
//!
//! ```json
//! {
//!   "rules": [
//!     {
//!       "find": "utiliz",
//!       "fail-message": "avoid 'utilize'",
//!       "pass-message": "no 'utilize' found",
//!       "confidence": 0.9
//!     }
//!   ]
//! }
//! ```
//!
//! Unrecognized fields are ignored for forward compatibility. A rule set is
//! loaded once per run and is read-only afterwards.

mod loader;

pub use loader::{load_dir, LoadOutcome, SkippedFile};

use serde::{Deserialize, Serialize};

/// Placeholder shown when a rule carries no fail message.
pub const DEFAULT_FAIL_MESSAGE: &str = "Rule fail text not set";
/// Placeholder shown when a rule carries no pass message.
pub const DEFAULT_PASS_MESSAGE: &str = "Rule pass text not set";
/// Placeholder shown when a rule has no loader-assigned source.
pub const DEFAULT_SOURCE: &str = "Rule source not set";

/// A single validation rule: a regex pattern plus reporting metadata.
///
/// `source` is assigned by the loader from the defining file's name; it is
/// never authored inside the rule file itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Regular expression searched for in the document text.
    #[serde(rename = "find")]
    pub pattern: String,

    /// Message reported when the pattern matches (a violation).
    #[serde(rename = "fail-message", default)]
    pub fail_message: Option<String>,

    /// Message reported when the pattern does not match.
    #[serde(rename = "pass-message", default)]
    pub pass_message: Option<String>,

    /// Authored severity weighting. Parsed but not yet consulted by
    /// evaluation.
    #[serde(default)]
    pub confidence: Option<f64>,

    /// Name of the rule file this rule was loaded from.
    #[serde(skip_deserializing, default)]
    pub source: String,
}

impl Rule {
    /// Create a rule from a bare pattern, with no messages attached.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            fail_message: None,
            pass_message: None,
            confidence: None,
            source: String::new(),
        }
    }

    /// The fail message, or its placeholder.
    pub fn fail_message(&self) -> &str {
        self.fail_message.as_deref().unwrap_or(DEFAULT_FAIL_MESSAGE)
    }

    /// The pass message, or its placeholder.
    pub fn pass_message(&self) -> &str {
        self.pass_message.as_deref().unwrap_or(DEFAULT_PASS_MESSAGE)
    }

    /// The originating file name, or its placeholder.
    pub fn source(&self) -> &str {
        if self.source.is_empty() {
            DEFAULT_SOURCE
        } else {
            &self.source
        }
    }
}
