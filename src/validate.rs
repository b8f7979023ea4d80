//! The rule validation engine.
//!
//! [`evaluate`] is a pure function of (text, rules, options): it runs every
//! rule's pattern against the extracted document text, classifies each rule
//! as passed, failed, or errored, and aggregates the outcomes into a
//! [`Report`]. It holds no state across calls and evaluates rules in the
//! order they appear in the slice, so the same inputs always produce the
//! same report.

use crate::rules::Rule;
use regex::Regex;
use serde::Serialize;

/// Options controlling rule evaluation.
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Record a context window per match occurrence.
    pub include_context: bool,

    /// Characters of surrounding text on each side of a match when
    /// building a context window. Clamped to the text bounds.
    pub context_radius: usize,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            include_context: false,
            context_radius: 30,
        }
    }
}

impl ValidateOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable context windows.
    pub fn with_context(mut self, include: bool) -> Self {
        self.include_context = include;
        self
    }

    /// Set the context window radius.
    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }
}

/// A slice of text surrounding one match, with the matched span marked.
///
/// `highlight_start..highlight_end` are byte offsets **relative to the
/// window**, not to the full text, so a renderer can style exactly the
/// matched span. The window may contain line breaks; re-applying highlight
/// state across them is the renderer's job.
#[derive(Debug, Clone, Serialize)]
pub struct ContextWindow {
    /// The window text.
    pub text: String,
    /// Offset within `text` where the match begins.
    pub highlight_start: usize,
    /// Offset within `text` where the match ends.
    pub highlight_end: usize,
}

/// One occurrence of a rule's pattern in the document text.
#[derive(Debug, Clone, Serialize)]
pub struct MatchOccurrence {
    /// The matched substring.
    pub matched: String,
    /// Byte offset of the match start in the full text.
    pub start: usize,
    /// Byte offset of the match end in the full text.
    pub end: usize,
    /// Surrounding context, present when requested via
    /// [`ValidateOptions::include_context`].
    pub window: Option<ContextWindow>,
}

/// Per-rule classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The pattern did not occur in the text.
    Passed,
    /// The pattern occurred at least once.
    Failed,
    /// The rule could not be evaluated (e.g. invalid pattern syntax).
    Error(String),
}

/// The outcome of evaluating one rule against one document's text.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// The rule that was evaluated.
    pub rule: Rule,
    /// Pass/fail/error classification.
    pub outcome: Outcome,
    /// Text of the first match, kept for reporting even when context
    /// windows were not requested.
    pub first_match: Option<String>,
    /// Number of non-overlapping matches found.
    pub occurrence_count: usize,
    /// One entry per match when context was requested; empty otherwise.
    pub occurrences: Vec<MatchOccurrence>,
}

/// Validation results for one document: findings in rule-evaluation order
/// plus summary counters.
///
/// `passed + failed` equals the number of evaluable rules; rules that
/// errored are counted in `errored` only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// One finding per rule, in evaluation order.
    pub findings: Vec<Finding>,
    /// Rules whose pattern did not occur.
    pub passed: usize,
    /// Rules whose pattern occurred at least once.
    pub failed: usize,
    /// Rules that could not be evaluated.
    pub errored: usize,
}

impl Report {
    /// Render the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Evaluate every rule against the text and build a [`Report`].
///
/// Each rule is searched with find-all semantics: a rule fails with an
/// occurrence count rather than a bare yes/no, so callers can weight
/// repeated violations. Patterns are matched case-sensitively; rule
/// authors opt in to case folding with an inline `(?i)` flag. A rule whose
/// pattern fails to compile is classified [`Outcome::Error`] and never
/// aborts evaluation of the remaining rules.
///
/// # Example
///
/// ```
/// use docqa::rules::Rule;
/// use docqa::validate::{evaluate, Outcome, ValidateOptions};
///
/// let rules = vec![Rule::new("utiliz")];
/// let report = evaluate("The widget utilizes a gizmo.", &rules, &ValidateOptions::new());
/// assert_eq!(report.failed, 1);
/// assert_eq!(report.findings[0].outcome, Outcome::Failed);
/// ```
pub fn evaluate(text: &str, rules: &[Rule], options: &ValidateOptions) -> Report {
    let mut report = Report::default();

    for rule in rules {
        let finding = evaluate_rule(text, rule, options);
        match finding.outcome {
            Outcome::Passed => report.passed += 1,
            Outcome::Failed => report.failed += 1,
            Outcome::Error(_) => report.errored += 1,
        }
        report.findings.push(finding);
    }

    report
}

fn evaluate_rule(text: &str, rule: &Rule, options: &ValidateOptions) -> Finding {
    let regex = match Regex::new(&rule.pattern) {
        Ok(regex) => regex,
        Err(err) => {
            return Finding {
                rule: rule.clone(),
                outcome: Outcome::Error(err.to_string()),
                first_match: None,
                occurrence_count: 0,
                occurrences: Vec::new(),
            }
        }
    };

    let matches: Vec<regex::Match> = regex.find_iter(text).collect();
    if matches.is_empty() {
        return Finding {
            rule: rule.clone(),
            outcome: Outcome::Passed,
            first_match: None,
            occurrence_count: 0,
            occurrences: Vec::new(),
        };
    }

    let occurrences = if options.include_context {
        matches
            .iter()
            .map(|m| MatchOccurrence {
                matched: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
                window: Some(context_window(
                    text,
                    m.start(),
                    m.end(),
                    options.context_radius,
                )),
            })
            .collect()
    } else {
        Vec::new()
    };

    Finding {
        rule: rule.clone(),
        outcome: Outcome::Failed,
        first_match: Some(matches[0].as_str().to_string()),
        occurrence_count: matches.len(),
        occurrences,
    }
}

/// Build the context window around a match at `[start, end)`.
///
/// The radius counts characters, not bytes, so multi-byte prose gets the
/// same amount of visible context as ASCII. Walking `char_indices` from
/// the match bounds keeps every slice on a character boundary; the window
/// is clamped to the text bounds when fewer than `radius` characters
/// remain on either side.
fn context_window(text: &str, start: usize, end: usize, radius: usize) -> ContextWindow {
    let window_start = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start);
    let window_end = text[end..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    ContextWindow {
        text: text[window_start..window_end].to_string(),
        highlight_start: start - window_start,
        highlight_end: end - window_start,
    }
}
