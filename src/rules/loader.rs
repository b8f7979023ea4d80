//! Directory-based rule file loading.

use crate::error::{Error, Result};
use crate::rules::Rule;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level shape of a rule file.
#[derive(Debug, Deserialize)]
struct RuleFile {
    rules: Vec<Rule>,
}

/// A rule file that was skipped during loading, with the reason why.
#[derive(Debug)]
pub struct SkippedFile {
    /// Path of the skipped file.
    pub path: PathBuf,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Result of loading a rules directory: the usable rules plus any files
/// that had to be skipped.
///
/// The caller decides what to do about skips; the default policy is to
/// warn and continue with the rules that did load.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Rules collected across all readable files, in evaluation order.
    pub rules: Vec<Rule>,
    /// Files that could not be loaded, each omitted entirely.
    pub skipped: Vec<SkippedFile>,
}

/// Load every `*.json` rule file from a directory.
///
/// Files are enumerated in lexicographic file-name order so rule evaluation
/// order is stable across runs. Each rule is stamped with its defining
/// file's name as `source`. A file that cannot be read or parsed, or that
/// contains a rule with an empty pattern, is skipped whole and recorded in
/// [`LoadOutcome::skipped`]; one bad file never aborts the run.
///
/// An unreadable directory is an error: with no rules at all there is
/// nothing to validate against.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<LoadOutcome> {
    let dir = dir.as_ref();
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false)
        })
        .collect();

    // File-name order, not directory enumeration order, for reproducibility.
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut outcome = LoadOutcome::default();
    for path in paths {
        match load_file(&path) {
            Ok(rules) => outcome.rules.extend(rules),
            Err(err) => outcome.skipped.push(SkippedFile {
                path,
                reason: err.to_string(),
            }),
        }
    }

    Ok(outcome)
}

/// Load a single rule file, stamping each rule's `source`.
fn load_file(path: &Path) -> Result<Vec<Rule>> {
    let contents = fs::read_to_string(path)?;
    let file: RuleFile = serde_json::from_str(&contents)?;

    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut rules = file.rules;
    for rule in &mut rules {
        if rule.pattern.is_empty() {
            return Err(Error::RuleDefinition(format!(
                "empty \"find\" pattern in {}",
                source
            )));
        }
        rule.source = source.clone();
    }

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_rules(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_load_single_file() {
        let dir = tempfile::tempdir().unwrap();
        write_rules(
            dir.path(),
            "style.json",
            r#"{"rules": [{"find": "utiliz", "fail-message": "avoid 'utilize'"}]}"#,
        );

        let outcome = load_dir(dir.path()).unwrap();
        assert_eq!(outcome.rules.len(), 1);
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.rules[0].source, "style.json");
    }

    #[test]
    fn test_malformed_file_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_rules(dir.path(), "bad.json", "{ this is not json");
        write_rules(dir.path(), "good.json", r#"{"rules": [{"find": "x"}]}"#);

        let outcome = load_dir(dir.path()).unwrap();
        assert_eq!(outcome.rules.len(), 1);
        assert_eq!(outcome.rules[0].source, "good.json");
        assert_eq!(outcome.skipped.len(), 1);
        assert!(outcome.skipped[0].path.ends_with("bad.json"));
    }

    #[test]
    fn test_missing_rules_key_skips_file() {
        let dir = tempfile::tempdir().unwrap();
        write_rules(dir.path(), "norules.json", r#"{"patterns": []}"#);

        let outcome = load_dir(dir.path()).unwrap();
        assert!(outcome.rules.is_empty());
        assert_eq!(outcome.skipped.len(), 1);
    }

    #[test]
    fn test_rule_missing_pattern_skips_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        write_rules(
            dir.path(),
            "partial.json",
            r#"{"rules": [{"find": "ok"}, {"fail-message": "no pattern"}]}"#,
        );

        // Partial inclusion is not allowed: the file contributes nothing.
        let outcome = load_dir(dir.path()).unwrap();
        assert!(outcome.rules.is_empty());
        assert_eq!(outcome.skipped.len(), 1);
    }

    #[test]
    fn test_empty_pattern_skips_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        write_rules(dir.path(), "empty.json", r#"{"rules": [{"find": ""}]}"#);

        let outcome = load_dir(dir.path()).unwrap();
        assert!(outcome.rules.is_empty());
        assert_eq!(outcome.skipped.len(), 1);
    }

    #[test]
    fn test_files_loaded_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_rules(dir.path(), "b.json", r#"{"rules": [{"find": "second"}]}"#);
        write_rules(dir.path(), "a.json", r#"{"rules": [{"find": "first"}]}"#);

        let outcome = load_dir(dir.path()).unwrap();
        let patterns: Vec<&str> = outcome.rules.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["first", "second"]);
    }

    #[test]
    fn test_duplicate_patterns_both_kept() {
        let dir = tempfile::tempdir().unwrap();
        write_rules(dir.path(), "one.json", r#"{"rules": [{"find": "e\\.g\\."}]}"#);
        write_rules(dir.path(), "two.json", r#"{"rules": [{"find": "e\\.g\\."}]}"#);

        let outcome = load_dir(dir.path()).unwrap();
        assert_eq!(outcome.rules.len(), 2);
        assert_eq!(outcome.rules[0].source, "one.json");
        assert_eq!(outcome.rules[1].source, "two.json");
    }

    #[test]
    fn test_non_json_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_rules(dir.path(), "notes.txt", "not a rule file");
        write_rules(dir.path(), "rules.json", r#"{"rules": [{"find": "x"}]}"#);

        let outcome = load_dir(dir.path()).unwrap();
        assert_eq!(outcome.rules.len(), 1);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(load_dir(&missing).is_err());
    }
}
