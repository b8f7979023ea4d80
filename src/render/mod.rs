//! Terminal rendering of validation reports.
//!
//! The renderer is configured once at construction with its color mode and
//! pass-visibility; there is no process-wide styling state. Disabling color
//! changes presentation only, never content or counts.

use crate::rules::SkippedFile;
use crate::validate::{ContextWindow, Finding, Outcome, Report};
use colored::Colorize;
use std::io::{self, Write};

/// Renders a [`Report`] as line-oriented human-readable text.
#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
    show_passes: bool,
}

impl Renderer {
    /// Create a renderer. `color` controls ANSI escape styling.
    pub fn new(color: bool) -> Self {
        Self {
            color,
            show_passes: false,
        }
    }

    /// Also render passing rules, not just violations.
    pub fn with_passes(mut self, show: bool) -> Self {
        self.show_passes = show;
        self
    }

    /// Write the full report: one line per finding (passes only when
    /// enabled), context windows where present, then a summary line.
    pub fn render<W: Write>(&self, report: &Report, w: &mut W) -> io::Result<()> {
        for finding in &report.findings {
            self.render_finding(finding, w)?;
        }
        self.render_summary(report, w)
    }

    /// Write one warning line per skipped rule file.
    pub fn render_skipped<W: Write>(&self, skipped: &[SkippedFile], w: &mut W) -> io::Result<()> {
        for skip in skipped {
            let line = format!(
                "[ ! ] Could not process rule file {} ({}), skipping...",
                skip.path.display(),
                skip.reason
            );
            writeln!(w, "{}", self.yellow(&line))?;
        }
        Ok(())
    }

    fn render_finding<W: Write>(&self, finding: &Finding, w: &mut W) -> io::Result<()> {
        match &finding.outcome {
            Outcome::Passed => {
                if self.show_passes {
                    let line = format!(
                        "[ + ] [{}] {}",
                        finding.rule.source(),
                        finding.rule.pass_message()
                    );
                    writeln!(w, "{}", self.green(&line))?;
                }
            }
            Outcome::Failed => {
                let line = format!(
                    "[ ! ] [{}] {} (\"{}\" from pattern \"{}\") [ {} ]",
                    finding.rule.source(),
                    finding.rule.fail_message(),
                    finding.first_match.as_deref().unwrap_or_default(),
                    finding.rule.pattern,
                    finding.occurrence_count
                );
                writeln!(w, "{}", self.red(&line))?;

                for (i, occurrence) in finding.occurrences.iter().enumerate() {
                    if let Some(ref window) = occurrence.window {
                        writeln!(w, "  [ Match {} ] {}", i + 1, "-".repeat(70))?;
                        self.render_window(window, w)?;
                        writeln!(w)?;
                    }
                }
            }
            Outcome::Error(reason) => {
                let line = format!(
                    "[ ! ] [{}] Could not evaluate pattern \"{}\": {}",
                    finding.rule.source(),
                    finding.rule.pattern,
                    reason
                );
                writeln!(w, "{}", self.yellow(&line))?;
            }
        }
        Ok(())
    }

    /// Render one context window, re-applying the highlight on every line
    /// so a match spanning a line break stays visually distinguished.
    fn render_window<W: Write>(&self, window: &ContextWindow, w: &mut W) -> io::Result<()> {
        let mut offset = 0;
        for line in window.text.split('\n') {
            let line_start = offset;
            let line_end = offset + line.len();

            // Overlap of the highlight span with this line, in line-relative
            // offsets. Empty when the highlight lies entirely elsewhere.
            let hl_start = window.highlight_start.clamp(line_start, line_end) - line_start;
            let hl_end = window.highlight_end.clamp(line_start, line_end) - line_start;

            writeln!(
                w,
                "    {}{}{}",
                self.yellow(&line[..hl_start]),
                self.highlight(&line[hl_start..hl_end]),
                self.yellow(&line[hl_end..])
            )?;

            offset = line_end + 1;
        }
        Ok(())
    }

    fn render_summary<W: Write>(&self, report: &Report, w: &mut W) -> io::Result<()> {
        if report.errored > 0 {
            writeln!(
                w,
                "[ + ] Finished. {} rules passed, {} failed, {} could not be evaluated.",
                report.passed, report.failed, report.errored
            )
        } else {
            writeln!(
                w,
                "[ + ] Finished. {} rules passed, {} failed.",
                report.passed, report.failed
            )
        }
    }

    fn red(&self, s: &str) -> String {
        if self.color {
            s.red().to_string()
        } else {
            s.to_string()
        }
    }

    fn green(&self, s: &str) -> String {
        if self.color {
            s.green().to_string()
        } else {
            s.to_string()
        }
    }

    fn yellow(&self, s: &str) -> String {
        if self.color {
            s.yellow().to_string()
        } else {
            s.to_string()
        }
    }

    fn highlight(&self, s: &str) -> String {
        if self.color {
            s.black().on_bright_yellow().to_string()
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;
    use crate::validate::{evaluate, ValidateOptions};

    fn render_to_string(renderer: &Renderer, report: &Report) -> String {
        let mut out = Vec::new();
        renderer.render(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sourced_rule(pattern: &str, source: &str) -> Rule {
        let mut rule = Rule::new(pattern);
        rule.source = source.to_string();
        rule
    }

    #[test]
    fn test_failed_line_content() {
        let mut rule = sourced_rule("utiliz", "style.json");
        rule.fail_message = Some("avoid 'utilize'".to_string());
        let report = evaluate(
            "The widget utilizes a gizmo.",
            &[rule],
            &ValidateOptions::new(),
        );

        let out = render_to_string(&Renderer::new(false), &report);
        assert!(out.contains("[ ! ] [style.json] avoid 'utilize'"));
        assert!(out.contains("(\"utiliz\" from pattern \"utiliz\")"));
        assert!(out.contains("[ 1 ]"));
        assert!(out.contains("1 failed."));
    }

    #[test]
    fn test_placeholders_for_missing_messages() {
        let report = evaluate("foo", &[Rule::new("foo")], &ValidateOptions::new());
        let out = render_to_string(&Renderer::new(false), &report);
        assert!(out.contains("Rule fail text not set"));
        assert!(out.contains("[Rule source not set]"));
    }

    #[test]
    fn test_passes_hidden_by_default() {
        let mut rule = sourced_rule("absent", "style.json");
        rule.pass_message = Some("all clear".to_string());
        let report = evaluate("text", &[rule], &ValidateOptions::new());

        let out = render_to_string(&Renderer::new(false), &report);
        assert!(!out.contains("all clear"));
        assert!(out.contains("1 rules passed"));

        let out = render_to_string(&Renderer::new(false).with_passes(true), &report);
        assert!(out.contains("[ + ] [style.json] all clear"));
    }

    #[test]
    fn test_error_finding_is_marked() {
        let report = evaluate("text", &[Rule::new("(bad")], &ValidateOptions::new());
        let out = render_to_string(&Renderer::new(false), &report);
        assert!(out.contains("Could not evaluate pattern \"(bad\""));
        assert!(out.contains("1 could not be evaluated."));
    }

    #[test]
    fn test_no_color_output_has_no_ansi() {
        let options = ValidateOptions::new().with_context(true);
        let report = evaluate("foo bar foo", &[Rule::new("foo")], &options);
        let out = render_to_string(&Renderer::new(false).with_passes(true), &report);
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_color_mode_changes_presentation_only() {
        // Captured test output is not a tty; force styling through.
        colored::control::set_override(true);
        let options = ValidateOptions::new().with_context(true);
        let report = evaluate("foo bar\nbaz foo", &[Rule::new("foo")], &options);

        let plain = render_to_string(&Renderer::new(false), &report);
        let colored = render_to_string(&Renderer::new(true), &report);

        // Stripping escapes from the colored output yields the plain output.
        let stripped: String = {
            let mut result = String::new();
            let mut chars = colored.chars().peekable();
            while let Some(c) = chars.next() {
                if c == '\x1b' {
                    for esc in chars.by_ref() {
                        if esc == 'm' {
                            break;
                        }
                    }
                } else {
                    result.push(c);
                }
            }
            result
        };
        assert_eq!(stripped, plain);
    }

    #[test]
    fn test_context_window_rendered_with_match_line() {
        let options = ValidateOptions::new().with_context(true).with_context_radius(5);
        let report = evaluate("some needle here", &[Rule::new("needle")], &options);
        let out = render_to_string(&Renderer::new(false), &report);
        assert!(out.contains("[ Match 1 ]"));
        assert!(out.contains("some needle here"));
    }

    #[test]
    fn test_window_with_line_break_renders_every_line() {
        let options = ValidateOptions::new().with_context(true).with_context_radius(6);
        let report = evaluate(
            "alpha line\nbeta line",
            &[Rule::new("line\nbeta")],
            &options,
        );
        let out = render_to_string(&Renderer::new(false), &report);

        // Both halves of the window appear, each on its own indented line.
        assert!(out.contains("    alpha line"));
        assert!(out.contains("    beta line"));
    }

    #[test]
    fn test_highlight_reapplied_after_line_break() {
        colored::control::set_override(true);
        let options = ValidateOptions::new().with_context(true).with_context_radius(6);
        let report = evaluate(
            "alpha line\nbeta line",
            &[Rule::new("line\nbeta")],
            &options,
        );
        let out = render_to_string(&Renderer::new(true), &report);

        // The bright-yellow background opens again on the second window line.
        let window_lines: Vec<&str> = out
            .lines()
            .filter(|l| l.starts_with("    ") && l.contains("\x1b[103"))
            .collect();
        assert!(window_lines.len() >= 2, "highlight not reapplied: {:?}", out);
    }
}
