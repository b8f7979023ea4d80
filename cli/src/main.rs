//! docqa CLI - validate Word document text against a set of rules.
//!
//! Loads JSON rule files from a directory, extracts the paragraph text of
//! each DOCX file given on the command line, and reports which rules
//! matched (failed) or did not (passed).

use clap::Parser;
use colored::Colorize;
use docqa::{extract_text, rules, validate, Renderer, ValidateOptions};
use std::io::{self, Write};
use std::path::PathBuf;

/// Validate document text against a set of rules
#[derive(Parser)]
#[command(
    name = "docqa",
    version,
    about = "Validate Word document text against a set of rules",
    long_about = "docqa - rule-based text validation for Word documents.\n\n\
                  Extracts the paragraph text of each DOCX file and checks it against\n\
                  regex rules loaded from a directory of JSON rule files."
)]
struct Cli {
    /// DOCX file(s) to validate
    #[arg(required = true)]
    file: Vec<PathBuf>,

    /// Do not use terminal colours
    #[arg(short = 'c', long)]
    no_color: bool,

    /// Print success messages for rules that do not match
    #[arg(short, long)]
    passing: bool,

    /// Print context for each match
    #[arg(short = 'x', long)]
    context: bool,

    /// Characters of context on each side of a match
    #[arg(long, default_value_t = 30)]
    radius: usize,

    /// Directory containing JSON rule files
    #[arg(short, long, default_value = "rules")]
    rules: PathBuf,

    /// Emit each report as JSON instead of rendered text
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => {}
        // A document could not be opened or extracted; rule failures alone
        // never affect the exit status.
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    // Rules load once and are reused for every document in the batch.
    let loaded = rules::load_dir(&cli.rules)?;

    let renderer = Renderer::new(!cli.no_color).with_passes(cli.passing);
    renderer.render_skipped(&loaded.skipped, &mut io::stderr())?;

    let options = ValidateOptions::new()
        .with_context(cli.context)
        .with_context_radius(cli.radius);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut all_extracted = true;

    if cli.file.len() > 1 && !cli.json {
        writeln!(out, "[ + ] Validating {} files.", cli.file.len())?;
        writeln!(out, "[ + ] {}", "-".repeat(90))?;
    }

    for path in &cli.file {
        if !cli.json {
            writeln!(
                out,
                "[ + ] Running validation rules against file {}",
                path.display()
            )?;
        }

        // A bad document is skipped; the rest of the batch still runs.
        let text = match extract_text(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!(
                    "{}",
                    warn_line(
                        &format!("[ ! ] Error, could not open file {}: {}", path.display(), e),
                        !cli.no_color
                    )
                );
                all_extracted = false;
                continue;
            }
        };

        let report = validate::evaluate(&text, &loaded.rules, &options);

        if cli.json {
            writeln!(out, "{}", report.to_json()?)?;
        } else {
            renderer.render(&report, &mut out)?;
        }

        if cli.file.len() > 1 && !cli.json {
            writeln!(out, "[ + ] {}", "-".repeat(90))?;
        }
    }

    if cli.file.len() > 1 && !cli.json {
        writeln!(out, "[ + ] Finished validating {} files.", cli.file.len())?;
    }

    Ok(all_extracted)
}

fn warn_line(line: &str, color: bool) -> String {
    if color {
        line.red().to_string()
    } else {
        line.to_string()
    }
}
