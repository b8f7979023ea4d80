//! # docqa
//!
//! Rule-based text validation for Word documents.
//!
//! This library extracts the plain text of a DOCX package and checks it
//! against user-authored regex rules, reporting matches as style or
//! quality violations.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docqa::{extract_text, rules, validate};
//!
//! let text = extract_text("report.docx")?;
//! let loaded = rules::load_dir("rules")?;
//! let report = validate::evaluate(&text, &loaded.rules, &Default::default());
//! println!("{} passed, {} failed", report.passed, report.failed);
//! # Ok::<(), docqa::Error>(())
//! ```
//!
//! ## Components
//!
//! - [`docx`] — paragraph text extraction from the DOCX container
//! - [`rules`] — the rule model and directory-based rule loading
//! - [`validate`] — the validation engine, a pure function of
//!   (text, rules, options)
//! - [`render`] — terminal rendering of validation reports

pub mod container;
pub mod docx;
pub mod error;
pub mod render;
pub mod rules;
pub mod validate;

// Re-exports
pub use container::DocxContainer;
pub use docx::{extract_text, extract_text_from_bytes};
pub use error::{Error, Result};
pub use render::Renderer;
pub use rules::{LoadOutcome, Rule, SkippedFile};
pub use validate::{evaluate, Finding, Outcome, Report, ValidateOptions};
