//! Error types for the docqa library.

use std::io;
use thiserror::Error;

/// Result type alias for docqa operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting or validating a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading the ZIP container.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required document component is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// A rule file could not be read or deserialized.
    #[error("Rule file error: {0}")]
    RuleFile(String),

    /// An individual rule definition is unusable.
    #[error("Invalid rule: {0}")]
    RuleDefinition(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::RuleFile(err.to_string())
    }
}
