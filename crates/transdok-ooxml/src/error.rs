//! Error types for DOCX operations

use thiserror::Error;
use transdok_core::SettingsError;

/// Errors that can occur while reading or writing transcripts
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Input transcript does not exist
    #[error("Input file '{0}' not found.")]
    InputNotFound(String),

    /// Required file not found in archive
    #[error("Required file not found: {0}")]
    MissingFile(String),

    /// Layout settings rejected
    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),
}

/// Result type for DOCX operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
