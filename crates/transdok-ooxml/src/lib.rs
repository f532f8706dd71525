//! # transdok-ooxml
//!
//! DOCX reading and generation for transdok.
//!
//! This crate provides functionality to:
//! - Read the paragraph text of an input transcript
//! - Render a transcript layout as a two-column, borderless table
//! - Convert a transcript file end to end
//!
//! ## Example: Converting a Transcript
//!
//! ```no_run
//! use std::path::Path;
//! use transdok_core::Settings;
//! use transdok_ooxml::convert_file;
//!
//! let written = convert_file(
//!     Path::new("interview.docx"),
//!     Path::new("interview-table"),
//!     &Settings::default(),
//! )?;
//! println!("{}", written.display());
//! # Ok::<(), transdok_ooxml::OoxmlError>(())
//! ```

pub mod archive;
pub mod convert;
pub mod document;
pub mod error;
pub mod units;
pub mod writer;

#[cfg(test)]
mod test_utils;

pub use archive::OoxmlArchive;
pub use convert::{convert_file, ensure_docx_extension, transform_file};
pub use document::{Block, Document, Paragraph, Run, Table, TableCell, TableRow};
pub use error::{OoxmlError, Result};
pub use writer::TranscriptWriter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
