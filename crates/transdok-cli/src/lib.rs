//! transdok CLI - Command-line interface library
//!
//! This library provides the CLI functionality for transdok:
//! - Convert: Reformat a DOCX transcript into a two-column table document
//! - Preview: Print the table rows as text or JSON
//!
//! # Library Usage
//!
//! ```ignore
//! use transdok_cli::{convert_command, preview_command, OutputFormat};
//!
//! convert_command(&input, &output, None)?;
//! preview_command(&input, OutputFormat::Json, None)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Convert a transcript
//! transdok convert interview.docx --output interview-table.docx
//!
//! # Inspect the rows first
//! transdok preview interview.docx --format json
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{convert_command, preview_command, render_preview, run_cli, OutputFormat};
