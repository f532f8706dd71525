//! End-to-end transcript conversion
//!
//! Read a DOCX transcript, lay it out as rows, write the two-column DOCX.

use std::path::{Path, PathBuf};

use tracing::{error, info};
use transdok_core::{Settings, TranscriptLayout, TranscriptTransformer};

use crate::archive::OoxmlArchive;
use crate::document::Document;
use crate::error::{OoxmlError, Result};
use crate::writer::TranscriptWriter;

/// Append `.docx` unless the path already ends with it
pub fn ensure_docx_extension(path: &Path) -> PathBuf {
    if path.to_string_lossy().ends_with(".docx") {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".docx");
        PathBuf::from(name)
    }
}

/// Read an input transcript and transform it into table rows
pub fn transform_file(input: &Path, settings: &Settings) -> Result<TranscriptLayout> {
    if !input.exists() {
        error!("Input file '{}' not found.", input.display());
        return Err(OoxmlError::InputNotFound(input.display().to_string()));
    }
    settings.validate()?;

    info!("Processing document: {}", input.display());
    let archive = OoxmlArchive::open(input)?;
    let document = Document::parse(archive.document_xml()?)?;

    let transformer = TranscriptTransformer::new(settings);
    Ok(transformer.transform(document.paragraph_texts()))
}

/// Convert `input` into a two-column transcript at `output`
///
/// Returns the path actually written, which always ends in `.docx`.
pub fn convert_file(input: &Path, output: &Path, settings: &Settings) -> Result<PathBuf> {
    let layout = transform_file(input, settings)?;

    let mut writer = TranscriptWriter::new(settings);
    if let Some(stem) = input.file_stem() {
        writer = writer.with_title(stem.to_string_lossy());
    }
    let bytes = writer.generate(&layout)?;

    let output = ensure_docx_extension(output);
    std::fs::write(&output, bytes)?;
    info!("Processed document saved as {}", output.display());

    Ok(output)
}
