//! Row model for the two-column transcript table

use serde::Serialize;

/// One row of the output table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Row {
    /// Full-width row spanning both columns
    Separator {
        /// Row text
        text: String,
        /// Whether the text is bold (segment headers)
        bold: bool,
    },
    /// Speaker cell and content cell
    Split {
        /// Speaker label, colored when present
        #[serde(skip_serializing_if = "Option::is_none")]
        speaker: Option<String>,
        /// Content text
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
}

impl Row {
    /// Build a split row, treating empty strings as absent cells
    pub fn split(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        let speaker = speaker.into();
        let content = content.into();
        Row::Split {
            speaker: (!speaker.is_empty()).then_some(speaker),
            content: (!content.is_empty()).then_some(content),
        }
    }
}

/// The transformed transcript
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranscriptLayout {
    /// Table rows in document order
    pub rows: Vec<Row>,
    /// Number of segment markers seen
    pub segments: usize,
    /// Paragraphs dropped before the first segment marker
    pub skipped: usize,
}

impl TranscriptLayout {
    /// Create an empty layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the layout has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Speaker names in order of appearance, without repeats
    pub fn speakers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.rows {
            if let Row::Split {
                speaker: Some(name),
                ..
            } = row
            {
                if !seen.contains(&name.as_str()) {
                    seen.push(name);
                }
            }
        }
        seen
    }
}
