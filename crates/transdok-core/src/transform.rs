//! Paragraph stream to table rows
//!
//! Walks the input paragraphs once. Everything before the first segment
//! marker is treated as a title/preamble and dropped. Each segment marker
//! becomes a separator row plus a bold header row; speaker lines are wrapped
//! into the content column with the speaker name on the first line only.

use tracing::{debug, info};

use crate::classify::{LineClassifier, LineKind};
use crate::model::{Row, TranscriptLayout};
use crate::settings::Settings;
use crate::wrap::split_text_into_lines;

/// Build the bold header row text for a segment
///
/// `timecode`, then padding spaces, then a space and the segment number
/// zero-padded to two digits.
pub fn format_segment_header(
    timecode: &str,
    number: usize,
    separator_length: usize,
    header_padding: usize,
) -> String {
    let spacing = (separator_length + header_padding)
        .saturating_sub(timecode.chars().count())
        .saturating_sub(2);
    format!("{}{} {:02}", timecode, " ".repeat(spacing), number)
}

fn preview(text: &str) -> String {
    text.chars().take(30).collect()
}

/// Converts classified paragraphs into rows
#[derive(Debug, Clone)]
pub struct TranscriptTransformer {
    classifier: LineClassifier,
    separator_length: usize,
    header_padding: usize,
    separator_char: String,
    max_line_length: usize,
}

impl TranscriptTransformer {
    /// Create a transformer for the given layout settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            classifier: LineClassifier::new(),
            separator_length: settings.separator_length(),
            header_padding: settings.layout.header_padding,
            separator_char: settings.layout.separator_char.clone(),
            max_line_length: settings.layout.max_line_length,
        }
    }

    /// Transform paragraph texts into a table layout
    pub fn transform<I, S>(&self, paragraphs: I) -> TranscriptLayout
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut layout = TranscriptLayout::new();
        let mut in_preamble = true;

        for paragraph in paragraphs {
            let kind = self.classifier.classify(paragraph.as_ref());

            if in_preamble {
                if matches!(kind, LineKind::SegmentMarker { .. }) {
                    in_preamble = false;
                } else {
                    layout.skipped += 1;
                    continue;
                }
            }

            match kind {
                LineKind::SegmentMarker { timecode } => {
                    layout.segments += 1;
                    self.push_segment(&mut layout, &timecode);
                }
                LineKind::Speaker { name, content } => {
                    self.push_speaker(&mut layout, name, &content);
                }
                LineKind::Plain(text) => {
                    debug!("Processed non-speaker line: {}...", preview(&text));
                    layout.rows.push(Row::split("", text));
                }
                LineKind::Empty => {}
            }
        }

        if layout.skipped > 0 {
            debug!("Skipped {} preamble paragraphs", layout.skipped);
        }
        layout
    }

    fn push_segment(&self, layout: &mut TranscriptLayout, timecode: &str) {
        layout.rows.push(Row::Separator {
            text: self.separator_char.repeat(self.separator_length),
            bold: false,
        });

        let header = format_segment_header(
            timecode,
            layout.segments,
            self.separator_length,
            self.header_padding,
        );
        info!("Added segment marker: {}", header);
        layout.rows.push(Row::Separator {
            text: header,
            bold: true,
        });
    }

    fn push_speaker(&self, layout: &mut TranscriptLayout, name: String, content: &str) {
        let mut lines = split_text_into_lines(content, self.max_line_length).into_iter();

        match lines.next() {
            Some(first) => {
                layout.rows.push(Row::split(name.clone(), first));
                layout.rows.extend(lines.map(|line| Row::split("", line)));
            }
            None => layout.rows.push(Row::split(name.clone(), "")),
        }

        info!("Processed speaker: {}, content: {}...", name, preview(content));
    }
}
