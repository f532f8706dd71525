//! Line-by-line classifier for transcript paragraphs
//!
//! Decides whether a paragraph opens a new segment, carries a speaker label,
//! or is plain text that belongs in the content column.

use regex::Regex;
use std::sync::OnceLock;

/// Dashed run that, together with a timecode, marks a new segment
pub const SEGMENT_DASHES: &str = "----------";

/// Classification of a single transcript paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Start of a new segment, with the first timecode on the line
    SegmentMarker {
        /// Timecode such as `1:05` or `01:02:03`
        timecode: String,
    },
    /// Dialogue line with a speaker label
    Speaker {
        /// Speaker name without the trailing colon
        name: String,
        /// Remaining words joined by single spaces (may be empty)
        content: String,
    },
    /// Any other non-empty text
    Plain(String),
    /// Nothing left after trimming
    Empty,
}

fn timecode_re() -> &'static Regex {
    static TIMECODE_RE: OnceLock<Regex> = OnceLock::new();
    TIMECODE_RE.get_or_init(|| Regex::new(r"\b(\d{1,2}:\d{2}(?::\d{2})?)\b").unwrap())
}

fn leading_timecode_re() -> &'static Regex {
    static LEADING_RE: OnceLock<Regex> = OnceLock::new();
    LEADING_RE.get_or_init(|| Regex::new(r"^\b(\d{1,2}:\d{2}(?::\d{2})?)\b").unwrap())
}

fn speaker_re() -> &'static Regex {
    static SPEAKER_RE: OnceLock<Regex> = OnceLock::new();
    // ASCII capitals only, optional colon, then whitespace
    SPEAKER_RE.get_or_init(|| Regex::new(r"^[A-Z]+:?\s").unwrap())
}

/// Find the first timecode anywhere in the text
pub fn find_timecode(text: &str) -> Option<&str> {
    timecode_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// True when the text carries both a timecode and the segment dashes
pub fn is_segment_marker(text: &str) -> bool {
    text.contains(SEGMENT_DASHES) && timecode_re().is_match(text)
}

/// Remove a timecode that starts the text
///
/// Every occurrence of that same timecode string is removed, not just the
/// leading one. Text without a leading timecode is only trimmed.
pub fn strip_leading_timecode(text: &str) -> String {
    match leading_timecode_re().find(text) {
        Some(m) => text.replace(m.as_str(), "").trim().to_string(),
        None => text.trim().to_string(),
    }
}

/// Stateless paragraph classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct LineClassifier;

impl LineClassifier {
    /// Create a classifier
    pub fn new() -> Self {
        Self
    }

    /// Classify one paragraph of transcript text
    pub fn classify(&self, text: &str) -> LineKind {
        let trimmed = text.trim();

        // Segment markers win over everything else
        if is_segment_marker(trimmed) {
            if let Some(timecode) = find_timecode(trimmed) {
                return LineKind::SegmentMarker {
                    timecode: timecode.to_string(),
                };
            }
        }

        let text = strip_leading_timecode(trimmed);

        if speaker_re().is_match(&text) {
            let mut words = text.split_whitespace();
            let name = words
                .next()
                .map(|w| w.trim_end_matches(':').to_string())
                .unwrap_or_default();
            let content = words.collect::<Vec<_>>().join(" ");
            return LineKind::Speaker { name, content };
        }

        if text.is_empty() {
            LineKind::Empty
        } else {
            LineKind::Plain(text)
        }
    }
}
