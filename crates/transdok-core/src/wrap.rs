//! Greedy word wrapping for the content column

use tracing::debug;

/// Split text into lines of at most `max_length` characters, keeping words whole
///
/// Words are separated by any whitespace and re-joined with single spaces.
/// A word longer than `max_length` gets a line of its own.
pub fn split_text_into_lines(text: &str, max_length: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_length = 0usize;

    for word in text.split_whitespace() {
        let word_length = word.chars().count();
        let gap = usize::from(current_length > 0);

        if current_length + word_length + gap <= max_length {
            current.push(word);
            current_length += word_length + gap;
        } else {
            if !current.is_empty() {
                lines.push(current.join(" "));
            }
            current = vec![word];
            current_length = word_length;
        }
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    debug!("Split content into {} lines", lines.len());
    lines
}
