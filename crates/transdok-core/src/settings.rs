//! Layout settings
//!
//! Page geometry, wrapping limits, table widths and fonts used when a
//! transcript is re-emitted as a two-column table. Every section is optional
//! in TOML; missing values fall back to the defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised by [`Settings::validate`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// Content lines must hold at least one character
    #[error("layout.max_line_length must be greater than zero")]
    ZeroLineLength,

    /// Character width estimate must be positive
    #[error("layout.char_width must be positive, got {0}")]
    InvalidCharWidth(f64),

    /// Separator rows need a character to repeat
    #[error("layout.separator_char must not be empty")]
    EmptySeparator,

    /// Speaker color is not an RRGGBB hex value
    #[error("speaker.color must be six hex digits (RRGGBB), got '{0}'")]
    InvalidColor(String),
}

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Output page geometry
    pub page: PageSettings,
    /// Wrapping and separator sizing
    pub layout: LayoutSettings,
    /// Column widths of the output table
    pub table: TableSettings,
    /// Fonts and paragraph spacing
    pub fonts: FontSettings,
    /// Speaker column styling
    pub speaker: SpeakerSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Check values that would produce a broken layout
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.layout.max_line_length == 0 {
            return Err(SettingsError::ZeroLineLength);
        }
        if !(self.layout.char_width > 0.0) {
            return Err(SettingsError::InvalidCharWidth(self.layout.char_width));
        }
        if self.layout.separator_char.is_empty() {
            return Err(SettingsError::EmptySeparator);
        }
        let color = &self.speaker.color;
        if color.len() != 6 || !color.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SettingsError::InvalidColor(color.clone()));
        }
        Ok(())
    }

    /// Approximate number of characters that fit across the page
    pub fn available_width(&self) -> usize {
        let inches = self.page.width - self.page.left_margin - self.page.right_margin
            + self.layout.width_adjustment;
        // Round away float noise before flooring (0.3 / 0.1 is 2.9999999999999996)
        let chars = (inches / self.layout.char_width * 1e9).round() / 1e9;
        let count = chars.floor().max(0.0) as usize;
        debug!(
            "Calculated available width: {} inches, approximately {} characters",
            inches, count
        );
        count
    }

    /// Length of a full-width separator row
    pub fn separator_length(&self) -> usize {
        let length = self.available_width() + self.layout.separator_padding;
        debug!("Separator length set to: {}", length);
        length
    }
}

/// Page geometry in inches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageSettings {
    /// Page width
    pub width: f64,
    /// Page height
    pub height: f64,
    /// Left margin
    pub left_margin: f64,
    /// Right margin
    pub right_margin: f64,
    /// Top margin
    pub top_margin: f64,
    /// Bottom margin
    pub bottom_margin: f64,
}

impl Default for PageSettings {
    fn default() -> Self {
        // US Letter
        Self {
            width: 8.5,
            height: 11.0,
            left_margin: 0.7,
            right_margin: 0.5,
            top_margin: 0.5,
            bottom_margin: 0.5,
        }
    }
}

/// Wrapping and separator sizing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutSettings {
    /// Maximum characters per content line
    pub max_line_length: usize,
    /// Estimated width of one character, in inches
    pub char_width: f64,
    /// Inches added to the usable page width before converting to characters
    pub width_adjustment: f64,
    /// Extra characters appended to the separator row
    pub separator_padding: usize,
    /// Extra spaces inserted into segment headers
    pub header_padding: usize,
    /// Character repeated to draw separator rows
    pub separator_char: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            max_line_length: 90,
            char_width: 0.1,
            width_adjustment: 2.7,
            separator_padding: 4,
            header_padding: 26,
            separator_char: "-".to_string(),
        }
    }
}

/// Column widths in centimeters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableSettings {
    /// Speaker column width
    pub speaker_width: f64,
    /// Content column width
    pub content_width: f64,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            speaker_width: 3.0,
            content_width: 16.0,
        }
    }
}

/// Fonts and spacing, sizes in points
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontSettings {
    /// Font family for the whole document
    pub family: String,
    /// Body text size
    pub body_size: f64,
    /// Size of separator and segment header rows
    pub separator_size: f64,
    /// Spacing after each cell paragraph
    pub space_after: f64,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            family: "Verdana".to_string(),
            body_size: 12.0,
            separator_size: 11.0,
            space_after: 6.0,
        }
    }
}

/// Speaker column styling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpeakerSettings {
    /// Speaker name color as RRGGBB
    pub color: String,
}

impl Default for SpeakerSettings {
    fn default() -> Self {
        Self {
            color: "FF0000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_widths() {
        let settings = Settings::default();
        assert_eq!(settings.available_width(), 100);
        assert_eq!(settings.separator_length(), 104);
    }

    #[test]
    fn test_parse_empty_toml_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_parse_partial_toml() {
        let settings = Settings::from_toml_str(
            r#"
[layout]
max_line_length = 60

[speaker]
color = "0000FF"
"#,
        )
        .unwrap();

        assert_eq!(settings.layout.max_line_length, 60);
        assert_eq!(settings.layout.header_padding, 26);
        assert_eq!(settings.speaker.color, "0000FF");
        assert_eq!(settings.fonts.family, "Verdana");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Settings::from_toml_str("[layout]\nmax_line_length = \"wide\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_narrow_page_width() {
        let mut settings = Settings::default();
        settings.page.width = 6.0;
        // 6.0 - 0.7 - 0.5 + 2.7 = 7.5 inches
        assert_eq!(settings.available_width(), 75);
    }

    #[test]
    fn test_negative_width_clamps_to_zero() {
        let mut settings = Settings::default();
        settings.page.width = 0.0;
        settings.layout.width_adjustment = 0.0;
        assert_eq!(settings.available_width(), 0);
        assert_eq!(settings.separator_length(), 4);
    }

    #[test]
    fn test_validate_defaults() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.layout.max_line_length = 0;
        assert_eq!(settings.validate(), Err(SettingsError::ZeroLineLength));

        let mut settings = Settings::default();
        settings.layout.char_width = 0.0;
        assert_eq!(settings.validate(), Err(SettingsError::InvalidCharWidth(0.0)));

        let mut settings = Settings::default();
        settings.layout.separator_char = String::new();
        assert_eq!(settings.validate(), Err(SettingsError::EmptySeparator));

        let mut settings = Settings::default();
        settings.speaker.color = "red".to_string();
        assert_eq!(
            settings.validate(),
            Err(SettingsError::InvalidColor("red".to_string()))
        );
    }
}
