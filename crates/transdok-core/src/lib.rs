//! transdok-core - Transcript layout engine
//!
//! Classifies the paragraphs of a speaker-labeled transcript and lays them
//! out as rows of a two-column (speaker / content) table.
//!
//! # Example
//!
//! ```
//! use transdok_core::{Row, Settings, TranscriptTransformer};
//!
//! let settings = Settings::default();
//! let layout = TranscriptTransformer::new(&settings).transform([
//!     "Cover page",
//!     "---------- 0:00 ----------",
//!     "JOHN: Good evening.",
//! ]);
//!
//! assert_eq!(layout.segments, 1);
//! assert_eq!(layout.rows[2], Row::split("JOHN", "Good evening."));
//! ```

pub mod classify;
pub mod model;
pub mod settings;
pub mod transform;
pub mod wrap;

// Re-export main types and functions
pub use classify::{find_timecode, is_segment_marker, LineClassifier, LineKind};
pub use model::{Row, TranscriptLayout};
pub use settings::{
    FontSettings, LayoutSettings, PageSettings, Settings, SettingsError, SpeakerSettings,
    TableSettings,
};
pub use transform::{format_segment_header, TranscriptTransformer};
pub use wrap::split_text_into_lines;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
