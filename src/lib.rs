/// Vimeo Transcript Extractor
///
/// Locates the caption track for a Vimeo video through a chain of
/// independent resolution strategies and parses it into a structured,
/// time-coded transcript. Vimeo publishes no stable API for caption
/// retrieval, so every strategy here is best-effort by construction.

pub mod batch;
pub mod browser;
pub mod config;
pub mod error;
pub mod extractor;
pub mod http;
pub mod strategies;
pub mod transcript;
pub mod vimeo;
pub mod vtt;

// Re-export main types for easy access
pub use crate::batch::BatchExtractor;
pub use crate::browser::{BrowserSession, CapturedResponse, NavigationResponse};
pub use crate::config::Config;
pub use crate::error::ExtractError;
pub use crate::extractor::TranscriptExtractor;
pub use crate::strategies::{Strategy, StrategyHit};
pub use crate::transcript::{ExtractionRecord, Transcript};
pub use crate::vimeo::{candidate_track_ids, extract_video_id, VideoRef};
pub use crate::vtt::{parse_vtt, Cue};
