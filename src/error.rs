use thiserror::Error;

/// User-visible extraction failures.
///
/// Everything else (network errors, timeouts, malformed caption text) is
/// absorbed inside the strategy that hit it and surfaces only as diagnostic
/// logging, so the resolution chain can keep going.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input URL carries no recognizable Vimeo video id.
    #[error("Invalid Vimeo URL format: {0}")]
    InvalidUrl(String),

    /// Every resolution strategy was tried and none produced captions.
    #[error("No transcript found for video {video_id} after exhausting all strategies")]
    NoTranscriptFound { video_id: String },
}
