//! Error handling for vidgrab

use thiserror::Error;

/// Main error type for vidgrab
///
/// Every variant is terminal for the current request: the UI shows one
/// banner and waits for the next user action. No retries are attempted.
#[derive(Debug, Error)]
pub enum VidgrabError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    #[error("Failed to fetch video metadata: {0}")]
    MetadataFetch(String),

    #[error("No MP4 formats found up to 1080p")]
    NoEligibleFormats,

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Download finished but no MP4 file was produced")]
    MissingOutput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse yt-dlp output: {0}")]
    Json(#[from] serde_json::Error),
}
