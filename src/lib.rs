//! Vidgrab library

pub mod downloader;
pub mod extractor;
pub mod gui;
pub mod selector;
pub mod utils;

// Re-export main types for easier use
pub use downloader::{DownloadJob, DownloadOrchestrator, DownloadedFile, ProgressEvent};
pub use extractor::{Format, VideoInfo, YtDlpExtractor};
pub use gui::{Message, VidgrabApp};
pub use selector::{BestFormatTable, MenuEntry, QualityTier, Selection};
pub use utils::VidgrabError;
