//! Download orchestration module

pub mod orchestrator;
pub mod progress;

// Re-export for convenience
pub use orchestrator::{DownloadOrchestrator, DownloadedFile};
pub use progress::{DownloadJob, ProgressEvent};
