use crate::extractor::models::{Format, VideoInfo};
use anyhow::Result;
use async_trait::async_trait;

/// Core trait for video metadata extractors
///
/// This trait isolates the application from the specific extraction method
/// (yt-dlp binary today, something else tomorrow).
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extracts video information without downloading anything
    async fn extract_info(&self, url: &str) -> Result<VideoInfo>;

    /// Gets available formats (usually calls extract_info internally)
    async fn get_formats(&self, url: &str) -> Result<Vec<Format>> {
        let info = self.extract_info(url).await?;
        Ok(info.formats)
    }
}
