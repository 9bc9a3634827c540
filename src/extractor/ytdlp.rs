//! yt-dlp wrapper for video metadata extraction
//!
//! Metadata fetching delegates entirely to the yt-dlp binary; no URL
//! validation happens locally beyond requiring a non-empty string.

use crate::extractor::models::VideoInfo;
use crate::extractor::traits::Extractor;
use crate::utils::error::VidgrabError;
use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info, warn};

/// Metadata fetcher backed by the yt-dlp binary
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    ytdlp_path: PathBuf,
}

impl YtDlpExtractor {
    /// Initialize extractor and verify yt-dlp availability
    ///
    /// Search order:
    /// 1. Next to the executable (development / bundled layouts)
    /// 2. System PATH
    /// 3. Common installation paths (Homebrew, pip user installs, etc.)
    pub fn new() -> Result<Self> {
        let ytdlp_path = match find_ytdlp() {
            Some(path) => {
                info!("Found yt-dlp at: {}", path.display());
                path
            }
            None => {
                error!("yt-dlp not found anywhere!");
                return Err(VidgrabError::YtDlpNotFound.into());
            }
        };

        Ok(Self { ytdlp_path })
    }

    /// Build an extractor around a known binary path (used by tests)
    pub fn with_path(ytdlp_path: PathBuf) -> Self {
        Self { ytdlp_path }
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> &PathBuf {
        &self.ytdlp_path
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    /// Extract video information without downloading
    /// Uses: yt-dlp --dump-json --no-download
    async fn extract_info(&self, url: &str) -> Result<VideoInfo> {
        debug!("Extracting video info for URL: {}", url);

        let output = AsyncCommand::new(&self.ytdlp_path)
            .arg("--dump-json")
            .arg("--no-download")
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            error!("yt-dlp extraction failed: {}", error_msg);
            return Err(VidgrabError::MetadataFetch(error_msg.trim().to_string()).into());
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        let video_info: VideoInfo = serde_json::from_str(&json_str).map_err(VidgrabError::Json)?;

        Ok(video_info)
    }
}

// ============================================================
// Binary detection
// ============================================================

/// Find the yt-dlp binary, preferring an exe-adjacent copy over PATH
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Some(adjacent) = find_adjacent_ytdlp() {
        info!("Using exe-adjacent yt-dlp: {:?}", adjacent);
        return Some(adjacent);
    }

    if let Ok(path) = which::which("yt-dlp") {
        info!("Using system yt-dlp: {:?}", path);
        return Some(path);
    }

    if let Some(common) = find_in_common_paths() {
        info!("Using yt-dlp from common path: {:?}", common);
        return Some(common);
    }

    warn!("yt-dlp not found anywhere!");
    None
}

/// Find ffmpeg, which yt-dlp needs to merge separate video/audio streams.
/// Auto-detected only; no path is configured.
pub fn find_ffmpeg() -> Option<PathBuf> {
    which::which("ffmpeg").ok()
}

fn find_adjacent_ytdlp() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;

    let dev_path = exe_dir.join("yt-dlp");
    if dev_path.exists() && is_executable(&dev_path) {
        return Some(dev_path);
    }

    None
}

fn find_in_common_paths() -> Option<PathBuf> {
    let common_paths = [
        // macOS Homebrew (Apple Silicon)
        "/opt/homebrew/bin/yt-dlp",
        // macOS Homebrew (Intel)
        "/usr/local/bin/yt-dlp",
        // System
        "/usr/bin/yt-dlp",
        // pip user install
        "~/.local/bin/yt-dlp",
    ];

    let home = dirs::home_dir();
    for path_str in common_paths {
        // Entries needing a home dir are skipped when there is none
        let Some(expanded) = expand_common_path(path_str, home.as_deref()) else {
            continue;
        };

        if expanded.exists() && is_executable(&expanded) {
            return Some(expanded);
        }
    }

    None
}

fn expand_common_path(path_str: &str, home: Option<&std::path::Path>) -> Option<PathBuf> {
    if let Some(rest) = path_str.strip_prefix("~/") {
        home.map(|h| h.join(rest))
    } else {
        Some(PathBuf::from(path_str))
    }
}

fn is_executable(path: &PathBuf) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        if let Ok(metadata) = std::fs::metadata(path) {
            return metadata.permissions().mode() & 0o111 != 0;
        }
        false
    }

    #[cfg(not(unix))]
    {
        path.exists()
    }
}

// ============================================================
// Tests
// ============================================================
