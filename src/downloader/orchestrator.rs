//! Download orchestration around the yt-dlp binary
//!
//! Each job gets a fresh temporary directory. yt-dlp fetches the selected
//! video stream plus the best available audio stream and merges them into a
//! single MP4 (ffmpeg is auto-detected from PATH by yt-dlp itself).

use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Result;
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command as AsyncCommand;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::downloader::progress::{parse_progress_line, ProgressEvent, PROGRESS_TEMPLATE};
use crate::extractor::ytdlp::find_ytdlp;
use crate::utils::error::VidgrabError;

/// A finished download. The temp directory is owned here so the file stays
/// on disk for as long as the UI keeps offering it.
#[derive(Debug)]
pub struct DownloadedFile {
    pub path: PathBuf,
    _dir: TempDir,
}

impl DownloadedFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video.mp4".to_string())
    }
}

/// Runs yt-dlp download jobs and relays progress events
#[derive(Debug, Clone)]
pub struct DownloadOrchestrator {
    ytdlp_path: PathBuf,
}

impl DownloadOrchestrator {
    pub fn new() -> Result<Self> {
        let ytdlp_path = find_ytdlp().ok_or(VidgrabError::YtDlpNotFound)?;
        Ok(Self { ytdlp_path })
    }

    /// Build an orchestrator around a known binary path (used by tests)
    pub fn with_path(ytdlp_path: PathBuf) -> Self {
        Self { ytdlp_path }
    }

    /// Download `format_id` plus best audio from `url`, merged to MP4.
    ///
    /// Progress events stream over `progress_tx` while the transfer runs;
    /// the call resolves once yt-dlp exits and the output directory has
    /// been scanned for the produced file. No retry, no resume.
    pub async fn download(
        &self,
        url: &str,
        format_id: &str,
        progress_tx: UnboundedSender<ProgressEvent>,
    ) -> Result<DownloadedFile> {
        let dir = TempDir::new().map_err(VidgrabError::Io)?;
        info!(
            "Starting download of format {} into {}",
            format_id,
            dir.path().display()
        );

        let mut child = AsyncCommand::new(&self.ytdlp_path)
            .arg("-f")
            .arg(format!("{0}+bestaudio/{0}", format_id))
            .arg("--merge-output-format")
            .arg("mp4")
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg("--newline")
            .arg("--progress-template")
            .arg(PROGRESS_TEMPLATE)
            .arg("-P")
            .arg(dir.path())
            .arg("-o")
            .arg("%(title)s.%(ext)s")
            .arg(url)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| VidgrabError::Download(format!("failed to start yt-dlp: {}", e)))?;

        let stderr = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut buf = String::new();
            if let Some(stderr) = stderr {
                let _ = BufReader::new(stderr).read_to_string(&mut buf).await;
            }
            buf
        });

        if let Some(stdout) = child.stdout.take() {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if let Some(event) = parse_progress_line(&line) {
                    // The UI may have gone away; keep draining regardless.
                    let _ = progress_tx.send(event);
                } else if !line.trim().is_empty() {
                    debug!("yt-dlp: {}", line);
                }
            }
        }

        let status = child.wait().await?;
        let stderr_output = stderr_task.await.unwrap_or_default();

        if !status.success() {
            warn!("yt-dlp exited with {}: {}", status, stderr_output.trim());
            return Err(VidgrabError::Download(error_tail(&stderr_output)).into());
        }

        let path = find_mp4(dir.path()).ok_or(VidgrabError::MissingOutput)?;
        info!("Download produced {}", path.display());

        Ok(DownloadedFile { path, _dir: dir })
    }
}

/// Last few meaningful stderr lines, for the error banner
fn error_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return "yt-dlp exited with an error".to_string();
    }
    lines[lines.len().saturating_sub(3)..].join(" | ")
}

/// Locate the produced MP4 inside the job directory
fn find_mp4(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| p.extension().map_or(false, |ext| ext == "mp4"))
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_mp4_picks_mp4_only() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("video.f137.part"), b"").unwrap();
        std::fs::write(dir.path().join("My Video.mp4"), b"").unwrap();

        let found = find_mp4(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "My Video.mp4");
    }

    #[test]
    fn test_find_mp4_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(find_mp4(dir.path()).is_none());
    }

    #[test]
    fn test_error_tail_keeps_last_lines() {
        let stderr = "WARNING: something\n\nERROR: fragment 3 not found\nERROR: unable to continue\n";
        let tail = error_tail(stderr);
        assert!(tail.contains("unable to continue"));
        assert!(!tail.starts_with(" "));
    }

    #[test]
    fn test_error_tail_empty_stderr() {
        assert_eq!(error_tail(""), "yt-dlp exited with an error");
    }
}
