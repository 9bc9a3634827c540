//! Vidgrab - MP4 Video Downloader
//!
//! A small desktop downloader around yt-dlp: paste a video URL, pick one of
//! the fixed MP4 resolution tiers up to 1080p, and get a merged MP4 with
//! live progress.

use anyhow::Result;
use iced::Application;
use vidgrab::extractor::ytdlp::{find_ffmpeg, find_ytdlp};
use vidgrab::gui;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    check_environment();

    // Start the GUI application (synchronous entrypoint)
    gui::VidgrabApp::run(iced::Settings {
        window: iced::window::Settings {
            size: iced::Size::new(760.0, 640.0),
            min_size: Some(iced::Size::new(640.0, 520.0)),
            ..Default::default()
        },
        antialiasing: true,
        ..Default::default()
    })?;

    Ok(())
}

/// Warn about missing external tools at startup. The app still launches;
/// the user sees the matching error once they paste a URL.
fn check_environment() {
    match find_ytdlp() {
        Some(path) => tracing::info!("yt-dlp found at {}", path.display()),
        None => {
            tracing::warn!("yt-dlp not found in PATH or common install locations");
            tracing::warn!("Install it with: pip install yt-dlp (or brew install yt-dlp)");
        }
    }

    match find_ffmpeg() {
        Some(path) => tracing::info!("ffmpeg found at {}", path.display()),
        None => {
            tracing::warn!("ffmpeg not found; merged MP4 output will fail without it");
        }
    }
}
