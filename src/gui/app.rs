//! Main GUI application

use std::sync::Arc;
use std::time::Duration;

use iced::{Application, Command, Element, Subscription, Theme};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info};

use crate::downloader::progress::{DownloadJob, ProgressEvent};
use crate::downloader::{DownloadOrchestrator, DownloadedFile};
use crate::extractor::{Extractor, YtDlpExtractor};
use crate::selector::{self, MenuEntry, Selection};
use crate::utils::VidgrabError;

/// Main application state.
///
/// Everything below `url_input` is scoped to the current request and reset
/// wholesale when a new fetch starts, so stale menus or progress from an
/// earlier URL can never leak into the next one.
pub struct VidgrabApp {
    url_input: String,

    // Request-scoped state
    error: Option<String>,
    is_fetching: bool,
    // URL the current menu was fetched for; downloads always run against
    // this, never the live input field
    fetched_url: Option<String>,
    video_title: Option<String>,
    menu: Vec<MenuEntry>,
    selected: Option<MenuEntry>,
    job: Option<DownloadJob>,
    finished: Option<Arc<DownloadedFile>>,
    progress_rx: Option<UnboundedReceiver<ProgressEvent>>,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Input events
    UrlInputChanged(String),
    ClearUrlInput,

    // Fetch events
    FetchPressed,
    MetadataFetched(Result<(String, Selection), String>),

    // Download events
    QualityPicked(MenuEntry),
    DownloadPressed,
    DownloadFinished(Result<Arc<DownloadedFile>, String>),

    // Result actions
    OpenFile,
    ShowInFolder,

    // System
    Tick, // Drains the progress channel
}

impl VidgrabApp {
    /// Drop everything tied to the previous URL
    fn reset_request_state(&mut self) {
        self.error = None;
        self.is_fetching = false;
        self.fetched_url = None;
        self.video_title = None;
        self.menu.clear();
        self.selected = None;
        self.job = None;
        self.finished = None;
        self.progress_rx = None;
    }
}

impl Application for VidgrabApp {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: Self::Flags) -> (Self, Command<Message>) {
        let app = Self {
            url_input: String::new(),
            error: None,
            is_fetching: false,
            fetched_url: None,
            video_title: None,
            menu: Vec::new(),
            selected: None,
            job: None,
            finished: None,
            progress_rx: None,
        };

        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Vidgrab - MP4 Video Downloader")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::UrlInputChanged(url) => {
                self.url_input = url;
                self.error = None;
                Command::none()
            }

            Message::ClearUrlInput => {
                self.url_input.clear();
                self.reset_request_state();
                Command::none()
            }

            Message::FetchPressed => {
                let url = self.url_input.trim().to_string();
                if url.is_empty() || self.is_fetching || self.progress_rx.is_some() {
                    return Command::none();
                }

                self.reset_request_state();
                self.is_fetching = true;
                self.fetched_url = Some(url.clone());
                info!("Fetching formats for {}", url);

                Command::perform(fetch_formats(url), Message::MetadataFetched)
            }

            Message::MetadataFetched(result) => {
                self.is_fetching = false;
                match result {
                    Ok((title, selection)) => {
                        if selection.is_empty() {
                            self.error = Some(VidgrabError::NoEligibleFormats.to_string());
                        } else {
                            self.video_title = Some(title);
                            self.menu = selection.menu;
                        }
                    }
                    Err(message) => {
                        error!("Format fetch failed: {}", message);
                        self.error = Some(message);
                    }
                }
                Command::none()
            }

            Message::QualityPicked(entry) => {
                self.selected = Some(entry);
                Command::none()
            }

            Message::DownloadPressed => {
                let Some(entry) = self.selected.clone() else {
                    return Command::none();
                };
                // The menu only means something for the URL it was fetched
                // from, even if the input field has been edited since
                let Some(url) = self.fetched_url.clone() else {
                    return Command::none();
                };
                // One transfer at a time; a finished job may be rerun
                if self.progress_rx.is_some() {
                    return Command::none();
                }

                let (tx, rx) = mpsc::unbounded_channel();
                self.progress_rx = Some(rx);
                self.error = None;
                self.finished = None;
                self.job = Some(DownloadJob::new(entry.format_id.clone()));

                Command::perform(
                    run_download(url, entry.format_id, tx),
                    Message::DownloadFinished,
                )
            }

            Message::DownloadFinished(result) => {
                self.progress_rx = None;
                match result {
                    Ok(file) => {
                        if let Some(job) = self.job.as_mut() {
                            job.percent = 100.0;
                            job.status = "Download complete".to_string();
                        }
                        self.finished = Some(file);
                    }
                    Err(message) => {
                        error!("Download failed: {}", message);
                        self.job = None;
                        self.error = Some(message);
                    }
                }
                Command::none()
            }

            Message::OpenFile => {
                if let Some(file) = &self.finished {
                    if let Err(e) = open::that(&file.path) {
                        self.error = Some(format!("Could not open file: {}", e));
                    }
                }
                Command::none()
            }

            Message::ShowInFolder => {
                if let Some(file) = &self.finished {
                    if let Some(dir) = file.path.parent() {
                        if let Err(e) = open::that(dir) {
                            self.error = Some(format!("Could not open folder: {}", e));
                        }
                    }
                }
                Command::none()
            }

            Message::Tick => {
                if let (Some(rx), Some(job)) = (self.progress_rx.as_mut(), self.job.as_mut()) {
                    while let Ok(event) = rx.try_recv() {
                        job.apply(event);
                    }
                }
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<Message> {
        crate::gui::views::main_view(
            &self.url_input,
            self.error.as_deref(),
            self.is_fetching,
            self.video_title.as_deref(),
            &self.menu,
            self.selected.as_ref(),
            self.job.as_ref(),
            self.finished.as_deref(),
        )
    }

    fn subscription(&self) -> Subscription<Message> {
        // Only poll the progress channel while a transfer is live
        if self.progress_rx.is_some() {
            iced::time::every(Duration::from_millis(100)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }
}

/// Fetch metadata and reduce the format list to the per-tier menu
async fn fetch_formats(url: String) -> Result<(String, Selection), String> {
    let extractor = YtDlpExtractor::new().map_err(|e| e.to_string())?;
    let info = extractor
        .extract_info(&url)
        .await
        .map_err(|e| e.to_string())?;

    Ok((info.title, selector::select(&info.formats)))
}

/// Run one download job to completion
async fn run_download(
    url: String,
    format_id: String,
    progress_tx: UnboundedSender<ProgressEvent>,
) -> Result<Arc<DownloadedFile>, String> {
    let orchestrator = DownloadOrchestrator::new().map_err(|e| e.to_string())?;
    orchestrator
        .download(&url, &format_id, progress_tx)
        .await
        .map(Arc::new)
        .map_err(|e| e.to_string())
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::Format;

    fn sample_selection() -> Selection {
        selector::select(&[Format {
            format_id: "136".to_string(),
            ext: "mp4".to_string(),
            vcodec: Some("avc1.4d401f".to_string()),
            acodec: Some("none".to_string()),
            height: Some(720),
            width: Some(1280),
            fps: Some(30.0),
            filesize: Some(15_728_640),
            format_note: None,
        }])
    }

    #[test]
    fn test_download_uses_fetched_url_not_edited_input() {
        let (mut app, _) = VidgrabApp::new(());

        app.update(Message::UrlInputChanged("https://example.com/first".to_string()));
        app.update(Message::FetchPressed);
        assert_eq!(app.fetched_url.as_deref(), Some("https://example.com/first"));

        app.update(Message::MetadataFetched(Ok((
            "First Video".to_string(),
            sample_selection(),
        ))));
        assert_eq!(app.menu.len(), 1);

        // Editing the input after a fetch must not retarget the menu
        app.update(Message::UrlInputChanged("https://example.com/second".to_string()));
        let entry = app.menu[0].clone();
        app.update(Message::QualityPicked(entry));
        app.update(Message::DownloadPressed);

        assert_eq!(app.fetched_url.as_deref(), Some("https://example.com/first"));
        assert_eq!(app.job.as_ref().unwrap().format_id, "136");
    }

    #[test]
    fn test_download_blocked_without_fetch() {
        let (mut app, _) = VidgrabApp::new(());

        app.update(Message::UrlInputChanged("https://example.com/v".to_string()));
        // No fetch happened, so a stray pick/press must not start a job
        app.update(Message::QualityPicked(crate::selector::MenuEntry {
            label: "136 - 720p - 30fps - 15.0 MB".to_string(),
            format_id: "136".to_string(),
        }));
        app.update(Message::DownloadPressed);

        assert!(app.job.is_none());
        assert!(app.progress_rx.is_none());
    }

    #[test]
    fn test_new_fetch_clears_previous_request_state() {
        let (mut app, _) = VidgrabApp::new(());

        app.update(Message::UrlInputChanged("https://example.com/first".to_string()));
        app.update(Message::FetchPressed);
        app.update(Message::MetadataFetched(Ok((
            "First Video".to_string(),
            sample_selection(),
        ))));
        let entry = app.menu[0].clone();
        app.update(Message::QualityPicked(entry));

        app.update(Message::UrlInputChanged("https://example.com/second".to_string()));
        app.update(Message::FetchPressed);

        assert_eq!(app.fetched_url.as_deref(), Some("https://example.com/second"));
        assert!(app.menu.is_empty());
        assert!(app.selected.is_none());
        assert!(app.video_title.is_none());
    }
}
