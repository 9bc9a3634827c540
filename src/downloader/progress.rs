//! Progress relay for downloads
//!
//! yt-dlp is spawned with `--newline --progress-template` so every progress
//! tick arrives as one machine-parseable stdout line. The raw field strings
//! may carry terminal color-control sequences which must be stripped before
//! display.

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix attached to every templated progress line (see orchestrator)
pub const PROGRESS_PREFIX: &str = "vidgrab:";

/// yt-dlp progress template: percent|downloaded|total|speed
pub const PROGRESS_TEMPLATE: &str = "download:vidgrab:%(progress._percent_str)s|\
%(progress._downloaded_bytes_str)s|%(progress._total_bytes_str)s|%(progress._speed_str)s";

static ANSI_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").unwrap());

/// One progress tick relayed from yt-dlp to the UI
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// Parsed and clamped percent, 0-100
    pub percent: f32,
    /// Human-readable status line built from the stripped raw strings
    pub status: String,
}

/// Remove terminal color-control sequences, keeping only readable text
pub fn strip_ansi(input: &str) -> String {
    ANSI_ESCAPE.replace_all(input, "").into_owned()
}

/// Parse a percent string like " 42.7%"; blank parses as 0, the result is
/// clamped to 0-100
pub fn parse_percent(raw: &str) -> f32 {
    let cleaned = strip_ansi(raw);
    let trimmed = cleaned.trim().trim_end_matches('%').trim();
    let value = if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse::<f32>().unwrap_or(0.0)
    };
    value.clamp(0.0, 100.0)
}

/// Parse one templated progress line into an event.
///
/// Returns None for any line that is not a progress line (destination
/// notices, merger output, warnings).
pub fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
    let payload = line.strip_prefix(PROGRESS_PREFIX)?;

    let mut fields = payload.splitn(4, '|');
    let percent_raw = fields.next()?;
    let downloaded = strip_ansi(fields.next().unwrap_or("0B"));
    let total = strip_ansi(fields.next().unwrap_or("0B"));
    let speed = strip_ansi(fields.next().unwrap_or("0B/s"));

    let percent = parse_percent(percent_raw);
    let percent_display = strip_ansi(percent_raw);

    Some(ProgressEvent {
        percent,
        status: format!(
            "{} downloaded: {} / {} at {}",
            percent_display.trim(),
            downloaded.trim(),
            total.trim(),
            speed.trim()
        ),
    })
}

/// Mutable state for one active download, updated by progress events
#[derive(Debug, Clone)]
pub struct DownloadJob {
    pub format_id: String,
    pub percent: f32,
    pub status: String,
}

impl DownloadJob {
    pub fn new(format_id: String) -> Self {
        Self {
            format_id,
            percent: 0.0,
            status: "Starting download...".to_string(),
        }
    }

    pub fn apply(&mut self, event: ProgressEvent) {
        self.percent = event.percent;
        self.status = event.status;
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================
    // ANSI STRIPPING
    // ============================================================

    #[test]
    fn test_strip_ansi_color_sequence() {
        let colored = "\u{1b}[0;32m1.23MiB\u{1b}[0m";
        assert_eq!(strip_ansi(colored), "1.23MiB");
    }

    #[test]
    fn test_strip_ansi_no_escape_bytes_remain() {
        let colored = "\u{1b}[1;34m 512.00KiB/s\u{1b}[0m";
        let stripped = strip_ansi(colored);
        assert!(!stripped.contains('\u{1b}'));
        assert_eq!(stripped.trim(), "512.00KiB/s");
    }

    #[test]
    fn test_strip_ansi_plain_text_untouched() {
        assert_eq!(strip_ansi("10.5MiB"), "10.5MiB");
    }

    // ============================================================
    // PERCENT PARSING
    // ============================================================

    #[test]
    fn test_parse_percent_blank_defaults_to_zero() {
        assert_eq!(parse_percent(""), 0.0);
        assert_eq!(parse_percent("  "), 0.0);
        assert_eq!(parse_percent(" % "), 0.0);
    }

    #[test]
    fn test_parse_percent_basic() {
        assert_eq!(parse_percent(" 42.7%"), 42.7);
        assert_eq!(parse_percent("100%"), 100.0);
        assert_eq!(parse_percent("0.0%"), 0.0);
    }

    #[test]
    fn test_parse_percent_clamps_out_of_range() {
        assert_eq!(parse_percent("120%"), 100.0);
        assert_eq!(parse_percent("-5%"), 0.0);
    }

    #[test]
    fn test_parse_percent_colored() {
        assert_eq!(parse_percent("\u{1b}[0;94m  6.2%\u{1b}[0m"), 6.2);
    }

    // ============================================================
    // LINE PARSING
    // ============================================================

    #[test]
    fn test_parse_progress_line() {
        let line = "vidgrab:  6.2%|1.00MiB|16.10MiB|420.30KiB/s";
        let event = parse_progress_line(line).unwrap();

        assert_eq!(event.percent, 6.2);
        assert_eq!(event.status, "6.2% downloaded: 1.00MiB / 16.10MiB at 420.30KiB/s");
    }

    #[test]
    fn test_parse_progress_line_colored_fields() {
        let line = "vidgrab:\u{1b}[0;94m 50.0%\u{1b}[0m|\u{1b}[0;32m8.05MiB\u{1b}[0m|16.10MiB|1.00MiB/s";
        let event = parse_progress_line(line).unwrap();

        assert_eq!(event.percent, 50.0);
        assert!(!event.status.contains('\u{1b}'));
        assert!(event.status.contains("8.05MiB / 16.10MiB"));
    }

    #[test]
    fn test_parse_progress_line_blank_percent() {
        let event = parse_progress_line("vidgrab:|0B|0B|0B/s").unwrap();
        assert_eq!(event.percent, 0.0);
    }

    #[test]
    fn test_non_progress_lines_ignored() {
        assert!(parse_progress_line("[Merger] Merging formats into \"out.mp4\"").is_none());
        assert!(parse_progress_line("[download] Destination: out.f137.mp4").is_none());
        assert!(parse_progress_line("").is_none());
    }

    // ============================================================
    // DOWNLOAD JOB
    // ============================================================

    #[test]
    fn test_job_applies_events() {
        let mut job = DownloadJob::new("137".to_string());
        assert_eq!(job.percent, 0.0);

        job.apply(ProgressEvent {
            percent: 33.0,
            status: "33.0% downloaded: 5MiB / 15MiB at 1MiB/s".to_string(),
        });

        assert_eq!(job.percent, 33.0);
        assert!(job.status.starts_with("33.0%"));
        assert_eq!(job.format_id, "137");
    }
}
