//! Data structures for video information

use serde::{Deserialize, Serialize};

/// Video information structure, deserialized from `yt-dlp --dump-json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default = "unknown_title")]
    pub title: String,
    #[serde(alias = "webpage_url", default)]
    pub url: String,
    #[serde(default)]
    pub formats: Vec<Format>,
}

fn unknown_title() -> String {
    "Unknown".to_string()
}

/// One encoded variant of a video as reported by yt-dlp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Format {
    pub format_id: String,
    #[serde(default)]
    pub ext: String,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
    pub fps: Option<f32>,
    #[serde(default)]
    pub filesize: Option<u64>,
    pub format_note: Option<String>,
}

impl Format {
    /// True when this variant carries a video stream
    pub fn has_video(&self) -> bool {
        self.vcodec
            .as_deref()
            .map_or(false, |v| v != "none" && !v.is_empty())
    }

    /// Reported file size, treating absent as unknown (0)
    pub fn size_or_zero(&self) -> u64 {
        self.filesize.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_dump_json() {
        let raw = r#"{
            "id": "abc123",
            "title": "Some Video",
            "webpage_url": "https://example.com/watch?v=abc123",
            "formats": [
                {"format_id": "137", "ext": "mp4", "vcodec": "avc1.640028",
                 "acodec": "none", "height": 1080, "fps": 30.0, "filesize": 1048576}
            ]
        }"#;

        let info: VideoInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(info.title, "Some Video");
        assert_eq!(info.url, "https://example.com/watch?v=abc123");
        assert_eq!(info.formats.len(), 1);
        assert!(info.formats[0].has_video());
        assert_eq!(info.formats[0].size_or_zero(), 1_048_576);
    }

    #[test]
    fn test_missing_title_defaults_to_unknown() {
        let info: VideoInfo = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(info.title, "Unknown");
        assert!(info.formats.is_empty());
    }

    #[test]
    fn test_has_video_none_codec() {
        let f: Format = serde_json::from_str(
            r#"{"format_id": "140", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.2"}"#,
        )
        .unwrap();
        assert!(!f.has_video());
        assert_eq!(f.size_or_zero(), 0);
    }
}
