//! End-to-end selection tests: raw dump-json payload in, quality menu out.

use vidgrab::extractor::VideoInfo;
use vidgrab::selector::{select, QualityTier};

/// A realistic (trimmed) format list: separate video and audio streams,
/// multiple containers, duplicate heights, and resolutions outside the
/// offered tiers.
const DUMP_JSON: &str = r#"{
    "id": "abc123",
    "title": "Launch Highlights",
    "webpage_url": "https://example.com/watch?v=abc123",
    "duration": 213.4,
    "formats": [
        {"format_id": "140", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.2",
         "filesize": 3400000},
        {"format_id": "18", "ext": "mp4", "vcodec": "avc1.42001E", "acodec": "mp4a.40.2",
         "height": 360, "fps": 30.0, "filesize": 8388608},
        {"format_id": "247", "ext": "webm", "vcodec": "vp9", "acodec": "none",
         "height": 720, "fps": 30.0, "filesize": 20000000},
        {"format_id": "136", "ext": "mp4", "vcodec": "avc1.4d401f", "acodec": "none",
         "height": 720, "fps": 30.0, "filesize": 15728640},
        {"format_id": "298", "ext": "mp4", "vcodec": "avc1.4d4020", "acodec": "none",
         "height": 720, "fps": 60.0, "filesize": 11000000},
        {"format_id": "137", "ext": "mp4", "vcodec": "avc1.640028", "acodec": "none",
         "height": 1080, "fps": 30.0},
        {"format_id": "271", "ext": "mp4", "vcodec": "avc1.640033", "acodec": "none",
         "height": 1440, "fps": 30.0, "filesize": 90000000},
        {"format_id": "160", "ext": "mp4", "vcodec": "avc1.4d400c", "acodec": "none",
         "height": 144, "fps": 15.0, "filesize": 1572864}
    ]
}"#;

#[test]
fn test_menu_from_realistic_payload() {
    let info: VideoInfo = serde_json::from_str(DUMP_JSON).unwrap();
    let selection = select(&info.formats);

    // 144p, 360p, 720p, 1080p claimed; 1440p and the webm/audio streams dropped
    assert_eq!(selection.table.len(), 4);
    assert!(selection.table.contains_key(&QualityTier::P144));
    assert!(!selection.table.contains_key(&QualityTier::P480));

    // Largest known size wins the 720p tier
    assert_eq!(selection.table[&QualityTier::P720].format_id, "136");

    // Unknown size may still claim 1080p since nothing else competes
    assert_eq!(selection.table[&QualityTier::P1080].format_id, "137");

    let labels: Vec<&str> = selection.menu.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "160 - 144p - 15fps - 1.5 MB",
            "18 - 360p - 30fps - 8.0 MB",
            "136 - 720p - 30fps - 15.0 MB",
            "137 - 1080p - 30fps - Unknown size",
        ]
    );
}

#[test]
fn test_menu_entry_carries_format_id_for_download() {
    let info: VideoInfo = serde_json::from_str(DUMP_JSON).unwrap();
    let selection = select(&info.formats);

    let picked = &selection.menu[2];
    assert_eq!(picked.format_id, "136");
    assert_eq!(picked.to_string(), picked.label);
}

#[test]
fn test_audio_only_video_yields_empty_menu() {
    let raw = r#"{
        "id": "podcast",
        "title": "Audio Only",
        "formats": [
            {"format_id": "140", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.2"},
            {"format_id": "251", "ext": "webm", "vcodec": "none", "acodec": "opus"}
        ]
    }"#;

    let info: VideoInfo = serde_json::from_str(raw).unwrap();
    let selection = select(&info.formats);
    assert!(selection.is_empty());
}
