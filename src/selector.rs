//! Format selection: reduce the raw yt-dlp format list to one best MP4
//! candidate per target resolution tier.

use std::collections::BTreeMap;

use crate::extractor::models::Format;

/// One of the fixed resolution tiers offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QualityTier {
    P144,
    P240,
    P360,
    P480,
    P720,
    P1080,
}

impl QualityTier {
    /// All tiers in ascending order
    pub fn all() -> [QualityTier; 6] {
        [
            QualityTier::P144,
            QualityTier::P240,
            QualityTier::P360,
            QualityTier::P480,
            QualityTier::P720,
            QualityTier::P1080,
        ]
    }

    /// Pixel height of this tier
    pub fn height(&self) -> u32 {
        match self {
            QualityTier::P144 => 144,
            QualityTier::P240 => 240,
            QualityTier::P360 => 360,
            QualityTier::P480 => 480,
            QualityTier::P720 => 720,
            QualityTier::P1080 => 1080,
        }
    }

    /// Map an exact reported height onto a tier, or None for anything else
    pub fn from_height(height: u32) -> Option<QualityTier> {
        match height {
            144 => Some(QualityTier::P144),
            240 => Some(QualityTier::P240),
            360 => Some(QualityTier::P360),
            480 => Some(QualityTier::P480),
            720 => Some(QualityTier::P720),
            1080 => Some(QualityTier::P1080),
            _ => None,
        }
    }
}

/// Best format per tier; sorted ascending by tier
pub type BestFormatTable = BTreeMap<QualityTier, Format>;

/// One selectable menu row surfaced to the user
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub label: String,
    pub format_id: String,
}

impl std::fmt::Display for MenuEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

/// Result of one selection pass over a fetched format list
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub table: BestFormatTable,
    pub menu: Vec<MenuEntry>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.menu.is_empty()
    }
}

/// Pick the best MP4 candidate per tier and derive the user-facing menu.
///
/// A candidate with unknown/zero size may claim an empty tier but never
/// displaces an entry with a known nonzero size; among known sizes the
/// larger one wins.
pub fn select(formats: &[Format]) -> Selection {
    let mut table = BestFormatTable::new();

    for format in formats {
        if format.ext != "mp4" || !format.has_video() {
            continue;
        }
        let Some(tier) = format.height.and_then(QualityTier::from_height) else {
            continue;
        };

        match table.get(&tier) {
            Some(current) if format.size_or_zero() <= current.size_or_zero() => {}
            _ => {
                table.insert(tier, format.clone());
            }
        }
    }

    // Ceiling tier: min(1080, highest tier present). Redundant after the
    // exact-tier filter above, but keeps the intended ordering explicit.
    let ceiling = table
        .keys()
        .next_back()
        .copied()
        .unwrap_or(QualityTier::P1080)
        .min(QualityTier::P1080);

    let menu = QualityTier::all()
        .iter()
        .filter(|tier| **tier <= ceiling)
        .filter_map(|tier| table.get(tier).map(|f| menu_entry(*tier, f)))
        .collect();

    Selection { table, menu }
}

fn menu_entry(tier: QualityTier, format: &Format) -> MenuEntry {
    let fps = format
        .fps
        .map(|f| format!("{}", f))
        .unwrap_or_else(|| "N/A".to_string());

    let size = match format.size_or_zero() {
        0 => "Unknown size".to_string(),
        bytes => format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0)),
    };

    MenuEntry {
        label: format!(
            "{} - {}p - {}fps - {}",
            format.format_id,
            tier.height(),
            fps,
            size
        ),
        format_id: format.format_id.clone(),
    }
}

// ============================================================
// Tests
// ============================================================
