//! JSON and image export.
//!
//! JSON export serializes the snapshot the kernel holds; image export
//! produces a rendering instruction for the embedding canvas, since
//! rasterization happens where the pixels are. Both name their files
//! `mindmap-<unix-millis>` so successive exports never collide.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::MapSnapshot;

/// Canvas theme, which decides the export background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light canvas.
    Light,
    /// Dark canvas.
    Dark,
}

impl Theme {
    /// Parse from its lowercase name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Background color the canvas paints under this theme.
    pub fn background_hex(&self) -> &'static str {
        match self {
            Self::Light => "#ffffff",
            Self::Dark => "#1a1a1a",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// A ready-to-write JSON export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonExport {
    /// Suggested file name.
    pub filename: String,
    /// Pretty-printed snapshot document.
    pub bytes: Vec<u8>,
}

/// Instruction for the embedding canvas to rasterize itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageExportSpec {
    /// Suggested file name.
    pub filename: String,
    /// Background color to paint behind the graph.
    pub background: String,
    /// Pixel density multiplier.
    pub scale: u8,
    /// Capture the whole graph, not just the viewport.
    pub full: bool,
}

/// Export the snapshot as pretty-printed JSON, named for the current time.
pub fn json_export(snapshot: &MapSnapshot) -> Result<JsonExport, serde_json::Error> {
    json_export_at(snapshot, Utc::now())
}

/// Export as JSON with an explicit timestamp (deterministic for tests).
pub fn json_export_at(
    snapshot: &MapSnapshot,
    at: DateTime<Utc>,
) -> Result<JsonExport, serde_json::Error> {
    Ok(JsonExport {
        filename: format!("mindmap-{}.json", at.timestamp_millis()),
        bytes: serde_json::to_vec_pretty(snapshot)?,
    })
}

/// Image export instruction for the current time.
pub fn image_export_spec(theme: Theme) -> ImageExportSpec {
    image_export_spec_at(theme, Utc::now())
}

/// Image export instruction with an explicit timestamp.
pub fn image_export_spec_at(theme: Theme, at: DateTime<Utc>) -> ImageExportSpec {
    ImageExportSpec {
        filename: format!("mindmap-{}.png", at.timestamp_millis()),
        background: theme.background_hex().to_string(),
        scale: 2,
        full: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_snapshot;
    use chrono::TimeZone;

    #[test]
    fn test_json_export_roundtrips() {
        let snapshot = default_snapshot();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let export = json_export_at(&snapshot, at).unwrap();

        assert_eq!(export.filename, format!("mindmap-{}.json", at.timestamp_millis()));
        let parsed: MapSnapshot = serde_json::from_slice(&export.bytes).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_image_spec_follows_theme() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let light = image_export_spec_at(Theme::Light, at);
        assert_eq!(light.background, "#ffffff");
        assert_eq!(light.scale, 2);
        assert!(light.full);
        assert_eq!(light.filename, format!("mindmap-{}.png", at.timestamp_millis()));

        let dark = image_export_spec_at(Theme::Dark, at);
        assert_eq!(dark.background, "#1a1a1a");
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!(Theme::from_str("light"), Some(Theme::Light));
        assert_eq!(Theme::from_str("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_str("sepia"), None);
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Dark.to_string(), "dark");
    }
}
