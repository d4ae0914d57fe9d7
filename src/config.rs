//! Editor tunables and initial styles.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::drawing::Style;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Name of the key-value slot drawings are saved under.
    pub storage_key: String,
    /// Pick radius around resize, endpoint and rotate handles.
    pub handle_radius: f32,
    /// How far above the top edge the rotate handle sits.
    pub rotate_handle_offset: f32,
    /// Minimum pick distance from a line; thicker lines use their border width.
    pub line_hit_tolerance: f32,
    pub default_style: Style,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: "canvas-shapes".to_string(),
            handle_radius: 6.0,
            rotate_handle_offset: 35.0,
            line_hit_tolerance: 4.0,
            default_style: Style::default(),
        }
    }
}

impl EditorConfig {
    /// Parses a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to parse editor config")
    }
}
