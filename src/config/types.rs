//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stroke settings.
///
/// Sampled into a `DrawingStyle` every frame, so edits take effect on the next
/// stroke segment without restarting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Stroke width in world units (valid range: 1.0 - 50.0)
    #[serde(default = "default_width")]
    pub width: f32,

    /// Stroke color - either a named color (red, green, blue, yellow, orange, pink, white, black)
    /// or an RGB(A) array like `[255, 0, 0]`
    #[serde(default)]
    pub color: ColorSpec,

    /// Seconds an untouched stroke stays visible (valid range: 0 - 600, 0 = never fade)
    #[serde(default = "default_fade_time")]
    pub fade_time: f32,

    /// Maximum number of strokes kept at once (valid range: 0 - 2048, 0 = drawing disabled)
    /// Lowering it below the current stroke count clears all strokes
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            color: ColorSpec::default(),
            fade_time: default_fade_time(),
            max_items: default_max_items(),
        }
    }
}

/// Where saved drawings go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StorageConfig {
    /// Directory for drawing files; `~` is expanded. Defaults to the user data
    /// directory (e.g. `~/.local/share/bgdraw`)
    #[serde(default)]
    pub directory: Option<String>,

    /// Extension appended to file names that lack it
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: None,
            extension: default_extension(),
        }
    }
}

fn default_width() -> f32 {
    5.0
}

fn default_fade_time() -> f32 {
    120.0
}

fn default_max_items() -> usize {
    128
}

fn default_extension() -> String {
    "txt".to_string()
}
