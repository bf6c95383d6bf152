//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a named color, RGB or RGBA values.
///
/// # Examples
/// ```toml
/// # Named color
/// color = "yellow"
///
/// # Custom RGB color (0-255 per component)
/// color = [255, 128, 0]
///
/// # With alpha
/// color = [255, 255, 255, 128]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
    /// RGBA color as [red, green, blue, alpha] where each component is 0-255
    Rgba([u8; 4]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`].
    ///
    /// Unknown color names fall back to white with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using white", name);
                WHITE
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
            ColorSpec::Rgba([r, g, b, a]) => Color {
                a: *a as f32 / 255.0,
                ..Color::from_rgb8(*r, *g, *b)
            },
        }
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        ColorSpec::Name("white".to_string())
    }
}
