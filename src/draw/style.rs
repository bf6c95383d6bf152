use super::color::{Color, WHITE};
use super::point::Point;
use glam::Vec2;

/// Stroke settings sampled once per frame from the config.
///
/// Values are expected to be clamped already (see `Config::validate_and_clamp`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawingStyle {
    /// Stroke width in world units
    pub width: f32,
    /// Stroke color
    pub color: Color,
    /// Seconds an inactive stroke stays before fading out (0 = never)
    pub fade_time: f32,
    /// Maximum number of strokes kept (0 disables drawing)
    pub max_items: usize,
}

impl DrawingStyle {
    /// Builds a sample at `pos` with this style's width and color.
    pub fn sample(&self, pos: Vec2) -> Point {
        Point::new(pos, self.width, self.color)
    }
}

impl Default for DrawingStyle {
    fn default() -> Self {
        Self {
            width: 5.0,
            color: WHITE,
            fade_time: 120.0,
            max_items: 128,
        }
    }
}
