//! Stroke samples and axis-aligned bounds.

use super::color::Color;
use glam::Vec2;

/// One sample along a stroke. Width and color are captured at sample time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub pos: Vec2,
    pub width: f32,
    pub color: Color,
}

impl Point {
    pub fn new(pos: Vec2, width: f32, color: Color) -> Self {
        Self { pos, width, color }
    }
}

/// Axis-aligned box in world coordinates, used for visibility culling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Box covering a single sample, padded by half its width.
    pub fn around(point: &Point) -> Self {
        let pad = Vec2::splat(point.width / 2.0);
        Self {
            min: point.pos - pad,
            max: point.pos + pad,
        }
    }

    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Grows the box to cover `point` and its half-width.
    pub fn extend(&mut self, point: &Point) {
        let other = Self::around(point);
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}
