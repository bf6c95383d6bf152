//! Ribbon, cap and bevel tessellation for freehand strokes.
//!
//! Strokes are built from two primitives: a rectangular ribbon quad joining
//! two consecutive samples, and circle fans (caps, bevels, dots) whose wedges
//! are emitted as freeform quads with the last two corners at the center.

use super::color::Color;
use super::point::Point;
use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Maximum number of wedges in a full circle fan.
pub const MAX_CIRCLE_SEGMENTS: usize = 20;

/// A freeform quad: four corners and a flat color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub corners: [Vec2; 4],
    pub color: Color,
}

/// What a batch of quads represents within a stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchKind {
    /// Rectangle joining two samples
    Ribbon,
    /// Half circle at the first sample
    StartCap,
    /// Full circle at an interior joint
    Bevel,
    /// Half circle at the last sample
    EndCap,
    /// Full circle for a stroke that never moved
    Dot,
}

/// Primitives appended to a renderer in one call.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    pub kind: BatchKind,
    pub quads: Vec<Quad>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }
}

/// Angle (radians) of the vector pointing from `to` back to `from`.
///
/// Caps and ribbon offsets are expressed relative to this direction.
pub fn segment_angle(from: Vec2, to: Vec2) -> f32 {
    let d = from - to;
    d.y.atan2(d.x)
}

/// Unit vector for `angle`.
pub fn direction(angle: f32) -> Vec2 {
    Vec2::from_angle(angle)
}

/// Number of wedges used to sweep from `start` to `end`.
pub fn circle_segments(start: f32, end: f32) -> usize {
    // Tolerance keeps a half turn built from rounded angles at exactly half the wedges.
    let fraction = (end - start).abs() / TAU;
    ((fraction * MAX_CIRCLE_SEGMENTS as f32 + 1e-3) as usize).min(MAX_CIRCLE_SEGMENTS)
}

/// Fan of wedges around `center`, swept from `start` to `end`.
pub fn circle(
    kind: BatchKind,
    center: Vec2,
    width: f32,
    color: Color,
    start: f32,
    end: f32,
) -> Batch {
    let radius = width / 2.0;
    let segments = circle_segments(start, end);
    let mut quads = Vec::with_capacity(segments);
    if segments > 0 {
        let step = (end - start) / segments as f32;
        for i in 0..segments {
            let a1 = start + i as f32 * step;
            let a2 = a1 + step;
            quads.push(Quad {
                corners: [
                    center + direction(a1) * radius,
                    center + direction(a2) * radius,
                    center,
                    center,
                ],
                color,
            });
        }
    }
    Batch { kind, quads }
}

/// Rectangle joining `from` to `to`, offset by half of `to`'s width.
pub fn ribbon(from: Vec2, to: &Point) -> Batch {
    let angle = segment_angle(from, to.pos);
    let offset = direction(angle + FRAC_PI_2) * (to.width / 2.0);
    Batch {
        kind: BatchKind::Ribbon,
        quads: vec![Quad {
            corners: [from + offset, from - offset, to.pos + offset, to.pos - offset],
            color: to.color,
        }],
    }
}

/// Batches for a segment ending at `to`.
///
/// `prev` is the sample the segment starts from and `index` is the index `to`
/// will have once appended. The second point gets a start cap at the first
/// one; later points get a full bevel at the previous joint.
pub fn segment(prev: &Point, to: &Point, index: usize) -> Vec<Batch> {
    let angle = segment_angle(prev.pos, to.pos);
    let joint = if index == 1 {
        circle(
            BatchKind::StartCap,
            prev.pos,
            prev.width,
            prev.color,
            angle + FRAC_PI_2,
            angle - FRAC_PI_2,
        )
    } else {
        circle(BatchKind::Bevel, prev.pos, prev.width, prev.color, 0.0, TAU)
    };
    vec![joint, ribbon(prev.pos, to)]
}

/// Half circle closing a stroke whose last segment runs from `prev` to `last`.
pub fn end_cap(prev: Vec2, last: &Point) -> Batch {
    let angle = segment_angle(prev, last.pos);
    circle(
        BatchKind::EndCap,
        last.pos,
        last.width,
        last.color,
        angle + FRAC_PI_2,
        angle + PI + FRAC_PI_2,
    )
}

/// Filled circle for a stroke that ends where it started.
pub fn dot(point: &Point) -> Batch {
    circle(BatchKind::Dot, point.pos, point.width, point.color, 0.0, TAU)
}
