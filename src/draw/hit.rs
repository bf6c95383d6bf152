//! Proximity and crossing tests against a stroke's polyline, used by the eraser.
//!
//! Both tests are read-only and linear in the number of points.

use super::point::Point;
use glam::Vec2;

/// Closest point to `p` on the segment `a`-`b`.
pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Whether segments `p1`-`p2` and `q1`-`q2` cross.
///
/// Parallel and collinear segments never report a crossing, even when they
/// overlap.
pub fn segments_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let r = p2 - p1;
    let s = q2 - q1;
    let denom = r.perp_dot(s);
    if denom == 0.0 {
        return false;
    }
    let qp = q1 - p1;
    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(r) / denom;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Whether a circle of `radius` around `pos` touches the stroke.
///
/// The stroke is treated as `width` thick around its centerline. An empty
/// point list always hits.
pub fn point_intersect(points: &[Point], pos: Vec2, radius: f32) -> bool {
    match points {
        [] => true,
        [only] => only.pos.distance(pos) <= only.width + radius,
        _ => points.windows(2).any(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            let closest = closest_point_on_segment(a.pos, b.pos, pos);
            closest.distance(pos) <= radius + a.width.max(b.width)
        }),
    }
}

/// Whether the segment `from`-`to` crosses the stroke's polyline.
///
/// Strokes with fewer than two points have no segments; for those the test
/// falls back to the distance between the point and the query segment.
pub fn line_intersect(points: &[Point], from: Vec2, to: Vec2) -> bool {
    match points {
        [] => true,
        [only] => closest_point_on_segment(from, to, only.pos).distance(only.pos) <= only.width,
        _ => points
            .windows(2)
            .any(|pair| segments_intersect(pair[0].pos, pair[1].pos, from, to)),
    }
}
