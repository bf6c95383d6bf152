//! Stroke data model and geometry.
//!
//! This module defines the core drawing types used for background annotation:
//! - [`Point`]: one sample along a stroke (position, width, color)
//! - [`Item`]: a stroke with its render geometry, bounds and age
//! - [`geometry`]: ribbon/cap/bevel tessellation
//! - [`hit`]: eraser intersection tests

pub mod color;
pub mod geometry;
pub mod hit;
pub mod item;
pub mod point;
pub mod style;

// Re-export commonly used types at module level
pub use color::Color;
pub use geometry::{Batch, BatchKind, Quad};
pub use item::{Item, MAX_POINTS_PER_ITEM, MoveOutcome};
pub use point::{Bounds, Point};
pub use style::DrawingStyle;
