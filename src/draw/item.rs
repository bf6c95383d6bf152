//! A single freehand stroke and its render geometry.

use super::geometry::{self, Batch};
use super::point::{Bounds, Point};
use crate::render::{GeometryHandle, Renderer};

/// Strokes are finalized automatically once they hold this many points.
pub const MAX_POINTS_PER_ITEM: usize = 1024;

/// Result of feeding one sample to a stroke that is being drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Sample appended and geometry emitted
    Appended,
    /// Sample too close to the previous one; nothing changed
    Skipped,
    /// Point limit reached; the sample closed the stroke instead
    Finalized,
    /// Stroke already finished
    Ignored,
}

/// One continuous stroke: its samples plus the geometry built from them.
#[derive(Debug)]
pub struct Item {
    points: Vec<Point>,
    drawing: bool,
    killed: bool,
    age: f32,
    bounds: Bounds,
    handle: GeometryHandle,
    quad_count: usize,
}

impl Item {
    /// Starts a new stroke at `start`. No geometry is emitted until it moves
    /// or is finalized.
    pub fn begin(start: Point, renderer: &mut dyn Renderer) -> Self {
        Self {
            points: vec![start],
            drawing: true,
            killed: false,
            age: 0.0,
            bounds: Bounds::around(&start),
            handle: renderer.create_geometry(),
            quad_count: 0,
        }
    }

    /// Rebuilds a finished stroke from a stored point list.
    ///
    /// Samples are not filtered for spacing. Lists longer than
    /// [`MAX_POINTS_PER_ITEM`] are truncated. Returns `None` for an empty list.
    pub fn from_points(mut points: Vec<Point>, renderer: &mut dyn Renderer) -> Option<Self> {
        if points.len() > MAX_POINTS_PER_ITEM {
            log::debug!(
                "Truncating loaded stroke from {} to {} points",
                points.len(),
                MAX_POINTS_PER_ITEM
            );
            points.truncate(MAX_POINTS_PER_ITEM);
        }
        let (&first, rest) = points.split_first()?;
        let mut item = Self::begin(first, renderer);
        match rest.split_last() {
            None => item.pen_up(first, renderer),
            Some((&last, middle)) => {
                for &point in middle {
                    item.push_segment(point, renderer);
                }
                item.close(last, renderer);
            }
        }
        Some(item)
    }

    /// Feeds the next sample of an active stroke.
    ///
    /// Once the stroke holds one point short of [`MAX_POINTS_PER_ITEM`] the
    /// sample is taken as the terminal point, so a finished stroke never
    /// exceeds the limit.
    pub fn move_to(&mut self, sample: Point, renderer: &mut dyn Renderer) -> MoveOutcome {
        if !self.drawing {
            return MoveOutcome::Ignored;
        }
        if self.points.len() + 1 >= MAX_POINTS_PER_ITEM {
            self.pen_up(sample, renderer);
            return MoveOutcome::Finalized;
        }
        if self.last().pos.distance(sample.pos) < sample.width * 2.0 {
            return MoveOutcome::Skipped;
        }
        self.push_segment(sample, renderer);
        MoveOutcome::Appended
    }

    /// Finalizes the stroke with a terminal sample.
    ///
    /// A stroke that never left its first point and ends within half a width of
    /// it becomes a single dot and keeps its one point.
    pub fn pen_up(&mut self, sample: Point, renderer: &mut dyn Renderer) {
        if !self.drawing {
            return;
        }
        let last = *self.last();
        if self.points.len() <= 1 && last.pos.distance(sample.pos) < sample.width / 2.0 {
            self.drawing = false;
            self.emit(geometry::dot(&last), renderer);
        } else {
            self.close(sample, renderer);
        }
    }

    fn close(&mut self, sample: Point, renderer: &mut dyn Renderer) {
        let prev = self.last().pos;
        self.drawing = false;
        self.push_segment(sample, renderer);
        self.emit(geometry::end_cap(prev, &sample), renderer);
    }

    fn push_segment(&mut self, sample: Point, renderer: &mut dyn Renderer) {
        let prev = *self.last();
        for batch in geometry::segment(&prev, &sample, self.points.len()) {
            self.emit(batch, renderer);
        }
        self.points.push(sample);
        self.bounds.extend(&sample);
    }

    fn emit(&mut self, batch: Batch, renderer: &mut dyn Renderer) {
        if batch.is_empty() {
            return;
        }
        renderer.append(self.handle, &batch);
        self.quad_count += batch.len();
        self.age = 0.0;
    }

    fn last(&self) -> &Point {
        // `points` is never empty: every constructor seeds the first sample.
        &self.points[self.points.len() - 1]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }

    /// Marks the stroke for removal at the next sweep.
    pub fn kill(&mut self) {
        self.killed = true;
    }

    /// Seconds since the stroke was last modified or last active.
    pub fn age(&self) -> f32 {
        self.age
    }

    pub(crate) fn add_age(&mut self, seconds: f32) {
        self.age += seconds;
    }

    pub(crate) fn reset_age(&mut self) {
        self.age = 0.0;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn handle(&self) -> GeometryHandle {
        self.handle
    }

    /// Quads emitted so far.
    pub fn quad_count(&self) -> usize {
        self.quad_count
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        if self.quad_count > 0 {
            renderer.draw(self.handle, self.quad_count);
        }
    }

    /// Destroys the stroke and frees its geometry.
    pub fn release(self, renderer: &mut dyn Renderer) {
        renderer.release(self.handle);
    }
}
