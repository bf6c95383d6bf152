//! Line-oriented text encoding of a stroke's point list.
//!
//! Each point is written as `x,y,width,r,g,b,a` on its own line and a stroke
//! ends with a line holding a single `,`. Lines starting with `#` are comments.

use crate::draw::{Color, Point};
use glam::Vec2;
use log::debug;
use std::io::{self, BufRead, Write};

/// Upper bound on lines consumed for one stroke; longer blocks are cut here.
pub const MAX_LINES_PER_ITEM: usize = 4096;

/// Width substituted when a point line omits it.
pub const DEFAULT_WIDTH: f32 = 5.0;

/// Line that terminates a stroke.
pub const SEPARATOR: &str = ",";

/// Writes one stroke followed by its separator line.
pub fn write_item<W: Write>(out: &mut W, points: &[Point]) -> io::Result<()> {
    for point in points {
        let c = point.color;
        writeln!(
            out,
            "{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            point.pos.x, point.pos.y, point.width, c.r, c.g, c.b, c.a
        )?;
    }
    writeln!(out, "{SEPARATOR}")
}

/// Parses one point line. Needs at least `x` and `y`; missing trailing fields
/// fall back to [`DEFAULT_WIDTH`] and opaque white. Parsing stops at the first
/// field that is not a number, so later fields also take their defaults.
/// A width that is not finite and positive, or a non-finite color channel,
/// is replaced by its default as well.
pub fn parse_point(line: &str) -> Option<Point> {
    let mut values = [0.0, 0.0, DEFAULT_WIDTH, 1.0, 1.0, 1.0, 1.0];
    let mut parsed = 0;
    for (slot, field) in values.iter_mut().zip(line.split(',')) {
        match field.trim().parse::<f32>() {
            Ok(value) => {
                *slot = value;
                parsed += 1;
            }
            Err(_) => break,
        }
    }
    if parsed < 2 {
        return None;
    }
    let [x, y, mut width, r, g, b, a] = values;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    if !(width.is_finite() && width > 0.0) {
        width = DEFAULT_WIDTH;
    }
    let [r, g, b, a] = [r, g, b, a].map(|c| if c.is_finite() { c } else { 1.0 });
    Some(Point::new(Vec2::new(x, y), width, Color::new(r, g, b, a)))
}

/// Pulls strokes out of a text stream one at a time.
///
/// Malformed point lines are skipped and counted rather than failing the read.
/// Lines are read as raw bytes; invalid UTF-8 is replaced before parsing.
pub struct ItemReader<R> {
    input: R,
    line: Vec<u8>,
    skipped: usize,
}

impl<R: BufRead> ItemReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: Vec::new(),
            skipped: 0,
        }
    }

    /// Reads the next stroke.
    ///
    /// Returns `Ok(None)` at end of input, or when a separator or blank line
    /// arrives before any point of the current stroke. Points accumulated when
    /// the input ends without a separator are dropped.
    pub fn next_item(&mut self) -> io::Result<Option<Vec<Point>>> {
        let mut points = Vec::new();
        for _ in 0..MAX_LINES_PER_ITEM {
            self.line.clear();
            if self.input.read_until(b'\n', &mut self.line)? == 0 {
                if !points.is_empty() {
                    debug!("Dropping unterminated stroke of {} points", points.len());
                }
                return Ok(None);
            }
            let decoded = String::from_utf8_lossy(&self.line);
            let line = decoded.trim_end_matches(['\r', '\n']);
            if line.is_empty() || line.starts_with(',') {
                return Ok((!points.is_empty()).then_some(points));
            }
            if line.starts_with('#') {
                continue;
            }
            match parse_point(line) {
                Some(point) => points.push(point),
                None => {
                    debug!("Skipping malformed point line {:?}", line);
                    self.skipped += 1;
                }
            }
        }
        debug!("Stroke block exceeded {} lines; cutting it", MAX_LINES_PER_ITEM);
        Ok((!points.is_empty()).then_some(points))
    }

    /// Point lines skipped so far because they could not be parsed.
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }
}
