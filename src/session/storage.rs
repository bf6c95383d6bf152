use super::codec::{ItemReader, write_item};
use crate::draw::Point;
use crate::error::DrawError;
use chrono::{SecondsFormat, Utc};
use log::{info, warn};
use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Hard ceiling on strokes read by a single load, regardless of capacity.
pub const MAX_ITEMS_PER_LOAD: usize = 4096;

/// First header line of every saved drawing.
pub const FORMAT_HEADER: &str = "# bgdraw drawing v1";

/// Summary of a completed save.
#[derive(Debug, Clone)]
pub struct SaveReport {
    pub path: PathBuf,
    pub items: usize,
    pub points: usize,
    /// Creating the parent directory failed, but the file could still be opened
    pub directory_error: Option<String>,
}

/// Strokes read from a file, ready for insertion, plus read statistics.
#[derive(Debug, Clone, Default)]
pub struct LoadedDrawing {
    /// Surviving strokes, oldest first
    pub items: Vec<Vec<Point>>,
    /// Strokes parsed from the file
    pub read: usize,
    /// Parsed strokes dropped because they exceeded the capacity
    pub discarded: usize,
    /// Malformed point lines skipped while parsing
    pub skipped_lines: usize,
    /// The read stopped at [`MAX_ITEMS_PER_LOAD`]
    pub truncated: bool,
}

/// Writes strokes to `path`, one block per stroke, after a comment header.
///
/// The parent directory is created first; a failure there is logged and
/// reported but only aborts the save if the file itself cannot be created.
pub fn save_drawing<'a, I>(path: &Path, items: I) -> Result<SaveReport, DrawError>
where
    I: IntoIterator<Item = &'a [Point]>,
{
    let mut directory_error = None;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && let Err(err) = fs::create_dir_all(parent)
    {
        warn!("Failed to create directory {}: {}", parent.display(), err);
        directory_error = Some(err.to_string());
    }

    let file = File::create(path).map_err(|source| DrawError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let write_err = |source| DrawError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(file);
    writeln!(writer, "{FORMAT_HEADER}").map_err(write_err)?;
    writeln!(
        writer,
        "# saved {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    )
    .map_err(write_err)?;

    let mut count = 0;
    let mut points = 0;
    for item in items {
        if item.is_empty() {
            continue;
        }
        write_item(&mut writer, item).map_err(write_err)?;
        count += 1;
        points += item.len();
    }
    writer.flush().map_err(write_err)?;

    info!(
        "Saved {} strokes ({} points) to {}",
        count,
        points,
        path.display()
    );
    Ok(SaveReport {
        path: path.to_path_buf(),
        items: count,
        points,
        directory_error,
    })
}

/// Reads strokes from `path`, keeping at most the last `capacity` of them.
///
/// Oldest strokes are dropped from the read queue as newer ones arrive once
/// the queue holds `capacity` strokes.
pub fn load_drawing(path: &Path, capacity: usize) -> Result<LoadedDrawing, DrawError> {
    let file = File::open(path).map_err(|source| DrawError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ItemReader::new(BufReader::new(file));
    let mut queue: VecDeque<Vec<Point>> = VecDeque::new();
    let mut loaded = LoadedDrawing::default();

    while let Some(points) = reader.next_item().map_err(|source| DrawError::Read {
        path: path.to_path_buf(),
        source,
    })? {
        loaded.read += 1;
        queue.push_back(points);
        if queue.len() > capacity {
            queue.pop_front();
            loaded.discarded += 1;
        }
        if loaded.read >= MAX_ITEMS_PER_LOAD {
            loaded.truncated = true;
            warn!(
                "Stopped reading {} after {} strokes",
                path.display(),
                MAX_ITEMS_PER_LOAD
            );
            break;
        }
    }

    if loaded.discarded > 0 {
        warn!(
            "Discarded {} strokes from {} beyond capacity {}",
            loaded.discarded,
            path.display(),
            capacity
        );
    }
    loaded.skipped_lines = reader.skipped_lines();
    loaded.items = queue.into();
    Ok(loaded)
}
