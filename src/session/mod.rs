//! Drawing persistence (save/load) support.
//!
//! Encodes strokes as plain text, resolves file names from the current scene
//! or an explicit name, and bounds how much a single load may bring in.

pub mod codec;
mod options;
mod storage;

pub use codec::{ItemReader, MAX_LINES_PER_ITEM, parse_point, write_item};
pub use options::{DEFAULT_EXTENSION, SceneId, StorageOptions, options_from_config};
pub use storage::{
    FORMAT_HEADER, LoadedDrawing, MAX_ITEMS_PER_LOAD, SaveReport, load_drawing, save_drawing,
};
