//! Library exports for the bgdraw annotation engine.
//!
//! Hosts feed per-frame channel positions and user commands into an
//! [`Engine`]; strokes are tessellated into a [`Renderer`] and can be saved
//! to and loaded from plain text files.

pub mod config;
pub mod draw;
pub mod engine;
pub mod error;
pub mod input;
pub mod render;
pub mod session;
pub mod store;

pub use config::Config;
pub use engine::{Command, CommandOutcome, Engine, FrameInput, FrameReport};
pub use error::DrawError;
pub use render::{RecordingRenderer, Renderer};
pub use store::{ItemKey, ItemStore};
