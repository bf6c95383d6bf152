use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by drawing persistence.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no file name given and no scene is loaded")]
    NoScene,
}

impl DrawError {
    /// Path the failure refers to, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Open { path, .. } | Self::Write { path, .. } | Self::Read { path, .. } => {
                Some(path)
            }
            Self::NoScene => None,
        }
    }
}
