use crate::config::StorageConfig;
use crate::error::DrawError;
use std::path::{Path, PathBuf};

/// Extension used when none is configured.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Identity of the scene the drawings belong to, used to name save files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneId {
    pub name: String,
    /// Hex content hash of the scene data
    pub digest: String,
}

impl SceneId {
    pub fn new(name: impl Into<String>, digest: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            digest: digest.into(),
        }
    }

    /// Identifies a scene by name plus a `blake3` hash of its raw data.
    pub fn from_contents(name: impl Into<String>, data: &[u8]) -> Self {
        Self::new(name, blake3::hash(data).to_hex().to_string())
    }

    /// File stem for this scene's default save file.
    pub fn file_stem(&self) -> String {
        format!(
            "{}_{}",
            sanitize_identifier(&self.name),
            sanitize_identifier(&self.digest)
        )
    }
}

/// Where drawing files are stored and how they are named.
#[derive(Debug, Clone)]
pub struct StorageOptions {
    pub base_dir: PathBuf,
    /// Extension without the leading dot
    pub extension: String,
}

impl StorageOptions {
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Resolves the file for a save or load.
    ///
    /// An explicit `name` wins; relative names live under `base_dir`. Without a
    /// name the scene's default file is used. The extension is appended when
    /// the name does not already end with it.
    pub fn resolve(&self, name: Option<&str>, scene: Option<&SceneId>) -> Result<PathBuf, DrawError> {
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => scene.ok_or(DrawError::NoScene)?.file_stem(),
        };
        let name = self.with_extension(&name);
        let path = Path::new(&name);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.base_dir.join(path))
        }
    }

    fn with_extension(&self, name: &str) -> String {
        let suffix = format!(".{}", self.extension);
        if self.extension.is_empty() || name.ends_with(&suffix) {
            name.to_string()
        } else {
            format!("{name}{suffix}")
        }
    }
}

/// Build storage options from configuration values.
pub fn options_from_config(storage_cfg: &StorageConfig) -> StorageOptions {
    let base_dir = match storage_cfg
        .directory
        .as_deref()
        .map(expand_tilde)
        .filter(|p| !p.as_os_str().is_empty())
    {
        Some(dir) => dir,
        None => {
            let root = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
            root.join("bgdraw")
        }
    };
    let mut options = StorageOptions::new(base_dir);
    let extension = storage_cfg.extension.trim().trim_start_matches('.');
    if !extension.is_empty() {
        options.extension = extension.to_string();
    }
    options
}

pub(crate) fn sanitize_identifier(raw: &str) -> String {
    if raw.is_empty() {
        return "default".to_string();
    }

    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub(crate) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
