//! Persistent preferences (editor GUI scale)
//!
//! A tiny key/value store for the one setting that outlives a session.

use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use thiserror::Error;

/// Preference key of the editor GUI scale
pub const EDITOR_GUI_SCALE_KEY: &str = "DebugMenuConfig://EditorGUIScale";

/// Editor GUI scale used until one has been stored
pub const DEFAULT_EDITOR_GUI_SCALE: f32 = 0.5;

/// Accepted editor GUI scale range
pub const EDITOR_GUI_SCALE_RANGE: std::ops::RangeInclusive<f32> = 0.1..=10.0;

/// File name of the preferences table inside the config directory
pub const PREFS_FILE_NAME: &str = "debug_menu_prefs.toml";

/// Errors raised by file-backed preferences
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to access prefs file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse prefs: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize prefs: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// String-keyed float store
pub trait PrefsStore {
    fn get_f32(&self, key: &str) -> Option<f32>;
    fn set_f32(&mut self, key: &str, value: f32);
}

/// Volatile store, used when nothing should touch the disk
#[derive(Debug, Default, Clone)]
pub struct MemoryPrefs {
    values: HashMap<String, f32>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefsStore for MemoryPrefs {
    fn get_f32(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }

    fn set_f32(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_string(), value);
    }
}

/// TOML-file backed store; every write is flushed immediately
#[derive(Debug)]
pub struct FilePrefs {
    path: PathBuf,
    values: HashMap<String, f32>,
}

impl FilePrefs {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(source) => return Err(PrefsError::Io { path, source }),
        };
        Ok(Self { path, values })
    }

    /// Open the store in the platform config directory.
    ///
    /// Falls back to an empty store (that still writes to the same path) on error.
    pub fn open_default() -> Option<Self> {
        let path = crate::config::config_dir()?.join(PREFS_FILE_NAME);
        match Self::open(&path) {
            Ok(prefs) => Some(prefs),
            Err(e) => {
                tracing::warn!("debug menu prefs {} reset: {}", path.display(), e);
                Some(Self {
                    path,
                    values: HashMap::new(),
                })
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PrefsError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| PrefsError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string(&self.values)?;
        std::fs::write(&self.path, content).map_err(|source| PrefsError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl PrefsStore for FilePrefs {
    fn get_f32(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }

    fn set_f32(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            tracing::warn!("failed to persist debug menu prefs: {}", e);
        }
    }
}

/// Editor-only GUI scale, read lazily from and written through to a [`PrefsStore`]
pub struct EditorGuiScale {
    store: Box<dyn PrefsStore>,
    cached: Option<f32>,
}

impl EditorGuiScale {
    pub fn new(store: Box<dyn PrefsStore>) -> Self {
        Self {
            store,
            cached: None,
        }
    }

    /// Current scale, loading it from the store on first use
    pub fn get(&mut self) -> f32 {
        if let Some(value) = self.cached {
            return value;
        }
        let value = self
            .store
            .get_f32(EDITOR_GUI_SCALE_KEY)
            .map_or(DEFAULT_EDITOR_GUI_SCALE, clamp_scale);
        self.cached = Some(value);
        value
    }

    /// Store a new scale, clamped to [`EDITOR_GUI_SCALE_RANGE`].
    /// Values equal to the current one are not written.
    pub fn set(&mut self, value: f32) {
        let value = clamp_scale(value);
        let previous = self.get();
        if (value - previous) * (value - previous) <= f32::EPSILON {
            return;
        }
        self.cached = Some(value);
        self.store.set_f32(EDITOR_GUI_SCALE_KEY, value);
    }
}

fn clamp_scale(value: f32) -> f32 {
    if value.is_nan() {
        return DEFAULT_EDITOR_GUI_SCALE;
    }
    value.clamp(*EDITOR_GUI_SCALE_RANGE.start(), *EDITOR_GUI_SCALE_RANGE.end())
}
