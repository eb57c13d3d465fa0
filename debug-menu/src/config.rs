//! Debug menu configuration (debug_menu.toml)
//!
//! Tunables are loaded once at startup and treated as read-only afterwards.
//! The only mutable setting, the editor GUI scale, lives in the
//! preferences store instead (see [`crate::prefs`]).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the configuration inside the config directory
pub const CONFIG_FILE_NAME: &str = "debug_menu.toml";

/// Errors raised while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which visibility gesture the menu listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GestureStrategy {
    /// Pick by target platform: touch-hold on handheld, key chord elsewhere
    #[default]
    Auto,
    /// Modifier + key chord (and optionally right-click)
    KeyChord,
    /// Multi-finger touch and hold
    TouchHold,
}

/// Keyboard chord that toggles the menu on desktop targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuOpenChord {
    /// Require either shift key
    #[serde(default = "default_true")]
    pub shift: bool,
    /// Require alt
    #[serde(default)]
    pub alt: bool,
    /// Require control (or command on macOS)
    #[serde(default = "default_true")]
    pub control_or_command: bool,
    /// Trigger key name as understood by `egui::Key::from_name` (default: "D")
    #[serde(default = "default_key")]
    pub key: String,
    /// Also toggle on secondary mouse button release
    #[serde(default)]
    pub right_click: bool,
}

/// Touch-hold thresholds for handheld targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchGestureConfig {
    /// Simultaneous touches needed to start the hold timer (default: 2)
    #[serde(default = "default_toggle_touch_count")]
    pub toggle_touch_count: usize,
    /// Seconds the touches must be held (default: 3.0)
    #[serde(default = "default_toggle_touch_time")]
    pub toggle_touch_time: f32,
    /// Touch count that accelerates the timer (default: 3)
    #[serde(default = "default_fast_touch_count")]
    pub fast_touch_count: usize,
    /// Seconds the fast touch count must be held (default: 1.0)
    #[serde(default = "default_fast_touch_time")]
    pub fast_touch_time: f32,
}

/// Debug menu configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugMenuConfig {
    /// Master switch; when false the menu never shows and ignores registration
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Smallest width a window can be resized to (default: 200)
    #[serde(default = "default_min_window_size")]
    pub min_window_width: f32,
    /// Smallest height a window can be resized to (default: 200)
    #[serde(default = "default_min_window_size")]
    pub min_window_height: f32,
    /// Reference DPI for draw scaling (default: 96)
    #[serde(default = "default_base_dpi")]
    pub base_dpi: f32,
    /// Reference screen height used when the DPI is unknown (default: 720)
    #[serde(default = "default_base_screen_height")]
    pub base_screen_height: u32,
    /// Gesture strategy selection
    #[serde(default)]
    pub gesture: GestureStrategy,
    /// Desktop keyboard chord
    #[serde(default)]
    pub menu_open: MenuOpenChord,
    /// Handheld touch thresholds
    #[serde(default)]
    pub touch: TouchGestureConfig,
}

fn default_true() -> bool {
    true
}
fn default_key() -> String {
    "D".to_string()
}
fn default_toggle_touch_count() -> usize {
    2
}
fn default_toggle_touch_time() -> f32 {
    3.0
}
fn default_fast_touch_count() -> usize {
    3
}
fn default_fast_touch_time() -> f32 {
    1.0
}
fn default_min_window_size() -> f32 {
    200.0
}
fn default_base_dpi() -> f32 {
    96.0
}
fn default_base_screen_height() -> u32 {
    720
}

impl Default for MenuOpenChord {
    fn default() -> Self {
        Self {
            shift: default_true(),
            alt: false,
            control_or_command: default_true(),
            key: default_key(),
            right_click: false,
        }
    }
}

impl Default for TouchGestureConfig {
    fn default() -> Self {
        Self {
            toggle_touch_count: default_toggle_touch_count(),
            toggle_touch_time: default_toggle_touch_time(),
            fast_touch_count: default_fast_touch_count(),
            fast_touch_time: default_fast_touch_time(),
        }
    }
}

impl Default for DebugMenuConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            min_window_width: default_min_window_size(),
            min_window_height: default_min_window_size(),
            base_dpi: default_base_dpi(),
            base_screen_height: default_base_screen_height(),
            gesture: GestureStrategy::default(),
            menu_open: MenuOpenChord::default(),
            touch: TouchGestureConfig::default(),
        }
    }
}

impl DebugMenuConfig {
    /// Minimum window size as a vector
    pub fn min_window_size(&self) -> glam::Vec2 {
        glam::Vec2::new(self.min_window_width, self.min_window_height)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_window_width <= 0.0 || self.min_window_height <= 0.0 {
            return Err(ConfigError::Invalid(
                "minimum window size must be positive".to_string(),
            ));
        }
        if self.base_dpi <= 0.0 || self.base_screen_height == 0 {
            return Err(ConfigError::Invalid(
                "base_dpi and base_screen_height must be positive".to_string(),
            ));
        }
        let touch = &self.touch;
        if touch.toggle_touch_count == 0 {
            return Err(ConfigError::Invalid(
                "touch.toggle_touch_count must be at least 1".to_string(),
            ));
        }
        if touch.fast_touch_count < touch.toggle_touch_count {
            return Err(ConfigError::Invalid(format!(
                "touch.fast_touch_count ({}) is below toggle_touch_count ({})",
                touch.fast_touch_count, touch.toggle_touch_count
            )));
        }
        if touch.toggle_touch_time <= 0.0 || touch.fast_touch_time <= 0.0 {
            return Err(ConfigError::Invalid(
                "touch hold times must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the platform config directory.
    ///
    /// Returns defaults if the file doesn't exist or is invalid.
    pub fn load() -> Self {
        let Some(path) = config_dir().map(|dir| dir.join(CONFIG_FILE_NAME)) else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("debug menu config {} ignored: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Returns the platform-specific configuration directory.
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.nethercore", "", "Nethercore")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = DebugMenuConfig::default();
        assert!(config.enabled);
        assert_eq!(config.min_window_width, 200.0);
        assert_eq!(config.min_window_height, 200.0);
        assert_eq!(config.touch.toggle_touch_count, 2);
        assert_eq!(config.touch.fast_touch_count, 3);
        assert!((config.touch.toggle_touch_time - 3.0).abs() < f32::EPSILON);
        assert!((config.touch.fast_touch_time - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.gesture, GestureStrategy::Auto);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: DebugMenuConfig = toml::from_str("").unwrap();
        assert_eq!(config, DebugMenuConfig::default());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml_str = r#"
gesture = "touch_hold"

[menu_open]
key = "F1"

[touch]
toggle_touch_time = 2.0
"#;
        let config: DebugMenuConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gesture, GestureStrategy::TouchHold);
        assert_eq!(config.menu_open.key, "F1");
        // Unspecified chord fields fall back to serde defaults
        assert!(config.menu_open.shift);
        assert!(!config.menu_open.alt);
        assert!(config.menu_open.control_or_command);
        assert!((config.touch.toggle_touch_time - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.touch.fast_touch_count, 3);
    }

    #[test]
    fn test_validate_rejects_fast_count_below_toggle() {
        let mut config = DebugMenuConfig::default();
        config.touch.fast_touch_count = 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_zero_min_size() {
        let config = DebugMenuConfig {
            min_window_width: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = DebugMenuConfig {
            min_window_width: 320.0,
            gesture: GestureStrategy::KeyChord,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = DebugMenuConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = DebugMenuConfig::load_from(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "min_window_width = \"wide\"").unwrap();
        assert!(matches!(
            DebugMenuConfig::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
