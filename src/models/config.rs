use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_grid::GridShape;

use super::{ExhaustionPolicy, LightingMode};

/// Rows of the Chroma keyboard custom-effect grid
pub const KEYBOARD_ROWS: usize = 6;

/// Columns of the Chroma keyboard custom-effect grid
pub const KEYBOARD_COLS: usize = 22;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Wallpaper file to track (defaults to the Windows transcoded wallpaper)
    #[serde(default)]
    pub wallpaper: Option<PathBuf>,

    /// Delay between polls of the wallpaper modification time
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Extra attempts after a failed read within one poll
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Delay between attempts within one poll
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_grid_rows")]
    pub grid_rows: usize,

    #[serde(default = "default_grid_cols")]
    pub grid_cols: usize,

    /// Per-key grid or one color for the whole device
    #[serde(default)]
    pub mode: LightingMode,

    /// What to do when every attempt in a poll fails
    #[serde(default)]
    pub on_exhausted: ExhaustionPolicy,

    /// Re-send the last colors on every unchanged poll (keeps the session alive)
    #[serde(default = "default_republish")]
    pub republish: bool,

    /// Chroma REST API settings
    #[serde(default)]
    pub chroma: ChromaConfig,
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_retry_count() -> u32 {
    2
}

fn default_retry_delay_ms() -> u64 {
    250
}

fn default_grid_rows() -> usize {
    KEYBOARD_ROWS
}

fn default_grid_cols() -> usize {
    KEYBOARD_COLS
}

fn default_republish() -> bool {
    true
}

/// Razer Chroma REST API settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChromaConfig {
    /// Base URL of the local Chroma SDK server
    #[serde(default = "default_chroma_url")]
    pub url: String,

    /// Device endpoint to drive (e.g. "keyboard")
    #[serde(default = "default_device")]
    pub device: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_description")]
    pub description: String,

    #[serde(default = "default_title")]
    pub author_name: String,

    #[serde(default = "default_author_contact")]
    pub author_contact: String,
}

fn default_chroma_url() -> String {
    "http://localhost:54235/razer/chromasdk".to_string()
}

fn default_device() -> String {
    "keyboard".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_title() -> String {
    "Chroma Reflect".to_string()
}

fn default_description() -> String {
    "Mirror the desktop wallpaper on Razer Chroma devices".to_string()
}

fn default_author_contact() -> String {
    "https://github.com/edjmore/chroma-reflect".to_string()
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            url: default_chroma_url(),
            device: default_device(),
            timeout_ms: default_timeout_ms(),
            title: default_title(),
            description: default_description(),
            author_name: default_title(),
            author_contact: default_author_contact(),
        }
    }
}

impl ChromaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults.
    ///
    /// A missing path or file is not an error. A file that cannot be read or
    /// parsed is logged and ignored.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        rows = config.grid_rows,
                        cols = config.grid_cols,
                        mode = ?config.mode,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to an all-defaults map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Total attempts per poll: the first try plus `retry_count` retries
    pub fn attempts(&self) -> u32 {
        self.retry_count.saturating_add(1)
    }

    pub fn grid_shape(&self) -> GridShape {
        GridShape::new(self.grid_rows, self.grid_cols)
    }

    /// The wallpaper file to track: the configured override, or the
    /// platform default under the user's home directory.
    pub fn wallpaper_path(&self) -> Option<PathBuf> {
        self.wallpaper.clone().or_else(default_wallpaper_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wallpaper: None,
            poll_interval_ms: default_poll_interval_ms(),
            retry_count: default_retry_count(),
            retry_delay_ms: default_retry_delay_ms(),
            grid_rows: default_grid_rows(),
            grid_cols: default_grid_cols(),
            mode: LightingMode::default(),
            on_exhausted: ExhaustionPolicy::default(),
            republish: default_republish(),
            chroma: ChromaConfig::default(),
        }
    }
}

/// Where Windows keeps the re-encoded copy of the current wallpaper.
pub fn default_wallpaper_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join("AppData")
            .join("Roaming")
            .join("Microsoft")
            .join("Windows")
            .join("Themes")
            .join("TranscodedWallpaper")
    })
}
