pub mod config;
pub mod lighting;

pub use config::{default_wallpaper_path, AppConfig, ChromaConfig, KEYBOARD_COLS, KEYBOARD_ROWS};
pub use lighting::{ExhaustionPolicy, LightingMode};
