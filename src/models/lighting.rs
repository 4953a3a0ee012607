use serde::Deserialize;

/// What the device shows for a wallpaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LightingMode {
    /// Per-key colors: the wallpaper's dominant color in each grid cell
    #[default]
    Grid,
    /// One color for the whole device: the wallpaper's average color
    Static,
}

/// What the reconciler does when every attempt within one poll fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExhaustionPolicy {
    /// Stop reconciling; the process tears down the session and exits
    #[default]
    Exit,
    /// Leave the device on its last colors and keep polling
    KeepLastGood,
}
