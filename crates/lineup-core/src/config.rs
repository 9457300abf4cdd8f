//! Configuration management for lineup.
//!
//! Loads configuration from ${LINEUP_HOME}/config.toml with sensible defaults.
//! Every section and field is optional; a missing file yields the defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::motion::Easing;

/// Input mode setting.
///
/// `Auto` classifies the environment once at startup from the terminal width
/// and the configured touch flag; the explicit settings bypass classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    /// Classify from terminal width and the touch flag (default).
    #[default]
    Auto,
    /// Hover to show, row-leave to reset.
    Pointer,
    /// Tap to toggle, outside tap to reset.
    Touch,
    /// Both surfaces at once.
    Hybrid,
}

impl ModeSetting {
    /// Returns the config-file spelling of this setting.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModeSetting::Auto => "auto",
            ModeSetting::Pointer => "pointer",
            ModeSetting::Touch => "touch",
            ModeSetting::Hybrid => "hybrid",
        }
    }
}

/// Roster contents: the resting title plus the members behind the tiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Name shown when no tile is active.
    pub title: String,
    /// One display name per tile, in row order.
    pub members: Vec<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            title: "The Team".to_string(),
            members: vec![
                "Ada Lovelace".to_string(),
                "Grace Hopper".to_string(),
                "Alan Turing".to_string(),
                "Katherine Johnson".to_string(),
            ],
        }
    }
}

/// Input routing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Input mode; `auto` resolves once at startup.
    pub mode: ModeSetting,
    /// Minimum terminal width (columns) for pointer classification in `auto`.
    pub pointer_min_cols: u16,
    /// Whether the environment should be treated as touch-capable.
    /// Terminals do not report touch, so this is declared, not detected.
    pub touch: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mode: ModeSetting::Auto,
            pointer_min_cols: crate::input::POINTER_MIN_COLS,
            touch: false,
        }
    }
}

/// Name transition tuning.
///
/// The historical tuning rounds of this widget differ only in these numbers;
/// they are configuration, not code paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Vertical travel of an exiting glyph, percent of glyph height.
    pub exit_offset_percent: f32,
    /// Vertical travel of an entering glyph, percent of glyph height.
    pub enter_offset_percent: f32,
    /// Exit animation length in milliseconds.
    pub exit_duration_ms: u64,
    /// Enter animation length in milliseconds.
    pub enter_duration_ms: u64,
    /// Delay between adjacent glyphs' start times in milliseconds.
    pub stagger_interval_ms: u64,
    /// Interpolation curve for all glyph and tile tweens.
    pub easing: Easing,
    /// How far into the exit the enter may begin: 1.0 starts both together,
    /// 0.0 waits for the exit to finish.
    pub overlap_fraction: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            exit_offset_percent: 120.0,
            enter_offset_percent: 120.0,
            exit_duration_ms: 500,
            enter_duration_ms: 500,
            stagger_interval_ms: 20,
            easing: Easing::OutQuart,
            overlap_fraction: 1.0,
        }
    }
}

impl MotionConfig {
    pub fn exit_duration(&self) -> Duration {
        Duration::from_millis(self.exit_duration_ms)
    }

    pub fn enter_duration(&self) -> Duration {
        Duration::from_millis(self.enter_duration_ms)
    }

    pub fn stagger_interval(&self) -> Duration {
        Duration::from_millis(self.stagger_interval_ms)
    }
}

/// Tile row sizing and resize tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// Resting tile width in columns.
    pub base_width: u16,
    /// Active tile width in columns.
    pub enlarged_width: u16,
    /// Growth of the active tile, milliseconds.
    pub grow_duration_ms: u64,
    /// Shrink of a single tile on un-hover and of all tiles on reset.
    pub shrink_duration_ms: u64,
    /// Shrink of the non-target tiles while a swap is in flight.
    pub swap_shrink_duration_ms: u64,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            base_width: 8,
            enlarged_width: 16,
            grow_duration_ms: 500,
            shrink_duration_ms: 500,
            swap_shrink_duration_ms: 300,
        }
    }
}

impl TileConfig {
    pub fn grow_duration(&self) -> Duration {
        Duration::from_millis(self.grow_duration_ms)
    }

    pub fn shrink_duration(&self) -> Duration {
        Duration::from_millis(self.shrink_duration_ms)
    }

    pub fn swap_shrink_duration(&self) -> Duration {
        Duration::from_millis(self.swap_shrink_duration_ms)
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub roster: RosterConfig,
    pub input: InputConfig,
    pub motion: MotionConfig,
    pub tiles: TileConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Checks the numeric ranges the motion model relies on.
    pub fn validate(&self) -> Result<()> {
        if self.motion.exit_offset_percent <= 0.0 || self.motion.enter_offset_percent <= 0.0 {
            anyhow::bail!("motion offsets must be positive percentages");
        }
        if !(0.0..=1.0).contains(&self.motion.overlap_fraction) {
            anyhow::bail!(
                "motion.overlap_fraction must be within 0.0..=1.0, got {}",
                self.motion.overlap_fraction
            );
        }
        if self.tiles.enlarged_width <= self.tiles.base_width {
            anyhow::bail!(
                "tiles.enlarged_width ({}) must exceed tiles.base_width ({})",
                self.tiles.enlarged_width,
                self.tiles.base_width
            );
        }
        Ok(())
    }

    /// Writes the commented template to `path`.
    ///
    /// Refuses to overwrite an existing file.
    pub fn write_template(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

/// Default config file contents, written by `lineup config init`.
pub fn default_config_template() -> &'static str {
    r#"# lineup configuration

[roster]
# Name shown while no tile is active.
title = "The Team"
# One name per tile, in row order.
members = ["Ada Lovelace", "Grace Hopper", "Alan Turing", "Katherine Johnson"]

[input]
# auto | pointer | touch | hybrid
mode = "auto"
# Minimum terminal width (columns) for pointer classification in auto mode.
pointer_min_cols = 90
# Declare the environment touch-capable (terminals cannot detect this).
touch = false

[motion]
# Vertical glyph travel, percent of glyph height. Earlier tunings used 80.
exit_offset_percent = 120.0
enter_offset_percent = 120.0
exit_duration_ms = 500
enter_duration_ms = 500
stagger_interval_ms = 20
# linear | out-quart | in-out-cubic | out-back
easing = "out-quart"
# 1.0 runs enter and exit together, 0.0 runs them back to back.
overlap_fraction = 1.0

[tiles]
base_width = 8
enlarged_width = 16
grow_duration_ms = 500
shrink_duration_ms = 500
swap_shrink_duration_ms = 300
"#
}

pub mod paths {
    //! Path resolution for lineup configuration and data directories.
    //!
    //! LINEUP_HOME resolution order:
    //! 1. LINEUP_HOME environment variable (if set)
    //! 2. ~/.config/lineup (default)

    use std::path::PathBuf;

    /// Returns the lineup home directory.
    pub fn lineup_home() -> PathBuf {
        if let Ok(home) = std::env::var("LINEUP_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("lineup"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        lineup_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        lineup_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.input.mode, ModeSetting::Auto);
        assert_eq!(config.motion.exit_offset_percent, 120.0);
        assert_eq!(config.tiles.base_width, 8);
        assert!(!config.roster.members.is_empty());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [motion]
            exit_offset_percent = 80.0
            stagger_interval_ms = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.motion.exit_offset_percent, 80.0);
        assert_eq!(config.motion.stagger_interval_ms, 30);
        // Untouched fields keep their defaults
        assert_eq!(config.motion.exit_duration_ms, 500);
        assert_eq!(config.input.pointer_min_cols, 90);
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let from_template: Config = toml::from_str(default_config_template()).unwrap();
        let defaults = Config::default();
        assert_eq!(from_template.roster.title, defaults.roster.title);
        assert_eq!(from_template.motion.easing, defaults.motion.easing);
        assert_eq!(
            from_template.tiles.enlarged_width,
            defaults.tiles.enlarged_width
        );
    }

    #[test]
    fn test_unknown_easing_is_an_error() {
        let result: std::result::Result<Config, _> = toml::from_str(
            r#"
            [motion]
            easing = "bounce-twice"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_overlap() {
        let mut config = Config::default();
        config.motion.overlap_fraction = 1.5;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("overlap_fraction"));
    }

    #[test]
    fn test_validate_rejects_inverted_tile_widths() {
        let mut config = Config::default();
        config.tiles.enlarged_width = config.tiles.base_width;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_write_template_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::write_template(&path).unwrap();
        assert!(path.exists());
        assert!(Config::write_template(&path).is_err());
    }
}
