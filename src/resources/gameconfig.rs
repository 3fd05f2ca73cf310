//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [grid]
//! width = 50
//! height = 50
//!
//! [loading]
//! budget_ms = 8
//!
//! [loop]
//! target_tps = 60
//! play_ticks = 600
//!
//! [avatar]
//! sequence = fly
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_GRID_WIDTH: u32 = 50;
const DEFAULT_GRID_HEIGHT: u32 = 50;
/// Half a tick at 60 ticks per second.
const DEFAULT_LOAD_BUDGET_MS: f64 = 8.0;
const DEFAULT_TARGET_TPS: u32 = 60;
const DEFAULT_PLAY_TICKS: u64 = 600;
const DEFAULT_AVATAR_SEQUENCE: &str = "fly";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Logical grid width in cells.
    pub grid_width: u32,
    /// Logical grid height in cells.
    pub grid_height: u32,
    /// Wall-clock budget for one grid fill slice.
    pub load_budget_ms: f64,
    /// Ticks per second the loop aims for.
    pub target_tps: u32,
    /// Ticks to spend in the Playing state before quitting. 0 runs forever.
    pub play_ticks: u64,
    /// Sequence the avatar runs on entering play.
    pub avatar_sequence: String,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            load_budget_ms: DEFAULT_LOAD_BUDGET_MS,
            target_tps: DEFAULT_TARGET_TPS,
            play_ticks: DEFAULT_PLAY_TICKS,
            avatar_sequence: DEFAULT_AVATAR_SEQUENCE.to_string(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Length of one tick in seconds.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.target_tps.max(1) as f32
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [grid] section
        if let Some(width) = read_u32(config, "grid", "width") {
            self.grid_width = width;
        }
        if let Some(height) = read_u32(config, "grid", "height") {
            self.grid_height = height;
        }

        // [loading] section
        match config.getfloat("loading", "budget_ms") {
            Ok(Some(budget)) if budget.is_finite() && budget >= 0.0 => {
                self.load_budget_ms = budget;
            }
            Ok(Some(budget)) => warn!("Ignoring invalid loading budget {}ms", budget),
            Ok(None) => {}
            Err(e) => warn!("Ignoring unreadable loading budget: {}", e),
        }

        // [loop] section
        if let Some(tps) = read_u32(config, "loop", "target_tps") {
            if tps == 0 {
                warn!("Ignoring target_tps = 0");
            } else {
                self.target_tps = tps;
            }
        }
        if let Some(ticks) = config.getuint("loop", "play_ticks").ok().flatten() {
            self.play_ticks = ticks;
        }

        // [avatar] section
        if let Some(sequence) = config.get("avatar", "sequence") {
            self.avatar_sequence = sequence;
        }

        info!(
            "Loaded config: {}x{} grid, {}ms load budget, {} tps, {} play ticks, avatar '{}'",
            self.grid_width,
            self.grid_height,
            self.load_budget_ms,
            self.target_tps,
            self.play_ticks,
            self.avatar_sequence
        );
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("grid", "width", Some(self.grid_width.to_string()));
        config.set("grid", "height", Some(self.grid_height.to_string()));
        config.set("loading", "budget_ms", Some(self.load_budget_ms.to_string()));
        config.set("loop", "target_tps", Some(self.target_tps.to_string()));
        config.set("loop", "play_ticks", Some(self.play_ticks.to_string()));
        config.set("avatar", "sequence", Some(self.avatar_sequence.clone()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

/// Read an unsigned key that must fit in a `u32`; anything else is ignored
/// with a warning.
fn read_u32(config: &Ini, section: &str, key: &str) -> Option<u32> {
    match config.getuint(section, key) {
        Ok(Some(value)) => match u32::try_from(value) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring out-of-range [{}] {} = {}", section, key, value);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!("Ignoring unreadable [{}] {}: {}", section, key, e);
            None
        }
    }
}
