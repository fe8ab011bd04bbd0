//! Game configuration
//!
//! Loaded from JSON (a file on native, a string handed over by the page on
//! web). Out-of-range values are clamped rather than rejected.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::*;

/// Failure to read or parse a configuration document
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Read a signed integer and saturate it into `usize`, so a negative count
/// reaches `sanitized` instead of failing the whole document
fn saturating_usize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = i64::deserialize(deserializer)?;
    Ok(usize::try_from(value.max(0)).unwrap_or(usize::MAX))
}

fn saturating_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = i64::deserialize(deserializer)?;
    Ok(u32::try_from(value.max(0)).unwrap_or(u32::MAX))
}

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of enemies (1..=5)
    #[serde(deserialize_with = "saturating_usize")]
    pub enemy_count: usize,
    /// Vertical positions enemies and items may occupy
    pub board_lanes: Vec<f32>,
    /// Tile columns across the board
    #[serde(deserialize_with = "saturating_u32")]
    pub board_columns: u32,
    /// Ticks a run may last before timing out
    #[serde(deserialize_with = "saturating_u32")]
    pub time_limit: u32,
    /// Inclusive enemy speed range (pixels/second)
    pub enemy_speed_range: (i32, i32),

    // === Scoring ===
    /// Points for reaching the goal
    pub goal_bonus: u64,
    /// Goal bonus loses one point per this many elapsed ticks
    #[serde(deserialize_with = "saturating_u32")]
    pub tick_decay_divisor: u32,
    /// Item value factor when the item matches the player's character
    pub identity_multiplier: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            enemy_count: DEFAULT_ENEMY_COUNT,
            board_lanes: DEFAULT_LANES.to_vec(),
            board_columns: DEFAULT_COLUMNS,
            time_limit: DEFAULT_TIME_LIMIT,
            enemy_speed_range: DEFAULT_ENEMY_SPEED_RANGE,

            goal_bonus: GOAL_BONUS,
            tick_decay_divisor: TICK_DECAY_DIVISOR,
            identity_multiplier: IDENTITY_MULTIPLIER,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Clamp every field into its valid range
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();

        let max = MAX_ENEMIES;
        if !(1..=max).contains(&config.enemy_count) {
            log::warn!("enemy_count {} clamped to 1..={}", config.enemy_count, max);
            config.enemy_count = config.enemy_count.clamp(1, max);
        }

        config.board_lanes.retain(|y| y.is_finite());
        if config.board_lanes.is_empty() {
            log::warn!("No usable board lanes, using defaults");
            config.board_lanes = DEFAULT_LANES.to_vec();
        }

        if config.board_columns == 0 {
            log::warn!("board_columns must be at least 1");
            config.board_columns = 1;
        }

        if config.time_limit == 0 {
            log::warn!("time_limit must be at least 1 tick");
            config.time_limit = 1;
        }

        let (mut min, mut max) = config.enemy_speed_range;
        if min > max {
            log::warn!("enemy_speed_range ({}, {}) reversed", min, max);
            std::mem::swap(&mut min, &mut max);
        }
        if min < 0 {
            log::warn!("Negative enemy speeds raised to 0");
            min = 0;
            max = max.max(0);
        }
        config.enemy_speed_range = (min, max);

        if config.tick_decay_divisor == 0 {
            config.tick_decay_divisor = 1;
        }

        config
    }
}
