//! Lane Dash - A grid-crossing arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, movement, collisions, scoring, run resets)
//! - `config`: Tolerant, data-driven game configuration
//! - `game`: Host-facing facade (update/tick/input/render snapshot)
//! - `render`: Read-only render snapshot and sprite lookup tables
//! - `highscores`: Leaderboard of finished runs

pub mod config;
pub mod game;
pub mod highscores;
pub mod render;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::{ConfigError, GameConfig};
pub use game::{Game, HostClock};
pub use highscores::HighScores;
pub use render::RenderState;
pub use sim::{Action, GameEvent, GameState, Identity, ItemKind};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Width of one board column (pixels)
    pub const TILE_WIDTH: f32 = 100.0;
    /// Height of one board row (pixels)
    pub const TILE_HEIGHT: f32 = 80.0;

    /// Player start row (bottom of the board)
    pub const PLAYER_START_Y: f32 = 370.0;
    /// Lowest y the player may stand on; below zero is the goal row
    pub const GOAL_BOUND_Y: f32 = -90.0;
    /// Player speed multiplier applied to one tile per key press
    pub const PLAYER_SPEED: f32 = 1.0;

    /// Enemies enter from just off the left edge
    pub const ENEMY_SPAWN_X: f32 = -101.0;
    /// Distance past the board's right edge before an enemy is recycled
    pub const ENEMY_EXIT_MARGIN: f32 = 106.0;
    /// Hard cap on the enemy collection size
    pub const MAX_ENEMIES: usize = 5;

    /// Collision box sizes (width, height)
    pub const ENEMY_BOX: (f32, f32) = (90.0, 60.0);
    pub const PLAYER_BOX: (f32, f32) = (60.0, 60.0);
    pub const ITEM_BOX: (f32, f32) = (60.0, 60.0);

    /// Where a collected item is parked until the next run
    pub const HIDDEN_POS: (f32, f32) = (-1000.0, -1000.0);

    /// Real-time cadence of the run clock (seconds per tick)
    pub const TICK_INTERVAL_SECS: f32 = 1.0;
    /// Largest frame step the host clock will hand to `update`
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Canonical defaults (see `GameConfig::default`)
    pub const DEFAULT_ENEMY_COUNT: usize = 3;
    pub const DEFAULT_LANES: [f32; 3] = [50.0, 130.0, 210.0];
    pub const DEFAULT_COLUMNS: u32 = 5;
    pub const DEFAULT_TIME_LIMIT: u32 = 300;
    pub const DEFAULT_ENEMY_SPEED_RANGE: (i32, i32) = (60, 240);
    pub const GOAL_BONUS: u64 = 100;
    pub const TICK_DECAY_DIVISOR: u32 = 10;
    pub const IDENTITY_MULTIPLIER: u64 = 10;
}

/// Pixel position of a board cell (column, row origin at the top-left)
#[inline]
pub fn cell_to_pos(column: u32, lane_y: f32) -> Vec2 {
    Vec2::new(column as f32 * consts::TILE_WIDTH, lane_y)
}
