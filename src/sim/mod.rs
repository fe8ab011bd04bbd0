//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of drawing:
//! - Seeded RNG only
//! - One update per frame, entities mutated in place
//! - Collision and scoring are pure functions over entity snapshots

pub mod collision;
pub mod rng;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{Aabb, overlaps};
pub use rng::random_int;
pub use scoring::{RunClock, ScoreRules, goal_score, item_points};
pub use state::{Board, Enemy, GameEvent, GameState, Identity, Item, ItemKind, Player, RunEnd};
pub use tick::{Action, apply_action, tick};
