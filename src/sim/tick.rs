//! Per-frame simulation update
//!
//! Order of evaluation each frame:
//! 1. enemies advance (and recycle past the right edge)
//! 2. player applies its buffered move
//! 3. goal, else timeout, else first enemy collision ends the run
//! 4. item pickup

use serde::{Deserialize, Serialize};

use super::collision::overlaps;
use super::scoring::{goal_score, item_points};
use super::state::{GameEvent, GameState, RunEnd};

/// Discrete player input, delivered on key release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Left,
    Up,
    Right,
    Down,
    CycleIdentity,
}

impl Action {
    /// Map a host key name to an action. Unknown keys are `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "left" | "arrowleft" => Some(Action::Left),
            "up" | "arrowup" => Some(Action::Up),
            "right" | "arrowright" => Some(Action::Right),
            "down" | "arrowdown" => Some(Action::Down),
            "enter" => Some(Action::CycleIdentity),
            _ => None,
        }
    }
}

/// Apply an input between frames. Moves are only buffered; the identity
/// cycle takes effect immediately.
pub fn apply_action(state: &mut GameState, action: Action) -> Option<GameEvent> {
    let player = &mut state.player;
    match action {
        Action::Left => player.queue_move(-1.0, 0.0),
        Action::Up => player.queue_move(0.0, -1.0),
        Action::Right => player.queue_move(1.0, 0.0),
        Action::Down => player.queue_move(0.0, 1.0),
        Action::CycleIdentity => {
            let identity = player.cycle_identity();
            log::info!("Playing as {}", identity.name());
            return Some(GameEvent::IdentityChanged { identity });
        }
    }
    None
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let dt = dt.max(0.0);

    state.advance_enemies(dt);
    state.player.advance(&state.board);

    if state.player.reached_goal() {
        let score = goal_score(state.player.score, state.clock.elapsed_ticks, &state.rules);
        let points = score.saturating_sub(state.player.score);
        state.player.score = score;
        state.reset_run(RunEnd::Goal);
        events.push(GameEvent::GoalReached { points, score });
    } else if state.clock.is_timed_out() {
        let lost_score = state.reset_run(RunEnd::TimedOut);
        events.push(GameEvent::TimedOut { lost_score });
    } else {
        let player_box = state.player.bounding_box();
        // First collision wins
        let hit = state
            .enemies
            .iter()
            .find(|enemy| overlaps(&enemy.bounding_box(), &player_box))
            .map(|enemy| enemy.id);
        if let Some(enemy) = hit {
            let lost_score = state.reset_run(RunEnd::EnemyCollision);
            events.push(GameEvent::EnemyCollision { enemy, lost_score });
        }
    }

    if state.item.on_board && overlaps(&state.item.bounding_box(), &state.player.bounding_box()) {
        let kind = state.item.kind;
        let points = item_points(kind, state.player.identity, &state.rules);
        state.player.score = state.player.score.saturating_add(points);
        state.item.hide();
        log::debug!("Collected {:?} gem for {} points", kind, points);
        events.push(GameEvent::ItemCollected { kind, points });
    }

    events
}
