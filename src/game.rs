//! Host-facing game facade
//!
//! Wraps `GameState` with the entry points a host loop calls: one `update`
//! per frame, one `on_tick` per fixed real-time interval, one `on_input` per
//! key release, and `render_state` to draw. `HostClock` turns raw wall-clock
//! frame times into both of those clocks.

use crate::config::GameConfig;
use crate::consts::{MAX_FRAME_DT, TICK_INTERVAL_SECS};
use crate::highscores::HighScores;
use crate::render::RenderState;
use crate::sim::{Action, GameEvent, GameState, apply_action, tick};

/// What the host should run for one wall-clock frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSteps {
    /// Frame step to pass to `update` (clamped)
    pub dt: f32,
    /// Number of fixed-cadence ticks that came due
    pub ticks: u32,
}

/// Splits wall-clock time into the variable frame step and the fixed
/// one-second run-clock cadence
#[derive(Debug, Clone, Default)]
pub struct HostClock {
    /// Seconds since the last tick, kept in f64 so summed frame times
    /// don't fall just short of a whole interval
    accumulator: f64,
}

/// Slack for frame times that land a hair under a tick boundary
const TICK_EPSILON: f64 = 1e-6;

impl HostClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for `elapsed` wall-clock seconds since the previous frame
    pub fn advance(&mut self, elapsed: f32) -> FrameSteps {
        let elapsed = elapsed.max(0.0);
        self.accumulator += f64::from(elapsed);

        let interval = f64::from(TICK_INTERVAL_SECS);
        let mut ticks = 0;
        while self.accumulator + TICK_EPSILON >= interval {
            self.accumulator = (self.accumulator - interval).max(0.0);
            ticks += 1;
        }

        FrameSteps {
            dt: elapsed.min(MAX_FRAME_DT),
            ticks,
        }
    }
}

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    high_scores: HighScores,
    clock: HostClock,
}

impl Game {
    /// Build the board, the fixed enemy collection, the player and the item
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        Self {
            state: GameState::new(config, seed),
            high_scores: HighScores::new(),
            clock: HostClock::new(),
        }
    }

    /// Carry over a leaderboard from an earlier session
    pub fn set_high_scores(&mut self, high_scores: HighScores) {
        self.high_scores = high_scores;
    }

    /// Advance one simulation step of `dt` seconds
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        let events = tick(&mut self.state, dt);
        for event in &events {
            match *event {
                GameEvent::EnemyCollision { lost_score, .. } | GameEvent::TimedOut { lost_score } => {
                    self.high_scores.add_score(
                        lost_score,
                        self.state.player.identity,
                        self.state.runs,
                    );
                }
                _ => {}
            }
        }
        events
    }

    /// Advance the fixed-cadence run clock by one tick
    pub fn on_tick(&mut self) {
        self.state.clock.tick();
    }

    /// Buffer a move or cycle the character
    pub fn on_input(&mut self, action: Action) -> Option<GameEvent> {
        apply_action(&mut self.state, action)
    }

    /// Drive both clocks from one wall-clock frame: due ticks first, then
    /// the frame update
    pub fn frame(&mut self, elapsed: f32) -> Vec<GameEvent> {
        let steps = self.clock.advance(elapsed);
        for _ in 0..steps.ticks {
            self.on_tick();
        }
        self.update(steps.dt)
    }

    pub fn render_state(&self) -> RenderState {
        RenderState::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_host_clock_fires_once_per_second() {
        let mut clock = HostClock::new();
        let mut ticks = 0;
        for _ in 0..125 {
            let steps = clock.advance(0.016);
            assert_eq!(steps.dt, 0.016);
            ticks += steps.ticks;
        }
        // 125 * 16ms = 2.0s
        assert_eq!(ticks, 2);
    }

    #[test]
    fn test_host_clock_one_minute_at_60fps() {
        let mut clock = HostClock::new();
        let ticks: u32 = (0..3600).map(|_| clock.advance(1.0 / 60.0).ticks).sum();
        assert_eq!(ticks, 60);
    }

    #[test]
    fn test_host_clock_clamps_long_frames() {
        let mut clock = HostClock::new();
        let steps = clock.advance(2.5);
        assert_eq!(steps.dt, MAX_FRAME_DT);
        assert_eq!(steps.ticks, 2);
        assert_eq!(clock.advance(0.5).ticks, 1);
    }

    #[test]
    fn test_frame_advances_run_clock() {
        let mut game = Game::new(&GameConfig::default(), 1);
        for enemy in &mut game.state_mut().enemies {
            enemy.pos.y = 2000.0;
            enemy.speed = 0.0;
        }
        game.frame(3.0);
        assert_eq!(game.state().clock.elapsed_ticks, 3);
        assert_eq!(game.render_state().elapsed_ticks, 3);
    }

    #[test]
    fn test_collision_lands_on_leaderboard() {
        let mut game = Game::new(&GameConfig::default(), 1);
        let start = game.state().player.pos;
        game.state_mut().player.score = 180;
        game.state_mut().enemies[0].pos = start;

        let events = game.update(0.0);
        assert!(matches!(
            events[0],
            GameEvent::EnemyCollision {
                lost_score: 180,
                ..
            }
        ));
        assert_eq!(game.high_scores().top_score(), Some(180));
        assert_eq!(game.render_state().player.score, 0);
    }

    #[test]
    fn test_input_goes_through_to_player() {
        let mut game = Game::new(&GameConfig::default(), 1);
        for enemy in &mut game.state_mut().enemies {
            enemy.pos.y = 2000.0;
            enemy.speed = 0.0;
        }
        game.state_mut().item.hide();

        assert!(game.on_input(Action::Left).is_none());
        game.update(0.016);
        assert_eq!(game.state().player.pos, Vec2::new(100.0, 370.0));

        let event = game.on_input(Action::CycleIdentity);
        assert!(matches!(event, Some(GameEvent::IdentityChanged { .. })));
        assert_eq!(game.render_state().player.name, "Cat Girl");
    }
}
