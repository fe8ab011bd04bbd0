//! Run clock and scoring rules
//!
//! The run clock is advanced by the host on a fixed real-time cadence,
//! independently of the per-frame update. Scores are unsigned and every
//! subtraction saturates, so a score can never drop below zero.

use serde::{Deserialize, Serialize};

use super::state::{Identity, ItemKind};
use crate::config::GameConfig;

/// Elapsed ticks for the current run and the limit that ends it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunClock {
    pub elapsed_ticks: u32,
    pub time_limit: u32,
}

impl RunClock {
    pub fn new(time_limit: u32) -> Self {
        Self {
            elapsed_ticks: 0,
            time_limit,
        }
    }

    /// One fixed-cadence increment
    pub fn tick(&mut self) {
        self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);
    }

    pub fn reset(&mut self) {
        self.elapsed_ticks = 0;
    }

    pub fn is_timed_out(&self) -> bool {
        self.elapsed_ticks > self.time_limit
    }

    /// Ticks left before the run times out (0 once timed out)
    pub fn remaining(&self) -> u32 {
        self.time_limit.saturating_sub(self.elapsed_ticks)
    }
}

/// Tunable point values, taken from the sanitized config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRules {
    /// Flat bonus for reaching the goal row
    pub goal_bonus: u64,
    /// One point is lost per this many elapsed ticks on a goal
    pub tick_decay_divisor: u32,
    /// Item value factor when the item is bound to the player's identity
    pub identity_multiplier: u64,
}

impl ScoreRules {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            goal_bonus: config.goal_bonus,
            tick_decay_divisor: config.tick_decay_divisor.max(1),
            identity_multiplier: config.identity_multiplier,
        }
    }
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Score after reaching the goal: bonus first, then the slow-run penalty
pub fn goal_score(score: u64, elapsed_ticks: u32, rules: &ScoreRules) -> u64 {
    let penalty = u64::from(elapsed_ticks / rules.tick_decay_divisor.max(1));
    score.saturating_add(rules.goal_bonus).saturating_sub(penalty)
}

/// Points for collecting an item of `kind` while playing as `identity`
pub fn item_points(kind: ItemKind, identity: Identity, rules: &ScoreRules) -> u64 {
    let value = kind.value();
    if kind.bound_identity() == Some(identity) {
        value.saturating_mul(rules.identity_multiplier)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_times_out_after_limit() {
        let mut clock = RunClock::new(3);
        for _ in 0..3 {
            clock.tick();
        }
        assert!(!clock.is_timed_out());
        assert_eq!(clock.remaining(), 0);

        clock.tick();
        assert!(clock.is_timed_out());

        clock.reset();
        assert_eq!(clock.elapsed_ticks, 0);
        assert!(!clock.is_timed_out());
    }

    #[test]
    fn test_goal_score_applies_bonus_then_decay() {
        let rules = ScoreRules::default();
        assert_eq!(goal_score(0, 0, &rules), 100);
        assert_eq!(goal_score(0, 45, &rules), 96);
        assert_eq!(goal_score(250, 9, &rules), 350);
    }

    #[test]
    fn test_goal_score_never_negative() {
        let rules = ScoreRules {
            goal_bonus: 5,
            tick_decay_divisor: 1,
            identity_multiplier: 10,
        };
        assert_eq!(goal_score(0, 300, &rules), 0);
    }

    #[test]
    fn test_item_points_multiplier_for_matching_identity() {
        let rules = ScoreRules::default();
        let kind = ItemKind::Blue;
        assert_eq!(kind.value(), 10);
        let owner = kind.bound_identity().expect("blue gem is bound");

        assert_eq!(item_points(kind, owner, &rules), 100);
        assert_eq!(item_points(kind, owner.next(), &rules), 10);
    }

    #[test]
    fn test_unbound_item_never_multiplied() {
        let rules = ScoreRules::default();
        for identity in Identity::ALL {
            assert_eq!(item_points(ItemKind::Heart, identity, &rules), ItemKind::Heart.value());
        }
    }
}
