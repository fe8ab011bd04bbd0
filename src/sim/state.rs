//! Game state and core simulation types
//!
//! Entities are plain structs with a fixed field set. Each owns its own
//! movement and reset logic; `GameState` owns every entity and the RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::rng::{random_index, random_int};
use super::scoring::{RunClock, ScoreRules};
use crate::cell_to_pos;
use crate::config::GameConfig;
use crate::consts::*;

/// Board geometry derived from the sanitized config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Number of tile columns
    pub columns: u32,
    /// Vertical positions of the enemy/item lanes
    pub lanes: Vec<f32>,
    /// Inclusive enemy speed range (pixels/second)
    pub enemy_speed_range: (i32, i32),
}

impl Board {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            columns: config.board_columns.max(1),
            lanes: config.board_lanes.clone(),
            enemy_speed_range: config.enemy_speed_range,
        }
    }

    /// Board width in pixels
    pub fn width(&self) -> f32 {
        self.columns as f32 * TILE_WIDTH
    }

    /// Right-most column the player can stand on
    pub fn max_x(&self) -> f32 {
        (self.columns - 1) as f32 * TILE_WIDTH
    }

    /// Enemies past this x are recycled to the left edge
    pub fn exit_x(&self) -> f32 {
        self.width() + ENEMY_EXIT_MARGIN
    }

    #[inline]
    pub fn x_in_bounds(&self, x: f32) -> bool {
        (0.0..=self.max_x()).contains(&x)
    }

    /// The goal row above row zero is inside the bounds
    #[inline]
    pub fn y_in_bounds(&self, y: f32) -> bool {
        (GOAL_BOUND_Y..=PLAYER_START_Y).contains(&y)
    }

    /// Player spawn: middle column, bottom row
    pub fn start_pos(&self) -> Vec2 {
        cell_to_pos((self.columns - 1) / 2, PLAYER_START_Y)
    }

    /// Random lane as (index, y)
    pub fn random_lane(&self, rng: &mut Pcg32) -> (usize, f32) {
        let lane = random_index(rng, self.lanes.len());
        (lane, self.lanes[lane])
    }

    /// Random cell on the lane rows
    pub fn random_cell(&self, rng: &mut Pcg32) -> Vec2 {
        let max_column = i32::try_from(self.columns - 1).unwrap_or(i32::MAX);
        let column = random_int(rng, 0, max_column) as u32;
        let (_, y) = self.random_lane(rng);
        cell_to_pos(column, y)
    }

    pub fn random_enemy_speed(&self, rng: &mut Pcg32) -> f32 {
        let (min, max) = self.enemy_speed_range;
        random_int(rng, min, max) as f32
    }
}

/// An enemy crawling left to right along one lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per second
    pub speed: f32,
    /// Index into `Board::lanes`
    pub lane: usize,
}

impl Enemy {
    /// Spawn off the left edge in a random lane at a random speed
    pub fn spawn(id: u32, board: &Board, rng: &mut Pcg32) -> Self {
        let mut enemy = Self {
            id,
            pos: Vec2::ZERO,
            speed: 0.0,
            lane: 0,
        };
        enemy.reset(board, rng);
        enemy
    }

    /// Recycle to the left edge with a fresh lane and speed
    pub fn reset(&mut self, board: &Board, rng: &mut Pcg32) {
        let (lane, y) = board.random_lane(rng);
        self.lane = lane;
        self.pos = Vec2::new(ENEMY_SPAWN_X, y);
        self.speed = board.random_enemy_speed(rng);
    }

    /// Move by `speed * dt`; returns true if the enemy left the board and
    /// was recycled this step
    pub fn advance(&mut self, dt: f32, board: &Board, rng: &mut Pcg32) -> bool {
        self.pos.x += self.speed * dt;
        if self.pos.x > board.exit_x() {
            self.reset(board, rng);
            true
        } else {
            false
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_entity(self.pos, ENEMY_BOX)
    }
}

/// Playable characters, in cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Identity {
    #[default]
    Boy,
    CatGirl,
    HornGirl,
    PinkGirl,
    Princess,
}

impl Identity {
    pub const ALL: [Identity; 5] = [
        Identity::Boy,
        Identity::CatGirl,
        Identity::HornGirl,
        Identity::PinkGirl,
        Identity::Princess,
    ];

    /// Next character, wrapping back to the first
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&i| i == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Identity::Boy => "Boy",
            Identity::CatGirl => "Cat Girl",
            Identity::HornGirl => "Horn Girl",
            Identity::PinkGirl => "Pink Girl",
            Identity::Princess => "Princess",
        }
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Tiles moved per key press
    pub speed: f32,
    /// One-shot displacement, consumed by the next `advance`
    pub pending_move: Vec2,
    pub score: u64,
    pub identity: Identity,
}

impl Player {
    pub fn new(board: &Board) -> Self {
        Self {
            pos: board.start_pos(),
            speed: PLAYER_SPEED,
            pending_move: Vec2::ZERO,
            score: 0,
            identity: Identity::default(),
        }
    }

    /// Buffer a one-tile step in direction `(dx, dy)`, replacing any
    /// previous unconsumed step
    pub fn queue_move(&mut self, dx: f32, dy: f32) {
        self.pending_move = Vec2::new(dx * TILE_WIDTH, dy * TILE_HEIGHT) * self.speed;
    }

    /// Apply the buffered move per axis if that axis stays in bounds, then
    /// clear the buffer whether or not anything moved
    pub fn advance(&mut self, board: &Board) {
        let candidate = self.pos + self.pending_move;
        if board.x_in_bounds(candidate.x) {
            self.pos.x = candidate.x;
        }
        if board.y_in_bounds(candidate.y) {
            self.pos.y = candidate.y;
        }
        self.pending_move = Vec2::ZERO;
    }

    /// Standing on the goal row above row zero
    pub fn reached_goal(&self) -> bool {
        self.pos.y < 0.0
    }

    /// Back to the start cell. Score and identity are left alone.
    pub fn reset(&mut self, board: &Board) {
        self.pos = board.start_pos();
        self.speed = PLAYER_SPEED;
        self.pending_move = Vec2::ZERO;
    }

    pub fn cycle_identity(&mut self) -> Identity {
        self.identity = self.identity.next();
        self.identity
    }

    pub fn name(&self) -> &'static str {
        self.identity.name()
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_entity(self.pos, PLAYER_BOX)
    }
}

/// Gem tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Blue,
    Green,
    Orange,
    Heart,
    Key,
}

impl ItemKind {
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Blue,
        ItemKind::Green,
        ItemKind::Orange,
        ItemKind::Heart,
        ItemKind::Key,
    ];

    /// Base point value
    pub fn value(self) -> u64 {
        match self {
            ItemKind::Blue => 10,
            ItemKind::Green => 20,
            ItemKind::Orange => 30,
            ItemKind::Heart => 5,
            ItemKind::Key => 50,
        }
    }

    /// Character that earns the multiplier on this kind, if any
    pub fn bound_identity(self) -> Option<Identity> {
        match self {
            ItemKind::Blue => Some(Identity::Boy),
            ItemKind::Green => Some(Identity::CatGirl),
            ItemKind::Orange => Some(Identity::Princess),
            ItemKind::Heart | ItemKind::Key => None,
        }
    }

    pub fn random(rng: &mut Pcg32) -> Self {
        Self::ALL[random_index(rng, Self::ALL.len())]
    }
}

/// The single collectible item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    pub kind: ItemKind,
    pub on_board: bool,
}

impl Item {
    pub fn spawn(board: &Board, rng: &mut Pcg32) -> Self {
        let mut item = Self {
            pos: Vec2::from(HIDDEN_POS),
            kind: ItemKind::Blue,
            on_board: false,
        };
        item.respawn(board, rng);
        item
    }

    /// New random cell and kind
    pub fn respawn(&mut self, board: &Board, rng: &mut Pcg32) {
        self.pos = board.random_cell(rng);
        self.kind = ItemKind::random(rng);
        self.on_board = true;
    }

    /// Park off-board until the next respawn
    pub fn hide(&mut self) {
        self.pos = Vec2::from(HIDDEN_POS);
        self.on_board = false;
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_entity(self.pos, ITEM_BOX)
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEnd {
    Goal,
    EnemyCollision,
    TimedOut,
}

impl RunEnd {
    /// Enemy contact and timeouts cost the whole score
    pub fn wipes_score(self) -> bool {
        !matches!(self, RunEnd::Goal)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunEnd::Goal => "goal",
            RunEnd::EnemyCollision => "enemy collision",
            RunEnd::TimedOut => "timed out",
        }
    }
}

/// Something the host may want to react to (sounds, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player reached the goal row; `score` is the new total
    GoalReached { points: u64, score: u64 },
    /// Player touched an enemy and lost `lost_score`
    EnemyCollision { enemy: u32, lost_score: u64 },
    /// Run clock ran past the limit
    TimedOut { lost_score: u64 },
    ItemCollected { kind: ItemKind, points: u64 },
    IdentityChanged { identity: Identity },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub board: Board,
    pub rules: ScoreRules,
    /// Fixed-size collection, allocated once
    pub enemies: Vec<Enemy>,
    pub player: Player,
    pub item: Item,
    pub clock: RunClock,
    /// Number of finished runs
    pub runs: u32,
}

impl GameState {
    /// Create a new game state with the given seed. The config is sanitized
    /// before use.
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let config = config.sanitized();
        let board = Board::from_config(&config);
        let mut rng = Pcg32::seed_from_u64(seed);

        let enemies = (0..config.enemy_count)
            .map(|i| Enemy::spawn(i as u32 + 1, &board, &mut rng))
            .collect();
        let player = Player::new(&board);
        let item = Item::spawn(&board, &mut rng);

        log::info!(
            "Game initialized: seed {}, {} enemies, {} lanes, {} columns, limit {} ticks",
            seed,
            config.enemy_count,
            board.lanes.len(),
            board.columns,
            config.time_limit
        );

        Self {
            seed,
            rng,
            rules: ScoreRules::from_config(&config),
            board,
            enemies,
            player,
            item,
            clock: RunClock::new(config.time_limit),
            runs: 0,
        }
    }

    /// Advance every enemy; returns how many were recycled
    pub fn advance_enemies(&mut self, dt: f32) -> usize {
        let mut recycled = 0;
        for enemy in &mut self.enemies {
            if enemy.advance(dt, &self.board, &mut self.rng) {
                log::debug!("Enemy {} recycled into lane {}", enemy.id, enemy.lane);
                recycled += 1;
            }
        }
        recycled
    }

    /// End the current run and start the next one. A collision or timeout
    /// wipes the score; a goal keeps it (goal scoring is applied beforehand).
    /// The item always respawns; enemies keep moving. Returns the score the
    /// run ended with.
    pub fn reset_run(&mut self, reason: RunEnd) -> u64 {
        let final_score = self.player.score;
        self.player.reset(&self.board);
        if reason.wipes_score() {
            self.player.score = 0;
        }
        self.clock.reset();
        self.item.respawn(&self.board, &mut self.rng);
        self.runs += 1;

        log::info!(
            "Run {} over ({}), score {} -> {}",
            self.runs,
            reason.as_str(),
            final_score,
            self.player.score
        );
        final_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::from_config(&GameConfig::default())
    }

    #[test]
    fn test_board_geometry() {
        let board = board();
        assert_eq!(board.width(), 500.0);
        assert_eq!(board.max_x(), 400.0);
        assert_eq!(board.exit_x(), 606.0);
        assert_eq!(board.start_pos(), Vec2::new(200.0, 370.0));
        assert!(board.y_in_bounds(-30.0));
        assert!(board.y_in_bounds(-90.0));
        assert!(!board.y_in_bounds(-110.0));
        assert!(!board.y_in_bounds(450.0));
        assert!(!board.x_in_bounds(-100.0));
        assert!(!board.x_in_bounds(500.0));
    }

    #[test]
    fn test_enemy_spawns_off_left_edge_in_lane() {
        let board = board();
        let mut rng = Pcg32::seed_from_u64(3);
        for id in 0..20 {
            let enemy = Enemy::spawn(id, &board, &mut rng);
            assert_eq!(enemy.pos.x, ENEMY_SPAWN_X);
            assert_eq!(enemy.pos.y, board.lanes[enemy.lane]);
            assert!((60.0..=240.0).contains(&enemy.speed));
        }
    }

    #[test]
    fn test_enemy_advance_and_recycle() {
        let board = board();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut enemy = Enemy::spawn(1, &board, &mut rng);
        enemy.pos.x = 600.0;
        enemy.speed = 50.0;

        assert!(enemy.advance(1.0, &board, &mut rng));
        assert_eq!(enemy.pos.x, ENEMY_SPAWN_X);
        assert!(board.lanes.contains(&enemy.pos.y));
        assert!((60.0..=240.0).contains(&enemy.speed));
    }

    #[test]
    fn test_enemy_stays_when_at_threshold() {
        let board = board();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut enemy = Enemy::spawn(1, &board, &mut rng);
        enemy.pos.x = 556.0;
        enemy.speed = 50.0;

        assert!(!enemy.advance(1.0, &board, &mut rng));
        assert_eq!(enemy.pos.x, 606.0);
    }

    #[test]
    fn test_player_move_consumed_even_when_blocked() {
        let board = board();
        let mut player = Player::new(&board);

        // Down from the start row is off the board
        player.queue_move(0.0, 1.0);
        player.advance(&board);
        assert_eq!(player.pos, Vec2::new(200.0, 370.0));
        assert_eq!(player.pending_move, Vec2::ZERO);

        // Nothing queued: nothing moves
        player.advance(&board);
        assert_eq!(player.pos, Vec2::new(200.0, 370.0));
    }

    #[test]
    fn test_player_horizontal_bounds() {
        let board = board();
        let mut player = Player::new(&board);
        for _ in 0..5 {
            player.queue_move(1.0, 0.0);
            player.advance(&board);
        }
        assert_eq!(player.pos.x, 400.0);

        for _ in 0..7 {
            player.queue_move(-1.0, 0.0);
            player.advance(&board);
        }
        assert_eq!(player.pos.x, 0.0);
    }

    #[test]
    fn test_queue_move_replaces_previous() {
        let board = board();
        let mut player = Player::new(&board);
        player.queue_move(-1.0, 0.0);
        player.queue_move(0.0, -1.0);
        player.advance(&board);
        assert_eq!(player.pos, Vec2::new(200.0, 290.0));
    }

    #[test]
    fn test_identity_cycle_wraps() {
        let mut identity = Identity::Boy;
        for _ in 0..Identity::ALL.len() {
            identity = identity.next();
        }
        assert_eq!(identity, Identity::Boy);
        assert_eq!(Identity::Princess.next(), Identity::Boy);
        assert_eq!(Identity::CatGirl.name(), "Cat Girl");
    }

    #[test]
    fn test_item_hide_and_respawn() {
        let board = board();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut item = Item::spawn(&board, &mut rng);
        assert!(item.on_board);
        assert!(board.lanes.contains(&item.pos.y));
        assert!(board.x_in_bounds(item.pos.x));
        assert_eq!(item.pos.x % TILE_WIDTH, 0.0);

        item.hide();
        assert!(!item.on_board);
        assert_eq!(item.pos, Vec2::from(HIDDEN_POS));

        item.respawn(&board, &mut rng);
        assert!(item.on_board);
        assert!(board.lanes.contains(&item.pos.y));
    }

    #[test]
    fn test_reset_run_keeps_enemies_moving() {
        let mut state = GameState::new(&GameConfig::default(), 9);
        state.advance_enemies(0.5);
        let before: Vec<Vec2> = state.enemies.iter().map(|e| e.pos).collect();

        state.player.score = 40;
        state.clock.elapsed_ticks = 12;
        let final_score = state.reset_run(RunEnd::EnemyCollision);

        assert_eq!(final_score, 40);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.clock.elapsed_ticks, 0);
        assert_eq!(state.runs, 1);
        let after: Vec<Vec2> = state.enemies.iter().map(|e| e.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_reset_run_by_reason() {
        let mut state = GameState::new(&GameConfig::default(), 9);

        state.player.score = 40;
        assert_eq!(state.reset_run(RunEnd::Goal), 40);
        assert_eq!(state.player.score, 40);

        assert_eq!(state.reset_run(RunEnd::TimedOut), 40);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.runs, 2);

        assert!(!RunEnd::Goal.wipes_score());
        assert!(RunEnd::EnemyCollision.wipes_score());
        assert_eq!(RunEnd::TimedOut.as_str(), "timed out");
    }

    #[test]
    fn test_reset_run_respawns_collected_item() {
        let mut state = GameState::new(&GameConfig::default(), 21);
        for reason in [RunEnd::Goal, RunEnd::EnemyCollision, RunEnd::TimedOut] {
            state.item.hide();
            state.reset_run(reason);
            assert!(state.item.on_board);
            assert!(state.board.lanes.contains(&state.item.pos.y));
            assert!(state.board.x_in_bounds(state.item.pos.x));
        }
    }

    #[test]
    fn test_enemy_count_clamped() {
        let config = GameConfig {
            enemy_count: 12,
            ..Default::default()
        };
        let state = GameState::new(&config, 1);
        assert_eq!(state.enemies.len(), MAX_ENEMIES);
    }
}
