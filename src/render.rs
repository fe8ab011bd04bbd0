//! Read-only render snapshot
//!
//! The simulation never draws. After each update the host captures a
//! `RenderState` and hands it to whatever draws the frame. Sprites are
//! opaque asset keys looked up from the entity enums.

use serde::{Deserialize, Serialize};

use crate::sim::{GameState, Identity, ItemKind};

/// Enemy sprite key
pub const ENEMY_SPRITE: &str = "images/enemy-bug.png";

/// Sprite key for a playable character
pub fn identity_sprite(identity: Identity) -> &'static str {
    match identity {
        Identity::Boy => "images/char-boy.png",
        Identity::CatGirl => "images/char-cat-girl.png",
        Identity::HornGirl => "images/char-horn-girl.png",
        Identity::PinkGirl => "images/char-pink-girl.png",
        Identity::Princess => "images/char-princess-girl.png",
    }
}

/// Sprite key for an item kind
pub fn item_sprite(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Blue => "images/Gem Blue.png",
        ItemKind::Green => "images/Gem Green.png",
        ItemKind::Orange => "images/Gem Orange.png",
        ItemKind::Heart => "images/Heart.png",
        ItemKind::Key => "images/Key.png",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySprite {
    pub x: f32,
    pub y: f32,
    pub sprite: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSprite {
    pub x: f32,
    pub y: f32,
    pub sprite: String,
    pub score: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSprite {
    pub x: f32,
    pub y: f32,
    pub sprite: String,
    /// False while the item is parked off-board after collection
    pub visible: bool,
}

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    pub enemies: Vec<EnemySprite>,
    pub player: PlayerSprite,
    pub item: ItemSprite,
    /// Run clock, for the countdown display
    pub elapsed_ticks: u32,
    pub time_limit: u32,
}

impl RenderState {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemySprite {
                    x: e.pos.x,
                    y: e.pos.y,
                    sprite: ENEMY_SPRITE.to_string(),
                })
                .collect(),
            player: PlayerSprite {
                x: player.pos.x,
                y: player.pos.y,
                sprite: identity_sprite(player.identity).to_string(),
                score: player.score,
                name: player.name().to_string(),
            },
            item: ItemSprite {
                x: state.item.pos.x,
                y: state.item.pos.y,
                sprite: item_sprite(state.item.kind).to_string(),
                visible: state.item.on_board,
            },
            elapsed_ticks: state.clock.elapsed_ticks,
            time_limit: state.clock.time_limit,
        }
    }

    /// Ticks left on the countdown
    pub fn time_remaining(&self) -> u32 {
        self.time_limit.saturating_sub(self.elapsed_ticks)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
