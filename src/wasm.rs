//! Browser bindings
//!
//! The page keeps its own canvas, image loader, key listener and
//! `requestAnimationFrame` loop; it calls into `WasmGame` once per frame,
//! once per second and once per key release, and draws from the JSON
//! render snapshot.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::Game;
use crate::highscores::HighScores;
use crate::sim::Action;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // A second init (e.g. hot reload) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Lane Dash starting...");
}

/// Game handle owned by the page
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game from a JSON config; bad or empty JSON falls back to
    /// the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> WasmGame {
        let config = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            GameConfig::from_json(config_json).unwrap_or_else(|e| {
                log::warn!("{}; using default config", e);
                GameConfig::default()
            })
        };
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        WasmGame {
            game: Game::new(&config, seed),
        }
    }

    /// Restore a leaderboard saved by the page
    pub fn load_high_scores(&mut self, json: &str) {
        self.game.set_high_scores(HighScores::from_json(json));
    }

    /// One frame of `dt` seconds
    pub fn update(&mut self, dt: f32) {
        for event in self.game.update(dt) {
            log::debug!("{:?}", event);
        }
    }

    /// The page's one-second interval
    pub fn on_tick(&mut self) {
        self.game.on_tick();
    }

    /// Key release by name ("left", "up", "right", "down", "enter");
    /// returns false for keys the game ignores
    pub fn on_key(&mut self, key: &str) -> bool {
        match Action::from_key(key) {
            Some(action) => {
                self.game.on_input(action);
                true
            }
            None => false,
        }
    }

    pub fn render_state_json(&self) -> String {
        self.game.render_state().to_json().unwrap_or_else(|e| {
            log::error!("Failed to serialize render state: {}", e);
            String::from("{}")
        })
    }

    pub fn high_scores_json(&self) -> String {
        self.game
            .high_scores()
            .to_json()
            .unwrap_or_else(|_| String::from("{\"entries\":[]}"))
    }
}
