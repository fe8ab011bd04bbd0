//! Lane Dash entry point
//!
//! The browser build is driven from JavaScript through `lane_dash::wasm`.
//! Natively this runs a headless session so the simulation can be watched
//! through the log.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_dash::{Action, Game, GameConfig, GameEvent};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Lane Dash (native, headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(std::path::Path::new(&path)).unwrap_or_else(|e| {
            log::warn!("{}; using default config", e);
            GameConfig::default()
        }),
        None => GameConfig::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut game = Game::new(&config, seed);

    // Two minutes at 60 fps, climbing one row every half second and
    // switching character every twenty seconds
    const FPS: u32 = 60;
    const FRAME: f32 = 1.0 / FPS as f32;
    let mut goals = 0;
    for frame in 0..(120 * FPS) {
        if frame % (FPS / 2) == 0 {
            game.on_input(Action::Up);
        }
        if frame % (20 * FPS) == 0 && frame > 0 {
            game.on_input(Action::CycleIdentity);
        }
        for event in game.frame(FRAME) {
            if matches!(event, GameEvent::GoalReached { .. }) {
                goals += 1;
            }
            log::info!("frame {}: {:?}", frame, event);
        }
    }

    let render = game.render_state();
    log::info!(
        "Session over: {} runs, {} goals, final score {} as {}",
        game.state().runs,
        goals,
        render.player.score,
        render.player.name
    );
    for (rank, entry) in game.high_scores().entries.iter().enumerate() {
        log::info!("#{} {} ({}, run {})", rank + 1, entry.score, entry.identity.name(), entry.run);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `lane_dash::wasm`, this is just to satisfy the compiler
}
