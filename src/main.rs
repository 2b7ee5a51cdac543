//! Mjolnir Smash entry point
//!
//! The browser build is driven through `mjolnir_smash::web`. Natively there
//! is no renderer, so this runs a headless autopilot session and logs how it
//! went. Optional arguments: `[seed] [seconds] [tuning.json]`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use mjolnir_smash::sim::{GameEvent, GameState, TickInput, tick};
    use mjolnir_smash::{Settings, Tuning, format_score};

    env_logger::init();
    log::info!("Mjolnir Smash (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x4d4a_4f4c);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut state = GameState::with_config(seed, tuning, Settings::default());
    state.start_game();

    let dt = 1.0 / 60.0;
    let frames = (seconds / dt).round() as u32;
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    for _ in 0..frames {
        tick(&mut state, &input, dt);
        for event in state.drain_events() {
            if let GameEvent::TargetDestroyed { points, .. } = event {
                log::debug!("+{points} -> {}", state.score_text());
            }
        }
    }

    let stats = state.stats;
    if let Some(score) = state.end_game() {
        log::info!(
            "Final score {} after {seconds:.0}s: {} swings, {} hits, {} destroyed, {} missed, difficulty {:.2}",
            format_score(score),
            stats.swings,
            stats.hits,
            stats.destroyed,
            stats.missed,
            state.difficulty()
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::init, this is just to satisfy the compiler
}
