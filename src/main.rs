//! Rock Drift entry point
//!
//! On the web the page calls `initGameUI` from the library. Natively this
//! runs a short scripted session headless and logs what happened.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rock Drift (native) starting headless demo...");
    log::info!("The playable version runs in the browser via `initGameUI`");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is initGameUI, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use rock_drift::GameConfig;
    use rock_drift::consts::SIM_DT;
    use rock_drift::input::Key;
    use rock_drift::session::{Session, SessionPhase};

    /// Longest demo run, in simulation steps (two minutes)
    const MAX_STEPS: u32 = 60 * 120;

    /// Spin slowly, pulse thrust and keep firing until the ship is hit
    pub fn run(seed: u64) {
        let mut session = Session::new(GameConfig::load(), 800.0, 600.0);
        session.open_controls();
        session.start(seed);
        session.key_down(Key::RotateLeft);

        let mut steps = 0;
        while session.phase() == SessionPhase::Playing && steps < MAX_STEPS {
            if steps % 12 == 0 {
                session.key_down(Key::Fire);
            }
            match steps % 240 {
                0 => {
                    session.key_down(Key::Thrust);
                }
                30 => session.key_up(Key::Thrust),
                _ => {}
            }

            let report = session.advance(SIM_DT);
            steps += report.steps;
            if report.score_changed {
                log::info!("step {steps}: {}", session.score_text());
            }
        }

        let world = session.world();
        match session.phase() {
            SessionPhase::GameOver => log::info!("Ship destroyed after {steps} steps"),
            _ => log::info!("Survived {steps} steps"),
        }
        log::info!("{}", session.final_score_text());
        log::info!(
            "{} asteroids, {} bullets, {} particles on the field",
            world.asteroids.len(),
            world.bullets.len(),
            world.particles.len()
        );

        match serde_json::to_string(world) {
            Ok(json) => log::debug!("Final world: {json}"),
            Err(e) => log::warn!("Could not serialize world: {e}"),
        }
    }
}
