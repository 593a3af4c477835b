//! Aether Runner - headless demo
//!
//! Flies a scripted autopilot through a run at the fixed simulation step and
//! prints the final session snapshot as JSON.
//!
//! Usage: `aether-runner [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use aether_runner::audio::{AudioCues, engine_tone};
    use aether_runner::consts::SIM_DT;
    use aether_runner::sim::{ControlIntent, GameState, tick};
    use aether_runner::{RenderFeed, Settings};
    use glam::Vec3;

    /// Simulated length of the demo run (seconds)
    const RUN_SECONDS: f32 = 120.0;
    /// Clearance the autopilot keeps over the terrain ahead
    const CRUISE_CLEARANCE: f32 = 3.0;

    /// Steer for the next gate ahead, else the nearest live enemy, else centre
    fn autopilot(state: &GameState, step: u64) -> ControlIntent {
        let player = state.player.position;

        let gate = state
            .pools
            .walls
            .iter_active()
            .filter(|w| !w.payload.passed && w.transform.position.z < player.z)
            .map(|w| w.transform.position)
            .max_by(|a, b| a.z.total_cmp(&b.z));
        let enemy = || {
            state
                .pools
                .enemies
                .iter_active()
                .filter(|e| e.payload.is_alive())
                .map(|e| e.transform.position)
                .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)))
        };
        let target = gate
            .or_else(enemy)
            .unwrap_or(Vec3::new(0.0, 8.0, 0.0));

        let ground = state.terrain.height_at(player.x, player.z - 10.0);
        let target_y = target.y.max(ground + CRUISE_CLEARANCE);

        ControlIntent {
            lateral: ((target.x - player.x) * 0.5).clamp(-1.0, 1.0),
            vertical: ((target_y - player.y) * 0.5).clamp(-1.0, 1.0),
            boost: false,
            fire: step % 30 < 15,
            craft_select: None,
        }
    }

    fn load_settings() -> Settings {
        let Some(path) = std::env::args().nth(1) else {
            return Settings::default();
        };
        match Settings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{err}");
                std::process::exit(2);
            }
        }
    }

    pub fn run() {
        env_logger::init();
        let settings = load_settings();
        log::info!(
            "Aether Runner (headless) starting: seed {}, craft {}",
            settings.seed,
            settings.craft.as_str()
        );

        let mut audio = AudioCues::new(settings.master_volume);
        let mut state = GameState::new(settings);
        let steps = (RUN_SECONDS / SIM_DT) as u64;

        for step in 0..steps {
            let input = autopilot(&state, step);
            tick(&mut state, &input, SIM_DT);

            let events = state.drain_events();
            for event in &events {
                log::debug!("t={:.2}s {:?}", state.elapsed, event);
            }
            for cue in audio.cues_for(&events, state.elapsed) {
                log::trace!("cue {:?}", cue);
            }
            if let Some(cue) = audio.boost(input.boost) {
                log::trace!("cue {:?}", cue);
            }

            if state.session.is_game_over() {
                break;
            }
        }

        let feed = RenderFeed::capture(&state);
        let tone = engine_tone(state.speed);
        log::info!(
            "Finished after {:.1}s: {} entities in view, engine {:.0} Hz",
            state.elapsed,
            feed.visible().count(),
            tone.filter_hz
        );

        match serde_json::to_string_pretty(&state.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("Failed to serialize snapshot: {err}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web
}
