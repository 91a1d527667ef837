//! Cycling Runner entry point
//!
//! The browser build is driven by `platform::web` from the library; this
//! binary only exists natively, where it runs a headless scripted ride.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    cycling_runner::platform::init_logging();
    log::info!("Cycling Runner (native) starting...");
    log::info!("Native mode is headless - build for wasm32 and serve index.html for the playable version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let seconds: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);

    let score = headless::ride(seed, seconds);
    println!("Final score: {}", score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use cycling_runner::UiSink;
    use cycling_runner::sim::{Direction, GamePhase, SimulationState, tick};
    use cycling_runner::ui;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// How far ahead the autopilot looks for cones
    const LOOKAHEAD: f32 = 8.0;

    struct LogUi;

    impl UiSink for LogUi {
        fn update_score(&mut self, score: u32) {
            log::debug!("Score: {}", score);
        }

        fn notify_game_over(&mut self, final_score: u32) {
            log::info!("Game over, final score {}", final_score);
        }

        fn notify_reset(&mut self) {
            log::info!("Run reset");
        }

        fn notify_assets_ready(&mut self) {
            log::info!("All assets ready");
        }
    }

    /// Ride for `seconds` of simulated time, or until the first crash
    pub fn ride(seed: u64, seconds: f64) -> u32 {
        let mut state = SimulationState::new(seed);
        let mut sink = LogUi;
        log::info!("Game initialized with seed: {}", state.seed);

        // Nothing to load headless; settle every asset slot up front
        state.start();
        state.rider_loaded(Ok(()));
        for index in 0..state.tuning.obstacle_count {
            state.obstacle_loaded(index, Ok(()));
        }

        let frames = (seconds * 1000.0 / FRAME_MS) as u64;
        for frame in 0..=frames {
            steer_autopilot(&mut state);
            tick(&mut state, frame as f64 * FRAME_MS);
            ui::dispatch(&state.drain_events(), &mut sink);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }

        let ridden = state
            .clock
            .last_timestamp()
            .map_or(0.0, |now| state.speed.run_time_secs(now));
        log::info!(
            "Rode {:.1}s ({} ticks) at {:.1} units/s, score {}",
            ridden,
            state.time_ticks,
            state.speed.base_speed,
            state.score
        );
        state.score
    }

    /// Veer away from the nearest cone in the rider's lane
    fn steer_autopilot(state: &mut SimulationState) {
        state.held.clear();
        let Some(rider) = state.rider.as_ref() else {
            return;
        };
        let rider_pos = rider.pos;
        let threat = state
            .obstacles
            .iter()
            .filter(|o| o.pos.z < rider_pos.z && rider_pos.z - o.pos.z < LOOKAHEAD)
            .filter(|o| (o.pos.x - rider_pos.x).abs() < state.tuning.collision_lateral_radius)
            .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z));

        if let Some(cone) = threat {
            let half_width = state.tuning.road_half_width;
            let dir = if cone.pos.x >= rider_pos.x && rider_pos.x > -half_width + 0.5 {
                Direction::Left
            } else {
                Direction::Right
            };
            state.held.press(dir);
        }
    }
}
