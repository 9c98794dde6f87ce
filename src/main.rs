//! Edge Tap entry point
//!
//! Native builds run a headless session with a simulated player; the web
//! build is driven from JS through `edge_tap::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use edge_tap::consts::SIM_DT;
    use edge_tap::sim::{FrameClock, Game, GameEvent, GamePhase, TickInput, tick};
    use edge_tap::{FeedbackSink, LogFeedback, Tuning};

    /// Taps before the simulated player walks away
    const MAX_TAPS: u32 = 40;
    /// Safety cap on simulated frames
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Simulated player: aims for the target center with some reaction noise
    struct AutoPlayer {
        rng: Pcg32,
        /// Where the next tap will land relative to the target center
        aim_offset: f32,
        /// Frames to wait on the failed screen before retrying
        retry_wait: u32,
    }

    impl AutoPlayer {
        fn new(seed: u64) -> Self {
            let mut player = Self {
                rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
                aim_offset: 0.0,
                retry_wait: 0,
            };
            player.reroll();
            player
        }

        fn reroll(&mut self) {
            // Mostly on target, occasionally wide
            self.aim_offset = self.rng.random_range(-45.0..=45.0);
        }

        fn input(&mut self, game: &Game) -> TickInput {
            match game.phase() {
                GamePhase::Menu => TickInput {
                    start: true,
                    ..Default::default()
                },
                GamePhase::Failed => {
                    if self.retry_wait == 0 {
                        self.retry_wait = 45;
                    }
                    self.retry_wait -= 1;
                    TickInput {
                        restart: self.retry_wait == 0,
                        ..Default::default()
                    }
                }
                GamePhase::Playing => {
                    let track = game.tuning().track_width;
                    let aim = (game.round().target_center + self.aim_offset).clamp(0.0, track);
                    let pos = game.position();
                    let step = game.round().speed * 1.5;
                    let tap = (pos - aim).abs() <= step;
                    if tap {
                        self.reroll();
                    }
                    TickInput {
                        tap,
                        ..Default::default()
                    }
                }
            }
        }
    }

    fn load_tuning(path: Option<String>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("{}: {}", path, e);
                    Tuning::default()
                }
            },
            Err(e) => {
                log::error!("Cannot read {}: {}", path, e);
                Tuning::default()
            }
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let seed = args
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0xED6E);
        let tuning = load_tuning(args.next());

        log::info!("Edge Tap (headless) seed {}", seed);

        let mut game = Game::with_tuning(seed, tuning);
        let mut player = AutoPlayer::new(seed);
        let mut clock = FrameClock::default();
        let mut sink = LogFeedback::default();
        let mut frames = 0;

        while game.stats().total_taps < MAX_TAPS && frames < MAX_FRAMES {
            // Pretend the display runs at exactly the sim rate
            for _ in 0..clock.advance(SIM_DT) {
                let input = player.input(&game);
                tick(&mut game, &input, clock.step());
            }
            frames += 1;

            for event in game.drain_events() {
                match event {
                    GameEvent::Feedback(signal) => sink.emit(signal),
                    GameEvent::Tapped(outcome) if !outcome.is_hit => {
                        log::info!(
                            "Missed by {:.3}s ({:?})",
                            outcome.timing_error_secs,
                            outcome.direction
                        );
                    }
                    _ => {}
                }
            }
        }

        game.go_home();
        let stats = *game.stats();
        log::info!(
            "Session over: best streak {}, accuracy {} ({} hits, {} misses)",
            stats.best_streak,
            stats.accuracy_text(),
            sink.successes,
            sink.failures
        );

        match game.snapshot().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Snapshot failed: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is edge_tap::web::wasm_start, this is just to satisfy the compiler
}
