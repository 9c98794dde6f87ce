//! Browser bindings
//!
//! Thin wasm-bindgen wrapper so a JS frontend can drive the engine once per
//! animation frame and render the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::feedback::{FeedbackSignal, FeedbackSink};
use crate::sim::{FrameClock, Game, GameEvent};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Edge Tap (wasm) ready");
}

/// Feedback sink that buffers signals for JS to play (vibrate/audio)
#[derive(Debug, Default)]
struct PendingSignals(Vec<FeedbackSignal>);

impl FeedbackSink for PendingSignals {
    fn emit(&mut self, signal: FeedbackSignal) {
        self.0.push(signal);
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    clock: FrameClock,
    last_time: f64,
    signals: PendingSignals,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WebGame {
        Self::from_game(Game::new(seed))
    }

    /// Build with a tuning JSON document
    pub fn with_tuning(seed: u64, tuning_json: &str) -> Result<WebGame, JsValue> {
        let tuning =
            Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_game(Game::with_tuning(seed, tuning)))
    }

    fn from_game(game: Game) -> WebGame {
        WebGame {
            game,
            clock: FrameClock::default(),
            last_time: 0.0,
            signals: PendingSignals::default(),
        }
    }

    pub fn start(&mut self) -> bool {
        let ok = self.game.start();
        self.route_events();
        ok
    }

    pub fn tap(&mut self) -> bool {
        let ok = self.game.tap();
        self.route_events();
        ok
    }

    pub fn restart(&mut self) -> bool {
        let ok = self.game.restart();
        self.route_events();
        ok
    }

    pub fn go_home(&mut self) -> bool {
        let ok = self.game.go_home();
        self.route_events();
        ok
    }

    /// Call from requestAnimationFrame with its timestamp (ms)
    pub fn frame(&mut self, time_ms: f64) {
        let dt = if self.last_time > 0.0 {
            ((time_ms - self.last_time) / 1000.0) as f32
        } else {
            0.0
        };
        self.last_time = time_ms;

        let steps = self.clock.advance(dt);
        for _ in 0..steps {
            self.game.update(self.clock.step());
        }
        self.route_events();
    }

    /// Current frame state as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.game
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Feedback signals since the last call ("success" / "failure")
    pub fn take_signals(&mut self) -> Vec<JsValue> {
        self.signals
            .0
            .drain(..)
            .map(|s| match s {
                FeedbackSignal::Success => JsValue::from_str("success"),
                FeedbackSignal::Failure => JsValue::from_str("failure"),
            })
            .collect()
    }

    fn route_events(&mut self) {
        for event in self.game.drain_events() {
            if let GameEvent::Feedback(signal) = event {
                self.signals.emit(signal);
            }
        }
    }
}
