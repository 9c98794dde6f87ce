//! Game state and core engine types
//!
//! `Game` owns every component for one session: tuning, stats, the current
//! round, the sweep animator and any pending restart timer.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::animator::{Animator, PositionObserver};
use super::clock::Timer;
use super::hit::TapOutcome;
use super::round::RoundParams;
use crate::feedback::{FeedbackMessage, FeedbackSignal};
use crate::stats::SessionStats;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Idle on the title screen
    #[default]
    Menu,
    /// Ball sweeping, waiting for a tap
    Playing,
    /// Last tap missed
    Failed,
}

/// Round-local ramp, reset at the start of every run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub speed: f32,
    pub target_width: f32,
    /// Background overlay alpha (0..=max_darkness)
    pub darkness: f32,
}

impl Difficulty {
    pub fn initial(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.initial_speed,
            target_width: tuning.initial_target_width,
            darkness: 0.0,
        }
    }

    /// Make the next round harder after a hit
    pub fn ramp(&mut self, tuning: &Tuning) {
        self.speed += tuning.speed_step;
        self.target_width =
            (self.target_width - tuning.target_width_step).max(tuning.min_target_width);
        self.darkness = (self.darkness + tuning.darkness_step).min(tuning.max_darkness);
    }
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    RoundStarted(RoundParams),
    Tapped(TapOutcome),
    Feedback(FeedbackSignal),
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// One play session
#[derive(Debug)]
pub struct Game {
    pub(crate) tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub(crate) phase: GamePhase,
    pub(crate) stats: SessionStats,
    pub(crate) difficulty: Difficulty,
    pub(crate) round: RoundParams,
    pub(crate) animator: Animator,
    /// Where the ball was when the run was lost
    pub(crate) ghost_position: Option<f32>,
    pub(crate) feedback: Option<FeedbackMessage>,
    /// Pending auto-retry (only while Failed)
    pub(crate) restart_timer: Option<Timer>,
    pub(crate) events: Vec<GameEvent>,
}

impl Game {
    /// Fresh session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_session(seed, Tuning::default(), SessionStats::new())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self::with_session(seed, tuning, SessionStats::new())
    }

    /// Session continuing from existing stats
    pub fn with_session(seed: u64, tuning: Tuning, stats: SessionStats) -> Self {
        Self {
            rng: RngState::new(seed).to_rng(),
            phase: GamePhase::Menu,
            stats,
            difficulty: Difficulty::initial(&tuning),
            round: RoundParams::initial(&tuning),
            animator: Animator::new(tuning.track_width, tuning.time_scale_ms),
            ghost_position: None,
            feedback: None,
            restart_timer: None,
            events: Vec::new(),
            tuning,
        }
    }

    /// End the session and hand back its stats
    pub fn into_session(mut self) -> SessionStats {
        self.animator.stop();
        self.stats
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn round(&self) -> &RoundParams {
        &self.round
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Live ball position (same value a tap would be judged against)
    pub fn position(&self) -> f32 {
        self.animator.current_position()
    }

    pub fn ghost_position(&self) -> Option<f32> {
        self.ghost_position
    }

    pub fn feedback(&self) -> Option<&FeedbackMessage> {
        self.feedback.as_ref()
    }

    pub fn restart_pending(&self) -> bool {
        self.restart_timer.is_some()
    }

    /// Watch ball positions for the current sweep. Cleared when it stops.
    pub fn watch_position(&mut self, observer: PositionObserver) {
        self.animator.observe(observer);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }
}
