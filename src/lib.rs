//! Edge Tap - a reaction-timing tap game
//!
//! Core modules:
//! - `sim`: Deterministic engine (clock, sweep animation, rounds, hit test, state machine)
//! - `stats`: Session statistics and streak tiers
//! - `tuning`: Data-driven game balance
//! - `feedback`: Feedback signals and on-screen messages
//! - `snapshot`: Render-facing view of the engine

pub mod feedback;
pub mod sim;
pub mod snapshot;
pub mod stats;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use feedback::{FeedbackMessage, FeedbackSignal, FeedbackSink, FeedbackTone, LogFeedback};
pub use snapshot::Snapshot;
pub use stats::{SessionStats, StreakTier};
pub use tuning::{RetryPolicy, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted by the clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Track width in track units (a phone screen width)
    pub const TRACK_WIDTH: f32 = 390.0;
    /// Milliseconds per track unit at speed 1 (one 60 Hz frame)
    pub const TIME_SCALE_MS: f32 = 16.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 40.0;
    pub const BALL_SIZE_JITTER: f32 = 10.0;

    /// Target defaults
    pub const INITIAL_TARGET_WIDTH: f32 = 80.0;
    pub const TARGET_WIDTH_JITTER: f32 = 20.0;
    pub const MIN_TARGET_WIDTH: f32 = 40.0;
    pub const TARGET_WIDTH_STEP: f32 = 2.0;

    /// Speed in track units per frame
    pub const INITIAL_SPEED: f32 = 2.0;
    pub const SPEED_JITTER: f32 = 0.25;
    pub const SPEED_STEP: f32 = 0.15;
    /// Floor applied to any sweep speed so leg durations stay finite
    pub const MIN_SPEED: f32 = 0.05;

    /// Background darkening per success
    pub const DARKNESS_STEP: f32 = 0.02;
    pub const MAX_DARKNESS: f32 = 0.5;

    /// Distance from the nearer target edge below which a hit is perfect
    pub const PERFECT_THRESHOLD: f32 = 5.0;

    /// How long the success message stays up (seconds)
    pub const SUCCESS_MESSAGE_SECS: f32 = 0.8;
}

/// Duration of one sweep leg in milliseconds
#[inline]
pub fn leg_duration_ms(track_width: f32, speed: f32, time_scale_ms: f32) -> f32 {
    (track_width / speed.max(consts::MIN_SPEED)) * time_scale_ms
}

/// Format a 0..1 ratio as a percentage with one decimal ("87.5%")
#[inline]
pub fn format_percent(ratio: f32) -> String {
    format!("{:.1}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leg_duration_default() {
        // 390 units at 2 units per 16ms frame
        let ms = leg_duration_ms(consts::TRACK_WIDTH, consts::INITIAL_SPEED, consts::TIME_SCALE_MS);
        assert!((ms - 3120.0).abs() < 0.001);
    }

    #[test]
    fn test_leg_duration_clamps_speed() {
        let ms = leg_duration_ms(100.0, 0.0, 16.0);
        assert!(ms.is_finite());
        assert!(ms > 0.0);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(0.875), "87.5%");
        assert_eq!(format_percent(1.0), "100.0%");
    }
}
