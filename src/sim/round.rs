//! Round generation
//!
//! Each round rerolls the target and ball around their base values. The
//! success ramp is applied by the state machine, not here.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_SPEED;
use crate::tuning::Tuning;

/// Geometry and speed for one round (fixed until the next tap)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundParams {
    pub target_center: f32,
    pub target_width: f32,
    pub ball_size: f32,
    /// Track units per frame
    pub speed: f32,
}

impl RoundParams {
    /// Centered round with base values, used before the first roll
    pub fn initial(tuning: &Tuning) -> Self {
        Self {
            target_center: tuning.track_width / 2.0,
            target_width: tuning.initial_target_width,
            ball_size: tuning.base_ball_size,
            speed: tuning.initial_speed,
        }
    }

    pub fn target_left(&self) -> f32 {
        self.target_center - self.target_width / 2.0
    }

    pub fn target_right(&self) -> f32 {
        self.target_center + self.target_width / 2.0
    }
}

/// Uniform in `[-spread, spread]`
fn jitter<R: Rng + ?Sized>(rng: &mut R, spread: f32) -> f32 {
    if spread > 0.0 {
        rng.random_range(-spread..=spread)
    } else {
        0.0
    }
}

/// Roll the next round.
///
/// `prior_target_width` is accepted so callers pass their ramped width, but
/// the rolled width always jitters around the initial width.
pub fn next_round<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    prior_speed: f32,
    prior_target_width: f32,
) -> RoundParams {
    let half = tuning.initial_target_width / 2.0;
    let lo = half;
    let hi = tuning.track_width - half;
    let target_center = if hi > lo {
        rng.random_range(lo..=hi)
    } else {
        tuning.track_width / 2.0
    };

    let target_width =
        (tuning.initial_target_width + jitter(rng, tuning.target_width_jitter)).max(1.0);
    let ball_size = (tuning.base_ball_size + jitter(rng, tuning.ball_size_jitter)).max(1.0);
    let speed = (prior_speed + jitter(rng, tuning.speed_jitter)).max(MIN_SPEED);

    let round = RoundParams {
        target_center,
        target_width,
        ball_size,
        speed,
    };
    log::debug!(
        "Round: target {:.1}±{:.1} (ramp width {:.1}), ball {:.1}, speed {:.3}",
        round.target_center,
        round.target_width / 2.0,
        prior_target_width,
        round.ball_size,
        round.speed
    );
    round
}
