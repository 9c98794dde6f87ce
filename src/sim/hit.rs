//! Tap judgement

use serde::{Deserialize, Serialize};

use super::round::RoundParams;

/// Which side of the target center the ball was on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Early,
    Late,
}

/// Result of judging one tap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapOutcome {
    pub is_hit: bool,
    /// Distance to the nearer target edge
    pub distance: f32,
    pub is_perfect: bool,
    /// Seconds off target (0 on a hit)
    pub timing_error_secs: f32,
    pub direction: Direction,
}

/// Judge a tap at `position` against the round's target.
///
/// Both edges are inclusive; perfect needs `distance < perfect_threshold`.
pub fn evaluate_tap(
    position: f32,
    round: &RoundParams,
    track_width: f32,
    leg_duration_ms: f32,
    perfect_threshold: f32,
) -> TapOutcome {
    let left = round.target_left();
    let right = round.target_right();

    let is_hit = position >= left && position <= right;
    let distance = (position - left).abs().min((position - right).abs());
    let is_perfect = is_hit && distance < perfect_threshold;

    let timing_error_secs = if is_hit || track_width <= 0.0 {
        0.0
    } else {
        (distance / track_width) * leg_duration_ms / 1000.0
    };

    let direction = if position < round.target_center {
        Direction::Early
    } else {
        Direction::Late
    };

    TapOutcome {
        is_hit,
        distance,
        is_perfect,
        timing_error_secs,
        direction,
    }
}
