//! Game balance and tuning
//!
//! Every gameplay constant lives here so a session can be rebalanced from
//! JSON without recompiling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// What happens after a miss
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RetryPolicy {
    /// Wait for a tap (or restart command) on the failed screen
    #[default]
    Manual,
    /// Restart automatically after a delay
    Auto { delay_secs: f32 },
}

impl RetryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetryPolicy::Manual => "Manual",
            RetryPolicy::Auto { .. } => "Auto",
        }
    }
}

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Track ===
    /// Track width in track units
    pub track_width: f32,
    /// Milliseconds per track unit at speed 1
    pub time_scale_ms: f32,

    // === Round start values ===
    pub initial_speed: f32,
    pub initial_target_width: f32,
    pub base_ball_size: f32,

    // === Per-round jitter (uniform, +/-) ===
    pub speed_jitter: f32,
    pub target_width_jitter: f32,
    pub ball_size_jitter: f32,

    // === Ramp on success ===
    pub speed_step: f32,
    pub target_width_step: f32,
    pub min_target_width: f32,
    pub darkness_step: f32,
    pub max_darkness: f32,

    // === Judgement ===
    pub perfect_threshold: f32,

    // === Flow ===
    /// Seconds the success message stays visible
    pub success_message_secs: f32,
    pub retry: RetryPolicy,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            track_width: TRACK_WIDTH,
            time_scale_ms: TIME_SCALE_MS,

            initial_speed: INITIAL_SPEED,
            initial_target_width: INITIAL_TARGET_WIDTH,
            base_ball_size: BALL_SIZE,

            speed_jitter: SPEED_JITTER,
            target_width_jitter: TARGET_WIDTH_JITTER,
            ball_size_jitter: BALL_SIZE_JITTER,

            speed_step: SPEED_STEP,
            target_width_step: TARGET_WIDTH_STEP,
            min_target_width: MIN_TARGET_WIDTH,
            darkness_step: DARKNESS_STEP,
            max_darkness: MAX_DARKNESS,

            perfect_threshold: PERFECT_THRESHOLD,

            success_message_secs: SUCCESS_MESSAGE_SECS,
            retry: RetryPolicy::Manual,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning (track {}, retry {})",
            tuning.track_width,
            tuning.retry.as_str()
        );
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make the engine degenerate
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("track_width", self.track_width),
            ("time_scale_ms", self.time_scale_ms),
            ("initial_speed", self.initial_speed),
            ("initial_target_width", self.initial_target_width),
            ("base_ball_size", self.base_ball_size),
            ("perfect_threshold", self.perfect_threshold),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::OutOfRange { field, value });
            }
        }

        let non_negative = [
            ("speed_jitter", self.speed_jitter),
            ("target_width_jitter", self.target_width_jitter),
            ("ball_size_jitter", self.ball_size_jitter),
            ("speed_step", self.speed_step),
            ("target_width_step", self.target_width_step),
            ("min_target_width", self.min_target_width),
            ("darkness_step", self.darkness_step),
            ("success_message_secs", self.success_message_secs),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::OutOfRange { field, value });
            }
        }

        // The ramp floor must sit at or below the starting width
        if self.min_target_width > self.initial_target_width {
            return Err(TuningError::OutOfRange {
                field: "min_target_width",
                value: self.min_target_width,
            });
        }

        if !(0.0..=1.0).contains(&self.max_darkness) {
            return Err(TuningError::OutOfRange {
                field: "max_darkness",
                value: self.max_darkness,
            });
        }

        if let RetryPolicy::Auto { delay_secs } = self.retry {
            if !(delay_secs.is_finite() && delay_secs >= 0.0) {
                return Err(TuningError::OutOfRange {
                    field: "retry.delay_secs",
                    value: delay_secs,
                });
            }
        }

        Ok(())
    }

    /// Duration of one sweep leg at `speed`
    pub fn leg_duration_ms(&self, speed: f32) -> f32 {
        crate::leg_duration_ms(self.track_width, speed, self.time_scale_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "track_width": 500.0 }"#).unwrap();
        assert_eq!(tuning.track_width, 500.0);
        assert_eq!(tuning.initial_target_width, INITIAL_TARGET_WIDTH);
        assert_eq!(tuning.retry, RetryPolicy::Manual);
    }

    #[test]
    fn test_auto_retry_json() {
        let tuning =
            Tuning::from_json(r#"{ "retry": { "mode": "auto", "delay_secs": 1.5 } }"#).unwrap();
        assert_eq!(tuning.retry, RetryPolicy::Auto { delay_secs: 1.5 });
    }

    #[test]
    fn test_rejects_zero_track() {
        let err = Tuning::from_json(r#"{ "track_width": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange {
                field: "track_width",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_darkness() {
        let tuning = Tuning {
            max_darkness: 1.5,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_min_width_above_initial() {
        let tuning = Tuning {
            initial_target_width: 60.0,
            min_target_width: 70.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::OutOfRange {
                field: "min_target_width",
                ..
            })
        ));

        let equal = Tuning {
            min_target_width: INITIAL_TARGET_WIDTH,
            ..Default::default()
        };
        assert!(equal.validate().is_ok());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_retry() {
        let tuning = Tuning {
            retry: RetryPolicy::Auto { delay_secs: 2.0 },
            ..Default::default()
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
