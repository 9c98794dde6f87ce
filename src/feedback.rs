//! Player feedback
//!
//! Fire-and-forget haptic/audio signals plus the transient on-screen message.

use serde::{Deserialize, Serialize};

use crate::sim::{Direction, TapOutcome};

/// Haptic/audio cue emitted on a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackSignal {
    /// Tap landed in the target
    Success,
    /// Tap missed, run over
    Failure,
}

/// Anything that can play a feedback signal (haptics engine, audio, log)
pub trait FeedbackSink {
    fn emit(&mut self, signal: FeedbackSignal);
}

/// Sink that writes signals to the log
#[derive(Debug, Default)]
pub struct LogFeedback {
    pub successes: u32,
    pub failures: u32,
}

impl FeedbackSink for LogFeedback {
    fn emit(&mut self, signal: FeedbackSignal) {
        match signal {
            FeedbackSignal::Success => {
                self.successes += 1;
                log::debug!("feedback: success");
            }
            FeedbackSignal::Failure => {
                self.failures += 1;
                log::debug!("feedback: failure");
            }
        }
    }
}

impl<F: FnMut(FeedbackSignal)> FeedbackSink for F {
    fn emit(&mut self, signal: FeedbackSignal) {
        self(signal)
    }
}

/// Color family for the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackTone {
    Highlight,
    Alert,
}

/// Text popped over the play area after a tap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackMessage {
    pub text: String,
    pub tone: FeedbackTone,
    /// Seconds left on screen; `None` stays until cleared
    pub remaining_secs: Option<f32>,
}

impl FeedbackMessage {
    /// Message for a tap, success messages expire after `success_secs`
    pub fn for_outcome(outcome: &TapOutcome, success_secs: f32) -> Self {
        if outcome.is_hit {
            let text = if outcome.is_perfect {
                "PERFECT!"
            } else {
                "SUCCESS!"
            };
            Self {
                text: text.to_string(),
                tone: FeedbackTone::Highlight,
                remaining_secs: Some(success_secs),
            }
        } else {
            let when = match outcome.direction {
                Direction::Early => "early",
                Direction::Late => "late",
            };
            Self {
                text: format!("{:.3}s too {}!", outcome.timing_error_secs, when),
                tone: FeedbackTone::Alert,
                remaining_secs: None,
            }
        }
    }

    /// Count down; returns false once the message has expired
    pub fn update(&mut self, dt: f32) -> bool {
        match self.remaining_secs.as_mut() {
            Some(t) => {
                *t -= dt;
                *t > 0.0
            }
            None => true,
        }
    }
}
