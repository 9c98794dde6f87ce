//! Commands and the fixed timestep tick
//!
//! Commands run to completion before the frame's animation update, so a tap
//! is judged against the same position the player last saw.

use super::clock::Timer;
use super::hit::evaluate_tap;
use super::round::{RoundParams, next_round};
use super::state::{Difficulty, Game, GameEvent, GamePhase};
use crate::feedback::{FeedbackMessage, FeedbackSignal};
use crate::tuning::RetryPolicy;

/// Input commands for a single tick (one-shot flags)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start button on the menu
    pub start: bool,
    /// Screen tap
    pub tap: bool,
    /// Explicit retry from the failed screen
    pub restart: bool,
    /// Back to the menu
    pub go_home: bool,
}

impl Game {
    /// Menu -> Playing
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }
        self.stats.begin_run();
        self.reset_run();
        self.launch_round();
        self.set_phase(GamePhase::Playing);
        true
    }

    /// Judge a tap. While failed, a tap retries.
    pub fn tap(&mut self) -> bool {
        match self.phase {
            GamePhase::Menu => false,
            GamePhase::Failed => self.restart(),
            GamePhase::Playing => {
                let position = self.animator.current_position();
                let leg_ms = self
                    .animator
                    .leg_duration_ms()
                    .unwrap_or_else(|| self.tuning.leg_duration_ms(self.round.speed));
                let outcome = evaluate_tap(
                    position,
                    &self.round,
                    self.tuning.track_width,
                    leg_ms,
                    self.tuning.perfect_threshold,
                );
                self.events.push(GameEvent::Tapped(outcome));
                self.feedback = Some(FeedbackMessage::for_outcome(
                    &outcome,
                    self.tuning.success_message_secs,
                ));

                if outcome.is_hit {
                    log::debug!(
                        "Hit at {:.1} (edge distance {:.2}{})",
                        position,
                        outcome.distance,
                        if outcome.is_perfect { ", perfect" } else { "" }
                    );
                    self.stats.record_hit(outcome.is_perfect);
                    self.events.push(GameEvent::Feedback(FeedbackSignal::Success));
                    self.difficulty.ramp(&self.tuning);
                    self.animator.stop();
                    self.launch_round();
                } else {
                    log::debug!(
                        "Miss at {:.1}: {:.3}s {:?}",
                        position,
                        outcome.timing_error_secs,
                        outcome.direction
                    );
                    self.stats.record_miss();
                    self.ghost_position = Some(position);
                    self.animator.stop();
                    self.events.push(GameEvent::Feedback(FeedbackSignal::Failure));
                    self.set_phase(GamePhase::Failed);
                    if let RetryPolicy::Auto { delay_secs } = self.tuning.retry {
                        self.restart_timer = Some(Timer::new(delay_secs));
                    }
                }
                true
            }
        }
    }

    /// Failed -> Playing with a fresh run
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::Failed {
            return false;
        }
        self.reset_run();
        self.launch_round();
        self.set_phase(GamePhase::Playing);
        true
    }

    /// Playing | Failed -> Menu. Ends the run; best streak and totals are kept.
    pub fn go_home(&mut self) -> bool {
        if self.phase == GamePhase::Menu {
            return false;
        }
        self.animator.stop();
        self.stats.begin_run();
        self.reset_run();
        self.round = RoundParams::initial(&self.tuning);
        self.set_phase(GamePhase::Menu);
        true
    }

    /// Advance timers and the sweep by one fixed step
    pub fn update(&mut self, dt: f32) {
        if let Some(msg) = self.feedback.as_mut() {
            if !msg.update(dt) {
                self.feedback = None;
            }
        }

        if let Some(timer) = self.restart_timer.as_mut() {
            if timer.tick(dt) {
                log::info!("Auto-retry");
                self.restart();
            }
        }

        if self.phase == GamePhase::Playing {
            self.animator.advance(dt);
        }
    }

    /// Clear round-local state ahead of a new run
    fn reset_run(&mut self) {
        self.restart_timer = None;
        self.difficulty = Difficulty::initial(&self.tuning);
        self.ghost_position = None;
        self.feedback = None;
    }

    /// Roll the next round and start a fresh sweep for it
    fn launch_round(&mut self) {
        self.round = next_round(
            &mut self.rng,
            &self.tuning,
            self.difficulty.speed,
            self.difficulty.target_width,
        );
        self.animator.start(self.round.speed, self.round.ball_size);
        self.events.push(GameEvent::RoundStarted(self.round));
    }
}

/// Advance the game by one fixed timestep
pub fn tick(game: &mut Game, input: &TickInput, dt: f32) {
    if input.go_home {
        game.go_home();
    }
    if input.start {
        game.start();
    }
    if input.restart {
        game.restart();
    }
    if input.tap {
        game.tap();
    }

    game.update(dt);
}
