//! Frame clock and countdown timers
//!
//! The frame clock turns variable wall-clock deltas into fixed simulation
//! steps; timers are one-shot countdowns owned by whoever armed them.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FrameClock {
    step: f32,
    accumulator: f32,
    /// Total simulated seconds
    elapsed: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FrameClock {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Feed a frame delta, returns how many fixed steps to run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            self.elapsed += self.step as f64;
            steps += 1;
        }
        // Drop time we could not catch up on
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }
}

/// One-shot countdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    remaining: f32,
}

impl Timer {
    pub fn new(secs: f32) -> Self {
        Self {
            remaining: secs.max(0.0),
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Count down by `dt`, true when the timer fires
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_accumulates_partial_frames() {
        let mut clock = FrameClock::new(0.01);
        assert_eq!(clock.advance(0.004), 0);
        assert_eq!(clock.advance(0.004), 0);
        assert_eq!(clock.advance(0.004), 1);
        assert!((clock.elapsed() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_clock_caps_substeps() {
        let mut clock = FrameClock::new(SIM_DT);
        // Huge hitch: clamped to MAX_FRAME_DT then to MAX_SUBSTEPS
        let steps = clock.advance(10.0);
        assert!(steps <= MAX_SUBSTEPS);
        assert!(steps > 0);
    }

    #[test]
    fn test_clock_ignores_negative() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_timer_fires_once_elapsed() {
        let mut timer = Timer::new(0.5);
        assert!(!timer.tick(0.2));
        assert!(!timer.tick(0.2));
        assert!(timer.tick(0.2));
    }

    #[test]
    fn test_zero_timer_fires_immediately() {
        let mut timer = Timer::new(0.0);
        assert!(timer.tick(0.0));
    }
}
