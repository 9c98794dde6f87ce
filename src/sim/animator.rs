//! Ball sweep animation
//!
//! The ball bounces end to end along the track. Position is a pure
//! triangle wave of elapsed sweep time, so it is exact no matter how
//! irregular the ticks driving it are.

use std::fmt;

use crate::consts::MIN_SPEED;

/// Position along a bounce path after `elapsed_ms` with legs of `leg_ms`.
///
/// Even legs run 0 -> width, odd legs run width -> 0.
pub fn triangle_wave(elapsed_ms: f32, leg_ms: f32, width: f32) -> f32 {
    if leg_ms.is_nan() || leg_ms <= 0.0 || !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
        return 0.0;
    }
    let phase = elapsed_ms / leg_ms;
    let leg = phase.floor();
    let frac = phase - leg;
    let pos = if (leg as u64) % 2 == 0 {
        frac * width
    } else {
        (1.0 - frac) * width
    };
    pos.clamp(0.0, width)
}

/// Callback notified with each new position
pub type PositionObserver = Box<dyn FnMut(f32)>;

/// One running sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    /// Generation that started this sweep
    pub generation: u32,
    pub speed: f32,
    pub leg_ms: f32,
    pub elapsed_ms: f32,
}

impl Sweep {
    pub fn position(&self, width: f32) -> f32 {
        triangle_wave(self.elapsed_ms, self.leg_ms, width)
    }

    /// Number of completed legs (direction flips)
    pub fn legs_completed(&self) -> u32 {
        (self.elapsed_ms / self.leg_ms).floor() as u32
    }

    /// +1 while moving right, -1 while moving left
    pub fn direction(&self) -> i8 {
        if self.legs_completed() % 2 == 0 { 1 } else { -1 }
    }
}

/// Drives at most one sweep at a time
pub struct Animator {
    track_width: f32,
    time_scale_ms: f32,
    sweep: Option<Sweep>,
    generation: u32,
    observer: Option<PositionObserver>,
}

impl fmt::Debug for Animator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("track_width", &self.track_width)
            .field("time_scale_ms", &self.time_scale_ms)
            .field("sweep", &self.sweep)
            .field("generation", &self.generation)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl Animator {
    pub fn new(track_width: f32, time_scale_ms: f32) -> Self {
        Self {
            track_width,
            time_scale_ms,
            sweep: None,
            generation: 0,
            observer: None,
        }
    }

    pub fn track_width(&self) -> f32 {
        self.track_width
    }

    /// Begin a fresh sweep from position 0, replacing any running one
    pub fn start(&mut self, speed: f32, ball_size: f32) -> u32 {
        self.stop();

        let speed = if speed.is_finite() && speed >= MIN_SPEED {
            speed
        } else {
            log::warn!("Sweep speed {} clamped to {}", speed, MIN_SPEED);
            MIN_SPEED
        };

        self.generation = self.generation.wrapping_add(1);
        let sweep = Sweep {
            generation: self.generation,
            speed,
            leg_ms: crate::leg_duration_ms(self.track_width, speed, self.time_scale_ms),
            elapsed_ms: 0.0,
        };
        log::debug!(
            "Sweep #{} started: speed {:.2}, ball {:.0}, leg {:.0}ms",
            sweep.generation,
            speed,
            ball_size,
            sweep.leg_ms
        );
        self.sweep = Some(sweep);
        self.generation
    }

    /// Halt the sweep and detach the observer. Idempotent.
    pub fn stop(&mut self) {
        if let Some(sweep) = self.sweep.take() {
            log::debug!("Sweep #{} stopped", sweep.generation);
        }
        self.observer = None;
    }

    /// Register the observer for the current sweep (cleared by `stop`)
    pub fn observe(&mut self, observer: PositionObserver) {
        self.observer = Some(observer);
    }

    /// Advance the active sweep by `dt` seconds and notify the observer
    pub fn advance(&mut self, dt: f32) {
        let Some(sweep) = self.sweep.as_mut() else {
            return;
        };
        sweep.elapsed_ms += dt * 1000.0;
        let pos = sweep.position(self.track_width);
        if let Some(observer) = self.observer.as_mut() {
            observer(pos);
        }
    }

    /// Exact position right now (0 when stopped)
    pub fn current_position(&self) -> f32 {
        self.sweep
            .map(|s| s.position(self.track_width))
            .unwrap_or(0.0)
    }

    pub fn sweep(&self) -> Option<&Sweep> {
        self.sweep.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.sweep.is_some()
    }

    /// Number of live sweeps (never more than one)
    pub fn active_sweeps(&self) -> usize {
        usize::from(self.sweep.is_some())
    }

    pub fn leg_duration_ms(&self) -> Option<f32> {
        self.sweep.map(|s| s.leg_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_triangle_wave_shape() {
        assert_eq!(triangle_wave(0.0, 100.0, 300.0), 0.0);
        assert!((triangle_wave(50.0, 100.0, 300.0) - 150.0).abs() < 1e-3);
        assert!((triangle_wave(100.0, 100.0, 300.0) - 300.0).abs() < 1e-3);
        assert!((triangle_wave(150.0, 100.0, 300.0) - 150.0).abs() < 1e-3);
        assert!(triangle_wave(200.0, 100.0, 300.0).abs() < 1e-3);
        assert!((triangle_wave(225.0, 100.0, 300.0) - 75.0).abs() < 1e-3);
    }

    #[test]
    fn test_triangle_wave_degenerate_leg() {
        assert_eq!(triangle_wave(50.0, 0.0, 300.0), 0.0);
        assert_eq!(triangle_wave(f32::NAN, 10.0, 300.0), 0.0);
    }

    #[test]
    fn test_position_from_elapsed_time() {
        // 400 units at speed 2 with 16ms scale -> 3200ms legs
        let mut anim = Animator::new(400.0, 16.0);
        anim.start(2.0, 40.0);
        assert_eq!(anim.leg_duration_ms(), Some(3200.0));

        anim.advance(1.6);
        assert!((anim.current_position() - 200.0).abs() < 0.01);

        // Irregular ticks land on the same curve
        anim.advance(1.0);
        anim.advance(0.6);
        assert!((anim.current_position() - 400.0).abs() < 0.01);
        anim.advance(0.8);
        assert!((anim.current_position() - 300.0).abs() < 0.01);
        assert_eq!(anim.sweep().unwrap().direction(), -1);
    }

    #[test]
    fn test_restart_leaves_one_sweep() {
        let mut anim = Animator::new(400.0, 16.0);
        let first = anim.start(2.0, 40.0);
        anim.advance(1.0);
        let second = anim.start(3.0, 40.0);

        assert_ne!(first, second);
        assert_eq!(anim.active_sweeps(), 1);
        assert_eq!(anim.current_position(), 0.0);

        // Only the new sweep moves, at the new speed
        anim.advance(0.5);
        let sweep = anim.sweep().unwrap();
        assert_eq!(sweep.generation, second);
        assert_eq!(sweep.speed, 3.0);
        assert_eq!(sweep.elapsed_ms, 500.0);
        assert!(anim.current_position() > 0.0);
    }

    #[test]
    fn test_stop_detaches_observer() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut anim = Animator::new(400.0, 16.0);
        anim.start(2.0, 40.0);

        let sink = Rc::clone(&seen);
        anim.observe(Box::new(move |p| sink.borrow_mut().push(p)));
        anim.advance(0.1);
        anim.advance(0.1);
        assert_eq!(seen.borrow().len(), 2);

        anim.stop();
        anim.advance(0.1);
        assert_eq!(seen.borrow().len(), 2);
        assert!(!anim.is_running());
        assert_eq!(anim.active_sweeps(), 0);

        // A new sweep does not inherit the old observer
        anim.start(2.0, 40.0);
        anim.advance(0.1);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_bad_speed_is_clamped() {
        let mut anim = Animator::new(400.0, 16.0);
        anim.start(-3.0, 40.0);
        let sweep = anim.sweep().unwrap();
        assert_eq!(sweep.speed, MIN_SPEED);
        assert!(sweep.leg_ms.is_finite());
    }
}
