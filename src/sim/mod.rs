//! Deterministic engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Position derived from elapsed time, never accumulated per frame
//! - No rendering or platform dependencies

pub mod animator;
pub mod clock;
pub mod hit;
pub mod round;
pub mod state;
pub mod tick;

pub use animator::{Animator, PositionObserver, Sweep, triangle_wave};
pub use clock::{FrameClock, Timer};
pub use hit::{Direction, TapOutcome, evaluate_tap};
pub use round::{RoundParams, next_round};
pub use state::{Difficulty, Game, GameEvent, GamePhase, RngState};
pub use tick::{TickInput, tick};
