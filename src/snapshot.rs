//! Render-facing view of the engine
//!
//! Everything a frontend needs for one frame, detached from the engine so it
//! can be handed across the wasm boundary as JSON.

use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackMessage;
use crate::sim::{Game, GamePhase, RoundParams};
use crate::stats::{SessionStats, StreakTier};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub track_width: f32,
    pub position: f32,
    pub round: RoundParams,
    pub stats: SessionStats,
    pub streak_tier: StreakTier,
    pub streak_badge: String,
    /// Perfect taps / total taps
    pub accuracy: f32,
    pub accuracy_text: String,
    pub feedback: Option<FeedbackMessage>,
    pub ghost_position: Option<f32>,
    pub background_darkness: f32,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&Game> for Snapshot {
    fn from(game: &Game) -> Self {
        let stats = *game.stats();
        let tier = stats.streak_tier();
        Self {
            phase: game.phase(),
            track_width: game.tuning().track_width,
            position: game.position(),
            round: *game.round(),
            stats,
            streak_tier: tier,
            streak_badge: tier.badge().to_string(),
            accuracy: stats.accuracy(),
            accuracy_text: stats.accuracy_text(),
            feedback: game.feedback().cloned(),
            ghost_position: game.ghost_position(),
            background_darkness: game.difficulty().darkness,
        }
    }
}

impl Game {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_snapshot() {
        let game = Game::new(1);
        let snap = game.snapshot();
        assert_eq!(snap.phase, GamePhase::Menu);
        assert_eq!(snap.streak_tier, StreakTier::None);
        assert_eq!(snap.accuracy, 0.0);
        assert_eq!(snap.accuracy_text, "0.0%");
        assert_eq!(snap.ghost_position, None);
        assert_eq!(snap.background_darkness, 0.0);
    }

    #[test]
    fn test_snapshot_json_fields() {
        let mut game = Game::new(1);
        game.start();
        let json = game.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Playing");
        assert!(value["round"]["target_center"].is_number());
        assert!(value["feedback"].is_null());
    }
}
