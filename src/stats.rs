//! Session statistics
//!
//! Lives for the whole session; only an explicit new session clears it.

use serde::{Deserialize, Serialize};

/// Streak badge earned by the current streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum StreakTier {
    #[default]
    None,
    Bronze,
    Silver,
    Gold,
}

impl StreakTier {
    pub const BRONZE_AT: u32 = 3;
    pub const SILVER_AT: u32 = 5;
    pub const GOLD_AT: u32 = 10;

    /// Classify a streak length
    pub fn for_streak(streak: u32) -> Self {
        if streak >= Self::GOLD_AT {
            StreakTier::Gold
        } else if streak >= Self::SILVER_AT {
            StreakTier::Silver
        } else if streak >= Self::BRONZE_AT {
            StreakTier::Bronze
        } else {
            StreakTier::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StreakTier::None => "None",
            StreakTier::Bronze => "Bronze",
            StreakTier::Silver => "Silver",
            StreakTier::Gold => "Gold",
        }
    }

    /// Badge text shown next to the streak counter (empty for no tier)
    pub fn badge(&self) -> &'static str {
        match self {
            StreakTier::None => "",
            StreakTier::Bronze => "BRONZE STREAK",
            StreakTier::Silver => "SILVER STREAK",
            StreakTier::Gold => "GOLD STREAK",
        }
    }
}

/// Running tap statistics for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionStats {
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_taps: u32,
    pub perfect_taps: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a successful tap
    pub fn record_hit(&mut self, is_perfect: bool) {
        self.current_streak += 1;
        self.best_streak = self.best_streak.max(self.current_streak);
        self.total_taps += 1;
        if is_perfect {
            self.perfect_taps += 1;
        }
    }

    /// Count a missed tap; the streak is lost
    pub fn record_miss(&mut self) {
        self.current_streak = 0;
        self.total_taps += 1;
    }

    /// Fresh run from the menu: streak restarts, session totals stay
    pub fn begin_run(&mut self) {
        self.current_streak = 0;
    }

    pub fn streak_tier(&self) -> StreakTier {
        StreakTier::for_streak(self.current_streak)
    }

    /// Share of taps that were perfect (0 when nothing has been tapped yet)
    pub fn accuracy(&self) -> f32 {
        if self.total_taps == 0 {
            return 0.0;
        }
        self.perfect_taps as f32 / self.total_taps as f32
    }

    /// Accuracy formatted for display ("0.0%")
    pub fn accuracy_text(&self) -> String {
        crate::format_percent(self.accuracy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(StreakTier::for_streak(0), StreakTier::None);
        assert_eq!(StreakTier::for_streak(2), StreakTier::None);
        assert_eq!(StreakTier::for_streak(3), StreakTier::Bronze);
        assert_eq!(StreakTier::for_streak(4), StreakTier::Bronze);
        assert_eq!(StreakTier::for_streak(5), StreakTier::Silver);
        assert_eq!(StreakTier::for_streak(9), StreakTier::Silver);
        assert_eq!(StreakTier::for_streak(10), StreakTier::Gold);
        assert_eq!(StreakTier::for_streak(250), StreakTier::Gold);
    }

    #[test]
    fn test_accuracy_empty_is_zero() {
        let stats = SessionStats::new();
        assert_eq!(stats.accuracy(), 0.0);
        assert!(!stats.accuracy().is_nan());
        assert_eq!(stats.accuracy_text(), "0.0%");
    }

    #[test]
    fn test_record_hit_updates_best() {
        let mut stats = SessionStats::new();
        stats.record_hit(true);
        stats.record_hit(false);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.best_streak, 2);
        assert_eq!(stats.total_taps, 2);
        assert_eq!(stats.perfect_taps, 1);
        assert!((stats.accuracy() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bronze_then_miss() {
        let mut stats = SessionStats::new();
        for _ in 0..3 {
            stats.record_hit(false);
        }
        assert_eq!(stats.streak_tier(), StreakTier::Bronze);

        stats.record_miss();
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.streak_tier(), StreakTier::None);
        assert_eq!(stats.best_streak, 3);
        assert_eq!(stats.total_taps, 4);
    }

    #[test]
    fn test_begin_run_keeps_totals() {
        let mut stats = SessionStats::new();
        stats.record_hit(true);
        stats.record_hit(true);
        stats.begin_run();
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.best_streak, 2);
        assert_eq!(stats.total_taps, 2);
        assert_eq!(stats.perfect_taps, 2);
    }

    #[test]
    fn test_badge_text() {
        assert_eq!(StreakTier::None.badge(), "");
        assert_eq!(StreakTier::Gold.badge(), "GOLD STREAK");
    }
}
