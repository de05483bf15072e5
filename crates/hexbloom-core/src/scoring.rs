//! Points for a placement that cleared at least one pattern.

use serde::{Deserialize, Serialize};

/// Points per cleared pattern
pub const POINTS_PER_CLEAR: u32 = 10;

/// Bonus for emptying a board that had filled cells
pub const BOARD_CLEARED_BONUS: u32 = 25;

/// Bonus for clearing the golden cell (endless mode)
pub const GOLDEN_BONUS: u32 = 10;

/// Extra multiplier for each simultaneous clear beyond the first
pub const COMBO_STEP: f64 = 0.5;

/// Extra multiplier per consecutive clearing move
pub const STREAK_STEP: f64 = 0.1;

/// Conditions that feed the score of one placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreInput {
    /// Patterns cleared by this placement
    pub clear_count: usize,
    /// Streak before this placement
    pub streak: u32,
    pub board_cleared: bool,
    pub golden_cleared: bool,
}

/// Breakdown of the points a placement earned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScoreBreakdown {
    pub base_points: u32,
    pub combo_multiplier: f64,
    pub streak_multiplier: f64,
    pub points_gained: u32,
}

impl ScoreBreakdown {
    /// Score for a placement that cleared nothing
    pub fn none() -> Self {
        Self {
            base_points: 0,
            combo_multiplier: 1.0,
            streak_multiplier: 1.0,
            points_gained: 0,
        }
    }
}

pub fn combo_multiplier(clear_count: usize) -> f64 {
    1.0 + COMBO_STEP * (clear_count.max(1) - 1) as f64
}

pub fn streak_multiplier(streak: u32) -> f64 {
    1.0 + STREAK_STEP * streak as f64
}

/// Score one placement.
///
/// `base = 10 * clears + board bonus + golden bonus`, scaled by the combo and
/// streak multipliers and rounded to the nearest integer.
pub fn score(input: ScoreInput) -> ScoreBreakdown {
    if input.clear_count == 0 {
        return ScoreBreakdown::none();
    }

    let mut base_points = POINTS_PER_CLEAR * input.clear_count as u32;
    if input.board_cleared {
        base_points += BOARD_CLEARED_BONUS;
    }
    if input.golden_cleared {
        base_points += GOLDEN_BONUS;
    }

    let combo = combo_multiplier(input.clear_count);
    let streak = streak_multiplier(input.streak);
    let raw = base_points as f64 * combo * streak;
    let points_gained = raw.round() as u32;

    ScoreBreakdown {
        base_points,
        combo_multiplier: combo,
        streak_multiplier: streak,
        points_gained,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_clear_no_streak() {
        let s = score(ScoreInput {
            clear_count: 1,
            ..Default::default()
        });
        assert_eq!(s.base_points, 10);
        assert_eq!(s.combo_multiplier, 1.0);
        assert_eq!(s.streak_multiplier, 1.0);
        assert_eq!(s.points_gained, 10);
    }

    #[test]
    fn test_triple_clear_with_streak_two() {
        let s = score(ScoreInput {
            clear_count: 3,
            streak: 2,
            ..Default::default()
        });
        assert_eq!(s.base_points, 30);
        assert_eq!(s.combo_multiplier, 2.0);
        assert!((s.streak_multiplier - 1.2).abs() < 1e-12);
        assert_eq!(s.points_gained, 72);
    }

    #[test]
    fn test_bonuses_add_to_base() {
        let s = score(ScoreInput {
            clear_count: 1,
            streak: 0,
            board_cleared: true,
            golden_cleared: true,
        });
        assert_eq!(s.base_points, 45);
        assert_eq!(s.points_gained, 45);
    }

    #[test]
    fn test_no_clear_scores_nothing() {
        let s = score(ScoreInput {
            clear_count: 0,
            streak: 5,
            board_cleared: false,
            golden_cleared: true,
        });
        assert_eq!(s, ScoreBreakdown::none());
    }

    #[test]
    fn test_more_clears_never_score_less() {
        for streak in 0..10 {
            let mut previous = 0;
            for clears in 1..12 {
                let s = score(ScoreInput {
                    clear_count: clears,
                    streak,
                    ..Default::default()
                });
                assert!(s.points_gained >= previous);
                previous = s.points_gained;
            }
        }
    }

    #[test]
    fn test_fractional_multipliers_round() {
        // 10 * 1.0 * 1.5
        let s = score(ScoreInput {
            clear_count: 1,
            streak: 5,
            ..Default::default()
        });
        assert_eq!(s.points_gained, 15);
        // 2 clears at streak 1: 20 * 1.5 * 1.1 = 33
        let s = score(ScoreInput {
            clear_count: 2,
            streak: 1,
            ..Default::default()
        });
        assert_eq!(s.points_gained, 33);
    }
}
