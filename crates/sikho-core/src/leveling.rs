//! XP leveling.

use serde::{Deserialize, Serialize};

use crate::model::{LevelThreshold, Xp};

/// XP added when a request does not say how much.
pub const DEFAULT_XP_GAIN: Xp = Xp::Int(10);
/// Level reported when no threshold is met.
pub const BASE_LEVEL: i64 = 1;

/// Result of adding XP to a running total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XpGain {
    pub new_xp: Xp,
    pub level: i64,
}

/// Add `xp_to_add` to `current_xp` and find the resulting level.
///
/// Thresholds are walked in the order given and every one the new total
/// meets overwrites the level, so with an unsorted table the last qualifying
/// entry wins rather than the highest. Negative and fractional inputs are
/// taken as-is.
pub fn compute_level(thresholds: &[LevelThreshold], current_xp: Xp, xp_to_add: Xp) -> XpGain {
    let new_xp = current_xp + xp_to_add;

    let mut level = BASE_LEVEL;
    for threshold in thresholds {
        if new_xp >= threshold.xp_required {
            level = threshold.level;
        }
    }

    XpGain { new_xp, level }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<LevelThreshold> {
        vec![
            LevelThreshold::new(1, 0),
            LevelThreshold::new(2, 50),
            LevelThreshold::new(3, 100),
        ]
    }

    fn level_for(thresholds: &[LevelThreshold], current: i64, add: i64) -> XpGain {
        compute_level(thresholds, Xp::Int(current), Xp::Int(add))
    }

    #[test]
    fn below_second_threshold() {
        assert_eq!(
            level_for(&table(), 0, 10),
            XpGain {
                new_xp: Xp::Int(10),
                level: 1
            }
        );
    }

    #[test]
    fn exactly_on_threshold() {
        assert_eq!(
            level_for(&table(), 40, 10),
            XpGain {
                new_xp: Xp::Int(50),
                level: 2
            }
        );
        assert_eq!(level_for(&table(), 90, 10).level, 3);
    }

    #[test]
    fn empty_table_stays_at_base_level() {
        assert_eq!(level_for(&[], 500, 10).level, BASE_LEVEL);
    }

    #[test]
    fn negative_total_matches_no_threshold() {
        let gain = level_for(&table(), -30, 10);
        assert_eq!(gain.new_xp, Xp::Int(-20));
        assert_eq!(gain.level, BASE_LEVEL);
    }

    #[test]
    fn unsorted_table_last_match_wins() {
        let thresholds = vec![
            LevelThreshold::new(3, 100),
            LevelThreshold::new(2, 50),
            LevelThreshold::new(1, 0),
        ];
        // 120 meets all three; the final entry in file order decides.
        assert_eq!(level_for(&thresholds, 120, 0).level, 1);
    }

    #[test]
    fn fractional_xp_is_summed_as_float() {
        let gain = compute_level(&table(), Xp::Float(45.5), DEFAULT_XP_GAIN);
        assert!(matches!(gain.new_xp, Xp::Float(x) if x == 55.5));
        assert_eq!(gain.level, 2);

        let gain = compute_level(&table(), Xp::Float(39.5), DEFAULT_XP_GAIN);
        assert_eq!(gain.level, 1);
    }

    #[test]
    fn float_thresholds_compare_numerically() {
        let mut thresholds = table();
        thresholds[1].xp_required = Xp::Float(49.5);
        assert_eq!(level_for(&thresholds, 40, 10).level, 2);
        assert_eq!(level_for(&thresholds, 39, 10).level, 1);
    }

    #[test]
    fn integer_overflow_becomes_float() {
        let gain = level_for(&table(), i64::MAX, 10);
        assert!(matches!(gain.new_xp, Xp::Float(_)));
        assert_eq!(gain.level, 3);
    }
}
