//! XP curve: mapping between accumulated experience and player level.
//!
//! Going from level L to L+1 costs `base * growth^(L-1)`. The cumulative
//! threshold for reaching level L is the ceiling of the partial geometric sum,
//! so thresholds are whole XP amounts.
//!
//! Two inversions exist and must agree everywhere: `level_for_total_xp`
//! walks the per-level requirements, `level_for_total_xp_closed_form`
//! inverts the geometric series with a logarithm and then snaps to the
//! threshold table to absorb floating-point error at exact boundaries.

use rampart_core::config::XpCurveConfig;

/// Where a total XP amount sits on the curve, for the XP bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    /// XP earned past the current level's threshold.
    pub xp_into_level: u64,
    /// XP span of the current level.
    pub xp_for_level: u64,
}

#[derive(Debug, Clone)]
pub struct XpCurve {
    base: f64,
    growth: f64,
    max_level: u32,
    /// `thresholds[L - 1]` = cumulative XP needed to reach level L.
    thresholds: Vec<u64>,
}

impl XpCurve {
    /// Build the curve. Expects a validated config (base > 0, growth > 1).
    pub fn new(config: &XpCurveConfig) -> Self {
        let max_level = config.max_level.max(1);
        let mut thresholds = Vec::with_capacity(max_level as usize);
        let mut cumulative = 0.0;
        thresholds.push(0);
        for level in 1..max_level {
            cumulative += config.base * config.growth.powi(level as i32 - 1);
            thresholds.push(cumulative.ceil() as u64);
        }
        Self {
            base: config.base,
            growth: config.growth,
            max_level,
            thresholds,
        }
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// XP cost of going from `level` to `level + 1`.
    pub fn requirement(&self, level: u32) -> f64 {
        self.base * self.growth.powi(level.max(1) as i32 - 1)
    }

    /// Cumulative XP needed to reach `level` (clamped to 1..=max_level).
    pub fn xp_required_for_level(&self, level: u32) -> u64 {
        let level = level.clamp(1, self.max_level);
        self.thresholds[level as usize - 1]
    }

    /// Largest level whose threshold is <= `total_xp`, by accumulating
    /// per-level requirements.
    pub fn level_for_total_xp(&self, total_xp: i64) -> u32 {
        if total_xp <= 0 {
            return 1;
        }
        let total = total_xp as u64;
        let mut level = 1;
        let mut cumulative = 0.0;
        while level < self.max_level {
            cumulative += self.requirement(level);
            if (cumulative.ceil() as u64) > total {
                break;
            }
            level += 1;
        }
        level
    }

    /// Same mapping as `level_for_total_xp`, via logarithmic inversion of
    /// `base * (growth^(L-1) - 1) / (growth - 1)`.
    pub fn level_for_total_xp_closed_form(&self, total_xp: i64) -> u32 {
        if total_xp <= 0 {
            return 1;
        }
        let total = total_xp as u64;
        let ratio = 1.0 + total as f64 * (self.growth - 1.0) / self.base;
        let estimate = (ratio.ln() / self.growth.ln()).floor();
        let mut level = if estimate.is_finite() {
            (estimate as i64 + 1).clamp(1, self.max_level as i64) as u32
        } else {
            self.max_level
        };

        while level < self.max_level && self.xp_required_for_level(level + 1) <= total {
            level += 1;
        }
        while level > 1 && self.xp_required_for_level(level) > total {
            level -= 1;
        }
        level
    }

    /// XP bar state. At max level the bar collapses to 0 / 1.
    pub fn progress(&self, total_xp: u64) -> LevelProgress {
        let level = self.level_for_total_xp(total_xp.min(i64::MAX as u64) as i64);
        if level >= self.max_level {
            return LevelProgress {
                level,
                xp_into_level: 0,
                xp_for_level: 1,
            };
        }
        let floor = self.xp_required_for_level(level);
        let ceiling = self.xp_required_for_level(level + 1);
        LevelProgress {
            level,
            xp_into_level: total_xp - floor,
            xp_for_level: ceiling - floor,
        }
    }
}

impl Default for XpCurve {
    fn default() -> Self {
        Self::new(&XpCurveConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let curve = XpCurve::default();
        assert_eq!(curve.xp_required_for_level(1), 0);
        assert_eq!(curve.xp_required_for_level(2), 100);
        assert_eq!(curve.xp_required_for_level(3), 250);
        assert_eq!(curve.xp_required_for_level(4), 475);
        // 812.5 rounds up to a whole amount
        assert_eq!(curve.xp_required_for_level(5), 813);
    }

    #[test]
    fn test_zero_and_negative_xp_is_level_one() {
        let curve = XpCurve::default();
        assert_eq!(curve.level_for_total_xp(0), 1);
        assert_eq!(curve.level_for_total_xp(-500), 1);
        assert_eq!(curve.level_for_total_xp_closed_form(0), 1);
        assert_eq!(curve.level_for_total_xp_closed_form(-1), 1);
    }

    #[test]
    fn test_boundaries_are_inverse_consistent() {
        let curve = XpCurve::default();
        for level in 2..=curve.max_level() {
            let threshold = curve.xp_required_for_level(level) as i64;
            assert_eq!(
                curve.level_for_total_xp(threshold - 1),
                level - 1,
                "one XP short of level {level} threshold {threshold}"
            );
            assert_eq!(
                curve.level_for_total_xp(threshold),
                level,
                "exactly at level {level} threshold {threshold}"
            );
        }
    }

    #[test]
    fn test_iterative_and_closed_form_agree() {
        for config in [
            XpCurveConfig::default(),
            XpCurveConfig {
                base: 100.0,
                growth: 1.1,
                max_level: 30,
            },
            XpCurveConfig {
                base: 37.0,
                growth: 2.0,
                max_level: 12,
            },
        ] {
            let curve = XpCurve::new(&config);
            let top = curve.xp_required_for_level(curve.max_level()) as i64 + 500;
            for xp in -10..=top {
                assert_eq!(
                    curve.level_for_total_xp(xp),
                    curve.level_for_total_xp_closed_form(xp),
                    "mappings disagree at {xp} XP for {config:?}"
                );
            }
        }
    }

    #[test]
    fn test_level_monotonic_and_bounded() {
        let curve = XpCurve::default();
        let mut previous = 1;
        for xp in 0..20_000 {
            let level = curve.level_for_total_xp(xp);
            assert!(level >= previous, "level dropped at {xp} XP");
            assert!(level <= curve.max_level());
            previous = level;
        }
        assert_eq!(curve.level_for_total_xp(i64::MAX), curve.max_level());
        assert_eq!(curve.level_for_total_xp_closed_form(i64::MAX), curve.max_level());
    }

    #[test]
    fn test_thresholds_strictly_increasing() {
        let curve = XpCurve::default();
        for level in 1..curve.max_level() {
            assert!(curve.xp_required_for_level(level + 1) > curve.xp_required_for_level(level));
        }
    }

    #[test]
    fn test_progress_display() {
        let curve = XpCurve::default();
        let p = curve.progress(130);
        assert_eq!(p.level, 2);
        assert_eq!(p.xp_into_level, 30);
        assert_eq!(p.xp_for_level, 150);

        let top = curve.xp_required_for_level(curve.max_level());
        let p = curve.progress(top + 1_000);
        assert_eq!(p.level, curve.max_level());
        assert_eq!((p.xp_into_level, p.xp_for_level), (0, 1));
    }
}
