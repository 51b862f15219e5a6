//! Stat scaling: derived player stats as a pure function of
//! (character base stats, level).

use rampart_core::config::ProgressionConfig;
use rampart_core::constants::HIT_SET_CAPACITY;
use rampart_core::enums::ProjectileSpeedPolicy;
use rampart_core::types::BaseStats;

/// Derived combat stats at a given level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStats {
    pub attack: f64,
    /// Shots per second.
    pub fire_rate: f64,
    pub projectile_speed: f64,
    pub projectile_count: u32,
    pub pierce: u32,
}

impl PlayerStats {
    /// Shoot timer period in milliseconds (inverse of fire rate).
    pub fn fire_interval_ms(&self) -> f64 {
        1000.0 / self.fire_rate
    }
}

/// Compute stats for `level`.
///
/// Attack and fire rate grow geometrically; projectile count and pierce gain
/// one every `levels_per_bonus` levels. Pierce is capped so a projectile's
/// hit set always has room for every hit it is allowed.
pub fn derive_stats(base: &BaseStats, level: u32, config: &ProgressionConfig) -> PlayerStats {
    let level = level.max(1);
    let growth = config.stat_growth.powi(level as i32 - 1);
    let bonus = level / config.levels_per_bonus.max(1);

    let projectile_speed = match config.projectile_speed {
        ProjectileSpeedPolicy::Constant => base.projectile_speed,
        ProjectileSpeedPolicy::Scaled { growth } => {
            base.projectile_speed * growth.powi(level as i32 - 1)
        }
    };

    PlayerStats {
        attack: base.attack * growth,
        fire_rate: base.fire_rate * growth,
        projectile_speed,
        projectile_count: base.projectile_count + bonus,
        pierce: (base.pierce + bonus).min(HIT_SET_CAPACITY as u32 - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::enums::CharacterId;

    #[test]
    fn test_level_one_is_base() {
        let config = ProgressionConfig::default();
        for character in CharacterId::ALL {
            let base = character.base_stats();
            let stats = derive_stats(&base, 1, &config);
            assert_eq!(stats.attack, base.attack);
            assert_eq!(stats.fire_rate, base.fire_rate);
            assert_eq!(stats.projectile_speed, base.projectile_speed);
            assert_eq!(stats.projectile_count, base.projectile_count);
            assert_eq!(stats.pierce, base.pierce);
        }
    }

    #[test]
    fn test_geometric_growth() {
        let config = ProgressionConfig::default();
        let base = CharacterId::Archer.base_stats();
        let stats = derive_stats(&base, 3, &config);
        assert!((stats.attack - 25.0 * 1.21).abs() < 1e-9);
        assert!((stats.fire_rate - 0.5 * 1.21).abs() < 1e-9);
    }

    #[test]
    fn test_bonus_every_five_levels() {
        let config = ProgressionConfig::default();
        let base = CharacterId::Archer.base_stats();
        assert_eq!(derive_stats(&base, 4, &config).projectile_count, 1);
        assert_eq!(derive_stats(&base, 5, &config).projectile_count, 2);
        assert_eq!(derive_stats(&base, 5, &config).pierce, 1);
        assert_eq!(derive_stats(&base, 10, &config).projectile_count, 3);
    }

    #[test]
    fn test_monotonic_in_level() {
        let config = ProgressionConfig::default();
        for character in CharacterId::ALL {
            let base = character.base_stats();
            let mut prev = derive_stats(&base, 1, &config);
            for level in 2..=30 {
                let next = derive_stats(&base, level, &config);
                assert!(next.attack >= prev.attack);
                assert!(next.fire_rate >= prev.fire_rate);
                assert!(next.projectile_count >= prev.projectile_count);
                assert!(next.pierce >= prev.pierce);
                prev = next;
            }
        }
    }

    #[test]
    fn test_fire_interval_inverse_of_rate() {
        let config = ProgressionConfig::default();
        let stats = derive_stats(&CharacterId::Archer.base_stats(), 1, &config);
        assert!((stats.fire_interval_ms() - 2000.0).abs() < 1e-9);
        let faster = derive_stats(&CharacterId::Archer.base_stats(), 2, &config);
        assert!(faster.fire_interval_ms() < stats.fire_interval_ms());
    }

    #[test]
    fn test_speed_policy() {
        let base = CharacterId::Archer.base_stats();
        let constant = derive_stats(&base, 6, &ProgressionConfig::default());
        assert_eq!(constant.projectile_speed, base.projectile_speed);

        let scaled_config = ProgressionConfig {
            projectile_speed: ProjectileSpeedPolicy::Scaled { growth: 1.05 },
            ..Default::default()
        };
        let scaled = derive_stats(&base, 3, &scaled_config);
        assert!((scaled.projectile_speed - base.projectile_speed * 1.1025).abs() < 1e-9);
    }

    #[test]
    fn test_pierce_capped_by_hit_set() {
        let config = ProgressionConfig {
            levels_per_bonus: 1,
            ..Default::default()
        };
        let stats = derive_stats(&CharacterId::Ranger.base_stats(), 100, &config);
        assert_eq!(stats.pierce, HIT_SET_CAPACITY as u32 - 1);
    }
}
