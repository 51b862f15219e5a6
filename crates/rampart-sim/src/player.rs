//! The player character: identity, XP counter, level and derived stats.
//!
//! Level and stats are recomputed from total XP on every change and are
//! never set independently.

use rampart_core::config::ProgressionConfig;
use rampart_core::enums::CharacterId;
use rampart_core::state::PlayerView;
use rampart_core::types::{BaseStats, Position};

use crate::progression::{LevelProgress, XpCurve};
use crate::stats::{derive_stats, PlayerStats};

#[derive(Debug, Clone)]
pub struct PlayerState {
    character: CharacterId,
    base: BaseStats,
    total_xp: u64,
    level: u32,
    stats: PlayerStats,
    position: Position,
}

impl PlayerState {
    pub fn new(
        character: CharacterId,
        total_xp: u64,
        position: Position,
        curve: &XpCurve,
        config: &ProgressionConfig,
    ) -> Self {
        let base = character.base_stats();
        let level = level_for(curve, total_xp);
        Self {
            character,
            base,
            total_xp,
            level,
            stats: derive_stats(&base, level, config),
            position,
        }
    }

    pub fn character(&self) -> CharacterId {
        self.character
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn total_xp(&self) -> u64 {
        self.total_xp
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn progress(&self, curve: &XpCurve) -> LevelProgress {
        curve.progress(self.total_xp)
    }

    pub fn at_max_level(&self, curve: &XpCurve) -> bool {
        self.level >= curve.max_level()
    }

    /// Add XP and recompute level and stats. Returns the new level when it
    /// changed. No XP is gained once at max level.
    pub fn award_xp(
        &mut self,
        amount: u64,
        curve: &XpCurve,
        config: &ProgressionConfig,
    ) -> Option<u32> {
        if self.at_max_level(curve) {
            return None;
        }
        self.total_xp = self.total_xp.saturating_add(amount);
        let level = level_for(curve, self.total_xp);
        if level == self.level {
            return None;
        }
        self.level = level;
        self.stats = derive_stats(&self.base, level, config);
        Some(level)
    }

    pub fn view(&self, curve: &XpCurve) -> PlayerView {
        let progress = self.progress(curve);
        PlayerView {
            character: self.character,
            level: self.level,
            xp: progress.xp_into_level,
            xp_max: progress.xp_for_level,
            total_xp: self.total_xp,
            attack: self.stats.attack,
            fire_rate: self.stats.fire_rate,
            projectile_speed: self.stats.projectile_speed,
            projectile_count: self.stats.projectile_count,
            pierce: self.stats.pierce,
            position: self.position,
        }
    }
}

fn level_for(curve: &XpCurve, total_xp: u64) -> u32 {
    curve.level_for_total_xp(i64::try_from(total_xp).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archer(total_xp: u64) -> PlayerState {
        PlayerState::new(
            CharacterId::Archer,
            total_xp,
            Position::new(150.0, 260.0),
            &XpCurve::default(),
            &ProgressionConfig::default(),
        )
    }

    #[test]
    fn test_level_derived_from_loaded_xp() {
        assert_eq!(archer(0).level(), 1);
        assert_eq!(archer(260).level(), 3);
        assert_eq!(archer(260).stats().attack, derive_stats(
            &CharacterId::Archer.base_stats(),
            3,
            &ProgressionConfig::default()
        ).attack);
    }

    #[test]
    fn test_award_triggers_level_up_and_recompute() {
        let curve = XpCurve::default();
        let config = ProgressionConfig::default();
        let mut player = archer(0);
        let before = *player.stats();

        assert_eq!(player.award_xp(50, &curve, &config), None);
        assert_eq!(player.award_xp(50, &curve, &config), Some(2));
        assert!(player.stats().attack > before.attack);
        assert!(player.stats().fire_interval_ms() < before.fire_interval_ms());
    }

    #[test]
    fn test_multi_level_jump() {
        let curve = XpCurve::default();
        let mut player = archer(0);
        assert_eq!(
            player.award_xp(500, &curve, &ProgressionConfig::default()),
            Some(4)
        );
    }

    #[test]
    fn test_no_xp_at_max_level() {
        let curve = XpCurve::default();
        let top = curve.xp_required_for_level(curve.max_level());
        let mut player = archer(top);
        assert!(player.at_max_level(&curve));
        assert_eq!(player.award_xp(50, &curve, &ProgressionConfig::default()), None);
        assert_eq!(player.total_xp(), top);

        let view = player.view(&curve);
        assert_eq!((view.xp, view.xp_max), (0, 1));
    }
}
