//! Match tuning configuration.
//!
//! Every group deserializes with `#[serde(default)]`, so a JSON override only
//! needs the fields it changes.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::ProjectileSpeedPolicy;

/// Complete tuning for one match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub arena: ArenaConfig,
    pub xp_curve: XpCurveConfig,
    pub progression: ProgressionConfig,
    pub spawn: SpawnConfig,
    pub castle: CastleConfig,
    pub crowd: CrowdConfig,
    pub training: TrainingConfig,
}

/// Fixed arena geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
    pub cull_margin: f64,
    pub player_x: f64,
    pub player_y: f64,
    pub muzzle_offset_x: f64,
    pub min_forward_offset: f64,
    pub stop_line_x: f64,
    pub stop_line_width: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            cull_margin: CULL_MARGIN,
            player_x: PLAYER_X,
            player_y: PLAYER_Y,
            muzzle_offset_x: MUZZLE_OFFSET_X,
            min_forward_offset: MIN_FORWARD_OFFSET,
            stop_line_x: STOP_LINE_X,
            stop_line_width: STOP_LINE_WIDTH,
        }
    }
}

impl ArenaConfig {
    /// Right edge of the stop line; enemies engage on touching it.
    pub fn stop_line_right(&self) -> f64 {
        self.stop_line_x + self.stop_line_width / 2.0
    }

    pub fn stop_line_left(&self) -> f64 {
        self.stop_line_x - self.stop_line_width / 2.0
    }
}

/// Geometric XP curve: level L -> L+1 costs `base * growth^(L-1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XpCurveConfig {
    pub base: f64,
    pub growth: f64,
    pub max_level: u32,
}

impl Default for XpCurveConfig {
    fn default() -> Self {
        Self {
            base: XP_BASE,
            growth: XP_GROWTH,
            max_level: MAX_LEVEL,
        }
    }
}

/// Stat growth and XP economy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub stat_growth: f64,
    pub levels_per_bonus: u32,
    pub xp_per_kill: f64,
    pub xp_multiplier_step: f64,
    pub xp_multiplier_interval_ms: f64,
    pub projectile_speed: ProjectileSpeedPolicy,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            stat_growth: STAT_GROWTH,
            levels_per_bonus: LEVELS_PER_BONUS,
            xp_per_kill: XP_PER_KILL,
            xp_multiplier_step: XP_MULTIPLIER_STEP,
            xp_multiplier_interval_ms: XP_MULTIPLIER_INTERVAL_MS,
            projectile_speed: ProjectileSpeedPolicy::Constant,
        }
    }
}

/// Enemy spawning and time-based escalation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub spawn_x: f64,
    pub spawn_y_min: f64,
    pub spawn_y_max: f64,
    pub base_health: f64,
    pub base_speed: f64,
    pub health_scale: f64,
    pub speed_scale: f64,
    pub speed_jitter: f64,
    pub max_active: usize,
    pub interval_ms: f64,
    pub difficulty_interval_ms: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            spawn_x: ENEMY_SPAWN_X,
            spawn_y_min: ENEMY_SPAWN_Y_MIN,
            spawn_y_max: ENEMY_SPAWN_Y_MAX,
            base_health: ENEMY_BASE_HEALTH,
            base_speed: ENEMY_BASE_SPEED,
            health_scale: ENEMY_HEALTH_SCALE,
            speed_scale: ENEMY_SPEED_SCALE,
            speed_jitter: ENEMY_SPEED_JITTER,
            max_active: MAX_ACTIVE_ENEMIES,
            interval_ms: SPAWN_INTERVAL_MS,
            difficulty_interval_ms: DIFFICULTY_INTERVAL_MS,
        }
    }
}

/// Castle health and match clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastleConfig {
    pub max_health: i32,
    pub damage_per_tick: i32,
    pub damage_interval_ms: f64,
    pub match_duration_secs: u32,
    pub countdown_interval_ms: f64,
}

impl Default for CastleConfig {
    fn default() -> Self {
        Self {
            max_health: CASTLE_MAX_HEALTH,
            damage_per_tick: CASTLE_DAMAGE_PER_TICK,
            damage_interval_ms: CASTLE_DAMAGE_INTERVAL_MS,
            match_duration_secs: MATCH_DURATION_SECS,
            countdown_interval_ms: COUNTDOWN_INTERVAL_MS,
        }
    }
}

/// Barrier crowd controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrowdConfig {
    pub enabled: bool,
    pub threshold: usize,
    pub check_interval_ms: f64,
    pub zone_depth: f64,
}

impl Default for CrowdConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: CROWD_THRESHOLD,
            check_interval_ms: CROWD_CHECK_INTERVAL_MS,
            zone_depth: CROWD_ZONE_DEPTH,
        }
    }
}

/// Training (practice) mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub spawn_y: f64,
    pub stop_x: f64,
    pub spawn_interval_ms: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            spawn_y: TRAINING_SPAWN_Y,
            stop_x: TRAINING_STOP_X,
            spawn_interval_ms: TRAINING_SPAWN_INTERVAL_MS,
        }
    }
}

impl MatchConfig {
    /// Reject tunings that would break the simulation's invariants
    /// (non-increasing XP curve, zero-length timers, empty spawn band).
    pub fn validate(&self) -> Result<(), String> {
        let xp = &self.xp_curve;
        if xp.base <= 0.0 || xp.growth <= 1.0 {
            return Err(format!(
                "XP curve must be strictly increasing (base {}, growth {})",
                xp.base, xp.growth
            ));
        }
        if xp.max_level == 0 {
            return Err("max_level must be at least 1".to_string());
        }
        if self.progression.levels_per_bonus == 0 {
            return Err("levels_per_bonus must be at least 1".to_string());
        }
        if let ProjectileSpeedPolicy::Scaled { growth } = self.progression.projectile_speed {
            if growth <= 0.0 {
                return Err(format!("projectile speed growth must be positive, got {growth}"));
            }
        }

        let intervals = [
            ("spawn.interval_ms", self.spawn.interval_ms),
            ("spawn.difficulty_interval_ms", self.spawn.difficulty_interval_ms),
            ("castle.damage_interval_ms", self.castle.damage_interval_ms),
            ("castle.countdown_interval_ms", self.castle.countdown_interval_ms),
            ("crowd.check_interval_ms", self.crowd.check_interval_ms),
            ("progression.xp_multiplier_interval_ms", self.progression.xp_multiplier_interval_ms),
            ("training.spawn_interval_ms", self.training.spawn_interval_ms),
        ];
        for (name, value) in intervals {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be a positive duration, got {value}"));
            }
        }

        if self.spawn.spawn_y_min > self.spawn.spawn_y_max {
            return Err(format!(
                "spawn band is empty: y_min {} > y_max {}",
                self.spawn.spawn_y_min, self.spawn.spawn_y_max
            ));
        }
        if !(0.0..1.0).contains(&self.spawn.speed_jitter) {
            return Err(format!(
                "speed_jitter must be in [0, 1), got {}",
                self.spawn.speed_jitter
            ));
        }
        if self.crowd.threshold == 0 {
            return Err("crowd threshold must be at least 1".to_string());
        }
        Ok(())
    }
}
