//! Match state snapshot: the complete visible state handed to the
//! presentation layer after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::MatchEvent;
use crate::types::{Position, SimTime, Velocity};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub mode: MatchMode,
    pub difficulty: Difficulty,
    pub match_state: MatchState,
    pub player: PlayerView,
    pub castle: CastleView,
    pub countdown_secs: u32,
    /// Enemy escalation step counter.
    pub difficulty_step: u32,
    pub enemy_multiplier: f64,
    pub xp_multiplier: f64,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub events: Vec<MatchEvent>,
}

/// Player level, XP bar and derived stats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub character: CharacterId,
    pub level: u32,
    /// XP earned inside the current level (0 at max level).
    pub xp: u64,
    /// XP span of the current level (1 at max level).
    pub xp_max: u64,
    pub total_xp: u64,
    pub attack: f64,
    pub fire_rate: f64,
    pub projectile_speed: f64,
    pub projectile_count: u32,
    pub pierce: u32,
    pub position: Position,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CastleView {
    pub health: i32,
    pub max_health: i32,
    /// Health fraction clamped to [0, 1].
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub position: Position,
    pub velocity: Velocity,
    pub health: f64,
    pub max_health: f64,
    pub engaged: bool,
    pub damaged: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub position: Position,
    pub velocity: Velocity,
    pub hits: u32,
}
