//! Snapshot system: queries the ECS world and builds a complete MatchSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use rampart_core::components::{Enemy, Projectile};
use rampart_core::enums::*;
use rampart_core::events::MatchEvent;
use rampart_core::state::*;
use rampart_core::types::{Position, SimTime, Velocity};

/// Match-level scalars owned by the engine.
#[derive(Debug, Clone, Copy)]
pub struct MatchStatus {
    pub phase: GamePhase,
    pub mode: MatchMode,
    pub difficulty: Difficulty,
    pub match_state: MatchState,
    pub countdown_secs: u32,
    pub difficulty_step: u32,
    pub enemy_multiplier: f64,
    pub xp_multiplier: f64,
}

/// Build a complete MatchSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    status: &MatchStatus,
    player: PlayerView,
    castle: CastleView,
    events: Vec<MatchEvent>,
) -> MatchSnapshot {
    MatchSnapshot {
        time: *time,
        phase: status.phase,
        mode: status.mode,
        difficulty: status.difficulty,
        match_state: status.match_state,
        player,
        castle,
        countdown_secs: status.countdown_secs,
        difficulty_step: status.difficulty_step,
        enemy_multiplier: status.enemy_multiplier,
        xp_multiplier: status.xp_multiplier,
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        events,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    world
        .query::<(&Enemy, &Position, &Velocity)>()
        .iter()
        .map(|(entity, (enemy, pos, vel))| EnemyView {
            id: entity.to_bits().get(),
            position: *pos,
            velocity: *vel,
            health: enemy.health,
            max_health: enemy.max_health,
            engaged: enemy.engaged,
            damaged: enemy.damaged,
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .map(|(entity, (projectile, pos, vel))| ProjectileView {
            id: entity.to_bits().get(),
            position: *pos,
            velocity: *vel,
            hits: projectile.hits,
        })
        .collect()
}
