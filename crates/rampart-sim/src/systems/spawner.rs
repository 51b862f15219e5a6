//! Enemy spawning: one enemy per spawn tick, capped, scaled by the current
//! escalation step.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use rampart_core::components::Enemy;
use rampart_core::config::{ArenaConfig, SpawnConfig, TrainingConfig};

use crate::world_setup;

/// Number of live enemies.
pub fn active_enemies(world: &World) -> usize {
    world.query::<&Enemy>().iter().count()
}

/// Spawn one enemy if below the cap. Returns the new entity.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    spawn: &SpawnConfig,
    arena: &ArenaConfig,
    step: u32,
) -> Option<Entity> {
    if active_enemies(world) >= spawn.max_active {
        return None;
    }
    let stop_x = world_setup::engage_x(arena.stop_line_right());
    Some(world_setup::spawn_enemy(world, rng, spawn, step, stop_x))
}

/// Training variant: a single dummy, only while the field is empty.
pub fn run_training(
    world: &mut World,
    spawn: &SpawnConfig,
    training: &TrainingConfig,
) -> Option<Entity> {
    if active_enemies(world) > 0 {
        return None;
    }
    Some(world_setup::spawn_training_enemy(world, spawn, training))
}
