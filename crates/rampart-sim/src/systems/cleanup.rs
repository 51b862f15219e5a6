//! Cleanup system: removes entities that left the play area.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, Projectile};
use rampart_core::config::ArenaConfig;
use rampart_core::types::Position;

/// Remove projectiles outside the arena plus margin, and non-engaged
/// enemies that slipped past the left edge. Uses a caller-owned buffer to
/// avoid per-tick allocation. Returns how many enemies were culled.
pub fn run(world: &mut World, arena: &ArenaConfig, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();
    let margin = arena.cull_margin;

    for (entity, (enemy, pos)) in world.query_mut::<(&Enemy, &Position)>() {
        if !enemy.engaged && pos.x < -margin {
            despawn_buffer.push(entity);
        }
    }
    let enemies_culled = despawn_buffer.len();

    for (entity, (_projectile, pos)) in world.query_mut::<(&Projectile, &Position)>() {
        let outside = pos.x < -margin
            || pos.x > arena.width + margin
            || pos.y < -margin
            || pos.y > arena.height + margin;
        if outside {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    enemies_culled
}
