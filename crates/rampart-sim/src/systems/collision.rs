//! Overlap detection for the headless kinematics step.
//!
//! Produces the contact lists the engine feeds into its collision entry
//! points. Detection only reads the world; resolution happens in the engine
//! so stale pairs (an enemy killed earlier in the same step) are filtered
//! by the resolver's aliveness checks.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, Hitbox, Projectile};
use rampart_core::types::Position;

fn overlaps(a: &Position, ab: &Hitbox, b: &Position, bb: &Hitbox) -> bool {
    (a.x - b.x).abs() <= ab.half_width + bb.half_width
        && (a.y - b.y).abs() <= ab.half_height + bb.half_height
}

/// Every overlapping (projectile, enemy) pair whose hit is not yet
/// registered.
pub fn projectile_enemy_contacts(world: &World) -> Vec<(Entity, Entity)> {
    let enemies: Vec<(Entity, Position, Hitbox)> = world
        .query::<(&Enemy, &Position, &Hitbox)>()
        .iter()
        .map(|(e, (_, pos, hitbox))| (e, *pos, *hitbox))
        .collect();

    let mut contacts = Vec::new();
    for (projectile, (proj, pos, hitbox)) in world.query::<(&Projectile, &Position, &Hitbox)>().iter() {
        for (enemy, enemy_pos, enemy_box) in &enemies {
            if proj.hit_set.contains(enemy.to_bits().get()) {
                continue;
            }
            if overlaps(pos, hitbox, enemy_pos, enemy_box) {
                contacts.push((projectile, *enemy));
            }
        }
    }
    contacts
}

/// Non-engaged enemies that have reached their stop position.
pub fn enemies_at_barrier(world: &World) -> Vec<Entity> {
    world
        .query::<(&Enemy, &Position)>()
        .iter()
        .filter(|(_, (enemy, pos))| !enemy.engaged && pos.x <= enemy.stop_x)
        .map(|(e, _)| e)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::types::Velocity;

    use crate::world_setup::{spawn_projectile, spawn_test_enemy};

    #[test]
    fn test_overlap_detection() {
        let mut world = World::new();
        let near = spawn_test_enemy(&mut world, Position::new(400.0, 300.0), Velocity::new(-50.0, 0.0), 100.0, 301.0);
        let _far = spawn_test_enemy(&mut world, Position::new(600.0, 300.0), Velocity::new(-50.0, 0.0), 100.0, 301.0);
        let p = spawn_projectile(&mut world, Position::new(375.0, 310.0), Velocity::new(200.0, 0.0), 25.0, 0);

        assert_eq!(projectile_enemy_contacts(&world), vec![(p, near)]);
    }

    #[test]
    fn test_already_hit_pairs_skipped() {
        let mut world = World::new();
        let e = spawn_test_enemy(&mut world, Position::new(400.0, 300.0), Velocity::new(-50.0, 0.0), 100.0, 301.0);
        let p = spawn_projectile(&mut world, Position::new(400.0, 300.0), Velocity::new(200.0, 0.0), 25.0, 2);
        world.get::<&mut Projectile>(p).unwrap().hit_set.insert(e.to_bits().get());
        assert!(projectile_enemy_contacts(&world).is_empty());
    }

    #[test]
    fn test_barrier_reach() {
        let mut world = World::new();
        let at = spawn_test_enemy(&mut world, Position::new(300.0, 300.0), Velocity::new(-50.0, 0.0), 100.0, 301.0);
        let _before = spawn_test_enemy(&mut world, Position::new(302.0, 300.0), Velocity::new(-50.0, 0.0), 100.0, 301.0);
        let engaged = spawn_test_enemy(&mut world, Position::new(290.0, 300.0), Velocity::default(), 100.0, 301.0);
        world.get::<&mut Enemy>(engaged).unwrap().engaged = true;

        assert_eq!(enemies_at_barrier(&world), vec![at]);
    }
}
