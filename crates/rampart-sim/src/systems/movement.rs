//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick: position += velocity * dt.

use hecs::World;

use rampart_core::constants::DT;
use rampart_core::types::{Position, Velocity};

/// Run kinematic integration for all entities with Position + Velocity.
pub fn run(world: &mut World) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.x += vel.x * DT;
        pos.y += vel.y * DT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_second_of_ticks() {
        let mut world = World::new();
        let e = world.spawn((Position::new(850.0, 300.0), Velocity::new(-60.0, 6.0)));
        for _ in 0..60 {
            run(&mut world);
        }
        let pos = *world.get::<&Position>(e).unwrap();
        assert!((pos.x - 790.0).abs() < 1e-9);
        assert!((pos.y - 306.0).abs() < 1e-9);
    }
}
