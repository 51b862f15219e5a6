//! Barrier crowd control.
//!
//! When too many enemies pile up in front of the stop line, everyone halts
//! so the field does not turn into one overlapping blob. Once the zone thins
//! out, stopped enemies that are not engaged walk again at the speed they
//! were spawned with.

use hecs::World;

use rampart_core::components::{Enemy, Hitbox};
use rampart_core::config::{ArenaConfig, CrowdConfig};
use rampart_core::constants::STOPPED_SPEED_EPSILON;
use rampart_core::types::{Position, Velocity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrowdAction {
    /// Zone at or over threshold; `halted` enemies were moving and stopped.
    Halted { in_zone: usize, halted: usize },
    /// Zone under threshold; `resumed` stopped enemies started moving.
    Resumed { in_zone: usize, resumed: usize },
    Unchanged { in_zone: usize },
}

/// X extent of the crowd zone: the stop line plus `zone_depth` beyond it.
pub fn zone_bounds(arena: &ArenaConfig, crowd: &CrowdConfig) -> (f64, f64) {
    (
        arena.stop_line_left(),
        arena.stop_line_right() + crowd.zone_depth,
    )
}

/// Enemies whose hitbox overlaps the zone along x.
pub fn count_in_zone(world: &World, arena: &ArenaConfig, crowd: &CrowdConfig) -> usize {
    let (left, right) = zone_bounds(arena, crowd);
    world
        .query::<(&Enemy, &Position, &Hitbox)>()
        .iter()
        .filter(|(_, (_, pos, hitbox))| {
            pos.x - hitbox.half_width <= right && pos.x + hitbox.half_width >= left
        })
        .count()
}

/// One crowd check.
pub fn run(world: &mut World, arena: &ArenaConfig, crowd: &CrowdConfig) -> CrowdAction {
    let in_zone = count_in_zone(world, arena, crowd);

    if in_zone >= crowd.threshold {
        let mut halted = 0;
        for (_entity, (_enemy, vel)) in world.query_mut::<(&Enemy, &mut Velocity)>() {
            if vel.speed() >= STOPPED_SPEED_EPSILON {
                halted += 1;
            }
            *vel = Velocity::default();
        }
        return if halted > 0 {
            CrowdAction::Halted { in_zone, halted }
        } else {
            CrowdAction::Unchanged { in_zone }
        };
    }

    let mut resumed = 0;
    for (_entity, (enemy, vel)) in world.query_mut::<(&Enemy, &mut Velocity)>() {
        if !enemy.engaged && vel.speed() < STOPPED_SPEED_EPSILON {
            *vel = Velocity::new(-enemy.assigned_speed, 0.0);
            resumed += 1;
        }
    }
    if resumed > 0 {
        CrowdAction::Resumed { in_zone, resumed }
    } else {
        CrowdAction::Unchanged { in_zone }
    }
}
