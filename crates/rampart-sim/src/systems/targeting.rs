//! Target selection for the shoot tick.
//!
//! Engaged enemies (the ones hurting the castle) always come first. Inside
//! each partition candidates are ordered by distance to the player, or by
//! distance to the barrier when crowd control is on.

use hecs::{Entity, World};

use rampart_core::components::Enemy;
use rampart_core::config::ArenaConfig;
use rampart_core::enums::TargetOrdering;
use rampart_core::types::{Position, Velocity};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCandidate {
    pub entity: Entity,
    pub position: Position,
    pub velocity: Velocity,
    pub engaged: bool,
    /// Where this enemy will stop; aim is never led past it.
    pub stop_x: f64,
}

/// Collect every live enemy as a candidate.
pub fn gather_candidates(world: &World) -> Vec<TargetCandidate> {
    world
        .query::<(&Enemy, &Position, &Velocity)>()
        .iter()
        .map(|(entity, (enemy, pos, vel))| TargetCandidate {
            entity,
            position: *pos,
            velocity: *vel,
            engaged: enemy.engaged,
            stop_x: enemy.stop_x,
        })
        .collect()
}

/// Pick at most `max_count` distinct targets in priority order.
///
/// Enemies not at least `min_forward_offset` ahead of the player along x
/// are never eligible.
pub fn select_targets(
    candidates: &[TargetCandidate],
    player: &Position,
    max_count: usize,
    ordering: TargetOrdering,
    arena: &ArenaConfig,
) -> Vec<TargetCandidate> {
    let min_x = player.x + arena.min_forward_offset;
    let barrier_x = arena.stop_line_right();

    let mut eligible: Vec<TargetCandidate> = candidates
        .iter()
        .filter(|c| c.position.x > min_x)
        .copied()
        .collect();

    eligible.sort_by_key(|c| c.entity.to_bits().get());
    eligible.dedup_by_key(|c| c.entity);

    let key = |c: &TargetCandidate| match ordering {
        TargetOrdering::NearestToPlayer => player.distance_to(&c.position),
        TargetOrdering::NearestToBarrier => (c.position.x - barrier_x).abs(),
    };
    eligible.sort_by(|a, b| {
        b.engaged
            .cmp(&a.engaged)
            .then_with(|| key(a).total_cmp(&key(b)))
            .then_with(|| a.entity.to_bits().cmp(&b.entity.to_bits()))
    });

    eligible.truncate(max_count);
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(world: &mut World, specs: &[(f64, f64, bool)]) -> Vec<TargetCandidate> {
        specs
            .iter()
            .map(|&(x, y, engaged)| TargetCandidate {
                entity: world.spawn((0u8,)),
                position: Position::new(x, y),
                velocity: Velocity::new(-52.5, 0.0),
                engaged,
                stop_x: 301.0,
            })
            .collect()
    }

    fn player() -> Position {
        Position::new(150.0, 260.0)
    }

    #[test]
    fn test_nearest_first_and_truncated() {
        let mut world = World::new();
        let c = candidates(&mut world, &[(700.0, 260.0, false), (400.0, 260.0, false), (550.0, 260.0, false)]);
        let picked = select_targets(&c, &player(), 2, TargetOrdering::NearestToPlayer, &ArenaConfig::default());
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0].entity, c[1].entity);
        assert_eq!(picked[1].entity, c[2].entity);
    }

    #[test]
    fn test_engaged_first_regardless_of_distance() {
        let mut world = World::new();
        let c = candidates(&mut world, &[(320.0, 260.0, false), (800.0, 500.0, true)]);
        let picked = select_targets(&c, &player(), 1, TargetOrdering::NearestToPlayer, &ArenaConfig::default());
        assert_eq!(picked.len(), 1);
        assert!(picked[0].engaged);
        assert_eq!(picked[0].entity, c[1].entity);
    }

    #[test]
    fn test_too_close_is_ineligible() {
        let mut world = World::new();
        let c = candidates(&mut world, &[(170.0, 260.0, true), (160.0, 100.0, false)]);
        let picked = select_targets(&c, &player(), 3, TargetOrdering::NearestToPlayer, &ArenaConfig::default());
        assert!(picked.is_empty());
    }

    #[test]
    fn test_never_pads_or_repeats() {
        let mut world = World::new();
        let mut c = candidates(&mut world, &[(400.0, 260.0, false), (500.0, 260.0, false)]);
        c.push(c[0]);
        let picked = select_targets(&c, &player(), 5, TargetOrdering::NearestToPlayer, &ArenaConfig::default());
        assert_eq!(picked.len(), 2);
        assert_ne!(picked[0].entity, picked[1].entity);
    }

    #[test]
    fn test_barrier_ordering() {
        let mut world = World::new();
        // Closer to the player in Euclidean terms but further from the barrier.
        let c = candidates(&mut world, &[(340.0, 260.0, false), (300.0, 560.0, false)]);
        let by_player = select_targets(&c, &player(), 1, TargetOrdering::NearestToPlayer, &ArenaConfig::default());
        let by_barrier = select_targets(&c, &player(), 1, TargetOrdering::NearestToBarrier, &ArenaConfig::default());
        assert_eq!(by_player[0].entity, c[0].entity);
        assert_eq!(by_barrier[0].entity, c[1].entity);
    }
}
