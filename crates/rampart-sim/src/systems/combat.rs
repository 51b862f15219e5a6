//! Combat resolution for projectile/enemy contacts.
//!
//! Each (projectile, enemy) pair registers at most one hit: the projectile's
//! `HitSet` remembers every enemy it has damaged. Match-level consequences
//! of a kill (XP, cancelling the enemy's castle damage timer) are applied by
//! the engine from the returned outcome.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, Projectile};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    /// Stale entity, not a projectile/enemy pair, or pair already hit.
    Ignored,
    Hit {
        /// Enemy health after the hit.
        enemy_health: f64,
        killed: bool,
        /// Pierce budget exhausted; the projectile was removed.
        projectile_spent: bool,
    },
}

/// XP granted for one kill under the current match multiplier.
pub fn xp_for_kill(xp_per_kill: f64, multiplier: f64) -> u64 {
    (xp_per_kill * multiplier).round().max(0.0) as u64
}

/// Apply one projectile hit to an enemy.
pub fn resolve_contact(world: &mut World, projectile: Entity, enemy: Entity) -> ContactOutcome {
    if projectile == enemy || world.get::<&Enemy>(enemy).is_err() {
        return ContactOutcome::Ignored;
    }

    let (damage, projectile_spent) = {
        let Ok(mut proj) = world.get::<&mut Projectile>(projectile) else {
            return ContactOutcome::Ignored;
        };
        if !proj.hit_set.insert(enemy.to_bits().get()) {
            return ContactOutcome::Ignored;
        }
        proj.hits += 1;
        (proj.damage, proj.hits > proj.pierce)
    };

    let (enemy_health, killed) = {
        let Ok(mut target) = world.get::<&mut Enemy>(enemy) else {
            return ContactOutcome::Ignored;
        };
        target.health -= damage;
        let killed = target.health <= 0.0;
        if !killed && target.health < target.max_health {
            target.damaged = true;
        }
        (target.health, killed)
    };

    if killed {
        let _ = world.despawn(enemy);
    }
    if projectile_spent {
        let _ = world.despawn(projectile);
    }

    ContactOutcome::Hit {
        enemy_health,
        killed,
        projectile_spent,
    }
}
