//! Entity spawn factories for the match world.
//!
//! Creates enemies and projectiles with their component bundles. Enemies
//! carry `Enemy + Position + Velocity + Hitbox`, projectiles carry
//! `Projectile + Position + Velocity + Hitbox`.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use rampart_core::components::{Enemy, HitSet, Hitbox, Projectile};
use rampart_core::config::{SpawnConfig, TrainingConfig};
use rampart_core::constants::{ENEMY_HALF_SIZE, PROJECTILE_HALF_SIZE};
use rampart_core::types::{Position, Velocity};

/// Escalation multiplier after `step` difficulty steps.
pub fn escalation_multiplier(factor: f64, step: u32) -> f64 {
    factor.powi(step as i32)
}

/// Center x at which an enemy's left edge touches `line_right`.
pub fn engage_x(line_right: f64) -> f64 {
    line_right + ENEMY_HALF_SIZE
}

/// Spawn a scaled enemy at the right edge with a random lane and jittered
/// speed. `step` is the number of escalation steps taken so far.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &SpawnConfig,
    step: u32,
    stop_x: f64,
) -> Entity {
    let health = config.base_health * escalation_multiplier(config.health_scale, step);
    let scaled_speed = config.base_speed * escalation_multiplier(config.speed_scale, step);

    let y: f64 = rng.gen_range(config.spawn_y_min..=config.spawn_y_max);
    let jitter: f64 = rng.gen_range(-config.speed_jitter..=config.speed_jitter);
    let speed = scaled_speed * (1.0 + jitter);

    world.spawn((
        Enemy {
            health,
            max_health: health,
            scale_snapshot: escalation_multiplier(config.health_scale, step),
            assigned_speed: speed,
            engaged: false,
            damaged: false,
            stop_x,
        },
        Position::new(config.spawn_x, y),
        Velocity::new(-speed, 0.0),
        Hitbox::square(ENEMY_HALF_SIZE),
    ))
}

/// Spawn the unscaled practice dummy used in training mode.
pub fn spawn_training_enemy(
    world: &mut World,
    spawn: &SpawnConfig,
    training: &TrainingConfig,
) -> Entity {
    world.spawn((
        Enemy {
            health: spawn.base_health,
            max_health: spawn.base_health,
            scale_snapshot: 1.0,
            assigned_speed: spawn.base_speed,
            engaged: false,
            damaged: false,
            stop_x: training.stop_x,
        },
        Position::new(spawn.spawn_x, training.spawn_y),
        Velocity::new(-spawn.base_speed, 0.0),
        Hitbox::square(ENEMY_HALF_SIZE),
    ))
}

/// Spawn a projectile. Damage and pierce are captured here and do not
/// follow later level-ups.
pub fn spawn_projectile(
    world: &mut World,
    origin: Position,
    velocity: Velocity,
    damage: f64,
    pierce: u32,
) -> Entity {
    world.spawn((
        Projectile {
            damage,
            pierce,
            hits: 0,
            hit_set: HitSet::default(),
        },
        origin,
        velocity,
        Hitbox::square(PROJECTILE_HALF_SIZE),
    ))
}

/// Spawn a bare enemy at an exact position (for tests).
#[cfg(test)]
pub fn spawn_test_enemy(
    world: &mut World,
    position: Position,
    velocity: Velocity,
    health: f64,
    stop_x: f64,
) -> Entity {
    world.spawn((
        Enemy {
            health,
            max_health: health,
            scale_snapshot: 1.0,
            assigned_speed: velocity.speed(),
            engaged: false,
            damaged: false,
            stop_x,
        },
        position,
        velocity,
        Hitbox::square(ENEMY_HALF_SIZE),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_enemy_scaled_by_step() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = SpawnConfig {
            speed_jitter: 0.0,
            ..Default::default()
        };

        let e0 = spawn_enemy(&mut world, &mut rng, &config, 0, 300.0);
        let e2 = spawn_enemy(&mut world, &mut rng, &config, 2, 300.0);

        let first = (*world.get::<&Enemy>(e0).unwrap()).clone();
        let second = (*world.get::<&Enemy>(e2).unwrap()).clone();
        assert_eq!(first.health, 100.0);
        assert!((second.health - 144.0).abs() < 1e-9);
        assert!((second.assigned_speed - 52.5 * 1.44).abs() < 1e-9);
        assert!((second.scale_snapshot - 1.44).abs() < 1e-9);

        let vel = *world.get::<&Velocity>(e2).unwrap();
        assert!((vel.x + second.assigned_speed).abs() < 1e-12);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn test_spawn_lane_and_jitter_bounds() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let config = SpawnConfig::default();

        for _ in 0..200 {
            let e = spawn_enemy(&mut world, &mut rng, &config, 0, 300.0);
            let pos = *world.get::<&Position>(e).unwrap();
            let enemy = world.get::<&Enemy>(e).unwrap();
            assert_eq!(pos.x, config.spawn_x);
            assert!((config.spawn_y_min..=config.spawn_y_max).contains(&pos.y));
            assert!(enemy.assigned_speed >= 52.5 * 0.8 - 1e-9);
            assert!(enemy.assigned_speed <= 52.5 * 1.2 + 1e-9);
        }
    }

    #[test]
    fn test_training_enemy_is_unscaled() {
        let mut world = World::new();
        let e = spawn_training_enemy(
            &mut world,
            &SpawnConfig::default(),
            &TrainingConfig::default(),
        );
        let enemy = world.get::<&Enemy>(e).unwrap();
        assert_eq!(enemy.health, 100.0);
        assert_eq!(enemy.stop_x, 400.0);
        assert_eq!(world.get::<&Position>(e).unwrap().y, 300.0);
    }
}
