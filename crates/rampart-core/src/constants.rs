//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind `config::MatchConfig`; a match reads its
//! tuning from the config, never from here directly.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Milliseconds per tick.
pub const DT_MS: f64 = 1000.0 / TICK_RATE as f64;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena ---

pub const ARENA_WIDTH: f64 = 800.0;
pub const ARENA_HEIGHT: f64 = 600.0;

/// Distance past the arena edge before an entity is culled.
pub const CULL_MARGIN: f64 = 50.0;

/// Player (shooter) position. The player never moves.
pub const PLAYER_X: f64 = 150.0;
pub const PLAYER_Y: f64 = 260.0;

/// Projectiles leave from this offset ahead of the player.
pub const MUZZLE_OFFSET_X: f64 = 50.0;

/// Enemies closer than this (along x) to the player are never targeted.
pub const MIN_FORWARD_OFFSET: f64 = 20.0;

/// Stop line (barrier) center and width.
pub const STOP_LINE_X: f64 = 267.0;
pub const STOP_LINE_WIDTH: f64 = 40.0;

/// Half extents of the enemy and projectile hitboxes.
pub const ENEMY_HALF_SIZE: f64 = 14.0;
pub const PROJECTILE_HALF_SIZE: f64 = 12.0;

// --- Player progression ---

/// Base XP required to go from level 1 to level 2.
pub const XP_BASE: f64 = 100.0;

/// Per-level growth of the XP requirement.
pub const XP_GROWTH: f64 = 1.5;

pub const MAX_LEVEL: u32 = 10;

/// Attack and fire rate grow by this factor per level.
pub const STAT_GROWTH: f64 = 1.10;

/// Projectile count and pierce gain +1 every this many levels.
pub const LEVELS_PER_BONUS: u32 = 5;

/// Base projectile travel speed (px/s).
pub const BASE_PROJECTILE_SPEED: f64 = 201.6;

/// Per-level projectile speed growth when speed scaling is enabled.
pub const PROJECTILE_SPEED_GROWTH: f64 = 1.05;

/// XP awarded per kill before the match multiplier.
pub const XP_PER_KILL: f64 = 50.0;

/// Added to the XP multiplier on every XP-escalation tick.
pub const XP_MULTIPLIER_STEP: f64 = 0.25;

pub const XP_MULTIPLIER_INTERVAL_MS: f64 = 30_000.0;

/// Maximum number of distinct enemies one projectile can remember hitting.
pub const HIT_SET_CAPACITY: usize = 16;

// --- Enemies ---

pub const ENEMY_SPAWN_X: f64 = 850.0;
pub const ENEMY_SPAWN_Y_MIN: f64 = 100.0;
pub const ENEMY_SPAWN_Y_MAX: f64 = 500.0;

pub const ENEMY_BASE_HEALTH: f64 = 100.0;

/// Base advance speed (px/s, toward -x).
pub const ENEMY_BASE_SPEED: f64 = 52.5;

/// Per-step growth of enemy health and speed.
pub const ENEMY_HEALTH_SCALE: f64 = 1.2;
pub const ENEMY_SPEED_SCALE: f64 = 1.2;

/// Uniform speed jitter as a fraction of the scaled speed (+/-).
pub const ENEMY_SPEED_JITTER: f64 = 0.2;

pub const MAX_ACTIVE_ENEMIES: usize = 40;

pub const SPAWN_INTERVAL_MS: f64 = 3_300.0;

/// Enemy scaling step interval.
pub const DIFFICULTY_INTERVAL_MS: f64 = 15_000.0;

/// Spawn interval divisors for the difficulty picker (Easy, Normal, Hard).
pub const DIFFICULTY_SPAWN_MULTIPLIERS: [f64; 3] = [1.0, 1.25, 1.5];

// --- Castle ---

pub const CASTLE_MAX_HEALTH: i32 = 100;

/// Damage each engaged enemy deals per damage tick.
pub const CASTLE_DAMAGE_PER_TICK: i32 = 10;

pub const CASTLE_DAMAGE_INTERVAL_MS: f64 = 1_000.0;

pub const MATCH_DURATION_SECS: u32 = 60;

pub const COUNTDOWN_INTERVAL_MS: f64 = 1_000.0;

// --- Barrier crowd control ---

pub const CROWD_THRESHOLD: usize = 10;

pub const CROWD_CHECK_INTERVAL_MS: f64 = 250.0;

/// Depth of the crowd zone beyond the stop line's right edge.
pub const CROWD_ZONE_DEPTH: f64 = 120.0;

/// Velocities below this magnitude count as stopped.
pub const STOPPED_SPEED_EPSILON: f64 = 1e-3;

// --- Training ---

pub const TRAINING_SPAWN_Y: f64 = 300.0;
pub const TRAINING_STOP_X: f64 = 400.0;
pub const TRAINING_SPAWN_INTERVAL_MS: f64 = 1_000.0;
