//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in systems, except for the
//! small membership helpers on `HitSet`.

use serde::{Deserialize, Serialize};

use crate::constants::HIT_SET_CAPACITY;

/// An advancing enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub health: f64,
    pub max_health: f64,
    /// Escalation multiplier in effect when this enemy spawned.
    pub scale_snapshot: f64,
    /// Advance speed assigned at spawn (px/s). Resumed motion never exceeds it.
    pub assigned_speed: f64,
    /// At the stop line and dealing periodic castle damage.
    pub engaged: bool,
    /// Took at least one non-lethal hit (visual tint).
    pub damaged: bool,
    /// X coordinate at which this enemy stops and engages.
    pub stop_x: f64,
}

/// A fired projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Damage captured from player attack at fire time.
    pub damage: f64,
    /// Extra enemies this projectile may hit after its first.
    pub pierce: u32,
    /// Hits registered so far.
    pub hits: u32,
    /// Enemies already hit, by entity id bits.
    pub hit_set: HitSet,
}

/// Fixed-capacity sorted set of entity ids.
///
/// Capacity bounds the pierce budget; stat scaling clamps pierce so a
/// projectile is destroyed before the set can fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitSet {
    ids: [u64; HIT_SET_CAPACITY],
    len: u8,
}

impl HitSet {
    pub fn contains(&self, id: u64) -> bool {
        self.as_slice().binary_search(&id).is_ok()
    }

    /// Insert `id`. Returns false if already present or the set is full.
    pub fn insert(&mut self, id: u64) -> bool {
        let len = self.len as usize;
        match self.ids[..len].binary_search(&id) {
            Ok(_) => false,
            Err(_) if len == HIT_SET_CAPACITY => false,
            Err(at) => {
                self.ids.copy_within(at..len, at + 1);
                self.ids[at] = id;
                self.len += 1;
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.ids[..self.len as usize]
    }
}

/// Axis-aligned hitbox half extents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hitbox {
    pub half_width: f64,
    pub half_height: f64,
}

impl Hitbox {
    pub fn square(half: f64) -> Self {
        Self {
            half_width: half,
            half_height: half,
        }
    }
}
