//! Events emitted by the simulation for UI and audio feedback.
//!
//! Entity ids are hecs entity bits, stable for the lifetime of the entity.

use serde::{Deserialize, Serialize};

use crate::enums::{CharacterId, MatchState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchEvent {
    EnemySpawned {
        enemy_id: u64,
        health: f64,
        speed: f64,
    },
    ProjectileFired {
        target_id: u64,
        /// Aim angle in radians (0 = +x).
        angle: f64,
        /// Predicted seconds until impact.
        intercept_secs: f64,
    },
    EnemyDamaged { enemy_id: u64, health: f64 },
    EnemyKilled { enemy_id: u64, xp_awarded: u64 },
    /// Enemy reached the stop line and started hitting the castle.
    EnemyEngaged { enemy_id: u64 },
    LevelUp { character: CharacterId, level: u32 },
    CastleDamaged { health: i32 },
    DifficultyRaised { step: u32, multiplier: f64 },
    XpMultiplierRaised { multiplier: f64 },
    CrowdHalted { count: usize },
    CrowdResumed { count: usize },
    /// Terminal transition. The UI shows the outcome and offers restart.
    MatchEnded { outcome: MatchState },
}
