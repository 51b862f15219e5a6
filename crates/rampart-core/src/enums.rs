//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{BASE_PROJECTILE_SPEED, DIFFICULTY_SPAWN_MULTIPLIERS};
use crate::types::BaseStats;

/// Selectable player character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterId {
    /// Balanced single-shot hero.
    #[default]
    Archer,
    /// Fast, light shots that pierce one extra enemy.
    Ranger,
    /// Slow, heavy double shots.
    Mage,
}

impl CharacterId {
    pub const ALL: [CharacterId; 3] = [CharacterId::Archer, CharacterId::Ranger, CharacterId::Mage];

    /// Stable lowercase name, used for persistence keys and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            CharacterId::Archer => "archer",
            CharacterId::Ranger => "ranger",
            CharacterId::Mage => "mage",
        }
    }

    /// Level-1 stat table.
    pub fn base_stats(self) -> BaseStats {
        match self {
            CharacterId::Archer => BaseStats {
                attack: 25.0,
                fire_rate: 0.5,
                projectile_speed: BASE_PROJECTILE_SPEED,
                projectile_count: 1,
                pierce: 0,
            },
            CharacterId::Ranger => BaseStats {
                attack: 16.0,
                fire_rate: 0.8,
                projectile_speed: BASE_PROJECTILE_SPEED,
                projectile_count: 1,
                pierce: 1,
            },
            CharacterId::Mage => BaseStats {
                attack: 40.0,
                fire_rate: 0.35,
                projectile_speed: BASE_PROJECTILE_SPEED,
                projectile_count: 2,
                pierce: 0,
            },
        }
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharacterId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharacterId::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown character: {s}"))
    }
}

/// Outcome state of a match. Leaves `Playing` at most once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchState {
    #[default]
    Playing,
    Win,
    Lose,
}

impl MatchState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, MatchState::Playing)
    }
}

/// Top-level engine phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No match running; waiting for a character pick / start.
    #[default]
    CharacterSelect,
    Active,
    /// Timers and kinematics frozen (overlay open or explicit pause).
    Paused,
    /// Match reached Win or Lose.
    Finished,
}

/// What kind of match is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// Castle defense with countdown, escalation and castle damage.
    #[default]
    Defense,
    /// Single practice target; no countdown, no castle damage.
    Training,
}

/// Difficulty picked at match start. Only shortens the spawn interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Map a UI index onto a difficulty; out-of-range indices clamp to Hard.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Difficulty::Easy,
            1 => Difficulty::Normal,
            _ => Difficulty::Hard,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Divisor applied to the base spawn interval.
    pub fn spawn_multiplier(self) -> f64 {
        DIFFICULTY_SPAWN_MULTIPLIERS[self.index()]
    }
}

/// Secondary sort key for targets within the engaged / not-engaged partitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetOrdering {
    /// Ascending Euclidean distance to the player.
    #[default]
    NearestToPlayer,
    /// Ascending distance to the barrier line.
    NearestToBarrier,
}

/// How projectile speed evolves with level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ProjectileSpeedPolicy {
    /// Character base speed at every level.
    #[default]
    Constant,
    /// Base speed times `growth^(level-1)`.
    Scaled { growth: f64 },
}
