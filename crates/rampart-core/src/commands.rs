//! Lifecycle commands sent from the presentation layer to the engine.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::CharacterId;

/// All possible UI actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchCommand {
    /// Pick the hero. Loads that character's persisted XP.
    SelectCharacter { character: CharacterId },
    /// Start a castle-defense match. Index 0 = Easy, 1 = Normal, 2+ = Hard.
    StartMatch { difficulty_index: usize },
    /// Start the single-target practice mode.
    StartTraining,
    /// Start a fresh match with the same character, mode and difficulty.
    RestartMatch,
    /// Freeze timers and kinematics (overlay opened).
    Pause,
    /// Resume from a pause with the exact delays that were pending.
    Resume,
}
