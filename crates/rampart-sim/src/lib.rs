//! Simulation engine for RAMPART.
//!
//! Owns the hecs ECS world and the match scheduler, runs the combat and
//! progression systems, and produces `MatchSnapshot`s for the presentation
//! layer.

pub mod engine;
pub mod guidance;
pub mod persistence;
pub mod player;
pub mod progression;
pub mod scheduler;
pub mod stats;
pub mod systems;
pub mod world_setup;

pub use engine::{MatchEngine, SimConfig};
pub use rampart_core as core;
