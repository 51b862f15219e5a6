//! ECS systems that operate on the match world.
//!
//! Systems are free functions that take `&mut World` (or `&World` for
//! read-only work) plus whatever tuning they need. They do not own state:
//! entity state lives in components, match state lives in the engine.

pub mod castle;
pub mod cleanup;
pub mod collision;
pub mod combat;
pub mod crowd;
pub mod movement;
pub mod snapshot;
pub mod spawner;
pub mod targeting;
