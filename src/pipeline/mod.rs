//! Structures that run a whole simulation tick, from candidate gathering to
//! collision resolution and flipper integration.

pub use self::broad_phase::{BroadPhase, BruteForceBroadPhase};
pub use self::physics_pipeline::PhysicsPipeline;

mod broad_phase;
mod physics_pipeline;
