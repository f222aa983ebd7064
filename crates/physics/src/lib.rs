//! Kinematic 2D Character Physics
//!
//! A ray-cast character controller for platformers. An axis-aligned box is
//! moved through static geometry one fixed step at a time; motion is clamped
//! by fans of rays so the body never tunnels, whatever its speed.
//!
//! # Architecture
//!
//! The crate is split into two main systems:
//!
//! - **Collision**: Casts rays into the world and reports the nearest hit
//! - **Movement**: Uses those rays to resolve the body's motion each step
//!
//! Everything is synchronous and deterministic for a static world: the same
//! inputs and timestep always produce the same positions.

pub mod collision;
pub mod error;
pub mod movement;

// Re-export commonly used types
pub use collision::{CollisionLayers, CollisionWorld, RayCaster, RayHit};
pub use error::{ConfigError, ControllerError};
pub use movement::{
    CharacterController2D, CollisionState, ControllerConfig, JumpProfile, JumpTrigger,
    KinematicBody, StepInput, StepOutcome,
};
