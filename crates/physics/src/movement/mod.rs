//! Character movement.
//!
//! This module implements a ray-cast kinematic platformer controller with:
//!
//! - Axis-separated collision resolution (horizontal, then vertical)
//! - Slope climbing, and sliding off slopes that are too steep
//! - Damped horizontal input response and gravity
//! - Jump tuning from height and time to apex
//!
//! # Design
//!
//! Movement is driven by the [`CharacterController2D`], which buffers input,
//! runs one fixed step at a time against any [`RayCaster`](crate::collision::RayCaster)
//! and writes the result to a [`KinematicBody`].

mod config;
mod controller;
mod integrator;
mod jump;
mod resolver;
mod state;

pub use config::ControllerConfig;
pub use controller::{CharacterController2D, KinematicBody};
pub use integrator::MotionIntegrator;
pub use jump::{gravity_for_jump, jump_velocity_for, JumpProfile, JumpTrigger};
pub use resolver::CollisionResolver;
pub use state::{CollisionState, StepInput, StepOutcome};
