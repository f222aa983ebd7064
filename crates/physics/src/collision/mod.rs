//! Collision queries for kinematic movement.
//!
//! The character controller only ever asks one question of the world: what is
//! the nearest solid surface along this ray? This module defines that
//! contract and a reference implementation.
//!
//! # Key Types
//!
//! - [`RayCaster`]: The query contract consumed by the controller
//! - [`CollisionWorld`]: Static level geometry backed by parry2d
//! - [`RayHit`]: Distance, normal and point of the nearest hit
//! - [`Bounds`] / [`RayFan`]: The body's box and how rays are laid out on it

mod bounds;
mod flags;
mod ray;
mod world;

pub use bounds::{Bounds, RayFan};
pub use flags::CollisionLayers;
pub use ray::{angle_from_up, RayCaster, RayHit};
pub use world::{CollisionBrush, CollisionWorld};
