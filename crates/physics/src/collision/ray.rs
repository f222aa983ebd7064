//! Ray hits and the ray-cast query contract.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::flags::CollisionLayers;

/// Result of a ray cast that hit something.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Distance from the ray origin to the impact point.
    pub distance: f32,

    /// Surface normal at the impact point.
    ///
    /// Points away from the surface that was hit.
    pub normal: Vec2,

    /// World position of the impact point.
    pub point: Vec2,

    /// Layers of the brush that was hit.
    pub layers: CollisionLayers,

    /// Brush ID that was hit, -1 when the backend has no brush IDs.
    pub brush: i32,
}

impl RayHit {
    /// Create a hit against anonymous solid geometry.
    pub fn new(distance: f32, normal: Vec2, point: Vec2) -> Self {
        Self {
            distance,
            normal,
            point,
            layers: CollisionLayers::GROUND,
            brush: -1,
        }
    }

    /// Angle between the hit normal and world-up, in degrees.
    ///
    /// 0 is flat ground, 90 a vertical wall, 180 a flat ceiling.
    #[inline]
    pub fn slope_angle(&self) -> f32 {
        angle_from_up(self.normal)
    }
}

/// Angle in degrees between `normal` and `Vec2::Y`.
///
/// A zero normal reports 90 degrees, so it is never mistaken for ground.
pub fn angle_from_up(normal: Vec2) -> f32 {
    let n = normal.normalize_or_zero();
    n.dot(Vec2::Y).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Ray-cast query against static world geometry.
///
/// Implementations must return the *nearest* hit along the ray among
/// geometry whose layers intersect `mask`, or `None` when nothing lies within
/// `max_distance`. Results must be deterministic for a static world.
pub trait RayCaster {
    /// Cast a ray from `origin` along the unit vector `direction`.
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RayHit>;
}

impl<F> RayCaster for F
where
    F: Fn(Vec2, Vec2, f32, CollisionLayers) -> Option<RayHit>,
{
    #[inline]
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RayHit> {
        self(origin, direction, max_distance, mask)
    }
}
