//! Controller configuration.
//!
//! All tuning parameters are grouped here. Values are in world units and
//! seconds; angles are in degrees.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::CollisionLayers;
use crate::error::ConfigError;

use super::jump::JumpProfile;

/// Configuration for the kinematic character controller.
///
/// Every field has a default, so a partial config file deserializes into a
/// usable controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // ========================================================================
    // Body
    // ========================================================================
    /// Half-size of the body's box collider.
    pub half_extents: Vec2,

    /// Clearance kept between the box and any surface.
    pub skin_width: f32,

    /// Layers the movement rays collide with.
    pub collision_mask: CollisionLayers,

    /// Rays per sweep axis (at least 2).
    pub ray_count: usize,

    // ========================================================================
    // Slopes
    // ========================================================================
    /// Steepest climbable slope, measured from world-up. Inclusive.
    pub max_slope_angle: f32,

    /// Climb and slide on slopes. When off, every surface is either flat
    /// ground or a wall.
    pub slope_handling: bool,

    // ========================================================================
    // Motion
    // ========================================================================
    /// Gravity acceleration (negative = down).
    pub gravity: f32,

    /// Vertical take-off velocity applied by a jump.
    pub jump_velocity: f32,

    /// Horizontal speed at full input.
    pub move_speed: f32,

    /// Time constant of the horizontal velocity smoothing (seconds).
    /// Zero snaps straight to the target.
    pub smoothing_time: f32,

    /// Displacements shorter than this are not resolved at all.
    pub min_move_distance: f32,

    /// How far below a spawn point ground is searched for.
    pub spawn_ground_distance: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        let jump = JumpProfile::default();

        Self {
            // Body
            half_extents: Vec2::new(0.5, 0.5),
            skin_width: 0.01,
            collision_mask: CollisionLayers::MASK_CHARACTER_SOLID,
            ray_count: 4,

            // Slopes
            max_slope_angle: 45.0,
            slope_handling: true,

            // Motion
            gravity: jump.gravity(),
            jump_velocity: jump.jump_velocity(),
            move_speed: 5.0,
            smoothing_time: 0.05,
            min_move_distance: 0.001,
            spawn_ground_distance: 2.0,
        }
    }
}

impl ControllerConfig {
    /// Replace gravity and jump velocity with the ones derived from `profile`.
    pub fn with_jump_profile(self, profile: JumpProfile) -> Result<Self, ConfigError> {
        profile.validate()?;
        Ok(Self {
            gravity: profile.gravity(),
            jump_velocity: profile.jump_velocity(),
            ..self
        })
    }

    /// The reduced controller: no slope climbing or sliding.
    pub fn without_slopes(self) -> Self {
        Self {
            slope_handling: false,
            ..self
        }
    }

    /// Check that the configuration describes non-degenerate geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("half_extents", self.half_extents.is_finite()),
            ("skin_width", self.skin_width.is_finite()),
            ("max_slope_angle", self.max_slope_angle.is_finite()),
            ("gravity", self.gravity.is_finite()),
            ("jump_velocity", self.jump_velocity.is_finite()),
            ("move_speed", self.move_speed.is_finite()),
            ("smoothing_time", self.smoothing_time.is_finite()),
            ("min_move_distance", self.min_move_distance.is_finite()),
            ("spawn_ground_distance", self.spawn_ground_distance.is_finite()),
        ];
        if let Some(&(name, _)) = finite.iter().find(|(_, ok)| !*ok) {
            return Err(ConfigError::NotFinite { name });
        }

        if self.half_extents.x <= 0.0 || self.half_extents.y <= 0.0 {
            return Err(ConfigError::NonPositiveHalfExtents(
                self.half_extents.x,
                self.half_extents.y,
            ));
        }
        if self.skin_width <= 0.0 {
            return Err(ConfigError::NonPositiveSkinWidth(self.skin_width));
        }
        let smallest = self.half_extents.min_element();
        if self.skin_width >= smallest {
            return Err(ConfigError::SkinWidthTooLarge {
                skin_width: self.skin_width,
                half_extent: smallest,
            });
        }
        if self.ray_count < 2 {
            return Err(ConfigError::TooFewRays(self.ray_count));
        }
        if self.max_slope_angle <= 0.0 || self.max_slope_angle >= 90.0 {
            return Err(ConfigError::SlopeAngleOutOfRange(self.max_slope_angle));
        }
        // Zero gravity is allowed; an upward pull is not
        if self.gravity > 0.0 {
            return Err(ConfigError::UpwardGravity(self.gravity));
        }
        if self.jump_velocity < 0.0 {
            return Err(ConfigError::NegativeJumpVelocity(self.jump_velocity));
        }
        if self.smoothing_time < 0.0 {
            return Err(ConfigError::NegativeSmoothingTime(self.smoothing_time));
        }
        if self.min_move_distance < 0.0 {
            return Err(ConfigError::NegativeMinMoveDistance(self.min_move_distance));
        }

        Ok(())
    }
}
