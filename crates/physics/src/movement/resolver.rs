//! Axis-separated collision resolution.
//!
//! A proposed displacement is corrected in two passes. The horizontal pass
//! fans rays out of the leading side of the box and clamps `dx`; the vertical
//! pass fans rays out of the leading top/bottom edge, shifted by the already
//! corrected `dx`, and clamps `dy`. Each hit shortens the rays that follow it,
//! so the nearest obstruction in a fan always wins.
//!
//! Slopes are handled inline:
//!
//! - A walkable slope in front of the bottom ray converts horizontal motion
//!   into climbing.
//! - Ground below that is steeper than the climb limit makes the body slide
//!   instead of standing on it.

use glam::Vec2;

use crate::collision::{angle_from_up, Bounds, RayCaster, RayFan, RayHit};

use super::config::ControllerConfig;
use super::state::CollisionState;

/// Slope angles within this many degrees of the limit count as the limit.
const SLOPE_ANGLE_EPSILON: f32 = 1e-3;

/// Resolves one step's displacement against the world.
///
/// Built fresh for every step from the body's current bounds.
pub struct CollisionResolver<'a, C: RayCaster + ?Sized> {
    caster: &'a C,
    config: &'a ControllerConfig,
    fan: RayFan,
    bounds: Bounds,
    delta_time: f32,
}

impl<'a, C: RayCaster + ?Sized> CollisionResolver<'a, C> {
    pub fn new(
        caster: &'a C,
        config: &'a ControllerConfig,
        fan: RayFan,
        bounds: Bounds,
        delta_time: f32,
    ) -> Self {
        Self {
            caster,
            config,
            fan,
            bounds,
            delta_time,
        }
    }

    /// Correct `displacement` so the box does not pass through geometry.
    ///
    /// `velocity.y` may be rewritten to match ground contact or a slide.
    /// Contacts are recorded in `collisions`, which the caller resets.
    pub fn resolve(
        &self,
        displacement: Vec2,
        velocity: &mut Vec2,
        collisions: &mut CollisionState,
    ) -> Vec2 {
        let mut displacement = displacement;

        self.horizontal_collisions(&mut displacement, collisions);
        self.vertical_collisions(&mut displacement, velocity, collisions);

        if collisions.slope_angle != collisions.slope_angle_old {
            log::debug!(
                "slope angle changed: {:.1} -> {:.1} (climbing={} sliding={})",
                collisions.slope_angle_old,
                collisions.slope_angle,
                collisions.climbing_slope,
                collisions.sliding_down_slope,
            );
        }

        displacement
    }

    // ========================================================================
    // Horizontal Pass
    // ========================================================================

    fn horizontal_collisions(&self, displacement: &mut Vec2, collisions: &mut CollisionState) {
        if displacement.x == 0.0 {
            return;
        }

        let skin = self.config.skin_width;
        let direction_x = displacement.x.signum();
        let mut ray_length = displacement.x.abs() + skin;

        let corner = if direction_x < 0.0 {
            self.bounds.bottom_left()
        } else {
            self.bounds.bottom_right()
        };
        let ray_direction = Vec2::new(direction_x, 0.0);

        for i in 0..self.fan.count {
            let origin = corner + Vec2::Y * (i as f32 * self.fan.horizontal_spacing);
            let Some(hit) = self.cast(origin, ray_direction, ray_length) else {
                continue;
            };

            let slope_angle = hit.slope_angle();
            let climbable = self.is_climbable(slope_angle);

            if i == 0 && climbable {
                // Walk up to the foot of a new slope before climbing it
                let mut distance_to_slope_start = 0.0;
                if slope_angle != collisions.slope_angle_old {
                    distance_to_slope_start = hit.distance - skin;
                    displacement.x -= distance_to_slope_start * direction_x;
                }
                climb_slope(displacement, slope_angle, hit.normal, collisions);
                displacement.x += distance_to_slope_start * direction_x;
            }

            if !collisions.climbing_slope || !climbable {
                displacement.x = (hit.distance - skin) * direction_x;
                ray_length = hit.distance;

                // Blocked mid-climb: stay on the slope surface
                if collisions.climbing_slope {
                    displacement.y =
                        collisions.slope_angle.to_radians().tan() * displacement.x.abs();
                }

                if direction_x < 0.0 {
                    collisions.left = true;
                } else {
                    collisions.right = true;
                }
            }
        }

        let ray_length = ray_length.min(displacement.x.abs() + skin);
        log::trace!(
            "horizontal pass: dx={:.4} reach={:.4} left={} right={}",
            displacement.x,
            ray_length,
            collisions.left,
            collisions.right,
        );
    }

    // ========================================================================
    // Vertical Pass
    // ========================================================================

    fn vertical_collisions(
        &self,
        displacement: &mut Vec2,
        velocity: &mut Vec2,
        collisions: &mut CollisionState,
    ) {
        if displacement.y == 0.0 {
            return;
        }

        let skin = self.config.skin_width;
        let direction_y = displacement.y.signum();
        let descending = direction_y < 0.0;
        let mut ray_length = displacement.y.abs() + skin;
        let move_distance = displacement.x.abs();

        let corner = if descending {
            self.bounds.bottom_left()
        } else {
            self.bounds.top_left()
        };
        let ray_direction = Vec2::new(0.0, direction_y);

        for i in 0..self.fan.count {
            let offset = i as f32 * self.fan.vertical_spacing + displacement.x;
            let origin = corner + Vec2::X * offset;
            let Some(hit) = self.cast(origin, ray_direction, ray_length) else {
                continue;
            };

            let slope_angle = hit.slope_angle();

            if descending && self.is_too_steep(slope_angle) {
                let descend_speed = slope_angle.to_radians().sin() * move_distance;
                if velocity.y <= descend_speed {
                    *displacement = hit.normal * move_distance;
                    velocity.y = descend_speed;
                    collisions.below = true;
                    collisions.sliding_down_slope = true;
                    collisions.slope_angle = slope_angle;
                    collisions.slope_normal = hit.normal;
                    continue;
                }
            }

            displacement.y = (hit.distance - skin) * direction_y;
            ray_length = hit.distance;

            if descending {
                // Ground inside the skin never lifts the body
                displacement.y = displacement.y.min(0.0);
                collisions.below = true;
                velocity.y = displacement.y / self.delta_time;
            } else {
                collisions.above = true;

                // Ceiling above a slope: only climb as far as the headroom allows
                if collisions.climbing_slope {
                    let tan = collisions.slope_angle.to_radians().tan();
                    if tan > f32::EPSILON {
                        displacement.x = displacement.y / tan * displacement.x.signum();
                    }
                }
            }
        }

        if collisions.sliding_down_slope {
            self.slide_down_slope(displacement, velocity, collisions);
        }

        let ray_length = ray_length.min(displacement.y.abs() + skin);
        log::trace!(
            "vertical pass: dy={:.4} reach={:.4} above={} below={}",
            displacement.y,
            ray_length,
            collisions.above,
            collisions.below,
        );
    }

    /// Keep a body on a too-steep slope moving downhill.
    fn slide_down_slope(
        &self,
        displacement: &mut Vec2,
        velocity: &mut Vec2,
        collisions: &mut CollisionState,
    ) {
        // The snap along the normal already points dx downhill
        let slope_angle = angle_from_up(collisions.slope_normal);
        let move_distance = displacement.x.abs();
        let descend_speed = slope_angle.to_radians().sin() * move_distance;

        displacement.y -= descend_speed * self.delta_time;
        velocity.y = -descend_speed;

        collisions.slope_angle = slope_angle;
        collisions.descending_slope = true;
        collisions.below = true;
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    #[inline]
    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit> {
        self.caster
            .cast(origin, direction, max_distance, self.config.collision_mask)
    }

    #[inline]
    fn is_climbable(&self, slope_angle: f32) -> bool {
        self.config.slope_handling
            && slope_angle <= self.config.max_slope_angle + SLOPE_ANGLE_EPSILON
    }

    #[inline]
    fn is_too_steep(&self, slope_angle: f32) -> bool {
        self.config.slope_handling
            && slope_angle > self.config.max_slope_angle + SLOPE_ANGLE_EPSILON
    }
}

/// Convert horizontal motion into motion along a walkable slope.
///
/// Skipped when the body is already rising faster than the slope would lift
/// it (e.g. mid-jump).
fn climb_slope(
    displacement: &mut Vec2,
    slope_angle: f32,
    slope_normal: Vec2,
    collisions: &mut CollisionState,
) {
    let move_distance = displacement.x.abs();
    let (sin, cos) = slope_angle.to_radians().sin_cos();
    let climb_y = sin * move_distance;

    if displacement.y <= climb_y {
        displacement.y = climb_y;
        displacement.x = cos * move_distance * displacement.x.signum();
        collisions.below = true;
        collisions.climbing_slope = true;
        collisions.slope_angle = slope_angle;
        collisions.slope_normal = slope_normal;
    }
}

// ============================================================================
// Tests
// ============================================================================
