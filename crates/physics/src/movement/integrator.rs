//! Velocity integration and the per-step move.

use glam::Vec2;

use crate::collision::{Bounds, RayCaster, RayFan};

use super::config::ControllerConfig;
use super::controller::KinematicBody;
use super::resolver::CollisionResolver;
use super::state::{CollisionState, StepInput, StepOutcome};

/// Owns the body's velocity and last collision state.
///
/// Velocity persists across steps and is re-derived from the displacement
/// that was actually applied, so a blocked body does not keep momentum into
/// the obstacle.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionIntegrator {
    velocity: Vec2,
    collisions: CollisionState,
}

impl MotionIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn collisions(&self) -> CollisionState {
        self.collisions
    }

    /// Start the vertical take-off. No grounding check.
    pub fn jump(&mut self, config: &ControllerConfig) {
        self.velocity.y = config.jump_velocity;
    }

    /// Drop all motion and adopt `collisions` as the last step's result.
    pub fn reset_to(&mut self, collisions: CollisionState) {
        self.velocity = Vec2::ZERO;
        self.collisions = collisions;
    }

    /// Apply input smoothing, jump and gravity for one step.
    pub fn update_velocity(&mut self, input: &StepInput, config: &ControllerConfig, delta_time: f32) {
        let target = input.movement.x.clamp(-1.0, 1.0) * config.move_speed;
        if config.smoothing_time > 0.0 {
            let blend = 1.0 - (-delta_time / config.smoothing_time).exp();
            self.velocity.x += (target - self.velocity.x) * blend;
        } else {
            self.velocity.x = target;
        }

        if input.jump {
            self.jump(config);
        } else if self.collisions.is_grounded() {
            // Standing: fall speed never accumulates
            self.velocity.y = 0.0;
        }

        self.velocity.y += config.gravity * delta_time;
    }

    /// Move the body by `velocity * dt`, resolved against the world.
    ///
    /// Displacements shorter than the configured minimum are dropped without
    /// casting; the previous collision state then carries over.
    pub fn advance<C, B>(
        &mut self,
        config: &ControllerConfig,
        fan: RayFan,
        caster: &C,
        body: &mut B,
        delta_time: f32,
    ) -> StepOutcome
    where
        C: RayCaster + ?Sized,
        B: KinematicBody + ?Sized,
    {
        let position = body.position();
        let displacement = self.velocity * delta_time;

        if displacement.length() < config.min_move_distance {
            log::trace!(
                "skipping step: displacement {:.5} below {:.5}",
                displacement.length(),
                config.min_move_distance
            );
            return StepOutcome {
                position,
                displacement: Vec2::ZERO,
                collisions: self.collisions,
                resolved: false,
            };
        }

        self.collisions.reset();

        let bounds = Bounds::from_center(position, config.half_extents);
        let resolver = CollisionResolver::new(caster, config, fan, bounds, delta_time);
        let corrected = resolver.resolve(displacement, &mut self.velocity, &mut self.collisions);

        let new_position = position + corrected;
        self.velocity = corrected / delta_time;
        body.move_position(new_position);

        StepOutcome {
            position: new_position,
            displacement: corrected,
            collisions: self.collisions,
            resolved: true,
        }
    }
}
