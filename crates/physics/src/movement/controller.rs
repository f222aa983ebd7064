//! Character controller.
//!
//! This is the main entry point for character movement. It buffers input,
//! runs the integrator once per fixed step and exposes the resulting
//! collision state.

use glam::Vec2;

use crate::collision::{Bounds, RayCaster, RayFan, RayHit};
use crate::error::ControllerError;

use super::config::ControllerConfig;
use super::integrator::MotionIntegrator;
use super::state::{CollisionState, StepInput, StepOutcome};

/// The transform the controller moves.
///
/// `position` is the centre of the body's box.
pub trait KinematicBody {
    fn position(&self) -> Vec2;
    fn move_position(&mut self, position: Vec2);
}

impl KinematicBody for Vec2 {
    #[inline]
    fn position(&self) -> Vec2 {
        *self
    }

    #[inline]
    fn move_position(&mut self, position: Vec2) {
        *self = position;
    }
}

/// 2D kinematic character controller.
///
/// Moves an axis-aligned box through static geometry using ray fans, with
/// slope climbing and sliding when enabled.
///
/// # Example
///
/// ```ignore
/// let mut controller = CharacterController2D::new(ControllerConfig::default())?;
/// let mut body = Vec2::new(0.0, 5.0);
/// controller.spawn_at(body, &world, &mut body);
///
/// // Each fixed tick:
/// controller.set_velocity_input(Vec2::new(stick_x, 0.0));
/// if jump_pressed && controller.collision_state().is_grounded() {
///     controller.jump();
/// }
/// controller.fixed_step(1.0 / 60.0, &world, &mut body)?;
/// ```
#[derive(Debug, Clone)]
pub struct CharacterController2D {
    config: ControllerConfig,
    fan: RayFan,
    integrator: MotionIntegrator,
    /// Input for the next `fixed_step`.
    pending: StepInput,
}

impl CharacterController2D {
    /// Create a controller, rejecting degenerate configurations.
    pub fn new(config: ControllerConfig) -> Result<Self, ControllerError> {
        config.validate()?;
        let fan = RayFan::new(config.ray_count, config.half_extents)?;

        log::debug!(
            "controller created: half_extents={:?} rays={} slopes={}",
            config.half_extents,
            fan.count,
            config.slope_handling
        );

        Ok(Self {
            config,
            fan,
            integrator: MotionIntegrator::new(),
            pending: StepInput::default(),
        })
    }

    #[inline]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Collision state of the most recent step.
    #[inline]
    pub fn collision_state(&self) -> CollisionState {
        self.integrator.collisions()
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.integrator.velocity()
    }

    /// Set the movement input used by subsequent steps.
    pub fn set_velocity_input(&mut self, input: Vec2) {
        self.pending.movement = input;
    }

    /// Launch upward with the configured jump velocity.
    ///
    /// Not gated on grounding; callers decide when a jump is allowed.
    pub fn jump(&mut self) {
        if !self.collision_state().is_grounded() {
            log::debug!("jump requested while airborne");
        }
        self.integrator.jump(&self.config);
        self.pending.jump = true;
    }

    /// Advance one fixed step with the buffered input.
    ///
    /// A pending jump is consumed; the movement input is kept.
    pub fn fixed_step<C, B>(
        &mut self,
        delta_time: f32,
        caster: &C,
        body: &mut B,
    ) -> Result<StepOutcome, ControllerError>
    where
        C: RayCaster + ?Sized,
        B: KinematicBody + ?Sized,
    {
        check_timestep(delta_time)?;

        let input = self.pending;
        self.pending.jump = false;
        self.step(input, delta_time, caster, body)
    }

    /// Advance one fixed step with an explicit input snapshot.
    pub fn step<C, B>(
        &mut self,
        input: StepInput,
        delta_time: f32,
        caster: &C,
        body: &mut B,
    ) -> Result<StepOutcome, ControllerError>
    where
        C: RayCaster + ?Sized,
        B: KinematicBody + ?Sized,
    {
        check_timestep(delta_time)?;

        self.integrator
            .update_velocity(&input, &self.config, delta_time);
        Ok(self
            .integrator
            .advance(&self.config, self.fan, caster, body, delta_time))
    }

    /// Place the body at `spawn`, dropped onto the ground below if any.
    ///
    /// Casts `spawn_ground_distance` below the box. On a hit the body rests a
    /// skin width above the nearest surface and starts grounded; otherwise it
    /// stays at `spawn` and starts airborne. Velocity and pending input are
    /// cleared either way.
    pub fn spawn_at<C, B>(&mut self, spawn: Vec2, caster: &C, body: &mut B) -> CollisionState
    where
        C: RayCaster + ?Sized,
        B: KinematicBody + ?Sized,
    {
        self.pending = StepInput::default();

        match self.find_ground(spawn, caster) {
            Some(hit) => {
                let position = spawn - Vec2::Y * (hit.distance - self.config.skin_width);
                body.move_position(position);

                self.integrator.reset_to(CollisionState {
                    below: true,
                    slope_angle: hit.slope_angle(),
                    slope_normal: hit.normal,
                    ..Default::default()
                });

                log::debug!(
                    "spawned on ground at {:?} (slope {:.1})",
                    position,
                    hit.slope_angle()
                );
            }
            None => {
                body.move_position(spawn);
                self.integrator.reset_to(CollisionState::default());
                log::debug!("no ground below spawn {:?}, starting airborne", spawn);
            }
        }

        self.collision_state()
    }

    fn find_ground<C: RayCaster + ?Sized>(&self, spawn: Vec2, caster: &C) -> Option<RayHit> {
        let bounds = Bounds::from_center(spawn, self.config.half_extents);
        let max_distance = self.config.spawn_ground_distance + self.config.skin_width;

        (0..self.fan.count)
            .filter_map(|i| {
                let origin =
                    bounds.bottom_left() + Vec2::X * (i as f32 * self.fan.vertical_spacing);
                caster.cast(origin, -Vec2::Y, max_distance, self.config.collision_mask)
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

fn check_timestep(delta_time: f32) -> Result<(), ControllerError> {
    if delta_time > 0.0 && delta_time.is_finite() {
        Ok(())
    } else {
        Err(ControllerError::InvalidTimestep(delta_time))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CollisionLayers, CollisionWorld};
    use crate::error::ConfigError;
    use std::cell::Cell;

    const DT: f32 = 0.02;

    fn controller(config: ControllerConfig) -> CharacterController2D {
        CharacterController2D::new(config).unwrap()
    }

    /// Gravity and dt of the reference scenarios, input applied instantly.
    fn scenario_config() -> ControllerConfig {
        ControllerConfig {
            gravity: -20.0,
            smoothing_time: 0.0,
            ..Default::default()
        }
    }

    fn floor_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();

        // Floor, top surface at y=0
        world.add_box(
            Vec2::new(0.0, -0.5),
            Vec2::new(100.0, 0.5),
            CollisionLayers::GROUND,
        );

        world
    }

    fn nothing(_: Vec2, _: Vec2, _: f32, _: CollisionLayers) -> Option<RayHit> {
        None
    }

    // ========================================================================
    // Construction and errors
    // ========================================================================

    #[test]
    fn test_rejects_invalid_config() {
        let result = CharacterController2D::new(ControllerConfig {
            ray_count: 1,
            ..Default::default()
        });
        assert_eq!(
            result.unwrap_err(),
            ControllerError::Config(ConfigError::TooFewRays(1))
        );

        let result = CharacterController2D::new(ControllerConfig {
            skin_width: -0.01,
            ..Default::default()
        });
        assert!(matches!(
            result,
            Err(ControllerError::Config(ConfigError::NonPositiveSkinWidth(_)))
        ));

        let result = CharacterController2D::new(ControllerConfig {
            gravity: 20.0,
            ..Default::default()
        });
        assert!(matches!(
            result,
            Err(ControllerError::Config(ConfigError::UpwardGravity(_)))
        ));
    }

    #[test]
    fn test_rejects_bad_timestep_without_side_effects() {
        let mut controller = controller(scenario_config());
        let mut body = Vec2::new(0.0, 5.0);
        controller.set_velocity_input(Vec2::X);
        controller.jump();
        let velocity = controller.velocity();

        for dt in [0.0, -0.02, f32::NAN, f32::INFINITY] {
            let result = controller.fixed_step(dt, &nothing, &mut body);
            assert!(matches!(result, Err(ControllerError::InvalidTimestep(_))));
        }

        assert_eq!(body, Vec2::new(0.0, 5.0));
        assert_eq!(controller.velocity(), velocity);
        assert!(controller.pending.jump, "failed step must not consume the jump");
    }

    // ========================================================================
    // Reference scenarios
    // ========================================================================

    #[test]
    fn test_rest_on_ground() {
        let world = floor_world();
        let mut controller = controller(scenario_config());
        let mut body = Vec2::ZERO;
        controller.spawn_at(Vec2::new(0.0, 0.51), &world, &mut body);
        assert!(controller.collision_state().below);

        let start = body;
        for _ in 0..30 {
            let outcome = controller.fixed_step(DT, &world, &mut body).unwrap();

            assert!(outcome.collisions.below, "ground contact must hold every step");
            assert!(outcome.displacement.length() < 1e-5);
            assert!(controller.velocity().y.abs() < 1e-3);
        }

        assert!((body - start).length() < 1e-4);
    }

    #[test]
    fn test_free_fall() {
        let mut controller = controller(scenario_config());
        let mut body = Vec2::new(0.0, 10.0);

        let outcome = controller.fixed_step(DT, &nothing, &mut body).unwrap();

        assert!(outcome.resolved);
        assert!((controller.velocity().y + 0.4).abs() < 1e-5);
        assert!((body.y - (10.0 - 0.4 * DT)).abs() < 1e-5);
        let c = outcome.collisions;
        assert!(!(c.above || c.below || c.left || c.right));
    }

    #[test]
    fn test_walk_into_wall() {
        let config = ControllerConfig {
            gravity: 0.0,
            ..scenario_config()
        };
        let mut controller = controller(config);
        let mut body = Vec2::new(0.0, 5.0);

        // Right face at x=0.5, wall 0.3 past the skin
        let world = {
            let mut world = CollisionWorld::new();
            world.add_box(Vec2::new(1.81, 5.0), Vec2::new(1.0, 10.0), CollisionLayers::GROUND);
            world
        };

        controller.set_velocity_input(Vec2::X);
        let outcome = controller.fixed_step(0.1, &world, &mut body).unwrap();

        assert!(outcome.displacement.x <= 0.3 + 1e-4);
        assert!((outcome.displacement.x - 0.3).abs() < 1e-4);
        assert!(outcome.collisions.right);
        assert!((controller.velocity().x - 3.0).abs() < 1e-2);
    }

    #[test]
    fn test_invariant_without_forces() {
        let config = ControllerConfig {
            gravity: 0.0,
            ..scenario_config()
        };
        let mut controller = controller(config);
        let mut body = Vec2::new(-3.0, 7.5);

        for _ in 0..100 {
            let outcome = controller.fixed_step(DT, &nothing, &mut body).unwrap();
            assert!(!outcome.resolved);
        }

        assert_eq!(body, Vec2::new(-3.0, 7.5));
        assert_eq!(controller.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_sub_threshold_motion_casts_nothing() {
        let casts = Cell::new(0);
        let counting = |_: Vec2, _: Vec2, _: f32, _: CollisionLayers| -> Option<RayHit> {
            casts.set(casts.get() + 1);
            None
        };

        let config = ControllerConfig {
            gravity: 0.0,
            ..scenario_config()
        };
        let mut controller = controller(config);
        let mut body = Vec2::new(1.0, 1.0);

        // 5e-4 units/s of speed moves 1e-5 per step
        controller.set_velocity_input(Vec2::new(1e-4, 0.0));
        for _ in 0..10 {
            controller.fixed_step(DT, &counting, &mut body).unwrap();
        }

        assert_eq!(casts.get(), 0);
        assert_eq!(body, Vec2::new(1.0, 1.0));
    }

    // ========================================================================
    // Jumping
    // ========================================================================

    #[test]
    fn test_jump_sets_jump_velocity_even_airborne() {
        let mut controller = controller(ControllerConfig::default());
        let mut body = Vec2::new(0.0, 20.0);
        let jump_velocity = controller.config().jump_velocity;

        controller.jump();
        assert_eq!(controller.velocity().y, jump_velocity);

        for _ in 0..5 {
            controller.fixed_step(DT, &nothing, &mut body).unwrap();
        }
        assert!(!controller.collision_state().below);

        controller.jump();
        assert_eq!(controller.velocity().y, jump_velocity);
    }

    #[test]
    fn test_jump_leaves_ground() {
        let world = floor_world();
        let mut controller = controller(ControllerConfig::default());
        let mut body = Vec2::ZERO;
        controller.spawn_at(Vec2::new(0.0, 1.0), &world, &mut body);
        let ground_y = body.y;

        controller.jump();
        let outcome = controller.fixed_step(1.0 / 60.0, &world, &mut body).unwrap();

        assert!(outcome.displacement.y > 0.0);
        assert!(!outcome.collisions.is_grounded());
        assert!(!controller.pending.jump, "jump is consumed by the step");

        // Rises to roughly the configured height, then lands again
        let mut peak = body.y;
        for _ in 0..120 {
            controller.fixed_step(1.0 / 60.0, &world, &mut body).unwrap();
            peak = peak.max(body.y);
        }
        let height = peak - ground_y;
        assert!((height - 2.0).abs() < 0.2, "jump height {}", height);
        assert!(controller.collision_state().is_grounded());
        assert!((body.y - ground_y).abs() < 1e-3);
    }

    #[test]
    fn test_explicit_step_input() {
        let world = floor_world();
        let mut controller = controller(ControllerConfig::default());
        let mut body = Vec2::ZERO;
        controller.spawn_at(Vec2::new(0.0, 0.51), &world, &mut body);

        let outcome = controller
            .step(StepInput::new(Vec2::new(1.0, 0.0), true), 1.0 / 60.0, &world, &mut body)
            .unwrap();

        assert!(outcome.displacement.x > 0.0);
        assert!(outcome.displacement.y > 0.0);
        assert!(controller.velocity().y > 0.0);
    }

    // ========================================================================
    // Spawning
    // ========================================================================

    #[test]
    fn test_spawn_finds_ground() {
        let world = floor_world();
        let mut controller = controller(ControllerConfig::default());
        let mut body = Vec2::ZERO;

        let collisions = controller.spawn_at(Vec2::new(2.0, 1.5), &world, &mut body);

        assert!(collisions.is_grounded());
        assert!((body.x - 2.0).abs() < 1e-6);
        assert!((body.y - 0.51).abs() < 1e-4, "rests a skin width up, got {}", body.y);
        assert_eq!(controller.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_spawn_without_ground() {
        let world = floor_world();
        let mut controller = controller(ControllerConfig::default());
        let mut body = Vec2::ZERO;

        // Bottom is 9.5 above the floor, beyond the spawn search
        let collisions = controller.spawn_at(Vec2::new(0.0, 10.0), &world, &mut body);

        assert_eq!(body, Vec2::new(0.0, 10.0));
        assert!(!collisions.below);
        assert!(!controller.collision_state().is_grounded());
    }

    // ========================================================================
    // Slopes
    // ========================================================================

    fn ramp_world() -> CollisionWorld {
        let mut world = floor_world();
        // 30 degree ramp starting at x=1
        let height = 4.0 * 30.0_f32.to_radians().tan();
        world.add_ramp(Vec2::new(1.0, 0.0), 4.0, height, CollisionLayers::GROUND);
        world
    }

    fn walk_right(controller: &mut CharacterController2D, world: &CollisionWorld, steps: usize) -> Vec2 {
        let mut body = Vec2::ZERO;
        controller.spawn_at(Vec2::new(-1.0, 0.6), world, &mut body);
        controller.set_velocity_input(Vec2::X);

        for _ in 0..steps {
            controller.fixed_step(1.0 / 60.0, world, &mut body).unwrap();
        }
        body
    }

    #[test]
    fn test_climbs_ramp() {
        let world = ramp_world();
        let mut controller = controller(ControllerConfig::default());

        let body = walk_right(&mut controller, &world, 60);

        assert!(body.x > 1.0, "walked onto the ramp, x={}", body.x);
        assert!(body.y > 1.0, "climbed the ramp, y={}", body.y);
        let collisions = controller.collision_state();
        assert!(collisions.climbing_slope);
        assert!(collisions.is_grounded());
        assert!((collisions.slope_angle - 30.0).abs() < 0.5);
    }

    #[test]
    fn test_ramp_is_wall_without_slopes() {
        let world = ramp_world();
        let mut controller = controller(ControllerConfig::default().without_slopes());

        let body = walk_right(&mut controller, &world, 60);

        assert!(body.x < 0.55, "stopped at the ramp foot, x={}", body.x);
        assert!((body.y - 0.51).abs() < 1e-3);
        let collisions = controller.collision_state();
        assert!(collisions.right);
        assert!(collisions.is_grounded());
        assert!(!collisions.climbing_slope);
    }

    #[test]
    fn test_lands_on_too_steep_slope_as_sliding() {
        let mut world = CollisionWorld::new();
        let height = 2.0 * 60.0_f32.to_radians().tan();
        world.add_ramp(Vec2::ZERO, 2.0, height, CollisionLayers::GROUND);

        let mut controller = controller(ControllerConfig::default());
        let mut body = Vec2::new(1.0, 6.0);

        for _ in 0..120 {
            controller.fixed_step(1.0 / 60.0, &world, &mut body).unwrap();
        }

        let collisions = controller.collision_state();
        assert!(collisions.sliding_down_slope);
        assert!(collisions.below);
        assert!(!collisions.is_grounded());
        assert!((collisions.slope_angle - 60.0).abs() < 0.5);
    }
}
