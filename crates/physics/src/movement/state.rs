//! Collision state and per-step input/output structures.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What the movement rays found during one fixed step.
///
/// Written only by the resolver. Reset at the start of every step; the reset
/// keeps the previous slope angle in `slope_angle_old` so slope transitions
/// can be detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionState {
    /// An upward ray hit a ceiling.
    pub above: bool,
    /// A downward ray hit ground, or the body is climbing/sliding on a slope.
    pub below: bool,
    /// A leftward ray hit a wall.
    pub left: bool,
    /// A rightward ray hit a wall.
    pub right: bool,

    /// Horizontal motion was converted into climbing a walkable slope.
    pub climbing_slope: bool,
    /// The body is moving down a slope that is too steep to stand on.
    pub descending_slope: bool,
    /// The ground below is steeper than the climbable limit.
    pub sliding_down_slope: bool,

    /// Slope angle from world-up in degrees (0 = flat).
    pub slope_angle: f32,
    /// Slope angle of the previous step.
    pub slope_angle_old: f32,
    /// Normal of the slope currently touched, zero when none.
    pub slope_normal: Vec2,
}

impl CollisionState {
    /// Clear all contacts, remembering the current slope angle as the old one.
    pub fn reset(&mut self) {
        *self = Self {
            slope_angle_old: self.slope_angle,
            ..Self::default()
        };
    }

    /// Standing on walkable ground.
    ///
    /// Unlike `below`, this excludes slopes too steep to stand on, so it is
    /// the flag gameplay code should consult before allowing a jump.
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.below && !self.sliding_down_slope
    }

    /// Touching a wall on either side.
    #[inline]
    pub fn touching_wall(&self) -> bool {
        self.left || self.right
    }
}

/// Input snapshot for one fixed step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StepInput {
    /// Raw movement vector, components expected in [-1, 1].
    /// Only `x` drives the character; `y` is accepted for symmetry with
    /// input devices and ignored.
    pub movement: Vec2,

    /// A fresh jump press (edge-triggered).
    pub jump: bool,
}

impl StepInput {
    pub fn new(movement: Vec2, jump: bool) -> Self {
        Self { movement, jump }
    }

    /// Horizontal-only input without a jump.
    pub fn horizontal(x: f32) -> Self {
        Self {
            movement: Vec2::new(x, 0.0),
            jump: false,
        }
    }
}

/// Result of one fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Body position after the step.
    pub position: Vec2,
    /// Collision-corrected displacement applied this step.
    pub displacement: Vec2,
    /// Collision state snapshot.
    pub collisions: CollisionState,
    /// False when the displacement was below the minimum move distance and
    /// no rays were cast.
    pub resolved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_keeps_old_slope_angle() {
        let mut state = CollisionState {
            below: true,
            climbing_slope: true,
            slope_angle: 30.0,
            slope_normal: Vec2::new(-0.5, 0.866),
            ..Default::default()
        };

        state.reset();

        assert!(!state.below);
        assert!(!state.climbing_slope);
        assert_eq!(state.slope_angle, 0.0);
        assert_eq!(state.slope_angle_old, 30.0);
        assert_eq!(state.slope_normal, Vec2::ZERO);

        state.reset();
        assert_eq!(state.slope_angle_old, 0.0);
    }

    #[test]
    fn test_grounded_excludes_steep_slopes() {
        let mut state = CollisionState {
            below: true,
            ..Default::default()
        };
        assert!(state.is_grounded());

        state.sliding_down_slope = true;
        assert!(!state.is_grounded());
        assert!(!state.touching_wall());

        state.right = true;
        assert!(state.touching_wall());
    }

    #[test]
    fn test_step_input() {
        assert_eq!(StepInput::default(), StepInput::new(Vec2::ZERO, false));
        assert_eq!(StepInput::horizontal(-1.0).movement, Vec2::new(-1.0, 0.0));
        assert!(!StepInput::horizontal(1.0).jump);
    }
}
