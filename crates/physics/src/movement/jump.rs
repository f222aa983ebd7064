//! Jump tuning and jump input handling.
//!
//! Jumps are tuned by designers in terms of *height* and *time to apex*.
//! Gravity and take-off velocity follow from the projectile apex equations:
//!
//! ```text
//! gravity       = -2h / t²
//! jump_velocity = sqrt(2h|gravity|)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Gravity (negative, units/s²) that makes a jump of `jump_height` peak
/// after `time_to_apex` seconds.
#[inline]
pub fn gravity_for_jump(jump_height: f32, time_to_apex: f32) -> f32 {
    -(2.0 * jump_height) / (time_to_apex * time_to_apex)
}

/// Take-off velocity (units/s) that reaches `jump_height` under `gravity`.
#[inline]
pub fn jump_velocity_for(jump_height: f32, gravity: f32) -> f32 {
    (2.0 * jump_height * gravity.abs()).sqrt()
}

/// Jump height and time to apex, the two numbers a designer tunes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpProfile {
    /// Peak height above the take-off point (world units).
    pub jump_height: f32,
    /// Seconds from take-off to the peak.
    pub time_to_apex: f32,
}

impl Default for JumpProfile {
    fn default() -> Self {
        Self {
            jump_height: 2.0,
            time_to_apex: 0.4,
        }
    }
}

impl JumpProfile {
    pub fn new(jump_height: f32, time_to_apex: f32) -> Self {
        Self {
            jump_height,
            time_to_apex,
        }
    }

    /// Profile for a fixed world gravity, e.g. a project-wide physics setting.
    ///
    /// The apex time is whatever that gravity yields for the requested height.
    pub fn from_world_gravity(jump_height: f32, gravity: f32) -> Self {
        let time_to_apex = (2.0 * jump_height / gravity.abs()).sqrt();
        Self {
            jump_height,
            time_to_apex,
        }
    }

    /// Gravity implied by this profile (negative).
    #[inline]
    pub fn gravity(&self) -> f32 {
        gravity_for_jump(self.jump_height, self.time_to_apex)
    }

    /// Take-off velocity implied by this profile.
    #[inline]
    pub fn jump_velocity(&self) -> f32 {
        jump_velocity_for(self.jump_height, self.gravity())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.jump_height.is_finite() {
            return Err(ConfigError::NotFinite { name: "jump_height" });
        }
        if !self.time_to_apex.is_finite() {
            return Err(ConfigError::NotFinite { name: "time_to_apex" });
        }
        if self.jump_height <= 0.0 {
            return Err(ConfigError::NonPositiveJumpHeight(self.jump_height));
        }
        if self.time_to_apex <= 0.0 {
            return Err(ConfigError::NonPositiveApexTime(self.time_to_apex));
        }
        Ok(())
    }
}

/// Rising-edge detector for the jump button.
///
/// Holding the button fires once; the button has to be released before the
/// next press counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct JumpTrigger {
    /// Previous frame's button state.
    prev_pressed: bool,
}

impl JumpTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's button state; returns true on a fresh press.
    pub fn update(&mut self, pressed: bool) -> bool {
        let just_pressed = pressed && !self.prev_pressed;
        self.prev_pressed = pressed;
        just_pressed
    }
}

// ============================================================================
// Tests
// ============================================================================
