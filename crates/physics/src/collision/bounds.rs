//! Body bounds and ray fan layout.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Axis-aligned box in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Box centred on `center`.
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[inline]
    pub fn bottom_left(&self) -> Vec2 {
        self.min
    }

    #[inline]
    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.max.x, self.min.y)
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.min.x, self.max.y)
    }
}

/// Ray count and spacing for both sweep axes.
///
/// Horizontal rays are stacked along the box's height, vertical rays along
/// its width. The first and last ray of each fan sit on the box corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayFan {
    /// Rays per axis.
    pub count: usize,
    /// Vertical distance between horizontal rays.
    pub horizontal_spacing: f32,
    /// Horizontal distance between vertical rays.
    pub vertical_spacing: f32,
}

impl RayFan {
    /// Lay out `count` rays per axis over a box of the given half-extents.
    pub fn new(count: usize, half_extents: Vec2) -> Result<Self, ConfigError> {
        if count < 2 {
            return Err(ConfigError::TooFewRays(count));
        }
        if !(half_extents.x > 0.0 && half_extents.y > 0.0) {
            return Err(ConfigError::NonPositiveHalfExtents(
                half_extents.x,
                half_extents.y,
            ));
        }

        let size = half_extents * 2.0;
        let gaps = (count - 1) as f32;

        Ok(Self {
            count,
            horizontal_spacing: size.y / gaps,
            vertical_spacing: size.x / gaps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_corners() {
        let bounds = Bounds::from_center(Vec2::new(1.0, 2.0), Vec2::new(0.5, 1.0));

        assert_eq!(bounds.bottom_left(), Vec2::new(0.5, 1.0));
        assert_eq!(bounds.bottom_right(), Vec2::new(1.5, 1.0));
        assert_eq!(bounds.top_left(), Vec2::new(0.5, 3.0));
    }

    #[test]
    fn test_ray_spacing() {
        let fan = RayFan::new(4, Vec2::new(0.5, 1.5)).unwrap();
        assert_eq!(fan.count, 4);
        assert!((fan.horizontal_spacing - 1.0).abs() < 1e-6);
        assert!((fan.vertical_spacing - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_fans_rejected() {
        assert_eq!(
            RayFan::new(1, Vec2::ONE),
            Err(ConfigError::TooFewRays(1))
        );
        assert!(matches!(
            RayFan::new(4, Vec2::new(0.0, 1.0)),
            Err(ConfigError::NonPositiveHalfExtents(..))
        ));
    }
}
