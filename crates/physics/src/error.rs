//! Error types for configuration and stepping.

use thiserror::Error;

/// A controller configuration that would produce degenerate geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("skin width must be positive, got {0}")]
    NonPositiveSkinWidth(f32),

    #[error("skin width {skin_width} must be smaller than the smallest half-extent {half_extent}")]
    SkinWidthTooLarge { skin_width: f32, half_extent: f32 },

    #[error("half-extents must be positive, got ({0}, {1})")]
    NonPositiveHalfExtents(f32, f32),

    #[error("at least 2 rays per axis are required, got {0}")]
    TooFewRays(usize),

    #[error("max slope angle must lie in (0, 90) degrees, got {0}")]
    SlopeAngleOutOfRange(f32),

    #[error("gravity must be zero or negative, got {0}")]
    UpwardGravity(f32),

    #[error("jump velocity must be zero or positive, got {0}")]
    NegativeJumpVelocity(f32),

    #[error("smoothing time must be zero or positive, got {0}")]
    NegativeSmoothingTime(f32),

    #[error("minimum move distance must be zero or positive, got {0}")]
    NegativeMinMoveDistance(f32),

    #[error("jump height must be positive, got {0}")]
    NonPositiveJumpHeight(f32),

    #[error("time to jump apex must be positive, got {0}")]
    NonPositiveApexTime(f32),

    #[error("{name} must be finite")]
    NotFinite { name: &'static str },
}

/// Errors reported by the character controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    #[error("invalid controller configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("fixed timestep must be positive and finite, got {0}")]
    InvalidTimestep(f32),
}
