//! Collision layers for ray filtering.
//!
//! Every brush in the world carries a set of layers, and every ray query
//! carries a mask. A brush is only considered when its layers intersect the
//! mask.

use serde::{Deserialize, Serialize};

/// Layer bits describing what a piece of geometry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CollisionLayers(pub u32);

impl CollisionLayers {
    /// No layers.
    pub const EMPTY: Self = Self(0);

    /// Static level geometry - floors, walls, ramps.
    pub const GROUND: Self = Self(1 << 0);

    /// Platforms that block characters but are placed by level scripting.
    pub const PLATFORM: Self = Self(1 << 1);

    /// Invisible clip brushes that only block characters.
    pub const CHARACTER_CLIP: Self = Self(1 << 2);

    /// Trigger volumes - never block movement.
    pub const TRIGGER: Self = Self(1 << 3);

    /// Hazards such as spikes; gameplay decides whether they block.
    pub const HAZARD: Self = Self(1 << 4);

    /// Every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Default mask for character movement rays.
    pub const MASK_CHARACTER_SOLID: Self =
        Self(Self::GROUND.0 | Self::PLATFORM.0 | Self::CHARACTER_CLIP.0);

    /// Check if any bit is shared with `other`.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_operations() {
        let combined = CollisionLayers(CollisionLayers::GROUND.0 | CollisionLayers::TRIGGER.0);

        assert!(combined.intersects(CollisionLayers::GROUND));
        assert!(combined.intersects(CollisionLayers::TRIGGER));
        assert!(!combined.intersects(CollisionLayers::HAZARD));
        assert!(!CollisionLayers::EMPTY.intersects(CollisionLayers::ALL));
    }

    #[test]
    fn test_character_mask_ignores_triggers() {
        let mask = CollisionLayers::MASK_CHARACTER_SOLID;
        assert!(mask.intersects(CollisionLayers::GROUND));
        assert!(mask.intersects(CollisionLayers::PLATFORM));
        assert!(!mask.intersects(CollisionLayers::TRIGGER));
        assert!(!mask.intersects(CollisionLayers::HAZARD));
    }
}
