//! Collision world containing static level geometry.
//!
//! The collision world stores every collidable brush and answers nearest-hit
//! ray queries against them. It is the reference [`RayCaster`] backend for
//! the character controller.

use glam::Vec2;
use parry2d::math::{Isometry, Point, Real, Vector};
use parry2d::query::Ray;
use parry2d::shape::SharedShape;

use super::flags::CollisionLayers;
use super::ray::{RayCaster, RayHit};

/// A piece of collision geometry in the world.
#[derive(Clone)]
pub struct CollisionBrush {
    /// Unique identifier for this brush.
    pub id: u32,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position and orientation in world space.
    pub transform: Isometry<Real>,
    /// Layers used for ray filtering.
    pub layers: CollisionLayers,
}

impl std::fmt::Debug for CollisionBrush {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionBrush")
            .field("id", &self.id)
            .field("shape", &self.shape.shape_type())
            .field("layers", &self.layers)
            .finish()
    }
}

/// The collision world containing all static geometry.
///
/// Supports boxes, convex polygons, ramps (right triangles) and line
/// segments. The world is never mutated during a controller step, so a
/// shared reference can be handed to any number of controllers.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    /// Static brushes (floors, walls, ramps).
    brushes: Vec<CollisionBrush>,
    /// Next brush ID to assign.
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            brushes: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the box in world space
    /// * `half_extents` - Half-size on each axis
    /// * `layers` - Layers for ray filtering
    pub fn add_box(&mut self, center: Vec2, half_extents: Vec2, layers: CollisionLayers) -> u32 {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y);
        let transform = Isometry::translation(center.x, center.y);
        self.push(shape, transform, layers)
    }

    /// Add a convex polygon given by its vertices (any order).
    ///
    /// Returns `None` if the hull is degenerate.
    pub fn add_convex_polygon(&mut self, points: &[Vec2], layers: CollisionLayers) -> Option<u32> {
        let points: Vec<Point<Real>> = points.iter().map(|p| to_point(*p)).collect();
        let shape = SharedShape::convex_hull(&points)?;
        Some(self.push(shape, Isometry::identity(), layers))
    }

    /// Add a ramp: a right triangle whose sloped face starts at `foot`.
    ///
    /// A positive `width` rises to the right, a negative one to the left.
    /// The slope angle from horizontal is `atan(height / |width|)`.
    ///
    /// Returns `None` for a zero width or non-positive height.
    pub fn add_ramp(
        &mut self,
        foot: Vec2,
        width: f32,
        height: f32,
        layers: CollisionLayers,
    ) -> Option<u32> {
        if width == 0.0 || height <= 0.0 {
            return None;
        }

        let base_end = foot + Vec2::new(width, 0.0);
        let top = foot + Vec2::new(width, height);
        let shape = SharedShape::triangle(to_point(foot), to_point(base_end), to_point(top));
        Some(self.push(shape, Isometry::identity(), layers))
    }

    /// Add a line segment, e.g. a thin one-sided ledge.
    pub fn add_segment(&mut self, a: Vec2, b: Vec2, layers: CollisionLayers) -> u32 {
        let shape = SharedShape::segment(to_point(a), to_point(b));
        self.push(shape, Isometry::identity(), layers)
    }

    /// Remove all collision geometry.
    pub fn clear(&mut self) {
        self.brushes.clear();
    }

    /// Get the number of collision brushes.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Cast a ray and return the nearest hit.
    ///
    /// # Arguments
    ///
    /// * `origin` - Ray starting position
    /// * `direction` - Ray direction (will be normalized)
    /// * `max_distance` - Maximum distance to search
    /// * `mask` - Layers to collide with
    pub fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO || max_distance <= 0.0 {
            return None;
        }

        let ray = Ray::new(to_point(origin), Vector::new(dir.x, dir.y));

        let mut closest: Option<RayHit> = None;

        for brush in &self.brushes {
            if !mask.intersects(brush.layers) {
                continue;
            }

            let Some(intersection) =
                brush
                    .shape
                    .cast_ray_and_get_normal(&brush.transform, &ray, max_distance, true)
            else {
                continue;
            };

            let distance = intersection.time_of_impact;
            if distance > max_distance {
                continue;
            }

            let is_closer = closest.as_ref().map_or(true, |hit| distance < hit.distance);
            if is_closer {
                closest = Some(RayHit {
                    distance,
                    normal: Vec2::new(intersection.normal.x, intersection.normal.y),
                    point: origin + dir * distance,
                    layers: brush.layers,
                    brush: brush.id as i32,
                });
            }
        }

        closest
    }

    fn push(&mut self, shape: SharedShape, transform: Isometry<Real>, layers: CollisionLayers) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        self.brushes.push(CollisionBrush {
            id,
            shape,
            transform,
            layers,
        });

        id
    }
}

impl RayCaster for CollisionWorld {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RayHit> {
        self.raycast(origin, direction, max_distance, mask)
    }
}

#[inline]
fn to_point(v: Vec2) -> Point<Real> {
    Point::new(v.x, v.y)
}

// ============================================================================
// Tests
// ============================================================================
