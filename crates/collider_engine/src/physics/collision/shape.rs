//! Collider shape variant
//!
//! A collider carries exactly one shape at a time. Setting a new shape
//! replaces the previous one entirely, whatever its kind was.

use crate::foundation::math::Vec2;
use super::primitives::{Aabb, Capsule, Circle, GeometryError, Polygon};

/// Payload-free discriminant of [`ColliderShape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// No shape assigned
    None,
    /// Circle
    Circle,
    /// Axis-aligned box
    Aabb,
    /// Capsule
    Capsule,
    /// Convex polygon
    Polygon,
}

/// The shape a collider tests with
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ColliderShape {
    /// No shape assigned; never collides
    #[default]
    None,
    /// A circle
    Circle(Circle),
    /// An axis-aligned box
    Aabb(Aabb),
    /// A capsule
    Capsule(Capsule),
    /// A convex polygon
    Polygon(Polygon),
}

fn non_negative(value: f32, what: &str) -> f32 {
    if value < 0.0 {
        log::warn!("Negative {} {} clamped to 0", what, value);
        0.0
    } else {
        value
    }
}

impl ColliderShape {
    /// Which variant is active
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::None => ShapeKind::None,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Aabb(_) => ShapeKind::Aabb,
            Self::Capsule(_) => ShapeKind::Capsule,
            Self::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// Replace the shape with a circle. A negative radius is clamped to zero.
    pub fn set_circle(&mut self, center: Vec2, radius: f32) {
        *self = Self::Circle(Circle::new(center, non_negative(radius, "radius")));
    }

    /// Replace the shape with a box spanning `origin..origin + (width, height)`.
    /// Negative extents are clamped to zero.
    pub fn set_aabb(&mut self, origin: Vec2, width: f32, height: f32) {
        *self = Self::Aabb(Aabb::from_origin(
            origin,
            non_negative(width, "width"),
            non_negative(height, "height"),
        ));
    }

    /// Replace the shape with a capsule around the segment `a..b`
    pub fn set_capsule(&mut self, a: Vec2, b: Vec2, radius: f32) {
        *self = Self::Capsule(Capsule::new(a, b, non_negative(radius, "radius")));
    }

    /// Replace the shape with the capsule inscribed in the box at `origin`,
    /// running along its longer side
    pub fn set_fitted_capsule(&mut self, origin: Vec2, width: f32, height: f32) {
        *self = Self::Capsule(Capsule::fitted(
            origin,
            non_negative(width, "width"),
            non_negative(height, "height"),
        ));
    }

    /// Replace the shape with a four-vertex polygon covering the box at `origin`.
    ///
    /// A box with no area is rejected and the current shape is kept.
    pub fn set_box_polygon(&mut self, origin: Vec2, width: f32, height: f32) -> Result<(), GeometryError> {
        let aabb = Aabb::from_origin(origin, non_negative(width, "width"), non_negative(height, "height"));
        self.set_polygon(&[
            aabb.min,
            Vec2::new(aabb.max.x, aabb.min.y),
            aabb.max,
            Vec2::new(aabb.min.x, aabb.max.y),
        ])
    }

    /// Replace the shape with the convex hull of `points`.
    ///
    /// On error the current shape is kept.
    pub fn set_polygon(&mut self, points: &[Vec2]) -> Result<(), GeometryError> {
        *self = Self::Polygon(Polygon::from_points(points)?);
        Ok(())
    }

    /// Drop the current shape
    pub fn clear(&mut self) {
        *self = Self::None;
    }

    /// The circle payload, if a circle is active
    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Self::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    /// The box payload, if a box is active
    pub fn as_aabb(&self) -> Option<&Aabb> {
        match self {
            Self::Aabb(aabb) => Some(aabb),
            _ => None,
        }
    }

    /// The capsule payload, if a capsule is active
    pub fn as_capsule(&self) -> Option<&Capsule> {
        match self {
            Self::Capsule(capsule) => Some(capsule),
            _ => None,
        }
    }

    /// The polygon payload, if a polygon is active
    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Self::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }

    /// Copy of this shape moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        match self {
            Self::None => Self::None,
            Self::Circle(circle) => Self::Circle(circle.translated(offset)),
            Self::Aabb(aabb) => Self::Aabb(aabb.translated(offset)),
            Self::Capsule(capsule) => Self::Capsule(capsule.translated(offset)),
            Self::Polygon(polygon) => Self::Polygon(polygon.translated(offset)),
        }
    }

    /// Bounding box, `None` when no shape is assigned
    pub fn bounds(&self) -> Option<Aabb> {
        match self {
            Self::None => None,
            Self::Circle(circle) => Some(circle.bounds()),
            Self::Aabb(aabb) => Some(*aabb),
            Self::Capsule(capsule) => Some(capsule.bounds()),
            Self::Polygon(polygon) => Some(polygon.bounds()),
        }
    }

    /// Narrow-phase test. Both shapes must be in the same space.
    pub fn intersects(&self, other: &ColliderShape) -> bool {
        use ColliderShape as S;

        match (self, other) {
            (S::None, _) | (_, S::None) => false,

            (S::Circle(a), S::Circle(b)) => a.intersects_circle(b),
            (S::Circle(c), S::Aabb(b)) | (S::Aabb(b), S::Circle(c)) => c.intersects_aabb(b),
            (S::Aabb(a), S::Aabb(b)) => a.intersects(b),

            (S::Capsule(cap), S::Circle(c)) | (S::Circle(c), S::Capsule(cap)) => cap.intersects_circle(c),
            (S::Capsule(cap), S::Aabb(b)) | (S::Aabb(b), S::Capsule(cap)) => b.intersects_capsule(cap),
            (S::Capsule(a), S::Capsule(b)) => a.intersects_capsule(b),

            (S::Polygon(p), S::Circle(c)) | (S::Circle(c), S::Polygon(p)) => p.intersects_circle(c),
            (S::Polygon(p), S::Aabb(b)) | (S::Aabb(b), S::Polygon(p)) => {
                b.to_polygon().intersects_polygon(p)
            }
            (S::Polygon(p), S::Capsule(cap)) | (S::Capsule(cap), S::Polygon(p)) => p.intersects_capsule(cap),
            (S::Polygon(a), S::Polygon(b)) => a.intersects_polygon(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(x: f32, y: f32, r: f32) -> ColliderShape {
        let mut shape = ColliderShape::default();
        shape.set_circle(Vec2::new(x, y), r);
        shape
    }

    fn aabb(x: f32, y: f32, w: f32, h: f32) -> ColliderShape {
        let mut shape = ColliderShape::default();
        shape.set_aabb(Vec2::new(x, y), w, h);
        shape
    }

    fn capsule(ax: f32, ay: f32, bx: f32, by: f32, r: f32) -> ColliderShape {
        let mut shape = ColliderShape::default();
        shape.set_capsule(Vec2::new(ax, ay), Vec2::new(bx, by), r);
        shape
    }

    fn triangle(x: f32, y: f32) -> ColliderShape {
        let mut shape = ColliderShape::default();
        shape
            .set_polygon(&[Vec2::new(x, y), Vec2::new(x + 2.0, y), Vec2::new(x + 1.0, y + 2.0)])
            .unwrap();
        shape
    }

    #[test]
    fn test_none_never_collides() {
        let none = ColliderShape::None;
        for other in [ColliderShape::None, circle(0.0, 0.0, 100.0), aabb(-50.0, -50.0, 100.0, 100.0)] {
            assert!(!none.intersects(&other));
            assert!(!other.intersects(&none));
        }
    }

    #[test]
    fn test_setting_new_shape_discards_previous_payload() {
        let mut shape = circle(0.0, 0.0, 5.0);
        assert_eq!(shape.kind(), ShapeKind::Circle);

        shape.set_aabb(Vec2::new(0.0, 0.0), 1.0, 1.0);
        assert_eq!(shape.kind(), ShapeKind::Aabb);
        assert!(shape.as_circle().is_none());
        // The old circle would have reached (4, 0)
        assert!(!shape.intersects(&circle(4.0, 0.0, 0.5)));
    }

    #[test]
    fn test_failed_polygon_keeps_previous_shape() {
        let mut shape = circle(0.0, 0.0, 1.0);
        let result = shape.set_polygon(&[Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)]);
        assert!(result.is_err());
        assert_eq!(shape.kind(), ShapeKind::Circle);
    }

    #[test]
    fn test_negative_extents_are_clamped() {
        let shape = circle(0.0, 0.0, -3.0);
        assert_eq!(shape.as_circle().map(|c| c.radius), Some(0.0));

        let shape = aabb(1.0, 1.0, -2.0, 4.0);
        let b = shape.as_aabb().unwrap();
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.height(), 4.0);
    }

    #[test]
    fn test_dispatch_is_symmetric_for_every_pair() {
        let shapes = [
            circle(0.0, 0.0, 1.0),
            aabb(0.5, -0.5, 2.0, 1.0),
            capsule(-1.0, 1.5, 3.0, 1.5, 0.6),
            triangle(0.0, -0.5),
            circle(10.0, 10.0, 1.0),
            aabb(20.0, 20.0, 1.0, 1.0),
            capsule(-10.0, -10.0, -12.0, -12.0, 0.5),
            triangle(30.0, 0.0),
        ];
        for a in &shapes {
            for b in &shapes {
                assert_eq!(a.intersects(b), b.intersects(a), "{:?} vs {:?}", a.kind(), b.kind());
            }
        }
    }

    #[test]
    fn test_mixed_pairs() {
        assert!(circle(0.0, 0.0, 1.0).intersects(&aabb(0.5, -0.5, 2.0, 1.0)));
        assert!(capsule(-1.0, 1.5, 3.0, 1.5, 0.6).intersects(&circle(0.0, 0.0, 1.0)));
        // Segment runs 1.0 above the top of the box
        assert!(capsule(-1.0, 1.5, 3.0, 1.5, 1.2).intersects(&aabb(0.5, -0.5, 2.0, 1.0)));
        assert!(!capsule(-1.0, 1.5, 3.0, 1.5, 0.8).intersects(&aabb(0.5, -0.5, 2.0, 1.0)));
        assert!(triangle(0.0, -0.5).intersects(&aabb(0.5, -0.5, 2.0, 1.0)));
        assert!(!triangle(5.0, 5.0).intersects(&aabb(0.5, -0.5, 2.0, 1.0)));
        assert!(triangle(0.0, 0.0).intersects(&capsule(1.0, 3.0, 1.0, 5.0, 1.0)));
        assert!(!triangle(0.0, 0.0).intersects(&capsule(1.0, 3.5, 1.0, 5.0, 1.0)));
    }

    #[test]
    fn test_translation_moves_every_kind() {
        let offset = Vec2::new(100.0, 0.0);
        let target = circle(100.0, 0.0, 0.5);
        for shape in [circle(0.0, 0.0, 1.0), aabb(-1.0, -1.0, 2.0, 2.0), capsule(-1.0, 0.0, 1.0, 0.0, 0.5), triangle(-1.0, -0.5)] {
            assert!(!shape.intersects(&target));
            assert!(shape.translated(offset).intersects(&target));
        }
        assert_eq!(ColliderShape::None.translated(offset), ColliderShape::None);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(ColliderShape::None.bounds(), None);
        let b = capsule(0.0, 0.0, 4.0, 0.0, 1.0).bounds().unwrap();
        assert_eq!(b.min, Vec2::new(-1.0, -1.0));
        assert_eq!(b.max, Vec2::new(5.0, 1.0));
    }

    #[test]
    fn test_box_helpers() {
        let mut shape = ColliderShape::default();
        shape.set_fitted_capsule(Vec2::new(0.0, 0.0), 2.0, 6.0);
        let capsule = shape.as_capsule().unwrap();
        assert_eq!(capsule.radius, 1.0);
        assert_eq!(capsule.a, Vec2::new(1.0, 1.0));
        assert_eq!(capsule.b, Vec2::new(1.0, 5.0));

        shape.set_box_polygon(Vec2::new(1.0, 1.0), 2.0, 3.0).unwrap();
        assert_eq!(shape.as_polygon().unwrap().vertices().len(), 4);
        assert_eq!(shape.bounds().unwrap(), Aabb::from_origin(Vec2::new(1.0, 1.0), 2.0, 3.0));

        // Flat box is rejected, polygon stays
        assert!(shape.set_box_polygon(Vec2::new(0.0, 0.0), 4.0, 0.0).is_err());
        assert_eq!(shape.kind(), ShapeKind::Polygon);
    }

    #[test]
    fn test_flat_boxes_only_hit_nearby_capsules() {
        let far = capsule(500.0, 500.0, 501.0, 500.0, 0.1);
        assert!(!aabb(0.0, 0.0, 0.0, 0.0).intersects(&far));
        assert!(!far.intersects(&aabb(0.0, 0.0, 0.0, 0.0)));
        // Negative width is clamped to a flat box
        assert!(!aabb(0.0, 0.0, -3.0, 0.0).intersects(&far));

        let thin = aabb(1.0, 1.0, 0.0, 4.0);
        assert!(!thin.intersects(&capsule(1.0, 100.0, 1.0, 101.0, 0.5)));
        assert!(thin.intersects(&capsule(0.0, 3.0, 2.0, 3.0, 0.1)));
        assert!(!thin.intersects(&triangle(40.0, 40.0)));
    }
}
