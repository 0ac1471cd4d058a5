//! Primitive collision shapes and intersection algorithms
//!
//! All primitives are planar (XY). Every test is inclusive: shapes that only
//! touch are reported as intersecting.

use crate::foundation::math::{constants::EPSILON, cross2, utils, Vec2};
use thiserror::Error;

/// Maximum number of vertices a collision polygon may have
pub const MAX_POLYGON_VERTICES: usize = 8;

/// Errors raised while building collision geometry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// More input points than a polygon can hold
    #[error("polygon has {0} vertices, at most {MAX_POLYGON_VERTICES} are supported")]
    TooManyVertices(usize),

    /// Input collapses to a point or a line
    #[error("polygon is degenerate: {0} distinct hull vertices")]
    DegeneratePolygon(usize),
}

/// A circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center point
    pub center: Vec2,
    /// Radius
    pub radius: f32,
}

impl Circle {
    /// Creates a new circle
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Copy of this circle moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.center + offset, self.radius)
    }

    /// Check if this circle intersects another
    pub fn intersects_circle(&self, other: &Circle) -> bool {
        let distance_squared = (self.center - other.center).norm_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Check if this circle intersects a box
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let closest = aabb.closest_point(self.center);
        (closest - self.center).norm_squared() <= self.radius * self.radius
    }

    /// Bounding box
    pub fn bounds(&self) -> Aabb {
        let r = Vec2::new(self.radius, self.radius);
        Aabb::new(self.center - r, self.center + r)
    }
}

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl Aabb {
    /// Creates a box from two corners, normalizing them into min/max
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates a box from its minimum corner and its extents
    pub fn from_origin(origin: Vec2, width: f32, height: f32) -> Self {
        Self::new(origin, origin + Vec2::new(width, height))
    }

    /// Width along X
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height along Y
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Copy of this box moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Interval overlap on both axes
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Corners, counter-clockwise from `min`
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    /// Check if this box intersects a capsule.
    ///
    /// Works for boxes with zero width or height.
    pub fn intersects_capsule(&self, capsule: &Capsule) -> bool {
        if self.contains_point(capsule.a) || self.contains_point(capsule.b) {
            return true;
        }
        let radius_squared = capsule.radius * capsule.radius;
        let corners = self.corners();
        (0..4).any(|i| {
            segment_distance_squared(capsule.a, capsule.b, corners[i], corners[(i + 1) % 4]) <= radius_squared
        })
    }

    /// Point containment, edges included
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Closest point of the box to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            utils::clamp(point.x, self.min.x, self.max.x),
            utils::clamp(point.y, self.min.y, self.max.y),
        )
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: Vec2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vec2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// The box as a counter-clockwise quad
    pub fn to_polygon(&self) -> Polygon {
        Polygon::from_convex_ccw(self.corners().to_vec())
    }
}

/// A line segment swept by a disc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    /// First segment endpoint
    pub a: Vec2,
    /// Second segment endpoint
    pub b: Vec2,
    /// Radius around the segment
    pub radius: f32,
}

impl Capsule {
    /// Creates a new capsule
    pub fn new(a: Vec2, b: Vec2, radius: f32) -> Self {
        Self { a, b, radius }
    }

    /// Largest capsule that fits the box `origin..origin + (width, height)`.
    ///
    /// The capsule runs along the longer side; a square box yields a circle
    /// shaped capsule with coincident endpoints.
    pub fn fitted(origin: Vec2, width: f32, height: f32) -> Self {
        if height >= width {
            let radius = width * 0.5;
            let x = origin.x + radius;
            Self::new(Vec2::new(x, origin.y + radius), Vec2::new(x, origin.y + height - radius), radius)
        } else {
            let radius = height * 0.5;
            let y = origin.y + radius;
            Self::new(Vec2::new(origin.x + radius, y), Vec2::new(origin.x + width - radius, y), radius)
        }
    }

    /// Copy of this capsule moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.a + offset, self.b + offset, self.radius)
    }

    /// Check if this capsule intersects a circle
    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        let closest = closest_point_on_segment(circle.center, self.a, self.b);
        let radius_sum = self.radius + circle.radius;
        (closest - circle.center).norm_squared() <= radius_sum * radius_sum
    }

    /// Check if this capsule intersects another
    pub fn intersects_capsule(&self, other: &Capsule) -> bool {
        let radius_sum = self.radius + other.radius;
        segment_distance_squared(self.a, self.b, other.a, other.b) <= radius_sum * radius_sum
    }

    /// Bounding box
    pub fn bounds(&self) -> Aabb {
        let r = Vec2::new(self.radius, self.radius);
        let segment = Aabb::new(self.a, self.b);
        Aabb {
            min: segment.min - r,
            max: segment.max + r,
        }
    }
}

/// A convex polygon with counter-clockwise winding and outward edge normals
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl Polygon {
    /// Builds a polygon from the convex hull of `points`.
    ///
    /// Points inside the hull and duplicates are discarded.
    pub fn from_points(points: &[Vec2]) -> Result<Self, GeometryError> {
        if points.len() > MAX_POLYGON_VERTICES {
            return Err(GeometryError::TooManyVertices(points.len()));
        }
        let hull = convex_hull(points);
        if hull.len() < 3 {
            return Err(GeometryError::DegeneratePolygon(hull.len()));
        }
        Ok(Self::from_convex_ccw(hull))
    }

    /// Caller guarantees `vertices` are convex and counter-clockwise
    pub(crate) fn from_convex_ccw(vertices: Vec<Vec2>) -> Self {
        let count = vertices.len();
        let normals = (0..count)
            .map(|i| {
                let edge = vertices[(i + 1) % count] - vertices[i];
                let length = edge.norm();
                if length < EPSILON {
                    Vec2::zeros()
                } else {
                    Vec2::new(edge.y, -edge.x) / length
                }
            })
            .collect();
        Self { vertices, normals }
    }

    /// Hull vertices, counter-clockwise
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Outward unit normal of each edge; `normals()[i]` belongs to the edge
    /// starting at `vertices()[i]`
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    /// Iterator over `(start, end)` edge pairs
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let count = self.vertices.len();
        (0..count).map(move |i| (self.vertices[i], self.vertices[(i + 1) % count]))
    }

    /// Copy of this polygon moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            vertices: self.vertices.iter().map(|v| v + offset).collect(),
            normals: self.normals.clone(),
        }
    }

    /// Point containment, edges included.
    ///
    /// Zero-length edges carry no normal, so the bounds check keeps flat
    /// quads (boxes with no width or height) from accepting far points.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let bounds = self.bounds();
        let near = |min: f32, max: f32, v: f32| v >= min - EPSILON && v <= max + EPSILON;
        near(bounds.min.x, bounds.max.x, point.x)
            && near(bounds.min.y, bounds.max.y, point.y)
            && self
                .vertices
                .iter()
                .zip(&self.normals)
                .all(|(vertex, normal)| normal.dot(&(point - vertex)) <= EPSILON)
    }

    fn project(&self, axis: &Vec2) -> (f32, f32) {
        self.vertices.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), v| {
            let d = axis.dot(v);
            (min.min(d), max.max(d))
        })
    }

    /// Separating axis test against another convex polygon
    pub fn intersects_polygon(&self, other: &Polygon) -> bool {
        self.normals.iter().chain(&other.normals).all(|axis| {
            let (min_a, max_a) = self.project(axis);
            let (min_b, max_b) = other.project(axis);
            max_a >= min_b && max_b >= min_a
        })
    }

    /// Check if this polygon intersects a circle
    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        if self.contains_point(circle.center) {
            return true;
        }
        let radius_squared = circle.radius * circle.radius;
        self.edges().any(|(start, end)| {
            let closest = closest_point_on_segment(circle.center, start, end);
            (closest - circle.center).norm_squared() <= radius_squared
        })
    }

    /// Check if this polygon intersects a capsule
    pub fn intersects_capsule(&self, capsule: &Capsule) -> bool {
        if self.contains_point(capsule.a) || self.contains_point(capsule.b) {
            return true;
        }
        let radius_squared = capsule.radius * capsule.radius;
        self.edges()
            .any(|(start, end)| segment_distance_squared(capsule.a, capsule.b, start, end) <= radius_squared)
    }

    /// Bounding box
    pub fn bounds(&self) -> Aabb {
        let first = self.vertices.first().copied().unwrap_or_else(Vec2::zeros);
        self.vertices
            .iter()
            .fold(Aabb::new(first, first), |acc, v| acc.union(&Aabb::new(*v, *v)))
    }
}

/// Closest point to `p` on the segment `a..b`
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let length_squared = ab.norm_squared();
    if length_squared < EPSILON {
        return a;
    }
    let t = utils::clamp((p - a).dot(&ab) / length_squared, 0.0, 1.0);
    a + ab * t
}

/// Whether the segments `p1..q1` and `p2..q2` share at least one point
pub fn segments_intersect(p1: Vec2, q1: Vec2, p2: Vec2, q2: Vec2) -> bool {
    fn orientation(a: Vec2, b: Vec2, c: Vec2) -> f32 {
        cross2(&(b - a), &(c - a))
    }
    fn on_segment(a: Vec2, b: Vec2, p: Vec2) -> bool {
        p.x >= a.x.min(b.x) - EPSILON
            && p.x <= a.x.max(b.x) + EPSILON
            && p.y >= a.y.min(b.y) - EPSILON
            && p.y <= a.y.max(b.y) + EPSILON
    }

    let d1 = orientation(p2, q2, p1);
    let d2 = orientation(p2, q2, q1);
    let d3 = orientation(p1, q1, p2);
    let d4 = orientation(p1, q1, q2);

    if ((d1 > EPSILON && d2 < -EPSILON) || (d1 < -EPSILON && d2 > EPSILON))
        && ((d3 > EPSILON && d4 < -EPSILON) || (d3 < -EPSILON && d4 > EPSILON))
    {
        return true;
    }

    // Collinear or touching cases
    (d1.abs() <= EPSILON && on_segment(p2, q2, p1))
        || (d2.abs() <= EPSILON && on_segment(p2, q2, q1))
        || (d3.abs() <= EPSILON && on_segment(p1, q1, p2))
        || (d4.abs() <= EPSILON && on_segment(p1, q1, q2))
}

/// Squared distance between the segments `p1..q1` and `p2..q2`
pub fn segment_distance_squared(p1: Vec2, q1: Vec2, p2: Vec2, q2: Vec2) -> f32 {
    if segments_intersect(p1, q1, p2, q2) {
        return 0.0;
    }
    [
        (p1 - closest_point_on_segment(p1, p2, q2)).norm_squared(),
        (q1 - closest_point_on_segment(q1, p2, q2)).norm_squared(),
        (p2 - closest_point_on_segment(p2, p1, q1)).norm_squared(),
        (q2 - closest_point_on_segment(q2, p1, q1)).norm_squared(),
    ]
    .into_iter()
    .fold(f32::INFINITY, f32::min)
}

/// Andrew's monotone chain. Returns the hull counter-clockwise, without
/// collinear points.
fn convex_hull(points: &[Vec2]) -> Vec<Vec2> {
    let mut sorted: Vec<Vec2> = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup_by(|a, b| (*a - *b).norm_squared() < EPSILON * EPSILON);

    if sorted.len() < 3 {
        return sorted;
    }

    let reversed: Vec<Vec2> = sorted.iter().rev().copied().collect();
    let mut hull: Vec<Vec2> = Vec::with_capacity(sorted.len() * 2);
    for pass in [&sorted[..], &reversed[..]] {
        let start = hull.len();
        for &p in pass {
            while hull.len() >= start + 2 {
                let a = hull[hull.len() - 2];
                let b = hull[hull.len() - 1];
                if cross2(&(b - a), &(p - a)) > EPSILON {
                    break;
                }
                hull.pop();
            }
            hull.push(p);
        }
        // Last point of each chain is the first point of the next one
        hull.pop();
    }
    hull
}
