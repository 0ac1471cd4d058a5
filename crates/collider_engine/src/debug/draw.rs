//! Debug outline tessellation
//!
//! Turns collider shapes into line lists (two vertices per segment) that a
//! [`ShapeRenderer`](crate::render::ShapeRenderer) can submit.

use crate::foundation::math::{constants::{EPSILON, PI, TAU}, Vec2};
use crate::physics::collision::{Aabb, Capsule, Circle, ColliderShape, Polygon};
use crate::render::LineVertex;

/// Accumulates line segments at a fixed depth
pub struct OutlineBuilder {
    vertices: Vec<LineVertex>,
    z: f32,
    segments: usize,
}

impl OutlineBuilder {
    /// `segments` is the number of line segments used for a full circle
    pub fn new(z: f32, segments: usize) -> Self {
        Self {
            vertices: Vec::new(),
            z,
            segments: segments.max(3),
        }
    }

    /// Add a line segment
    pub fn line(&mut self, start: Vec2, end: Vec2) -> &mut Self {
        self.vertices.push(LineVertex::new(start.x, start.y, self.z));
        self.vertices.push(LineVertex::new(end.x, end.y, self.z));
        self
    }

    /// Add an arc around `center` from `start_angle`, sweeping `sweep` radians
    pub fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, sweep: f32) -> &mut Self {
        let steps = ((self.segments as f32 * sweep.abs() / TAU).round() as usize).max(1);
        let point = |angle: f32| center + Vec2::new(angle.cos(), angle.sin()) * radius;
        for i in 0..steps {
            let a0 = start_angle + sweep * i as f32 / steps as f32;
            let a1 = start_angle + sweep * (i + 1) as f32 / steps as f32;
            self.line(point(a0), point(a1));
        }
        self
    }

    /// Closed loop through `points`
    pub fn polyline_closed(&mut self, points: &[Vec2]) -> &mut Self {
        for (i, start) in points.iter().enumerate() {
            self.line(*start, points[(i + 1) % points.len()]);
        }
        self
    }

    /// Circle outline
    pub fn circle(&mut self, circle: &Circle) -> &mut Self {
        self.arc(circle.center, circle.radius, 0.0, TAU)
    }

    /// Box outline
    pub fn aabb(&mut self, aabb: &Aabb) -> &mut Self {
        self.polyline_closed(aabb.to_polygon().vertices())
    }

    /// Polygon outline
    pub fn polygon(&mut self, polygon: &Polygon) -> &mut Self {
        self.polyline_closed(polygon.vertices())
    }

    /// Capsule outline: two sides and two half circles
    pub fn capsule(&mut self, capsule: &Capsule) -> &mut Self {
        let axis = capsule.b - capsule.a;
        let length = axis.norm();
        if length < EPSILON {
            return self.circle(&Circle::new(capsule.a, capsule.radius));
        }
        let dir = axis / length;
        let normal = Vec2::new(-dir.y, dir.x) * capsule.radius;
        let normal_angle = normal.y.atan2(normal.x);

        self.line(capsule.a + normal, capsule.b + normal)
            .line(capsule.a - normal, capsule.b - normal)
            .arc(capsule.b, capsule.radius, normal_angle, -PI)
            .arc(capsule.a, capsule.radius, normal_angle, PI)
    }

    /// Any collider shape; `None` adds nothing
    pub fn shape(&mut self, shape: &ColliderShape) -> &mut Self {
        match shape {
            ColliderShape::None => self,
            ColliderShape::Circle(circle) => self.circle(circle),
            ColliderShape::Aabb(aabb) => self.aabb(aabb),
            ColliderShape::Capsule(capsule) => self.capsule(capsule),
            ColliderShape::Polygon(polygon) => self.polygon(polygon),
        }
    }

    /// Finish and return the line list
    pub fn build(self) -> Vec<LineVertex> {
        self.vertices
    }
}

/// Line list outlining `shape` at depth `z`
pub fn shape_outline(shape: &ColliderShape, z: f32, circle_segments: usize) -> Vec<LineVertex> {
    let mut builder = OutlineBuilder::new(z, circle_segments);
    builder.shape(shape);
    builder.build()
}
