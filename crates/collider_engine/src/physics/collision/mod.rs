//! Narrow-phase collision geometry
//!
//! Shapes are planar and stored in a collider's local space. The collider
//! translates them to world space on demand during tests.
//!
//! # Module Organization
//!
//! - [`primitives`] - Circle, box, capsule and convex polygon with pairwise tests
//! - [`shape`] - The [`ColliderShape`] variant and its dispatch

pub mod primitives;
pub mod shape;

// Re-export commonly used types
pub use primitives::{Aabb, Capsule, Circle, GeometryError, Polygon, MAX_POLYGON_VERTICES};
pub use shape::{ColliderShape, ShapeKind};
