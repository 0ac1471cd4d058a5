//! Physics module
//!
//! Only narrow-phase collision detection lives here. There is no broad phase
//! and no collision response.

pub mod collision;

pub use collision::{
    Aabb,
    Capsule,
    Circle,
    ColliderShape,
    GeometryError,
    Polygon,
    ShapeKind,
};
