//! Math utilities and types
//!
//! Thin aliases over nalgebra. Collision geometry lives in the XY plane and
//! uses [`Vec2`]; entity positions are [`Vec3`] with Z used only for drawing.

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (also used for RGBA colours)
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Drop the Z component of a position.
#[inline]
pub fn xy(v: &Vec3) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Lift a planar point back into 3D at the given depth.
#[inline]
pub fn with_z(v: &Vec2, z: f32) -> Vec3 {
    Vec3::new(v.x, v.y, z)
}

/// 2D cross product (z component of the 3D cross product)
#[inline]
pub fn cross2(a: &Vec2, b: &Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Tolerance used by the narrow phase for degenerate edges and axes
    pub const EPSILON: f32 = 1.0e-6;
}

/// Math utility functions
pub mod utils {
    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }
}
