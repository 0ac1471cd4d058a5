//! # 2D Camera
//!
//! Orthographic camera looking down -Z at the XY plane where colliders live.

use crate::foundation::math::{Mat4, Vec3};

/// Orthographic camera centred on `position`
///
/// The visible region is `width` x `height` world units. Depth range is
/// `near..far` along -Z.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space (centre of the view)
    pub position: Vec3,

    /// Visible width in world units
    pub width: f32,

    /// Visible height in world units
    pub height: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create an orthographic camera covering a `width` x `height` viewport
    pub fn orthographic(width: f32, height: f32) -> Self {
        Self {
            position: Vec3::zeros(),
            width,
            height,
            near: -100.0,
            far: 100.0,
        }
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// View matrix (world -> view)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::new_translation(&-self.position)
    }

    /// Projection matrix (view -> clip)
    pub fn projection_matrix(&self) -> Mat4 {
        let half_w = self.width * 0.5;
        let half_h = self.height * 0.5;
        Mat4::new_orthographic(-half_w, half_w, -half_h, half_h, self.near, self.far)
    }

    /// Combined projection * view
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::orthographic(1280.0, 720.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_view_edges_map_to_ndc_edges() {
        let mut camera = Camera::orthographic(200.0, 100.0);
        camera.set_position(Vec3::new(50.0, 0.0, 0.0));
        let vp = camera.view_projection();

        let right = vp.transform_point(&Point3::new(150.0, 0.0, 0.0));
        let top = vp.transform_point(&Point3::new(50.0, 50.0, 0.0));
        let center = vp.transform_point(&Point3::new(50.0, 0.0, 0.0));

        assert_relative_eq!(right.x, 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(top.y, 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(center.x, 0.0, epsilon = 1.0e-5);
    }
}
