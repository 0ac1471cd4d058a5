//! Collision-specific debug visualization settings
//!
//! Colliders draw their outline in one colour while idle and another after a
//! query reported a hit.

use crate::core::config::DebugDrawConfig;
use crate::foundation::math::Vec4;

/// Color scheme for collision visualization
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionDebugColors {
    /// Color for collision shapes (not colliding)
    pub idle: Vec4,

    /// Color for collision shapes (last query hit)
    pub colliding: Vec4,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            idle: Vec4::new(0.0, 1.0, 0.0, 1.0),      // Green
            colliding: Vec4::new(1.0, 0.0, 0.0, 1.0), // Red
        }
    }
}

impl CollisionDebugColors {
    /// Pick the colour for the given collision state
    pub fn color_for(&self, is_colliding: bool) -> Vec4 {
        if is_colliding {
            self.colliding
        } else {
            self.idle
        }
    }
}

/// How a collider outline is drawn
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionDebugStyle {
    /// Whether outlines are drawn at all
    pub enabled: bool,

    /// Idle/colliding colours
    pub colors: CollisionDebugColors,

    /// Segments used for a full circle
    pub circle_segments: usize,

    /// Size of the line buffer each collider allocates
    pub max_outline_vertices: usize,
}

impl Default for CollisionDebugStyle {
    fn default() -> Self {
        Self::from(&DebugDrawConfig::default())
    }
}

impl From<&DebugDrawConfig> for CollisionDebugStyle {
    fn from(config: &DebugDrawConfig) -> Self {
        Self {
            enabled: config.enabled,
            colors: CollisionDebugColors {
                idle: Vec4::from(config.idle_color),
                colliding: Vec4::from(config.colliding_color),
            },
            circle_segments: config.circle_segments,
            max_outline_vertices: config.max_outline_vertices,
        }
    }
}
