//! # Engine Configuration
//!
//! All tunables of the engine in one serializable tree. Any field missing
//! from a config file falls back to its default, so a file only needs to
//! list what it changes.
//!
//! ```toml
//! log_level = "debug"
//! fixed_timestep = 0.016
//!
//! [debug]
//! enabled = true
//! circle_segments = 24
//! colliding_color = [1.0, 0.5, 0.0, 1.0]
//! ```

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};

/// # Debug Draw Configuration
///
/// Controls the collider outline overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugDrawConfig {
    /// Whether collider outlines are drawn
    pub enabled: bool,
    /// Line segments used for a full circle
    pub circle_segments: usize,
    /// RGBA colour of colliders whose last query missed
    pub idle_color: [f32; 4],
    /// RGBA colour of colliders whose last query hit
    pub colliding_color: [f32; 4],
    /// Line vertices each collider reserves in its debug buffer
    pub max_outline_vertices: usize,
}

impl Default for DebugDrawConfig {
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            circle_segments: 32,
            idle_color: [0.0, 1.0, 0.0, 1.0],
            colliding_color: [1.0, 0.0, 0.0, 1.0],
            max_outline_vertices: 128,
        }
    }
}

/// # Animation Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Upper bound of queued animation clips per sprite
    pub max_queued: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { max_queued: 8 }
    }
}

/// # Engine Configuration
///
/// Core engine behavior: logging, frame timing, viewport and the
/// subsystem sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Fixed frame step in seconds; `None` uses wall-clock time
    pub fixed_timestep: Option<f32>,
    /// Viewport width in world units
    pub viewport_width: f32,
    /// Viewport height in world units
    pub viewport_height: f32,
    /// Collider debug overlay
    pub debug: DebugDrawConfig,
    /// Sprite animation limits
    pub animation: AnimationConfig,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            fixed_timestep: None,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            debug: DebugDrawConfig::default(),
            animation: AnimationConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Use a fixed timestep
    pub fn with_fixed_timestep(mut self, step: f32) -> Self {
        self.fixed_timestep = Some(step);
        self
    }

    /// Enable or disable the collider overlay
    pub fn with_debug_draw(mut self, enabled: bool) -> Self {
        self.debug.enabled = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(step) = self.fixed_timestep {
            if !(step > 0.0) {
                return Err(ConfigError::Invalid(format!("fixed_timestep must be positive, got {}", step)));
            }
        }

        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Err(ConfigError::Invalid("Viewport dimensions must be positive".to_string()));
        }

        if self.debug.circle_segments < 3 {
            return Err(ConfigError::Invalid("circle_segments must be at least 3".to_string()));
        }

        // A full circle outline has to fit the collider's buffer
        if self.debug.max_outline_vertices < self.debug.circle_segments * 2 {
            return Err(ConfigError::Invalid(format!(
                "max_outline_vertices ({}) cannot hold a {}-segment circle",
                self.debug.max_outline_vertices, self.debug.circle_segments
            )));
        }

        if self.animation.max_queued == 0 {
            return Err(ConfigError::Invalid("animation.max_queued must be at least 1".to_string()));
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}
