//! Debug module for visualization tools

pub mod draw;
pub mod collision_debug;

pub use draw::{shape_outline, OutlineBuilder};
pub use collision_debug::{CollisionDebugColors, CollisionDebugStyle};
