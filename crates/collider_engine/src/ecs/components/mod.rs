//! ECS Components module

pub mod collision;
pub mod sprite_animation;
pub mod tag_registry;

pub use collision::{ColliderComponent, ColliderLookup};
pub use sprite_animation::{AnimationClip, AnimationError, SpriteAnimationComponent};
pub use tag_registry::TagRegistry;
