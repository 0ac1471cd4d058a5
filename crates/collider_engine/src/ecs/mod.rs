//! Entity-Component-System implementation
//!
//! Entities are generational keys into the [`World`], which owns each
//! entity's components and drives their lifecycle.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;

pub use world::{World, WorldError};
pub use entity::Entity;
pub use component::{Component, ComponentError};
pub use components::{ColliderComponent, ColliderLookup, SpriteAnimationComponent, TagRegistry};
