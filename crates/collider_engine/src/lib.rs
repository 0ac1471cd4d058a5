//! # Collider Engine
//!
//! A small 2D entity engine built around tagged colliders.
//!
//! ## Features
//!
//! - **Collider shapes**: circle, axis-aligned box, capsule and convex polygon
//!   with exact, symmetric narrow-phase tests between every pair
//! - **Tagged queries**: each collider keeps a registry of peers labelled with
//!   a character and can ask whether it touches any peer with a given label
//! - **Component lifecycle**: create / update / render / destroy driven by the
//!   [`ecs::World`], with debug outlines drawn through a pluggable
//!   [`render::RenderBackend`]
//! - **Configuration**: TOML or RON files via [`config::Config`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use collider_engine::prelude::*;
//!
//! struct MyApp {
//!     player: Option<Entity>,
//! }
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let wall = {
//!             let mut c = ColliderComponent::new(Vec3::new(10.0, 0.0, 0.0)).with_tag('W');
//!             c.add_aabb(Vec3::new(10.0, -5.0, 0.0), 1.0, 10.0);
//!             engine.spawn(c)?
//!         };
//!         let mut player = ColliderComponent::new(Vec3::zeros()).with_tag('P');
//!         player.add_circle(Vec3::zeros(), 1.0);
//!         player.register_peer(wall, 'W');
//!         self.player = Some(engine.spawn(player)?);
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         let world = engine.world();
//!         if let Some(player) = self.player.and_then(|e| world.get_component::<ColliderComponent>(e)) {
//!             if player.is_colliding_with_tag('W', world) {
//!                 engine.quit();
//!             }
//!         }
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let mut engine = Engine::new(config, Box::new(HeadlessBackend::new()))?;
//!     engine.run(&mut MyApp { player: None }, Some(60))?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod ecs;
pub mod physics;
pub mod render;
pub mod debug;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineError,
        core::config::{Config, EngineConfig, DebugDrawConfig, AnimationConfig},
        foundation::{
            math::{Vec2, Vec3, Vec4, Mat4},
            time::Timer,
        },
        ecs::{
            World, Entity, Component, ColliderComponent, ColliderLookup,
            SpriteAnimationComponent, TagRegistry,
        },
        physics::collision::{ColliderShape, ShapeKind},
        render::{Camera, HeadlessBackend, RenderBackend, RenderContext},
        debug::CollisionDebugStyle,
    };
}
