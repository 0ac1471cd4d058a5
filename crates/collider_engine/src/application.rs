//! Application trait and lifecycle management

use crate::config::ConfigError;
use crate::ecs::components::AnimationError;
use crate::ecs::WorldError;
use crate::engine::{Engine, EngineError};
use crate::physics::collision::GeometryError;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive gameplay from the engine loop.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first frame. Spawn entities and attach
    /// components here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame before the world updates.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Render the application
    ///
    /// Called after update. The default draws every component of the world.
    fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        engine.render();
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once after the last frame, before the world is torn down.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Entity or component setup failed
    #[error("World error: {0}")]
    World(#[from] WorldError),

    /// Collider geometry was rejected
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Animation misuse
    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),
}
