//! Core engine implementation

use crate::{
    application::{AppError, Application},
    config::ConfigError,
    core::config::EngineConfig,
    debug::CollisionDebugStyle,
    ecs::{Component, Entity, World, WorldError},
    foundation::time::Timer,
    render::{Camera, RenderBackend, RenderContext},
};
use thiserror::Error;

/// Main engine struct
///
/// Owns the world, the render backend and the frame timer, and drives the
/// component lifecycle frame by frame.
pub struct Engine {
    /// ECS world containing all entities and components
    pub world: World,

    /// Host renderer
    backend: Box<dyn RenderBackend>,

    /// Camera used for debug drawing
    camera: Camera,

    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig, backend: Box<dyn RenderBackend>) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");
        config.validate()?;

        let camera = Camera::orthographic(config.viewport_width, config.viewport_height);
        let timer = match config.fixed_timestep {
            Some(step) => Timer::fixed(step),
            None => Timer::new(),
        };

        Ok(Self {
            world: World::new(),
            backend,
            camera,
            timer,
            config,
            running: true,
        })
    }

    /// Run the main loop until [`quit`](Self::quit) is called or
    /// `max_frames` frames have run
    pub fn run<T: Application>(&mut self, app: &mut T, max_frames: Option<u64>) -> Result<(), EngineError> {
        self.running = true;
        app.initialize(self).map_err(|e| EngineError::Application(Box::new(e)))?;

        log::info!("Starting main loop...");

        let mut result = Ok(());
        while self.running && max_frames.map_or(true, |max| self.timer.frame_count() < max) {
            self.timer.update();
            let delta_time = self.timer.delta_time();
            if let Err(e) = self.step(app, delta_time) {
                result = Err(e);
                break;
            }
        }

        app.cleanup(self);
        self.shutdown();

        log::info!("Engine shutdown complete after {} frames", self.timer.frame_count());
        result
    }

    /// Run a single frame: application update, world update, render
    pub fn step<T: Application>(&mut self, app: &mut T, delta_time: f32) -> Result<(), EngineError> {
        app.update(self, delta_time)
            .map_err(|e| EngineError::Application(Box::new(e)))?;

        self.world.update(delta_time);

        app.render(self).map_err(|e| EngineError::Application(Box::new(e)))
    }

    /// Draw every component of the world
    pub fn render(&mut self) {
        let mut ctx = RenderContext::new(self.backend.as_mut(), &self.camera);
        self.world.render(&mut ctx);
    }

    /// Create `component` and attach it to `entity`
    pub fn add_component<C: Component>(&mut self, entity: Entity, component: C) -> Result<(), WorldError> {
        self.world.add_component(entity, component, self.backend.as_mut())
    }

    /// Create an entity holding `component`. The entity is removed again if
    /// the component fails to create.
    pub fn spawn<C: Component>(&mut self, component: C) -> Result<Entity, WorldError> {
        let entity = self.world.create_entity();
        if let Err(e) = self.add_component(entity, component) {
            self.world.destroy_entity(entity, self.backend.as_mut());
            return Err(e);
        }
        Ok(entity)
    }

    /// Destroy `entity` and release its resources
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        self.world.destroy_entity(entity, self.backend.as_mut())
    }

    /// Destroy every entity
    pub fn shutdown(&mut self) {
        self.world.clear(self.backend.as_mut());
        self.running = false;
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the main loop keeps going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the ECS world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the ECS world
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Camera used for debug drawing
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Get mutable access to the render backend
    pub fn backend_mut(&mut self) -> &mut dyn RenderBackend {
        self.backend.as_mut()
    }

    /// Configuration the engine was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Outline style configured for colliders
    pub fn collider_debug_style(&self) -> CollisionDebugStyle {
        CollisionDebugStyle::from(&self.config.debug)
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration rejected at startup
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Entity or component setup failed
    #[error("World error: {0}")]
    World(#[from] WorldError),

    /// Application hook failed
    #[error("Application error: {0}")]
    Application(Box<AppError>),
}
