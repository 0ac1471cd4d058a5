//! Component lifecycle trait

use std::any::Any;

use thiserror::Error;

use crate::render::{RenderBackend, RenderContext, RenderError};

/// Lifecycle shared by every component an entity can hold
///
/// The world calls `on_create` once when the component is attached,
/// `update` and `render` once per frame, and `on_destroy` when the entity
/// goes away.
pub trait Component: Any {
    /// Acquire resources. A component whose creation fails is not attached.
    fn on_create(&mut self, backend: &mut dyn RenderBackend) -> Result<(), ComponentError>;

    /// Release resources. Must be safe to call more than once.
    fn on_destroy(&mut self, backend: &mut dyn RenderBackend);

    /// Per-frame logic
    fn update(&mut self, delta_time: f32);

    /// Per-frame drawing
    fn render(&self, ctx: &mut RenderContext<'_>);

    /// Downcast support
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Name used in logs
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Component lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// Render resources could not be acquired at creation
    #[error("{component} could not acquire render resources: {source}")]
    ResourceAcquisition {
        /// Component that failed
        component: &'static str,
        /// Backend failure
        #[source]
        source: RenderError,
    },
}
