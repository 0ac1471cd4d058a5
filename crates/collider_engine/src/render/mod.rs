//! # Rendering Interface
//!
//! The engine does not own a graphics API. It talks to whatever renders the
//! frame through [`RenderBackend`], which only has to hand out line vertex
//! buffers and draw line lists with a colour under a camera transform.
//!
//! ## Architecture
//!
//! - **RenderBackend**: Trait implemented by the host renderer
//! - **Camera**: Orthographic 2D camera producing the view-projection matrix
//! - **RenderContext**: Per-frame bundle of backend and camera passed to components
//! - **ShapeRenderer**: Owner of one line buffer used for debug outlines
//! - **HeadlessBackend**: In-memory backend that records submissions

pub mod camera;
pub mod headless;
pub mod shape_renderer;

pub use camera::Camera;
pub use headless::{HeadlessBackend, RecordedDraw};
pub use shape_renderer::ShapeRenderer;

use crate::foundation::math::{Mat4, Vec4};
use bytemuck::{Pod, Zeroable};
use thiserror::Error;

/// Opaque handle of a line vertex buffer owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineBufferHandle(pub u32);

/// Vertex layout of debug line lists
///
/// Two consecutive vertices form one line segment.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    /// World-space position
    pub position: [f32; 3],
}

impl LineVertex {
    /// Creates a vertex at the given position
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z] }
    }
}

/// Rendering collaborator consumed by the engine
pub trait RenderBackend {
    /// Allocate a buffer able to hold `capacity` line vertices
    fn allocate_line_buffer(&mut self, capacity: usize) -> Result<LineBufferHandle, RenderError>;

    /// Release a buffer. Unknown handles are ignored.
    fn release_line_buffer(&mut self, handle: LineBufferHandle);

    /// Upload `vertices` into the buffer and draw them as a line list
    fn draw_lines(
        &mut self,
        handle: LineBufferHandle,
        vertices: &[LineVertex],
        color: Vec4,
        view_projection: &Mat4,
    ) -> Result<(), RenderError>;
}

/// Everything a component needs to draw itself for one frame
pub struct RenderContext<'a> {
    /// Backend receiving draw submissions
    pub backend: &'a mut dyn RenderBackend,
    /// Camera of the current frame
    pub camera: &'a Camera,
}

impl<'a> RenderContext<'a> {
    /// Bundle a backend and camera for one frame
    pub fn new(backend: &'a mut dyn RenderBackend, camera: &'a Camera) -> Self {
        Self { backend, camera }
    }
}

/// Render-specific error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Resource creation or management failed
    ///
    /// Occurs when the backend cannot provide another buffer, typically
    /// due to memory constraints.
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// A handle that the backend never issued, or already released
    #[error("Unknown line buffer {0:?}")]
    UnknownBuffer(LineBufferHandle),

    /// More vertices submitted than the buffer was allocated for
    #[error("Line buffer holds {capacity} vertices, {requested} submitted")]
    BufferOverflow {
        /// Capacity given at allocation
        capacity: usize,
        /// Vertices in the rejected submission
        requested: usize,
    },
}
