//! Debug outline renderer
//!
//! Owns one line buffer on the backend. Acquired when its component is
//! created and handed back when the component is destroyed.

use super::{LineBufferHandle, LineVertex, RenderBackend, RenderContext, RenderError};
use crate::foundation::math::Vec4;

/// Line buffer owner used to draw collider outlines
#[derive(Debug)]
pub struct ShapeRenderer {
    buffer: LineBufferHandle,
    capacity: usize,
}

impl ShapeRenderer {
    /// Allocate a buffer for up to `capacity` line vertices
    pub fn acquire(backend: &mut dyn RenderBackend, capacity: usize) -> Result<Self, RenderError> {
        let buffer = backend.allocate_line_buffer(capacity)?;
        Ok(Self { buffer, capacity })
    }

    /// Return the buffer to the backend
    pub fn release(self, backend: &mut dyn RenderBackend) {
        backend.release_line_buffer(self.buffer);
    }

    /// Backend handle of the owned buffer
    pub fn buffer(&self) -> LineBufferHandle {
        self.buffer
    }

    /// Vertex capacity of the owned buffer
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Submit a line list. Lists longer than the buffer are cut to whole
    /// segments that fit.
    pub fn draw(&self, ctx: &mut RenderContext<'_>, lines: &[LineVertex], color: Vec4) -> Result<(), RenderError> {
        if lines.is_empty() {
            return Ok(());
        }

        let lines = if lines.len() > self.capacity {
            log::warn!(
                "Outline of {} vertices truncated to buffer capacity {}",
                lines.len(),
                self.capacity
            );
            &lines[..self.capacity - self.capacity % 2]
        } else {
            lines
        };

        ctx.backend
            .draw_lines(self.buffer, lines, color, &ctx.camera.view_projection())
    }
}
