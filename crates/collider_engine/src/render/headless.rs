//! In-memory render backend
//!
//! Keeps line buffers as byte vectors and records every draw. Used by the demo
//! and by tests; a buffer limit simulates allocation failure.

use std::collections::HashMap;

use super::{LineBufferHandle, LineVertex, RenderBackend, RenderError};
use crate::foundation::math::{Mat4, Vec4};

struct LineBuffer {
    capacity: usize,
    bytes: Vec<u8>,
}

/// A draw submission captured by [`HeadlessBackend`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    /// Buffer the vertices were uploaded into
    pub buffer: LineBufferHandle,
    /// Submitted vertices
    pub vertices: Vec<LineVertex>,
    /// Line colour
    pub color: Vec4,
    /// Camera transform at submission time
    pub view_projection: Mat4,
}

/// Backend that renders nothing and remembers everything
#[derive(Default)]
pub struct HeadlessBackend {
    buffers: HashMap<LineBufferHandle, LineBuffer>,
    next_handle: u32,
    max_buffers: Option<usize>,
    draws: Vec<RecordedDraw>,
}

impl HeadlessBackend {
    /// Backend with unlimited buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that refuses to allocate more than `max_buffers` at a time
    pub fn with_buffer_limit(max_buffers: usize) -> Self {
        Self {
            max_buffers: Some(max_buffers),
            ..Self::default()
        }
    }

    /// Buffers currently allocated
    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    /// Draws recorded since the last [`take_draws`](Self::take_draws)
    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    /// Drain the recorded draws, typically once per frame
    pub fn take_draws(&mut self) -> Vec<RecordedDraw> {
        std::mem::take(&mut self.draws)
    }

    /// Raw bytes last uploaded into `handle`
    pub fn buffer_bytes(&self, handle: LineBufferHandle) -> Option<&[u8]> {
        self.buffers.get(&handle).map(|buffer| buffer.bytes.as_slice())
    }
}

impl RenderBackend for HeadlessBackend {
    fn allocate_line_buffer(&mut self, capacity: usize) -> Result<LineBufferHandle, RenderError> {
        if let Some(max) = self.max_buffers {
            if self.buffers.len() >= max {
                return Err(RenderError::ResourceCreationFailed(format!(
                    "line buffer limit of {} reached",
                    max
                )));
            }
        }

        let handle = LineBufferHandle(self.next_handle);
        self.next_handle += 1;
        self.buffers.insert(
            handle,
            LineBuffer {
                capacity,
                bytes: Vec::with_capacity(capacity * std::mem::size_of::<LineVertex>()),
            },
        );
        log::debug!("Allocated line buffer {:?} ({} vertices)", handle, capacity);
        Ok(handle)
    }

    fn release_line_buffer(&mut self, handle: LineBufferHandle) {
        if self.buffers.remove(&handle).is_some() {
            log::debug!("Released line buffer {:?}", handle);
        }
    }

    fn draw_lines(
        &mut self,
        handle: LineBufferHandle,
        vertices: &[LineVertex],
        color: Vec4,
        view_projection: &Mat4,
    ) -> Result<(), RenderError> {
        let buffer = self
            .buffers
            .get_mut(&handle)
            .ok_or(RenderError::UnknownBuffer(handle))?;

        if vertices.len() > buffer.capacity {
            return Err(RenderError::BufferOverflow {
                capacity: buffer.capacity,
                requested: vertices.len(),
            });
        }

        buffer.bytes.clear();
        buffer.bytes.extend_from_slice(bytemuck::cast_slice(vertices));

        self.draws.push(RecordedDraw {
            buffer: handle,
            vertices: vertices.to_vec(),
            color,
            view_projection: *view_projection,
        });
        Ok(())
    }
}
