//! Sprite animation component
//!
//! Named frame ranges ("clips") are defined up front and queued with
//! [`SpriteAnimationComponent::play`]. The clip at the front of the queue
//! plays through once and hands over to the next one; the last queued clip
//! loops. The queue is bounded, so spamming `play` drops the oldest
//! pending clips instead of growing without limit.

use std::any::Any;
use std::collections::{HashMap, VecDeque};

use thiserror::Error;

use crate::core::config::AnimationConfig;
use crate::ecs::component::{Component, ComponentError};
use crate::render::{RenderBackend, RenderContext};

/// Animation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// No clip with that name was defined
    #[error("unknown animation '{0}'")]
    UnknownClip(String),

    /// Frame range runs backwards
    #[error("invalid frame range {start}..={end}")]
    InvalidRange {
        /// First frame of the rejected range
        start: u32,
        /// Last frame of the rejected range
        end: u32,
    },
}

/// Inclusive frame range played at a fixed rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationClip {
    /// First frame, included
    pub start_frame: u32,
    /// Last frame, included
    pub end_frame: u32,
    /// Milliseconds each frame stays on screen
    pub frame_time_ms: u32,
}

#[derive(Debug, Clone)]
struct Queued {
    name: String,
    clip: AnimationClip,
}

/// Component playing queued sprite animation clips
#[derive(Debug, Clone)]
pub struct SpriteAnimationComponent {
    clips: HashMap<String, AnimationClip>,
    queue: VecDeque<Queued>,
    max_queued: usize,
    current_frame: u32,
    elapsed_ms: f32,
}

impl Default for SpriteAnimationComponent {
    fn default() -> Self {
        Self::from_config(&AnimationConfig::default())
    }
}

impl SpriteAnimationComponent {
    /// Component holding at most `max_queued` clips (at least one)
    pub fn new(max_queued: usize) -> Self {
        Self {
            clips: HashMap::new(),
            queue: VecDeque::new(),
            max_queued: max_queued.max(1),
            current_frame: 0,
            elapsed_ms: 0.0,
        }
    }

    /// Component bounded by the configured queue length
    pub fn from_config(config: &AnimationConfig) -> Self {
        Self::new(config.max_queued)
    }

    /// Define or redefine a clip
    pub fn define_animation(
        &mut self,
        name: impl Into<String>,
        start_frame: u32,
        end_frame: u32,
        frame_time_ms: u32,
    ) -> Result<(), AnimationError> {
        if start_frame > end_frame {
            return Err(AnimationError::InvalidRange {
                start: start_frame,
                end: end_frame,
            });
        }
        self.clips.insert(
            name.into(),
            AnimationClip {
                start_frame,
                end_frame,
                frame_time_ms,
            },
        );
        Ok(())
    }

    /// Look up a defined clip
    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.get(name)
    }

    /// Queue a defined clip. Starts immediately if nothing is playing.
    pub fn play(&mut self, name: &str) -> Result<(), AnimationError> {
        let clip = *self
            .clips
            .get(name)
            .ok_or_else(|| AnimationError::UnknownClip(name.to_string()))?;

        if self.queue.len() >= self.max_queued {
            if let Some(dropped) = self.queue.pop_front() {
                log::debug!("Animation queue full, dropping '{}'", dropped.name);
            }
            if let Some(front) = self.queue.front() {
                self.current_frame = front.clip.start_frame;
                self.elapsed_ms = 0.0;
            }
        }

        if self.queue.is_empty() {
            self.current_frame = clip.start_frame;
            self.elapsed_ms = 0.0;
        }
        self.queue.push_back(Queued {
            name: name.to_string(),
            clip,
        });
        Ok(())
    }

    /// Stop and forget every queued clip
    pub fn clear(&mut self) {
        self.queue.clear();
        self.elapsed_ms = 0.0;
    }

    /// Name of the clip playing now
    pub fn current_clip(&self) -> Option<&str> {
        self.queue.front().map(|q| q.name.as_str())
    }

    /// Frame to draw
    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    /// Clips in the queue, including the one playing
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Queue bound
    pub fn max_queued(&self) -> usize {
        self.max_queued
    }

    /// Advance playback by `delta_time` seconds.
    ///
    /// Runs in time proportional to the number of queued clips, however
    /// large the step is.
    pub fn advance(&mut self, delta_time: f32) {
        if self.queue.is_empty() {
            return;
        }
        self.elapsed_ms += delta_time.max(0.0) * 1000.0;

        while let Some(front) = self.queue.front() {
            let clip = front.clip;
            let frame_time = clip.frame_time_ms.max(1) as f32;
            let steps = (self.elapsed_ms / frame_time).floor();
            if steps < 1.0 {
                return;
            }
            let remaining = clip.end_frame.saturating_sub(self.current_frame);

            if self.queue.len() > 1 && steps > remaining as f32 {
                // Finish this clip and hand the leftover time to the next one
                self.elapsed_ms -= (remaining as f32 + 1.0) * frame_time;
                self.queue.pop_front();
                if let Some(next) = self.queue.front() {
                    self.current_frame = next.clip.start_frame;
                    log::trace!("Animation '{}' started", next.name);
                }
                continue;
            }

            if self.queue.len() > 1 {
                self.current_frame += steps as u32;
            } else {
                let length = u64::from(clip.end_frame - clip.start_frame) + 1;
                let offset = u64::from(self.current_frame.saturating_sub(clip.start_frame));
                self.current_frame = clip.start_frame + ((offset + steps as u64 % length) % length) as u32;
            }
            self.elapsed_ms %= frame_time;
            return;
        }
    }
}

impl Component for SpriteAnimationComponent {
    fn on_create(&mut self, _backend: &mut dyn RenderBackend) -> Result<(), ComponentError> {
        Ok(())
    }

    fn on_destroy(&mut self, _backend: &mut dyn RenderBackend) {
        self.clear();
    }

    fn update(&mut self, delta_time: f32) {
        self.advance(delta_time);
    }

    // Sprites are drawn by the host renderer from `current_frame`
    fn render(&self, _ctx: &mut RenderContext<'_>) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "SpriteAnimationComponent"
    }
}
