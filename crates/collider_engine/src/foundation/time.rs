//! Frame timing

use std::time::Instant;

/// Frame timer. Either measures wall-clock time or advances by a fixed step.
pub struct Timer {
    last_frame: Instant,
    fixed_step: Option<f32>,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a wall-clock timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            fixed_step: None,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Create a timer that reports the same delta every frame
    pub fn fixed(step: f32) -> Self {
        Self {
            fixed_step: Some(step),
            ..Self::new()
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = match self.fixed_step {
            Some(step) => step,
            None => now.duration_since(self.last_frame).as_secs_f32(),
        };
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_timer_accumulates() {
        let mut timer = Timer::fixed(0.25);
        timer.update();
        timer.update();
        assert_eq!(timer.frame_count(), 2);
        assert_relative_eq!(timer.delta_time(), 0.25);
        assert_relative_eq!(timer.total_time(), 0.5);
    }
}
