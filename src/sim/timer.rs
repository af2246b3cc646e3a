//! Millisecond countdown timer driven by frame time

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    duration_ms: f32,
    elapsed_ms: f32,
}

impl Timer {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            duration_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Timer that only measures elapsed time
    pub fn stopwatch() -> Self {
        Self::new(f32::INFINITY)
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed_ms += dt;
    }

    pub fn expired(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed_ms
    }

    pub fn duration(&self) -> f32 {
        self.duration_ms
    }

    /// Change the target without touching elapsed time
    pub fn set_duration(&mut self, duration_ms: f32) {
        self.duration_ms = duration_ms;
    }
}
