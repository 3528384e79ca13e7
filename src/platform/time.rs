//! Monotonic wall clock and frame pacing

use std::time::{Duration, Instant};

use crate::sim::clock::{Clock, Millis};

/// Milliseconds since construction, from `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.start.elapsed().as_millis() as Millis
    }
}

/// Sleeps so frames start at a steady rate
#[derive(Debug)]
pub struct FrameLimiter {
    frame: Duration,
    last: Instant,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Self::frame_duration(fps),
            last: Instant::now(),
        }
    }

    /// Length of one frame at `fps` (clamped to at least 1 fps)
    pub fn frame_duration(fps: u32) -> Duration {
        Duration::from_secs(1) / fps.max(1)
    }

    /// Wait out the rest of the current frame and return the time since
    /// the previous call
    pub fn wait(&mut self) -> Duration {
        let spent = self.last.elapsed();
        if spent < self.frame {
            std::thread::sleep(self.frame - spent);
        }
        let now = Instant::now();
        let delta = now - self.last;
        self.last = now;
        delta
    }
}
