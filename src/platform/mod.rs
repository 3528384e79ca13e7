//! Platform abstraction layer
//!
//! Handles the host side of the game loop:
//! - Time/ticks (monotonic clock, frame limiting)
//! - Input events (raw keys and pointer into per-tick input)

pub mod input;
pub mod time;

pub use input::{InputCollector, Key};
pub use time::{FrameLimiter, SystemClock};
