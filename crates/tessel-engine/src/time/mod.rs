//! Frame timing.
//!
//! One `FrameClock` per window; call `tick()` once per presented frame to
//! obtain a `FrameTime`. Animation code should read `FrameTime::now` rather
//! than sampling the clock itself, so every consumer in a frame sees the same
//! instant.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
