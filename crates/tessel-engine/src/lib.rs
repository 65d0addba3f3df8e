//! Tessel engine crate.
//!
//! Platform + GPU runtime: one winit window per app, a wgpu device bound to
//! it, translated input, frame timing and a colored-mesh renderer.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;
