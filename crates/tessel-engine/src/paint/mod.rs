//! Color model shared between the application and renderers.

pub mod color;

pub use color::Color;
