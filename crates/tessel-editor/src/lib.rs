//! Tessel editor core.
//!
//! Colored points grouped into quads, each quad drawn as two triangles. The
//! figure can be dragged point by point or animated with a rotate/scale
//! transform; picking works through that transform.
//!
//! This crate has no GPU or windowing code. Rendering goes through the
//! [`DrawSurface`] trait and input arrives as plain device-space positions and
//! [`Command`]s.

pub mod animation;
pub mod canvas;
pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod point;
pub mod render;
pub mod session;
pub mod transform;

pub use animation::{AnimationHandle, AnimationLoop};
pub use canvas::Canvas;
pub use config::{ConfigError, PointSpec, RenderStyle, SceneConfig};
pub use controller::{DragSession, InteractionController, to_model_space, to_screen_space};
pub use editor::Editor;
pub use error::EditorError;
pub use geometry::{GeometryStore, Triangle, TriangleId};
pub use point::{PICK_RADIUS, Point, PointId};
pub use render::{DrawOp, DrawSurface, RecordingSurface};
pub use session::{Command, ModeRejection, ModeState};
pub use transform::TransformState;
