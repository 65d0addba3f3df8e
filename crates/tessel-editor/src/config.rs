//! Startup scene configuration.
//!
//! The scene is read once and handed to [`Editor::new`](crate::Editor::new);
//! nothing here is consulted after startup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canvas::Canvas;

/// A point in device space with an 8-bit style color (`0..=255` per channel).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSpec {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl PointSpec {
    #[inline]
    pub const fn new(x: f32, y: f32, r: f32, g: f32, b: f32) -> Self {
        Self { x, y, r, g, b }
    }
}

/// Colors used when presenting the scene, normalized RGB.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub clear_color: [f32; 3],
    pub border_color: [f32; 3],
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            clear_color: [0.08, 0.08, 0.1],
            border_color: [1.0, 1.0, 1.0],
        }
    }
}

/// Everything needed to build the initial editing session.
///
/// `polygons` entries are validated by the geometry store, so a malformed
/// file surfaces as `InvalidPolygon` rather than a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub canvas: Canvas,
    pub points: Vec<PointSpec>,
    #[serde(default)]
    pub polygons: Vec<Vec<usize>>,
    #[serde(default)]
    pub style: RenderStyle,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scene: {0}")]
    Json(#[from] serde_json::Error),
}

impl SceneConfig {
    pub fn from_json_str(src: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&src)?;
        log::info!(
            "loaded scene {}: {} points, {} polygons",
            path.display(),
            config.points.len(),
            config.polygons.len()
        );
        Ok(config)
    }
}

impl Default for SceneConfig {
    /// Two quads on a 600x600 canvas: a square and a kite sharing no points.
    fn default() -> Self {
        Self {
            canvas: Canvas::new(600.0, 600.0),
            points: vec![
                PointSpec::new(120.0, 120.0, 255.0, 0.0, 0.0),
                PointSpec::new(280.0, 120.0, 0.0, 255.0, 0.0),
                PointSpec::new(280.0, 280.0, 0.0, 0.0, 255.0),
                PointSpec::new(120.0, 280.0, 255.0, 255.0, 0.0),
                PointSpec::new(420.0, 300.0, 255.0, 0.0, 255.0),
                PointSpec::new(520.0, 420.0, 0.0, 255.0, 255.0),
                PointSpec::new(420.0, 520.0, 255.0, 128.0, 0.0),
                PointSpec::new(320.0, 420.0, 128.0, 128.0, 255.0),
            ],
            polygons: vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]],
            style: RenderStyle::default(),
        }
    }
}
