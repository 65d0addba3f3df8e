//! Tessel studio: interactive quad editor.
//!
//! Usage: `tessel-studio [scene.json]`
//!
//! Keys: `B` border, `A`/`Space` animation, `E` edit mode, `Escape` quit.

mod app;
mod surface;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tessel_editor::{Editor, SceneConfig};
use tessel_engine::device::GpuInit;
use tessel_engine::logging::{init_logging, LoggingConfig};
use tessel_engine::window::{Runtime, RuntimeConfig};

use crate::app::StudioApp;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let scene = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => SceneConfig::load(&path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => SceneConfig::default(),
    };

    let editor = Editor::new(scene).context("scene rejected")?;
    let canvas = editor.store().canvas();

    let config = RuntimeConfig::new("tessel", canvas.width as f64, canvas.height as f64)
        .with_resizable(false);

    // Vertex colors are display values; skip the sRGB encode on write.
    let gpu_init = GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    };

    Runtime::run(config, gpu_init, StudioApp::new(editor))
}
