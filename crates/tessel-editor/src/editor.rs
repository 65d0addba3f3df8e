use std::time::Instant;

use glam::Vec2;

use crate::animation::AnimationLoop;
use crate::config::{RenderStyle, SceneConfig};
use crate::controller::InteractionController;
use crate::error::{EditorError, Result};
use crate::geometry::GeometryStore;
use crate::point::PointId;
use crate::render::DrawSurface;
use crate::session::{Command, ModeState};
use crate::transform::TransformState;

/// One editing session: geometry, transform, interaction and mode flags.
///
/// All entry points run on the caller's thread, one at a time. Pointer and
/// frame callbacks are therefore serialized, and the mode gate keeps drags and
/// animation apart so a grab offset never outlives the transform it was
/// measured against.
#[derive(Debug)]
pub struct Editor {
    store: GeometryStore,
    transform: TransformState,
    controller: InteractionController,
    mode: ModeState,
    animation: AnimationLoop,
    style: RenderStyle,

    /// Reused across renders.
    vertices: Vec<f32>,
    dirty: bool,
    hint: Option<&'static str>,
}

impl Editor {
    /// Builds a session from startup configuration.
    pub fn new(config: SceneConfig) -> Result<Self> {
        let store = GeometryStore::from_config(&config)?;

        Ok(Self {
            store,
            transform: TransformState::new(),
            controller: InteractionController::new(),
            mode: ModeState::default(),
            animation: AnimationLoop::new(),
            style: config.style,
            vertices: Vec::new(),
            // Initial load renders once.
            dirty: true,
            hint: None,
        })
    }

    #[inline]
    pub fn store(&self) -> &GeometryStore {
        &self.store
    }

    #[inline]
    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    #[inline]
    pub fn mode(&self) -> ModeState {
        self.mode
    }

    #[inline]
    pub fn dragged(&self) -> Option<PointId> {
        self.controller.dragged()
    }

    /// Last user-facing message, if one is pending.
    #[inline]
    pub fn hint(&self) -> Option<&'static str> {
        self.hint
    }

    // ── pointer input ─────────────────────────────────────────────────────

    /// Forwards a pointer press to the controller when the mode allows it.
    ///
    /// A rejection is returned as `EditorError::ModeRejected` and is also kept
    /// as the pending [`hint`](Self::hint); nothing else changes.
    pub fn pointer_down(&mut self, device: Vec2) -> Result<Option<PointId>> {
        if let Err(rejection) = self.mode.check_pointer_down() {
            log::info!("{rejection}");
            self.hint = Some(rejection.message());
            return Err(EditorError::from(rejection));
        }

        let picked = self.controller.pointer_down(&self.store, &self.transform, device);
        if picked.is_some() {
            self.hint = None;
        }
        Ok(picked)
    }

    /// Drags the picked point. Returns `true` when something moved.
    pub fn pointer_move(&mut self, device: Vec2) -> bool {
        let moved = self.controller.pointer_move(&mut self.store, &self.transform, device);
        if moved {
            self.dirty = true;
        }
        moved
    }

    pub fn pointer_up(&mut self) {
        self.controller.pointer_up();
    }

    // ── commands ──────────────────────────────────────────────────────────

    pub fn apply(&mut self, command: Command, now: Instant) {
        match command {
            Command::ToggleBorder => {
                self.mode.show_border = !self.mode.show_border;
            }
            Command::ToggleAnimation => {
                if self.mode.animating {
                    self.mode.animating = false;
                    self.animation.stop();
                } else {
                    // A drag must not straddle a transform change.
                    self.controller.cancel_drag();
                    self.mode.animating = true;
                    self.animation.start(now, &mut self.transform);
                }
            }
            Command::ToggleEditMode => {
                self.mode.edit_mode = !self.mode.edit_mode;
                if !self.mode.edit_mode {
                    self.controller.cancel_drag();
                }
            }
        }

        log::debug!("{command:?} -> {:?}", self.mode);
        self.dirty = true;
    }

    // ── frame loop ────────────────────────────────────────────────────────

    /// Per-frame callback. Advances the animation when it runs.
    ///
    /// Returns `true` when the transform changed.
    pub fn frame(&mut self, now: Instant) -> bool {
        let ticked = self.animation.fire_live(now, &mut self.transform);
        if ticked {
            self.dirty = true;
        }
        ticked
    }

    /// Whether the next frame should be rendered.
    #[inline]
    pub fn needs_render(&self) -> bool {
        self.dirty || self.mode.animating
    }

    /// Marks the picture stale so the next frame renders again.
    ///
    /// For frames that were drawn into a surface but never shown.
    #[inline]
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Issues one full draw sequence and clears the pending-render flag.
    ///
    /// Call [`invalidate`](Self::invalidate) if the frame is then dropped.
    pub fn render<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        self.store.write_vertex_buffer(&mut self.vertices);
        let triangles = self.store.triangle_count();

        surface.clear(self.style.clear_color);
        surface.upload(&self.vertices);
        surface.set_transform(self.transform.model_matrix());
        surface.draw_filled(triangles);
        if self.mode.show_border {
            surface.draw_wireframe(triangles, self.style.border_color);
        }

        self.dirty = false;
    }
}
