use std::time::Instant;

use glam::Vec2;
use tessel_editor::{Command, Editor};
use tessel_engine::core::{App, AppControl, FrameCtx};
use tessel_engine::input::{
    InputEvent, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent,
};
use tessel_engine::paint::Color;
use tessel_engine::render::MeshRenderer;
use winit::window::WindowId;

use crate::surface::FrameSurface;

/// Engine app driving one editor session.
pub struct StudioApp {
    editor: Editor,
    surface: FrameSurface,
    mesh: MeshRenderer,

    /// Hint currently shown in the window title.
    shown_hint: Option<&'static str>,
}

impl StudioApp {
    pub fn new(editor: Editor) -> Self {
        Self {
            editor,
            surface: FrameSurface::new(),
            mesh: MeshRenderer::new(),
            shown_hint: None,
        }
    }

    fn on_key(&mut self, key: Key) -> AppControl {
        let command = match key {
            Key::Escape => return AppControl::Exit,
            Key::Char('b') => Command::ToggleBorder,
            Key::Char('a') | Key::Space => Command::ToggleAnimation,
            Key::Char('e') => Command::ToggleEditMode,
            other => {
                log::trace!("unbound key {other}");
                return AppControl::Continue;
            }
        };
        self.editor.apply(command, Instant::now());
        AppControl::Continue
    }

    fn on_left_button(&mut self, ev: &PointerButtonEvent) {
        match (ev.state, ev.position) {
            (MouseButtonState::Pressed, Some((x, y))) => {
                // Rejections are logged and kept as the editor's hint.
                let _ = self.editor.pointer_down(Vec2::new(x, y));
            }
            (MouseButtonState::Pressed, None) => log::debug!("press without pointer position ignored"),
            (MouseButtonState::Released, _) => self.editor.pointer_up(),
        }
    }
}

impl App for StudioApp {
    fn on_input(&mut self, _window_id: WindowId, event: &InputEvent) -> AppControl {
        match event {
            // Chorded keys belong to the platform (e.g. Ctrl+A).
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                repeat: false,
                modifiers,
            } if !modifiers.any() => return self.on_key(*key),

            InputEvent::PointerButton(ev) if ev.button == MouseButton::Left => self.on_left_button(ev),

            InputEvent::PointerMoved(ev) => {
                self.editor.pointer_move(Vec2::new(ev.x, ev.y));
            }

            // The release may never arrive.
            InputEvent::Focused(false) => self.editor.pointer_up(),

            _ => {}
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.editor.frame(ctx.time.now);

        let hint = self.editor.hint();
        if hint != self.shown_hint {
            let title = match hint {
                Some(h) => format!("tessel - {h}"),
                None => "tessel".to_string(),
            };
            ctx.window.window.set_title(&title);
            self.shown_hint = hint;
        }

        self.editor.render(&mut self.surface);

        let draw = self.surface.mesh_draw();
        let mesh = &mut self.mesh;
        let status = ctx.render(Color::opaque(self.surface.clear), |rctx, target| {
            mesh.render(rctx, target, &draw);
        });

        if !status.presented() {
            log::debug!("frame not presented ({status:?}), redrawing");
            self.editor.invalidate();
        }
        status.control()
    }

    fn wants_redraw(&self) -> bool {
        self.editor.needs_render()
    }
}
