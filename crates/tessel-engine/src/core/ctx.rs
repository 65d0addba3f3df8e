use winit::window::{Window, WindowId};

use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// What happened to the frame handed to [`FrameCtx::render`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    /// Drawn and queued for display.
    Presented,
    /// The surface was not ready (outdated, lost, timed out); nothing was drawn.
    Skipped,
    /// The surface cannot recover.
    Fatal,
}

impl FrameStatus {
    #[inline]
    pub fn presented(self) -> bool {
        self == FrameStatus::Presented
    }

    /// Runtime control for this outcome: only a fatal surface exits.
    #[inline]
    pub fn control(self) -> AppControl {
        match self {
            FrameStatus::Fatal => AppControl::Exit,
            FrameStatus::Presented | FrameStatus::Skipped => AppControl::Continue,
        }
    }
}

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Clears the surface with `clear`, calls `draw` with a ready [`RenderCtx`]
    /// and [`RenderTarget`], then presents the frame.
    ///
    /// Surface errors skip the frame without calling `draw`. Callers that
    /// track invalidation should treat anything but
    /// [`FrameStatus::Presented`] as not shown.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> FrameStatus
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => FrameStatus::Fatal,
                    _ => FrameStatus::Skipped,
                };
            }
        };

        // Clear pass, dropped before the encoder moves into submit().
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tessel clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.surface_format());

        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        FrameStatus::Presented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_fatal_frames_exit() {
        assert_eq!(FrameStatus::Presented.control(), AppControl::Continue);
        assert_eq!(FrameStatus::Skipped.control(), AppControl::Continue);
        assert_eq!(FrameStatus::Fatal.control(), AppControl::Exit);
    }

    #[test]
    fn skipped_frame_is_not_presented() {
        assert!(FrameStatus::Presented.presented());
        assert!(!FrameStatus::Skipped.presented());
        assert!(!FrameStatus::Fatal.presented());
    }
}
