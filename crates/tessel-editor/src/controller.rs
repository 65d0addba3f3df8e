//! Picking and dragging under the animated transform.
//!
//! Three spaces are involved:
//! - device: window pixels, top-left origin, +Y down
//! - screen: normalized device coordinates, what ends up on the display
//! - model: where points are stored, mapped to screen by the model matrix

use glam::{Vec2, Vec3};

use crate::canvas::Canvas;
use crate::geometry::GeometryStore;
use crate::point::{PICK_RADIUS, PointId};
use crate::transform::TransformState;

/// Maps a device-space position into model space.
pub fn to_model_space(canvas: Canvas, transform: &TransformState, device: Vec2) -> Vec2 {
    unproject(transform, canvas.to_normalized(device))
}

/// Maps a model-space position to where it is displayed (normalized space).
pub fn to_screen_space(transform: &TransformState, model: Vec2) -> Vec2 {
    transform
        .model_matrix()
        .transform_point3(Vec3::new(model.x, model.y, 0.0))
        .truncate()
}

fn unproject(transform: &TransformState, screen: Vec2) -> Vec2 {
    transform
        .inverse_model_matrix()
        .transform_point3(Vec3::new(screen.x, screen.y, 0.0))
        .truncate()
}

/// An in-progress drag.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragSession {
    pub point: PointId,
    /// Pointer minus point, in screen space. Fixed for the whole drag.
    pub grab_offset: Vec2,
}

/// Pointer-driven point picking and dragging.
///
/// The grab offset is captured against the transform at pointer-down time,
/// so the transform must stay frozen while a drag is active.
#[derive(Debug, Default, Clone)]
pub struct InteractionController {
    drag: Option<DragSession>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    #[inline]
    pub fn dragged(&self) -> Option<PointId> {
        self.drag.map(|d| d.point)
    }

    /// Starts a drag on the first point (insertion order) under the pointer.
    ///
    /// Overlapping pick circles are not disambiguated by distance: the
    /// earliest inserted point wins. A miss clears any previous drag.
    pub fn pointer_down(
        &mut self,
        store: &GeometryStore,
        transform: &TransformState,
        device: Vec2,
    ) -> Option<PointId> {
        let canvas = store.canvas();
        let clicked_screen = canvas.to_normalized(device);
        let clicked_model = unproject(transform, clicked_screen);

        self.drag = store
            .iter_points()
            .find(|(_, p)| p.is_near(clicked_model, PICK_RADIUS))
            .map(|(id, p)| DragSession {
                point: id,
                grab_offset: clicked_screen - to_screen_space(transform, p.position),
            });

        match self.drag {
            Some(d) => log::debug!(
                "picked point {:?} (grab offset {:?})",
                d.point,
                d.grab_offset
            ),
            None => log::trace!("no point under pointer at {device:?}"),
        }

        self.dragged()
    }

    /// Moves the dragged point so it keeps its grab offset to the pointer.
    ///
    /// Returns `true` when a point moved.
    pub fn pointer_move(
        &mut self,
        store: &mut GeometryStore,
        transform: &TransformState,
        device: Vec2,
    ) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };

        let target = store.canvas().to_normalized(device) - drag.grab_offset;
        let model = unproject(transform, target);

        if store.set_point_position(drag.point, model) {
            true
        } else {
            // The store the drag was started on is gone.
            self.drag = None;
            false
        }
    }

    /// Ends the drag. Idempotent.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Drops an active drag without further moves. Same as `pointer_up`.
    pub fn cancel_drag(&mut self) {
        if let Some(d) = self.drag.take() {
            log::debug!("drag of point {:?} cancelled", d.point);
        }
    }
}
