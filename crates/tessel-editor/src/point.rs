use glam::{Vec2, Vec3};
use slotmap::new_key_type;

use crate::canvas::Canvas;
use crate::error::{EditorError, Result};

/// Default picking radius in normalized device units.
///
/// The radius is absolute: it does not follow the current scale, so a shrunk
/// figure is comparatively easier to hit.
pub const PICK_RADIUS: f32 = 0.1;

new_key_type! {
    /// Stable handle to a point owned by a [`GeometryStore`](crate::geometry::GeometryStore).
    pub struct PointId;
}

/// A colored vertex.
///
/// `position` is in normalized device space when created. Dragging may later
/// move it outside `[-1, 1]`; that is allowed and never re-validated.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub position: Vec2,
    /// Normalized RGB, each channel in `[0, 1]`.
    pub color: Vec3,
}

impl Point {
    /// Creates a point from a device-space position.
    ///
    /// Fails when the position lies outside the canvas.
    pub fn from_device(device: Vec2, canvas: Canvas) -> Result<Self> {
        if !device.is_finite() || !canvas.contains(device) {
            return Err(EditorError::out_of_bounds(format!(
                "position ({}, {}) is outside the {}x{} canvas",
                device.x, device.y, canvas.width, canvas.height
            )));
        }

        Ok(Self {
            position: canvas.to_normalized(device),
            color: Vec3::ZERO,
        })
    }

    /// Sets the color from 8-bit style channel values (`0..=255`).
    ///
    /// On failure the previous color is kept.
    pub fn set_color(&mut self, r: f32, g: f32, b: f32) -> Result<()> {
        for (name, v) in [("red", r), ("green", g), ("blue", b)] {
            if !v.is_finite() || !(0.0..=255.0).contains(&v) {
                return Err(EditorError::out_of_bounds(format!(
                    "{name} component {v} is outside 0..=255"
                )));
            }
        }

        self.color = Vec3::new(r, g, b) / 255.0;
        Ok(())
    }

    /// Strict Euclidean proximity test in normalized space.
    #[inline]
    pub fn is_near(&self, p: Vec2, radius: f32) -> bool {
        self.position.distance(p) < radius
    }

    /// The six interleaved floats `[x, y, z, r, g, b]` uploaded per vertex.
    #[inline]
    pub fn vertex(&self) -> [f32; 6] {
        [
            self.position.x,
            self.position.y,
            0.0,
            self.color.x,
            self.color.y,
            self.color.z,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(400.0, 400.0)
    }

    #[test]
    fn from_device_converts_to_normalized() {
        let p = Point::from_device(Vec2::new(100.0, 100.0), canvas()).unwrap();
        assert_eq!(p.position, Vec2::new(-0.5, 0.5));
        assert_eq!(p.color, Vec3::ZERO);
    }

    #[test]
    fn from_device_rejects_outside_canvas() {
        let err = Point::from_device(Vec2::new(401.0, 10.0), canvas()).unwrap_err();
        assert!(matches!(err, EditorError::OutOfBounds(_)));
        assert!(Point::from_device(Vec2::new(10.0, -1.0), canvas()).is_err());
        assert!(Point::from_device(Vec2::new(f32::NAN, 10.0), canvas()).is_err());
    }

    #[test]
    fn from_device_accepts_canvas_edges() {
        let p = Point::from_device(Vec2::new(400.0, 0.0), canvas()).unwrap();
        assert_eq!(p.position, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn set_color_normalizes_channels() {
        let mut p = Point::from_device(Vec2::new(200.0, 200.0), canvas()).unwrap();
        p.set_color(255.0, 0.0, 51.0).unwrap();
        assert_eq!(p.color, Vec3::new(1.0, 0.0, 0.2));
    }

    #[test]
    fn set_color_rejects_out_of_range_and_keeps_previous() {
        let mut p = Point::from_device(Vec2::new(200.0, 200.0), canvas()).unwrap();
        p.set_color(0.0, 255.0, 0.0).unwrap();

        assert!(matches!(p.set_color(256.0, 0.0, 0.0), Err(EditorError::OutOfBounds(_))));
        assert!(p.set_color(0.0, -1.0, 0.0).is_err());
        assert!(p.set_color(0.0, 0.0, f32::INFINITY).is_err());
        assert_eq!(p.color, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn is_near_is_strict() {
        let p = Point { position: Vec2::ZERO, color: Vec3::ZERO };
        assert!(p.is_near(Vec2::new(0.05, 0.05), PICK_RADIUS));
        assert!(!p.is_near(Vec2::new(0.5, 0.0), PICK_RADIUS));
        // Exactly on the radius is not near.
        assert!(!p.is_near(Vec2::new(0.5, 0.0), 0.5));
    }

    #[test]
    fn vertex_interleaves_position_depth_and_color() {
        let p = Point { position: Vec2::new(0.25, -0.5), color: Vec3::new(1.0, 0.5, 0.0) };
        assert_eq!(p.vertex(), [0.25, -0.5, 0.0, 1.0, 0.5, 0.0]);
    }
}
