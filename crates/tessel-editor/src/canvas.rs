use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fixed drawing surface size in device space (logical pixels).
///
/// Device space has its origin at the top-left corner with +Y pointing down.
/// Normalized device space spans `[-1, 1]` on both axes with +Y pointing up,
/// so every conversion between the two flips the Y axis.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Inclusive containment: `[0, width] x [0, height]`.
    #[inline]
    pub fn contains(self, device: Vec2) -> bool {
        device.x >= 0.0 && device.x <= self.width && device.y >= 0.0 && device.y <= self.height
    }

    /// Maps a device-space position to normalized device space.
    ///
    /// No bounds check: positions outside the canvas map outside `[-1, 1]`.
    /// The arithmetic runs in `f64`; only the result is rounded to `f32`.
    #[inline]
    pub fn to_normalized(self, device: Vec2) -> Vec2 {
        let (half_w, half_h) = self.half_extents();
        Vec2::new(
            ((f64::from(device.x) - half_w) / half_w) as f32,
            ((half_h - f64::from(device.y)) / half_h) as f32,
        )
    }

    /// Inverse of [`to_normalized`](Self::to_normalized).
    ///
    /// The round trip `to_device(to_normalized(d))` is not bit exact: the
    /// normalized value is stored as `f32`, which cannot represent most
    /// quotients. For any `d` on the canvas each axis comes back within
    /// [`round_trip_tolerance`](Self::round_trip_tolerance) of the input.
    #[inline]
    pub fn to_device(self, ndc: Vec2) -> Vec2 {
        let (half_w, half_h) = self.half_extents();
        Vec2::new(
            (f64::from(ndc.x) * half_w + half_w) as f32,
            (half_h - f64::from(ndc.y) * half_h) as f32,
        )
    }

    /// Per-axis bound, in device pixels, on the device round-trip error.
    ///
    /// One `f32` epsilon of the larger canvas side: about a ten-thousandth of
    /// a pixel on a 1000 pixel canvas.
    #[inline]
    pub fn round_trip_tolerance(self) -> f32 {
        self.width.max(self.height) * f32::EPSILON
    }

    #[inline]
    fn half_extents(self) -> (f64, f64) {
        (f64::from(self.width) * 0.5, f64::from(self.height) * 0.5)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(600.0, 600.0)
    }
}
