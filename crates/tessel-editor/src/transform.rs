use std::time::Instant;

use glam::{Mat4, Vec3};

/// Rotation speed of the animation.
pub const ROTATION_SPEED_DEG_PER_SEC: f32 = 45.0;

/// Scale change per second of animation, in either direction.
pub const SCALE_SPEED_PER_SEC: f32 = 0.2;

pub const MIN_SCALE: f32 = 0.2;
pub const MAX_SCALE: f32 = 1.0;

/// Animated rotate/scale transform applied to the whole figure.
///
/// Invariants:
/// - `angle_deg` stays in `[0, 360)`
/// - `scale` stays in `[MIN_SCALE, MAX_SCALE]`
/// - the direction flag flips exactly when `scale` reaches a bound
#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    angle_deg: f32,
    scale: f32,
    shrinking: bool,
    last_tick: Option<Instant>,
}

impl TransformState {
    pub fn new() -> Self {
        Self {
            angle_deg: 0.0,
            scale: MAX_SCALE,
            shrinking: true,
            last_tick: None,
        }
    }

    #[inline]
    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn is_shrinking(&self) -> bool {
        self.shrinking
    }

    /// Records `now` as the baseline for the next [`tick`](Self::tick).
    ///
    /// Called when the animation (re)starts so time spent paused does not
    /// count as elapsed animation time.
    pub fn start(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }

    /// Advances rotation and scale by the time elapsed since the last tick.
    ///
    /// Without a baseline this only records `now`. A `now` earlier than the
    /// baseline counts as zero elapsed time.
    pub fn tick(&mut self, now: Instant) {
        let Some(last) = self.last_tick.replace(now) else {
            return;
        };

        let secs = now.saturating_duration_since(last).as_secs_f32();
        if secs <= 0.0 {
            return;
        }

        self.angle_deg = wrap_degrees(self.angle_deg + secs * ROTATION_SPEED_DEG_PER_SEC);

        let step = secs * SCALE_SPEED_PER_SEC;
        if self.shrinking {
            self.scale -= step;
            if self.scale <= MIN_SCALE {
                self.scale = MIN_SCALE;
                self.shrinking = false;
            }
        } else {
            self.scale += step;
            if self.scale >= MAX_SCALE {
                self.scale = MAX_SCALE;
                self.shrinking = true;
            }
        }
    }

    /// `Rz(angle) * S(scale, scale, 1)`: points are scaled first, then rotated.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_z(self.angle_deg.to_radians())
            * Mat4::from_scale(Vec3::new(self.scale, self.scale, 1.0))
    }

    /// Exact inverse of [`model_matrix`](Self::model_matrix).
    ///
    /// Never singular: scale is bounded away from zero.
    pub fn inverse_model_matrix(&self) -> Mat4 {
        let m = self.model_matrix();
        debug_assert!(m.determinant().abs() > f32::EPSILON, "model matrix is singular");
        m.inverse()
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}

fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use std::time::Duration;

    const EPS: f32 = 1e-4;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn started() -> (TransformState, Instant) {
        let t0 = Instant::now();
        let mut t = TransformState::new();
        t.start(t0);
        (t, t0)
    }

    // ── tick ──────────────────────────────────────────────────────────────

    #[test]
    fn initial_state_is_identity() {
        let t = TransformState::new();
        assert_eq!(t.angle_deg(), 0.0);
        assert_eq!(t.scale(), MAX_SCALE);
        assert!(t.is_shrinking());
        assert!(t.model_matrix().abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    #[test]
    fn first_tick_without_start_only_sets_baseline() {
        let mut t = TransformState::new();
        t.tick(Instant::now());
        assert_eq!(t.angle_deg(), 0.0);
        assert_eq!(t.scale(), MAX_SCALE);
    }

    #[test]
    fn first_tick_after_start_uses_start_time() {
        let (mut t, t0) = started();
        t.tick(t0 + ms(1000));
        assert!((t.angle_deg() - 45.0).abs() < EPS);
        assert!((t.scale() - 0.8).abs() < EPS);
        assert!(t.is_shrinking());
    }

    #[test]
    fn rotation_wraps_at_360() {
        let (mut t, t0) = started();
        // 9 s of rotation is 405 degrees.
        t.tick(t0 + ms(9000));
        assert!((t.angle_deg() - 45.0).abs() < EPS);
    }

    #[test]
    fn scale_clamps_and_flips_at_lower_bound() {
        let (mut t, t0) = started();
        t.tick(t0 + ms(5000));
        assert_eq!(t.scale(), MIN_SCALE);
        assert!(!t.is_shrinking());

        t.tick(t0 + ms(6000));
        assert!((t.scale() - 0.4).abs() < EPS);
    }

    #[test]
    fn scale_clamps_and_flips_at_upper_bound() {
        let (mut t, t0) = started();
        t.tick(t0 + ms(4500)); // down to 0.2
        t.tick(t0 + ms(9000)); // up by 0.9, clamped
        assert_eq!(t.scale(), MAX_SCALE);
        assert!(t.is_shrinking());
    }

    #[test]
    fn invariants_hold_over_many_uneven_ticks() {
        let (mut t, t0) = started();
        let mut now = t0;
        for i in 0..2_000u64 {
            now += ms((i * 37) % 250 + 1);
            t.tick(now);
            assert!((0.0..360.0).contains(&t.angle_deg()), "angle {}", t.angle_deg());
            assert!((MIN_SCALE..=MAX_SCALE).contains(&t.scale()), "scale {}", t.scale());
        }
    }

    #[test]
    fn backwards_time_is_ignored() {
        let (mut t, t0) = started();
        t.tick(t0 + ms(1000));
        let before = t.clone();
        t.tick(t0 + ms(500));
        assert_eq!(t.angle_deg(), before.angle_deg());
        assert_eq!(t.scale(), before.scale());
    }

    // ── matrices ──────────────────────────────────────────────────────────

    #[test]
    fn model_matrix_scales_then_rotates() {
        let (mut t, t0) = started();
        // 2 s: 90 degrees, scale 0.6.
        t.tick(t0 + ms(2000));
        let p = t.model_matrix() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p.x - 0.0).abs() < EPS);
        assert!((p.y - 0.6).abs() < EPS);
    }

    #[test]
    fn inverse_times_model_is_identity() {
        let (mut t, t0) = started();
        let mut now = t0;
        for _ in 0..50 {
            now += ms(173);
            t.tick(now);
            let prod = t.model_matrix() * t.inverse_model_matrix();
            assert!(prod.abs_diff_eq(Mat4::IDENTITY, EPS));
        }
    }

    #[test]
    fn wrap_degrees_stays_in_range() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert!((wrap_degrees(725.0) - 5.0).abs() < EPS);
        let w = wrap_degrees(-1e-9);
        assert!((0.0..360.0).contains(&w));
    }
}
