use std::time::Instant;

use crate::transform::TransformState;

/// Identifies one run of the animation loop.
///
/// A handle goes stale as soon as the loop is stopped or restarted, so a
/// frame callback scheduled for an earlier run can never tick the transform.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AnimationHandle(u64);

/// Frame-driven animation scheduler.
///
/// The platform frame callback calls [`fire`](Self::fire) once per frame;
/// while the loop runs, each call advances the transform by one tick.
#[derive(Debug, Default, Clone)]
pub struct AnimationLoop {
    generation: u64,
    live: Option<AnimationHandle>,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.live.is_some()
    }

    #[inline]
    pub fn handle(&self) -> Option<AnimationHandle> {
        self.live
    }

    /// Starts a run, restarting if one is live, and sets the tick baseline.
    pub fn start(&mut self, now: Instant, transform: &mut TransformState) -> AnimationHandle {
        self.generation = self.generation.wrapping_add(1);
        let handle = AnimationHandle(self.generation);
        self.live = Some(handle);
        transform.start(now);
        handle
    }

    /// Stops the loop. Takes effect before the next frame; idempotent.
    pub fn stop(&mut self) {
        self.live = None;
    }

    /// Ticks `transform` if `handle` is the live run. Returns whether it ticked.
    pub fn fire(&self, handle: AnimationHandle, now: Instant, transform: &mut TransformState) -> bool {
        if self.live != Some(handle) {
            return false;
        }
        transform.tick(now);
        true
    }

    /// Ticks the live run, if any.
    pub fn fire_live(&self, now: Instant, transform: &mut TransformState) -> bool {
        match self.live {
            Some(h) => self.fire(h, now, transform),
            None => false,
        }
    }
}
