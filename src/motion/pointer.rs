// Pointer tracking with per-frame coalescing.
// Abstracts raw cursor-move events into a once-per-frame committed position.

use glam::Vec2;

/// Process-wide pointer state. Exactly one writer (the event handler feeding
/// `record_*`), many readers. Readers never mutate.
///
/// Raw move events can arrive in bursts far above the frame rate; they are
/// buffered in `pending` and folded into the committed `position` at most
/// once per frame by `commit_frame()`, so downstream proximity work runs a
/// single time per frame regardless of event density.
pub struct PointerTracker {
    /// Latest raw coordinates not yet committed.
    pending: Option<Vec2>,

    /// Committed position, updated once per frame.
    position: Vec2,

    /// Viewport size in the same coordinate space as the pointer.
    /// Used by the parallax and edge-shift mappers.
    viewport: Vec2,

    /// False after the pointer left the tracked surface. The last committed
    /// position is retained — resetting to origin would make every
    /// proximity consumer snap visually.
    active: bool,

    /// Bumped every time the committed position changes. Consumers compare
    /// against the last generation they saw instead of registering change
    /// callbacks.
    generation: u64,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            pending: None,
            position: Vec2::ZERO,
            viewport: Vec2::ZERO,
            active: false,
            generation: 0,
        }
    }

    /// Record a raw pointer-move sample. Call for every native move event;
    /// only the newest sample survives until the next commit.
    pub fn record_move(&mut self, x: f32, y: f32) {
        self.pending = Some(Vec2::new(x, y));
        self.active = true;
    }

    /// Pointer left the tracked surface. Tracking goes inactive but the
    /// last known position stays put.
    pub fn record_leave(&mut self) {
        self.active = false;
        self.pending = None;
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Fold pending raw samples into the committed position. Call exactly
    /// once per frame, before any proximity recomputation. Returns true if
    /// the committed position changed.
    pub fn commit_frame(&mut self) -> bool {
        match self.pending.take() {
            Some(p) if p != self.position => {
                self.position = p;
                self.generation = self.generation.wrapping_add(1);
                true
            }
            _ => false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bursts_coalesce_into_one_commit() {
        let mut tracker = PointerTracker::new();
        tracker.record_move(10.0, 10.0);
        tracker.record_move(20.0, 15.0);
        tracker.record_move(30.0, 20.0);

        assert!(tracker.commit_frame());
        assert_eq!(tracker.position(), Vec2::new(30.0, 20.0));
        assert_eq!(tracker.generation(), 1);

        // Nothing new pending: second commit is a no-op.
        assert!(!tracker.commit_frame());
        assert_eq!(tracker.generation(), 1);
    }

    #[test]
    fn leave_keeps_last_position() {
        let mut tracker = PointerTracker::new();
        tracker.record_move(100.0, 50.0);
        tracker.commit_frame();

        tracker.record_leave();
        assert!(!tracker.is_active());
        assert_eq!(tracker.position(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn identical_sample_does_not_bump_generation() {
        let mut tracker = PointerTracker::new();
        tracker.record_move(5.0, 5.0);
        tracker.commit_frame();

        tracker.record_move(5.0, 5.0);
        assert!(!tracker.commit_frame());
        assert_eq!(tracker.generation(), 1);
    }
}
