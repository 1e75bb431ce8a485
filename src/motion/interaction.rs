// Hover/click interaction state machine.
//
// Per-item record owning the damping factor, the watchdog that keeps
// motion live, the two-stage hover-exit restoration ramp, and the click
// rotation clock. All time comes in through `advance(dt, ..)` — the
// machine owns no timers, so a dropped item cannot leave work behind.

use anyhow::Result;
use log::{debug, warn};

use super::mappers::proximity_factor;
use super::proximity::Proximity;

// ============================================================================
// CLICK ACTION
// ============================================================================

/// What an item does when its click animation completes. Resolved once at
/// configuration time — never inferred from value shape at dispatch.
pub enum ClickAction {
    /// Caller-supplied callback.
    Callback(Box<dyn FnMut() + Send + Sync>),
    /// Smooth-scroll to an in-page anchor, e.g. `"#projects"`.
    ScrollTo(String),
    /// Open an external link in a new context.
    OpenExternal(String),
}

impl ClickAction {
    pub fn callback(f: impl FnMut() + Send + Sync + 'static) -> Self {
        Self::Callback(Box::new(f))
    }
}

/// Collaborator that performs navigation side effects. Failures are logged
/// and swallowed by the state machine — navigation is best-effort and must
/// never break the interaction loop.
pub trait Navigator {
    fn scroll_to(&mut self, selector: &str) -> Result<()>;
    fn open_external(&mut self, url: &str) -> Result<()>;
}

// ============================================================================
// STATE MACHINE
// ============================================================================

/// Exactly one active per item at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    ApproachingHover,
    DirectHover,
    Clicking,
    Navigating,
}

#[derive(Debug, Clone, Copy)]
pub struct InteractionConfig {
    /// Proximity distance (px) at which approach slowdown begins.
    pub detection_radius: f32,
    /// Lowest damping the approach easing targets (pointer right next to
    /// the item but not on it).
    pub approach_floor: f32,
    /// Per-update easing gain toward the approach target.
    pub approach_gain: f32,
    /// Rate (per second) at which idle damping relaxes toward 1.
    pub idle_relax_rate: f32,
    /// Fixed calm glow while directly hovered.
    pub hover_glow: f32,
    /// Per-update glow fade once the pointer is off the item.
    pub glow_fade: f32,
    /// Damping below this counts as "stalled" for the watchdog.
    pub watchdog_floor: f32,
    /// Seconds of continuous stall before the watchdog forces damping to 1.
    pub watchdog_timeout: f32,
    /// Hover-exit restoration: immediate damping boost, then `restore_steps`
    /// ease-out steps of `restore_step_secs` each up to 1.
    pub restore_boost: f32,
    pub restore_steps: u32,
    pub restore_step_secs: f32,
    /// Click rotation duration (seconds, ease-out cubic 0→360°).
    pub click_duration: f32,
    /// Beat between rotation completion and the action firing.
    pub navigate_delay: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            detection_radius: 400.0,
            approach_floor: 0.15,
            approach_gain: 0.15,
            idle_relax_rate: 1.5,
            hover_glow: 0.4,
            glow_fade: 0.05,
            watchdog_floor: 0.5,
            watchdog_timeout: 2.0,
            restore_boost: 0.5,
            restore_steps: 16,
            restore_step_secs: 0.05,
            click_duration: 0.6,
            navigate_delay: 0.1,
        }
    }
}

/// Hover-exit restoration in progress. Replaced wholesale when re-armed so
/// two ramps can never fight over the same damping factor.
#[derive(Debug, Clone, Copy)]
struct RestoreRamp {
    steps_done: u32,
    step_elapsed: f32,
}

pub struct Interaction {
    config: InteractionConfig,
    state: InteractionState,
    action: ClickAction,

    /// Throttle on the item's autonomous motion speed: 1 = full, 0 = frozen.
    damping: f32,
    /// Seconds damping has continuously sat below `watchdog_floor`.
    stalled_for: f32,
    restore: Option<RestoreRamp>,

    click_elapsed: f32,
    click_rotation: f32,
    navigate_elapsed: f32,

    glow: f32,
}

impl Interaction {
    pub fn new(action: ClickAction) -> Self {
        Self::with_config(action, InteractionConfig::default())
    }

    pub fn with_config(action: ClickAction, config: InteractionConfig) -> Self {
        Self {
            config,
            state: InteractionState::Idle,
            action,
            damping: 1.0,
            stalled_for: 0.0,
            restore: None,
            click_elapsed: 0.0,
            click_rotation: 0.0,
            navigate_elapsed: 0.0,
            glow: 0.0,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn glow(&self) -> f32 {
        self.glow
    }

    /// Click rotation angle in degrees, 0 outside a click cycle.
    pub fn click_rotation(&self) -> f32 {
        self.click_rotation
    }

    /// True while hover effects (tilt, scale boost, proximity glow) should
    /// be suppressed in favor of the click/hover presentation.
    pub fn suppresses_hover_effects(&self) -> bool {
        matches!(
            self.state,
            InteractionState::DirectHover | InteractionState::Clicking | InteractionState::Navigating
        )
    }

    /// Feed the item's current proximity after a pointer update.
    /// `inside` is whether the pointer sits within the item's bounding box.
    pub fn pointer_update(&mut self, p: &Proximity, inside: bool) {
        // Click cycle is decoupled from pointer state.
        if matches!(self.state, InteractionState::Clicking | InteractionState::Navigating) {
            return;
        }

        if inside {
            // Hard stop contract: freeze immediately, no easing. Tilt reset
            // is the caller's side (it recomputes from mapper outputs which
            // are suppressed while hovered).
            self.state = InteractionState::DirectHover;
            self.damping = 0.0;
            self.glow = self.config.hover_glow;
            self.restore = None;
            return;
        }

        if self.state == InteractionState::DirectHover {
            self.start_restore();
        }

        self.glow = (self.glow - self.config.glow_fade).max(0.0);

        let factor = proximity_factor(p.distance, self.config.detection_radius);
        if factor > 0.0 {
            self.state = InteractionState::ApproachingHover;
            if self.restore.is_none() {
                // Ease toward a reduced speed proportional to closeness:
                // floor at approach_floor right next to the item, 1 at the
                // detection radius.
                let span = 1.0 - self.config.approach_floor;
                let target = self.config.approach_floor + (1.0 - factor) * span;
                self.damping += (target - self.damping) * self.config.approach_gain;
            }
        } else {
            self.state = InteractionState::Idle;
        }
    }

    /// Pointer left the tracked surface entirely (e.g. window `CursorLeft`).
    /// Defends against the missed-exit case where no further move events
    /// arrive while the item is frozen.
    pub fn pointer_left_surface(&mut self) {
        if self.state == InteractionState::DirectHover {
            self.start_restore();
        }
        if matches!(self.state, InteractionState::DirectHover | InteractionState::ApproachingHover) {
            self.state = InteractionState::Idle;
        }
        self.glow = 0.0;
    }

    /// Explicit activation (click/tap). Starts the rotation cycle; ignored
    /// if a cycle is already running.
    pub fn begin_click(&mut self) {
        if matches!(self.state, InteractionState::Clicking | InteractionState::Navigating) {
            return;
        }
        debug!("click cycle started");
        self.state = InteractionState::Clicking;
        self.click_elapsed = 0.0;
        self.click_rotation = 0.0;
        self.damping = 0.0;
        self.restore = None;
    }

    /// Advance all time-based behavior by `dt` seconds. Returns true if the
    /// click action fired during this update.
    pub fn advance(&mut self, dt: f32, navigator: &mut dyn Navigator) -> bool {
        let mut fired = false;

        match self.state {
            InteractionState::Clicking => {
                self.click_elapsed += dt;
                if self.click_elapsed >= self.config.click_duration {
                    self.click_rotation = 360.0;
                    self.state = InteractionState::Navigating;
                    self.navigate_elapsed = 0.0;
                } else {
                    let t = self.click_elapsed / self.config.click_duration;
                    self.click_rotation = ease_out_cubic(t) * 360.0;
                }
            }
            InteractionState::Navigating => {
                self.navigate_elapsed += dt;
                if self.navigate_elapsed >= self.config.navigate_delay {
                    self.fire_action(navigator);
                    fired = true;
                    self.state = InteractionState::Idle;
                    self.click_rotation = 0.0;
                    self.damping = 1.0;
                    self.stalled_for = 0.0;
                }
            }
            _ => {}
        }

        self.step_restore(dt);

        if self.state == InteractionState::Idle && self.restore.is_none() {
            let gain = (self.config.idle_relax_rate * dt).min(1.0);
            self.damping += (1.0 - self.damping) * gain;
        }

        self.run_watchdog(dt);
        fired
    }

    // Two-stage hover-exit restoration: immediate boost (prevents sticking),
    // then an eased ramp to exactly 1 — no sudden jump to full speed.
    fn start_restore(&mut self) {
        self.damping = self.config.restore_boost;
        self.restore = Some(RestoreRamp { steps_done: 0, step_elapsed: 0.0 });
    }

    fn step_restore(&mut self, dt: f32) {
        let Some(mut ramp) = self.restore else {
            return;
        };
        ramp.step_elapsed += dt;

        while ramp.step_elapsed >= self.config.restore_step_secs
            && ramp.steps_done < self.config.restore_steps
        {
            ramp.step_elapsed -= self.config.restore_step_secs;
            ramp.steps_done += 1;
            let progress = ramp.steps_done as f32 / self.config.restore_steps as f32;
            let span = 1.0 - self.config.restore_boost;
            self.damping = self.config.restore_boost + ease_out_cubic(progress) * span;
        }

        if ramp.steps_done >= self.config.restore_steps {
            self.damping = 1.0;
            self.restore = None;
        } else {
            self.restore = Some(ramp);
        }
    }

    // Liveness guarantee: motion must never stay stalled indefinitely, even
    // when a hover exit was missed entirely.
    fn run_watchdog(&mut self, dt: f32) {
        if self.damping < self.config.watchdog_floor {
            self.stalled_for += dt;
            if self.stalled_for >= self.config.watchdog_timeout {
                warn!(
                    "damping stalled below {} for {:.1}s, forcing restore",
                    self.config.watchdog_floor, self.stalled_for
                );
                self.damping = 1.0;
                self.stalled_for = 0.0;
                self.restore = None;
            }
        } else {
            self.stalled_for = 0.0;
        }
    }

    fn fire_action(&mut self, navigator: &mut dyn Navigator) {
        let result = match &mut self.action {
            ClickAction::Callback(f) => {
                f();
                Ok(())
            }
            ClickAction::ScrollTo(selector) => navigator.scroll_to(selector),
            ClickAction::OpenExternal(url) => navigator.open_external(url),
        };
        if let Err(err) = result {
            // Best-effort boundary: a missing anchor or a failed open must
            // not break the interaction loop.
            warn!("click action failed, ignoring: {err:#}");
        }
    }
}

#[inline]
fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const FRAME: f32 = 1.0 / 60.0;

    struct RecordingNavigator {
        scrolls: Vec<String>,
        opens: Vec<String>,
        fail: bool,
    }

    impl RecordingNavigator {
        fn new() -> Self {
            Self { scrolls: Vec::new(), opens: Vec::new(), fail: false }
        }
    }

    impl Navigator for RecordingNavigator {
        fn scroll_to(&mut self, selector: &str) -> Result<()> {
            if self.fail {
                anyhow::bail!("anchor {selector} not found");
            }
            self.scrolls.push(selector.to_string());
            Ok(())
        }

        fn open_external(&mut self, url: &str) -> Result<()> {
            if self.fail {
                anyhow::bail!("open blocked");
            }
            self.opens.push(url.to_string());
            Ok(())
        }
    }

    fn near(distance: f32) -> Proximity {
        Proximity { dx: distance, dy: 0.0, distance }
    }

    #[test]
    fn direct_hover_is_a_hard_stop() {
        let mut item = Interaction::new(ClickAction::ScrollTo("#skills".into()));
        assert_eq!(item.damping(), 1.0);

        item.pointer_update(&near(5.0), true);
        assert_eq!(item.state(), InteractionState::DirectHover);
        assert_eq!(item.damping(), 0.0);
        assert_abs_diff_eq!(item.glow(), 0.4);
    }

    #[test]
    fn approach_slows_toward_proximity_target() {
        let mut item = Interaction::new(ClickAction::ScrollTo("#cv".into()));

        // factor = 0.5 at half the detection radius → target 0.575.
        for _ in 0..200 {
            item.pointer_update(&near(200.0), false);
        }
        assert_eq!(item.state(), InteractionState::ApproachingHover);
        assert_abs_diff_eq!(item.damping(), 0.575, epsilon = 1e-3);
    }

    #[test]
    fn watchdog_frees_a_frozen_item() {
        let mut item = Interaction::new(ClickAction::ScrollTo("#projects".into()));
        let mut nav = RecordingNavigator::new();

        item.pointer_update(&near(0.0), true);
        assert_eq!(item.damping(), 0.0);

        // Simulate a missed mouse-leave: no further pointer updates, just
        // frames passing. Past the timeout the watchdog must intervene.
        let mut elapsed = 0.0;
        while elapsed < 2.1 {
            item.advance(FRAME, &mut nav);
            elapsed += FRAME;
        }
        assert_eq!(item.damping(), 1.0);
    }

    #[test]
    fn watchdog_does_not_trip_on_healthy_damping() {
        let mut item = Interaction::new(ClickAction::ScrollTo("#edu".into()));
        let mut nav = RecordingNavigator::new();

        for _ in 0..300 {
            item.advance(FRAME, &mut nav);
        }
        assert!(item.damping() > 0.99);
    }

    #[test]
    fn hover_exit_restores_in_two_stages() {
        let mut item = Interaction::new(ClickAction::ScrollTo("#skills".into()));
        let mut nav = RecordingNavigator::new();

        item.pointer_update(&near(0.0), true);
        // Exit far from the item.
        item.pointer_update(&near(1000.0), false);

        // Stage one: immediate boost, not a snap back to full speed.
        assert_abs_diff_eq!(item.damping(), 0.5);
        assert_eq!(item.state(), InteractionState::Idle);

        // Stage two: eased ramp lands on exactly 1 after 16 * 50 ms.
        let mut last = item.damping();
        let mut elapsed = 0.0;
        while elapsed < 0.85 {
            item.advance(FRAME, &mut nav);
            assert!(item.damping() >= last - 1e-6, "restore went backwards");
            last = item.damping();
            elapsed += FRAME;
        }
        assert_eq!(item.damping(), 1.0);
    }

    #[test]
    fn rearming_the_ramp_replaces_it() {
        let mut item = Interaction::new(ClickAction::ScrollTo("#skills".into()));
        let mut nav = RecordingNavigator::new();

        item.pointer_update(&near(0.0), true);
        item.pointer_update(&near(1000.0), false);
        for _ in 0..10 {
            item.advance(FRAME, &mut nav);
        }

        // Hover again mid-ramp: the ramp is cancelled, hard stop applies.
        item.pointer_update(&near(0.0), true);
        assert_eq!(item.damping(), 0.0);

        // Second exit arms a fresh ramp from the boost value.
        item.pointer_update(&near(1000.0), false);
        assert_abs_diff_eq!(item.damping(), 0.5);
        let mut elapsed = 0.0;
        while elapsed < 0.85 {
            item.advance(FRAME, &mut nav);
            elapsed += FRAME;
        }
        assert_eq!(item.damping(), 1.0);
    }

    #[test]
    fn full_click_cycle_fires_action_exactly_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let mut item = Interaction::new(ClickAction::callback(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let mut nav = RecordingNavigator::new();

        assert_eq!(item.state(), InteractionState::Idle);
        item.begin_click();
        assert_eq!(item.state(), InteractionState::Clicking);

        let mut last_rotation = 0.0;
        let mut elapsed = 0.0;
        while elapsed < 1.0 {
            item.advance(FRAME, &mut nav);
            assert!(
                item.click_rotation() >= last_rotation || item.state() == InteractionState::Idle,
                "rotation must progress monotonically during the cycle"
            );
            if item.state() == InteractionState::Clicking {
                last_rotation = item.click_rotation();
            }
            elapsed += FRAME;
        }

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(item.state(), InteractionState::Idle);
        assert_eq!(item.damping(), 1.0);
    }

    #[test]
    fn click_ignores_reentrant_activation() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let mut item = Interaction::new(ClickAction::callback(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let mut nav = RecordingNavigator::new();

        item.begin_click();
        item.advance(0.3, &mut nav);
        item.begin_click(); // mid-cycle, must be a no-op
        let mut elapsed = 0.0;
        while elapsed < 1.0 {
            item.advance(FRAME, &mut nav);
            elapsed += FRAME;
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_navigation_is_swallowed() {
        let mut item = Interaction::new(ClickAction::ScrollTo("#does-not-exist".into()));
        let mut nav = RecordingNavigator::new();
        nav.fail = true;

        item.begin_click();
        let mut elapsed = 0.0;
        while elapsed < 1.0 {
            item.advance(FRAME, &mut nav);
            elapsed += FRAME;
        }

        // No retry, no crash: back to idle with motion released.
        assert_eq!(item.state(), InteractionState::Idle);
        assert_eq!(item.damping(), 1.0);
        assert!(nav.scrolls.is_empty());
    }

    #[test]
    fn open_external_reaches_the_navigator() {
        let mut item = Interaction::new(ClickAction::OpenExternal(
            "https://example.com/profile".into(),
        ));
        let mut nav = RecordingNavigator::new();

        item.begin_click();
        let mut elapsed = 0.0;
        while elapsed < 1.0 {
            item.advance(FRAME, &mut nav);
            elapsed += FRAME;
        }
        assert_eq!(nav.opens, vec!["https://example.com/profile".to_string()]);
    }
}
