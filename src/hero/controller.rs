//! # Scroll Progress Controller
//!
//! Turns wheel, touch and page-scroll input into the hero's normalized
//! progress. The controller decides, per event, whether the page may scroll
//! natively or whether the event is captured to drive the animation.
//!
//! ## Phases
//!
//! - `Idle` (progress 0): input passes through, except a downward gesture
//!   with the hero at the top, which restarts forward capture.
//! - `Forward` (0 < progress < 1): every wheel/touch delta is captured.
//! - `Held` (progress 1): input passes through. Returning to the hero top
//!   while moving upward starts the reverse animation.
//! - `Reversing`: the frame ticker is the only driver; input is captured
//!   and dropped.

use std::time::Instant;

use crate::config::ControllerConfig;

use super::frame::FrameStatus;
use super::state::{AnimationState, Content, Phase, Transition};

/// Result of feeding one input event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputOutcome {
    /// The event was captured; native page scroll must not act on it
    pub consumed: bool,
    pub transition: Option<Transition>,
}

impl InputOutcome {
    fn pass() -> Self {
        Self::default()
    }

    fn captured(transition: Option<Transition>) -> Self {
        Self {
            consumed: true,
            transition,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrollProgressController {
    state: AnimationState,
    config: ControllerConfig,
}

impl ScrollProgressController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            state: AnimationState::new(),
            config,
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn progress(&self) -> f32 {
        self.state.progress()
    }

    pub fn locked(&self) -> bool {
        self.state.locked()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn content(&self) -> Content {
        self.state.content()
    }

    /// Whether the reverse ticker needs another frame.
    pub fn needs_frame(&self) -> bool {
        self.state.phase() == Phase::Reversing
    }

    /// Wheel delta in pixels, positive = scroll down.
    pub fn apply_wheel(&mut self, delta: f32) -> InputOutcome {
        self.apply_delta(delta, self.config.wheel_sensitivity)
    }

    /// Starts a touch gesture at pointer height `y`.
    pub fn begin_touch(&mut self, y: f32) {
        self.state.reset_gesture();
        self.state.last_pointer_y = Some(y);
        self.state.last_input_at = Some(Instant::now());
    }

    /// Pointer moved to `y` during a touch gesture. Dragging the finger up
    /// scrolls down, so the delta is the previous height minus the new one.
    pub fn apply_touch(&mut self, y: f32) -> InputOutcome {
        let delta = match self.state.last_pointer_y.replace(y) {
            Some(previous) => previous - y,
            None => 0.0,
        };
        self.apply_delta(delta, self.config.touch_sensitivity)
    }

    pub fn end_touch(&mut self) {
        self.state.last_pointer_y = None;
    }

    /// Applies a signed input delta with the given sensitivity.
    pub fn apply_delta(&mut self, delta: f32, sensitivity: f32) -> InputOutcome {
        let delta = if delta.is_finite() { delta } else { 0.0 };
        self.state.last_input_at = Some(Instant::now());

        match self.state.phase() {
            Phase::Reversing => InputOutcome::captured(None),
            Phase::Forward => {
                if delta == 0.0 {
                    return InputOutcome::captured(None);
                }
                let target = self.state.progress() + delta * sensitivity;
                let transition = self.state.set_progress(target);
                log::trace!("progress {:.4} (delta {delta})", self.state.progress());
                self.log_transition(transition);
                InputOutcome::captured(transition)
            }
            Phase::Idle => {
                if delta <= 0.0 || !self.state.at_hero_top {
                    return InputOutcome::pass();
                }
                let restart = self.state.set_progress(self.config.forward_epsilon);
                let target = self.state.progress() + delta * sensitivity;
                let after = self.state.set_progress(target);
                let transition = match (restart, after) {
                    (Some(first), Some(last)) => Some(Transition {
                        from: first.from,
                        to: last.to,
                    }),
                    (first, None) => first,
                    (None, last) => last,
                };
                self.log_transition(transition);
                InputOutcome::captured(transition)
            }
            Phase::Held => {
                if delta < 0.0 && self.state.at_hero_top && !self.state.reverse_latched {
                    let transition = self.start_reverse();
                    return InputOutcome::captured(transition);
                }
                InputOutcome::pass()
            }
        }
    }

    /// Feeds a native scroll sample. `hero_top` is the hero section's offset
    /// in page coordinates, or `None` while the section is not mounted; in
    /// that case the offset is treated as 0 and the reverse check is skipped.
    pub fn observe_scroll(&mut self, scroll_y: f32, hero_top: Option<f32>) -> InputOutcome {
        let previous = self.state.last_scroll_y.replace(scroll_y);

        let Some(top) = hero_top else {
            self.state.at_hero_top = scroll_y <= self.config.top_tolerance;
            log::trace!("hero section missing, skipping reverse check");
            return InputOutcome::pass();
        };

        self.state.at_hero_top = scroll_y <= top + self.config.top_tolerance;
        let moving_up = previous.is_some_and(|prev| scroll_y < prev);

        if self.state.phase() == Phase::Held
            && self.state.at_hero_top
            && moving_up
            && !self.state.reverse_latched
        {
            return InputOutcome {
                consumed: false,
                transition: self.start_reverse(),
            };
        }
        InputOutcome::pass()
    }

    /// Starts the reverse animation. Only valid from `Held` and only once per
    /// forward completion.
    pub fn begin_reverse(&mut self) -> bool {
        self.start_reverse().is_some()
    }

    fn start_reverse(&mut self) -> Option<Transition> {
        if self.state.phase() != Phase::Held || self.state.reverse_latched {
            return None;
        }
        let transition = self.state.start_reverse();
        self.log_transition(transition);
        transition
    }

    /// One reverse-animation step. Returns `Done` once progress is back at 0
    /// (or if no reverse is running).
    pub fn tick(&mut self) -> FrameStatus {
        if self.state.phase() != Phase::Reversing {
            return FrameStatus::Done;
        }
        let target = self.state.progress() - self.config.reverse_step;
        let transition = self.state.set_progress(target);
        self.log_transition(transition);

        if self.state.phase() == Phase::Reversing {
            FrameStatus::Continue
        } else {
            FrameStatus::Done
        }
    }

    fn log_transition(&self, transition: Option<Transition>) {
        if let Some(Transition { from, to }) = transition {
            log::info!(
                "hero {from} -> {to} (progress {:.3}, locked {})",
                self.state.progress(),
                self.state.locked()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ScrollProgressController {
        ScrollProgressController::new(ControllerConfig::default())
    }

    fn held() -> ScrollProgressController {
        let mut c = controller();
        c.observe_scroll(0.0, Some(0.0));
        while c.phase() != Phase::Held {
            c.apply_wheel(100.0);
        }
        c
    }

    #[test]
    fn test_downward_wheel_at_top_starts_capture() {
        let mut c = controller();
        let outcome = c.apply_wheel(50.0);
        assert!(outcome.consumed);
        assert_eq!(
            outcome.transition,
            Some(Transition {
                from: Phase::Idle,
                to: Phase::Forward
            })
        );
        assert!(c.locked());
        assert!(c.progress() > 0.0 && c.progress() < 1.0);
    }

    #[test]
    fn test_upward_wheel_in_idle_passes_through() {
        let mut c = controller();
        let outcome = c.apply_wheel(-50.0);
        assert!(!outcome.consumed);
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.progress(), 0.0);
    }

    #[test]
    fn test_idle_below_hero_top_does_not_capture() {
        let mut c = controller();
        c.observe_scroll(500.0, Some(0.0));
        let outcome = c.apply_wheel(50.0);
        assert!(!outcome.consumed);
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn test_zero_delta_is_idempotent_in_every_phase() {
        let mut c = controller();
        c.apply_wheel(0.0);
        assert_eq!((c.progress(), c.phase()), (0.0, Phase::Idle));

        c.apply_wheel(100.0);
        let before = (c.progress(), c.phase());
        c.apply_wheel(0.0);
        assert_eq!((c.progress(), c.phase()), before);

        let mut h = held();
        h.apply_wheel(0.0);
        assert_eq!((h.progress(), h.phase()), (1.0, Phase::Held));
    }

    #[test]
    fn test_reaching_zero_unlocks() {
        let mut c = controller();
        c.apply_wheel(100.0);
        let outcome = c.apply_wheel(-10_000.0);
        assert_eq!(c.progress(), 0.0);
        assert_eq!(c.phase(), Phase::Idle);
        assert!(!c.locked());
        assert_eq!(
            outcome.transition,
            Some(Transition {
                from: Phase::Forward,
                to: Phase::Idle
            })
        );
    }

    #[test]
    fn test_non_finite_delta_is_ignored() {
        let mut c = controller();
        c.apply_wheel(100.0);
        let before = c.progress();
        c.apply_wheel(f32::NAN);
        c.apply_wheel(f32::INFINITY);
        assert_eq!(c.progress(), before);
    }

    #[test]
    fn test_touch_uses_pointer_movement() {
        let mut c = controller();
        c.begin_touch(400.0);
        // finger moves up by 100px -> scroll down
        let outcome = c.apply_touch(300.0);
        assert!(outcome.consumed);
        let after_first = c.progress();
        assert!(after_first > 0.0);

        // same distance by wheel moves further (touch is less sensitive)
        let mut w = controller();
        w.apply_wheel(100.0);
        assert!(w.progress() > after_first);
        c.end_touch();
        assert_eq!(c.state().last_pointer_y(), None);
    }

    #[test]
    fn test_touch_move_without_start_is_zero_delta() {
        let mut c = controller();
        let outcome = c.apply_touch(250.0);
        assert!(!outcome.consumed);
        assert_eq!(c.progress(), 0.0);
    }

    #[test]
    fn test_held_passes_input_through() {
        let mut h = held();
        h.observe_scroll(200.0, Some(0.0));
        let outcome = h.apply_wheel(50.0);
        assert!(!outcome.consumed);
        assert!(!h.locked());
        assert_eq!(h.content(), Content::Video);
    }

    #[test]
    fn test_scroll_back_to_top_moving_up_reverses() {
        let mut h = held();
        h.observe_scroll(300.0, Some(0.0));
        assert_eq!(h.phase(), Phase::Held);

        let outcome = h.observe_scroll(0.0, Some(0.0));
        assert_eq!(
            outcome.transition,
            Some(Transition {
                from: Phase::Held,
                to: Phase::Reversing
            })
        );
        assert!(h.locked());
        assert_eq!(h.content(), Content::Model);
    }

    #[test]
    fn test_scroll_at_top_moving_down_does_not_reverse() {
        let mut h = held();
        h.observe_scroll(0.0, Some(0.0));
        assert_eq!(h.phase(), Phase::Held);
    }

    #[test]
    fn test_missing_hero_section_skips_reverse_check() {
        let mut h = held();
        h.observe_scroll(300.0, None);
        let outcome = h.observe_scroll(0.0, None);
        assert_eq!(outcome.transition, None);
        assert_eq!(h.phase(), Phase::Held);
    }

    #[test]
    fn test_upward_wheel_in_held_at_top_reverses() {
        let mut h = held();
        let outcome = h.apply_wheel(-30.0);
        assert!(outcome.consumed);
        assert_eq!(h.phase(), Phase::Reversing);
    }

    #[test]
    fn test_input_is_ignored_while_reversing() {
        let mut h = held();
        assert!(h.begin_reverse());
        h.tick();
        let progress = h.progress();

        let outcome = h.apply_wheel(500.0);
        assert!(outcome.consumed);
        assert_eq!(outcome.transition, None);
        assert_eq!(h.progress(), progress);

        h.begin_touch(100.0);
        h.apply_touch(0.0);
        assert_eq!(h.progress(), progress);
    }

    #[test]
    fn test_begin_reverse_only_from_held() {
        let mut c = controller();
        assert!(!c.begin_reverse());
        c.apply_wheel(100.0);
        assert!(!c.begin_reverse());
        assert_eq!(c.phase(), Phase::Forward);
    }

    #[test]
    fn test_reverse_does_not_refire_for_same_gesture() {
        let mut h = held();
        assert!(h.begin_reverse());
        assert!(!h.begin_reverse());
        h.observe_scroll(10.0, Some(0.0));
        assert_eq!(h.observe_scroll(0.0, Some(0.0)).transition, None);
    }

    #[test]
    fn test_tick_outside_reverse_is_done() {
        let mut c = controller();
        assert_eq!(c.tick(), FrameStatus::Done);
        let mut h = held();
        assert_eq!(h.tick(), FrameStatus::Done);
        assert_eq!(h.progress(), 1.0);
    }

    #[test]
    fn test_progress_stays_in_range_for_any_input() {
        let mut c = controller();
        // fixed LCG so the sequence is reproducible
        let mut seed: u32 = 0x9e37_79b9;
        for _ in 0..5_000 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let delta = (seed >> 8) as f32 / (1u32 << 24) as f32 * 4_000.0 - 2_000.0;
            match seed % 3 {
                0 => {
                    c.begin_touch(1_000.0);
                    c.apply_touch(1_000.0 - delta);
                    c.end_touch();
                }
                1 => {
                    c.apply_touch(delta);
                }
                _ => {
                    c.apply_wheel(delta);
                }
            }
            if c.phase() == Phase::Held && seed % 7 == 0 {
                c.observe_scroll(0.0, Some(0.0));
                c.begin_reverse();
            }
            while c.tick() == FrameStatus::Continue {}
            assert!((0.0..=1.0).contains(&c.progress()), "{}", c.progress());
        }
    }

    #[test]
    fn test_steady_wheel_reaches_held_and_shows_video() {
        let mut c = controller();
        let mut travelled = 0.0;
        while travelled < 1667.0 {
            c.apply_wheel(50.0);
            travelled += 50.0;
        }
        assert_eq!(c.progress(), 1.0);
        assert_eq!(c.phase(), Phase::Held);
        assert!(!c.locked());
        assert_eq!(c.content(), Content::Video);
    }

    #[test]
    fn test_model_video_swap_happens_once() {
        let mut c = controller();
        let mut held_transitions = 0;
        let mut swaps = 0;
        let mut content = c.content();
        for _ in 0..100 {
            let outcome = c.apply_wheel(50.0);
            if outcome.transition.is_some_and(|t| t.to == Phase::Held) {
                held_transitions += 1;
            }
            if content == Content::Model && c.content() == Content::Video {
                swaps += 1;
            }
            content = c.content();
        }
        assert_eq!(held_transitions, 1);
        assert_eq!(swaps, 1);
        assert_eq!(c.progress(), 1.0);
    }

    #[test]
    fn test_alternating_deltas_cancel_out_during_forward() {
        let mut c = controller();
        c.apply_wheel(100.0);
        let start = c.progress();
        for delta in [10.0, -10.0, 10.0, -10.0] {
            c.apply_wheel(delta);
            assert_eq!(c.phase(), Phase::Forward);
        }
        assert!((c.progress() - start).abs() < 1e-6);
    }

    #[test]
    fn test_reverse_decreases_monotonically_to_zero() {
        let mut h = held();
        assert!(h.begin_reverse());
        assert!(h.locked());
        let mut last = h.progress();
        while h.tick() == FrameStatus::Continue {
            assert!(h.progress() <= last);
            assert_eq!(h.phase(), Phase::Reversing);
            last = h.progress();
        }
        assert_eq!(h.progress(), 0.0);
        assert_eq!(h.phase(), Phase::Idle);
        assert!(!h.locked());
        assert_eq!(h.content(), Content::Model);
    }

    #[test]
    fn test_input_time_is_recorded() {
        let mut c = controller();
        assert!(c.state().last_input_at().is_none());
        c.apply_wheel(-10.0);
        assert!(c.state().last_input_at().is_some());
    }
}
