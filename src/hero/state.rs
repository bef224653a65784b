//! # Animation State
//!
//! The single owned state object behind the hero animation. Every change of
//! `progress` goes through [`AnimationState::set_progress`], which derives
//! `locked`, `phase` and `content` from the new value so the three can never
//! disagree.

use std::fmt;
use std::time::Instant;

/// Discrete state of the hero animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// progress == 0, page scroll free, model shown
    #[default]
    Idle,
    /// 0 < progress < 1, input captured
    Forward,
    /// progress == 1, page scroll free, video shown
    Held,
    /// reverse ticker driving progress back to 0
    Reversing,
}

impl Phase {
    /// Whether native page scrolling is suppressed in this phase.
    pub fn locks_scroll(self) -> bool {
        matches!(self, Phase::Forward | Phase::Reversing)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Forward => "forward",
            Phase::Held => "held",
            Phase::Reversing => "reversing",
        };
        f.write_str(name)
    }
}

/// Which visual the hero currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Content {
    #[default]
    Model,
    Video,
}

/// A phase change, reported so callers can react exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
}

#[derive(Debug, Clone)]
pub struct AnimationState {
    progress: f32,
    locked: bool,
    phase: Phase,
    content: Content,
    /// Set when reverse begins, cleared only once progress is back at 0
    pub(crate) reverse_latched: bool,
    /// Previous native scroll sample
    pub(crate) last_scroll_y: Option<f32>,
    /// Whether the last scroll sample had the hero at the top of the viewport
    pub(crate) at_hero_top: bool,
    pub(crate) last_input_at: Option<Instant>,
    pub(crate) last_pointer_y: Option<f32>,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            progress: 0.0,
            locked: false,
            phase: Phase::Idle,
            content: Content::Model,
            reverse_latched: false,
            last_scroll_y: None,
            at_hero_top: true,
            last_input_at: None,
            last_pointer_y: None,
        }
    }
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn content(&self) -> Content {
        self.content
    }

    pub fn reverse_latched(&self) -> bool {
        self.reverse_latched
    }

    pub fn at_hero_top(&self) -> bool {
        self.at_hero_top
    }

    pub fn last_input_at(&self) -> Option<Instant> {
        self.last_input_at
    }

    pub fn last_pointer_y(&self) -> Option<f32> {
        self.last_pointer_y
    }

    /// Clears the per-gesture fields at the start of a new gesture.
    pub(crate) fn reset_gesture(&mut self) {
        self.last_input_at = None;
        self.last_pointer_y = None;
    }

    /// Moves progress to `value` (clamped) and re-derives the rest of the
    /// state. Returns the phase change, if any.
    ///
    /// While reversing, intermediate values keep the `Reversing` phase; only
    /// reaching 0 ends it.
    pub(crate) fn set_progress(&mut self, value: f32) -> Option<Transition> {
        let value = if value.is_nan() { self.progress } else { value };
        self.progress = value.clamp(0.0, 1.0);

        let next = if self.progress <= 0.0 {
            Phase::Idle
        } else if self.progress >= 1.0 {
            Phase::Held
        } else if self.phase == Phase::Reversing {
            Phase::Reversing
        } else {
            Phase::Forward
        };
        self.enter(next)
    }

    /// Starts the reverse ticker from the held state.
    pub(crate) fn start_reverse(&mut self) -> Option<Transition> {
        self.reverse_latched = true;
        self.enter(Phase::Reversing)
    }

    fn enter(&mut self, next: Phase) -> Option<Transition> {
        match next {
            Phase::Idle => {
                self.content = Content::Model;
                self.reverse_latched = false;
            }
            Phase::Held => self.content = Content::Video,
            Phase::Forward | Phase::Reversing => self.content = Content::Model,
        }
        self.locked = next.locks_scroll();

        if next == self.phase {
            return None;
        }
        let transition = Transition {
            from: self.phase,
            to: next,
        };
        self.phase = next;
        Some(transition)
    }
}
