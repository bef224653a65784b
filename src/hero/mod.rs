//! # Hero Section
//!
//! The scroll-driven hero: a headset model that turns and grows while the
//! user scrolls, then gives way to the ambient video backdrop.
//!
//! ## Key Components
//!
//! - [`ScrollProgressController`] - progress state machine fed by input
//! - [`AnimationState`] - the single owned state object
//! - [`HeroVisual`] - maps progress to the model transform
//! - [`FrameTask`] - self-terminating per-frame callback
//! - [`Subscriptions`] - listeners held for the section's lifetime
//!
//! [`HeroSection`] ties them together: the page feeds it input events and
//! calls [`HeroSection::frame`] once per displayed frame while
//! [`HeroSection::needs_frame`] is true.

pub mod controller;
pub mod frame;
pub mod lifecycle;
pub mod state;
pub mod visual;

pub use controller::{InputOutcome, ScrollProgressController};
pub use frame::{FrameStatus, FrameTask};
pub use lifecycle::{ListenerKind, ListenerRegistry, Subscriptions};
pub use state::{AnimationState, Content, Phase, Transition};
pub use visual::HeroVisual;

use cgmath::Deg;

use crate::config::HeroConfig;

/// Plain read values handed to the rendering layer and debug overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroSnapshot {
    pub progress: f32,
    pub locked: bool,
    pub phase: Phase,
    pub content: Content,
    pub rotation: Deg<f32>,
    pub scale: f32,
    pub offset_y: f32,
    pub model_opacity: f32,
    pub model_visible: bool,
    pub video_visible: bool,
}

pub struct HeroSection {
    controller: ScrollProgressController,
    visual: HeroVisual,
    frame: FrameTask,
    subscriptions: Option<Subscriptions>,
}

impl HeroSection {
    /// Creates the section state and registers its listeners.
    pub fn mount(config: &HeroConfig, registry: &mut ListenerRegistry) -> Self {
        let subscriptions = Subscriptions::acquire(registry, &ListenerKind::HERO);
        log::debug!("hero mounted with {} listeners", subscriptions.len());
        Self {
            controller: ScrollProgressController::new(config.controller),
            visual: HeroVisual::new(config.visual),
            frame: FrameTask::new(),
            subscriptions: Some(subscriptions),
        }
    }

    /// Removes every listener added by [`HeroSection::mount`] and stops the
    /// frame task.
    pub fn unmount(mut self, registry: &mut ListenerRegistry) {
        self.frame.cancel();
        if let Some(subscriptions) = self.subscriptions.take() {
            subscriptions.release(registry);
        }
        log::debug!("hero unmounted");
    }

    pub fn controller(&self) -> &ScrollProgressController {
        &self.controller
    }

    pub fn visual(&self) -> &HeroVisual {
        &self.visual
    }

    pub fn on_wheel(&mut self, delta_y: f32) -> InputOutcome {
        let outcome = self.controller.apply_wheel(delta_y);
        self.after_input();
        outcome
    }

    pub fn on_touch_start(&mut self, y: f32) {
        self.controller.begin_touch(y);
    }

    pub fn on_touch_move(&mut self, y: f32) -> InputOutcome {
        let outcome = self.controller.apply_touch(y);
        self.after_input();
        outcome
    }

    pub fn on_touch_end(&mut self) {
        self.controller.end_touch();
    }

    pub fn on_scroll(&mut self, scroll_y: f32, hero_top: Option<f32>) -> InputOutcome {
        let outcome = self.controller.observe_scroll(scroll_y, hero_top);
        self.after_input();
        outcome
    }

    fn after_input(&mut self) {
        self.visual
            .sync(self.controller.progress(), self.controller.content());
        if self.controller.needs_frame() || !self.visual.is_settled() {
            self.frame.schedule();
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.frame.is_scheduled()
    }

    /// Runs one frame: a reverse step (if reversing) and one smoothing step.
    /// Stops rescheduling once both have finished.
    pub fn frame(&mut self) -> FrameStatus {
        let controller = &mut self.controller;
        let visual = &mut self.visual;
        self.frame.run(|| {
            let reverse = controller.tick();
            visual.sync(controller.progress(), controller.content());
            reverse.or(visual.step())
        })
    }

    pub fn snapshot(&self) -> HeroSnapshot {
        HeroSnapshot {
            progress: self.controller.progress(),
            locked: self.controller.locked(),
            phase: self.controller.phase(),
            content: self.controller.content(),
            rotation: self.visual.rotation(),
            scale: self.visual.scale(),
            offset_y: self.visual.offset_y(),
            model_opacity: self.visual.model_opacity(),
            model_visible: self.visual.model_visible(),
            video_visible: self.visual.video_visible(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted() -> (HeroSection, ListenerRegistry) {
        let mut registry = ListenerRegistry::new();
        let hero = HeroSection::mount(&HeroConfig::default(), &mut registry);
        (hero, registry)
    }

    #[test]
    fn test_input_schedules_frames_until_settled() {
        let (mut hero, _registry) = mounted();
        assert!(!hero.needs_frame());

        hero.on_wheel(200.0);
        assert!(hero.needs_frame());

        let mut frames = 0;
        while hero.needs_frame() {
            hero.frame();
            frames += 1;
            assert!(frames < 1000);
        }
        assert_eq!(hero.visual().scale(), hero.visual().target_scale());
    }

    #[test]
    fn test_reverse_runs_on_frames() {
        let (mut hero, _registry) = mounted();
        while hero.controller().phase() != Phase::Held {
            hero.on_wheel(100.0);
        }
        hero.on_wheel(-10.0);
        assert_eq!(hero.controller().phase(), Phase::Reversing);
        assert!(hero.snapshot().locked);

        while hero.needs_frame() {
            hero.frame();
        }
        let snapshot = hero.snapshot();
        assert_eq!(snapshot.progress, 0.0);
        assert_eq!(snapshot.phase, Phase::Idle);
        assert!(!snapshot.locked);
        assert!(snapshot.model_visible);
    }

    #[test]
    fn test_unmount_releases_listeners() {
        let (hero, mut registry) = mounted();
        assert_eq!(registry.len(), ListenerKind::HERO.len());
        hero.unmount(&mut registry);
        assert!(registry.is_empty());
    }
}
