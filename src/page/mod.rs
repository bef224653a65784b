//! # Page Model
//!
//! A small document model standing in for the browser page: a vertical stack
//! of sections, a native scroll position and a scroll lock. Input reaches the
//! page first; the page hands it to the hero section (when a listener for it
//! is registered) and falls back to native scrolling for anything the hero
//! does not capture.

pub mod layout;

pub use layout::{PageLayout, Section};

use crate::config::{HeroConfig, PageConfig};
use crate::hero::{FrameStatus, HeroSection, HeroSnapshot, ListenerKind, ListenerRegistry};

/// Name of the hero section in the page layout
pub const HERO_SECTION: &str = "hero";

/// Input as the page receives it, already converted to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageInput {
    /// Positive = scroll down
    Wheel { delta_y: f32 },
    TouchStart { y: f32 },
    TouchMove { y: f32 },
    TouchEnd,
    Key(ScrollKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollKey {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Home,
    End,
}

pub struct Page {
    layout: PageLayout,
    viewport_height: f32,
    scroll_y: f32,
    scroll_locked: bool,
    key_scroll_step: f32,
    listeners: ListenerRegistry,
    hero: Option<HeroSection>,
    touch_y: Option<f32>,
}

impl Page {
    pub fn new(config: &PageConfig, viewport_height: f32) -> Self {
        Self {
            layout: PageLayout::from_config(config),
            viewport_height: viewport_height.max(1.0),
            scroll_y: 0.0,
            scroll_locked: false,
            key_scroll_step: config.key_scroll_step,
            listeners: ListenerRegistry::new(),
            hero: None,
            touch_y: None,
        }
    }

    pub fn mount_hero(&mut self, config: &HeroConfig) {
        if self.hero.is_some() {
            self.unmount_hero();
        }
        self.hero = Some(HeroSection::mount(config, &mut self.listeners));
        self.sync_lock();
    }

    pub fn unmount_hero(&mut self) {
        if let Some(hero) = self.hero.take() {
            hero.unmount(&mut self.listeners);
        }
        self.set_locked(false);
    }

    pub fn hero(&self) -> Option<&HeroSection> {
        self.hero.as_ref()
    }

    pub fn hero_snapshot(&self) -> Option<HeroSnapshot> {
        self.hero.as_ref().map(HeroSection::snapshot)
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn max_scroll(&self) -> f32 {
        (self.layout.content_height(self.viewport_height) - self.viewport_height).max(0.0)
    }

    /// Top of `name` in page pixels
    pub fn section_top(&self, name: &str) -> Option<f32> {
        self.layout.section_top(name, self.viewport_height)
    }

    /// Hero offset, or `None` while the hero section is not mounted.
    pub fn hero_top(&self) -> Option<f32> {
        self.hero.as_ref()?;
        self.section_top(HERO_SECTION)
    }

    /// The section under the top edge of the viewport
    pub fn current_section(&self) -> Option<&Section> {
        self.layout.section_at(self.scroll_y, self.viewport_height)
    }

    pub fn resize(&mut self, viewport_height: f32) {
        self.viewport_height = viewport_height.max(1.0);
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }

    /// Native scroll. Does nothing while the page is locked; returns the new
    /// position if it changed.
    pub fn scroll_by(&mut self, delta_y: f32) -> Option<f32> {
        if self.scroll_locked || !delta_y.is_finite() {
            return None;
        }
        self.scroll_to(self.scroll_y + delta_y)
    }

    pub fn scroll_to(&mut self, y: f32) -> Option<f32> {
        if self.scroll_locked {
            return None;
        }
        let y = y.clamp(0.0, self.max_scroll());
        if y == self.scroll_y {
            return None;
        }
        self.scroll_y = y;
        Some(y)
    }

    /// Routes one input event. Returns true when something visible changed.
    pub fn dispatch(&mut self, input: PageInput) -> bool {
        let before = (self.scroll_y, self.hero_snapshot());

        match input {
            PageInput::Wheel { delta_y } => {
                let consumed = match self.hero.as_mut() {
                    Some(hero) if self.listeners.is_listening(ListenerKind::Wheel) => {
                        hero.on_wheel(delta_y).consumed
                    }
                    _ => false,
                };
                self.sync_lock();
                if !consumed {
                    self.native_scroll(delta_y);
                }
            }
            PageInput::TouchStart { y } => {
                self.touch_y = Some(y);
                if let Some(hero) = self.hero.as_mut() {
                    if self.listeners.is_listening(ListenerKind::TouchStart) {
                        hero.on_touch_start(y);
                    }
                }
            }
            PageInput::TouchMove { y } => {
                let native_delta = self.touch_y.replace(y).map_or(0.0, |prev| prev - y);
                let consumed = match self.hero.as_mut() {
                    Some(hero) if self.listeners.is_listening(ListenerKind::TouchMove) => {
                        hero.on_touch_move(y).consumed
                    }
                    _ => false,
                };
                self.sync_lock();
                if !consumed {
                    self.native_scroll(native_delta);
                }
            }
            PageInput::TouchEnd => {
                self.touch_y = None;
                if let Some(hero) = self.hero.as_mut() {
                    if self.listeners.is_listening(ListenerKind::TouchEnd) {
                        hero.on_touch_end();
                    }
                }
            }
            PageInput::Key(key) => {
                let page = self.viewport_height * 0.9;
                match key {
                    ScrollKey::LineUp => self.native_scroll(-self.key_scroll_step),
                    ScrollKey::LineDown => self.native_scroll(self.key_scroll_step),
                    ScrollKey::PageUp => self.native_scroll(-page),
                    ScrollKey::PageDown => self.native_scroll(page),
                    ScrollKey::Home => self.native_scroll(-self.scroll_y),
                    ScrollKey::End => self.native_scroll(self.max_scroll() - self.scroll_y),
                }
            }
        }

        before != (self.scroll_y, self.hero_snapshot())
    }

    fn native_scroll(&mut self, delta_y: f32) {
        if let Some(y) = self.scroll_by(delta_y) {
            log::trace!("page scrolled to {y:.1}");
            self.emit_scroll(y);
        }
    }

    fn emit_scroll(&mut self, y: f32) {
        let hero_top = self.hero_top();
        if let Some(hero) = self.hero.as_mut() {
            if self.listeners.is_listening(ListenerKind::Scroll) {
                hero.on_scroll(y, hero_top);
            }
        }
        self.sync_lock();
    }

    pub fn set_locked(&mut self, locked: bool) {
        if locked != self.scroll_locked {
            log::debug!("page scroll {}", if locked { "locked" } else { "unlocked" });
        }
        self.scroll_locked = locked;
    }

    /// Page scroll is locked exactly when the hero's controller is.
    fn sync_lock(&mut self) {
        let locked = self
            .hero
            .as_ref()
            .is_some_and(|hero| hero.controller().locked());
        self.set_locked(locked);
    }

    pub fn needs_frame(&self) -> bool {
        self.hero.as_ref().is_some_and(HeroSection::needs_frame)
    }

    pub fn frame(&mut self) -> FrameStatus {
        let status = match self.hero.as_mut() {
            Some(hero) => hero.frame(),
            None => FrameStatus::Done,
        };
        self.sync_lock();
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::Phase;

    fn page() -> Page {
        let config = HeroConfig::default();
        let mut page = Page::new(&config.page, 800.0);
        page.mount_hero(&config);
        page
    }

    fn wheel(page: &mut Page, delta_y: f32) {
        page.dispatch(PageInput::Wheel { delta_y });
    }

    fn run_frames(page: &mut Page) {
        let mut frames = 0;
        while page.needs_frame() {
            page.frame();
            frames += 1;
            assert!(frames < 10_000);
        }
    }

    #[test]
    fn test_capture_locks_native_scroll() {
        let mut page = page();
        wheel(&mut page, 50.0);
        assert!(page.scroll_locked());
        assert_eq!(page.scroll_y(), 0.0);
        assert!(!page.dispatch(PageInput::Key(ScrollKey::PageDown)));
        assert_eq!(page.scroll_y(), 0.0);
    }

    #[test]
    fn test_page_scrolls_once_hero_is_held() {
        let mut page = page();
        while page.hero().unwrap().controller().phase() != Phase::Held {
            wheel(&mut page, 100.0);
        }
        assert!(!page.scroll_locked());

        wheel(&mut page, 100.0);
        assert_eq!(page.scroll_y(), 100.0);
        assert_eq!(page.hero_snapshot().unwrap().progress, 1.0);
    }

    #[test]
    fn test_scrolling_back_up_reverses_and_unlocks() {
        let mut page = page();
        while page.hero().unwrap().controller().phase() != Phase::Held {
            wheel(&mut page, 100.0);
        }
        wheel(&mut page, 300.0);
        wheel(&mut page, -300.0);
        assert_eq!(page.scroll_y(), 0.0);
        assert_eq!(page.hero().unwrap().controller().phase(), Phase::Reversing);
        assert!(page.scroll_locked());

        run_frames(&mut page);
        assert_eq!(page.hero().unwrap().controller().phase(), Phase::Idle);
        assert!(!page.scroll_locked());
    }

    #[test]
    fn test_touch_drag_drives_hero() {
        let mut page = page();
        page.dispatch(PageInput::TouchStart { y: 600.0 });
        page.dispatch(PageInput::TouchMove { y: 500.0 });
        assert!(page.scroll_locked());
        assert!(page.hero_snapshot().unwrap().progress > 0.0);
        assert_eq!(page.scroll_y(), 0.0);
        page.dispatch(PageInput::TouchEnd);
    }

    #[test]
    fn test_without_hero_input_scrolls_natively() {
        let config = HeroConfig::default();
        let mut page = Page::new(&config.page, 800.0);
        assert_eq!(page.hero_top(), None);
        wheel(&mut page, 120.0);
        assert_eq!(page.scroll_y(), 120.0);
        assert!(!page.scroll_locked());
    }

    #[test]
    fn test_remount_does_not_duplicate_listeners() {
        let config = HeroConfig::default();
        let mut page = page();
        wheel(&mut page, 50.0);
        assert!(page.scroll_locked());

        page.unmount_hero();
        assert!(page.listeners().is_empty());
        assert!(!page.scroll_locked());

        page.mount_hero(&config);
        page.mount_hero(&config);
        assert_eq!(page.listeners().count(ListenerKind::Wheel), 1);
        assert_eq!(page.listeners().len(), ListenerKind::HERO.len());
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let config = HeroConfig::default();
        let mut page = Page::new(&config.page, 800.0);
        page.dispatch(PageInput::Key(ScrollKey::End));
        assert_eq!(page.scroll_y(), page.max_scroll());
        page.dispatch(PageInput::Key(ScrollKey::LineDown));
        assert_eq!(page.scroll_y(), page.max_scroll());
        page.dispatch(PageInput::Key(ScrollKey::Home));
        assert_eq!(page.scroll_y(), 0.0);
    }

    #[test]
    fn test_locked_page_ignores_native_scroll() {
        let config = HeroConfig::default();
        let mut page = Page::new(&config.page, 800.0);
        page.set_locked(true);
        assert_eq!(page.scroll_by(200.0), None);
        assert_eq!(page.scroll_to(400.0), None);
        page.set_locked(false);
        assert_eq!(page.scroll_by(200.0), Some(200.0));
    }
}
