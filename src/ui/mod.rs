//! # Debug Overlay
//!
//! A Dear ImGui overlay (toggled with F1) that shows the hero's live state:
//! progress, phase, scroll lock, the derived transform and asset status.
//! The overlay only reads; it never drives the animation.

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::{hero_debug_panel, OverlayInfo};
