//! Wing Hero
//!
//! A scroll-driven 3D hero section rendered with wgpu and winit: scrolling
//! turns and grows a headset model, then hands over to an ambient video
//! backdrop, and scrolling back up at the top rewinds the animation.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod hero;
pub mod page;
pub mod ui;

// Re-export main types for convenience
pub use app::HeroApp;
pub use config::HeroConfig;
pub use error::{HeroError, Result};
pub use hero::{HeroSection, HeroSnapshot, Phase, ScrollProgressController};
pub use page::{Page, PageInput};
