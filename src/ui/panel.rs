//! Debug overlay panel for the hero animation.

use std::time::Duration;

use crate::hero::HeroSnapshot;

/// Everything the overlay shows, gathered by the app once per frame.
#[derive(Debug, Clone)]
pub struct OverlayInfo {
    pub hero: Option<HeroSnapshot>,
    pub scroll_y: f32,
    pub max_scroll: f32,
    pub scroll_locked: bool,
    pub section: Option<String>,
    /// Time since the hero last received wheel or touch input
    pub last_input: Option<Duration>,
    pub model_ready: bool,
    pub video_ready: bool,
}

pub fn hero_debug_panel(ui: &imgui::Ui, info: &OverlayInfo) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Hero")
        .size([300.0, 0.0], imgui::Condition::FirstUseEver)
        .position([16.0, 16.0], imgui::Condition::FirstUseEver)
        .collapsible(true)
        .build(|| {
            match &info.hero {
                Some(hero) => {
                    ui.text(format!("progress  {:.3}", hero.progress));
                    ui.text(format!("phase     {}", hero.phase));
                    ui.text(format!("locked    {}", hero.locked));
                    ui.text(format!("content   {:?}", hero.content));
                    ui.separator();
                    ui.text(format!("rotation  {:.1} deg", hero.rotation.0));
                    ui.text(format!("scale     {:.3}", hero.scale));
                    ui.text(format!("offset y  {:.3}", hero.offset_y));
                    ui.text(format!("opacity   {:.2}", hero.model_opacity));
                }
                None => ui.text_disabled("hero not mounted"),
            }
            ui.separator();
            ui.text(format!(
                "scroll    {:.0} / {:.0}{}",
                info.scroll_y,
                info.max_scroll,
                if info.scroll_locked { " (locked)" } else { "" }
            ));
            ui.text(format!(
                "section   {}",
                info.section.as_deref().unwrap_or("-")
            ));
            match info.last_input {
                Some(age) => ui.text(format!("input     {:.1}s ago", age.as_secs_f32())),
                None => ui.text("input     -"),
            }
            ui.text(format!(
                "assets    model {}, video {}",
                ready(info.model_ready),
                ready(info.video_ready)
            ));
        });
}

fn ready(flag: bool) -> &'static str {
    if flag {
        "ok"
    } else {
        "missing"
    }
}
