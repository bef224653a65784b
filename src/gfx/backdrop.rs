//! Backdrop colour behind the model.
//!
//! The intro shows a dark brand backdrop. Once the video is revealed the
//! backdrop slowly pulses in the brand purple under a 50% black overlay; if
//! the video asset is missing it stays on the intro colour.

use crate::hero::HeroSnapshot;

const INTRO: [f64; 3] = [0.03, 0.01, 0.06];
const BRAND: [f64; 3] = [0.565, 0.0, 1.0];
/// Darkening applied over the video
const OVERLAY_DIM: f64 = 0.5;
const PULSE_PERIOD_SECS: f64 = 6.0;

/// Whether the backdrop changes over time and so needs continuous redraws.
pub fn backdrop_animates(snapshot: &HeroSnapshot, video_ready: bool) -> bool {
    snapshot.video_visible && video_ready
}

pub fn backdrop_color(snapshot: &HeroSnapshot, video_ready: bool, time_secs: f64) -> wgpu::Color {
    if !backdrop_animates(snapshot, video_ready) {
        return rgb(INTRO);
    }
    let phase = (time_secs / PULSE_PERIOD_SECS) * std::f64::consts::TAU;
    let pulse = 0.35 + 0.15 * phase.sin();
    let mix = |i: usize| (INTRO[i] + (BRAND[i] - INTRO[i]) * pulse) * (1.0 - OVERLAY_DIM);
    rgb([mix(0), mix(1), mix(2)])
}

/// Backdrop used when no hero is mounted.
pub fn intro_backdrop() -> wgpu::Color {
    rgb(INTRO)
}

fn rgb(c: [f64; 3]) -> wgpu::Color {
    wgpu::Color {
        r: c[0],
        g: c[1],
        b: c[2],
        a: 1.0,
    }
}
