//! # Hero Visual Mapping
//!
//! Maps controller progress to the model's on-screen transform. Rotation and
//! translation follow progress directly; scale eases toward its target with
//! a fixed per-frame smoothing factor so fast wheel spins do not jitter.

use cgmath::{Deg, Matrix4, Vector3};

use crate::config::VisualConfig;

use super::frame::FrameStatus;
use super::state::Content;

/// Fraction of progress over which the model rises to its resting height
/// and, mirrored at the end, fades out.
const EDGE_SPAN: f32 = 0.2;

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[derive(Debug, Clone)]
pub struct HeroVisual {
    config: VisualConfig,
    progress: f32,
    content: Content,
    scale: f32,
}

impl HeroVisual {
    pub fn new(config: VisualConfig) -> Self {
        Self {
            scale: config.initial_scale,
            config,
            progress: 0.0,
            content: Content::Model,
        }
    }

    /// Latches the controller's values for this frame.
    pub fn sync(&mut self, progress: f32, content: Content) {
        self.progress = progress.clamp(0.0, 1.0);
        self.content = content;
    }

    /// Moves the displayed scale one smoothing step toward its target.
    /// Returns `Done` once it has settled.
    pub fn step(&mut self) -> FrameStatus {
        let target = self.target_scale();
        let gap = target - self.scale;
        if gap.abs() <= self.config.settle_threshold {
            self.scale = target;
            return FrameStatus::Done;
        }
        let next = self.scale + gap * self.config.scale_smoothing;
        // below float resolution the gap can no longer shrink
        if next == self.scale {
            self.scale = target;
            return FrameStatus::Done;
        }
        self.scale = next;
        FrameStatus::Continue
    }

    pub fn is_settled(&self) -> bool {
        (self.target_scale() - self.scale).abs() <= self.config.settle_threshold
    }

    pub fn target_scale(&self) -> f32 {
        lerp(self.config.initial_scale, self.config.max_scale, self.progress)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn rotation(&self) -> Deg<f32> {
        Deg(self.progress * self.config.rotation_degrees)
    }

    pub fn offset_y(&self) -> f32 {
        let rise = (self.progress / EDGE_SPAN).min(1.0);
        self.config.initial_offset_y * (1.0 - rise)
    }

    pub fn model_opacity(&self) -> f32 {
        let fade = ((self.progress - (1.0 - EDGE_SPAN)) / EDGE_SPAN).clamp(0.0, 1.0);
        1.0 - fade
    }

    pub fn model_visible(&self) -> bool {
        self.content == Content::Model
    }

    pub fn video_visible(&self) -> bool {
        self.content == Content::Video
    }

    /// Model matrix, T * R * S
    pub fn transform(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(Vector3::new(0.0, self.offset_y(), 0.0));
        let r = Matrix4::from_angle_y(self.rotation());
        let s = Matrix4::from_scale(self.scale);
        t * r * s
    }
}
