//! # Configuration
//!
//! All tunables of the hero live in [`HeroConfig`], read from a TOML file.
//! Every field has a default, so a partial file (or no file at all) is
//! valid input.
//!
//! ```toml
//! [controller]
//! wheel_sensitivity = 0.0012
//! touch_sensitivity = 0.0006
//!
//! [visual]
//! rotation_degrees = 360.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HeroError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub window: WindowConfig,
    pub controller: ControllerConfig,
    pub visual: VisualConfig,
    pub page: PageConfig,
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Show the imgui debug overlay at startup (toggled with F1)
    pub show_overlay: bool,
}

/// Tuning of the scroll progress state machine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Progress gained per pixel of wheel delta
    pub wheel_sensitivity: f32,
    /// Progress gained per pixel of touch movement. Touch deltas are larger
    /// per event, so this must stay below `wheel_sensitivity`.
    pub touch_sensitivity: f32,
    /// Progress removed per frame while reversing
    pub reverse_step: f32,
    /// Progress assigned when forward capture restarts from idle
    pub forward_epsilon: f32,
    /// Tolerance in pixels when deciding the page is at the hero top
    pub top_tolerance: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub rotation_degrees: f32,
    pub initial_scale: f32,
    pub max_scale: f32,
    /// Fraction of the remaining scale gap closed each frame
    pub scale_smoothing: f32,
    /// Model offset (world units) at progress 0, shrinking to 0 at 20%
    pub initial_offset_y: f32,
    pub settle_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Section heights in viewport units, top to bottom
    pub sections: Vec<SectionConfig>,
    /// Pixels scrolled per line for line-based wheel deltas
    pub pixels_per_line: f32,
    /// Pixels scrolled per arrow key press
    pub key_scroll_step: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    pub name: String,
    pub height_vh: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub model_path: PathBuf,
    pub video_path: PathBuf,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "VR Wing".to_string(),
            width: 1200,
            height: 800,
            show_overlay: false,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            wheel_sensitivity: 0.0012,
            touch_sensitivity: 0.0006,
            reverse_step: 0.02,
            forward_epsilon: 0.001,
            top_tolerance: 1.0,
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            rotation_degrees: 360.0,
            initial_scale: 0.6,
            max_scale: 1.4,
            scale_smoothing: 0.1,
            initial_offset_y: -0.5,
            settle_threshold: 0.0005,
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        let section = |name: &str, height_vh: f32| SectionConfig {
            name: name.to_string(),
            height_vh,
        };
        Self {
            sections: vec![
                section(crate::page::HERO_SECTION, 1.3),
                section("after_header", 1.1),
                section("services", 1.6),
                section("stronger", 0.9),
            ],
            pixels_per_line: 40.0,
            key_scroll_step: 60.0,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("assets/headset.obj"),
            video_path: PathBuf::from("assets/video.webm"),
        }
    }
}

impl HeroConfig {
    /// Default location: `<config_dir>/wing_hero/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wing_hero").join("config.toml"))
    }

    /// Loads the config from the default location, falling back to defaults
    /// when there is no config directory or no file.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| HeroError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|err| match err {
            HeroError::ConfigParse { source, .. } => HeroError::ConfigParse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: HeroConfig =
            toml::from_str(contents).map_err(|source| HeroError::ConfigParse {
                path: PathBuf::new(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let c = &self.controller;
        let v = &self.visual;
        let numbers = [
            ("controller.wheel_sensitivity", c.wheel_sensitivity),
            ("controller.touch_sensitivity", c.touch_sensitivity),
            ("controller.reverse_step", c.reverse_step),
            ("controller.forward_epsilon", c.forward_epsilon),
            ("controller.top_tolerance", c.top_tolerance),
            ("visual.rotation_degrees", v.rotation_degrees),
            ("visual.initial_scale", v.initial_scale),
            ("visual.max_scale", v.max_scale),
            ("visual.scale_smoothing", v.scale_smoothing),
            ("visual.initial_offset_y", v.initial_offset_y),
            ("visual.settle_threshold", v.settle_threshold),
            ("page.pixels_per_line", self.page.pixels_per_line),
            ("page.key_scroll_step", self.page.key_scroll_step),
        ];
        if let Some((name, value)) = numbers.iter().find(|(_, value)| !value.is_finite()) {
            return Err(HeroError::InvalidConfig(format!(
                "{name} must be finite (got {value})"
            )));
        }

        if !(c.wheel_sensitivity > 0.0) || !(c.touch_sensitivity > 0.0) {
            return Err(HeroError::InvalidConfig(
                "sensitivities must be positive".to_string(),
            ));
        }
        if c.touch_sensitivity >= c.wheel_sensitivity {
            return Err(HeroError::InvalidConfig(format!(
                "touch_sensitivity ({}) must be smaller than wheel_sensitivity ({})",
                c.touch_sensitivity, c.wheel_sensitivity
            )));
        }
        if !(c.reverse_step > 0.0 && c.reverse_step <= 1.0) {
            return Err(HeroError::InvalidConfig(
                "reverse_step must be in (0, 1]".to_string(),
            ));
        }
        if !(c.forward_epsilon > 0.0 && c.forward_epsilon < 1.0) {
            return Err(HeroError::InvalidConfig(
                "forward_epsilon must be in (0, 1)".to_string(),
            ));
        }

        if c.top_tolerance < 0.0 {
            return Err(HeroError::InvalidConfig(
                "top_tolerance must not be negative".to_string(),
            ));
        }

        if !(v.scale_smoothing > 0.0 && v.scale_smoothing <= 1.0) {
            return Err(HeroError::InvalidConfig(
                "scale_smoothing must be in (0, 1]".to_string(),
            ));
        }
        if v.settle_threshold < 0.0 {
            return Err(HeroError::InvalidConfig(
                "settle_threshold must not be negative".to_string(),
            ));
        }
        if v.initial_scale > v.max_scale {
            return Err(HeroError::InvalidConfig(
                "initial_scale must not exceed max_scale".to_string(),
            ));
        }

        if self.page.sections.is_empty() {
            return Err(HeroError::InvalidConfig(
                "page needs at least one section".to_string(),
            ));
        }
        if self.page.sections.iter().any(|s| !(s.height_vh > 0.0)) {
            return Err(HeroError::InvalidConfig(
                "section heights must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = HeroConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.controller.touch_sensitivity < config.controller.wheel_sensitivity);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = HeroConfig::from_toml(
            r#"
            [controller]
            reverse_step = 0.05

            [window]
            title = "Test"
            "#,
        )
        .unwrap();

        assert_eq!(config.controller.reverse_step, 0.05);
        assert_eq!(config.controller.wheel_sensitivity, 0.0012);
        assert_eq!(config.window.title, "Test");
        assert_eq!(config.window.width, 1200);
        assert_eq!(config.page.sections.len(), 4);
    }

    #[test]
    fn test_touch_must_be_less_sensitive_than_wheel() {
        let result = HeroConfig::from_toml(
            r#"
            [controller]
            wheel_sensitivity = 0.001
            touch_sensitivity = 0.002
            "#,
        );
        assert!(matches!(result, Err(HeroError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_bad_smoothing() {
        let mut config = HeroConfig::default();
        config.visual.scale_smoothing = 0.0;
        assert!(config.validate().is_err());
        config.visual.scale_smoothing = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = HeroConfig::from_toml("[controller\nwheel = ");
        assert!(matches!(result, Err(HeroError::ConfigParse { .. })));
    }

    #[test]
    fn test_rejects_negative_settle_threshold() {
        let result = HeroConfig::from_toml("[visual]\nsettle_threshold = -1.0");
        assert!(matches!(result, Err(HeroError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let result = HeroConfig::from_toml("[visual]\nmax_scale = nan");
        assert!(matches!(result, Err(HeroError::InvalidConfig(_))));

        let mut config = HeroConfig::default();
        config.visual.rotation_degrees = f32::INFINITY;
        assert!(config.validate().is_err());

        let mut config = HeroConfig::default();
        config.controller.top_tolerance = f32::NAN;
        assert!(config.validate().is_err());
    }
}
