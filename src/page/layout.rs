//! Vertical stack of page sections, sized in viewport units.

use crate::config::PageConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    /// Offset from the top of the page, in viewport heights
    pub top_vh: f32,
    pub height_vh: f32,
}

impl Section {
    pub fn top(&self, viewport_height: f32) -> f32 {
        self.top_vh * viewport_height
    }

    pub fn height(&self, viewport_height: f32) -> f32 {
        self.height_vh * viewport_height
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    sections: Vec<Section>,
}

impl PageLayout {
    pub fn from_config(config: &PageConfig) -> Self {
        let mut top_vh = 0.0;
        let sections = config
            .sections
            .iter()
            .map(|s| {
                let section = Section {
                    name: s.name.clone(),
                    top_vh,
                    height_vh: s.height_vh,
                };
                top_vh += s.height_vh;
                section
            })
            .collect();
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_top(&self, name: &str, viewport_height: f32) -> Option<f32> {
        self.section(name).map(|s| s.top(viewport_height))
    }

    pub fn content_height(&self, viewport_height: f32) -> f32 {
        self.sections
            .iter()
            .map(|s| s.height(viewport_height))
            .sum()
    }

    /// The section containing page coordinate `y`
    pub fn section_at(&self, y: f32, viewport_height: f32) -> Option<&Section> {
        self.sections.iter().find(|s| {
            let top = s.top(viewport_height);
            y >= top && y < top + s.height(viewport_height)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HERO_SECTION;

    #[test]
    fn test_sections_stack_in_order() {
        let layout = PageLayout::from_config(&PageConfig::default());
        assert_eq!(layout.sections().len(), 4);
        assert_eq!(layout.section_top(HERO_SECTION, 1000.0), Some(0.0));
        let after = layout.section_top("after_header", 1000.0).unwrap();
        assert!((after - 1300.0).abs() < 1e-3);
        assert_eq!(layout.section_top("missing", 1000.0), None);
    }

    #[test]
    fn test_section_at() {
        let layout = PageLayout::from_config(&PageConfig::default());
        assert_eq!(layout.section_at(0.0, 1000.0).unwrap().name, HERO_SECTION);
        assert_eq!(layout.section_at(1400.0, 1000.0).unwrap().name, "after_header");
        assert!(layout.section_at(1.0e9, 1000.0).is_none());
    }
}
