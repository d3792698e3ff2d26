use epub_stream_pager::{Chapter, ChapterList, Component, ComponentSeed, PagerError, Result};

use crate::flow_layout::{scan_markup, FlowLayoutConfig, FlowText};
use crate::flow_surface::FlowSurface;

/// Component paginated by text volume.
///
/// Page count follows from the number of visible characters and the
/// surface's [`FlowLayoutConfig`]. Fragments resolve to the page holding
/// their anchor element.
#[derive(Clone, Debug)]
pub struct FlowComponent {
    id: String,
    index: usize,
    chapters: ChapterList,
    text: FlowText,
    /// Layout the page count was last measured against.
    measured: Option<FlowLayoutConfig>,
    last_page_number: u32,
}

impl FlowComponent {
    /// Visible character count.
    pub fn char_count(&self) -> usize {
        self.text.chars
    }
}

impl Component for FlowComponent {
    type Surface = FlowSurface;

    fn from_seed(seed: ComponentSeed) -> Result<Self> {
        let text = scan_markup(&seed.content).map_err(|err| PagerError::Component {
            id: seed.id.clone(),
            reason: format!("markup scan failed: {}", err),
        })?;
        log::trace!(
            "flow component '{}': {} chars, {} anchors",
            seed.id,
            text.chars,
            text.anchors.len()
        );
        Ok(Self {
            id: seed.id,
            index: seed.index,
            chapters: seed.chapters,
            text,
            measured: None,
            last_page_number: 0,
        })
    }

    fn index(&self) -> usize {
        self.index
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    fn last_page_number(&self) -> u32 {
        self.last_page_number
    }

    fn apply_to(&mut self, surface: &mut FlowSurface) {
        surface.show_component(&self.id);
    }

    fn update_dimensions(&mut self, surface: &FlowSurface) -> bool {
        let layout = surface.layout();
        self.measured = Some(layout);
        let pages = layout.pages_for(self.text.chars);
        if pages == self.last_page_number {
            return false;
        }
        log::debug!(
            "flow component '{}': {} -> {} pages",
            self.id,
            self.last_page_number,
            pages
        );
        self.last_page_number = pages;
        true
    }

    fn prepare_node(&mut self, surface: &mut FlowSurface, page: u32) {
        surface.show_page(page);
    }

    fn page_for_chapter(&self, fragment: &str) -> Option<u32> {
        let layout = self.measured?;
        let offset = self.text.anchor_offset(fragment)?;
        Some(layout.page_of_offset(offset).min(self.last_page_number.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epub_stream_pager::Surface;

    fn seed(content: &str) -> ComponentSeed {
        ComponentSeed {
            id: "ch1.xhtml".into(),
            index: 0,
            chapters: ChapterList::new(),
            content: content.into(),
        }
    }

    fn narrow_layout() -> FlowLayoutConfig {
        // 10 chars per line, 2 lines per page
        FlowLayoutConfig {
            width_px: 100,
            height_px: 40,
            margin_px: 0,
            char_width_px: 10,
            line_height_px: 20,
        }
    }

    #[test]
    fn measures_pages_from_text_volume() {
        let mut component = FlowComponent::from_seed(seed(&format!(
            "<body><p>{}</p></body>",
            "x".repeat(45)
        )))
        .expect("component should build");
        assert_eq!(component.char_count(), 45);
        assert_eq!(component.last_page_number(), 0);

        let mut surface = FlowSurface::new(1, narrow_layout());
        assert!(component.update_dimensions(&surface));
        assert_eq!(component.last_page_number(), 3);
        assert!(!component.update_dimensions(&surface));

        surface.resize(200, 40);
        assert!(component.update_dimensions(&surface));
        assert_eq!(component.last_page_number(), 2);

        component.apply_to(&mut surface);
        component.prepare_node(&mut surface, 2);
        assert_eq!(surface.component(), Some("ch1.xhtml"));
        assert_eq!(surface.page(), Some(2));
        assert_eq!(surface.viewport_width(), 200);
    }

    #[test]
    fn fragments_resolve_to_anchor_page() {
        let markup = format!(
            "<body><p>{}</p><h2 id=\"later\">{}</h2></body>",
            "a".repeat(25),
            "b".repeat(20)
        );
        let mut component = FlowComponent::from_seed(seed(&markup)).expect("builds");
        assert_eq!(component.page_for_chapter("later"), None);

        let surface = FlowSurface::new(1, narrow_layout());
        component.update_dimensions(&surface);
        assert_eq!(component.page_for_chapter("later"), Some(2));
        assert_eq!(component.page_for_chapter("absent"), None);
    }

    #[test]
    fn malformed_markup_is_a_component_error() {
        let err = FlowComponent::from_seed(seed("<p>text</p><!-- never closed")).unwrap_err();
        assert!(matches!(err, PagerError::Component { ref id, .. } if id == "ch1.xhtml"));
    }
}
