use epub_stream_pager::{Surface, SurfaceId};

use crate::flow_layout::FlowLayoutConfig;

/// In-memory page surface.
///
/// Tracks what a real viewport would show: the applied component, the laid
/// out page, and the horizontal scroll offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowSurface {
    id: SurfaceId,
    layout: FlowLayoutConfig,
    scroll_offset: u64,
    component: Option<String>,
    page: Option<u32>,
    applies: usize,
}

impl FlowSurface {
    /// Surface `id` laid out with `layout`.
    pub fn new(id: u64, layout: FlowLayoutConfig) -> Self {
        Self {
            id: SurfaceId(id),
            layout,
            scroll_offset: 0,
            component: None,
            page: None,
            applies: 0,
        }
    }

    pub fn layout(&self) -> FlowLayoutConfig {
        self.layout
    }

    /// Resize the surface. Components re-measure on the next page turn.
    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        self.layout.width_px = width_px;
        self.layout.height_px = height_px;
    }

    /// Replace typography metrics.
    pub fn set_layout(&mut self, layout: FlowLayoutConfig) {
        self.layout = layout;
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// Id of the component currently applied.
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// Page last laid out.
    pub fn page(&self) -> Option<u32> {
        self.page
    }

    /// Number of times a component was applied.
    pub fn applies(&self) -> usize {
        self.applies
    }

    pub(crate) fn show_component(&mut self, id: &str) {
        self.component = Some(id.to_string());
        self.page = None;
        self.applies += 1;
    }

    pub(crate) fn show_page(&mut self, page: u32) {
        self.page = Some(page);
    }
}

impl Surface for FlowSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn viewport_width(&self) -> u32 {
        self.layout.width_px
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll_offset = offset;
    }
}
