//! Reading position of one surface.

use crate::component::SurfaceId;

/// Which component a surface shows and on which page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Place {
    surface: SurfaceId,
    component: usize,
    page_number: u32,
    /// Component last applied to the surface, `None` until one is.
    applied: Option<usize>,
}

impl Place {
    pub(crate) fn new(surface: SurfaceId, component: usize, page_number: u32) -> Self {
        Self {
            surface,
            component,
            page_number,
            applied: None,
        }
    }

    /// Surface this place tracks.
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Ordinal of the component shown.
    pub fn component(&self) -> usize {
        self.component
    }

    /// 1-based page within the component.
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Fraction of the component read, in `[0, 1]`.
    ///
    /// The first page is `0.0` and the last page is `1.0`. A single-page
    /// component is always complete.
    pub fn component_progress(&self, last_page_number: u32) -> f32 {
        if last_page_number <= 1 {
            return 1.0;
        }
        let page = self.page_number.clamp(1, last_page_number);
        ((page - 1) as f32 / (last_page_number - 1) as f32).clamp(0.0, 1.0)
    }

    pub(crate) fn applied(&self) -> Option<usize> {
        self.applied
    }

    pub(crate) fn set_applied(&mut self, component: usize) {
        self.applied = Some(component);
    }

    pub(crate) fn set_place(&mut self, component: usize, page_number: u32) {
        self.component = component;
        self.page_number = page_number;
        self.applied = Some(component);
    }
}
