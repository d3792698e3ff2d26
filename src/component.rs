//! Collaborator seams: rendering surfaces and book components.

use crate::error::Result;
use crate::navigation::{Chapter, ChapterList};

/// Stable identity of a content surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u64);

/// A content surface inside a horizontally scrolling viewport.
pub trait Surface {
    /// Identity used to key the surface's [`crate::Place`].
    fn id(&self) -> SurfaceId;

    /// Width of the scrolling viewport, one page wide.
    fn viewport_width(&self) -> u32;

    /// Scroll the viewport to `offset` pixels from the left.
    fn set_scroll_offset(&mut self, offset: u64);
}

/// Everything a component is built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentSeed {
    /// Data-source component id.
    pub id: String,
    /// Ordinal among the book's components (0-based).
    pub index: usize,
    /// Chapters that point into this component.
    pub chapters: ChapterList,
    /// Raw component content.
    pub content: String,
}

/// One unit of book content that knows how to lay itself out.
pub trait Component: Sized {
    /// Surface type this component renders onto.
    type Surface: Surface;

    /// Build a component from its seed.
    fn from_seed(seed: ComponentSeed) -> Result<Self>;

    /// Ordinal among the book's components.
    fn index(&self) -> usize;

    /// Data-source component id.
    fn id(&self) -> &str;

    /// Chapters that point into this component.
    fn chapters(&self) -> &[Chapter];

    /// Current page count, `0` until the component has been measured.
    fn last_page_number(&self) -> u32;

    /// Put this component's content onto `surface`.
    fn apply_to(&mut self, surface: &mut Self::Surface);

    /// Recompute the page count against `surface`. Returns whether it changed.
    fn update_dimensions(&mut self, surface: &Self::Surface) -> bool;

    /// Lay out `page` (1-based) on `surface`.
    fn prepare_node(&mut self, surface: &mut Self::Surface, page: u32);

    /// Page (1-based) on which `fragment` starts, if the component knows it.
    fn page_for_chapter(&self, fragment: &str) -> Option<u32>;
}
