//! Page navigation across a book's components.
//!
//! The [`Navigator`] turns a requested page number for a surface into a page
//! inside a concrete component. Requests past the end of a component carry
//! over into the next one, requests before page 1 carry back into the
//! previous one, and only the very start and end of the book refuse a turn.

use std::collections::HashMap;

use crate::component::{Component, ComponentSeed, Surface, SurfaceId};
use crate::error::{PagerError, Result};
use crate::navigation::{chapters_for_component, split_href_fragment, Chapter};
use crate::place::Place;
use crate::source::BookSource;

/// Navigator options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagerOptions {
    /// Rescale the requested page when a component's page count changes
    /// after re-measuring, keeping the reader's relative position.
    pub rescale_on_reflow: bool,
    /// Clamp a rescaled page to the component's new last page instead of
    /// letting it carry over into the next component.
    pub clamp_rescaled_page: bool,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self {
            rescale_on_reflow: true,
            clamp_rescaled_page: false,
        }
    }
}

/// Outcome of a page turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageTurn {
    /// Surface now shows `page` of component `component`.
    Resolved { component: usize, page: u32 },
    /// Request lies before the first page of the book. Nothing moved.
    BeforeStart,
    /// Request lies after the last page of the book. Nothing moved.
    PastEnd,
}

impl PageTurn {
    /// Resolved page within its component, if the turn happened.
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Resolved { page, .. } => Some(*page),
            Self::BeforeStart | Self::PastEnd => None,
        }
    }

    /// Whether the turn happened.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Moves surfaces through a book page by page.
///
/// Components are built lazily on first use and kept for the navigator's
/// lifetime. Every surface gets its own [`Place`]; surfaces share components.
pub struct Navigator<B, C> {
    source: B,
    components: Vec<Option<C>>,
    places: HashMap<SurfaceId, Place>,
    options: PagerOptions,
}

impl<B, C> std::fmt::Debug for Navigator<B, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("components", &self.components.len())
            .field(
                "loaded",
                &self.components.iter().filter(|c| c.is_some()).count(),
            )
            .field("places", &self.places.len())
            .field("options", &self.options)
            .finish()
    }
}

impl<B, C> Navigator<B, C>
where
    B: BookSource,
    C: Component,
{
    /// Create a navigator with default options.
    pub fn new(source: B) -> Result<Self> {
        Self::with_options(source, PagerOptions::default())
    }

    /// Create a navigator with explicit options.
    pub fn with_options(source: B, options: PagerOptions) -> Result<Self> {
        let count = source.component_count();
        if count == 0 {
            return Err(PagerError::EmptyBook);
        }
        let mut components = Vec::with_capacity(count);
        components.resize_with(count, || None);
        Ok(Self {
            source,
            components,
            places: HashMap::new(),
            options,
        })
    }

    /// Number of components in the book.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Metadata lookup, passed through to the data source.
    pub fn metadata(&self, key: &str) -> Option<String> {
        self.source.metadata(key)
    }

    /// Ordinal of component `id`, if the book has it.
    pub fn resolve_component(&self, id: &str) -> Option<usize> {
        self.source.component_index(id)
    }

    /// Component at `index` if it has been loaded.
    pub fn component(&self, index: usize) -> Option<&C> {
        self.components.get(index).and_then(Option::as_ref)
    }

    /// Component at `index`, building it on first access.
    ///
    /// The same index always yields the same component instance.
    pub fn component_at(&mut self, index: usize) -> Result<&mut C> {
        let count = self.components.len();
        let slot = self
            .components
            .get_mut(index)
            .ok_or(PagerError::ComponentOutOfRange { index, count })?;
        let component = match slot.take() {
            Some(component) => component,
            None => load_component(&self.source, index)?,
        };
        Ok(slot.insert(component))
    }

    /// Most recent place recorded for `surface`.
    pub fn place_for(&self, surface: SurfaceId) -> Option<&Place> {
        self.places.get(&surface)
    }

    /// Turn `surface` to `requested`, a page number relative to the start of
    /// the component named by `hint` (or the surface's current component when
    /// the hint is absent or unknown).
    ///
    /// Out-of-range page numbers carry over into neighbouring components.
    /// Returns [`PageTurn::BeforeStart`] / [`PageTurn::PastEnd`] without moving
    /// when the request falls outside the book.
    pub fn change_page(
        &mut self,
        surface: &mut C::Surface,
        requested: i64,
        hint: Option<&str>,
    ) -> Result<PageTurn> {
        let surface_id = surface.id();
        let place = self.ensure_place(surface_id)?;
        let mut target = hint
            .and_then(|id| self.resolve_component(id))
            .unwrap_or_else(|| place.component());
        let mut applied = place.applied();
        let mut page = requested;
        // Remainder counted back from the end of a component not yet measured.
        let mut from_end = false;

        let options = self.options;
        let last_index = self.components.len() - 1;
        let max_hops = self.components.len() + 1;

        for _ in 0..max_hops {
            let component = self.component_at(target)?;
            debug_assert_eq!(component.index(), target);
            if applied != Some(target) {
                log::trace!("surface {:?}: applying component {}", surface_id, target);
                component.apply_to(surface);
                applied = Some(target);
            }

            let old_last = component.last_page_number();
            let changed = component.update_dimensions(surface);
            let last = component.last_page_number();
            if last == 0 {
                log::warn!(
                    "component '{}' (index {}) measured to zero pages",
                    component.id(),
                    target
                );
                return Err(PagerError::DegenerateComponent {
                    index: target,
                    id: component.id().into(),
                });
            }
            let last_page = i64::from(last);

            if from_end {
                page += last_page;
                from_end = false;
            } else if changed && old_last > 0 && options.rescale_on_reflow {
                let rescaled = rescale_page(page, old_last, last);
                log::debug!(
                    "component {} reflowed {} -> {} pages; page {} -> {}",
                    target,
                    old_last,
                    last,
                    page,
                    rescaled
                );
                page = rescaled;
                if options.clamp_rescaled_page {
                    page = page.min(last_page);
                }
            }

            if target == 0 && page < 1 {
                self.record_applied(surface_id, applied);
                return Ok(PageTurn::BeforeStart);
            }
            if target == last_index && page > last_page {
                self.record_applied(surface_id, applied);
                return Ok(PageTurn::PastEnd);
            }
            if page > last_page {
                page -= last_page;
                log::debug!(
                    "page overflows component {}; carrying {} into component {}",
                    target,
                    page,
                    target + 1
                );
                target += 1;
                continue;
            }
            if page < 1 {
                target -= 1;
                let previous_last = self.component_at(target)?.last_page_number();
                if previous_last > 0 {
                    page += i64::from(previous_last);
                } else {
                    from_end = true;
                }
                log::debug!(
                    "page underflows into component {} (requested {}, from_end={})",
                    target,
                    page,
                    from_end
                );
                continue;
            }

            debug_assert!((1..=last_page).contains(&page));
            let page = u32::try_from(page).unwrap_or(last);
            component.prepare_node(surface, page);
            let offset = u64::from(page - 1) * u64::from(surface.viewport_width());
            surface.set_scroll_offset(offset);
            if let Some(place) = self.places.get_mut(&surface_id) {
                place.set_place(target, page);
            }
            log::debug!(
                "surface {:?}: resolved to component {} page {}",
                surface_id,
                target,
                page
            );
            return Ok(PageTurn::Resolved {
                component: target,
                page,
            });
        }

        Err(PagerError::CrossingLimit { hops: max_hops })
    }

    /// Turn `surface` forward one page.
    pub fn next_page(&mut self, surface: &mut C::Surface) -> Result<PageTurn> {
        let place = self.ensure_place(surface.id())?;
        self.change_page(surface, i64::from(place.page_number()) + 1, None)
    }

    /// Turn `surface` back one page.
    pub fn previous_page(&mut self, surface: &mut C::Surface) -> Result<PageTurn> {
        let place = self.ensure_place(surface.id())?;
        self.change_page(surface, i64::from(place.page_number()) - 1, None)
    }

    /// Resolve `path` (`component` or `component#fragment`) to a new place for
    /// `surface`, replacing any place it had.
    ///
    /// The component is re-measured against `surface`, so its page count
    /// reflects this surface afterwards. Returns `None` when the component id
    /// is unknown; the existing place is left alone in that case.
    pub fn place_of_chapter(
        &mut self,
        surface: &C::Surface,
        path: &str,
    ) -> Result<Option<&Place>> {
        let (id, fragment) = split_href_fragment(path);
        let Some(index) = self.resolve_component(id) else {
            log::debug!("no component for chapter path '{}'", path);
            return Ok(None);
        };

        let component = self.component_at(index)?;
        component.update_dimensions(surface);
        let last = component.last_page_number();
        if last == 0 {
            return Err(PagerError::DegenerateComponent {
                index,
                id: component.id().into(),
            });
        }
        let page = match fragment {
            Some(fragment) => {
                let page = component.page_for_chapter(fragment);
                if page.is_none() {
                    log::debug!(
                        "fragment '{}' not found in '{}'; using first page",
                        fragment,
                        id
                    );
                }
                page.unwrap_or(1).clamp(1, last)
            }
            None => 1,
        };

        let surface_id = surface.id();
        self.places
            .insert(surface_id, Place::new(surface_id, index, page));
        Ok(self.places.get(&surface_id))
    }

    /// Resolve `path` with [`Navigator::place_of_chapter`] and turn `surface`
    /// to it.
    pub fn go_to_chapter(
        &mut self,
        surface: &mut C::Surface,
        path: &str,
    ) -> Result<Option<PageTurn>> {
        let Some(place) = self.place_of_chapter(surface, path)?.copied() else {
            return Ok(None);
        };
        let id = self
            .source
            .component_ids()
            .get(place.component())
            .cloned();
        self.change_page(surface, i64::from(place.page_number()), id.as_deref())
            .map(Some)
    }

    /// Chapter containing `place`: the chapter of its component that started
    /// most recently at or before the place's page. Ties go to the later
    /// table-of-contents entry.
    pub fn chapter_at_place(&self, place: &Place) -> Option<&Chapter> {
        let component = self.component(place.component())?;
        let mut found: Option<(u32, &Chapter)> = None;
        for chapter in component.chapters() {
            let start = match chapter.fragment.as_deref() {
                Some(fragment) => component.page_for_chapter(fragment).unwrap_or(1),
                None => 1,
            };
            if start > place.page_number() {
                continue;
            }
            if found.is_none_or(|(best, _)| start >= best) {
                found = Some((start, chapter));
            }
        }
        found.map(|(_, chapter)| chapter)
    }

    fn ensure_place(&mut self, surface: SurfaceId) -> Result<Place> {
        if let Some(place) = self.places.get(&surface) {
            return Ok(*place);
        }
        self.component_at(0)?;
        let place = Place::new(surface, 0, 1);
        self.places.insert(surface, place);
        Ok(place)
    }

    fn record_applied(&mut self, surface: SurfaceId, applied: Option<usize>) {
        if let (Some(place), Some(component)) = (self.places.get_mut(&surface), applied) {
            place.set_applied(component);
        }
    }
}

fn load_component<B, C>(source: &B, index: usize) -> Result<C>
where
    B: BookSource,
    C: Component,
{
    let ids = source.component_ids();
    let id = ids
        .get(index)
        .ok_or(PagerError::ComponentOutOfRange {
            index,
            count: ids.len(),
        })?
        .clone();
    let content = source.component_content(&id)?;
    let chapters = chapters_for_component(source.contents(), &id);
    log::trace!(
        "loading component '{}' (index {}, {} chapters, {} bytes)",
        id,
        index,
        chapters.len(),
        content.len()
    );
    C::from_seed(ComponentSeed {
        id,
        index,
        chapters,
        content,
    })
}

/// Scale `page` by `new_last / old_last`, rounding half up, never below 1.
fn rescale_page(page: i64, old_last: u32, new_last: u32) -> i64 {
    let scaled = f64::from(new_last) * (page as f64 / f64::from(old_last));
    let rounded = (scaled + 0.5).floor();
    if !rounded.is_finite() {
        return 1;
    }
    (rounded as i64).max(1)
}
