//! Page navigation for paginated EPUB readers.
//!
//! A book is an ordered list of components (spine items). Each component is
//! laid out into fixed-size pages inside a horizontally scrolling viewport.
//! [`Navigator`] moves any number of independent surfaces through the book by
//! page number, carrying requests across component boundaries, building
//! components lazily, and remembering where every surface is.
//!
//! ```rust,no_run
//! use epub_stream_pager::{Component, MemorySource, Navigator, PageTurn};
//!
//! # fn example<C: Component>(surface: &mut C::Surface) -> epub_stream_pager::Result<()> {
//! let source = MemorySource::new()
//!     .with_component("ch1.xhtml", "<p>...</p>")
//!     .with_component("ch2.xhtml", "<p>...</p>");
//! let mut nav: Navigator<_, C> = Navigator::new(source)?;
//!
//! match nav.change_page(surface, 12, Some("ch1.xhtml"))? {
//!     PageTurn::Resolved { component, page } => println!("component {component}, page {page}"),
//!     PageTurn::BeforeStart | PageTurn::PastEnd => println!("no further"),
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

pub mod book;
pub mod component;
pub mod error;
pub mod navigation;
pub mod place;
pub mod source;

pub use book::{Navigator, PageTurn, PagerOptions};
pub use component::{Component, ComponentSeed, Surface, SurfaceId};
pub use error::{PagerError, Result};
pub use navigation::{chapters_for_component, split_href_fragment, Chapter, ChapterList, NavPoint};
pub use place::Place;
pub use source::{BookSource, MemorySource, SingleDocumentSource, SINGLE_DOCUMENT_ID};
