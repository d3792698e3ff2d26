//! Flow-layout components and in-memory surfaces for `epub-stream-pager`.
//!
//! [`FlowComponent`] paginates XHTML by visible text volume against a
//! [`FlowSurface`]'s [`FlowLayoutConfig`]. It needs no font rasterizer, which
//! makes it a fit for headless page maps, previews, and tests.

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

mod flow_component;
mod flow_layout;
mod flow_surface;

pub use flow_component::FlowComponent;
pub use flow_layout::{scan_markup, FlowLayoutConfig, FlowText};
pub use flow_surface::FlowSurface;

/// Navigator over any book source using flow-layout components.
pub type FlowNavigator<B> = epub_stream_pager::Navigator<B, FlowComponent>;
