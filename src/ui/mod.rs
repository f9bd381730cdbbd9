//! Terminal preview: renders a [`MemoryPage`](crate::page::memory::MemoryPage)
//! with Ratatui so the widgets can be watched without a browser.

pub mod input;
pub mod layout;
pub mod lightbox;
pub mod page_view;
pub mod popup;
pub mod smooth_scroll;
pub mod theme;
