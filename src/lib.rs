//! Interactive behaviours for the Penpoint marketing site.
//!
//! Three independent widgets share the host page:
//!
//! * [`app::hero::HeroRotator`] cycles the hero headline with fades.
//! * [`app::lightbox::Lightbox`] is the feature-screenshot modal with a focus trap.
//! * [`app::scroll::ScrollReveal`] reveals sections on scroll, staggers groups,
//!   styles the header, smooth-scrolls anchors and drives the mobile menu.
//!
//! Widgets talk to the document only through the [`page::Page`] trait.  In the
//! browser that is [`web::WebPage`] (wasm32 only); natively it is the
//! in-memory [`page::memory::MemoryPage`] used by the tests and the terminal
//! preview.

pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod page;

#[cfg(all(feature = "preview", not(target_arch = "wasm32")))]
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::event::{Binding, BindingKind, EventOutcome, Key, KeyInput, PageEvent, Timer};
pub use app::handler::Site;
pub use config::SiteConfig;
pub use error::SiteError;
pub use page::Page;
