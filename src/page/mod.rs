//! Host document abstraction.
//!
//! Widgets never touch a concrete DOM.  They see a [`Page`]: element lookup
//! by CSS selector, class/attribute/text mutation, focus, geometry, scrolling,
//! viewport observation and one-shot timers.  Every mutation goes through a
//! text or attribute API, so supplied strings are never parsed as markup.

pub mod demo;
pub mod memory;
pub mod selector;

use std::fmt;
use std::time::Duration;

use crate::app::event::Timer;
use crate::core::reveal::Rect;

/// How a programmatic scroll moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// Options the host's intersection observer is created with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    /// The viewport is shrunk by this many pixels on every edge.
    pub root_margin_px: f64,
}

impl ObserverOptions {
    /// CSS `rootMargin` string for this inset.
    pub fn root_margin_css(&self) -> String {
        format!("-{}px", self.root_margin_px)
    }
}

/// A host document the widgets can drive.
pub trait Page {
    /// Handle to one element.  Cheap to clone, compares by identity.
    type Node: Clone + PartialEq + fmt::Debug;

    // ── lookup ─────────────────────────────────────────────────
    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    /// First descendant of `root` matching `selector`.
    fn query_in(&self, root: &Self::Node, selector: &str) -> Option<Self::Node>;
    /// All descendants of `root` matching `selector`, in document order.
    fn query_all_in(&self, root: &Self::Node, selector: &str) -> Vec<Self::Node>;
    /// Whether `node` is `root` or one of its descendants.
    fn contains(&self, root: &Self::Node, node: &Self::Node) -> bool;

    // ── mutation ───────────────────────────────────────────────
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&mut self, node: &Self::Node, name: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&mut self, node: &Self::Node, class: &str);
    fn remove_class(&mut self, node: &Self::Node, class: &str);
    /// Replace the element's content with a single text node.
    fn set_text(&mut self, node: &Self::Node, text: &str);
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);
    /// Append a new `<tag class="class">` to `parent`.
    fn append_element(&mut self, parent: &Self::Node, tag: &str, class: &str) -> Option<Self::Node>;
    /// Flush pending style so a removed-then-added animation class restarts.
    fn force_reflow(&mut self, _node: &Self::Node) {}

    // ── focus ──────────────────────────────────────────────────
    fn focus(&mut self, node: &Self::Node);
    fn active_element(&self) -> Option<Self::Node>;
    /// Whether Tab can land on `node`: rendered, enabled, and not opted out
    /// with `tabindex="-1"`.  A hidden ancestor hides the node too.
    fn is_focusable(&self, node: &Self::Node) -> bool;

    // ── geometry & scrolling ───────────────────────────────────
    /// Box of `node` relative to the viewport.
    fn bounding_rect(&self, node: &Self::Node) -> Rect;
    fn offset_height(&self, node: &Self::Node) -> f64;
    fn viewport_height(&self) -> f64;
    fn scroll_y(&self) -> f64;
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    // ── deferred work ──────────────────────────────────────────
    /// Start delivering intersection entries for `node`.
    fn observe(&mut self, node: &Self::Node);
    fn unobserve(&mut self, node: &Self::Node);
    /// Deliver `timer` back to the site once `delay` has elapsed.
    fn schedule(&mut self, delay: Duration, timer: Timer);
}
