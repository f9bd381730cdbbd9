//! In-memory document.
//!
//! Elements live in an arena and link to their children by index, like a
//! tiny DOM.  Each element can carry a document-space layout box so geometry,
//! scrolling and the intersection observer behave like a browser would.  A
//! virtual clock holds scheduled timers until the driver pops them.
//!
//! Rendering is not modelled, so "hidden" is approximated: an element with
//! the `hidden` attribute, or inside an `aria-hidden="true"` subtree, is not
//! part of the tab order.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::warn;

use crate::app::event::Timer;
use crate::config::{attributes, selectors};
use crate::core::reveal::{IntersectionEntry, Rect};

use super::selector::{ElementView, Selector};
use super::{ObserverOptions, Page, ScrollBehavior};

/// Index into the page's element arena.
pub type NodeId = usize;

/// One element.
#[derive(Debug, Clone, Default)]
pub struct MemoryNode {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
    pub text: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Document-space `(top, height)`; inherited from the nearest ancestor
    /// when unset.
    pub layout: Option<(f64, f64)>,
}

impl ElementView for MemoryNode {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy)]
struct Observed {
    node: NodeId,
    /// Whether the node was past the threshold at the last delivery; `None`
    /// until the first delivery.
    last_past_threshold: Option<bool>,
}

/// An in-memory [`Page`].
#[derive(Debug, Clone)]
pub struct MemoryPage {
    nodes: Vec<MemoryNode>,
    focused: Option<NodeId>,
    scroll_y: f64,
    viewport_height: f64,
    smooth_target: Option<f64>,
    observer: ObserverOptions,
    observed: Vec<Observed>,
    now: Duration,
    timers: BTreeMap<(Duration, u64), Timer>,
    next_timer_seq: u64,
}

impl MemoryPage {
    /// Empty document containing only `<body>` (node 0).
    pub fn new(viewport_height: f64, observer: ObserverOptions) -> Self {
        Self {
            nodes: vec![MemoryNode {
                tag: "body".into(),
                ..MemoryNode::default()
            }],
            focused: None,
            scroll_y: 0.0,
            viewport_height,
            smooth_target: None,
            observer,
            observed: Vec::new(),
            now: Duration::ZERO,
            timers: BTreeMap::new(),
            next_timer_seq: 0,
        }
    }

    pub fn body(&self) -> NodeId {
        0
    }

    /// Append a `<tag>` under `parent` and return a builder for it.
    pub fn element(&mut self, parent: NodeId, tag: &str) -> NodeBuilder<'_> {
        let id = self.push_node(parent, tag);
        NodeBuilder { page: self, id }
    }

    fn push_node(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(MemoryNode {
            tag: tag.to_string(),
            parent: Some(parent),
            ..MemoryNode::default()
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &MemoryNode {
        &self.nodes[id]
    }

    /// Every element still attached to the document, in document order.
    pub fn document_order(&self) -> Vec<NodeId> {
        self.subtree(self.body())
    }

    /// Number of ancestors between `id` and `<body>`.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count().saturating_sub(1)
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id].text
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.nodes[id].styles.get(property).map(String::as_str)
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn is_observed(&self, id: NodeId) -> bool {
        self.observed.iter().any(|o| o.node == id)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Element with `id="..."`, if any.
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.query(&format!("#{id}"))
    }

    // ── tree walking ───────────────────────────────────────────

    /// `root` and its descendants in document order.
    fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id].children.iter().rev());
        }
        out
    }

    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&n| self.nodes[n].parent)
    }

    fn select(&self, root: NodeId, include_root: bool, selector: &str) -> Vec<NodeId> {
        let sel = match Selector::parse(selector) {
            Ok(sel) => sel,
            Err(err) => {
                warn!("memory page: {err}");
                return Vec::new();
            }
        };
        self.subtree(root)
            .into_iter()
            .filter(|&id| include_root || id != root)
            .filter(|&id| sel.matches(&self.nodes[id]))
            .collect()
    }

    // ── keyboard ───────────────────────────────────────────────

    /// Detached, or inside a `hidden` / `aria-hidden="true"` subtree.
    pub fn is_hidden(&self, id: NodeId) -> bool {
        let mut attached = false;
        for a in self.ancestors(id) {
            let node = &self.nodes[a];
            if node.attribute(attributes::HIDDEN).is_some()
                || node.attribute(attributes::ARIA_HIDDEN) == Some("true")
            {
                return true;
            }
            attached = a == self.body();
        }
        !attached
    }

    fn is_tabbable(&self, id: NodeId) -> bool {
        let node = &self.nodes[id];
        node.attribute(attributes::DISABLED).is_none()
            && node.attribute(attributes::TABINDEX) != Some("-1")
            && !self.is_hidden(id)
    }

    /// Focusable elements in document order.
    pub fn tab_order(&self) -> Vec<NodeId> {
        self.select(self.body(), false, selectors::FOCUSABLE)
            .into_iter()
            .filter(|&id| self.is_tabbable(id))
            .collect()
    }

    /// The browser's default Tab behaviour: move to the next (or previous)
    /// tabbable element, wrapping around the document.
    pub fn focus_next(&mut self, backwards: bool) {
        let order = self.tab_order();
        if order.is_empty() {
            return;
        }
        let current = self.focused.and_then(|f| order.iter().position(|&id| id == f));
        let next = match (current, backwards) {
            (None, false) => 0,
            (None, true) => order.len() - 1,
            (Some(i), false) => (i + 1) % order.len(),
            (Some(i), true) => (i + order.len() - 1) % order.len(),
        };
        self.focused = Some(order[next]);
    }

    // ── scrolling ──────────────────────────────────────────────

    fn layout_of(&self, id: NodeId) -> (f64, f64) {
        self.ancestors(id)
            .find_map(|a| self.nodes[a].layout)
            .unwrap_or((0.0, 0.0))
    }

    /// Height of the whole document.
    pub fn document_height(&self) -> f64 {
        self.nodes
            .iter()
            .filter_map(|n| n.layout)
            .map(|(top, height)| top + height)
            .fold(self.viewport_height, f64::max)
    }

    fn clamp_scroll(&self, top: f64) -> f64 {
        top.clamp(0.0, (self.document_height() - self.viewport_height).max(0.0))
    }

    /// Move the viewport, clamped to the document.  An in-flight smooth
    /// scroll keeps its target.
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = self.clamp_scroll(y);
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Destination of a smooth scroll still in flight.
    pub fn smooth_target(&self) -> Option<f64> {
        self.smooth_target
    }

    /// Jump to the end of an in-flight smooth scroll.
    pub fn finish_smooth_scroll(&mut self) {
        if let Some(target) = self.smooth_target.take() {
            self.scroll_y = target;
        }
    }

    // ── observer ───────────────────────────────────────────────

    /// Entries the observer would deliver now: the first check of each newly
    /// observed node, then one entry every time a node crosses the threshold.
    pub fn take_intersections(&mut self) -> Vec<IntersectionEntry<NodeId>> {
        let margin = self.observer.root_margin_px;
        let (from, to) = (margin, self.viewport_height - margin);
        let threshold = self.observer.threshold;

        let mut entries = Vec::new();
        for i in 0..self.observed.len() {
            let node = self.observed[i].node;
            let ratio = self.bounding_rect(&node).visible_fraction(from, to);
            let past = ratio >= threshold;
            if self.observed[i].last_past_threshold != Some(past) {
                self.observed[i].last_past_threshold = Some(past);
                entries.push(IntersectionEntry {
                    target: node,
                    is_intersecting: ratio > 0.0,
                    ratio,
                });
            }
        }
        entries
    }

    // ── clock ──────────────────────────────────────────────────

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Due time of the earliest scheduled timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.keys().next().map(|&(due, _)| due)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Remove the earliest timer due at or before `until`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<Timer> {
        let (&key, _) = self.timers.iter().next()?;
        if key.0 > until {
            return None;
        }
        let timer = self.timers.remove(&key)?;
        self.now = self.now.max(key.0);
        Some(timer)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Page for MemoryPage {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.select(self.body(), true, selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(self.body(), true, selector)
    }

    fn query_in(&self, root: &NodeId, selector: &str) -> Option<NodeId> {
        self.select(*root, false, selector).into_iter().next()
    }

    fn query_all_in(&self, root: &NodeId, selector: &str) -> Vec<NodeId> {
        self.select(*root, false, selector)
    }

    fn contains(&self, root: &NodeId, node: &NodeId) -> bool {
        self.ancestors(*node).any(|a| a == *root)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes[*node].attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        self.nodes[*node]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&mut self, node: &NodeId, name: &str) {
        self.nodes[*node].attributes.remove(name);
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes[*node].has_class(class)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        let classes = &mut self.nodes[*node].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        self.nodes[*node].classes.retain(|c| c != class);
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        for child in std::mem::take(&mut self.nodes[*node].children) {
            self.nodes[child].parent = None;
        }
        self.nodes[*node].text = text.to_string();
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) {
        self.nodes[*node]
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn append_element(&mut self, parent: &NodeId, tag: &str, class: &str) -> Option<NodeId> {
        let id = self.push_node(*parent, tag);
        self.nodes[id].classes.push(class.to_string());
        Some(id)
    }

    fn focus(&mut self, node: &NodeId) {
        self.focused = Some(*node);
    }

    fn active_element(&self) -> Option<NodeId> {
        self.focused
    }

    fn is_focusable(&self, node: &NodeId) -> bool {
        self.is_tabbable(*node)
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        let (top, height) = self.layout_of(*node);
        Rect::new(top - self.scroll_y, height)
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.layout_of(*node).1
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let top = self.clamp_scroll(top);
        match behavior {
            ScrollBehavior::Instant => {
                self.smooth_target = None;
                self.scroll_y = top;
            }
            ScrollBehavior::Smooth => self.smooth_target = Some(top),
        }
    }

    fn observe(&mut self, node: &NodeId) {
        if !self.is_observed(*node) {
            self.observed.push(Observed {
                node: *node,
                last_past_threshold: None,
            });
        }
    }

    fn unobserve(&mut self, node: &NodeId) {
        self.observed.retain(|o| o.node != *node);
    }

    fn schedule(&mut self, delay: Duration, timer: Timer) {
        let seq = self.next_timer_seq;
        self.next_timer_seq += 1;
        self.timers.insert((self.now + delay, seq), timer);
    }
}

/// Builder returned by [`MemoryPage::element`].
pub struct NodeBuilder<'a> {
    page: &'a mut MemoryPage,
    id: NodeId,
}

impl NodeBuilder<'_> {
    pub fn class(self, class: &str) -> Self {
        self.page.nodes[self.id].classes.push(class.to_string());
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.page.nodes[self.id]
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.page.nodes[self.id].text = text.to_string();
        self
    }

    /// Document-space box.
    pub fn layout(self, top: f64, height: f64) -> Self {
        self.page.nodes[self.id].layout = Some((top, height));
        self
    }

    pub fn id(self) -> NodeId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page() -> MemoryPage {
        MemoryPage::new(
            800.0,
            ObserverOptions {
                threshold: 0.1,
                root_margin_px: 50.0,
            },
        )
    }

    #[test]
    fn queries_follow_document_order() {
        let mut page = page();
        let body = page.body();
        let first = page.element(body, "section").class("s").id();
        let inner = page.element(first, "p").class("s").id();
        let second = page.element(body, "section").class("s").id();

        assert_eq!(page.query_all(".s"), vec![first, inner, second]);
        assert_eq!(page.query_in(&first, ".s"), Some(inner));
        assert_eq!(page.query("body"), Some(body));
        assert!(page.contains(&first, &inner));
        assert!(!page.contains(&second, &inner));
    }

    #[test]
    fn set_text_detaches_children() {
        let mut page = page();
        let body = page.body();
        let wrapper = page.element(body, "div").id();
        let child = page.element(wrapper, "span").class("gone").id();
        page.set_text(&wrapper, "<b>plain</b>");

        assert_eq!(page.text(wrapper), "<b>plain</b>");
        assert_eq!(page.query(".gone"), None);
        assert_eq!(page.node(child).parent, None);
    }

    #[test]
    fn tab_order_skips_hidden_and_disabled() {
        let mut page = page();
        let body = page.body();
        let a = page.element(body, "button").id();
        page.element(body, "button").attr("disabled", "");
        let modal = page.element(body, "div").attr("aria-hidden", "true").id();
        page.element(modal, "button");
        let b = page.element(body, "a").attr("href", "#x").id();

        assert_eq!(page.tab_order(), vec![a, b]);
        page.focus_next(false);
        assert_eq!(page.focused(), Some(a));
        page.focus_next(false);
        assert_eq!(page.focused(), Some(b));
        page.focus_next(false);
        assert_eq!(page.focused(), Some(a));
        page.focus_next(true);
        assert_eq!(page.focused(), Some(b));
    }

    #[test]
    fn detached_and_hidden_nodes_are_hidden() {
        let mut page = page();
        let body = page.body();
        let visible = page.element(body, "p").id();
        let wrapper = page.element(body, "div").attr("hidden", "").id();
        let inside = page.element(wrapper, "span").id();
        let holder = page.element(body, "div").id();
        let orphan = page.element(holder, "span").id();
        page.set_text(&holder, "replaced");

        assert!(!page.is_hidden(visible));
        assert!(page.is_hidden(inside));
        assert!(page.is_hidden(orphan));
        assert!(!page.document_order().contains(&orphan));
    }

    #[test]
    fn geometry_follows_scroll() {
        let mut page = page();
        let body = page.body();
        let section = page.element(body, "section").layout(1000.0, 400.0).id();
        let child = page.element(section, "h2").id();

        page.set_scroll_y(300.0);
        assert_eq!(page.bounding_rect(&child), Rect::new(700.0, 400.0));
        page.set_scroll_y(10_000.0);
        assert_eq!(page.scroll_y(), 600.0);
    }

    #[test]
    fn smooth_scroll_waits_for_finish() {
        let mut page = page();
        let body = page.body();
        page.element(body, "main").layout(0.0, 3000.0);

        page.scroll_to(900.0, ScrollBehavior::Smooth);
        assert_eq!(page.scroll_y(), 0.0);
        assert_eq!(page.smooth_target(), Some(900.0));
        page.finish_smooth_scroll();
        assert_eq!(page.scroll_y(), 900.0);
        assert_eq!(page.smooth_target(), None);
    }

    #[test]
    fn observer_delivers_initial_and_crossings() {
        let mut page = page();
        let body = page.body();
        page.element(body, "main").layout(0.0, 4000.0);
        let card = page.element(body, "div").layout(1000.0, 200.0).id();

        page.observe(&card);
        let initial = page.take_intersections();
        assert_eq!(initial.len(), 1);
        assert!(!initial[0].is_intersecting);
        assert!(page.take_intersections().is_empty());

        // 10% of 200px = 20px must be inside [50, 750].
        page.set_scroll_y(265.0);
        assert!(page.take_intersections().is_empty());
        page.set_scroll_y(270.0);
        let crossed = page.take_intersections();
        assert_eq!(crossed.len(), 1);
        assert!(crossed[0].is_intersecting);
        assert!(crossed[0].ratio >= 0.1);
    }

    #[test]
    fn timers_pop_in_due_order() {
        let mut page = page();
        page.schedule(Duration::from_millis(200), Timer::Hero);
        page.schedule(Duration::from_millis(100), Timer::LightboxFocus { generation: 1 });

        assert_eq!(page.pop_due(Duration::from_millis(50)), None);
        assert_eq!(
            page.pop_due(Duration::from_secs(1)),
            Some(Timer::LightboxFocus { generation: 1 })
        );
        assert_eq!(page.now(), Duration::from_millis(100));
        assert_eq!(page.pop_due(Duration::from_secs(1)), Some(Timer::Hero));
        assert_eq!(page.pending_timers(), 0);
    }
}
