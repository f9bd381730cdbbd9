//! [`Page`] over the real DOM.

use std::mem;
use std::time::Duration;

use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, IntersectionObserver, Node, NodeList, ScrollToOptions, Window};

use crate::app::event::Timer;
use crate::config::attributes;
use crate::core::reveal::Rect;
use crate::error::SiteError;
use crate::page::{Page, ScrollBehavior};

/// Build a [`SiteError::Dom`] from a thrown JS value.
pub(crate) fn dom_error(call: &'static str) -> impl FnOnce(JsValue) -> SiteError {
    move |err| SiteError::Dom {
        call,
        message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}

/// Log a failed DOM call and carry on.
fn dom<T>(call: &'static str, result: Result<T, JsValue>) -> Option<T> {
    match result.map_err(dom_error(call)) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("{err}");
            None
        }
    }
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// The browser document.
///
/// The observer is created by the runtime after the widgets exist, so
/// elements observed before that are queued.  Timers are queued as well and
/// armed by the runtime once the current event is done.
pub struct WebPage {
    window: Window,
    document: Document,
    observer: Option<IntersectionObserver>,
    pending_observe: Vec<Element>,
    timers: Vec<(Duration, Timer)>,
}

impl WebPage {
    pub fn new() -> Result<Self, SiteError> {
        let window = web_sys::window().ok_or(SiteError::NoWindow)?;
        let document = window.document().ok_or(SiteError::NoDocument)?;
        Ok(Self {
            window,
            document,
            observer: None,
            pending_observe: Vec::new(),
            timers: Vec::new(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Attach the reveal observer and hand it everything queued so far.
    pub fn install_observer(&mut self, observer: IntersectionObserver) {
        for element in self.pending_observe.drain(..) {
            observer.observe(&element);
        }
        self.observer = Some(observer);
    }

    /// Timers scheduled since the last call.
    pub fn take_timers(&mut self) -> Vec<(Duration, Timer)> {
        mem::take(&mut self.timers)
    }
}

impl Page for WebPage {
    type Node = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        dom("querySelector", self.document.query_selector(selector)).flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        dom("querySelectorAll", self.document.query_selector_all(selector))
            .map(elements)
            .unwrap_or_default()
    }

    fn query_in(&self, root: &Element, selector: &str) -> Option<Element> {
        dom("querySelector", root.query_selector(selector)).flatten()
    }

    fn query_all_in(&self, root: &Element, selector: &str) -> Vec<Element> {
        dom("querySelectorAll", root.query_selector_all(selector))
            .map(elements)
            .unwrap_or_default()
    }

    fn contains(&self, root: &Element, node: &Element) -> bool {
        let node: &Node = node;
        root.contains(Some(node))
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        dom("setAttribute", node.set_attribute(name, value));
    }

    fn remove_attribute(&mut self, node: &Element, name: &str) {
        dom("removeAttribute", node.remove_attribute(name));
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        dom("classList.add", node.class_list().add_1(class));
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        dom("classList.remove", node.class_list().remove_1(class));
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) {
        if let Some(html) = node.dyn_ref::<HtmlElement>() {
            dom("style.setProperty", html.style().set_property(property, value));
        }
    }

    fn append_element(&mut self, parent: &Element, tag: &str, class: &str) -> Option<Element> {
        let element = dom("createElement", self.document.create_element(tag))?;
        element.set_class_name(class);
        dom("appendChild", parent.append_child(&element))?;
        Some(element)
    }

    fn force_reflow(&mut self, node: &Element) {
        if let Some(html) = node.dyn_ref::<HtmlElement>() {
            // Reading layout flushes pending style changes.
            let _ = html.offset_width();
        }
    }

    fn focus(&mut self, node: &Element) {
        if let Some(html) = node.dyn_ref::<HtmlElement>() {
            dom("focus", html.focus());
        }
    }

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    // `display: none` anywhere up the tree leaves the element without boxes.
    fn is_focusable(&self, node: &Element) -> bool {
        !node.has_attribute(attributes::DISABLED)
            && node.get_attribute(attributes::TABINDEX).as_deref() != Some("-1")
            && node.get_client_rects().length() > 0
    }

    fn bounding_rect(&self, node: &Element) -> Rect {
        let rect = node.get_bounding_client_rect();
        Rect::new(rect.top(), rect.height())
    }

    fn offset_height(&self, node: &Element) -> f64 {
        match node.dyn_ref::<HtmlElement>() {
            Some(html) => f64::from(html.offset_height()),
            None => node.get_bounding_client_rect().height(),
        }
    }

    fn viewport_height(&self) -> f64 {
        dom("innerHeight", self.window.inner_height())
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        dom("scrollY", self.window.scroll_y()).unwrap_or(0.0)
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn observe(&mut self, node: &Element) {
        match &self.observer {
            Some(observer) => observer.observe(node),
            None => self.pending_observe.push(node.clone()),
        }
    }

    fn unobserve(&mut self, node: &Element) {
        match &self.observer {
            Some(observer) => observer.unobserve(node),
            None => self.pending_observe.retain(|n| n != node),
        }
    }

    fn schedule(&mut self, delay: Duration, timer: Timer) {
        self.timers.push((delay, timer));
    }
}
