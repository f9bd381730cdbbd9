//! Feature-screenshot lightbox.
//!
//! A single modal that any `[data-lightbox]` trigger can fill with a title,
//! description and optional image.  While open it traps Tab focus; on close
//! it hands focus back to whichever trigger opened it.
//!
//! All content goes in through `set_text` / `set_attribute`; supplied strings
//! are never interpreted as markup.

use std::time::Duration;

use tracing::{debug, info};

use crate::app::event::{Binding, BindingKind, EventOutcome, Key, KeyInput, Timer};
use crate::config::{attributes, classes, selectors, LightboxConfig};
use crate::core::modal::{trap_tab, LightboxContent, ModalState, TabMove};
use crate::page::Page;

/// Elements of the modal, looked up once at startup.
#[derive(Debug, Clone)]
struct Parts<N> {
    root: N,
    title: Option<N>,
    desc: Option<N>,
    image_wrapper: Option<N>,
    close: Option<N>,
    body: Option<N>,
}

/// The lightbox controller.
#[derive(Debug, Clone)]
pub struct Lightbox<N> {
    parts: Parts<N>,
    state: ModalState<N>,
    content: Option<LightboxContent>,
    /// Bumped on every open so a late focus timer from an earlier open is
    /// recognised and dropped.
    generation: u64,
    focus_delay: Duration,
    placeholder_text: String,
}

impl<N: Clone + PartialEq> Lightbox<N> {
    /// Find the modal and list the click listeners it needs.  `None` when
    /// the page has no lightbox.
    pub fn init<P: Page<Node = N>>(
        page: &mut P,
        config: &LightboxConfig,
    ) -> Option<(Self, Vec<Binding<N>>)> {
        let Some(root) = page.query(selectors::LIGHTBOX) else {
            debug!("lightbox: {} not found, disabled", selectors::LIGHTBOX);
            return None;
        };

        let parts = Parts {
            title: page.query_in(&root, selectors::LIGHTBOX_TITLE),
            desc: page.query_in(&root, selectors::LIGHTBOX_DESC),
            image_wrapper: page.query_in(&root, selectors::LIGHTBOX_IMAGE_WRAPPER),
            close: page.query_in(&root, selectors::LIGHTBOX_CLOSE),
            body: page.query(selectors::BODY),
            root,
        };

        let mut bindings: Vec<Binding<N>> = page
            .query_all(selectors::LIGHTBOX_TRIGGER)
            .into_iter()
            .map(|node| Binding::new(node, BindingKind::LightboxTrigger))
            .collect();
        let triggers = bindings.len();
        if let Some(close) = &parts.close {
            bindings.push(Binding::new(close.clone(), BindingKind::LightboxClose));
        }
        if let Some(overlay) = page.query_in(&parts.root, selectors::LIGHTBOX_OVERLAY) {
            bindings.push(Binding::new(overlay, BindingKind::LightboxOverlay));
        }

        info!("lightbox ready ({triggers} triggers)");
        let lightbox = Self {
            parts,
            state: ModalState::Closed,
            content: None,
            generation: 0,
            focus_delay: config.focus_delay,
            placeholder_text: config.placeholder_text.clone(),
        };
        Some((lightbox, bindings))
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// The remembered trigger, while open.
    pub fn trigger(&self) -> Option<&N> {
        self.state.trigger()
    }

    /// What is currently shown, while open.
    pub fn content(&self) -> Option<&LightboxContent> {
        self.content.as_ref()
    }

    /// Read a trigger's data attributes.
    pub fn content_from_trigger<P: Page<Node = N>>(page: &P, trigger: &N) -> LightboxContent {
        LightboxContent::new(
            page.attribute(trigger, attributes::LIGHTBOX_TITLE).unwrap_or_default(),
            page.attribute(trigger, attributes::LIGHTBOX_DESC).unwrap_or_default(),
            page.attribute(trigger, attributes::LIGHTBOX_IMAGE),
        )
    }

    /// Show `content`.  Opening while already open replaces the content and
    /// the remembered trigger.
    pub fn open<P: Page<Node = N>>(&mut self, page: &mut P, content: LightboxContent, trigger: Option<N>) {
        self.state.open(trigger);

        if let Some(title) = &self.parts.title {
            page.set_text(title, &content.title);
        }
        if let Some(desc) = &self.parts.desc {
            page.set_text(desc, &content.description);
        }
        self.show_image(page, &content);

        let root = &self.parts.root;
        page.add_class(root, classes::LIGHTBOX_OPEN);
        page.set_attribute(root, attributes::ARIA_HIDDEN, "false");
        if let Some(body) = &self.parts.body {
            page.add_class(body, classes::BODY_LIGHTBOX_OPEN);
        }

        // Wait for the visibility transition before moving focus.
        self.generation += 1;
        if self.parts.close.is_some() {
            page.schedule(
                self.focus_delay,
                Timer::LightboxFocus {
                    generation: self.generation,
                },
            );
        }
        debug!(title = %content.title, "lightbox opened");
        self.content = Some(content);
    }

    /// Hide the modal and return focus to the trigger that opened it.
    pub fn close<P: Page<Node = N>>(&mut self, page: &mut P) {
        if !self.state.is_open() {
            return;
        }
        let root = &self.parts.root;
        page.remove_class(root, classes::LIGHTBOX_OPEN);
        page.set_attribute(root, attributes::ARIA_HIDDEN, "true");
        if let Some(body) = &self.parts.body {
            page.remove_class(body, classes::BODY_LIGHTBOX_OPEN);
        }
        if let Some(trigger) = self.state.close() {
            page.focus(&trigger);
        }
        self.content = None;
        debug!("lightbox closed");
    }

    /// Handle a click on one of this widget's bindings.
    pub fn on_click<P: Page<Node = N>>(&mut self, page: &mut P, node: &N, kind: BindingKind) -> EventOutcome {
        match kind {
            BindingKind::LightboxTrigger => {
                let content = Self::content_from_trigger(page, node);
                self.open(page, content, Some(node.clone()));
                EventOutcome::HANDLED
            }
            BindingKind::LightboxClose | BindingKind::LightboxOverlay => {
                self.close(page);
                EventOutcome::IGNORED
            }
            _ => EventOutcome::IGNORED,
        }
    }

    /// Escape closes; Tab is trapped inside the modal.  Ignored while closed.
    pub fn on_key<P: Page<Node = N>>(&mut self, page: &mut P, input: KeyInput) -> EventOutcome {
        if !self.state.is_open() {
            return EventOutcome::IGNORED;
        }
        match input.key {
            Key::Escape => {
                self.close(page);
                EventOutcome::IGNORED
            }
            Key::Tab => self.trap_focus(page, input.shift),
            Key::Other => EventOutcome::IGNORED,
        }
    }

    /// Handle [`Timer::LightboxFocus`].
    pub fn on_focus_timer<P: Page<Node = N>>(&mut self, page: &mut P, generation: u64) {
        if !self.state.is_open() || generation != self.generation {
            return;
        }
        if let Some(close) = &self.parts.close {
            page.focus(close);
        }
    }

    fn trap_focus<P: Page<Node = N>>(&self, page: &mut P, backwards: bool) -> EventOutcome {
        let focusables: Vec<N> = page
            .query_all_in(&self.parts.root, selectors::FOCUSABLE)
            .into_iter()
            .filter(|node| page.is_focusable(node))
            .collect();
        let active = page
            .active_element()
            .and_then(|a| focusables.iter().position(|f| *f == a));

        match trap_tab(focusables.len(), active, backwards) {
            TabMove::Allow => EventOutcome::IGNORED,
            TabMove::FocusIndex(i) => {
                page.focus(&focusables[i]);
                EventOutcome::HANDLED
            }
            TabMove::Block => EventOutcome::HANDLED,
        }
    }

    fn show_image<P: Page<Node = N>>(&self, page: &mut P, content: &LightboxContent) {
        let Some(wrapper) = &self.parts.image_wrapper else {
            return;
        };
        let image = page.query_in(wrapper, selectors::LIGHTBOX_IMAGE);
        let placeholder = page.query_in(wrapper, selectors::LIGHTBOX_PLACEHOLDER);

        match &content.image {
            Some(src) => {
                let image = image.or_else(|| page.append_element(wrapper, "img", classes::LIGHTBOX_IMAGE));
                if let Some(image) = image {
                    page.set_attribute(&image, attributes::SRC, src);
                    page.set_attribute(&image, attributes::ALT, &content.title);
                    page.remove_attribute(&image, attributes::HIDDEN);
                }
                if let Some(placeholder) = placeholder {
                    page.set_attribute(&placeholder, attributes::HIDDEN, "");
                }
            }
            None => {
                if let Some(image) = image {
                    page.remove_attribute(&image, attributes::SRC);
                    page.set_attribute(&image, attributes::ALT, "");
                    page.set_attribute(&image, attributes::HIDDEN, "");
                }
                let placeholder = placeholder.or_else(|| self.build_placeholder(page, wrapper));
                if let Some(placeholder) = placeholder {
                    page.remove_attribute(&placeholder, attributes::HIDDEN);
                }
            }
        }
    }

    fn build_placeholder<P: Page<Node = N>>(&self, page: &mut P, wrapper: &N) -> Option<N> {
        let placeholder = page.append_element(wrapper, "div", classes::LIGHTBOX_PLACEHOLDER)?;
        if let Some(caption) = page.append_element(&placeholder, "span", classes::LIGHTBOX_PLACEHOLDER_TEXT) {
            page.add_class(&caption, "font-caption");
            page.set_text(&caption, &self.placeholder_text);
        }
        Some(placeholder)
    }
}
