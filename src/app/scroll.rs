//! Scroll-driven behaviour: reveal animations, stagger groups, header style,
//! smooth anchor scrolling and the mobile menu.

use tracing::{debug, info};

use crate::app::event::{Binding, BindingKind, EventOutcome};
use crate::config::{attributes, classes, selectors, ScrollConfig};
use crate::core::header::{anchor_scroll_top, anchor_selector, MenuState, ScrollState};
use crate::core::reveal::{
    entry_reveals, in_initial_band, stagger_delay_css, stagger_step_ms, IntersectionEntry,
    RevealTracker,
};
use crate::page::{Page, ScrollBehavior};

#[derive(Debug, Clone)]
struct MobileMenu<N> {
    button: N,
    nav: N,
    state: MenuState,
}

/// The scroll/reveal controller.
#[derive(Debug, Clone)]
pub struct ScrollReveal<N> {
    tracker: RevealTracker<N>,
    threshold: f64,
    header: Option<N>,
    header_state: ScrollState,
    menu: Option<MobileMenu<N>>,
}

impl<N: Clone + PartialEq> ScrollReveal<N> {
    /// Apply stagger delays, run the startup reveal pass, style the header,
    /// and list the click listeners for anchors and the mobile menu.
    pub fn init<P: Page<Node = N>>(page: &mut P, config: &ScrollConfig) -> (Self, Vec<Binding<N>>) {
        // Delays first, so elements revealed right away already carry them.
        apply_stagger(page, config);

        let mut this = Self {
            tracker: RevealTracker::default(),
            threshold: config.reveal_threshold,
            header: page.query(selectors::HEADER),
            header_state: ScrollState::new(config.header_solid_after_px),
            menu: None,
        };
        this.reveal_pass(page, config);
        this.on_scroll(page);

        let mut bindings: Vec<Binding<N>> = page
            .query_all(selectors::ANCHOR_LINK)
            .into_iter()
            .map(|node| Binding::new(node, BindingKind::AnchorLink))
            .collect();

        match (page.query(selectors::MENU_BUTTON), page.query(selectors::NAV)) {
            (Some(button), Some(nav)) => {
                bindings.push(Binding::new(button.clone(), BindingKind::MenuToggle));
                bindings.extend(
                    page.query_all_in(&nav, selectors::NAV_LINK)
                        .into_iter()
                        .map(|link| Binding::new(link, BindingKind::NavLink)),
                );
                let state = MenuState::new(page.has_class(&nav, classes::NAV_OPEN));
                this.menu = Some(MobileMenu { button, nav, state });
            }
            _ => debug!("mobile menu: button or nav missing, disabled"),
        }

        info!(
            pending = this.tracker.pending_count(),
            revealed = this.tracker.revealed_count(),
            "page animations ready"
        );
        (this, bindings)
    }

    fn reveal_pass<P: Page<Node = N>>(&mut self, page: &mut P, config: &ScrollConfig) {
        let viewport = page.viewport_height();
        for node in page.query_all(selectors::ANIMATE) {
            if in_initial_band(page.bounding_rect(&node), viewport, config.initial_band_px) {
                page.add_class(&node, classes::ANIMATE_IN);
                self.tracker.note_revealed();
            } else {
                page.observe(&node);
                self.tracker.watch(node);
            }
        }
    }

    /// Reveal every pending target that is now visible enough, and stop
    /// watching it.
    pub fn on_intersection<P: Page<Node = N>>(&mut self, page: &mut P, entries: &[IntersectionEntry<N>]) {
        for entry in entries {
            if !entry_reveals(entry, self.threshold) {
                continue;
            }
            page.unobserve(&entry.target);
            if self.tracker.reveal(&entry.target) {
                page.add_class(&entry.target, classes::ANIMATE_IN);
            }
        }
    }

    /// Restyle the header for the current offset.
    pub fn on_scroll<P: Page<Node = N>>(&mut self, page: &mut P) {
        let Some(header) = &self.header else {
            return;
        };
        if let Some(style) = self.header_state.update(page.scroll_y()) {
            page.remove_class(header, style.other_class());
            page.add_class(header, style.class());
            debug!(?style, "header restyled");
        }
    }

    /// Smooth-scroll to an in-page anchor, leaving room for the header.
    pub fn on_anchor_click<P: Page<Node = N>>(&mut self, page: &mut P, link: &N) -> EventOutcome {
        let Some(href) = page.attribute(link, attributes::HREF) else {
            return EventOutcome::IGNORED;
        };
        let Some(selector) = anchor_selector(&href) else {
            page.scroll_to(0.0, ScrollBehavior::Smooth);
            return EventOutcome::HANDLED;
        };
        let Some(target) = page.query(selector) else {
            debug!(href = %href, "anchor target not on page");
            return EventOutcome::HANDLED;
        };
        let header_height = self
            .header
            .as_ref()
            .map_or(0.0, |header| page.offset_height(header));
        let top = anchor_scroll_top(page.bounding_rect(&target).top, page.scroll_y(), header_height);
        page.scroll_to(top, ScrollBehavior::Smooth);
        EventOutcome::HANDLED
    }

    /// Flip the mobile navigation panel.
    pub fn on_menu_toggle<P: Page<Node = N>>(&mut self, page: &mut P) {
        let Some(menu) = &mut self.menu else {
            return;
        };
        let open = menu.state.toggle();
        if open {
            page.add_class(&menu.nav, classes::NAV_OPEN);
            page.add_class(&menu.button, classes::MENU_BUTTON_ACTIVE);
        } else {
            page.remove_class(&menu.nav, classes::NAV_OPEN);
            page.remove_class(&menu.button, classes::MENU_BUTTON_ACTIVE);
        }
        page.set_attribute(&menu.button, attributes::ARIA_EXPANDED, if open { "true" } else { "false" });
    }

    /// A navigation link was followed; close the panel.
    pub fn on_nav_link<P: Page<Node = N>>(&mut self, page: &mut P) {
        let Some(menu) = &mut self.menu else {
            return;
        };
        menu.state.close();
        page.remove_class(&menu.nav, classes::NAV_OPEN);
        page.remove_class(&menu.button, classes::MENU_BUTTON_ACTIVE);
        page.set_attribute(&menu.button, attributes::ARIA_EXPANDED, "false");
    }

    pub fn is_pending(&self, node: &N) -> bool {
        self.tracker.is_pending(node)
    }

    pub fn pending_count(&self) -> usize {
        self.tracker.pending_count()
    }

    pub fn menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(|m| m.state.is_open())
    }
}

/// Give every `[data-animate]` inside a stagger group an animation delay
/// proportional to its position in the group.
fn apply_stagger<P: Page>(page: &mut P, config: &ScrollConfig) {
    for group in page.query_all(selectors::STAGGER_GROUP) {
        let attr = page.attribute(&group, attributes::STAGGER_DELAY);
        let step = stagger_step_ms(attr.as_deref(), config);
        for (index, child) in page.query_all_in(&group, selectors::ANIMATE).iter().enumerate() {
            page.set_style(child, "animation-delay", &stagger_delay_css(index, step));
        }
    }
}
