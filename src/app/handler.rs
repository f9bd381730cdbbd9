//! Event routing.  Owns the three widgets and maps page events to them.

use std::time::Duration;

use tracing::debug;

use crate::config::SiteConfig;
use crate::page::memory::{MemoryPage, NodeId};
use crate::page::{Page, ScrollBehavior};

use super::event::{Binding, BindingKind, EventOutcome, Key, KeyInput, PageEvent, Timer};
use super::hero::HeroRotator;
use super::lightbox::Lightbox;
use super::scroll::ScrollReveal;

/// Every widget on one page.
///
/// Widgets whose markup is missing are simply absent; events meant for them
/// are ignored.
#[derive(Debug, Clone)]
pub struct Site<N> {
    hero: Option<HeroRotator<N>>,
    lightbox: Option<Lightbox<N>>,
    scroll: ScrollReveal<N>,
    bindings: Vec<Binding<N>>,
}

impl<N: Clone + PartialEq> Site<N> {
    /// Initialise all widgets against `page`.
    ///
    /// Stagger delays and the startup reveal pass run first so the first
    /// paint already carries them.
    pub fn init<P: Page<Node = N>>(page: &mut P, config: &SiteConfig) -> Self {
        let (scroll, mut bindings) = ScrollReveal::init(page, &config.scroll);
        let hero = HeroRotator::init(page, config);
        let lightbox = Lightbox::init(page, &config.lightbox).map(|(lightbox, extra)| {
            bindings.extend(extra);
            lightbox
        });
        Self {
            hero,
            lightbox,
            scroll,
            bindings,
        }
    }

    /// Click listeners the host must attach.
    pub fn bindings(&self) -> &[Binding<N>] {
        &self.bindings
    }

    /// Route one event.
    pub fn dispatch<P: Page<Node = N>>(&mut self, page: &mut P, event: PageEvent<N>) -> EventOutcome {
        match event {
            PageEvent::Click { node, kind } => self.on_click(page, &node, kind),
            PageEvent::KeyDown(input) => match &mut self.lightbox {
                Some(lightbox) => lightbox.on_key(page, input),
                None => EventOutcome::IGNORED,
            },
            PageEvent::Scroll => {
                self.scroll.on_scroll(page);
                EventOutcome::IGNORED
            }
            PageEvent::Intersection(entries) => {
                self.scroll.on_intersection(page, &entries);
                EventOutcome::IGNORED
            }
            PageEvent::Timer(timer) => {
                self.on_timer(page, timer);
                EventOutcome::IGNORED
            }
        }
    }

    fn on_click<P: Page<Node = N>>(&mut self, page: &mut P, node: &N, kind: BindingKind) -> EventOutcome {
        match kind {
            BindingKind::LightboxTrigger | BindingKind::LightboxClose | BindingKind::LightboxOverlay => {
                match &mut self.lightbox {
                    Some(lightbox) => lightbox.on_click(page, node, kind),
                    None => EventOutcome::IGNORED,
                }
            }
            BindingKind::AnchorLink => self.scroll.on_anchor_click(page, node),
            BindingKind::MenuToggle => {
                self.scroll.on_menu_toggle(page);
                EventOutcome::IGNORED
            }
            BindingKind::NavLink => {
                self.scroll.on_nav_link(page);
                EventOutcome::IGNORED
            }
        }
    }

    fn on_timer<P: Page<Node = N>>(&mut self, page: &mut P, timer: Timer) {
        match (timer, &mut self.hero, &mut self.lightbox) {
            (Timer::Hero, Some(hero), _) => hero.on_timer(page),
            (Timer::LightboxFocus { generation }, _, Some(lightbox)) => {
                lightbox.on_focus_timer(page, generation)
            }
            (timer, _, _) => debug!(?timer, "timer for a disabled widget"),
        }
    }

    pub fn hero(&self) -> Option<&HeroRotator<N>> {
        self.hero.as_ref()
    }

    pub fn lightbox(&self) -> Option<&Lightbox<N>> {
        self.lightbox.as_ref()
    }

    pub fn scroll(&self) -> &ScrollReveal<N> {
        &self.scroll
    }
}

// ───────────────────────────────────────── memory driver ─────
//
// The browser delivers timers, observer entries and default key actions on
// its own.  On a `MemoryPage` the driver does it explicitly.

impl Site<NodeId> {
    /// Initialise and deliver the observer's first entries.
    pub fn boot(page: &mut MemoryPage, config: &SiteConfig) -> Self {
        let mut site = Self::init(page, config);
        site.flush_intersections(page);
        site
    }

    /// Let `by` pass on the page clock, firing due timers in order.
    pub fn advance(&mut self, page: &mut MemoryPage, by: Duration) {
        let until = page.now() + by;
        while let Some(timer) = page.pop_due(until) {
            self.dispatch(page, PageEvent::Timer(timer));
        }
        page.set_now(until);
    }

    /// Deliver pending observer entries, if any.
    pub fn flush_intersections(&mut self, page: &mut MemoryPage) {
        let entries = page.take_intersections();
        if !entries.is_empty() {
            self.dispatch(page, PageEvent::Intersection(entries));
        }
    }

    /// User scroll to `y`.  Interrupts any smooth scroll in flight.
    pub fn scroll_page(&mut self, page: &mut MemoryPage, y: f64) {
        page.scroll_to(y, ScrollBehavior::Instant);
        self.dispatch(page, PageEvent::Scroll);
        self.flush_intersections(page);
    }

    /// Complete an in-flight smooth scroll.
    pub fn settle_scroll(&mut self, page: &mut MemoryPage) {
        if page.smooth_target().is_some() {
            page.finish_smooth_scroll();
            self.dispatch(page, PageEvent::Scroll);
            self.flush_intersections(page);
        }
    }

    /// Click `node`, running every listener bound to it.
    pub fn click(&mut self, page: &mut MemoryPage, node: NodeId) -> EventOutcome {
        let kinds: Vec<BindingKind> = self
            .bindings
            .iter()
            .filter(|b| b.node == node)
            .map(|b| b.kind)
            .collect();
        kinds.into_iter().fold(EventOutcome::IGNORED, |acc, kind| {
            acc.merge(self.dispatch(page, PageEvent::Click { node, kind }))
        })
    }

    /// Key press, with the browser's default Tab movement when no listener
    /// cancelled it.
    pub fn key(&mut self, page: &mut MemoryPage, input: KeyInput) -> EventOutcome {
        let outcome = self.dispatch(page, PageEvent::KeyDown(input));
        if input.key == Key::Tab && !outcome.prevent_default {
            page.focus_next(input.shift);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::classes;
    use crate::page::demo::landing_page;
    use pretty_assertions::assert_eq;

    fn boot() -> (MemoryPage, Site<NodeId>) {
        let config = SiteConfig::default();
        let mut page = landing_page(800.0, &config.scroll);
        let site = Site::boot(&mut page, &config);
        (page, site)
    }

    fn count(site: &Site<NodeId>, kind: BindingKind) -> usize {
        site.bindings().iter().filter(|b| b.kind == kind).count()
    }

    #[test]
    fn boot_binds_every_widget() {
        let (_, site) = boot();
        assert!(site.hero().is_some());
        assert!(site.lightbox().is_some());
        assert_eq!(count(&site, BindingKind::LightboxTrigger), 4);
        assert_eq!(count(&site, BindingKind::LightboxClose), 1);
        assert_eq!(count(&site, BindingKind::LightboxOverlay), 1);
        assert_eq!(count(&site, BindingKind::AnchorLink), 6);
        assert_eq!(count(&site, BindingKind::MenuToggle), 1);
        assert_eq!(count(&site, BindingKind::NavLink), 3);
    }

    #[test]
    fn clock_drives_hero() {
        let (mut page, mut site) = boot();
        let text = *site.hero().expect("hero").target();

        site.advance(&mut page, Duration::from_millis(6999));
        assert!(!page.has_class(&text, classes::HERO_FADING_OUT));

        site.advance(&mut page, Duration::from_millis(1));
        assert!(page.has_class(&text, classes::HERO_FADING_OUT));

        site.advance(&mut page, Duration::from_millis(600));
        assert_eq!(page.text(text), crate::config::HERO_LINES[1]);
    }

    #[test]
    fn lightbox_round_trip_through_dispatch() {
        let (mut page, mut site) = boot();
        let card = page.by_id("feature-timeline").expect("card");
        let close = page.query(".lightbox__close").expect("close");

        assert!(site.click(&mut page, card).prevent_default);
        site.advance(&mut page, Duration::from_millis(100));
        assert_eq!(page.focused(), Some(close));

        let out = site.key(&mut page, KeyInput::new(Key::Escape, false));
        assert!(!out.prevent_default);
        assert!(!site.lightbox().expect("lightbox").is_open());
        assert_eq!(page.focused(), Some(card));
    }

    #[test]
    fn nav_link_scrolls_and_closes_menu() {
        let (mut page, mut site) = boot();
        let button = page.query(".header__menu-btn").expect("menu button");
        let nav = page.query(".header__nav").expect("nav");
        let link = page.query_in(&nav, "a[href=\"#pricing\"]").expect("pricing link");

        site.click(&mut page, button);
        assert!(site.scroll().menu_open());

        let out = site.click(&mut page, link);
        assert!(out.prevent_default);
        assert!(!site.scroll().menu_open());
        assert_eq!(page.smooth_target(), Some(2560.0 - 80.0));

        site.settle_scroll(&mut page);
        let card = page.query(".pricing__card").expect("card");
        assert!(page.has_class(&card, classes::ANIMATE_IN));
        let header = page.query(".header").expect("header");
        assert!(page.has_class(&header, classes::HEADER_SOLID));
    }

    #[test]
    fn tab_falls_through_while_closed() {
        let (mut page, mut site) = boot();
        let out = site.key(&mut page, KeyInput::new(Key::Tab, false));
        assert!(!out.prevent_default);
        assert_eq!(page.focused(), page.query(".header__logo"));
    }

    #[test]
    fn timers_for_missing_widgets_are_dropped() {
        let mut page = MemoryPage::new(800.0, SiteConfig::default().scroll.observer_options());
        let mut site = Site::boot(&mut page, &SiteConfig::default());
        assert!(site.hero().is_none());
        let out = site.dispatch(&mut page, PageEvent::Timer(Timer::Hero));
        assert_eq!(out, EventOutcome::IGNORED);
        assert_eq!(page.pending_timers(), 0);
    }
}
