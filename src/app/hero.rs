//! Hero headline rotator.

use tracing::{debug, info, warn};

use crate::app::event::Timer;
use crate::config::{classes, selectors, SiteConfig};
use crate::core::headline::HeadlineSet;
use crate::core::rotation::{Rotation, Step};
use crate::page::Page;

/// Cycles the configured headlines through the hero text element.
#[derive(Debug, Clone)]
pub struct HeroRotator<N> {
    target: N,
    rotation: Rotation,
}

impl<N: Clone + PartialEq> HeroRotator<N> {
    /// Locate the hero text and schedule the first rotation.
    ///
    /// Returns `None`, leaving the page untouched, when the element is
    /// missing or there is nothing to rotate.
    pub fn init<P: Page<Node = N>>(page: &mut P, config: &SiteConfig) -> Option<Self> {
        let Some(target) = page.query(selectors::HERO_TEXT) else {
            warn!("hero rotation: {} element not found", selectors::HERO_TEXT);
            return None;
        };
        let Some(headlines) = HeadlineSet::new(config.hero_lines.clone()) else {
            warn!("hero rotation: no headlines configured");
            return None;
        };
        if headlines.len() < 2 {
            debug!("hero rotation: single headline, nothing to rotate");
            return None;
        }

        let rotation = Rotation::new(headlines, config.hero);
        page.schedule(rotation.first_delay(), Timer::Hero);
        info!("hero text rotation ready");
        Some(Self { target, rotation })
    }

    /// Handle [`Timer::Hero`]: apply the next step and schedule the one
    /// after it.
    pub fn on_timer<P: Page<Node = N>>(&mut self, page: &mut P) {
        let (step, next) = self.rotation.tick();
        match step {
            Step::FadeOut => self.restart_animation(page, classes::HERO_FADING_OUT),
            Step::SwapIn => {
                page.set_text(&self.target, self.rotation.current());
                self.restart_animation(page, classes::HERO_FADING_IN);
            }
            Step::Settle => {}
        }
        page.schedule(next, Timer::Hero);
    }

    fn restart_animation<P: Page<Node = N>>(&self, page: &mut P, class: &str) {
        page.remove_class(&self.target, classes::HERO_FADING_OUT);
        page.remove_class(&self.target, classes::HERO_FADING_IN);
        page.force_reflow(&self.target);
        page.add_class(&self.target, class);
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    pub fn target(&self) -> &N {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rotation::Phase;
    use crate::page::memory::{MemoryPage, NodeId};
    use crate::page::ObserverOptions;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn page_with_hero() -> (MemoryPage, NodeId) {
        let mut page = MemoryPage::new(
            800.0,
            ObserverOptions {
                threshold: 0.1,
                root_margin_px: 50.0,
            },
        );
        let body = page.body();
        let text = page
            .element(body, "span")
            .class("hero-rotate__text")
            .text("A")
            .id();
        (page, text)
    }

    fn config(lines: &[&str]) -> SiteConfig {
        SiteConfig {
            hero_lines: lines.iter().map(|s| s.to_string()).collect(),
            ..SiteConfig::default()
        }
    }

    fn fire(hero: &mut HeroRotator<NodeId>, page: &mut MemoryPage) {
        let due = page.next_due().expect("timer scheduled");
        assert_eq!(page.pop_due(due), Some(Timer::Hero));
        hero.on_timer(page);
    }

    #[test]
    fn missing_target_disables_rotation() {
        let mut page = MemoryPage::new(
            800.0,
            ObserverOptions {
                threshold: 0.1,
                root_margin_px: 50.0,
            },
        );
        assert!(HeroRotator::init(&mut page, &SiteConfig::default()).is_none());
        assert_eq!(page.pending_timers(), 0);
    }

    #[test]
    fn single_line_does_not_schedule() {
        let (mut page, _) = page_with_hero();
        assert!(HeroRotator::init(&mut page, &config(&["only"])).is_none());
        assert_eq!(page.pending_timers(), 0);
    }

    #[test]
    fn first_fade_waits_for_first_hold() {
        let (mut page, text) = page_with_hero();
        let mut hero = HeroRotator::init(&mut page, &config(&["A", "B"])).expect("hero");
        assert_eq!(page.next_due(), Some(Duration::from_millis(7000)));

        fire(&mut hero, &mut page);
        assert!(page.has_class(&text, classes::HERO_FADING_OUT));
        assert_eq!(page.text(text), "A");
        assert_eq!(hero.rotation().phase(), Phase::FadingOut);
        assert_eq!(page.next_due(), Some(Duration::from_millis(7600)));
    }

    #[test]
    fn swap_replaces_fade_class() {
        let (mut page, text) = page_with_hero();
        let mut hero = HeroRotator::init(&mut page, &config(&["A", "B"])).expect("hero");
        fire(&mut hero, &mut page);
        fire(&mut hero, &mut page);

        assert_eq!(page.text(text), "B");
        assert!(page.has_class(&text, classes::HERO_FADING_IN));
        assert!(!page.has_class(&text, classes::HERO_FADING_OUT));
        assert_eq!(page.pending_timers(), 1);
    }

    #[test]
    fn next_cycle_starts_fade_plus_fade_plus_hold_later() {
        let (mut page, _) = page_with_hero();
        let mut hero = HeroRotator::init(&mut page, &config(&["A", "B"])).expect("hero");
        for _ in 0..3 {
            fire(&mut hero, &mut page);
        }
        assert_eq!(page.next_due(), Some(Duration::from_millis(7000 + 600 + 600 + 5000)));
    }
}
