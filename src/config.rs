//! Site configuration: headlines, timings, and the markup contract.
//!
//! The production values live in [`SiteConfig::default`].  Selectors and
//! class names are part of the page's markup contract and therefore plain
//! constants rather than runtime settings.

use std::time::Duration;

use crate::page::ObserverOptions;

// ───────────────────────────────────────── markup contract ───

/// CSS selectors the widgets look up.
pub mod selectors {
    pub const HERO_TEXT: &str = ".hero-rotate__text";

    pub const LIGHTBOX: &str = "#lightbox";
    pub const LIGHTBOX_TRIGGER: &str = "[data-lightbox]";
    pub const LIGHTBOX_TITLE: &str = ".lightbox__title";
    pub const LIGHTBOX_DESC: &str = ".lightbox__desc";
    pub const LIGHTBOX_IMAGE_WRAPPER: &str = ".lightbox__image-wrapper";
    pub const LIGHTBOX_IMAGE: &str = ".lightbox__image";
    pub const LIGHTBOX_PLACEHOLDER: &str = ".lightbox__image-placeholder";
    pub const LIGHTBOX_CLOSE: &str = ".lightbox__close";
    pub const LIGHTBOX_OVERLAY: &str = ".lightbox__overlay";

    /// Everything that can take keyboard focus inside the modal.
    pub const FOCUSABLE: &str =
        "a[href], button, input, select, textarea, [tabindex]";

    pub const ANIMATE: &str = "[data-animate]";
    pub const STAGGER_GROUP: &str = "[data-stagger-group]";

    pub const HEADER: &str = ".header";
    pub const MENU_BUTTON: &str = ".header__menu-btn";
    pub const NAV: &str = ".header__nav";
    pub const NAV_LINK: &str = "a";
    pub const ANCHOR_LINK: &str = "a[href^=\"#\"]";

    pub const BODY: &str = "body";
}

/// Attribute names read from or written to the page.
pub mod attributes {
    pub const LIGHTBOX_TITLE: &str = "data-lightbox-title";
    pub const LIGHTBOX_DESC: &str = "data-lightbox-desc";
    pub const LIGHTBOX_IMAGE: &str = "data-lightbox-image";
    pub const STAGGER_DELAY: &str = "data-stagger-delay";

    pub const ARIA_HIDDEN: &str = "aria-hidden";
    pub const ARIA_EXPANDED: &str = "aria-expanded";
    pub const HIDDEN: &str = "hidden";
    pub const DISABLED: &str = "disabled";
    pub const TABINDEX: &str = "tabindex";
    pub const HREF: &str = "href";
    pub const SRC: &str = "src";
    pub const ALT: &str = "alt";
}

/// Class names toggled by the widgets (the CSS owns what they look like).
pub mod classes {
    pub const HERO_FADING_OUT: &str = "hero-rotate--fading-out";
    pub const HERO_FADING_IN: &str = "hero-rotate--fading-in";

    pub const LIGHTBOX_OPEN: &str = "lightbox--open";
    pub const BODY_LIGHTBOX_OPEN: &str = "lightbox-open";
    pub const LIGHTBOX_IMAGE: &str = "lightbox__image";
    pub const LIGHTBOX_PLACEHOLDER: &str = "lightbox__image-placeholder";
    pub const LIGHTBOX_PLACEHOLDER_TEXT: &str = "lightbox__placeholder-text";

    pub const ANIMATE_IN: &str = "animate-in";

    pub const HEADER_SOLID: &str = "header--solid";
    pub const HEADER_TRANSPARENT: &str = "header--transparent";
    pub const NAV_OPEN: &str = "header__nav--open";
    pub const MENU_BUTTON_ACTIVE: &str = "header__menu-btn--active";
}

/// Headlines cycled through the hero, in display order.  The first one is
/// the line rendered by the static markup.
pub const HERO_LINES: &[&str] = &[
    "\"Was his name Aldric or Aldrick?\"",
    "\"I know I wrote this down somewhere.\"",
    "\"Wait, did they already meet?\"",
    "\"My Google Doc is 47 pages of chaos.\"",
    "\"I spelled it three different ways now I have to fix it.\"",
    "\"Which chapter did she learn the secret?\"",
    "\"I need to find that scene where\u{2014}never mind.\"",
];

// ───────────────────────────────────────── settings ──────────

/// Hero rotation timings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroTiming {
    /// How long the first line stays up before the first fade.
    pub first_hold: Duration,
    /// How long each later line stays up after its fade-in.
    pub hold: Duration,
    /// Length of one fade (must match the CSS animation).
    pub fade: Duration,
}

impl Default for HeroTiming {
    fn default() -> Self {
        Self {
            first_hold: Duration::from_millis(7000),
            hold: Duration::from_millis(5000),
            fade: Duration::from_millis(600),
        }
    }
}

/// Lightbox behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct LightboxConfig {
    /// Delay between showing the modal and focusing its close control, so
    /// the visibility transition applies before focus moves.
    pub focus_delay: Duration,
    /// Caption shown when a trigger carries no image.
    pub placeholder_text: String,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            focus_delay: Duration::from_millis(100),
            placeholder_text: "Screenshot coming soon".into(),
        }
    }
}

/// Reveal-on-scroll and header behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    /// Fraction of an element that must be visible before it is revealed.
    pub reveal_threshold: f64,
    /// Observer root margin; the viewport is shrunk by this much on every edge.
    pub root_margin_px: f64,
    /// Elements inside `[band, viewport - band]` at startup reveal at once.
    pub initial_band_px: f64,
    /// Stagger step used when a group carries no (usable) delay attribute.
    pub default_stagger_ms: i64,
    /// Scroll offset above which the header turns solid.
    pub header_solid_after_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: 0.1,
            root_margin_px: 50.0,
            initial_band_px: 50.0,
            default_stagger_ms: 100,
            header_solid_after_px: 100.0,
        }
    }
}

impl ScrollConfig {
    /// Options for the host's reveal observer.
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.reveal_threshold,
            root_margin_px: self.root_margin_px,
        }
    }
}

/// Complete site configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub hero_lines: Vec<String>,
    pub hero: HeroTiming,
    pub lightbox: LightboxConfig,
    pub scroll: ScrollConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            hero_lines: HERO_LINES.iter().map(|s| s.to_string()).collect(),
            hero: HeroTiming::default(),
            lightbox: LightboxConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Scale every timer delay by `factor` (preview fast-forward).
    /// Non-finite or non-positive factors leave the config untouched.
    pub fn with_time_scale(mut self, factor: f64) -> Self {
        if !(factor.is_finite() && factor > 0.0) {
            return self;
        }
        let scale = |d: Duration| Duration::from_nanos((d.as_nanos() as f64 / factor).round() as u64);
        self.hero.first_hold = scale(self.hero.first_hold);
        self.hero.hold = scale(self.hero.hold);
        self.hero.fade = scale(self.hero.fade);
        self.lightbox.focus_delay = scale(self.lightbox.focus_delay);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_production_timings() {
        let config = SiteConfig::default();
        assert_eq!(config.hero_lines.len(), 7);
        assert_eq!(config.hero.first_hold, Duration::from_millis(7000));
        assert_eq!(config.hero.hold, Duration::from_millis(5000));
        assert_eq!(config.hero.fade, Duration::from_millis(600));
        assert_eq!(config.lightbox.focus_delay, Duration::from_millis(100));
        assert_eq!(config.scroll.header_solid_after_px, 100.0);
    }

    #[test]
    fn time_scale_speeds_up_timers() {
        let config = SiteConfig::default().with_time_scale(2.0);
        assert_eq!(config.hero.first_hold, Duration::from_millis(3500));
        assert_eq!(config.hero.fade, Duration::from_millis(300));
        assert_eq!(config.lightbox.focus_delay, Duration::from_millis(50));
    }

    #[test]
    fn invalid_time_scale_is_ignored() {
        assert_eq!(SiteConfig::default().with_time_scale(0.0), SiteConfig::default());
        assert_eq!(SiteConfig::default().with_time_scale(f64::NAN), SiteConfig::default());
    }
}
