//! The landing page as a [`MemoryPage`].
//!
//! Mirrors the production markup closely enough for every widget to find
//! its elements: sticky header with the mobile menu, hero, a staggered
//! feature grid of lightbox triggers, two more animated sections, footer,
//! and the lightbox itself.  Used by the terminal preview and the tests.

use crate::config::{ScrollConfig, HERO_LINES};

use super::memory::{MemoryPage, NodeId};

/// One feature card.
#[derive(Debug, Clone, Copy)]
pub struct Feature {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub image: Option<&'static str>,
}

pub const FEATURES: &[Feature] = &[
    Feature {
        slug: "codex",
        title: "Character Codex",
        description: "Names, spellings and relationships, one click from the page you are writing.",
        image: Some("img/codex.png"),
    },
    Feature {
        slug: "timeline",
        title: "Timeline",
        description: "Every scene in story order, so you always know who has met whom.",
        image: Some("img/timeline.png"),
    },
    Feature {
        slug: "search",
        title: "Story Search",
        description: "Find that scene where it happened without scrolling through 47 pages.",
        image: None,
    },
    Feature {
        slug: "continuity",
        title: "Continuity Checks",
        description: "Flags the third spelling of a name before your readers do.",
        image: None,
    },
];

const STEPS: &[&str] = &["Import your draft", "Tag what matters", "Write without losing the thread"];

const HEADER_HEIGHT: f64 = 80.0;

/// Build the page.  `viewport_height` is in CSS pixels.
pub fn landing_page(viewport_height: f64, scroll: &ScrollConfig) -> MemoryPage {
    let mut page = MemoryPage::new(viewport_height, scroll.observer_options());
    let body = page.body();

    header(&mut page, body);

    let hero = page
        .element(body, "section")
        .class("hero")
        .attr("id", "hero")
        .layout(0.0, 720.0)
        .id();
    let heading = page.element(hero, "h1").class("hero__title").layout(220.0, 120.0).id();
    page.element(heading, "span")
        .class("hero-rotate__text")
        .text(HERO_LINES[0]);
    page.element(hero, "p")
        .class("hero__subtitle")
        .attr("data-animate", "")
        .text("A story bible that keeps up with your draft.")
        .layout(360.0, 60.0);
    page.element(hero, "a")
        .class("btn")
        .attr("href", "#pricing")
        .attr("data-animate", "")
        .text("Get early access")
        .layout(460.0, 56.0);

    features(&mut page, body);
    how_it_works(&mut page, body);

    let pricing = page
        .element(body, "section")
        .attr("id", "pricing")
        .layout(2560.0, 700.0)
        .id();
    page.element(pricing, "h2")
        .attr("data-animate", "")
        .text("Pricing")
        .layout(2600.0, 60.0);
    page.element(pricing, "div")
        .class("pricing__card")
        .attr("data-animate", "")
        .text("Free while in beta")
        .layout(2700.0, 360.0);

    let footer = page.element(body, "footer").layout(3260.0, 240.0).id();
    page.element(footer, "a").attr("href", "#").text("Back to top");

    lightbox(&mut page, body);
    page
}

fn header(page: &mut MemoryPage, body: NodeId) {
    let header = page
        .element(body, "header")
        .class("header")
        .layout(0.0, HEADER_HEIGHT)
        .id();
    page.element(header, "a").class("header__logo").attr("href", "#").text("Penpoint");
    page.element(header, "button")
        .class("header__menu-btn")
        .attr("aria-expanded", "false")
        .attr("aria-label", "Menu")
        .text("Menu");
    let nav = page.element(header, "nav").class("header__nav").id();
    for (href, label) in [("#features", "Features"), ("#how", "How it works"), ("#pricing", "Pricing")] {
        page.element(nav, "a").attr("href", href).text(label);
    }
}

fn features(page: &mut MemoryPage, body: NodeId) {
    let section = page
        .element(body, "section")
        .attr("id", "features")
        .layout(800.0, 920.0)
        .id();
    page.element(section, "h2")
        .attr("data-animate", "")
        .text("Everything in one place")
        .layout(840.0, 60.0);
    let grid = page
        .element(section, "div")
        .class("features__grid")
        .attr("data-stagger-group", "")
        .attr("data-stagger-delay", "120")
        .id();
    for (i, feature) in FEATURES.iter().enumerate() {
        let mut card = page
            .element(grid, "button")
            .class("feature-card")
            .attr("id", &format!("feature-{}", feature.slug))
            .attr("data-animate", "")
            .attr("data-lightbox", "")
            .attr("data-lightbox-title", feature.title)
            .attr("data-lightbox-desc", feature.description)
            .text(feature.title)
            .layout(940.0 + i as f64 * 190.0, 160.0);
        if let Some(image) = feature.image {
            card = card.attr("data-lightbox-image", image);
        }
        card.id();
    }
}

fn how_it_works(page: &mut MemoryPage, body: NodeId) {
    let section = page
        .element(body, "section")
        .attr("id", "how")
        .layout(1760.0, 760.0)
        .id();
    page.element(section, "h2")
        .attr("data-animate", "")
        .text("How it works")
        .layout(1800.0, 60.0);
    let steps = page.element(section, "ol").attr("data-stagger-group", "").id();
    for (i, step) in STEPS.iter().enumerate() {
        page.element(steps, "li")
            .attr("data-animate", "")
            .text(step)
            .layout(1900.0 + i as f64 * 180.0, 140.0);
    }
}

fn lightbox(page: &mut MemoryPage, body: NodeId) {
    let root = page
        .element(body, "div")
        .class("lightbox")
        .attr("id", "lightbox")
        .attr("aria-hidden", "true")
        .attr("role", "dialog")
        .id();
    page.element(root, "div").class("lightbox__overlay");
    let content = page.element(root, "div").class("lightbox__content").id();
    page.element(content, "button")
        .class("lightbox__close")
        .attr("aria-label", "Close")
        .text("Close");
    page.element(content, "div").class("lightbox__image-wrapper");
    page.element(content, "h3").class("lightbox__title");
    page.element(content, "p").class("lightbox__desc");
    page.element(content, "a")
        .class("btn")
        .attr("href", "/signup")
        .text("Join the beta");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_widget_finds_its_markup() {
        let page = landing_page(800.0, &ScrollConfig::default());
        for selector in [
            ".hero-rotate__text",
            "#lightbox",
            ".lightbox__close",
            ".lightbox__overlay",
            ".lightbox__image-wrapper",
            ".header",
            ".header__menu-btn",
            ".header__nav",
        ] {
            assert!(page.query(selector).is_some(), "{selector} missing");
        }
        assert_eq!(page.query_all("[data-lightbox]").len(), FEATURES.len());
        assert_eq!(page.query_all("[data-stagger-group]").len(), 2);
    }

    #[test]
    fn only_some_features_carry_images() {
        let page = landing_page(800.0, &ScrollConfig::default());
        let with_image = page
            .query_all("[data-lightbox]")
            .into_iter()
            .filter(|card| page.attribute(card, "data-lightbox-image").is_some())
            .count();
        assert_eq!(with_image, 2);
    }
}
