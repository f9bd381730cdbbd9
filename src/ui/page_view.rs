//! Page content and the sticky header, drawn row by row.
//!
//! Document pixels map onto terminal rows at [`PX_PER_ROW`].  Every element
//! with text is drawn at the row its layout box starts on; the first
//! element to claim a row wins.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
};

use crate::config::{attributes, classes, selectors};
use crate::page::memory::{MemoryPage, NodeId};
use crate::page::Page;

use super::theme::Theme;

/// CSS pixels per terminal row.
pub const PX_PER_ROW: f64 = 20.0;

/// A clickable element drawn at `rect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitZone {
    pub rect: Rect,
    pub node: NodeId,
}

/// Find the element under a terminal cell.
pub fn hit_test(zones: &[HitZone], column: u16, row: u16) -> Option<NodeId> {
    zones
        .iter()
        .rev()
        .find(|z| {
            row == z.rect.y && column >= z.rect.x && column < z.rect.x.saturating_add(z.rect.width)
        })
        .map(|z| z.node)
}

/// Draw one label at `(x, y)` and record its hit zone.
fn put(buf: &mut Buffer, zones: &mut Vec<HitZone>, x: u16, y: u16, max_width: u16, node: NodeId, span: Span<'_>) -> u16 {
    let line = Line::from(span);
    let width = (line.width() as u16).min(max_width);
    buf.set_line(x, y, &line, max_width);
    zones.push(HitZone {
        rect: Rect::new(x, y, width, 1),
        node,
    });
    width
}

/// The scrolling page body.
pub struct PageView<'a> {
    page: &'a MemoryPage,
}

impl<'a> PageView<'a> {
    pub fn new(page: &'a MemoryPage) -> Self {
        Self { page }
    }

    /// Render and return hit zones for mouse interaction.
    pub fn render_and_hit(self, area: Rect, buf: &mut Buffer) -> Vec<HitZone> {
        let page = self.page;
        // Both are drawn by their own widgets.
        let skipped: Vec<NodeId> = [selectors::HEADER, selectors::LIGHTBOX]
            .into_iter()
            .filter_map(|sel| page.query(sel))
            .collect();
        let hero = page.query(selectors::HERO_TEXT);

        let mut zones = Vec::new();
        let mut used = vec![false; area.height as usize];
        for id in page.document_order() {
            if page.node(id).text.is_empty()
                || page.is_hidden(id)
                || skipped.iter().any(|root| page.contains(root, &id))
            {
                continue;
            }
            // Rows are relative to the viewport top, which sits under the
            // header bar.
            let row = (page.bounding_rect(&id).top / PX_PER_ROW).floor();
            if row < 0.0 || row >= f64::from(area.height) || used[row as usize] {
                continue;
            }
            used[row as usize] = true;

            let indent = (page.depth(id).saturating_sub(1) * 2) as u16;
            let x = area.x + indent.min(area.width);
            let y = area.y + row as u16;
            let span = self.label(id, hero == Some(id));
            put(buf, &mut zones, x, y, area.width - (x - area.x), id, span);
        }
        zones
    }

    fn label(&self, id: NodeId, is_hero: bool) -> Span<'a> {
        let page = self.page;
        let node = page.node(id);
        let text = node.text.as_str();

        let pending = node.attributes.contains_key("data-animate") && !page.has_class(&id, classes::ANIMATE_IN);
        let (content, style): (String, Style) = if is_hero {
            let style = if page.has_class(&id, classes::HERO_FADING_OUT) {
                Theme::hero_fading_out_style()
            } else if page.has_class(&id, classes::HERO_FADING_IN) {
                Theme::hero_fading_in_style()
            } else {
                Theme::hero_style()
            };
            (text.to_string(), style)
        } else if pending {
            ("·".repeat(text.chars().count().min(40)), Theme::unrevealed_style())
        } else if node.attributes.contains_key("data-lightbox") {
            (format!("[ {text} ]"), Theme::trigger_style())
        } else if node.tag == "a" {
            (text.to_string(), Theme::link_style())
        } else if matches!(node.tag.as_str(), "h1" | "h2" | "h3") {
            (text.to_string(), Theme::heading_style())
        } else {
            (text.to_string(), Theme::text_style())
        };

        let style = if page.focused() == Some(id) {
            style.patch(Theme::focused_style())
        } else {
            style
        };
        Span::styled(content, style)
    }
}

/// The sticky site header: logo, navigation and the menu button.
pub struct HeaderBar<'a> {
    page: &'a MemoryPage,
}

impl<'a> HeaderBar<'a> {
    pub fn new(page: &'a MemoryPage) -> Self {
        Self { page }
    }

    /// Render and return hit zones.  The navigation links only show while
    /// the mobile menu is open.
    pub fn render_and_hit(self, area: Rect, buf: &mut Buffer) -> Vec<HitZone> {
        let page = self.page;
        let mut zones = Vec::new();
        let Some(header) = page.query(selectors::HEADER) else {
            return zones;
        };

        let bar = if page.has_class(&header, classes::HEADER_SOLID) {
            Theme::header_solid_style()
        } else {
            Theme::header_transparent_style()
        };
        buf.set_style(area, bar);

        let focus = |id: NodeId, style: Style| {
            if page.focused() == Some(id) {
                style.patch(Theme::focused_style())
            } else {
                style
            }
        };

        let mut x = area.x + 1;
        let right = area.x + area.width;
        let nav_open = page
            .query(selectors::NAV)
            .is_some_and(|nav| page.has_class(&nav, classes::NAV_OPEN));
        let mut items: Vec<NodeId> = page.query_in(&header, ".header__logo").into_iter().collect();
        if nav_open {
            if let Some(nav) = page.query(selectors::NAV) {
                items.extend(page.query_all_in(&nav, selectors::NAV_LINK));
            }
        }
        for id in items {
            if x >= right {
                break;
            }
            let span = Span::styled(page.text(id).to_string(), focus(id, bar.patch(Theme::link_style())));
            x += put(buf, &mut zones, x, area.y, right - x, id, span) + 3;
        }

        if let Some(button) = page.query(selectors::MENU_BUTTON) {
            let open = page.attribute(&button, attributes::ARIA_EXPANDED).as_deref() == Some("true");
            let label = format!("[{} {}]", page.text(button), if open { "▴" } else { "▾" });
            let width = label.chars().count() as u16;
            if area.width > width + 1 {
                let bx = right - width - 1;
                put(buf, &mut zones, bx, area.y, width, button, Span::styled(label, focus(button, bar)));
            }
        }
        zones
    }
}
