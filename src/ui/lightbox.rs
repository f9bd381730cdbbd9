//! Lightbox overlay.
//!
//! Draws the modal the way the page currently describes it: title,
//! description, the image source or the placeholder caption, and the
//! focusable controls inside it.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::config::{attributes, classes, selectors};
use crate::page::memory::{MemoryPage, NodeId};
use crate::page::Page;

use super::page_view::HitZone;
use super::theme::Theme;

/// The lightbox overlay widget.  Renders nothing while the modal is closed.
pub struct LightboxOverlay<'a> {
    page: &'a MemoryPage,
}

impl<'a> LightboxOverlay<'a> {
    pub fn new(page: &'a MemoryPage) -> Self {
        Self { page }
    }

    /// Compute the overlay area (centred, 80% of terminal).
    fn overlay_area(terminal: Rect) -> Rect {
        let margin_x = (terminal.width as f32 * 0.1).round() as u16;
        let margin_y = (terminal.height as f32 * 0.1).round() as u16;
        Rect::new(
            terminal.x + margin_x,
            terminal.y + margin_y,
            terminal.width.saturating_sub(margin_x * 2).max(20).min(terminal.width),
            terminal.height.saturating_sub(margin_y * 2).max(8).min(terminal.height),
        )
    }

    fn focus_style(&self, id: NodeId, style: Style) -> Style {
        if self.page.focused() == Some(id) {
            style.patch(Theme::focused_style())
        } else {
            style
        }
    }

    /// Render and return hit zones for mouse interaction.  The whole area
    /// around the panel counts as the overlay.
    pub fn render_and_hit(self, terminal_area: Rect, buf: &mut Buffer) -> Vec<HitZone> {
        let page = self.page;
        let mut zones = Vec::new();
        let Some(root) = page.query(selectors::LIGHTBOX) else {
            return zones;
        };
        if !page.has_class(&root, classes::LIGHTBOX_OPEN) {
            return zones;
        }

        if let Some(overlay) = page.query_in(&root, selectors::LIGHTBOX_OVERLAY) {
            buf.set_style(terminal_area, Style::default().add_modifier(Modifier::DIM));
            for y in terminal_area.top()..terminal_area.bottom() {
                zones.push(HitZone {
                    rect: Rect::new(terminal_area.x, y, terminal_area.width, 1),
                    node: overlay,
                });
            }
        }

        let area = Self::overlay_area(terminal_area);
        Clear.render(area, buf);
        // The panel swallows clicks so they do not reach the overlay.
        for y in area.top()..area.bottom() {
            zones.push(HitZone {
                rect: Rect::new(area.x, y, area.width, 1),
                node: root,
            });
        }

        let title = page
            .query_in(&root, selectors::LIGHTBOX_TITLE)
            .map(|t| page.text(t).to_string())
            .unwrap_or_default();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightBlue))
            .title(Span::styled(
                format!(" {title} "),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        // Close button on the top-right corner of the border.
        if let Some(close) = page.query_in(&root, selectors::LIGHTBOX_CLOSE) {
            let rect = Rect::new(area.x + area.width.saturating_sub(5), area.y, 3, 1);
            let style = Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD);
            Paragraph::new(Line::from(Span::styled("[X]", self.focus_style(close, style)))).render(rect, buf);
            zones.push(HitZone { rect, node: close });
        }

        let mut lines = vec![Line::raw("")];
        if let Some(desc) = page.query_in(&root, selectors::LIGHTBOX_DESC) {
            lines.push(Line::styled(page.text(desc).to_string(), Theme::text_style()));
            lines.push(Line::raw(""));
        }
        lines.push(self.image_line(&root));
        let body_height = (lines.len() as u16 + 2).min(inner.height);
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), body_height), buf);

        // Remaining focusable controls, one per row at the bottom.
        let controls: Vec<NodeId> = page
            .query_all_in(&root, "a[href]")
            .into_iter()
            .filter(|&id| !page.is_hidden(id))
            .collect();
        let bottom = inner.y + inner.height;
        for (i, &id) in controls.iter().enumerate() {
            let y = bottom.saturating_sub((controls.len() - i) as u16 + 1);
            if y < inner.y + body_height {
                continue;
            }
            let label = format!("→ {}", page.text(id));
            let width = (label.chars().count() as u16).min(inner.width.saturating_sub(2));
            let rect = Rect::new(inner.x + 1, y, width, 1);
            Paragraph::new(Span::styled(label, self.focus_style(id, Theme::link_style()))).render(rect, buf);
            zones.push(HitZone { rect, node: id });
        }

        let footer_y = bottom.saturating_sub(1);
        Paragraph::new(Line::styled(
            " Tab cycle   Enter activate   Esc close ",
            Style::default().fg(Color::DarkGray),
        ))
        .render(Rect::new(inner.x, footer_y, inner.width, 1), buf);

        zones
    }

    fn image_line(&self, root: &NodeId) -> Line<'static> {
        let page = self.page;
        let Some(wrapper) = page.query_in(root, selectors::LIGHTBOX_IMAGE_WRAPPER) else {
            return Line::raw("");
        };
        let image = page
            .query_in(&wrapper, selectors::LIGHTBOX_IMAGE)
            .filter(|&img| page.attribute(&img, attributes::HIDDEN).is_none())
            .and_then(|img| page.attribute(&img, attributes::SRC));
        if let Some(src) = image {
            return Line::styled(format!("[image: {src}]"), Theme::trigger_style());
        }
        let caption = page
            .query_in(&wrapper, selectors::LIGHTBOX_PLACEHOLDER)
            .filter(|&p| page.attribute(&p, attributes::HIDDEN).is_none())
            .and_then(|p| page.query_in(&p, "span"))
            .map(|c| page.text(c).to_string())
            .unwrap_or_default();
        Line::styled(caption, Theme::unrevealed_style())
    }
}
