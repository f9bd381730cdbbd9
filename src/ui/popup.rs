//! Key help popup.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

const KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "move focus"),
    ("Enter", "click focused element"),
    ("Esc", "close lightbox"),
    ("j k / arrows", "scroll"),
    ("PgUp PgDn", "scroll a screen"),
    ("Home End", "top / bottom"),
    ("mouse", "click, wheel scroll"),
    ("?", "toggle this help"),
    ("q", "quit"),
];

/// Key binding overview.
pub struct HelpPopup;

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = KEYS.len() as u16 + 4;
        let popup = centered_fixed(48, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Keys ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];
        lines.extend(KEYS.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("  {key:<18}"), Style::default().fg(Color::Yellow)),
                Span::styled(*action, Style::default().fg(Color::White)),
            ])
        }));
        Paragraph::new(lines).render(inner, buf);
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_fixed_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_fixed(48, 13, area), area);
        assert_eq!(centered_fixed(10, 4, area), Rect::new(10, 3, 10, 4));
    }
}
