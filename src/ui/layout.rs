//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Preview screen: header bar, page viewport, status bar.
pub struct PreviewLayout {
    pub header_area: Rect,
    pub page_area: Rect,
    pub status_area: Rect,
}

impl PreviewLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // sticky site header
                Constraint::Min(3),    // page viewport
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            header_area: chunks[0],
            page_area: chunks[1],
            status_area: chunks[2],
        }
    }
}
