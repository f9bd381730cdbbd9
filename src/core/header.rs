//! Header style from the scroll offset, anchor scroll targets, and the
//! mobile menu toggle.

use crate::config::classes;

/// Visual style of the sticky header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    Transparent,
    Solid,
}

impl HeaderStyle {
    /// Style for a vertical scroll offset.  Strictly above the threshold
    /// turns solid.
    pub fn for_offset(offset: f64, threshold: f64) -> Self {
        if offset > threshold {
            Self::Solid
        } else {
            Self::Transparent
        }
    }

    /// Class to add for this style.
    pub fn class(self) -> &'static str {
        match self {
            Self::Transparent => classes::HEADER_TRANSPARENT,
            Self::Solid => classes::HEADER_SOLID,
        }
    }

    /// Class to remove for this style.
    pub fn other_class(self) -> &'static str {
        match self {
            Self::Transparent => classes::HEADER_SOLID,
            Self::Solid => classes::HEADER_TRANSPARENT,
        }
    }
}

/// Last applied header style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    threshold: f64,
    style: Option<HeaderStyle>,
}

impl ScrollState {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            style: None,
        }
    }

    /// Feed a scroll offset.  Returns the style to apply when it differs
    /// from the last one applied (always on the first call).
    pub fn update(&mut self, offset: f64) -> Option<HeaderStyle> {
        let style = HeaderStyle::for_offset(offset, self.threshold);
        if self.style == Some(style) {
            return None;
        }
        self.style = Some(style);
        Some(style)
    }

    pub fn style(&self) -> Option<HeaderStyle> {
        self.style
    }
}

/// Document offset to scroll to so `target_top` (viewport-relative) lands
/// just under a header of `header_height`.
pub fn anchor_scroll_top(target_top: f64, scroll_y: f64, header_height: f64) -> f64 {
    target_top + scroll_y - header_height
}

/// Selector for an in-page link, or `None` for a bare `#`, which means the
/// top of the page.
pub fn anchor_selector(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => Some(href),
        _ => None,
    }
}

/// Open/closed state of the mobile navigation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the panel and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Close the panel.  Returns whether it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}
