//! Colour palette and text styles used across the preview.

use ratatui::style::{Color, Modifier, Style};

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── page content ───────────────────────────────────────────
    pub fn text_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn heading_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    /// `[data-animate]` element that has not been revealed yet.
    pub fn unrevealed_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn link_style() -> Style {
        Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn trigger_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn focused_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    // ── hero ───────────────────────────────────────────────────
    pub fn hero_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn hero_fading_out_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn hero_fading_in_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn header_transparent_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn header_solid_style() -> Style {
        Style::default().bg(Color::Blue).fg(Color::White)
    }

    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
