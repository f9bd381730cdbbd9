//! Terminal preview of the landing page widgets.
//!
//! Runs the real hero rotator, lightbox and scroll controller against the
//! in-memory landing page and draws it with Ratatui.  Logs go to stderr
//! (`RUST_LOG=debug penpoint-preview 2>preview.log`).

use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use tracing::info;

use penpoint_site::page::demo::landing_page;
use penpoint_site::page::memory::{MemoryPage, NodeId};
use penpoint_site::page::Page;
use penpoint_site::ui::{
    input::{spawn_event_reader, TermEvent},
    layout::PreviewLayout,
    lightbox::LightboxOverlay,
    page_view::{hit_test, HeaderBar, HitZone, PageView, PX_PER_ROW},
    popup::HelpPopup,
    smooth_scroll::SmoothScroll,
    theme::Theme,
};
use penpoint_site::{logging, Key, KeyInput, PageEvent, Site, SiteConfig};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = "penpoint-preview", about = "Terminal preview of the landing page widgets")]
struct Cli {
    /// Run widget timers this many times faster.
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,

    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,
}

// ───────────────────────────────────────── state ─────────────

struct Preview {
    page: MemoryPage,
    site: Site<NodeId>,
    smooth: SmoothScroll,
    zones: Vec<HitZone>,
    show_help: bool,
    should_quit: bool,
    last_frame: Instant,
}

impl Preview {
    fn new(viewport_rows: u16, config: &SiteConfig) -> Self {
        let mut page = landing_page(rows_to_px(viewport_rows), &config.scroll);
        let site = Site::boot(&mut page, config);
        Self {
            page,
            site,
            smooth: SmoothScroll::new(0.3),
            zones: Vec::new(),
            show_help: false,
            should_quit: false,
            last_frame: Instant::now(),
        }
    }

    /// Advance the page clock by wall time and step any smooth scroll.
    fn tick(&mut self) {
        let now = Instant::now();
        self.site.advance(&mut self.page, now - self.last_frame);
        self.last_frame = now;

        if let Some(target) = self.page.smooth_target() {
            let next = self.smooth.step(self.page.scroll_y(), target);
            if next == target {
                self.site.settle_scroll(&mut self.page);
            } else {
                // Browsers fire scroll events throughout a smooth scroll.
                self.page.set_scroll_y(next);
                self.site.dispatch(&mut self.page, PageEvent::Scroll);
                self.site.flush_intersections(&mut self.page);
            }
        }
    }

    fn resize(&mut self, viewport_rows: u16) {
        self.page.set_viewport_height(rows_to_px(viewport_rows));
        let y = self.page.scroll_y();
        self.site.scroll_page(&mut self.page, y);
    }

    fn scroll_by(&mut self, delta: f64) {
        let y = self.page.scroll_y() + delta;
        self.site.scroll_page(&mut self.page, y);
    }

    fn page_key(&mut self, key: Key, shift: bool) {
        self.site.key(&mut self.page, KeyInput::new(key, shift));
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        let screen = self.page.viewport_height();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.page_key(Key::Tab, false),
            KeyCode::BackTab => self.page_key(Key::Tab, true),
            KeyCode::Esc => self.page_key(Key::Escape, false),
            KeyCode::Enter => {
                if let Some(focused) = self.page.focused() {
                    self.site.click(&mut self.page, focused);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(2.0 * PX_PER_ROW),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-2.0 * PX_PER_ROW),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(screen),
            KeyCode::PageUp => self.scroll_by(-screen),
            KeyCode::Home => self.site.scroll_page(&mut self.page, 0.0),
            KeyCode::End => {
                let bottom = self.page.document_height();
                self.site.scroll_page(&mut self.page, bottom);
            }
            _ => self.page_key(Key::Other, false),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(3.0 * PX_PER_ROW),
            MouseEventKind::ScrollUp => self.scroll_by(-3.0 * PX_PER_ROW),
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(node) = hit_test(&self.zones, mouse.column, mouse.row) {
                    self.site.click(&mut self.page, node);
                }
            }
            _ => {}
        }
    }

    fn status_line(&self) -> String {
        let page = &self.page;
        let focus = page
            .focused()
            .map(|id| format!("<{}> {}", page.node(id).tag, page.text(id)))
            .unwrap_or_else(|| "none".into());
        format!(
            " t={:>6.1}s  y={:>5.0}px  waiting reveals: {}  focus: {}   ? help",
            page.now().as_secs_f64(),
            page.scroll_y(),
            self.site.scroll().pending_count(),
            focus,
        )
    }
}

/// Terminal rows of page viewport to CSS pixels.  Two rows go to the
/// header and status bars.
fn rows_to_px(rows: u16) -> f64 {
    f64::from(rows.saturating_sub(2).max(1)) * PX_PER_ROW
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;
    let cli = Cli::parse();
    let config = SiteConfig::default().with_time_scale(cli.time_scale);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stdout_handle = stdout();
    execute!(stdout_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut preview = Preview::new(terminal.size()?.height, &config);
    info!(time_scale = cli.time_scale, "preview started");

    let mut events = spawn_event_reader(Duration::from_millis(cli.tick_ms.max(10)));

    // ── event loop ────────────────────────────────────────────
    loop {
        let status = preview.status_line();
        let show_help = preview.show_help;
        let page = &preview.page;
        let mut zones = Vec::new();
        terminal.draw(|frame| {
            let area = frame.area();
            let layout = PreviewLayout::from_area(area);

            zones.extend(PageView::new(page).render_and_hit(layout.page_area, frame.buffer_mut()));
            zones.extend(HeaderBar::new(page).render_and_hit(layout.header_area, frame.buffer_mut()));
            frame.render_widget(
                Paragraph::new(status.as_str()).style(Theme::status_bar_style()),
                layout.status_area,
            );
            zones.extend(LightboxOverlay::new(page).render_and_hit(area, frame.buffer_mut()));

            if show_help {
                frame.render_widget(HelpPopup, area);
            }
        })?;
        preview.zones = zones;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    TermEvent::Key(k) => preview.handle_key(k),
                    TermEvent::Mouse(m) => preview.handle_mouse(m),
                    TermEvent::Resize(_, h) => preview.resize(h),
                    TermEvent::Tick => {}
                }
                preview.tick();
            }

            else => break,
        }

        if preview.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    Ok(())
}
