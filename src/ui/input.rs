//! Terminal input for the preview.
//!
//! crossterm's `poll`/`read` block, so the reader lives on a blocking thread
//! and hands [`TermEvent`]s to the draw loop over a channel.  When nothing
//! arrives within one frame interval it sends [`TermEvent::Tick`] so the page
//! clock keeps moving.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;
use tracing::debug;

/// What the preview loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Keep key presses, clicks, wheel turns and resizes.  Key releases and bare
/// pointer motion never reach the page.
pub fn translate(event: CtEvent) -> Option<TermEvent> {
    match event {
        CtEvent::Key(key) if key.kind != KeyEventKind::Release => Some(TermEvent::Key(key)),
        CtEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Up(_) => None,
            _ => Some(TermEvent::Mouse(mouse)),
        },
        CtEvent::Resize(w, h) => Some(TermEvent::Resize(w, h)),
        _ => None,
    }
}

/// Start reading the terminal.  The reader stops once the receiver is
/// dropped or the terminal stops answering.
pub fn spawn_event_reader(frame: Duration) -> mpsc::UnboundedReceiver<TermEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            let next = match event::poll(frame) {
                Ok(true) => match event::read() {
                    Ok(raw) => translate(raw),
                    Err(err) => {
                        debug!("terminal read failed: {err}");
                        break;
                    }
                },
                Ok(false) => Some(TermEvent::Tick),
                Err(err) => {
                    debug!("terminal poll failed: {err}");
                    break;
                }
            };
            if let Some(ev) = next {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers, MouseButton};
    use pretty_assertions::assert_eq;

    fn mouse(kind: MouseEventKind) -> CtEvent {
        CtEvent::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn key_release_is_dropped() {
        let mut key = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(translate(CtEvent::Key(key)), Some(TermEvent::Key(key)));

        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;
        assert_eq!(translate(CtEvent::Key(key)), None);
    }

    #[test]
    fn only_clicks_and_wheel_reach_the_page() {
        assert!(translate(mouse(MouseEventKind::Down(MouseButton::Left))).is_some());
        assert!(translate(mouse(MouseEventKind::ScrollDown)).is_some());
        assert_eq!(translate(mouse(MouseEventKind::Moved)), None);
        assert_eq!(translate(mouse(MouseEventKind::Up(MouseButton::Left))), None);
        assert_eq!(translate(CtEvent::Resize(80, 24)), Some(TermEvent::Resize(80, 24)));
    }
}
