//! Hero rotation as a timed state machine.
//!
//! ```text
//!            first_hold / hold             fade                  fade
//!  Holding ─────────────────▶ FadingOut ────────▶ FadingIn ────────▶ Holding
//!                             (fade-out class)    (next line,
//!                                                  fade-in class)
//! ```
//!
//! Exactly one timer is outstanding at any time, so a cycle can never start
//! before the previous one finished.  One full cycle after the first lasts
//! `fade + fade + hold`.

use std::time::Duration;

use crate::config::HeroTiming;

use super::headline::HeadlineSet;

/// Where the rotation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The current line is fully visible.
    Holding,
    /// The current line is fading out.
    FadingOut,
    /// The next line has been swapped in and is fading in.
    FadingIn,
}

/// Visual change to apply when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Start the fade-out animation on the current text.
    FadeOut,
    /// Replace the text with [`Rotation::current`] and start the fade-in.
    SwapIn,
    /// Fade-in finished; nothing to change on the page.
    Settle,
}

#[derive(Debug, Clone)]
pub struct Rotation {
    headlines: HeadlineSet,
    timing: HeroTiming,
    phase: Phase,
}

impl Rotation {
    pub fn new(headlines: HeadlineSet, timing: HeroTiming) -> Self {
        Self {
            headlines,
            timing,
            phase: Phase::Holding,
        }
    }

    /// Delay before the first timer.
    pub fn first_delay(&self) -> Duration {
        self.timing.first_hold
    }

    /// Advance on timer expiry.  Returns the visual step to apply and the
    /// delay until the next expiry.
    pub fn tick(&mut self) -> (Step, Duration) {
        match self.phase {
            Phase::Holding => {
                self.phase = Phase::FadingOut;
                (Step::FadeOut, self.timing.fade)
            }
            Phase::FadingOut => {
                self.headlines.advance();
                self.phase = Phase::FadingIn;
                (Step::SwapIn, self.timing.fade)
            }
            Phase::FadingIn => {
                self.phase = Phase::Holding;
                (Step::Settle, self.timing.hold)
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> &str {
        self.headlines.current()
    }

    pub fn headlines(&self) -> &HeadlineSet {
        &self.headlines
    }
}
