//! Reveal-on-scroll bookkeeping and stagger delays.

use crate::config::ScrollConfig;

/// A box in viewport coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Fraction of this box inside the vertical band `[from, to]`.
    /// Zero-height boxes count as fully visible when they sit in the band.
    pub fn visible_fraction(&self, from: f64, to: f64) -> f64 {
        if self.height <= 0.0 {
            return if self.top >= from && self.top <= to { 1.0 } else { 0.0 };
        }
        let visible = (self.bottom().min(to) - self.top.max(from)).max(0.0);
        (visible / self.height).clamp(0.0, 1.0)
    }
}

/// Whether `rect` already sits in the startup band, i.e. the user can see
/// it on first paint and it should not wait for the observer.
pub fn in_initial_band(rect: Rect, viewport_height: f64, band: f64) -> bool {
    rect.top < viewport_height - band && rect.bottom() > band
}

/// One observer notification.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry<N> {
    pub target: N,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Whether an observer entry should reveal its target.
pub fn entry_reveals<N>(entry: &IntersectionEntry<N>, threshold: f64) -> bool {
    entry.is_intersecting && entry.ratio >= threshold
}

/// Tracks which elements still wait for their reveal.
///
/// An element moves from pending to revealed exactly once; afterwards it is
/// forgotten and any further notification about it is ignored.
#[derive(Debug, Clone)]
pub struct RevealTracker<N> {
    pending: Vec<N>,
    revealed: usize,
}

impl<N> Default for RevealTracker<N> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            revealed: 0,
        }
    }
}

impl<N: PartialEq> RevealTracker<N> {
    /// Start waiting for `node`.  Already-pending nodes are not duplicated.
    pub fn watch(&mut self, node: N) {
        if !self.pending.contains(&node) {
            self.pending.push(node);
        }
    }

    /// Record a reveal that happened without the observer (startup band).
    pub fn note_revealed(&mut self) {
        self.revealed += 1;
    }

    /// Move `node` from pending to revealed.  Returns `false` when it was
    /// not pending, in which case the caller must not reveal it again.
    pub fn reveal(&mut self, node: &N) -> bool {
        match self.pending.iter().position(|n| n == node) {
            Some(i) => {
                self.pending.swap_remove(i);
                self.revealed += 1;
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, node: &N) -> bool {
        self.pending.contains(node)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }
}

/// Parse a stagger attribute the way the markup authors expect: leading
/// whitespace and an optional sign, then as many digits as there are.
/// Missing, unparsable and zero values fall back to the configured default.
pub fn stagger_step_ms(attr: Option<&str>, config: &ScrollConfig) -> i64 {
    attr.and_then(parse_leading_int)
        .filter(|&ms| ms != 0)
        .unwrap_or(config.default_stagger_ms)
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first()? {
        b'-' => (-1, &s[1..]),
        b'+' => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// `animation-delay` value for the child at `index` in a group.  Absurd
/// steps saturate instead of wrapping.
pub fn stagger_delay_css(index: usize, step_ms: i64) -> String {
    let index = i64::try_from(index).unwrap_or(i64::MAX);
    format!("{}ms", index.saturating_mul(step_ms))
}
