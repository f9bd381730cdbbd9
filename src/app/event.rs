//! Page event abstraction.
//!
//! Hosts translate their native events (DOM events, terminal keys) into
//! [`PageEvent`]s and feed them to [`crate::Site::dispatch`].  Click
//! listeners are described up-front as [`Binding`]s so the host knows which
//! elements to listen on.

use crate::core::reveal::IntersectionEntry;

/// One-shot timers the widgets schedule through [`crate::Page::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Next step of the hero rotation.
    Hero,
    /// Move focus into the lightbox opened as `generation`.
    LightboxFocus { generation: u64 },
}

/// Keys the widgets care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// A keydown on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: Key, shift: bool) -> Self {
        Self { key, shift }
    }
}

/// Which behaviour a click listener triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    LightboxTrigger,
    LightboxClose,
    LightboxOverlay,
    AnchorLink,
    MenuToggle,
    NavLink,
}

/// A click listener the host must attach to `node`.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding<N> {
    pub node: N,
    pub kind: BindingKind,
}

impl<N> Binding<N> {
    pub fn new(node: N, kind: BindingKind) -> Self {
        Self { node, kind }
    }
}

/// High-level events consumed by the site.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<N> {
    /// A bound element was clicked.
    Click { node: N, kind: BindingKind },
    /// A key went down anywhere in the document.
    KeyDown(KeyInput),
    /// The window scrolled.
    Scroll,
    /// The intersection observer reported.
    Intersection(Vec<IntersectionEntry<N>>),
    /// A scheduled timer expired.
    Timer(Timer),
}

/// What the host should do with the native event afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const IGNORED: Self = Self {
        prevent_default: false,
    };
    pub const HANDLED: Self = Self {
        prevent_default: true,
    };

    /// Combine outcomes of several listeners on the same native event.
    pub fn merge(self, other: Self) -> Self {
        Self {
            prevent_default: self.prevent_default || other.prevent_default,
        }
    }
}
