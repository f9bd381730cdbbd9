//! Lightbox model: content, open/closed state, and the focus-trap rule.

/// What the lightbox shows.  Built from a trigger at click time and thrown
/// away on close.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LightboxContent {
    pub title: String,
    pub description: String,
    /// Image URL.  Never `Some("")`.
    pub image: Option<String>,
}

impl LightboxContent {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: Option<impl Into<String>>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: image.map(Into::into).filter(|src| !src.is_empty()),
        }
    }
}

/// Open/closed state plus the element to hand focus back to.
///
/// The trigger only exists while open, so a closed modal can never hold a
/// stale reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState<T> {
    Closed,
    Open { trigger: Option<T> },
}

impl<T> Default for ModalState<T> {
    fn default() -> Self {
        Self::Closed
    }
}

impl<T> ModalState<T> {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn trigger(&self) -> Option<&T> {
        match self {
            Self::Open { trigger } => trigger.as_ref(),
            Self::Closed => None,
        }
    }

    /// Open (or re-open) the modal.  Any previously remembered trigger is
    /// replaced; the last opener wins.
    pub fn open(&mut self, trigger: Option<T>) {
        *self = Self::Open { trigger };
    }

    /// Close the modal and take the remembered trigger, if any.
    pub fn close(&mut self) -> Option<T> {
        match std::mem::replace(self, Self::Closed) {
            Self::Open { trigger } => trigger,
            Self::Closed => None,
        }
    }
}

/// What to do with a Tab keypress while the modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabMove {
    /// Let the browser move focus; it stays inside the modal.
    Allow,
    /// Cancel the keypress and focus the focusable at this index.
    FocusIndex(usize),
    /// Cancel the keypress; there is nowhere to go.
    Block,
}

/// Decide how a Tab (or Shift+Tab when `backwards`) is handled.
///
/// `count` is the number of focusable descendants of the modal in tab order
/// and `active` the index of the focused one, or `None` when focus is
/// somewhere else.
pub fn trap_tab(count: usize, active: Option<usize>, backwards: bool) -> TabMove {
    if count == 0 {
        return TabMove::Block;
    }
    let last = count - 1;
    match (active, backwards) {
        (None, false) => TabMove::FocusIndex(0),
        (None, true) => TabMove::FocusIndex(last),
        (Some(0), true) => TabMove::FocusIndex(last),
        (Some(i), false) if i >= last => TabMove::FocusIndex(0),
        _ => TabMove::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn empty_image_is_no_image() {
        let content = LightboxContent::new("T", "D", Some(""));
        assert_eq!(content.image, None);
        let content = LightboxContent::new("T", "D", Some("img.png"));
        assert_eq!(content.image.as_deref(), Some("img.png"));
    }

    #[test]
    fn close_takes_trigger_once() {
        let mut state = ModalState::default();
        state.open(Some("btn"));
        assert!(state.is_open());
        assert_eq!(state.trigger(), Some(&"btn"));
        assert_eq!(state.close(), Some("btn"));
        assert!(!state.is_open());
        assert_eq!(state.trigger(), None);
        assert_eq!(state.close(), None);
    }

    #[test]
    fn reopening_replaces_trigger() {
        let mut state = ModalState::default();
        state.open(Some(1));
        state.open(Some(2));
        assert_eq!(state.close(), Some(2));
    }

    #[rstest]
    #[case::forward_from_last(3, Some(2), false, TabMove::FocusIndex(0))]
    #[case::backward_from_first(3, Some(0), true, TabMove::FocusIndex(2))]
    #[case::forward_inside(3, Some(0), false, TabMove::Allow)]
    #[case::backward_inside(3, Some(2), true, TabMove::Allow)]
    #[case::outside_forward(3, None, false, TabMove::FocusIndex(0))]
    #[case::outside_backward(3, None, true, TabMove::FocusIndex(2))]
    #[case::single_forward(1, Some(0), false, TabMove::FocusIndex(0))]
    #[case::single_backward(1, Some(0), true, TabMove::FocusIndex(0))]
    #[case::nothing_focusable(0, None, false, TabMove::Block)]
    fn tab_is_trapped(
        #[case] count: usize,
        #[case] active: Option<usize>,
        #[case] backwards: bool,
        #[case] expected: TabMove,
    ) {
        assert_eq!(trap_tab(count, active, backwards), expected);
    }

    proptest! {
        /// Simulate the browser moving one step on `Allow`: focus never
        /// leaves `0..count`.
        #[test]
        fn focus_never_escapes(count in 1usize..8, presses in proptest::collection::vec(any::<bool>(), 0..40)) {
            let mut active: Option<usize> = None;
            for backwards in presses {
                let next = match trap_tab(count, active, backwards) {
                    TabMove::FocusIndex(i) => i,
                    TabMove::Allow => {
                        let i = active.expect("allow only from inside");
                        if backwards { i - 1 } else { i + 1 }
                    }
                    TabMove::Block => unreachable!("count > 0"),
                };
                prop_assert!(next < count);
                active = Some(next);
            }
        }
    }
}
