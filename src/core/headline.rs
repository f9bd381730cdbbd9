//! The hero's headline list and its wrapping cursor.

/// An ordered, non-empty set of headlines with a cursor that always points
/// at a valid entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineSet {
    lines: Vec<String>,
    cursor: usize,
}

impl HeadlineSet {
    /// Build a set starting at the first line.  `None` when `lines` is empty.
    pub fn new(lines: Vec<String>) -> Option<Self> {
        Self::starting_at(lines, 0)
    }

    /// Build a set starting at `start` (taken modulo the length).
    pub fn starting_at(lines: Vec<String>, start: usize) -> Option<Self> {
        if lines.is_empty() {
            return None;
        }
        let cursor = start % lines.len();
        Some(Self { lines, cursor })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &str {
        &self.lines[self.cursor]
    }

    /// Move to the next line, wrapping at the end, and return it.
    pub fn advance(&mut self) -> &str {
        self.cursor = (self.cursor + 1) % self.lines.len();
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn abc() -> Vec<String> {
        vec!["A".into(), "B".into(), "C".into()]
    }

    #[test]
    fn empty_set_is_rejected() {
        assert!(HeadlineSet::new(Vec::new()).is_none());
    }

    #[test]
    fn advances_and_wraps() {
        let mut set = HeadlineSet::new(abc()).expect("non-empty");
        assert_eq!(set.current(), "A");
        assert_eq!(set.advance(), "B");
        assert_eq!(set.advance(), "C");
        assert_eq!(set.advance(), "A");
    }

    #[test]
    fn start_is_taken_modulo_length() {
        let set = HeadlineSet::starting_at(abc(), 7).expect("non-empty");
        assert_eq!(set.cursor(), 1);
        assert_eq!(set.current(), "B");
    }

    proptest! {
        #[test]
        fn cursor_after_n_advances(len in 1usize..12, start in 0usize..64, n in 0usize..200) {
            let lines: Vec<String> = (0..len).map(|i| format!("line {i}")).collect();
            let mut set = HeadlineSet::starting_at(lines.clone(), start).expect("non-empty");
            for _ in 0..n {
                set.advance();
            }
            prop_assert!(set.cursor() < len);
            prop_assert_eq!(set.current(), lines[(start % len + n) % len].as_str());
        }
    }
}
