//! The CSS selector subset the widgets use, for the in-memory page.
//!
//! Supported: comma-separated lists of compound selectors made of an
//! optional tag name followed by any number of `.class`, `#id`, `[attr]`,
//! `[attr="value"]` and `[attr^="value"]` parts.  Combinators and
//! pseudo-classes are rejected.

use crate::error::SelectorError;

/// Read access to one element, as needed for matching.
pub trait ElementView {
    fn tag(&self) -> &str;
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    op: AttrOp,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    ids: Vec<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.ids.is_empty() && self.classes.is_empty() && self.attrs.is_empty()
    }

    fn matches(&self, el: &impl ElementView) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(el.tag()) {
                return false;
            }
        }
        self.ids.iter().all(|id| el.attribute("id") == Some(id.as_str()))
            && self.classes.iter().all(|c| el.has_class(c))
            && self.attrs.iter().all(|a| match (&a.op, el.attribute(&a.name)) {
                (_, None) => false,
                (AttrOp::Exists, Some(_)) => true,
                (AttrOp::Equals(v), Some(actual)) => actual == v,
                (AttrOp::Prefix(v), Some(actual)) => actual.starts_with(v.as_str()),
            })
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Parser { src: input, pos: 0 }.list()
    }

    /// Whether any alternative matches `el`.
    pub fn matches(&self, el: &impl ElementView) -> bool {
        self.alternatives.iter().any(|c| c.matches(el))
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(found) => SelectorError::Unexpected {
                selector: self.src.to_string(),
                found,
                at: self.pos,
            },
            None => SelectorError::Empty,
        }
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            self.bump();
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn list(mut self) -> Result<Selector, SelectorError> {
        let mut alternatives = Vec::new();
        loop {
            self.skip_ws();
            alternatives.push(self.compound()?);
            self.skip_ws();
            match self.peek() {
                None => break,
                Some(',') => {
                    self.bump();
                }
                Some(_) => return Err(self.unexpected()),
            }
        }
        Ok(Selector { alternatives })
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        if self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            compound.tag = Some(self.ident()?);
        }
        loop {
            match self.peek() {
                Some('.') => {
                    self.bump();
                    compound.classes.push(self.ident()?);
                }
                Some('#') => {
                    self.bump();
                    compound.ids.push(self.ident()?);
                }
                Some('[') => {
                    self.bump();
                    compound.attrs.push(self.attribute()?);
                }
                _ => break,
            }
        }
        if compound.is_empty() {
            return Err(self.unexpected());
        }
        Ok(compound)
    }

    fn attribute(&mut self) -> Result<AttrMatch, SelectorError> {
        self.skip_ws();
        let name = self.ident()?;
        self.skip_ws();
        let op = match self.peek() {
            Some(']') => AttrOp::Exists,
            Some('=') => {
                self.bump();
                AttrOp::Equals(self.value()?)
            }
            Some('^') => {
                self.bump();
                if self.bump() != Some('=') {
                    return Err(SelectorError::UnterminatedAttribute(self.src.to_string()));
                }
                AttrOp::Prefix(self.value()?)
            }
            _ => return Err(SelectorError::UnterminatedAttribute(self.src.to_string())),
        };
        self.skip_ws();
        if self.bump() != Some(']') {
            return Err(SelectorError::UnterminatedAttribute(self.src.to_string()));
        }
        Ok(AttrMatch { name, op })
    }

    fn value(&mut self) -> Result<String, SelectorError> {
        self.skip_ws();
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                let len = self.src[start..]
                    .find(quote)
                    .ok_or_else(|| SelectorError::UnterminatedAttribute(self.src.to_string()))?;
                self.pos = start + len + quote.len_utf8();
                Ok(self.src[start..start + len].to_string())
            }
            _ => self.ident(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    struct El {
        tag: &'static str,
        classes: Vec<&'static str>,
        attrs: HashMap<&'static str, &'static str>,
    }

    impl ElementView for El {
        fn tag(&self) -> &str {
            self.tag
        }
        fn has_class(&self, class: &str) -> bool {
            self.classes.contains(&class)
        }
        fn attribute(&self, name: &str) -> Option<&str> {
            self.attrs.get(name).copied()
        }
    }

    fn anchor(href: &'static str) -> El {
        El {
            tag: "a",
            classes: vec!["nav-link"],
            attrs: HashMap::from([("href", href)]),
        }
    }

    #[test]
    fn matches_every_selector_the_widgets_use() {
        use crate::config::selectors;
        for s in [
            selectors::HERO_TEXT,
            selectors::LIGHTBOX,
            selectors::LIGHTBOX_TRIGGER,
            selectors::FOCUSABLE,
            selectors::ANCHOR_LINK,
            selectors::STAGGER_GROUP,
            selectors::BODY,
        ] {
            assert!(Selector::parse(s).is_ok(), "{s}");
        }
    }

    #[test]
    fn prefix_attribute() {
        let sel = Selector::parse("a[href^=\"#\"]").expect("valid");
        assert!(sel.matches(&anchor("#features")));
        assert!(!sel.matches(&anchor("/pricing")));
    }

    #[test]
    fn compound_requires_all_parts() {
        let sel = Selector::parse("a.nav-link[href]").expect("valid");
        assert!(sel.matches(&anchor("#x")));
        let sel = Selector::parse("a.other").expect("valid");
        assert!(!sel.matches(&anchor("#x")));
    }

    #[test]
    fn list_matches_any() {
        let sel = Selector::parse("button, a[href]").expect("valid");
        assert!(sel.matches(&anchor("#x")));
    }

    #[test]
    fn id_selector() {
        let el = El {
            tag: "div",
            classes: vec![],
            attrs: HashMap::from([("id", "lightbox")]),
        };
        assert!(Selector::parse("#lightbox").expect("valid").matches(&el));
        assert!(!Selector::parse("#other").expect("valid").matches(&el));
    }

    #[test]
    fn rejects_combinators_and_garbage() {
        assert!(matches!(
            Selector::parse(".a .b"),
            Err(SelectorError::Unexpected { found: '.', .. })
        ));
        assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
        assert!(matches!(
            Selector::parse("[href"),
            Err(SelectorError::UnterminatedAttribute(_))
        ));
        assert!(matches!(Selector::parse("#"), Err(SelectorError::Empty)));
    }
}
