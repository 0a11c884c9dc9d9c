//! Selector parsing and matching.
//!
//! Supports the shapes the interaction engine actually queries: type
//! selectors, `.class`, `#id`, attribute matchers (`[href="#about"]`,
//! `[href^="#"]`), compounds of those, and comma-separated lists.
//! Anything richer is a parse error rather than a silent mismatch.

use thiserror::Error;

use crate::node::ElementData;

/// Failure to parse a selector string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("expected a name after `{0}`")]
    ExpectedName(char),
    #[error("unexpected character `{0}` in selector")]
    UnexpectedChar(char),
    #[error("unterminated attribute matcher")]
    UnterminatedAttr,
}

// ---------------------------------------------------------------------------
// Attribute matcher
// ---------------------------------------------------------------------------

/// How an attribute matcher compares values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrOp {
    /// `[attr="value"]`
    Exact,
    /// `[attr^="value"]`
    Prefix,
}

/// A single `[attr…]` component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttrMatcher {
    pub name: String,
    pub op: AttrOp,
    pub value: String,
}

impl AttrMatcher {
    fn matches(&self, elem: &ElementData) -> bool {
        match elem.attribute(&self.name) {
            Some(v) => match self.op {
                AttrOp::Exact => v == self.value,
                AttrOp::Prefix => v.starts_with(&self.value),
            },
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// One compound selector: every present component must match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrMatcher>,
}

impl Selector {
    /// Parse a single compound selector (no commas).
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut selector = Selector::default();
        let mut chars = input.chars().peekable();

        // Leading type selector.
        if chars
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric())
        {
            selector.tag = Some(take_name(&mut chars));
        }

        while let Some(&c) = chars.peek() {
            match c {
                '.' => {
                    chars.next();
                    let name = take_name(&mut chars);
                    if name.is_empty() {
                        return Err(SelectorError::ExpectedName('.'));
                    }
                    selector.classes.push(name);
                }
                '#' => {
                    chars.next();
                    let name = take_name(&mut chars);
                    if name.is_empty() {
                        return Err(SelectorError::ExpectedName('#'));
                    }
                    selector.id = Some(name);
                }
                '[' => {
                    chars.next();
                    selector.attrs.push(parse_attr(&mut chars)?);
                }
                other => return Err(SelectorError::UnexpectedChar(other)),
            }
        }

        Ok(selector)
    }

    /// Returns `true` when `elem` satisfies every component.
    pub fn matches(&self, elem: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if elem.tag_name != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if elem.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| elem.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|a| a.matches(elem))
    }
}

/// Consume an identifier (letters, digits, `-`, `_`).
fn take_name(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            name.push(c);
            chars.next();
        } else {
            break;
        }
    }
    name
}

/// Parse the interior of `[name op "value"]`; the opening `[` is consumed.
fn parse_attr(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<AttrMatcher, SelectorError> {
    let name = take_name(chars);
    if name.is_empty() {
        return Err(SelectorError::ExpectedName('['));
    }

    let op = match chars.peek() {
        Some('^') => {
            chars.next();
            AttrOp::Prefix
        }
        Some('=') => AttrOp::Exact,
        Some(&other) => return Err(SelectorError::UnexpectedChar(other)),
        None => return Err(SelectorError::UnterminatedAttr),
    };
    if chars.next() != Some('=') {
        return Err(SelectorError::UnterminatedAttr);
    }

    let quote = match chars.peek() {
        Some(&q @ ('"' | '\'')) => {
            chars.next();
            Some(q)
        }
        _ => None,
    };

    let mut value = String::new();
    loop {
        match chars.next() {
            Some(c) if Some(c) == quote => break,
            Some(']') if quote.is_none() => return Ok(AttrMatcher { name, op, value }),
            Some(c) => value.push(c),
            None => return Err(SelectorError::UnterminatedAttr),
        }
    }

    match chars.next() {
        Some(']') => Ok(AttrMatcher { name, op, value }),
        _ => Err(SelectorError::UnterminatedAttr),
    }
}

// ---------------------------------------------------------------------------
// SelectorList
// ---------------------------------------------------------------------------

/// A comma-separated list of compound selectors; matches when any member
/// matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList(Vec<Selector>);

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let parts: Vec<&str> = input.split(',').collect();
        let mut selectors = Vec::with_capacity(parts.len());
        for part in parts {
            selectors.push(Selector::parse(part)?);
        }
        Ok(Self(selectors))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selector> {
        self.0.iter()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Attr;

    fn elem(tag: &str, attrs: Vec<Attr>) -> ElementData {
        let id = attrs
            .iter()
            .find(|a| a.name == "id")
            .map(|a| a.value.clone());
        let classes = attrs
            .iter()
            .find(|a| a.name == "class")
            .map(|a| a.value.split_whitespace().map(String::from).collect())
            .unwrap_or_default();
        ElementData {
            tag_name: tag.to_string(),
            attrs,
            id,
            classes,
            style: Vec::new(),
        }
    }

    #[test]
    fn parse_class() {
        let s = Selector::parse(".nav-link").unwrap();
        assert_eq!(s.classes, vec!["nav-link"]);
        assert!(s.tag.is_none());
    }

    #[test]
    fn parse_compound() {
        let s = Selector::parse("section.section#about").unwrap();
        assert_eq!(s.tag.as_deref(), Some("section"));
        assert_eq!(s.classes, vec!["section"]);
        assert_eq!(s.id.as_deref(), Some("about"));
    }

    #[test]
    fn parse_attr_prefix() {
        let s = Selector::parse(r##"a[href^="#"]"##).unwrap();
        assert_eq!(s.tag.as_deref(), Some("a"));
        assert_eq!(
            s.attrs,
            vec![AttrMatcher {
                name: "href".to_string(),
                op: AttrOp::Prefix,
                value: "#".to_string(),
            }]
        );
    }

    #[test]
    fn parse_attr_exact_single_quotes() {
        let s = Selector::parse("a[href='#about']").unwrap();
        assert_eq!(s.attrs[0].op, AttrOp::Exact);
        assert_eq!(s.attrs[0].value, "#about");
    }

    #[test]
    fn parse_attr_bare_value() {
        let s = Selector::parse("a[href=#about]").unwrap();
        assert_eq!(s.attrs[0].value, "#about");
    }

    #[test]
    fn parse_list() {
        let list = SelectorList::parse(".section, .hero").unwrap();
        assert_eq!(list.iter().count(), 2);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("."), Err(SelectorError::ExpectedName('.')));
        assert_eq!(
            Selector::parse("a[href"),
            Err(SelectorError::UnterminatedAttr)
        );
        assert_eq!(
            Selector::parse(r##"a[href^="#""##),
            Err(SelectorError::UnterminatedAttr)
        );
        assert_eq!(
            Selector::parse("div > p"),
            Err(SelectorError::UnexpectedChar(' '))
        );
    }

    #[test]
    fn match_class_and_tag() {
        let e = elem("a", vec![Attr::new("class", "nav-link active")]);
        assert!(Selector::parse(".nav-link").unwrap().matches(&e));
        assert!(Selector::parse("a.active").unwrap().matches(&e));
        assert!(!Selector::parse("div.active").unwrap().matches(&e));
        assert!(!Selector::parse(".sidebar").unwrap().matches(&e));
    }

    #[test]
    fn match_attr_prefix() {
        let anchor = elem("a", vec![Attr::new("href", "#about")]);
        let external = elem("a", vec![Attr::new("href", "https://example.com")]);
        let s = Selector::parse(r##"a[href^="#"]"##).unwrap();
        assert!(s.matches(&anchor));
        assert!(!s.matches(&external));
    }

    #[test]
    fn match_attr_exact() {
        let anchor = elem("a", vec![Attr::new("href", "#about")]);
        let s = Selector::parse(r##"a[href="#about"]"##).unwrap();
        assert!(s.matches(&anchor));
        let other = Selector::parse(r##"a[href="#future"]"##).unwrap();
        assert!(!other.matches(&anchor));
    }

    #[test]
    fn match_id() {
        let e = elem(
            "section",
            vec![Attr::new("id", "home"), Attr::new("class", "hero")],
        );
        assert!(Selector::parse("#home").unwrap().matches(&e));
        assert!(!Selector::parse("#about").unwrap().matches(&e));
    }
}
