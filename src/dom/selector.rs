//! Selector parsing - the subset of CSS selectors the behaviors use.
//!
//! Grammar (one optional descendant combinator, compound parts in any count):
//!
//! ```text
//! selector  = compound ( ' ' compound )*
//! compound  = [tag] ( '#' ident | '.' ident | attr )*
//! attr      = '[' ident ( ('^')? '=' value )? ']'
//! value     = '"' chars '"' | ident
//! ```
//!
//! Parsing is infallible in the document sense: invalid selector text yields
//! `None` and queries built from it match nothing.

// =============================================================================
// TYPES
// =============================================================================

/// How an attribute matcher compares against an element's attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrOp {
    /// `[name]` - the attribute exists, any value.
    Present,
    /// `[name="value"]` - exact match.
    Equals(String),
    /// `[name^="value"]` - value starts with the given prefix.
    Prefix(String),
}

/// A single `[name...]` matcher inside a compound selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrMatcher {
    pub name: String,
    pub op: AttrOp,
}

/// One compound selector: tag, id, classes and attribute matchers,
/// all of which must hold on the same element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrMatcher>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }
}

/// A parsed selector: a chain of compounds related by descendancy.
///
/// `".category-filter button"` matches any `button` with a `.category-filter`
/// ancestor. The last compound is the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub compounds: Vec<Compound>,
}

impl Selector {
    /// Parse selector text. Returns `None` on anything outside the grammar.
    pub fn parse(text: &str) -> Option<Self> {
        let mut compounds = Vec::new();
        for part in split_compounds(text)? {
            compounds.push(parse_compound(&part)?);
        }
        if compounds.is_empty() {
            return None;
        }
        Some(Self { compounds })
    }

    /// The subject compound (rightmost).
    pub fn subject(&self) -> &Compound {
        self.compounds.last().expect("selector has at least one compound")
    }

    /// Ancestor compounds, outermost first.
    pub fn ancestors(&self) -> &[Compound] {
        &self.compounds[..self.compounds.len() - 1]
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Split on whitespace outside of `[...]` brackets.
fn split_compounds(text: &str) -> Option<Vec<String>> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0u32;

    for c in text.chars() {
        match c {
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth = depth.checked_sub(1)?;
                current.push(c);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if depth != 0 {
        return None;
    }
    if !current.is_empty() {
        parts.push(current);
    }
    Some(parts)
}

fn parse_compound(text: &str) -> Option<Compound> {
    let mut chars = text.chars().peekable();
    let mut compound = Compound::default();

    // Optional leading tag name
    if chars.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
        compound.tag = Some(take_ident(&mut chars)?);
    }

    while let Some(&c) = chars.peek() {
        match c {
            '#' => {
                chars.next();
                compound.id = Some(take_ident(&mut chars)?);
            }
            '.' => {
                chars.next();
                compound.classes.push(take_ident(&mut chars)?);
            }
            '[' => {
                chars.next();
                compound.attrs.push(take_attr(&mut chars)?);
            }
            _ => return None,
        }
    }

    if compound.is_empty() { None } else { Some(compound) }
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    let mut ident = String::new();
    while chars.peek().is_some_and(|&c| is_ident_char(c)) {
        ident.push(chars.next()?);
    }
    if ident.is_empty() { None } else { Some(ident) }
}

/// Parse the inside of `[...]`, consuming the closing bracket.
fn take_attr(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<AttrMatcher> {
    let name = take_ident(chars)?;

    match chars.next()? {
        ']' => Some(AttrMatcher { name, op: AttrOp::Present }),
        '^' => {
            if chars.next()? != '=' {
                return None;
            }
            let value = take_value(chars)?;
            if chars.next()? != ']' {
                return None;
            }
            Some(AttrMatcher { name, op: AttrOp::Prefix(value) })
        }
        '=' => {
            let value = take_value(chars)?;
            if chars.next()? != ']' {
                return None;
            }
            Some(AttrMatcher { name, op: AttrOp::Equals(value) })
        }
        _ => None,
    }
}

fn take_value(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    if chars.peek() == Some(&'"') {
        chars.next();
        let mut value = String::new();
        loop {
            match chars.next()? {
                '"' => return Some(value),
                c => value.push(c),
            }
        }
    } else {
        take_ident(chars)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_class() {
        let sel = Selector::parse(".menu-toggle").unwrap();
        assert_eq!(sel.compounds.len(), 1);
        assert_eq!(sel.subject().classes, vec!["menu-toggle"]);
        assert!(sel.subject().tag.is_none());
    }

    #[test]
    fn test_tag_with_attr_prefix() {
        let sel = Selector::parse("a[href^=\"#\"]").unwrap();
        let subject = sel.subject();
        assert_eq!(subject.tag.as_deref(), Some("a"));
        assert_eq!(
            subject.attrs,
            vec![AttrMatcher { name: "href".into(), op: AttrOp::Prefix("#".into()) }]
        );
    }

    #[test]
    fn test_attr_present() {
        let sel = Selector::parse(".mobile-nav-item[data-action]").unwrap();
        let subject = sel.subject();
        assert_eq!(subject.classes, vec!["mobile-nav-item"]);
        assert_eq!(
            subject.attrs,
            vec![AttrMatcher { name: "data-action".into(), op: AttrOp::Present }]
        );
    }

    #[test]
    fn test_attr_equals_unquoted() {
        let sel = Selector::parse("[data-action=open-menu]").unwrap();
        assert_eq!(
            sel.subject().attrs,
            vec![AttrMatcher { name: "data-action".into(), op: AttrOp::Equals("open-menu".into()) }]
        );
    }

    #[test]
    fn test_descendant_chain() {
        let sel = Selector::parse(".category-filter button[data-category]").unwrap();
        assert_eq!(sel.compounds.len(), 2);
        assert_eq!(sel.ancestors()[0].classes, vec!["category-filter"]);
        assert_eq!(sel.subject().tag.as_deref(), Some("button"));
    }

    #[test]
    fn test_id_selector() {
        let sel = Selector::parse("section#pricing.dark").unwrap();
        let subject = sel.subject();
        assert_eq!(subject.tag.as_deref(), Some("section"));
        assert_eq!(subject.id.as_deref(), Some("pricing"));
        assert_eq!(subject.classes, vec!["dark"]);
    }

    #[test]
    fn test_invalid_selectors() {
        assert!(Selector::parse("").is_none());
        assert!(Selector::parse("   ").is_none());
        assert!(Selector::parse(".").is_none());
        assert!(Selector::parse("[unclosed").is_none());
        assert!(Selector::parse("div > p").is_none()); // child combinator unsupported
        assert!(Selector::parse("a[href^#]").is_none());
    }

    #[test]
    fn test_multiple_classes() {
        let sel = Selector::parse(".blog-card.featured").unwrap();
        assert_eq!(sel.subject().classes, vec!["blog-card", "featured"]);
    }
}
