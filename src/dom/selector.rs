use std::iter::Peekable;
use std::str::{Chars, FromStr};

// ============================================================================
// Minimal CSS selector support for form-scoped lookups
// ============================================================================
//
// Grammar: one or more comma-separated compound selectors, each made of an
// optional tag (or `*`) followed by any number of `#id`, `.class`, `[attr]`,
// `[attr=value]` and `:checked` parts. Combinators are not supported.

/// Anything a selector can be matched against.
pub trait Selectable {
    fn tag(&self) -> &str;
    fn attr(&self, name: &str) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
    fn is_checked(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unsupported selector syntax at '{0}'")]
    Unsupported(String),

    #[error("unterminated attribute selector")]
    UnterminatedAttribute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
    checked: bool,
}

impl Compound {
    fn matches(&self, el: &impl Selectable) -> bool {
        if let Some(tag) = &self.tag {
            if !el.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        let attrs_match = self.attrs.iter().all(|a| match (&a.value, el.attr(&a.name)) {
            (None, found) => found.is_some(),
            (Some(expected), Some(found)) => expected == found,
            (Some(_), None) => false,
        });
        attrs_match && (!self.checked || el.is_checked())
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut alternatives = Vec::new();
        for group in split_groups(input) {
            let group = group.trim();
            if group.is_empty() {
                return Err(SelectorError::Empty);
            }
            alternatives.push(parse_compound(group)?);
        }
        Ok(Selector { alternatives })
    }

    pub fn matches(&self, el: &impl Selectable) -> bool {
        self.alternatives.iter().any(|c| c.matches(el))
    }

    /// Same selector restricted to checked elements.
    pub fn checked(mut self) -> Self {
        for alt in &mut self.alternatives {
            alt.checked = true;
        }
        self
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

/// Split a selector list on commas outside attribute brackets and quotes.
fn split_groups(input: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (i, c) in input.char_indices() {
        match (c, quote) {
            (q, Some(open)) if q == open => quote = None,
            (_, Some(_)) => {}
            ('"' | '\'', None) => quote = Some(c),
            ('[', None) => depth += 1,
            (']', None) => depth = depth.saturating_sub(1),
            (',', None) if depth == 0 => {
                groups.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    groups.push(&input[start..]);
    groups
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

fn rest(chars: &Peekable<Chars<'_>>) -> String {
    chars.clone().collect()
}

fn parse_compound(group: &str) -> Result<Compound, SelectorError> {
    let mut compound = Compound::default();
    let mut chars = group.chars().peekable();

    match chars.peek() {
        Some('*') => {
            chars.next();
        }
        Some(&c) if is_ident_char(c) => {
            compound.tag = Some(read_ident(&mut chars));
        }
        _ => {}
    }

    while let Some(&c) = chars.peek() {
        match c {
            '#' | '.' | ':' => {
                chars.next();
                let ident = read_ident(&mut chars);
                if ident.is_empty() {
                    return Err(SelectorError::Unsupported(format!("{}{}", c, rest(&chars))));
                }
                match c {
                    '#' => compound.id = Some(ident),
                    '.' => compound.classes.push(ident),
                    _ if ident == "checked" => compound.checked = true,
                    _ => return Err(SelectorError::Unsupported(format!(":{}", ident))),
                }
            }
            '[' => {
                chars.next();
                compound.attrs.push(parse_attr(&mut chars)?);
            }
            _ => return Err(SelectorError::Unsupported(rest(&chars))),
        }
    }

    Ok(compound)
}

fn parse_attr(chars: &mut Peekable<Chars<'_>>) -> Result<AttrMatch, SelectorError> {
    let mut body = String::new();
    let mut quote: Option<char> = None;

    loop {
        let c = chars.next().ok_or(SelectorError::UnterminatedAttribute)?;
        match (c, quote) {
            (']', None) => break,
            ('"' | '\'', None) => quote = Some(c),
            (q, Some(open)) if q == open => quote = None,
            _ => body.push(c),
        }
    }

    match body.split_once('=') {
        Some((name, value)) => Ok(AttrMatch {
            name: name.trim().to_string(),
            value: Some(value.trim().to_string()),
        }),
        None => Ok(AttrMatch {
            name: body.trim().to_string(),
            value: None,
        }),
    }
}
