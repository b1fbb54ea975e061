//! Single-line markup grammar.
//!
//! `[%type] <tokens> [(key[=value], ...)] [= text]`
//!
//! The attribute group is found with quote-aware scanning, and the `=` that
//! starts the text is searched for only after the group, so neither a `)` nor
//! an `=` inside a quoted value confuses the split.

use crate::css::parser::{find_unquoted, split_unquoted};
use crate::dom::node::{ElementKind, ElementSpec};
use crate::markup::MarkupError;

/// One parsed markup line, before it is placed in the tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkupLine {
    /// 1-based source line.
    pub line: usize,
    /// Raw count of leading whitespace characters.
    pub indent: usize,
    /// The id/class token string, type marker removed.
    pub tokens: String,
    pub kind: ElementKind,
    pub text: String,
    /// Attributes other than `listen` and `style`, in declared order.
    pub attributes: Vec<(String, String)>,
    pub listening: bool,
    /// Inline declarations from the `style` attribute.
    pub style: Option<String>,
}

impl MarkupLine {
    /// Build the element spec this line describes.
    pub fn to_spec(&self) -> ElementSpec {
        let mut spec = ElementSpec::new(&self.tokens)
            .kind(self.kind)
            .text(self.text.clone())
            .listen(self.listening);
        if let Some(style) = &self.style {
            spec = spec.style(style);
        }
        for (key, value) in &self.attributes {
            spec = spec.attribute(key.clone(), value.clone());
        }
        spec
    }
}

/// Parse one physical line. Returns `None` for blank and `//` comment lines.
///
/// Recoverable problems are pushed to `diagnostics`; the line is still
/// returned with whatever could be salvaged.
pub fn parse_line(
    line: usize,
    raw: &str,
    diagnostics: &mut Vec<MarkupError>,
) -> Option<MarkupLine> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with("//") {
        return None;
    }
    let indent = raw.chars().take_while(|c| c.is_whitespace()).count();

    let first_eq = trimmed.find('=');
    let group = match trimmed.find('(') {
        Some(open) if first_eq.is_none_or(|eq| open < eq) => Some(open),
        _ => None,
    };

    let (head, attrs, tail) = match group {
        Some(open) => match find_unquoted(&trimmed[open + 1..], ')') {
            Some(len) => {
                let close = open + 1 + len;
                (
                    &trimmed[..open],
                    Some(&trimmed[open + 1..close]),
                    &trimmed[close + 1..],
                )
            }
            None => {
                diagnostics.push(MarkupError::UnclosedAttributes { line });
                (&trimmed[..open], Some(&trimmed[open + 1..]), "")
            }
        },
        None => ("", None, trimmed),
    };

    // Without a group the token string is whatever precedes the `=`.
    let (head, text) = match (group, tail.find('=')) {
        (Some(_), Some(eq)) => (head, tail[eq + 1..].trim()),
        (Some(_), None) => (head, ""),
        (None, Some(eq)) => (&tail[..eq], tail[eq + 1..].trim()),
        (None, None) => (tail, ""),
    };

    let (kind, tokens) = split_type_marker(line, head.trim(), diagnostics);

    let mut parsed = MarkupLine {
        line,
        indent,
        tokens: tokens.to_owned(),
        kind,
        text: text.to_owned(),
        ..MarkupLine::default()
    };

    for (key, value) in attrs.map(parse_attributes).unwrap_or_default() {
        match key.to_ascii_lowercase().as_str() {
            "listen" => parsed.listening = is_truthy(&value),
            "style" => parsed.style = Some(value),
            _ => parsed.attributes.push((key, value)),
        }
    }
    Some(parsed)
}

/// Strip a leading `%type` marker, if present.
fn split_type_marker<'a>(
    line: usize,
    head: &'a str,
    diagnostics: &mut Vec<MarkupError>,
) -> (ElementKind, &'a str) {
    let Some(marked) = head.strip_prefix('%') else {
        return (ElementKind::Block, head);
    };
    let (name, rest) = marked
        .split_once(char::is_whitespace)
        .unwrap_or((marked, ""));
    let kind = ElementKind::parse(name).unwrap_or_else(|| {
        diagnostics.push(MarkupError::UnknownType {
            line,
            name: name.to_owned(),
        });
        ElementKind::Block
    });
    (kind, rest.trim())
}

/// Split `key=value, flag, other="a, b"` into pairs. Bare keys map to `"true"`.
pub fn parse_attributes(group: &str) -> Vec<(String, String)> {
    split_unquoted(group, ',')
        .into_iter()
        .filter_map(|item| {
            let item = item.trim();
            if item.is_empty() {
                return None;
            }
            let (key, value) = match item.split_once('=') {
                Some((key, value)) => (key.trim(), unquote(value.trim())),
                None => (item, "true"),
            };
            Some((key.to_owned(), value.to_owned()))
        })
        .collect()
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
