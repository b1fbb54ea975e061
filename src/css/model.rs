//! Parsed stylesheet: Selector, Declaration, RuleSet, StyleSheet.

use std::fmt;

use crate::css::parser::ParseError;

/// A state- or relationship-scoped selector suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pseudo {
    /// `:hover`: merged into the Hover state style.
    Hover,
    /// `:active`: merged into the Active state style.
    Active,
    /// `:child`: merged into the children of the element.
    Child,
    /// Any other suffix; registered verbatim but never applied.
    Other(String),
}

impl Pseudo {
    /// Parse the text after the `:` (case-insensitive).
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "hover" => Pseudo::Hover,
            "active" => Pseudo::Active,
            "child" => Pseudo::Child,
            _ => Pseudo::Other(name.to_owned()),
        }
    }

    /// The suffix text without the colon.
    pub fn as_str(&self) -> &str {
        match self {
            Pseudo::Hover => "hover",
            Pseudo::Active => "active",
            Pseudo::Child => "child",
            Pseudo::Other(name) => name,
        }
    }
}

/// A single whitespace-free selector token.
///
/// `.name` and a bare `name` are the same class selector: both resolve to the
/// registry key `name`, so markup `.btn` matches a stylesheet block `btn { }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// `name` or `.name`.
    Class(String),
    /// `#id`.
    Id(String),
    /// `#id:hover`, `#id:active`, `#id:child`, ...
    Pseudo { id: String, pseudo: Pseudo },
}

impl Selector {
    /// Classify a selector token.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if let Some(rest) = token.strip_prefix('#') {
            if let Some((id, pseudo)) = rest.split_once(':') {
                return Selector::Pseudo {
                    id: id.to_owned(),
                    pseudo: Pseudo::parse(pseudo),
                };
            }
            return Selector::Id(rest.to_owned());
        }
        Selector::Class(token.strip_prefix('.').unwrap_or(token).to_owned())
    }

    /// The synthetic selector `#<id>:<pseudo>`.
    pub fn pseudo(id: &str, pseudo: Pseudo) -> Self {
        Selector::Pseudo {
            id: id.to_owned(),
            pseudo,
        }
    }

    /// The exact string this selector is registered under.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Class(name) => write!(f, "{name}"),
            Selector::Id(id) => write!(f, "#{id}"),
            Selector::Pseudo { id, pseudo } => write!(f, "#{id}:{}", pseudo.as_str()),
        }
    }
}

/// A single `key: value` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name, lowercased.
    pub property: String,
    /// The raw value text, trimmed.
    pub value: String,
}

impl Declaration {
    /// Create a new declaration.
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// A stylesheet block: one selector paired with its declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    pub selector: Selector,
    pub declarations: Vec<Declaration>,
}

/// A parsed stylesheet.
#[derive(Debug, Default)]
pub struct StyleSheet {
    /// The sprite atlas named by the last `@import` directive.
    pub atlas: Option<String>,
    /// Blocks in source order.
    pub rules: Vec<RuleSet>,
    /// Lines and declarations that were skipped.
    pub diagnostics: Vec<ParseError>,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }
}
