//! Line-oriented stylesheet parser.
//!
//! Turns stylesheet text into a [`StyleSheet`]: an optional `@import` atlas
//! reference plus `selector { key: value; ... }` blocks. The parser is a
//! two-state machine (outside / inside a block) fed one physical line at a
//! time, so it can consume a resource stream directly.
//!
//! Nothing here is fatal. Malformed input is recorded as a [`ParseError`]
//! diagnostic, logged, and skipped.

use crate::css::model::{Declaration, RuleSet, Selector, StyleSheet};

/// Diagnostics from stylesheet parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: declaration `{text}` has no ':'")]
    MissingColon { line: usize, text: String },
    #[error("line {line}: declaration `{text}` has an empty key or value")]
    EmptyDeclaration { line: usize, text: String },
    #[error("line {line}: '}}' outside of a block")]
    StrayClose { line: usize },
    #[error("line {line}: '{{' inside block `{selector}`")]
    NestedBlock { line: usize, selector: String },
    #[error("block `{selector}` opened on line {line} is never closed")]
    UnterminatedBlock { line: usize, selector: String },
    #[error("line {line}: block has no selector")]
    MissingSelector { line: usize },
    #[error("line {line}: selector `{selector}` contains whitespace")]
    InvalidSelector { line: usize, selector: String },
    #[error("line {line}: malformed @import directive")]
    MalformedImport { line: usize },
    #[error("line {line}: unexpected text `{text}` outside of a block")]
    StrayText { line: usize, text: String },
}

/// Parser state between lines.
#[derive(Debug)]
enum State {
    Outside {
        /// Text seen on a previous line that may be the selector of a block
        /// whose `{` follows on a later line.
        pending: Option<(usize, String)>,
    },
    Inside {
        selector: Option<String>,
        opened: usize,
        declarations: Vec<Declaration>,
    },
}

/// Incremental stylesheet parser.
///
/// ```
/// use hudkit::css::parser::StyleSheetParser;
///
/// let mut parser = StyleSheetParser::new();
/// parser.feed_line("btn { font: 9;");
/// parser.feed_line("}");
/// let sheet = parser.finish();
/// assert_eq!(sheet.rules.len(), 1);
/// ```
#[derive(Debug)]
pub struct StyleSheetParser {
    sheet: StyleSheet,
    state: State,
    line: usize,
}

impl StyleSheetParser {
    /// Create a parser with no input.
    pub fn new() -> Self {
        Self {
            sheet: StyleSheet::new(),
            state: State::Outside { pending: None },
            line: 0,
        }
    }

    /// Feed one physical line (without its line terminator).
    pub fn feed_line(&mut self, raw: &str) {
        self.line += 1;
        let line = self.line;
        let mut rest = strip_comment(raw).trim();

        while !rest.is_empty() {
            rest = match std::mem::replace(&mut self.state, State::Outside { pending: None }) {
                State::Outside { pending } => self.step_outside(line, rest, pending),
                State::Inside {
                    selector,
                    opened,
                    declarations,
                } => self.step_inside(line, rest, selector, opened, declarations),
            };
        }
    }

    /// Consume the remaining state and return the parsed stylesheet.
    pub fn finish(mut self) -> StyleSheet {
        match std::mem::replace(&mut self.state, State::Outside { pending: None }) {
            State::Outside {
                pending: Some((line, text)),
            } => {
                self.report(ParseError::StrayText { line, text });
            }
            State::Outside { pending: None } => {}
            State::Inside {
                selector,
                opened,
                declarations,
            } => {
                self.report(ParseError::UnterminatedBlock {
                    line: opened,
                    selector: selector.clone().unwrap_or_default(),
                });
                self.commit(selector, declarations);
            }
        }
        self.sheet
    }

    /// Handle text outside of any block. Returns the unconsumed remainder.
    fn step_outside<'a>(
        &mut self,
        line: usize,
        rest: &'a str,
        mut pending: Option<(usize, String)>,
    ) -> &'a str {
        if let Some(directive) = strip_prefix_ignore_case(rest, "@import") {
            match parse_import(directive) {
                Some(atlas) => self.sheet.atlas = Some(atlas),
                None => self.report(ParseError::MalformedImport { line }),
            }
            self.state = State::Outside { pending };
            return "";
        }

        let open = find_unquoted(rest, '{');
        let close = find_unquoted(rest, '}');

        match (open, close) {
            (Some(open), close) if close.is_none_or(|c| open < c) => {
                let head = rest[..open].trim();
                let selector = if head.is_empty() {
                    pending.take().map(|(_, text)| text)
                } else {
                    if let Some((line, text)) = pending.take() {
                        self.report(ParseError::StrayText { line, text });
                    }
                    Some(head.to_owned())
                };

                match &selector {
                    None => self.report(ParseError::MissingSelector { line }),
                    Some(sel) if sel.chars().any(char::is_whitespace) => {
                        self.report(ParseError::InvalidSelector {
                            line,
                            selector: sel.clone(),
                        })
                    }
                    Some(_) => {}
                }

                self.state = State::Inside {
                    selector,
                    opened: line,
                    declarations: Vec::new(),
                };
                rest[open + 1..].trim_start()
            }
            (_, Some(close)) => {
                self.report(ParseError::StrayClose { line });
                self.state = State::Outside { pending };
                rest[close + 1..].trim_start()
            }
            (_, None) => {
                if let Some((line, text)) = pending.take() {
                    self.report(ParseError::StrayText { line, text });
                }
                self.state = State::Outside {
                    pending: Some((line, rest.to_owned())),
                };
                ""
            }
        }
    }

    /// Handle text inside a block. Returns the unconsumed remainder.
    fn step_inside<'a>(
        &mut self,
        line: usize,
        rest: &'a str,
        selector: Option<String>,
        opened: usize,
        mut declarations: Vec<Declaration>,
    ) -> &'a str {
        let open = find_unquoted(rest, '{');
        let close = find_unquoted(rest, '}');

        match (open, close) {
            (Some(open), close) if close.is_none_or(|c| open < c) => {
                self.report(ParseError::NestedBlock {
                    line,
                    selector: selector.clone().unwrap_or_default(),
                });
                self.declarations_into(line, &rest[..open], &mut declarations);
                self.state = State::Inside {
                    selector,
                    opened,
                    declarations,
                };
                &rest[open + 1..]
            }
            (_, Some(close)) => {
                self.declarations_into(line, &rest[..close], &mut declarations);
                self.commit(selector, declarations);
                self.state = State::Outside { pending: None };
                rest[close + 1..].trim_start()
            }
            (_, None) => {
                self.declarations_into(line, rest, &mut declarations);
                self.state = State::Inside {
                    selector,
                    opened,
                    declarations,
                };
                ""
            }
        }
    }

    fn declarations_into(&mut self, line: usize, text: &str, out: &mut Vec<Declaration>) {
        for result in split_declarations(line, text) {
            match result {
                Ok(decl) => out.push(decl),
                Err(err) => self.report(err),
            }
        }
    }

    fn commit(&mut self, selector: Option<String>, declarations: Vec<Declaration>) {
        if let Some(selector) = selector {
            self.sheet.rules.push(RuleSet {
                selector: Selector::parse(&selector),
                declarations,
            });
        }
    }

    fn report(&mut self, err: ParseError) {
        tracing::warn!(error = %err, "skipping stylesheet input");
        self.sheet.diagnostics.push(err);
    }
}

impl Default for StyleSheetParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a complete stylesheet from a string.
pub fn parse_stylesheet(input: &str) -> StyleSheet {
    let mut parser = StyleSheetParser::new();
    for line in input.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

/// Parse an inline `key: value; key: value` declaration list, as used by the
/// markup `style` attribute. Malformed entries are logged and dropped.
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    for result in split_declarations(1, input) {
        match result {
            Ok(decl) => declarations.push(decl),
            Err(err) => tracing::warn!(error = %err, "skipping inline declaration"),
        }
    }
    declarations
}

/// Split `a: b; c: d` into declarations. Empty segments are ignored silently.
fn split_declarations(
    line: usize,
    text: &str,
) -> impl Iterator<Item = Result<Declaration, ParseError>> + '_ {
    split_unquoted(text, ';')
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(move |segment| {
            let Some((key, value)) = segment.split_once(':') else {
                return Err(ParseError::MissingColon {
                    line,
                    text: segment.to_owned(),
                });
            };
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                return Err(ParseError::EmptyDeclaration {
                    line,
                    text: segment.to_owned(),
                });
            }
            Ok(Declaration::new(key.to_ascii_lowercase(), value))
        })
}

/// Byte offset of the first `target` outside single or double quotes.
pub(crate) fn find_unquoted(text: &str, target: char) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == target => return Some(i),
            None => {}
        }
    }
    None
}

/// Split on every `separator` outside quotes.
pub(crate) fn split_unquoted(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = text;
    while let Some(at) = find_unquoted(rest, separator) {
        parts.push(&rest[..at]);
        rest = &rest[at + separator.len_utf8()..];
    }
    parts.push(rest);
    parts
}

/// Remove a `//` end-of-line comment. Quoted text is left alone.
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'/' && bytes.get(i + 1) == Some(&b'/') => return &line[..i],
            None => {}
        }
        i += 1;
    }
    line
}

/// Argument of `@import "atlas"` (quotes and trailing `;` optional).
fn parse_import(directive: &str) -> Option<String> {
    let arg = directive.trim().trim_end_matches(';').trim();
    let arg = arg
        .strip_prefix('"')
        .and_then(|a| a.strip_suffix('"'))
        .or_else(|| arg.strip_prefix('\'').and_then(|a| a.strip_suffix('\'')))
        .unwrap_or(arg);
    (!arg.is_empty()).then(|| arg.to_owned())
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &text[prefix.len()..])
}
