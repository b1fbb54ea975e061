//! Indentation structuring: turns parsed lines into a parent-linked list.

use crate::markup::MarkupError;
use crate::markup::line::{MarkupLine, parse_line};

/// A markup line placed in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupNode {
    /// Index of the parent node in [`MarkupDocument::nodes`], `None` for roots.
    pub parent: Option<usize>,
    pub line: MarkupLine,
}

/// A parsed markup document. Nodes are in source order, so every parent
/// precedes its children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkupDocument {
    pub nodes: Vec<MarkupNode>,
    pub diagnostics: Vec<MarkupError>,
}

impl MarkupDocument {
    /// Indices of the root nodes.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| i)
    }
}

/// Incremental markup parser.
///
/// Nesting follows the raw leading-whitespace count. A line indented deeper
/// than the one before attaches to that previous element; a shallower line
/// attaches to the nearest earlier element with a smaller indent.
#[derive(Debug, Default)]
pub struct MarkupParser {
    document: MarkupDocument,
    /// Open ancestors as `(indent, node index)`, outermost first.
    stack: Vec<(usize, usize)>,
    previous_indent: usize,
    line: usize,
}

impl MarkupParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one physical line (without its line terminator).
    pub fn feed_line(&mut self, raw: &str) {
        self.line += 1;
        let mut diagnostics = Vec::new();
        let parsed = parse_line(self.line, raw, &mut diagnostics);
        for err in diagnostics {
            self.report(err);
        }
        let Some(parsed) = parsed else {
            return;
        };

        let indent = parsed.indent;
        if !self.stack.is_empty() && indent > self.previous_indent + 1 {
            self.report(MarkupError::IndentJump {
                line: self.line,
                from: self.previous_indent,
                to: indent,
            });
        }

        while self.stack.last().is_some_and(|&(open, _)| open >= indent) {
            self.stack.pop();
        }
        let parent = self.stack.last().map(|&(_, index)| index);

        let index = self.document.nodes.len();
        self.document.nodes.push(MarkupNode {
            parent,
            line: parsed,
        });
        self.stack.push((indent, index));
        self.previous_indent = indent;
    }

    /// Return the structured document.
    pub fn finish(self) -> MarkupDocument {
        self.document
    }

    fn report(&mut self, err: MarkupError) {
        tracing::warn!(error = %err, "markup diagnostic");
        self.document.diagnostics.push(err);
    }
}

/// Parse a whole markup document.
pub fn parse_markup(input: &str) -> MarkupDocument {
    let mut parser = MarkupParser::new();
    for line in input.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parents(doc: &MarkupDocument) -> Vec<Option<usize>> {
        doc.nodes.iter().map(|n| n.parent).collect()
    }

    #[test]
    fn single_step_nesting() {
        let doc = parse_markup("#a\n #b\n  #c\n #d\n#e");
        assert_eq!(parents(&doc), vec![None, Some(0), Some(1), Some(0), None]);
        assert!(doc.diagnostics.is_empty());
        assert_eq!(doc.roots().collect::<Vec<_>>(), vec![0, 4]);
    }

    #[test]
    fn dedent_by_several_levels() {
        let doc = parse_markup("#a\n #b\n  #c\n   #d\n #e");
        assert_eq!(parents(&doc), vec![None, Some(0), Some(1), Some(2), Some(0)]);
    }

    #[test]
    fn indent_jump_attaches_to_previous_element() {
        let doc = parse_markup("#a\n    #b\n    #c\n#d");
        assert_eq!(parents(&doc), vec![None, Some(0), Some(0), None]);
        assert_eq!(
            doc.diagnostics,
            vec![MarkupError::IndentJump {
                line: 2,
                from: 0,
                to: 4
            }]
        );
    }

    #[test]
    fn dedent_to_unseen_indent() {
        let doc = parse_markup("#a\n #b\n  #c\n   #d\n  #e");
        assert_eq!(parents(&doc)[4], Some(1));
    }

    #[test]
    fn indented_first_line_is_a_root() {
        let doc = parse_markup("  #a\n   #b");
        assert_eq!(parents(&doc), vec![None, Some(0)]);
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn blank_lines_do_not_break_structure() {
        let doc = parse_markup("#a\n\n // comment\n #b");
        assert_eq!(parents(&doc), vec![None, Some(0)]);
        assert_eq!(doc.nodes[1].line.line, 4);
    }
}
