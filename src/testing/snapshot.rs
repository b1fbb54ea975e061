//! Text outline of an element tree, for snapshot assertions.

use std::fmt::Write;

use crate::dom::node::Element;
use crate::dom::tree::ElementTree;

/// Dump the whole forest, one element per line, indented two spaces per level.
///
/// Each line reads `kind tokens State left,top widthxheight "text"`; the text
/// part is omitted when empty. Lines are joined with `'\n'` and the output has
/// no trailing newline.
///
/// ```
/// use hudkit::testing::{outline, Pilot};
///
/// let mut pilot = Pilot::new(100.0, 50.0);
/// pilot.load_markup("%button #ok = Go");
/// assert_eq!(outline(pilot.hud().tree()), "button #ok Normal 0,0 100x50 \"Go\"");
/// ```
pub fn outline(tree: &ElementTree) -> String {
    let mut out = String::new();
    for id in tree.walk() {
        let Some(element) = tree.get(id) else {
            continue;
        };
        if !out.is_empty() {
            out.push('\n');
        }
        let depth = tree.depth(id);
        out.push_str(&"  ".repeat(depth));
        describe(&mut out, element);
    }
    out
}

fn describe(out: &mut String, element: &Element) {
    let r = element.region;
    out.push_str(element.kind.as_str());
    for token in &element.tokens {
        out.push(' ');
        out.push_str(token);
    }
    let _ = write!(
        out,
        " {:?} {},{} {}x{}",
        element.state, r.left, r.top, r.width, r.height
    );
    if !element.text.is_empty() {
        let _ = write!(out, " {:?}", element.text);
    }
}
