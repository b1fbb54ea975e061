//! Element types: ElementId, ElementKind, Element, ElementSpec.

use slotmap::new_key_type;

use crate::css::parser::parse_declarations;
use crate::css::scalar::Scalar;
use crate::css::styles::{InteractionState, MergePass, StateStyles, Style};
use crate::css::stylesheet::style_from_declarations;
use crate::geometry::Region;
use crate::render::canvas::{CaptionHandle, RectHandle};

new_key_type! {
    /// Unique handle for an element in the tree. Copy, lightweight (u64).
    pub struct ElementId;
}

/// What an element is for. Purely informational to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementKind {
    #[default]
    Block,
    Button,
    TextBox,
}

impl ElementKind {
    /// Parse a type name (`block`, `button`, `textbox`), case-insensitive.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "block" => Some(ElementKind::Block),
            "button" => Some(ElementKind::Button),
            "textbox" => Some(ElementKind::TextBox),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Block => "block",
            ElementKind::Button => "button",
            ElementKind::TextBox => "textbox",
        }
    }
}

/// A single node of the element tree.
#[derive(Debug, Clone)]
pub struct Element {
    /// Identity from the leading `#id` token; empty if there is none.
    pub identity: String,
    /// Selector tokens in declared order, including the `#id` token.
    pub tokens: Vec<String>,
    pub kind: ElementKind,
    pub text: String,
    /// Markup attributes other than `listen` and `style`, in declared order.
    pub attributes: Vec<(String, String)>,
    /// The three cascaded styles.
    pub styles: StateStyles,
    pub state: InteractionState,
    /// Absolute box from the last layout.
    pub region: Region,
    /// Whether the element takes part in pointer hit-testing.
    pub listening: bool,
    pub(crate) rect: Option<RectHandle>,
    pub(crate) caption: Option<CaptionHandle>,
}

impl Element {
    /// The style for the current interaction state.
    pub fn style(&self) -> &Style {
        self.styles.get(self.state)
    }

    /// Look up a markup attribute by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The rectangle primitive, if the element currently has one.
    pub fn rect(&self) -> Option<RectHandle> {
        self.rect
    }

    /// The caption primitive, if the element currently has one.
    pub fn caption(&self) -> Option<CaptionHandle> {
        self.caption
    }
}

/// Everything needed to create an element, before the cascade runs.
///
/// ```
/// use hudkit::dom::{ElementKind, ElementSpec};
///
/// let spec = ElementSpec::new("#ok .btn")
///     .kind(ElementKind::Button)
///     .text("Okay")
///     .listen(true)
///     .style("font: 9");
/// assert_eq!(spec.identity(), "ok");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    pub tokens: Vec<String>,
    pub kind: ElementKind,
    pub text: String,
    pub attributes: Vec<(String, String)>,
    pub listening: bool,
    pub inline: Style,
}

impl ElementSpec {
    /// Start from a whitespace-separated selector token string.
    pub fn new(tokens: &str) -> Self {
        Self {
            tokens: tokens.split_whitespace().map(str::to_owned).collect(),
            ..Self::default()
        }
    }

    /// Identity taken from the first token when it is an `#id`.
    pub fn identity(&self) -> &str {
        self.tokens
            .first()
            .and_then(|t| t.strip_prefix('#'))
            .map(|t| t.split(':').next().unwrap_or(t))
            .unwrap_or("")
    }

    pub fn kind(mut self, kind: ElementKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Opt into pointer hit-testing.
    pub fn listen(mut self, listening: bool) -> Self {
        self.listening = listening;
        self
    }

    /// Add inline declarations (`key: value; ...`). Later calls win.
    pub fn style(mut self, declarations: &str) -> Self {
        let style = style_from_declarations(&parse_declarations(declarations), "inline");
        self.inline.merge_from(&style, MergePass::Cascade);
        self
    }

    /// Pin the element to a pixel box relative to its parent.
    pub fn at(mut self, left: f32, top: f32, width: f32, height: f32) -> Self {
        self.inline.left.set(Scalar::px(left));
        self.inline.top.set(Scalar::px(top));
        self.inline.width.set(Scalar::px(width));
        self.inline.height.set(Scalar::px(height));
        self
    }

    /// Record an extra attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Turn the spec into an element with the given cascaded styles.
    pub(crate) fn into_element(self, styles: StateStyles) -> Element {
        let identity = self.identity().to_owned();
        Element {
            identity,
            tokens: self.tokens,
            kind: self.kind,
            text: self.text,
            attributes: self.attributes,
            styles,
            state: InteractionState::Normal,
            region: Region::EMPTY,
            listening: self.listening,
            rect: None,
            caption: None,
        }
    }
}
