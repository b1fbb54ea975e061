//! Style struct with explicitly-set typed properties.
//!
//! This is the central style representation. Every property is a [`Prop<T>`]:
//! a value plus a "set" flag. Unset properties keep their default value and are
//! inert when merged, so a cascade layer can only ever add information.

use std::fmt;

use crate::css::scalar::{Axis, Scalar};

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

/// An 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Create a colour from four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGBA({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// What fills an element's box.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Background {
    #[default]
    Transparent,
    /// A solid colour.
    Colour(Color),
    /// A sprite name in the imported atlas.
    Sprite(String),
}

/// Which of the three per-element styles is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    #[default]
    Normal,
    Hover,
    Active,
}

// ---------------------------------------------------------------------------
// Prop
// ---------------------------------------------------------------------------

/// A property value with an explicit "was this set" flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Prop<T> {
    value: T,
    set: bool,
}

impl<T: Clone> Prop<T> {
    /// An unset property holding its default.
    pub const fn unset(default: T) -> Self {
        Self {
            value: default,
            set: false,
        }
    }

    /// A property explicitly set to `value`.
    pub const fn new(value: T) -> Self {
        Self { value, set: true }
    }

    /// The current value (the default if unset).
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Whether a layer explicitly set this property.
    pub fn is_set(&self) -> bool {
        self.set
    }

    /// Explicitly set the value.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.set = true;
    }

    /// The value only if it was set.
    pub fn as_option(&self) -> Option<&T> {
        self.set.then_some(&self.value)
    }

    /// Copy `source` over `self` if and only if `source` is set.
    pub fn merge_from(&mut self, source: &Prop<T>) {
        if source.set {
            self.value = source.value.clone();
            self.set = true;
        }
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Which kind of merge is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePass {
    /// Parent-to-child inheritance: geometry is skipped.
    Inherit,
    /// A selector, inline or state layer: everything set is copied.
    Cascade,
}

/// All properties of one element in one interaction state.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    // Geometry
    pub left: Prop<Scalar>,
    pub top: Prop<Scalar>,
    pub width: Prop<Scalar>,
    pub height: Prop<Scalar>,

    // Text
    pub text_align: Prop<HorizontalAlign>,
    pub vertical_align: Prop<VerticalAlign>,
    pub colour: Prop<Color>,
    pub font: Prop<u32>,

    // Box
    pub background: Prop<Background>,
    pub border_width: Prop<f32>,
    pub border_top: Prop<Color>,
    pub border_right: Prop<Color>,
    pub border_bottom: Prop<Color>,
    pub border_left: Prop<Color>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            left: Prop::unset(Scalar::px(0.0)),
            top: Prop::unset(Scalar::px(0.0)),
            width: Prop::unset(Scalar::fraction(1.0)),
            height: Prop::unset(Scalar::fraction(1.0)),
            text_align: Prop::unset(HorizontalAlign::Left),
            vertical_align: Prop::unset(VerticalAlign::Top),
            colour: Prop::unset(Color::WHITE),
            font: Prop::unset(0),
            background: Prop::unset(Background::Transparent),
            border_width: Prop::unset(0.0),
            border_top: Prop::unset(Color::BLACK),
            border_right: Prop::unset(Color::BLACK),
            border_bottom: Prop::unset(Color::BLACK),
            border_left: Prop::unset(Color::BLACK),
        }
    }
}

impl Style {
    /// Create a style with every property unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `source` on top of `self`. Only properties set in `source` are
    /// copied; [`MergePass::Inherit`] additionally leaves geometry untouched.
    pub fn merge_from(&mut self, source: &Style, pass: MergePass) {
        if pass == MergePass::Cascade {
            self.left.merge_from(&source.left);
            self.top.merge_from(&source.top);
            self.width.merge_from(&source.width);
            self.height.merge_from(&source.height);
        }

        self.text_align.merge_from(&source.text_align);
        self.vertical_align.merge_from(&source.vertical_align);
        self.colour.merge_from(&source.colour);
        self.font.merge_from(&source.font);

        self.background.merge_from(&source.background);
        self.border_width.merge_from(&source.border_width);
        self.border_top.merge_from(&source.border_top);
        self.border_right.merge_from(&source.border_right);
        self.border_bottom.merge_from(&source.border_bottom);
        self.border_left.merge_from(&source.border_left);
    }

    /// Returns `true` if no property is set.
    pub fn is_empty(&self) -> bool {
        !(self.left.is_set()
            || self.top.is_set()
            || self.width.is_set()
            || self.height.is_set()
            || self.text_align.is_set()
            || self.vertical_align.is_set()
            || self.colour.is_set()
            || self.font.is_set()
            || self.background.is_set()
            || self.border_width.is_set()
            || self.border_top.is_set()
            || self.border_right.is_set()
            || self.border_bottom.is_set()
            || self.border_left.is_set())
    }

    /// Border colours in top, right, bottom, left order.
    pub fn border_colours(&self) -> [Color; 4] {
        [
            *self.border_top.get(),
            *self.border_right.get(),
            *self.border_bottom.get(),
            *self.border_left.get(),
        ]
    }

    /// Whether this style needs a box primitive on the canvas.
    pub fn needs_box(&self) -> bool {
        *self.background.get() != Background::Transparent || *self.border_width.get() > 0.0
    }

    /// Serialize the set properties as stylesheet declarations, one per line.
    ///
    /// Parsing the output back yields the same set properties.
    pub fn to_css(&self) -> String {
        let mut out = Vec::new();

        if let Some(v) = self.left.as_option() {
            out.push(format!("left: {};", v.to_css(Axis::Horizontal)));
        }
        if let Some(v) = self.top.as_option() {
            out.push(format!("top: {};", v.to_css(Axis::Vertical)));
        }
        if let Some(v) = self.width.as_option() {
            out.push(format!("width: {};", v.to_css(Axis::Horizontal)));
        }
        if let Some(v) = self.height.as_option() {
            out.push(format!("height: {};", v.to_css(Axis::Vertical)));
        }
        if let Some(v) = self.text_align.as_option() {
            let name = match v {
                HorizontalAlign::Left => "left",
                HorizontalAlign::Center => "center",
                HorizontalAlign::Right => "right",
            };
            out.push(format!("text-align: {name};"));
        }
        if let Some(v) = self.vertical_align.as_option() {
            let name = match v {
                VerticalAlign::Top => "top",
                VerticalAlign::Middle => "middle",
                VerticalAlign::Bottom => "bottom",
            };
            out.push(format!("vertical-align: {name};"));
        }
        if let Some(v) = self.colour.as_option() {
            out.push(format!("colour: {v};"));
        }
        if let Some(v) = self.font.as_option() {
            out.push(format!("font: {v};"));
        }
        match self.background.as_option() {
            Some(Background::Transparent) => out.push("background: transparent;".to_owned()),
            Some(Background::Colour(c)) => out.push(format!("background-colour: {c};")),
            Some(Background::Sprite(name)) => out.push(format!("background-image: \"{name}\";")),
            None => {}
        }
        if let Some(v) = self.border_width.as_option() {
            out.push(format!("border-width: {v};"));
        }
        for (key, prop) in [
            ("border-top", &self.border_top),
            ("border-right", &self.border_right),
            ("border-bottom", &self.border_bottom),
            ("border-left", &self.border_left),
        ] {
            if let Some(c) = prop.as_option() {
                out.push(format!("{key}: {c};"));
            }
        }

        out.join("\n")
    }
}

/// Merge `source` into `destination`; see [`Style::merge_from`].
pub fn merge(source: &Style, destination: &mut Style, ancestor_pass: bool) {
    let pass = if ancestor_pass {
        MergePass::Inherit
    } else {
        MergePass::Cascade
    };
    destination.merge_from(source, pass);
}

/// The three fully-resolved styles of an element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateStyles {
    pub normal: Style,
    pub hover: Style,
    pub active: Style,
}

impl StateStyles {
    /// The style for the given interaction state.
    pub fn get(&self, state: InteractionState) -> &Style {
        match state {
            InteractionState::Normal => &self.normal,
            InteractionState::Hover => &self.hover,
            InteractionState::Active => &self.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Style {
        let mut s = Style::new();
        s.left.set(Scalar::px(10.0));
        s.width.set(Scalar::percent(50.0));
        s.colour.set(Color::rgb(1, 2, 3));
        s.font.set(9);
        s
    }

    #[test]
    fn new_is_empty() {
        assert!(Style::new().is_empty());
        assert!(!sample().is_empty());
    }

    #[test]
    fn unset_prop_keeps_default() {
        let p: Prop<u32> = Prop::unset(14);
        assert!(!p.is_set());
        assert_eq!(*p.get(), 14);
        assert_eq!(p.as_option(), None);
    }

    #[test]
    fn merge_copies_only_set_properties() {
        let mut dest = Style::new();
        dest.font.set(3);
        dest.background.set(Background::Colour(Color::BLACK));

        let mut src = Style::new();
        src.font.set(9);

        dest.merge_from(&src, MergePass::Cascade);
        assert_eq!(*dest.font.get(), 9);
        assert_eq!(*dest.background.get(), Background::Colour(Color::BLACK));
        assert!(dest.background.is_set());
    }

    #[test]
    fn merge_never_clears() {
        let mut dest = sample();
        let before = dest.clone();
        dest.merge_from(&Style::new(), MergePass::Cascade);
        assert_eq!(dest, before);
    }

    #[test]
    fn merge_is_idempotent() {
        let src = sample();
        let mut once = Style::new();
        once.border_width.set(2.0);
        let mut twice = once.clone();

        once.merge_from(&src, MergePass::Cascade);
        twice.merge_from(&src, MergePass::Cascade);
        twice.merge_from(&src, MergePass::Cascade);
        assert_eq!(once, twice);
    }

    #[test]
    fn inherit_pass_skips_geometry() {
        let mut dest = Style::new();
        dest.left.set(Scalar::px(1.0));

        let mut src = sample();
        src.top.set(Scalar::center());
        src.height.set(Scalar::px(7.0));

        dest.merge_from(&src, MergePass::Inherit);
        assert_eq!(*dest.left.get(), Scalar::px(1.0));
        assert!(!dest.top.is_set());
        assert!(!dest.width.is_set());
        assert!(!dest.height.is_set());
        assert_eq!(*dest.colour.get(), Color::rgb(1, 2, 3));
        assert_eq!(*dest.font.get(), 9);
    }

    #[test]
    fn free_merge_matches_method() {
        let src = sample();
        let mut a = Style::new();
        let mut b = Style::new();
        merge(&src, &mut a, true);
        b.merge_from(&src, MergePass::Inherit);
        assert_eq!(a, b);
    }

    #[test]
    fn needs_box() {
        let mut s = Style::new();
        assert!(!s.needs_box());
        s.border_width.set(1.0);
        assert!(s.needs_box());
        let mut s = Style::new();
        s.background.set(Background::Sprite("panel".into()));
        assert!(s.needs_box());
    }

    #[test]
    fn to_css_lists_only_set_properties() {
        let mut s = sample();
        s.top.set(Scalar::far());
        s.background.set(Background::Colour(Color::rgba(128, 70, 27, 255)));
        assert_eq!(
            s.to_css(),
            "left: 10px;\ntop: bottom;\nwidth: 50%;\ncolour: RGBA(1,2,3,255);\nfont: 9;\nbackground-colour: RGBA(128,70,27,255);"
        );
        assert_eq!(Style::new().to_css(), "");
    }

    #[test]
    fn state_styles_get() {
        let mut styles = StateStyles::default();
        styles.hover.font.set(1);
        styles.active.font.set(2);
        assert_eq!(*styles.get(InteractionState::Normal).font.get(), 0);
        assert_eq!(*styles.get(InteractionState::Hover).font.get(), 1);
        assert_eq!(*styles.get(InteractionState::Active).font.get(), 2);
    }

    #[test]
    fn colour_display() {
        assert_eq!(Color::rgb(128, 70, 27).to_string(), "RGBA(128,70,27,255)");
    }
}
