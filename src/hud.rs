//! Tree controller: the `Hud` struct and its configuration.
//!
//! [`Hud`] owns the style registry, the element forest, the layout engine and
//! the hit tester, plus the three collaborators injected at construction: a
//! [`Canvas`] for paint primitives, a [`ResourceProvider`] for stylesheet and
//! markup text, and an [`EventSink`] for interaction callbacks.

use crate::css::parser::StyleSheetParser;
use crate::css::model::StyleSheet;
use crate::css::stylesheet::{CascadeScope, StyleRegistry};
use crate::dom::node::{Element, ElementId, ElementSpec};
use crate::dom::tree::ElementTree;
use crate::event::handler::{HitOutcome, HitTester};
use crate::event::input::PointerEvent;
use crate::event::sink::{EventSink, dispatch};
use crate::geometry::Size;
use crate::layout::engine::LayoutEngine;
use crate::markup::{MarkupDocument, MarkupParser};
use crate::render::canvas::Canvas;
use crate::resource::{LoadError, ResourceAddress, ResourceProvider, read_all};

// ---------------------------------------------------------------------------
// HudConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`Hud`].
#[derive(Debug, Clone, PartialEq)]
pub struct HudConfig {
    /// Box the root elements are laid out in.
    pub viewport: Size,
    /// Resource group for addresses that do not name one.
    pub default_group: String,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(1024.0, 768.0),
            default_group: "General".to_owned(),
        }
    }
}

impl HudConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport (builder).
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    /// Set the default resource group (builder).
    pub fn with_default_group(mut self, group: impl Into<String>) -> Self {
        self.default_group = group.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Hud
// ---------------------------------------------------------------------------

/// Owns styles, elements and interaction state for one overlay.
pub struct Hud<C: Canvas, R: ResourceProvider, S: EventSink = ()> {
    config: HudConfig,
    registry: StyleRegistry,
    atlas: Option<String>,
    tree: ElementTree,
    engine: LayoutEngine,
    hits: HitTester,
    canvas: C,
    resources: R,
    sink: S,
}

impl<C: Canvas, R: ResourceProvider, S: EventSink> Hud<C, R, S> {
    /// Create an empty hud around its collaborators.
    pub fn new(config: HudConfig, canvas: C, resources: R, sink: S) -> Self {
        Self {
            engine: LayoutEngine::new(config.viewport),
            config,
            registry: StyleRegistry::new(),
            atlas: None,
            tree: ElementTree::new(),
            hits: HitTester::new(),
            canvas,
            resources,
            sink,
        }
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Load a stylesheet from a `path` or `group:path` address.
    pub fn load_css(&mut self, address: &str) -> Result<(), LoadError> {
        let lines = self.read_resource(address)?;
        let mut parser = StyleSheetParser::new();
        for line in &lines {
            parser.feed_line(line);
        }
        self.apply_stylesheet(address, parser.finish());
        Ok(())
    }

    /// Load a stylesheet from text.
    pub fn load_css_str(&mut self, css: &str) {
        self.apply_stylesheet("<inline>", crate::css::parser::parse_stylesheet(css));
    }

    /// Load a markup document from a `path` or `group:path` address. Returns
    /// the created elements in document order.
    pub fn load_markup(&mut self, address: &str) -> Result<Vec<ElementId>, LoadError> {
        let lines = self.read_resource(address)?;
        let mut parser = MarkupParser::new();
        for line in &lines {
            parser.feed_line(line);
        }
        Ok(self.build_document(address, parser.finish()))
    }

    /// Load a markup document from text.
    pub fn load_markup_str(&mut self, markup: &str) -> Vec<ElementId> {
        self.build_document("<inline>", crate::markup::parse_markup(markup))
    }

    fn read_resource(&self, address: &str) -> Result<Vec<String>, LoadError> {
        let address = ResourceAddress::parse(address);
        let group = address.group_or(&self.config.default_group);
        let mut stream = self.resources.open(&address.path, group)?;
        read_all(stream.as_mut(), &address.path)
    }

    fn apply_stylesheet(&mut self, source: &str, sheet: StyleSheet) {
        if !self.tree.is_empty() {
            tracing::warn!(
                source,
                elements = self.tree.len(),
                "stylesheet loaded after elements exist; existing elements keep their styles"
            );
        }
        self.registry.extend(&sheet);
        if sheet.atlas.is_some() {
            self.atlas = sheet.atlas;
        }
        tracing::info!(
            source,
            rules = sheet.rules.len(),
            skipped = sheet.diagnostics.len(),
            "stylesheet loaded"
        );
    }

    fn build_document(&mut self, source: &str, document: MarkupDocument) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = Vec::with_capacity(document.nodes.len());
        for node in &document.nodes {
            let parent = node.parent.and_then(|index| ids.get(index).copied());
            let id = self.create_element(parent, node.line.to_spec());
            ids.push(id);
        }
        tracing::info!(
            source,
            elements = ids.len(),
            skipped = document.diagnostics.len(),
            "markup loaded"
        );
        ids
    }

    // ── Elements ────────────────────────────────────────────────────

    /// Create an element under `parent` (or as a root), resolve its styles
    /// and lay it out.
    pub fn create_element(&mut self, parent: Option<ElementId>, spec: ElementSpec) -> ElementId {
        let parent = match parent {
            Some(p) if !self.tree.contains(p) => {
                tracing::warn!(?p, "unknown parent; creating a root element");
                None
            }
            other => other,
        };

        let styles = {
            let parent_element = parent.and_then(|p| self.tree.get(p));
            self.registry.resolve(&CascadeScope {
                id: spec.identity(),
                tokens: &spec.tokens,
                inline: &spec.inline,
                parent_style: parent_element.map(|p| &p.styles.normal),
                parent_id: parent_element.map(|p| p.identity.as_str()),
            })
        };

        let id = self.tree.insert(parent, spec.into_element(styles));
        if self.tree.get(id).is_some_and(|el| el.listening) {
            self.hits.listen(id);
        }
        self.engine.layout(&mut self.tree, &mut self.canvas, id);
        id
    }

    /// Replace an element's text and re-lay out its subtree. Returns `false`
    /// if the element does not exist.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> bool {
        let Some(element) = self.tree.get_mut(id) else {
            return false;
        };
        element.text = text.into();
        self.engine.layout(&mut self.tree, &mut self.canvas, id);
        true
    }

    /// Resize the viewport and re-lay out every root.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        let size = Size::new(width, height);
        self.config.viewport = size;
        self.engine.set_viewport(size);
        self.relayout();
    }

    /// Re-lay out the whole forest.
    pub fn relayout(&mut self) {
        self.engine.layout_all(&mut self.tree, &mut self.canvas);
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Route a pointer event through the hit tester, re-lay out every element
    /// whose state changed, then fire the resulting callback.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> HitOutcome {
        let outcome = self.hits.handle(&mut self.tree, &self.canvas, event);
        for &(id, _) in &outcome.changes {
            self.engine.layout(&mut self.tree, &mut self.canvas, id);
        }
        if let Some((callback, id)) = outcome.callback {
            if let Some(element) = self.tree.get(id) {
                dispatch(&mut self.sink, callback, id, element, event);
            }
        }
        outcome
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn config(&self) -> &HudConfig {
        &self.config
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.tree.get(id)
    }

    /// First element created with this identity.
    pub fn find(&self, identity: &str) -> Option<ElementId> {
        self.tree.find_by_id(identity)
    }

    /// Sprite atlas named by the last `@import`.
    pub fn atlas(&self) -> Option<&str> {
        self.atlas.as_deref()
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    /// Listening elements in registration order.
    pub fn listeners(&self) -> &[ElementId] {
        self.hits.listeners()
    }

    /// The element currently in Hover or Active.
    pub fn tracked(&self) -> Option<ElementId> {
        self.hits.tracked()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn resources_mut(&mut self) -> &mut R {
        &mut self.resources
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::styles::{Background, Color, InteractionState};
    use crate::event::handler::Callback;
    use crate::event::input::Buttons;
    use crate::geometry::Region;
    use crate::resource::{MemoryResources, ResourceStream};
    use crate::testing::canvas::RecordingCanvas;
    use crate::testing::sink::RecordingSink;
    use pretty_assertions::assert_eq;

    type TestHud = Hud<RecordingCanvas, MemoryResources, RecordingSink>;

    fn hud(resources: MemoryResources) -> TestHud {
        Hud::new(
            HudConfig::new().with_viewport(400.0, 300.0),
            RecordingCanvas::new(),
            resources,
            RecordingSink::new(),
        )
    }

    // ── Config ──────────────────────────────────────────────────────

    #[test]
    fn config_defaults() {
        let config = HudConfig::default();
        assert_eq!(config.viewport, Size::new(1024.0, 768.0));
        assert_eq!(config.default_group, "General");
        let config = config.with_default_group("Popular");
        assert_eq!(config.default_group, "Popular");
    }

    // ── Loading ─────────────────────────────────────────────────────

    #[test]
    fn load_from_default_and_named_group() {
        let resources = MemoryResources::new()
            .with("General", "hud.mcss", "@import \"ui\"\nbtn { font: 9; }")
            .with("Popular", "hud.maml", "%button .btn (listen) = Okay");
        let mut hud = hud(resources);

        hud.load_css("hud.mcss").unwrap();
        assert_eq!(hud.atlas(), Some("ui"));
        assert_eq!(hud.registry().len(), 1);

        let ids = hud.load_markup("Popular:hud.maml").unwrap();
        assert_eq!(ids.len(), 1);
        let el = hud.element(ids[0]).unwrap();
        assert_eq!(*el.style().font.get(), 9);
        assert_eq!(hud.listeners(), &ids[..]);
    }

    #[test]
    fn missing_resource_is_an_error() {
        let mut hud = hud(MemoryResources::new());
        let err = hud.load_css("Nope:x.mcss").unwrap_err();
        assert!(matches!(err, LoadError::NotFound { ref group, ref name } if group == "Nope" && name == "x.mcss"));
        assert!(hud.load_markup("x.maml").is_err());
        assert!(hud.tree().is_empty());
    }

    struct BrokenStream;

    impl ResourceStream for BrokenStream {
        fn read_line(&mut self) -> std::io::Result<String> {
            Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"))
        }

        fn eof(&self) -> bool {
            false
        }
    }

    struct BrokenResources;

    impl ResourceProvider for BrokenResources {
        fn open(&self, _: &str, _: &str) -> Result<Box<dyn ResourceStream>, LoadError> {
            Ok(Box::new(BrokenStream))
        }
    }

    #[test]
    fn unreadable_stream_is_an_error() {
        let mut hud = Hud::new(HudConfig::new(), RecordingCanvas::new(), BrokenResources, ());
        let err = hud.load_css("ui.mcss").unwrap_err();
        assert!(matches!(err, LoadError::Unreadable { ref name, .. } if name == "ui.mcss"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(hud.registry().is_empty());
        assert!(matches!(hud.load_markup("ui.maml"), Err(LoadError::Unreadable { .. })));
        assert!(hud.tree().is_empty());
    }

    #[test]
    fn markup_builds_nested_tree() {
        let mut hud = hud(MemoryResources::new());
        let ids = hud.load_markup_str("#outer\n #inner = hi\n#other");
        assert_eq!(hud.tree().roots(), &[ids[0], ids[2]]);
        assert_eq!(hud.tree().parent(ids[1]), Some(ids[0]));
        assert_eq!(hud.find("inner"), Some(ids[1]));
        assert_eq!(hud.canvas().live_captions(), 1);
    }

    // ── Cascade through the controller ──────────────────────────────

    #[test]
    fn children_inherit_cosmetics_and_child_rule() {
        let mut hud = hud(MemoryResources::new());
        hud.load_css_str(
            "#panel { colour: RGBA(1,2,3,255); width: 200px; }\n#panel:child { font: 7; }",
        );
        let ids = hud.load_markup_str("#panel\n #label = x");
        let label = hud.element(ids[1]).unwrap();
        assert_eq!(*label.style().colour.get(), Color::rgba(1, 2, 3, 255));
        assert_eq!(*label.style().font.get(), 7);
        assert!(!label.style().width.is_set());
        assert_eq!(label.region.width, 200.0);
    }

    #[test]
    fn programmatic_element() {
        let mut hud = hud(MemoryResources::new());
        let root = hud.create_element(None, ElementSpec::new("#root").at(10.0, 20.0, 100.0, 50.0));
        let child = hud.create_element(
            Some(root),
            ElementSpec::new("#child").style("left: 50%; width: 10px; background: RGBA(9,9,9,255)"),
        );
        assert_eq!(hud.element(child).unwrap().region, Region::new(60.0, 20.0, 10.0, 50.0));
        assert_eq!(
            *hud.element(child).unwrap().style().background.get(),
            Background::Colour(Color::rgba(9, 9, 9, 255))
        );
        assert_eq!(hud.canvas().live_rectangles(), 1);
    }

    #[test]
    fn set_text_creates_and_destroys_caption() {
        let mut hud = hud(MemoryResources::new());
        let id = hud.create_element(None, ElementSpec::new("#t"));
        assert_eq!(hud.canvas().live_captions(), 0);
        assert!(hud.set_text(id, "hello"));
        assert_eq!(hud.canvas().live_captions(), 1);
        assert!(hud.set_text(id, ""));
        assert_eq!(hud.canvas().live_captions(), 0);
    }

    #[test]
    fn viewport_resize_relayouts_roots() {
        let mut hud = hud(MemoryResources::new());
        let id = hud.create_element(None, ElementSpec::new("#full"));
        assert_eq!(hud.element(id).unwrap().region, Region::new(0.0, 0.0, 400.0, 300.0));
        hud.set_viewport(800.0, 600.0);
        assert_eq!(hud.element(id).unwrap().region, Region::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(hud.config().viewport, Size::new(800.0, 600.0));
    }

    // ── Input ───────────────────────────────────────────────────────

    #[test]
    fn press_activates_and_restyles() {
        let mut hud = hud(MemoryResources::new());
        hud.load_css_str("#ok { font: 1; }\n#ok:active { font: 2; }");
        let id = hud.create_element(
            None,
            ElementSpec::new("#ok").listen(true).text("Ok").at(0.0, 0.0, 50.0, 20.0),
        );

        let outcome = hud.handle_pointer(&PointerEvent::pressed(10.0, 10.0));
        assert_eq!(outcome.callback, Some((Callback::Activated, id)));
        let el = hud.element(id).unwrap();
        assert_eq!(el.state, InteractionState::Active);
        let caption = el.caption().unwrap();
        assert_eq!(hud.canvas().caption(caption).unwrap().font, 2);
        assert_eq!(hud.sink().count(Callback::Activated), 1);
        assert_eq!(hud.sink().count(Callback::Blurred), 0);
        assert_eq!(hud.tracked(), Some(id));
    }

    #[test]
    fn leaving_blurs() {
        let mut hud = hud(MemoryResources::new());
        let id = hud.create_element(None, ElementSpec::new("#ok").listen(true).at(0.0, 0.0, 50.0, 20.0));
        hud.handle_pointer(&PointerEvent::moved(5.0, 5.0, Buttons::NONE));
        hud.handle_pointer(&PointerEvent::moved(200.0, 200.0, Buttons::NONE));

        let events = hud.sink_mut().take();
        let kinds: Vec<_> = events.iter().map(|e| e.callback).collect();
        assert_eq!(kinds, vec![Callback::Focused, Callback::Blurred]);
        assert_eq!(hud.element(id).unwrap().state, InteractionState::Normal);
        assert_eq!(hud.tracked(), None);
    }
}
