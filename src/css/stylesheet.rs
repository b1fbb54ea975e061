//! Style registry and cascade resolution.
//!
//! Parsed [`StyleSheet`]s are compiled into a [`StyleRegistry`] keyed by the
//! exact selector string. Elements resolve their three state styles against
//! the registry once, at creation time, via [`StyleRegistry::resolve`].

use std::collections::HashMap;

use crate::css::model::{Declaration, Pseudo, Selector, StyleSheet};
use crate::css::properties::apply_declaration;
use crate::css::styles::{MergePass, StateStyles, Style};

/// Build a style from declarations, dropping the ones that fail to apply.
pub fn style_from_declarations(declarations: &[Declaration], context: &str) -> Style {
    let mut style = Style::new();
    for decl in declarations {
        if let Err(err) = apply_declaration(&mut style, &decl.property, &decl.value) {
            tracing::warn!(selector = context, error = %err, "dropping declaration");
        }
    }
    style
}

/// Named style rules, populated from one or more stylesheets.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    rules: HashMap<String, Style>,
}

impl StyleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every block of `sheet` into the registry.
    ///
    /// A selector that is already registered (from this or an earlier sheet)
    /// has the new block merged on top of the existing rule.
    pub fn extend(&mut self, sheet: &StyleSheet) {
        for rule in &sheet.rules {
            let key = rule.selector.key();
            let style = style_from_declarations(&rule.declarations, &key);
            self.rules
                .entry(key)
                .or_default()
                .merge_from(&style, MergePass::Cascade);
        }
    }

    /// Look up a rule by selector.
    pub fn get(&self, selector: &Selector) -> Option<&Style> {
        self.rules.get(&selector.key())
    }

    /// Number of registered selectors.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Merge an element's selector token into `style`. A miss is logged.
    fn merge_token(&self, style: &mut Style, token: &str) {
        let selector = Selector::parse(token);
        match self.get(&selector) {
            Some(rule) => style.merge_from(rule, MergePass::Cascade),
            None => tracing::warn!(selector = %selector, "unknown selector"),
        }
    }

    /// Merge a synthetic `#id:pseudo` rule into `style` if registered.
    fn merge_pseudo(&self, style: &mut Style, id: &str, pseudo: Pseudo) {
        if id.is_empty() {
            return;
        }
        let selector = Selector::pseudo(id, pseudo);
        match self.get(&selector) {
            Some(rule) => style.merge_from(rule, MergePass::Cascade),
            None => tracing::debug!(selector = %selector, "no pseudo rule"),
        }
    }

    /// Resolve the Normal, Hover and Active styles of one element.
    ///
    /// Layers, each overriding the previous on properties it sets:
    ///
    /// 1. the parent's resolved Normal style, geometry excluded
    /// 2. each selector token, in order
    /// 3. the parent's `#<parent>:child` rule
    /// 4. the inline style
    ///
    /// Hover and Active then copy Normal and merge `#<id>:hover` and
    /// `#<id>:active` respectively.
    pub fn resolve(&self, scope: &CascadeScope<'_>) -> StateStyles {
        let mut normal = Style::new();

        if let Some(parent) = scope.parent_style {
            normal.merge_from(parent, MergePass::Inherit);
        }
        for token in scope.tokens {
            self.merge_token(&mut normal, token);
        }
        if let Some(parent_id) = scope.parent_id {
            self.merge_pseudo(&mut normal, parent_id, Pseudo::Child);
        }
        normal.merge_from(scope.inline, MergePass::Cascade);

        let mut hover = normal.clone();
        self.merge_pseudo(&mut hover, scope.id, Pseudo::Hover);
        let mut active = normal.clone();
        self.merge_pseudo(&mut active, scope.id, Pseudo::Active);

        StateStyles {
            normal,
            hover,
            active,
        }
    }
}

/// Everything the cascade needs to know about one element.
#[derive(Debug, Clone, Copy)]
pub struct CascadeScope<'a> {
    /// The element's own identity (may be empty).
    pub id: &'a str,
    /// Selector tokens in declared order.
    pub tokens: &'a [String],
    /// The inline `style="..."` layer.
    pub inline: &'a Style,
    /// The parent's resolved Normal style, for non-root elements.
    pub parent_style: Option<&'a Style>,
    /// The parent's identity, for non-root elements.
    pub parent_id: Option<&'a str>,
}
