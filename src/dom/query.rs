//! Element queries: by identity, by selector token, by predicate.

use super::node::{Element, ElementId};
use super::tree::ElementTree;
use crate::css::model::Selector;

impl ElementTree {
    /// Find the first-created element with the given identity.
    ///
    /// Identities are not required to be unique; see [`find_all_by_id`](Self::find_all_by_id).
    pub fn find_by_id(&self, identity: &str) -> Option<ElementId> {
        self.ids_with_identity(identity).first().copied()
    }

    /// All elements with the given identity, in creation order.
    pub fn find_all_by_id(&self, identity: &str) -> Vec<ElementId> {
        self.ids_with_identity(identity).to_vec()
    }

    /// Find all elements carrying a selector token, in tree order.
    ///
    /// Tokens compare by registry key, so `.btn` and `btn` are equivalent.
    pub fn find_by_token(&self, token: &str) -> Vec<ElementId> {
        let key = Selector::parse(token).key();
        self.query_all(|el| el.tokens.iter().any(|t| Selector::parse(t).key() == key))
    }

    /// Find all elements matching an arbitrary predicate, in tree order.
    pub fn query_all(&self, predicate: impl Fn(&Element) -> bool) -> Vec<ElementId> {
        self.walk()
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(&predicate))
            .collect()
    }
}
