//! Tree operations: insert, walk, parent/children lookup.

use std::collections::HashMap;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{Element, ElementId};

/// Empty slice constant for returning when an element has no children.
const EMPTY_CHILDREN: &[ElementId] = &[];

/// The element forest, backed by a slotmap arena.
///
/// All elements live in a single `SlotMap`. Parent/child relationships are
/// stored in secondary maps; the parent link is a plain handle used for
/// lookup only. Elements are never removed or re-parented.
#[derive(Debug)]
pub struct ElementTree {
    pub(crate) nodes: SlotMap<ElementId, Element>,
    children: SecondaryMap<ElementId, Vec<ElementId>>,
    parent: SecondaryMap<ElementId, ElementId>,
    roots: Vec<ElementId>,
    by_identity: HashMap<String, Vec<ElementId>>,
}

impl ElementTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            roots: Vec::new(),
            by_identity: HashMap::new(),
        }
    }

    /// Insert an element under `parent`, or as a new root when `parent` is
    /// `None` or no longer in the tree.
    pub fn insert(&mut self, parent: Option<ElementId>, element: Element) -> ElementId {
        let identity = element.identity.clone();
        let id = self.nodes.insert(element);
        self.children.insert(id, Vec::new());

        match parent.filter(|p| self.nodes.contains_key(*p)) {
            Some(p) => {
                self.parent.insert(id, p);
                if let Some(siblings) = self.children.get_mut(p) {
                    siblings.push(id);
                }
            }
            None => self.roots.push(id),
        }

        if !identity.is_empty() {
            self.by_identity.entry(identity).or_default().push(id);
        }
        id
    }

    /// Get the parent of an element, if it has one.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.parent.get(id).copied()
    }

    /// Get the children of an element in creation order. Returns an empty
    /// slice if the element has no children or does not exist.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Top-level elements in creation order.
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// Walk from `id` up to the root, collecting ancestor ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: ElementId) -> Vec<ElementId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Nesting depth; roots are at depth 0.
    pub fn depth(&self, id: ElementId) -> usize {
        self.ancestors(id).len()
    }

    /// Immutable access to an element.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id)
    }

    /// Mutable access to an element.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id)
    }

    /// Number of elements in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the tree contains an element with the given id.
    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: ElementId) -> Vec<ElementId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Pre-order traversal of the whole forest, roots in creation order.
    pub fn walk(&self) -> Vec<ElementId> {
        self.roots
            .iter()
            .flat_map(|&root| self.walk_depth_first(root))
            .collect()
    }

    pub(crate) fn ids_with_identity(&self, identity: &str) -> &[ElementId] {
        self.by_identity
            .get(identity)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}
