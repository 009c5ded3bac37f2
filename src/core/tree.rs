//! core::tree
//!
//! The namespace tree backing a registry.
//!
//! # Structure
//!
//! A [`Node`] maps segment keys to exactly one [`Child`], which is either a
//! nested `Node` or a terminal [`Item`]. Children keep insertion order so
//! listings are stable. Lookups by key are O(1).
//!
//! The tree itself enforces nothing about what may replace what;
//! `set_child` is last-write-wins. Structural rules (no leaf over a
//! subtree, no subtree under a leaf) belong to the registry.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use super::metadata::MetaData;
use crate::resolve::{self, ResolveError, ResolvedValue, TypeCatalog};

/// A terminal entry: a raw value and its metadata.
///
/// Raw values are stored exactly as registered. Whether they fit their
/// type tag is only checked when [`Item::resolve`] runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    value: Value,
    metadata: MetaData,
}

impl Item {
    pub fn new(value: Value, metadata: MetaData) -> Self {
        Self { value, metadata }
    }

    /// The raw, unresolved value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn metadata(&self) -> &MetaData {
        &self.metadata
    }

    /// Resolve the raw value according to the type tag.
    ///
    /// Never mutates the item; calling it twice yields equal results for
    /// every deterministic type.
    pub fn resolve(&self, types: &TypeCatalog) -> Result<ResolvedValue, ResolveError> {
        resolve::resolve(&self.value, self.metadata.type_tag(), types)
    }
}

/// Either a nested node or a leaf item.
#[derive(Debug)]
pub enum Child {
    Node(Node),
    Item(Item),
}

impl Child {
    pub fn is_node(&self) -> bool {
        matches!(self, Child::Node(_))
    }

    pub fn is_item(&self) -> bool {
        matches!(self, Child::Item(_))
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Child::Node(node) => Some(node),
            Child::Item(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Child::Item(item) => Some(item),
            Child::Node(_) => None,
        }
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<Item> for Child {
    fn from(item: Item) -> Self {
        Child::Item(item)
    }
}

/// An intermediate namespace entry.
///
/// Dropping and formatting a node never recurse per level, so trees of any
/// depth can be freed and logged.
#[derive(Default)]
pub struct Node {
    children: HashMap<String, Child>,
    order: Vec<String>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a child. An overwritten key keeps its position.
    pub fn set_child(&mut self, key: impl Into<String>, child: impl Into<Child>) {
        let key = key.into();
        if self.children.insert(key.clone(), child.into()).is_none() {
            self.order.push(key);
        }
    }

    pub fn get_child(&self, key: &str) -> Option<&Child> {
        self.children.get(key)
    }

    pub fn get_child_mut(&mut self, key: &str) -> Option<&mut Child> {
        self.children.get_mut(key)
    }

    pub fn has_child(&self, key: &str) -> bool {
        self.children.contains_key(key)
    }

    /// Remove a child, returning it if it was present.
    pub fn remove_child(&mut self, key: &str) -> Option<Child> {
        let removed = self.children.remove(key)?;
        self.order.retain(|k| k != key);
        Some(removed)
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> Vec<(&str, &Child)> {
        self.order
            .iter()
            .filter_map(|key| self.children.get(key).map(|child| (key.as_str(), child)))
            .collect()
    }

    /// Direct child keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Walk `segments` from this node without creating anything.
    ///
    /// Returns `None` if a segment is missing or an item sits in the middle
    /// of the walk. An empty slice has no terminal child and yields `None`.
    pub fn descend(&self, segments: &[String]) -> Option<&Child> {
        let (last, parents) = segments.split_last()?;
        let mut current = self;
        for segment in parents {
            match current.get_child(segment)? {
                Child::Node(node) => current = node,
                Child::Item(_) => return None,
            }
        }
        current.get_child(last)
    }

    /// Mutable variant of [`Node::descend`] returning the node that holds
    /// the terminal key, for removal.
    pub fn descend_parent_mut(&mut self, segments: &[String]) -> Option<&mut Node> {
        let mut current = self;
        for segment in segments {
            current = match current.get_child_mut(segment)? {
                Child::Node(node) => node,
                Child::Item(_) => return None,
            };
        }
        Some(current)
    }

    /// All leaves below this node as `(dotted path, item)` pairs.
    ///
    /// Depth-first, children in insertion order. Iterative, so deep trees
    /// do not grow the call stack.
    pub fn leaves(&self) -> Vec<(String, &Item)> {
        let mut out = Vec::new();
        // One frame per open node: the key leading to it and its unvisited children.
        let mut stack = vec![("", self.children().into_iter())];

        loop {
            let next = match stack.last_mut() {
                None => break,
                Some((_, siblings)) => siblings.next(),
            };
            match next {
                None => {
                    stack.pop();
                }
                Some((key, Child::Item(item))) => {
                    let path = stack
                        .iter()
                        .skip(1)
                        .map(|(segment, _)| *segment)
                        .chain(std::iter::once(key))
                        .collect::<Vec<_>>()
                        .join(".");
                    out.push((path, item));
                }
                Some((key, Child::Node(inner))) => {
                    stack.push((key, inner.children().into_iter()));
                }
            }
        }

        out
    }

    /// Move every direct child node into `pending`, dropping items in place.
    fn drain_nodes_into(&mut self, pending: &mut Vec<Node>) {
        self.order.clear();
        for (_, child) in self.children.drain() {
            if let Child::Node(node) = child {
                pending.push(node);
            }
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.drain_nodes_into(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.drain_nodes_into(&mut pending);
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node").field("keys", &self.order).finish()
    }
}
