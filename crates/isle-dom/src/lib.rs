//! Element tree snapshot for the Isle selection engine.
//!
//! This crate provides an arena-based tree of labelled elements: each element
//! carries a tag name, its class tokens, and the length declarations the
//! geometry pass needs. The engine only ever borrows a tree; it never mutates
//! one.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Parent
//! links are plain indices, so a node never owns its parent.
//!
//! # Caller contract
//!
//! A tree is a stable snapshot. Hosts that mirror a live document must take a
//! fresh snapshot rather than mutate one while a computation is running.

pub mod snapshot;
pub mod style;

use serde::Serialize;

pub use snapshot::{DocumentSnapshot, ElementSnapshot, SnapshotError};
pub use style::{LengthProperty, LengthStyle};

/// A type-safe index into the element tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A node in the arena.
///
/// Stores indices for parent/child relationships, enabling O(1) traversal
/// in either direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// What this node is.
    pub node_type: NodeType,

    /// The parent node, or `None` for the document node and detached nodes.
    pub parent: Option<NodeId>,

    /// Children in document order.
    pub children: Vec<NodeId>,
}

/// The kind of a node.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// The document node. Carries no labels and no geometry.
    Document,
    /// A labelled element.
    Element(ElementData),
}

/// Element-specific data.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// The element's tag name, as supplied by the host.
    pub tag_name: String,
    /// Class tokens in declaration order, as supplied by the host.
    pub classes: Vec<String>,
    /// Declared length values.
    pub style: LengthStyle,
}

impl ElementData {
    /// Create an element with no classes and no declared lengths.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            ..Self::default()
        }
    }

    /// Set the class tokens.
    #[must_use]
    pub fn with_classes(mut self, classes: &[&str]) -> Self {
        self.classes = classes.iter().map(ToString::to_string).collect();
        self
    }

    /// Set the declared lengths.
    #[must_use]
    pub fn with_style(mut self, style: LengthStyle) -> Self {
        self.style = style;
        self
    }

    /// Lower-cased, trimmed tag name.
    #[must_use]
    pub fn tag_label(&self) -> String {
        self.tag_name.trim().to_ascii_lowercase()
    }

    /// Lower-cased, trimmed, non-empty class tokens, duplicates removed.
    ///
    /// Hosts sometimes hand over a whole `class` attribute as one token, so
    /// tokens are also split on whitespace here.
    #[must_use]
    pub fn class_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for token in self.classes.iter().flat_map(|c| c.split_whitespace()) {
            let label = token.to_ascii_lowercase();
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }

    /// Whether `label` equals the tag label or one of the class labels.
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.tag_label() == label || self.class_labels().iter().any(|c| c == label)
    }

    /// The element's compound label: `tag.class1.class2`, lower-cased.
    #[must_use]
    pub fn compound_label(&self) -> String {
        let mut label = self.tag_label();
        for class in self.class_labels() {
            label.push('.');
            label.push_str(&class);
        }
        label
    }
}

/// Arena-based element tree with O(1) node access and traversal.
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. This provides:
/// - O(1) access to any node by `NodeId`
/// - O(1) parent traversal
/// - No borrowing issues (indices instead of references)
#[derive(Debug, Clone)]
pub struct ElementTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl ElementTree {
    /// Create a new tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![document],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree, including the Document node.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new element and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, data: ElementData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type: NodeType::Element(data),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// Ids that are not in this tree, children that already have a parent,
    /// and appends that would create a cycle are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent.0 >= self.nodes.len()
            || child.0 >= self.nodes.len()
            || child == NodeId::ROOT
            || self.nodes[child.0].parent.is_some()
            || parent == child
            || self.is_descendant_of(parent, child)
        {
            return;
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Allocate an element and append it to `parent` in one step.
    pub fn append_element(&mut self, parent: NodeId, data: ElementData) -> NodeId {
        let id = self.alloc(data);
        self.append_child(parent, id);
        id
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get the parent of a node if that parent is an element.
    #[must_use]
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&p| self.as_element(p).is_some())
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Document => None,
        })
    }

    /// The first element child of the document node (`<html>` in practice).
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// The first `<body>` child of the document element, if any.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;

        self.children(html)
            .iter()
            .find(|&&id| self.as_element(id).is_some_and(|e| e.tag_label() == "body"))
            .copied()
    }

    /// Whether `id` is the document node, the document element or the body.
    ///
    /// Percentages on children of these nodes resolve against the viewport.
    #[must_use]
    pub fn is_root_or_body(&self, id: NodeId) -> bool {
        if id == NodeId::ROOT {
            return true;
        }
        self.as_element(id)
            .is_some_and(|e| matches!(e.tag_label().as_str(), "html" | "body"))
    }

    /// All element nodes reachable from the document node, in document
    /// (pre-)order.
    #[must_use]
    pub fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(NodeId::ROOT).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.as_element(id).is_some() {
                out.push(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a ElementTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
