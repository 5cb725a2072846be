//! Selection results.
//!
//! Selectors live in an arena owned by the [`HtmlSelection`] and are
//! addressed by [`SelectorId`]; membership is a list of [`NodeId`]s into the
//! caller's tree. Nothing here borrows the tree, so a result outlives the
//! computation that produced it.

use std::collections::BTreeSet;

use isle_common::Diagnostic;
use isle_css::{BoxRect, Color};
use isle_dom::NodeId;
use serde::Serialize;

/// Stable index of a [`Selector`] within one computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SelectorId(pub usize);

/// One island: the elements that form it, the labels that found it, and
/// their bounding box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selector {
    id: SelectorId,
    elements: Vec<NodeId>,
    labels: Vec<String>,
    bounds: BoxRect,
}

impl Selector {
    /// Create a selector. Returns `None` for an empty element list; repeated
    /// elements keep their first position.
    #[must_use]
    pub fn new(id: SelectorId, elements: &[NodeId], label: &str, bounds: BoxRect) -> Option<Self> {
        let mut members: Vec<NodeId> = Vec::with_capacity(elements.len());
        for &node in elements {
            if !members.contains(&node) {
                members.push(node);
            }
        }
        if members.is_empty() {
            return None;
        }
        Some(Self {
            id,
            elements: members,
            labels: vec![label.to_string()],
            bounds,
        })
    }

    /// This selector's id.
    #[must_use]
    pub const fn id(&self) -> SelectorId {
        self.id
    }

    /// Member elements in discovery order.
    #[must_use]
    pub fn elements(&self) -> &[NodeId] {
        &self.elements
    }

    /// Labels whose buckets produced this island, in discovery order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Union bounding box of the members.
    #[must_use]
    pub const fn bounds(&self) -> BoxRect {
        self.bounds
    }

    /// Number of member elements. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always `false`; empty selectors are never constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether `node` is a member.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.elements.contains(&node)
    }

    /// Whether both selectors have exactly the same members, in any order.
    #[must_use]
    pub fn same_members(&self, elements: &[NodeId]) -> bool {
        self.elements.len() == elements.len() && elements.iter().all(|id| self.contains(*id))
    }

    /// Record another label that produced this island.
    pub(crate) fn add_label(&mut self, label: &str) {
        if !self.labels.iter().any(|l| l == label) {
            self.labels.push(label.to_string());
        }
    }
}

/// A selector paired with the color it is drawn in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorSelection {
    /// The selector this color belongs to.
    pub selector: SelectorId,
    /// The assigned color.
    pub color: Color,
}

/// The result of one computation: every surviving selector and its color,
/// in discovery order, plus the diagnostics raised on the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HtmlSelection {
    selectors: Vec<Selector>,
    colors: Vec<ColorSelection>,
    diagnostics: Vec<Diagnostic>,
}

impl HtmlSelection {
    pub(crate) fn new(
        selectors: Vec<Selector>,
        colors: Vec<ColorSelection>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            selectors,
            colors,
            diagnostics,
        }
    }

    /// Number of selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Whether nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Selectors in discovery order.
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Look up a selector by id.
    #[must_use]
    pub fn selector(&self, id: SelectorId) -> Option<&Selector> {
        self.selectors.iter().find(|s| s.id == id)
    }

    /// The color assigned to selector `id`.
    #[must_use]
    pub fn color_of(&self, id: SelectorId) -> Option<&ColorSelection> {
        self.colors.iter().find(|c| c.selector == id)
    }

    /// Selectors paired with their colors, in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&Selector, &ColorSelection)> {
        self.selectors
            .iter()
            .filter_map(|s| self.color_of(s.id).map(|c| (s, c)))
    }

    /// Every element that is a member of some selector.
    #[must_use]
    pub fn elements(&self) -> BTreeSet<NodeId> {
        self.selectors
            .iter()
            .flat_map(|s| s.elements.iter().copied())
            .collect()
    }

    /// Diagnostics raised while computing this selection.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// A copy keeping only the selectors in `ids` (ids and colors are kept
    /// as they were). Used to narrow a selection before refining it.
    #[must_use]
    pub fn only(&self, ids: &[SelectorId]) -> Self {
        Self {
            selectors: self
                .selectors
                .iter()
                .filter(|s| ids.contains(&s.id))
                .cloned()
                .collect(),
            colors: self
                .colors
                .iter()
                .filter(|c| ids.contains(&c.selector))
                .cloned()
                .collect(),
            diagnostics: self.diagnostics.clone(),
        }
    }

    /// A copy without the selectors in `ids`.
    #[must_use]
    pub fn without(&self, ids: &[SelectorId]) -> Self {
        let keep: Vec<SelectorId> = self
            .selectors
            .iter()
            .map(Selector::id)
            .filter(|id| !ids.contains(id))
            .collect();
        self.only(&keep)
    }
}
