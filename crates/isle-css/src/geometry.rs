//! Absolute element boxes.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//!
//! An element's absolute position is its own offset and leading margin plus
//! its parent's leading padding and absolute position, all the way up to
//! the document node, which sits at the origin.
//!
//! ```text
//!  parent.left
//!  │  parent.padding-left
//!  │  │        left + margin-left
//!  ▼  ▼        ▼
//!  ┌──┬────────┬───────────────────────┬──────────────┐
//!  │  │        │        width          │ margin-right │
//!  └──┴────────┴───────────────────────┴──────────────┘
//!              ◀──────────── BoxRect.width ───────────▶
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use isle_common::Diagnostics;
use isle_dom::{ElementTree, LengthProperty, NodeId};
use serde::Serialize;

use crate::resolve::{Axis, HostMetrics, SizeResolver};

/// A rectangle in absolute page coordinates.
///
/// `right` and `bottom` are derived, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BoxRect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl BoxRect {
    /// Create a box from its origin and extent.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a box from its four edges.
    #[must_use]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// `left + width`
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// `top + height`
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// `width × height`
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// The smallest box containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_edges(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// The bounding box of every box in `boxes`, or `None` if there are none.
    pub fn union_all(boxes: impl IntoIterator<Item = Self>) -> Option<Self> {
        boxes.into_iter().reduce(|acc, b| acc.union(&b))
    }
}

/// Computes absolute boxes for the elements of one tree.
///
/// Origins are memoized per index, so walking many siblings resolves each
/// ancestor once. An index belongs to a single computation pass.
pub struct GeometryIndex<'a> {
    resolver: SizeResolver<'a>,
    origins: RefCell<HashMap<NodeId, (f64, f64)>>,
}

impl<'a> GeometryIndex<'a> {
    /// Create an index over `tree`.
    pub fn new(
        tree: &'a ElementTree,
        metrics: &'a dyn HostMetrics,
        diagnostics: &'a Diagnostics,
    ) -> Self {
        Self {
            resolver: SizeResolver::new(tree, metrics, diagnostics),
            origins: RefCell::new(HashMap::new()),
        }
    }

    /// The resolver this index measures with.
    #[must_use]
    pub const fn resolver(&self) -> &SizeResolver<'a> {
        &self.resolver
    }

    /// The absolute box of `node`.
    ///
    /// - `left = left + margin-left + parent padding-left + parent left`
    /// - `top` likewise with `top`, `margin-top` and `padding-top`
    ///
    /// Percentages on margins and padding, vertical ones included, are a
    /// share of the parent's width; `top` and `height` take the height.
    /// - `right = left + width + margin-right`
    /// - `bottom = top + height`
    ///
    /// Missing declarations count as `0`. The document node and unknown ids
    /// get an empty box at the origin.
    #[must_use]
    pub fn box_of(&self, node: NodeId) -> BoxRect {
        if self.resolver.tree().as_element(node).is_none() {
            return BoxRect::default();
        }

        let (left, top) = self.origin(node);
        let width = self.length(node, LengthProperty::Width, Axis::Horizontal)
            + self.length(node, LengthProperty::MarginRight, Axis::Horizontal);
        let height = self.length(node, LengthProperty::Height, Axis::Vertical);

        BoxRect::new(left, top, width, height)
    }

    /// Absolute `(left, top)` of `node`.
    fn origin(&self, node: NodeId) -> (f64, f64) {
        let cached = self.origins.borrow().get(&node).copied();
        if let Some(origin) = cached {
            return origin;
        }

        let tree = self.resolver.tree();
        if tree.as_element(node).is_none() {
            return (0.0, 0.0);
        }

        let mut left = self.length(node, LengthProperty::Left, Axis::Horizontal)
            + self.length(node, LengthProperty::MarginLeft, Axis::Horizontal);
        let mut top = self.length(node, LengthProperty::Top, Axis::Vertical)
            + self.length(node, LengthProperty::MarginTop, Axis::Horizontal);

        if let Some(parent) = tree.parent_element(node) {
            let (parent_left, parent_top) = self.origin(parent);
            left += parent_left
                + self.length(parent, LengthProperty::PaddingLeft, Axis::Horizontal);
            top += parent_top + self.length(parent, LengthProperty::PaddingTop, Axis::Horizontal);
        }

        let _ = self.origins.borrow_mut().insert(node, (left, top));
        (left, top)
    }

    fn length(&self, node: NodeId, property: LengthProperty, axis: Axis) -> f64 {
        self.resolver.resolve_property(node, property, axis)
    }
}
