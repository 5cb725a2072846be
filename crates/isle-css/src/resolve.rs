//! Resolving declared lengths to absolute pixels.
//!
//! [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
//! [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
//!
//! Relative lengths are resolved by consulting the element's ancestors. The
//! two values that live outside the tree (the root font size and the
//! viewport) come from an injected [`HostMetrics`], so nothing here touches a
//! real document.

use isle_common::{DiagnosticKind, Diagnostics};
use isle_dom::{ElementTree, LengthProperty, NodeId};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::length::{DEFAULT_FONT_SIZE_PX, LengthUnit, ParsedLength, parse_length};

const COMPONENT: &str = "Length";

/// Values the host environment supplies.
pub trait HostMetrics {
    /// The root font size as the host reports it (e.g. `"16px"`). Resolved
    /// with the same rules as any other length.
    fn root_font_size(&self) -> String;

    /// Width of the viewport (or document) in pixels.
    fn viewport_width(&self) -> f64;

    /// Height of the viewport in pixels. Hosts that only know a width get
    /// a square viewport.
    fn viewport_height(&self) -> f64 {
        self.viewport_width()
    }
}

/// Fixed host metrics, for tests and for snapshots captured elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticMetrics {
    /// Root font size declaration.
    pub root_font_size: String,
    /// Viewport width in pixels.
    pub viewport_width: f64,
    /// Viewport height in pixels.
    pub viewport_height: f64,
}

impl Default for StaticMetrics {
    fn default() -> Self {
        Self {
            root_font_size: format!("{DEFAULT_FONT_SIZE_PX}px"),
            viewport_width: 1280.0,
            viewport_height: 800.0,
        }
    }
}

impl HostMetrics for StaticMetrics {
    fn root_font_size(&self) -> String {
        self.root_font_size.clone()
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}

/// Which extent a percentage is taken of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Axis {
    /// Percentages resolve against the reference width.
    Horizontal,
    /// Percentages resolve against the reference height.
    Vertical,
}

/// Resolves declared lengths of elements in one tree.
///
/// Pure given its tree and metrics; problems are reported to the
/// diagnostics sink and resolve to a usable number.
pub struct SizeResolver<'a> {
    tree: &'a ElementTree,
    metrics: &'a dyn HostMetrics,
    diagnostics: &'a Diagnostics,
}

impl<'a> SizeResolver<'a> {
    /// Create a resolver over `tree`.
    pub fn new(
        tree: &'a ElementTree,
        metrics: &'a dyn HostMetrics,
        diagnostics: &'a Diagnostics,
    ) -> Self {
        Self {
            tree,
            metrics,
            diagnostics,
        }
    }

    /// The tree this resolver reads.
    #[must_use]
    pub const fn tree(&self) -> &'a ElementTree {
        self.tree
    }

    /// Resolve `raw`, declared on `node`, to pixels.
    ///
    /// - `"0"`, empty and whitespace-only declarations are `0`.
    /// - `px` and unitless numbers are taken as-is.
    /// - `rem` multiplies the root font size.
    /// - `em` multiplies the parent's resolved font size.
    /// - `%` takes a share of the parent's resolved width (or height, on the
    ///   vertical axis). Children of the document, `<html>` or `<body>` take it
    ///   of the viewport instead.
    /// - Unknown units are reported and the number is taken as pixels.
    /// - Unparseable numbers are reported and resolve to `0`.
    #[must_use]
    pub fn resolve(&self, node: NodeId, raw: &str, axis: Axis) -> f64 {
        self.to_px(raw, |unit| match unit {
            LengthUnit::Rem => self.root_font_size(),
            LengthUnit::Em => self.parent_font_size(node),
            _ => self.reference_extent(node, axis),
        })
    }

    /// Resolve `node`'s declared `property`, or `0` if it has none.
    #[must_use]
    pub fn resolve_property(&self, node: NodeId, property: LengthProperty, axis: Axis) -> f64 {
        self.tree
            .as_element(node)
            .and_then(|element| element.style.get(property))
            .map_or(0.0, |raw| self.resolve(node, raw, axis))
    }

    /// The root font size in pixels.
    ///
    /// Relative units in the root declaration have nothing above them and
    /// resolve against the user agent default.
    #[must_use]
    pub fn root_font_size(&self) -> f64 {
        let raw = self.metrics.root_font_size();
        self.to_px(&raw, |_| DEFAULT_FONT_SIZE_PX)
    }

    /// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
    ///
    /// The resolved font size of `node`. A declared size is relative to the
    /// parent's (`em`, `%`); an undeclared one is inherited. The document
    /// node and unknown ids use the root font size.
    #[must_use]
    pub fn font_size(&self, node: NodeId) -> f64 {
        let Some(element) = self.tree.as_element(node) else {
            return self.root_font_size();
        };
        match element.style.get(LengthProperty::FontSize) {
            Some(raw) => self.to_px(raw, |unit| match unit {
                LengthUnit::Rem => self.root_font_size(),
                _ => self.parent_font_size(node),
            }),
            None => self.parent_font_size(node),
        }
    }

    fn parent_font_size(&self, node: NodeId) -> f64 {
        self.tree
            .parent_element(node)
            .map_or_else(|| self.root_font_size(), |parent| self.font_size(parent))
    }

    /// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
    ///
    /// The extent a percentage on `node` is a share of.
    fn reference_extent(&self, node: NodeId, axis: Axis) -> f64 {
        match self.tree.parent(node) {
            Some(parent) if !self.tree.is_root_or_body(parent) => match axis {
                Axis::Horizontal => {
                    self.resolve_property(parent, LengthProperty::Width, Axis::Horizontal)
                }
                Axis::Vertical => {
                    self.resolve_property(parent, LengthProperty::Height, Axis::Vertical)
                }
            },
            _ => match axis {
                Axis::Horizontal => self.metrics.viewport_width(),
                Axis::Vertical => self.metrics.viewport_height(),
            },
        }
    }

    /// Shared unit arithmetic. `base` supplies the multiplier for relative
    /// units and is only called when one is present. A length that
    /// overflows to a non-finite value counts as not numeric.
    fn to_px(&self, raw: &str, base: impl FnOnce(LengthUnit) -> f64) -> f64 {
        let px = self.unchecked_px(raw, base);
        if px.is_finite() {
            return px;
        }
        self.diagnostics.warn(
            COMPONENT,
            DiagnosticKind::NotNumeric,
            format!("'{}' does not resolve to a finite length, treating as 0", raw.trim()),
        );
        0.0
    }

    fn unchecked_px(&self, raw: &str, base: impl FnOnce(LengthUnit) -> f64) -> f64 {
        match parse_length(raw) {
            ParsedLength::Zero => 0.0,
            ParsedLength::Length(value, unit) => match unit {
                LengthUnit::Px | LengthUnit::Unitless => value,
                LengthUnit::Em | LengthUnit::Rem => value * base(unit),
                LengthUnit::Percent => value / 100.0 * base(unit),
            },
            ParsedLength::Unsupported { value, unit } => {
                self.diagnostics.warn(
                    COMPONENT,
                    DiagnosticKind::UnsupportedUnit,
                    format!("unsupported unit '{unit}' in '{}', treating as px", raw.trim()),
                );
                value
            }
            ParsedLength::NotNumeric(text) => {
                self.diagnostics.warn(
                    COMPONENT,
                    DiagnosticKind::NotNumeric,
                    format!("'{text}' is not a length, treating as 0"),
                );
                0.0
            }
        }
    }
}
