//! Property tests for length resolution and color rotation.

use isle_common::Diagnostics;
use isle_css::{Axis, Color, SizeResolver, StaticMetrics};
use isle_dom::{ElementData, ElementTree, LengthProperty, LengthStyle, NodeId};
use quickcheck_macros::quickcheck;

/// Helper: a chain of `depth` nested divs under the document, each declaring
/// a relative width and font size.
fn nested(depth: u8) -> (ElementTree, NodeId) {
    let mut tree = ElementTree::new();
    let mut parent = NodeId::ROOT;
    for _ in 0..=depth % 16 {
        let style = LengthStyle::default()
            .with(LengthProperty::Width, "75%")
            .with(LengthProperty::FontSize, "1.2em");
        parent = tree.append_element(parent, ElementData::new("div").with_style(style));
    }
    (tree, parent)
}

#[quickcheck]
fn prop_zero_is_zero_at_any_depth(depth: u8, vertical: bool) -> bool {
    let (tree, leaf) = nested(depth);
    let metrics = StaticMetrics::default();
    let diagnostics = Diagnostics::new();
    let resolver = SizeResolver::new(&tree, &metrics, &diagnostics);
    let axis = if vertical { Axis::Vertical } else { Axis::Horizontal };
    resolver.resolve(leaf, "0", axis) == 0.0 && diagnostics.is_empty()
}

#[quickcheck]
fn prop_px_is_identity(depth: u8, value: i32) -> bool {
    let (tree, leaf) = nested(depth);
    let metrics = StaticMetrics::default();
    let diagnostics = Diagnostics::new();
    let resolver = SizeResolver::new(&tree, &metrics, &diagnostics);
    let value = f64::from(value);
    resolver.resolve(leaf, &format!("{value}px"), Axis::Horizontal) == value
}

#[quickcheck]
fn prop_full_turn_spin_is_identity(hue: u16, degrees: i16) -> bool {
    let color = Color::hsl(f64::from(hue % 360), 0.7, 0.5);
    let spun = color.spin(f64::from(degrees)).spin(-f64::from(degrees));
    let wrapped = color.spin(360.0);
    (spun.hue() - color.hue()).abs() < 1e-6 && (wrapped.hue() - color.hue()).abs() < 1e-6
}

#[quickcheck]
fn prop_spin_stays_in_range(hue: i32, degrees: i32) -> bool {
    let spun = Color::hsl(f64::from(hue), 0.5, 0.5).spin(f64::from(degrees));
    (0.0..360.0).contains(&spun.hue())
}

#[quickcheck]
fn prop_fractional_spin_stays_in_range(hue: i32, micro_degrees: i64) -> bool {
    #[allow(clippy::cast_precision_loss)]
    let degrees = micro_degrees as f64 * 1e-6;
    let tiny = Color::hsl(f64::from(hue), 0.5, 0.5).spin(-f64::EPSILON);
    let spun = Color::hsl(f64::from(hue), 0.5, 0.5).spin(degrees);
    (0.0..360.0).contains(&spun.hue()) && (0.0..360.0).contains(&tiny.hue())
}
