//! End-to-end tests for building and refining selections.

use isle_common::DiagnosticKind;
use isle_css::StaticMetrics;
use isle_dom::{ElementData, ElementTree, LengthProperty, LengthStyle, NodeId};
use isle_select::{ClusterStrategy, HtmlSelection, SelectionBuilder, SelectionConfig, SelectorId};

/// Helper: an absolutely placed element.
fn placed(tag: &str, classes: &[&str], top: u32) -> ElementData {
    ElementData::new(tag)
        .with_classes(classes)
        .with_style(LengthStyle::positioned("0px", &format!("{top}px"), "300px", "40px"))
}

/// Helper: `body > div.main > [A, B]` and `body > aside > C`, all `<p>`.
fn article() -> (ElementTree, [NodeId; 3]) {
    let mut tree = ElementTree::new();
    let html = tree.append_element(NodeId::ROOT, ElementData::new("html"));
    let body = tree.append_element(html, ElementData::new("body"));
    let main = tree.append_element(body, ElementData::new("div").with_classes(&["main"]));
    let aside = tree.append_element(body, ElementData::new("aside"));
    let a = tree.append_element(main, placed("p", &[], 0));
    let b = tree.append_element(main, placed("p", &[], 50));
    let c = tree.append_element(aside, placed("p", &[], 400));
    (tree, [a, b, c])
}

fn only_p() -> SelectionConfig {
    SelectionConfig::default().with_labels(&["p"])
}

#[test]
fn test_end_to_end_two_islands() {
    let (tree, [a, b, c]) = article();
    let metrics = StaticMetrics::default();
    let selection = SelectionBuilder::new(&tree, &metrics, only_p()).build(None);

    assert_eq!(selection.len(), 2);
    assert_eq!(selection.selectors()[0].elements(), &[a, b]);
    assert_eq!(selection.selectors()[1].elements(), &[c]);
    assert!(selection.color_of(SelectorId(0)).is_some());
    assert!(selection.color_of(SelectorId(1)).is_some());
    assert_eq!(selection.iter().count(), 2);
    assert!(selection.diagnostics().is_empty());
}

#[test]
fn test_default_labels_skip_unsized_containers() {
    let (tree, _) = article();
    let metrics = StaticMetrics::default();
    let selection = SelectionBuilder::new(&tree, &metrics, SelectionConfig::default()).build(None);
    // div.main and aside match default labels but have no size of their own.
    assert_eq!(selection.len(), 2);
    assert!(
        selection
            .selectors()
            .iter()
            .all(|s| s.labels() == ["p".to_string()])
    );
}

#[test]
fn test_refinement_never_leaves_the_existing_selection() {
    let (tree, [a, b, _]) = article();
    let metrics = StaticMetrics::default();
    let builder = SelectionBuilder::new(&tree, &metrics, only_p());

    let full = builder.build(None);
    let before = full.clone();
    let narrowed = full.only(&[SelectorId(0)]);
    assert_eq!(narrowed.len(), 1);

    let refined = builder.refine(&narrowed);
    assert!(!refined.is_empty());
    for selector in refined.selectors() {
        assert!(selector.elements().iter().all(|id| [a, b].contains(id)));
    }
    assert_eq!(full, before);
}

#[test]
fn test_refining_an_empty_selection_is_empty() {
    let (tree, _) = article();
    let metrics = StaticMetrics::default();
    let builder = SelectionBuilder::new(&tree, &metrics, only_p());
    assert!(builder.build(Some(&HtmlSelection::default())).is_empty());
}

#[test]
fn test_without_drops_selectors() {
    let (tree, [_, _, c]) = article();
    let metrics = StaticMetrics::default();
    let full = SelectionBuilder::new(&tree, &metrics, only_p()).build(None);
    let rest = full.without(&[SelectorId(0)]);
    assert_eq!(rest.len(), 1);
    assert_eq!(rest.elements().into_iter().collect::<Vec<_>>(), vec![c]);
    assert!(rest.color_of(SelectorId(0)).is_none());
}

#[test]
fn test_builds_are_reproducible_and_offset_changes_colors() {
    let (tree, _) = article();
    let metrics = StaticMetrics::default();
    let first = SelectionBuilder::new(&tree, &metrics, only_p()).build(None);
    let second = SelectionBuilder::new(&tree, &metrics, only_p()).build(None);
    assert_eq!(first, second);

    let shifted = SelectionBuilder::new(&tree, &metrics, only_p().with_palette_offset(1)).build(None);
    assert_ne!(
        first.color_of(SelectorId(0)).map(|c| c.color),
        shifted.color_of(SelectorId(0)).map(|c| c.color)
    );
}

#[test]
fn test_selector_string_labels() {
    let (mut tree, [a, _, c]) = article();
    let main = tree.parent(a).unwrap();
    let lead = tree.append_element(main, placed("p", &["lead"], 100));
    let metrics = StaticMetrics::default();
    let config = SelectionConfig::default().with_selector("p.lead, main > p");
    let selection = SelectionBuilder::new(&tree, &metrics, config).build(None);

    assert_eq!(selection.len(), 1);
    assert_eq!(selection.selectors()[0].elements(), &[lead]);
    assert_eq!(selection.selectors()[0].labels(), &["p.lead".to_string()]);
    assert!(!selection.elements().contains(&c));
    assert!(
        selection
            .diagnostics()
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnsupportedSelector && d.message.contains("main > p"))
    );
}

#[test]
fn test_length_diagnostics_reach_the_selection() {
    let mut tree = ElementTree::new();
    let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
    let style = LengthStyle::positioned("0px", "0px", "300vw", "40px");
    let _ = tree.append_element(body, ElementData::new("p").with_style(style));
    let metrics = StaticMetrics::default();

    let selection = SelectionBuilder::new(&tree, &metrics, only_p()).build(None);
    assert_eq!(selection.len(), 1);
    assert_eq!(selection.selectors()[0].bounds().width, 300.0);
    assert!(
        selection
            .diagnostics()
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnsupportedUnit)
    );
}

#[test]
fn test_percentages_resolve_against_the_viewport_under_body() {
    let mut tree = ElementTree::new();
    let html = tree.append_element(NodeId::ROOT, ElementData::new("html"));
    let body = tree.append_element(html, ElementData::new("body"));
    let style = LengthStyle::positioned("0px", "0px", "50%", "10%")
        .with(LengthProperty::MarginLeft, "5%");
    let _ = tree.append_element(body, ElementData::new("p").with_style(style));
    let metrics = StaticMetrics {
        root_font_size: "16px".to_string(),
        viewport_width: 1000.0,
        viewport_height: 600.0,
    };

    let selection = SelectionBuilder::new(&tree, &metrics, only_p()).build(None);
    let bounds = selection.selectors()[0].bounds();
    assert_eq!(bounds.left, 50.0);
    assert_eq!(bounds.width, 500.0);
    assert_eq!(bounds.height, 60.0);
}

#[test]
fn test_transitive_strategy_from_config() {
    let mut tree = ElementTree::new();
    let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
    let container = tree.append_element(body, ElementData::new("div").with_classes(&["x"]));
    let _ = tree.append_element(container, placed("p", &["a"], 0));
    let bridge = tree.append_element(container, placed("p", &["b"], 50));
    let _ = tree.append_element(bridge, placed("p", &["c"], 0));
    let metrics = StaticMetrics::default();

    let config = only_p().with_strategy(ClusterStrategy::Transitive);
    let selection = SelectionBuilder::new(&tree, &metrics, config).build(None);
    assert_eq!(selection.len(), 1);
    assert_eq!(selection.selectors()[0].len(), 3);
}

#[test]
fn test_small_or_unsized_elements_select_nothing() {
    let mut tree = ElementTree::new();
    let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
    let _ = tree.append_element(body, ElementData::new("p"));
    let _ = tree.append_element(body, ElementData::new("pre"));
    let metrics = StaticMetrics::default();
    let selection = SelectionBuilder::new(&tree, &metrics, SelectionConfig::default()).build(None);
    assert!(selection.is_empty());
    assert!(selection.elements().is_empty());
}

#[test]
fn test_overflowing_width_selects_nothing() {
    let mut tree = ElementTree::new();
    let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
    let style = LengthStyle::positioned("0px", "0px", "1e999px", "0px");
    let _ = tree.append_element(body, ElementData::new("p").with_style(style));
    let metrics = StaticMetrics::default();

    let selection = SelectionBuilder::new(&tree, &metrics, only_p()).build(None);
    assert!(selection.is_empty());
    assert!(
        selection
            .diagnostics()
            .iter()
            .any(|d| d.kind == DiagnosticKind::NotNumeric)
    );
}

#[test]
fn test_dimmed_selectors_are_an_empty_stub() {
    let (tree, _) = article();
    let metrics = StaticMetrics::default();
    let builder = SelectionBuilder::new(&tree, &metrics, only_p());
    let selection = builder.build(None);

    let dimmed = builder.dimmed_selectors(&selection, &[SelectorId(1)]);
    assert!(dimmed.is_empty());
    assert_eq!(dimmed.diagnostics().len(), 1);
    assert_eq!(dimmed.diagnostics()[0].kind, DiagnosticKind::Unimplemented);
}

#[test]
fn test_invalid_base_color_is_reported() {
    let (tree, _) = article();
    let metrics = StaticMetrics::default();
    let config = only_p().with_base_color("not-a-color");
    let selection = SelectionBuilder::new(&tree, &metrics, config).build(None);
    assert_eq!(selection.len(), 2);
    assert!(
        selection
            .diagnostics()
            .iter()
            .any(|d| d.kind == DiagnosticKind::InvalidColor)
    );
}

#[test]
fn test_selection_serializes() {
    let (tree, [a, b, _]) = article();
    let metrics = StaticMetrics::default();
    let selection = SelectionBuilder::new(&tree, &metrics, only_p().with_base_color("#ff0000")).build(None);

    let json = serde_json::to_value(&selection).unwrap();
    assert_eq!(json["selectors"][0]["id"], 0);
    assert_eq!(json["selectors"][0]["elements"], serde_json::json!([a.0, b.0]));
    assert_eq!(json["selectors"][0]["labels"], serde_json::json!(["p"]));
    assert_eq!(json["selectors"][0]["bounds"]["width"], 300.0);
    assert_eq!(json["colors"][0]["selector"], 0);
    // Two members draw the split complement of red.
    assert_eq!(json["colors"][0]["color"]["hex"], "#00ff80");
    assert!(json["diagnostics"].as_array().unwrap().is_empty());
}

#[test]
fn test_snapshot_end_to_end() {
    let json = r#"{
        "children": [{
            "tag": "body",
            "children": [
                { "tag": "section", "children": [
                    { "tag": "P", "style": { "width": "300px", "height": "2em" } },
                    { "tag": "p", "style": { "top": "40px", "width": "300px", "height": "2em" } }
                ]},
                { "tag": "pre", "classList": ["code"], "style": { "top": "100px", "width": "50%", "height": "5rem" } }
            ]
        }]
    }"#;
    let tree = isle_dom::DocumentSnapshot::from_json(json).unwrap().to_tree();
    let metrics = StaticMetrics::default();
    let selection = SelectionBuilder::new(&tree, &metrics, SelectionConfig::default()).build(None);

    // section has no size; the paragraphs and the pre form two islands.
    assert_eq!(selection.len(), 2);
    assert_eq!(selection.selectors()[0].labels(), &["p".to_string()]);
    assert_eq!(selection.selectors()[0].bounds().height, 72.0);
    assert_eq!(selection.selectors()[1].labels(), &["pre".to_string()]);
    assert_eq!(selection.selectors()[1].bounds().width, 640.0);
    assert_eq!(selection.selectors()[1].bounds().height, 80.0);
}
