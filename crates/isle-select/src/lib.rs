//! Island clustering and color assignment for the Isle selection engine.
//!
//! Given a labelled element tree, this crate finds the visually coherent
//! reading blocks ("islands") a UI can offer as selectable overlay panels,
//! and gives each one a distinct color.
//!
//! # Pipeline
//!
//! Data flows strictly downward, each stage borrowing the previous one:
//!
//! 1. [`labels`] - which tags and class tokens count as textual
//! 2. [`class_index`] - bucket candidate elements by every label they match
//! 3. [`cluster`] - split each bucket into islands, drop small ones, merge
//!    islands found under several labels
//! 4. [`assign`] - pick a color per island from fixed palettes
//! 5. [`builder`] - run the whole thing, optionally restricted to an earlier
//!    result (refinement)
//!
//! # Example
//!
//! ```
//! use isle_css::StaticMetrics;
//! use isle_dom::{ElementData, ElementTree, LengthStyle, NodeId};
//! use isle_select::{SelectionBuilder, SelectionConfig};
//!
//! let mut tree = ElementTree::new();
//! let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
//! let style = LengthStyle::positioned("0px", "0px", "300px", "40px");
//! let _ = tree.append_element(body, ElementData::new("p").with_style(style.clone()));
//! let _ = tree.append_element(body, ElementData::new("p").with_style(style));
//!
//! let metrics = StaticMetrics::default();
//! let builder = SelectionBuilder::new(&tree, &metrics, SelectionConfig::default());
//! let selection = builder.build(None);
//! assert_eq!(selection.len(), 1);
//! ```

pub mod assign;
pub mod builder;
pub mod class_index;
pub mod cluster;
pub mod config;
pub mod labels;
pub mod selection;

pub use assign::{Palette, PaletteKind, assign};
pub use builder::SelectionBuilder;
pub use class_index::{LabelBucket, bucket};
pub use cluster::{ClassPaths, IslandClusterer, is_neighbor};
pub use config::{ClusterStrategy, DEFAULT_MIN_ISLAND_AREA, LabelSource, SelectionConfig};
pub use labels::{DEFAULT_LABELS, LabelMatcher, RecognizedLabels};
pub use selection::{ColorSelection, HtmlSelection, Selector, SelectorId};
