//! Selection configuration.
//!
//! Every knob of a computation lives here so that two runs with equal
//! configurations over equal trees produce equal selections.

use isle_common::{DiagnosticKind, Diagnostics};
use isle_css::Color;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::assign::Palette;
use crate::labels::{DEFAULT_LABELS, RecognizedLabels};

/// Islands whose bounding box covers this many square pixels or fewer are
/// dropped.
pub const DEFAULT_MIN_ISLAND_AREA: f64 = 20.0 * 20.0;

/// How elements of one label bucket are merged into islands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ClusterStrategy {
    /// Each element joins the first existing island holding one of its
    /// neighbors, in bucket order. Two islands are never merged afterwards,
    /// so a chain bridged by a late element can stay split.
    #[default]
    SinglePass,
    /// Full closure over the neighbor relation: connected elements always
    /// share an island regardless of order.
    Transitive,
}

/// Where the recognized labels come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSource {
    /// Plain labels, possibly comma-joined groups.
    Labels(Vec<String>),
    /// A selector list such as `"p, .content, div.post"`.
    Selector(String),
}

impl Default for LabelSource {
    fn default() -> Self {
        Self::Labels(DEFAULT_LABELS.iter().map(ToString::to_string).collect())
    }
}

impl LabelSource {
    /// The labels this source recognizes.
    #[must_use]
    pub fn recognized(&self) -> RecognizedLabels {
        match self {
            Self::Labels(groups) => RecognizedLabels::new(groups),
            Self::Selector(text) => RecognizedLabels::from_selector(text),
        }
    }
}

/// Configuration of one selection computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectionConfig {
    /// Labels that mark an element as textual.
    pub labels: LabelSource,
    /// Minimum island area in px²; islands at or below it are dropped.
    pub min_island_area: f64,
    /// Starting palette index.
    pub palette_offset: usize,
    /// Island merge strategy.
    pub strategy: ClusterStrategy,
    /// Hex base color for the palettes; `None` uses [`Palette::default`].
    pub base_color: Option<String>,
    /// Echo diagnostics to stderr as they are raised.
    pub echo_warnings: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            labels: LabelSource::default(),
            min_island_area: DEFAULT_MIN_ISLAND_AREA,
            palette_offset: 0,
            strategy: ClusterStrategy::default(),
            base_color: None,
            echo_warnings: false,
        }
    }
}

impl SelectionConfig {
    /// Use plain labels.
    #[must_use]
    pub fn with_labels<S: AsRef<str>>(mut self, labels: &[S]) -> Self {
        self.labels = LabelSource::Labels(labels.iter().map(|l| l.as_ref().to_string()).collect());
        self
    }

    /// Use a selector list instead of plain labels.
    #[must_use]
    pub fn with_selector(mut self, selector: &str) -> Self {
        self.labels = LabelSource::Selector(selector.to_string());
        self
    }

    /// Set the minimum island area.
    #[must_use]
    pub const fn with_min_island_area(mut self, area: f64) -> Self {
        self.min_island_area = area;
        self
    }

    /// Set the starting palette index.
    #[must_use]
    pub const fn with_palette_offset(mut self, offset: usize) -> Self {
        self.palette_offset = offset;
        self
    }

    /// Set the merge strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: ClusterStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the palette base color (hex).
    #[must_use]
    pub fn with_base_color(mut self, hex: &str) -> Self {
        self.base_color = Some(hex.to_string());
        self
    }

    /// Echo diagnostics to stderr.
    #[must_use]
    pub const fn with_echo_warnings(mut self, echo: bool) -> Self {
        self.echo_warnings = echo;
        self
    }

    /// The palettes to draw from. An unparseable base color is reported and
    /// the default palettes are used.
    #[must_use]
    pub fn palette(&self, diagnostics: &Diagnostics) -> Palette {
        let Some(hex) = &self.base_color else {
            return Palette::default();
        };
        match Color::from_hex(hex) {
            Some(base) => Palette::from_base(base),
            None => {
                diagnostics.warn(
                    "Color",
                    DiagnosticKind::InvalidColor,
                    format!("'{hex}' is not a hex color; using the default palette"),
                );
                Palette::default()
            }
        }
    }
}
