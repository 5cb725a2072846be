//! Selection building: the whole pipeline over one tree.

use isle_common::{DiagnosticKind, Diagnostics};
use isle_css::{GeometryIndex, HostMetrics};
use isle_dom::{ElementTree, NodeId};

use crate::assign::assign;
use crate::class_index::bucket;
use crate::cluster::IslandClusterer;
use crate::config::SelectionConfig;
use crate::selection::{HtmlSelection, SelectorId};

const COMPONENT: &str = "Select";

/// Runs labels → buckets → islands → colors over a borrowed tree.
///
/// The tree must not change while a build runs. Every build gets fresh
/// caches and a fresh diagnostics sink, so repeated builds are independent.
pub struct SelectionBuilder<'a> {
    tree: &'a ElementTree,
    metrics: &'a dyn HostMetrics,
    config: SelectionConfig,
}

impl<'a> SelectionBuilder<'a> {
    /// Create a builder over `tree`.
    pub const fn new(
        tree: &'a ElementTree,
        metrics: &'a dyn HostMetrics,
        config: SelectionConfig,
    ) -> Self {
        Self {
            tree,
            metrics,
            config,
        }
    }

    /// The configuration builds run with.
    #[must_use]
    pub const fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Compute a selection.
    ///
    /// Without `existing`, every element of the tree is a candidate. With
    /// it, only the elements already in one of its selectors are, so the
    /// result never reaches outside the earlier selection. `existing` is
    /// left untouched.
    #[must_use]
    pub fn build(&self, existing: Option<&HtmlSelection>) -> HtmlSelection {
        let diagnostics = self.diagnostics();

        let labels = self.config.labels.recognized();
        for compound in labels.rejected() {
            diagnostics.warn(
                COMPONENT,
                DiagnosticKind::UnsupportedSelector,
                format!("'{compound}' is not a tag, class or universal selector; ignoring it"),
            );
        }

        let candidates = self.candidates(existing);
        let buckets = bucket(self.tree, &candidates, &labels);

        let selectors = {
            let geometry = GeometryIndex::new(self.tree, self.metrics, &diagnostics);
            IslandClusterer::new(&geometry, self.config.min_island_area, self.config.strategy)
                .cluster(&buckets)
        };

        let palette = self.config.palette(&diagnostics);
        let colors = assign(&selectors, &palette, self.config.palette_offset);

        HtmlSelection::new(selectors, colors, diagnostics.into_vec())
    }

    /// Recompute within `existing`. Same as `build(Some(existing))`.
    #[must_use]
    pub fn refine(&self, existing: &HtmlSelection) -> HtmlSelection {
        self.build(Some(existing))
    }

    /// Selectors for the panels a user excluded from `selection`.
    ///
    /// Not implemented: always returns an empty selection carrying an
    /// `Unimplemented` diagnostic.
    #[must_use]
    pub fn dimmed_selectors(
        &self,
        _selection: &HtmlSelection,
        _excluded: &[SelectorId],
    ) -> HtmlSelection {
        let diagnostics = self.diagnostics();
        diagnostics.warn(
            COMPONENT,
            DiagnosticKind::Unimplemented,
            "dimmed selectors are not computed; returning an empty selection",
        );
        HtmlSelection::new(Vec::new(), Vec::new(), diagnostics.into_vec())
    }

    fn diagnostics(&self) -> Diagnostics {
        if self.config.echo_warnings {
            Diagnostics::echoing()
        } else {
            Diagnostics::new()
        }
    }

    /// Tree elements in document order, restricted to `existing`'s members.
    fn candidates(&self, existing: Option<&HtmlSelection>) -> Vec<NodeId> {
        let elements = self.tree.elements();
        match existing {
            None => elements,
            Some(existing) => {
                let members = existing.elements();
                elements
                    .into_iter()
                    .filter(|id| members.contains(id))
                    .collect()
            }
        }
    }
}
