//! Bucketing candidate elements by recognized label.

use std::collections::HashSet;

use isle_dom::{ElementTree, NodeId};

use crate::labels::RecognizedLabels;

/// The candidate elements carrying one label, in candidate order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBucket {
    /// The recognized label.
    pub label: String,
    /// Elements carrying it.
    pub elements: Vec<NodeId>,
}

/// Bucket `candidates` by every recognized label they carry.
///
/// An element lands in one bucket per label it matches, so the same element
/// can surface in several islands until cross-label merging. Buckets come
/// back in label order; labels nothing matched are left out. Non-element ids
/// and repeated candidates are skipped.
#[must_use]
pub fn bucket(
    tree: &ElementTree,
    candidates: &[NodeId],
    labels: &RecognizedLabels,
) -> Vec<LabelBucket> {
    let mut buckets: Vec<LabelBucket> = labels
        .iter()
        .map(|matcher| LabelBucket {
            label: matcher.label().to_string(),
            elements: Vec::new(),
        })
        .collect();

    let mut seen = HashSet::new();
    for &id in candidates {
        let Some(element) = tree.as_element(id) else {
            continue;
        };
        if !seen.insert(id) {
            continue;
        }
        for (slot, matcher) in buckets.iter_mut().zip(labels.iter()) {
            if matcher.matches(element) {
                slot.elements.push(id);
            }
        }
    }

    buckets.retain(|b| !b.elements.is_empty());
    buckets
}
