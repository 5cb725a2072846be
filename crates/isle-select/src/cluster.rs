//! Island clustering.
//!
//! Elements of one label bucket are grouped into islands by a structural
//! neighbor relation, islands too small to read are dropped, and islands
//! found under several labels are merged into one selector.
//!
//! Two elements are neighbors when any of these hold:
//!
//! - they share a parent
//! - one is the other's parent
//! - their class paths are equal (same position under different branches)
//! - one class path extends the other (descendant-shaped)
//!
//! ```text
//!  body>div.post>p              ─┐ equal
//!  body>div.post>p              ─┘
//!  body>div.post>p>span.note    ── extends body>div.post>p
//! ```

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use isle_css::{BoxRect, GeometryIndex};
use isle_dom::{ElementData, ElementTree, NodeId};

use crate::class_index::LabelBucket;
use crate::config::ClusterStrategy;
use crate::selection::{Selector, SelectorId};

const PATH_SEPARATOR: char = '>';

/// Class paths of a set of elements.
///
/// A class path is every compound label (`tag.class1.class2`) from the
/// outermost element ancestor down to the element, joined with `>`.
#[derive(Debug, Clone, Default)]
pub struct ClassPaths {
    paths: HashMap<NodeId, String>,
}

impl ClassPaths {
    /// Compute the class path of every element in `nodes`. Non-element ids
    /// get no path.
    #[must_use]
    pub fn for_nodes(tree: &ElementTree, nodes: &[NodeId]) -> Self {
        let mut paths = HashMap::with_capacity(nodes.len());
        for &node in nodes {
            if let Entry::Vacant(slot) = paths.entry(node)
                && let Some(path) = class_path(tree, node)
            {
                let _ = slot.insert(path);
            }
        }
        Self { paths }
    }

    /// The class path of `node`, if it was computed.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&str> {
        self.paths.get(&node).map(String::as_str)
    }
}

fn class_path(tree: &ElementTree, node: NodeId) -> Option<String> {
    let element = tree.as_element(node)?;
    let mut segments: Vec<String> = tree
        .ancestors(node)
        .filter_map(|id| tree.as_element(id))
        .map(ElementData::compound_label)
        .collect();
    segments.reverse();
    segments.push(element.compound_label());
    Some(segments.join(&PATH_SEPARATOR.to_string()))
}

/// Whether `path` continues `prefix` past a segment boundary.
fn extends(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with(PATH_SEPARATOR))
}

/// The neighbor relation. Symmetric; `paths` must hold both elements for
/// the class-path checks to apply.
#[must_use]
pub fn is_neighbor(tree: &ElementTree, paths: &ClassPaths, a: NodeId, b: NodeId) -> bool {
    let parent_a = tree.parent(a);
    let parent_b = tree.parent(b);
    if parent_a.is_some() && parent_a == parent_b {
        return true;
    }
    if parent_a == Some(b) || parent_b == Some(a) {
        return true;
    }

    match (paths.get(a), paths.get(b)) {
        (Some(path_a), Some(path_b)) => {
            path_a == path_b || extends(path_a, path_b) || extends(path_b, path_a)
        }
        _ => false,
    }
}

/// Splits label buckets into islands and turns the surviving islands into
/// selectors.
pub struct IslandClusterer<'g, 'a> {
    geometry: &'g GeometryIndex<'a>,
    min_island_area: f64,
    strategy: ClusterStrategy,
}

impl<'g, 'a> IslandClusterer<'g, 'a> {
    /// Create a clusterer measuring boxes with `geometry`.
    #[must_use]
    pub const fn new(
        geometry: &'g GeometryIndex<'a>,
        min_island_area: f64,
        strategy: ClusterStrategy,
    ) -> Self {
        Self {
            geometry,
            min_island_area,
            strategy,
        }
    }

    /// Cluster every bucket, in order, into selectors.
    ///
    /// Islands whose bounding box area is at most the minimum, or is not a
    /// number, are dropped.
    /// An island with exactly the member set of an earlier one only adds its
    /// label to that selector. Selector ids are assigned in discovery order.
    #[must_use]
    pub fn cluster(&self, buckets: &[LabelBucket]) -> Vec<Selector> {
        let tree = self.geometry.resolver().tree();
        let candidates: Vec<NodeId> = buckets
            .iter()
            .flat_map(|b| b.elements.iter().copied())
            .collect();
        let paths = ClassPaths::for_nodes(tree, &candidates);

        let mut selectors: Vec<Selector> = Vec::new();
        let mut by_members: HashMap<Vec<NodeId>, usize> = HashMap::new();

        for bucket in buckets {
            for island in self.islands_with(&paths, &bucket.elements) {
                let Some(bounds) =
                    BoxRect::union_all(island.iter().map(|&node| self.geometry.box_of(node)))
                else {
                    continue;
                };
                // Keep only islands that clear the minimum; NaN never does.
                let area = bounds.area();
                if area.is_nan() || area <= self.min_island_area {
                    continue;
                }

                let mut key = island.clone();
                key.sort_unstable();
                if let Some(existing) = by_members.get(&key).and_then(|&i| selectors.get_mut(i)) {
                    existing.add_label(&bucket.label);
                    continue;
                }

                let id = SelectorId(selectors.len());
                if let Some(selector) = Selector::new(id, &island, &bucket.label, bounds) {
                    let _ = by_members.insert(key, selectors.len());
                    selectors.push(selector);
                }
            }
        }

        selectors
    }

    /// Group `elements` into islands with the configured strategy, before
    /// any size filtering. Islands and their members keep input order.
    #[must_use]
    pub fn islands(&self, elements: &[NodeId]) -> Vec<Vec<NodeId>> {
        let paths = ClassPaths::for_nodes(self.geometry.resolver().tree(), elements);
        self.islands_with(&paths, elements)
    }

    fn islands_with(&self, paths: &ClassPaths, elements: &[NodeId]) -> Vec<Vec<NodeId>> {
        let mut unique: Vec<NodeId> = Vec::with_capacity(elements.len());
        for &node in elements {
            if !unique.contains(&node) {
                unique.push(node);
            }
        }

        let tree = self.geometry.resolver().tree();
        match self.strategy {
            ClusterStrategy::SinglePass => single_pass(tree, paths, &unique),
            ClusterStrategy::Transitive => transitive(tree, paths, &unique),
        }
    }
}

/// Each element joins the first island holding one of its neighbors, or
/// starts a new one. Islands are never merged with each other, so the result
/// depends on element order.
fn single_pass(tree: &ElementTree, paths: &ClassPaths, elements: &[NodeId]) -> Vec<Vec<NodeId>> {
    let mut islands: Vec<Vec<NodeId>> = Vec::new();
    for &node in elements {
        let home = islands.iter_mut().find(|island| {
            island
                .iter()
                .any(|&member| is_neighbor(tree, paths, node, member))
        });
        match home {
            Some(island) => island.push(node),
            None => islands.push(vec![node]),
        }
    }
    islands
}

/// Connected components of the neighbor relation (union-find).
fn transitive(tree: &ElementTree, paths: &ClassPaths, elements: &[NodeId]) -> Vec<Vec<NodeId>> {
    let mut parent: Vec<usize> = (0..elements.len()).collect();

    for (i, &a) in elements.iter().enumerate() {
        for (j, &b) in elements.iter().enumerate().skip(i + 1) {
            if !is_neighbor(tree, paths, a, b) {
                continue;
            }
            let root_a = find(&mut parent, i);
            let root_b = find(&mut parent, j);
            if root_a != root_b {
                // The smaller index stays root so components keep input order.
                parent[root_a.max(root_b)] = root_a.min(root_b);
            }
        }
    }

    let mut islands: Vec<(usize, Vec<NodeId>)> = Vec::new();
    for (i, &node) in elements.iter().enumerate() {
        let root = find(&mut parent, i);
        match islands.iter_mut().find(|(r, _)| *r == root) {
            Some((_, members)) => members.push(node),
            None => islands.push((root, vec![node])),
        }
    }
    islands.into_iter().map(|(_, members)| members).collect()
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (ElementTree, [NodeId; 5]) {
        let mut tree = ElementTree::new();
        let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
        let post = tree.append_element(body, ElementData::new("div").with_classes(&["Post"]));
        let first = tree.append_element(post, ElementData::new("p"));
        let note = tree.append_element(first, ElementData::new("span").with_classes(&["note"]));
        let other = tree.append_element(body, ElementData::new("div").with_classes(&["post"]));
        (tree, [body, post, first, note, other])
    }

    #[test]
    fn test_class_paths() {
        let (tree, [body, _, first, note, _]) = tree();
        let paths = ClassPaths::for_nodes(&tree, &[body, note, first, NodeId::ROOT]);
        assert_eq!(paths.get(body), Some("body"));
        assert_eq!(paths.get(first), Some("body>div.post>p"));
        assert_eq!(paths.get(note), Some("body>div.post>p>span.note"));
        assert_eq!(paths.get(NodeId::ROOT), None);
    }

    #[test]
    fn test_equal_paths_are_neighbors() {
        let (tree, [_, post, _, _, other]) = tree();
        let paths = ClassPaths::for_nodes(&tree, &[post, other]);
        assert!(is_neighbor(&tree, &paths, post, other));
    }

    #[test]
    fn test_extension_must_stop_at_segment_boundary() {
        assert!(extends("body>div>p", "body>div"));
        assert!(!extends("body>divider", "body>div"));
        assert!(!extends("body>div", "body>div"));
    }

    #[test]
    fn test_neighbor_relation_is_symmetric() {
        let (tree, nodes) = tree();
        let paths = ClassPaths::for_nodes(&tree, &nodes);
        for &a in &nodes {
            for &b in &nodes {
                assert_eq!(
                    is_neighbor(&tree, &paths, a, b),
                    is_neighbor(&tree, &paths, b, a)
                );
            }
        }
    }

    #[test]
    fn test_unrelated_elements_are_not_neighbors() {
        let mut tree = ElementTree::new();
        let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
        let main = tree.append_element(body, ElementData::new("main"));
        let aside = tree.append_element(body, ElementData::new("aside"));
        let a = tree.append_element(main, ElementData::new("p"));
        let c = tree.append_element(aside, ElementData::new("p"));
        let paths = ClassPaths::for_nodes(&tree, &[a, c]);
        assert!(!is_neighbor(&tree, &paths, a, c));
    }
}
