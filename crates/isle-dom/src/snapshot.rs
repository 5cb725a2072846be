//! Loading element trees from JSON snapshots.
//!
//! A snapshot is what a host captures from a live document before handing it
//! to the engine:
//!
//! ```json
//! { "children": [
//!     { "tag": "body", "children": [
//!         { "tag": "p", "classes": ["lead"],
//!           "style": { "width": "400px", "height": "2em", "marginLeft": "10px" } }
//!     ] }
//! ] }
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ElementData, ElementTree, LengthStyle, NodeId};

/// Error type for snapshot loading.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Failed to read the snapshot file.
    #[error("failed to read snapshot '{path}': {source}")]
    Io {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The snapshot is not valid JSON of the expected shape.
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// The top level of a snapshot: the document node's children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// Top-level elements (normally a single `html` element).
    #[serde(default)]
    pub children: Vec<ElementSnapshot>,
}

/// One element of a snapshot, with its subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Tag name.
    #[serde(alias = "tagName")]
    pub tag: String,
    /// Class tokens.
    #[serde(default, alias = "classList")]
    pub classes: Vec<String>,
    /// Declared lengths.
    #[serde(default)]
    pub style: LengthStyle,
    /// Child elements in document order.
    #[serde(default)]
    pub children: Vec<Self>,
}

impl DocumentSnapshot {
    /// Parse a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if the text is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Io`] if the file cannot be read and
    /// [`SnapshotError::Json`] if its contents are not a valid snapshot.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let text = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Build an arena tree from this snapshot. Node ids are assigned in
    /// document order, starting at 1.
    #[must_use]
    pub fn to_tree(&self) -> ElementTree {
        let mut tree = ElementTree::new();
        for child in &self.children {
            append_snapshot(&mut tree, NodeId::ROOT, child);
        }
        tree
    }
}

fn append_snapshot(tree: &mut ElementTree, parent: NodeId, snapshot: &ElementSnapshot) {
    let data = ElementData {
        tag_name: snapshot.tag.clone(),
        classes: snapshot.classes.clone(),
        style: snapshot.style.clone(),
    };
    let id = tree.append_element(parent, data);
    for child in &snapshot.children {
        append_snapshot(tree, id, child);
    }
}
