//! Mind-map data types — the document model shared by both encodings.
//!
//! The same tree projects onto both formats:
//! - dotMind JSON: `{"map_version": ..., "root": {"title": ..., "children": [...]}}`
//! - freemind XML: `<map version="..."><node TEXT="...">...</node></map>`

use serde::{Deserialize, Serialize};

// ─── Document ───────────────────────────────────────────────────────

/// A versioned mind-map document with a single root node.
///
/// `version` carries format-specific semantics and is overwritten with a
/// fixed marker on every conversion (the two formats use incompatible
/// version schemes). The serde attributes define the dotMind JSON
/// projection; the XML projection lives in `xml_parser`/`xml_writer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDocument {
    /// Format version marker (`map_version` in JSON, `version` attribute in XML).
    #[serde(rename = "map_version")]
    pub version: String,
    /// The single top-level node.
    pub root: MapNode,
}

/// One node of the tree: a display label plus ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapNode {
    /// Display label (`title` in JSON, `TEXT` attribute in XML).
    /// Missing in input decodes to the empty string; always emitted on encode.
    #[serde(rename = "title", default)]
    pub text: String,
    /// Ordered children. Always emitted on encode, even when empty.
    #[serde(default)]
    pub children: Vec<MapNode>,
}

impl MapNode {
    /// Leaf node with the given label.
    pub fn leaf(text: impl Into<String>) -> Self {
        MapNode {
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Node with the given label and children.
    pub fn with_children(text: impl Into<String>, children: Vec<MapNode>) -> Self {
        MapNode {
            text: text.into(),
            children,
        }
    }

    /// Total node count of the subtree rooted here, iteratively.
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            total += 1;
            stack.extend(node.children.iter());
        }
        total
    }
}
