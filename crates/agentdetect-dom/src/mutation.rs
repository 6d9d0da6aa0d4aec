//! Mutation feed types consumed by the Injection Observer.
//!
//! Mirrors `MutationObserver`'s `childList`/`subtree`/`attributes` shape,
//! trimmed to exactly what the observer needs: a structural snapshot of
//! added nodes (so it can walk descendants once) and single attribute
//! changes on the watched attribute list.

use agentdetect_core::{NodeRef, Rect};
use std::collections::HashMap;

/// Style facts needed by the floating-UI heuristic. Computing this is
/// `getComputedStyle` on the real DOM; per Open Question 2 this is only
/// populated on the mutation path, not the initial full-tree scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedStyleSnapshot {
    pub position: Position,
    pub rect: Rect,
    pub z_index: i64,
    pub has_shadow_root: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Static,
    Relative,
    Fixed,
    Absolute,
    Sticky,
}

/// A single node as observed by the Injection Observer: enough structure
/// to run the text/attribute pattern registries and the floating-UI
/// check without holding a live DOM reference.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSnapshot {
    pub node: NodeRef,
    pub tag: String,
    pub id: String,
    pub class: String,
    pub attributes: HashMap<String, String>,
    /// Text content, populated only for leaf (no-element-child) nodes —
    /// text patterns apply only to leaves per spec.md §4.3.
    pub leaf_text: Option<String>,
    pub style: Option<ComputedStyleSnapshot>,
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    /// Depth-first iterator over this node and every descendant.
    pub fn iter(&self) -> impl Iterator<Item = &NodeSnapshot> {
        NodeSnapshotIter {
            stack: vec![self],
        }
    }
}

struct NodeSnapshotIter<'a> {
    stack: Vec<&'a NodeSnapshot>,
}

impl<'a> Iterator for NodeSnapshotIter<'a> {
    type Item = &'a NodeSnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // push in reverse so traversal order matches document order
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

/// A single observed mutation, as the host binding would forward from its
/// `MutationObserver` callback.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationRecord {
    /// One or more nodes were added under `document.body`.
    ChildListAdded { nodes: Vec<NodeSnapshot> },
    /// An attribute changed on a watched node. Only `class`, `id`, `src`,
    /// `href`, `style`, `data-comet`, `data-perplexity` are observed.
    AttributeChanged {
        node: NodeRef,
        snapshot: NodeSnapshot,
        attribute: String,
        old_value: Option<String>,
        new_value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tag: &str) -> NodeSnapshot {
        NodeSnapshot {
            node: NodeRef(0),
            tag: tag.to_string(),
            id: String::new(),
            class: String::new(),
            attributes: HashMap::new(),
            leaf_text: None,
            style: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn iter_visits_self_and_descendants_in_document_order() {
        let mut root = leaf("div");
        root.children.push(leaf("span"));
        root.children.push(leaf("b"));
        let tags: Vec<&str> = root.iter().map(|n| n.tag.as_str()).collect();
        assert_eq!(tags, vec!["div", "span", "b"]);
    }
}
