//! Expand/collapse state and the visible frontier it produces.
//!
//! Each node carries an `expanded` flag. A collapsed node is drawn as a single
//! rectangle; an expanded node is replaced by its children. Collapsing works on
//! an ancestor: a secondary click on any node folds its parent's whole subtree
//! back up, and "collapse all" folds from the root.

use crate::layout::Rect;
use crate::tree::arena::{FileTree, NodeId};

/// A rectangle currently on screen, paired with the node that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRect {
    pub rect: Rect,
    pub node: NodeId,
}

/// Reveal the children of `node`, and with `all` every level beneath it.
/// Leaves stay collapsed.
pub fn expand(tree: &mut FileTree, node: NodeId, all: bool) {
    let targets = if all {
        tree.descendants(node)
    } else {
        vec![node]
    };

    let mut changed = 0usize;
    for id in targets {
        let n = tree.get_mut(id);
        if n.has_children() && !n.expanded {
            n.expanded = true;
            changed += 1;
        }
    }
    tracing::debug!(
        "expand {:?} (all={}): {} node(s) newly expanded",
        node,
        all,
        changed
    );
}

/// Fold up the subtree of `node`'s parent, or of the root when `all` is set.
///
/// Returns the node whose subtree was collapsed. Collapsing the root one
/// level has no target and leaves the state unchanged.
pub fn collapse(tree: &mut FileTree, node: NodeId, all: bool) -> Option<NodeId> {
    let target = if all {
        let mut current = node;
        while let Some(parent) = tree.get(current).parent {
            current = parent;
        }
        current
    } else {
        match tree.get(node).parent {
            Some(parent) => parent,
            None => {
                tracing::warn!("collapse of root {:?} without `all` has no target", node);
                return None;
            }
        }
    };

    for id in tree.descendants(target) {
        tree.get_mut(id).expanded = false;
    }
    tracing::debug!("collapse {:?} (all={}): folded {:?}", node, all, target);
    Some(target)
}

/// The frontier of collapsed nodes under `root`, depth-first in child order.
pub fn visible_set(tree: &FileTree, root: NodeId) -> Vec<VisibleRect> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let node = tree.get(id);
        if !node.expanded {
            out.push(VisibleRect {
                rect: node.rect,
                node: id,
            });
            continue;
        }
        let before = stack.len();
        stack.extend(tree.children(id));
        stack[before..].reverse();
    }
    out
}
