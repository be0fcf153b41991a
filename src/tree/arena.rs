use compact_str::CompactString;

use crate::layout::Rect;
use crate::render::colors::NodeColor;

/// Index into the arena `Vec<FileNode>`. Uses u32 to save memory (supports up to ~4 billion nodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node in the file tree, stored in a flat arena.
/// Uses sibling-list representation: each node has `first_child`, `last_child` and `next_sibling`.
#[derive(Debug, Clone)]
pub struct FileNode {
    /// File or directory name (last path component)
    pub name: CompactString,
    /// Weight. Files: byte size. Empty dirs: 1. Other dirs: sum of children.
    pub size: u64,
    /// Whether the directory source reported this path as a directory
    pub is_dir: bool,
    /// Rectangle assigned by the last layout pass, `Rect::ZERO` until then
    pub rect: Rect,
    /// Whether this node shows its children instead of itself
    pub expanded: bool,
    /// Cosmetic fill color, fixed at construction
    pub color: NodeColor,
    /// Parent node index (None for root)
    pub parent: Option<NodeId>,
    /// First child node index (None for files / empty dirs)
    pub first_child: Option<NodeId>,
    /// Last child node index, kept for O(1) in-order appends
    pub last_child: Option<NodeId>,
    /// Next sibling node index (None if last child)
    pub next_sibling: Option<NodeId>,
    /// Depth in the tree (root = 0)
    pub depth: u16,
}

impl FileNode {
    /// A detached node with default geometry and visibility state.
    pub fn new(name: impl Into<CompactString>, is_dir: bool, size: u64) -> Self {
        FileNode {
            name: name.into(),
            size,
            is_dir,
            rect: Rect::ZERO,
            expanded: false,
            color: NodeColor::default(),
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            depth: 0,
        }
    }

    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }
}

/// The file tree stored as a flat arena of nodes.
///
/// Children always have higher indices than their parent, and siblings keep
/// the order in which they were added.
#[derive(Debug, Clone)]
pub struct FileTree {
    /// All nodes in contiguous memory
    pub nodes: Vec<FileNode>,
    /// Root node index
    pub root: NodeId,
}

impl FileTree {
    /// Create a tree holding only a root node.
    pub fn new(root: FileNode) -> Self {
        FileTree {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Append a child node after the parent's existing children. Returns the new node's ID.
    pub fn add_child(&mut self, parent: NodeId, mut node: FileNode) -> NodeId {
        let new_id = NodeId(self.nodes.len() as u32);
        node.parent = Some(parent);
        node.depth = self.nodes[parent.index()].depth + 1;
        node.next_sibling = None;

        match self.nodes[parent.index()].last_child {
            Some(last) => self.nodes[last.index()].next_sibling = Some(new_id),
            None => self.nodes[parent.index()].first_child = Some(new_id),
        }
        self.nodes[parent.index()].last_child = Some(new_id);

        self.nodes.push(node);
        new_id
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> &FileNode {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> &mut FileNode {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty (only root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over children of a node, in insertion order.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        ChildIter {
            tree: self,
            current: self.nodes[parent.index()].first_child,
        }
    }

    /// All nodes of the subtree rooted at `id`, parents before children.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            let before = stack.len();
            stack.extend(self.children(current));
            stack[before..].reverse();
        }
        out
    }

    /// Look up a child of `parent` by name.
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent).find(|&c| self.get(c).name == name)
    }
}

/// Iterator over the children of a node.
pub struct ChildIter<'a> {
    tree: &'a FileTree,
    current: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.tree.nodes[id.index()].next_sibling;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_keep_insertion_order() {
        let mut tree = FileTree::new(FileNode::new("root", true, 0));
        let a = tree.add_child(tree.root, FileNode::new("a", false, 1));
        let b = tree.add_child(tree.root, FileNode::new("b", false, 2));
        let c = tree.add_child(tree.root, FileNode::new("c", false, 3));

        let children: Vec<_> = tree.children(tree.root).collect();
        assert_eq!(children, vec![a, b, c]);
        assert_eq!(tree.get(b).parent, Some(tree.root));
        assert_eq!(tree.get(c).depth, 1);
    }

    #[test]
    fn descendants_are_preorder() {
        let mut tree = FileTree::new(FileNode::new("root", true, 0));
        let a = tree.add_child(tree.root, FileNode::new("a", true, 0));
        let b = tree.add_child(tree.root, FileNode::new("b", false, 2));
        let a1 = tree.add_child(a, FileNode::new("a1", false, 1));

        assert_eq!(tree.descendants(tree.root), vec![tree.root, a, a1, b]);
        assert_eq!(tree.descendants(a), vec![a, a1]);
        assert_eq!(tree.find_child(tree.root, "b"), Some(b));
        assert_eq!(tree.find_child(tree.root, "zz"), None);
    }
}
