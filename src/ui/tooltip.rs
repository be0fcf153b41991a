use crate::render::colors::NodeColor;
use crate::tree::arena::{FileTree, NodeId};

/// Information to display in the overlay when hovering over a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipInfo {
    pub name: String,
    pub full_path: String,
    pub size_display: String,
    pub size: u64,
    pub is_dir: bool,
    pub child_count: Option<usize>,
    pub color: NodeColor,
}

/// Build tooltip info for a node.
pub fn build_tooltip(tree: &FileTree, node_id: NodeId, separator: char) -> TooltipInfo {
    let node = tree.get(node_id);

    let child_count = if node.is_dir {
        Some(tree.children(node_id).count())
    } else {
        None
    };

    TooltipInfo {
        name: node.name.to_string(),
        full_path: build_path(tree, node_id, separator),
        size_display: format_size(node.size),
        size: node.size,
        is_dir: node.is_dir,
        child_count,
        color: node.color,
    }
}

/// Format bytes into human-readable size string.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;
    const TB: u64 = 1024 * GB;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Build the full path of a node by walking up the tree.
pub fn build_path(tree: &FileTree, node_id: NodeId, separator: char) -> String {
    let mut parts = Vec::new();
    let mut current = Some(node_id);

    while let Some(id) = current {
        let node = tree.get(id);
        parts.push(node.name.as_str());
        current = node.parent;
    }

    parts.reverse();
    let mut buf = [0u8; 4];
    let separator: &str = separator.encode_utf8(&mut buf);
    parts.join(separator)
}
