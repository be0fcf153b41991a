use super::arena::FileTree;

/// Weight given to a directory with no entries, so it keeps a clickable area.
pub const EMPTY_DIR_SIZE: u64 = 1;

/// Compute aggregated sizes for all directory nodes (bottom-up).
/// After this, each directory's `size` field equals the sum of its children's sizes,
/// or `EMPTY_DIR_SIZE` when it has none. File sizes are left as reported.
pub fn aggregate_sizes(tree: &mut FileTree) {
    // Process nodes in reverse order (children before parents) since
    // children always have higher indices than their parents in our arena.
    let len = tree.nodes.len();
    for i in (0..len).rev() {
        let node = &tree.nodes[i];
        if !node.is_dir {
            continue;
        }

        let Some(first) = node.first_child else {
            tree.nodes[i].size = EMPTY_DIR_SIZE;
            continue;
        };

        let mut total: u64 = 0;
        let mut child = Some(first);
        while let Some(child_id) = child {
            total = total.saturating_add(tree.nodes[child_id.index()].size);
            child = tree.nodes[child_id.index()].next_sibling;
        }
        tree.nodes[i].size = total;
    }
}
