use std::path::PathBuf;

use crate::tree::arena::FileTree;

/// Summary of a completed tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStats {
    /// Path the tree was built from
    pub root: PathBuf,
    pub total_files: u64,
    pub total_dirs: u64,
    /// Directories with no entries (each weighted 1)
    pub empty_dirs: u64,
    /// Sum of reported file sizes
    pub total_bytes: u64,
    pub elapsed_ms: u64,
}

impl ScanStats {
    /// Count files, directories and bytes in a built tree.
    pub fn from_tree(root: PathBuf, tree: &FileTree, elapsed_ms: u64) -> Self {
        let mut stats = ScanStats {
            root,
            total_files: 0,
            total_dirs: 0,
            empty_dirs: 0,
            total_bytes: 0,
            elapsed_ms,
        };
        for node in &tree.nodes {
            if node.is_dir {
                stats.total_dirs += 1;
                if !node.has_children() {
                    stats.empty_dirs += 1;
                }
            } else {
                stats.total_files += 1;
                stats.total_bytes = stats.total_bytes.saturating_add(node.size);
            }
        }
        stats
    }
}
