pub mod aggregate;
pub mod arena;

use std::path::{Path, PathBuf};

use compact_str::CompactString;

use self::arena::{FileNode, FileTree, NodeId};
use crate::render::colors;
use crate::scanner::{DirectorySource, ScanError};

/// Name stored for the node at `path`: its last component, or the whole
/// path when there is none (`/`, `.`, `C:\`).
fn node_name(path: &Path) -> CompactString {
    path.file_name()
        .map(|n| CompactString::new(n.to_string_lossy()))
        .unwrap_or_else(|| CompactString::new(path.to_string_lossy()))
}

/// Build a FileTree for `root_path` by asking `source` about every entry beneath it.
///
/// Construction is depth-first and eager: each path is queried exactly once
/// and children keep the order the source lists them in. The first fault
/// reported by the source aborts the build.
pub fn build_tree<S: DirectorySource + ?Sized>(
    root_path: &Path,
    source: &S,
) -> Result<FileTree, ScanError> {
    tracing::info!("Building tree from {}", root_path.display());

    let root_is_dir = source.is_dir(root_path)?;
    let mut root = FileNode::new(node_name(root_path), root_is_dir, 0);
    if !root_is_dir {
        root.size = source.file_size(root_path)?;
    }
    root.color = colors::node_color(&root_path.to_string_lossy(), root_is_dir, 0);
    let mut tree = FileTree::new(root);

    // Children are pushed in reverse so they pop (and get appended) in listing order.
    let mut pending: Vec<(PathBuf, NodeId)> = Vec::new();
    if root_is_dir {
        push_entries(&mut pending, root_path, tree.root, source)?;
    }

    while let Some((path, parent)) = pending.pop() {
        let is_dir = source.is_dir(&path)?;
        let size = if is_dir { 0 } else { source.file_size(&path)? };

        let mut node = FileNode::new(node_name(&path), is_dir, size);
        node.color = colors::node_color(
            &path.to_string_lossy(),
            is_dir,
            tree.get(parent).depth + 1,
        );
        let id = tree.add_child(parent, node);

        if is_dir {
            push_entries(&mut pending, &path, id, source)?;
        }
    }

    aggregate::aggregate_sizes(&mut tree);

    let dirs = tree.nodes.iter().filter(|n| n.is_dir).count();
    tracing::info!(
        "Tree built: {} nodes ({} dirs, {} files), root size={}",
        tree.len(),
        dirs,
        tree.len() - dirs,
        tree.get(tree.root).size
    );

    Ok(tree)
}

fn push_entries<S: DirectorySource + ?Sized>(
    pending: &mut Vec<(PathBuf, NodeId)>,
    dir: &Path,
    id: NodeId,
    source: &S,
) -> Result<(), ScanError> {
    let entries = source.list_entries(dir)?;
    tracing::trace!("{}: {} entries", dir.display(), entries.len());
    pending.extend(
        entries
            .iter()
            .rev()
            .map(|name| (dir.join(name.as_str()), id)),
    );
    Ok(())
}
