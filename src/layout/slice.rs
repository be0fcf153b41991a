use crate::tree::arena::{FileTree, NodeId};

use super::geometry::Rect;

/// How siblings are stacked inside a parent rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Rows spanning the full width; heights are partitioned.
    Horizontal,
    /// Columns spanning the full height; widths are partitioned.
    Vertical,
}

impl Orientation {
    /// Tall or square rectangles are cut into rows, wide ones into columns.
    pub fn for_rect(rect: Rect) -> Self {
        if rect.height >= rect.width {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// Largest viewport side; every coordinate of a laid-out rectangle fits in `i32`.
pub const MAX_EXTENT: u32 = i32::MAX as u32;

/// Lay out the whole tree into a `width` x `height` viewport anchored at the origin.
///
/// Sides longer than [`MAX_EXTENT`] are clamped to it.
pub fn compute_layout(tree: &mut FileTree, width: u32, height: u32) {
    let root = tree.root;
    let (width, height) = (width.min(MAX_EXTENT), height.min(MAX_EXTENT));
    let viewport = Rect::new(0, 0, width, height);
    tracing::info!(
        "Laying out {} nodes (root size={}) in {}x{} ({:?})",
        tree.len(),
        tree.get(root).size,
        width,
        height,
        Orientation::for_rect(viewport)
    );
    partition(tree, root, viewport);
}

/// Assign `rect` to `node` and slice it among the node's children, recursively.
///
/// Children of a node whose rectangle has zero width or height keep whatever
/// rectangle they had before. Every child but the last gets
/// `floor(child.size * extent / node.size)` along the slicing axis; the last
/// child takes the remainder, so the children always tile the parent exactly.
pub fn partition(tree: &mut FileTree, node: NodeId, rect: Rect) {
    tree.get_mut(node).rect = rect;

    if rect.is_empty() {
        return;
    }
    let children: Vec<NodeId> = tree.children(node).collect();
    let Some((&last, leading)) = children.split_last() else {
        return;
    };

    let orientation = Orientation::for_rect(rect);
    let total = tree.get(node).size;
    let axis_extent = match orientation {
        Orientation::Horizontal => rect.height,
        Orientation::Vertical => rect.width,
    };

    let mut remaining = rect;
    for &child in leading {
        let extent = share(tree.get(child).size, total, axis_extent);
        let slab = match orientation {
            Orientation::Horizontal => {
                let extent = extent.min(remaining.height);
                let slab = Rect::new(remaining.x, remaining.y, remaining.width, extent);
                remaining.y = advance(remaining.y, extent);
                remaining.height -= extent;
                slab
            }
            Orientation::Vertical => {
                let extent = extent.min(remaining.width);
                let slab = Rect::new(remaining.x, remaining.y, extent, remaining.height);
                remaining.x = advance(remaining.x, extent);
                remaining.width -= extent;
                slab
            }
        };
        partition(tree, child, slab);
    }
    partition(tree, last, remaining);
}

/// Move a slab origin past `extent`, saturating at `i32::MAX`.
fn advance(coord: i32, extent: u32) -> i32 {
    (coord as i64 + extent as i64).min(i32::MAX as i64) as i32
}

/// `floor(size / total * extent)` in exact integer arithmetic; zero when `total` is zero.
fn share(size: u64, total: u64, extent: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (size as u128 * extent as u128 / total as u128).min(extent as u128) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::aggregate::aggregate_sizes;
    use crate::tree::arena::FileNode;
    use proptest::prelude::*;

    fn flat_tree(sizes: &[u64]) -> (FileTree, Vec<NodeId>) {
        let mut tree = FileTree::new(FileNode::new("root", true, 0));
        let ids = sizes
            .iter()
            .enumerate()
            .map(|(i, &s)| tree.add_child(tree.root, FileNode::new(format!("f{i}"), false, s)))
            .collect();
        aggregate_sizes(&mut tree);
        (tree, ids)
    }

    fn child_rects(tree: &FileTree, parent: NodeId) -> Vec<Rect> {
        tree.children(parent).map(|c| tree.get(c).rect).collect()
    }

    #[test]
    fn square_viewport_slices_into_rows() {
        let (mut tree, ids) = flat_tree(&[50, 50]);
        let root = tree.root;
        partition(&mut tree, root, Rect::new(0, 0, 10, 10));

        assert_eq!(tree.get(ids[0]).rect, Rect::new(0, 0, 10, 5));
        assert_eq!(tree.get(ids[1]).rect, Rect::new(0, 5, 10, 5));
    }

    #[test]
    fn wide_viewport_slices_into_columns() {
        let (mut tree, ids) = flat_tree(&[1, 3]);
        let root = tree.root;
        partition(&mut tree, root, Rect::new(2, 3, 40, 10));

        assert_eq!(tree.get(ids[0]).rect, Rect::new(2, 3, 10, 10));
        assert_eq!(tree.get(ids[1]).rect, Rect::new(12, 3, 30, 10));
    }

    #[test]
    fn last_child_absorbs_rounding() {
        let (mut tree, ids) = flat_tree(&[1, 1, 1]);
        let root = tree.root;
        partition(&mut tree, root, Rect::new(0, 0, 10, 10));

        assert_eq!(tree.get(ids[0]).rect.height, 3);
        assert_eq!(tree.get(ids[1]).rect.height, 3);
        assert_eq!(tree.get(ids[2]).rect, Rect::new(0, 6, 10, 4));
    }

    #[test]
    fn zero_size_parent_gives_everything_to_last_child() {
        let (mut tree, ids) = flat_tree(&[0, 0, 0]);
        let root = tree.root;
        partition(&mut tree, root, Rect::new(0, 0, 8, 8));

        assert_eq!(tree.get(ids[0]).rect, Rect::new(0, 0, 8, 0));
        assert_eq!(tree.get(ids[1]).rect, Rect::new(0, 0, 8, 0));
        assert_eq!(tree.get(ids[2]).rect, Rect::new(0, 0, 8, 8));
    }

    #[test]
    fn zero_area_parent_leaves_children_untouched() {
        let (mut tree, ids) = flat_tree(&[5, 5]);
        let root = tree.root;
        partition(&mut tree, root, Rect::new(0, 0, 10, 10));
        let before = tree.get(ids[0]).rect;

        let root = tree.root;
        partition(&mut tree, root, Rect::new(0, 0, 0, 10));

        assert_eq!(tree.get(tree.root).rect, Rect::new(0, 0, 0, 10));
        assert_eq!(tree.get(ids[0]).rect, before);
    }

    #[test]
    fn orientation_is_chosen_per_subtree() {
        let mut tree = FileTree::new(FileNode::new("root", true, 0));
        let left = tree.add_child(tree.root, FileNode::new("left", true, 0));
        let right = tree.add_child(tree.root, FileNode::new("right", false, 10));
        let a = tree.add_child(left, FileNode::new("a", false, 5));
        let b = tree.add_child(left, FileNode::new("b", false, 5));
        aggregate_sizes(&mut tree);

        // 20x10 is wide: columns 10x10 each; `left` is square: rows.
        let root = tree.root;
        partition(&mut tree, root, Rect::new(0, 0, 20, 10));
        assert_eq!(tree.get(left).rect, Rect::new(0, 0, 10, 10));
        assert_eq!(tree.get(right).rect, Rect::new(10, 0, 10, 10));
        assert_eq!(tree.get(a).rect, Rect::new(0, 0, 10, 5));
        assert_eq!(tree.get(b).rect, Rect::new(0, 5, 10, 5));
    }

    #[test]
    fn relayout_is_deterministic() {
        let (mut tree, _) = flat_tree(&[7, 13, 2, 40, 1]);
        let root = tree.root;
        partition(&mut tree, root, Rect::new(0, 0, 97, 61));
        let first: Vec<Rect> = tree.nodes.iter().map(|n| n.rect).collect();

        let root = tree.root;
        partition(&mut tree, root, Rect::new(0, 0, 5, 5));
        let root = tree.root;
        partition(&mut tree, root, Rect::new(0, 0, 97, 61));
        let second: Vec<Rect> = tree.nodes.iter().map(|n| n.rect).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn oversized_viewport_is_clamped_to_i32_coordinates() {
        let (mut tree, ids) = flat_tree(&[1, 1, 1]);
        compute_layout(&mut tree, 1, 4_000_000_000);

        assert_eq!(tree.get(tree.root).rect, Rect::new(0, 0, 1, MAX_EXTENT));
        let third = MAX_EXTENT / 3;
        assert_eq!(tree.get(ids[0]).rect, Rect::new(0, 0, 1, third));
        assert_eq!(tree.get(ids[1]).rect, Rect::new(0, third as i32, 1, third));
        assert_eq!(tree.get(ids[2]).rect.bottom(), i32::MAX as i64);
        assert!(covered_area_without_overlap(&child_rects(&tree, tree.root)));
    }

    #[test]
    fn slab_origin_saturates_instead_of_wrapping() {
        let (mut tree, ids) = flat_tree(&[1, 1]);
        let root = tree.root;
        partition(&mut tree, root, Rect::new(0, i32::MAX - 4, 1, 10));
        assert_eq!(tree.get(ids[1]).rect.y, i32::MAX);
    }

    fn covered_area_without_overlap(rects: &[Rect]) -> bool {
        rects
            .iter()
            .enumerate()
            .all(|(i, a)| rects[i + 1..].iter().all(|b| !a.overlaps(b)))
    }

    proptest! {
        #[test]
        fn prop_children_tile_parent(
            sizes in prop::collection::vec(0u64..10_000, 1..12),
            w in 0u32..400,
            h in 0u32..400,
        ) {
            let (mut tree, _) = flat_tree(&sizes);
            let parent = Rect::new(3, 7, w, h);
            let root = tree.root;
            partition(&mut tree, root, parent);

            let rects = child_rects(&tree, tree.root);
            if parent.is_empty() {
                prop_assert!(rects.iter().all(|r| *r == Rect::ZERO));
            } else {
                let sum: u64 = rects.iter().map(Rect::area).sum();
                prop_assert_eq!(sum, parent.area());
                prop_assert!(rects.iter().all(|r| parent.encloses(r)));
                prop_assert!(covered_area_without_overlap(&rects));
            }
        }

        #[test]
        fn prop_orientation_follows_aspect(
            sizes in prop::collection::vec(1u64..1000, 2..8),
            w in 1u32..300,
            h in 1u32..300,
        ) {
            let (mut tree, _) = flat_tree(&sizes);
            let parent = Rect::new(0, 0, w, h);
            let root = tree.root;
            partition(&mut tree, root, parent);

            for r in child_rects(&tree, tree.root) {
                if h >= w {
                    prop_assert_eq!(r.width, w);
                    prop_assert_eq!(r.x, 0);
                } else {
                    prop_assert_eq!(r.height, h);
                    prop_assert_eq!(r.y, 0);
                }
            }
        }
    }
}
