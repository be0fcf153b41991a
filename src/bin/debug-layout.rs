/// Diagnostic tool to verify the tree → layout → visible set pipeline
use std::path::PathBuf;

use anyhow::Context;
use dirmap::layout::{compute_layout, Rect};
use dirmap::scanner::FsSource;
use dirmap::tree::{self, arena::NodeId};
use dirmap::ui::hit_test::resolve;
use dirmap::ui::navigation::{expand, visible_set};
use dirmap::ui::tooltip::{build_path, format_size};

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dirmap=debug".parse()?),
        )
        .init();

    let scan_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    println!("=== DIAGNOSTIC: Tree → Layout Pipeline ===");
    println!("Scanning: {}", scan_path.display());

    let mut tree = tree::build_tree(&scan_path, &FsSource::new())
        .with_context(|| format!("building tree for {}", scan_path.display()))?;
    println!("\n[1] Tree built: {} nodes", tree.len());

    let root = tree.root;
    let root_node = tree.get(root);
    println!(
        "    Root: '{}' (size={}, is_dir={})",
        root_node.name,
        format_size(root_node.size),
        root_node.is_dir
    );

    println!("\n[2] Children of root in listing order (first 10):");
    for (i, child_id) in tree.children(root).take(10).enumerate() {
        let child = tree.get(child_id);
        println!(
            "    [{}] '{}' - {} (dir={}, children={})",
            i,
            child.name,
            format_size(child.size),
            child.is_dir,
            tree.children(child_id).count()
        );
    }

    compute_layout(&mut tree, WIDTH, HEIGHT);
    expand(&mut tree, root, true);
    let visible = visible_set(&tree, root);
    println!("\n[3] Fully expanded: {} visible rectangles", visible.len());

    println!("\n[4] Checking tiling invariants:");
    let mut bad_parents = 0usize;
    for i in 0..tree.len() {
        let id = NodeId(i as u32);
        let rect = tree.get(id).rect;
        if rect.is_empty() || !tree.get(id).has_children() {
            continue;
        }
        let children: Vec<Rect> = tree.children(id).map(|c| tree.get(c).rect).collect();
        let area: u64 = children.iter().map(Rect::area).sum();
        let inside = children.iter().all(|c| rect.encloses(c));
        if area != rect.area() || !inside {
            bad_parents += 1;
            println!(
                "    MISMATCH at '{}': parent area {} vs children {} (inside={})",
                build_path(&tree, id, '/'),
                rect.area(),
                area,
                inside
            );
        }
    }
    let visible_area: u64 = visible.iter().map(|v| v.rect.area()).sum();
    println!("    Parents violating tiling: {}", bad_parents);
    println!(
        "    Visible area: {} of {} ({} zero-area rects)",
        visible_area,
        WIDTH as u64 * HEIGHT as u64,
        visible.iter().filter(|v| v.rect.is_empty()).count()
    );

    println!("\n[5] Largest visible rectangles:");
    let mut largest = visible.clone();
    largest.sort_by_key(|v| std::cmp::Reverse(v.rect.area()));
    for (i, v) in largest.iter().take(10).enumerate() {
        let r = v.rect;
        println!(
            "    [{}] {} - {}x{} at ({}, {}) - {}",
            i,
            build_path(&tree, v.node, '/'),
            r.width,
            r.height,
            r.x,
            r.y,
            format_size(tree.get(v.node).size)
        );
    }

    println!("\n[6] Probe points:");
    for (x, y) in [(0, 0), (WIDTH as i32 / 2, HEIGHT as i32 / 2), (WIDTH as i32, HEIGHT as i32)] {
        let hit = resolve(&tree, root, dirmap::layout::Point::new(x, y));
        println!(
            "    ({}, {}) -> {}",
            x,
            y,
            hit.map(|n| build_path(&tree, n, '/'))
                .unwrap_or_else(|| "no node".to_string())
        );
    }

    Ok(())
}
