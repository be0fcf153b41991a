use crate::layout::Rect;
use crate::tree::arena::FileTree;
use crate::ui::navigation::VisibleRect;

/// Render the visible rectangles onto a `cols` x `rows` character grid.
///
/// The viewport is scaled to the grid; each rectangle is outlined with
/// `+`, `-` and `|` and labelled with as much of its name as fits.
pub fn render_ascii(
    viewport: Rect,
    visible: &[VisibleRect],
    tree: &FileTree,
    cols: usize,
    rows: usize,
) -> String {
    if cols == 0 || rows == 0 || viewport.is_empty() {
        return String::new();
    }
    let mut grid = vec![vec![' '; cols]; rows];

    let sx = |x: i64| -> usize {
        let rel = (x - viewport.x as i64).clamp(0, viewport.width as i64);
        ((rel as u128 * (cols - 1) as u128) / viewport.width as u128) as usize
    };
    let sy = |y: i64| -> usize {
        let rel = (y - viewport.y as i64).clamp(0, viewport.height as i64);
        ((rel as u128 * (rows - 1) as u128) / viewport.height as u128) as usize
    };

    for v in visible.iter().filter(|v| !v.rect.is_empty()) {
        let (c0, c1) = (sx(v.rect.x as i64), sx(v.rect.right()));
        let (r0, r1) = (sy(v.rect.y as i64), sy(v.rect.bottom()));

        for c in c0..=c1 {
            grid[r0][c] = '-';
            grid[r1][c] = '-';
        }
        for row in grid.iter_mut().take(r1 + 1).skip(r0) {
            row[c0] = '|';
            row[c1] = '|';
        }
        for (r, c) in [(r0, c0), (r0, c1), (r1, c0), (r1, c1)] {
            grid[r][c] = '+';
        }

        if r1 > r0 + 1 && c1 > c0 + 1 {
            let room = c1 - c0 - 1;
            for (i, ch) in tree.get(v.node).name.chars().take(room).enumerate() {
                grid[r0 + 1][c0 + 1 + i] = ch;
            }
        }
    }

    let mut out = String::with_capacity(rows * (cols + 1));
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}
