use std::io::{self, Write};

use thiserror::Error;

use crate::tree::arena::FileTree;
use crate::ui::navigation::VisibleRect;

const BACKGROUND: [u8; 4] = [20, 22, 28, 255];

/// Largest image `rasterize` will allocate (64 Mpx, 256 MiB of RGBA).
pub const MAX_RASTER_PIXELS: u64 = 64 * 1024 * 1024;

#[derive(Debug, Error)]
#[error("a {width}x{height} raster exceeds the {MAX_RASTER_PIXELS} pixel limit")]
pub struct RasterTooLarge {
    pub width: u32,
    pub height: u32,
}

/// An RGBA8 pixel buffer.
#[derive(Debug, Clone)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Raster {
    /// RGBA value at (x, y), or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.pixels.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Write the buffer as a binary PPM (P6), dropping alpha.
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        for px in self.pixels.chunks_exact(4) {
            out.write_all(&px[..3])?;
        }
        out.flush()
    }
}

/// Rasterize the visible rectangles with flat fills and a darker one-pixel outline.
///
/// Pixel (px, py) belongs to the rectangle covering the half-open cell
/// `[x, x + width) x [y, y + height)`; zero-area rectangles draw nothing.
/// Images larger than [`MAX_RASTER_PIXELS`] are refused.
pub fn rasterize(
    width: u32,
    height: u32,
    visible: &[VisibleRect],
    tree: &FileTree,
) -> Result<Raster, RasterTooLarge> {
    if width as u64 * height as u64 > MAX_RASTER_PIXELS {
        return Err(RasterTooLarge { width, height });
    }
    let w = width as usize;
    let h = height as usize;
    let mut pixels = vec![0u8; w * h * 4];
    for pixel in pixels.chunks_exact_mut(4) {
        pixel.copy_from_slice(&BACKGROUND);
    }

    for v in visible {
        let fill = tree.get(v.node).color;
        let outline = fill.darken(0.35).to_rgba();
        let fill = fill.to_rgba();

        let clamp_x = |c: i64| c.clamp(0, w as i64) as usize;
        let clamp_y = |c: i64| c.clamp(0, h as i64) as usize;
        let (x0, x1) = (clamp_x(v.rect.x as i64), clamp_x(v.rect.right()));
        let (y0, y1) = (clamp_y(v.rect.y as i64), clamp_y(v.rect.bottom()));

        for py in y0..y1 {
            for px in x0..x1 {
                let edge = px == x0 || py == y0 || px + 1 == x1 || py + 1 == y1;
                let idx = (py * w + px) * 4;
                pixels[idx..idx + 4].copy_from_slice(if edge { &outline } else { &fill });
            }
        }
    }

    Ok(Raster {
        width,
        height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::scanner::MemorySource;
    use crate::tree::build_tree;
    use crate::ui::navigation::{expand, visible_set};
    use std::path::Path;

    #[test]
    fn fills_each_visible_rect_with_its_color() {
        let source = MemorySource::new().with_file("r/a", 1).with_file("r/b", 1);
        let mut tree = build_tree(Path::new("r"), &source).unwrap();
        compute_layout(&mut tree, 8, 8);
        let root = tree.root;
        expand(&mut tree, root, false);

        let raster = rasterize(8, 8, &visible_set(&tree, root), &tree).unwrap();
        let a = tree.find_child(root, "a").unwrap();
        let b = tree.find_child(root, "b").unwrap();
        assert_eq!(raster.pixel(3, 2), Some(tree.get(a).color.to_rgba()));
        assert_eq!(raster.pixel(3, 5), Some(tree.get(b).color.to_rgba()));
        assert_eq!(
            raster.pixel(0, 0),
            Some(tree.get(a).color.darken(0.35).to_rgba())
        );
        assert_eq!(raster.pixel(8, 0), None);
        assert_eq!(raster.pixel(0, 8), None);
    }

    #[test]
    fn ppm_header_and_length() {
        let tree = build_tree(
            Path::new("r"),
            &MemorySource::new().with_file("r/a", 1),
        )
        .unwrap();
        let raster = rasterize(3, 2, &[], &tree).unwrap();
        let mut out = Vec::new();
        raster.write_ppm(&mut out).unwrap();

        let header = b"P6\n3 2\n255\n";
        assert!(out.starts_with(header));
        assert_eq!(out.len(), header.len() + 3 * 2 * 3);
    }

    #[test]
    fn refuses_oversized_images() {
        let tree = build_tree(
            Path::new("r"),
            &MemorySource::new().with_file("r/a", 1),
        )
        .unwrap();
        let err = rasterize(100_000, 100_000, &[], &tree).unwrap_err();
        assert_eq!((err.width, err.height), (100_000, 100_000));
        assert!(rasterize(1, MAX_RASTER_PIXELS as u32 + 1, &[], &tree).is_err());
    }
}
