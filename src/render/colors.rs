/// Opaque 8-bit sRGB fill color for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl NodeColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a darker version (for outlines).
    pub fn darken(self, amount: f32) -> Self {
        let scale = (1.0 - amount).clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * scale) as u8,
            g: (self.g as f32 * scale) as u8,
            b: (self.b as f32 * scale) as u8,
        }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Stable color for a node, derived from its full path.
///
/// Files get a saturated hue; directories are muted and fade slightly with depth.
pub fn node_color(path: &str, is_dir: bool, depth: u16) -> NodeColor {
    let h = hash01(path);
    if is_dir {
        let fade = (depth as f32 * 0.02).min(0.15);
        hsv_to_rgb(h, 0.25, 0.55 - fade)
    } else {
        hsv_to_rgb(h, 0.68, 0.88)
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> NodeColor {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let i = h6.floor() as i32;
    let f = h6 - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    NodeColor::new(to_u8(r), to_u8(g), to_u8(b))
}

// FNV-1a, folded to [0, 1].
fn hash01(s: &str) -> f32 {
    let mut h: u32 = 2166136261;
    for &b in s.as_bytes() {
        h ^= b as u32;
        h = h.wrapping_mul(16777619);
    }
    ((h >> 8) as f32) / ((u32::MAX >> 8) as f32)
}
