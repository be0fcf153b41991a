/// Axis-aligned rectangle in integer screen units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(0, 0, 0, 0);

    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Far x edge (`x + width`).
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Far y edge (`y + height`).
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Closed containment: points on any of the four edges are inside.
    pub fn contains(&self, p: Point) -> bool {
        let (px, py) = (p.x as i64, p.y as i64);
        self.x as i64 <= px && px <= self.right() && self.y as i64 <= py && py <= self.bottom()
    }

    /// Whether the open interiors of the two rectangles share any area.
    pub fn overlaps(&self, other: &Rect) -> bool {
        (self.x as i64) < other.right()
            && (other.x as i64) < self.right()
            && (self.y as i64) < other.bottom()
            && (other.y as i64) < self.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn encloses(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Screen position in the same units as [`Rect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
