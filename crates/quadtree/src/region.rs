//! Geometric predicates for cell boundaries and query ranges.

use glam::Vec2;

/// Anything the index can locate in the plane.
pub trait Positioned {
    fn position(&self) -> Vec2;
}

impl Positioned for Vec2 {
    #[inline]
    fn position(&self) -> Vec2 {
        *self
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Create bounds from center and half extent.
    #[inline]
    pub fn from_center(cx: f32, cy: f32, half: f32) -> Self {
        Self {
            min_x: cx - half,
            min_y: cy - half,
            max_x: cx + half,
            max_y: cy + half,
        }
    }

    /// Check if two bounds overlap. Touching edges count as overlap.
    #[inline]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Integer axis-aligned rectangle.
///
/// Containment is half-open: a point on the west or north edge is inside, a
/// point on the east or south edge is not. Sibling quadrants therefore never
/// both claim a point sitting on their shared edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        let (x, y) = (self.x as f32, self.y as f32);
        p.x >= x && p.x < x + self.w as f32 && p.y >= y && p.y < y + self.h as f32
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.x as f32,
            self.y as f32,
            self.x as f32 + self.w as f32,
            self.y as f32 + self.h as f32,
        )
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// Split into NW, NE, SW, SE quadrants.
    ///
    /// Odd widths and heights leave the extra unit with the west and north
    /// halves, so the quadrants tile the parent exactly.
    pub fn quadrants(&self) -> [Rect; 4] {
        let east_w = self.w / 2;
        let west_w = self.w - east_w;
        let south_h = self.h / 2;
        let north_h = self.h - south_h;
        let mid_x = self.x + west_w;
        let mid_y = self.y + north_h;

        [
            Rect::new(self.x, self.y, west_w, north_h),
            Rect::new(mid_x, self.y, east_w, north_h),
            Rect::new(self.x, mid_y, west_w, south_h),
            Rect::new(mid_x, mid_y, east_w, south_h),
        ]
    }
}

/// Circle, the usual proximity query range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.center.distance_squared(p) <= self.radius * self.radius
    }

    /// Enclosing square of side `2r`.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.center.x, self.center.y, self.radius)
    }
}

/// Query or boundary shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Region {
    Rect(Rect),
    Circle(Circle),
}

impl Region {
    /// Exact membership test.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        match self {
            Region::Rect(r) => r.contains(p),
            Region::Circle(c) => c.contains(p),
        }
    }

    /// Conservative box used only for pruning.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        match self {
            Region::Rect(r) => r.bounds(),
            Region::Circle(c) => c.bounds(),
        }
    }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Region::Rect(rect)
    }
}

impl From<Circle> for Region {
    fn from(circle: Circle) -> Self {
        Region::Circle(circle)
    }
}
