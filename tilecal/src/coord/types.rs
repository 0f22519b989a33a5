//! Value types for projected coordinates and tile addresses.

use serde::Serialize;

/// A position in a provider's native projected coordinate system.
///
/// Units are those of the projection (meters for Web Mercator, Lambert 93
/// and LV95). `y` grows northward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new projected point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true when both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Address of one tile within a tile matrix at a fixed zoom level.
///
/// Rows grow southward and columns grow eastward from the matrix origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileIndex {
    pub row: u32,
    pub col: u32,
}

impl TileIndex {
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Axis-aligned box in projected coordinates.
///
/// Always normalized: `x_min <= x_max` and `y_min <= y_max`. The top edge
/// of the box is `y_max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    /// Builds a normalized box from two opposite corners given in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x_min: a.x.min(b.x),
            y_min: a.y.min(b.y),
            x_max: a.x.max(b.x),
            y_max: a.y.max(b.y),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Northwest corner.
    #[inline]
    pub fn top_left(&self) -> Point {
        Point::new(self.x_min, self.y_max)
    }

    /// Southeast corner.
    #[inline]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x_max, self.y_min)
    }

    /// True when the box has no area (zero width or zero height).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// Returns true if `point` lies inside the box or on its edge.
    pub fn contains(&self, point: Point) -> bool {
        (self.x_min..=self.x_max).contains(&point.x) && (self.y_min..=self.y_max).contains(&point.y)
    }
}
