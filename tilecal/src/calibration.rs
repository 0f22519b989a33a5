//! Mosaic calibration.
//!
//! Once the tiles of a [`TileRange`] are pasted side by side, the resulting
//! image (the mosaic) is an axis-aligned raster in the provider's projection.
//! A [`Calibration`] maps mosaic pixels to projected coordinates and back.
//!
//! Pixel `(0, 0)` is the top-left pixel of the range's first tile; `x` grows
//! eastward and `y` grows southward.

use serde::Serialize;

use crate::coord::{Point, TileIndex};
use crate::matrix::TileMatrixEntry;
use crate::sequence::TileRange;

/// How a map viewer should interpret the calibration points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CalibrationMethod {
    /// Top-left and bottom-right corners, no rotation.
    #[serde(rename = "SIMPLE_2_POINTS")]
    Simple2Points,
}

/// A position in the mosaic, as a fraction of its size, paired with its
/// projected coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationPoint {
    pub normalized_x: f64,
    pub normalized_y: f64,
    pub point: Point,
}

/// Affine mapping between mosaic pixels and projected coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calibration {
    /// Projected coordinate of mosaic pixel `(0, 0)`.
    pub top_left: Point,
    /// Ground units per pixel.
    pub resolution: f64,
    pub tile_size: u32,
    /// Tile pasted at the mosaic's top-left corner.
    pub origin_tile: TileIndex,
    pub row_count: u32,
    pub col_count: u32,
}

impl Calibration {
    /// Calibration of the mosaic built from `range` at `entry`'s level.
    pub fn new(entry: &TileMatrixEntry, range: &TileRange) -> Self {
        Self {
            top_left: entry.tile_top_left(range.first()),
            resolution: entry.resolution,
            tile_size: entry.tile_size,
            origin_tile: range.first(),
            row_count: range.row_count(),
            col_count: range.col_count(),
        }
    }

    /// Mosaic width in pixels.
    pub fn width_px(&self) -> u64 {
        u64::from(self.col_count) * u64::from(self.tile_size)
    }

    /// Mosaic height in pixels.
    pub fn height_px(&self) -> u64 {
        u64::from(self.row_count) * u64::from(self.tile_size)
    }

    /// Projected coordinate of a (possibly fractional) mosaic pixel.
    #[inline]
    pub fn pixel_to_point(&self, px: f64, py: f64) -> Point {
        Point::new(
            self.top_left.x + px * self.resolution,
            self.top_left.y - py * self.resolution,
        )
    }

    /// Fractional mosaic pixel `(x, y)` of a projected coordinate.
    ///
    /// Points outside the mosaic yield negative values or values past
    /// [`width_px`](Self::width_px) / [`height_px`](Self::height_px).
    #[inline]
    pub fn point_to_pixel(&self, point: Point) -> (f64, f64) {
        (
            (point.x - self.top_left.x) / self.resolution,
            (self.top_left.y - point.y) / self.resolution,
        )
    }

    /// Projected coordinate of the mosaic's bottom-right corner.
    pub fn bottom_right(&self) -> Point {
        self.pixel_to_point(self.width_px() as f64, self.height_px() as f64)
    }

    /// Pixel `(x, y)` at which `tile` is pasted in the mosaic.
    ///
    /// `None` when the tile is not part of the mosaic.
    pub fn tile_pixel_offset(&self, tile: TileIndex) -> Option<(u64, u64)> {
        let row = tile.row.checked_sub(self.origin_tile.row)?;
        let col = tile.col.checked_sub(self.origin_tile.col)?;
        if row >= self.row_count || col >= self.col_count {
            return None;
        }
        let size = u64::from(self.tile_size);
        Some((u64::from(col) * size, u64::from(row) * size))
    }

    pub fn method(&self) -> CalibrationMethod {
        CalibrationMethod::Simple2Points
    }

    /// Top-left and bottom-right calibration points.
    pub fn calibration_points(&self) -> [CalibrationPoint; 2] {
        [
            CalibrationPoint {
                normalized_x: 0.0,
                normalized_y: 0.0,
                point: self.top_left,
            },
            CalibrationPoint {
                normalized_x: 1.0,
                normalized_y: 1.0,
                point: self.bottom_right(),
            },
        ]
    }
}
