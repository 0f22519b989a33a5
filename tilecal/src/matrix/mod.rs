//! Tile matrix model
//!
//! A [`TileMatrix`] describes one provider's tile pyramid: a single global
//! origin (the projected top-left corner of every level), the tile edge in
//! pixels, and one ground resolution per zoom level. It is built once from
//! provider constants (see [`presets`]) or from a configuration file and is
//! read-only afterwards.
//!
//! # Coordinate System
//!
//! - Column: `(x - origin.x) / (resolution * tile_size)`, growing eastward
//! - Row: `(origin.y - y) / (resolution * tile_size)`, growing southward
//!
//! The row axis is flipped because projected `y` grows northward.

pub mod presets;

use serde::Serialize;
use thiserror::Error;

use crate::coord::{BoundingBox, Point, TileIndex};

/// Errors raised while building or querying a tile matrix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// The pyramid has no level at all.
    #[error("Tile matrix must declare at least one zoom level")]
    EmptyPyramid,

    /// More levels than a `u8` zoom can address.
    #[error("Tile matrix declares {0} zoom levels (max: 256)")]
    TooManyLevels(usize),

    /// Tile edge of zero pixels.
    #[error("Invalid tile size: {0} pixels")]
    InvalidTileSize(u32),

    /// Origin coordinates are NaN or infinite.
    #[error("Tile matrix origin must be finite")]
    NonFiniteOrigin,

    /// A resolution is not a finite positive number.
    #[error("Invalid resolution {resolution} at zoom level {zoom}")]
    InvalidResolution { zoom: u8, resolution: f64 },

    /// Resolutions must strictly decrease as zoom increases.
    #[error("Resolution at zoom level {zoom} is not finer than the previous level")]
    NonDecreasingResolution { zoom: u8 },

    /// Declared extent is non-finite or has no area.
    #[error("Invalid tile matrix extent")]
    InvalidExtent,

    /// Requested zoom level is not part of the pyramid.
    #[error("Unsupported zoom level {zoom} (max: {max_zoom})")]
    UnsupportedZoomLevel { zoom: u8, max_zoom: u8 },
}

/// Everything the sequence engine needs to know about one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileMatrixEntry {
    pub zoom: u8,
    /// Projected coordinates of the top-left corner of tile `(0, 0)`.
    pub origin: Point,
    /// Ground units per pixel.
    pub resolution: f64,
    /// Pixels per tile edge (tiles are square).
    pub tile_size: u32,
    /// Valid area of the pyramid, when the provider declares one.
    pub extent: Option<BoundingBox>,
}

impl TileMatrixEntry {
    /// Ground distance covered by one tile edge.
    #[inline]
    pub fn tile_span(&self) -> f64 {
        self.resolution * self.tile_size as f64
    }

    /// Fractional `(row, col)` of a projected point.
    ///
    /// The integer part is the tile containing the point, the fractional
    /// part its relative position inside that tile.
    #[inline]
    pub fn fractional_tile(&self, point: Point) -> (f64, f64) {
        let span = self.tile_span();
        let row = (self.origin.y - point.y) / span;
        let col = (point.x - self.origin.x) / span;
        (row, col)
    }

    /// Projected coordinates of a tile's top-left corner.
    #[inline]
    pub fn tile_top_left(&self, tile: TileIndex) -> Point {
        let tile_size = self.tile_size as f64;
        Point::new(
            self.origin.x + tile.col as f64 * self.resolution * tile_size,
            self.origin.y - tile.row as f64 * self.resolution * tile_size,
        )
    }

    /// Projected footprint of a tile.
    pub fn tile_bounds(&self, tile: TileIndex) -> BoundingBox {
        let span = self.tile_span();
        let top_left = self.tile_top_left(tile);
        BoundingBox::from_corners(top_left, Point::new(top_left.x + span, top_left.y - span))
    }

    /// Last `(row, col)` whose tile still overlaps the declared extent.
    ///
    /// `None` when no extent is declared. Values may be negative when the
    /// extent lies entirely before the origin.
    pub(crate) fn last_tile(&self) -> Option<(i64, i64)> {
        let extent = self.extent?;
        let span = self.tile_span();
        let row = ((self.origin.y - extent.y_min) / span).ceil() as i64 - 1;
        let col = ((extent.x_max - self.origin.x) / span).ceil() as i64 - 1;
        Some((row, col))
    }
}

/// A provider's tile pyramid.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMatrix {
    origin: Point,
    tile_size: u32,
    resolutions: Vec<f64>,
    extent: Option<BoundingBox>,
}

impl TileMatrix {
    /// Creates a validated tile matrix.
    ///
    /// # Arguments
    ///
    /// * `origin` - Projected top-left corner shared by all levels
    /// * `tile_size` - Tile edge in pixels
    /// * `resolutions` - Ground units per pixel, indexed by zoom level
    ///
    /// # Errors
    ///
    /// Fails when the pyramid is empty, the tile size is zero, the origin is
    /// not finite, or the resolutions are not finite, positive and strictly
    /// decreasing.
    pub fn new(origin: Point, tile_size: u32, resolutions: Vec<f64>) -> Result<Self, MatrixError> {
        if resolutions.is_empty() {
            return Err(MatrixError::EmptyPyramid);
        }
        if resolutions.len() > usize::from(u8::MAX) + 1 {
            return Err(MatrixError::TooManyLevels(resolutions.len()));
        }
        if tile_size == 0 {
            return Err(MatrixError::InvalidTileSize(tile_size));
        }
        if !origin.is_finite() {
            return Err(MatrixError::NonFiniteOrigin);
        }

        let mut previous: Option<f64> = None;
        for (zoom, &resolution) in resolutions.iter().enumerate() {
            let zoom = zoom as u8;
            if !resolution.is_finite() || resolution <= 0.0 {
                return Err(MatrixError::InvalidResolution { zoom, resolution });
            }
            if previous.is_some_and(|prev| resolution >= prev) {
                return Err(MatrixError::NonDecreasingResolution { zoom });
            }
            previous = Some(resolution);
        }

        Ok(Self {
            origin,
            tile_size,
            resolutions,
            extent: None,
        })
    }

    /// Declares the valid area of the pyramid.
    ///
    /// Tile ranges computed against this matrix never extend past the last
    /// tile overlapping `extent`.
    pub fn with_extent(mut self, extent: BoundingBox) -> Result<Self, MatrixError> {
        if !extent.top_left().is_finite()
            || !extent.bottom_right().is_finite()
            || extent.is_degenerate()
        {
            return Err(MatrixError::InvalidExtent);
        }
        self.extent = Some(extent);
        Ok(self)
    }

    /// Returns the entry for `zoom`.
    pub fn entry_for(&self, zoom: u8) -> Result<TileMatrixEntry, MatrixError> {
        let resolution =
            self.resolutions
                .get(usize::from(zoom))
                .ok_or(MatrixError::UnsupportedZoomLevel {
                    zoom,
                    max_zoom: self.max_zoom(),
                })?;

        Ok(TileMatrixEntry {
            zoom,
            origin: self.origin,
            resolution: *resolution,
            tile_size: self.tile_size,
            extent: self.extent,
        })
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn extent(&self) -> Option<BoundingBox> {
        self.extent
    }

    /// Number of zoom levels in the pyramid.
    pub fn level_count(&self) -> usize {
        self.resolutions.len()
    }

    /// Deepest supported zoom level.
    pub fn max_zoom(&self) -> u8 {
        // new() guarantees 1..=256 levels
        (self.resolutions.len() - 1) as u8
    }

    /// Iterates over every level from zoom 0 to [`max_zoom`](Self::max_zoom).
    pub fn levels(&self) -> impl Iterator<Item = TileMatrixEntry> + '_ {
        self.resolutions
            .iter()
            .enumerate()
            .map(move |(zoom, &resolution)| TileMatrixEntry {
                zoom: zoom as u8,
                origin: self.origin,
                resolution,
                tile_size: self.tile_size,
                extent: self.extent,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_matrix() -> TileMatrix {
        TileMatrix::new(Point::new(0.0, 1000.0), 100, vec![4.0, 2.0, 1.0]).unwrap()
    }

    #[test]
    fn test_entry_for_valid_zoom() {
        let matrix = simple_matrix();
        let entry = matrix.entry_for(1).unwrap();

        assert_eq!(entry.zoom, 1);
        assert_eq!(entry.origin, Point::new(0.0, 1000.0));
        assert_eq!(entry.resolution, 2.0);
        assert_eq!(entry.tile_size, 100);
        assert_eq!(entry.tile_span(), 200.0);
    }

    #[test]
    fn test_entry_for_unsupported_zoom() {
        let matrix = simple_matrix();
        let result = matrix.entry_for(3);

        assert_eq!(
            result.unwrap_err(),
            MatrixError::UnsupportedZoomLevel {
                zoom: 3,
                max_zoom: 2
            }
        );
    }

    #[test]
    fn test_new_rejects_empty_pyramid() {
        let result = TileMatrix::new(Point::new(0.0, 0.0), 256, vec![]);
        assert_eq!(result.unwrap_err(), MatrixError::EmptyPyramid);
    }

    #[test]
    fn test_new_rejects_zero_tile_size() {
        let result = TileMatrix::new(Point::new(0.0, 0.0), 0, vec![1.0]);
        assert_eq!(result.unwrap_err(), MatrixError::InvalidTileSize(0));
    }

    #[test]
    fn test_new_rejects_non_finite_origin() {
        let result = TileMatrix::new(Point::new(f64::NAN, 0.0), 256, vec![1.0]);
        assert_eq!(result.unwrap_err(), MatrixError::NonFiniteOrigin);
    }

    #[test]
    fn test_new_rejects_non_positive_resolution() {
        let result = TileMatrix::new(Point::new(0.0, 0.0), 256, vec![2.0, 0.0]);
        assert!(matches!(
            result.unwrap_err(),
            MatrixError::InvalidResolution { zoom: 1, .. }
        ));
    }

    #[test]
    fn test_new_rejects_increasing_resolution() {
        let result = TileMatrix::new(Point::new(0.0, 0.0), 256, vec![2.0, 1.0, 1.0]);
        assert_eq!(
            result.unwrap_err(),
            MatrixError::NonDecreasingResolution { zoom: 2 }
        );
    }

    #[test]
    fn test_new_rejects_too_many_levels() {
        let resolutions: Vec<f64> = (0..257).map(|z| 1.0e6 / (z as f64 + 1.0)).collect();
        let result = TileMatrix::new(Point::new(0.0, 0.0), 256, resolutions);
        assert_eq!(result.unwrap_err(), MatrixError::TooManyLevels(257));
    }

    #[test]
    fn test_levels_iterates_all_zooms() {
        let matrix = simple_matrix();
        let zooms: Vec<u8> = matrix.levels().map(|entry| entry.zoom).collect();

        assert_eq!(zooms, vec![0, 1, 2]);
        assert_eq!(matrix.level_count(), 3);
        assert_eq!(matrix.max_zoom(), 2);
    }

    #[test]
    fn test_fractional_tile_flips_row_axis() {
        let entry = simple_matrix().entry_for(2).unwrap();

        // 150 m east and 250 m south of the origin, 100 m tiles
        let (row, col) = entry.fractional_tile(Point::new(150.0, 750.0));

        assert_eq!(row, 2.5);
        assert_eq!(col, 1.5);
    }

    #[test]
    fn test_tile_bounds() {
        let entry = simple_matrix().entry_for(2).unwrap();
        let bounds = entry.tile_bounds(TileIndex::new(2, 1));

        assert_eq!(bounds.x_min, 100.0);
        assert_eq!(bounds.x_max, 200.0);
        assert_eq!(bounds.y_max, 800.0);
        assert_eq!(bounds.y_min, 700.0);
    }

    #[test]
    fn test_tile_top_left_multiplies_index_resolution_then_tile_size() {
        let origin = Point::new(-20037508.3427892476, 20037508.3427892476);
        let resolution = 156543.0339280410 / 2.0_f64.powi(18);
        let entry = TileMatrix::new(origin, 256, vec![resolution])
            .unwrap()
            .entry_for(0)
            .unwrap();

        let top_left = entry.tile_top_left(TileIndex::new(90241, 132877));

        assert_eq!(top_left.x, origin.x + 132877.0 * resolution * 256.0);
        assert_eq!(top_left.y, origin.y - 90241.0 * resolution * 256.0);
    }

    #[test]
    fn test_tile_top_left_matches_fractional_tile() {
        let entry = simple_matrix().entry_for(1).unwrap();
        let tile = TileIndex::new(3, 4);

        let (row, col) = entry.fractional_tile(entry.tile_top_left(tile));

        assert_eq!(row, 3.0);
        assert_eq!(col, 4.0);
    }

    #[test]
    fn test_with_extent_rejects_degenerate_box() {
        let p = Point::new(10.0, 10.0);
        let result = simple_matrix().with_extent(BoundingBox::from_corners(p, p));
        assert_eq!(result.unwrap_err(), MatrixError::InvalidExtent);
    }

    #[test]
    fn test_last_tile_from_extent() {
        let extent = BoundingBox::from_corners(Point::new(0.0, 1000.0), Point::new(1000.0, 0.0));
        let matrix = simple_matrix().with_extent(extent).unwrap();

        // 400 m tiles: 1000 m spans tiles 0, 1 and part of 2
        assert_eq!(matrix.entry_for(0).unwrap().last_tile(), Some((2, 2)));
        // 100 m tiles: exactly 10 tiles
        assert_eq!(matrix.entry_for(2).unwrap().last_tile(), Some((9, 9)));
    }

    #[test]
    fn test_last_tile_without_extent() {
        assert_eq!(simple_matrix().entry_for(0).unwrap().last_tile(), None);
    }

    #[test]
    fn test_matrix_error_display() {
        let err = MatrixError::UnsupportedZoomLevel {
            zoom: 22,
            max_zoom: 21,
        };
        assert_eq!(err.to_string(), "Unsupported zoom level 22 (max: 21)");
    }
}
