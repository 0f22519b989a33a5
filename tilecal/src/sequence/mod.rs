//! Tile sequence and calibration engine
//!
//! Turns a projected bounding box into the block of tiles covering it at a
//! given zoom level, the row-major sequence of those tiles, and the
//! [`Calibration`] of the mosaic they form.
//!
//! # Boundary rules
//!
//! With `row`/`col` the fractional tile coordinates of the box edges (see
//! [`TileMatrixEntry::fractional_tile`]):
//!
//! - near edges (west, north): `floor`
//! - far edges (east, south): `ceil`
//!
//! An edge lying exactly on a tile boundary therefore selects the tile that
//! starts at that boundary, on both sides. No epsilon is applied. A far edge
//! falling inside a tile always adds the following tile, so a box strictly
//! inside one tile yields a 2 × 2 range.
//!
//! Negative indices are clamped to zero. The far edges are only clamped when
//! the tile matrix declares an extent.

mod range;

pub use range::{TileRange, TileRangeIter};

use serde::Serialize;
use thiserror::Error;

use crate::calibration::Calibration;
use crate::coord::{BoundingBox, Point, TileIndex};
use crate::matrix::{TileMatrix, TileMatrixEntry};

/// Errors returned by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SequenceError {
    /// Zoom level outside the pyramid or above the requested level count.
    #[error("Invalid zoom level {zoom} (max: {max_zoom})")]
    InvalidZoomLevel { zoom: u8, max_zoom: u8 },

    /// The two corners do not span an area.
    #[error("Degenerate bounding box ({width} × {height})")]
    DegenerateBox { width: f64, height: f64 },

    /// A corner coordinate is NaN or infinite.
    #[error("Corner coordinates must be finite")]
    NonFiniteCoordinate,

    /// No tile of the matrix overlaps the box.
    #[error("Bounding box lies outside the tile matrix at zoom level {zoom}")]
    OutsideMatrix { zoom: u8 },
}

/// Everything needed to fetch and assemble the tiles covering a box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileSequenceAndCalibration {
    /// Row-major: first is the top-left tile, last the bottom-right one.
    pub tile_sequence: Vec<TileIndex>,
    pub tile_range: TileRange,
    pub calibration: Calibration,
}

/// Computes tile sequences against one tile matrix.
///
/// Holds no mutable state; a single instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct TileSequencer {
    matrix: TileMatrix,
}

impl TileSequencer {
    pub fn new(matrix: TileMatrix) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &TileMatrix {
        &self.matrix
    }

    /// Computes the tiles covering the box spanned by two corners, and the
    /// calibration of their mosaic.
    ///
    /// # Arguments
    ///
    /// * `zoom_level` - Level to compute the tiles at
    /// * `full_zoom_level_count` - Deepest level the caller accepts; `zoom_level`
    ///   above it is rejected
    /// * `corner_a`, `corner_b` - Opposite corners of the box, in any order
    ///
    /// # Errors
    ///
    /// - [`SequenceError::InvalidZoomLevel`] if `zoom_level` exceeds
    ///   `full_zoom_level_count` or is not part of the matrix
    /// - [`SequenceError::NonFiniteCoordinate`] if a corner is NaN or infinite
    /// - [`SequenceError::DegenerateBox`] if the box has zero width or height
    /// - [`SequenceError::OutsideMatrix`] if no tile overlaps the box
    pub fn tile_sequence_and_calibration(
        &self,
        zoom_level: u8,
        full_zoom_level_count: u8,
        corner_a: Point,
        corner_b: Point,
    ) -> Result<TileSequenceAndCalibration, SequenceError> {
        if zoom_level > full_zoom_level_count {
            return Err(SequenceError::InvalidZoomLevel {
                zoom: zoom_level,
                max_zoom: full_zoom_level_count,
            });
        }
        let entry = self.entry_for(zoom_level)?;
        let bbox = checked_box(corner_a, corner_b)?;
        let tile_range = range_for_entry(&entry, &bbox)?;

        Ok(TileSequenceAndCalibration {
            tile_sequence: tile_range.iter().collect(),
            tile_range,
            calibration: Calibration::new(&entry, &tile_range),
        })
    }

    /// Computes only the covering range of `bbox` at `zoom`.
    pub fn tile_range(&self, zoom: u8, bbox: &BoundingBox) -> Result<TileRange, SequenceError> {
        let entry = self.entry_for(zoom)?;
        range_for_entry(&entry, bbox)
    }

    /// Computes one result per level from `level_min` to `level_max`
    /// inclusive, in ascending zoom order.
    ///
    /// Fails on the first level that fails; no partial list is returned.
    pub fn tile_sequences_for_levels(
        &self,
        level_min: u8,
        level_max: u8,
        corner_a: Point,
        corner_b: Point,
    ) -> Result<Vec<TileSequenceAndCalibration>, SequenceError> {
        check_level_span(level_min, level_max)?;
        (level_min..=level_max)
            .map(|zoom| self.tile_sequence_and_calibration(zoom, level_max, corner_a, corner_b))
            .collect()
    }

    /// Total number of tiles over levels `level_min..=level_max`, without
    /// building the sequences.
    pub fn estimate_tile_count(
        &self,
        level_min: u8,
        level_max: u8,
        corner_a: Point,
        corner_b: Point,
    ) -> Result<u64, SequenceError> {
        check_level_span(level_min, level_max)?;
        let bbox = checked_box(corner_a, corner_b)?;
        (level_min..=level_max).try_fold(0u64, |total, zoom| {
            let range = self.tile_range(zoom, &bbox)?;
            Ok(total.saturating_add(range.tile_count()))
        })
    }

    fn entry_for(&self, zoom: u8) -> Result<TileMatrixEntry, SequenceError> {
        self.matrix
            .entry_for(zoom)
            .map_err(|_| SequenceError::InvalidZoomLevel {
                zoom,
                max_zoom: self.matrix.max_zoom(),
            })
    }
}

fn check_level_span(level_min: u8, level_max: u8) -> Result<(), SequenceError> {
    if level_min > level_max {
        return Err(SequenceError::InvalidZoomLevel {
            zoom: level_min,
            max_zoom: level_max,
        });
    }
    Ok(())
}

/// Normalizes two corners, rejecting NaN before `min`/`max` can hide it.
fn checked_box(corner_a: Point, corner_b: Point) -> Result<BoundingBox, SequenceError> {
    if !corner_a.is_finite() || !corner_b.is_finite() {
        return Err(SequenceError::NonFiniteCoordinate);
    }
    Ok(BoundingBox::from_corners(corner_a, corner_b))
}

fn range_for_entry(entry: &TileMatrixEntry, bbox: &BoundingBox) -> Result<TileRange, SequenceError> {
    let top_left = bbox.top_left();
    let bottom_right = bbox.bottom_right();
    if !top_left.is_finite() || !bottom_right.is_finite() {
        return Err(SequenceError::NonFiniteCoordinate);
    }
    if bbox.is_degenerate() {
        return Err(SequenceError::DegenerateBox {
            width: bbox.width(),
            height: bbox.height(),
        });
    }

    let (row_top, col_left) = entry.fractional_tile(top_left);
    let (row_bottom, col_right) = entry.fractional_tile(bottom_right);

    // f64 -> i64 casts saturate, so far-away boxes cannot wrap around
    let row_min = (row_top.floor() as i64).max(0);
    let col_min = (col_left.floor() as i64).max(0);
    let mut row_max = row_bottom.ceil() as i64;
    let mut col_max = col_right.ceil() as i64;

    if let Some((last_row, last_col)) = entry.last_tile() {
        row_max = row_max.min(last_row);
        col_max = col_max.min(last_col);
    }

    let outside = SequenceError::OutsideMatrix { zoom: entry.zoom };
    let to_index = |value: i64| u32::try_from(value).map_err(|_| outside.clone());

    TileRange::new(
        entry.zoom,
        to_index(row_min)?,
        to_index(row_max)?,
        to_index(col_min)?,
        to_index(col_max)?,
    )
    .ok_or(outside)
}
