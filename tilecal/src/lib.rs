//! tilecal - WMTS tile sequences and mosaic calibration
//!
//! Given a tile matrix (a provider's tile pyramid) and two corners of an
//! area in projected coordinates, this library computes the exact block of
//! tiles covering the area at a zoom level, the row-major order in which
//! they are assembled into a mosaic, and the calibration mapping mosaic
//! pixels to projected coordinates.
//!
//! ```
//! use tilecal::coord::Point;
//! use tilecal::matrix::presets;
//! use tilecal::sequence::TileSequencer;
//!
//! let sequencer = TileSequencer::new(presets::ign().unwrap());
//! let result = sequencer
//!     .tile_sequence_and_calibration(
//!         18,
//!         18,
//!         Point::new(275951.78, 6241946.52),
//!         Point::new(276951.78, 6240946.52),
//!     )
//!     .unwrap();
//!
//! assert_eq!(result.tile_sequence.len(), 64);
//! ```
//!
//! Fetching, caching and compositing the tiles is left to the caller.

pub mod calibration;
pub mod config;
pub mod coord;
pub mod matrix;
pub mod sequence;

pub use calibration::{Calibration, CalibrationMethod, CalibrationPoint};
pub use coord::{BoundingBox, Point, TileIndex};
pub use matrix::{MatrixError, TileMatrix, TileMatrixEntry};
pub use sequence::{SequenceError, TileRange, TileSequenceAndCalibration, TileSequencer};
