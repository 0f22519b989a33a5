//! Coordinate value types
//!
//! Projected points, normalized bounding boxes and tile addresses shared by
//! the tile matrix model and the sequence engine.

mod types;

pub use types::{BoundingBox, Point, TileIndex};
