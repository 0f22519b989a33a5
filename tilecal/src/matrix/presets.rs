//! Built-in provider tile matrices.
//!
//! Each preset is plain provider data turned into a [`TileMatrix`] on demand.
//! Nothing here is cached globally; callers build the matrix once and hand it
//! to the engine.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::{MatrixError, TileMatrix};
use crate::coord::{BoundingBox, Point};

/// Half the side of the Pseudo-Mercator square, in meters.
pub const WEB_MERCATOR_ORIGIN_SHIFT: f64 = 20037508.3427892476;

/// Resolution of zoom level 0 in the Pseudo-Mercator pyramid (m/px, 256 px tiles).
pub const WEB_MERCATOR_LEVEL0_RESOLUTION: f64 = 156543.0339280410;

/// Tile edge used by every preset.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Deepest level of the IGN Géoportail "PM" matrix set.
const IGN_MAX_ZOOM: u8 = 21;

/// Deepest level of the GoogleMapsCompatible set as served by OSM-style providers.
const WEB_MERCATOR_MAX_ZOOM: u8 = 19;

/// Top-left corner of the swisstopo LV95 (EPSG:2056) matrix set.
const SWISSTOPO_ORIGIN: Point = Point::new(2420000.0, 1350000.0);

/// swisstopo LV95 resolutions, level 0 to 28 (m/px).
const SWISSTOPO_RESOLUTIONS: [f64; 29] = [
    4000.0, 3750.0, 3500.0, 3250.0, 3000.0, 2750.0, 2500.0, 2250.0, 2000.0, 1750.0, 1500.0,
    1250.0, 1000.0, 750.0, 650.0, 500.0, 250.0, 100.0, 50.0, 20.0, 10.0, 5.0, 2.5, 2.0, 1.5, 1.0,
    0.5, 0.25, 0.1,
];

/// Area served by swisstopo in LV95 coordinates.
const SWISSTOPO_EXTENT: BoundingBox = BoundingBox {
    x_min: 2420000.0,
    y_min: 1030000.0,
    x_max: 2900000.0,
    y_max: 1350000.0,
};

/// Error returned when a preset name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tile matrix preset '{0}' (expected one of: ign, webmercator, swisstopo)")]
pub struct UnknownPreset(pub String);

/// Known provider tile matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// IGN Géoportail, "PM" matrix set (EPSG:3857).
    Ign,
    /// OGC GoogleMapsCompatible (EPSG:3857), as used by OSM tile servers.
    WebMercator,
    /// swisstopo, LV95 matrix set (EPSG:2056).
    SwissTopo,
}

impl Preset {
    /// All presets, in display order.
    pub fn all() -> &'static [Preset] {
        &[Preset::Ign, Preset::WebMercator, Preset::SwissTopo]
    }

    /// Short identifier used on the command line and in config files.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Ign => "ign",
            Preset::WebMercator => "webmercator",
            Preset::SwissTopo => "swisstopo",
        }
    }

    /// Human readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Preset::Ign => "IGN Géoportail PM (EPSG:3857)",
            Preset::WebMercator => "GoogleMapsCompatible / OSM (EPSG:3857)",
            Preset::SwissTopo => "swisstopo LV95 (EPSG:2056)",
        }
    }

    /// Builds the preset's tile matrix.
    pub fn matrix(&self) -> Result<TileMatrix, MatrixError> {
        match self {
            Preset::Ign => ign(),
            Preset::WebMercator => web_mercator(WEB_MERCATOR_MAX_ZOOM),
            Preset::SwissTopo => swisstopo(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ign" => Ok(Preset::Ign),
            "webmercator" | "web-mercator" | "osm" | "google" => Ok(Preset::WebMercator),
            "swisstopo" | "swiss" => Ok(Preset::SwissTopo),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

/// Pseudo-Mercator resolutions for levels `0..=max_zoom`.
///
/// Each level halves the previous one; division by a power of two is exact
/// in binary floating point.
fn pseudo_mercator_resolutions(max_zoom: u8) -> Vec<f64> {
    (0..=max_zoom)
        .map(|zoom| WEB_MERCATOR_LEVEL0_RESOLUTION / 2.0_f64.powi(i32::from(zoom)))
        .collect()
}

/// IGN Géoportail "PM" tile matrix.
pub fn ign() -> Result<TileMatrix, MatrixError> {
    TileMatrix::new(
        Point::new(-WEB_MERCATOR_ORIGIN_SHIFT, WEB_MERCATOR_ORIGIN_SHIFT),
        DEFAULT_TILE_SIZE,
        pseudo_mercator_resolutions(IGN_MAX_ZOOM),
    )
}

/// GoogleMapsCompatible tile matrix with levels `0..=max_zoom`.
///
/// The world square is declared as the extent, so ranges never reference
/// tiles past column or row `2^zoom - 1`.
pub fn web_mercator(max_zoom: u8) -> Result<TileMatrix, MatrixError> {
    let shift = WEB_MERCATOR_ORIGIN_SHIFT;
    TileMatrix::new(
        Point::new(-shift, shift),
        DEFAULT_TILE_SIZE,
        pseudo_mercator_resolutions(max_zoom),
    )?
    .with_extent(BoundingBox::from_corners(
        Point::new(-shift, shift),
        Point::new(shift, -shift),
    ))
}

/// swisstopo LV95 tile matrix.
pub fn swisstopo() -> Result<TileMatrix, MatrixError> {
    TileMatrix::new(
        SWISSTOPO_ORIGIN,
        DEFAULT_TILE_SIZE,
        SWISSTOPO_RESOLUTIONS.to_vec(),
    )?
    .with_extent(SWISSTOPO_EXTENT)
}
