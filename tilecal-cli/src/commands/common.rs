//! Common types and utilities shared across CLI commands.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use tilecal::config::{config_file_path, ConfigFile};
use tilecal::matrix::presets::Preset;
use tilecal::{Point, TileMatrix};
use tracing::debug;

use crate::error::CliError;

/// Tile matrix provider selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum ProviderType {
    /// IGN Géoportail, PM matrix set (EPSG:3857)
    Ign,
    /// GoogleMapsCompatible / OSM (EPSG:3857)
    #[value(name = "webmercator", alias = "osm")]
    WebMercator,
    /// swisstopo, LV95 matrix set (EPSG:2056)
    Swisstopo,
}

impl From<ProviderType> for Preset {
    fn from(provider: ProviderType) -> Self {
        match provider {
            ProviderType::Ign => Preset::Ign,
            ProviderType::WebMercator => Preset::WebMercator,
            ProviderType::Swisstopo => Preset::SwissTopo,
        }
    }
}

/// Tile matrix selection shared by every command.
#[derive(Debug, Clone, Args)]
pub struct MatrixArgs {
    /// Built-in provider tile matrix
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderType>,

    /// INI file describing a custom tile matrix
    #[arg(short, long, value_name = "FILE", conflicts_with = "provider")]
    pub config: Option<PathBuf>,
}

/// Two opposite corners of the area, in projected coordinates.
#[derive(Debug, Clone, Args)]
pub struct CornerArgs {
    /// X of the first corner
    #[arg(allow_negative_numbers = true)]
    pub x1: f64,
    /// Y of the first corner
    #[arg(allow_negative_numbers = true)]
    pub y1: f64,
    /// X of the second corner
    #[arg(allow_negative_numbers = true)]
    pub x2: f64,
    /// Y of the second corner
    #[arg(allow_negative_numbers = true)]
    pub y2: f64,
}

impl CornerArgs {
    pub fn corners(&self) -> (Point, Point) {
        (Point::new(self.x1, self.y1), Point::new(self.x2, self.y2))
    }
}

/// A resolved tile matrix and the name to display for it.
pub struct ResolvedMatrix {
    pub name: String,
    pub matrix: TileMatrix,
}

/// Resolve the tile matrix from CLI args and the default config file.
///
/// Precedence: `--config`, then `--provider`, then the default config file
/// if it exists, then the IGN preset.
pub fn resolve_matrix(args: &MatrixArgs) -> Result<ResolvedMatrix, CliError> {
    resolve_matrix_with_default(args, config_file_path().as_deref())
}

fn resolve_matrix_with_default(
    args: &MatrixArgs,
    default_config: Option<&Path>,
) -> Result<ResolvedMatrix, CliError> {
    if let Some(path) = &args.config {
        return from_config_file(path);
    }
    if let Some(provider) = args.provider {
        return from_preset(provider.into());
    }
    if let Some(path) = default_config.filter(|path| path.exists()) {
        debug!(path = %path.display(), "Using default config file");
        return from_config_file(path);
    }
    from_preset(Preset::Ign)
}

fn from_config_file(path: &Path) -> Result<ResolvedMatrix, CliError> {
    let config = ConfigFile::load(path)?;
    let matrix = config.tile_matrix()?;
    Ok(ResolvedMatrix {
        name: config.name,
        matrix,
    })
}

fn from_preset(preset: Preset) -> Result<ResolvedMatrix, CliError> {
    Ok(ResolvedMatrix {
        name: preset.name().to_string(),
        matrix: preset.matrix()?,
    })
}
