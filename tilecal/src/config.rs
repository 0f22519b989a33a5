//! Tile matrix configuration files.
//!
//! A config file either names a built-in preset or describes a custom
//! pyramid:
//!
//! ```ini
//! [matrix]
//! name = lambert93
//! origin_x = 0
//! origin_y = 12000000
//! tile_size = 256
//! resolutions = 104579.22, 52277.53, 26135.49
//! ; optional: x_min, y_min, x_max, y_max
//! extent = -357823.24, 6037008.69, 1313632.36, 7230727.37
//! ```
//!
//! ```ini
//! [matrix]
//! preset = ign
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;
use tracing::debug;

use crate::coord::{BoundingBox, Point};
use crate::matrix::presets::{Preset, UnknownPreset, DEFAULT_TILE_SIZE};
use crate::matrix::{MatrixError, TileMatrix};

/// Section holding the tile matrix description.
const MATRIX_SECTION: &str = "matrix";

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid INI.
    #[error("Invalid config file: {0}")]
    Parse(String),

    #[error("Missing [{0}] section")]
    MissingSection(&'static str),

    #[error("Missing key '{0}'")]
    MissingKey(&'static str),

    /// A value could not be parsed.
    #[error("Invalid value for '{key}': '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error(transparent)]
    UnknownPreset(#[from] UnknownPreset),

    /// The described pyramid is inconsistent.
    #[error("Invalid tile matrix: {0}")]
    Matrix(#[from] MatrixError),
}

/// Custom pyramid description, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomMatrix {
    pub origin: Point,
    pub tile_size: u32,
    pub resolutions: Vec<f64>,
    pub extent: Option<BoundingBox>,
}

/// Where the tile matrix comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixSource {
    Preset(Preset),
    Custom(CustomMatrix),
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Display name of the matrix.
    pub name: String,
    pub source: MatrixSource,
}

impl ConfigFile {
    /// Loads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents)?;
        debug!(path = %path.display(), name = %config.name, "Loaded tile matrix config");
        Ok(config)
    }

    /// Parses config file contents.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let section = ini
            .section(Some(MATRIX_SECTION))
            .ok_or(ConfigError::MissingSection(MATRIX_SECTION))?;

        if let Some(preset) = section.get("preset") {
            let preset: Preset = preset.parse()?;
            let name = section
                .get("name")
                .map(str::to_string)
                .unwrap_or_else(|| preset.name().to_string());
            return Ok(Self {
                name,
                source: MatrixSource::Preset(preset),
            });
        }

        let required = |key: &'static str| section.get(key).ok_or(ConfigError::MissingKey(key));

        let origin = Point::new(
            parse_value("origin_x", required("origin_x")?)?,
            parse_value("origin_y", required("origin_y")?)?,
        );
        let tile_size = match section.get("tile_size") {
            Some(value) => parse_value("tile_size", value)?,
            None => DEFAULT_TILE_SIZE,
        };
        let resolutions = parse_list("resolutions", required("resolutions")?)?;
        let extent = section
            .get("extent")
            .map(parse_extent)
            .transpose()?;

        Ok(Self {
            name: section.get("name").unwrap_or("custom").to_string(),
            source: MatrixSource::Custom(CustomMatrix {
                origin,
                tile_size,
                resolutions,
                extent,
            }),
        })
    }

    /// Builds the validated tile matrix described by this file.
    pub fn tile_matrix(&self) -> Result<TileMatrix, ConfigError> {
        let matrix = match &self.source {
            MatrixSource::Preset(preset) => preset.matrix()?,
            MatrixSource::Custom(custom) => {
                let matrix =
                    TileMatrix::new(custom.origin, custom.tile_size, custom.resolutions.clone())?;
                match custom.extent {
                    Some(extent) => matrix.with_extent(extent)?,
                    None => matrix,
                }
            }
        };
        Ok(matrix)
    }
}

/// Default config file location (`<config dir>/tilecal/matrix.ini`).
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tilecal").join("matrix.ini"))
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn parse_list(key: &'static str, value: &str) -> Result<Vec<f64>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_value(key, item))
        .collect()
}

fn parse_extent(value: &str) -> Result<BoundingBox, ConfigError> {
    match parse_list("extent", value)?.as_slice() {
        &[x_min, y_min, x_max, y_max] => Ok(BoundingBox::from_corners(
            Point::new(x_min, y_min),
            Point::new(x_max, y_max),
        )),
        _ => Err(ConfigError::InvalidValue {
            key: "extent",
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LAMBERT93: &str = "\
[matrix]
name = lambert93
origin_x = 0
origin_y = 12000000
tile_size = 256
resolutions = 104579.22, 52277.53, 26135.49
extent = -357823.24, 6037008.69, 1313632.36, 7230727.37
";

    #[test]
    fn test_parse_custom_matrix() {
        let config = ConfigFile::parse(LAMBERT93).unwrap();

        assert_eq!(config.name, "lambert93");
        let MatrixSource::Custom(custom) = &config.source else {
            panic!("expected custom matrix, got {:?}", config.source);
        };
        assert_eq!(custom.origin, Point::new(0.0, 12000000.0));
        assert_eq!(custom.tile_size, 256);
        assert_eq!(custom.resolutions, vec![104579.22, 52277.53, 26135.49]);
        assert_eq!(custom.extent.unwrap().x_min, -357823.24);

        let matrix = config.tile_matrix().unwrap();
        assert_eq!(matrix.level_count(), 3);
        assert!(matrix.extent().is_some());
    }

    #[test]
    fn test_parse_preset() {
        let config = ConfigFile::parse("[matrix]\npreset = swisstopo\n").unwrap();

        assert_eq!(config.name, "swisstopo");
        assert_eq!(config.source, MatrixSource::Preset(Preset::SwissTopo));
        assert_eq!(config.tile_matrix().unwrap().level_count(), 29);
    }

    #[test]
    fn test_tile_size_defaults() {
        let config =
            ConfigFile::parse("[matrix]\norigin_x = 0\norigin_y = 0\nresolutions = 2, 1\n")
                .unwrap();

        assert_eq!(config.name, "custom");
        assert_eq!(config.tile_matrix().unwrap().tile_size(), 256);
    }

    #[test]
    fn test_missing_section() {
        let result = ConfigFile::parse("[provider]\npreset = ign\n");
        assert!(matches!(result, Err(ConfigError::MissingSection("matrix"))));
    }

    #[test]
    fn test_missing_key() {
        let result = ConfigFile::parse("[matrix]\norigin_x = 0\nresolutions = 1\n");
        assert!(matches!(result, Err(ConfigError::MissingKey("origin_y"))));
    }

    #[test]
    fn test_invalid_number() {
        let result = ConfigFile::parse("[matrix]\norigin_x = east\norigin_y = 0\nresolutions = 1\n");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "origin_x", .. })
        ));
    }

    #[test]
    fn test_invalid_extent_arity() {
        let result = ConfigFile::parse(
            "[matrix]\norigin_x = 0\norigin_y = 0\nresolutions = 1\nextent = 1, 2, 3\n",
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "extent", .. })
        ));
    }

    #[test]
    fn test_unknown_preset() {
        let result = ConfigFile::parse("[matrix]\npreset = bing\n");
        assert!(matches!(result, Err(ConfigError::UnknownPreset(_))));
    }

    #[test]
    fn test_inconsistent_matrix_is_rejected_on_build() {
        let config =
            ConfigFile::parse("[matrix]\norigin_x = 0\norigin_y = 0\nresolutions = 1, 2\n")
                .unwrap();

        assert!(matches!(
            config.tile_matrix(),
            Err(ConfigError::Matrix(MatrixError::NonDecreasingResolution { zoom: 1 }))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LAMBERT93.as_bytes()).unwrap();

        let config = ConfigFile::load(file.path()).unwrap();
        assert_eq!(config.name, "lambert93");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.ini");

        let err = ConfigFile::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("missing.ini"));
    }

    #[test]
    fn test_config_file_path_ends_with_matrix_ini() {
        if let Some(path) = config_file_path() {
            assert!(path.ends_with("tilecal/matrix.ini"));
        }
    }
}
