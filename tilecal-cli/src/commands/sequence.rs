//! Sequence command - tiles and calibration for one zoom level.

use clap::Args;
use serde_json::json;
use tilecal::{TileSequenceAndCalibration, TileSequencer};
use tracing::info;

use super::common::{resolve_matrix, CornerArgs, MatrixArgs};
use crate::error::CliError;

/// Arguments for the sequence command.
#[derive(Debug, Args)]
pub struct SequenceArgs {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    /// Zoom level to compute the tiles at
    #[arg(short, long)]
    pub zoom: u8,

    /// Deepest accepted zoom level (defaults to the matrix's deepest level)
    #[arg(long, value_name = "N")]
    pub levels: Option<u8>,

    /// Print every tile of the sequence
    #[arg(long)]
    pub list: bool,

    /// Print the result as JSON
    #[arg(long, conflicts_with = "list")]
    pub json: bool,

    #[command(flatten)]
    pub corners: CornerArgs,
}

/// Run the sequence command.
pub fn run(args: SequenceArgs) -> Result<(), CliError> {
    let resolved = resolve_matrix(&args.matrix)?;
    let levels = args.levels.unwrap_or(resolved.matrix.max_zoom());
    let sequencer = TileSequencer::new(resolved.matrix);

    let (a, b) = args.corners.corners();
    let result = sequencer.tile_sequence_and_calibration(args.zoom, levels, a, b)?;
    info!(
        matrix = %resolved.name,
        zoom = args.zoom,
        tiles = result.tile_sequence.len(),
        "Computed tile sequence"
    );

    if args.json {
        println!("{}", render_json(&resolved.name, &result)?);
        return Ok(());
    }

    print_summary(&resolved.name, &result);
    if args.list {
        println!();
        for tile in &result.tile_sequence {
            println!("{} {}", tile.row, tile.col);
        }
    }

    Ok(())
}

fn render_json(name: &str, result: &TileSequenceAndCalibration) -> Result<String, CliError> {
    let document = json!({
        "matrix": name,
        "zoom": result.tile_range.zoom(),
        "tile_range": result.tile_range,
        "tile_sequence": result.tile_sequence,
        "calibration": result.calibration,
        "calibration_method": result.calibration.method(),
        "calibration_points": result.calibration.calibration_points(),
        "mosaic_size": [result.calibration.width_px(), result.calibration.height_px()],
    });
    Ok(serde_json::to_string_pretty(&document)?)
}

fn print_summary(name: &str, result: &TileSequenceAndCalibration) {
    let range = &result.tile_range;
    let cal = &result.calibration;
    let bottom_right = cal.bottom_right();

    println!("Tile Sequence");
    println!("=============");
    println!();
    println!("  Matrix:       {} (zoom {})", name, range.zoom());
    println!(
        "  Rows:         {}..={} ({})",
        range.row_min(),
        range.row_max(),
        range.row_count()
    );
    println!(
        "  Columns:      {}..={} ({})",
        range.col_min(),
        range.col_max(),
        range.col_count()
    );
    println!("  Tiles:        {}", range.tile_count());
    println!();
    println!("Calibration");
    println!("===========");
    println!();
    println!("  Mosaic:       {} × {} px", cal.width_px(), cal.height_px());
    println!("  Resolution:   {} units/px", cal.resolution);
    println!("  Top-left:     {:.3}, {:.3}", cal.top_left.x, cal.top_left.y);
    println!("  Bottom-right: {:.3}, {:.3}", bottom_right.x, bottom_right.y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilecal::matrix::presets;
    use tilecal::Point;

    #[test]
    fn test_render_json_contains_reference_tiles() {
        let sequencer = TileSequencer::new(presets::ign().unwrap());
        let result = sequencer
            .tile_sequence_and_calibration(
                18,
                18,
                Point::new(275951.78, 6241946.52),
                Point::new(276951.78, 6240946.52),
            )
            .unwrap();

        let rendered = render_json("ign", &result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["matrix"], "ign");
        assert_eq!(value["zoom"], 18);
        assert_eq!(value["tile_sequence"].as_array().unwrap().len(), 64);
        assert_eq!(value["tile_sequence"][0]["row"], 90241);
        assert_eq!(value["tile_sequence"][0]["col"], 132877);
        assert_eq!(value["tile_range"]["row_max"], 90248);
        assert_eq!(value["calibration_method"], "SIMPLE_2_POINTS");
        assert_eq!(value["mosaic_size"][0], 2048);
    }
}
