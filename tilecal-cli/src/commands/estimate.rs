//! Estimate command - tile counts over a range of zoom levels.

use clap::Args;
use tilecal::{BoundingBox, Point, SequenceError, TileSequencer};
use tracing::info;

use super::common::{resolve_matrix, CornerArgs, MatrixArgs};
use crate::error::CliError;

/// Arguments for the estimate command.
#[derive(Debug, Args)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    /// Shallowest zoom level to count
    #[arg(long, default_value_t = 0)]
    pub min_zoom: u8,

    /// Deepest zoom level to count (defaults to the matrix's deepest level)
    #[arg(long)]
    pub max_zoom: Option<u8>,

    #[command(flatten)]
    pub corners: CornerArgs,
}

/// Tile count at one zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LevelCount {
    zoom: u8,
    rows: u32,
    cols: u32,
    tiles: u64,
}

/// Run the estimate command.
pub fn run(args: EstimateArgs) -> Result<(), CliError> {
    let resolved = resolve_matrix(&args.matrix)?;
    let max_zoom = args.max_zoom.unwrap_or(resolved.matrix.max_zoom());
    let sequencer = TileSequencer::new(resolved.matrix);

    let (a, b) = args.corners.corners();
    let counts = level_counts(&sequencer, args.min_zoom, max_zoom, a, b)?;
    let total: u64 = counts.iter().map(|count| count.tiles).sum();
    info!(
        matrix = %resolved.name,
        min_zoom = args.min_zoom,
        max_zoom,
        total,
        "Estimated tile count"
    );

    println!("Tile Estimate ({})", resolved.name);
    println!("=============");
    println!();
    println!("  {:>4}  {:>8}  {:>8}  {:>12}", "Zoom", "Rows", "Columns", "Tiles");
    for count in &counts {
        println!(
            "  {:>4}  {:>8}  {:>8}  {:>12}",
            count.zoom, count.rows, count.cols, count.tiles
        );
    }
    println!();
    println!("  Total: {} tiles", total);

    Ok(())
}

fn level_counts(
    sequencer: &TileSequencer,
    min_zoom: u8,
    max_zoom: u8,
    corner_a: Point,
    corner_b: Point,
) -> Result<Vec<LevelCount>, CliError> {
    if min_zoom > max_zoom {
        return Err(SequenceError::InvalidZoomLevel {
            zoom: min_zoom,
            max_zoom,
        }
        .into());
    }
    if !corner_a.is_finite() || !corner_b.is_finite() {
        return Err(SequenceError::NonFiniteCoordinate.into());
    }
    let bbox = BoundingBox::from_corners(corner_a, corner_b);
    let mut counts = Vec::new();
    for zoom in min_zoom..=max_zoom {
        let range = sequencer.tile_range(zoom, &bbox)?;
        counts.push(LevelCount {
            zoom,
            rows: range.row_count(),
            cols: range.col_count(),
            tiles: range.tile_count(),
        });
    }
    Ok(counts)
}
