//! Providers command - lists the built-in tile matrices.

use tilecal::matrix::presets::Preset;

use crate::error::CliError;

/// Run the providers command.
pub fn run() -> Result<(), CliError> {
    println!("Built-in Tile Matrices");
    println!("======================");
    println!();

    for preset in Preset::all() {
        let matrix = preset.matrix()?;
        println!("  {:<12} {}", preset.name(), preset.description());
        println!(
            "  {:<12} levels 0-{}, {} px tiles, origin ({}, {})",
            "",
            matrix.max_zoom(),
            matrix.tile_size(),
            matrix.origin().x,
            matrix.origin().y
        );
    }

    println!();
    println!("Select one with --provider, or describe your own with --config <FILE>.");
    Ok(())
}
