//! # Voxel Flood Mesher Entry Point
//!
//! Parses the command line and hands it to the library's `run()`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- --generation perlin --render-distance 2
//! ```

use clap::Parser;

fn main() -> anyhow::Result<()> {
    voxel_flood_mesher::run(voxel_flood_mesher::Cli::parse())
}
