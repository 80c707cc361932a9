//! Main Program for Tilescramble
//! Run with `--help` for more instruction

// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::path::PathBuf;

use anyhow::{bail, Error};
use clap::Parser;
use flexi_logger::Logger;
use log::warn;

use tilescramble::batch::{self, BatchConfig};
use tilescramble::{ConfigBuilder, Scrambler, SelectionPolicy, DEFAULT_GRID_SIZE};

#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    /// Directory containing input images
    input: PathBuf,

    /// Number of tiles per axis
    #[arg(short = 'g', long, default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: usize,

    /// Tile selection policy (all, nonzero)
    #[arg(short = 'p', long, default_value = "nonzero")]
    policy: SelectionPolicy,

    /// Brightness threshold for the nonzero policy (0-255 scale)
    #[arg(long, default_value_t = tilescramble::DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Do not rotate tiles
    #[arg(long)]
    no_rotate: bool,

    /// File extension to process (repeatable)
    #[arg(short = 'e', long = "extension", default_value = "bmp")]
    extensions: Vec<String>,

    /// Output directory name, created inside the input directory
    #[arg(long, default_value = "output_data")]
    output_dir_name: String,

    /// Random seed
    #[arg(long)]
    seed: Option<String>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    let _logger = Logger::try_with_env_or_str(&args.log_level)?.start()?;

    let config = ConfigBuilder::new()
        .grid_size(args.grid_size)
        .policy(args.policy)
        .threshold(args.threshold)
        .rotate(!args.no_rotate)
        .build();
    let scrambler = Scrambler::new(config);

    let batch_config = BatchConfig {
        extensions: args.extensions,
        output_dir_name: args.output_dir_name,
        seed: args.seed,
    };

    let summary = batch::run(&args.input, &scrambler, &batch_config)?;

    if summary.total() == 0 {
        warn!("No images found in {}", args.input.display());
    }
    if !summary.failed.is_empty() {
        bail!(
            "{} of {} image(s) failed",
            summary.failed.len(),
            summary.total()
        );
    }

    Ok(())
}
