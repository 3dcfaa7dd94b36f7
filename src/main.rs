//! Main Program for Retile
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

use anyhow::{anyhow, bail, Error};
use clap::{ArgGroup, Parser};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use sha2::{Digest, Sha256};
use tracing::info;
use tracing_subscriber::EnvFilter;

use retile::{ordering, Grid, TileSize};

#[derive(Parser, Debug)]
#[command(author, version)]
#[command(group(ArgGroup::new("source").required(true).args(["order", "shuffle"])))]
struct Args {
    /// Input file
    input: PathBuf,

    /// Tile width (also height, unless --tile-height is given)
    #[arg(short = 't', long)]
    tile_size: u32,

    /// Tile height
    #[arg(long)]
    tile_height: Option<u32>,

    /// Comma-separated ordering: output tile N is input tile order[N]
    #[arg(long, value_delimiter = ',')]
    order: Option<Vec<usize>>,

    /// Generate a random ordering
    #[arg(long)]
    shuffle: bool,

    /// Random seed
    #[arg(long, requires = "shuffle")]
    seed: Option<String>,

    /// Invert the ordering (undo a previous rearrangement)
    #[arg(long)]
    inverse: bool,

    /// Only validate, do not write output
    #[arg(long)]
    check: bool,

    /// Output file
    #[arg(short = 'o', long, required_unless_present = "check")]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let tile = TileSize::new(args.tile_size, args.tile_height.unwrap_or(args.tile_size));
    if tile.is_degenerate() {
        bail!("Tile size must be nonzero");
    }

    let size = retile::image_size(&args.input)?;
    let grid = Grid::new(size, tile).ok_or(retile::Error::InvalidArrangement)?;
    info!(
        width = size.width,
        height = size.height,
        columns = grid.columns(),
        rows = grid.rows(),
        "Tile grid"
    );

    let order = resolve_ordering(&args, grid.tile_count())?;
    if args.order.is_none() || args.inverse {
        println!("Ordering: {}", join(&order));
    }

    if !retile::is_valid_input(size, tile, &order) {
        return Err(retile::Error::InvalidArrangement.into());
    }

    if args.check {
        println!("OK: {} tiles", grid.tile_count());
        return Ok(());
    }

    let output = args.output.ok_or_else(|| anyhow!("Missing output file"))?;
    retile::rearrange_tiles(&args.input, tile, &order, output)?;

    Ok(())
}

/// Random generator seeded by SHA-256 of `seed`, or from entropy.
fn seeded_random(seed: Option<&str>) -> Xoshiro256StarStar {
    if let Some(seed) = seed {
        let mut hasher = Sha256::new();
        hasher.update(seed);

        Xoshiro256StarStar::from_seed(hasher.finalize().into())
    } else {
        Xoshiro256StarStar::from_entropy()
    }
}

/// Ordering from `--order` or `--shuffle`, inverted if `--inverse` is set.
fn resolve_ordering(args: &Args, count: usize) -> Result<Vec<usize>, Error> {
    let order = match &args.order {
        Some(v) => v.clone(),
        None => ordering::random(count, &mut seeded_random(args.seed.as_deref())),
    };

    if args.inverse {
        ordering::inverse(&order).ok_or_else(|| retile::Error::InvalidArrangement.into())
    } else {
        Ok(order)
    }
}

fn join(v: &[usize]) -> String {
    v.iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
