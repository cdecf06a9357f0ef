//! Main Program for Bitswizzle
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

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Error};
use bitswizzle::{analyze, BitPermutation, ConfigBuilder, Dimensions, PixelBuffer};
use clap::{Parser, Subcommand};
use image::io::Reader as ImageReader;
use rand::SeedableRng;
use sha2::{Digest, Sha256};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    /// More logging (repeat for more)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find which index bit of A maps to which index bit of B
    Find {
        /// Original image
        a: PathBuf,

        /// Swizzled image
        b: PathBuf,

        /// Fail if any pixel is not unique
        #[arg(long)]
        strict: bool,
    },

    /// Swizzle an image by permuting its index bits
    Swizzle {
        /// Input file
        input: PathBuf,

        /// Destination bit of each source bit, comma separated (eg. 1,0,2)
        #[arg(short = 'b', long)]
        bits: Option<BitPermutation>,

        /// Random seed, used when no bits are given
        #[arg(long)]
        seed: Option<String>,

        /// Output file
        #[arg(short = 'o', long)]
        output: PathBuf,
    },
}

fn load(path: &Path) -> Result<PixelBuffer, Error> {
    let im = ImageReader::new(BufReader::new(
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
    ))
    .with_guessed_format()?
    .decode()
    .with_context(|| format!("Failed to read {} as an image", path.display()))?;

    Ok(PixelBuffer::from_image(&im))
}

fn find(a: &Path, b: &Path, strict: bool) -> Result<(), Error> {
    let a = load(a)?;
    let b = load(b)?;

    let config = ConfigBuilder::new().strict(strict).build();
    let analysis = analyze(&a, &b, &config)?;

    let dim = analysis.dimensions;
    println!("Size of images: {}x{}", dim.width, dim.height);
    println!("Images use {} total bits for indexing", dim.total_bits());
    println!("Found {} unique pixels", analysis.unique_pixels);
    println!();
    for r in &analysis.bits {
        println!("{r}");
    }

    Ok(())
}

fn swizzle(
    input: &Path,
    bits: Option<BitPermutation>,
    seed: Option<String>,
    output: &Path,
) -> Result<(), Error> {
    let im = load(input)?;
    let dim = Dimensions::of(im.width(), im.height())?;

    let perm = match bits {
        Some(p) => p,
        None => {
            let mut random = if let Some(seed) = seed {
                let mut hasher = Sha256::new();
                hasher.update(seed);

                rand_xoshiro::Xoshiro256StarStar::from_seed(hasher.finalize().into())
            } else {
                rand_xoshiro::Xoshiro256StarStar::from_entropy()
            };
            BitPermutation::random(dim.total_bits(), &mut random)
        }
    };
    info!("Swizzling with {perm}");

    perm.apply(&im)?
        .to_image()
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("{perm}");

    Ok(())
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(match args.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Find { a, b, strict } => find(&a, &b, strict),
        Command::Swizzle {
            input,
            bits,
            seed,
            output,
        } => swizzle(&input, bits, seed, &output),
    }
}
