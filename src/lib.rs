//! Library to find the bit-level swizzle between two images.
//!
//! Given image A and image B, where B is A with every pixel moved by some
//! fixed function of its index, [analyze] finds out where each bit of the
//! pixel index goes. It works if:
//!
//! * Both images have the same power-of-2 size.
//! * Both images contain the same pixels.
//! * Enough pixels are unique to pin down every bit.
//!
//! The result is one [BitResult] per index bit. To create test inputs,
//! [BitPermutation] can swizzle an image with a known permutation.

// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//

mod buffer;
mod checksum;
mod dimensions;
mod error;
mod infer;
mod matcher;
mod swizzle;

use tracing::{debug, info};

#[doc(inline)]
pub use crate::buffer::PixelBuffer;
#[doc(inline)]
pub use crate::checksum::{pixel_sum, verify_content};
#[doc(inline)]
pub use crate::dimensions::Dimensions;
#[doc(inline)]
pub use crate::error::{Axis, Error, Result};
#[doc(inline)]
pub use crate::infer::{infer_bits, BitResult};
#[doc(inline)]
pub use crate::matcher::{match_unique, MatchMode, PixelMapping};
#[doc(inline)]
pub use crate::swizzle::BitPermutation;

/// Analysis configuration. Build with [ConfigBuilder].
#[derive(Debug, Clone, Default)]
pub struct Config {
    mode: MatchMode,
}

impl Config {
    pub fn mode(&self) -> MatchMode {
        self.mode
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// How non-unique pixels are handled. Defaults to [MatchMode::Lenient].
    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Shorthand for [MatchMode::Strict].
    pub fn strict(self, strict: bool) -> Self {
        self.mode(if strict {
            MatchMode::Strict
        } else {
            MatchMode::Lenient
        })
    }

    pub fn build(self) -> Config {
        self.config
    }
}

/// Result of a successful [analyze].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub dimensions: Dimensions,
    /// Number of pixels unique in both images.
    pub unique_pixels: usize,
    /// One entry per source bit, in order.
    pub bits: Vec<BitResult>,
}

impl Analysis {
    /// Every bit has a single destination.
    pub fn is_complete(&self) -> bool {
        self.bits.iter().all(|b| b.dest().is_some())
    }

    /// Returns the bit permutation, if every bit maps to a distinct bit.
    pub fn permutation(&self) -> Option<BitPermutation> {
        let dest = self.bits.iter().map(|b| b.dest()).collect::<Option<Vec<_>>>()?;
        BitPermutation::new(dest).ok()
    }
}

/// Main analysis.
///
/// Runs validation, content check, pixel matching, and bit inference in that
/// order. Any fatal error stops the pipeline.
pub fn analyze(a: &PixelBuffer, b: &PixelBuffer, config: &Config) -> Result<Analysis> {
    let dimensions = Dimensions::validate(a.dimensions(), b.dimensions())?;
    info!(
        "Size of images: {}x{}, {} bits for indexing",
        dimensions.width,
        dimensions.height,
        dimensions.total_bits()
    );

    verify_content(a, b)?;

    debug!("Scanning for unique pixels");
    let mappings = match_unique(a, b, config.mode)?;

    let bits = infer_bits(&mappings, dimensions.total_bits());
    Ok(Analysis {
        dimensions,
        unique_pixels: mappings.len(),
        bits,
    })
}
