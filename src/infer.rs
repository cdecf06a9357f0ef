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

use std::fmt;

use rayon::prelude::*;

use crate::matcher::PixelMapping;

/// Inferred destination of a single source index bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitResult {
    /// Source bit always lands on destination bit `dest`.
    Mapped { source: u32, dest: u32 },
    /// No destination bit is set every time the source bit is.
    NoMatch { source: u32 },
    /// More than one destination bit survived, `candidates` is their mask.
    Ambiguous { source: u32, candidates: u64 },
}

impl BitResult {
    pub fn source(&self) -> u32 {
        match *self {
            Self::Mapped { source, .. }
            | Self::NoMatch { source }
            | Self::Ambiguous { source, .. } => source,
        }
    }

    /// Destination bit, if uniquely determined.
    pub fn dest(&self) -> Option<u32> {
        match *self {
            Self::Mapped { dest, .. } => Some(dest),
            _ => None,
        }
    }
}

impl fmt::Display for BitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Mapped { source, dest } => write!(f, "Bit {source} -> Bit {dest}"),
            Self::NoMatch { source } => {
                write!(f, "Bit {source} of A has no matching bit in B")
            }
            Self::Ambiguous { source, candidates } => {
                write!(f, "Bit {source} has multiple possible results: {candidates:#b}")
            }
        }
    }
}

fn infer_bit(mappings: &[PixelMapping], bit: u32) -> BitResult {
    let mask = 1usize << bit;

    let mut seen = false;
    let mut acc = !0u64;
    for m in mappings.iter().filter(|m| m.source & mask != 0) {
        seen = true;
        acc &= m.dest as u64;
    }

    if !seen || acc == 0 {
        BitResult::NoMatch { source: bit }
    } else if acc.is_power_of_two() {
        BitResult::Mapped {
            source: bit,
            dest: acc.trailing_zeros(),
        }
    } else {
        BitResult::Ambiguous {
            source: bit,
            candidates: acc,
        }
    }
}

/// Derives the destination bit of every source bit in `0..total_bits`.
///
/// For each source bit, AND together the destination index of every mapping
/// where the source bit is set. Only destination bits that are always set
/// survive. Each bit is independent of the others, so one bad bit doesn't
/// affect the rest.
pub fn infer_bits(mappings: &[PixelMapping], total_bits: u32) -> Vec<BitResult> {
    (0..total_bits)
        .into_par_iter()
        .map(|bit| infer_bit(mappings, bit))
        .collect()
}
