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
use std::str::FromStr;

use ndarray::parallel::prelude::*;
use ndarray::prelude::*;
use rand::prelude::*;

use crate::buffer::PixelBuffer;
use crate::dimensions::Dimensions;
use crate::error::{Error, Result};

/// Permutation of pixel index bits.
///
/// Bit `b` of a source index moves to bit `dest[b]` of the destination index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitPermutation {
    dest: Vec<u32>,
}

impl BitPermutation {
    /// Validates that `dest` is a permutation of `0..dest.len()`.
    pub fn new(dest: Vec<u32>) -> Result<Self> {
        if dest.len() > 64 {
            return Err(Error::InvalidPermutation(format!(
                "{} bits is more than 64",
                dest.len()
            )));
        }

        let mut used = 0u64;
        for &d in &dest {
            if d as usize >= dest.len() {
                return Err(Error::InvalidPermutation(format!(
                    "bit {d} out of range for {} bits",
                    dest.len()
                )));
            }
            if used & (1 << d) != 0 {
                return Err(Error::InvalidPermutation(format!("bit {d} used twice")));
            }
            used |= 1 << d;
        }

        Ok(Self { dest })
    }

    pub fn identity(bits: u32) -> Self {
        Self {
            dest: (0..bits).collect(),
        }
    }

    pub fn random<R: Rng + ?Sized>(bits: u32, random: &mut R) -> Self {
        let mut dest: Vec<_> = (0..bits).collect();
        dest.shuffle(random);
        Self { dest }
    }

    pub fn bits(&self) -> u32 {
        self.dest.len() as _
    }

    /// Destination bit of each source bit.
    pub fn as_slice(&self) -> &[u32] {
        &self.dest
    }

    pub fn inverse(&self) -> Self {
        let mut dest = vec![0; self.dest.len()];
        for (s, &d) in self.dest.iter().enumerate() {
            dest[d as usize] = s as u32;
        }
        Self { dest }
    }

    pub fn apply_index(&self, index: usize) -> usize {
        self.dest
            .iter()
            .enumerate()
            .filter(|&(s, _)| index & (1 << s) != 0)
            .fold(0, |acc, (_, &d)| acc | (1 << d))
    }

    /// Moves every pixel `i` of `buf` to `apply_index(i)`.
    pub fn apply(&self, buf: &PixelBuffer) -> Result<PixelBuffer> {
        let dim = Dimensions::of(buf.width(), buf.height())?;
        if dim.total_bits() != self.bits() {
            return Err(Error::BitCountMismatch {
                expected: self.bits(),
                actual: dim.total_bits(),
            });
        }

        let inv = self.inverse();
        let w = dim.width as usize;
        let src = buf.view();
        let mut out = <Array2<u32>>::zeros((dim.height as usize, w));
        par_azip!((index (y, x), p in &mut out) {
            let i = inv.apply_index(y * w + x);
            *p = src[[i / w, i % w]];
        });

        Ok(PixelBuffer::from_array(out))
    }
}

impl fmt::Display for BitPermutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.dest.iter().enumerate() {
            if i != 0 {
                f.write_str(",")?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl FromStr for BitPermutation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::identity(0));
        }

        let dest = s
            .split(',')
            .map(|v| {
                v.trim()
                    .parse()
                    .map_err(|_| Error::InvalidPermutation(format!("{v:?} is not a bit index")))
            })
            .collect::<Result<Vec<u32>>>()?;
        Self::new(dest)
    }
}
