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

use crate::error::{Axis, Error, Result};

/// Validated power-of-2 image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    pub width_bits: u32,
    pub height_bits: u32,
}

fn po2_bits(axis: Axis, value: u32) -> Result<u32> {
    // ilog2 panics on zero
    if value == 0 {
        return Err(Error::NotPowerOfTwo { axis, value });
    }

    let bits = value.ilog2();
    if (1u32 << bits) != value {
        return Err(Error::NotPowerOfTwo { axis, value });
    }
    Ok(bits)
}

impl Dimensions {
    /// Checks that both images have the same power-of-2 size.
    pub fn validate(a: (u32, u32), b: (u32, u32)) -> Result<Self> {
        if a != b {
            return Err(Error::SizeMismatch { a, b });
        }

        Self::of(a.0, a.1)
    }

    /// Checks a single image size.
    pub fn of(width: u32, height: u32) -> Result<Self> {
        let width_bits = po2_bits(Axis::Width, width)?;
        let height_bits = po2_bits(Axis::Height, height)?;

        Ok(Self {
            width,
            height,
            width_bits,
            height_bits,
        })
    }

    /// Number of bits in a linear pixel index.
    pub fn total_bits(&self) -> u32 {
        self.width_bits + self.height_bits
    }

    pub fn total_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
