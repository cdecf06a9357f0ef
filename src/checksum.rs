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

use ndarray::parallel::prelude::*;
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};

/// Sum of all pixels as unsigned values.
///
/// Wrapping, so it only depends on the pixel multiset.
pub fn pixel_sum(buf: &PixelBuffer) -> u64 {
    buf.view()
        .into_par_iter()
        .map(|&p| p as u64)
        .reduce(|| 0, u64::wrapping_add)
}

/// Cheap check that both buffers plausibly hold the same pixels.
///
/// Passing this does not prove anything, it only rejects obviously wrong inputs.
pub fn verify_content(a: &PixelBuffer, b: &PixelBuffer) -> Result<()> {
    let sum_a = pixel_sum(a);
    let sum_b = pixel_sum(b);
    debug!(sum_a, sum_b, "pixel sums");

    if sum_a != sum_b {
        return Err(Error::ContentMismatch { sum_a, sum_b });
    }
    Ok(())
}
