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

use thiserror::Error;

/// Image axis, used to report which dimension failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("Width"),
            Axis::Height => f.write_str("Height"),
        }
    }
}

/// Fatal errors. Any of these aborts the whole analysis.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Pixel buffer has {actual} pixels, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("Images are not the same size: {}x{} vs {}x{}", .a.0, .a.1, .b.0, .b.1)]
    SizeMismatch { a: (u32, u32), b: (u32, u32) },

    #[error("{axis} is not a power of two ({value})")]
    NotPowerOfTwo { axis: Axis, value: u32 },

    #[error("Images don't contain the same pixels (sum {sum_a:#x} vs {sum_b:#x})")]
    ContentMismatch { sum_a: u64, sum_b: u64 },

    #[error("Pixel at index {index} of A does not exist in B")]
    UnmatchedPixel { index: usize },

    #[error("Pixel at index {index} of A is not unique")]
    DuplicatePixel { index: usize },

    #[error("Every pixel in the image occurs more than once, can not establish a mapping")]
    NoUsablePixels,

    #[error("Invalid bit permutation: {0}")]
    InvalidPermutation(String),

    #[error("Permutation covers {expected} bits but the image is indexed by {actual}")]
    BitCountMismatch { expected: u32, actual: u32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
