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

use std::collections::HashMap;

use ndarray::parallel::prelude::*;
use ndarray::Zip;
use tracing::{debug, info, warn};

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};

/// Pixel at `source` in A is the same pixel as `dest` in B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PixelMapping {
    pub source: usize,
    pub dest: usize,
}

/// How pixels that are not unique are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Skip them, as long as some unique pixel remains.
    #[default]
    Lenient,
    /// Fail with [`Error::DuplicatePixel`].
    Strict,
}

#[derive(Debug, Clone, Copy)]
struct Occurrence {
    first: usize,
    count: usize,
}

fn occurrences(buf: &PixelBuffer) -> HashMap<u32, Occurrence> {
    let mut ret = HashMap::<u32, Occurrence>::with_capacity(buf.len());
    for (i, v) in buf.iter().enumerate() {
        ret.entry(v)
            .and_modify(|o| o.count += 1)
            .or_insert(Occurrence { first: i, count: 1 });
    }
    ret
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Unique(usize),
    Duplicate,
    Missing,
}

/// Pairs every pixel that is unique in both buffers.
///
/// Indices are scanned in ascending order of A, and the first index that
/// has no counterpart in B is reported as [`Error::UnmatchedPixel`]. In
/// [`MatchMode::Strict`] the first duplicated index is fatal as well.
///
/// Buffers must have equal size.
pub fn match_unique(a: &PixelBuffer, b: &PixelBuffer, mode: MatchMode) -> Result<Vec<PixelMapping>> {
    debug_assert_eq!(a.dimensions(), b.dimensions());

    let occ_a = occurrences(a);
    let occ_b = occurrences(b);
    debug!(
        distinct_a = occ_a.len(),
        distinct_b = occ_b.len(),
        "built pixel index"
    );

    let w = a.width() as usize;
    let mut classes: Vec<_> = Zip::indexed(a.view())
        .into_par_iter()
        .map(|((y, x), v)| {
            let i = y * w + x;
            let c = match occ_b.get(v) {
                None => Class::Missing,
                Some(o) if o.count == 1 && occ_a[v].count == 1 => Class::Unique(o.first),
                Some(_) => Class::Duplicate,
            };
            (i, c)
        })
        .collect();
    classes.sort_unstable_by_key(|&(i, _)| i);

    let mut ret = Vec::new();
    let mut skipped = 0usize;
    for (source, c) in classes {
        match c {
            Class::Unique(dest) => ret.push(PixelMapping { source, dest }),
            Class::Missing => return Err(Error::UnmatchedPixel { index: source }),
            Class::Duplicate if mode == MatchMode::Strict => {
                return Err(Error::DuplicatePixel { index: source })
            }
            Class::Duplicate => skipped += 1,
        }
    }

    if skipped != 0 {
        warn!("{skipped} non-unique pixels ignored");
    }
    if ret.is_empty() {
        return Err(Error::NoUsablePixels);
    }

    info!("Found {} unique pixels", ret.len());
    Ok(ret)
}
