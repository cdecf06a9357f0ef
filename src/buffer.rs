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

use image::{DynamicImage, Rgba, RgbaImage};
use ndarray::parallel::prelude::*;
use ndarray::prelude::*;

use crate::error::{Error, Result};

#[inline]
fn pack_argb(Rgba([r, g, b, a]): Rgba<u8>) -> u32 {
    u32::from_be_bytes([a, r, g, b])
}

#[inline]
fn unpack_argb(v: u32) -> Rgba<u8> {
    let [a, r, g, b] = v.to_be_bytes();
    Rgba([r, g, b, a])
}

/// Immutable image of packed pixel values.
///
/// Stored as a `(height, width)` array. The linear index of pixel `(y, x)`
/// is `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Array2<u32>,
}

impl PixelBuffer {
    /// Builds a buffer from row-major pixel values.
    pub fn from_vec(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self> {
        let expected = width as usize * height as usize;
        let actual = pixels.len();

        let pixels = Array2::from_shape_vec((height as usize, width as usize), pixels)
            .map_err(|_| Error::BufferLength { expected, actual })?;
        Ok(Self { pixels })
    }

    pub(crate) fn from_array(pixels: Array2<u32>) -> Self {
        Self { pixels }
    }

    /// Converts a decoded image, packing every pixel as `0xAARRGGBB`.
    pub fn from_image(im: &DynamicImage) -> Self {
        let im = im.to_rgba8();

        let mut pixels = <Array2<u32>>::zeros((im.height() as usize, im.width() as usize));
        par_azip!((index (y, x), p in &mut pixels) {
            *p = pack_argb(*im.get_pixel(x as _, y as _));
        });
        Self { pixels }
    }

    /// Converts back into an 8-bit RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            unpack_argb(self.pixels[[y as usize, x as usize]])
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.ncols() as _
    }

    pub fn height(&self) -> u32 {
        self.pixels.nrows() as _
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at linear index, `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<u32> {
        let w = self.pixels.ncols();
        if w == 0 {
            return None;
        }
        self.pixels.get([index / w, index % w]).copied()
    }

    pub fn view(&self) -> ArrayView2<'_, u32> {
        self.pixels.view()
    }

    /// Iterates pixels in linear index order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.pixels.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_is_row_major() {
        let buf = PixelBuffer::from_vec(2, 3, (0..6).collect()).unwrap();
        assert_eq!(buf.dimensions(), (2, 3));
        assert_eq!(buf.view()[[1, 0]], 2);
        assert_eq!(buf.get(5), Some(5));
        assert_eq!(buf.get(6), None);
        assert_eq!(buf.iter().collect::<Vec<_>>(), (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        assert_eq!(
            PixelBuffer::from_vec(4, 4, vec![0; 15]),
            Err(Error::BufferLength {
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn get_on_empty_buffer() {
        let buf = PixelBuffer::from_vec(0, 4, Vec::new()).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.get(0), None);
    }

    #[test]
    fn image_packing_is_argb() {
        let mut im = RgbaImage::new(2, 1);
        im.put_pixel(1, 0, Rgba([0x11, 0x22, 0x33, 0x44]));
        let buf = PixelBuffer::from_image(&DynamicImage::ImageRgba8(im.clone()));
        assert_eq!(buf.get(1), Some(0x4411_2233));
        assert_eq!(buf.to_image(), im);
    }
}
