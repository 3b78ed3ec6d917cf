// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Foreground masks — fixed-threshold binarization of rendered pages.
//
// Rendered pages are dark ink on a light background. A pixel counts as ink
// only when all three channels are dark; there is no grayscale step and no
// adaptive threshold.

use tracing::{debug, instrument};

use super::source::RasterImage;

/// A pixel is foreground when every channel is strictly below this value.
pub const FOREGROUND_THRESHOLD: u8 = 128;

/// Boolean foreground/background grid with the dimensions of its source page.
///
/// Stored row-major; `true` marks a foreground (ink) pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForegroundMask {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl ForegroundMask {
    /// Build a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A mask with every pixel set to `value`.
    pub fn filled(width: u32, height: u32, value: bool) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width as usize * height as usize],
        }
    }

    /// Test fixture: text rows, `#` marking foreground and anything else
    /// background. All rows must have the same length.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.chars().count()) as u32;
        let grid: Vec<Vec<char>> = rows.iter().map(|row| row.chars().collect()).collect();
        assert!(
            grid.iter().all(|row| row.len() == width as usize),
            "mask rows must all have the same length"
        );
        Self::from_fn(width, height, |x, y| grid[y as usize][x as usize] == '#')
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the pixel at `(x, y)` is foreground. Out-of-bounds is background.
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// Row-major view of the pixels.
    pub fn as_slice(&self) -> &[bool] {
        &self.pixels
    }
}

/// Classify every pixel of `image` as foreground (ink) or background.
///
/// Foreground iff red, green, and blue are all below [`FOREGROUND_THRESHOLD`].
/// The mask always has the image's dimensions.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn binarize(image: &RasterImage) -> ForegroundMask {
    let (width, height) = image.dimensions();
    let pixels: Vec<bool> = image
        .pixels()
        .map(|pixel| pixel.0.iter().all(|&channel| channel < FOREGROUND_THRESHOLD))
        .collect();

    let mask = ForegroundMask {
        width,
        height,
        pixels,
    };
    debug!(foreground = mask.foreground_count(), "Binarization complete");
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn mask_matches_image_dimensions() {
        let image = RgbImage::from_pixel(7, 3, Rgb([255, 255, 255]));
        let mask = binarize(&image);
        assert_eq!(mask.dimensions(), image.dimensions());
        assert_eq!(mask.as_slice().len(), 21);
    }

    #[test]
    fn white_page_has_no_foreground() {
        let image = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        assert_eq!(binarize(&image).foreground_count(), 0);
    }

    #[test]
    fn black_page_is_all_foreground() {
        let image = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        assert_eq!(binarize(&image).foreground_count(), 16);
    }

    #[test]
    fn threshold_is_strict() {
        let mut image = RgbImage::from_pixel(2, 1, Rgb([127, 127, 127]));
        image.put_pixel(1, 0, Rgb([128, 128, 128]));
        let mask = binarize(&image);
        assert!(mask.is_foreground(0, 0));
        assert!(!mask.is_foreground(1, 0));
    }

    #[test]
    fn every_channel_must_be_dark() {
        // Saturated red: dark in green and blue, bright in red.
        let mut image = RgbImage::from_pixel(3, 1, Rgb([200, 10, 10]));
        image.put_pixel(1, 0, Rgb([10, 200, 10]));
        image.put_pixel(2, 0, Rgb([10, 10, 200]));
        assert_eq!(binarize(&image).foreground_count(), 0);
    }

    #[test]
    fn binarize_is_row_major() {
        let mut image = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        image.put_pixel(2, 1, Rgb([0, 0, 0]));
        let mask = binarize(&image);
        assert!(mask.is_foreground(2, 1));
        assert_eq!(mask.as_slice(), &[false, false, false, false, false, true]);
    }

    #[test]
    fn from_rows_parses_hash_as_foreground() {
        let mask = ForegroundMask::from_rows(&["#..", ".#."]);
        assert_eq!(mask.dimensions(), (3, 2));
        assert!(mask.is_foreground(0, 0));
        assert!(mask.is_foreground(1, 1));
        assert!(!mask.is_foreground(2, 0));
        assert_eq!(mask.foreground_count(), 2);
    }

    #[test]
    fn out_of_bounds_is_background() {
        let mask = ForegroundMask::filled(2, 2, true);
        assert!(!mask.is_foreground(2, 0));
        assert!(!mask.is_foreground(0, 2));
    }
}
