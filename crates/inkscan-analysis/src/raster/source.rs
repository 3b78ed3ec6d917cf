// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page sources — where a page raster comes from, and how it is decoded into
// an 8-bit RGB image for binarization.

use std::path::PathBuf;

use image::{DynamicImage, RgbImage};
use inkscan_core::error::{InkscanError, Result};
use tracing::{debug, instrument};

/// A decoded page: `width x height` pixels, three 8-bit channels each.
pub type RasterImage = RgbImage;

/// One page of a document, in whatever form the renderer handed it over.
///
/// Decoding is deferred to [`PageSource::decode`] so that it runs inside the
/// page's own task; a page that cannot be read fails that task.
#[derive(Debug, Clone)]
pub enum PageSource {
    /// Already decoded pixels.
    Decoded(RasterImage),
    /// Encoded image bytes (PNG, JPEG, TIFF, ...).
    Encoded(Vec<u8>),
    /// An image file on disk.
    File(PathBuf),
}

impl PageSource {
    /// Decode the page into an RGB raster.
    ///
    /// `page` is the zero-based page index, reported in the error when the
    /// image cannot be read. Alpha channels are dropped; palette, gray, and
    /// 16-bit images are converted to 8-bit RGB.
    #[instrument(skip(self), fields(source = %self.kind()))]
    pub fn decode(self, page: usize) -> Result<RasterImage> {
        let decoded = match self {
            Self::Decoded(image) => return Ok(image),
            Self::Encoded(data) => image::load_from_memory(&data).map_err(|err| {
                InkscanError::Decode {
                    page,
                    reason: format!("failed to decode {} bytes: {}", data.len(), err),
                }
            })?,
            Self::File(path) => image::open(&path).map_err(|err| InkscanError::Decode {
                page,
                reason: format!("failed to open {}: {}", path.display(), err),
            })?,
        };
        debug!(
            width = decoded.width(),
            height = decoded.height(),
            "Page image decoded"
        );
        Ok(to_raster(decoded))
    }

    /// Short name of the source variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Decoded(_) => "decoded",
            Self::Encoded(_) => "encoded",
            Self::File(_) => "file",
        }
    }
}

impl From<RasterImage> for PageSource {
    fn from(image: RasterImage) -> Self {
        Self::Decoded(image)
    }
}

impl From<DynamicImage> for PageSource {
    fn from(image: DynamicImage) -> Self {
        Self::Decoded(to_raster(image))
    }
}

impl From<PathBuf> for PageSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

fn to_raster(image: DynamicImage) -> RasterImage {
    match image {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    }
}
