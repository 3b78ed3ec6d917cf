// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module — page image sources and foreground masks.

pub mod mask;
pub mod source;

pub use mask::{ForegroundMask, binarize};
pub use source::{PageSource, RasterImage};
