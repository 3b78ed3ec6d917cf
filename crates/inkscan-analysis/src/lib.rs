// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// inkscan-analysis — Page analysis for the Inkscan checker.
//
// Provides raster page loading, fixed-threshold binarization into a foreground
// mask, 8-connected component labeling, per-document aggregation, and the
// concurrent page pipeline that ties them together.

pub mod aggregate;
pub mod label;
pub mod pipeline;
pub mod raster;

// Re-export the primary entry points so callers can use `inkscan_analysis::check_document` etc.
pub use aggregate::aggregate;
pub use inkscan_core::types::{DocumentVerdict, LabelPolicy, PageResult};
pub use label::components::{LabelGrid, count_objects, label_components};
pub use pipeline::{PageAnalyzer, check_document, check_pages, label_page};
pub use raster::mask::{FOREGROUND_THRESHOLD, ForegroundMask, binarize};
pub use raster::source::{PageSource, RasterImage};
