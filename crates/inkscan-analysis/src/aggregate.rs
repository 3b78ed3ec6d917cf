// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document verdicts from per-page object counts.

use inkscan_core::types::{DocumentVerdict, PageResult};

/// Combine per-page results into a document verdict.
///
/// The document is invalid as soon as any page has an object count of zero.
/// Page order does not matter. An empty slice is vacuously valid; callers
/// that must reject zero-page documents do so before aggregating.
pub fn aggregate(results: &[PageResult]) -> DocumentVerdict {
    let mut blank_pages: Vec<usize> = results
        .iter()
        .filter(|result| result.is_blank())
        .map(|result| result.page_index)
        .collect();

    if blank_pages.is_empty() {
        DocumentVerdict::valid()
    } else {
        blank_pages.sort_unstable();
        DocumentVerdict::invalid(blank_pages)
    }
}
