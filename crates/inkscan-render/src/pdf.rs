// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF inspection — confirm an upload is a readable PDF and read its page
// count using the `lopdf` crate, before and after rendering.

use inkscan_core::error::{InkscanError, Result};
use lopdf::Document;
use tracing::{info, instrument, warn};

/// Read-only view of an uploaded PDF.
pub struct PdfInspector {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfInspector {
    /// Inspect raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            InkscanError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        info!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self { document })
    }

    /// Number of pages in the document's page tree.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Fail unless the renderer produced exactly one image per page.
    pub fn verify_rendered(&self, rendered: usize) -> Result<()> {
        let expected = self.page_count();
        if rendered != expected {
            warn!(expected, rendered, "Rendered page count differs from page tree");
            return Err(InkscanError::PageCountMismatch { expected, rendered });
        }
        Ok(())
    }
}
