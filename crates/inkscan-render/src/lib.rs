// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inkscan Render — turns source documents into ordered page images.  The
// analysis crate never renders; this crate wraps the external renderer
// program, inspects uploads with lopdf, and owns the renderer retry policy.

pub mod pages;
pub mod pdf;
pub mod pdftocairo;
pub mod retry;
pub mod traits;

pub use pages::page_files_in;
pub use pdf::PdfInspector;
pub use pdftocairo::PdftoCairoRenderer;
pub use retry::{RetryConfig, render_with_retry};
pub use traits::{PageRenderer, RenderedDocument};
