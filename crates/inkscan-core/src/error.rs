// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Inkscan.

use thiserror::Error;

/// Top-level error type for all Inkscan operations.
#[derive(Debug, Error)]
pub enum InkscanError {
    // -- Page analysis --
    #[error("page {page} could not be decoded: {reason}")]
    Decode { page: usize, reason: String },

    #[error("no pages to check")]
    EmptyInput,

    #[error("page task failed: {0}")]
    TaskFailed(String),

    // -- Rendering --
    #[error("renderer unavailable: {0}")]
    RenderUnavailable(String),

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("renderer timed out after {0}s")]
    RenderTimeout(u64),

    #[error("renderer produced {rendered} pages but the document has {expected}")]
    PageCountMismatch { expected: usize, rendered: usize },

    // -- Input documents --
    #[error("unsupported document type: {0}")]
    UnsupportedDocument(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, InkscanError>;
