// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Boundary outcome of a document check.
//
// Whatever surface sits in front of the checker (CLI, HTTP handler) only has
// to tell three things apart: the document passed, the document was processed
// and judged invalid, or the document could not be processed at all.

use crate::error::InkscanError;
use crate::types::DocumentVerdict;

/// Result of a check as seen by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Every page contains at least one object.
    Valid,
    /// Processed, but at least one page is blank.
    Invalid { blank_pages: Vec<usize> },
    /// The document could not be processed.
    Failed {
        /// The caller sent something unusable (no pages, not a PDF, ...).
        client_error: bool,
        message: String,
    },
}

impl CheckOutcome {
    /// Map a check result onto the three boundary outcomes.
    pub fn from_result(result: &Result<DocumentVerdict, InkscanError>) -> Self {
        match result {
            Ok(verdict) if verdict.valid => Self::Valid,
            Ok(verdict) => Self::Invalid {
                blank_pages: verdict.blank_pages.clone(),
            },
            Err(err) => Self::Failed {
                client_error: is_client_error(err),
                message: describe_error(err),
            },
        }
    }

    /// Suggested HTTP status code for this outcome.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Valid => 200,
            Self::Invalid { .. } => 422,
            Self::Failed {
                client_error: true, ..
            } => 400,
            Self::Failed { .. } => 500,
        }
    }

    /// Process exit code for command-line use.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Valid => 0,
            Self::Invalid { .. } => 1,
            Self::Failed { .. } => 2,
        }
    }

    /// One-line message suitable for a response body or terminal.
    pub fn message(&self) -> String {
        match self {
            Self::Valid => "Document is valid".into(),
            Self::Invalid { blank_pages } => {
                let pages: Vec<String> =
                    blank_pages.iter().map(|p| (p + 1).to_string()).collect();
                format!("Document is invalid: blank page(s) {}", pages.join(", "))
            }
            Self::Failed { message, .. } => format!("Could not process document: {message}"),
        }
    }
}

/// Errors caused by what the caller supplied rather than by the checker.
fn is_client_error(err: &InkscanError) -> bool {
    matches!(
        err,
        InkscanError::EmptyInput
            | InkscanError::UnsupportedDocument(_)
            | InkscanError::PdfError(_)
            | InkscanError::Decode { .. }
    )
}

/// Plain-language description of an error for the boundary message.
fn describe_error(err: &InkscanError) -> String {
    match err {
        InkscanError::EmptyInput => "the document produced no pages".into(),
        InkscanError::Decode { page, .. } => {
            format!("page {} could not be read as an image", page + 1)
        }
        InkscanError::PdfError(_) => "the upload is not a readable PDF".into(),
        InkscanError::UnsupportedDocument(kind) => format!("unsupported file type ({kind})"),
        InkscanError::RenderUnavailable(_) => "the page renderer is not installed".into(),
        InkscanError::RenderTimeout(secs) => format!("rendering took longer than {secs}s"),
        other => other.to_string(),
    }
}
