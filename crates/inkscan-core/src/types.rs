// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Inkscan page checker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Object count for a single rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// Zero-based position of the page in the document.
    pub page_index: usize,
    /// Number of distinct foreground objects detected on the page.
    pub object_count: usize,
}

impl PageResult {
    pub fn new(page_index: usize, object_count: usize) -> Self {
        Self {
            page_index,
            object_count,
        }
    }

    /// A page with no detected objects is blank (or degenerate).
    pub fn is_blank(&self) -> bool {
        self.object_count == 0
    }
}

/// Pass/fail judgement for a whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentVerdict {
    /// `true` when no page was found blank.
    pub valid: bool,
    /// Indices of the pages whose object count was zero, in page order.
    pub blank_pages: Vec<usize>,
}

impl DocumentVerdict {
    pub fn valid() -> Self {
        Self {
            valid: true,
            blank_pages: Vec::new(),
        }
    }

    pub fn invalid(blank_pages: Vec<usize>) -> Self {
        Self {
            valid: false,
            blank_pages,
        }
    }
}

/// Policy applied when the labeler starts a fresh component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelPolicy {
    /// Label value 2 is never handed out: the pixel that would receive it
    /// stays unlabeled and numbering continues at 3. Matches the counts
    /// produced by the deployed checker.
    #[default]
    Reference,
    /// Every fresh component receives a label; the count equals the number
    /// of 8-connected regions.
    Standard,
}

impl LabelPolicy {
    /// Parse a policy name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "reference" => Some(Self::Reference),
            "standard" => Some(Self::Standard),
            _ => None,
        }
    }
}

impl std::fmt::Display for LabelPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reference => write!(f, "reference"),
            Self::Standard => write!(f, "standard"),
        }
    }
}

/// Supported input document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Pdf,
    Jpeg,
    Png,
    Tiff,
}

impl DocumentType {
    /// Infer document type from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    /// Infer document type from a path's extension.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Raster formats are already a single page image and skip rendering.
    pub fn is_raster(&self) -> bool {
        !matches!(self, Self::Pdf)
    }
}

/// How an error should be handled by a retrying caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClass {
    /// Timeout or interrupted process; retrying may succeed.
    Transient,
    /// Bad input or missing tooling; retrying cannot help.
    Permanent,
}

/// Full record of one document check, suitable for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Human-readable document name (usually the file name).
    pub document_name: String,
    /// SHA-256 of the input bytes, lowercase hex.
    pub document_hash: String,
    /// Labeling policy the counts were produced with.
    pub policy: LabelPolicy,
    /// Per-page object counts in page order.
    pub pages: Vec<PageResult>,
    pub verdict: DocumentVerdict,
    pub checked_at: DateTime<Utc>,
}

impl CheckReport {
    pub fn new(
        document_name: impl Into<String>,
        document_hash: impl Into<String>,
        policy: LabelPolicy,
        pages: Vec<PageResult>,
        verdict: DocumentVerdict,
    ) -> Self {
        Self {
            document_name: document_name.into(),
            document_hash: document_hash.into(),
            policy,
            pages,
            verdict,
            checked_at: Utc::now(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_page_is_blank() {
        assert!(PageResult::new(0, 0).is_blank());
        assert!(!PageResult::new(0, 4).is_blank());
    }

    #[test]
    fn policy_names_round_trip_through_display() {
        for policy in [LabelPolicy::Reference, LabelPolicy::Standard] {
            assert_eq!(LabelPolicy::from_name(&policy.to_string()), Some(policy));
        }
        assert_eq!(LabelPolicy::from_name("STANDARD"), Some(LabelPolicy::Standard));
        assert_eq!(LabelPolicy::from_name("union-find"), None);
    }

    #[test]
    fn default_policy_is_reference() {
        assert_eq!(LabelPolicy::default(), LabelPolicy::Reference);
    }

    #[test]
    fn policy_serializes_kebab_case() {
        let json = serde_json::to_string(&LabelPolicy::Standard).unwrap();
        assert_eq!(json, "\"standard\"");
    }

    #[test]
    fn document_type_from_path() {
        let path = std::path::Path::new("/tmp/upload/Existing.PDF");
        assert_eq!(DocumentType::from_path(path), Some(DocumentType::Pdf));
        assert_eq!(
            DocumentType::from_path(std::path::Path::new("page-01.png")),
            Some(DocumentType::Png)
        );
        assert_eq!(DocumentType::from_path(std::path::Path::new("notes.docx")), None);
        assert!(DocumentType::Png.is_raster());
        assert!(!DocumentType::Pdf.is_raster());
    }

    #[test]
    fn report_serializes_verdict_and_pages() {
        let report = CheckReport::new(
            "existing.pdf",
            "abc123",
            LabelPolicy::Reference,
            vec![PageResult::new(0, 3), PageResult::new(1, 0)],
            DocumentVerdict::invalid(vec![1]),
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["verdict"]["valid"], false);
        assert_eq!(value["verdict"]["blank_pages"][0], 1);
        assert_eq!(value["pages"][0]["object_count"], 3);
        assert_eq!(value["policy"], "reference");
        assert_eq!(report.page_count(), 2);
    }
}
