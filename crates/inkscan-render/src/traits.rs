// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Renderer abstraction.
//
// A renderer takes a source document on disk and produces one image file per
// page. The checker only depends on this trait, so tests can substitute an
// in-process fake for the external program.

use std::future::Future;
use std::path::{Path, PathBuf};

use inkscan_analysis::PageSource;
use inkscan_core::error::Result;
use tempfile::TempDir;

/// Produces page images for a document.
pub trait PageRenderer: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Render every page of `document`, in page order.
    ///
    /// A document that renders to zero pages is not an error here; the
    /// checker rejects it as empty input.
    fn render(&self, document: &Path) -> impl Future<Output = Result<RenderedDocument>> + Send;
}

/// Page images produced by a renderer.
///
/// When the renderer wrote into a scratch directory, that directory is owned
/// here and deleted on drop, so keep this value alive until every page has
/// been read.
#[derive(Debug)]
pub struct RenderedDocument {
    pages: Vec<PathBuf>,
    workdir: Option<TempDir>,
}

impl RenderedDocument {
    /// Pages that live outside any scratch directory (caller-owned files).
    pub fn from_files(pages: Vec<PathBuf>) -> Self {
        Self {
            pages,
            workdir: None,
        }
    }

    /// Pages inside `workdir`, which is removed when this value is dropped.
    pub fn in_workdir(workdir: TempDir, pages: Vec<PathBuf>) -> Self {
        Self {
            pages,
            workdir: Some(workdir),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page image paths in page order.
    pub fn pages(&self) -> &[PathBuf] {
        &self.pages
    }

    /// Scratch directory holding the pages, if the renderer created one.
    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_ref().map(|dir| dir.path())
    }

    /// Page sources for the analysis pipeline, in page order.
    pub fn page_sources(&self) -> Vec<PageSource> {
        self.pages.iter().cloned().map(PageSource::File).collect()
    }
}
