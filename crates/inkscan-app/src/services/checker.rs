// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document checker — composes PDF inspection, rendering, page analysis, and
// report building.
//
// Raster inputs are one-page documents and skip the renderer entirely. PDFs
// are inspected with lopdf first, so a non-PDF upload is rejected before the
// external renderer is ever launched.

use std::path::Path;

use inkscan_analysis::{PageAnalyzer, PageSource, aggregate};
use inkscan_core::CheckConfig;
use inkscan_core::error::{InkscanError, Result};
use inkscan_core::integrity::{hash_bytes, hash_chunks};
use inkscan_core::types::{CheckReport, DocumentType, PageResult};
use inkscan_render::{
    PageRenderer, PdfInspector, PdftoCairoRenderer, RetryConfig, page_files_in,
    render_with_retry,
};
use tracing::{info, instrument};

/// Runs complete document checks with one renderer and labeling policy.
pub struct Checker<R = PdftoCairoRenderer> {
    analyzer: PageAnalyzer,
    renderer: R,
    retry: RetryConfig,
    verify_page_count: bool,
}

impl Checker<PdftoCairoRenderer> {
    /// Checker using the external `pdftocairo` renderer.
    pub fn from_config(config: &CheckConfig) -> Self {
        Self::with_renderer(config, PdftoCairoRenderer::new(&config.renderer))
    }
}

impl<R: PageRenderer> Checker<R> {
    pub fn with_renderer(config: &CheckConfig, renderer: R) -> Self {
        Self {
            analyzer: PageAnalyzer::new(config.label_policy),
            renderer,
            retry: RetryConfig::from(&config.retry),
            verify_page_count: config.verify_page_count,
        }
    }

    /// Check a PDF or a single page image.
    #[instrument(skip(self), fields(document = %path.display()))]
    pub async fn check_document(&self, path: &Path) -> Result<CheckReport> {
        let kind = DocumentType::from_path(path)
            .ok_or_else(|| InkscanError::UnsupportedDocument(path.display().to_string()))?;
        let bytes = tokio::fs::read(path).await?;
        let document_hash = hash_bytes(&bytes);

        let pages = if kind.is_raster() {
            self.analyzer
                .check_pages(vec![PageSource::Encoded(bytes)])
                .await?
        } else {
            let inspector = PdfInspector::from_bytes(&bytes)?;
            drop(bytes);

            let rendered = render_with_retry(&self.renderer, path, &self.retry).await?;
            info!(
                renderer = self.renderer.name(),
                declared = inspector.page_count(),
                rendered = rendered.page_count(),
                "Document rendered"
            );
            if self.verify_page_count {
                inspector.verify_rendered(rendered.page_count())?;
            }
            // `rendered` owns the scratch directory; it must outlive the analysis.
            let results = self.analyzer.check_pages(rendered.page_sources()).await?;
            drop(rendered);
            results
        };

        Ok(self.report(document_name(path), document_hash, pages))
    }

    /// Check a directory of pre-rendered page images, in page order.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub async fn check_page_dir(&self, dir: &Path) -> Result<CheckReport> {
        let files = page_files_in(dir)?;

        let mut contents = Vec::with_capacity(files.len());
        for file in &files {
            contents.push(tokio::fs::read(file).await?);
        }
        let document_hash = hash_chunks(contents.iter().map(Vec::as_slice));

        let sources = contents.into_iter().map(PageSource::Encoded).collect();
        let pages = self.analyzer.check_pages(sources).await?;
        Ok(self.report(document_name(dir), document_hash, pages))
    }

    /// Count the objects on a single page image.
    pub async fn label_image(&self, path: &Path) -> Result<PageResult> {
        let analyzer = self.analyzer;
        let source = PageSource::File(path.to_path_buf());
        tokio::task::spawn_blocking(move || analyzer.analyze(0, source))
            .await
            .map_err(|err| InkscanError::TaskFailed(err.to_string()))?
    }

    fn report(&self, name: String, hash: String, pages: Vec<PageResult>) -> CheckReport {
        let verdict = aggregate(&pages);
        CheckReport::new(name, hash, self.analyzer.policy(), pages, verdict)
    }
}

/// File or directory name for reports, falling back to the full path.
fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
