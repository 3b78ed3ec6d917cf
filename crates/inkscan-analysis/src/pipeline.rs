// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page pipeline — decode, binarize, label, and aggregate.
//
// Every page is analysed in its own blocking task. The check waits for all of
// them and fails as a whole if any single page fails; no page is ever dropped
// from the verdict.

use inkscan_core::error::{InkscanError, Result};
use inkscan_core::types::{DocumentVerdict, LabelPolicy, PageResult};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::aggregate::aggregate;
use crate::label::components::count_objects;
use crate::raster::mask::binarize;
use crate::raster::source::{PageSource, RasterImage};

/// Count the foreground objects on one decoded page (reference policy).
pub fn label_page(image: &RasterImage) -> usize {
    PageAnalyzer::default().label_page(image)
}

/// Check a document given its pages in order (reference policy).
pub async fn check_document(pages: Vec<PageSource>) -> Result<DocumentVerdict> {
    PageAnalyzer::default().check_document(pages).await
}

/// Per-page results for a document given its pages in order (reference policy).
pub async fn check_pages(pages: Vec<PageSource>) -> Result<Vec<PageResult>> {
    PageAnalyzer::default().check_pages(pages).await
}

/// Runs the page pipeline with a fixed labeling policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageAnalyzer {
    policy: LabelPolicy,
}

impl PageAnalyzer {
    pub fn new(policy: LabelPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> LabelPolicy {
        self.policy
    }

    /// Binarize and label one decoded page, returning its object count.
    pub fn label_page(&self, image: &RasterImage) -> usize {
        let mask = binarize(image);
        count_objects(&mask, self.policy)
    }

    /// Decode and label a single page.
    #[instrument(skip(self, source), fields(policy = %self.policy))]
    pub fn analyze(&self, page_index: usize, source: PageSource) -> Result<PageResult> {
        let image = source.decode(page_index)?;
        let object_count = self.label_page(&image);
        debug!(page = page_index, object_count, "Page analysed");
        Ok(PageResult::new(page_index, object_count))
    }

    /// Analyse every page concurrently and return the results in page order.
    ///
    /// Fails with [`InkscanError::EmptyInput`] when `pages` is empty. If any
    /// page fails, the first failure in page order is returned, after all
    /// page tasks have finished.
    #[instrument(skip_all, fields(pages = pages.len(), policy = %self.policy))]
    pub async fn check_pages(&self, pages: Vec<PageSource>) -> Result<Vec<PageResult>> {
        if pages.is_empty() {
            warn!("Document has no pages");
            return Err(InkscanError::EmptyInput);
        }

        let page_count = pages.len();
        let handles: Vec<JoinHandle<Result<PageResult>>> = pages
            .into_iter()
            .enumerate()
            .map(|(page_index, source)| {
                let analyzer = *self;
                tokio::task::spawn_blocking(move || analyzer.analyze(page_index, source))
            })
            .collect();

        let mut results = Vec::with_capacity(page_count);
        let mut first_error: Option<InkscanError> = None;

        for (page_index, handle) in handles.into_iter().enumerate() {
            let outcome = handle.await.map_err(|err| {
                InkscanError::TaskFailed(format!("page {page_index}: {err}"))
            });
            match outcome.and_then(|result| result) {
                Ok(result) => results.push(result),
                Err(err) => {
                    warn!(page = page_index, error = %err, "Page analysis failed");
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }

        info!(pages = results.len(), "All pages analysed");
        Ok(results)
    }

    /// Analyse every page and aggregate the results into a verdict.
    pub async fn check_document(&self, pages: Vec<PageSource>) -> Result<DocumentVerdict> {
        let results = self.check_pages(pages).await?;
        let verdict = aggregate(&results);
        info!(
            valid = verdict.valid,
            blank_pages = ?verdict.blank_pages,
            "Document verdict"
        );
        Ok(verdict)
    }
}
