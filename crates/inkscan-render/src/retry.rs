// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Retry engine with exponential backoff + jitter for the page renderer.
//
// Only the renderer is retried. Page analysis never is: a page that cannot be
// decoded or labeled fails the check outright.

use std::path::Path;
use std::time::Duration;

use inkscan_core::config::RetrySettings;
use inkscan_core::error::{InkscanError, Result};
use inkscan_core::types::ErrorClass;
use tracing::{debug, info, warn};

use crate::traits::{PageRenderer, RenderedDocument};

/// Retry configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Base delay between retries (exponential backoff).
    pub base_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::from(&RetrySettings::default())
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            base_delay: Duration::from_millis(settings.base_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
        }
    }
}

/// Result of evaluating whether to retry.
#[derive(Debug)]
pub enum RetryDecision {
    /// Retry after this delay.
    RetryAfter(Duration),
    /// Do not retry; the error is permanent.
    GiveUp,
    /// Maximum retries exhausted.
    Exhausted,
}

/// Classify an `InkscanError` for retry decisions.
pub fn classify_error(err: &InkscanError) -> ErrorClass {
    match err {
        // Transient: the renderer ran but failed this time
        InkscanError::RenderTimeout(_) => ErrorClass::Transient,
        InkscanError::Render(_) => ErrorClass::Transient,

        // IO errors depend on the kind
        InkscanError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::TimedOut
            | std::io::ErrorKind::Interrupted
            | std::io::ErrorKind::WouldBlock => ErrorClass::Transient,
            _ => ErrorClass::Permanent,
        },

        // Permanent: nothing changes between attempts
        InkscanError::RenderUnavailable(_)
        | InkscanError::PageCountMismatch { .. }
        | InkscanError::Decode { .. }
        | InkscanError::EmptyInput
        | InkscanError::TaskFailed(_)
        | InkscanError::UnsupportedDocument(_)
        | InkscanError::PdfError(_)
        | InkscanError::Config(_)
        | InkscanError::Serialization(_) => ErrorClass::Permanent,
    }
}

/// Decide whether to retry based on the error class and attempt count.
pub fn should_retry(err: &InkscanError, attempt: u32, config: &RetryConfig) -> RetryDecision {
    match classify_error(err) {
        ErrorClass::Permanent => {
            info!("permanent error, not retrying");
            RetryDecision::GiveUp
        }
        ErrorClass::Transient => {
            if attempt >= config.max_retries {
                warn!(attempt, max = config.max_retries, "retry limit exhausted");
                RetryDecision::Exhausted
            } else {
                let delay = compute_delay(attempt, config);
                debug!(attempt, delay_ms = delay.as_millis(), "scheduling retry");
                RetryDecision::RetryAfter(delay)
            }
        }
    }
}

/// Render `document`, retrying transient failures with backoff.
///
/// Returns the last error once retries are exhausted or a permanent error
/// is hit.
pub async fn render_with_retry<R: PageRenderer>(
    renderer: &R,
    document: &Path,
    config: &RetryConfig,
) -> Result<RenderedDocument> {
    let mut attempt = 0;
    loop {
        match renderer.render(document).await {
            Ok(rendered) => {
                if attempt > 0 {
                    info!(renderer = renderer.name(), attempt, "render succeeded after retry");
                }
                return Ok(rendered);
            }
            Err(err) => match should_retry(&err, attempt, config) {
                RetryDecision::RetryAfter(delay) => {
                    warn!(
                        renderer = renderer.name(),
                        attempt,
                        error = %err,
                        "render failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                RetryDecision::GiveUp | RetryDecision::Exhausted => return Err(err),
            },
        }
    }
}

/// Compute exponential backoff delay with jitter.
///
/// delay = min(base * 2^attempt + jitter, max_delay)
fn compute_delay(attempt: u32, config: &RetryConfig) -> Duration {
    let base_ms = config.base_delay.as_millis() as u64;
    let exp_ms = base_ms.saturating_mul(1u64 << attempt.min(10));
    let total_ms = exp_ms.saturating_add(jitter(base_ms, attempt));
    let capped_ms = total_ms.min(config.max_delay.as_millis() as u64);
    Duration::from_millis(capped_ms)
}

/// Deterministic jitter in [0, base) derived from the attempt number.
fn jitter(base_ms: u64, attempt: u32) -> u64 {
    let hash = (attempt as u64).wrapping_mul(6364136223846793005);
    hash % base_ms.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn timeout_is_transient() {
        assert_eq!(
            classify_error(&InkscanError::RenderTimeout(60)),
            ErrorClass::Transient
        );
    }

    #[test]
    fn missing_renderer_is_permanent() {
        let err = InkscanError::RenderUnavailable("pdftocairo: not found".into());
        assert_eq!(classify_error(&err), ErrorClass::Permanent);
    }

    #[test]
    fn decode_failure_is_permanent() {
        let err = InkscanError::Decode {
            page: 0,
            reason: "bad png".into(),
        };
        assert_eq!(classify_error(&err), ErrorClass::Permanent);
    }

    #[test]
    fn retry_respects_max() {
        let config = RetryConfig {
            max_retries: 3,
            ..Default::default()
        };
        let err = InkscanError::Render("exit status 1".into());
        assert!(matches!(should_retry(&err, 0, &config), RetryDecision::RetryAfter(_)));
        assert!(matches!(should_retry(&err, 3, &config), RetryDecision::Exhausted));
    }

    #[test]
    fn delay_increases_with_attempts() {
        let config = RetryConfig {
            max_delay: Duration::from_secs(600),
            ..Default::default()
        };
        let d0 = compute_delay(0, &config);
        let d1 = compute_delay(1, &config);
        let d2 = compute_delay(2, &config);
        assert!(d1 > d0);
        assert!(d2 > d1);
    }

    #[test]
    fn delay_capped_at_max() {
        let config = RetryConfig {
            max_delay: Duration::from_secs(10),
            ..Default::default()
        };
        assert!(compute_delay(20, &config) <= Duration::from_secs(10));
    }

    /// Fails with the queued errors in order, then succeeds.
    struct FlakyRenderer {
        failures: Mutex<Vec<InkscanError>>,
        calls: Mutex<u32>,
    }

    impl FlakyRenderer {
        fn new(mut failures: Vec<InkscanError>) -> Self {
            failures.reverse();
            Self {
                failures: Mutex::new(failures),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    impl PageRenderer for FlakyRenderer {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn render(&self, _document: &Path) -> Result<RenderedDocument> {
            *self.calls.lock().unwrap() += 1;
            let next = self.failures.lock().unwrap().pop();
            match next {
                Some(err) => Err(err),
                None => Ok(RenderedDocument::from_files(Vec::new())),
            }
        }
    }

    fn fast_retries(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
        }
    }

    #[tokio::test]
    async fn transient_failures_are_retried() {
        let renderer = FlakyRenderer::new(vec![
            InkscanError::RenderTimeout(1),
            InkscanError::Render("crashed".into()),
        ]);
        let result = render_with_retry(&renderer, Path::new("doc.pdf"), &fast_retries(3)).await;
        assert!(result.is_ok());
        assert_eq!(renderer.calls(), 3);
    }

    #[tokio::test]
    async fn permanent_failure_is_not_retried() {
        let renderer = FlakyRenderer::new(vec![InkscanError::RenderUnavailable("gone".into())]);
        let err = render_with_retry(&renderer, Path::new("doc.pdf"), &fast_retries(3))
            .await
            .unwrap_err();
        assert!(matches!(err, InkscanError::RenderUnavailable(_)));
        assert_eq!(renderer.calls(), 1);
    }

    #[tokio::test]
    async fn exhausted_retries_return_last_error() {
        let renderer = FlakyRenderer::new(vec![
            InkscanError::RenderTimeout(1),
            InkscanError::RenderTimeout(2),
            InkscanError::RenderTimeout(3),
        ]);
        let err = render_with_retry(&renderer, Path::new("doc.pdf"), &fast_retries(2))
            .await
            .unwrap_err();
        assert!(matches!(err, InkscanError::RenderTimeout(3)));
        assert_eq!(renderer.calls(), 3);
    }
}
