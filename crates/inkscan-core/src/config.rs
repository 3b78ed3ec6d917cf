// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Checker configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{InkscanError, Result};
use crate::types::LabelPolicy;

/// Settings for the external page renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererSettings {
    /// Renderer executable, looked up on `PATH` when not absolute.
    pub program: String,
    /// Output resolution in DPI. `None` keeps the renderer's default (150).
    pub resolution_dpi: Option<u32>,
    /// Wall-clock limit for one render invocation, in seconds.
    pub timeout_secs: u64,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            program: "pdftocairo".into(),
            resolution_dpi: None,
            timeout_secs: 60,
        }
    }
}

impl RendererSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Backoff settings for retrying transient renderer failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Maximum number of retry attempts after the first failure.
    pub max_retries: u32,
    /// Base delay between retries in milliseconds (exponential backoff).
    pub base_delay_ms: u64,
    /// Upper bound on any single delay in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
        }
    }
}

/// Persistent checker settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Labeling policy used for per-page object counts.
    pub label_policy: LabelPolicy,
    pub renderer: RendererSettings,
    pub retry: RetrySettings,
    /// Fail the check when the renderer returns a different number of pages
    /// than the PDF page tree declares.
    pub verify_page_count: bool,
}

impl CheckConfig {
    /// Load a JSON config file. Fields missing from the file take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise return the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Persist the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Reject settings the renderer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.renderer.program.trim().is_empty() {
            return Err(InkscanError::Config("renderer program is empty".into()));
        }
        if self.renderer.resolution_dpi == Some(0) {
            return Err(InkscanError::Config("resolution_dpi must be positive".into()));
        }
        if self.renderer.timeout_secs == 0 {
            return Err(InkscanError::Config("timeout_secs must be positive".into()));
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(InkscanError::Config(format!(
                "base_delay_ms ({}) exceeds max_delay_ms ({})",
                self.retry.base_delay_ms, self.retry.max_delay_ms
            )));
        }
        Ok(())
    }
}
