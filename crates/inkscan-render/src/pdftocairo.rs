// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Poppler `pdftocairo` renderer.
//
// Runs `pdftocairo -png [-r DPI] <document> <scratch>/page` and collects the
// resulting `page-N.png` files.  Poppler is an external install
// (`poppler-utils` on Debian/Ubuntu, `brew install poppler` on macOS); when
// the program cannot be launched the renderer reports `RenderUnavailable`.

use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

use inkscan_core::config::RendererSettings;
use inkscan_core::error::{InkscanError, Result};
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use crate::pages::page_files_in;
use crate::traits::{PageRenderer, RenderedDocument};

/// File name prefix passed to the renderer for every page image.
const PAGE_PREFIX: &str = "page";

/// Renders PDFs to PNG pages with an external `pdftocairo` process.
#[derive(Debug, Clone)]
pub struct PdftoCairoRenderer {
    /// Executable name or path.
    program: String,
    /// Output resolution; `None` keeps the program's default.
    resolution_dpi: Option<u32>,
    /// Wall-clock limit for one invocation.
    timeout: Duration,
}

impl PdftoCairoRenderer {
    pub fn new(settings: &RendererSettings) -> Self {
        Self {
            program: settings.program.clone(),
            resolution_dpi: settings.resolution_dpi,
            timeout: settings.timeout(),
        }
    }

    /// Command-line arguments for rendering `document` to `<out_prefix>-N.png`.
    fn command_args(&self, document: &Path, out_prefix: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-png".into()];
        if let Some(dpi) = self.resolution_dpi {
            args.push("-r".into());
            args.push(dpi.to_string().into());
        }
        args.push(document.as_os_str().to_owned());
        args.push(out_prefix.as_os_str().to_owned());
        args
    }
}

impl Default for PdftoCairoRenderer {
    fn default() -> Self {
        Self::new(&RendererSettings::default())
    }
}

impl PageRenderer for PdftoCairoRenderer {
    fn name(&self) -> &str {
        "pdftocairo"
    }

    #[instrument(skip(self), fields(program = %self.program, document = %document.display()))]
    async fn render(&self, document: &Path) -> Result<RenderedDocument> {
        // Surface a missing input as an I/O error rather than a renderer failure.
        tokio::fs::metadata(document).await?;

        let workdir = tempfile::Builder::new().prefix("inkscan-").tempdir()?;
        let out_prefix = workdir.path().join(PAGE_PREFIX);

        let mut command = Command::new(&self.program);
        command
            .args(self.command_args(document, &out_prefix))
            .kill_on_drop(true);

        debug!(workdir = %workdir.path().display(), "Launching renderer");

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "Renderer timed out");
                return Err(InkscanError::RenderTimeout(self.timeout.as_secs()));
            }
            Ok(Err(err))
                if matches!(
                    err.kind(),
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
                ) =>
            {
                return Err(InkscanError::RenderUnavailable(format!(
                    "{}: {}",
                    self.program, err
                )));
            }
            Ok(Err(err)) => return Err(InkscanError::Io(err)),
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, "Renderer failed");
            return Err(InkscanError::Render(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let pages = page_files_in(workdir.path())?;
        info!(pages = pages.len(), "Document rendered");
        Ok(RenderedDocument::in_workdir(workdir, pages))
    }
}
