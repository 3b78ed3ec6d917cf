// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inkscan — blank-page checker for rendered documents
//
// Entry point. Parses arguments, initialises logging, loads the checker
// config, runs one check, and exits with the outcome's exit code:
// 0 valid, 1 invalid (blank pages found), 2 could not process.
// `inkscan init` writes a starter config file instead.

mod services;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inkscan_core::error::InkscanError;
use inkscan_core::types::{CheckReport, LabelPolicy};
use inkscan_core::{CheckConfig, CheckOutcome};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use services::checker::Checker;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "inkscan.json";

/// Command-line arguments for the checker
#[derive(Parser, Debug)]
#[command(name = "inkscan", version)]
#[command(about = "Reject documents that contain blank pages")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// JSON config file (defaults to ./inkscan.json when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Labeling policy: `reference` or `standard`
    #[arg(long, global = true, value_parser = parse_policy)]
    policy: Option<LabelPolicy>,

    /// Print the full report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a PDF or a single page image
    Check { document: PathBuf },
    /// Check a directory of pre-rendered page images
    Pages { dir: PathBuf },
    /// Count the objects on one page image
    Label { image: PathBuf },
    /// Write a config file with default settings (and `--policy`, if given)
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_policy(name: &str) -> Result<LabelPolicy, String> {
    LabelPolicy::from_name(name)
        .ok_or_else(|| format!("unknown policy `{name}` (expected `reference` or `standard`)"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so that `--json` output stays machine-readable.
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            eprintln!("inkscan: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let code = match &args.command {
        Command::Check { document } => {
            let checker = checker_for(&args)?;
            report_outcome(checker.check_document(document).await, args.json)?
        }
        Command::Pages { dir } => {
            let checker = checker_for(&args)?;
            report_outcome(checker.check_page_dir(dir).await, args.json)?
        }
        Command::Label { image } => {
            let page = checker_for(&args)?
                .label_image(image)
                .await
                .with_context(|| format!("labeling {}", image.display()))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                println!("{}: {} object(s)", image.display(), page.object_count);
            }
            0
        }
        Command::Init { force } => {
            let path = args
                .config
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            let config = CheckConfig {
                label_policy: args.policy.unwrap_or_default(),
                ..CheckConfig::default()
            };
            write_config(&path, &config, *force)?;
            println!("wrote {}", path.display());
            0
        }
    };
    Ok(ExitCode::from(code))
}

/// Load the config, apply `--policy`, and build the checker.
fn checker_for(args: &Args) -> anyhow::Result<Checker> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(policy) = args.policy {
        config.label_policy = policy;
    }
    info!(policy = %config.label_policy, "Inkscan starting");
    Ok(Checker::from_config(&config))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<CheckConfig> {
    let config = match path {
        Some(path) => CheckConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CheckConfig::load_or_default(DEFAULT_CONFIG_FILE)
            .with_context(|| format!("loading config {DEFAULT_CONFIG_FILE}"))?,
    };
    Ok(config)
}

/// Persist `config` at `path`, refusing to replace an existing file unless
/// `force` is set.
fn write_config(path: &Path, config: &CheckConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    config
        .save(path)
        .with_context(|| format!("writing config {}", path.display()))?;
    info!(path = %path.display(), "Config written");
    Ok(())
}

/// Print the check result and return the process exit code.
fn report_outcome(result: Result<CheckReport, InkscanError>, json: bool) -> anyhow::Result<u8> {
    let outcome = match result {
        Ok(report) => {
            let outcome = CheckOutcome::from_result(&Ok(report.verdict.clone()));
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for page in &report.pages {
                    println!(
                        "page {}: {} object(s)",
                        page.page_index + 1,
                        page.object_count
                    );
                }
                println!("{}", outcome.message());
            }
            outcome
        }
        Err(err) => {
            error!(error = %err, "Check failed");
            let outcome = CheckOutcome::from_result(&Err(err));
            if json {
                let body = serde_json::json!({
                    "status": outcome.http_status(),
                    "error": outcome.message(),
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                eprintln!("{}", outcome.message());
            }
            outcome
        }
    };

    Ok(u8::try_from(outcome.exit_code()).unwrap_or(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_follow_the_subcommand() {
        let argv = ["inkscan", "check", "existing.pdf", "--policy", "standard", "--json"];
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.policy, Some(LabelPolicy::Standard));
        assert!(args.json);
        assert!(matches!(
            args.command,
            Command::Check { ref document } if document.ends_with("existing.pdf")
        ));
    }

    #[test]
    fn written_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inkscan.json");
        let config = CheckConfig {
            label_policy: LabelPolicy::Standard,
            ..CheckConfig::default()
        };

        write_config(&path, &config, false).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), config);
    }

    #[test]
    fn existing_config_is_kept_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inkscan.json");
        std::fs::write(&path, "{}").unwrap();

        assert!(write_config(&path, &CheckConfig::default(), false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
        write_config(&path, &CheckConfig::default(), true).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), CheckConfig::default());
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(Args::try_parse_from(["inkscan", "--policy", "fast", "label", "a.png"]).is_err());
    }

    #[test]
    fn outcome_exit_codes_fit_a_process_status() {
        let invalid = Ok(CheckReport::new(
            "doc.pdf",
            "00",
            LabelPolicy::Reference,
            vec![inkscan_core::types::PageResult::new(0, 0)],
            inkscan_core::types::DocumentVerdict::invalid(vec![0]),
        ));
        assert_eq!(report_outcome(invalid, true).unwrap(), 1);
        assert_eq!(report_outcome(Err(InkscanError::EmptyInput), true).unwrap(), 2);
    }
}
