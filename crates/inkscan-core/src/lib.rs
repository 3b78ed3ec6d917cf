// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inkscan — Core types, errors, and configuration shared across all crates.

pub mod config;
pub mod error;
pub mod integrity;
pub mod outcome;
pub mod types;

pub use config::CheckConfig;
pub use error::InkscanError;
pub use outcome::CheckOutcome;
pub use types::*;
