// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label module — connected-component labeling over foreground masks.

pub mod components;

pub use components::{LabelGrid, count_objects, label_components};
