// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// 8-connected component labeling.
//
// Single raster scan with eager equivalence resolution: when a pixel touches
// several labels, the smallest wins and every other label is rewritten across
// the whole grid on the spot. Merges therefore cost a full grid pass each,
// which is fine for page-sized rasters and keeps intermediate grids identical
// to the deployed checker's.

use inkscan_core::types::LabelPolicy;
use tracing::{debug, instrument};

use crate::raster::mask::ForegroundMask;

/// Neighbour offsets `(dx, dy)` in inspection order.
///
/// Pixels not yet visited by the scan always hold label 0, so only the four
/// causal neighbours can ever contribute a label.
const NEIGHBOUR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Label value withheld under [`LabelPolicy::Reference`].
const SKIPPED_LABEL: u32 = 2;

/// Per-pixel component labels for one page. `0` means unlabeled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    width: u32,
    height: u32,
    labels: Vec<u32>,
    /// Next value the component counter would hand out.
    next_label: u32,
}

impl LabelGrid {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            labels: vec![0; width as usize * height as usize],
            next_label: 1,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Label at `(x, y)`; `0` for unlabeled or out-of-bounds pixels.
    pub fn label_at(&self, x: u32, y: u32) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.labels[self.index(x, y)]
    }

    /// Row-major view of the labels.
    pub fn as_slice(&self) -> &[u32] {
        &self.labels
    }

    /// Highest value the component counter reached (0 when nothing was labeled).
    pub fn highest_label(&self) -> u32 {
        self.next_label - 1
    }

    /// Number of distinct non-zero labels left after all merges.
    pub fn object_count(&self) -> usize {
        let mut seen = vec![false; self.next_label as usize];
        let mut count = 0;
        for &label in &self.labels {
            if label != 0 && !seen[label as usize] {
                seen[label as usize] = true;
                count += 1;
            }
        }
        count
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Rewrite every pixel holding `from` to `to`, up to and including
    /// `scanned`. Pixels past the scan position are still 0.
    fn relabel(&mut self, from: u32, to: u32, scanned: usize) {
        let visited = &mut self.labels[..=scanned];
        for label in visited.iter_mut().filter(|label| **label == from) {
            *label = to;
        }
    }
}

/// Label every 8-connected foreground region of `mask`.
///
/// Pixels are visited row by row, left to right. A pixel with no labeled
/// neighbour starts a new component; otherwise it takes the smallest
/// neighbouring label and all other neighbouring labels are merged into it.
/// Under [`LabelPolicy::Reference`] the component that would receive label 2
/// is left unlabeled at its first pixel while the counter still advances.
///
/// All state lives in the returned grid; calls never influence each other.
#[instrument(skip(mask), fields(width = mask.width(), height = mask.height()))]
pub fn label_components(mask: &ForegroundMask, policy: LabelPolicy) -> LabelGrid {
    let (width, height) = mask.dimensions();
    let mut grid = LabelGrid::new(width, height);
    let mut neighbours: Vec<u32> = Vec::with_capacity(NEIGHBOUR_OFFSETS.len());
    let mut merges = 0usize;

    for y in 0..height {
        for x in 0..width {
            if !mask.is_foreground(x, y) {
                continue;
            }

            neighbours.clear();
            for (dx, dy) in NEIGHBOUR_OFFSETS {
                let nx = i64::from(x) + dx;
                let ny = i64::from(y) + dy;
                if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
                    continue;
                }
                let label = grid.label_at(nx as u32, ny as u32);
                if label != 0 {
                    neighbours.push(label);
                }
            }

            let index = grid.index(x, y);
            if neighbours.is_empty() {
                let label = grid.next_label;
                grid.next_label += 1;
                if policy == LabelPolicy::Reference && label == SKIPPED_LABEL {
                    continue;
                }
                grid.labels[index] = label;
            } else {
                neighbours.sort_unstable();
                neighbours.dedup();
                let smallest = neighbours[0];
                grid.labels[index] = smallest;
                for &other in &neighbours[1..] {
                    grid.relabel(other, smallest, index);
                    merges += 1;
                }
            }
        }
    }

    debug!(
        highest_label = grid.highest_label(),
        merges,
        %policy,
        "Labeling complete"
    );
    grid
}

/// Count the foreground objects of `mask` under `policy`.
pub fn count_objects(mask: &ForegroundMask, policy: LabelPolicy) -> usize {
    label_components(mask, policy).object_count()
}

// -- Tests --------------------------------------------------------------------
