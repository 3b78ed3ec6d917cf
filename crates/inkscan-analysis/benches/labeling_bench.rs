// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for page analysis in the inkscan-analysis crate.
// Measures binarization and both labeling policies on a synthetic page of
// text-like strokes, which is the shape of work a rendered document produces.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgb, RgbImage};

use inkscan_analysis::{LabelPolicy, binarize, count_objects};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A 400x300 white page with rows of short dark strokes and a few
/// "letters" whose arms are joined late in the scan, forcing merges.
fn synthetic_page() -> RgbImage {
    let (width, height) = (400u32, 300u32);
    let mut page = RgbImage::from_pixel(width, height, Rgb([250, 250, 250]));

    for line in 0..12u32 {
        let y0 = 20 + line * 22;
        for word in 0..20u32 {
            let x0 = 10 + word * 19;
            // A "U": two arms closed by a bottom bar.
            for y in y0..y0 + 10 {
                page.put_pixel(x0, y, Rgb([20, 20, 20]));
                page.put_pixel(x0 + 8, y, Rgb([20, 20, 20]));
            }
            for x in x0..=x0 + 8 {
                page.put_pixel(x, y0 + 10, Rgb([20, 20, 20]));
            }
        }
    }
    page
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_binarize(c: &mut Criterion) {
    let page = synthetic_page();
    c.bench_function("binarize (400x300)", |b| {
        b.iter(|| black_box(binarize(black_box(&page))));
    });
}

/// Labeling with eager full-grid merges. Each "U" triggers one merge, so
/// this is dominated by the relabel passes.
fn bench_labeling(c: &mut Criterion) {
    let mask = binarize(&synthetic_page());

    c.bench_function("label reference (400x300)", |b| {
        b.iter(|| black_box(count_objects(black_box(&mask), LabelPolicy::Reference)));
    });
    c.bench_function("label standard (400x300)", |b| {
        b.iter(|| black_box(count_objects(black_box(&mask), LabelPolicy::Standard)));
    });
}

criterion_group!(benches, bench_binarize, bench_labeling);
criterion_main!(benches);
