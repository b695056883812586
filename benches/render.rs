// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dryad::color::ColorSpec;
use dryad::render::{
    snapshot_to_value, DotGraph, DumpOptions, GraphvizOptions, MermaidDiagram, MermaidOptions,
};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `render.dot`, `render.mermaid`, `render.dump`, `render.html`
// - Case IDs come from `fixtures::Case::id` and must not be renamed.
fn benches_render(c: &mut Criterion) {
    let colors = ColorSpec::default();

    let mut group = c.benchmark_group("render.dot");
    for case in fixtures::Case::ALL {
        let snapshot = fixtures::snapshot(case);
        let colors = colors.clone();
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let graph =
                    DotGraph::from_snapshot(black_box(&snapshot), &GraphvizOptions::default(), &colors)
                        .expect("DotGraph::from_snapshot");
                black_box(graph.source().len())
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("render.mermaid");
    for case in fixtures::Case::ALL {
        let snapshot = fixtures::snapshot(case);
        let colors = colors.clone();
        let options = MermaidOptions { max_nodes: Some(50), ..MermaidOptions::default() };
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let diagram = MermaidDiagram::from_snapshot(black_box(&snapshot), &options, &colors)
                    .expect("MermaidDiagram::from_snapshot");
                black_box(diagram.source().len())
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("render.dump");
    for case in fixtures::Case::ALL {
        let snapshot = fixtures::snapshot(case);
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let value = snapshot_to_value(black_box(&snapshot), &DumpOptions::default())
                    .expect("snapshot_to_value");
                black_box(value.to_string().len())
            })
        });
    }
    group.finish();

    #[cfg(feature = "html")]
    {
        use dryad::render::{html_document, HtmlOptions};

        let mut group = c.benchmark_group("render.html");
        for case in fixtures::Case::ALL {
            let snapshot = fixtures::snapshot(case);
            let colors = colors.clone();
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let page = html_document(black_box(&snapshot), &HtmlOptions::default(), &colors)
                        .expect("html_document");
                    black_box(page.len())
                })
            });
        }
        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_render
}
criterion_main!(benches);
