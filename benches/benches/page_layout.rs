// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::num::NonZeroUsize;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_page_grid::{GridPlan, LayoutPolicy, PageLayout, PageSlot};

/// Mixed portrait and landscape pages, like a scanned document.
fn pages(count: usize) -> Vec<PageSlot> {
    (0..count)
        .map(|i| {
            if i % 7 == 3 {
                PageSlot::new(Size::new(842.0, 595.0))
            } else {
                PageSlot::new(Size::new(595.0, 842.0))
            }
        })
        .collect()
}

fn bench_grid_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_grid/plan");
    for count in [64usize, 512, 4_096] {
        group.throughput(Throughput::Elements(count as u64));
        let policy = LayoutPolicy::new()
            .with_paired_pages(true)
            .with_first_page_offset(true);
        group.bench_with_input(BenchmarkId::new("cells", count), &count, |b, &count| {
            b.iter(|| {
                let plan = GridPlan::new(count, &policy);
                black_box(plan.cells().filter(|(_, _, page)| page.is_some()).count());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_grid/layout");
    let viewport = Size::new(1920.0, 1080.0);
    let layout = PageLayout::default();

    let policies = [
        ("single", LayoutPolicy::new()),
        ("paired", LayoutPolicy::new().with_paired_pages(true)),
        (
            "columns_4",
            LayoutPolicy::new().with_fixed_columns(NonZeroUsize::new(4).unwrap()),
        ),
    ];
    for count in [64usize, 512, 4_096] {
        group.throughput(Throughput::Elements(count as u64));
        for (name, policy) in &policies {
            let plan = GridPlan::new(count, policy);
            let mut pages = pages(count);
            group.bench_with_input(BenchmarkId::new(*name, count), &count, |b, _| {
                b.iter(|| {
                    let result = layout
                        .layout_pages(&mut pages, &plan, policy, viewport)
                        .unwrap();
                    black_box(result);
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_grid_plan, bench_layout);
criterion_main!(benches);
