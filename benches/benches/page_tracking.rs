// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use understory_page_grid::{
    LayoutSettings, PageHandle, PagePositionIndex, PagePositionListener, PageSlot,
};
use understory_page_view::{PageSelectionListener, ScrollArea, ViewportTracker};

#[derive(Default)]
struct Reader {
    paired: bool,
    index: PagePositionIndex,
    current: usize,
}

impl LayoutSettings for Reader {
    fn is_paired_pages(&self) -> bool {
        self.paired
    }

    fn add_horizontal_space(&self) -> bool {
        false
    }

    fn add_vertical_space(&self) -> bool {
        true
    }
}

impl PagePositionListener for Reader {
    fn update<P: PageHandle>(&mut self, pages: &[P], total_height: f64) {
        self.index.update(pages, total_height);
    }
}

impl PageSelectionListener for Reader {
    fn page_selected(&mut self, index: usize) {
        self.current = index;
    }
}

fn bench_scroll_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_view/scroll_sweep");
    for count in [64usize, 512, 4_096] {
        for paired in [false, true] {
            let mut pages = vec![PageSlot::new(Size::new(595.0, 842.0)); count];
            let mut reader = Reader {
                paired,
                ..Reader::default()
            };
            let mut tracker = ViewportTracker::new(ScrollArea::new(Size::new(1920.0, 1080.0)));
            tracker.layout_pages(&mut pages, &mut reader).unwrap();
            let height = tracker.layout_height();
            let name = if paired { "paired" } else { "single" };

            // One step per screenful, top to bottom.
            group.bench_with_input(BenchmarkId::new(name, count), &count, |b, _| {
                b.iter(|| {
                    let mut y = 0.0;
                    while y < height {
                        tracker
                            .scroll_absolute(Point::new(0.0, y), &mut pages, &mut reader)
                            .unwrap();
                        y += 1080.0;
                    }
                    black_box(reader.current);
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_scroll_sweep);
criterion_main!(benches);
