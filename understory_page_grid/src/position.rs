// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::page::PageHandle;

/// Receives the page positions after every layout pass.
///
/// Typical consumers keep an auxiliary positional index, for example for a
/// minimap or for mapping pointer positions back to pages.
pub trait PagePositionListener {
    /// Called once per layout pass with the freshly positioned pages.
    fn update<P: PageHandle>(&mut self, pages: &[P], total_height: f64);
}

impl PagePositionListener for () {
    fn update<P: PageHandle>(&mut self, _pages: &[P], _total_height: f64) {}
}

/// Page rectangles from the most recent layout pass.
///
/// Queries are linear in the number of pages and stop at the first match, so
/// overlapping pages resolve to the lower index.
#[derive(Clone, Debug, Default)]
pub struct PagePositionIndex {
    rects: Vec<Rect>,
    total_height: f64,
}

impl PagePositionIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Returns `true` if no pages are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Total layout height reported by the last pass.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    /// Bounds of `page` as of the last pass.
    #[must_use]
    pub fn rect(&self, page: usize) -> Option<Rect> {
        self.rects.get(page).copied()
    }

    /// Returns the page containing `point`.
    #[must_use]
    pub fn page_at_point(&self, point: Point) -> Option<usize> {
        self.rects.iter().position(|rect| rect.contains(point))
    }

    /// Returns the first page whose vertical band contains `y`.
    #[must_use]
    pub fn page_at_y(&self, y: f64) -> Option<usize> {
        self.rects
            .iter()
            .position(|rect| rect.y0 <= y && y < rect.y1)
    }

    /// Iterates over the pages that overlap `area` with a positive area.
    pub fn pages_in_rect(&self, area: Rect) -> impl Iterator<Item = usize> + '_ {
        self.rects
            .iter()
            .enumerate()
            .filter(move |(_, rect)| crate::geometry::area(rect.intersect(area)) > 0.0)
            .map(|(index, _)| index)
    }
}

impl PagePositionListener for PagePositionIndex {
    fn update<P: PageHandle>(&mut self, pages: &[P], total_height: f64) {
        self.rects.clear();
        self.rects.extend(pages.iter().map(PageHandle::rect));
        self.total_height = total_height;
    }
}
