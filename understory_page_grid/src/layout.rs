// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Size, Vec2};
use smallvec::SmallVec;

use crate::geometry::half_toward_zero;
use crate::grid::GridPlan;
use crate::metrics::LayoutMetrics;
use crate::page::PageHandle;
use crate::policy::{LayoutPolicy, PaddingMode};

/// Reasons a layout pass refuses to run.
///
/// These are caller contract violations. No page position is written when a
/// pass fails.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutError {
    /// The plan was built for a different number of pages than were passed in.
    ///
    /// Rebuild the [`GridPlan`] after pages are added or removed.
    PageCountMismatch {
        /// Page count the plan was built for.
        expected: usize,
        /// Number of pages handed to the layout.
        actual: usize,
    },
    /// A page reported a negative or non-finite display size.
    InvalidPageSize {
        /// Index of the offending page.
        index: usize,
        /// The size it reported.
        size: Size,
    },
    /// The viewport extent is not a finite number.
    InvalidViewport {
        /// The viewport size that was passed in.
        size: Size,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageCountMismatch { expected, actual } => write!(
                f,
                "grid plan covers {expected} pages but {actual} were supplied"
            ),
            Self::InvalidPageSize { index, size } => {
                write!(f, "page {index} has invalid display size {size:?}")
            }
            Self::InvalidViewport { size } => write!(f, "invalid viewport size {size:?}"),
        }
    }
}

impl core::error::Error for LayoutError {}

/// Outcome of a layout pass.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct LayoutResult {
    total_size: Size,
    border: Vec2,
    // Few columns in practice; rows grow with the page count.
    column_widths: SmallVec<[f64; 4]>,
    row_heights: Vec<f64>,
}

impl LayoutResult {
    /// Full extent of the laid out pages including borders.
    #[must_use]
    pub fn total_size(&self) -> Size {
        self.total_size
    }

    /// Effective border on each axis: the larger of the padding policy and
    /// the centering offset.
    #[must_use]
    pub fn border(&self) -> Vec2 {
        self.border
    }

    /// Width of each grid column (the widest page in it).
    #[must_use]
    pub fn column_widths(&self) -> &[f64] {
        &self.column_widths
    }

    /// Height of each grid row (the tallest page in it).
    #[must_use]
    pub fn row_heights(&self) -> &[f64] {
        &self.row_heights
    }

    /// Returns `true` if nothing was laid out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.column_widths.is_empty() || self.row_heights.is_empty()
    }
}

/// Places pages on a [`GridPlan`].
///
/// ## Placement
///
/// Each column is as wide as its widest page and each row as tall as its
/// tallest page. Rows and columns are separated by
/// [`LayoutMetrics::page_spacing`].
///
/// The border on each axis is the larger of the padding policy
/// ([`LayoutMetrics::outer_padding`], plus
/// [`LayoutMetrics::extra_space_padding`] for
/// [`PaddingMode::ExtraSpace`]) and half of the space the grid leaves free in
/// the viewport. Pages are therefore centered when they fit, and never closer
/// to the edge than the padding policy allows.
///
/// Within its cell a page sits at the top. Horizontally:
/// - paired pages lean toward their partner, leaving
///   [`LayoutMetrics::shadow_allowance`] on the inner side;
/// - other pages get half the spacing plus half the spare column width before
///   them.
///
/// Every halving truncates toward zero.
#[derive(Clone, Debug, Default)]
pub struct PageLayout {
    metrics: LayoutMetrics,
}

impl PageLayout {
    /// Creates a layout engine using `metrics`.
    #[must_use]
    pub fn new(metrics: LayoutMetrics) -> Self {
        Self { metrics }
    }

    /// Returns the spacing constants in use.
    #[must_use]
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Replaces the spacing constants. Takes effect on the next pass.
    pub fn set_metrics(&mut self, metrics: LayoutMetrics) {
        self.metrics = metrics;
    }

    /// Writes a position into every page on `plan` and returns the overall
    /// extent.
    ///
    /// `viewport` is the visible size of the scroll area; it only affects
    /// centering. An empty plan yields an empty result with zero size.
    pub fn layout_pages<P: PageHandle>(
        &self,
        pages: &mut [P],
        plan: &GridPlan,
        policy: &LayoutPolicy,
        viewport: Size,
    ) -> Result<LayoutResult, LayoutError> {
        if plan.page_count() != pages.len() {
            return Err(LayoutError::PageCountMismatch {
                expected: plan.page_count(),
                actual: pages.len(),
            });
        }
        if !viewport.width.is_finite() || !viewport.height.is_finite() {
            return Err(LayoutError::InvalidViewport { size: viewport });
        }
        for (index, page) in pages.iter().enumerate() {
            let size = page.display_size();
            let valid = |v: f64| v.is_finite() && v >= 0.0;
            if !valid(size.width) || !valid(size.height) {
                return Err(LayoutError::InvalidPageSize { index, size });
            }
        }
        if plan.is_empty() {
            return Ok(LayoutResult::default());
        }

        let mut column_widths: SmallVec<[f64; 4]> = SmallVec::from_elem(0.0, plan.columns());
        let mut row_heights: Vec<f64> = vec![0.0; plan.rows()];
        for (column, row, page) in plan.cells() {
            if let Some(index) = page {
                let size = pages[index].display_size();
                column_widths[column] = column_widths[column].max(size.width);
                row_heights[row] = row_heights[row].max(size.height);
            }
        }

        let border = Vec2::new(
            self.border(policy.horizontal_padding, viewport.width, &column_widths),
            self.border(policy.vertical_padding, viewport.height, &row_heights),
        );

        let spacing = self.metrics.page_spacing;
        let shadow = self.metrics.shadow_allowance;
        let paired = plan.is_paired() && pages.len() > 1;

        let mut y = border.y;
        for (row, row_height) in row_heights.iter().enumerate() {
            let mut x = border.x;
            for (column, column_width) in column_widths.iter().enumerate() {
                let Some(index) = plan.page_at(column, row) else {
                    x += column_width + spacing;
                    continue;
                };
                let page = &mut pages[index];
                let width = page.display_size().width;
                let slack = column_width - width;
                let (before, after) = if paired {
                    if column % 2 == 0 {
                        (spacing - shadow + slack, shadow)
                    } else {
                        (shadow, spacing - shadow + slack)
                    }
                } else {
                    let before = half_toward_zero(spacing) + half_toward_zero(slack);
                    (before, spacing - before + half_toward_zero(slack))
                };
                x += before;
                page.set_position(Point::new(x, y));
                x += width + after;
            }
            y += row_height + spacing;
        }

        let total_size = Size::new(
            2.0 * border.x + self.span(&column_widths),
            2.0 * border.y + self.span(&row_heights),
        );
        tracing::debug!(
            pages = pages.len(),
            rows = plan.rows(),
            columns = plan.columns(),
            width = total_size.width,
            height = total_size.height,
            "laid out pages"
        );

        Ok(LayoutResult {
            total_size,
            border,
            column_widths,
            row_heights,
        })
    }

    /// Sum of `tracks` plus the spacing between them.
    fn span(&self, tracks: &[f64]) -> f64 {
        let gaps = tracks.len().saturating_sub(1) as f64;
        tracks.iter().sum::<f64>() + self.metrics.page_spacing * gaps
    }

    fn border(&self, mode: PaddingMode, visible: f64, tracks: &[f64]) -> f64 {
        let mut preferred = self.metrics.outer_padding;
        if mode == PaddingMode::ExtraSpace {
            preferred += self.metrics.extra_space_padding;
        }
        let centering = half_toward_zero(visible - self.span(tracks));
        preferred.max(centering)
    }
}
