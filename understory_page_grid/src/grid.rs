// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::policy::{GridOrientation, LayoutPolicy};

/// Mapping between grid cells and page indices.
///
/// A plan is derived from a page count and a [`LayoutPolicy`] and never
/// changes afterwards; when either input changes, build a new plan.
///
/// ## Shape
///
/// - Automatic: one column, or two in paired mode.
/// - Fixed columns: the requested count, rounded up to even in paired mode.
/// - Fixed rows: the requested count; columns are derived from the page count
///   and rounded up to even in paired mode.
///
/// Rows (or derived columns) are just enough to hold every page, so a plan for
/// zero pages has zero rows (or zero columns with fixed rows).
///
/// ## Pairing
///
/// In paired mode the left page of every pair lands in an even column. With
/// [`LayoutPolicy::first_page_offset`] the very first cell stays empty and
/// page 0 takes the right-hand slot of the first pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridPlan {
    rows: usize,
    columns: usize,
    paired: bool,
    orientation: GridOrientation,
    offset: usize,
    page_count: usize,
}

impl GridPlan {
    /// Builds the plan for `page_count` pages under `policy`.
    #[must_use]
    pub fn new(page_count: usize, policy: &LayoutPolicy) -> Self {
        let paired = policy.paired_pages;
        let offset = usize::from(paired && policy.first_page_offset);
        let slots = if page_count == 0 {
            0
        } else {
            page_count + offset
        };
        let even = |n: usize| if paired { n + n % 2 } else { n };

        let (columns, rows) = match (policy.fixed_columns, policy.fixed_rows) {
            (Some(columns), _) => {
                let columns = even(columns.get());
                (columns, slots.div_ceil(columns))
            }
            (None, Some(rows)) => {
                let rows = rows.get();
                (even(slots.div_ceil(rows)), rows)
            }
            (None, None) => {
                let columns = if paired { 2 } else { 1 };
                (columns, slots.div_ceil(columns))
            }
        };

        Self {
            rows,
            columns,
            paired,
            orientation: policy.orientation,
            offset,
            page_count,
        }
    }

    /// Number of rows in the grid.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Whether pages are arranged in facing pairs.
    #[must_use]
    pub fn is_paired(&self) -> bool {
        self.paired
    }

    /// Fill order used by this plan.
    #[must_use]
    pub fn orientation(&self) -> GridOrientation {
        self.orientation
    }

    /// Number of pages the plan was built for.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Returns `true` if the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// Returns the page shown in cell `(column, row)`, or `None` for an empty
    /// cell.
    ///
    /// Cells outside the grid are reported as empty.
    #[must_use]
    pub fn page_at(&self, column: usize, row: usize) -> Option<usize> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let slot = match self.orientation {
            GridOrientation::RowMajor => column + row * self.columns,
            GridOrientation::ColumnMajor if self.paired => {
                ((column / 2) * self.rows + row) * 2 + column % 2
            }
            GridOrientation::ColumnMajor => row + column * self.rows,
        };
        let page = slot.checked_sub(self.offset)?;
        (page < self.page_count).then_some(page)
    }

    /// Returns the `(column, row)` cell that shows `page`.
    #[must_use]
    pub fn cell_of(&self, page: usize) -> Option<(usize, usize)> {
        if page >= self.page_count || self.is_empty() {
            return None;
        }
        let slot = page + self.offset;
        let cell = match self.orientation {
            GridOrientation::RowMajor => (slot % self.columns, slot / self.columns),
            GridOrientation::ColumnMajor if self.paired => {
                let pair = slot / 2;
                ((pair / self.rows) * 2 + slot % 2, pair % self.rows)
            }
            GridOrientation::ColumnMajor => (slot / self.rows, slot % self.rows),
        };
        Some(cell)
    }

    /// Iterates over every cell in row-major order as `(column, row, page)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Option<usize>)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |column| (column, row, self.page_at(column, row)))
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;
    use core::num::NonZeroUsize;

    use super::GridPlan;
    use crate::policy::{GridOrientation, LayoutPolicy};

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    /// Every page appears exactly once and every occupied cell maps back.
    fn assert_total(plan: &GridPlan) {
        let mut seen = vec![0_usize; plan.page_count()];
        for (column, row, page) in plan.cells() {
            if let Some(page) = page {
                assert!(page < plan.page_count());
                seen[page] += 1;
                assert_eq!(plan.cell_of(page), Some((column, row)));
            }
        }
        assert!(seen.iter().all(|&count| count == 1), "{plan:?}: {seen:?}");
    }

    #[test]
    fn mapping_is_total_for_many_policies() {
        let orientations = [GridOrientation::RowMajor, GridOrientation::ColumnMajor];
        for n in 0..23 {
            for orientation in orientations {
                for paired in [false, true] {
                    for offset in [false, true] {
                        let base = LayoutPolicy::new()
                            .with_paired_pages(paired)
                            .with_orientation(orientation)
                            .with_first_page_offset(offset);
                        assert_total(&GridPlan::new(n, &base));
                        for k in 1..5 {
                            assert_total(&GridPlan::new(n, &base.with_fixed_columns(nz(k))));
                            assert_total(&GridPlan::new(n, &base.with_fixed_rows(nz(k))));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn automatic_single_column() {
        let plan = GridPlan::new(3, &LayoutPolicy::new());
        assert_eq!((plan.columns(), plan.rows()), (1, 3));
        assert_eq!(plan.page_at(0, 2), Some(2));
        assert_eq!(plan.page_at(1, 0), None);
    }

    #[test]
    fn paired_pages_put_left_page_in_even_column() {
        let plan = GridPlan::new(5, &LayoutPolicy::new().with_paired_pages(true));
        assert_eq!((plan.columns(), plan.rows()), (2, 3));
        for page in (0..5).step_by(2) {
            let (column, _) = plan.cell_of(page).unwrap();
            assert_eq!(column % 2, 0);
        }
        // The final pair has no right-hand page.
        assert_eq!(plan.page_at(1, 2), None);
    }

    #[test]
    fn paired_fixed_columns_round_up_to_even() {
        let policy = LayoutPolicy::new()
            .with_paired_pages(true)
            .with_fixed_columns(nz(3));
        let plan = GridPlan::new(7, &policy);
        assert_eq!((plan.columns(), plan.rows()), (4, 2));
    }

    #[test]
    fn fixed_rows_derive_columns() {
        let plan = GridPlan::new(7, &LayoutPolicy::new().with_fixed_rows(nz(2)));
        assert_eq!((plan.columns(), plan.rows()), (4, 2));
        let row_major: Vec<_> = (0..4).map(|c| plan.page_at(c, 1)).collect();
        assert_eq!(row_major, vec![Some(4), Some(5), Some(6), None]);
    }

    #[test]
    fn fixed_columns_win_over_fixed_rows() {
        let policy = LayoutPolicy::new()
            .with_fixed_columns(nz(3))
            .with_fixed_rows(nz(5));
        let plan = GridPlan::new(7, &policy);
        assert_eq!((plan.columns(), plan.rows()), (3, 3));
    }

    #[test]
    fn column_major_fills_down_first() {
        let policy = LayoutPolicy::new()
            .with_fixed_columns(nz(2))
            .with_orientation(GridOrientation::ColumnMajor);
        let plan = GridPlan::new(5, &policy);
        assert_eq!(plan.rows(), 3);
        assert_eq!(plan.page_at(0, 0), Some(0));
        assert_eq!(plan.page_at(0, 2), Some(2));
        assert_eq!(plan.page_at(1, 0), Some(3));
        assert_eq!(plan.page_at(1, 2), None);
    }

    #[test]
    fn column_major_pairs_stay_side_by_side() {
        let policy = LayoutPolicy::new()
            .with_paired_pages(true)
            .with_fixed_columns(nz(4))
            .with_orientation(GridOrientation::ColumnMajor);
        let plan = GridPlan::new(8, &policy);
        assert_eq!(plan.rows(), 2);
        assert_eq!(plan.page_at(0, 0), Some(0));
        assert_eq!(plan.page_at(1, 0), Some(1));
        assert_eq!(plan.page_at(0, 1), Some(2));
        assert_eq!(plan.page_at(2, 0), Some(4));
    }

    #[test]
    fn cover_offset_leaves_first_cell_empty() {
        let policy = LayoutPolicy::new()
            .with_paired_pages(true)
            .with_first_page_offset(true);
        let plan = GridPlan::new(3, &policy);
        assert_eq!((plan.columns(), plan.rows()), (2, 2));
        assert_eq!(plan.page_at(0, 0), None);
        assert_eq!(plan.page_at(1, 0), Some(0));
        assert_eq!(plan.page_at(0, 1), Some(1));
        assert_eq!(plan.page_at(1, 1), Some(2));
    }

    #[test]
    fn cover_offset_is_ignored_without_pairs() {
        let plan = GridPlan::new(2, &LayoutPolicy::new().with_first_page_offset(true));
        assert_eq!(plan.page_at(0, 0), Some(0));
    }

    #[test]
    fn zero_pages_give_an_empty_grid() {
        let plan = GridPlan::new(0, &LayoutPolicy::new());
        assert!(plan.is_empty());
        assert_eq!(plan.rows(), 0);
        assert_eq!(plan.cells().count(), 0);
        assert_eq!(plan.cell_of(0), None);

        let plan = GridPlan::new(0, &LayoutPolicy::new().with_fixed_rows(nz(3)));
        assert_eq!((plan.columns(), plan.rows()), (0, 3));
        assert!(plan.is_empty());
    }

    #[test]
    fn identical_inputs_give_identical_plans() {
        let policy = LayoutPolicy::new().with_paired_pages(true);
        assert_eq!(GridPlan::new(9, &policy), GridPlan::new(9, &policy));
    }
}
