// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::num::NonZeroUsize;

/// How much room to leave around the whole page area on one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PaddingMode {
    /// Only the regular outer padding.
    #[default]
    Tight,
    /// Add a large band of free space around the pages.
    ///
    /// This helps with input devices whose sensing area does not reach the
    /// edges of the screen, such as older pen tablets.
    ExtraSpace,
}

/// Order in which pages fill the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GridOrientation {
    /// Pages fill a row before moving to the next one.
    #[default]
    RowMajor,
    /// Pages fill a column before moving to the next one.
    ///
    /// In paired mode whole pairs run down each pair of columns.
    ColumnMajor,
}

/// Layout policy consumed by [`GridPlan::new`](crate::GridPlan::new) and
/// [`PageLayout::layout_pages`](crate::PageLayout::layout_pages).
///
/// When both `fixed_columns` and `fixed_rows` are set, the column count wins
/// and the row count is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct LayoutPolicy {
    /// Show pages two at a time, like an open book.
    pub paired_pages: bool,
    /// Use exactly this many columns (rounded up to even in paired mode).
    pub fixed_columns: Option<NonZeroUsize>,
    /// Use exactly this many rows; columns are derived from the page count.
    pub fixed_rows: Option<NonZeroUsize>,
    /// Outer padding policy on the X axis.
    pub horizontal_padding: PaddingMode,
    /// Outer padding policy on the Y axis.
    pub vertical_padding: PaddingMode,
    /// Order in which pages fill the grid.
    pub orientation: GridOrientation,
    /// In paired mode, leave the first grid cell empty so that the first page
    /// stands alone on the right, like a cover.
    ///
    /// Ignored when `paired_pages` is off.
    pub first_page_offset: bool,
}

impl LayoutPolicy {
    /// Single-column, unpaired, tight padding.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            paired_pages: false,
            fixed_columns: None,
            fixed_rows: None,
            horizontal_padding: PaddingMode::Tight,
            vertical_padding: PaddingMode::Tight,
            orientation: GridOrientation::RowMajor,
            first_page_offset: false,
        }
    }

    /// Returns this policy with paired pages switched on or off.
    #[must_use]
    pub const fn with_paired_pages(mut self, paired: bool) -> Self {
        self.paired_pages = paired;
        self
    }

    /// Returns this policy with a fixed column count.
    #[must_use]
    pub const fn with_fixed_columns(mut self, columns: NonZeroUsize) -> Self {
        self.fixed_columns = Some(columns);
        self
    }

    /// Returns this policy with a fixed row count.
    #[must_use]
    pub const fn with_fixed_rows(mut self, rows: NonZeroUsize) -> Self {
        self.fixed_rows = Some(rows);
        self
    }

    /// Returns this policy with the given outer padding modes.
    #[must_use]
    pub const fn with_padding(mut self, horizontal: PaddingMode, vertical: PaddingMode) -> Self {
        self.horizontal_padding = horizontal;
        self.vertical_padding = vertical;
        self
    }

    /// Returns this policy with the given fill order.
    #[must_use]
    pub const fn with_orientation(mut self, orientation: GridOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Returns this policy with the cover offset switched on or off.
    #[must_use]
    pub const fn with_first_page_offset(mut self, offset: bool) -> Self {
        self.first_page_offset = offset;
        self
    }
}

/// Read-only access to user layout settings.
///
/// Implementations are polled on every layout and selection pass; nothing in
/// this workspace caches the answers. Only the first three accessors are
/// required, the rest default to "automatic".
pub trait LayoutSettings {
    /// Whether pages are shown in facing pairs.
    fn is_paired_pages(&self) -> bool;

    /// Whether extra free space is added left and right of the pages.
    fn add_horizontal_space(&self) -> bool;

    /// Whether extra free space is added above and below the pages.
    fn add_vertical_space(&self) -> bool;

    /// Fixed column count override, if any.
    fn fixed_columns(&self) -> Option<NonZeroUsize> {
        None
    }

    /// Fixed row count override, if any.
    fn fixed_rows(&self) -> Option<NonZeroUsize> {
        None
    }

    /// Fill order of the grid.
    fn orientation(&self) -> GridOrientation {
        GridOrientation::RowMajor
    }

    /// Whether the first page sits alone in paired mode.
    fn first_page_offset(&self) -> bool {
        false
    }

    /// Snapshot of the current settings as a [`LayoutPolicy`].
    fn layout_policy(&self) -> LayoutPolicy {
        let padding = |extra: bool| {
            if extra {
                PaddingMode::ExtraSpace
            } else {
                PaddingMode::Tight
            }
        };
        LayoutPolicy {
            paired_pages: self.is_paired_pages(),
            fixed_columns: self.fixed_columns(),
            fixed_rows: self.fixed_rows(),
            horizontal_padding: padding(self.add_horizontal_space()),
            vertical_padding: padding(self.add_vertical_space()),
            orientation: self.orientation(),
            first_page_offset: self.first_page_offset(),
        }
    }
}

impl LayoutSettings for LayoutPolicy {
    fn is_paired_pages(&self) -> bool {
        self.paired_pages
    }

    fn add_horizontal_space(&self) -> bool {
        self.horizontal_padding == PaddingMode::ExtraSpace
    }

    fn add_vertical_space(&self) -> bool {
        self.vertical_padding == PaddingMode::ExtraSpace
    }

    fn fixed_columns(&self) -> Option<NonZeroUsize> {
        self.fixed_columns
    }

    fn fixed_rows(&self) -> Option<NonZeroUsize> {
        self.fixed_rows
    }

    fn orientation(&self) -> GridOrientation {
        self.orientation
    }

    fn first_page_offset(&self) -> bool {
        self.first_page_offset
    }

    fn layout_policy(&self) -> LayoutPolicy {
        *self
    }
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroUsize;

    use super::{GridOrientation, LayoutPolicy, LayoutSettings, PaddingMode};

    struct PairedWithMargins;

    impl LayoutSettings for PairedWithMargins {
        fn is_paired_pages(&self) -> bool {
            true
        }

        fn add_horizontal_space(&self) -> bool {
            true
        }

        fn add_vertical_space(&self) -> bool {
            false
        }
    }

    #[test]
    fn settings_snapshot_uses_defaults_for_optional_accessors() {
        let policy = PairedWithMargins.layout_policy();
        assert!(policy.paired_pages);
        assert_eq!(policy.horizontal_padding, PaddingMode::ExtraSpace);
        assert_eq!(policy.vertical_padding, PaddingMode::Tight);
        assert_eq!(policy.fixed_columns, None);
        assert_eq!(policy.orientation, GridOrientation::RowMajor);
        assert!(!policy.first_page_offset);
    }

    #[test]
    fn policy_round_trips_through_settings() {
        let policy = LayoutPolicy::new()
            .with_paired_pages(true)
            .with_fixed_rows(NonZeroUsize::new(2).unwrap())
            .with_padding(PaddingMode::Tight, PaddingMode::ExtraSpace)
            .with_orientation(GridOrientation::ColumnMajor)
            .with_first_page_offset(true);
        assert_eq!(policy.layout_policy(), policy);
        assert!(policy.add_vertical_space());
        assert!(!policy.add_horizontal_space());
    }
}
