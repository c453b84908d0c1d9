// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Spacing constants used by [`PageLayout`](crate::PageLayout).
///
/// All values are in layout units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    /// Padding around the whole page area, including room for page shadows.
    pub outer_padding: f64,
    /// Added to `outer_padding` on an axis whose policy is
    /// [`PaddingMode::ExtraSpace`](crate::PaddingMode::ExtraSpace).
    pub extra_space_padding: f64,
    /// Gap left for the shadow between the two pages of a pair.
    pub shadow_allowance: f64,
    /// Distance between neighbouring rows and columns.
    pub page_spacing: f64,
}

impl LayoutMetrics {
    /// The stock metrics: 10 outer, 150 extra, 3 shadow, 15 between pages.
    pub const DEFAULT: Self = Self {
        outer_padding: 10.0,
        extra_space_padding: 150.0,
        shadow_allowance: 3.0,
        page_spacing: 15.0,
    };
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}
