// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_page_grid::{LayoutSettings, PagePositionListener};

/// Receives the page the tracker judges to be current.
///
/// The tracker may report the same page several times in a row; receivers
/// that care must ignore repeats themselves.
pub trait PageSelectionListener {
    /// `index` is now the current page.
    fn page_selected(&mut self, index: usize);
}

/// Everything a [`ViewportTracker`](crate::ViewportTracker) needs from its
/// host: layout settings, a page-position consumer, and a selection
/// consumer.
///
/// Implemented automatically for any type providing all three.
pub trait PageHost: LayoutSettings + PagePositionListener + PageSelectionListener {}

impl<T> PageHost for T where T: LayoutSettings + PagePositionListener + PageSelectionListener {}
