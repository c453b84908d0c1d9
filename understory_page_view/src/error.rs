// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use understory_page_grid::LayoutError;

/// Errors surfaced by [`ViewportTracker`](crate::ViewportTracker).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackerError {
    /// A layout pass rejected its inputs.
    Layout(LayoutError),
    /// A page index past the end of the page collection was requested.
    PageOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of pages available.
        page_count: usize,
    },
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "layout failed: {err}"),
            Self::PageOutOfRange { index, page_count } => {
                write!(f, "page {index} out of range for {page_count} pages")
            }
        }
    }
}

impl core::error::Error for TrackerError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::PageOutOfRange { .. } => None,
        }
    }
}

impl From<LayoutError> for TrackerError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}
