// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_page_grid --heading-base-level=0

//! Understory Page Grid: arrange independently sized pages on a grid.
//!
//! This crate lays out a sequence of rectangular pages (think document pages at
//! the current zoom) for display inside a scrollable area. It provides:
//! - [`GridPlan`]: how many rows and columns to use, and which page sits in
//!   which cell, for a page count and a [`LayoutPolicy`].
//! - [`PageLayout`]: per-column and per-row extents, borders that center the
//!   pages when they fit, paired-page gutters, and the total layout extent.
//! - [`PageHandle`]: the small capability set a page view must offer.
//! - [`PagePositionIndex`]: an optional positional index fed after each pass.
//!
//! It does **not** render anything or own the pages. Hosts keep their page
//! views and hand them to the layout as a mutable slice; layout only writes
//! page positions.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_page_grid::{GridPlan, LayoutPolicy, PageHandle, PageLayout, PageSlot};
//!
//! let mut pages = vec![PageSlot::new(Size::new(100.0, 140.0)); 4];
//! let policy = LayoutPolicy::new().with_paired_pages(true);
//!
//! let plan = GridPlan::new(pages.len(), &policy);
//! assert_eq!((plan.columns(), plan.rows()), (2, 2));
//!
//! let layout = PageLayout::default();
//! let result = layout
//!     .layout_pages(&mut pages, &plan, &policy, Size::new(800.0, 600.0))
//!     .unwrap();
//!
//! // Facing pages share a row.
//! assert_eq!(pages[0].position().y, pages[1].position().y);
//! // The grid fits the viewport, so it is centered rather than padded.
//! assert!(result.border().x > layout.metrics().outer_padding);
//! ```
//!
//! ## Geometry
//!
//! Everything is in layout units using [`kurbo`] types. The [`geometry`]
//! module holds the rectangle helpers shared with scroll tracking.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod geometry;
mod grid;
mod layout;
mod metrics;
mod page;
mod policy;
mod position;

pub use grid::GridPlan;
pub use layout::{LayoutError, LayoutResult, PageLayout};
pub use metrics::LayoutMetrics;
pub use page::{PageHandle, PageSlot};
pub use policy::{GridOrientation, LayoutPolicy, LayoutSettings, PaddingMode};
pub use position::{PagePositionIndex, PagePositionListener};
