// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_page_view --heading-base-level=0

//! Understory Page View: keep a paged layout in step with a scroll area.
//!
//! This crate connects [`understory_page_grid`] layouts to a scrollable
//! viewport and decides which page is current as the user scrolls.
//!
//! - [`ViewportTracker`]: owns a [`ScrollViewport`], re-runs layout when the
//!   widget width or the page collection changes, and runs a settle pass
//!   after each scroll change.
//! - [`ScrollViewport`]: the few operations needed from a toolkit's scroll
//!   widget. [`ScrollArea`] is a headless implementation built on two
//!   [`Adjustment`]s.
//! - [`PageHost`]: the host-side collaborators (layout settings, a position
//!   listener, and a selection listener) bundled as one bound.
//!
//! ## Current page
//!
//! After every settle pass the tracker marks each page visible or not and
//! reports the page with the largest visible fraction to
//! [`PageSelectionListener::page_selected`]. Near the top of the document the
//! first page is always current. With paired pages, a pair whose right page is
//! already selected is left alone.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_page_grid::{LayoutSettings, PageHandle, PagePositionListener, PageSlot};
//! use understory_page_view::{PageSelectionListener, ScrollArea, ViewportTracker};
//!
//! #[derive(Default)]
//! struct Document {
//!     current: Option<usize>,
//! }
//!
//! impl LayoutSettings for Document {
//!     fn is_paired_pages(&self) -> bool { false }
//!     fn add_horizontal_space(&self) -> bool { false }
//!     fn add_vertical_space(&self) -> bool { false }
//! }
//!
//! impl PagePositionListener for Document {
//!     fn update<P: PageHandle>(&mut self, _pages: &[P], _total_height: f64) {}
//! }
//!
//! impl PageSelectionListener for Document {
//!     fn page_selected(&mut self, index: usize) {
//!         self.current = Some(index);
//!     }
//! }
//!
//! let mut pages = vec![PageSlot::new(Size::new(400.0, 500.0)); 20];
//! let mut doc = Document::default();
//! let mut tracker = ViewportTracker::new(ScrollArea::new(Size::new(800.0, 600.0)));
//!
//! tracker.layout_pages(&mut pages, &mut doc).unwrap();
//! assert!(tracker.layout_height() > 600.0);
//!
//! tracker
//!     .scroll_absolute(Point::new(0.0, 2000.0), &mut pages, &mut doc)
//!     .unwrap();
//! assert_eq!(doc.current, Some(4));
//! assert!(pages[4].is_visible());
//! assert!(!pages[0].is_visible());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adjustment;
mod error;
mod host;
mod tracker;
mod viewport;

pub use adjustment::{Adjustment, ClampMode};
pub use error::TrackerError;
pub use host::{PageHost, PageSelectionListener};
pub use tracker::{ViewportTracker, VisibleMargins};
pub use viewport::{Axis, ConnectionId, ScrollArea, ScrollViewport};
