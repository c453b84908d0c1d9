// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::adjustment::{Adjustment, ClampMode};

/// One of the two scroll axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis.
    Horizontal,
    /// The Y axis.
    Vertical,
}

/// Handle for a change subscription on a [`ScrollViewport`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Wraps a viewport-specific identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the viewport-specific identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// The scrollable area the pages are shown in.
///
/// Implementations are usually thin wrappers over a toolkit's scroll widget.
/// The viewport reports its own offset changes (drags, wheel, keyboard) by
/// having the host call
/// [`ViewportTracker::on_scroll_changed`](crate::ViewportTracker::on_scroll_changed)
/// for every subscribed axis.
pub trait ScrollViewport {
    /// Current scroll offset on `axis`.
    fn offset(&self, axis: Axis) -> f64;

    /// Requests a new offset on `axis`. The viewport may clamp it.
    fn set_offset(&mut self, axis: Axis, value: f64);

    /// Visible extent on `axis`.
    fn page_size(&self, axis: Axis) -> f64;

    /// Sets the total scrollable extent.
    fn set_content_size(&mut self, size: Size);

    /// Scrolls as little as possible so that `[lower, upper]` on `axis` is
    /// visible. A no-op if it already is.
    fn clamp_page(&mut self, axis: Axis, lower: f64, upper: f64);

    /// Subscribes to offset changes on `axis`.
    fn connect(&mut self, axis: Axis) -> ConnectionId;

    /// Drops a subscription made with [`connect`](Self::connect).
    fn disconnect(&mut self, connection: ConnectionId);

    /// Called after every settle pass, once the current page is decided.
    fn scroll_settled(&mut self) {}

    /// The visible rectangle in layout coordinates.
    fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(
            Point::new(self.offset(Axis::Horizontal), self.offset(Axis::Vertical)),
            Size::new(
                self.page_size(Axis::Horizontal),
                self.page_size(Axis::Vertical),
            ),
        )
    }
}

impl<T: ScrollViewport + ?Sized> ScrollViewport for &mut T {
    fn offset(&self, axis: Axis) -> f64 {
        (**self).offset(axis)
    }

    fn set_offset(&mut self, axis: Axis, value: f64) {
        (**self).set_offset(axis, value);
    }

    fn page_size(&self, axis: Axis) -> f64 {
        (**self).page_size(axis)
    }

    fn set_content_size(&mut self, size: Size) {
        (**self).set_content_size(size);
    }

    fn clamp_page(&mut self, axis: Axis, lower: f64, upper: f64) {
        (**self).clamp_page(axis, lower, upper);
    }

    fn connect(&mut self, axis: Axis) -> ConnectionId {
        (**self).connect(axis)
    }

    fn disconnect(&mut self, connection: ConnectionId) {
        (**self).disconnect(connection);
    }

    fn scroll_settled(&mut self) {
        (**self).scroll_settled();
    }

    fn visible_rect(&self) -> Rect {
        (**self).visible_rect()
    }
}

/// A headless two-axis [`ScrollViewport`].
///
/// Useful for tests and for hosts whose toolkit only provides raw scroll
/// deltas. Both axes share one [`ClampMode`].
#[derive(Clone, Debug)]
pub struct ScrollArea {
    horizontal: Adjustment,
    vertical: Adjustment,
    connections: Vec<(ConnectionId, Axis)>,
    next_connection: u64,
    settle_count: u64,
}

impl ScrollArea {
    /// Creates an area showing `viewport` units at once, with no content.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            horizontal: Adjustment::new(viewport.width),
            vertical: Adjustment::new(viewport.height),
            connections: Vec::new(),
            next_connection: 1,
            settle_count: 0,
        }
    }

    /// The adjustment behind `axis`.
    #[must_use]
    pub fn adjustment(&self, axis: Axis) -> &Adjustment {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    /// Mutable access to the adjustment behind `axis`.
    ///
    /// Changes made here are user scrolls: forward them to the tracker.
    pub fn adjustment_mut(&mut self, axis: Axis) -> &mut Adjustment {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    /// Resizes the visible area. Returns `true` if an offset had to move.
    pub fn set_viewport_size(&mut self, size: Size) -> bool {
        let h = self.horizontal.set_page_size(size.width);
        let v = self.vertical.set_page_size(size.height);
        h || v
    }

    /// Sets the clamp mode of both axes. Returns `true` if an offset moved.
    pub fn set_clamp_mode(&mut self, mode: ClampMode) -> bool {
        let h = self.horizontal.set_clamp_mode(mode);
        let v = self.vertical.set_clamp_mode(mode);
        h || v
    }

    /// Total scrollable extent.
    #[must_use]
    pub fn content_size(&self) -> Size {
        Size::new(self.horizontal.upper(), self.vertical.upper())
    }

    /// Returns `true` if anything is subscribed to `axis`.
    #[must_use]
    pub fn is_connected(&self, axis: Axis) -> bool {
        self.connections.iter().any(|&(_, a)| a == axis)
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// How many settle passes have completed so far.
    #[must_use]
    pub fn settle_count(&self) -> u64 {
        self.settle_count
    }
}

impl ScrollViewport for ScrollArea {
    fn offset(&self, axis: Axis) -> f64 {
        self.adjustment(axis).value()
    }

    fn set_offset(&mut self, axis: Axis, value: f64) {
        self.adjustment_mut(axis).set_value(value);
    }

    fn page_size(&self, axis: Axis) -> f64 {
        self.adjustment(axis).page_size()
    }

    fn set_content_size(&mut self, size: Size) {
        self.horizontal.set_upper(size.width);
        self.vertical.set_upper(size.height);
    }

    fn clamp_page(&mut self, axis: Axis, lower: f64, upper: f64) {
        self.adjustment_mut(axis).clamp_page(lower, upper);
    }

    fn connect(&mut self, axis: Axis) -> ConnectionId {
        let id = ConnectionId::new(self.next_connection);
        self.next_connection += 1;
        self.connections.push((id, axis));
        id
    }

    fn disconnect(&mut self, connection: ConnectionId) {
        self.connections.retain(|&(id, _)| id != connection);
    }

    fn scroll_settled(&mut self) {
        self.settle_count += 1;
    }
}
