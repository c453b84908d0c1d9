// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

/// The capabilities layout and scroll tracking need from a page view.
///
/// Pages are owned by the host. Layout writes [`set_position`](Self::set_position),
/// scroll tracking writes [`set_visible`](Self::set_visible); neither ever adds,
/// removes, or reorders pages.
pub trait PageHandle {
    /// Current on-screen size, including any zoom.
    fn display_size(&self) -> Size;

    /// Top-left corner in layout coordinates.
    fn position(&self) -> Point;

    /// Moves the page. Only called by layout.
    fn set_position(&mut self, position: Point);

    /// Whether the page currently overlaps the visible band.
    fn is_visible(&self) -> bool;

    /// Updates the visibility flag. Only called by scroll tracking.
    fn set_visible(&mut self, visible: bool);

    /// Whether the host considers this page the selected one.
    fn is_selected(&self) -> bool;

    /// Page bounds in layout coordinates.
    fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position(), self.display_size())
    }
}

/// A plain [`PageHandle`] for hosts that keep page geometry separate from
/// their widgets.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PageSlot {
    size: Size,
    position: Point,
    visible: bool,
    selected: bool,
}

impl PageSlot {
    /// Creates an unselected, invisible page of the given display size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Changes the display size, for example after a zoom change.
    ///
    /// The page must be laid out again before its position is meaningful.
    pub fn set_display_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Marks the page as selected or not.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

impl PageHandle for PageSlot {
    fn display_size(&self) -> Size {
        self.size
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_selected(&self) -> bool {
        self.selected
    }
}
