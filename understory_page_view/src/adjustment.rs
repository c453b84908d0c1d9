// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// How an [`Adjustment`] treats values outside its scrollable range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClampMode {
    /// Keep whatever value is requested; visibility math uses it as-is.
    None,
    /// Keep the value within `[0, max(0, upper - page_size)]`.
    #[default]
    Range,
}

/// A single scroll axis: content extent, visible page size and offset.
///
/// The scrollable content always starts at `0`. With [`ClampMode::Range`]
/// every change that could push the offset out of range (a new value, a
/// shorter extent, a larger page) re-clamps it, and mutators report whether
/// the offset moved.
#[derive(Clone, Debug, PartialEq)]
pub struct Adjustment {
    value: f64,
    upper: f64,
    page_size: f64,
    clamp_mode: ClampMode,
}

impl Adjustment {
    /// Creates an axis with no content that shows `page_size` units at once.
    #[must_use]
    pub fn new(page_size: f64) -> Self {
        Self {
            value: 0.0,
            upper: 0.0,
            page_size: page_size.max(0.0),
            clamp_mode: ClampMode::default(),
        }
    }

    /// Current offset.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Total content extent.
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Visible extent.
    #[must_use]
    pub fn page_size(&self) -> f64 {
        self.page_size
    }

    /// Largest offset reachable in [`ClampMode::Range`].
    #[must_use]
    pub fn max_value(&self) -> f64 {
        (self.upper - self.page_size).max(0.0)
    }

    /// Currently visible span of the content.
    #[must_use]
    pub fn visible_range(&self) -> Range<f64> {
        self.value..self.value + self.page_size
    }

    /// Returns the current clamp mode.
    #[must_use]
    pub fn clamp_mode(&self) -> ClampMode {
        self.clamp_mode
    }

    /// Sets the clamp mode, re-clamping the offset. Returns `true` if the
    /// offset moved.
    pub fn set_clamp_mode(&mut self, mode: ClampMode) -> bool {
        if self.clamp_mode == mode {
            return false;
        }
        self.clamp_mode = mode;
        self.set_value(self.value)
    }

    /// Moves to `value`, subject to clamping. Returns `true` if the offset
    /// moved. Non-finite values are ignored.
    pub fn set_value(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let value = match self.clamp_mode {
            ClampMode::None => value,
            ClampMode::Range => value.clamp(0.0, self.max_value()),
        };
        if value == self.value {
            return false;
        }
        self.value = value;
        true
    }

    /// Moves by `delta`. Returns `true` if the offset moved.
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        if delta == 0.0 {
            return false;
        }
        self.set_value(self.value + delta)
    }

    /// Sets the content extent. Returns `true` if the offset had to move.
    pub fn set_upper(&mut self, upper: f64) -> bool {
        if !upper.is_finite() || upper == self.upper {
            return false;
        }
        self.upper = upper.max(0.0);
        self.set_value(self.value)
    }

    /// Sets the visible extent. Returns `true` if the offset had to move.
    pub fn set_page_size(&mut self, page_size: f64) -> bool {
        if !page_size.is_finite() || page_size == self.page_size {
            return false;
        }
        self.page_size = page_size.max(0.0);
        self.set_value(self.value)
    }

    /// Scrolls as little as possible so that `[lower, upper]` is visible.
    ///
    /// The end of the span is brought into view first; if the span is larger
    /// than the page, its start wins. In [`ClampMode::Range`] the span is
    /// first limited to the content. Returns `true` if the offset moved.
    pub fn clamp_page(&mut self, lower: f64, upper: f64) -> bool {
        let (lower, upper) = match self.clamp_mode {
            ClampMode::None => (lower, upper),
            ClampMode::Range => (lower.clamp(0.0, self.upper), upper.clamp(0.0, self.upper)),
        };
        let mut value = self.value;
        if value + self.page_size < upper {
            value = upper - self.page_size;
        }
        if value > lower {
            value = lower;
        }
        self.set_value(value)
    }
}
