// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle helpers shared by layout and visibility tracking.
//!
//! All geometry is expressed with [`kurbo::Rect`] in layout units. These
//! helpers are total: any well-formed rectangle, including zero-area ones,
//! yields a defined result.

use kurbo::Rect;

/// Returns the overlap of `a` and `b`.
///
/// When the rectangles do not overlap on some axis the result has zero extent
/// on that axis. Callers should treat a non-positive [`area`] as "no overlap".
#[must_use]
pub fn intersect(a: Rect, b: Rect) -> Rect {
    a.intersect(b)
}

/// Returns the area of `rect`, treating negative extents as zero.
#[must_use]
pub fn area(rect: Rect) -> f64 {
    rect.width().max(0.0) * rect.height().max(0.0)
}

/// Returns the fraction of `page` covered by `visible`, in `[0, 1]`.
///
/// A page with zero area reports `0.0` rather than NaN.
#[must_use]
pub fn visible_fraction(page: Rect, visible: Rect) -> f64 {
    let page_area = area(page);
    if page_area <= 0.0 {
        return 0.0;
    }
    area(intersect(page, visible)) / page_area
}

/// Halves `value`, truncating toward zero like integer division.
///
/// Layout arithmetic uses this for every split so that integral inputs always
/// land on integral positions.
#[must_use]
pub(crate) fn half_toward_zero(value: f64) -> f64 {
    let half = value * 0.5;
    half - half % 1.0
}
