// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};
use understory_page_grid::geometry::visible_fraction;
use understory_page_grid::{
    GridPlan, LayoutMetrics, LayoutResult, LayoutSettings, PageHandle, PageLayout,
};

use crate::error::TrackerError;
use crate::host::{PageHost, PageSelectionListener};
use crate::viewport::{Axis, ConnectionId, ScrollViewport};

/// Extra room kept around a rectangle by
/// [`ViewportTracker::ensure_visible`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleMargins {
    /// Kept before the rectangle (left / above).
    pub before: f64,
    /// Kept after the rectangle (right / below).
    pub after: f64,
}

impl VisibleMargins {
    /// 5 units before, 10 after.
    pub const DEFAULT: Self = Self {
        before: 5.0,
        after: 10.0,
    };
}

impl Default for VisibleMargins {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Keeps page layout and the current page in sync with a scrollable viewport.
///
/// The tracker owns the viewport, the layout engine, and the current
/// [`GridPlan`]. Pages and the collaborators in [`PageHost`] stay with the
/// host and are passed into every call.
///
/// ## Settle passes
///
/// Every scroll change ends in one settle pass: record the offsets, re-run
/// layout if the page collection changed since the last pass, pick the
/// current page, then tell the viewport via
/// [`ScrollViewport::scroll_settled`].
///
/// Changes reported by the viewport arrive through
/// [`on_scroll_changed`](Self::on_scroll_changed). Commands issued through the
/// tracker ([`scroll_relative`](Self::scroll_relative),
/// [`scroll_absolute`](Self::scroll_absolute),
/// [`ensure_visible`](Self::ensure_visible)) run their settle pass themselves
/// when the offset actually moved, so hosts must not forward the viewport's
/// notifications for those.
///
/// ## Subscriptions
///
/// Construction connects one subscription per axis on the viewport; dropping
/// the tracker disconnects both.
#[derive(Debug)]
pub struct ViewportTracker<V: ScrollViewport> {
    viewport: V,
    connections: [ConnectionId; 2],
    layout: PageLayout,
    plan: Option<GridPlan>,
    layout_size: Size,
    last_scroll: Vec2,
    last_widget_width: Option<f64>,
    margins: VisibleMargins,
    layout_stale: bool,
}

impl<V: ScrollViewport> ViewportTracker<V> {
    /// Creates a tracker over `viewport` with the stock layout metrics.
    pub fn new(viewport: V) -> Self {
        Self::with_metrics(viewport, LayoutMetrics::DEFAULT)
    }

    /// Creates a tracker over `viewport` using `metrics` for layout.
    pub fn with_metrics(mut viewport: V, metrics: LayoutMetrics) -> Self {
        let connections = [
            viewport.connect(Axis::Horizontal),
            viewport.connect(Axis::Vertical),
        ];
        let last_scroll = Vec2::new(
            viewport.offset(Axis::Horizontal),
            viewport.offset(Axis::Vertical),
        );
        Self {
            viewport,
            connections,
            layout: PageLayout::new(metrics),
            plan: None,
            layout_size: Size::ZERO,
            last_scroll,
            last_widget_width: None,
            margins: VisibleMargins::DEFAULT,
            layout_stale: true,
        }
    }

    /// The viewport being tracked.
    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutable access to the viewport.
    ///
    /// Offset changes made here are not noticed until they are reported via
    /// [`on_scroll_changed`](Self::on_scroll_changed).
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Layout spacing constants.
    #[must_use]
    pub fn layout_metrics(&self) -> &LayoutMetrics {
        self.layout.metrics()
    }

    /// Replaces the layout spacing constants; the next pass re-runs layout.
    pub fn set_layout_metrics(&mut self, metrics: LayoutMetrics) {
        self.layout.set_metrics(metrics);
        self.layout_stale = true;
    }

    /// Margins used by [`ensure_visible`](Self::ensure_visible).
    #[must_use]
    pub fn visible_margins(&self) -> VisibleMargins {
        self.margins
    }

    /// Sets the margins used by [`ensure_visible`](Self::ensure_visible).
    pub fn set_visible_margins(&mut self, margins: VisibleMargins) {
        self.margins = margins;
    }

    /// The grid plan of the last layout pass.
    #[must_use]
    pub fn plan(&self) -> Option<&GridPlan> {
        self.plan.as_ref()
    }

    /// Total extent of the last layout pass.
    #[must_use]
    pub fn layout_size(&self) -> Size {
        self.layout_size
    }

    /// Total width of the last layout pass.
    #[must_use]
    pub fn layout_width(&self) -> f64 {
        self.layout_size.width
    }

    /// Total height of the last layout pass.
    #[must_use]
    pub fn layout_height(&self) -> f64 {
        self.layout_size.height
    }

    /// Offsets recorded by the most recent settle pass.
    #[must_use]
    pub fn last_scroll(&self) -> Vec2 {
        self.last_scroll
    }

    /// The visible rectangle in layout coordinates, read from the viewport.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        self.viewport.visible_rect()
    }

    /// Forces the next settle pass to re-run layout.
    ///
    /// Call this when page sizes or layout settings change. Adding or removing
    /// pages is detected automatically.
    pub fn invalidate_layout(&mut self) {
        self.layout_stale = true;
    }

    /// Returns `true` if `page_count` pages cannot use the current layout.
    #[must_use]
    pub fn needs_layout(&self, page_count: usize) -> bool {
        self.layout_stale
            || self
                .plan
                .as_ref()
                .is_none_or(|plan| plan.page_count() != page_count)
    }

    /// Maps pages onto a fresh grid, positions them, and resizes the
    /// scrollable extent.
    ///
    /// The host's settings are read anew and its position listener is told
    /// about the result. If the new extent moved the scroll offset, a settle
    /// pass follows.
    pub fn layout_pages<P, H>(
        &mut self,
        pages: &mut [P],
        host: &mut H,
    ) -> Result<LayoutResult, TrackerError>
    where
        P: PageHandle,
        H: PageHost,
    {
        let result = self.relayout(pages, host)?;
        self.sync_scroll(pages, host)?;
        Ok(result)
    }

    /// Reacts to a new widget size.
    ///
    /// A width change re-runs layout, since centering and column fit depend
    /// on it. Otherwise the existing extent is handed to the viewport again.
    pub fn set_size<P, H>(
        &mut self,
        widget_size: Size,
        pages: &mut [P],
        host: &mut H,
    ) -> Result<(), TrackerError>
    where
        P: PageHandle,
        H: PageHost,
    {
        if self.last_widget_width == Some(widget_size.width) {
            tracing::debug!(
                height = widget_size.height,
                "viewport height changed, keeping layout"
            );
            self.viewport.set_content_size(self.layout_size);
        } else {
            tracing::debug!(
                width = widget_size.width,
                "viewport width changed, relaying out"
            );
            self.relayout(pages, host)?;
            self.last_widget_width = Some(widget_size.width);
        }
        self.sync_scroll(pages, host)
    }

    /// Handles an offset change reported by the viewport.
    ///
    /// Records `value` for `axis` and runs one settle pass.
    pub fn on_scroll_changed<P, H>(
        &mut self,
        axis: Axis,
        value: f64,
        pages: &mut [P],
        host: &mut H,
    ) -> Result<(), TrackerError>
    where
        P: PageHandle,
        H: PageHost,
    {
        match axis {
            Axis::Horizontal => self.last_scroll.x = value,
            Axis::Vertical => self.last_scroll.y = value,
        }
        self.settle(pages, host)
    }

    /// Shorthand for [`on_scroll_changed`](Self::on_scroll_changed) on the
    /// horizontal axis.
    pub fn on_horizontal_scroll_changed<P, H>(
        &mut self,
        value: f64,
        pages: &mut [P],
        host: &mut H,
    ) -> Result<(), TrackerError>
    where
        P: PageHandle,
        H: PageHost,
    {
        self.on_scroll_changed(Axis::Horizontal, value, pages, host)
    }

    /// Shorthand for [`on_scroll_changed`](Self::on_scroll_changed) on the
    /// vertical axis.
    pub fn on_vertical_scroll_changed<P, H>(
        &mut self,
        value: f64,
        pages: &mut [P],
        host: &mut H,
    ) -> Result<(), TrackerError>
    where
        P: PageHandle,
        H: PageHost,
    {
        self.on_scroll_changed(Axis::Vertical, value, pages, host)
    }

    /// Scrolls by `delta`.
    pub fn scroll_relative<P, H>(
        &mut self,
        delta: Vec2,
        pages: &mut [P],
        host: &mut H,
    ) -> Result<(), TrackerError>
    where
        P: PageHandle,
        H: PageHost,
    {
        let x = self.viewport.offset(Axis::Horizontal) + delta.x;
        let y = self.viewport.offset(Axis::Vertical) + delta.y;
        self.viewport.set_offset(Axis::Horizontal, x);
        self.viewport.set_offset(Axis::Vertical, y);
        self.sync_scroll(pages, host)
    }

    /// Scrolls so that `origin` is the top-left corner of the visible
    /// rectangle, as far as the viewport's clamping allows.
    pub fn scroll_absolute<P, H>(
        &mut self,
        origin: Point,
        pages: &mut [P],
        host: &mut H,
    ) -> Result<(), TrackerError>
    where
        P: PageHandle,
        H: PageHost,
    {
        self.viewport.set_offset(Axis::Horizontal, origin.x);
        self.viewport.set_offset(Axis::Vertical, origin.y);
        self.sync_scroll(pages, host)
    }

    /// Scrolls as little as possible so that `rect`, grown by the
    /// [`VisibleMargins`], is inside the viewport.
    pub fn ensure_visible<P, H>(
        &mut self,
        rect: Rect,
        pages: &mut [P],
        host: &mut H,
    ) -> Result<(), TrackerError>
    where
        P: PageHandle,
        H: PageHost,
    {
        let VisibleMargins { before, after } = self.margins;
        self.viewport
            .clamp_page(Axis::Horizontal, rect.x0 - before, rect.x1 + after);
        self.viewport
            .clamp_page(Axis::Vertical, rect.y0 - before, rect.y1 + after);
        self.sync_scroll(pages, host)
    }

    /// Scrolls page `index` into view, laying out first if needed.
    pub fn ensure_page_visible<P, H>(
        &mut self,
        index: usize,
        pages: &mut [P],
        host: &mut H,
    ) -> Result<(), TrackerError>
    where
        P: PageHandle,
        H: PageHost,
    {
        if index >= pages.len() {
            return Err(TrackerError::PageOutOfRange {
                index,
                page_count: pages.len(),
            });
        }
        if self.needs_layout(pages.len()) {
            self.relayout(pages, host)?;
        }
        let rect = pages[index].rect();
        self.ensure_visible(rect, pages, host)
    }

    /// Updates page visibility flags and reports the current page.
    ///
    /// If pages were added or removed since the last layout pass, or the
    /// layout was invalidated, layout runs first. Returns the page reported
    /// to `host`, if any.
    ///
    /// - With the top of the visible rectangle above `1.0`, page 0 is
    ///   current, unless pages are paired and the second page is already
    ///   selected. Visibility flags are left alone in that case.
    /// - Otherwise pages are scanned in order. Once a page starts below the
    ///   visible rectangle it and every later page are marked invisible.
    ///   Pages reaching into the visible band are marked visible, the rest
    ///   invisible. The page with the largest visible fraction wins; the
    ///   lowest index wins ties.
    /// - With paired pages the winner is not reported when its right-hand
    ///   partner shares its row and is already selected.
    ///
    /// An empty page collection reports nothing.
    pub fn update_current_page<P, H>(
        &mut self,
        pages: &mut [P],
        host: &mut H,
    ) -> Result<Option<usize>, TrackerError>
    where
        P: PageHandle,
        H: PageHost,
    {
        if self.needs_layout(pages.len()) {
            self.relayout(pages, host)?;
            self.last_scroll = self.current_offsets();
        }
        Ok(self.select_current_page(pages, host))
    }

    /// Selection over the positions the pages currently hold.
    fn select_current_page<P, H>(&self, pages: &mut [P], host: &mut H) -> Option<usize>
    where
        P: PageHandle,
        H: LayoutSettings + PageSelectionListener,
    {
        if pages.is_empty() {
            return None;
        }
        let visible = self.visible_rect();
        let paired = host.is_paired_pages();

        if visible.y0 < 1.0 {
            if paired && pages.len() > 1 && pages[1].is_selected() {
                tracing::trace!("at top, second page of first pair already selected");
                return None;
            }
            host.page_selected(0);
            return Some(0);
        }

        let mut best = 0;
        let mut best_fraction = 0.0;
        let mut first_below = None;
        for (index, page) in pages.iter_mut().enumerate() {
            let rect = page.rect();
            if rect.y0 > visible.y1 {
                first_below = Some(index);
                break;
            }
            if rect.y1 >= visible.y0 {
                let fraction = visible_fraction(rect, visible);
                if fraction > best_fraction {
                    best_fraction = fraction;
                    best = index;
                }
                page.set_visible(true);
            } else {
                page.set_visible(false);
            }
        }
        if let Some(start) = first_below {
            for page in &mut pages[start..] {
                page.set_visible(false);
            }
        }

        if paired && best + 1 < pages.len() {
            let partner = &pages[best + 1];
            let same_row = pages[best].position().y == partner.position().y;
            if same_row && partner.is_selected() {
                tracing::trace!(page = best, "partner page already selected");
                return None;
            }
        }
        tracing::trace!(page = best, fraction = best_fraction, "current page");
        host.page_selected(best);
        Some(best)
    }

    fn relayout<P, H>(
        &mut self,
        pages: &mut [P],
        host: &mut H,
    ) -> Result<LayoutResult, TrackerError>
    where
        P: PageHandle,
        H: PageHost,
    {
        let policy = host.layout_policy();
        let plan = GridPlan::new(pages.len(), &policy);
        let viewport = Size::new(
            self.viewport.page_size(Axis::Horizontal),
            self.viewport.page_size(Axis::Vertical),
        );
        let result = self.layout.layout_pages(pages, &plan, &policy, viewport)?;
        self.plan = Some(plan);
        self.layout_stale = false;
        self.layout_size = result.total_size();
        self.viewport.set_content_size(self.layout_size);
        host.update(pages, self.layout_size.height);
        Ok(result)
    }

    /// Runs a settle pass if the viewport offsets differ from the recorded
    /// ones.
    fn sync_scroll<P, H>(&mut self, pages: &mut [P], host: &mut H) -> Result<(), TrackerError>
    where
        P: PageHandle,
        H: PageHost,
    {
        if self.current_offsets() == self.last_scroll {
            return Ok(());
        }
        self.last_scroll = self.current_offsets();
        self.settle(pages, host)
    }

    fn settle<P, H>(&mut self, pages: &mut [P], host: &mut H) -> Result<(), TrackerError>
    where
        P: PageHandle,
        H: PageHost,
    {
        self.update_current_page(pages, host)?;
        self.viewport.scroll_settled();
        Ok(())
    }

    fn current_offsets(&self) -> Vec2 {
        Vec2::new(
            self.viewport.offset(Axis::Horizontal),
            self.viewport.offset(Axis::Vertical),
        )
    }
}

impl<V: ScrollViewport> Drop for ViewportTracker<V> {
    fn drop(&mut self) {
        for connection in self.connections {
            self.viewport.disconnect(connection);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Size};
    use understory_page_grid::{LayoutSettings, PageHandle, PagePositionListener, PageSlot};

    use super::ViewportTracker;
    use crate::host::PageSelectionListener;
    use crate::viewport::{Axis, ScrollArea, ScrollViewport};

    #[derive(Default)]
    struct Host {
        paired: bool,
        selected: Vec<usize>,
    }

    impl LayoutSettings for Host {
        fn is_paired_pages(&self) -> bool {
            self.paired
        }

        fn add_horizontal_space(&self) -> bool {
            false
        }

        fn add_vertical_space(&self) -> bool {
            false
        }
    }

    impl PagePositionListener for Host {
        fn update<P: PageHandle>(&mut self, _pages: &[P], _total_height: f64) {}
    }

    impl PageSelectionListener for Host {
        fn page_selected(&mut self, index: usize) {
            self.selected.push(index);
        }
    }

    /// Pages placed by hand: `(x, y, width, height)`.
    fn placed(rects: &[(f64, f64, f64, f64)]) -> Vec<PageSlot> {
        rects
            .iter()
            .map(|&(x, y, w, h)| {
                let mut page = PageSlot::new(Size::new(w, h));
                page.set_position(Point::new(x, y));
                page
            })
            .collect()
    }

    /// A tracker looking at `(0, y)` through a 500x300 window over tall
    /// content.
    fn tracker_at(y: f64) -> ViewportTracker<ScrollArea> {
        let mut area = ScrollArea::new(Size::new(500.0, 300.0));
        area.set_content_size(Size::new(500.0, 10_000.0));
        area.set_offset(Axis::Vertical, y);
        ViewportTracker::new(area)
    }

    fn visibility(pages: &[PageSlot]) -> Vec<bool> {
        pages.iter().map(PageHandle::is_visible).collect()
    }

    #[test]
    fn top_of_document_selects_first_page() {
        let tracker = tracker_at(0.5);
        // Page 1 would win on overlap, but the top rule applies first.
        let mut pages = placed(&[(0.0, 290.0, 100.0, 100.0), (0.0, 0.0, 100.0, 100.0)]);
        let mut host = Host::default();
        assert_eq!(tracker.select_current_page(&mut pages, &mut host), Some(0));
        assert_eq!(host.selected, [0]);
    }

    #[test]
    fn top_of_document_respects_selected_partner() {
        let tracker = tracker_at(0.0);
        let mut pages = placed(&[(0.0, 10.0, 100.0, 100.0), (110.0, 10.0, 100.0, 100.0)]);
        pages[1].set_selected(true);
        let mut host = Host {
            paired: true,
            ..Host::default()
        };
        assert_eq!(tracker.select_current_page(&mut pages, &mut host), None);
        assert!(host.selected.is_empty());
    }

    #[test]
    fn most_visible_page_wins() {
        let tracker = tracker_at(200.0);
        // Visible band is 200..500.
        let mut pages = placed(&[
            (0.0, 0.0, 100.0, 150.0),
            (0.0, 165.0, 100.0, 150.0),
            (0.0, 330.0, 100.0, 150.0),
            (0.0, 495.0, 100.0, 150.0),
            (0.0, 660.0, 100.0, 150.0),
        ]);
        let mut host = Host::default();
        assert_eq!(tracker.select_current_page(&mut pages, &mut host), Some(2));
        assert_eq!(visibility(&pages), [false, true, true, true, false]);
    }

    #[test]
    fn first_page_wins_a_tie() {
        let tracker = tracker_at(100.0);
        // Both pages are fully visible inside 100..400.
        let mut pages = placed(&[(0.0, 110.0, 100.0, 100.0), (110.0, 110.0, 100.0, 100.0)]);
        let mut host = Host::default();
        assert_eq!(tracker.select_current_page(&mut pages, &mut host), Some(0));
    }

    #[test]
    fn scan_stops_at_first_page_below_the_band() {
        let tracker = tracker_at(100.0);
        // Page 2 is out of order and would be visible, but the scan has
        // already stopped at page 1.
        let mut pages = placed(&[
            (0.0, 100.0, 100.0, 100.0),
            (0.0, 900.0, 100.0, 100.0),
            (0.0, 150.0, 100.0, 100.0),
        ]);
        for page in &mut pages {
            page.set_visible(true);
        }
        let mut host = Host::default();
        tracker.select_current_page(&mut pages, &mut host);
        assert_eq!(visibility(&pages), [true, false, false]);
    }

    #[test]
    fn paired_left_page_defers_to_selected_partner() {
        let tracker = tracker_at(100.0);
        let mut pages = placed(&[
            (0.0, 110.0, 100.0, 100.0),
            (106.0, 110.0, 100.0, 100.0),
            (0.0, 225.0, 100.0, 100.0),
        ]);
        pages[1].set_selected(true);
        let mut host = Host {
            paired: true,
            ..Host::default()
        };
        assert_eq!(tracker.select_current_page(&mut pages, &mut host), None);
        assert!(host.selected.is_empty());

        // Without the partner selected the left page is reported.
        pages[1].set_selected(false);
        assert_eq!(tracker.select_current_page(&mut pages, &mut host), Some(0));
    }

    #[test]
    fn paired_partner_on_another_row_does_not_block() {
        let tracker = tracker_at(100.0);
        let mut pages = placed(&[(0.0, 110.0, 100.0, 100.0), (0.0, 225.0, 100.0, 100.0)]);
        pages[1].set_selected(true);
        let mut host = Host {
            paired: true,
            ..Host::default()
        };
        assert_eq!(tracker.select_current_page(&mut pages, &mut host), Some(0));
    }

    #[test]
    fn last_page_is_always_reported_in_paired_mode() {
        let tracker = tracker_at(1000.0);
        let mut pages = placed(&[(0.0, 10.0, 100.0, 100.0), (0.0, 1010.0, 100.0, 100.0)]);
        let mut host = Host {
            paired: true,
            ..Host::default()
        };
        assert_eq!(tracker.select_current_page(&mut pages, &mut host), Some(1));
    }

    #[test]
    fn no_pages_no_selection() {
        let tracker = tracker_at(0.0);
        let mut pages: Vec<PageSlot> = Vec::new();
        let mut host = Host::default();
        assert_eq!(tracker.select_current_page(&mut pages, &mut host), None);
        assert!(host.selected.is_empty());
    }

    #[test]
    fn nothing_visible_falls_back_to_first_page() {
        let tracker = tracker_at(5000.0);
        let mut pages = placed(&[(0.0, 10.0, 100.0, 100.0), (0.0, 125.0, 100.0, 100.0)]);
        let mut host = Host::default();
        assert_eq!(tracker.select_current_page(&mut pages, &mut host), Some(0));
        assert_eq!(visibility(&pages), [false, false]);
    }
}
