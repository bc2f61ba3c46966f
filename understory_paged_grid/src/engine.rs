// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paged grid controller: full layout, windowing, scrolling and settling.

use alloc::boxed::Box;
use core::fmt;
use core::ops::Range;

use kurbo::Vec2;
use smallvec::SmallVec;

use crate::geometry::{FrameCache, GridMetrics};
use crate::navigator::PageNavigator;
use crate::orientation::switch_orientation;
use crate::pages::{PageEvent, PageState, Selection};
use crate::scroll::{ScrollTracker, page_index_at};
use crate::util::{px_to_count, scaled};
use crate::{
    DataSource, FrameCachePolicy, GridConfig, ItemFrame, Orientation, PageListener, PagerOptions,
    ScrollAxes, ScrollDelta, ScrollState, UsableSize, ViewProvider,
};

/// Pages kept attached behind the anchor item.
const PAGES_BEHIND: usize = 2;
/// Total pages spanned by the attachment window.
const WINDOW_PAGES: usize = 4;
/// Pages whose frames are computed ahead of each full layout's windowing pass.
const PREFETCH_PAGES: usize = 2;

/// The operations a paged layout core offers to a host adapter.
///
/// [`PagedGrid`] is the implementation shipped with this crate; host adapters
/// can be written against this trait to stay independent of it.
pub trait PagedLayout<H: ViewProvider + DataSource> {
    /// Recomputes bounds and page state from the current data set and re-fills the window.
    fn layout(&mut self, host: &mut H);

    /// Re-decides which items are attached for the current offset.
    fn fill_window(&mut self, host: &mut H);

    /// Scrolls along the active axis and returns the distance actually travelled.
    fn scroll_by(&mut self, delta: i64, host: &mut H) -> i64;

    /// Records a scroll phase change; entering [`ScrollState::Idle`] settles the page.
    fn on_scroll_state_changed(&mut self, state: ScrollState, host: &mut H);

    /// Switches orientation while idle and returns the orientation in effect.
    fn set_orientation(&mut self, orientation: Orientation) -> Orientation;

    /// A snapshot for navigation and snap queries.
    fn navigator(&self) -> PageNavigator;
}

#[derive(Debug)]
struct Attached<E> {
    index: usize,
    element: E,
}

/// A rows × columns grid that pages along one axis and keeps at most four
/// pages of elements attached.
///
/// The grid owns all layout state (frame cache, offsets, page bookkeeping)
/// while the host owns the elements. Every entry point takes `&mut self`, so
/// calls are serialized by construction.
///
/// ```rust
/// use understory_paged_grid::{
///     DataSource, GridConfig, ItemFrame, Orientation, PagedGrid, UsableSize, ViewProvider,
/// };
///
/// struct Host {
///     items: usize,
///     placed: Vec<(usize, ItemFrame)>,
/// }
///
/// impl DataSource for Host {
///     fn item_count(&self) -> usize {
///         self.items
///     }
/// }
///
/// impl ViewProvider for Host {
///     type Element = usize;
///     fn usable_size(&self) -> UsableSize {
///         UsableSize::new(300, 200)
///     }
///     fn acquire(&mut self, index: usize) -> usize {
///         index
///     }
///     fn attach(&mut self, _: &usize) {}
///     fn release(&mut self, _: usize) {}
///     fn measure(&mut self, _: &usize, _: i64, _: i64) {}
///     fn position(&mut self, element: &usize, frame: ItemFrame) {
///         self.placed.push((*element, frame));
///     }
/// }
///
/// let config = GridConfig::new(2, 3, Orientation::Horizontal).unwrap();
/// let mut grid = PagedGrid::new(config);
/// let mut host = Host { items: 100, placed: Vec::new() };
///
/// grid.layout(&mut host);
/// assert_eq!(grid.total_page_count(), 17);
/// assert!(grid.attached_count() <= 4 * config.page_item_count());
///
/// // Scroll two thirds of a page: more than half of page 1 is visible.
/// assert_eq!(grid.scroll_by(200, &mut host), 200);
/// assert_eq!(grid.current_page_index(), 1);
/// ```
pub struct PagedGrid<E> {
    config: GridConfig,
    options: PagerOptions,
    metrics: GridMetrics,
    item_extents: Option<(i64, i64)>,
    cache: FrameCache,
    tracker: ScrollTracker,
    pages: PageState,
    scroll_state: ScrollState,
    item_count: usize,
    attached: SmallVec<[Attached<E>; 16]>,
    listener: Option<Box<dyn PageListener>>,
}

impl<E> fmt::Debug for PagedGrid<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedGrid")
            .field("config", &self.config)
            .field("options", &self.options)
            .field("metrics", &self.metrics)
            .field("tracker", &self.tracker)
            .field("pages", &self.pages)
            .field("scroll_state", &self.scroll_state)
            .field("item_count", &self.item_count)
            .field("attached", &self.attached.len())
            .field("cached_frames", &self.cache.len())
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl<E> PagedGrid<E> {
    /// Creates a grid with default [`PagerOptions`].
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        Self::with_options(config, PagerOptions::default())
    }

    /// Creates a grid with explicit options.
    #[must_use]
    pub fn with_options(config: GridConfig, options: PagerOptions) -> Self {
        Self {
            config,
            options,
            metrics: GridMetrics::default(),
            item_extents: None,
            cache: FrameCache::new(),
            tracker: ScrollTracker::new(),
            pages: PageState::new(),
            scroll_state: ScrollState::Idle,
            item_count: 0,
            attached: SmallVec::new(),
            listener: None,
        }
    }

    /// Installs the receiver for page notifications, replacing any previous one.
    pub fn set_page_listener(&mut self, listener: impl PageListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Removes the page listener.
    pub fn clear_page_listener(&mut self) {
        self.listener = None;
    }

    /// Whether page selections are reported while scrolling.
    #[must_use]
    pub const fn notify_during_scroll(&self) -> bool {
        self.options.notify_during_scroll
    }

    /// Enables or disables page selection reports during scrolling.
    ///
    /// Idle settles are reported either way.
    pub fn set_notify_during_scroll(&mut self, notify: bool) {
        self.options.notify_during_scroll = notify;
    }

    /// Fixes item extents instead of splitting the viewport evenly.
    ///
    /// Passing `None` restores the even split. Takes effect on the next
    /// [`layout`](Self::layout); cached frames are dropped.
    pub fn set_item_extents(&mut self, extents: Option<(i64, i64)>) {
        if self.item_extents != extents {
            self.item_extents = extents;
            self.cache.invalidate();
        }
    }

    /// The grid configuration.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The runtime options.
    #[must_use]
    pub const fn options(&self) -> &PagerOptions {
        &self.options
    }

    /// Viewport and item extents resolved by the last full layout.
    #[must_use]
    pub const fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    /// Current orientation.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.config.orientation()
    }

    /// Returns `true` when scrolling is horizontal.
    #[must_use]
    pub const fn can_scroll_horizontally(&self) -> bool {
        self.orientation().is_horizontal()
    }

    /// Returns `true` when scrolling is vertical.
    #[must_use]
    pub const fn can_scroll_vertically(&self) -> bool {
        !self.orientation().is_horizontal()
    }

    /// The single axis this grid scrolls along.
    #[must_use]
    pub const fn scroll_axes(&self) -> ScrollAxes {
        self.orientation().scroll_axes()
    }

    /// Last scroll phase reported by the host.
    #[must_use]
    pub const fn scroll_state(&self) -> ScrollState {
        self.scroll_state
    }

    /// Item count as of the last full layout.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Total number of pages as of the last full layout.
    #[must_use]
    pub const fn total_page_count(&self) -> usize {
        self.pages.total()
    }

    /// Index of the current page.
    #[must_use]
    pub const fn current_page_index(&self) -> usize {
        self.pages.current()
    }

    /// Page bookkeeping, including what was last reported.
    #[must_use]
    pub const fn page_state(&self) -> &PageState {
        &self.pages
    }

    /// Horizontal scroll offset.
    #[must_use]
    pub const fn offset_x(&self) -> i64 {
        self.tracker.offset_x()
    }

    /// Vertical scroll offset.
    #[must_use]
    pub const fn offset_y(&self) -> i64 {
        self.tracker.offset_y()
    }

    /// Scroll offset along the active axis.
    #[must_use]
    pub const fn current_offset(&self) -> i64 {
        self.tracker.offset(self.orientation())
    }

    /// Largest offset along the active axis.
    #[must_use]
    pub const fn max_scroll(&self) -> i64 {
        self.tracker.max_scroll(self.orientation())
    }

    /// The offsets and bounds along both axes.
    #[must_use]
    pub const fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    /// The frame cache.
    #[must_use]
    pub const fn frame_cache(&self) -> &FrameCache {
        &self.cache
    }

    /// Number of attached elements.
    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Indices of attached elements, in attachment order.
    pub fn attached_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.attached.iter().map(|a| a.index)
    }

    /// Layout-space frame of `index`, cached on first access.
    pub fn frame(&mut self, index: usize) -> ItemFrame {
        self.cache.frame(&self.config, &self.metrics, index)
    }

    /// A snapshot for navigation and snap queries.
    #[must_use]
    pub fn navigator(&self) -> PageNavigator {
        PageNavigator::new(
            self.config,
            self.metrics.usable,
            ScrollDelta::new(self.tracker.offset_x(), self.tracker.offset_y()),
            self.pages.current(),
            self.pages.total(),
        )
    }

    /// First item of the next page. See [`PageNavigator::next_page_first_pos`].
    #[must_use]
    pub fn next_page_first_pos(&self) -> usize {
        self.navigator().next_page_first_pos()
    }

    /// First item of the current page. See [`PageNavigator::pre_page_first_pos`].
    #[must_use]
    pub fn pre_page_first_pos(&self) -> usize {
        self.navigator().pre_page_first_pos()
    }

    /// Distance from the current offset to the page holding `index`.
    #[must_use]
    pub fn scroll_vector(&self, index: usize) -> Vec2 {
        self.navigator().scroll_vector(index)
    }

    /// Snap distance to the page holding `index`; zero when nothing is attached.
    #[must_use]
    pub fn snap_offset(&self, index: usize) -> ScrollDelta {
        self.navigator()
            .snap_offset(index, !self.attached.is_empty())
    }

    /// The attached item a snap helper should align to.
    #[must_use]
    pub fn find_snap_anchor(&self) -> Option<usize> {
        self.find_snap_anchor_with_focus(None)
    }

    /// Like [`find_snap_anchor`](Self::find_snap_anchor), preferring `focused`
    /// when that item is attached.
    #[must_use]
    pub fn find_snap_anchor_with_focus(&self, focused: Option<usize>) -> Option<usize> {
        let attached: SmallVec<[usize; 16]> = self.attached_indices().collect();
        self.navigator().find_snap_anchor(&attached, focused)
    }

    /// Snap anchor honoring the host's input focus.
    #[must_use]
    pub fn snap_anchor_in<H: ViewProvider>(&self, host: &H) -> Option<usize> {
        self.find_snap_anchor_with_focus(host.focused_index())
    }

    /// Switches orientation if idle and different; returns the orientation in effect.
    ///
    /// The host should request a new [`layout`](Self::layout) afterwards so
    /// elements are re-positioned along the new axis.
    pub fn set_orientation(&mut self, orientation: Orientation) -> Orientation {
        switch_orientation(
            &mut self.config,
            &mut self.tracker,
            &mut self.cache,
            self.metrics.usable,
            self.scroll_state,
            orientation,
        )
    }

    /// Returns every attached element to the host pool.
    pub fn release_all<H>(&mut self, host: &mut H)
    where
        H: ViewProvider<Element = E>,
    {
        for attached in self.attached.drain(..) {
            host.release(attached.element);
        }
    }

    /// Full layout, run on data-set changes and initial attachment.
    pub fn layout<H>(&mut self, host: &mut H)
    where
        H: ViewProvider<Element = E> + DataSource,
    {
        let item_count = host.item_count();
        self.item_count = item_count;

        if item_count == 0 {
            log::debug!("layout: empty data set");
            self.release_all(host);
            self.cache.invalidate();
            let orientation = self.orientation();
            self.tracker.set_bounds(orientation, 0, host.usable_size());
            self.pages.set_total(0);
            let event = self.pages.report_count(0);
            self.emit(event);
            let event = self
                .pages
                .select(0, Selection::Settled, self.options.notify_during_scroll);
            self.emit(event);
            return;
        }

        let orientation = self.orientation();
        let usable = host.usable_size();
        self.resolve_metrics(usable);

        let total = self.config.total_page_count(item_count);
        self.tracker.set_bounds(orientation, total, usable);
        self.pages.set_total(total);
        log::debug!(
            "layout: {item_count} items, {total} pages, offset {} of {}",
            self.tracker.offset(orientation),
            self.tracker.max_scroll(orientation)
        );

        let page_items = self.config.page_item_count();
        let prefetch = self.prefetch_range();
        self.cache.warm(&self.config, &self.metrics, prefetch);

        let (width_used, height_used) = self.metrics.used_space(&self.config);
        for index in 0..page_items.min(item_count) {
            let element = host.acquire(index);
            host.attach(&element);
            host.measure(&element, width_used, height_used);
            self.attached.push(Attached { index, element });
        }

        self.fill_window(host);

        let event = self.pages.report_count(total);
        self.emit(event);
        let event = self.pages.select(
            self.pages.current(),
            Selection::Settled,
            self.options.notify_during_scroll,
        );
        self.emit(event);
    }

    /// Windowing pass: re-decides which items are attached for the current offset.
    ///
    /// Every attached element is released first; candidates from a window of
    /// at most four pages around the first attached item are then attached
    /// if their frame intersects the viewport widened by one item along the
    /// scroll axis.
    pub fn fill_window<H>(&mut self, host: &mut H)
    where
        H: ViewProvider<Element = E> + DataSource,
    {
        let item_count = self.item_count.min(host.item_count());
        let display = self.display_rect();
        let window = self.window(item_count);

        self.release_all(host);

        let (width_used, height_used) = self.metrics.used_space(&self.config);
        let (dx, dy) = (self.tracker.offset_x(), self.tracker.offset_y());
        for index in window.clone() {
            let frame = self.cache.frame(&self.config, &self.metrics, index);
            if !frame.intersects(&display) {
                log::trace!("skip {index}: {frame:?} outside {display:?}");
                continue;
            }
            let element = host.acquire(index);
            host.attach(&element);
            host.measure(&element, width_used, height_used);
            host.position(&element, frame.relative_to(dx, dy));
            self.attached.push(Attached { index, element });
        }

        if let FrameCachePolicy::Bounded { margin_pages } = self.options.frame_cache {
            let margin = margin_pages.saturating_mul(self.config.page_item_count());
            self.cache.retain_window(window.clone(), margin);
        }
        log::debug!(
            "window {}..{}: {} attached, {} frames cached",
            window.start,
            window.end,
            self.attached.len(),
            self.cache.len()
        );
    }

    /// Scrolls along the active axis by up to `delta` and refills the window.
    ///
    /// Returns the distance actually travelled; the remainder was blocked by
    /// the scroll bounds.
    pub fn scroll_by<H>(&mut self, delta: i64, host: &mut H) -> i64
    where
        H: ViewProvider<Element = E> + DataSource,
    {
        let orientation = self.orientation();
        let consumed = self.tracker.apply_delta(orientation, delta);
        if let Some(page) = self.page_at_offset() {
            let event = self.pages.select(
                page,
                Selection::Scrolling,
                self.options.notify_during_scroll,
            );
            self.emit(event);
        }
        self.fill_window(host);
        consumed
    }

    /// Horizontal scroll entry point; a no-op for vertical grids.
    pub fn scroll_horizontally_by<H>(&mut self, dx: i64, host: &mut H) -> i64
    where
        H: ViewProvider<Element = E> + DataSource,
    {
        if self.can_scroll_horizontally() {
            self.scroll_by(dx, host)
        } else {
            0
        }
    }

    /// Vertical scroll entry point; a no-op for horizontal grids.
    pub fn scroll_vertically_by<H>(&mut self, dy: i64, host: &mut H) -> i64
    where
        H: ViewProvider<Element = E> + DataSource,
    {
        if self.can_scroll_vertically() {
            self.scroll_by(dy, host)
        } else {
            0
        }
    }

    /// Records the host's scroll phase.
    ///
    /// Entering [`ScrollState::Idle`] derives the page from the final offset,
    /// reports it unconditionally and refills the window.
    pub fn on_scroll_state_changed<H>(&mut self, state: ScrollState, host: &mut H)
    where
        H: ViewProvider<Element = E> + DataSource,
    {
        self.scroll_state = state;
        if !state.is_idle() || self.pages.total() == 0 {
            return;
        }
        let page = self.page_at_offset().unwrap_or(0);
        let event = self
            .pages
            .select(page, Selection::Settled, self.options.notify_during_scroll);
        self.emit(event);
        self.fill_window(host);
    }

    /// Jumps straight to `page` (clamped to the last page) and settles there.
    ///
    /// Returns the distance travelled.
    pub fn scroll_to_page<H>(&mut self, page: usize, host: &mut H) -> i64
    where
        H: ViewProvider<Element = E> + DataSource,
    {
        let orientation = self.orientation();
        let page = page.min(self.pages.total().saturating_sub(1));
        let target = scaled(page, self.metrics.page_extent(orientation));
        let consumed = self.tracker.scroll_to(orientation, target);
        self.fill_window(host);
        if let Some(page) = self.page_at_offset() {
            let event = self
                .pages
                .select(page, Selection::Settled, self.options.notify_during_scroll);
            self.emit(event);
        }
        consumed
    }

    /// Jumps to the page holding `index`. Indices past the end are ignored.
    pub fn scroll_to_index<H>(&mut self, index: usize, host: &mut H) -> i64
    where
        H: ViewProvider<Element = E> + DataSource,
    {
        if index >= self.item_count {
            log::trace!("scroll_to_index({index}) past {} items", self.item_count);
            return 0;
        }
        self.scroll_to_page(self.config.page_of(index), host)
    }

    fn resolve_metrics(&mut self, usable: UsableSize) {
        let metrics = match self.item_extents {
            Some((item_width, item_height)) => GridMetrics {
                usable,
                item_width,
                item_height,
            },
            None => GridMetrics::derive(&self.config, usable),
        };
        if metrics != self.metrics {
            self.cache.invalidate();
            self.metrics = metrics;
        }
    }

    /// Frames computed ahead of the windowing pass: the current page and the next.
    fn prefetch_range(&self) -> Range<usize> {
        let page = self.pages.current();
        let start = self.config.first_index_of_page(page);
        let end = self
            .config
            .first_index_of_page(page.saturating_add(PREFETCH_PAGES))
            .min(self.item_count);
        start..end.max(start)
    }

    /// Page under the current offset; `None` without pages or with a degenerate extent.
    fn page_at_offset(&self) -> Option<usize> {
        if self.pages.total() == 0 {
            return None;
        }
        let orientation = self.orientation();
        page_index_at(
            self.tracker.offset(orientation),
            self.metrics.page_extent(orientation),
        )
    }

    /// The viewport in layout space, widened by one item along the scroll axis.
    fn display_rect(&self) -> ItemFrame {
        let orientation = self.orientation();
        let usable = self.metrics.usable;
        let (x, y) = (self.tracker.offset_x(), self.tracker.offset_y());
        let mut rect = ItemFrame::new(
            x,
            y,
            x.saturating_add(usable.width),
            y.saturating_add(usable.height),
        );

        let limit = self
            .tracker
            .max_scroll(orientation)
            .saturating_add(usable.along(orientation));
        let item = self.metrics.item_extent(orientation);
        match orientation {
            Orientation::Horizontal => {
                rect.left = rect.left.saturating_sub(item).max(0);
                rect.right = rect.right.saturating_add(item).min(limit);
            }
            Orientation::Vertical => {
                rect.top = rect.top.saturating_sub(item).max(0);
                rect.bottom = rect.bottom.saturating_add(item).min(limit);
            }
        }
        rect
    }

    /// Candidate indices for the windowing pass.
    fn window(&self, item_count: usize) -> Range<usize> {
        let page_items = self.config.page_item_count();
        let span = |anchor: usize| {
            let start = anchor.saturating_sub(page_items.saturating_mul(PAGES_BEHIND));
            let stop = start
                .saturating_add(page_items.saturating_mul(WINDOW_PAGES))
                .min(item_count);
            start..stop
        };

        let anchor = self.attached.first().map_or(0, |a| a.index);
        let window = span(anchor);

        // The viewport always lies within the page under the offset and the
        // one after it. Jumps, or an anchor trailing a page behind, can leave
        // part of that outside the window; re-anchor on the offset page then.
        let orientation = self.orientation();
        let extent = self.metrics.page_extent(orientation);
        if extent > 0 {
            let page = px_to_count(self.tracker.offset(orientation) / extent);
            let first = self.config.first_index_of_page(page);
            let last = self
                .config
                .first_index_of_page(page.saturating_add(2))
                .min(item_count);
            if first < item_count && (first < window.start || last > window.end) {
                log::debug!("re-anchoring window on page {page}");
                return span(first);
            }
        }
        window
    }

    fn emit(&mut self, event: Option<PageEvent>) {
        let Some(event) = event else {
            return;
        };
        log::debug!("{event:?}");
        if let Some(listener) = self.listener.as_mut() {
            match event {
                PageEvent::CountChanged(count) => listener.on_page_count_changed(count),
                PageEvent::Selected(index) => listener.on_page_select(index),
            }
        }
    }
}

impl<H> PagedLayout<H> for PagedGrid<H::Element>
where
    H: ViewProvider + DataSource,
{
    fn layout(&mut self, host: &mut H) {
        Self::layout(self, host);
    }

    fn fill_window(&mut self, host: &mut H) {
        Self::fill_window(self, host);
    }

    fn scroll_by(&mut self, delta: i64, host: &mut H) -> i64 {
        Self::scroll_by(self, delta, host)
    }

    fn on_scroll_state_changed(&mut self, state: ScrollState, host: &mut H) {
        Self::on_scroll_state_changed(self, state, host);
    }

    fn set_orientation(&mut self, orientation: Orientation) -> Orientation {
        Self::set_orientation(self, orientation)
    }

    fn navigator(&self) -> PageNavigator {
        Self::navigator(self)
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::{PagedGrid, PagedLayout};
    use crate::{
        DataSource, FrameCachePolicy, GridConfig, ItemFrame, Orientation, PageEvent,
        PagerOptions, ScrollDelta, ScrollState, UsableSize, ViewProvider,
    };

    #[derive(Debug, Default)]
    struct RecordingHost {
        count: usize,
        usable: UsableSize,
        attached: Vec<usize>,
        acquired: usize,
        released: usize,
        placed: Vec<(usize, ItemFrame)>,
        measured: Vec<(i64, i64)>,
    }

    impl RecordingHost {
        fn new(count: usize) -> Self {
            Self {
                count,
                usable: UsableSize::new(300, 200),
                ..Self::default()
            }
        }
    }

    impl DataSource for RecordingHost {
        fn item_count(&self) -> usize {
            self.count
        }
    }

    impl ViewProvider for RecordingHost {
        type Element = usize;

        fn usable_size(&self) -> UsableSize {
            self.usable
        }

        fn acquire(&mut self, index: usize) -> usize {
            self.acquired += 1;
            index
        }

        fn attach(&mut self, element: &usize) {
            self.attached.push(*element);
        }

        fn release(&mut self, element: usize) {
            self.released += 1;
            if let Some(pos) = self.attached.iter().position(|&e| e == element) {
                self.attached.swap_remove(pos);
            }
        }

        fn measure(&mut self, _: &usize, width_used: i64, height_used: i64) {
            self.measured.push((width_used, height_used));
        }

        fn position(&mut self, element: &usize, frame: ItemFrame) {
            self.placed.push((*element, frame));
        }
    }

    fn grid(rows: usize, columns: usize, orientation: Orientation) -> PagedGrid<usize> {
        PagedGrid::new(GridConfig::new(rows, columns, orientation).unwrap())
    }

    fn record_events(grid: &mut PagedGrid<usize>) -> Rc<RefCell<Vec<PageEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        grid.set_page_listener(move |event: PageEvent| sink.borrow_mut().push(event));
        events
    }

    fn attached(grid: &PagedGrid<usize>) -> Vec<usize> {
        grid.attached_indices().collect()
    }

    #[test]
    fn scenario_a_page_counts() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let events = record_events(&mut grid);
        let mut host = RecordingHost::new(10);

        grid.layout(&mut host);

        assert_eq!(grid.config().page_item_count(), 4);
        assert_eq!(grid.total_page_count(), 3);
        assert_eq!(grid.max_scroll(), 600);
        assert_eq!(grid.metrics().item_width, 150);
        assert_eq!(grid.metrics().item_height, 100);
        assert_eq!(
            *events.borrow(),
            vec![PageEvent::CountChanged(3), PageEvent::Selected(0)]
        );
    }

    #[test]
    fn initial_window_covers_viewport_plus_one_column() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let mut host = RecordingHost::new(10);
        grid.layout(&mut host);

        // Page 0 plus the first column of page 1.
        assert_eq!(attached(&grid), vec![0, 1, 2, 3, 4, 6]);
        let mut host_side = host.attached.clone();
        host_side.sort_unstable();
        assert_eq!(host_side, vec![0, 1, 2, 3, 4, 6]);
        // Every acquired element was either released or is still attached.
        assert_eq!(host.acquired, host.released + host.attached.len());
        assert!(host.measured.iter().all(|&m| m == (150, 100)));
    }

    #[test]
    fn scrolling_moves_window_and_positions_relative_to_offset() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let events = record_events(&mut grid);
        let mut host = RecordingHost::new(10);
        grid.layout(&mut host);
        events.borrow_mut().clear();
        host.placed.clear();

        assert_eq!(grid.scroll_by(200, &mut host), 200);
        assert_eq!(grid.current_offset(), 200);
        assert_eq!(attached(&grid), vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(*events.borrow(), vec![PageEvent::Selected(1)]);
        assert_eq!(grid.current_page_index(), 1);

        let (_, frame) = host
            .placed
            .iter()
            .find(|(index, _)| *index == 4)
            .copied()
            .unwrap();
        assert_eq!(frame, ItemFrame::new(100, 0, 250, 100));

        // Same page again: de-duplicated.
        assert_eq!(grid.scroll_by(10, &mut host), 10);
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn overscroll_is_not_consumed() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let mut host = RecordingHost::new(10);
        grid.layout(&mut host);

        assert_eq!(grid.scroll_by(-50, &mut host), 0);
        assert_eq!(grid.scroll_by(10_000, &mut host), 600);
        assert_eq!(grid.current_offset(), 600);
        assert_eq!(grid.current_page_index(), 2);
        // Last page holds items 8 and 9 only.
        assert!(attached(&grid).contains(&9));
        assert!(!attached(&grid).contains(&10));
        assert_eq!(grid.scroll_vertically_by(50, &mut host), 0);
    }

    #[test]
    fn idle_settle_always_reports() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let events = record_events(&mut grid);
        let mut host = RecordingHost::new(10);
        grid.layout(&mut host);
        grid.set_notify_during_scroll(false);
        events.borrow_mut().clear();

        grid.on_scroll_state_changed(ScrollState::Dragging, &mut host);
        grid.scroll_by(200, &mut host);
        assert!(events.borrow().is_empty());
        assert_eq!(grid.current_page_index(), 0);

        grid.on_scroll_state_changed(ScrollState::Idle, &mut host);
        assert_eq!(*events.borrow(), vec![PageEvent::Selected(1)]);
        grid.on_scroll_state_changed(ScrollState::Idle, &mut host);
        assert_eq!(events.borrow().len(), 2);
        assert_eq!(grid.current_page_index(), 1);
    }

    #[test]
    fn scenario_b_empty_data_set() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let events = record_events(&mut grid);
        let mut host = RecordingHost::new(10);
        grid.layout(&mut host);
        grid.scroll_by(400, &mut host);
        events.borrow_mut().clear();

        host.count = 0;
        grid.layout(&mut host);

        assert_eq!(grid.total_page_count(), 0);
        assert_eq!(grid.current_page_index(), 0);
        assert_eq!(grid.attached_count(), 0);
        assert!(host.attached.is_empty());
        assert!(grid.frame_cache().is_empty());
        assert_eq!(events.borrow()[0], PageEvent::CountChanged(0));
    }

    #[test]
    fn emptied_data_set_no_longer_scrolls() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let events = record_events(&mut grid);
        let mut host = RecordingHost::new(10);
        grid.layout(&mut host);
        grid.scroll_by(400, &mut host);

        host.count = 0;
        grid.layout(&mut host);
        assert_eq!(grid.current_offset(), 0);
        assert_eq!(grid.max_scroll(), 0);
        events.borrow_mut().clear();

        assert_eq!(grid.scroll_by(100, &mut host), 0);
        grid.on_scroll_state_changed(ScrollState::Idle, &mut host);
        assert_eq!(grid.current_offset(), 0);
        assert_eq!(grid.current_page_index(), 0);
        assert_eq!(grid.total_page_count(), 0);
        assert_eq!(grid.attached_count(), 0);
        assert!(events.borrow().is_empty());

        // Refilling starts over from the first page.
        host.count = 10;
        grid.layout(&mut host);
        assert_eq!(grid.total_page_count(), 3);
        assert_eq!(grid.current_page_index(), 0);
        assert!(attached(&grid).contains(&0));
    }

    #[test]
    fn huge_viewport_saturates_instead_of_overflowing() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let mut host = RecordingHost::new(10);
        host.usable = UsableSize::new(i64::MAX / 2, 200);
        grid.layout(&mut host);

        let consumed = grid.scroll_by(i64::MAX, &mut host);
        assert_eq!(consumed, grid.max_scroll());
        assert_eq!(grid.current_offset(), grid.max_scroll());
        grid.on_scroll_state_changed(ScrollState::Idle, &mut host);
        assert_eq!(grid.current_page_index(), 2);
        assert!(attached(&grid).contains(&8));

        assert_eq!(grid.scroll_by(i64::MIN, &mut host), -consumed);
        assert_eq!(grid.current_offset(), 0);
    }

    #[test]
    fn relayout_prefetches_around_current_page() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let mut host = RecordingHost::new(100);
        grid.layout(&mut host);
        assert_eq!(grid.prefetch_range(), 0..8);

        grid.scroll_to_page(10, &mut host);
        grid.layout(&mut host);
        assert_eq!(grid.prefetch_range(), 40..48);
        assert!((40..48).all(|i| grid.frame_cache().get(i).is_some()));
        assert!(grid.frame_cache().get(0).is_none());

        // The last page prefetches what exists.
        grid.scroll_to_page(24, &mut host);
        grid.layout(&mut host);
        assert_eq!(grid.prefetch_range(), 96..100);
    }

    #[test]
    fn first_layout_of_empty_collection_reports_zero() {
        let mut grid = grid(3, 3, Orientation::Vertical);
        let events = record_events(&mut grid);
        let mut host = RecordingHost::new(0);
        grid.layout(&mut host);
        assert_eq!(
            *events.borrow(),
            vec![PageEvent::CountChanged(0), PageEvent::Selected(0)]
        );
        // A second empty layout does not repeat the count.
        grid.layout(&mut host);
        assert_eq!(events.borrow().len(), 3);
    }

    #[test]
    fn scenario_c_orientation_switch_requires_idle() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let mut host = RecordingHost::new(10);
        grid.layout(&mut host);
        let cached = grid.frame_cache().len();

        grid.on_scroll_state_changed(ScrollState::Settling, &mut host);
        assert_eq!(grid.set_orientation(Orientation::Vertical), Orientation::Horizontal);
        assert_eq!(grid.frame_cache().len(), cached);

        grid.on_scroll_state_changed(ScrollState::Idle, &mut host);
        assert_eq!(grid.set_orientation(Orientation::Vertical), Orientation::Vertical);
        assert!(grid.frame_cache().is_empty());
        assert!(grid.can_scroll_vertically());

        grid.layout(&mut host);
        assert_eq!(grid.max_scroll(), 400);
        assert_eq!(grid.frame(4), ItemFrame::new(0, 200, 150, 300));
    }

    #[test]
    fn orientation_switch_keeps_page() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let mut host = RecordingHost::new(10);
        grid.layout(&mut host);
        grid.scroll_to_page(2, &mut host);
        assert_eq!(grid.offset_x(), 600);

        grid.set_orientation(Orientation::Vertical);
        assert_eq!(grid.offset_x(), 0);
        assert_eq!(grid.offset_y(), 400);
        grid.layout(&mut host);
        assert_eq!(grid.current_offset(), 400);
        assert!(attached(&grid).contains(&8));
    }

    #[test]
    fn scenario_d_snap_offset_without_attachments() {
        let grid = grid(2, 2, Orientation::Horizontal);
        assert_eq!(grid.snap_offset(7), ScrollDelta::ZERO);
        assert_eq!(grid.find_snap_anchor(), None);
    }

    #[test]
    fn snap_queries_after_scroll() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let mut host = RecordingHost::new(10);
        grid.layout(&mut host);
        grid.scroll_by(200, &mut host);

        assert_eq!(grid.snap_offset(5), ScrollDelta::new(100, 0));
        assert_eq!(grid.snap_offset(0), ScrollDelta::new(-200, 0));
        assert_eq!(grid.scroll_vector(9), kurbo::Vec2::new(400.0, 0.0));
        assert_eq!(grid.find_snap_anchor(), Some(4));
        assert_eq!(grid.find_snap_anchor_with_focus(Some(2)), Some(2));
        assert_eq!(grid.snap_anchor_in(&host), Some(4));
        assert_eq!(grid.next_page_first_pos(), 8);
        assert_eq!(grid.pre_page_first_pos(), 4);
    }

    #[test]
    fn attachment_is_bounded_for_huge_collections() {
        let mut grid = grid(2, 3, Orientation::Vertical);
        let mut host = RecordingHost::new(100_000);
        grid.layout(&mut host);
        assert_eq!(grid.total_page_count(), 16_667);

        for _ in 0..200 {
            grid.scroll_by(137, &mut host);
            assert!(grid.attached_count() <= 24);
            assert!(grid.frame_cache().len() <= 8 * 6);
        }
        assert!(grid.attached_count() > 0);
    }

    #[test]
    fn jumps_re_anchor_the_window() {
        let mut grid = grid(2, 3, Orientation::Horizontal);
        let mut host = RecordingHost::new(100_000);
        grid.layout(&mut host);

        grid.scroll_to_page(5_000, &mut host);
        assert_eq!(grid.current_offset(), 1_500_000);
        assert_eq!(grid.current_page_index(), 5_000);
        let indices = attached(&grid);
        assert!(indices.contains(&30_000));
        assert!(indices.len() <= 24);
        assert!(indices.iter().all(|&i| (29_988..30_012).contains(&i)));

        // Past the end is ignored.
        assert_eq!(grid.scroll_to_index(100_000, &mut host), 0);
        assert_eq!(grid.scroll_to_index(5, &mut host), -1_500_000);
        assert!(attached(&grid).contains(&0));
    }

    #[test]
    fn repeated_layouts_are_idempotent() {
        let mut grid = grid(3, 2, Orientation::Vertical);
        let mut host = RecordingHost::new(50);
        grid.layout(&mut host);
        grid.scroll_by(450, &mut host);

        grid.layout(&mut host);
        let first = attached(&grid);
        let frames: Vec<_> = first.iter().map(|&i| grid.frame(i)).collect();

        grid.layout(&mut host);
        assert_eq!(attached(&grid), first);
        let again: Vec<_> = first.iter().map(|&i| grid.frame(i)).collect();
        assert_eq!(frames, again);
    }

    #[test]
    fn shrinking_data_clamps_offset_and_page() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let mut host = RecordingHost::new(100);
        grid.layout(&mut host);
        grid.scroll_to_page(10, &mut host);
        assert_eq!(grid.current_page_index(), 10);

        host.count = 10;
        grid.layout(&mut host);
        assert_eq!(grid.current_offset(), 600);
        assert_eq!(grid.current_page_index(), 2);
        assert!(attached(&grid).iter().all(|&i| i < 10));
    }

    #[test]
    fn zero_sized_viewport_degrades_to_empty_window() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let mut host = RecordingHost::new(10);
        host.usable = UsableSize::ZERO;
        grid.layout(&mut host);

        assert_eq!(grid.attached_count(), 0);
        assert_eq!(grid.max_scroll(), 0);
        assert_eq!(grid.scroll_by(100, &mut host), 0);
        grid.on_scroll_state_changed(ScrollState::Idle, &mut host);
        assert_eq!(grid.current_page_index(), 0);
        assert_eq!(grid.snap_offset(3), ScrollDelta::ZERO);
    }

    #[test]
    fn viewport_resize_rederives_frames() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let mut host = RecordingHost::new(10);
        grid.layout(&mut host);
        assert_eq!(grid.frame(1), ItemFrame::new(150, 0, 300, 100));

        host.usable = UsableSize::new(400, 200);
        grid.layout(&mut host);
        assert_eq!(grid.frame(1), ItemFrame::new(200, 0, 400, 100));
        assert_eq!(grid.max_scroll(), 800);
    }

    #[test]
    fn explicit_item_extents_override_even_split() {
        let mut grid = grid(2, 2, Orientation::Horizontal);
        let mut host = RecordingHost::new(10);
        grid.set_item_extents(Some((100, 50)));
        grid.layout(&mut host);
        assert_eq!(grid.frame(3), ItemFrame::new(100, 50, 200, 100));
        assert_eq!(grid.frame(4), ItemFrame::new(300, 0, 400, 50));
    }

    #[test]
    fn unbounded_cache_keeps_every_frame() {
        let options = PagerOptions {
            frame_cache: FrameCachePolicy::Unbounded,
            ..PagerOptions::default()
        };
        let config = GridConfig::new(1, 1, Orientation::Horizontal).unwrap();
        let mut grid: PagedGrid<usize> = PagedGrid::with_options(config, options);
        let mut host = RecordingHost::new(100);
        grid.layout(&mut host);
        for _ in 0..30 {
            grid.scroll_by(300, &mut host);
        }
        assert!(grid.frame_cache().len() >= 30);
    }

    #[test]
    fn drives_through_the_layout_trait() {
        fn settle<L: PagedLayout<RecordingHost>>(layout: &mut L, host: &mut RecordingHost) -> usize {
            layout.layout(host);
            layout.scroll_by(250, host);
            layout.on_scroll_state_changed(ScrollState::Idle, host);
            layout.navigator().pre_page_first_pos()
        }

        let mut grid = grid(2, 2, Orientation::Horizontal);
        let mut host = RecordingHost::new(10);
        assert_eq!(settle(&mut grid, &mut host), 4);
    }
}
