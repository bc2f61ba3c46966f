// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page bookkeeping and notification policy.
//!
//! [`PageState`] decides *whether* a page event should be reported; the engine
//! forwards the resulting [`PageEvent`] to the host's
//! [`PageListener`](crate::PageListener).

/// Why a page selection is being reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selection {
    /// Derived from an in-flight scroll delta. Subject to the
    /// notify-during-scroll switch and de-duplicated against the last report.
    Scrolling,
    /// Derived once scrolling stopped or a layout completed. Always reported.
    Settled,
}

/// A page notification the host should receive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PageEvent {
    /// The total number of pages changed.
    CountChanged(usize),
    /// A page became the current page.
    Selected(usize),
}

/// Current page, total pages and what was last reported to the host.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PageState {
    current: usize,
    total: usize,
    last_index: Option<usize>,
    last_count: Option<usize>,
}

impl PageState {
    /// Creates state for an empty grid that has reported nothing yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: 0,
            total: 0,
            last_index: None,
            last_count: None,
        }
    }

    /// The current page index.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Total number of pages as of the last full layout.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// The page index last reported to the host.
    #[must_use]
    pub const fn last_notified_index(&self) -> Option<usize> {
        self.last_index
    }

    /// The page count last reported to the host.
    #[must_use]
    pub const fn last_notified_count(&self) -> Option<usize> {
        self.last_count
    }

    /// Sets the total and clamps the current page into `0..total`.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.current = self.current.min(total.saturating_sub(1));
    }

    /// Records `count` and returns an event if it differs from the last report.
    pub fn report_count(&mut self, count: usize) -> Option<PageEvent> {
        if self.last_count == Some(count) {
            return None;
        }
        self.last_count = Some(count);
        Some(PageEvent::CountChanged(count))
    }

    /// Applies a page selection and returns the event to report, if any.
    ///
    /// Scrolling selections are dropped when `notify_during_scroll` is off or
    /// when `index` was already the last reported page; in both cases the
    /// current page is left untouched. Settled selections always report.
    pub fn select(
        &mut self,
        index: usize,
        selection: Selection,
        notify_during_scroll: bool,
    ) -> Option<PageEvent> {
        if selection == Selection::Scrolling
            && (!notify_during_scroll || self.last_index == Some(index))
        {
            return None;
        }
        self.current = index;
        self.last_index = Some(index);
        Some(PageEvent::Selected(index))
    }
}
