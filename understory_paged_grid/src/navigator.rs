// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page navigation and snap queries.
//!
//! A [`PageNavigator`] is a read-only snapshot of the engine's paging state.
//! Host snap helpers use it to turn "go to the next page" or "settle on the
//! page holding item `i`" into scroll distances; the engine itself never
//! animates.

use kurbo::Vec2;

use crate::util::scaled;
use crate::{GridConfig, Orientation, ScrollDelta, UsableSize};

/// Snapshot of paging state used to answer navigation queries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PageNavigator {
    config: GridConfig,
    usable: UsableSize,
    offset: ScrollDelta,
    current_page: usize,
    total_pages: usize,
}

impl PageNavigator {
    /// Creates a navigator from explicit state.
    #[must_use]
    pub const fn new(
        config: GridConfig,
        usable: UsableSize,
        offset: ScrollDelta,
        current_page: usize,
        total_pages: usize,
    ) -> Self {
        Self {
            config,
            usable,
            offset,
            current_page,
            total_pages,
        }
    }

    const fn orientation(&self) -> Orientation {
        self.config.orientation()
    }

    const fn page_extent(&self) -> i64 {
        self.usable.along(self.orientation())
    }

    const fn current_offset(&self) -> i64 {
        match self.orientation() {
            Orientation::Horizontal => self.offset.x,
            Orientation::Vertical => self.offset.y,
        }
    }

    /// First item index of the page after the current one.
    ///
    /// Saturates at `total_pages × page_item_count`, which may equal the item
    /// count; callers must bound-check before using it as an index.
    #[must_use]
    pub fn next_page_first_pos(&self) -> usize {
        let page = self.current_page.saturating_add(1).min(self.total_pages);
        self.config.first_index_of_page(page)
    }

    /// First item index used to step back one page.
    ///
    /// This is the first item of the *current* page: while scrolling back,
    /// the current page has already moved to the previous one, whose frames
    /// the engine pre-warms.
    #[must_use]
    pub fn pre_page_first_pos(&self) -> usize {
        self.config.first_index_of_page(self.current_page)
    }

    /// Layout-space origin of `page` (zero on the cross axis).
    #[must_use]
    pub fn page_origin(&self, page: usize) -> ScrollDelta {
        ScrollDelta::along(self.orientation(), scaled(page, self.page_extent()))
    }

    /// Layout-space origin of the page containing `index`.
    #[must_use]
    pub fn page_origin_of(&self, index: usize) -> ScrollDelta {
        self.page_origin(self.config.page_of(index))
    }

    /// Layout-space center of the page containing `index`.
    #[must_use]
    pub fn page_center(&self, index: usize) -> ScrollDelta {
        let origin = self.page_origin_of(index);
        ScrollDelta::new(
            origin.x.saturating_add(self.usable.width / 2),
            origin.y.saturating_add(self.usable.height / 2),
        )
    }

    /// Distance from the current offset to the page containing `index`.
    #[must_use]
    pub fn scroll_vector(&self, index: usize) -> Vec2 {
        let origin = self.page_origin_of(index);
        ScrollDelta::along(
            self.orientation(),
            origin_along(origin, self.orientation()).saturating_sub(self.current_offset()),
        )
        .to_vec2()
    }

    /// Distance a snap controller must travel to land exactly on the page
    /// containing `index`.
    ///
    /// Zero when nothing is attached.
    #[must_use]
    pub fn snap_offset(&self, index: usize, has_attached: bool) -> ScrollDelta {
        if !has_attached {
            return ScrollDelta::ZERO;
        }
        let origin = self.page_origin_of(index);
        ScrollDelta::along(
            self.orientation(),
            origin_along(origin, self.orientation()).saturating_sub(self.current_offset()),
        )
    }

    /// Picks the attached item a snap helper should align to.
    ///
    /// Preference order: the focused item if it is attached, the first item of
    /// the current page, then the earliest attached item.
    #[must_use]
    pub fn find_snap_anchor(&self, attached: &[usize], focused: Option<usize>) -> Option<usize> {
        let first = *attached.first()?;
        if let Some(focused) = focused.filter(|f| attached.contains(f)) {
            return Some(focused);
        }
        let target = self.config.first_index_of_page(self.current_page);
        Some(if attached.contains(&target) {
            target
        } else {
            first
        })
    }
}

const fn origin_along(origin: ScrollDelta, orientation: Orientation) -> i64 {
    match orientation {
        Orientation::Horizontal => origin.x,
        Orientation::Vertical => origin.y,
    }
}
