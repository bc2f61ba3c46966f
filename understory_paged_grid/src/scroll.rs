// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll offset clamping and page-index derivation.

use crate::util::{px_to_count, scaled};
use crate::{Orientation, UsableSize};

/// Derives the page shown at `offset` when pages are `page_extent` long.
///
/// The quotient is rounded up once more than half of the next page is
/// visible, so an offset of `200` over pages of `300` selects page `1` while
/// `100` still selects page `0`. Returns `None` for a degenerate extent.
#[must_use]
pub fn page_index_at(offset: i64, page_extent: i64) -> Option<usize> {
    if page_extent <= 0 {
        return None;
    }
    let offset = offset.max(0);
    let mut page = offset / page_extent;
    if offset % page_extent > page_extent / 2 {
        page += 1;
    }
    Some(px_to_count(page))
}

/// Offsets and scroll bounds along both axes.
///
/// Only the scroll axis of the current orientation ever moves; the cross-axis
/// pair is carried so an orientation switch can rescale it into the new scroll
/// axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScrollTracker {
    offset_x: i64,
    offset_y: i64,
    max_scroll_x: i64,
    max_scroll_y: i64,
}

impl ScrollTracker {
    /// Creates a tracker at the origin with no scroll range.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            max_scroll_x: 0,
            max_scroll_y: 0,
        }
    }

    /// Horizontal offset.
    #[must_use]
    pub const fn offset_x(&self) -> i64 {
        self.offset_x
    }

    /// Vertical offset.
    #[must_use]
    pub const fn offset_y(&self) -> i64 {
        self.offset_y
    }

    /// Horizontal bound.
    #[must_use]
    pub const fn max_scroll_x(&self) -> i64 {
        self.max_scroll_x
    }

    /// Vertical bound.
    #[must_use]
    pub const fn max_scroll_y(&self) -> i64 {
        self.max_scroll_y
    }

    /// Offset along the scroll axis of `orientation`.
    #[must_use]
    pub const fn offset(&self, orientation: Orientation) -> i64 {
        match orientation {
            Orientation::Horizontal => self.offset_x,
            Orientation::Vertical => self.offset_y,
        }
    }

    /// Largest offset along the scroll axis of `orientation`.
    #[must_use]
    pub const fn max_scroll(&self, orientation: Orientation) -> i64 {
        match orientation {
            Orientation::Horizontal => self.max_scroll_x,
            Orientation::Vertical => self.max_scroll_y,
        }
    }

    /// Recomputes the bounds for `total_pages` pages and clamps the offset into them.
    ///
    /// The scroll axis may travel `(total_pages - 1) × extent`; the cross axis
    /// bound is one usable extent.
    pub fn set_bounds(&mut self, orientation: Orientation, total_pages: usize, usable: UsableSize) {
        let along = scaled(total_pages.saturating_sub(1), usable.along(orientation)).max(0);
        let across = usable.across(orientation);
        match orientation {
            Orientation::Horizontal => {
                self.max_scroll_x = along;
                self.max_scroll_y = across;
                self.offset_x = self.offset_x.clamp(0, along);
            }
            Orientation::Vertical => {
                self.max_scroll_x = across;
                self.max_scroll_y = along;
                self.offset_y = self.offset_y.clamp(0, along);
            }
        }
    }

    /// Moves along the scroll axis by up to `requested`, stopping at the bounds.
    ///
    /// Returns the distance actually travelled, so that
    /// `offset_before + consumed == offset_after` always holds.
    pub fn apply_delta(&mut self, orientation: Orientation, requested: i64) -> i64 {
        let offset = self.offset(orientation);
        let max = self.max_scroll(orientation);
        let target = offset.saturating_add(requested);
        let consumed = if target > max {
            max - offset
        } else if target < 0 {
            -offset
        } else {
            requested
        };
        match orientation {
            Orientation::Horizontal => self.offset_x += consumed,
            Orientation::Vertical => self.offset_y += consumed,
        }
        consumed
    }

    /// Moves to `target` along the scroll axis, clamped; returns the distance travelled.
    pub fn scroll_to(&mut self, orientation: Orientation, target: i64) -> i64 {
        let delta = target.saturating_sub(self.offset(orientation));
        self.apply_delta(orientation, delta)
    }

    /// Overwrites all four values. Used when remapping across an orientation switch.
    pub(crate) fn replace(&mut self, offset_x: i64, offset_y: i64, max_x: i64, max_y: i64) {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self.max_scroll_x = max_x;
        self.max_scroll_y = max_y;
    }
}
