// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item frame computation and the lazily populated frame cache.
//!
//! Each item's frame is a pure function of its index, the [`GridConfig`] and
//! the resolved [`GridMetrics`]:
//!
//! - the page the item lives on shifts it by `page × usable extent` along the
//!   scroll axis,
//! - its row and column within the page shift it by whole item extents.
//!
//! Frames are memoized per index in a [`FrameCache`] until the cache is
//! invalidated (orientation switch, empty data set, or a viewport resize).

use core::ops::Range;

use hashbrown::HashMap;

use crate::util::{count_to_px, scaled};
use crate::{GridConfig, ItemFrame, Orientation, UsableSize};

/// Viewport and item extents a frame is computed from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridMetrics {
    /// Usable viewport size.
    pub usable: UsableSize,
    /// Width of a single item.
    pub item_width: i64,
    /// Height of a single item.
    pub item_height: i64,
}

impl GridMetrics {
    /// Splits `usable` evenly into the grid's cells.
    ///
    /// Integer division: residual pixels at the right and bottom edge of a page
    /// stay unused.
    #[must_use]
    pub fn derive(config: &GridConfig, usable: UsableSize) -> Self {
        Self {
            usable,
            item_width: usable.width / count_to_px(config.columns()),
            item_height: usable.height / count_to_px(config.rows()),
        }
    }

    /// Usable extent along the scroll axis.
    #[must_use]
    pub const fn page_extent(&self, orientation: Orientation) -> i64 {
        self.usable.along(orientation)
    }

    /// Item extent along the scroll axis.
    #[must_use]
    pub const fn item_extent(&self, orientation: Orientation) -> i64 {
        match orientation {
            Orientation::Horizontal => self.item_width,
            Orientation::Vertical => self.item_height,
        }
    }

    /// Space already taken by the other cells on an item's row and column,
    /// passed to the host when measuring: `(width_used, height_used)`.
    #[must_use]
    pub fn used_space(&self, config: &GridConfig) -> (i64, i64) {
        let columns = count_to_px(config.columns());
        let rows = count_to_px(config.rows());
        (
            self.usable.width / columns * (columns - 1),
            self.usable.height / rows * (rows - 1),
        )
    }
}

/// Computes the layout-space frame of `index` without touching any cache.
#[must_use]
pub fn compute_frame(config: &GridConfig, metrics: &GridMetrics, index: usize) -> ItemFrame {
    let orientation = config.orientation();
    let page = config.page_of(index);
    let (row, column) = config.cell_of(index);

    let base = scaled(page, metrics.page_extent(orientation));
    let (page_x, page_y) = match orientation {
        Orientation::Horizontal => (base, 0),
        Orientation::Vertical => (0, base),
    };

    let left = page_x.saturating_add(scaled(column, metrics.item_width));
    let top = page_y.saturating_add(scaled(row, metrics.item_height));
    ItemFrame::new(
        left,
        top,
        left.saturating_add(metrics.item_width),
        top.saturating_add(metrics.item_height),
    )
}

/// Memoized item frames keyed by index.
#[derive(Clone, Debug, Default)]
pub struct FrameCache {
    frames: HashMap<usize, ItemFrame>,
}

impl FrameCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the cached frame for `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ItemFrame> {
        self.frames.get(&index).copied()
    }

    /// Returns the frame for `index`, computing and caching it on first access.
    pub fn frame(&mut self, config: &GridConfig, metrics: &GridMetrics, index: usize) -> ItemFrame {
        *self
            .frames
            .entry(index)
            .or_insert_with(|| compute_frame(config, metrics, index))
    }

    /// Populates the cache for every index in `range`.
    pub fn warm(&mut self, config: &GridConfig, metrics: &GridMetrics, range: Range<usize>) {
        for index in range {
            self.frame(config, metrics, index);
        }
    }

    /// Drops every cached frame.
    pub fn invalidate(&mut self) {
        self.frames.clear();
    }

    /// Evicts frames outside `window` widened by `margin` indices on each side.
    ///
    /// Evicted frames are recomputed identically on their next access.
    pub fn retain_window(&mut self, window: Range<usize>, margin: usize) {
        let keep_from = window.start.saturating_sub(margin);
        let keep_to = window.end.saturating_add(margin);
        self.frames
            .retain(|&index, _| index >= keep_from && index < keep_to);
    }
}
