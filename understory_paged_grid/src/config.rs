// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid configuration and runtime options.

use core::num::NonZeroUsize;

use thiserror::Error;

use crate::Orientation;

/// Largest accepted row or column count.
pub const MAX_TRACKS: usize = 100;

/// Invalid construction arguments for a [`GridConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridConfigError {
    /// `rows` was outside `1..=100`.
    #[error("rows must be within 1..=100, got {0}")]
    RowsOutOfRange(usize),
    /// `columns` was outside `1..=100`.
    #[error("columns must be within 1..=100, got {0}")]
    ColumnsOutOfRange(usize),
}

/// Rows × columns page shape plus the scroll orientation.
///
/// Items fill a page row by row; pages follow each other along the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridConfig {
    rows: NonZeroUsize,
    columns: NonZeroUsize,
    orientation: Orientation,
}

impl GridConfig {
    /// Validates and creates a configuration.
    ///
    /// Both `rows` and `columns` must lie in `1..=100`.
    pub fn new(
        rows: usize,
        columns: usize,
        orientation: Orientation,
    ) -> Result<Self, GridConfigError> {
        let rows = NonZeroUsize::new(rows)
            .filter(|r| r.get() <= MAX_TRACKS)
            .ok_or(GridConfigError::RowsOutOfRange(rows))?;
        let columns = NonZeroUsize::new(columns)
            .filter(|c| c.get() <= MAX_TRACKS)
            .ok_or(GridConfigError::ColumnsOutOfRange(columns))?;
        Ok(Self {
            rows,
            columns,
            orientation,
        })
    }

    /// Number of rows per page.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows.get()
    }

    /// Number of columns per page.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns.get()
    }

    /// Items per page, `rows × columns`. Always at least one.
    #[must_use]
    pub const fn page_item_count(&self) -> usize {
        self.rows.get() * self.columns.get()
    }

    /// Current scroll orientation.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub(crate) fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Page containing `index`.
    #[must_use]
    pub const fn page_of(&self, index: usize) -> usize {
        index / self.page_item_count()
    }

    /// Zero-based slot of `index` within its page.
    #[must_use]
    pub const fn position_in_page(&self, index: usize) -> usize {
        index % self.page_item_count()
    }

    /// `(row, column)` of `index` within its page.
    #[must_use]
    pub const fn cell_of(&self, index: usize) -> (usize, usize) {
        let pos = self.position_in_page(index);
        let row = pos / self.columns.get();
        (row, pos - row * self.columns.get())
    }

    /// First item index of `page`, saturating on overflow.
    #[must_use]
    pub const fn first_index_of_page(&self, page: usize) -> usize {
        page.saturating_mul(self.page_item_count())
    }

    /// Number of pages needed for `item_count` items: `ceil(item_count / page_item_count)`.
    #[must_use]
    pub const fn total_page_count(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.page_item_count())
    }
}

/// How many cached frames the engine keeps around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameCachePolicy {
    /// Never evict; memory grows with the highest index visited.
    Unbounded,
    /// After each windowing pass, drop frames more than `margin_pages` pages
    /// outside the attachment window.
    Bounded {
        /// Pages kept on either side of the window.
        margin_pages: usize,
    },
}

impl Default for FrameCachePolicy {
    fn default() -> Self {
        Self::Bounded { margin_pages: 2 }
    }
}

/// Runtime behavior switches for a paged grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PagerOptions {
    /// Report page selections while a scroll is in progress, not only on idle.
    pub notify_during_scroll: bool,
    /// Frame cache retention.
    pub frame_cache: FrameCachePolicy,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self {
            notify_during_scroll: true,
            frame_cache: FrameCachePolicy::default(),
        }
    }
}
