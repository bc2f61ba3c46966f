// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_paged_grid --heading-base-level=0

//! Understory Paged Grid: a paged, virtualized rows × columns layout core.
//!
//! Items `0..len` are arranged into pages of `rows × columns` cells. Pages sit
//! side by side along a single scroll axis (horizontal or vertical), each page
//! exactly one viewport long, and only the items near the viewport are ever
//! materialized: at most four pages worth of elements are attached at once,
//! however large the collection is.
//!
//! The core concepts are:
//!
//! - [`GridConfig`]: validated rows/columns (each `1..=100`) and the current
//!   [`Orientation`].
//! - [`compute_frame`] and [`FrameCache`]: pure index-to-rectangle geometry
//!   and its memoization.
//! - [`ScrollTracker`]: clamped offsets along both axes, reporting how much of
//!   each requested delta was consumed.
//! - [`PageState`]: current/total pages and the notification policy deciding
//!   when a [`PageEvent`] reaches the host's [`PageListener`].
//! - [`PageNavigator`]: next/previous page positions and snap distances for
//!   host snap helpers.
//! - [`PagedGrid`]: the controller tying these together. It runs full layouts,
//!   the windowing pass that attaches and releases elements, scrolling, idle
//!   settling and orientation switches.
//!
//! Like the other Understory crates this one knows nothing about widgets. The
//! host implements:
//!
//! - [`DataSource`] for the item count,
//! - [`ViewProvider`] to hand out, attach, measure, position and take back
//!   elements (a widget, a node id, anything),
//! - optionally [`PageListener`] (or any `FnMut(PageEvent)`) to follow paging.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_paged_grid::{
//!     DataSource, GridConfig, ItemFrame, Orientation, PageEvent, PagedGrid, ScrollState,
//!     UsableSize, ViewProvider,
//! };
//!
//! struct Tiles {
//!     len: usize,
//! }
//!
//! impl DataSource for Tiles {
//!     fn item_count(&self) -> usize {
//!         self.len
//!     }
//! }
//!
//! impl ViewProvider for Tiles {
//!     type Element = usize;
//!     fn usable_size(&self) -> UsableSize {
//!         UsableSize::new(400, 300)
//!     }
//!     fn acquire(&mut self, index: usize) -> usize {
//!         index
//!     }
//!     fn attach(&mut self, _: &usize) {}
//!     fn release(&mut self, _: usize) {}
//!     fn measure(&mut self, _: &usize, _: i64, _: i64) {}
//!     fn position(&mut self, _: &usize, _: ItemFrame) {}
//! }
//!
//! // 3 rows × 4 columns per page, paging left to right.
//! let config = GridConfig::new(3, 4, Orientation::Horizontal).unwrap();
//! let mut grid = PagedGrid::new(config);
//! grid.set_page_listener(|event: PageEvent| {
//!     let _ = event;
//! });
//!
//! let mut tiles = Tiles { len: 50 };
//! grid.layout(&mut tiles);
//! assert_eq!(grid.total_page_count(), 5);
//!
//! // A fling ends two and a half pages in: the half-page rule settles on page 2.
//! grid.on_scroll_state_changed(ScrollState::Settling, &mut tiles);
//! grid.scroll_by(1000, &mut tiles);
//! grid.on_scroll_state_changed(ScrollState::Idle, &mut tiles);
//! assert_eq!(grid.current_page_index(), 2);
//!
//! // The snap helper finishes the job.
//! let anchor = grid.find_snap_anchor().unwrap();
//! assert_eq!(grid.snap_offset(anchor).x, -200);
//! ```
//!
//! Pixel values are integers (`i64`); [`ItemFrame::to_rect`] and
//! [`ScrollDelta::to_vec2`] convert to [`kurbo`] types for float-based
//! renderers.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod engine;
mod geometry;
mod host;
mod navigator;
mod orientation;
mod pages;
mod scroll;
mod types;
mod util;

pub use config::{FrameCachePolicy, GridConfig, GridConfigError, MAX_TRACKS, PagerOptions};
pub use engine::{PagedGrid, PagedLayout};
pub use geometry::{FrameCache, GridMetrics, compute_frame};
pub use host::{DataSource, PageListener, ViewProvider};
pub use navigator::PageNavigator;
pub use orientation::{rescale, switch_orientation};
pub use pages::{PageEvent, PageState, Selection};
pub use scroll::{ScrollTracker, page_index_at};
pub use types::{ItemFrame, Orientation, ScrollAxes, ScrollDelta, ScrollState, UsableSize};
