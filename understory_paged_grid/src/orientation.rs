// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flipping the scroll axis of a laid-out grid.

use crate::geometry::FrameCache;
use crate::scroll::ScrollTracker;
use crate::{GridConfig, Orientation, ScrollState, UsableSize};

/// Rescales `value` from pages of `from` pixels to pages of `to` pixels.
///
/// Evaluated as `value / from * to`, so partial pages are dropped. A
/// degenerate `from` maps to zero.
#[must_use]
pub fn rescale(value: i64, from: i64, to: i64) -> i64 {
    if from <= 0 {
        return 0;
    }
    (value / from).saturating_mul(to)
}

/// Switches `config` to `requested` if the grid is idle and the orientation differs.
///
/// On success the whole frame cache is dropped and the offset/max-scroll pairs
/// trade axes, rescaled from the old axis extent to the new one. Otherwise
/// nothing changes. Returns the orientation in effect afterwards.
pub fn switch_orientation(
    config: &mut GridConfig,
    tracker: &mut ScrollTracker,
    cache: &mut FrameCache,
    usable: UsableSize,
    scroll_state: ScrollState,
    requested: Orientation,
) -> Orientation {
    let current = config.orientation();
    if current == requested {
        return current;
    }
    if !scroll_state.is_idle() {
        log::debug!("ignoring orientation switch to {requested:?} while {scroll_state:?}");
        return current;
    }

    cache.invalidate();
    let (w, h) = (usable.width, usable.height);
    tracker.replace(
        rescale(tracker.offset_y(), h, w),
        rescale(tracker.offset_x(), w, h),
        rescale(tracker.max_scroll_y(), h, w),
        rescale(tracker.max_scroll_x(), w, h),
    );
    config.set_orientation(requested);
    log::debug!(
        "orientation {current:?} -> {requested:?}, offset now ({}, {})",
        tracker.offset_x(),
        tracker.offset_y()
    );
    requested
}
