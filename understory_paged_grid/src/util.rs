// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Converts an item or page count into layout-space pixels, saturating on overflow.
#[inline]
pub(crate) fn count_to_px(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Converts a non-negative pixel quotient back into a page or item count.
///
/// Negative values map to `0`.
#[inline]
pub(crate) fn px_to_count(px: i64) -> usize {
    usize::try_from(px).unwrap_or(0)
}

/// `count × extent` in layout space, saturating instead of overflowing.
#[inline]
pub(crate) fn scaled(count: usize, extent: i64) -> i64 {
    count_to_px(count).saturating_mul(extent)
}
