// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public value types: orientation, item frames, scroll deltas and scroll state.

use kurbo::{Rect, Vec2};

/// The single axis along which a paged grid scrolls.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Pages sit side by side; only horizontal scrolling is possible.
    #[default]
    Horizontal,
    /// Pages are stacked; only vertical scrolling is possible.
    Vertical,
}

impl Orientation {
    /// Returns the other orientation.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Returns `true` for [`Orientation::Horizontal`].
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }

    /// The axes a grid with this orientation can scroll along.
    #[must_use]
    pub const fn scroll_axes(self) -> ScrollAxes {
        match self {
            Self::Horizontal => ScrollAxes::HORIZONTAL,
            Self::Vertical => ScrollAxes::VERTICAL,
        }
    }
}

bitflags::bitflags! {
    /// Axes a layout accepts scroll deltas on.
    ///
    /// A paged grid always reports exactly one axis.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ScrollAxes: u8 {
        /// Horizontal scrolling.
        const HORIZONTAL = 0b0000_0001;
        /// Vertical scrolling.
        const VERTICAL   = 0b0000_0010;
    }
}

/// Scroll phase as reported by the host's gesture/fling machinery.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollState {
    /// Not scrolling. Page state is settled on entering this state.
    #[default]
    Idle,
    /// The user is actively dragging.
    Dragging,
    /// A fling or snap animation is running.
    Settling,
}

impl ScrollState {
    /// Returns `true` for [`ScrollState::Idle`].
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Viewport size minus padding, in layout-space pixels.
///
/// Padding resolution belongs to the host; the engine only sees this result.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UsableSize {
    /// Usable width.
    pub width: i64,
    /// Usable height.
    pub height: i64,
}

impl UsableSize {
    /// An empty viewport.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Creates a usable size, clamping negative dimensions to zero.
    #[must_use]
    pub const fn new(width: i64, height: i64) -> Self {
        Self {
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Extent along the scroll axis of `orientation`.
    #[must_use]
    pub const fn along(self, orientation: Orientation) -> i64 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Extent across the scroll axis of `orientation`.
    #[must_use]
    pub const fn across(self, orientation: Orientation) -> i64 {
        self.along(orientation.flipped())
    }

    /// Returns `true` if either dimension is zero.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An item's logical rectangle in layout space.
///
/// Frames do not depend on the scroll offset; hosts position elements at
/// `frame - offset`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ItemFrame {
    /// Left edge (inclusive).
    pub left: i64,
    /// Top edge (inclusive).
    pub top: i64,
    /// Right edge (exclusive).
    pub right: i64,
    /// Bottom edge (exclusive).
    pub bottom: i64,
}

impl ItemFrame {
    /// Creates a frame from its edges.
    #[must_use]
    pub const fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the frame.
    #[must_use]
    pub const fn width(&self) -> i64 {
        self.right - self.left
    }

    /// Height of the frame.
    #[must_use]
    pub const fn height(&self) -> i64 {
        self.bottom - self.top
    }

    /// Returns `true` if the frame covers no area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Strict overlap test: frames that merely share an edge do not intersect.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Returns this frame moved by `(-dx, -dy)`, i.e. expressed relative to a scroll offset.
    #[must_use]
    pub const fn relative_to(&self, dx: i64, dy: i64) -> Self {
        Self {
            left: self.left.saturating_sub(dx),
            top: self.top.saturating_sub(dy),
            right: self.right.saturating_sub(dx),
            bottom: self.bottom.saturating_sub(dy),
        }
    }

    /// Converts to a [`kurbo::Rect`] for kurbo-based render surfaces.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.left as f64,
            self.top as f64,
            self.right as f64,
            self.bottom as f64,
        )
    }
}

impl From<ItemFrame> for Rect {
    fn from(frame: ItemFrame) -> Self {
        frame.to_rect()
    }
}

/// An integer scroll distance along both axes.
///
/// For a paged grid the cross-axis component is always zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScrollDelta {
    /// Horizontal distance.
    pub x: i64,
    /// Vertical distance.
    pub y: i64,
}

impl ScrollDelta {
    /// No movement.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Creates a delta.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Places `distance` on the scroll axis of `orientation` and zero on the other.
    #[must_use]
    pub const fn along(orientation: Orientation, distance: i64) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(distance, 0),
            Orientation::Vertical => Self::new(0, distance),
        }
    }

    /// Returns `true` if both components are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Converts to a [`kurbo::Vec2`].
    #[must_use]
    pub fn to_vec2(&self) -> Vec2 {
        Vec2::new(self.x as f64, self.y as f64)
    }
}
