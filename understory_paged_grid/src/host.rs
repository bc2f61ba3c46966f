// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator contracts implemented by the host toolkit.
//!
//! The engine never creates, draws, or destroys elements itself. It asks a
//! [`ViewProvider`] for elements by index, tells it which ones to attach and
//! where to put them, and hands every element it no longer needs back through
//! [`ViewProvider::release`] so the host can reuse it.

use crate::{ItemFrame, PageEvent, UsableSize};

/// Source of the collection size.
pub trait DataSource {
    /// Number of items in the collection.
    ///
    /// Read at the start of every full layout and again by each windowing pass
    /// to guard index accesses.
    fn item_count(&self) -> usize;
}

/// Host side of element management for one paged grid.
pub trait ViewProvider {
    /// Host handle for a materialized item (a widget, a node id, ...).
    type Element;

    /// Viewport size minus padding.
    fn usable_size(&self) -> UsableSize;

    /// Returns an element bound to `index`, reusing a pooled one when possible.
    fn acquire(&mut self, index: usize) -> Self::Element;

    /// Makes `element` part of the visible surface.
    fn attach(&mut self, element: &Self::Element);

    /// Detaches `element` if needed and returns it to the reuse pool.
    ///
    /// Released elements must not be destroyed.
    fn release(&mut self, element: Self::Element);

    /// Measures `element`, given the space the other cells of its row and
    /// column already take up.
    fn measure(&mut self, element: &Self::Element, width_used: i64, height_used: i64);

    /// Places `element` at `frame`, expressed in viewport coordinates.
    fn position(&mut self, element: &Self::Element, frame: ItemFrame);

    /// Index of the item holding input focus, if any.
    ///
    /// Consulted when choosing a snap anchor.
    fn focused_index(&self) -> Option<usize> {
        None
    }
}

/// Receiver for page change notifications.
pub trait PageListener {
    /// The number of pages changed. Reported only when it differs from the
    /// previous report.
    fn on_page_count_changed(&mut self, count: usize);

    /// A page became current.
    fn on_page_select(&mut self, index: usize);
}

impl<F> PageListener for F
where
    F: FnMut(PageEvent),
{
    fn on_page_count_changed(&mut self, count: usize) {
        self(PageEvent::CountChanged(count));
    }

    fn on_page_select(&mut self, index: usize) {
        self(PageEvent::Selected(index));
    }
}
