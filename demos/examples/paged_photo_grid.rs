// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A paged photo wall: `understory_paged_grid` driving a pooled set of tiles.
//!
//! This example shows how a host:
//! - recycles tile objects through a pool instead of allocating per item,
//! - converts item frames to `kurbo::Rect` for a float-based renderer,
//! - follows paging through a `PageListener` closure,
//! - plays a drag, a fling and a snap, then flips the grid to vertical.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example paged_photo_grid`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Rect;
use understory_paged_grid::{
    DataSource, GridConfig, ItemFrame, Orientation, PageEvent, PagedGrid, PagedLayout,
    ScrollState, UsableSize, ViewProvider,
};

/// A reusable tile widget.
#[derive(Debug)]
struct Tile {
    serial: u32,
    photo: Option<usize>,
    rect: Rect,
}

/// Photo wall host: owns the photos, the tile pool and the on-screen tiles.
#[derive(Debug)]
struct PhotoWall {
    photos: Vec<String>,
    viewport: UsableSize,
    pool: Vec<Tile>,
    on_screen: usize,
    created: u32,
}

impl PhotoWall {
    fn new(photos: usize, viewport: UsableSize) -> Self {
        Self {
            photos: (0..photos).map(|i| format!("IMG_{i:04}.jpg")).collect(),
            viewport,
            pool: Vec::new(),
            on_screen: 0,
            created: 0,
        }
    }
}

impl DataSource for PhotoWall {
    fn item_count(&self) -> usize {
        self.photos.len()
    }
}

impl ViewProvider for PhotoWall {
    type Element = Tile;

    fn usable_size(&self) -> UsableSize {
        self.viewport
    }

    fn acquire(&mut self, index: usize) -> Tile {
        let mut tile = self.pool.pop().unwrap_or_else(|| {
            self.created += 1;
            Tile {
                serial: self.created,
                photo: None,
                rect: Rect::ZERO,
            }
        });
        tile.photo = Some(index);
        tile
    }

    fn attach(&mut self, _: &Tile) {
        self.on_screen += 1;
    }

    fn release(&mut self, mut tile: Tile) {
        self.on_screen -= 1;
        tile.photo = None;
        self.pool.push(tile);
    }

    fn measure(&mut self, _: &Tile, _: i64, _: i64) {}

    fn position(&mut self, tile: &Tile, frame: ItemFrame) {
        let rect = frame.to_rect();
        if let Some(photo) = tile.photo {
            log::trace!(
                "tile #{} shows {} at {rect:?}",
                tile.serial,
                self.photos[photo]
            );
        }
    }
}

/// One frame of input: a drag delta followed by the scroll phase it leaves behind.
fn play<L: PagedLayout<PhotoWall>>(grid: &mut L, wall: &mut PhotoWall, steps: &[(i64, ScrollState)]) {
    for &(delta, state) in steps {
        grid.on_scroll_state_changed(state, wall);
        if delta != 0 {
            grid.scroll_by(delta, wall);
        }
    }
}

fn main() {
    env_logger::init();

    let config = GridConfig::new(3, 4, Orientation::Horizontal).expect("3 × 4 is a valid grid");
    let mut grid = PagedGrid::new(config);

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    grid.set_page_listener(move |event: PageEvent| sink.borrow_mut().push(event));

    let mut wall = PhotoWall::new(250, UsableSize::new(1200, 900));
    grid.layout(&mut wall);
    println!(
        "{} photos on {} pages, {} tiles on screen",
        wall.item_count(),
        grid.total_page_count(),
        wall.on_screen
    );

    // Drag a third of a page, then fling past the middle of page 2.
    play(
        &mut grid,
        &mut wall,
        &[
            (0, ScrollState::Dragging),
            (400, ScrollState::Dragging),
            (0, ScrollState::Settling),
            (1500, ScrollState::Settling),
        ],
    );
    grid.on_scroll_state_changed(ScrollState::Idle, &mut wall);

    if let Some(anchor) = grid.snap_anchor_in(&wall) {
        let snap = grid.snap_offset(anchor);
        println!(
            "settled on page {} at offset {}, snapping by {:?} to photo {anchor}",
            grid.current_page_index(),
            grid.current_offset(),
            snap.to_vec2()
        );
        grid.scroll_by(snap.x, &mut wall);
    }

    // Jump to the last photo, then rotate the wall.
    grid.scroll_to_index(249, &mut wall);
    let orientation = grid.set_orientation(Orientation::Vertical);
    grid.layout(&mut wall);
    println!(
        "now {orientation:?}: offset {} of {}, page {} of {}",
        grid.current_offset(),
        grid.max_scroll(),
        grid.current_page_index() + 1,
        grid.total_page_count()
    );

    println!(
        "{} tiles created for {} photos; page events: {:?}",
        wall.created,
        wall.item_count(),
        events.borrow()
    );
}
