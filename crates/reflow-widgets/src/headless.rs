#![forbid(unsafe_code)]

//! In-memory [`PanelHost`] for tests, benchmarks and toolkit-less embedding.
//!
//! The headless host models two surfaces placed in screen space (the panel
//! and the floating layer above it), a z-ordered item list, and a pointer.
//! It records how many position writes and re-parents it received so callers
//! can assert that layout passes avoid redundant work.

use reflow_core::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::host::{PanelHost, Surface};

/// Handle for an item living in a [`HeadlessHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    /// Wrap a raw id. The item need not exist.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct HeadlessItem {
    id: ItemId,
    bounds: Rect,
    surface: Surface,
}

/// In-memory host toolkit.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    width: i32,
    scroll: i32,
    panel_origin: Point,
    floating_origin: Point,
    pointer: Point,
    /// Bottom-most first.
    items: Vec<HeadlessItem>,
    next_id: u32,
    position_writes: usize,
    reparents: usize,
}

impl HeadlessHost {
    /// A panel of the given width at the screen origin, with the floating
    /// layer also at the screen origin.
    #[must_use]
    pub fn new(width: i32) -> Self {
        Self {
            width,
            scroll: 0,
            panel_origin: Point::ORIGIN,
            floating_origin: Point::ORIGIN,
            pointer: Point::ORIGIN,
            items: Vec::new(),
            next_id: 1,
            position_writes: 0,
            reparents: 0,
        }
    }

    /// Place the panel's top-left corner in screen space.
    #[must_use]
    pub fn with_panel_origin(mut self, origin: Point) -> Self {
        self.panel_origin = origin;
        self
    }

    /// Place the floating layer's top-left corner in screen space.
    #[must_use]
    pub fn with_floating_origin(mut self, origin: Point) -> Self {
        self.floating_origin = origin;
        self
    }

    /// Create an item on the panel at the panel origin.
    pub fn spawn(&mut self, size: Size) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(HeadlessItem {
            id,
            bounds: Rect::from_parts(Point::ORIGIN, size),
            surface: Surface::Panel,
        });
        id
    }

    /// Destroy an item. Its handle becomes stale.
    pub fn destroy(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Change an item's size, keeping its position.
    pub fn resize_item(&mut self, id: ItemId, size: Size) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.bounds = Rect::from_parts(item.bounds.origin(), size);
                true
            }
            None => false,
        }
    }

    pub fn set_container_width(&mut self, width: i32) {
        self.width = width;
    }

    pub fn set_vertical_scroll(&mut self, offset: i32) {
        self.scroll = offset;
    }

    /// Move the panel within screen space. Items keep their panel-local
    /// positions.
    pub fn set_panel_origin(&mut self, origin: Point) {
        self.panel_origin = origin;
    }

    /// Move the pointer (screen space).
    pub fn set_pointer(&mut self, screen: Point) {
        self.pointer = screen;
    }

    /// Surface an item currently lives on.
    #[must_use]
    pub fn surface_of(&self, id: ItemId) -> Option<Surface> {
        self.item(id).map(|item| item.surface)
    }

    /// Item bounds in screen space.
    #[must_use]
    pub fn screen_bounds(&self, id: ItemId) -> Option<Rect> {
        let item = self.item(id)?;
        let origin = self.surface_to_screen(item.surface, item.bounds.origin());
        Some(item.bounds.with_origin(origin))
    }

    /// Screen position of the point `local` inside item `id`.
    #[must_use]
    pub fn screen_point_in(&self, id: ItemId, local: Point) -> Option<Point> {
        self.screen_bounds(id).map(|bounds| bounds.origin() + local)
    }

    /// Screen position of a point given in `surface`-local coordinates.
    #[must_use]
    pub fn surface_to_screen(&self, surface: Surface, local: Point) -> Point {
        local + self.origin_of(surface)
    }

    /// Items from bottom-most to top-most.
    #[must_use]
    pub fn z_order(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    /// Number of live items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position writes received since creation or the last reset.
    #[must_use]
    pub fn position_writes(&self) -> usize {
        self.position_writes
    }

    /// Re-parents received since creation or the last reset.
    #[must_use]
    pub fn reparents(&self) -> usize {
        self.reparents
    }

    pub fn reset_counters(&mut self) {
        self.position_writes = 0;
        self.reparents = 0;
    }

    fn origin_of(&self, surface: Surface) -> Point {
        match surface {
            Surface::Panel => self.panel_origin,
            Surface::Floating => self.floating_origin,
        }
    }

    fn item(&self, id: ItemId) -> Option<&HeadlessItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut HeadlessItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }
}

impl PanelHost for HeadlessHost {
    type Item = ItemId;

    fn item_bounds(&self, item: ItemId) -> Option<Rect> {
        self.item(item).map(|item| item.bounds)
    }

    fn set_item_position(&mut self, item: ItemId, position: Point) {
        if let Some(existing) = self.items.iter_mut().find(|existing| existing.id == item) {
            existing.bounds = existing.bounds.with_origin(position);
            self.position_writes += 1;
        }
    }

    fn container_width(&self) -> i32 {
        self.width
    }

    fn vertical_scroll(&self) -> i32 {
        self.scroll
    }

    fn pointer_screen_position(&self) -> Point {
        self.pointer
    }

    fn screen_to_surface(&self, surface: Surface, screen: Point) -> Point {
        screen - self.origin_of(surface)
    }

    fn reparent(&mut self, item: ItemId, surface: Surface) {
        let from_origin = match self.item(item) {
            Some(existing) if existing.surface != surface => self.origin_of(existing.surface),
            _ => return,
        };
        let shift = from_origin - self.origin_of(surface);
        if let Some(existing) = self.items.iter_mut().find(|existing| existing.id == item) {
            existing.bounds = existing.bounds.translate(shift.x, shift.y);
            existing.surface = surface;
            self.reparents += 1;
        }
    }

    fn bring_to_front(&mut self, item: ItemId) {
        if let Some(index) = self.items.iter().position(|existing| existing.id == item) {
            let existing = self.items.remove(index);
            self.items.push(existing);
        }
    }
}
