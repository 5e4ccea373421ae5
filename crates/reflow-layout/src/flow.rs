#![forbid(unsafe_code)]

//! Left-to-right, top-to-bottom wrapping flow.
//!
//! [`flow`] is a pure function: the same order, sizes and parameters always
//! produce the same [`FlowPlan`]. Applying the plan to real items (and
//! skipping writes that would not change anything) is the panel's job.
//!
//! # Algorithm
//!
//! A cursor starts at `(padding, padding)`. For each item:
//!
//! 1. The running row bottom becomes
//!    `max(cursor.y + height + padding, row_bottom)`.
//! 2. If the current row already holds an item and
//!    `cursor.x + width + padding > container_width`, the cursor wraps to
//!    `(padding, row_bottom)`.
//! 3. The item is placed at `(cursor.x, cursor.y - vertical_offset)`.
//! 4. The cursor advances by `width + padding`.
//!
//! The vertical offset is only applied at placement, so wrapping never
//! depends on the scroll position. An item wider than the row is placed at a
//! row start and overflows; a non-positive width puts every item on its own
//! row.

use reflow_core::geometry::{Point, Size};
use serde::{Deserialize, Serialize};

/// Geometry inputs for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutParams {
    /// Width available to the flow.
    pub container_width: i32,
    /// Gap around and between items, uniform on all sides.
    pub padding: i32,
    /// Vertical scroll offset, subtracted from every assigned y.
    pub vertical_offset: i32,
}

impl LayoutParams {
    /// Parameters with no scroll offset.
    #[must_use]
    pub const fn new(container_width: i32, padding: i32) -> Self {
        Self {
            container_width,
            padding,
            vertical_offset: 0,
        }
    }

    /// Set the vertical scroll offset.
    #[must_use]
    pub const fn with_vertical_offset(mut self, offset: i32) -> Self {
        self.vertical_offset = offset;
        self
    }
}

/// Where one item goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowPlacement<T> {
    pub item: T,
    /// Assigned top-left corner, scroll offset already applied.
    pub position: Point,
    pub size: Size,
    /// Zero-based row the item landed on.
    pub row: usize,
}

/// Result of a layout pass, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowPlan<T> {
    pub placements: Vec<FlowPlacement<T>>,
    /// Number of rows used (0 for an empty input).
    pub rows: usize,
    /// Distance from the top of the content to the bottom of the lowest item
    /// plus padding, ignoring the scroll offset.
    pub content_height: i32,
}

impl<T: Copy + PartialEq> FlowPlan<T> {
    /// Placement assigned to `item`.
    #[must_use]
    pub fn placement_of(&self, item: T) -> Option<&FlowPlacement<T>> {
        self.placements.iter().find(|p| p.item == item)
    }

    /// Assigned position of `item`.
    #[must_use]
    pub fn position_of(&self, item: T) -> Option<Point> {
        self.placement_of(item).map(|p| p.position)
    }
}

/// Lay out `items` (in display order, with their sizes) as a wrapping flow.
pub fn flow<T, I>(params: &LayoutParams, items: I) -> FlowPlan<T>
where
    I: IntoIterator<Item = (T, Size)>,
{
    let items = items.into_iter();
    let padding = params.padding;

    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "flow_layout",
        width = params.container_width,
        padding,
        offset = params.vertical_offset
    )
    .entered();

    let mut placements = Vec::with_capacity(items.size_hint().0);
    let mut cursor = Point::new(padding, padding);
    let mut row_bottom = 0i32;
    let mut row = 0usize;
    let mut row_occupied = false;
    let mut content_height = 0i32;

    for (item, size) in items {
        row_bottom = row_bottom.max(
            cursor
                .y
                .saturating_add(size.height)
                .saturating_add(padding),
        );

        let right = cursor.x.saturating_add(size.width).saturating_add(padding);
        if row_occupied && right > params.container_width {
            cursor = Point::new(padding, row_bottom);
            row += 1;
        }

        placements.push(FlowPlacement {
            item,
            position: Point::new(cursor.x, cursor.y.saturating_sub(params.vertical_offset)),
            size,
            row,
        });
        content_height = content_height.max(
            cursor
                .y
                .saturating_add(size.height)
                .saturating_add(padding),
        );

        cursor.x = cursor.x.saturating_add(size.width).saturating_add(padding);
        row_occupied = true;
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        items = placements.len(),
        rows = row + usize::from(row_occupied),
        content_height,
        "flow computed"
    );

    FlowPlan {
        rows: if placements.is_empty() { 0 } else { row + 1 },
        placements,
        content_height,
    }
}
