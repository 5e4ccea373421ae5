#![forbid(unsafe_code)]

//! The narrow interface a flow panel needs from its host toolkit.
//!
//! The panel never owns items. It holds handles and asks the host about
//! them; a handle whose item no longer exists answers `None` from
//! [`PanelHost::item_bounds`] and every operation on it degrades to a no-op.

use std::fmt;
use std::hash::Hash;

use reflow_core::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A coordinate space an item can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// The flow panel itself. Item positions are panel-local.
    Panel,
    /// The layer above the panel that carries an item while it is dragged.
    /// Usually the panel's parent.
    Floating,
}

/// Host toolkit services consumed by an [`OrderedPanel`](crate::panel::OrderedPanel).
pub trait PanelHost {
    /// Non-owning item handle.
    type Item: Copy + Eq + Hash + fmt::Debug;

    /// Bounds of `item` in the coordinate space of the surface it currently
    /// lives on, or `None` if the item no longer exists.
    fn item_bounds(&self, item: Self::Item) -> Option<Rect>;

    /// Move `item` within its current surface.
    fn set_item_position(&mut self, item: Self::Item, position: Point);

    /// Current width of the panel.
    fn container_width(&self) -> i32;

    /// Current vertical scroll offset of the panel.
    fn vertical_scroll(&self) -> i32;

    /// Current pointer position in screen space.
    ///
    /// The drag controller takes positions from the events it is handed and
    /// does not poll this.
    fn pointer_screen_position(&self) -> Point;

    /// Convert a screen-space point into `surface`-local coordinates.
    fn screen_to_surface(&self, surface: Surface, screen: Point) -> Point;

    /// Move `item` onto `surface`.
    fn reparent(&mut self, item: Self::Item, surface: Surface);

    /// Raise `item` above its siblings.
    fn bring_to_front(&mut self, item: Self::Item);
}
