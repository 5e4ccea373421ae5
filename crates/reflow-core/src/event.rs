#![forbid(unsafe_code)]

//! Host notifications delivered to a flow panel.
//!
//! The host toolkit owns event dispatch. It translates its own callbacks into
//! [`Event`] values (or calls the equivalent panel methods directly), always
//! on the thread that owns the panel.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Primary (usually left) button.
    #[default]
    Left,

    /// Secondary (usually right) button.
    Right,

    /// Middle button (scroll wheel click).
    Middle,
}

/// A notification from the host about the panel, one of its items, or the
/// pointer.
///
/// `I` is the host's item handle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event<I> {
    /// An item was added to the panel's child collection.
    ChildAdded { item: I },

    /// An item was removed from the panel's child collection.
    ChildRemoved { item: I },

    /// The panel itself changed size.
    Resized,

    /// The panel itself moved within its parent.
    Repositioned,

    /// An item changed size.
    ItemResized { item: I },

    /// A pointer button went down over an item.
    ///
    /// `local` is relative to the item's top-left corner.
    PointerDown {
        item: I,
        local: Point,
        button: PointerButton,
    },

    /// The pointer moved. `screen` is in screen space.
    PointerMove { screen: Point },

    /// A pointer button was released. `screen` is in screen space.
    PointerUp { screen: Point },

    /// The panel lost pointer capture (focus loss, window deactivation).
    CaptureLost,
}

impl<I> Event<I> {
    /// Returns true for pointer-originated events.
    #[must_use]
    pub const fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::PointerDown { .. } | Self::PointerMove { .. } | Self::PointerUp { .. }
        )
    }

    /// The item the event refers to, if any.
    #[must_use]
    pub fn item(&self) -> Option<&I> {
        match self {
            Self::ChildAdded { item }
            | Self::ChildRemoved { item }
            | Self::ItemResized { item }
            | Self::PointerDown { item, .. } => Some(item),
            _ => None,
        }
    }
}
