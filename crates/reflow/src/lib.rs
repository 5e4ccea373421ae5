#![forbid(unsafe_code)]

//! Reflow public facade crate.
//!
//! Re-exports the panel, layout and geometry types from the internal crates
//! and offers a small prelude.
//!
//! ```
//! use reflow::prelude::*;
//!
//! let config = PanelConfig::new().with_item_padding(5).draggable();
//! let mut host = HeadlessHost::new(320);
//! let mut panel = OrderedPanel::from_config(&config)?;
//! let item = host.spawn(Size::new(100, 40));
//! let _subscription = panel.on_child_added(&mut host, item);
//! assert_eq!(host.item_bounds(item).map(|b| b.origin()), Some(Point::new(5, 5)));
//! # Ok::<(), reflow::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use reflow_core::event::{Event, PointerButton};
pub use reflow_core::geometry::{Point, Rect, Size};

// --- Layout re-exports -----------------------------------------------------

pub use reflow_layout::{FlowPlacement, FlowPlan, LayoutParams, OrderSequence, flow};

// --- Widget re-exports -----------------------------------------------------

pub use reflow_widgets::{
    CancelReason, ConfigError, DragConfig, DragConfigError, DragController, DragEffect,
    DragNoopReason, DragState, DragTransition, EventOutcome, HeadlessHost, HitKind,
    ItemSubscription, ItemId, LayoutReport, OrderedPanel, PanelConfig, PanelHost, Surface,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Reflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Panel configuration was rejected.
    Config(ConfigError),
    /// Drag settings were rejected.
    Drag(DragConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Drag(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Drag(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<DragConfigError> for Error {
    fn from(err: DragConfigError) -> Self {
        Self::Drag(err)
    }
}

/// Standard result type for Reflow APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DragConfig, Error, Event, HeadlessHost, OrderSequence, OrderedPanel, PanelConfig,
        PanelHost, Point, PointerButton, Rect, Result, Size, Surface,
    };

    pub use crate::{core, layout, widgets};
}

pub use reflow_core as core;
pub use reflow_layout as layout;
pub use reflow_widgets as widgets;
