#![forbid(unsafe_code)]

//! Ordered flow panel with drag-to-reorder.
//!
//! - [`OrderedPanel`] - container that flows its items and reacts to host
//!   notifications
//! - [`DragController`] - pointer state machine turning a drag into an
//!   order change
//! - [`PanelHost`] - what the panel needs from the host toolkit
//! - [`HeadlessHost`] - in-memory host for tests and toolkit-less use
//! - [`PanelConfig`] - serde and environment configuration
//!
//! # Feature Flags
//!
//! - `tracing`: emit `debug`/`trace` events for layout passes and drag
//!   transitions.

pub mod config;
pub mod drag;
pub mod headless;
pub mod host;
pub mod panel;

pub use config::{ConfigError, ENV_DRAG_TOLERANCE, ENV_ITEM_PADDING, PanelConfig};
pub use drag::{
    CancelReason, DEFAULT_DRAG_TOLERANCE, DROP_DEADZONE_FRACTION, DragConfig, DragConfigError,
    DragController, DragEffect, DragNoopReason, DragState, DragTransition, HitKind,
    pick_drop_target,
};
pub use headless::{HeadlessHost, ItemId};
pub use host::{PanelHost, Surface};
pub use panel::{EventOutcome, ItemSubscription, LayoutReport, OrderedPanel};
