#![forbid(unsafe_code)]

//! Drag-to-reorder state machine.
//!
//! ```text
//! Idle -> Armed -> Dragging -> Idle
//!    \------> Idle (click or cancel from Armed)
//! ```
//!
//! A pointer-down over an item arms a session. Once the pointer has moved
//! at least the tolerance away from the down-point on either axis, the item
//! is lifted onto the floating surface and follows the pointer. On release
//! the drop target is chosen by a two-tier hit test:
//!
//! 1. **Passive**: the dragged bounds, shrunk by a quarter of their size on
//!    every side, intersect a sibling. The last such sibling in display order
//!    wins.
//! 2. **Absolute**: the pointer itself is inside a sibling. The first such
//!    sibling wins outright and ends the scan.
//!
//! The item moves to the target's index, or back to where it started when
//! nothing was hit. The order is never touched before the drop.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Pointer-down on an unknown item | Item not in the order or has no bounds | `Noop`, stays Idle |
//! | Second pointer-down | Session already active | `Noop`, session kept |
//! | Session item destroyed | Host reports no bounds | Session ends as `Canceled` |
//! | Capture lost mid-drag | Window deactivation | Item returns to its original index |

use std::fmt;

use reflow_core::event::PointerButton;
use reflow_core::geometry::{Point, Rect};
use reflow_layout::OrderSequence;
use serde::{Deserialize, Serialize};

use crate::host::{PanelHost, Surface};

/// Default pointer travel, per axis, before a press becomes a drag.
pub const DEFAULT_DRAG_TOLERANCE: i32 = 10;

/// Fraction of the dragged item's width and height trimmed from each side
/// before the passive hit test.
pub const DROP_DEADZONE_FRACTION: f64 = 0.25;

// ---------------------------------------------------------------------------
// DragConfig
// ---------------------------------------------------------------------------

/// Configuration for drag detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Minimum travel on either axis before a drag starts (default: 10).
    pub tolerance: i32,
    /// Button that picks items up (default: left).
    pub button: PointerButton,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_DRAG_TOLERANCE,
            button: PointerButton::Left,
        }
    }
}

impl DragConfig {
    /// Set the drag tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: i32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the button that starts drags.
    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Reject configurations the controller cannot run with.
    pub fn validate(&self) -> Result<(), DragConfigError> {
        if self.tolerance < 0 {
            return Err(DragConfigError::NegativeTolerance {
                tolerance: self.tolerance,
            });
        }
        Ok(())
    }
}

/// Invalid [`DragConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragConfigError {
    NegativeTolerance { tolerance: i32 },
}

impl fmt::Display for DragConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeTolerance { tolerance } => {
                write!(f, "drag tolerance must be non-negative (got {tolerance})")
            }
        }
    }
}

impl std::error::Error for DragConfigError {}

// ---------------------------------------------------------------------------
// State, effects, transitions
// ---------------------------------------------------------------------------

/// Drag session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState<I> {
    Idle,
    /// Pressed on `item`; waiting for the pointer to travel far enough.
    Armed {
        item: I,
        /// Press point in screen space, derived from the item's bounds.
        origin: Point,
        /// Item origin minus pointer position (the negated press point).
        pointer_offset: Point,
    },
    /// `item` is on the floating surface following the pointer.
    Dragging {
        item: I,
        original_index: usize,
        pointer_offset: Point,
    },
}

impl<I: Copy> DragState<I> {
    /// Item owning the session, armed or dragging.
    #[must_use]
    pub fn item(&self) -> Option<I> {
        match self {
            Self::Idle => None,
            Self::Armed { item, .. } | Self::Dragging { item, .. } => Some(*item),
        }
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Which hit test picked the drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitKind {
    /// Shrunk dragged bounds overlapped the target.
    Passive,
    /// The pointer was inside the target.
    Absolute,
}

/// Why a session ended without a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// The host asked for it.
    HostRequested,
    /// The panel lost pointer capture.
    CaptureLost,
    /// The session item was removed from the panel.
    ItemRemoved,
    /// The host no longer knows the session item.
    ItemUnavailable,
}

/// Why an event left the machine unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutSession,
    ButtonNotEnabled,
    UnknownItem,
    SessionAlreadyActive,
    ToleranceNotReached,
}

/// What one step of the machine did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect<I> {
    Armed {
        item: I,
        pointer_offset: Point,
    },
    DragStarted {
        item: I,
        original_index: usize,
        /// Position on the floating surface.
        position: Point,
    },
    Moved {
        item: I,
        position: Point,
    },
    /// Released before reaching the tolerance.
    Clicked {
        item: I,
    },
    Dropped {
        item: I,
        target: I,
        hit: HitKind,
        from_index: usize,
        to_index: usize,
    },
    /// Released over nothing; the item goes back to its original index.
    Reverted {
        item: I,
        index: usize,
    },
    Canceled {
        item: I,
        reason: CancelReason,
        /// The item had been lifted and needs to be laid out again.
        was_dragging: bool,
    },
    Noop {
        reason: DragNoopReason,
    },
}

/// One state-machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragTransition<I> {
    pub from: DragState<I>,
    pub to: DragState<I>,
    pub effect: DragEffect<I>,
}

impl<I: PartialEq> DragTransition<I> {
    /// True when the display order changed.
    #[must_use]
    pub fn reordered(&self) -> bool {
        matches!(
            self.effect,
            DragEffect::Dropped { from_index, to_index, .. } if from_index != to_index
        )
    }

    /// True when the panel must run a layout pass to settle the item.
    #[must_use]
    pub fn needs_layout(&self) -> bool {
        matches!(
            self.effect,
            DragEffect::Dropped { .. }
                | DragEffect::Reverted { .. }
                | DragEffect::Canceled {
                    was_dragging: true,
                    ..
                }
        )
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self.effect, DragEffect::Noop { .. })
    }
}

// ---------------------------------------------------------------------------
// Hit testing
// ---------------------------------------------------------------------------

/// Shrink dragged bounds by [`DROP_DEADZONE_FRACTION`] on every side.
#[must_use]
pub fn drop_deadzone(bounds: Rect) -> Rect {
    let dx = (f64::from(bounds.width) * DROP_DEADZONE_FRACTION) as i32;
    let dy = (f64::from(bounds.height) * DROP_DEADZONE_FRACTION) as i32;
    bounds.inflate(-dx, -dy)
}

/// Soft test: the shrunk dragged bounds overlap `sibling`.
#[inline]
#[must_use]
pub fn passive_hit(deadzone: &Rect, sibling: &Rect) -> bool {
    sibling.intersects(deadzone)
}

/// Hard test: the pointer is inside `sibling`.
#[inline]
#[must_use]
pub fn absolute_hit(pointer: Point, sibling: &Rect) -> bool {
    sibling.contains(pointer)
}

/// Choose a drop target among `siblings` (in display order, panel space).
///
/// The last passive hit is remembered; the first absolute hit returns
/// immediately.
pub fn pick_drop_target<I, S>(dragged: Rect, pointer: Point, siblings: S) -> Option<(I, HitKind)>
where
    I: Copy,
    S: IntoIterator<Item = (I, Rect)>,
{
    let deadzone = drop_deadzone(dragged);
    let mut candidate = None;
    for (sibling, bounds) in siblings {
        if passive_hit(&deadzone, &bounds) {
            candidate = Some((sibling, HitKind::Passive));
        }
        if absolute_hit(pointer, &bounds) {
            return Some((sibling, HitKind::Absolute));
        }
    }
    candidate
}

fn crossed_tolerance(origin: Point, current: Point, tolerance: i32) -> bool {
    let dx = (i64::from(current.x) - i64::from(origin.x)).abs();
    let dy = (i64::from(current.y) - i64::from(origin.y)).abs();
    let tolerance = i64::from(tolerance);
    dx >= tolerance || dy >= tolerance
}

// ---------------------------------------------------------------------------
// DragController
// ---------------------------------------------------------------------------

/// Owns the single drag session of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragController<I> {
    state: DragState<I>,
    config: DragConfig,
}

impl<I> Default for DragController<I> {
    fn default() -> Self {
        Self {
            state: DragState::Idle,
            config: DragConfig::default(),
        }
    }
}

impl<I: Copy + PartialEq + fmt::Debug> DragController<I> {
    /// Create a controller with an explicit configuration.
    pub fn new(config: DragConfig) -> Result<Self, DragConfigError> {
        config.validate()?;
        Ok(Self {
            state: DragState::Idle,
            config,
        })
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> DragState<I> {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> DragConfig {
        self.config
    }

    #[must_use]
    pub const fn tolerance(&self) -> i32 {
        self.config.tolerance
    }

    /// Change the tolerance. Takes effect on the next pointer-move.
    pub fn set_tolerance(&mut self, tolerance: i32) -> Result<(), DragConfigError> {
        let config = self.config.with_tolerance(tolerance);
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Item currently lifted onto the floating surface.
    #[must_use]
    pub fn dragged_item(&self) -> Option<I> {
        match self.state {
            DragState::Dragging { item, .. } => Some(item),
            _ => None,
        }
    }

    /// Handle a pointer-down over `item`, `local` being relative to the
    /// item's origin.
    ///
    /// The screen-space down-point is rebuilt from the item's panel bounds
    /// and `local`, so the host's last reported pointer position is not
    /// consulted.
    pub fn pointer_down<H>(
        &mut self,
        host: &H,
        order: &OrderSequence<I>,
        item: I,
        local: Point,
        button: PointerButton,
    ) -> DragTransition<I>
    where
        H: PanelHost<Item = I>,
    {
        let from = self.state;
        let effect = if !self.state.is_idle() {
            DragEffect::Noop {
                reason: DragNoopReason::SessionAlreadyActive,
            }
        } else if button != self.config.button {
            DragEffect::Noop {
                reason: DragNoopReason::ButtonNotEnabled,
            }
        } else if let Some(bounds) = host.item_bounds(item).filter(|_| order.contains(item)) {
            let panel_origin = -host.screen_to_surface(Surface::Panel, Point::ORIGIN);
            let pointer_offset = -local;
            self.state = DragState::Armed {
                item,
                origin: bounds.origin() + local + panel_origin,
                pointer_offset,
            };
            DragEffect::Armed {
                item,
                pointer_offset,
            }
        } else {
            DragEffect::Noop {
                reason: DragNoopReason::UnknownItem,
            }
        };
        self.finish(from, effect)
    }

    /// Handle pointer movement, `screen` in screen space.
    pub fn pointer_move<H>(
        &mut self,
        host: &mut H,
        order: &OrderSequence<I>,
        screen: Point,
    ) -> DragTransition<I>
    where
        H: PanelHost<Item = I>,
    {
        let from = self.state;
        let effect = match self.state {
            DragState::Idle => DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutSession,
            },
            DragState::Armed {
                item,
                origin,
                pointer_offset,
            } => {
                if host.item_bounds(item).is_none() {
                    self.abandon(item, false)
                } else if !crossed_tolerance(origin, screen, self.config.tolerance) {
                    DragEffect::Noop {
                        reason: DragNoopReason::ToleranceNotReached,
                    }
                } else if let Some(original_index) = order.index_of(item) {
                    host.reparent(item, Surface::Floating);
                    host.bring_to_front(item);
                    let position =
                        host.screen_to_surface(Surface::Floating, screen) + pointer_offset;
                    host.set_item_position(item, position);
                    self.state = DragState::Dragging {
                        item,
                        original_index,
                        pointer_offset,
                    };
                    DragEffect::DragStarted {
                        item,
                        original_index,
                        position,
                    }
                } else {
                    self.abandon(item, false)
                }
            }
            DragState::Dragging {
                item,
                pointer_offset,
                ..
            } => {
                if host.item_bounds(item).is_none() {
                    self.abandon(item, true)
                } else {
                    let position =
                        host.screen_to_surface(Surface::Floating, screen) + pointer_offset;
                    host.set_item_position(item, position);
                    DragEffect::Moved { item, position }
                }
            }
        };
        self.finish(from, effect)
    }

    /// Handle pointer release, `screen` in screen space.
    ///
    /// On a drop the item is back on the panel and the order is updated;
    /// the caller still has to lay the panel out.
    pub fn pointer_up<H>(
        &mut self,
        host: &mut H,
        order: &mut OrderSequence<I>,
        screen: Point,
    ) -> DragTransition<I>
    where
        H: PanelHost<Item = I>,
    {
        let from = self.state;
        let effect = match self.state {
            DragState::Idle => DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutSession,
            },
            DragState::Armed { item, .. } => {
                self.state = DragState::Idle;
                DragEffect::Clicked { item }
            }
            DragState::Dragging {
                item,
                original_index,
                pointer_offset,
            } => match (host.item_bounds(item), order.index_of(item)) {
                (Some(bounds), Some(from_index)) => {
                    self.state = DragState::Idle;
                    host.reparent(item, Surface::Panel);
                    let pointer = host.screen_to_surface(Surface::Panel, screen);
                    let dropped = bounds.with_origin(pointer + pointer_offset);
                    host.set_item_position(item, dropped.origin());

                    let target = pick_drop_target(
                        dropped,
                        pointer,
                        order
                            .iter()
                            .filter(|sibling| *sibling != item)
                            .filter_map(|sibling| {
                                host.item_bounds(sibling).map(|bounds| (sibling, bounds))
                            }),
                    );

                    match target.and_then(|(target, hit)| {
                        order.index_of(target).map(|index| (target, hit, index))
                    }) {
                        Some((target, hit, index)) => {
                            let to_index = order.move_to(item, index).unwrap_or(from_index);
                            DragEffect::Dropped {
                                item,
                                target,
                                hit,
                                from_index,
                                to_index,
                            }
                        }
                        None => {
                            let index = order.move_to(item, original_index).unwrap_or(from_index);
                            DragEffect::Reverted { item, index }
                        }
                    }
                }
                _ => self.abandon(item, true),
            },
        };
        self.finish(from, effect)
    }

    /// End the session without a drop.
    ///
    /// A lifted item is put back on the panel at the index it was lifted
    /// from, even if the order was rearranged while it was floating.
    pub fn cancel<H>(
        &mut self,
        host: &mut H,
        order: &mut OrderSequence<I>,
        reason: CancelReason,
    ) -> DragTransition<I>
    where
        H: PanelHost<Item = I>,
    {
        let from = self.state;
        let effect = match self.state {
            DragState::Idle => DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutSession,
            },
            DragState::Armed { item, .. } => {
                self.state = DragState::Idle;
                DragEffect::Canceled {
                    item,
                    reason,
                    was_dragging: false,
                }
            }
            DragState::Dragging {
                item,
                original_index,
                ..
            } => {
                self.state = DragState::Idle;
                if host.item_bounds(item).is_some() {
                    host.reparent(item, Surface::Panel);
                }
                order.move_to(item, original_index);
                DragEffect::Canceled {
                    item,
                    reason,
                    was_dragging: true,
                }
            }
        };
        self.finish(from, effect)
    }

    /// Drop the session if it belongs to `item`, without touching the host.
    ///
    /// Used when the item is being removed and its handle must not be used
    /// again.
    pub fn forget(&mut self, item: I) -> Option<DragTransition<I>> {
        if self.state.item() != Some(item) {
            return None;
        }
        let from = self.state;
        let effect = self.abandon_with(item, CancelReason::ItemRemoved, from.is_dragging());
        Some(self.finish(from, effect))
    }

    fn abandon(&mut self, item: I, was_dragging: bool) -> DragEffect<I> {
        self.abandon_with(item, CancelReason::ItemUnavailable, was_dragging)
    }

    fn abandon_with(&mut self, item: I, reason: CancelReason, was_dragging: bool) -> DragEffect<I> {
        self.state = DragState::Idle;
        DragEffect::Canceled {
            item,
            reason,
            was_dragging,
        }
    }

    fn finish(&self, from: DragState<I>, effect: DragEffect<I>) -> DragTransition<I> {
        #[cfg(feature = "tracing")]
        {
            if let DragEffect::Noop { reason } = effect {
                tracing::trace!(?reason, state = ?from, "drag event ignored");
            } else {
                tracing::debug!(from = ?from, to = ?self.state, effect = ?effect, "drag transition");
            }
        }
        DragTransition {
            from,
            to: self.state,
            effect,
        }
    }
}
