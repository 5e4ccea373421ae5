#![forbid(unsafe_code)]

//! Ordered flow panel.
//!
//! [`OrderedPanel`] composes an [`OrderSequence`], the [`flow`] engine and an
//! optional [`DragController`]. It reacts to host notifications: every
//! lifecycle change (add, remove, resize, reposition, a subscribed item's
//! size change, drag completion) runs a full layout pass. A panel built
//! without drag support ignores pointer events entirely.
//!
//! # Example
//!
//! ```
//! use reflow_core::event::PointerButton;
//! use reflow_core::geometry::{Point, Size};
//! use reflow_widgets::headless::HeadlessHost;
//! use reflow_widgets::host::PanelHost;
//! use reflow_widgets::panel::OrderedPanel;
//!
//! let mut host = HeadlessHost::new(320);
//! let mut panel = OrderedPanel::new().with_item_padding(5).draggable();
//!
//! let items: Vec<_> = (0..4).map(|_| host.spawn(Size::new(100, 40))).collect();
//! for &item in &items {
//!     let _subscription = panel.on_child_added(&mut host, item);
//! }
//! assert_eq!(host.item_bounds(items[3]).unwrap().origin(), Point::new(5, 50));
//!
//! // Pick the first item up and drop it onto the third.
//! panel.on_pointer_down(&mut host, items[0], Point::new(10, 10), PointerButton::Left);
//! let over_third = host.screen_point_in(items[2], Point::new(50, 20)).unwrap();
//! panel.on_pointer_move(&mut host, over_third);
//! panel.on_pointer_up(&mut host, over_third);
//!
//! assert_eq!(panel.order().as_slice(), &[items[1], items[2], items[0], items[3]]);
//! ```

use std::fmt;
use std::hash::Hash;

use reflow_core::event::{Event, PointerButton};
use reflow_core::geometry::Point;
use reflow_layout::{FlowPlan, LayoutParams, OrderSequence, flow};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, PanelConfig};
use crate::drag::{
    CancelReason, DragConfig, DragConfigError, DragController, DragState, DragTransition,
};
use crate::host::PanelHost;

/// Proof that the panel relays size changes of `item`.
///
/// Hand it back to [`OrderedPanel::unsubscribe`] to stop relaying without
/// removing the item. Removing the item drops the subscription as well.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping the subscription keeps it active; pass it to `unsubscribe` to end it"]
pub struct ItemSubscription<I> {
    item: I,
}

impl<I: Copy> ItemSubscription<I> {
    #[must_use]
    pub fn item(&self) -> I {
        self.item
    }
}

/// Summary of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutReport {
    pub rows: usize,
    pub content_height: i32,
    /// Items whose position actually changed.
    pub moved: usize,
}

/// What handling a notification did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOutcome<I> {
    /// Set when a layout pass ran.
    pub layout: Option<LayoutReport>,
    /// Set when the drag controller saw the event.
    pub drag: Option<DragTransition<I>>,
}

impl<I> Default for EventOutcome<I> {
    fn default() -> Self {
        Self {
            layout: None,
            drag: None,
        }
    }
}

impl<I: PartialEq> EventOutcome<I> {
    fn laid_out(report: LayoutReport) -> Self {
        Self {
            layout: Some(report),
            drag: None,
        }
    }

    /// Nothing happened.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.layout.is_none() && self.drag.as_ref().is_none_or(DragTransition::is_noop)
    }

    /// The display order changed.
    #[must_use]
    pub fn reordered(&self) -> bool {
        self.drag.as_ref().is_some_and(DragTransition::reordered)
    }
}

/// Container that flows its items left to right, top to bottom, with
/// optional drag-to-reorder.
pub struct OrderedPanel<I> {
    order: OrderSequence<I>,
    item_padding: i32,
    subscriptions: FxHashSet<I>,
    drag: Option<DragController<I>>,
}

impl<I: fmt::Debug> fmt::Debug for OrderedPanel<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedPanel")
            .field("order", &self.order)
            .field("item_padding", &self.item_padding)
            .field("subscriptions", &self.subscriptions.len())
            .field("drag", &self.drag)
            .finish()
    }
}

impl<I> Default for OrderedPanel<I> {
    fn default() -> Self {
        Self {
            order: OrderSequence::default(),
            item_padding: 0,
            subscriptions: FxHashSet::default(),
            drag: None,
        }
    }
}

impl<I: Copy + Eq + Hash + fmt::Debug> OrderedPanel<I> {
    /// An empty panel without padding or drag support.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a panel from validated configuration.
    pub fn from_config(config: &PanelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut panel = Self::new().with_item_padding(config.item_padding);
        if let Some(drag) = config.drag {
            panel.drag = Some(DragController::new(drag)?);
        }
        Ok(panel)
    }

    #[must_use]
    pub fn with_item_padding(mut self, padding: i32) -> Self {
        self.item_padding = padding;
        self
    }

    /// Attach a drag controller with default settings.
    #[must_use]
    pub fn draggable(mut self) -> Self {
        self.drag = Some(DragController::default());
        self
    }

    // --- Configuration -----------------------------------------------------

    #[must_use]
    pub fn item_padding(&self) -> i32 {
        self.item_padding
    }

    /// Change the padding. Takes effect on the next layout pass.
    pub fn set_item_padding(&mut self, padding: i32) {
        self.item_padding = padding;
    }

    /// Attach a drag controller, replacing an idle one.
    ///
    /// While a session is active only the new tolerance is applied, so the
    /// session keeps running.
    pub fn enable_drag(&mut self, config: DragConfig) -> Result<(), DragConfigError> {
        match &mut self.drag {
            Some(controller) if !controller.state().is_idle() => {
                controller.set_tolerance(config.tolerance)
            }
            slot => {
                *slot = Some(DragController::new(config)?);
                Ok(())
            }
        }
    }

    /// Detach the drag controller, cancelling any session first.
    pub fn disable_drag<H>(&mut self, host: &mut H) -> EventOutcome<I>
    where
        H: PanelHost<Item = I>,
    {
        let outcome = self.cancel_drag(host, CancelReason::HostRequested);
        self.drag = None;
        outcome
    }

    #[must_use]
    pub fn is_draggable(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn drag_controller(&self) -> Option<&DragController<I>> {
        self.drag.as_ref()
    }

    /// Drag session state, or `None` when drag is disabled.
    #[must_use]
    pub fn drag_state(&self) -> Option<DragState<I>> {
        self.drag.as_ref().map(DragController::state)
    }

    /// Drag tolerance, or `None` when drag is disabled.
    #[must_use]
    pub fn drag_tolerance(&self) -> Option<i32> {
        self.drag.as_ref().map(DragController::tolerance)
    }

    /// Change the drag tolerance.
    ///
    /// The value is validated either way, but a panel without drag support
    /// has nowhere to keep it: it is discarded and [`Self::drag_tolerance`]
    /// stays `None`. Use [`Self::enable_drag`] to attach one.
    pub fn set_drag_tolerance(&mut self, tolerance: i32) -> Result<(), DragConfigError> {
        match &mut self.drag {
            Some(controller) => controller.set_tolerance(tolerance),
            None => DragConfig::default().with_tolerance(tolerance).validate(),
        }
    }

    // --- Order -------------------------------------------------------------

    /// Display order.
    #[must_use]
    pub fn order(&self) -> &OrderSequence<I> {
        &self.order
    }

    /// Items in display order.
    pub fn items(&self) -> impl ExactSizeIterator<Item = I> + '_ {
        self.order.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn item_index(&self, item: I) -> Option<usize> {
        self.order.index_of(item)
    }

    /// Move `item` to `index` in display order. Call
    /// [`recompute_layout`](Self::recompute_layout) to apply it.
    pub fn move_item(&mut self, item: I, index: usize) -> Option<usize> {
        self.order.move_to(item, index)
    }

    /// Swap `item` with its predecessor.
    pub fn move_item_up(&mut self, item: I) -> bool {
        self.order.move_up(item)
    }

    /// Swap `item` with its successor.
    pub fn move_item_down(&mut self, item: I) -> bool {
        self.order.move_down(item)
    }

    // --- Lifecycle notifications -------------------------------------------

    /// The host added `item` to the panel.
    pub fn on_child_added<H>(&mut self, host: &mut H, item: I) -> ItemSubscription<I>
    where
        H: PanelHost<Item = I>,
    {
        self.attach(host, item);
        ItemSubscription { item }
    }

    /// The host removed `item` from the panel.
    ///
    /// A drag session on the item ends without touching the handle again.
    pub fn on_child_removed<H>(&mut self, host: &mut H, item: I) -> EventOutcome<I>
    where
        H: PanelHost<Item = I>,
    {
        let drag = self.drag.as_mut().and_then(|controller| controller.forget(item));
        self.subscriptions.remove(&item);
        if self.order.remove(item).is_none() && drag.is_none() {
            return EventOutcome::default();
        }
        EventOutcome {
            layout: Some(self.recompute_layout(host)),
            drag,
        }
    }

    /// Stop relaying size changes for the subscribed item.
    pub fn unsubscribe(&mut self, subscription: ItemSubscription<I>) -> bool {
        self.subscriptions.remove(&subscription.item)
    }

    #[must_use]
    pub fn is_subscribed(&self, item: I) -> bool {
        self.subscriptions.contains(&item)
    }

    /// The panel changed size.
    pub fn on_resized<H>(&mut self, host: &mut H) -> LayoutReport
    where
        H: PanelHost<Item = I>,
    {
        self.recompute_layout(host)
    }

    /// The panel moved within its parent.
    pub fn on_repositioned<H>(&mut self, host: &mut H) -> LayoutReport
    where
        H: PanelHost<Item = I>,
    {
        self.recompute_layout(host)
    }

    /// A child changed size. Ignored unless the item is subscribed.
    pub fn on_item_resized<H>(&mut self, host: &mut H, item: I) -> Option<LayoutReport>
    where
        H: PanelHost<Item = I>,
    {
        self.subscriptions
            .contains(&item)
            .then(|| self.recompute_layout(host))
    }

    // --- Pointer notifications ---------------------------------------------

    /// A pointer button went down over `item`.
    pub fn on_pointer_down<H>(
        &mut self,
        host: &mut H,
        item: I,
        local: Point,
        button: PointerButton,
    ) -> EventOutcome<I>
    where
        H: PanelHost<Item = I>,
    {
        let Some(controller) = self.drag.as_mut() else {
            return EventOutcome::default();
        };
        EventOutcome {
            layout: None,
            drag: Some(controller.pointer_down(host, &self.order, item, local, button)),
        }
    }

    /// The pointer moved (screen space).
    pub fn on_pointer_move<H>(&mut self, host: &mut H, screen: Point) -> EventOutcome<I>
    where
        H: PanelHost<Item = I>,
    {
        let Some(controller) = self.drag.as_mut() else {
            return EventOutcome::default();
        };
        let transition = controller.pointer_move(host, &self.order, screen);
        self.settle(host, transition)
    }

    /// A pointer button was released (screen space).
    pub fn on_pointer_up<H>(&mut self, host: &mut H, screen: Point) -> EventOutcome<I>
    where
        H: PanelHost<Item = I>,
    {
        let Some(controller) = self.drag.as_mut() else {
            return EventOutcome::default();
        };
        let transition = controller.pointer_up(host, &mut self.order, screen);
        self.settle(host, transition)
    }

    /// End any drag session without a drop; a lifted item returns to the
    /// index it was lifted from.
    pub fn cancel_drag<H>(&mut self, host: &mut H, reason: CancelReason) -> EventOutcome<I>
    where
        H: PanelHost<Item = I>,
    {
        let Some(controller) = self.drag.as_mut() else {
            return EventOutcome::default();
        };
        let transition = controller.cancel(host, &mut self.order, reason);
        self.settle(host, transition)
    }

    /// Dispatch a host notification to the matching `on_*` method.
    ///
    /// Items added through here stay subscribed until they are removed.
    pub fn handle_event<H>(&mut self, host: &mut H, event: Event<I>) -> EventOutcome<I>
    where
        H: PanelHost<Item = I>,
    {
        match event {
            Event::ChildAdded { item } => EventOutcome::laid_out(self.attach(host, item)),
            Event::ChildRemoved { item } => self.on_child_removed(host, item),
            Event::Resized => EventOutcome::laid_out(self.on_resized(host)),
            Event::Repositioned => EventOutcome::laid_out(self.on_repositioned(host)),
            Event::ItemResized { item } => EventOutcome {
                layout: self.on_item_resized(host, item),
                drag: None,
            },
            Event::PointerDown {
                item,
                local,
                button,
            } => self.on_pointer_down(host, item, local, button),
            Event::PointerMove { screen } => self.on_pointer_move(host, screen),
            Event::PointerUp { screen } => self.on_pointer_up(host, screen),
            Event::CaptureLost => self.cancel_drag(host, CancelReason::CaptureLost),
        }
    }

    // --- Layout ------------------------------------------------------------

    /// Compute where every item should go, without moving anything.
    ///
    /// Items the host no longer knows are left out.
    pub fn layout_plan<H>(&self, host: &H) -> FlowPlan<I>
    where
        H: PanelHost<Item = I>,
    {
        let params = LayoutParams {
            container_width: host.container_width(),
            padding: self.item_padding,
            vertical_offset: host.vertical_scroll(),
        };
        flow(
            &params,
            self.order
                .iter()
                .filter_map(|item| host.item_bounds(item).map(|bounds| (item, bounds.size()))),
        )
    }

    /// Run a full layout pass and move items whose position changed.
    ///
    /// A dragged item keeps its slot in the flow but is not moved; it
    /// follows the pointer until dropped.
    pub fn recompute_layout<H>(&self, host: &mut H) -> LayoutReport
    where
        H: PanelHost<Item = I>,
    {
        let plan = self.layout_plan(host);
        let floating = self.drag.as_ref().and_then(DragController::dragged_item);

        let mut moved = 0;
        for placement in &plan.placements {
            if Some(placement.item) == floating {
                continue;
            }
            let current = host.item_bounds(placement.item).map(|bounds| bounds.origin());
            if current != Some(placement.position) {
                host.set_item_position(placement.item, placement.position);
                moved += 1;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            items = plan.placements.len(),
            rows = plan.rows,
            moved,
            "panel layout applied"
        );

        LayoutReport {
            rows: plan.rows,
            content_height: plan.content_height,
            moved,
        }
    }

    fn settle<H>(&mut self, host: &mut H, transition: DragTransition<I>) -> EventOutcome<I>
    where
        H: PanelHost<Item = I>,
    {
        let layout = transition
            .needs_layout()
            .then(|| self.recompute_layout(host));
        EventOutcome {
            layout,
            drag: Some(transition),
        }
    }

    fn attach<H>(&mut self, host: &mut H, item: I) -> LayoutReport
    where
        H: PanelHost<Item = I>,
    {
        self.order.append(item);
        self.subscriptions.insert(item);
        self.recompute_layout(host)
    }
}
