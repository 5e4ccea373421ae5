#![forbid(unsafe_code)]

//! End-to-end drag-to-reorder scenarios against the headless host.
//!
//! Every scenario uses the same panel: 320 wide, padding 5, placed at screen
//! (100, 100) with the floating layer at the screen origin, holding four
//! 100x40 items A, B, C, D. The resting layout is
//!
//! ```text
//! A (5, 5)   B (110, 5)   C (215, 5)
//! D (5, 50)
//! ```

use proptest::prelude::*;
use reflow_core::event::{Event, PointerButton};
use reflow_core::geometry::{Point, Size};
use reflow_widgets::{
    CancelReason, DragConfig, DragEffect, HeadlessHost, HitKind, ItemId, OrderedPanel, PanelHost,
    Surface,
};

const PANEL_ORIGIN: Point = Point::new(100, 100);

struct Scene {
    host: HeadlessHost,
    panel: OrderedPanel<ItemId>,
    a: ItemId,
    b: ItemId,
    c: ItemId,
    d: ItemId,
}

impl Scene {
    fn new() -> Self {
        Self::with_panel(OrderedPanel::new().with_item_padding(5).draggable())
    }

    fn with_panel(mut panel: OrderedPanel<ItemId>) -> Self {
        let mut host = HeadlessHost::new(320).with_panel_origin(PANEL_ORIGIN);
        let mut spawn = |host: &mut HeadlessHost| {
            let id = host.spawn(Size::new(100, 40));
            let _ = panel.on_child_added(host, id);
            id
        };
        let a = spawn(&mut host);
        let b = spawn(&mut host);
        let c = spawn(&mut host);
        let d = spawn(&mut host);
        Self {
            host,
            panel,
            a,
            b,
            c,
            d,
        }
    }

    fn order(&self) -> Vec<ItemId> {
        self.panel.items().collect()
    }

    fn origin(&self, id: ItemId) -> Point {
        self.host.item_bounds(id).unwrap().origin()
    }

    /// Press `item` at `local` with the left button.
    fn press(&mut self, item: ItemId, local: Point) {
        let outcome = self
            .panel
            .on_pointer_down(&mut self.host, item, local, PointerButton::Left);
        assert!(matches!(
            outcome.drag.map(|t| t.effect),
            Some(DragEffect::Armed { .. })
        ));
    }

    /// Drag the pressed item to `panel_point` (panel coordinates) and
    /// release there.
    fn drop_at(&mut self, panel_point: Point) -> reflow_widgets::EventOutcome<ItemId> {
        let screen = panel_point + PANEL_ORIGIN;
        self.host.set_pointer(screen);
        self.panel.on_pointer_move(&mut self.host, screen);
        self.panel.on_pointer_up(&mut self.host, screen)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Drop targets
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn drop_on_third_item_reorders() {
    let mut s = Scene::new();
    s.press(s.a, Point::new(10, 10));
    let outcome = s.drop_at(Point::new(265, 25));

    assert!(outcome.reordered());
    assert_eq!(s.order(), vec![s.b, s.c, s.a, s.d]);
    assert_eq!(s.origin(s.b), Point::new(5, 5));
    assert_eq!(s.origin(s.c), Point::new(110, 5));
    assert_eq!(s.origin(s.a), Point::new(215, 5));
    assert_eq!(s.origin(s.d), Point::new(5, 50));
    assert_eq!(s.host.surface_of(s.a), Some(Surface::Panel));
}

#[test]
fn drop_on_first_item_moves_to_front() {
    let mut s = Scene::new();
    s.press(s.d, Point::new(10, 10));
    s.drop_at(Point::new(50, 25));
    assert_eq!(s.order(), vec![s.d, s.a, s.b, s.c]);
    assert_eq!(s.origin(s.c), Point::new(5, 50));
}

#[test]
fn release_outside_keeps_order() {
    let mut s = Scene::new();
    let before = s.order();
    s.press(s.b, Point::new(10, 10));
    let outcome = s.drop_at(Point::new(800, 800));

    assert_eq!(
        outcome.drag.map(|t| t.effect),
        Some(DragEffect::Reverted { item: s.b, index: 1 })
    );
    assert!(!outcome.reordered());
    assert_eq!(s.order(), before);
    assert_eq!(s.origin(s.b), Point::new(110, 5));
}

#[test]
fn pointer_inside_sibling_beats_later_overlap() {
    // Dragged bounds land at (200, 5): the shrunk rectangle (225..275)
    // overlaps C only, but the pointer sits inside B.
    let mut s = Scene::new();
    s.press(s.a, Point::new(5, 20));
    let outcome = s.drop_at(Point::new(205, 25));

    match outcome.drag.map(|t| t.effect) {
        Some(DragEffect::Dropped { target, hit, .. }) => {
            assert_eq!(target, s.b);
            assert_eq!(hit, HitKind::Absolute);
        }
        other => panic!("expected a drop, got {other:?}"),
    }
    assert_eq!(s.order(), vec![s.b, s.a, s.c, s.d]);
}

#[test]
fn last_overlapping_sibling_wins() {
    // Dragged bounds land at (162, 5): the shrunk rectangle (187..237)
    // overlaps both B and C, and the pointer is in the gap between them.
    let mut s = Scene::new();
    s.press(s.a, Point::new(50, 20));
    let outcome = s.drop_at(Point::new(212, 25));

    match outcome.drag.map(|t| t.effect) {
        Some(DragEffect::Dropped { target, hit, .. }) => {
            assert_eq!(target, s.c);
            assert_eq!(hit, HitKind::Passive);
        }
        other => panic!("expected a drop, got {other:?}"),
    }
    assert_eq!(s.order(), vec![s.b, s.c, s.a, s.d]);
}

#[test]
fn drop_respects_vertical_scroll() {
    let mut s = Scene::new();
    s.host.set_vertical_scroll(20);
    s.panel.on_resized(&mut s.host);
    assert_eq!(s.origin(s.c), Point::new(215, -15));

    s.press(s.a, Point::new(10, 10));
    s.drop_at(Point::new(265, 5));
    assert_eq!(s.order(), vec![s.b, s.c, s.a, s.d]);
    assert_eq!(s.origin(s.a), Point::new(215, -15));
}

// ═══════════════════════════════════════════════════════════════════════════
// Session lifecycle
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn layout_during_drag_leaves_dragged_item_alone() {
    let mut s = Scene::new();
    s.press(s.a, Point::new(10, 10));
    let lifted_at = Point::new(400, 400);
    s.host.set_pointer(lifted_at);
    s.panel.on_pointer_move(&mut s.host, lifted_at);
    let floating = s.origin(s.a);
    assert_eq!(floating, Point::new(390, 390));

    s.host.set_container_width(500);
    s.panel.on_resized(&mut s.host);
    s.host.resize_item(s.b, Size::new(100, 60));
    s.panel.on_item_resized(&mut s.host, s.b);

    assert_eq!(s.origin(s.a), floating);
    assert_eq!(s.host.surface_of(s.a), Some(Surface::Floating));
    assert_eq!(s.origin(s.d), Point::new(320, 5));
}

#[test]
fn drop_writes_only_changed_positions() {
    let mut s = Scene::new();
    s.press(s.a, Point::new(10, 10));
    let over_c = Point::new(265, 25) + PANEL_ORIGIN;
    s.panel.on_pointer_move(&mut s.host, over_c);
    s.host.reset_counters();

    let outcome = s.panel.on_pointer_up(&mut s.host, over_c);
    // B and C shift left, A settles into its new slot, D stays.
    assert_eq!(outcome.layout.map(|r| r.moved), Some(3));
    // One extra write places A at the drop point before the layout pass.
    assert_eq!(s.host.position_writes(), 4);
    assert_eq!(s.host.reparents(), 1);

    s.host.reset_counters();
    s.panel.recompute_layout(&mut s.host);
    assert_eq!(s.host.position_writes(), 0);
}

#[test]
fn capture_loss_mid_drag_restores_layout() {
    let mut s = Scene::new();
    let before = s.order();
    s.press(s.c, Point::new(10, 10));
    s.drop_at_without_release(Point::new(40, 70));

    let outcome = s.panel.handle_event(&mut s.host, Event::CaptureLost);
    assert_eq!(
        outcome.drag.map(|t| t.effect),
        Some(DragEffect::Canceled {
            item: s.c,
            reason: CancelReason::CaptureLost,
            was_dragging: true,
        })
    );
    assert_eq!(s.order(), before);
    assert_eq!(s.origin(s.c), Point::new(215, 5));
    assert_eq!(s.host.surface_of(s.c), Some(Surface::Panel));
}

#[test]
fn session_survives_unrelated_removal() {
    let mut s = Scene::new();
    s.press(s.a, Point::new(10, 10));
    s.drop_at_without_release(Point::new(600, 600));

    s.host.destroy(s.d);
    let outcome = s.panel.on_child_removed(&mut s.host, s.d);
    assert_eq!(outcome.drag, None);
    assert!(s.panel.drag_state().is_some_and(|state| state.is_dragging()));

    let outcome = s.drop_at(Point::new(265, 25));
    assert!(outcome.reordered());
    assert_eq!(s.order(), vec![s.b, s.c, s.a]);
}

#[test]
fn recorded_session_replays_from_json() {
    let mut s = Scene::new();
    // Leave the host pointer somewhere unrelated; the press point comes
    // from the event alone.
    s.host.set_pointer(Point::new(-1000, -1000));

    let script = format!(
        r#"[
            {{"event":"pointer_down","item":{a},"local":{{"x":10,"y":10}},"button":"left"}},
            {{"event":"pointer_move","screen":{{"x":250,"y":120}}}},
            {{"event":"pointer_move","screen":{{"x":365,"y":125}}}},
            {{"event":"pointer_up","screen":{{"x":365,"y":125}}}}
        ]"#,
        a = s.a.raw()
    );
    let events: Vec<Event<ItemId>> = serde_json::from_str(&script).unwrap();
    let outcomes: Vec<_> = events
        .into_iter()
        .map(|event| s.panel.handle_event(&mut s.host, event))
        .collect();

    assert!(outcomes.last().unwrap().reordered());
    assert_eq!(s.order(), vec![s.b, s.c, s.a, s.d]);
}

impl Scene {
    fn drop_at_without_release(&mut self, panel_point: Point) {
        let screen = panel_point + PANEL_ORIGIN;
        self.host.set_pointer(screen);
        let outcome = self.panel.on_pointer_move(&mut self.host, screen);
        assert!(matches!(
            outcome.drag.map(|t| t.effect),
            Some(DragEffect::DragStarted { .. } | DragEffect::Moved { .. })
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tolerance
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn movement_below_tolerance_is_a_click(
        tolerance in 1i32..=30,
        fx in -1.0f64..1.0,
        fy in -1.0f64..1.0,
    ) {
        let config = DragConfig::default().with_tolerance(tolerance);
        let mut s = Scene::new();
        s.panel.enable_drag(config).unwrap();
        let before = s.order();

        let local = Point::new(50, 20);
        s.press(s.b, local);
        let down = s.host.screen_point_in(s.b, local).unwrap();
        let reach = f64::from(tolerance - 1);
        let wobble = down.offset((fx * reach) as i32, (fy * reach) as i32);
        let moved = s.panel.on_pointer_move(&mut s.host, wobble);
        let released = s.panel.on_pointer_up(&mut s.host, wobble);

        prop_assert!(moved.is_ignored());
        prop_assert_eq!(released.drag.map(|t| t.effect), Some(DragEffect::Clicked { item: s.b }));
        prop_assert_eq!(released.layout, None);
        prop_assert_eq!(s.order(), before);
        prop_assert_eq!(s.host.reparents(), 0);
        prop_assert_eq!(s.origin(s.b), Point::new(110, 5));
    }

    #[test]
    fn movement_at_tolerance_starts_a_drag(
        tolerance in 0i32..=30,
        horizontal in any::<bool>(),
        negative in any::<bool>(),
    ) {
        let mut s = Scene::new();
        s.panel.set_drag_tolerance(tolerance).unwrap();
        s.press(s.b, Point::new(50, 20));
        let down = s.host.screen_point_in(s.b, Point::new(50, 20)).unwrap();
        let step = if negative { -tolerance } else { tolerance };
        let target = if horizontal { down.offset(step, 0) } else { down.offset(0, step) };

        let moved = s.panel.on_pointer_move(&mut s.host, target);
        let is_started = matches!(
            moved.drag.map(|t| t.effect),
            Some(DragEffect::DragStarted { .. })
        );
        prop_assert!(is_started);
        prop_assert_eq!(s.host.surface_of(s.b), Some(Surface::Floating));
    }
}

#[test]
fn right_button_never_arms() {
    let mut s = Scene::new();
    let local = Point::new(10, 10);
    let outcome = s
        .panel
        .on_pointer_down(&mut s.host, s.a, local, PointerButton::Right);
    assert!(outcome.is_ignored());
    assert!(s.panel.drag_state().is_some_and(|state| state.is_idle()));
}

#[test]
fn configured_button_arms() {
    let mut s = Scene::with_panel(OrderedPanel::new().with_item_padding(5).draggable());
    s.panel
        .enable_drag(DragConfig::default().with_button(PointerButton::Right))
        .unwrap();
    let outcome = s
        .panel
        .on_pointer_down(&mut s.host, s.a, Point::new(1, 1), PointerButton::Right);
    assert!(matches!(
        outcome.drag.map(|t| t.effect),
        Some(DragEffect::Armed { .. })
    ));
}
