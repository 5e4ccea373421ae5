//! Property-based invariant tests for the flow engine.
//!
//! 1. Idempotence: same inputs, same plan.
//! 2. Wrap correctness: an item that fits a row never overflows the
//!    container unless it is alone on its row.
//! 3. Rows are monotonic and start at the padding column.
//! 4. Scroll offset shifts y only.
//! 5. No panics on extreme inputs.

use proptest::prelude::*;
use reflow_layout::{LayoutParams, Size, flow};

fn sizes_strategy() -> impl Strategy<Value = Vec<Size>> {
    prop::collection::vec((0i32..=200, 0i32..=120).prop_map(|(w, h)| Size::new(w, h)), 0..60)
}

fn params_strategy() -> impl Strategy<Value = LayoutParams> {
    (0i32..=800, 0i32..=20, -300i32..=300)
        .prop_map(|(w, p, v)| LayoutParams::new(w, p).with_vertical_offset(v))
}

fn indexed(sizes: &[Size]) -> Vec<(usize, Size)> {
    sizes.iter().copied().enumerate().collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_idempotent(sizes in sizes_strategy(), params in params_strategy()) {
        let first = flow(&params, indexed(&sizes));
        let second = flow(&params, indexed(&sizes));
        prop_assert_eq!(first, second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Wrap correctness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fitting_items_stay_inside(sizes in sizes_strategy(), params in params_strategy()) {
        let plan = flow(&params, indexed(&sizes));
        let limit = params.container_width - 2 * params.padding;
        for placement in &plan.placements {
            let alone = plan.placements.iter().filter(|p| p.row == placement.row).count() == 1;
            if placement.size.width <= limit && !alone {
                prop_assert!(
                    placement.position.x + placement.size.width <= params.container_width,
                    "item {:?} overflows width {}",
                    placement,
                    params.container_width
                );
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Row structure
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rows_are_monotonic(sizes in sizes_strategy(), params in params_strategy()) {
        let plan = flow(&params, indexed(&sizes));
        let mut previous: Option<(usize, i32, i32)> = None;
        for placement in &plan.placements {
            if let Some((row, x, y)) = previous {
                if placement.row == row {
                    prop_assert!(placement.position.x >= x);
                    prop_assert_eq!(placement.position.y, y);
                } else {
                    prop_assert_eq!(placement.row, row + 1);
                    prop_assert_eq!(placement.position.x, params.padding);
                    prop_assert!(placement.position.y >= y);
                }
            } else {
                prop_assert_eq!(placement.row, 0);
                prop_assert_eq!(placement.position.x, params.padding);
            }
            previous = Some((placement.row, placement.position.x, placement.position.y));
        }
        let expected_rows = plan.placements.last().map_or(0, |p| p.row + 1);
        prop_assert_eq!(plan.rows, expected_rows);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Scroll offset
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scroll_only_shifts_y(sizes in sizes_strategy(), params in params_strategy()) {
        let unscrolled = flow(&params.with_vertical_offset(0), indexed(&sizes));
        let scrolled = flow(&params, indexed(&sizes));
        for (a, b) in unscrolled.placements.iter().zip(&scrolled.placements) {
            prop_assert_eq!(a.row, b.row);
            prop_assert_eq!(a.position.x, b.position.x);
            prop_assert_eq!(a.position.y - params.vertical_offset, b.position.y);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Extremes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn extreme_inputs_do_not_panic(
        sizes in prop::collection::vec((any::<i32>(), any::<i32>()).prop_map(|(w, h)| Size::new(w, h)), 0..20),
        width in any::<i32>(),
        padding in any::<i32>(),
        offset in any::<i32>(),
    ) {
        let params = LayoutParams::new(width, padding).with_vertical_offset(offset);
        let plan = flow(&params, indexed(&sizes));
        prop_assert_eq!(plan.placements.len(), sizes.len());
    }
}
