#![forbid(unsafe_code)]

//! Display ordering and flow layout.
//!
//! - [`OrderSequence`] - explicit display order, separate from paint order
//! - [`flow`] - left-to-right wrapping layout over an order and item sizes
//!
//! ```
//! use reflow_layout::{LayoutParams, OrderSequence, Size, flow};
//!
//! let mut order: OrderSequence<char> = "abcd".chars().collect();
//! order.move_to('a', 2);
//!
//! let plan = flow(
//!     &LayoutParams::new(320, 5),
//!     order.iter().map(|item| (item, Size::new(100, 40))),
//! );
//! assert_eq!(plan.placements[2].item, 'a');
//! assert_eq!(plan.rows, 2);
//! ```

pub mod flow;
pub mod order;

pub use flow::{FlowPlacement, FlowPlan, LayoutParams, flow};
pub use order::OrderSequence;
pub use reflow_core::geometry::{Point, Rect, Size};
