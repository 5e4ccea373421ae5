#![forbid(unsafe_code)]

//! Core: geometry primitives and the notifications a host toolkit delivers
//! to a flow panel.

pub mod event;
pub mod geometry;
