//! Rendering layer: page panels and chart drawing.
//!
//! Everything here consumes the filtered subsets and view parameters produced
//! by the data layer; no filtering logic lives in the UI.

pub mod charts;
pub mod panels;
