//! g5-panel-render: Cairo rendering functions for g5-panel gauges.

pub mod engine_gauge;
pub mod pango_text;
pub mod render_utils;

pub use engine_gauge::{needle_angle, render_engine_gauge, ArcZone, GaugeGeometry};
