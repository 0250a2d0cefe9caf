//! Built-in instruments
//!
//! Each instrument pairs an `InstrumentState` with a Cairo painter. Only the
//! engine gauge ships today; further gauges register the same way.

mod engine_gauge;
mod widget;

pub use engine_gauge::EngineGauge;
pub use widget::{InstrumentWidget, WidgetRedraw};

use g5_panel_core::Registry;

/// Register all built-in instruments
pub fn register_all(registry: &mut Registry) {
    registry.register_instrument("engine", "Engine RPM", || Box::new(EngineGauge::new()));
}
