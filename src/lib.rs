//! g5-panel: telemetry-driven flight instrument gauges
//!
//! This library provides:
//! - Built-in instruments and their GTK binding
//! - Telemetry sources for running the panel standalone
//! - Configuration management
//! - Headless PNG snapshots

pub mod config;
pub mod displayers;
pub mod snapshot;
pub mod sources;

// Re-export commonly used types
pub use config::AppConfig;
pub use displayers::{EngineGauge, InstrumentWidget};
pub use g5_panel_core::{Instrument, InstrumentState, Registry};
