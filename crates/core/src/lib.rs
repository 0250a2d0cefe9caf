//! g5-panel-core: Instrument state and update dispatch for g5-panel.
//!
//! This crate contains the parameter store every instrument is built on
//! (`InstrumentState`), the collaborators it is wired to at construction
//! (`RedrawScheduler`, `FaultSink`), the `Instrument` trait and the
//! instrument `Registry`.

pub mod constants;
mod error;
mod faults;
mod instrument;
mod instrument_state;
mod redraw;
mod registry;

pub use constants::DEFAULT_TELEMETRY_INTERVAL_MS;
pub use error::{InstrumentFault, UpdateError};
pub use faults::{FaultSink, LogFaultSink, RecordingFaultSink};
pub use instrument::{BoxedInstrument, Instrument};
pub use instrument_state::{InstrumentState, UpdateReport};
pub use redraw::{NoRedraw, RedrawCounter, RedrawScheduler};
pub use registry::{InstrumentFactory, InstrumentInfo, Registry};

// Re-export types used in trait signatures for convenience
pub use g5_panel_types::{ParamValue, ParameterName, TelemetryBatch, TelemetryUpdateEntry};
