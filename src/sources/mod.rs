//! Built-in telemetry sources
//!
//! The simulator link that feeds a real cockpit lives outside this crate.
//! These sources drive the panel standalone: a synthetic sweep for demos and
//! a JSON-lines replay of recorded batches.

mod replay;
mod sweep;

pub use replay::{parse_replay, ReplayError, ReplaySource};
pub use sweep::{SweepConfig, SweepMode, SweepSource};

use g5_panel_types::TelemetryBatch;

/// Produces telemetry batches on demand
pub trait TelemetrySource {
    /// Human-readable name for logs
    fn name(&self) -> &str;

    /// Next batch to deliver, or `None` when the source has nothing to send
    fn next_batch(&mut self) -> Option<TelemetryBatch>;
}
