//! Instrument trait

use anyhow::Result;
use cairo::Context;

use crate::{InstrumentState, TelemetryBatch, UpdateReport};

/// Trait for all instruments
///
/// An instrument owns an [`InstrumentState`] and paints it with Cairo. The
/// hosting widget calls [`Instrument::draw`] whenever the toolkit repaints.
pub trait Instrument {
    /// Unique identifier for this instrument type
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Natural size in pixels
    fn size_request(&self) -> (i32, i32);

    fn state(&self) -> &InstrumentState;

    fn state_mut(&mut self) -> &mut InstrumentState;

    /// Render the instrument
    fn draw(&self, cr: &Context, width: f64, height: f64) -> Result<()>;

    /// Feed a telemetry batch into the instrument state
    fn apply_updates(&mut self, batch: &TelemetryBatch) -> UpdateReport {
        self.state_mut().apply_updates(batch)
    }
}

/// Type-erased instrument for dynamic dispatch
pub type BoxedInstrument = Box<dyn Instrument>;
