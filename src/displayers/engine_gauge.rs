//! Engine RPM gauge instrument

use anyhow::Result;
use cairo::Context;

use g5_panel_core::{Instrument, InstrumentState};
use g5_panel_render::engine_gauge::{render_engine_gauge, GAUGE_HEIGHT, GAUGE_WIDTH};

/// Tachometer driven by the `engineRpm` parameter
pub struct EngineGauge {
    id: String,
    name: String,
    state: InstrumentState,
}

impl EngineGauge {
    pub fn new() -> Self {
        Self::with_state(InstrumentState::detached("EngineGauge"))
    }

    /// Build around a state wired to custom collaborators
    pub fn with_state(state: InstrumentState) -> Self {
        Self {
            id: "engine".to_string(),
            name: "Engine RPM".to_string(),
            state,
        }
    }

    /// Paint one frame from the current RPM
    pub fn render(&self, cr: &Context) -> Result<(), cairo::Error> {
        render_engine_gauge(cr, self.state.engine_rpm())
    }
}

impl Default for EngineGauge {
    fn default() -> Self {
        Self::new()
    }
}

impl Instrument for EngineGauge {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn size_request(&self) -> (i32, i32) {
        (GAUGE_WIDTH as i32, GAUGE_HEIGHT as i32)
    }

    fn state(&self) -> &InstrumentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut InstrumentState {
        &mut self.state
    }

    // The panel has a fixed layout; extra space stays unpainted
    fn draw(&self, cr: &Context, _width: f64, _height: f64) -> Result<()> {
        self.render(cr)
            .map_err(|e| anyhow::anyhow!("Failed to render engine gauge: {}", e))
    }
}
