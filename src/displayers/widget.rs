//! GTK binding for instruments

use gtk4::{glib, prelude::*, DrawingArea, Widget};
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;

use g5_panel_core::{BoxedInstrument, RedrawScheduler, TelemetryBatch, UpdateReport};

/// Asks GTK to repaint a drawing area. GTK merges requests made before the
/// next frame.
pub struct WidgetRedraw {
    area: glib::WeakRef<DrawingArea>,
}

impl WidgetRedraw {
    pub fn new(area: &DrawingArea) -> Self {
        Self {
            area: area.downgrade(),
        }
    }
}

impl RedrawScheduler for WidgetRedraw {
    fn request_redraw(&self) {
        if let Some(area) = self.area.upgrade() {
            area.queue_draw();
        }
    }
}

/// An instrument hosted in a `DrawingArea`
pub struct InstrumentWidget {
    instrument: Rc<RefCell<BoxedInstrument>>,
    area: DrawingArea,
}

impl InstrumentWidget {
    pub fn new(mut instrument: BoxedInstrument) -> Self {
        let area = DrawingArea::new();
        let (width, height) = instrument.size_request();
        area.set_size_request(width, height);
        area.set_content_width(width);
        area.set_content_height(height);

        instrument
            .state_mut()
            .set_redraw_scheduler(Box::new(WidgetRedraw::new(&area)));

        let instrument = Rc::new(RefCell::new(instrument));
        let instrument_for_draw = instrument.clone();
        area.set_draw_func(move |_, cr, width, height| {
            // Skip the frame if an update is in progress
            let Ok(instrument) = instrument_for_draw.try_borrow() else {
                return;
            };
            if let Err(e) = instrument.draw(cr, width as f64, height as f64) {
                warn!("{}: {}", instrument.name(), e);
            }
        });

        Self { instrument, area }
    }

    pub fn widget(&self) -> Widget {
        self.area.clone().upcast()
    }

    pub fn id(&self) -> String {
        self.instrument.borrow().id().to_string()
    }

    /// Feed a telemetry batch; `None` if the instrument is busy painting
    pub fn apply_updates(&self, batch: &TelemetryBatch) -> Option<UpdateReport> {
        let mut instrument = self.instrument.try_borrow_mut().ok()?;
        Some(instrument.apply_updates(batch))
    }
}
