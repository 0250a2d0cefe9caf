//! Redraw scheduling hook
//!
//! Instruments never paint synchronously. A write only asks the hosting
//! toolkit for a repaint; the toolkit is free to coalesce several requests
//! into one frame.

use std::cell::Cell;
use std::rc::Rc;

/// Requests a repaint of the widget that owns an instrument
pub trait RedrawScheduler {
    fn request_redraw(&self);
}

impl<F: Fn()> RedrawScheduler for F {
    fn request_redraw(&self) {
        self()
    }
}

/// Scheduler for instruments that are not attached to a widget yet
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRedraw;

impl RedrawScheduler for NoRedraw {
    fn request_redraw(&self) {}
}

/// Counts redraw requests. Clones share one counter.
#[derive(Debug, Clone, Default)]
pub struct RedrawCounter {
    count: Rc<Cell<usize>>,
}

impl RedrawCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }
}

impl RedrawScheduler for RedrawCounter {
    fn request_redraw(&self) {
        self.count.set(self.count.get() + 1);
    }
}
