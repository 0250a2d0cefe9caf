//! Fault reporting collaborators
//!
//! Each instrument receives its sink at construction instead of reaching for
//! a global logger, so tests can observe exactly what was reported.

use log::error;
use std::cell::RefCell;
use std::rc::Rc;

use crate::InstrumentFault;

/// Receives non-fatal instrument faults
pub trait FaultSink {
    fn report(&self, fault: &InstrumentFault);
}

/// Writes faults to the `log` facade at error level
#[derive(Debug, Clone)]
pub struct LogFaultSink {
    owner: String,
}

impl LogFaultSink {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
        }
    }
}

impl FaultSink for LogFaultSink {
    fn report(&self, fault: &InstrumentFault) {
        error!("{}: {}", self.owner, fault);
    }
}

/// Keeps every reported fault. Clones share one list.
#[derive(Debug, Clone, Default)]
pub struct RecordingFaultSink {
    faults: Rc<RefCell<Vec<InstrumentFault>>>,
}

impl RecordingFaultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn faults(&self) -> Vec<InstrumentFault> {
        self.faults.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.faults.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.faults.borrow().is_empty()
    }
}

impl FaultSink for RecordingFaultSink {
    fn report(&self, fault: &InstrumentFault) {
        self.faults.borrow_mut().push(fault.clone());
    }
}
