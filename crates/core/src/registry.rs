//! Registry of instrument types

use anyhow::{anyhow, Result};
use std::collections::HashMap;

use crate::BoxedInstrument;

/// Function that creates an instrument
pub type InstrumentFactory = fn() -> BoxedInstrument;

/// Registered instrument type
#[derive(Debug, Clone)]
pub struct InstrumentInfo {
    pub id: String,
    pub display_name: String,
}

struct Entry {
    display_name: String,
    factory: InstrumentFactory,
}

/// Registry for instruments
///
/// Built-in instruments are registered once at startup; the configuration
/// then names the ones to show by id.
#[derive(Default)]
pub struct Registry {
    instruments: HashMap<String, Entry>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instrument
    pub fn register_instrument(&mut self, id: &str, display_name: &str, factory: InstrumentFactory) {
        self.instruments.insert(
            id.to_string(),
            Entry {
                display_name: display_name.to_string(),
                factory,
            },
        );
    }

    /// Create an instrument by ID
    pub fn create_instrument(&self, id: &str) -> Result<BoxedInstrument> {
        let entry = self
            .instruments
            .get(id)
            .ok_or_else(|| anyhow!("Unknown instrument: {}", id))?;
        Ok((entry.factory)())
    }

    /// List all registered instruments, sorted by ID
    pub fn list_instruments(&self) -> Vec<InstrumentInfo> {
        let mut list: Vec<_> = self
            .instruments
            .iter()
            .map(|(id, entry)| InstrumentInfo {
                id: id.clone(),
                display_name: entry.display_name.clone(),
            })
            .collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    }
}
