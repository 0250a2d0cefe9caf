//! Telemetry update records delivered by the simulator link

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One externally supplied parameter update.
///
/// The simulator link delivers these as positional tuples
/// `(value, _, dataref, target, frequency, label)`; this record names the
/// fields instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryUpdateEntry {
    /// Raw value as received
    pub value: Value,
    /// External key of the parameter this entry writes
    pub target: String,
    /// Human-readable description, used when reporting failures
    #[serde(default)]
    pub label: String,
    /// Simulator-side identifier the value was read from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataref: Option<String>,
    /// Requested update frequency in Hz
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u32>,
}

impl TelemetryUpdateEntry {
    pub fn new(value: impl Into<Value>, target: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            target: target.into(),
            label: label.into(),
            dataref: None,
            frequency: None,
        }
    }

    /// Label for failure reports, falling back to the target key
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.target
        } else {
            &self.label
        }
    }
}

/// A batch of updates keyed by an opaque telemetry id
pub type TelemetryBatch = BTreeMap<String, TelemetryUpdateEntry>;
