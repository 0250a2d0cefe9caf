//! g5-panel-types: Shared data types for the g5-panel instrument cluster.
//!
//! This crate contains pure data types (parameter names, values, telemetry
//! records, colors) shared across all g5-panel crates. Nothing here depends
//! on GTK, so it is suitable as a foundation layer.

pub mod color;
pub mod parameter;
pub mod telemetry;
pub mod value;

// Re-export commonly used types at the crate root for convenience
pub use color::Color;
pub use parameter::{ParameterName, ParseParameterError};
pub use telemetry::{TelemetryBatch, TelemetryUpdateEntry};
pub use value::ParamValue;
