//! Shared constants for the application

/// Telemetry poll interval in milliseconds (20 Hz)
pub const DEFAULT_TELEMETRY_INTERVAL_MS: u64 = 50;
