//! Synthetic telemetry for demos
//!
//! Sweeps the engine RPM between two limits so every part of the dial gets
//! exercised, with airspeed and heading following the same phase.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use g5_panel_types::{ParameterName, TelemetryBatch, TelemetryUpdateEntry};

use super::TelemetrySource;

/// Waveform of the sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SweepMode {
    #[default]
    Sine,
    Sawtooth,
    Triangle,
    Square,
}

impl SweepMode {
    /// Waveform value in 0.0..=1.0 at `elapsed` seconds into a `period`
    pub fn level(self, elapsed: f64, period: f64) -> f64 {
        let cycles = if period > 0.0 { elapsed / period } else { 0.0 };
        match self {
            SweepMode::Sine => {
                let phase = cycles * std::f64::consts::TAU;
                (phase.sin() + 1.0) / 2.0
            }
            SweepMode::Sawtooth => cycles.fract(),
            SweepMode::Triangle => {
                let phase = cycles.fract() * 2.0;
                if phase <= 1.0 {
                    phase
                } else {
                    2.0 - phase
                }
            }
            SweepMode::Square => {
                if cycles.fract() < 0.5 {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }
}

/// Configuration for the sweep source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub mode: SweepMode,
    pub min_rpm: f64,
    pub max_rpm: f64,
    /// Wave period in seconds
    pub period: f64,
    /// Uniform noise added to every RPM sample, +/- this many RPM
    pub jitter_rpm: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            mode: SweepMode::Sine,
            min_rpm: 700.0,
            max_rpm: 2700.0,
            period: 10.0,
            jitter_rpm: 0.0,
        }
    }
}

/// Telemetry source that sweeps the engine RPM
pub struct SweepSource {
    config: SweepConfig,
    start_time: Instant,
}

impl SweepSource {
    pub fn new(config: SweepConfig) -> Self {
        Self {
            config,
            start_time: Instant::now(),
        }
    }

    /// Batch for `elapsed` seconds after start
    pub fn batch_at(&self, elapsed: f64) -> TelemetryBatch {
        let config = &self.config;
        let level = config.mode.level(elapsed, config.period);

        let mut rpm = config.min_rpm + level * (config.max_rpm - config.min_rpm);
        if config.jitter_rpm > 0.0 {
            rpm += rand::thread_rng().gen_range(-config.jitter_rpm..=config.jitter_rpm);
        }

        let mut batch = TelemetryBatch::new();
        batch.insert(
            "0".to_string(),
            TelemetryUpdateEntry::new(rpm.round() as i64, ParameterName::EngineRpm.key(), "Engine RPM"),
        );
        batch.insert(
            "1".to_string(),
            TelemetryUpdateEntry::new(60.0 + level * 60.0, ParameterName::Kias.key(), "Indicated airspeed"),
        );
        batch.insert(
            "2".to_string(),
            TelemetryUpdateEntry::new((level * 360.0).floor(), ParameterName::MagHeading.key(), "Magnetic heading"),
        );
        batch
    }
}

impl TelemetrySource for SweepSource {
    fn name(&self) -> &str {
        "sweep"
    }

    fn next_batch(&mut self) -> Option<TelemetryBatch> {
        Some(self.batch_at(self.start_time.elapsed().as_secs_f64()))
    }
}
