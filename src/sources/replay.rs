//! Replay of recorded telemetry
//!
//! A replay file holds one JSON object per line, each a complete batch
//! (`{"<id>": {"value": .., "target": .., "label": ..}, ..}`). Blank lines
//! and lines starting with `#` are ignored.

use log::{info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

use g5_panel_types::TelemetryBatch;

use super::TelemetrySource;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read replay file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("replay file {0} contains no usable batches")]
    Empty(PathBuf),
}

/// Parse replay lines, skipping malformed ones
pub fn parse_replay(reader: impl BufRead) -> io::Result<Vec<TelemetryBatch>> {
    let mut batches = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match serde_json::from_str::<TelemetryBatch>(trimmed) {
            Ok(batch) => batches.push(batch),
            Err(e) => warn!("Skipping replay line {}: {}", index + 1, e),
        }
    }

    Ok(batches)
}

/// Telemetry source that plays back recorded batches in a loop
pub struct ReplaySource {
    name: String,
    batches: Vec<TelemetryBatch>,
    position: usize,
    looping: bool,
}

impl ReplaySource {
    pub fn from_batches(name: impl Into<String>, batches: Vec<TelemetryBatch>) -> Self {
        Self {
            name: name.into(),
            batches,
            position: 0,
            looping: true,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ReplayError> {
        let io_error = |source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        let batches = parse_replay(BufReader::new(file)).map_err(io_error)?;
        if batches.is_empty() {
            return Err(ReplayError::Empty(path.to_path_buf()));
        }

        info!("Loaded {} telemetry batches from {}", batches.len(), path.display());
        Ok(Self::from_batches(path.display().to_string(), batches))
    }

    /// Stop after the last batch instead of starting over
    pub fn play_once(mut self) -> Self {
        self.looping = false;
        self
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

impl TelemetrySource for ReplaySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_batch(&mut self) -> Option<TelemetryBatch> {
        if self.position >= self.batches.len() {
            if !self.looping || self.batches.is_empty() {
                return None;
            }
            self.position = 0;
        }
        let batch = self.batches[self.position].clone();
        self.position += 1;
        Some(batch)
    }
}
