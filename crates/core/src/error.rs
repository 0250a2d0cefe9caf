//! Error types for instrument updates

use g5_panel_types::{ParamValue, ParseParameterError};
use thiserror::Error;

/// Why a single parameter write was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UpdateError {
    #[error(transparent)]
    UnknownParameter(#[from] ParseParameterError),

    #[error("`{target}` expects a number or boolean, got {found}")]
    TypeMismatch { target: String, found: String },
}

/// Faults an instrument reports to its [`FaultSink`](crate::FaultSink).
///
/// None of these are fatal: the instrument keeps rendering its last good
/// state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstrumentFault {
    #[error("failed to set value {label}: {source}")]
    Update {
        key: String,
        label: String,
        #[source]
        source: UpdateError,
    },

    #[error("failed to decode nav type {code}")]
    NavTypeDecode { code: ParamValue },
}
