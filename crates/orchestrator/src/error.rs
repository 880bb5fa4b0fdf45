use swap_confirmation_types::{BroadcastError, DeviceError};
use thiserror::Error;

use crate::machine::Phase;

/// Terminal swap failures.
///
/// Each variant carries the adapter's error value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapError {
    #[error("swap init failed: {0}")]
    Init(#[source] DeviceError),

    #[error("transaction signing failed: {0}")]
    Sign(#[source] DeviceError),

    #[error("broadcast failed: {0}")]
    Broadcast(#[source] BroadcastError),

    #[error("swap cancelled by user")]
    CancelledByUser,
}

impl SwapError {
    /// Phase that produced the error, `None` for cancellations
    pub fn phase(&self) -> Option<Phase> {
        match self {
            SwapError::Init(_) => Some(Phase::Init),
            SwapError::Sign(_) => Some(Phase::Sign),
            SwapError::Broadcast(_) => Some(Phase::Broadcast),
            SwapError::CancelledByUser => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SwapError::CancelledByUser)
    }
}

/// Builder error
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("missing required field: {field}")]
    MissingField { field: String },
}
