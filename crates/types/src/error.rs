use thiserror::Error;

/// Failure reported by a device action (swap init or transaction signing)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("user refused on device")]
    UserRefused,

    #[error("device is locked")]
    DeviceLocked,

    #[error("wrong app opened on device: expected {expected}, found {found}")]
    WrongApp { expected: String, found: String },

    #[error("device disconnected")]
    Disconnected,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("swap provider error: {0}")]
    Provider(String),

    #[error("device action failed: {0}")]
    Other(String),
}

/// Failure reported when submitting a signed operation to the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastError {
    #[error("transaction rejected by network: {reason}")]
    Rejected { reason: String },

    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("broadcast failed: {0}")]
    Other(String),
}
