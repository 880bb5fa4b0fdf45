pub mod adapters;
pub mod error;
pub mod machine;
pub mod orchestrator;

#[cfg(test)]
mod fixtures;

// Re-export main types
pub use adapters::{
    BroadcastAdapter, CompletionSink, DeviceActionAdapter, DeviceActionKind, InitSwapRequest,
    SignTransactionRequest,
};
pub use error::{BuilderError, SwapError};
pub use machine::{Effect, OrchestratorState, Phase, PhaseEvent, SwapStateMachine};
pub use orchestrator::{CancelHandle, OrchestratorConfig, SwapOrchestrator, SwapOrchestratorBuilder};
