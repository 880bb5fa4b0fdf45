use std::collections::VecDeque;
use std::sync::Arc;

use swap_confirmation_types::{Device, SwapRequest, EXCHANGE_APP_NAME};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::adapters::{BroadcastAdapter, CompletionSink, DeviceActionAdapter};
use crate::error::BuilderError;
use crate::machine::{Effect, OrchestratorState, PhaseEvent, SwapStateMachine};

/// Configuration for the orchestrator
#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    /// Device app that signs swap transactions
    pub app_name: String,
}

impl OrchestratorConfig {
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            app_name: EXCHANGE_APP_NAME.to_string(),
        }
    }
}

/// Cancels a running swap from another task.
///
/// Only init and signing react to it. Once the signed operation is handed to
/// the broadcaster the swap runs to its broadcast outcome.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Builder for SwapOrchestrator
pub struct SwapOrchestratorBuilder {
    device_actions: Option<Arc<dyn DeviceActionAdapter>>,
    broadcaster: Option<Arc<dyn BroadcastAdapter>>,
    sink: Option<Arc<dyn CompletionSink>>,
    config: OrchestratorConfig,
}

impl SwapOrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            device_actions: None,
            broadcaster: None,
            sink: None,
            config: OrchestratorConfig::default(),
        }
    }

    /// Set the device action engine
    pub fn with_device_actions(mut self, device_actions: Arc<dyn DeviceActionAdapter>) -> Self {
        self.device_actions = Some(device_actions);
        self
    }

    /// Set the broadcaster
    pub fn with_broadcaster(mut self, broadcaster: Arc<dyn BroadcastAdapter>) -> Self {
        self.broadcaster = Some(broadcaster);
        self
    }

    /// Set the completion sink
    pub fn with_completion_sink(mut self, sink: Arc<dyn CompletionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Build an orchestrator for `request`, validating that all collaborators are set
    pub fn build(self, request: SwapRequest) -> Result<SwapOrchestrator, BuilderError> {
        let device_actions = self.device_actions.ok_or_else(|| BuilderError::MissingField {
            field: "device_actions".to_string(),
        })?;

        let broadcaster = self.broadcaster.ok_or_else(|| BuilderError::MissingField {
            field: "broadcaster".to_string(),
        })?;

        let sink = self.sink.ok_or_else(|| BuilderError::MissingField {
            field: "completion_sink".to_string(),
        })?;

        Ok(SwapOrchestrator::new(
            request,
            device_actions,
            broadcaster,
            sink,
            self.config,
        ))
    }
}

impl Default for SwapOrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Async driver running one swap through init, signing and broadcast.
///
/// At most one adapter call is outstanding at a time and the next phase is
/// only issued from the previous phase's result. The sink receives exactly one
/// terminal call.
pub struct SwapOrchestrator {
    machine: SwapStateMachine,
    device_actions: Arc<dyn DeviceActionAdapter>,
    broadcaster: Arc<dyn BroadcastAdapter>,
    sink: Arc<dyn CompletionSink>,
    cancel: CancelHandle,
}

impl SwapOrchestrator {
    pub fn builder() -> SwapOrchestratorBuilder {
        SwapOrchestratorBuilder::new()
    }

    pub fn new(
        request: SwapRequest,
        device_actions: Arc<dyn DeviceActionAdapter>,
        broadcaster: Arc<dyn BroadcastAdapter>,
        sink: Arc<dyn CompletionSink>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            machine: SwapStateMachine::new(request, config.app_name),
            device_actions,
            broadcaster,
            sink,
            cancel: CancelHandle::default(),
        }
    }

    pub fn state(&self) -> &OrchestratorState {
        self.machine.state()
    }

    pub fn request(&self) -> &SwapRequest {
        self.machine.request()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Supply the device when the request carried none
    pub fn attach_device(&mut self, device: Device) -> bool {
        self.machine.attach_device(device)
    }

    /// Run the swap until it reaches a terminal state.
    ///
    /// Returns immediately, without touching any adapter, when no device is
    /// attached yet; call again after [`attach_device`](Self::attach_device).
    pub async fn start(&mut self) -> &OrchestratorState {
        let effects = if self.cancel.is_cancelled() {
            self.machine.cancel()
        } else {
            self.machine.start()
        };
        self.drive(effects).await;
        self.machine.state()
    }

    /// Cancel while not running; a running swap is cancelled through
    /// [`CancelHandle`].
    pub async fn cancel(&mut self) -> &OrchestratorState {
        self.cancel.cancel();
        let effects = self.machine.cancel();
        self.drive(effects).await;
        self.machine.state()
    }

    async fn drive(&mut self, effects: Vec<Effect>) {
        let mut pending: VecDeque<Effect> = effects.into();
        while let Some(effect) = pending.pop_front() {
            pending.extend(self.execute(effect).await);
        }
    }

    async fn execute(&mut self, effect: Effect) -> Vec<Effect> {
        match effect {
            Effect::InitSwap { device, request } => {
                if self.cancel.is_cancelled() {
                    return self.machine.cancel_unissued();
                }
                let outcome = tokio::select! {
                    biased;
                    _ = self.cancel.token.cancelled() => PhaseEvent::Cancelled,
                    result = self.device_actions.init_swap(&device, request) => {
                        PhaseEvent::InitCompleted(result)
                    }
                };
                self.machine.handle(outcome)
            }
            Effect::SignTransaction { device, request } => {
                // cancelled while the previous phase was finishing
                if self.cancel.is_cancelled() {
                    return self.machine.cancel_unissued();
                }
                let outcome = tokio::select! {
                    biased;
                    _ = self.cancel.token.cancelled() => PhaseEvent::Cancelled,
                    result = self.device_actions.sign_transaction(&device, request) => {
                        PhaseEvent::SignCompleted(result)
                    }
                };
                self.machine.handle(outcome)
            }
            Effect::Broadcast(signed) => {
                let result = self.broadcaster.broadcast(signed).await;
                if self.cancel.is_cancelled() {
                    debug!("Cancellation requested after broadcast was issued, ignoring");
                }
                self.machine.handle(PhaseEvent::BroadcastCompleted(result))
            }
            Effect::DismissDeviceInteraction { device, kind } => {
                debug!(device_id = %device.device_id, kind = %kind, "Dismissing device interaction");
                self.device_actions.dismiss(&device, kind).await;
                Vec::new()
            }
            Effect::Complete(result) => {
                info!(swap_id = %result.swap_id, "Delivering swap result");
                self.sink.on_success(result).await;
                Vec::new()
            }
            Effect::Fail(error) => {
                self.sink.on_error(error).await;
                Vec::new()
            }
        }
    }
}
