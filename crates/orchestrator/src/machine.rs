//! Sans-IO swap state machine.
//!
//! The machine never calls an adapter itself. `start` and `handle` return the
//! effects the host must perform, and the host feeds each adapter outcome
//! back as a [`PhaseEvent`]. Events that do not belong to the active phase
//! are dropped, so a late callback from an abandoned phase cannot move the
//! machine once it has failed or completed.

use swap_confirmation_types::{
    BroadcastError, CompletionResult, Device, DeviceError, Operation, SignedOperation,
    SwapRequest, SwapSession,
};
use tracing::{debug, info, warn};

use crate::adapters::{DeviceActionKind, InitSwapRequest, SignTransactionRequest};
use crate::error::SwapError;

/// Swap phases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Init,
    Sign,
    Broadcast,
}

impl Phase {
    /// Device action backing this phase; broadcasting needs no device
    pub fn device_action(&self) -> Option<DeviceActionKind> {
        match self {
            Phase::Init => Some(DeviceActionKind::InitSwap),
            Phase::Sign => Some(DeviceActionKind::SignTransaction),
            Phase::Broadcast => None,
        }
    }
}

/// Orchestrator state, one live instance per swap attempt
#[derive(Debug, Clone, PartialEq)]
pub enum OrchestratorState {
    AwaitingInit,

    /// Session from init, held until signing consumes it
    AwaitingSignature { session: SwapSession },

    /// Signed operation handed to the broadcaster
    AwaitingBroadcast { swap_id: String },

    Completed { result: CompletionResult },

    Failed { error: SwapError },
}

impl OrchestratorState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrchestratorState::Completed { .. } | OrchestratorState::Failed { .. }
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, OrchestratorState::Failed { error } if error.is_cancelled())
    }

    /// Phase whose output is awaited, if any
    pub fn phase(&self) -> Option<Phase> {
        match self {
            OrchestratorState::AwaitingInit => Some(Phase::Init),
            OrchestratorState::AwaitingSignature { .. } => Some(Phase::Sign),
            OrchestratorState::AwaitingBroadcast { .. } => Some(Phase::Broadcast),
            _ => None,
        }
    }
}

/// Outcome reported back to the machine
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseEvent {
    InitCompleted(Result<SwapSession, DeviceError>),
    SignCompleted(Result<SignedOperation, DeviceError>),
    BroadcastCompleted(Result<Operation, BroadcastError>),
    Cancelled,
}

/// Work the host performs on behalf of the machine
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    InitSwap {
        device: Device,
        request: InitSwapRequest,
    },
    SignTransaction {
        device: Device,
        request: SignTransactionRequest,
    },
    Broadcast(SignedOperation),
    DismissDeviceInteraction {
        device: Device,
        kind: DeviceActionKind,
    },
    Complete(CompletionResult),
    Fail(SwapError),
}

/// Drives one swap from request to a single terminal effect
#[derive(Debug)]
pub struct SwapStateMachine {
    request: SwapRequest,
    device: Option<Device>,
    app_name: String,
    state: OrchestratorState,
    /// Device init was issued on; set at most once
    issued_on: Option<Device>,
}

impl SwapStateMachine {
    pub fn new(request: SwapRequest, app_name: impl Into<String>) -> Self {
        let device = request.device.clone();
        Self {
            request,
            device,
            app_name: app_name.into(),
            state: OrchestratorState::AwaitingInit,
            issued_on: None,
        }
    }

    pub fn request(&self) -> &SwapRequest {
        &self.request
    }

    pub fn state(&self) -> &OrchestratorState {
        &self.state
    }

    pub fn device(&self) -> Option<&Device> {
        self.device.as_ref()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Whether a phase has been issued to an adapter
    pub fn has_started(&self) -> bool {
        self.issued_on.is_some()
    }

    /// Supply the device when the request carried none.
    ///
    /// Returns false when a device is already set or the swap has moved on.
    pub fn attach_device(&mut self, device: Device) -> bool {
        if self.device.is_some() || self.has_started() || self.is_terminal() {
            return false;
        }
        self.device = Some(device);
        true
    }

    /// Issue the init phase. A no-op without a device, once started, or
    /// after a terminal state.
    pub fn start(&mut self) -> Vec<Effect> {
        if self.has_started() || self.is_terminal() {
            debug!(state = ?self.state.phase(), "Swap already started, ignoring start");
            return Vec::new();
        }

        let Some(device) = self.device.clone() else {
            debug!(provider = %self.request.provider(), "No device connected, swap not started");
            return Vec::new();
        };

        self.issued_on = Some(device.clone());
        info!(
            provider = %self.request.provider(),
            fixed_rate = self.request.exchange_rate.is_fixed(),
            device_id = %device.device_id,
            phase = ?Phase::Init,
            "Starting swap init on device"
        );

        vec![Effect::InitSwap {
            device,
            request: InitSwapRequest {
                exchange: self.request.exchange.clone(),
                exchange_rate: self.request.exchange_rate.clone(),
                transaction: self.request.transaction.clone(),
            },
        }]
    }

    /// Cancel the swap; ignored once broadcasting or terminal
    pub fn cancel(&mut self) -> Vec<Effect> {
        self.handle(PhaseEvent::Cancelled)
    }

    /// Cancel in place of a device phase the host never performed.
    ///
    /// Nothing was shown on the device for that phase, so no dismiss effect
    /// is emitted.
    pub fn cancel_unissued(&mut self) -> Vec<Effect> {
        match self.state {
            OrchestratorState::AwaitingInit | OrchestratorState::AwaitingSignature { .. } => {
                warn!(phase = ?self.state.phase(), "Swap cancelled before device phase was issued");
                self.fail(SwapError::CancelledByUser)
            }
            _ => self.handle(PhaseEvent::Cancelled),
        }
    }

    /// Apply an adapter outcome or a cancellation
    pub fn handle(&mut self, event: PhaseEvent) -> Vec<Effect> {
        let state = std::mem::replace(&mut self.state, OrchestratorState::AwaitingInit);

        match (state, event) {
            (OrchestratorState::AwaitingInit, PhaseEvent::InitCompleted(result)) => {
                match (self.issued_on.clone(), result) {
                    (Some(device), Ok(session)) => self.begin_signing(device, session),
                    (Some(_), Err(e)) => self.fail(SwapError::Init(e)),
                    (None, result) => self.ignore(
                        OrchestratorState::AwaitingInit,
                        PhaseEvent::InitCompleted(result),
                    ),
                }
            }

            (
                OrchestratorState::AwaitingSignature { session },
                PhaseEvent::SignCompleted(result),
            ) => match result {
                Ok(signed) => {
                    info!(
                        swap_id = %session.swap_id,
                        operation_id = %signed.operation.id,
                        phase = ?Phase::Broadcast,
                        "Transaction signed, broadcasting"
                    );
                    self.state = OrchestratorState::AwaitingBroadcast {
                        swap_id: session.swap_id,
                    };
                    vec![Effect::Broadcast(signed)]
                }
                // the session is dropped with the state
                Err(e) => self.fail(SwapError::Sign(e)),
            },

            (
                OrchestratorState::AwaitingBroadcast { swap_id },
                PhaseEvent::BroadcastCompleted(result),
            ) => match result {
                Ok(operation) => {
                    let result = CompletionResult {
                        operation,
                        swap_id,
                        provider: self.request.exchange_rate.provider.clone(),
                    };
                    info!(
                        swap_id = %result.swap_id,
                        provider = %result.provider,
                        operation_hash = %result.operation.hash,
                        "Swap completed"
                    );
                    self.state = OrchestratorState::Completed {
                        result: result.clone(),
                    };
                    vec![Effect::Complete(result)]
                }
                Err(e) => self.fail(SwapError::Broadcast(e)),
            },

            (state @ OrchestratorState::AwaitingInit, PhaseEvent::Cancelled)
            | (state @ OrchestratorState::AwaitingSignature { .. }, PhaseEvent::Cancelled) => {
                let mut effects = Vec::new();
                if let (Some(device), Some(kind)) = (
                    self.issued_on.clone(),
                    state.phase().and_then(|p| p.device_action()),
                ) {
                    effects.push(Effect::DismissDeviceInteraction { device, kind });
                }
                warn!(phase = ?state.phase(), "Swap cancelled by user");
                effects.extend(self.fail(SwapError::CancelledByUser));
                effects
            }

            (state, event) => self.ignore(state, event),
        }
    }

    fn ignore(&mut self, state: OrchestratorState, event: PhaseEvent) -> Vec<Effect> {
        debug!(
            state = ?state.phase(),
            terminal = state.is_terminal(),
            event = event_name(&event),
            "Ignoring event outside its phase"
        );
        self.state = state;
        Vec::new()
    }

    fn begin_signing(&mut self, device: Device, session: SwapSession) -> Vec<Effect> {
        info!(
            swap_id = %session.swap_id,
            phase = ?Phase::Sign,
            "Swap initialized, requesting signature"
        );

        let exchange = &self.request.exchange;
        let request = SignTransactionRequest {
            status: self.request.status.clone(),
            token_currency: self.request.token_currency().cloned(),
            parent_account: exchange.from_parent_account.clone(),
            account: exchange.from_account.clone(),
            transaction: session.transaction.clone(),
            app_name: self.app_name.clone(),
        };

        self.state = OrchestratorState::AwaitingSignature { session };
        vec![Effect::SignTransaction { device, request }]
    }

    fn fail(&mut self, error: SwapError) -> Vec<Effect> {
        if !error.is_cancelled() {
            warn!(phase = ?error.phase(), error = %error, "Swap failed");
        }
        self.state = OrchestratorState::Failed {
            error: error.clone(),
        };
        vec![Effect::Fail(error)]
    }
}

fn event_name(event: &PhaseEvent) -> &'static str {
    match event {
        PhaseEvent::InitCompleted(_) => "init_completed",
        PhaseEvent::SignCompleted(_) => "sign_completed",
        PhaseEvent::BroadcastCompleted(_) => "broadcast_completed",
        PhaseEvent::Cancelled => "cancelled",
    }
}
