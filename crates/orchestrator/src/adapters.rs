use async_trait::async_trait;
use swap_confirmation_types::{
    Account, BroadcastError, CompletionResult, Device, DeviceError, Exchange, ExchangeRate,
    Operation, SignedOperation, SwapSession, TokenCurrency, Transaction, TransactionStatus,
};

use crate::error::SwapError;

/// Device actions driven during a swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceActionKind {
    InitSwap,
    SignTransaction,
}

impl std::fmt::Display for DeviceActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceActionKind::InitSwap => write!(f, "init_swap"),
            DeviceActionKind::SignTransaction => write!(f, "sign_transaction"),
        }
    }
}

/// Payload for registering the swap on the device
#[derive(Debug, Clone, PartialEq)]
pub struct InitSwapRequest {
    pub exchange: Exchange,
    pub exchange_rate: ExchangeRate,
    pub transaction: Transaction,
}

/// Payload for signing the swap's payin transaction
#[derive(Debug, Clone, PartialEq)]
pub struct SignTransactionRequest {
    pub status: TransactionStatus,
    pub token_currency: Option<TokenCurrency>,
    pub parent_account: Option<Account>,
    pub account: Account,
    pub transaction: Transaction,
    /// Device app that must be open while signing
    pub app_name: String,
}

/// Hardware action engine.
///
/// Implementations own their retry and progress reporting; a returned error
/// is final for the phase that issued it.
#[async_trait]
pub trait DeviceActionAdapter: Send + Sync {
    async fn init_swap(
        &self,
        device: &Device,
        request: InitSwapRequest,
    ) -> Result<SwapSession, DeviceError>;

    async fn sign_transaction(
        &self,
        device: &Device,
        request: SignTransactionRequest,
    ) -> Result<SignedOperation, DeviceError>;

    /// Close the interaction surface of `kind`. Must not close the device
    /// connection itself.
    async fn dismiss(&self, device: &Device, kind: DeviceActionKind);
}

/// Network submission of signed operations
#[async_trait]
pub trait BroadcastAdapter: Send + Sync {
    async fn broadcast(&self, signed: SignedOperation) -> Result<Operation, BroadcastError>;
}

/// Receiver of the single terminal outcome of a swap
#[async_trait]
pub trait CompletionSink: Send + Sync {
    async fn on_success(&self, result: CompletionResult);

    async fn on_error(&self, error: SwapError);
}
