use cosmwasm_schema::cw_serde;

use crate::{Device, Exchange, ExchangeRate, Operation, TokenCurrency, Transaction, TransactionStatus};

/// Everything needed to confirm a quoted swap
#[cw_serde]
#[serde(deny_unknown_fields)]
pub struct SwapRequest {
    pub exchange: Exchange,
    pub exchange_rate: ExchangeRate,
    pub transaction: Transaction,
    pub status: TransactionStatus,
    /// Connected device, if any
    pub device: Option<Device>,
}

impl SwapRequest {
    /// Token to sign for, derived from the source account.
    ///
    /// Only the sign phase carries this; swap init identifies the source
    /// through the exchange itself.
    pub fn token_currency(&self) -> Option<&TokenCurrency> {
        self.exchange.from_account.token_currency()
    }

    pub fn provider(&self) -> &str {
        &self.exchange_rate.provider
    }
}

/// Swap registered with the provider during device init
#[cw_serde]
pub struct SwapSession {
    pub swap_id: String,
    /// Transaction to sign, possibly revised by the provider (payin address, memo)
    pub transaction: Transaction,
}

/// Terminal result of a successful swap
#[cw_serde]
pub struct CompletionResult {
    /// Operation as confirmed by the broadcast
    pub operation: Operation,
    pub swap_id: String,
    pub provider: String,
}
