use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;
use rust_decimal::Decimal;

use crate::Account;

/// Source and destination of a swap
#[cw_serde]
#[serde(deny_unknown_fields)]
pub struct Exchange {
    pub from_account: Account,
    pub from_parent_account: Option<Account>,
    pub to_account: Account,
    pub to_parent_account: Option<Account>,
}

/// Whether the provider guarantees the quoted rate
#[cw_serde]
#[derive(Copy, Eq)]
pub enum TradeMethod {
    Fixed,
    Float,
}

/// Rate quote returned by a swap provider
#[cw_serde]
#[serde(deny_unknown_fields)]
pub struct ExchangeRate {
    /// Destination units per source unit, as string for serialization
    pub rate: String,

    /// Same rate with unit magnitudes applied
    pub magnitude_awareness_rate: String,

    /// Provider identifier (e.g., "changelly")
    pub provider: String,

    /// Provider-side quote id, present for fixed rates
    pub rate_id: Option<String>,

    pub trade_method: TradeMethod,

    /// Network fees deducted from the payout, in destination base units
    pub payout_network_fees: Option<Uint128>,
}

impl ExchangeRate {
    pub fn magnitude_awareness_rate_decimal(&self) -> Result<Decimal, rust_decimal::Error> {
        self.magnitude_awareness_rate.parse()
    }

    pub fn is_fixed(&self) -> bool {
        self.trade_method == TradeMethod::Fixed
    }
}
