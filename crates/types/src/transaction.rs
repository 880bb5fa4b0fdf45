use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;
use std::collections::BTreeMap;

/// Unsigned transaction prepared for the source account
#[cw_serde]
#[serde(deny_unknown_fields)]
pub struct Transaction {
    /// Coin family the transaction belongs to (e.g., "ethereum", "bitcoin")
    pub family: String,

    pub recipient: String,

    /// Amount in base units
    pub amount: Uint128,

    /// Send the whole spendable balance, ignoring `amount`
    pub use_all_amount: bool,

    pub fees: Option<Uint128>,

    /// Extra payload some families require (memo, tag, payload id)
    pub memo: Option<String>,
}

impl Transaction {
    pub fn new(family: impl Into<String>, recipient: impl Into<String>, amount: u128) -> Self {
        Self {
            family: family.into(),
            recipient: recipient.into(),
            amount: Uint128::new(amount),
            use_all_amount: false,
            fees: None,
            memo: None,
        }
    }

    pub fn with_fees(mut self, fees: u128) -> Self {
        self.fees = Some(Uint128::new(fees));
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }
}

/// Status computed for a transaction before it is signed
#[cw_serde]
#[serde(deny_unknown_fields)]
#[derive(Default)]
pub struct TransactionStatus {
    pub amount: Uint128,
    pub estimated_fees: Uint128,
    pub total_spent: Uint128,
    /// Blocking problems keyed by transaction field
    pub errors: BTreeMap<String, String>,
    pub warnings: BTreeMap<String, String>,
}

impl TransactionStatus {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
