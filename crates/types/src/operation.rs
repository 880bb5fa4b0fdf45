use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint128};

#[cw_serde]
#[derive(Copy, Eq)]
pub enum OperationType {
    In,
    Out,
    FeesOnly,
}

/// Operation recorded in an account's history
#[cw_serde]
#[serde(deny_unknown_fields)]
pub struct Operation {
    pub id: String,
    pub hash: String,
    pub account_id: String,
    pub operation_type: OperationType,
    pub value: Uint128,
    pub fee: Uint128,
    pub senders: Vec<String>,
    pub recipients: Vec<String>,
    /// Unset until the operation is included in a block
    pub block_height: Option<u64>,
    /// Unix timestamp (seconds)
    pub date: u64,
}

impl Operation {
    pub fn is_confirmed(&self) -> bool {
        self.block_height.is_some()
    }
}

/// Transaction signed by the device, ready to broadcast
#[cw_serde]
#[serde(deny_unknown_fields)]
pub struct SignedOperation {
    /// Optimistic view of the operation that broadcasting will produce
    pub operation: Operation,

    /// Serialized signed transaction
    pub signature: Binary,

    /// Some chains bound how long a signature stays valid
    pub expiration_date: Option<u64>,
}
