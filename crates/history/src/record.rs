use cosmwasm_std::Uint128;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use swap_confirmation_types::{Exchange, ExchangeRate, Operation, Transaction, TransactionStatus};
use thiserror::Error;

use crate::AccountHistory;

/// Provider-side status of a recorded swap; a freshly broadcast swap is pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
}

/// Swap as shown in the source account's swap history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapHistoryEntry {
    pub swap_id: String,
    pub provider: String,
    /// Payin operation on the source account
    pub operation_id: String,
    pub status: SwapStatus,
    pub receiver_account_id: String,
    /// Destination token, when swapping into a token account
    pub token_id: Option<String>,
    pub from_amount: Uint128,
    /// Expected payout in destination base units
    pub to_amount: Uint128,
}

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("invalid exchange rate {rate}: {reason}")]
    InvalidRate { rate: String, reason: String },

    #[error("payout amount overflow for {from_amount} at rate {rate}")]
    AmountOverflow { from_amount: Uint128, rate: String },
}

/// Amount leaving the source account; a send-max uses the computed amount
pub fn swapped_amount(transaction: &Transaction, status: &TransactionStatus) -> Uint128 {
    if transaction.use_all_amount {
        status.amount
    } else {
        transaction.amount
    }
}

/// Payout in destination base units, truncated.
///
/// `magnitude_awareness_rate` already converts between base units, so no unit
/// scaling happens here.
pub fn payout_amount(from_amount: Uint128, rate: &ExchangeRate) -> Result<Uint128, RecordError> {
    let overflow = || RecordError::AmountOverflow {
        from_amount,
        rate: rate.magnitude_awareness_rate.clone(),
    };

    let magnitude_rate = rate
        .magnitude_awareness_rate_decimal()
        .map_err(|e| RecordError::InvalidRate {
            rate: rate.magnitude_awareness_rate.clone(),
            reason: e.to_string(),
        })?;

    if magnitude_rate.is_sign_negative() {
        return Err(RecordError::InvalidRate {
            rate: rate.magnitude_awareness_rate.clone(),
            reason: "rate must not be negative".to_string(),
        });
    }

    let from = Decimal::from_u128(from_amount.u128()).ok_or_else(overflow)?;
    let to = from.checked_mul(magnitude_rate).ok_or_else(overflow)?;
    let to = to.trunc().to_u128().ok_or_else(overflow)?;
    Ok(Uint128::new(to))
}

/// Build the history entry for a broadcast swap
pub fn swap_history_entry(
    exchange: &Exchange,
    exchange_rate: &ExchangeRate,
    transaction: &Transaction,
    status: &TransactionStatus,
    operation: &Operation,
    swap_id: &str,
) -> Result<SwapHistoryEntry, RecordError> {
    let from_amount = swapped_amount(transaction, status);
    let to_amount = payout_amount(from_amount, exchange_rate)?;

    Ok(SwapHistoryEntry {
        swap_id: swap_id.to_string(),
        provider: exchange_rate.provider.clone(),
        operation_id: operation.id.clone(),
        status: SwapStatus::Pending,
        receiver_account_id: exchange.to_account.id().to_string(),
        token_id: exchange.to_account.token_currency().map(|t| t.id.clone()),
        from_amount,
        to_amount,
    })
}

/// Prepend a swap to the account's history, replacing any entry with the same swap id
pub fn add_to_swap_history(mut history: AccountHistory, entry: SwapHistoryEntry) -> AccountHistory {
    history.swap_history.retain(|e| e.swap_id != entry.swap_id);
    history.swap_history.insert(0, entry);
    history
}

/// Prepend a pending operation, replacing any pending entry with the same
/// hash and keeping at most `max_pending` entries.
///
/// Operations already confirmed in the account are not re-added.
pub fn add_pending_operation(
    mut history: AccountHistory,
    operation: Operation,
    max_pending: usize,
) -> AccountHistory {
    if history.operations.iter().any(|op| op.hash == operation.hash) {
        return history;
    }

    history.pending_operations.retain(|op| op.hash != operation.hash);
    history.pending_operations.insert(0, operation);
    history.pending_operations.truncate(max_pending);
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use swap_confirmation_types::{
        Account, CryptoCurrency, MainAccount, OperationType, TokenAccount, TokenCurrency,
        TradeMethod,
    };

    fn make_rate(magnitude_rate: &str) -> ExchangeRate {
        ExchangeRate {
            rate: "0.05".to_string(),
            magnitude_awareness_rate: magnitude_rate.to_string(),
            provider: "changelly".to_string(),
            rate_id: None,
            trade_method: TradeMethod::Float,
            payout_network_fees: None,
        }
    }

    fn make_operation(hash: &str) -> Operation {
        Operation {
            id: format!("eth-1-{hash}-OUT"),
            hash: hash.to_string(),
            account_id: "eth-1".to_string(),
            operation_type: OperationType::Out,
            value: Uint128::new(1_000),
            fee: Uint128::new(21),
            senders: vec!["0xabc".to_string()],
            recipients: vec!["0xpayin".to_string()],
            block_height: None,
            date: 1_700_000_000,
        }
    }

    fn make_exchange(to_token: bool) -> Exchange {
        let eth = Account::Main(MainAccount {
            id: "eth-1".to_string(),
            currency: CryptoCurrency::new("ethereum", "ETH", 18),
            fresh_address: "0xabc".to_string(),
        });
        let to_account = if to_token {
            Account::Token(TokenAccount {
                id: "eth-1+usdc".to_string(),
                parent_id: "eth-1".to_string(),
                token: TokenCurrency {
                    id: "ethereum/erc20/usd__coin".to_string(),
                    ticker: "USDC".to_string(),
                    contract_address: "0xa0b8".to_string(),
                    parent_currency: "ethereum".to_string(),
                    units: 6,
                },
            })
        } else {
            Account::Main(MainAccount {
                id: "btc-1".to_string(),
                currency: CryptoCurrency::new("bitcoin", "BTC", 8),
                fresh_address: "bc1q".to_string(),
            })
        };

        Exchange {
            from_account: eth.clone(),
            from_parent_account: None,
            to_account,
            to_parent_account: if to_token { Some(eth) } else { None },
        }
    }

    #[test]
    fn test_payout_amount_truncates() {
        // 1.5 ETH at 0.05 BTC/ETH in base units
        let payout = payout_amount(
            Uint128::new(1_500_000_000_000_000_000),
            &make_rate("0.000000000005"),
        )
        .unwrap();
        assert_eq!(payout, Uint128::new(7_500_000));

        let truncated = payout_amount(Uint128::new(3), &make_rate("0.5")).unwrap();
        assert_eq!(truncated, Uint128::new(1));
    }

    #[test]
    fn test_payout_amount_rejects_bad_rates() {
        assert!(matches!(
            payout_amount(Uint128::new(10), &make_rate("abc")),
            Err(RecordError::InvalidRate { .. })
        ));
        assert!(matches!(
            payout_amount(Uint128::new(10), &make_rate("-1")),
            Err(RecordError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_payout_amount_overflow() {
        let result = payout_amount(Uint128::MAX, &make_rate("2"));
        assert!(matches!(result, Err(RecordError::AmountOverflow { .. })));
    }

    #[test]
    fn test_send_max_uses_status_amount() {
        let mut transaction = Transaction::new("ethereum", "0xpayin", 0);
        transaction.use_all_amount = true;
        let status = TransactionStatus {
            amount: Uint128::new(42),
            ..Default::default()
        };
        assert_eq!(swapped_amount(&transaction, &status), Uint128::new(42));

        let transaction = Transaction::new("ethereum", "0xpayin", 7);
        assert_eq!(swapped_amount(&transaction, &status), Uint128::new(7));
    }

    #[test]
    fn test_entry_records_destination_token() {
        let entry = swap_history_entry(
            &make_exchange(true),
            &make_rate("2"),
            &Transaction::new("ethereum", "0xpayin", 10),
            &TransactionStatus::default(),
            &make_operation("0x1"),
            "S1",
        )
        .unwrap();

        assert_eq!(entry.swap_id, "S1");
        assert_eq!(entry.status, SwapStatus::Pending);
        assert_eq!(entry.receiver_account_id, "eth-1+usdc");
        assert_eq!(entry.token_id.as_deref(), Some("ethereum/erc20/usd__coin"));
        assert_eq!(entry.operation_id, "eth-1-0x1-OUT");
        assert_eq!(entry.to_amount, Uint128::new(20));

        let entry = swap_history_entry(
            &make_exchange(false),
            &make_rate("2"),
            &Transaction::new("ethereum", "0xpayin", 10),
            &TransactionStatus::default(),
            &make_operation("0x1"),
            "S1",
        )
        .unwrap();
        assert!(entry.token_id.is_none());
    }

    #[test]
    fn test_pending_operation_replaces_same_hash() {
        let mut history = AccountHistory::new("eth-1");
        history = add_pending_operation(history, make_operation("0x1"), 10);
        history = add_pending_operation(history, make_operation("0x2"), 10);
        history = add_pending_operation(history, make_operation("0x1"), 10);

        let hashes: Vec<_> = history.pending_operations.iter().map(|op| op.hash.as_str()).collect();
        assert_eq!(hashes, vec!["0x1", "0x2"]);
    }

    #[test]
    fn test_pending_operations_bounded() {
        let mut history = AccountHistory::new("eth-1");
        for i in 0..5 {
            history = add_pending_operation(history, make_operation(&format!("0x{i}")), 3);
        }
        let hashes: Vec<_> = history.pending_operations.iter().map(|op| op.hash.as_str()).collect();
        assert_eq!(hashes, vec!["0x4", "0x3", "0x2"]);
    }

    #[test]
    fn test_confirmed_operation_not_added_as_pending() {
        let mut history = AccountHistory::new("eth-1");
        history.operations.push(make_operation("0x1"));
        let history = add_pending_operation(history, make_operation("0x1"), 10);
        assert!(history.pending_operations.is_empty());
    }

    #[test]
    fn test_swap_history_newest_first() {
        let entry = |id: &str| SwapHistoryEntry {
            swap_id: id.to_string(),
            provider: "changelly".to_string(),
            operation_id: "op".to_string(),
            status: SwapStatus::Pending,
            receiver_account_id: "btc-1".to_string(),
            token_id: None,
            from_amount: Uint128::new(1),
            to_amount: Uint128::new(1),
        };

        let mut history = AccountHistory::new("eth-1");
        history = add_to_swap_history(history, entry("S1"));
        history = add_to_swap_history(history, entry("S2"));
        history = add_to_swap_history(history, entry("S1"));

        let ids: Vec<_> = history.swap_history.iter().map(|e| e.swap_id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S2"]);
    }
}
