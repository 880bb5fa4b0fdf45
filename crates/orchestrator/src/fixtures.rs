//! Shared swap fixtures for unit tests

use cosmwasm_std::{Binary, Uint128};
use swap_confirmation_types::{
    Account, CryptoCurrency, Device, DeviceModel, Exchange, ExchangeRate, MainAccount, Operation,
    OperationType, SignedOperation, SwapRequest, SwapSession, TokenAccount, TokenCurrency,
    TradeMethod, Transaction, TransactionStatus,
};

pub fn make_device() -> Device {
    Device::new("nano-x-01", DeviceModel::NanoX, false)
}

pub fn make_eth_account() -> Account {
    Account::Main(MainAccount {
        id: "js:2:ethereum:0xabc:".to_string(),
        currency: CryptoCurrency::new("ethereum", "ETH", 18),
        fresh_address: "0xabc".to_string(),
    })
}

pub fn make_usdt_account() -> Account {
    Account::Token(TokenAccount {
        id: "js:2:ethereum:0xabc:+usdt".to_string(),
        parent_id: "js:2:ethereum:0xabc:".to_string(),
        token: TokenCurrency {
            id: "ethereum/erc20/usd_tether__erc20_".to_string(),
            ticker: "USDT".to_string(),
            contract_address: "0xdac17f958d2ee523a2206206994597c13d831ec7".to_string(),
            parent_currency: "ethereum".to_string(),
            units: 6,
        },
    })
}

pub fn make_btc_account() -> Account {
    Account::Main(MainAccount {
        id: "js:2:bitcoin:xpub:".to_string(),
        currency: CryptoCurrency::new("bitcoin", "BTC", 8),
        fresh_address: "bc1qrecipient".to_string(),
    })
}

pub fn make_rate() -> ExchangeRate {
    ExchangeRate {
        rate: "0.05".to_string(),
        magnitude_awareness_rate: "0.000000000005".to_string(),
        provider: "changelly".to_string(),
        rate_id: Some("rate-42".to_string()),
        trade_method: TradeMethod::Fixed,
        payout_network_fees: Some(Uint128::new(1_000)),
    }
}

pub fn make_request(from_token: bool, device: Option<Device>) -> SwapRequest {
    let (from_account, from_parent_account) = if from_token {
        (make_usdt_account(), Some(make_eth_account()))
    } else {
        (make_eth_account(), None)
    };

    SwapRequest {
        exchange: Exchange {
            from_account,
            from_parent_account,
            to_account: make_btc_account(),
            to_parent_account: None,
        },
        exchange_rate: make_rate(),
        transaction: Transaction::new("ethereum", "0xplaceholder", 1_000_000),
        status: TransactionStatus::default(),
        device,
    }
}

/// Transaction as revised by the provider during init
pub fn make_revised_transaction() -> Transaction {
    Transaction::new("ethereum", "0xpayin", 1_000_000)
        .with_fees(21_000)
        .with_memo("swap-S1")
}

pub fn make_session(swap_id: &str) -> SwapSession {
    SwapSession {
        swap_id: swap_id.to_string(),
        transaction: make_revised_transaction(),
    }
}

pub fn make_operation(hash: &str) -> Operation {
    Operation {
        id: format!("js:2:ethereum:0xabc:-{hash}-OUT"),
        hash: hash.to_string(),
        account_id: "js:2:ethereum:0xabc:".to_string(),
        operation_type: OperationType::Out,
        value: Uint128::new(1_000_000),
        fee: Uint128::new(21_000),
        senders: vec!["0xabc".to_string()],
        recipients: vec!["0xpayin".to_string()],
        block_height: None,
        date: 1_700_000_000,
    }
}

pub fn make_signed(hash: &str) -> SignedOperation {
    SignedOperation {
        operation: make_operation(hash),
        signature: Binary::from(vec![0xf8, 0x6b, 0x01]),
        expiration_date: None,
    }
}
