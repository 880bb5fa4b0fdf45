use cosmwasm_schema::cw_serde;

/// Currency native to a chain (e.g., "bitcoin", "ethereum")
#[cw_serde]
#[serde(deny_unknown_fields)]
#[derive(Eq, Hash)]
pub struct CryptoCurrency {
    pub id: String,
    pub ticker: String,
    pub units: u32,
}

impl CryptoCurrency {
    pub fn new(id: impl Into<String>, ticker: impl Into<String>, units: u32) -> Self {
        Self {
            id: id.into(),
            ticker: ticker.into(),
            units,
        }
    }
}

/// Token issued on top of a parent chain (e.g., an ERC-20)
#[cw_serde]
#[serde(deny_unknown_fields)]
#[derive(Eq, Hash)]
pub struct TokenCurrency {
    pub id: String,
    pub ticker: String,
    pub contract_address: String,
    /// Currency id of the chain the token lives on
    pub parent_currency: String,
    pub units: u32,
}

/// Account holding a chain's native currency
#[cw_serde]
#[serde(deny_unknown_fields)]
pub struct MainAccount {
    pub id: String,
    pub currency: CryptoCurrency,
    pub fresh_address: String,
}

/// Token sub-account, always attached to a parent main account
#[cw_serde]
#[serde(deny_unknown_fields)]
pub struct TokenAccount {
    pub id: String,
    pub parent_id: String,
    pub token: TokenCurrency,
}

/// Any account that can act as the source or destination of a swap
#[cw_serde]
pub enum Account {
    Main(MainAccount),
    Token(TokenAccount),
}

impl Account {
    pub fn id(&self) -> &str {
        match self {
            Account::Main(account) => &account.id,
            Account::Token(account) => &account.id,
        }
    }

    /// Token traded by this account, only set for token accounts
    pub fn token_currency(&self) -> Option<&TokenCurrency> {
        match self {
            Account::Main(_) => None,
            Account::Token(account) => Some(&account.token),
        }
    }

    pub fn is_token_account(&self) -> bool {
        matches!(self, Account::Token(_))
    }
}

/// Resolve the main account owning the operation history of `account`.
///
/// A main account is its own main account. A token account resolves to
/// `parent` only when the parent is a main account whose id matches the
/// token's `parent_id`; any other parent resolves to nothing.
pub fn main_account<'a>(
    account: &'a Account,
    parent: Option<&'a Account>,
) -> Option<&'a MainAccount> {
    match (account, parent) {
        (Account::Main(main), _) => Some(main),
        (Account::Token(token), Some(Account::Main(main))) if token.parent_id == main.id => {
            Some(main)
        }
        _ => None,
    }
}
