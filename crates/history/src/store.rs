use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use swap_confirmation_types::Operation;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::SwapHistoryEntry;

// ═══════════════════════════════════════════════════════════════════════════
// CORE TYPES
// ═══════════════════════════════════════════════════════════════════════════

/// History kept for one main account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AccountHistory {
    pub account_id: String,
    /// Confirmed operations, newest first
    pub operations: Vec<Operation>,
    /// Broadcast but not yet confirmed, newest first
    pub pending_operations: Vec<Operation>,
    /// Swaps started from this account, newest first
    pub swap_history: Vec<SwapHistoryEntry>,
}

impl AccountHistory {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            ..Default::default()
        }
    }
}

/// Closure applied to an account's history in place of a read-modify-write
pub type AccountUpdater = Box<dyn FnOnce(AccountHistory) -> AccountHistory + Send>;

// ═══════════════════════════════════════════════════════════════════════════
// ERROR TYPES
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("account not found: {0}")]
    NotFound(String),

    #[error("duplicate account ID: {0}")]
    DuplicateId(String),
}

// ═══════════════════════════════════════════════════════════════════════════
// STORE TRAIT
// ═══════════════════════════════════════════════════════════════════════════

/// Account history storage
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Register a new account
    async fn insert(&self, history: AccountHistory) -> Result<(), StoreError>;

    async fn get(&self, account_id: &str) -> Result<Option<AccountHistory>, StoreError>;

    /// Apply `updater` to the account's history atomically
    async fn update_account(
        &self,
        account_id: &str,
        updater: AccountUpdater,
    ) -> Result<(), StoreError>;
}

// ═══════════════════════════════════════════════════════════════════════════
// IN-MEMORY STORE
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<String, AccountHistory>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, history: AccountHistory) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&history.account_id) {
            return Err(StoreError::DuplicateId(history.account_id));
        }
        accounts.insert(history.account_id.clone(), history);
        Ok(())
    }

    async fn get(&self, account_id: &str) -> Result<Option<AccountHistory>, StoreError> {
        Ok(self.accounts.read().await.get(account_id).cloned())
    }

    async fn update_account(
        &self,
        account_id: &str,
        updater: AccountUpdater,
    ) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        let history = accounts
            .remove(account_id)
            .ok_or_else(|| StoreError::NotFound(account_id.to_string()))?;

        let mut updated = updater(history);
        // the updater cannot move the history to another key
        updated.account_id = account_id.to_string();
        accounts.insert(account_id.to_string(), updated);
        Ok(())
    }
}
