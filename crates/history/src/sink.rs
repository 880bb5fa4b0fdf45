use async_trait::async_trait;
use std::sync::Arc;
use swap_confirmation_orchestrator::{CompletionSink, SwapError};
use swap_confirmation_types::{
    main_account, CompletionResult, Exchange, ExchangeRate, SwapRequest, Transaction,
    TransactionStatus,
};
use tracing::{error, info, warn};

use crate::{
    add_pending_operation, add_to_swap_history, swap_history_entry, AccountStore, Navigator,
    Route, SwapErrorHandler,
};

/// Configuration for history recording
#[derive(Clone, Debug)]
pub struct HistoryConfig {
    /// Pending operations kept per account
    pub max_pending_operations: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_pending_operations: 100,
        }
    }
}

/// Swap being confirmed, as captured when the user confirmed the quote
#[derive(Debug, Clone)]
pub struct SwapContext {
    pub exchange: Exchange,
    pub exchange_rate: ExchangeRate,
    pub transaction: Transaction,
    pub status: TransactionStatus,
}

impl From<&SwapRequest> for SwapContext {
    fn from(request: &SwapRequest) -> Self {
        Self {
            exchange: request.exchange.clone(),
            exchange_rate: request.exchange_rate.clone(),
            transaction: request.transaction.clone(),
            status: request.status.clone(),
        }
    }
}

/// Completion sink recording a finished swap in the source account
pub struct HistoryCompletionSink {
    context: SwapContext,
    store: Arc<dyn AccountStore>,
    navigator: Arc<dyn Navigator>,
    error_handler: Arc<dyn SwapErrorHandler>,
    config: HistoryConfig,
}

impl HistoryCompletionSink {
    pub fn new(
        context: SwapContext,
        store: Arc<dyn AccountStore>,
        navigator: Arc<dyn Navigator>,
        error_handler: Arc<dyn SwapErrorHandler>,
        config: HistoryConfig,
    ) -> Self {
        Self {
            context,
            store,
            navigator,
            error_handler,
            config,
        }
    }
}

#[async_trait]
impl CompletionSink for HistoryCompletionSink {
    async fn on_success(&self, result: CompletionResult) {
        let exchange = &self.context.exchange;
        let Some(main) = main_account(&exchange.from_account, exchange.from_parent_account.as_ref())
        else {
            error!(
                swap_id = %result.swap_id,
                account_id = %exchange.from_account.id(),
                "No main account for swap source, skipping history"
            );
            return;
        };

        let entry = match swap_history_entry(
            exchange,
            &self.context.exchange_rate,
            &self.context.transaction,
            &self.context.status,
            &result.operation,
            &result.swap_id,
        ) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(swap_id = %result.swap_id, error = %e, "Swap history entry not recorded");
                None
            }
        };

        let operation = result.operation.clone();
        let max_pending = self.config.max_pending_operations;
        let updated = self
            .store
            .update_account(
                &main.id,
                Box::new(move |history| {
                    let history = match entry {
                        Some(entry) => add_to_swap_history(history, entry),
                        None => history,
                    };
                    add_pending_operation(history, operation, max_pending)
                }),
            )
            .await;

        match updated {
            Ok(()) => info!(
                swap_id = %result.swap_id,
                account_id = %main.id,
                operation_hash = %result.operation.hash,
                "Swap recorded as pending operation"
            ),
            Err(e) => error!(
                swap_id = %result.swap_id,
                account_id = %main.id,
                error = %e,
                "Failed to record swap in account history"
            ),
        }

        self.navigator.replace(Route::SwapPendingOperation {
            swap_id: result.swap_id,
            provider: result.provider,
        });
    }

    async fn on_error(&self, error: SwapError) {
        self.error_handler.on_error(error);
    }
}
