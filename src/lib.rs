//! Hardware-signed swap confirmation
//!
//! Runs a confirmed swap quote through device init, transaction signing and
//! broadcast, then records the broadcast operation in the source account's
//! history. The workspace crates are re-exported here; the functions below
//! wire them together from an [`AppConfig`].

use std::sync::Arc;

use tracing::Instrument;

pub use swap_confirmation_config as config;
pub use swap_confirmation_history as history;
pub use swap_confirmation_orchestrator as orchestrator;
pub use swap_confirmation_telemetry as telemetry;
pub use swap_confirmation_types as types;

use swap_confirmation_config::AppConfig;
use swap_confirmation_history::{
    AccountStore, HistoryCompletionSink, HistoryConfig, Navigator, SwapContext, SwapErrorHandler,
};
use swap_confirmation_orchestrator::{
    BroadcastAdapter, BuilderError, DeviceActionAdapter, OrchestratorConfig, OrchestratorState,
    SwapOrchestrator,
};
use swap_confirmation_telemetry::ConfirmationSpan;
use swap_confirmation_types::SwapRequest;

pub fn orchestrator_config(config: &AppConfig) -> OrchestratorConfig {
    OrchestratorConfig::default().with_app_name(config.device.app_name.clone())
}

pub fn history_config(config: &AppConfig) -> HistoryConfig {
    HistoryConfig {
        max_pending_operations: config.history.max_pending_operations,
    }
}

/// UI-side collaborators notified when a swap finishes
#[derive(Clone)]
pub struct HistoryServices {
    pub store: Arc<dyn AccountStore>,
    pub navigator: Arc<dyn Navigator>,
    pub error_handler: Arc<dyn SwapErrorHandler>,
}

/// Build an orchestrator whose completion sink records the swap in account history
pub fn history_orchestrator(
    request: SwapRequest,
    device_actions: Arc<dyn DeviceActionAdapter>,
    broadcaster: Arc<dyn BroadcastAdapter>,
    services: HistoryServices,
    config: &AppConfig,
) -> Result<SwapOrchestrator, BuilderError> {
    let sink = HistoryCompletionSink::new(
        SwapContext::from(&request),
        services.store,
        services.navigator,
        services.error_handler,
        history_config(config),
    );

    SwapOrchestrator::builder()
        .with_device_actions(device_actions)
        .with_broadcaster(broadcaster)
        .with_completion_sink(Arc::new(sink))
        .with_config(orchestrator_config(config))
        .build(request)
}

/// Drive `orchestrator` inside a span carrying a fresh correlation id
pub async fn run_confirmation(orchestrator: &mut SwapOrchestrator) -> OrchestratorState {
    let span = ConfirmationSpan::new(
        orchestrator.request().provider(),
        orchestrator.request().exchange.from_account.id(),
    );

    async { orchestrator.start().await.clone() }
        .instrument(span.span())
        .await
}
