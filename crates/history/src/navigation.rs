use swap_confirmation_orchestrator::SwapError;

/// Screens the swap flow can move to once it finishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    SwapPendingOperation { swap_id: String, provider: String },
}

/// Navigation owned by the UI layer
pub trait Navigator: Send + Sync {
    /// Replace the current screen with `route`
    fn replace(&self, route: Route);
}

/// Error callback owned by the UI layer.
///
/// Receives the swap error exactly as the orchestrator reported it.
pub trait SwapErrorHandler: Send + Sync {
    fn on_error(&self, error: SwapError);
}
