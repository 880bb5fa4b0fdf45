use swap_confirmation_config::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TracingError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.level)?,
    };

    let json_layer = config.json.then(|| {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true)
            .json()
    });
    let text_layer = (!config.json).then(|| fmt::layer().with_target(true).with_level(true));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| TracingError::InitError(e.to_string()))?;

    Ok(())
}

/// Filter for the configured level
pub fn build_filter(level: &str) -> Result<EnvFilter, TracingError> {
    EnvFilter::try_new(level).map_err(|e| TracingError::InvalidFilter {
        directive: level.to_string(),
        reason: e.to_string(),
    })
}

/// Correlation ID for tracking one confirmation across components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationId(uuid::Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Span context for one swap confirmation
#[derive(Debug, Clone)]
pub struct ConfirmationSpan {
    pub correlation_id: CorrelationId,
    pub provider: String,
    pub from_account_id: String,
}

impl ConfirmationSpan {
    pub fn new(provider: impl Into<String>, from_account_id: impl Into<String>) -> Self {
        Self {
            correlation_id: CorrelationId::new(),
            provider: provider.into(),
            from_account_id: from_account_id.into(),
        }
    }

    pub fn span(&self) -> tracing::Span {
        tracing::info_span!(
            "swap_confirmation",
            correlation_id = %self.correlation_id,
            provider = %self.provider,
            from_account_id = %self.from_account_id,
        )
    }
}

/// Tracing error types
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("tracing initialization error: {0}")]
    InitError(String),

    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter { directive: String, reason: String },
}
