//! Tracing setup for the swap confirmation flow
//!
//! [`init_tracing`] installs the global subscriber from [`LoggingConfig`];
//! [`ConfirmationSpan`] groups the log lines of one confirmation under a
//! correlation id.
//!
//! ```no_run
//! use swap_confirmation_config::LoggingConfig;
//! use swap_confirmation_telemetry::init_tracing;
//!
//! init_tracing(&LoggingConfig::default()).expect("tracing already installed");
//! ```
//!
//! [`LoggingConfig`]: swap_confirmation_config::LoggingConfig

mod tracing;

pub use crate::tracing::*;
