//! Logging setup driven by the settings' logging mapping
//!
//! [`config::LoggingConfig`] describes handlers and root routing;
//! [`init`] turns it into a global `tracing` subscriber.

pub mod config;
pub mod formatters;
pub mod handlers;
pub mod testing;

use tracing_subscriber::Registry;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use config::{HandlerConfig, LogLevel, LoggingConfig, RootConfig};
pub use handlers::HandlerClass;

/// Logging configuration errors
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
	#[error("Unsupported logging configuration version: {0}")]
	UnsupportedVersion(u32),

	#[error("Root logger references undefined handler '{0}'")]
	UnknownHandler(String),

	#[error("Handler '{handler}' uses unsupported class '{class}'")]
	UnsupportedHandlerClass { handler: String, class: String },

	#[error("Unknown log level: {0}")]
	UnknownLevel(String),

	/// The global subscriber could not be installed: another subscriber is
	/// already set, or the `log` compatibility bridge failed to register.
	#[error("Failed to install the global log subscriber: {0}")]
	SubscriberInit(String),
}

/// Install a global subscriber built from `config`.
///
/// Fails if the mapping is invalid, or with [`LoggingError::SubscriberInit`] when a
/// global subscriber or `log` logger is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
	let layers = handlers::build_layers::<Registry, _>(config, |_, class| {
		handlers::default_writer(class)
	})?;

	tracing_subscriber::registry()
		.with(layers)
		.try_init()
		.map_err(|e| LoggingError::SubscriberInit(e.to_string()))?;

	tracing::debug!(
		handlers = ?config.root.handlers,
		level = %config.root.level,
		"logging initialized"
	);
	Ok(())
}
