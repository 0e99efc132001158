//! Logging configuration mapping
//!
//! Mirrors the `version` / `handlers` / `root` dictionary layout understood by
//! standard logging initializers, so the same document can be produced,
//! serialised and read back without translation.

use super::LoggingError;
use super::handlers::HandlerClass;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// The only configuration schema version accepted
pub const SCHEMA_VERSION: u32 = 1;

/// Name of the structured cloud handler in the production mapping
pub const STACKDRIVER_HANDLER: &str = "stackdriver";

/// Name of the plain console handler
pub const CONSOLE_HANDLER: &str = "console";

/// Record severity threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
	Debug,
	Info,
	#[serde(alias = "WARN")]
	Warning,
	Error,
	Critical,
}

impl LogLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			LogLevel::Debug => "DEBUG",
			LogLevel::Info => "INFO",
			LogLevel::Warning => "WARNING",
			LogLevel::Error => "ERROR",
			LogLevel::Critical => "CRITICAL",
		}
	}

	/// Most verbose `tracing` level admitted by this threshold.
	///
	/// `tracing` has no level above `ERROR`, so `CRITICAL` admits errors too.
	pub fn to_level_filter(self) -> LevelFilter {
		match self {
			LogLevel::Debug => LevelFilter::DEBUG,
			LogLevel::Info => LevelFilter::INFO,
			LogLevel::Warning => LevelFilter::WARN,
			LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
		}
	}
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for LogLevel {
	type Err = LoggingError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_uppercase().as_str() {
			"DEBUG" => Ok(LogLevel::Debug),
			"INFO" => Ok(LogLevel::Info),
			"WARNING" | "WARN" => Ok(LogLevel::Warning),
			"ERROR" => Ok(LogLevel::Error),
			"CRITICAL" => Ok(LogLevel::Critical),
			_ => Err(LoggingError::UnknownLevel(s.to_string())),
		}
	}
}

/// A single handler entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerConfig {
	/// Dotted name of the handler implementation
	#[serde(rename = "class")]
	pub class: String,

	/// Optional per-handler threshold, applied after the root level
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub level: Option<LogLevel>,
}

impl HandlerConfig {
	pub fn new(class: impl Into<String>) -> Self {
		Self {
			class: class.into(),
			level: None,
		}
	}

	pub fn with_level(mut self, level: LogLevel) -> Self {
		self.level = Some(level);
		self
	}
}

/// Root logger routing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfig {
	/// Handler names, in routing order
	pub handlers: Vec<String>,
	pub level: LogLevel,
}

/// The complete logging mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
	pub version: u32,
	pub handlers: IndexMap<String, HandlerConfig>,
	pub root: RootConfig,
}

impl LoggingConfig {
	/// Production mapping: structured cloud handler plus console, root at `INFO`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_prod_settings::logging::config::{LogLevel, LoggingConfig};
	///
	/// let config = LoggingConfig::production();
	/// assert_eq!(config.handlers.len(), 2);
	/// assert_eq!(config.root.handlers, vec!["stackdriver", "console"]);
	/// assert_eq!(config.root.level, LogLevel::Info);
	/// ```
	pub fn production() -> Self {
		let mut handlers = IndexMap::new();
		handlers.insert(
			STACKDRIVER_HANDLER.to_string(),
			HandlerConfig::new(HandlerClass::StructuredLog.class_name()),
		);
		handlers.insert(
			CONSOLE_HANDLER.to_string(),
			HandlerConfig::new(HandlerClass::Stream.class_name()),
		);

		Self {
			version: SCHEMA_VERSION,
			handlers,
			root: RootConfig {
				handlers: vec![STACKDRIVER_HANDLER.to_string(), CONSOLE_HANDLER.to_string()],
				level: LogLevel::Info,
			},
		}
	}

	/// Console-only mapping used by the base settings layer
	pub fn console(level: LogLevel) -> Self {
		let mut handlers = IndexMap::new();
		handlers.insert(
			CONSOLE_HANDLER.to_string(),
			HandlerConfig::new(HandlerClass::Stream.class_name()),
		);

		Self {
			version: SCHEMA_VERSION,
			handlers,
			root: RootConfig {
				handlers: vec![CONSOLE_HANDLER.to_string()],
				level,
			},
		}
	}

	/// Check the mapping before it is handed to [`super::init`].
	pub fn validate(&self) -> Result<(), LoggingError> {
		if self.version != SCHEMA_VERSION {
			return Err(LoggingError::UnsupportedVersion(self.version));
		}

		for (name, handler) in &self.handlers {
			HandlerClass::from_class_name(&handler.class).ok_or_else(|| {
				LoggingError::UnsupportedHandlerClass {
					handler: name.clone(),
					class: handler.class.clone(),
				}
			})?;
		}

		if let Some(missing) = self
			.root
			.handlers
			.iter()
			.find(|name| !self.handlers.contains_key(name.as_str()))
		{
			return Err(LoggingError::UnknownHandler(missing.clone()));
		}

		Ok(())
	}

	/// Serialise into a JSON value with the mapping's exact key layout
	pub fn to_value(&self) -> serde_json::Value {
		serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
	}
}
