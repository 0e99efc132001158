//! Handler classes and their `tracing` layers
//!
//! Each handler named in the configuration mapping resolves, by its `class`
//! string, to a [`HandlerClass`] and is turned into one boxed layer carrying
//! its own level filter.

use super::LoggingError;
use super::config::{HandlerConfig, LoggingConfig};
use super::formatters::StructuredFormat;
use std::collections::HashSet;
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::registry::LookupSpan;

/// A boxed layer as produced by [`build_layers`]
pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Supported handler implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerClass {
	/// JSON entries for Cloud Logging ingestion
	StructuredLog,
	/// Plain text lines
	Stream,
}

impl HandlerClass {
	/// Every supported class, in declaration order
	pub const ALL: [HandlerClass; 2] = [HandlerClass::StructuredLog, HandlerClass::Stream];

	/// Dotted class name used in the configuration mapping
	pub fn class_name(&self) -> &'static str {
		match self {
			HandlerClass::StructuredLog => "google.cloud.logging.handlers.StructuredLogHandler",
			HandlerClass::Stream => "logging.StreamHandler",
		}
	}

	/// Resolve a dotted class name
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_prod_settings::logging::handlers::HandlerClass;
	///
	/// assert_eq!(
	///     HandlerClass::from_class_name("logging.StreamHandler"),
	///     Some(HandlerClass::Stream)
	/// );
	/// assert_eq!(HandlerClass::from_class_name("logging.FileHandler"), None);
	/// ```
	pub fn from_class_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|class| class.class_name() == name)
	}
}

/// Process stream a handler writes to when no writer is injected.
///
/// Structured entries go to stdout, plain text to stderr.
pub fn default_writer(class: HandlerClass) -> BoxMakeWriter {
	match class {
		HandlerClass::StructuredLog => BoxMakeWriter::new(std::io::stdout),
		HandlerClass::Stream => BoxMakeWriter::new(std::io::stderr),
	}
}

/// Effective threshold of a handler: the stricter of the root level and its own.
pub fn effective_filter(config: &LoggingConfig, handler: &HandlerConfig) -> LevelFilter {
	let root = config.root.level.to_level_filter();
	match handler.level {
		Some(level) => std::cmp::min(root, level.to_level_filter()),
		None => root,
	}
}

/// Build one layer per handler routed from the root logger.
///
/// Handlers defined but not routed are ignored; a handler routed twice is
/// attached once. `make_writer` chooses the output of each handler, receiving
/// the handler name and its class.
pub fn build_layers<S, W>(
	config: &LoggingConfig,
	mut make_writer: W,
) -> Result<Vec<BoxedLayer<S>>, LoggingError>
where
	S: Subscriber + for<'a> LookupSpan<'a> + 'static,
	W: FnMut(&str, HandlerClass) -> BoxMakeWriter,
{
	config.validate()?;

	let mut seen = HashSet::new();
	let mut layers = Vec::with_capacity(config.root.handlers.len());

	for name in &config.root.handlers {
		if !seen.insert(name.as_str()) {
			continue;
		}

		let handler = config
			.handlers
			.get(name)
			.ok_or_else(|| LoggingError::UnknownHandler(name.clone()))?;
		let class = HandlerClass::from_class_name(&handler.class).ok_or_else(|| {
			LoggingError::UnsupportedHandlerClass {
				handler: name.clone(),
				class: handler.class.clone(),
			}
		})?;
		let filter = effective_filter(config, handler);
		let writer = make_writer(name, class);

		let layer: BoxedLayer<S> = match class {
			HandlerClass::StructuredLog => fmt::layer()
				.event_format(StructuredFormat)
				.with_writer(writer)
				.with_filter(filter)
				.boxed(),
			HandlerClass::Stream => fmt::layer()
				.with_ansi(false)
				.with_target(true)
				.with_writer(writer)
				.with_filter(filter)
				.boxed(),
		};

		tracing::trace!(handler = %name, class = class.class_name(), level = %filter, "built log handler");
		layers.push(layer);
	}

	Ok(layers)
}
