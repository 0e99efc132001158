//! Record formatters
//!
//! [`StructuredFormat`] renders one JSON object per line using the field names
//! recognised by Google Cloud Logging agents, so each line becomes a
//! structured `jsonPayload` entry with the correct severity.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Key carrying the severity of an entry
pub const SEVERITY_KEY: &str = "severity";

/// Key carrying the human-readable message
pub const MESSAGE_KEY: &str = "message";

/// Key carrying the event timestamp
pub const TIME_KEY: &str = "time";

/// Key carrying the source location object
pub const SOURCE_LOCATION_KEY: &str = "logging.googleapis.com/sourceLocation";

/// Map a `tracing` level onto a Cloud Logging severity name.
///
/// # Examples
///
/// ```
/// use reinhardt_prod_settings::logging::formatters::severity;
/// use tracing::Level;
///
/// assert_eq!(severity(&Level::WARN), "WARNING");
/// assert_eq!(severity(&Level::TRACE), "DEBUG");
/// ```
pub fn severity(level: &Level) -> &'static str {
	match *level {
		Level::TRACE | Level::DEBUG => "DEBUG",
		Level::INFO => "INFO",
		Level::WARN => "WARNING",
		Level::ERROR => "ERROR",
	}
}

/// Build the structured entry for one event.
///
/// Event fields are copied to the top level; reserved keys produced by the
/// formatter itself win over event fields of the same name.
pub fn structured_entry(
	metadata: &Metadata<'_>,
	fields: Map<String, Value>,
	spans: &[&str],
	time: DateTime<Utc>,
) -> Value {
	let mut entry = Map::new();
	entry.insert(
		SEVERITY_KEY.to_string(),
		Value::String(severity(metadata.level()).to_string()),
	);

	let mut fields = fields;
	let message = fields
		.remove(MESSAGE_KEY)
		.unwrap_or_else(|| Value::String(String::new()));
	entry.insert(MESSAGE_KEY.to_string(), message);
	entry.insert(
		TIME_KEY.to_string(),
		Value::String(time.to_rfc3339_opts(SecondsFormat::Micros, true)),
	);

	let mut location = Map::new();
	if let Some(file) = metadata.file() {
		location.insert("file".to_string(), Value::String(file.to_string()));
	}
	if let Some(line) = metadata.line() {
		// int64 fields travel as strings in the Cloud Logging JSON mapping
		location.insert("line".to_string(), Value::String(line.to_string()));
	}
	location.insert(
		"function".to_string(),
		Value::String(metadata.target().to_string()),
	);
	entry.insert(SOURCE_LOCATION_KEY.to_string(), Value::Object(location));

	if !spans.is_empty() {
		entry.insert(
			"spans".to_string(),
			Value::Array(spans.iter().map(|s| Value::String(s.to_string())).collect()),
		);
	}

	for (key, value) in fields {
		entry.entry(key).or_insert(value);
	}

	Value::Object(entry)
}

/// Collects event fields into a JSON map
#[derive(Debug, Default)]
pub struct JsonVisitor {
	pub fields: Map<String, Value>,
}

impl Visit for JsonVisitor {
	fn record_f64(&mut self, field: &Field, value: f64) {
		let value = serde_json::Number::from_f64(value)
			.map(Value::Number)
			.unwrap_or_else(|| Value::String(value.to_string()));
		self.fields.insert(field.name().to_string(), value);
	}

	fn record_i64(&mut self, field: &Field, value: i64) {
		self.fields.insert(field.name().to_string(), Value::from(value));
	}

	fn record_u64(&mut self, field: &Field, value: u64) {
		self.fields.insert(field.name().to_string(), Value::from(value));
	}

	fn record_bool(&mut self, field: &Field, value: bool) {
		self.fields.insert(field.name().to_string(), Value::Bool(value));
	}

	fn record_str(&mut self, field: &Field, value: &str) {
		self.fields
			.insert(field.name().to_string(), Value::String(value.to_string()));
	}

	fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
		self.fields
			.insert(field.name().to_string(), Value::String(value.to_string()));
	}

	fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
		self.fields
			.insert(field.name().to_string(), Value::String(format!("{:?}", value)));
	}
}

/// One JSON object per event, shaped for Cloud Logging ingestion
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredFormat;

impl<S, N> FormatEvent<S, N> for StructuredFormat
where
	S: Subscriber + for<'a> LookupSpan<'a>,
	N: for<'a> FormatFields<'a> + 'static,
{
	fn format_event(
		&self,
		ctx: &FmtContext<'_, S, N>,
		mut writer: Writer<'_>,
		event: &Event<'_>,
	) -> fmt::Result {
		let mut visitor = JsonVisitor::default();
		event.record(&mut visitor);

		let spans: Vec<&str> = ctx
			.event_scope()
			.map(|scope| scope.from_root().map(|span| span.name()).collect())
			.unwrap_or_default();

		let entry = structured_entry(event.metadata(), visitor.fields, &spans, Utc::now());
		let line = serde_json::to_string(&entry).map_err(|_| fmt::Error)?;
		writeln!(writer, "{}", line)
	}
}
