//! Integration tests for the logging mapping wired into `tracing` layers.

use reinhardt_prod_settings::logging::config::CONSOLE_HANDLER;
use reinhardt_prod_settings::logging::handlers::{BoxedLayer, HandlerClass, build_layers};
use reinhardt_prod_settings::logging::testing::CaptureWriter;
use reinhardt_prod_settings::logging::{LogLevel, LoggingConfig, LoggingError};
use rstest::*;
use serde_json::Value;
use serial_test::serial;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

struct Sinks {
	stackdriver: CaptureWriter,
	console: CaptureWriter,
}

#[fixture]
fn sinks() -> Sinks {
	Sinks {
		stackdriver: CaptureWriter::new(),
		console: CaptureWriter::new(),
	}
}

fn layers(config: &LoggingConfig, sinks: &Sinks) -> Vec<BoxedLayer<Registry>> {
	build_layers(config, |name, _| {
		if name == CONSOLE_HANDLER {
			sinks.console.boxed()
		} else {
			sinks.stackdriver.boxed()
		}
	})
	.expect("production mapping should build")
}

/// Test: one event fans out to both handlers, each in its own format
#[rstest]
#[serial(logging)]
fn test_production_fan_out(sinks: Sinks) {
	// Arrange
	let _guard = tracing_subscriber::registry()
		.with(layers(&LoggingConfig::production(), &sinks))
		.set_default();

	// Act
	tracing::error!(status = 500_u64, "upstream failed");

	// Assert
	let structured = sinks.stackdriver.lines();
	assert_eq!(structured.len(), 1);
	let entry: Value = serde_json::from_str(&structured[0]).unwrap();
	assert_eq!(entry["severity"], "ERROR");
	assert_eq!(entry["message"], "upstream failed");
	assert_eq!(entry["status"], 500);

	let console = sinks.console.lines();
	assert_eq!(console.len(), 1);
	assert!(console[0].contains("ERROR"));
	assert!(console[0].contains("upstream failed"));
	assert!(serde_json::from_str::<Value>(&console[0]).is_err());
}

/// Test: INFO passes the root threshold, DEBUG does not
#[rstest]
#[serial(logging)]
fn test_root_threshold(sinks: Sinks) {
	// Arrange
	let _guard = tracing_subscriber::registry()
		.with(layers(&LoggingConfig::production(), &sinks))
		.set_default();

	// Act
	tracing::debug!("dropped");
	tracing::info!("kept");

	// Assert
	let structured = sinks.stackdriver.lines();
	assert_eq!(structured.len(), 1);
	assert!(structured[0].contains("kept"));
	assert_eq!(sinks.console.lines().len(), 1);
}

/// Test: a mapping read from JSON drives the same pipeline
#[rstest]
#[serial(logging)]
fn test_mapping_from_json_document(sinks: Sinks) {
	// Arrange
	let raw = r#"{
		"version": 1,
		"handlers": {
			"console": {"class": "logging.StreamHandler"}
		},
		"root": {"handlers": ["console"], "level": "WARNING"}
	}"#;
	let config: LoggingConfig = serde_json::from_str(raw).unwrap();
	let _guard = tracing_subscriber::registry()
		.with(layers(&config, &sinks))
		.set_default();

	// Act
	tracing::info!("below threshold");
	tracing::warn!("at threshold");

	// Assert
	assert_eq!(config.root.level, LogLevel::Warning);
	let console = sinks.console.lines();
	assert_eq!(console.len(), 1);
	assert!(console[0].contains("at threshold"));
	assert!(sinks.stackdriver.lines().is_empty());
}

/// Test: invalid mappings are rejected before any layer is built
#[rstest]
#[case::unknown_version(r#"{"version": 2, "handlers": {}, "root": {"handlers": [], "level": "INFO"}}"#)]
#[case::dangling_root(r#"{"version": 1, "handlers": {}, "root": {"handlers": ["console"], "level": "INFO"}}"#)]
#[case::unknown_class(r#"{"version": 1, "handlers": {"f": {"class": "logging.FileHandler"}}, "root": {"handlers": ["f"], "level": "INFO"}}"#)]
fn test_invalid_mappings(#[case] raw: &str) {
	// Arrange
	let config: LoggingConfig = serde_json::from_str(raw).unwrap();

	// Act
	let result = build_layers::<Registry, _>(&config, |_, class| {
		reinhardt_prod_settings::logging::handlers::default_writer(class)
	});

	// Assert
	assert!(matches!(
		result.err(),
		Some(
			LoggingError::UnsupportedVersion(_)
				| LoggingError::UnknownHandler(_)
				| LoggingError::UnsupportedHandlerClass { .. }
		)
	));
}

/// Test: an unknown level string fails deserialisation
#[rstest]
fn test_unknown_level_is_rejected() {
	let raw = r#"{"version": 1, "handlers": {}, "root": {"handlers": [], "level": "LOUD"}}"#;
	assert!(serde_json::from_str::<LoggingConfig>(raw).is_err());
	assert!(matches!(
		"LOUD".parse::<LogLevel>(),
		Err(LoggingError::UnknownLevel(_))
	));
}

/// Test: every handler class maps to the writer it was given
#[rstest]
fn test_writer_factory_sees_each_class_once() {
	// Arrange
	let mut seen = Vec::new();

	// Act
	let built = build_layers::<Registry, _>(&LoggingConfig::production(), |name, class| {
		seen.push((name.to_string(), class));
		CaptureWriter::new().boxed()
	})
	.unwrap();

	// Assert
	assert_eq!(built.len(), 2);
	assert_eq!(
		seen,
		vec![
			("stackdriver".to_string(), HandlerClass::StructuredLog),
			("console".to_string(), HandlerClass::Stream),
		]
	);
}
