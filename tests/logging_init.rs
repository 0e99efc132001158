//! Global logging installation.
//!
//! Kept in its own test binary: `init` sets the process-wide subscriber, which
//! can happen only once per process.

use reinhardt_prod_settings::logging::{self, LoggingConfig, LoggingError};
use rstest::*;

/// Test: the first install succeeds and a second one reports the init failure
#[rstest]
fn test_second_init_reports_subscriber_init_failure() {
	// Arrange
	let config = LoggingConfig::production();

	// Act
	let first = logging::init(&config);
	let second = logging::init(&config);

	// Assert
	assert!(first.is_ok(), "{:?}", first);
	match second {
		Err(err @ LoggingError::SubscriberInit(_)) => {
			assert!(err.to_string().contains("global log subscriber"));
		}
		other => panic!("expected SubscriberInit, got {:?}", other),
	}
}
