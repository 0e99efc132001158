//! Decision Table Tests for production settings validation.
//!
//! ## Host allow-list decision table
//!
//! | Profile      | DJANGO_ALLOWED_HOSTS | Secret key | Expected Result |
//! |--------------|----------------------|------------|-----------------|
//! | Production   | "example.com"        | strong     | PASS            |
//! | Production   | unset                | strong     | FAIL            |
//! | Production   | ""                   | strong     | FAIL            |
//! | Production   | "a.example,"         | strong     | FAIL            |
//! | Production   | "*"                  | strong     | FAIL            |
//! | Production   | "example.com"        | default    | FAIL            |
//! | Development  | unset                | default    | PASS            |
//! | Staging      | ""                   | default    | PASS            |

use reinhardt_prod_settings::settings::prelude::*;
use rstest::*;

const STRONG_KEY: &str = "production_secret_key_12345_ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn env_for(hosts: Option<&str>, strong_key: bool) -> Env {
	let mut vars = Vec::new();
	if let Some(h) = hosts {
		vars.push((ALLOWED_HOSTS_VAR.to_string(), h.to_string()));
	}
	if strong_key {
		vars.push(("SECRET_KEY".to_string(), STRONG_KEY.to_string()));
	}
	Env::from_vars(vars)
}

/// Test: Security Validator Decision Table
///
/// Why: the loader keeps `[""]` for a missing host list; validation is where
/// that misconfiguration must surface.
#[rstest]
#[case(Profile::Production, Some("example.com"), true, true)]
#[case(Profile::Production, None, true, false)]
#[case(Profile::Production, Some(""), true, false)]
#[case(Profile::Production, Some("a.example,"), true, false)]
#[case(Profile::Production, Some("*"), true, false)]
#[case(Profile::Production, Some("example.com"), false, false)]
#[case(Profile::Development, None, false, true)]
#[case(Profile::Staging, Some(""), false, true)]
fn test_security_validator_decision_table(
	#[case] profile: Profile,
	#[case] hosts: Option<&str>,
	#[case] strong_key: bool,
	#[case] should_pass: bool,
) {
	// Arrange
	let env = env_for(hosts, strong_key);
	let settings = Settings::for_profile(profile, &env).unwrap();
	let map = settings.to_map().unwrap();

	// Act
	let result = SecurityValidator::new(profile).validate_settings(&map);

	// Assert
	assert_eq!(
		result.is_ok(),
		should_pass,
		"profile={} hosts={:?} strong_key={} -> {:?}",
		profile,
		hosts,
		strong_key,
		result
	);
}

/// Test: the unset host list is reported as an empty entry, nothing else
#[rstest]
fn test_unset_hosts_reports_empty_entry_only() {
	// Arrange
	let settings = production_settings(&env_for(None, true)).unwrap();

	// Act
	let err = validate_production(&settings).unwrap_err();

	// Assert
	let leaves = err.flatten();
	assert_eq!(leaves.len(), 1, "{}", err);
	assert!(leaves[0].to_string().contains("empty entry"));
}

/// Test: a production layer built from a correct environment passes as a whole
#[rstest]
fn test_hardened_production_passes() {
	let settings = production_settings(&env_for(Some("example.com,api.example.com"), true)).unwrap();
	assert!(validate_production(&settings).is_ok());
	assert!(settings.logging.validate().is_ok());
}

/// Test: base settings fail production validation on every hardening flag
#[rstest]
fn test_base_layer_fails_production_checks() {
	// Arrange
	let settings = base_settings(&env_for(None, true)).unwrap();

	// Act
	let err = validate_production(&settings).unwrap_err();

	// Assert
	let messages: Vec<String> = err.flatten().iter().map(|e| e.to_string()).collect();
	for expected in [
		"DEBUG",
		"SECURE_SSL_REDIRECT",
		"SESSION_COOKIE_SECURE",
		"CSRF_COOKIE_SECURE",
	] {
		assert!(
			messages.iter().any(|m| m.contains(expected)),
			"missing {} in {:?}",
			expected,
			messages
		);
	}
}
