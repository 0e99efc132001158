//! Configuration validation framework
//!
//! Provides validation rules and checks for settings to ensure security
//! and correctness before application startup.

use super::Settings;
use super::profile::Profile;
use serde_json::Value;
use std::collections::HashMap;

/// Validation result
pub type ValidationResult = Result<(), ValidationError>;

/// Minimum length accepted for a production `SECRET_KEY`
pub const MIN_SECRET_KEY_LENGTH: usize = 32;

/// Validation error
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
	#[error("Security error: {0}")]
	Security(String),

	#[error("Invalid value for '{key}': {message}")]
	InvalidValue { key: String, message: String },

	#[error("Missing required field: {0}")]
	MissingRequired(String),

	#[error("Multiple validation errors: {}", join_errors(.0))]
	Multiple(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
	errors
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("; ")
}

impl ValidationError {
	/// Flatten nested `Multiple` errors into their leaves
	pub fn flatten(&self) -> Vec<&ValidationError> {
		match self {
			ValidationError::Multiple(errors) => {
				errors.iter().flat_map(ValidationError::flatten).collect()
			}
			other => vec![other],
		}
	}
}

/// Trait for settings validators that can validate entire settings
pub trait SettingsValidator: Send + Sync {
	/// Validate the entire settings map
	fn validate_settings(&self, settings: &HashMap<String, Value>) -> ValidationResult;

	/// Get validator description
	fn description(&self) -> String;
}

fn collect(errors: Vec<ValidationError>) -> ValidationResult {
	if errors.is_empty() {
		Ok(())
	} else {
		Err(ValidationError::Multiple(errors))
	}
}

/// Required field validator
pub struct RequiredValidator {
	fields: Vec<String>,
}

impl RequiredValidator {
	/// Create a new required field validator
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_prod_settings::settings::validation::RequiredValidator;
	///
	/// let validator = RequiredValidator::new(vec![
	///     "secret_key".to_string(),
	///     "allowed_hosts".to_string(),
	/// ]);
	/// ```
	pub fn new(fields: Vec<String>) -> Self {
		Self { fields }
	}
}

impl SettingsValidator for RequiredValidator {
	fn validate_settings(&self, settings: &HashMap<String, Value>) -> ValidationResult {
		collect(
			self.fields
				.iter()
				.filter(|field| !settings.contains_key(field.as_str()))
				.map(|field| ValidationError::MissingRequired(field.clone()))
				.collect(),
		)
	}

	fn description(&self) -> String {
		format!("Required fields: {:?}", self.fields)
	}
}

/// Security validator for production environments
pub struct SecurityValidator {
	profile: Profile,
}

impl SecurityValidator {
	/// Create a new security validator for the given profile
	///
	/// Only [`Profile::Production`] is checked; other profiles always pass.
	pub fn new(profile: Profile) -> Self {
		Self { profile }
	}

	fn check_allowed_hosts(value: Option<&Value>, errors: &mut Vec<ValidationError>) {
		let Some(value) = value else {
			errors.push(ValidationError::Security(
				"ALLOWED_HOSTS must be set in production".to_string(),
			));
			return;
		};

		let Some(hosts) = value.as_array() else {
			errors.push(ValidationError::InvalidValue {
				key: "allowed_hosts".to_string(),
				message: "must be a list of host names".to_string(),
			});
			return;
		};

		if hosts.is_empty() {
			errors.push(ValidationError::Security(
				"ALLOWED_HOSTS must not be empty in production".to_string(),
			));
		}
		if hosts.iter().any(|h| h.as_str() == Some("*")) {
			errors.push(ValidationError::Security(
				"ALLOWED_HOSTS must be properly configured in production (no wildcards)"
					.to_string(),
			));
		}
		if hosts
			.iter()
			.any(|h| h.as_str().is_some_and(|s| s.trim().is_empty()))
		{
			errors.push(ValidationError::Security(
				"ALLOWED_HOSTS contains an empty entry; is DJANGO_ALLOWED_HOSTS set?".to_string(),
			));
		}
	}

	fn check_flag(
		settings: &HashMap<String, Value>,
		key: &str,
		expected: bool,
		errors: &mut Vec<ValidationError>,
	) {
		if settings.get(key).and_then(Value::as_bool) != Some(expected) {
			errors.push(ValidationError::Security(format!(
				"{} must be {} in production",
				key.to_uppercase(),
				expected
			)));
		}
	}
}

impl SettingsValidator for SecurityValidator {
	fn validate_settings(&self, settings: &HashMap<String, Value>) -> ValidationResult {
		if !self.profile.is_production() {
			return Ok(());
		}

		let mut errors = Vec::new();

		Self::check_flag(settings, "debug", false, &mut errors);

		if let Some(key_str) = settings.get("secret_key").and_then(Value::as_str)
			&& (key_str.contains("insecure")
				|| key_str == "change-this"
				|| key_str.len() < MIN_SECRET_KEY_LENGTH)
		{
			errors.push(ValidationError::Security(
				"SECRET_KEY must be a strong random value in production".to_string(),
			));
		}

		Self::check_allowed_hosts(settings.get("allowed_hosts"), &mut errors);

		Self::check_flag(settings, "secure_ssl_redirect", true, &mut errors);
		Self::check_flag(settings, "session_cookie_secure", true, &mut errors);
		Self::check_flag(settings, "csrf_cookie_secure", true, &mut errors);

		collect(errors)
	}

	fn description(&self) -> String {
		format!("Security validation for {} environment", self.profile)
	}
}

/// Run the production security checks against a settings value
pub fn validate_production(settings: &Settings) -> ValidationResult {
	let map = settings
		.to_map()
		.map_err(|e| ValidationError::InvalidValue {
			key: "settings".to_string(),
			message: e.to_string(),
		})?;
	SecurityValidator::new(Profile::Production).validate_settings(&map)
}
