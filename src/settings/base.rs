//! Base settings shared by every profile

use super::Settings;
use super::env::{Env, EnvError};
use std::path::PathBuf;

/// Variable holding the signing key
pub const SECRET_KEY_VAR: &str = "SECRET_KEY";

/// Key used when `SECRET_KEY` is not exported; rejected by production validation
pub const DEVELOPMENT_SECRET_KEY: &str = "django-insecure-development-only-secret-key";

/// Get base settings
///
/// Development defaults: debug on, loopback hosts only, HTTPS hardening off,
/// console logging at `DEBUG`.
pub fn base_settings(env: &Env) -> Result<Settings, EnvError> {
	let secret_key = env.str_with_default(SECRET_KEY_VAR, Some(DEVELOPMENT_SECRET_KEY))?;
	let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

	let mut settings = Settings::new(base_dir, secret_key);
	settings.allowed_hosts = vec!["localhost".to_string(), "127.0.0.1".to_string()];
	Ok(settings)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::logging::LogLevel;
	use rstest::rstest;

	#[rstest]
	fn test_base_uses_development_defaults() {
		// Arrange
		let env = Env::from_vars(Vec::<(String, String)>::new());

		// Act
		let settings = base_settings(&env).unwrap();

		// Assert
		assert!(settings.debug);
		assert_eq!(settings.secret_key, DEVELOPMENT_SECRET_KEY);
		assert_eq!(settings.allowed_hosts, vec!["localhost", "127.0.0.1"]);
		assert!(!settings.secure_ssl_redirect);
		assert_eq!(settings.logging.root.level, LogLevel::Debug);
	}

	#[rstest]
	fn test_base_reads_secret_key() {
		let env = Env::from_vars([(SECRET_KEY_VAR, "from-the-environment")]);
		assert_eq!(base_settings(&env).unwrap().secret_key, "from-the-environment");
	}
}
