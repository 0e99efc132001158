//! Environment variable handling module
//!
//! Reads settings inputs either from the live process environment or from a
//! fixed snapshot of variables.

use indexmap::IndexMap;
use std::env;
use std::path::Path;

pub use super::env_parser::{parse_bool, parse_list, split_list};

/// Environment variable reader with prefix support
#[derive(Debug, Clone, Default)]
pub struct Env {
	/// Optional prefix for environment variables (e.g., "REINHARDT_")
	pub prefix: Option<String>,

	/// Snapshot consulted instead of the process environment when set
	vars: Option<IndexMap<String, String>>,
}

impl Env {
	/// Create a reader backed by the process environment
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a reader backed by a fixed set of variables.
	///
	/// The process environment is never consulted by the returned reader.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_prod_settings::settings::env::Env;
	///
	/// let env = Env::from_vars([("DJANGO_ALLOWED_HOSTS", "example.com")]);
	/// assert_eq!(env.str("DJANGO_ALLOWED_HOSTS").unwrap(), "example.com");
	/// assert!(env.str("HOME").is_err());
	/// ```
	pub fn from_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			prefix: None,
			vars: Some(
				vars.into_iter()
					.map(|(k, v)| (k.into(), v.into()))
					.collect(),
			),
		}
	}

	/// Set a prefix for all environment variable lookups
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	fn get_key_name(&self, key: &str) -> String {
		match &self.prefix {
			Some(prefix) => format!("{}{}", prefix, key),
			None => key.to_string(),
		}
	}

	/// Look up a variable, returning `Ok(None)` when it is not set.
	///
	/// Values that are not valid unicode are treated as unset.
	pub fn lookup(&self, key: &str) -> Result<Option<String>, EnvError> {
		let full_key = self.get_key_name(key);
		validate_env_var_name(&full_key)?;

		Ok(match &self.vars {
			Some(vars) => vars.get(&full_key).cloned(),
			None => env::var(&full_key).ok(),
		})
	}

	/// Read a string value from environment
	pub fn str(&self, key: &str) -> Result<String, EnvError> {
		self.str_with_default(key, None)
	}

	/// Read a string value with a default
	pub fn str_with_default(&self, key: &str, default: Option<&str>) -> Result<String, EnvError> {
		match (self.lookup(key)?, default) {
			(Some(val), _) => Ok(val),
			(None, Some(d)) => Ok(d.to_string()),
			(None, None) => Err(EnvError::MissingVariable(self.get_key_name(key))),
		}
	}

	/// Read a boolean value with a default
	pub fn bool_with_default(&self, key: &str, default: Option<bool>) -> Result<bool, EnvError> {
		match (self.lookup(key)?, default) {
			(Some(val), _) => parse_bool(&val).map_err(|e| EnvError::ParseError {
				key: self.get_key_name(key),
				value_len: val.len(),
				error: e,
			}),
			(None, Some(d)) => Ok(d),
			(None, None) => Err(EnvError::MissingVariable(self.get_key_name(key))),
		}
	}

	/// Read a trimmed list value (comma-separated, empty entries dropped)
	pub fn list_with_default(
		&self,
		key: &str,
		default: Option<Vec<String>>,
	) -> Result<Vec<String>, EnvError> {
		match (self.lookup(key)?, default) {
			(Some(val), _) => Ok(parse_list(&val)),
			(None, Some(d)) => Ok(d),
			(None, None) => Err(EnvError::MissingVariable(self.get_key_name(key))),
		}
	}

	/// Read a raw comma split of a variable, substituting `default` when unset.
	///
	/// See [`split_list`]: the result is never empty.
	pub fn split_with_default(&self, key: &str, default: &str) -> Result<Vec<String>, EnvError> {
		let raw = self.str_with_default(key, Some(default))?;
		Ok(split_list(&raw))
	}
}

/// Load a `.env` file into the process environment.
///
/// Variables already present in the environment are left untouched. A missing
/// file is not an error; `Ok(false)` is returned instead.
#[cfg(feature = "dotenv")]
pub fn load_dotenv(path: impl AsRef<Path>) -> Result<bool, EnvError> {
	let path = path.as_ref();
	if !path.exists() {
		tracing::debug!(path = %path.display(), "no .env file found");
		return Ok(false);
	}

	dotenv::from_path(path).map_err(|e| EnvError::InvalidFormat(e.to_string()))?;
	tracing::debug!(path = %path.display(), "loaded .env file");
	Ok(true)
}

/// Load a `.env` file into the process environment.
///
/// Built without the `dotenv` feature: always reports that nothing was loaded.
#[cfg(not(feature = "dotenv"))]
pub fn load_dotenv(path: impl AsRef<Path>) -> Result<bool, EnvError> {
	let _ = path.as_ref();
	Ok(false)
}

/// Validates an environment variable name.
///
/// Rejects names that are empty, contain control characters, or contain
/// the `=` character (which is used as the key-value separator).
pub fn validate_env_var_name(name: &str) -> Result<(), EnvError> {
	if name.is_empty() {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "environment variable name must not be empty".to_string(),
		});
	}

	if let Some(pos) = name.find(|c: char| c.is_control()) {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: format!(
				"environment variable name contains control character at position {}",
				pos
			),
		});
	}

	if name.contains('=') {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "environment variable name must not contain '='".to_string(),
		});
	}

	Ok(())
}

/// Environment variable errors
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
	#[error("Missing environment variable: {0}")]
	MissingVariable(String),

	#[error("Failed to parse environment variable '{key}' (value length: {value_len}): {error}")]
	ParseError {
		key: String,
		/// Length of the original value (stored instead of the raw value to prevent secret leakage)
		value_len: usize,
		error: String,
	},

	#[error("Invalid format: {0}")]
	InvalidFormat(String),

	#[error("Invalid environment variable name '{name}': {reason}")]
	InvalidVariableName { name: String, reason: String },
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_snapshot_lookup_ignores_process_env() {
		// Arrange
		let env = Env::from_vars([("ONLY_IN_SNAPSHOT", "1")]);

		// Act & Assert
		assert_eq!(env.lookup("ONLY_IN_SNAPSHOT").unwrap().as_deref(), Some("1"));
		assert_eq!(env.lookup("PATH").unwrap(), None);
	}

	#[rstest]
	fn test_str_with_default() {
		let env = Env::from_vars(Vec::<(String, String)>::new());
		assert_eq!(
			env.str_with_default("NONEXISTENT", Some("default")).unwrap(),
			"default"
		);
		assert!(matches!(
			env.str("NONEXISTENT").unwrap_err(),
			EnvError::MissingVariable(key) if key == "NONEXISTENT"
		));
	}

	#[rstest]
	fn test_prefix_is_applied() {
		let env = Env::from_vars([("REINHARDT_DEBUG", "true")]).with_prefix("REINHARDT_");
		assert!(env.bool_with_default("DEBUG", None).unwrap());
	}

	#[rstest]
	fn test_bool_parse_error_reports_length_only() {
		// Arrange
		let env = Env::from_vars([("FLAG", "sometimes")]);

		// Act
		let err = env.bool_with_default("FLAG", Some(false)).unwrap_err();

		// Assert
		let msg = err.to_string();
		assert!(msg.contains("value length: 9"));
		assert!(!msg.contains("sometimes"));
	}

	#[rstest]
	fn test_split_with_default_on_unset_variable() {
		let env = Env::from_vars(Vec::<(String, String)>::new());
		assert_eq!(env.split_with_default("HOSTS", "").unwrap(), vec![""]);
	}

	#[rstest]
	fn test_list_with_default_trims() {
		let env = Env::from_vars([("APPS", " a, b ,")]);
		assert_eq!(env.list_with_default("APPS", None).unwrap(), vec!["a", "b"]);
	}

	#[rstest]
	#[case("")]
	#[case("MY\x00VAR")]
	#[case("MY=VAR")]
	fn test_validate_env_var_name_rejects(#[case] name: &str) {
		assert!(matches!(
			validate_env_var_name(name).unwrap_err(),
			EnvError::InvalidVariableName { .. }
		));
	}

	#[rstest]
	fn test_validate_env_var_name_accepts_valid_name() {
		assert!(validate_env_var_name("DJANGO_ALLOWED_HOSTS").is_ok());
		assert!(validate_env_var_name("REINHARDT_ENV").is_ok());
	}

	#[rstest]
	fn test_load_dotenv_missing_file_is_not_an_error() {
		// Arrange
		let dir = tempfile::TempDir::new().unwrap();

		// Act
		let loaded = load_dotenv(dir.path().join(".env")).unwrap();

		// Assert
		assert!(!loaded);
	}
}
