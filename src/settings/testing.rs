//! Testing utilities for settings
//!
//! Provides an isolated process environment for tests that exercise
//! [`Env::new`](super::env::Env::new) or `.env` loading.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment helper
///
/// Every variable touched through this helper is restored on drop. Tests using
/// it must run under `#[serial]`.
pub struct TestEnv {
	temp_dir: TempDir,
	original_env: HashMap<String, Option<String>>,
	modified_keys: Vec<String>,
}

impl TestEnv {
	/// Create a new test environment
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_prod_settings::settings::testing::TestEnv;
	///
	/// let mut test_env = TestEnv::new().unwrap();
	/// test_env.set_var("DJANGO_ALLOWED_HOSTS", "example.com");
	/// assert_eq!(std::env::var("DJANGO_ALLOWED_HOSTS").unwrap(), "example.com");
	/// ```
	pub fn new() -> std::io::Result<Self> {
		Ok(Self {
			temp_dir: TempDir::new()?,
			original_env: HashMap::new(),
			modified_keys: Vec::new(),
		})
	}

	/// Get the temporary directory path
	pub fn path(&self) -> &Path {
		self.temp_dir.path()
	}

	fn remember(&mut self, key: &str) {
		if !self.original_env.contains_key(key) {
			self.original_env.insert(key.to_string(), env::var(key).ok());
		}
		if !self.modified_keys.iter().any(|k| k == key) {
			self.modified_keys.push(key.to_string());
		}
	}

	/// Set an environment variable for this test
	pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		self.remember(&key);

		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// TestEnv is designed for use in tests with #[serial] to ensure exclusive access.
		unsafe {
			env::set_var(&key, value.into());
		}
	}

	/// Remove an environment variable for this test
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_prod_settings::settings::testing::TestEnv;
	///
	/// let mut test_env = TestEnv::new().unwrap();
	/// test_env.remove_var("DJANGO_ALLOWED_HOSTS");
	/// assert!(std::env::var("DJANGO_ALLOWED_HOSTS").is_err());
	/// ```
	pub fn remove_var(&mut self, key: impl Into<String>) {
		let key = key.into();
		self.remember(&key);

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// TestEnv is designed for use in tests with #[serial] to ensure exclusive access.
		unsafe {
			env::remove_var(&key);
		}
	}

	/// Create a .env file in the temporary directory
	///
	/// Keys listed in the file are recorded so that loading it is undone on drop.
	pub fn create_env_file(&mut self, content: &str) -> std::io::Result<PathBuf> {
		for key in content
			.lines()
			.map(str::trim)
			.filter(|l| !l.is_empty() && !l.starts_with('#'))
			.filter_map(|l| l.split_once('=').map(|(k, _)| k.trim().to_string()))
		{
			self.remember(&key);
		}

		let env_path = self.temp_dir.path().join(".env");
		std::fs::write(&env_path, content)?;
		Ok(env_path)
	}
}

impl Drop for TestEnv {
	fn drop(&mut self) {
		for key in &self.modified_keys {
			if let Some(original) = self.original_env.get(key) {
				// SAFETY: Restoring environment variables is unsafe in multi-threaded programs.
				// TestEnv is designed for use in tests with #[serial] to ensure exclusive access.
				unsafe {
					match original {
						Some(val) => env::set_var(key, val),
						None => env::remove_var(key),
					}
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;

	#[rstest]
	#[serial(process_env)]
	fn test_variables_are_restored_on_drop() {
		// Arrange
		let key = "REINHARDT_TESTING_RESTORE_PROBE";
		{
			let mut test_env = TestEnv::new().unwrap();
			test_env.set_var(key, "temporary");

			// Act
			assert_eq!(env::var(key).unwrap(), "temporary");
		}

		// Assert
		assert!(env::var(key).is_err());
	}

	#[rstest]
	#[serial(process_env)]
	fn test_env_file_keys_are_tracked() {
		// Arrange
		let mut test_env = TestEnv::new().unwrap();

		// Act
		let path = test_env
			.create_env_file("# comment\nDJANGO_ALLOWED_HOSTS=example.com\n")
			.unwrap();

		// Assert
		assert!(path.exists());
		assert!(
			test_env
				.modified_keys
				.contains(&"DJANGO_ALLOWED_HOSTS".to_string())
		);
	}
}
