//! # Settings Module
//!
//! Django-inspired settings for a Reinhardt project: a base layer with
//! development defaults and a production layer that hardens it.
//!
//! Settings are computed once at startup and published through
//! [`configure`]; afterwards they are read-only.

pub mod base;
pub mod env;
pub mod env_parser;
pub mod prelude;
pub mod prod;
pub mod profile;
pub mod testing;
pub mod validation;

use crate::logging::{LogLevel, LoggingConfig};
use env::{Env, EnvError};
use once_cell::sync::OnceCell;
use profile::Profile;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use validation::ValidationError;

/// Main settings structure for a Reinhardt project
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
	/// Base directory of the project
	pub base_dir: PathBuf,

	/// Secret key for cryptographic signing (SECURITY WARNING: keep secret in production!)
	pub secret_key: String,

	/// Debug mode (SECURITY WARNING: don't run with debug=true in production!)
	pub debug: bool,

	/// List of allowed host/domain names
	pub allowed_hosts: Vec<String>,

	/// List of installed applications
	pub installed_apps: Vec<String>,

	/// List of middleware classes
	pub middleware: Vec<String>,

	/// Root URL configuration module
	pub root_urlconf: String,

	/// Static files URL prefix
	pub static_url: String,

	/// Media files URL prefix
	pub media_url: String,

	pub language_code: String,

	pub time_zone: String,

	/// Enable internationalization
	pub use_i18n: bool,

	/// Use timezone-aware datetimes
	pub use_tz: bool,

	/// Header name and value identifying secure requests behind a proxy
	/// Example: Some(("HTTP_X_FORWARDED_PROTO", "https"))
	pub secure_proxy_ssl_header: Option<(String, String)>,

	/// Redirect all HTTP requests to HTTPS
	pub secure_ssl_redirect: bool,

	/// Seconds to set HSTS max-age header
	pub secure_hsts_seconds: Option<u64>,

	pub secure_hsts_include_subdomains: bool,

	pub secure_hsts_preload: bool,

	/// Only send the session cookie over HTTPS
	pub session_cookie_secure: bool,

	/// Only send the CSRF cookie over HTTPS
	pub csrf_cookie_secure: bool,

	/// Automatically append trailing slashes to URLs
	pub append_slash: bool,

	/// Logging handlers and root routing
	pub logging: LoggingConfig,
}

impl Settings {
	/// Create a new Settings instance with development defaults
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_prod_settings::Settings;
	/// use std::path::PathBuf;
	///
	/// let settings = Settings::new(PathBuf::from("/app"), "my-secret-key-12345".to_string());
	///
	/// assert_eq!(settings.base_dir, PathBuf::from("/app"));
	/// assert!(settings.debug);
	/// assert!(!settings.secure_ssl_redirect);
	/// assert_eq!(settings.time_zone, "UTC");
	/// ```
	pub fn new(base_dir: PathBuf, secret_key: String) -> Self {
		Self {
			base_dir,
			secret_key,
			debug: true,
			allowed_hosts: vec![],
			installed_apps: vec![
				"reinhardt.contrib.admin".to_string(),
				"reinhardt.contrib.auth".to_string(),
				"reinhardt.contrib.contenttypes".to_string(),
				"reinhardt.contrib.sessions".to_string(),
				"reinhardt.contrib.messages".to_string(),
				"reinhardt.contrib.staticfiles".to_string(),
			],
			middleware: vec![
				"reinhardt.middleware.security.SecurityMiddleware".to_string(),
				"reinhardt.contrib.sessions.middleware.SessionMiddleware".to_string(),
				"reinhardt.middleware.common.CommonMiddleware".to_string(),
				"reinhardt.middleware.csrf.CsrfViewMiddleware".to_string(),
				"reinhardt.contrib.auth.middleware.AuthenticationMiddleware".to_string(),
				"reinhardt.contrib.messages.middleware.MessageMiddleware".to_string(),
				"reinhardt.middleware.clickjacking.XFrameOptionsMiddleware".to_string(),
			],
			root_urlconf: "config.urls".to_string(),
			static_url: "/static/".to_string(),
			media_url: "/media/".to_string(),
			language_code: "en-us".to_string(),
			time_zone: "UTC".to_string(),
			use_i18n: true,
			use_tz: true,
			secure_proxy_ssl_header: None,
			secure_ssl_redirect: false,
			secure_hsts_seconds: None,
			secure_hsts_include_subdomains: false,
			secure_hsts_preload: false,
			session_cookie_secure: false,
			csrf_cookie_secure: false,
			append_slash: true,
			logging: LoggingConfig::console(LogLevel::Debug),
		}
	}

	/// Build the settings layer selected by `profile`.
	///
	/// Production loads the hardened layer; every other profile gets the base layer.
	pub fn for_profile(profile: Profile, env: &Env) -> Result<Self, EnvError> {
		if profile.is_production() {
			prod::production_settings(env)
		} else {
			base::base_settings(env)
		}
	}

	/// Load settings from the process environment.
	///
	/// Reads `.env` in `dir` first (when present), then picks the layer from
	/// `REINHARDT_ENV`.
	pub fn from_env(dir: impl AsRef<Path>) -> Result<(Profile, Self), SettingsError> {
		env::load_dotenv(dir.as_ref().join(".env"))?;

		let env = Env::new();
		let profile = Profile::from_env(&env);
		let settings = Self::for_profile(profile, &env)?;
		tracing::info!(%profile, "settings loaded");
		Ok((profile, settings))
	}

	/// Flatten into a key/value map, keys in lower snake case
	pub fn to_map(&self) -> Result<HashMap<String, Value>, SettingsError> {
		match serde_json::to_value(self) {
			Ok(Value::Object(map)) => Ok(map.into_iter().collect()),
			Ok(_) => Err(SettingsError::Serialization(
				"settings did not serialize to an object".to_string(),
			)),
			Err(e) => Err(SettingsError::Serialization(e.to_string())),
		}
	}
}

impl Default for Settings {
	fn default() -> Self {
		Self::new(
			PathBuf::from("."),
			"insecure-change-this-in-production".to_string(),
		)
	}
}

/// Settings lifecycle errors
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Settings are already configured")]
	AlreadyConfigured,

	#[error("Environment error: {0}")]
	Env(#[from] EnvError),

	#[error("Validation error: {0}")]
	Validation(#[from] ValidationError),

	#[error("Serialization error: {0}")]
	Serialization(String),
}

static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// Publish the process-wide settings.
///
/// May be called once; later calls fail with [`SettingsError::AlreadyConfigured`]
/// and leave the published value untouched.
pub fn configure(settings: Settings) -> Result<&'static Settings, SettingsError> {
	SETTINGS
		.set(settings)
		.map_err(|_| SettingsError::AlreadyConfigured)?;
	SETTINGS.get().ok_or(SettingsError::AlreadyConfigured)
}

/// The published settings, if [`configure`] has run
pub fn get() -> Option<&'static Settings> {
	SETTINGS.get()
}
