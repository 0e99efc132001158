//! Production environment settings
//!
//! Overrides on top of [`super::base`]: debug off, host allow-list from
//! `DJANGO_ALLOWED_HOSTS`, HTTPS-only cookies and redirect, and structured
//! logging routed to both the cloud handler and the console.

use super::Settings;
use super::base::base_settings;
use super::env::{Env, EnvError};
use crate::logging::LoggingConfig;

/// Variable holding the comma separated host allow-list
pub const ALLOWED_HOSTS_VAR: &str = "DJANGO_ALLOWED_HOSTS";

pub const DEBUG: bool = false;
pub const SECURE_SSL_REDIRECT: bool = true;
pub const SESSION_COOKIE_SECURE: bool = true;
pub const CSRF_COOKIE_SECURE: bool = true;

/// Read the host allow-list.
///
/// The variable is split on `,` verbatim. When it is unset or empty the result
/// is `[""]`, a list whose only entry matches no real host.
///
/// # Examples
///
/// ```
/// use reinhardt_prod_settings::settings::env::Env;
/// use reinhardt_prod_settings::settings::prod::allowed_hosts;
///
/// let env = Env::from_vars([("DJANGO_ALLOWED_HOSTS", "example.com,api.example.com")]);
/// assert_eq!(allowed_hosts(&env).unwrap(), vec!["example.com", "api.example.com"]);
///
/// let unset = Env::from_vars(Vec::<(String, String)>::new());
/// assert_eq!(allowed_hosts(&unset).unwrap(), vec![""]);
/// ```
pub fn allowed_hosts(env: &Env) -> Result<Vec<String>, EnvError> {
	env.split_with_default(ALLOWED_HOSTS_VAR, "")
}

/// Apply the production overrides to an existing settings value
pub fn apply(mut settings: Settings, env: &Env) -> Result<Settings, EnvError> {
	settings.debug = DEBUG;
	settings.allowed_hosts = allowed_hosts(env)?;

	settings.secure_ssl_redirect = SECURE_SSL_REDIRECT;
	settings.session_cookie_secure = SESSION_COOKIE_SECURE;
	settings.csrf_cookie_secure = CSRF_COOKIE_SECURE;

	settings.logging = LoggingConfig::production();

	if settings.allowed_hosts.iter().any(String::is_empty) {
		tracing::warn!(
			var = ALLOWED_HOSTS_VAR,
			hosts = ?settings.allowed_hosts,
			"allowed hosts contain an empty entry; requests for unlisted hosts will be rejected"
		);
	}

	Ok(settings)
}

/// Get production settings
pub fn production_settings(env: &Env) -> Result<Settings, EnvError> {
	apply(base_settings(env)?, env)
}
