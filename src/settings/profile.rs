//! Deployment profiles
//!
//! A profile decides which settings layer is loaded and how strictly it is
//! validated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable naming the active profile
pub const PROFILE_VAR: &str = "REINHARDT_ENV";

/// Deployment profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
	#[default]
	Development,
	Staging,
	Production,
	Custom,
}

impl Profile {
	/// Parse a profile name, falling back to [`Profile::Custom`] for unknown names
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_prod_settings::settings::profile::Profile;
	///
	/// assert_eq!(Profile::parse("prod"), Profile::Production);
	/// assert_eq!(Profile::parse("Staging"), Profile::Staging);
	/// assert_eq!(Profile::parse("qa"), Profile::Custom);
	/// ```
	pub fn parse(name: &str) -> Self {
		match name.trim().to_ascii_lowercase().as_str() {
			"development" | "dev" | "local" => Profile::Development,
			"staging" | "stage" => Profile::Staging,
			"production" | "prod" => Profile::Production,
			_ => Profile::Custom,
		}
	}

	/// Read the profile from `REINHARDT_ENV` in the given environment.
	///
	/// Defaults to [`Profile::Development`] when the variable is unset.
	pub fn from_env(env: &super::env::Env) -> Self {
		match env.lookup(PROFILE_VAR) {
			Ok(Some(name)) => Self::parse(&name),
			_ => Profile::Development,
		}
	}

	pub fn is_production(&self) -> bool {
		matches!(self, Profile::Production)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Profile::Development => "development",
			Profile::Staging => "staging",
			Profile::Production => "production",
			Profile::Custom => "custom",
		}
	}
}

impl fmt::Display for Profile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
