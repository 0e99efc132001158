//! Prelude module for convenient imports
//!
//! Import this module to get access to the most commonly used types and traits.

pub use super::base::base_settings;
pub use super::env::{Env, EnvError, load_dotenv};
pub use super::env_parser::{parse_bool, parse_list, split_list};
pub use super::prod::{ALLOWED_HOSTS_VAR, allowed_hosts, production_settings};
pub use super::profile::Profile;
pub use super::validation::{
	RequiredValidator, SecurityValidator, SettingsValidator, ValidationError, ValidationResult,
	validate_production,
};
pub use super::{Settings, SettingsError, configure, get};
pub use crate::logging::{LogLevel, LoggingConfig};
