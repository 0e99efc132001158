//! # Reinhardt Production Settings
//!
//! Production settings layer for Reinhardt projects.
//!
//! On top of the base settings it turns debug mode off, restricts the hosts the
//! server answers to, forces HTTPS redirects and secure cookies, and routes
//! logging to a structured cloud handler plus the console.
//!
//! ## Quick Start
//!
//! ```no_run
//! use reinhardt_prod_settings::settings::{self, Settings};
//! use reinhardt_prod_settings::settings::validation::validate_production;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (profile, loaded) = Settings::from_env(".")?;
//! if profile.is_production() {
//!     validate_production(&loaded)?;
//! }
//! reinhardt_prod_settings::logging::init(&loaded.logging)?;
//! let settings = settings::configure(loaded)?;
//! assert!(!settings.allowed_hosts.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`settings`]: base and production layers, environment access, validation
//! - [`logging`]: logging mapping and the handlers it wires

pub mod logging;
pub mod settings;

pub use logging::{LoggingConfig, LoggingError};
pub use settings::{Settings, SettingsError};
