//! Subcommands and the argument handling they share

pub(crate) mod logging;
pub(crate) mod show;
pub(crate) mod validate;

use clap::Args;
use reinhardt_prod_settings::settings::prelude::*;
use std::path::PathBuf;

/// Arguments selecting which settings layer to resolve
#[derive(Args, Debug, Clone)]
pub(crate) struct SourceArgs {
	/// Profile to resolve (development, staging, production); defaults to REINHARDT_ENV
	#[arg(short, long)]
	pub profile: Option<String>,

	/// Directory searched for a `.env` file
	#[arg(short, long, value_name = "DIR", default_value = ".")]
	pub dir: PathBuf,
}

impl SourceArgs {
	/// Load `.env`, pick the profile and build the matching settings layer
	pub(crate) fn resolve(&self) -> anyhow::Result<(Profile, Settings)> {
		load_dotenv(self.dir.join(".env"))?;

		let env = Env::new();
		let profile = match &self.profile {
			Some(name) => Profile::parse(name),
			None => Profile::from_env(&env),
		};
		let settings = Settings::for_profile(profile, &env)?;
		Ok((profile, settings))
	}
}
