//! Validate command

use super::SourceArgs;
use crate::output;
use clap::Args;
use reinhardt_prod_settings::settings::prelude::*;

#[derive(Args)]
pub(crate) struct ValidateArgs {
	#[command(flatten)]
	pub source: SourceArgs,
}

/// Run the security checks for the selected profile, then the logging mapping check
pub(crate) fn execute(args: ValidateArgs) -> anyhow::Result<()> {
	let (profile, settings) = args.source.resolve()?;
	output::info(&format!("Validating settings for profile: {}", profile));

	if !profile.is_production() {
		output::warning("Security checks only apply to the production profile");
	}

	let validator = SecurityValidator::new(profile);
	if let Err(err) = validator.validate_settings(&settings.to_map()?) {
		let failures = err.flatten();
		for failure in &failures {
			output::error(&failure.to_string());
		}
		anyhow::bail!("{} validation error(s)", failures.len());
	}
	output::success(&validator.description());

	settings
		.logging
		.validate()
		.map_err(|e| anyhow::anyhow!("Logging configuration is invalid: {}", e))?;
	output::success("Logging configuration is valid");

	output::success("Settings validation passed");
	Ok(())
}
