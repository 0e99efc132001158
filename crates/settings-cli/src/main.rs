//! Reinhardt production settings CLI
//!
//! Inspect the settings a process would load and check them before deploying.
//!
//! ## Usage
//!
//! ```bash
//! prod-settings show --profile production
//! prod-settings show --key allowed_hosts -f json
//! prod-settings validate --profile production
//! prod-settings logging --profile production --emit-sample
//! ```

mod commands;
mod output;

use clap::{Parser, Subcommand};
use commands::logging::LoggingArgs;
use commands::show::ShowArgs;
use commands::validate::ValidateArgs;
use std::process;

#[derive(Parser)]
#[command(name = "prod-settings")]
#[command(about = "Inspect and validate Reinhardt production settings", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the resolved settings
	Show(ShowArgs),

	/// Run the security checks for a profile
	Validate(ValidateArgs),

	/// Print the logging mapping and describe its handlers
	Logging(LoggingArgs),
}

fn main() {
	let cli = Cli::parse();

	let result = match cli.command {
		Commands::Show(args) => commands::show::execute(args),
		Commands::Validate(args) => commands::validate::execute(args),
		Commands::Logging(args) => commands::logging::execute(args),
	};

	if let Err(e) = result {
		output::error(&format!("{:#}", e));
		process::exit(1);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;
	use rstest::rstest;

	#[rstest]
	fn cli_definition_is_consistent() {
		Cli::command().debug_assert();
	}

	#[rstest]
	fn validate_accepts_profile_and_dir() {
		// Act
		let cli = Cli::try_parse_from([
			"prod-settings",
			"validate",
			"-p",
			"production",
			"-d",
			"/srv/app",
		])
		.unwrap();

		// Assert
		match cli.command {
			Commands::Validate(args) => {
				assert_eq!(args.source.profile.as_deref(), Some("production"));
				assert_eq!(args.source.dir, std::path::PathBuf::from("/srv/app"));
			}
			_ => panic!("expected validate subcommand"),
		}
	}

	#[rstest]
	fn show_defaults_to_text_and_redaction() {
		let cli = Cli::try_parse_from(["prod-settings", "show"]).unwrap();
		match cli.command {
			Commands::Show(args) => {
				assert!(!args.show_secrets);
				assert!(matches!(args.format, commands::show::OutputFormatArg::Text));
				assert!(args.key.is_none());
			}
			_ => panic!("expected show subcommand"),
		}
	}
}
