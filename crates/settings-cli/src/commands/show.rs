//! Show command

use super::SourceArgs;
use crate::output::{self, OutputFormat};
use clap::Args;

#[derive(Args)]
pub(crate) struct ShowArgs {
	#[command(flatten)]
	pub source: SourceArgs,

	/// Dotted key to show (shows all if not specified)
	#[arg(short, long)]
	pub key: Option<String>,

	/// Output format (text, json)
	#[arg(short = 'f', long, value_enum, default_value = "text")]
	pub format: OutputFormatArg,

	/// Show sensitive values without redaction (secret key, tokens)
	#[arg(long)]
	pub show_secrets: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub(crate) enum OutputFormatArg {
	Text,
	Json,
}

impl From<OutputFormatArg> for OutputFormat {
	fn from(arg: OutputFormatArg) -> Self {
		match arg {
			OutputFormatArg::Text => OutputFormat::Text,
			OutputFormatArg::Json => OutputFormat::Json,
		}
	}
}

/// Display the resolved settings
pub(crate) fn execute(args: ShowArgs) -> anyhow::Result<()> {
	let (profile, settings) = args.source.resolve()?;
	output::info(&format!("Resolved settings for profile: {}", profile));

	let value = serde_json::to_value(&settings)?;
	let value = if args.show_secrets {
		value
	} else {
		output::redact_sensitive_values(&value)
	};

	match &args.key {
		Some(key) => {
			let found = output::lookup(&value, key)
				.ok_or_else(|| anyhow::anyhow!("Key not found: {}", key))?;
			output::info(&format!("Value for key '{}':", key));
			output::print_value(found, args.format.into())?;
		}
		None => output::print_value(&value, args.format.into())?,
	}

	Ok(())
}
