//! Logging command

use super::SourceArgs;
use crate::output::{self, OutputFormat};
use clap::Args;
use reinhardt_prod_settings::logging::HandlerClass;

#[derive(Args)]
pub(crate) struct LoggingArgs {
	#[command(flatten)]
	pub source: SourceArgs,

	/// Emit a sample record through the configured handlers
	#[arg(long)]
	pub emit_sample: bool,
}

/// Print the resolved logging mapping as JSON and describe each handler
pub(crate) fn execute(args: LoggingArgs) -> anyhow::Result<()> {
	let (profile, settings) = args.source.resolve()?;
	let config = &settings.logging;

	output::print_value(config, OutputFormat::Json)?;

	for (name, handler) in &config.handlers {
		let routed = config.root.handlers.contains(name);
		match HandlerClass::from_class_name(&handler.class) {
			Some(class) if routed => {
				output::info(&format!("{} -> {:?} (routed from root)", name, class))
			}
			Some(class) => output::warning(&format!("{} -> {:?} (not routed)", name, class)),
			None => output::error(&format!("{} has unsupported class {}", name, handler.class)),
		}
	}

	config.validate()?;
	output::success("Logging configuration is valid");

	if args.emit_sample {
		reinhardt_prod_settings::logging::init(config)?;
		tracing::info!(%profile, hosts = ?settings.allowed_hosts, "sample record");
		tracing::warn!(%profile, "sample warning");
	}

	Ok(())
}
