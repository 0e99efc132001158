//! Output formatting utilities

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

/// Output format for displaying values
#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputFormat {
	Text,
	Json,
}

/// Redacted placeholder for sensitive values
pub(crate) const REDACTED: &str = "[REDACTED]";

/// Sensitive key name patterns used to detect credentials and secrets
const SENSITIVE_PATTERNS: &[&str] = &[
	"password",
	"passwd",
	"pwd",
	"secret",
	"token",
	"api_key",
	"apikey",
	"credential",
	"private_key",
	"connection_string",
	"database_url",
];

/// Check whether a key name indicates a sensitive value
///
/// Checks the last segment of a dotted key path (e.g., "database.password"
/// checks "password") against known sensitive patterns.
pub(crate) fn is_sensitive_key(key: &str) -> bool {
	let lower = key.to_lowercase();
	let segment = lower.rsplit('.').next().unwrap_or(&lower);
	SENSITIVE_PATTERNS
		.iter()
		.any(|pattern| segment.contains(pattern))
}

/// Recursively redact sensitive values in a JSON value tree
pub(crate) fn redact_sensitive_values(value: &Value) -> Value {
	match value {
		Value::Object(map) => Value::Object(
			map.iter()
				.map(|(key, val)| {
					let val = if is_sensitive_key(key) {
						Value::String(REDACTED.to_string())
					} else {
						redact_sensitive_values(val)
					};
					(key.clone(), val)
				})
				.collect(),
		),
		Value::Array(arr) => Value::Array(arr.iter().map(redact_sensitive_values).collect()),
		other => other.clone(),
	}
}

/// Look up a dotted key path such as `logging.root.level` or `allowed_hosts.0`
pub(crate) fn lookup<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
	key.split('.').try_fold(value, |current, part| match current {
		Value::Array(items) => part.parse::<usize>().ok().and_then(|i| items.get(i)),
		_ => current.get(part),
	})
}

pub(crate) fn success(msg: &str) {
	println!("{} {}", "✓".green().bold(), msg);
}

pub(crate) fn error(msg: &str) {
	eprintln!("{} {}", "✗".red().bold(), msg);
}

pub(crate) fn warning(msg: &str) {
	println!("{} {}", "⚠".yellow().bold(), msg);
}

pub(crate) fn info(msg: &str) {
	println!("{} {}", "ℹ".blue().bold(), msg);
}

/// Format and print a value based on the output format
pub(crate) fn print_value<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
	match format {
		OutputFormat::Json => {
			let json = serde_json::to_string_pretty(value)?;
			println!("{}", json);
		}
		OutputFormat::Text => {
			let json = serde_json::to_value(value)?;
			print_value_text(&json, 0);
		}
	}
	Ok(())
}

fn print_value_text(value: &Value, indent: usize) {
	let indent_str = "  ".repeat(indent);
	match value {
		Value::Object(map) => {
			for (key, val) in map {
				match val {
					Value::Object(_) | Value::Array(_) => {
						println!("{}{}:", indent_str, key.cyan().bold());
						print_value_text(val, indent + 1);
					}
					_ => {
						print!("{}{}: ", indent_str, key.cyan().bold());
						print_value_text(val, 0);
					}
				}
			}
		}
		Value::Array(arr) if arr.is_empty() => println!("{}[]", indent_str),
		Value::Array(arr) => {
			for val in arr {
				print!("{}- ", indent_str);
				print_value_text(val, indent + 1);
			}
		}
		// Quoted so an empty host entry stays visible
		Value::String(s) => println!("{}", format!("{:?}", s).green()),
		Value::Number(n) => println!("{}", n.to_string().yellow()),
		Value::Bool(b) => println!("{}", b.to_string().blue()),
		Value::Null => println!("{}", "null".dimmed()),
	}
}
