//! Parsers for raw environment variable values
//!
//! Two list flavours exist on purpose: [`split_list`] keeps every segment of a
//! comma split verbatim, [`parse_list`] trims and drops empty segments.

/// Split a raw value on `,` without trimming or filtering.
///
/// An empty input yields a single empty string, never an empty list.
///
/// # Examples
///
/// ```
/// use reinhardt_prod_settings::settings::env_parser::split_list;
///
/// assert_eq!(split_list("example.com,api.example.com"), vec!["example.com", "api.example.com"]);
/// assert_eq!(split_list(""), vec![""]);
/// assert_eq!(split_list("a,,b"), vec!["a", "", "b"]);
/// ```
pub fn split_list(raw: &str) -> Vec<String> {
	raw.split(',').map(str::to_string).collect()
}

/// Parse a comma separated list, trimming whitespace and skipping empty entries.
///
/// # Examples
///
/// ```
/// use reinhardt_prod_settings::settings::env_parser::parse_list;
///
/// assert_eq!(parse_list(" a , b ,, c "), vec!["a", "b", "c"]);
/// assert!(parse_list("").is_empty());
/// ```
pub fn parse_list(raw: &str) -> Vec<String> {
	raw.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_string)
		.collect()
}

/// Parse a boolean value.
///
/// Accepts `true/false`, `1/0`, `yes/no` and `on/off` in any case.
pub fn parse_bool(raw: &str) -> Result<bool, String> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err(format!("cannot interpret {} characters as a boolean", raw.len())),
	}
}
