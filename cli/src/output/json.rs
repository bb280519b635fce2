//! JSON output helpers.

use anyhow::{Context, Result};
use serde::Serialize;

/// Pretty-print any serializable value to stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", to_pretty(value)?);
    Ok(())
}

fn to_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("JSON serialization failed")
}

/// Format a JSON error object:
///
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    to_pretty(&serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    }))
}
