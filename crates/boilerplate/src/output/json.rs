//! JSON output formatting.

/// Format a value as compact JSON.
///
/// Serializing the core types cannot fail, so an error yields an empty string
/// instead of aborting the command.
pub fn format_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
