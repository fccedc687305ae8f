//! Output formatters for CLI commands.
//!
//! Provides consistent formatting across all CLI commands for JSON, text, and pretty output modes.

use anyhow::Result;
use colored::Colorize;
use sdkgen_core::cli::OutputFormat;
use serde::Serialize;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use sdkgen_cli::formatters::format_output;
/// use sdkgen_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     client_name: String,
///     file_count: usize,
/// }
///
/// let summary = Summary {
///     client_name: "Nexus".to_string(),
///     file_count: 2,
/// };
///
/// let output = format_output(&summary, OutputFormat::Json)?;
/// assert!(output.contains("\"client_name\""));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Format data as compact JSON.
    pub fn format_compact<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string(data)?)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize, json};

    /// Format data as one line of compact JSON, for piping into scripts.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        json::format_compact(data)
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    /// Format data as colorized, indented output.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut output = String::new();
        format_value(&mut output, &value, 0);
        Ok(output)
    }

    fn format_value(output: &mut String, value: &Value, indent: usize) {
        let indent_str = "  ".repeat(indent);
        let next_indent_str = "  ".repeat(indent + 1);

        match value {
            Value::Null => output.push_str(&"null".dimmed().to_string()),
            Value::Bool(b) => output.push_str(&b.to_string().yellow().to_string()),
            Value::Number(n) => output.push_str(&n.to_string().cyan().to_string()),
            Value::String(s) => output.push_str(&format!("\"{}\"", s.green())),
            Value::Array(items) if items.is_empty() => output.push_str("[]"),
            Value::Array(items) => {
                output.push_str("[\n");
                for (i, item) in items.iter().enumerate() {
                    output.push_str(&next_indent_str);
                    format_value(output, item, indent + 1);
                    if i + 1 < items.len() {
                        output.push(',');
                    }
                    output.push('\n');
                }
                output.push_str(&indent_str);
                output.push(']');
            }
            Value::Object(entries) if entries.is_empty() => output.push_str("{}"),
            Value::Object(entries) => {
                output.push_str("{\n");
                for (i, (key, item)) in entries.iter().enumerate() {
                    output.push_str(&format!("{next_indent_str}\"{}\": ", key.blue().bold()));
                    format_value(output, item, indent + 1);
                    if i + 1 < entries.len() {
                        output.push(',');
                    }
                    output.push('\n');
                }
                output.push_str(&indent_str);
                output.push('}');
            }
        }
    }
}
