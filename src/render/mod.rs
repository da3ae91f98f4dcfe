//! Rendering module for converting documents to output formats.

mod json;
mod text;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::Document;

pub use json::{to_json, JsonFormat};
pub use text::to_text;

/// Output format for rendered documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Full document as a JSON object
    #[default]
    Json,
    /// Human-readable summary followed by the full text
    Text,
}

impl OutputFormat {
    /// Format name as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => Err(Error::Render(format!("unknown output format: {}", other))),
        }
    }
}

/// Render a document in the given format.
///
/// `json_format` only applies to [`OutputFormat::Json`].
pub fn render(doc: &Document, format: OutputFormat, json_format: JsonFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(doc, json_format),
        OutputFormat::Text => Ok(to_text(doc)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("markdown".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "json");
    }
}
