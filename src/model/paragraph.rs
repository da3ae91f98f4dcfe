//! Paragraph-level types.

use serde::Serialize;

/// Style name used when a paragraph's style cannot be determined.
pub const DEFAULT_STYLE: &str = "Normal";

/// A single paragraph of a flow-oriented document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    /// Paragraph number (1-indexed, body order)
    #[serde(rename = "paragraph_number")]
    number: u32,

    /// Paragraph text
    text: String,

    /// Number of characters in `text`
    char_count: usize,

    /// Named paragraph style
    style: String,
}

impl Paragraph {
    /// Create a new paragraph with the given style name.
    pub fn new(number: u32, text: impl Into<String>, style: impl Into<String>) -> Self {
        let text = text.into();
        let style = style.into();
        Self {
            number,
            char_count: text.chars().count(),
            text,
            style: if style.is_empty() {
                DEFAULT_STYLE.to_string()
            } else {
                style
            },
        }
    }

    /// Create a paragraph in the default style.
    pub fn normal(number: u32, text: impl Into<String>) -> Self {
        Self::new(number, text, DEFAULT_STYLE)
    }

    /// Paragraph number (1-indexed).
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Paragraph text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters in the paragraph text.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Style name.
    pub fn style(&self) -> &str {
        &self.style
    }

    /// Check if the paragraph has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if this paragraph uses a built-in heading style.
    pub fn is_heading(&self) -> bool {
        self.style.starts_with("Heading")
    }
}
