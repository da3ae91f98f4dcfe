//! Page-level types.

use serde::Serialize;

/// A single page of a page-oriented document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Page number (1-indexed)
    #[serde(rename = "page_number")]
    number: u32,

    /// Extracted text (empty for pages without a text layer)
    text: String,

    /// Number of characters in `text`
    char_count: usize,
}

impl Page {
    /// Create a new page.
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            number,
            char_count: text.chars().count(),
            text,
        }
    }

    /// Create a page without extractable text.
    pub fn blank(number: u32) -> Self {
        Self::new(number, String::new())
    }

    /// Replace the text, recomputing the character count.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        Self::new(self.number, text)
    }

    /// Page number (1-indexed).
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Page text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters in the page text.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Check if the page has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
