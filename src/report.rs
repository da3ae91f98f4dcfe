//! Serializable failure payloads returned across the engine boundary.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Stable classification of extraction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The input path does not exist or is not a regular file.
    FileNotFound,
    /// The file extension is not `.pdf` or `.docx`.
    UnsupportedFormat,
    /// The backend could not open or parse the document.
    DecodeError,
    /// All decoding strategies for the format were exhausted.
    ExtractionError,
}

impl ErrorKind {
    /// Name used in serialized payloads and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::FileNotFound => "FileNotFound",
            ErrorKind::UnsupportedFormat => "UnsupportedFormat",
            ErrorKind::DecodeError => "DecodeError",
            ErrorKind::ExtractionError => "ExtractionError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed extraction, as reported to callers of [`crate::read_file`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Error classification
    pub error_kind: ErrorKind,

    /// Human-readable message
    pub message: String,

    /// Path the caller asked for
    pub source_path: String,
}

impl ErrorPayload {
    /// Build a payload from a crate error and the requested path.
    pub fn new(error: &Error, path: &Path) -> Self {
        Self {
            error_kind: error.kind(),
            message: error.to_string(),
            source_path: path.display().to_string(),
        }
    }

    /// Serialize the payload as pretty-printed JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_string())
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_kind, self.message)
    }
}

impl std::error::Error for ErrorPayload {}
