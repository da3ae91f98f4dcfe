//! File format classification.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    /// Page-oriented PDF document
    #[serde(rename = "PDF")]
    Pdf,
    /// Flow-oriented Word (OOXML) document
    #[serde(rename = "DOCX")]
    Docx,
}

impl FileType {
    /// Map a file extension (without the leading dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(FileType::Pdf),
            "docx" => Some(FileType::Docx),
            _ => None,
        }
    }

    /// Display name used in serialized output ("PDF" / "DOCX").
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "PDF",
            FileType::Docx => "DOCX",
        }
    }

    /// Name of the structural unit for this format.
    pub fn unit_name(&self) -> &'static str {
        match self {
            FileType::Pdf => "page",
            FileType::Docx => "paragraph",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const SUPPORTED_EXTENSIONS: &[&str] = &[".pdf", ".docx"];

/// Extensions accepted by [`classify`], with the leading dot.
pub fn supported_extensions() -> &'static [&'static str] {
    SUPPORTED_EXTENSIONS
}

/// Classify a file by its extension.
///
/// The path must point at an existing regular file; the lowercase
/// extension is the only signal used, file contents are not inspected.
///
/// # Example
/// ```no_run
/// use undoc::detect::{classify, FileType};
///
/// let file_type = classify("report.PDF").unwrap();
/// assert_eq!(file_type, FileType::Pdf);
/// ```
pub fn classify<P: AsRef<Path>>(path: P) -> Result<FileType> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    FileType::from_extension(ext).ok_or_else(|| {
        let shown = if ext.is_empty() {
            "(none)".to_string()
        } else {
            format!(".{}", ext.to_ascii_lowercase())
        };
        Error::UnsupportedFormat(shown)
    })
}

/// Check if a path would be accepted by [`classify`].
pub fn is_supported<P: AsRef<Path>>(path: P) -> bool {
    classify(path).is_ok()
}
