//! Error types for undoc library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::report::ErrorKind;

/// Result type alias for undoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// The input path does not resolve to an existing file.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file extension is not one of the supported formats.
    #[error("Unsupported file type: {0}. Supported types: .pdf, .docx")]
    UnsupportedFormat(String),

    /// A backend could not open or parse the binary structure.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Every decoding strategy for the format was exhausted.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Classify this error into one of the stable, reportable kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FileNotFound(_) => ErrorKind::FileNotFound,
            Error::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Error::Decode(_) | Error::Io(_) => ErrorKind::DecodeError,
            Error::Extraction(_) | Error::Render(_) => ErrorKind::ExtractionError,
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::Decryption(_) => Error::Decode("document is encrypted".to_string()),
            _ => Error::Decode(err.to_string()),
        }
    }
}

impl From<pdf_extract::OutputError> for Error {
    fn from(err: pdf_extract::OutputError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Decode(format!("not a valid OOXML package: {}", err))
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Decode(format!("malformed XML: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFormat(".txt".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported file type: .txt. Supported types: .pdf, .docx"
        );

        let err = Error::FileNotFound(PathBuf::from("missing.pdf"));
        assert_eq!(err.to_string(), "File not found: missing.pdf");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.kind(), ErrorKind::DecodeError);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Error::FileNotFound(PathBuf::new()).kind(),
            ErrorKind::FileNotFound
        );
        assert_eq!(
            Error::UnsupportedFormat(String::new()).kind(),
            ErrorKind::UnsupportedFormat
        );
        assert_eq!(
            Error::Decode(String::new()).kind(),
            ErrorKind::DecodeError
        );
        assert_eq!(
            Error::Extraction(String::new()).kind(),
            ErrorKind::ExtractionError
        );
        assert_eq!(Error::Render(String::new()).kind(), ErrorKind::ExtractionError);
    }
}
