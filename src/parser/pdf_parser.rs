//! PDF extraction with primary/fallback decoder selection.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::detect::FileType;
use crate::error::{Error, Result};
use crate::model::{Document, Units};

use super::backend::{DecodedPages, FallbackPageDecoder, PageDecoder, PrimaryPageDecoder};
use super::options::ExtractOptions;

/// PDF document parser.
///
/// Runs the primary decoder and switches to the fallback only when the
/// primary fails or extracts no text at all. A primary result with any text
/// is used outright, metadata included.
pub struct PdfParser<P = PrimaryPageDecoder, F = FallbackPageDecoder> {
    primary: P,
    fallback: F,
    options: ExtractOptions,
}

impl PdfParser {
    /// Create a parser with the default decoders.
    pub fn new(options: ExtractOptions) -> Self {
        let fallback = FallbackPageDecoder::new(options.error_mode);
        Self::with_decoders(PrimaryPageDecoder::new(), fallback, options)
    }
}

impl Default for PdfParser {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

impl<P: PageDecoder, F: PageDecoder> PdfParser<P, F> {
    /// Create a parser with custom decoders.
    pub fn with_decoders(primary: P, fallback: F, options: ExtractOptions) -> Self {
        Self {
            primary,
            fallback,
            options,
        }
    }

    /// Parse the file into a [`Document`].
    pub fn parse(&self, path: &Path) -> Result<Document> {
        let decoded = self.decode(path)?;
        Ok(Document::assemble(
            FileType::Pdf,
            Units::Pages(decoded.pages),
            decoded.metadata,
            path,
        ))
    }

    /// Decode pages, falling back when the primary decoder fails or is empty.
    pub fn decode(&self, path: &Path) -> Result<DecodedPages> {
        let primary_failure = match run_decoder(&self.primary, path) {
            Ok(decoded) if !decoded.is_empty() => {
                log::debug!(
                    "{} extracted {} chars from {} pages",
                    self.primary.name(),
                    decoded.total_chars(),
                    decoded.pages.len()
                );
                return Ok(decoded);
            }
            Ok(decoded) => {
                if !self.options.fallback {
                    log::warn!("No extractable text in {}", path.display());
                    return Ok(decoded);
                }
                log::info!(
                    "{} found no text in {}, trying {}",
                    self.primary.name(),
                    path.display(),
                    self.fallback.name()
                );
                None
            }
            Err(e) => {
                if !self.options.fallback {
                    return Err(Error::Extraction(format!("{}: {}", self.primary.name(), e)));
                }
                log::warn!(
                    "{} failed, trying {}: {}",
                    self.primary.name(),
                    self.fallback.name(),
                    e
                );
                Some(e)
            }
        };

        match run_decoder(&self.fallback, path) {
            Ok(decoded) => {
                if decoded.is_empty() {
                    log::warn!(
                        "No extractable text in {} (image-only pages are not OCRed)",
                        path.display()
                    );
                }
                Ok(decoded)
            }
            Err(e) => {
                let message = match primary_failure {
                    Some(first) => format!(
                        "{}: {}; {}: {}",
                        self.primary.name(),
                        first,
                        self.fallback.name(),
                        e
                    ),
                    None => format!("{}: {}", self.fallback.name(), e),
                };
                Err(Error::Extraction(message))
            }
        }
    }
}

/// Run a decoder, turning a panic inside the backend into a decode error.
fn run_decoder<D: PageDecoder>(decoder: &D, path: &Path) -> Result<DecodedPages> {
    panic::catch_unwind(AssertUnwindSafe(|| decoder.decode(path))).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(Error::Decode(format!("{} panicked: {}", decoder.name(), reason)))
    })
}
