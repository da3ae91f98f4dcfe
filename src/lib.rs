//! # undoc
//!
//! Text and metadata extraction from PDF and DOCX documents.
//!
//! A file is classified by extension, decoded into its natural structural
//! units (pages for PDF, body paragraphs for DOCX) and assembled into a
//! uniform [`Document`] that renders to JSON or a plain text report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use undoc::{read_file, render, JsonFormat};
//!
//! match read_file("report.pdf") {
//!     Ok(doc) => {
//!         println!("{} pages", doc.unit_count());
//!         println!("{}", render::to_json(&doc, JsonFormat::Pretty).unwrap());
//!     }
//!     Err(payload) => eprintln!("{}", payload.to_json()),
//! }
//! ```
//!
//! ## Features
//!
//! - **Two PDF decoders**: layout-aware text via pdf-extract, with a lopdf
//!   fallback when the first one fails or finds no text
//! - **DOCX paragraphs** with resolved style names
//! - **Normalized metadata**: a closed key set, blank values dropped
//! - **Total entry point**: [`read_file`] always returns a document or a
//!   serializable [`ErrorPayload`]

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod report;

pub use detect::{classify, is_supported, supported_extensions, FileType};
pub use error::{Error, Result};
pub use model::{
    Document, Metadata, MetadataKey, MetadataValue, Page, Paragraph, RawMetadata, Units,
    UNIT_SEPARATOR,
};
pub use parser::{DocxParser, ErrorMode, ExtractOptions, PdfParser};
pub use render::{JsonFormat, OutputFormat};
pub use report::{ErrorKind, ErrorPayload};

use std::path::Path;

/// Extract a PDF or DOCX file.
///
/// # Example
///
/// ```no_run
/// use undoc::extract_file;
///
/// let doc = extract_file("notes.docx").unwrap();
/// println!("{}", doc.full_text());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    extract_file_with_options(path, ExtractOptions::default())
}

/// Extract a file with custom options.
///
/// # Example
///
/// ```no_run
/// use undoc::{extract_file_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new().lenient().without_fallback();
/// let doc = extract_file_with_options("scan.pdf", options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<Document> {
    let path = path.as_ref();
    let file_type = classify(path)?;
    let path = path.canonicalize()?;

    log::debug!("Extracting {} as {}", path.display(), file_type);

    let doc = match file_type {
        FileType::Pdf => PdfParser::new(options).parse(&path)?,
        // DOCX has a single decoder, so its failure exhausts extraction.
        FileType::Docx => DocxParser::open(&path)
            .and_then(|parser| parser.parse(&path))
            .map_err(|e| Error::Extraction(format!("docx: {}", e)))?,
    };

    log::info!(
        "Extracted {} {}s ({} chars) from {}",
        doc.unit_count(),
        file_type.unit_name(),
        doc.units().total_chars(),
        path.display()
    );
    Ok(doc)
}

/// Read a file into a [`Document`], reporting any failure as an
/// [`ErrorPayload`].
///
/// This never panics on bad input: every failure, including a panic inside
/// a PDF backend, comes back as one of the four [`ErrorKind`]s.
///
/// # Example
///
/// ```no_run
/// use undoc::{read_file, ErrorKind};
///
/// if let Err(payload) = read_file("missing.pdf") {
///     assert_eq!(payload.error_kind, ErrorKind::FileNotFound);
/// }
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> std::result::Result<Document, ErrorPayload> {
    read_file_with_options(path, ExtractOptions::default())
}

/// Read a file with custom options, reporting failures as an [`ErrorPayload`].
pub fn read_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> std::result::Result<Document, ErrorPayload> {
    let path = path.as_ref();
    extract_file_with_options(path, options).map_err(|e| {
        log::debug!("Extraction of {} failed: {}", path.display(), e);
        ErrorPayload::new(&e, path)
    })
}

/// Read a file on tokio's blocking thread pool.
///
/// Calls share no state, so several files can be read concurrently.
#[cfg(feature = "async")]
pub async fn read_file_async<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> std::result::Result<Document, ErrorPayload> {
    let path = path.as_ref().to_path_buf();
    let requested = path.clone();

    tokio::task::spawn_blocking(move || read_file_with_options(&path, options))
        .await
        .unwrap_or_else(|e| {
            let error = Error::Extraction(format!("extraction task failed: {}", e));
            Err(ErrorPayload::new(&error, &requested))
        })
}

/// Builder for extracting and rendering documents.
///
/// # Example
///
/// ```no_run
/// use undoc::{JsonFormat, Undoc};
///
/// let json = Undoc::new()
///     .lenient()
///     .without_fallback()
///     .extract("document.pdf")?
///     .to_json(JsonFormat::Compact)?;
/// # Ok::<(), undoc::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Undoc {
    options: ExtractOptions,
}

impl Undoc {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat PDF pages whose text cannot be decoded as empty.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Fail the fallback decoder on the first page whose text cannot be decoded.
    pub fn strict(mut self) -> Self {
        self.options = self.options.with_error_mode(ErrorMode::Strict);
        self
    }

    /// Never run the PDF fallback decoder.
    pub fn without_fallback(mut self) -> Self {
        self.options = self.options.without_fallback();
        self
    }

    /// Options this builder will extract with.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract a file, with typed errors.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<UndocResult> {
        let document = extract_file_with_options(path, self.options.clone())?;
        Ok(UndocResult { document })
    }

    /// Extract a file, reporting failures as an [`ErrorPayload`].
    pub fn read<P: AsRef<Path>>(&self, path: P) -> std::result::Result<Document, ErrorPayload> {
        read_file_with_options(path, self.options.clone())
    }
}

/// Result of extracting a document with [`Undoc`].
#[derive(Debug, Clone)]
pub struct UndocResult {
    document: Document,
}

impl UndocResult {
    /// Render as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Render as a text report.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Take the document.
    pub fn into_document(self) -> Document {
        self.document
    }
}
