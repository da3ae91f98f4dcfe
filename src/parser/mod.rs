//! Document parsing module.

mod backend;
mod docx_parser;
mod options;
mod pdf_parser;

pub use backend::{
    decode_text_simple, parse_pdf_date, DecodedPages, FallbackPageDecoder, PageDecoder,
    PrimaryPageDecoder,
};
pub use docx_parser::{DecodedParagraphs, DocxParser};
pub use options::{ErrorMode, ExtractOptions};
pub use pdf_parser::PdfParser;
