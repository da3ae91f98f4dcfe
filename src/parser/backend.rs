//! PDF page decoders.
//!
//! Two interchangeable strategies sit behind the [`PageDecoder`] trait:
//! [`PrimaryPageDecoder`] extracts text with pdf-extract, which follows the
//! page layout, and [`FallbackPageDecoder`] uses lopdf's simpler, more
//! permissive content-stream text extraction. The choice between them is
//! made by [`super::PdfParser`].

use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::error::{Error, Result};
use crate::model::{MetadataKey, MetadataValue, Page, RawMetadata};

use super::options::ErrorMode;

/// Pages and raw metadata produced by one decoder run.
#[derive(Debug, Clone, Default)]
pub struct DecodedPages {
    /// Pages in document order, numbered from 1
    pub pages: Vec<Page>,
    /// Metadata before normalization
    pub metadata: RawMetadata,
}

impl DecodedPages {
    /// Total characters extracted across all pages.
    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(Page::char_count).sum()
    }

    /// True when no page produced any text.
    pub fn is_empty(&self) -> bool {
        self.total_chars() == 0
    }
}

/// A strategy for decoding a PDF into pages.
pub trait PageDecoder {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Decode the file at `path` into pages and metadata.
    fn decode(&self, path: &Path) -> Result<DecodedPages>;
}

/// Text fields read from the Info dictionary by the primary decoder.
const PRIMARY_TEXT_FIELDS: &[(MetadataKey, &[u8])] = &[
    (MetadataKey::Title, b"Title"),
    (MetadataKey::Author, b"Author"),
    (MetadataKey::Subject, b"Subject"),
    (MetadataKey::Keywords, b"Keywords"),
    (MetadataKey::Creator, b"Creator"),
    (MetadataKey::Producer, b"Producer"),
];

/// Fields surfaced by the fallback decoder, all as raw strings.
const FALLBACK_FIELDS: &[(MetadataKey, &[u8])] = &[
    (MetadataKey::Title, b"Title"),
    (MetadataKey::Author, b"Author"),
    (MetadataKey::Subject, b"Subject"),
    (MetadataKey::Creator, b"Creator"),
    (MetadataKey::Producer, b"Producer"),
    (MetadataKey::CreationDate, b"CreationDate"),
    (MetadataKey::ModificationDate, b"ModDate"),
];

const DATE_FIELDS: &[(MetadataKey, &[u8])] = &[
    (MetadataKey::CreationDate, b"CreationDate"),
    (MetadataKey::ModificationDate, b"ModDate"),
];

// ---------------------------------------------------------------------------
// PrimaryPageDecoder: pdf-extract for text, lopdf for the Info dictionary
// ---------------------------------------------------------------------------

/// Layout-aware decoder backed by `pdf-extract`.
#[derive(Debug, Clone, Default)]
pub struct PrimaryPageDecoder {
    _private: (),
}

impl PrimaryPageDecoder {
    /// Create a new primary decoder.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl PageDecoder for PrimaryPageDecoder {
    fn name(&self) -> &str {
        "pdf-extract"
    }

    fn decode(&self, path: &Path) -> Result<DecodedPages> {
        let data = fs::read(path)?;
        let doc = load_document(&data)?;
        let texts = pdf_extract::extract_text_from_mem_by_pages(&data)?;

        // The page tree is authoritative for the count; pages pdf-extract
        // did not report have no text layer.
        let page_total = doc.get_pages().len().max(texts.len());
        let pages = (0..page_total)
            .map(|i| {
                let text = texts.get(i).map(|t| t.trim()).unwrap_or_default();
                Page::new(i as u32 + 1, text)
            })
            .collect();

        Ok(DecodedPages {
            pages,
            metadata: primary_metadata(&doc),
        })
    }
}

fn primary_metadata(doc: &LopdfDocument) -> RawMetadata {
    let info = info_dictionary(doc);
    let mut metadata = RawMetadata::new();

    for (key, name) in PRIMARY_TEXT_FIELDS {
        let value = info.and_then(|d| get_string_from_dict(d, name));
        metadata.insert(*key, value.map(MetadataValue::Text));
    }

    for (key, name) in DATE_FIELDS {
        let value = info.and_then(|d| get_string_from_dict(d, name)).map(|raw| {
            match parse_pdf_date(&raw) {
                Some(date) => MetadataValue::Date(date),
                None => {
                    log::debug!("Keeping unparseable PDF date as text: {:?}", raw);
                    MetadataValue::Text(raw)
                }
            }
        });
        metadata.insert(*key, value);
    }

    metadata
}

// ---------------------------------------------------------------------------
// FallbackPageDecoder: lopdf only
// ---------------------------------------------------------------------------

/// Permissive decoder backed by lopdf's content-stream text extraction.
#[derive(Debug, Clone, Default)]
pub struct FallbackPageDecoder {
    error_mode: ErrorMode,
}

impl FallbackPageDecoder {
    /// Create a new fallback decoder.
    pub fn new(error_mode: ErrorMode) -> Self {
        Self { error_mode }
    }
}

impl PageDecoder for FallbackPageDecoder {
    fn name(&self) -> &str {
        "lopdf"
    }

    fn decode(&self, path: &Path) -> Result<DecodedPages> {
        let data = fs::read(path)?;
        let doc = load_document(&data)?;

        let mut pages = Vec::new();
        for (index, page_num) in doc.get_pages().keys().enumerate() {
            let text = match doc.extract_text(&[*page_num]) {
                Ok(text) => text,
                Err(e) => {
                    if self.error_mode == ErrorMode::Strict {
                        return Err(Error::Decode(format!("Page {}: {}", page_num, e)));
                    }
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                    String::new()
                }
            };
            pages.push(Page::new(index as u32 + 1, text.trim()));
        }

        let info = info_dictionary(&doc);
        let metadata = FALLBACK_FIELDS
            .iter()
            .map(|(key, name)| {
                let value = info.and_then(|d| get_string_from_dict(d, name));
                (*key, value.map(MetadataValue::Text))
            })
            .collect();

        Ok(DecodedPages { pages, metadata })
    }
}

// ---------------------------------------------------------------------------
// lopdf helpers
// ---------------------------------------------------------------------------

fn load_document(data: &[u8]) -> Result<LopdfDocument> {
    LopdfDocument::load_mem(data).map_err(Error::from)
}

/// Resolve the trailer's Info dictionary, whether inline or referenced.
fn info_dictionary(doc: &LopdfDocument) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE or UTF-8 with BOM, else UTF-8, else
/// PDFDocEncoding.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(rest).into_owned();
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| pdf_doc_char(b)).collect()
}

/// PDFDocEncoding (PDF 1.7, Annex D). Agrees with Latin-1 outside
/// 0x18..=0x1F and 0x7F..=0xA0.
fn pdf_doc_char(b: u8) -> char {
    match b {
        0x18 => '\u{02D8}',
        0x19 => '\u{02C7}',
        0x1A => '\u{02C6}',
        0x1B => '\u{02D9}',
        0x1C => '\u{02DD}',
        0x1D => '\u{02DB}',
        0x1E => '\u{02DA}',
        0x1F => '\u{02DC}',
        0x80 => '\u{2022}',
        0x81 => '\u{2020}',
        0x82 => '\u{2021}',
        0x83 => '\u{2026}',
        0x84 => '\u{2014}',
        0x85 => '\u{2013}',
        0x86 => '\u{0192}',
        0x87 => '\u{2044}',
        0x88 => '\u{2039}',
        0x89 => '\u{203A}',
        0x8A => '\u{2212}',
        0x8B => '\u{2030}',
        0x8C => '\u{201E}',
        0x8D => '\u{201C}',
        0x8E => '\u{201D}',
        0x8F => '\u{2018}',
        0x90 => '\u{2019}',
        0x91 => '\u{201A}',
        0x92 => '\u{2122}',
        0x93 => '\u{FB01}',
        0x94 => '\u{FB02}',
        0x95 => '\u{0141}',
        0x96 => '\u{0152}',
        0x97 => '\u{0160}',
        0x98 => '\u{0178}',
        0x99 => '\u{017D}',
        0x9A => '\u{0131}',
        0x9B => '\u{0142}',
        0x9C => '\u{0153}',
        0x9D => '\u{0161}',
        0x9E => '\u{017E}',
        0x7F | 0x9F => char::REPLACEMENT_CHARACTER,
        0xA0 => '\u{20AC}',
        _ => b as char,
    }
}

/// Parse a PDF date string (`D:YYYYMMDDHHmmSSOHH'mm'`).
///
/// Everything after the year is optional; a missing offset means UTC.
pub fn parse_pdf_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    let s = s.strip_prefix("D:").unwrap_or(s);

    let digits_len = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len < 4 {
        return None;
    }
    let (digits, zone) = s.split_at(digits_len);

    let field = |range: std::ops::Range<usize>, default: u32| -> Option<u32> {
        match digits.get(range) {
            Some(part) => part.parse().ok(),
            None => Some(default),
        }
    };

    let year: i32 = digits.get(0..4)?.parse().ok()?;
    let month = field(4..6, 1)?;
    let day = field(6..8, 1)?;
    let hour = field(8..10, 0)?;
    let minute = field(10..12, 0)?;
    let second = field(12..14, 0)?;

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    let offset = parse_pdf_offset(zone)?;
    offset.from_local_datetime(&naive).single()
}

fn parse_pdf_offset(zone: &str) -> Option<FixedOffset> {
    let mut chars = zone.chars();
    let sign = match chars.next() {
        None | Some('Z') => return FixedOffset::east_opt(0),
        Some('+') => 1,
        Some('-') => -1,
        Some(_) => return None,
    };

    let digits: String = chars.filter(char::is_ascii_digit).collect();
    let hours: i32 = digits.get(0..2).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minutes: i32 = digits.get(2..4).and_then(|m| m.parse().ok()).unwrap_or(0);
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
