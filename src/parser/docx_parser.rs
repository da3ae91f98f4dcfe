//! DOCX (OOXML word-processing) document parser using zip + quick-xml.

use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use chrono::DateTime;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader as XmlReader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::detect::FileType;
use crate::error::{Error, Result};
use crate::model::{
    Document, MetadataKey, MetadataValue, Paragraph, RawMetadata, Units, DEFAULT_STYLE,
};

const PACKAGE_RELS_PART: &str = "_rels/.rels";
const DEFAULT_DOCUMENT_PART: &str = "word/document.xml";
const DEFAULT_CORE_PART: &str = "docProps/core.xml";
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";
const CORE_PROPERTIES_REL: &str = "/core-properties";

/// Paragraphs and raw metadata decoded from a DOCX package.
#[derive(Debug, Clone, Default)]
pub struct DecodedParagraphs {
    /// Body paragraphs in document order, numbered from 1
    pub paragraphs: Vec<Paragraph>,
    /// Core properties before normalization
    pub metadata: RawMetadata,
}

/// DOCX document parser.
pub struct DocxParser {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl DocxParser {
    /// Open a DOCX file.
    ///
    /// The file is read into memory and closed before parsing starts.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Open a DOCX package held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }

    /// Parse the package into a [`Document`] for `path`.
    pub fn parse(mut self, path: &Path) -> Result<Document> {
        let decoded = self.decode()?;
        Ok(Document::assemble(
            FileType::Docx,
            Units::Paragraphs(decoded.paragraphs),
            decoded.metadata,
            path,
        ))
    }

    /// Decode body paragraphs and core properties.
    pub fn decode(&mut self) -> Result<DecodedParagraphs> {
        let rels = match self.read_part(PACKAGE_RELS_PART)? {
            Some(xml) => parse_relationships(&xml).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable package relationships: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        let document_part = find_target(&rels, OFFICE_DOCUMENT_REL)
            .unwrap_or_else(|| DEFAULT_DOCUMENT_PART.to_string());
        let document_xml = self
            .read_part(&document_part)?
            .ok_or_else(|| Error::Decode(format!("missing main document part {}", document_part)))?;

        let styles_part = sibling_part(&document_part, "styles.xml");
        let styles = match self.read_part(&styles_part)? {
            Some(xml) => StyleSheet::parse(&xml).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable {}: {}", styles_part, e);
                StyleSheet::default()
            }),
            None => StyleSheet::default(),
        };

        let paragraphs = parse_body(&document_xml, &styles)?;
        log::debug!("Decoded {} body paragraphs", paragraphs.len());

        let core_part =
            find_target(&rels, CORE_PROPERTIES_REL).unwrap_or_else(|| DEFAULT_CORE_PART.to_string());
        let metadata = match self.read_part(&core_part)? {
            Some(xml) => parse_core_properties(&xml).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable {}: {}", core_part, e);
                RawMetadata::new()
            }),
            None => RawMetadata::new(),
        };

        Ok(DecodedParagraphs {
            paragraphs,
            metadata,
        })
    }

    /// Read a package part, `None` if the package does not contain it.
    fn read_part(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        let mut entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut data = Vec::new();
        entry.read_to_end(&mut data)?;
        Ok(Some(data))
    }
}

// ---------------------------------------------------------------------------
// Package relationships
// ---------------------------------------------------------------------------

struct Relationship {
    rel_type: String,
    target: String,
}

fn parse_relationships(xml: &[u8]) -> Result<Vec<Relationship>> {
    let mut reader = XmlReader::from_reader(xml);
    let mut buf = Vec::new();
    let mut rels = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e)
                if e.local_name().as_ref() == b"Relationship" =>
            {
                if let (Some(rel_type), Some(target)) = (attr(e, b"Type"), attr(e, b"Target")) {
                    rels.push(Relationship { rel_type, target });
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

fn find_target(rels: &[Relationship], type_suffix: &str) -> Option<String> {
    rels.iter()
        .find(|r| r.rel_type.ends_with(type_suffix))
        .map(|r| r.target.trim_start_matches('/').to_string())
}

/// Name of a part in the same package folder as `part`.
fn sibling_part(part: &str, name: &str) -> String {
    match part.rfind('/') {
        Some(idx) => format!("{}/{}", &part[..idx], name),
        None => name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

/// Paragraph style names keyed by style id.
#[derive(Debug, Clone, Default)]
struct StyleSheet {
    names: HashMap<String, String>,
    default_paragraph: Option<String>,
}

impl StyleSheet {
    fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = XmlReader::from_reader(xml);
        let mut buf = Vec::new();
        let mut sheet = StyleSheet::default();

        // (style id, is default, name) of the paragraph style being read
        let mut current: Option<(String, bool, Option<String>)> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) if e.local_name().as_ref() == b"style" => {
                    let is_paragraph = attr(e, b"type").map_or(true, |t| t == "paragraph");
                    current = match (is_paragraph, attr(e, b"styleId")) {
                        (true, Some(id)) => {
                            let is_default =
                                attr(e, b"default").is_some_and(|d| d == "1" || d == "true");
                            Some((id, is_default, None))
                        }
                        _ => None,
                    };
                }
                Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"name" => {
                    if let Some((_, _, name)) = current.as_mut() {
                        *name = attr(e, b"val");
                    }
                }
                Event::End(ref e) if e.local_name().as_ref() == b"style" => {
                    if let Some((id, is_default, name)) = current.take() {
                        let name = ui_style_name(name.as_deref().unwrap_or(&id));
                        if is_default {
                            sheet.default_paragraph = Some(name.clone());
                        }
                        sheet.names.insert(id, name);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(sheet)
    }

    /// Style name for a paragraph's `w:pStyle` id.
    ///
    /// Paragraphs without a style take the document's default paragraph
    /// style; ids the sheet does not define fall back to "Normal".
    fn resolve(&self, style_id: Option<&str>) -> String {
        let name = match style_id {
            Some(id) => self.names.get(id),
            None => self.default_paragraph.as_ref(),
        };
        name.cloned().unwrap_or_else(|| DEFAULT_STYLE.to_string())
    }
}

/// Map built-in style names stored in lowercase to their UI spelling.
fn ui_style_name(name: &str) -> String {
    let builtin_lowercase = matches!(name, "caption" | "footer" | "header")
        || name
            .strip_prefix("heading ")
            .is_some_and(|n| n.len() == 1 && n.as_bytes()[0].is_ascii_digit());

    if !builtin_lowercase {
        return name.to_string();
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Body paragraphs
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ParagraphBuilder {
    text: String,
    style_id: Option<String>,
    /// Element depth at which the paragraph was opened
    depth: usize,
    /// Open `w:t` elements
    in_text: bool,
    /// Open text-box containers, whose paragraphs are not part of the body
    nested: usize,
}

impl ParagraphBuilder {
    /// Handle an opening or self-closing element inside the paragraph.
    ///
    /// `depth` is the number of elements open around `e`.
    fn element(&mut self, e: &BytesStart<'_>, parent: Option<&[u8]>, depth: usize) {
        let name = e.local_name();
        match name.as_ref() {
            b"txbxContent" => self.nested += 1,
            _ if self.nested > 0 => {}
            b"pStyle" if matches!(parent, Some(b"pPr")) && depth == self.depth + 2 => {
                self.style_id = attr(e, b"val");
            }
            b"t" if matches!(parent, Some(b"r")) => self.in_text = true,
            b"tab" if matches!(parent, Some(b"r")) => self.text.push('\t'),
            b"br" | b"cr" if matches!(parent, Some(b"r")) => self.text.push('\n'),
            _ => {}
        }
    }

    fn finish(self, number: u32, styles: &StyleSheet) -> Paragraph {
        Paragraph::new(
            number,
            self.text.trim(),
            styles.resolve(self.style_id.as_deref()),
        )
    }
}

/// Walk `w:p` children of `w:body` in order.
///
/// Tables, text boxes, headers and footers are not part of the walk.
fn parse_body(xml: &[u8], styles: &StyleSheet) -> Result<Vec<Paragraph>> {
    let mut reader = XmlReader::from_reader(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<ParagraphBuilder> = None;
    let mut paragraphs = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = e.local_name().as_ref().to_vec();
                let parent = stack.last().map(Vec::as_slice);
                match current.as_mut() {
                    Some(builder) => builder.element(e, parent, stack.len()),
                    None if name == b"p" && matches!(parent, Some(b"body")) => {
                        current = Some(ParagraphBuilder {
                            depth: stack.len(),
                            ..Default::default()
                        });
                    }
                    None => {}
                }
                stack.push(name);
            }
            Event::Empty(ref e) => {
                let parent = stack.last().map(Vec::as_slice);
                match current.as_mut() {
                    Some(builder) => {
                        builder.element(e, parent, stack.len());
                        // <w:t/> opens and closes at once
                        builder.in_text = false;
                    }
                    None if e.local_name().as_ref() == b"p" && matches!(parent, Some(b"body")) => {
                        let number = paragraphs.len() as u32 + 1;
                        paragraphs.push(ParagraphBuilder::default().finish(number, styles));
                    }
                    None => {}
                }
            }
            Event::Text(ref t) => {
                if let Some(builder) = current.as_mut() {
                    if builder.in_text && builder.nested == 0 {
                        builder.text.push_str(&t.unescape()?);
                    }
                }
            }
            Event::CData(ref t) => {
                if let Some(builder) = current.as_mut() {
                    if builder.in_text && builder.nested == 0 {
                        builder.text.push_str(&String::from_utf8_lossy(t));
                    }
                }
            }
            Event::End(ref e) => {
                stack.pop();
                let name = e.local_name();
                if let Some(builder) = current.as_mut() {
                    match name.as_ref() {
                        b"t" => builder.in_text = false,
                        b"txbxContent" => builder.nested = builder.nested.saturating_sub(1),
                        b"p" if stack.len() == builder.depth => {
                            if let Some(done) = current.take() {
                                let number = paragraphs.len() as u32 + 1;
                                paragraphs.push(done.finish(number, styles));
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

// ---------------------------------------------------------------------------
// Core properties
// ---------------------------------------------------------------------------

fn core_property_key(local_name: &[u8]) -> Option<MetadataKey> {
    match local_name {
        b"title" => Some(MetadataKey::Title),
        b"creator" => Some(MetadataKey::Author),
        b"subject" => Some(MetadataKey::Subject),
        b"keywords" => Some(MetadataKey::Keywords),
        b"description" => Some(MetadataKey::Comments),
        b"lastModifiedBy" => Some(MetadataKey::LastModifiedBy),
        b"created" => Some(MetadataKey::Created),
        b"modified" => Some(MetadataKey::Modified),
        b"revision" => Some(MetadataKey::Revision),
        _ => None,
    }
}

fn parse_core_properties(xml: &[u8]) -> Result<RawMetadata> {
    let mut reader = XmlReader::from_reader(xml);
    let mut buf = Vec::new();
    let mut metadata: RawMetadata = [
        MetadataKey::Title,
        MetadataKey::Author,
        MetadataKey::Subject,
        MetadataKey::Keywords,
        MetadataKey::Comments,
        MetadataKey::LastModifiedBy,
        MetadataKey::Created,
        MetadataKey::Modified,
        MetadataKey::Revision,
    ]
    .into_iter()
    .map(|key| (key, None))
    .collect();

    let mut current: Option<(MetadataKey, String)> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                current = core_property_key(e.local_name().as_ref()).map(|k| (k, String::new()));
            }
            Event::Text(ref t) => {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(&t.unescape()?);
                }
            }
            Event::CData(ref t) => {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(&String::from_utf8_lossy(t));
                }
            }
            Event::End(_) => {
                if let Some((key, value)) = current.take() {
                    metadata.insert(key, Some(core_property_value(key, value)));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(metadata)
}

fn core_property_value(key: MetadataKey, value: String) -> MetadataValue {
    let value = value.trim();
    if matches!(key, MetadataKey::Created | MetadataKey::Modified) {
        if let Ok(date) = DateTime::parse_from_rfc3339(value) {
            return MetadataValue::Date(date);
        }
    }
    MetadataValue::text(value)
}

/// Unescaped value of the attribute with the given local name.
fn attr(e: &BytesStart<'_>, local_name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == local_name)
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}
